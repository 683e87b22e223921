//! Normalizer configuration module.
//!
//! Handles loading, validating, and merging `letterbox.toml`. Stock defaults
//! reproduce the fixed behavior: a 1280×720 white canvas at 72 dpi, JPEG
//! quality 85, and the four project screenshots under `images/`.
//!
//! ## Config File Location
//!
//! ```text
//! project/
//! ├── letterbox.toml        # Optional, overrides stock defaults
//! └── images/
//!     ├── sih.png
//!     ├── ...
//!     └── processed/        # Created on first run
//! ```
//!
//! A different file can be passed with `--config`.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [canvas]
//! width = 1280              # Canvas width in pixels
//! height = 720              # Canvas height in pixels
//! dpi = 72                  # DPI written into the output file
//!
//! [encoding]
//! quality = 85              # JPEG quality (1-100); PNG is always lossless
//!
//! [batch]
//! images = ["sih.png", "personal_capsule.png", "dev_search.png", "RestAPI.jpg"]
//! source_dir = "images"
//! output_dir = "images/processed"
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::imaging::{CanvasSpec, Dpi, Quality};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config file name, looked up in the project root.
pub const CONFIG_FILE: &str = "letterbox.toml";

/// Screenshots processed when no list is given.
pub const DEFAULT_IMAGES: &[&str] = &[
    "sih.png",
    "personal_capsule.png",
    "dev_search.png",
    "RestAPI.jpg",
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `letterbox.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LetterboxConfig {
    /// Target canvas size and DPI.
    pub canvas: CanvasConfig,
    /// Encoder settings.
    pub encoding: EncodingConfig,
    /// Which files to process and where.
    pub batch: BatchConfig,
}

impl LetterboxConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::Validation(
                "canvas.width and canvas.height must be non-zero".into(),
            ));
        }
        if self.canvas.dpi == 0 {
            return Err(ConfigError::Validation("canvas.dpi must be non-zero".into()));
        }
        if !(1..=100).contains(&self.encoding.quality) {
            return Err(ConfigError::Validation(
                "encoding.quality must be 1-100".into(),
            ));
        }
        Ok(())
    }

    /// The canvas the normalizer should target.
    pub fn canvas_spec(&self) -> CanvasSpec {
        CanvasSpec {
            width: self.canvas.width,
            height: self.canvas.height,
            dpi: Dpi(self.canvas.dpi),
            quality: Quality::new(self.encoding.quality),
        }
    }
}

/// Target canvas settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        let spec = CanvasSpec::default();
        Self {
            width: spec.width,
            height: spec.height,
            dpi: spec.dpi.value(),
        }
    }
}

/// Encoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodingConfig {
    /// JPEG quality. PNG output ignores it.
    pub quality: u8,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default().value(),
        }
    }
}

/// Batch input list and directories, relative to the project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    pub images: Vec<String>,
    pub source_dir: String,
    pub output_dir: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            images: DEFAULT_IMAGES.iter().map(|s| s.to_string()).collect(),
            source_dir: "images".to_string(),
            output_dir: "images/processed".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(LetterboxConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<LetterboxConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: LetterboxConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `letterbox.toml` in the given project root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result. A missing file yields the stock defaults.
pub fn load_config(root: &Path) -> Result<LetterboxConfig, ConfigError> {
    load_config_file(&root.join(CONFIG_FILE))
}

/// Load config from an explicit file path. Missing files yield stock defaults.
pub fn load_config_file(path: &Path) -> Result<LetterboxConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(path)?)
}

/// Returns a fully-commented stock `letterbox.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# letterbox configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Canvas: every image is fitted onto a white canvas of exactly this size,
# centered, with white bars filling the rest.
# ---------------------------------------------------------------------------
[canvas]
width = 1280
height = 720
# Dots per inch written into the output file (JFIF density / PNG pHYs).
dpi = 72

# ---------------------------------------------------------------------------
# Encoding: sources named *.jpg are written as JPEG, everything else as PNG.
# ---------------------------------------------------------------------------
[encoding]
# JPEG quality (1-100). PNG output is lossless and ignores this.
quality = 85

# ---------------------------------------------------------------------------
# Batch: files to process, relative to source_dir. Directories are relative
# to the project root. Outputs are named processed_<name>.
# ---------------------------------------------------------------------------
[batch]
images = ["sih.png", "personal_capsule.png", "dev_search.png", "RestAPI.jpg"]
source_dir = "images"
output_dir = "images/processed"
"##
}
