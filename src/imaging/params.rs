//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides the canvas, placement, and output path) and the
//! [`backend`](super::backend) (which does the actual pixel work). This
//! separation allows swapping backends (e.g. for testing with a mock) without
//! changing operation logic.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100, default 85). Clamped on construction.
//! - [`Dpi`]: Dots-per-inch metadata written into the output file (default 72).
//! - [`CanvasSpec`]: Target canvas: width, height, DPI, quality.
//! - [`OutputFormat`]: Encoder chosen for the output file.
//! - [`NormalizeParams`]: Full specification for one normalize: source, output, canvas, placement, format.

use super::calculations::Placement;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// Dots-per-inch metadata. Informational only: pixel dimensions never depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dpi(pub u32);

impl Dpi {
    pub fn value(self) -> u32 {
        self.0
    }

    /// DPI as a JFIF density value. JFIF stores 16-bit densities.
    pub fn as_jfif(self) -> u16 {
        u16::try_from(self.0).unwrap_or(u16::MAX)
    }

    /// DPI converted to pixels per meter, as stored in a PNG `pHYs` chunk.
    ///
    /// 72 dpi → 2835 px/m.
    pub fn pixels_per_meter(self) -> u32 {
        (self.0 as f64 / 0.0254).round() as u32
    }
}

impl Default for Dpi {
    fn default() -> Self {
        Self(72)
    }
}

/// The fixed-size canvas every image is normalized onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    pub dpi: Dpi,
    pub quality: Quality,
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            dpi: Dpi::default(),
            quality: Quality::default(),
        }
    }
}

/// Encoder used for the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Png,
}

/// Parameters for one normalize operation (decode, fit, paste, encode).
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub canvas: CanvasSpec,
    /// Resized dimensions and offset on the canvas.
    pub placement: Placement,
    pub format: OutputFormat,
}
