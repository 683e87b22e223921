//! Output naming for normalized images.
//!
//! Every output keeps the source file name, extension included, behind a
//! fixed prefix:
//! - `sih.png` → `processed_sih.png`
//! - `RestAPI.jpg` → `processed_RestAPI.jpg`
//!
//! ## Encoder Choice
//!
//! The encoder is chosen from the source *name*, not the decoded format: a
//! name ending in `.jpg` (any case) is written as JPEG, everything else as
//! PNG. That includes `.jpeg`, which is written as PNG bytes under a `.jpeg`
//! name.

use crate::imaging::OutputFormat;
use std::path::Path;

/// Prefix added to every output file name.
pub const OUTPUT_PREFIX: &str = "processed_";

/// Derive the output file name for a source file name.
pub fn output_file_name(source_name: &str) -> String {
    format!("{OUTPUT_PREFIX}{source_name}")
}

/// Base name of a source path, lossily converted. Empty if the path has none.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Pick the encoder for a source file name.
pub fn output_format_for(source_name: &str) -> OutputFormat {
    if source_name.to_lowercase().ends_with(".jpg") {
        OutputFormat::Jpeg
    } else {
        OutputFormat::Png
    }
}

/// Whether a file name already carries the output prefix.
pub fn is_output_name(name: &str) -> bool {
    name.starts_with(OUTPUT_PREFIX)
}
