//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take the canvas, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{Placement, calculate_placement};
use super::params::{CanvasSpec, NormalizeParams, OutputFormat};
use crate::naming::{base_name, output_file_name, output_format_for};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// A successfully normalized image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedImage {
    pub source: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
    /// Original dimensions (width, height)
    pub source_dimensions: (u32, u32),
    pub placement: Placement,
}

/// Plan a normalize operation without executing it.
///
/// Useful for testing parameter generation.
pub fn plan_normalize(
    source: &Path,
    output_dir: &Path,
    source_dims: (u32, u32),
    canvas: &CanvasSpec,
) -> NormalizeParams {
    let name = base_name(source);

    NormalizeParams {
        source: source.to_path_buf(),
        output: output_dir.join(output_file_name(&name)),
        canvas: *canvas,
        placement: calculate_placement(source_dims, (canvas.width, canvas.height)),
        format: output_format_for(&name),
    }
}

/// Normalize one image onto the canvas and write it into `output_dir`.
///
/// Canvas values are not validated here; callers pass sane positive sizes.
pub fn normalize_image(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    canvas: &CanvasSpec,
) -> Result<NormalizedImage> {
    let dims = get_dimensions(backend, source)?;
    let params = plan_normalize(source, output_dir, dims, canvas);
    backend.normalize(&params)?;

    Ok(NormalizedImage {
        source: params.source,
        output: params.output,
        format: params.format,
        source_dimensions: dims,
        placement: params.placement,
    })
}
