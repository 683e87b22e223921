//! Image processing in pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::with_guessed_format` + `into_dimensions` |
//! | **Flatten** | explicit alpha blend onto white |
//! | **Resize** | Lanczos3 via `image::imageops::resize` |
//! | **Encode** | JPEG (`image`, JFIF density) or PNG (`png`, `pHYs`) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for letterbox math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{
    Placement, calculate_center_offset, calculate_fit_dimensions, calculate_placement,
};
pub use operations::{NormalizedImage, get_dimensions, normalize_image, plan_normalize};
pub use params::{CanvasSpec, Dpi, NormalizeParams, OutputFormat, Quality};
pub use rust_backend::{RustBackend, supported_input_extensions};
