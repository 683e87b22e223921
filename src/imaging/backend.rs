//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations every backend must
//! support: identify and normalize.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), pure Rust, built on
//! the `image` and `png` crates.

use super::params::NormalizeParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {message}")]
    Decode { path: String, message: String },
    #[error("{format} encode failed: {message}")]
    Encode {
        format: &'static str,
        message: String,
    },
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Get image dimensions without decoding pixels.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode, flatten, resize, center on the canvas, and encode to `params.output`.
    fn normalize(&self, params: &NormalizeParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::calculations::Placement;
    use crate::imaging::params::{CanvasSpec, OutputFormat};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock backend that records operations without executing them.
    ///
    /// Dimensions are looked up by file name; names listed in `failures`
    /// make `normalize` fail with the given message.
    #[derive(Default)]
    pub struct MockBackend {
        pub dimensions: Mutex<HashMap<String, Dimensions>>,
        pub failures: Mutex<HashMap<String, String>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Normalize {
            source: String,
            output: String,
            canvas: (u32, u32),
            dpi: u32,
            quality: u8,
            placement: Placement,
            format: OutputFormat,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(dims: &[(&str, u32, u32)]) -> Self {
            let backend = Self::new();
            {
                let mut map = backend.dimensions.lock().unwrap();
                for (name, width, height) in dims {
                    map.insert(
                        name.to_string(),
                        Dimensions {
                            width: *width,
                            height: *height,
                        },
                    );
                }
            }
            backend
        }

        pub fn failing_on(self, name: &str, message: &str) -> Self {
            self.failures
                .lock()
                .unwrap()
                .insert(name.to_string(), message.to_string());
            self
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Identify(path.to_string_lossy().to_string()));

            self.dimensions
                .lock()
                .unwrap()
                .get(&file_name(path))
                .copied()
                .ok_or_else(|| BackendError::ProcessingFailed("No mock dimensions".to_string()))
        }

        fn normalize(&self, params: &NormalizeParams) -> Result<(), BackendError> {
            if let Some(message) = self.failures.lock().unwrap().get(&file_name(&params.source)) {
                return Err(BackendError::ProcessingFailed(message.clone()));
            }
            self.operations.lock().unwrap().push(RecordedOp::Normalize {
                source: params.source.to_string_lossy().to_string(),
                output: params.output.to_string_lossy().to_string(),
                canvas: (params.canvas.width, params.canvas.height),
                dpi: params.canvas.dpi.value(),
                quality: params.canvas.quality.value(),
                placement: params.placement,
                format: params.format,
            });
            Ok(())
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_dimensions(&[("image.jpg", 800, 600)]);

        let result = backend.identify(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(result.width, 800);
        assert_eq!(result.height, 600);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_identify_unknown_errors() {
        let backend = MockBackend::new();
        assert!(backend.identify(Path::new("/nope.png")).is_err());
    }

    #[test]
    fn mock_records_normalize() {
        let backend = MockBackend::new();

        backend
            .normalize(&NormalizeParams {
                source: "/source.png".into(),
                output: "/out/processed_source.png".into(),
                canvas: CanvasSpec::default(),
                placement: Placement {
                    width: 960,
                    height: 720,
                    x: 160,
                    y: 0,
                },
                format: OutputFormat::Png,
            })
            .unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Normalize {
                canvas: (1280, 720),
                dpi: 72,
                quality: 85,
                format: OutputFormat::Png,
                ..
            }
        ));
    }

    #[test]
    fn mock_normalize_failure_is_not_recorded() {
        let backend = MockBackend::new().failing_on("broken.png", "bad data");
        let result = backend.normalize(&NormalizeParams {
            source: "/images/broken.png".into(),
            output: "/out/processed_broken.png".into(),
            canvas: CanvasSpec::default(),
            placement: Placement {
                width: 1,
                height: 1,
                x: 0,
                y: 0,
            },
            format: OutputFormat::Png,
        });
        assert!(matches!(result, Err(BackendError::ProcessingFailed(m)) if m == "bad data"));
        assert!(backend.get_operations().is_empty());
    }
}
