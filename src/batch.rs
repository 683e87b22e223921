//! Batch driver: normalize a list of images from one directory into another.
//!
//! For each requested file name the driver checks that the file exists in
//! the source directory, then hands it to
//! [`normalize_image`](crate::imaging::normalize_image). Every file produces
//! exactly one [`ImageOutcome`]; a missing or broken file never stops the
//! batch.
//!
//! ## Layout
//!
//! ```text
//! images/
//! ├── sih.png
//! ├── RestAPI.jpg
//! └── processed/
//!     ├── processed_sih.png
//!     └── processed_RestAPI.jpg
//! ```
//!
//! ## Progress
//!
//! Outcomes are pushed to an optional [`Sender`] as soon as each file is done,
//! so the CLI can print while the batch is still running. The same outcomes
//! are collected into the returned [`BatchReport`].
//!
//! Files are processed one at a time, in list order.

use crate::config::BatchConfig;
use crate::imaging::{
    CanvasSpec, ImageBackend, NormalizedImage, RustBackend, normalize_image,
    supported_input_extensions,
};
use crate::naming::is_output_name;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to list source directory: {0}")]
    Discovery(#[from] walkdir::Error),
}

/// Source and output directories for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchLayout {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl BatchLayout {
    /// Resolve the configured directories against a project root.
    pub fn from_config(root: &Path, batch: &BatchConfig) -> Self {
        Self {
            source_dir: root.join(&batch.source_dir),
            output_dir: root.join(&batch.output_dir),
        }
    }
}

/// What happened to one requested file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImageOutcome {
    Processed {
        name: String,
        #[serde(flatten)]
        image: NormalizedImage,
    },
    NotFound {
        name: String,
    },
    Failed {
        name: String,
        source: PathBuf,
        error: String,
    },
}

/// Outcome counts for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
    pub missing: usize,
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Processed {}, failed {}, missing {}",
            self.processed, self.failed, self.missing
        )
    }
}

/// Ordered outcomes of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub summary: BatchSummary,
    pub outcomes: Vec<ImageOutcome>,
}

impl BatchReport {
    fn new(layout: &BatchLayout, outcomes: Vec<ImageOutcome>) -> Self {
        let mut summary = BatchSummary::default();
        for outcome in &outcomes {
            match outcome {
                ImageOutcome::Processed { .. } => summary.processed += 1,
                ImageOutcome::Failed { .. } => summary.failed += 1,
                ImageOutcome::NotFound { .. } => summary.missing += 1,
            }
        }
        Self {
            source_dir: layout.source_dir.clone(),
            output_dir: layout.output_dir.clone(),
            summary,
            outcomes,
        }
    }
}

/// Existence of one requested input, as reported by `check`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputStatus {
    pub name: String,
    pub path: PathBuf,
    pub exists: bool,
}

/// Resolve requested names against the source directory without processing.
pub fn check_inputs(source_dir: &Path, names: &[String]) -> Vec<InputStatus> {
    names
        .iter()
        .map(|name| {
            let path = source_dir.join(name);
            let exists = path.exists();
            InputStatus {
                name: name.clone(),
                path,
                exists,
            }
        })
        .collect()
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            supported_input_extensions()
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
}

/// List decodable images directly inside `source_dir`, sorted by name.
///
/// Subdirectories (including the output directory) are not entered, and
/// files that already carry the output prefix are skipped.
pub fn discover_images(source_dir: &Path) -> Result<Vec<String>, BatchError> {
    let mut names = Vec::new();
    for entry in walkdir::WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() || !has_supported_extension(entry.path()) {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_output_name(&name) {
            names.push(name);
        }
    }
    Ok(names)
}

/// Run a batch with the production [`RustBackend`].
pub fn run_batch(
    layout: &BatchLayout,
    names: &[String],
    canvas: &CanvasSpec,
    events: Option<Sender<ImageOutcome>>,
) -> Result<BatchReport, BatchError> {
    run_batch_with_backend(&RustBackend::new(), layout, names, canvas, events)
}

/// Run a batch using a specific backend (allows testing with mock).
///
/// Only failing to create the output directory aborts; every per-file
/// problem becomes an [`ImageOutcome`].
pub fn run_batch_with_backend(
    backend: &impl ImageBackend,
    layout: &BatchLayout,
    names: &[String],
    canvas: &CanvasSpec,
    events: Option<Sender<ImageOutcome>>,
) -> Result<BatchReport, BatchError> {
    std::fs::create_dir_all(&layout.output_dir).map_err(|source| BatchError::OutputDir {
        path: layout.output_dir.clone(),
        source,
    })?;

    let mut outcomes = Vec::with_capacity(names.len());
    for name in names {
        let outcome = process_one(backend, layout, name, canvas);
        if let Some(tx) = &events {
            // The receiver only prints; a closed channel must not stop the batch.
            tx.send(outcome.clone()).ok();
        }
        outcomes.push(outcome);
    }

    Ok(BatchReport::new(layout, outcomes))
}

fn process_one(
    backend: &impl ImageBackend,
    layout: &BatchLayout,
    name: &str,
    canvas: &CanvasSpec,
) -> ImageOutcome {
    let source = layout.source_dir.join(name);
    if !source.exists() {
        return ImageOutcome::NotFound {
            name: name.to_string(),
        };
    }

    match normalize_image(backend, &source, &layout.output_dir, canvas) {
        Ok(image) => ImageOutcome::Processed {
            name: name.to_string(),
            image,
        },
        Err(e) => ImageOutcome::Failed {
            name: name.to_string(),
            source,
            error: e.to_string(),
        },
    }
}
