//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and, where the output is printed in one go, a `print_*`
//! wrapper that writes to stdout. Format functions are pure: no I/O, no side
//! effects.
//!
//! # Output Format
//!
//! ## Run
//!
//! One line per requested file, in list order, then a summary:
//!
//! ```text
//! Successfully processed sih.png -> processed_sih.png
//! Error processing images/personal_capsule.png: Failed to decode ...
//! Image not found: dev_search.png
//! Successfully processed RestAPI.jpg -> processed_RestAPI.jpg
//! Processed 2, failed 1, missing 1
//! ```
//!
//! ## Check
//!
//! ```text
//! sih.png → images/sih.png
//! Image not found: dev_search.png
//! 1 of 2 images found
//! ```

use crate::batch::{BatchReport, ImageOutcome, InputStatus};
use crate::naming::output_file_name;

/// Format the console line for one finished file.
pub fn format_outcome(outcome: &ImageOutcome) -> Vec<String> {
    match outcome {
        ImageOutcome::Processed { name, .. } => vec![format!(
            "Successfully processed {} -> {}",
            name,
            output_file_name(name)
        )],
        ImageOutcome::NotFound { name } => vec![format!("Image not found: {}", name)],
        ImageOutcome::Failed { source, error, .. } => {
            vec![format!("Error processing {}: {}", source.display(), error)]
        }
    }
}

/// Format the closing summary of a batch.
pub fn format_batch_summary(report: &BatchReport) -> Vec<String> {
    vec![report.summary.to_string()]
}

/// Format a whole batch: every outcome followed by the summary.
pub fn format_batch_output(report: &BatchReport) -> Vec<String> {
    let mut lines: Vec<String> = report.outcomes.iter().flat_map(format_outcome).collect();
    lines.extend(format_batch_summary(report));
    lines
}

pub fn print_batch_summary(report: &BatchReport) {
    for line in format_batch_summary(report) {
        println!("{}", line);
    }
}

/// Format `check` output: where each input resolves, or that it is missing.
pub fn format_check_output(statuses: &[InputStatus]) -> Vec<String> {
    let mut lines: Vec<String> = statuses
        .iter()
        .map(|status| {
            if status.exists {
                format!("{} \u{2192} {}", status.name, status.path.display())
            } else {
                format!("Image not found: {}", status.name)
            }
        })
        .collect();

    let found = statuses.iter().filter(|s| s.exists).count();
    lines.push(format!("{} of {} images found", found, statuses.len()));
    lines
}

pub fn print_check_output(statuses: &[InputStatus]) {
    for line in format_check_output(statuses) {
        println!("{}", line);
    }
}
