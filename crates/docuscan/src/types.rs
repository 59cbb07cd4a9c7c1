//! Shared data types for the batch pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Persisted output of processing one input image.
///
/// One record is written per input file, named after the input with the
/// extension replaced by `.json`. Records are created once and never
/// mutated; rerunning the pipeline over the same output directory
/// overwrites them unconditionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrResultRecord {
    /// Input file name (base name, extension included).
    pub file: String,
    /// Recognized text lines, in backend order.
    pub text: Vec<String>,
}

/// Outcome of one batch item.
///
/// Failures are captured here instead of being swallowed: an item either
/// produced a result record or carries the error that prevented it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItemOutcome {
    /// Input file name (base name).
    pub file_name: String,
    /// Path of the written result record, if the item succeeded.
    pub output_path: Option<PathBuf>,
    /// Error message, if the item failed.
    pub error: Option<String>,
}

impl BatchItemOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Summary of one batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of image files discovered under the input directory.
    pub discovered: usize,
    /// Number of files skipped because they were already in the progress set.
    pub skipped: usize,
    /// Per-item outcomes for the files that were actually dispatched.
    pub outcomes: Vec<BatchItemOutcome>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}
