//! OCR backend trait and invocation parameters.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::OcrError;

/// Parameters passed to the OCR backend for each image.
///
/// The contrast pair mirrors the underlying recognizer's tuning knobs:
/// `contrast_threshold` is the level below which a region is re-run with
/// adjusted contrast, and `adjust_contrast` is the target contrast used
/// for that second pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrParams {
    /// Recognition language codes (backend-specific, e.g. "en", "ru").
    pub languages: Vec<String>,
    pub contrast_threshold: f64,
    pub adjust_contrast: f64,
}

impl Default for OcrParams {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string(), "ru".to_string()],
            contrast_threshold: 0.7,
            adjust_contrast: 0.5,
        }
    }
}

impl OcrParams {
    pub fn validate(&self) -> Result<(), OcrError> {
        if self.languages.is_empty() {
            return Err(OcrError::InvalidConfiguration(
                "at least one recognition language is required".to_string(),
            ));
        }
        for value in [self.contrast_threshold, self.adjust_contrast] {
            if !(0.0..=1.0).contains(&value) {
                return Err(OcrError::InvalidConfiguration(format!(
                    "contrast parameters must be within 0.0..=1.0, got {}",
                    value
                )));
            }
        }
        Ok(())
    }
}

/// A text recognizer the batch runner can dispatch images to.
///
/// Implementations are treated as black boxes: they may be slow (model
/// inference) and may fail with a backend-specific error. The runner
/// applies no validation to the returned lines.
#[async_trait]
pub trait OcrBackend: Send + Sync {
    /// Recognize text in the image at `path`, returning one string per
    /// detected text region.
    async fn read_text(&self, path: &Path, params: &OcrParams) -> Result<Vec<String>, OcrError>;

    /// Backend name for logs and diagnostics.
    fn name(&self) -> &str;
}
