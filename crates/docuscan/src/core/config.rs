//! Configuration loading and management.
//!
//! [`BatchConfig`] carries every tunable of the batch pipeline. It can be
//! created programmatically, loaded from TOML or JSON files, or
//! discovered (`docuscan.toml` in the current or a parent directory).

use crate::ocr::OcrParams;
use crate::{DocuscanError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Batch pipeline configuration.
///
/// # Example
///
/// ```rust
/// use docuscan::BatchConfig;
///
/// let config = BatchConfig {
///     input_dir: "data/scans".into(),
///     output_dir: "output/ocr_results".into(),
///     ..BatchConfig::default()
/// };
/// assert_eq!(config.contrast_threshold, 0.7);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Directory scanned (recursively) for input images.
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Directory receiving one JSON result record per input.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Worker pool size (None = number of CPUs, capped at 4).
    ///
    /// The pool bounds resource use of the OCR model, which may hold
    /// GPU/CPU resources per invocation.
    #[serde(default)]
    pub worker_count: Option<usize>,

    /// Contrast level below which a region is re-recognized.
    #[serde(default = "default_contrast_threshold")]
    pub contrast_threshold: f64,

    /// Target contrast for the second recognition pass.
    #[serde(default = "default_adjust_contrast")]
    pub adjust_contrast: f64,

    /// Recognition language codes.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    /// Checkpoint file recording processed input names.
    #[serde(default = "default_progress_file")]
    pub progress_file: PathBuf,

    /// Persist the progress set after every N successes (default 1).
    ///
    /// The set is always flushed once the run drains, so raising this
    /// trades rerun work after a crash for fewer checkpoint rewrites.
    #[serde(default = "default_persist_every")]
    pub persist_every: usize,

    /// Optional per-item OCR timeout in seconds (None = wait forever).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            worker_count: None,
            contrast_threshold: default_contrast_threshold(),
            adjust_contrast: default_adjust_contrast(),
            languages: default_languages(),
            progress_file: default_progress_file(),
            persist_every: default_persist_every(),
            timeout_secs: None,
        }
    }
}

impl BatchConfig {
    /// Resolved worker pool size.
    pub fn effective_worker_count(&self) -> usize {
        self.worker_count
            .unwrap_or_else(|| num_cpus::get().clamp(1, 4))
            .max(1)
    }

    /// OCR invocation parameters derived from this config.
    pub fn ocr_params(&self) -> OcrParams {
        OcrParams {
            languages: self.languages.clone(),
            contrast_threshold: self.contrast_threshold,
            adjust_contrast: self.adjust_contrast,
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DocuscanError::Io)?;
        toml::from_str(&content)
            .map_err(|e| DocuscanError::parsing_with_source(format!("Invalid TOML config: {}", e), e))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DocuscanError::Io)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a file, dispatching on extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(DocuscanError::validation(format!(
                "Unsupported config format (expected .toml or .json): {}",
                path.display()
            ))),
        }
    }

    /// Search for `docuscan.toml` in the current directory and its
    /// ancestors. Returns `Ok(None)` when no config file is found.
    pub fn discover() -> Result<Option<Self>> {
        let cwd = std::env::current_dir().map_err(DocuscanError::Io)?;
        for dir in cwd.ancestors() {
            let candidate = dir.join("docuscan.toml");
            if candidate.is_file() {
                return Self::from_toml_file(&candidate).map(Some);
            }
        }
        Ok(None)
    }
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("output/ocr_results")
}
fn default_contrast_threshold() -> f64 {
    0.7
}
fn default_adjust_contrast() -> f64 {
    0.5
}
fn default_languages() -> Vec<String> {
    vec!["en".to_string(), "ru".to_string()]
}
fn default_progress_file() -> PathBuf {
    PathBuf::from("ocr_progress.json")
}
fn default_persist_every() -> usize {
    1
}
