//! EasyOCR subprocess backend.
//!
//! Shells out to the `easyocr` command-line interface and parses its
//! line-per-region stdout. The process is spawned per image; the runner's
//! worker pool bounds how many run at once.

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use super::backend::{OcrBackend, OcrParams};
use super::error::OcrError;

/// Default executable name, resolved via PATH.
const DEFAULT_COMMAND: &str = "easyocr";

/// OCR backend driving the `easyocr` CLI.
pub struct EasyOcrBackend {
    command: String,
    /// Optional per-invocation timeout. `None` means a hung recognizer
    /// stalls one worker slot indefinitely.
    timeout: Option<Duration>,
}

impl EasyOcrBackend {
    pub fn new() -> Self {
        Self {
            command: DEFAULT_COMMAND.to_string(),
            timeout: None,
        }
    }

    /// Use a custom executable (absolute path or PATH-resolved name).
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    async fn invoke(&self, path: &Path, params: &OcrParams) -> Result<std::process::Output, OcrError> {
        let mut cmd = Command::new(&self.command);
        cmd.arg("-l");
        for lang in &params.languages {
            cmd.arg(lang);
        }
        cmd.arg("-f")
            .arg(path)
            .arg("--detail")
            .arg("0")
            .arg("--contrast_ths")
            .arg(params.contrast_threshold.to_string())
            .arg("--adjust_contrast")
            .arg(params.adjust_contrast.to_string())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped());

        let child = cmd
            .spawn()
            .map_err(|e| OcrError::BackendUnavailable(format!("failed to execute '{}': {}", self.command, e)))?;

        match self.timeout {
            Some(limit) => match timeout(limit, child.wait_with_output()).await {
                Ok(Ok(output)) => Ok(output),
                Ok(Err(e)) => Err(OcrError::IOError(format!("failed to wait for '{}': {}", self.command, e))),
                Err(_) => Err(OcrError::Timeout(format!(
                    "'{}' exceeded {}s for {}",
                    self.command,
                    limit.as_secs(),
                    path.display()
                ))),
            },
            None => child
                .wait_with_output()
                .await
                .map_err(|e| OcrError::IOError(format!("failed to wait for '{}': {}", self.command, e))),
        }
    }
}

impl Default for EasyOcrBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OcrBackend for EasyOcrBackend {
    async fn read_text(&self, path: &Path, params: &OcrParams) -> Result<Vec<String>, OcrError> {
        params.validate()?;

        let output = self.invoke(path, params).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);

            // Recognition errors are reported on stderr; anything else is a system error
            let stderr_lower = stderr.to_lowercase();
            if stderr_lower.contains("error") || stderr_lower.contains("failed") || stderr_lower.contains("traceback")
            {
                return Err(OcrError::ProcessingFailed(format!(
                    "'{}' failed for {}: {}",
                    self.command,
                    path.display(),
                    stderr.trim()
                )));
            }

            return Err(OcrError::IOError(format!(
                "'{}' exited with {} for {}: {}",
                self.command,
                output.status,
                path.display(),
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| OcrError::ProcessingFailed(format!("failed to decode '{}' output: {}", self.command, e)))?;

        Ok(parse_detail0_output(&stdout))
    }

    fn name(&self) -> &str {
        "easyocr"
    }
}

/// Parse `--detail 0` output: one recognized region per line, blank lines
/// ignored.
fn parse_detail0_output(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
