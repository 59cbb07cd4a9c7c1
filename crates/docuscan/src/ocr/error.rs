use std::fmt;

/// OCR-specific errors.
#[derive(Debug, Clone)]
pub enum OcrError {
    /// The backend executable could not be started (not installed, not on PATH).
    BackendUnavailable(String),
    InvalidConfiguration(String),
    ProcessingFailed(String),
    Timeout(String),
    IOError(String),
}

impl fmt::Display for OcrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BackendUnavailable(msg) => write!(f, "OCR backend unavailable: {}", msg),
            Self::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            Self::ProcessingFailed(msg) => write!(f, "OCR processing failed: {}", msg),
            Self::Timeout(msg) => write!(f, "OCR timed out: {}", msg),
            Self::IOError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for OcrError {}

// NOTE: No From<std::io::Error> impl - IO errors must bubble up unchanged per error handling policy
