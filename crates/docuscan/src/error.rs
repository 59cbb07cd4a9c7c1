//! Error types for DocuScan.
//!
//! All fallible operations in the library return [`Result`], built on
//! [`DocuscanError`]:
//!
//! - Use `thiserror` for automatic `Error` trait implementation
//! - Preserve error chains with `#[source]` attributes
//! - Include context in error messages (file paths, config values, etc.)
//!
//! **System errors always bubble up unchanged:** `DocuscanError::Io` (from
//! `std::io::Error`) indicates a real filesystem problem and is never
//! wrapped or suppressed. Application errors (`Ocr`, `Parsing`,
//! `Validation`, `Serialization`) wrap a message plus optional source.
use thiserror::Error;

/// Result type alias using `DocuscanError`.
pub type Result<T> = std::result::Result<T, DocuscanError>;

/// Main error type for all DocuScan operations.
///
/// # Variants
///
/// - `Io` - File system and I/O errors (always bubble up)
/// - `Ocr` - OCR backend failures
/// - `Parsing` - Document parsing errors (corrupt PDFs, bad subprocess output)
/// - `Validation` - Input validation errors (invalid paths, config, parameters)
/// - `Serialization` - JSON/TOML serialization errors
/// - `ImageProcessing` - Image encode/decode errors
/// - `MissingDependency` - Missing optional system dependencies (easyocr, pdfium)
/// - `Other` - Catch-all for uncommon errors
#[derive(Debug, Error)]
pub enum DocuscanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OCR error: {message}")]
    Ocr {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Image processing error: {message}")]
    ImageProcessing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for DocuscanError {
    fn from(err: serde_json::Error) -> Self {
        DocuscanError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<crate::ocr::OcrError> for DocuscanError {
    fn from(err: crate::ocr::OcrError) -> Self {
        DocuscanError::Ocr {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl DocuscanError {
    /// Create an Ocr error.
    pub fn ocr<S: Into<String>>(message: S) -> Self {
        Self::Ocr {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Parsing error.
    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Serialization error.
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization {
            message: message.into(),
            source: None,
        }
    }

    /// Create an ImageProcessing error with source.
    pub fn image_processing_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageProcessing {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a Parsing error with source.
    pub fn parsing_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Parsing {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DocuscanError = io_err.into();
        assert!(matches!(err, DocuscanError::Io(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_io_error_bubbles_unchanged() {
        fn read_file() -> Result<String> {
            let content = std::fs::read_to_string("/nonexistent/file.txt")?;
            Ok(content)
        }

        let result = read_file();
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), DocuscanError::Io(_)));
    }

    #[test]
    fn test_ocr_error() {
        let err = DocuscanError::ocr("backend exited with status 1");
        assert_eq!(err.to_string(), "OCR error: backend exited with status 1");
    }

    #[test]
    fn test_validation_error() {
        let err = DocuscanError::validation("invalid input");
        assert_eq!(err.to_string(), "Validation error: invalid input");
    }

    #[test]
    fn test_parsing_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad data");
        let err = DocuscanError::parsing_with_source("invalid format", source);
        assert_eq!(err.to_string(), "Parsing error: invalid format");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: DocuscanError = json_err.into();
        assert!(matches!(err, DocuscanError::Serialization { .. }));
        assert!(err.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_ocr_error_conversion() {
        let ocr_err = crate::ocr::OcrError::ProcessingFailed("no text regions".to_string());
        let err: DocuscanError = ocr_err.into();
        assert!(matches!(err, DocuscanError::Ocr { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_missing_dependency_error() {
        let err = DocuscanError::MissingDependency("easyocr not found on PATH".to_string());
        assert_eq!(err.to_string(), "Missing dependency: easyocr not found on PATH");
    }

    #[test]
    fn test_other_error() {
        let err = DocuscanError::Other("unexpected".to_string());
        assert_eq!(err.to_string(), "unexpected");
    }
}
