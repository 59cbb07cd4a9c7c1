//! OCR (Optical Character Recognition) subsystem.
//!
//! The batch runner talks to recognizers through the [`OcrBackend`]
//! trait: `read_text(path, params) -> lines`. The stock implementation,
//! [`EasyOcrBackend`], shells out to the `easyocr` CLI; tests inject
//! scripted backends through the same seam.
//!
//! # Example
//!
//! ```rust,no_run
//! use docuscan::ocr::{EasyOcrBackend, OcrBackend, OcrParams};
//!
//! # async fn example() -> Result<(), docuscan::ocr::OcrError> {
//! let backend = EasyOcrBackend::new();
//! let lines = backend
//!     .read_text(std::path::Path::new("scan.png"), &OcrParams::default())
//!     .await?;
//! println!("{} text regions", lines.len());
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod easyocr;
pub mod error;

pub use backend::{OcrBackend, OcrParams};
pub use easyocr::EasyOcrBackend;
pub use error::OcrError;
