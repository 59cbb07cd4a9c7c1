//! Docuscan - Batch OCR Document Pipeline
//!
//! Docuscan turns a directory of scanned document images into one JSON
//! result record per image, with resumable progress checkpointing and a
//! bounded worker pool. OCR itself is delegated to a pluggable backend
//! (EasyOCR over a subprocess by default).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use docuscan::{BatchConfig, EasyOcrBackend, JsonProgressStore, run_batch_sync};
//!
//! # fn main() -> docuscan::Result<()> {
//! let config = BatchConfig::default();
//! let backend = Arc::new(EasyOcrBackend::new());
//! let store = Arc::new(JsonProgressStore::new(&config.progress_file));
//!
//! let summary = run_batch_sync(&config, backend, store)?;
//! println!("{} processed, {} skipped", summary.succeeded(), summary.skipped);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core Module** (`core`): batch orchestration, config loading, file
//!   enumeration, result output
//! - **Progress** (`progress`): flat-file checkpoint of processed names
//! - **OCR** (`ocr`): backend trait and the EasyOCR subprocess adapter
//! - **PDF** (`pdf`, feature-gated): PDF-to-JPEG rasterization so scanned
//!   PDFs can enter the image pipeline
//! - **API** (`api`, feature-gated): HTTP service exposing single-file
//!   OCR and batch runs

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod ocr;
pub mod progress;
pub mod types;

#[cfg(feature = "api")]
pub mod api;

#[cfg(feature = "pdf")]
pub mod pdf;

pub use core::config::BatchConfig;
pub use core::io::{IMAGE_EXTENSIONS, collect_image_files, is_supported_image};
pub use core::runner::{run_batch, run_batch_sync};
pub use core::writer::write_result_record;
pub use error::{DocuscanError, Result};
pub use ocr::{EasyOcrBackend, OcrBackend, OcrError, OcrParams};
pub use progress::{JsonProgressStore, ProgressStore};
pub use types::{BatchItemOutcome, BatchSummary, OcrResultRecord};

#[cfg(feature = "pdf")]
pub use pdf::{RasterizeOptions, rasterize_dir, rasterize_file};
