//! API request and response types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::{BatchConfig, ocr::OcrBackend};

/// API server state.
///
/// Holds the server-wide batch configuration, the OCR backend every
/// request goes through, and the directory uploads are spooled to.
#[derive(Clone)]
pub struct ApiState {
    pub config: Arc<BatchConfig>,
    pub backend: Arc<dyn OcrBackend>,
    pub upload_dir: PathBuf,
}

/// API server size limit configuration.
///
/// Bounds the request body and individual multipart fields. Defaults to
/// 100 MB for both, overridable via `DOCUSCAN_MAX_UPLOAD_SIZE_MB`.
#[derive(Debug, Clone, Copy)]
pub struct ApiSizeLimits {
    /// Maximum size of the entire request body in bytes.
    pub max_request_body_bytes: usize,

    /// Maximum size of a single multipart field in bytes.
    pub max_multipart_field_bytes: usize,
}

impl Default for ApiSizeLimits {
    fn default() -> Self {
        Self::from_mb(100, 100)
    }
}

impl ApiSizeLimits {
    pub fn new(max_request_body_bytes: usize, max_multipart_field_bytes: usize) -> Self {
        Self {
            max_request_body_bytes,
            max_multipart_field_bytes,
        }
    }

    pub fn from_mb(max_request_body_mb: usize, max_multipart_field_mb: usize) -> Self {
        Self {
            max_request_body_bytes: max_request_body_mb * 1024 * 1024,
            max_multipart_field_bytes: max_multipart_field_mb * 1024 * 1024,
        }
    }
}

/// Landing page response.
///
/// GET /
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexResponse {
    pub message: String,
    pub endpoints: Vec<String>,
}

/// Health check response.
///
/// GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Single-file OCR response.
///
/// POST /ocr
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResponse {
    pub message: String,
    /// Uploaded file name as received.
    pub file: String,
    /// Recognized text, one entry per detected region.
    pub results: Vec<String>,
}

/// Batch run request body.
///
/// Every field is optional; omitted fields fall back to the server's
/// configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchRequest {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub worker_count: Option<usize>,
    pub languages: Option<Vec<String>>,
    pub progress_file: Option<PathBuf>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    pub status_code: u16,
}
