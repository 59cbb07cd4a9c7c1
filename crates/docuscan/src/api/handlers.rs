//! API request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State},
};

use crate::core::io::{file_name_of, is_supported_image};
use crate::core::runner::run_batch;
use crate::progress::JsonProgressStore;
use crate::types::BatchSummary;
use crate::{BatchConfig, DocuscanError};

use super::{
    error::ApiError,
    types::{ApiState, BatchRequest, HealthResponse, IndexResponse, OcrResponse},
};

/// Landing page handler.
///
/// GET /
pub async fn index_handler() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Docuscan OCR service".to_string(),
        endpoints: vec![
            "GET /".to_string(),
            "GET /health".to_string(),
            "POST /ocr".to_string(),
            "POST /batch".to_string(),
        ],
    })
}

/// Health check handler.
///
/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Single-file OCR handler.
///
/// POST /ocr
///
/// Accepts multipart form data with a `file` field holding one image.
/// The upload is spooled to the server's upload directory and run
/// through the OCR backend with the server's configured parameters.
///
/// Request body size limits are enforced at the router layer; oversized
/// requests get HTTP 413 before reaching this handler.
pub async fn ocr_handler(State(state): State<ApiState>, mut multipart: Multipart) -> Result<Json<OcrResponse>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(DocuscanError::validation(e.to_string())))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "upload".to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::validation(DocuscanError::validation(e.to_string())))?;

        upload = Some((file_name, data.to_vec()));
    }

    let Some((file_name, data)) = upload else {
        return Err(ApiError::validation(DocuscanError::validation(
            "No file provided (expected multipart field 'file')",
        )));
    };

    // Strip any client-supplied path components before touching the filesystem
    let base_name = file_name_of(std::path::Path::new(&file_name));
    if !is_supported_image(std::path::Path::new(&base_name)) {
        return Err(ApiError::validation(DocuscanError::validation(format!(
            "Unsupported file type: {}",
            base_name
        ))));
    }

    tokio::fs::create_dir_all(&state.upload_dir)
        .await
        .map_err(|e| ApiError::internal(DocuscanError::Io(e)))?;
    let saved_path = state.upload_dir.join(&base_name);
    tokio::fs::write(&saved_path, &data)
        .await
        .map_err(|e| ApiError::internal(DocuscanError::Io(e)))?;

    let params = state.config.ocr_params();
    let results = state
        .backend
        .read_text(&saved_path, &params)
        .await
        .map_err(|e| ApiError::internal(e.into()))?;

    tracing::info!(file = %base_name, regions = results.len(), "ocr request completed");

    Ok(Json(OcrResponse {
        message: "OCR completed".to_string(),
        file: base_name,
        results,
    }))
}

/// Batch run handler.
///
/// POST /batch
///
/// Runs the full batch pipeline with the server's configuration,
/// optionally overridden per request. Returns the run summary. The call
/// blocks until the batch drains, so clients should set generous
/// timeouts for large directories.
pub async fn batch_handler(
    State(state): State<ApiState>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<BatchSummary>, ApiError> {
    let mut config: BatchConfig = (*state.config).clone();
    if let Some(input_dir) = request.input_dir {
        config.input_dir = input_dir;
    }
    if let Some(output_dir) = request.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(worker_count) = request.worker_count {
        config.worker_count = Some(worker_count);
    }
    if let Some(languages) = request.languages {
        config.languages = languages;
    }
    if let Some(progress_file) = request.progress_file {
        config.progress_file = progress_file;
    }

    let store = Arc::new(JsonProgressStore::new(&config.progress_file));
    let summary = run_batch(&config, Arc::clone(&state.backend), store).await?;

    Ok(Json(summary))
}
