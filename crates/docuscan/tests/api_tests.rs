//! API endpoint tests using in-process router calls.

#![cfg(feature = "api")]

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use tempfile::tempdir;
use tower::ServiceExt;

use docuscan::{
    BatchConfig, OcrBackend, OcrError, OcrParams,
    api::{ApiSizeLimits, create_router_with_limits},
};

struct CannedBackend {
    responses: HashMap<String, Vec<String>>,
}

impl CannedBackend {
    fn empty() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    fn with(mut self, file_name: &str, lines: &[&str]) -> Self {
        self.responses
            .insert(file_name.to_string(), lines.iter().map(|s| s.to_string()).collect());
        self
    }
}

#[async_trait]
impl OcrBackend for CannedBackend {
    async fn read_text(&self, path: &Path, _params: &OcrParams) -> Result<Vec<String>, OcrError> {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        Ok(self.responses.get(&name).cloned().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "canned"
    }
}

fn test_router(config: BatchConfig, backend: CannedBackend) -> Router {
    create_router_with_limits(config, Arc::new(backend), ApiSizeLimits::default())
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn multipart_body(boundary: &str, file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    body
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_router(BatchConfig::default(), CannedBackend::empty());

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_index_lists_endpoints() {
    let app = test_router(BatchConfig::default(), CannedBackend::empty());

    let response = app.oneshot(Request::get("/").body(Body::empty()).unwrap()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let endpoints: Vec<String> = serde_json::from_value(json["endpoints"].clone()).unwrap();
    assert!(endpoints.iter().any(|e| e.contains("/ocr")));
    assert!(endpoints.iter().any(|e| e.contains("/batch")));
}

#[tokio::test]
async fn test_ocr_without_file_is_bad_request() {
    let app = test_router(BatchConfig::default(), CannedBackend::empty());

    let boundary = "X-DOCUSCAN-TEST";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    let response = app
        .oneshot(
            Request::post("/ocr")
                .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", boundary))
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error_type"], "Validation");
}

#[tokio::test]
async fn test_ocr_rejects_unsupported_extension() {
    let app = test_router(BatchConfig::default(), CannedBackend::empty());

    let boundary = "X-DOCUSCAN-TEST";
    let body = multipart_body(boundary, "payload.exe", b"MZ");

    let response = app
        .oneshot(
            Request::post("/ocr")
                .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", boundary))
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["message"].as_str().unwrap().contains("Unsupported file type"));
}

#[tokio::test]
async fn test_ocr_returns_recognized_text() {
    let app = test_router(
        BatchConfig::default(),
        CannedBackend::empty().with("scan.jpg", &["Hello", "World"]),
    );

    let boundary = "X-DOCUSCAN-TEST";
    let body = multipart_body(boundary, "scan.jpg", b"\xff\xd8\xff");

    let response = app
        .oneshot(
            Request::post("/ocr")
                .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", boundary))
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["file"], "scan.jpg");
    assert_eq!(json["results"], serde_json::json!(["Hello", "World"]));
}

#[tokio::test]
async fn test_batch_endpoint_runs_pipeline() {
    let dir = tempdir().unwrap();
    let input_dir = dir.path().join("input");
    std::fs::create_dir_all(&input_dir).unwrap();
    File::create(input_dir.join("doc1.png")).unwrap();
    File::create(input_dir.join("skip.txt")).unwrap();

    let config = BatchConfig {
        input_dir,
        output_dir: dir.path().join("output"),
        progress_file: dir.path().join("ocr_progress.json"),
        worker_count: Some(1),
        ..BatchConfig::default()
    };

    let app = test_router(config.clone(), CannedBackend::empty().with("doc1.png", &["batched"]));

    let response = app
        .oneshot(
            Request::post("/batch")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["discovered"], 1);
    assert_eq!(json["skipped"], 0);
    assert!(config.output_dir.join("doc1.json").exists());
}

#[tokio::test]
async fn test_batch_endpoint_reports_bad_input_dir() {
    let dir = tempdir().unwrap();
    let config = BatchConfig {
        input_dir: dir.path().join("missing"),
        output_dir: dir.path().join("output"),
        progress_file: dir.path().join("ocr_progress.json"),
        ..BatchConfig::default()
    };

    let app = test_router(config, CannedBackend::empty());

    let response = app
        .oneshot(
            Request::post("/batch")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error_type"], "Validation");
}
