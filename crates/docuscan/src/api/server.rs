//! API server setup and configuration.

use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    sync::Arc,
};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::ocr::{EasyOcrBackend, OcrBackend};
use crate::{BatchConfig, DocuscanError, Result};

use super::{
    handlers::{batch_handler, health_handler, index_handler, ocr_handler},
    types::{ApiSizeLimits, ApiState},
};

fn default_upload_dir() -> PathBuf {
    std::env::temp_dir().join("docuscan_uploads")
}

/// Parse size limits from `DOCUSCAN_MAX_UPLOAD_SIZE_MB`.
///
/// Falls back to the 100 MB default when unset or invalid.
fn parse_size_limits_from_env() -> ApiSizeLimits {
    if let Ok(value) = std::env::var("DOCUSCAN_MAX_UPLOAD_SIZE_MB") {
        match value.parse::<usize>() {
            Ok(mb) if mb > 0 => {
                tracing::info!("Upload size limit configured from environment: {} MB", mb);
                return ApiSizeLimits::from_mb(mb, mb);
            }
            _ => {
                tracing::warn!("Invalid DOCUSCAN_MAX_UPLOAD_SIZE_MB='{}', using default", value);
            }
        }
    }

    ApiSizeLimits::default()
}

fn build_backend(config: &BatchConfig) -> Arc<dyn OcrBackend> {
    let mut backend = EasyOcrBackend::new();
    if let Some(secs) = config.timeout_secs {
        backend = backend.with_timeout(std::time::Duration::from_secs(secs));
    }
    Arc::new(backend)
}

/// Create the API router with default size limits.
///
/// Public so the router can be embedded in a larger application.
pub fn create_router(config: BatchConfig) -> Router {
    let backend = build_backend(&config);
    create_router_with_limits(config, backend, ApiSizeLimits::default())
}

/// Create the API router with an explicit backend and size limits.
pub fn create_router_with_limits(config: BatchConfig, backend: Arc<dyn OcrBackend>, limits: ApiSizeLimits) -> Router {
    let state = ApiState {
        config: Arc::new(config),
        backend,
        upload_dir: default_upload_dir(),
    };

    // Permissive CORS; this service is expected to sit behind a trusted edge
    let cors_layer = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/ocr", post(ocr_handler))
        .route("/batch", post(batch_handler))
        .layer(DefaultBodyLimit::max(limits.max_request_body_bytes))
        .layer(RequestBodyLimitLayer::new(limits.max_request_body_bytes))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server with config file discovery.
///
/// Searches for docuscan.toml in the current and parent directories and
/// falls back to defaults when none is found.
pub async fn serve(host: impl AsRef<str>, port: u16) -> Result<()> {
    let config = match BatchConfig::discover()? {
        Some(config) => {
            tracing::info!("Loaded config from discovered file");
            config
        }
        None => {
            tracing::info!("No config file found, using defaults");
            BatchConfig::default()
        }
    };

    serve_with_config(host, port, config).await
}

/// Start the API server with an explicit config.
pub async fn serve_with_config(host: impl AsRef<str>, port: u16, config: BatchConfig) -> Result<()> {
    let ip: IpAddr = host
        .as_ref()
        .parse()
        .map_err(|e| DocuscanError::validation(format!("Invalid host address: {}", e)))?;

    let addr = SocketAddr::new(ip, port);
    let limits = parse_size_limits_from_env();
    let backend = build_backend(&config);
    let app = create_router_with_limits(config, backend, limits);

    tracing::info!("Starting Docuscan API server on http://{}:{}", ip, port);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(DocuscanError::Io)?;

    axum::serve(listener, app)
        .await
        .map_err(|e| DocuscanError::Other(e.to_string()))?;

    Ok(())
}
