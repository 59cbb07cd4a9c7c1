//! REST API server for the OCR pipeline.
//!
//! An Axum-based HTTP service exposing single-file OCR and batch runs.
//!
//! # Endpoints
//!
//! - `GET /` - Endpoint listing
//! - `GET /health` - Health check
//! - `POST /ocr` - OCR one uploaded image (multipart form data)
//! - `POST /batch` - Run the batch pipeline over a server-side directory
//!
//! # Examples
//!
//! ```no_run
//! use docuscan::api::serve;
//!
//! #[tokio::main]
//! async fn main() -> docuscan::Result<()> {
//!     serve("127.0.0.1", 8000).await?;
//!     Ok(())
//! }
//! ```
//!
//! # cURL Examples
//!
//! ```bash
//! # OCR one image
//! curl -F "file=@scan.jpg" http://localhost:8000/ocr
//!
//! # Run a batch over the server's input directory
//! curl -X POST -H 'Content-Type: application/json' -d '{}' http://localhost:8000/batch
//!
//! # Health check
//! curl http://localhost:8000/health
//! ```

mod error;
mod handlers;
mod server;
mod types;

pub use error::ApiError;
pub use server::{create_router, create_router_with_limits, serve, serve_with_config};
pub use types::{ApiSizeLimits, ApiState, BatchRequest, ErrorResponse, HealthResponse, IndexResponse, OcrResponse};
