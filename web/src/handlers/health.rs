//! Health check endpoint.
//!
//! Used by load balancers and monitoring systems to verify the service
//! is running. Does not check dependencies.

use axum::{Json, http::StatusCode};
use serde_json::{Value, json};

/// Liveness check.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
#[allow(clippy::unused_async)] // Axum handler signature requires async
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
