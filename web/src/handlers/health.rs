//! Liveness probe.

use axum::http::StatusCode;

/// `GET /health` — answers 200 while the process is up.
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
