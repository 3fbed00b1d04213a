//! Re-export metrics from the courier-metrics crate plus the HTTP handler
//! that serves them.

pub use courier_metrics::*;

/// Axum handler that serves Prometheus metrics in text format.
///
/// Add to any HTTP router:
/// ```ignore
/// .route("/metrics", get(courier_shared::metrics::metrics_handler))
/// ```
pub async fn metrics_handler() -> axum::response::Response {
    use axum::http::{StatusCode, header};
    use axum::response::IntoResponse;

    match gather_metrics() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to gather metrics: {}", e),
        )
            .into_response(),
    }
}
