//! Operational HTTP endpoints.
//!
//! `/healthz` and `/readyz` answer `{"status": ...}` JSON like `/`;
//! `/metrics` is Prometheus text.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// 503 once shutdown has started so load balancers stop routing here.
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let (status, label) = if state.is_draining() {
        (StatusCode::SERVICE_UNAVAILABLE, "draining")
    } else {
        (StatusCode::OK, "ready")
    };
    (status, Json(json!({ "status": label })))
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        state.metrics().render(),
    )
}
