//! Axum router wiring.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{api, app_state::AppState, cors, ops};

pub fn build_router(state: AppState) -> Router {
    let cors = cors::layer(&state.cfg().cors);

    Router::new()
        .route("/", get(api::root))
        .route("/campaign/:user_id/:campaign_id/progress", get(api::campaign_progress))
        .route("/campaign/:user_id/:campaign_id/chart", get(api::campaign_chart))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
