//! Campaign progress HTTP handlers.
//!
//! - `GET /`                                         : liveness message
//! - `GET /campaign/{user_id}/{campaign_id}/progress` : [`ProgressData`]
//! - `GET /campaign/{user_id}/{campaign_id}/chart`    : [`ChartData`]

pub mod error;

use std::time::Instant;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;

use campaign_tracker_core::error::TrackerError;
use campaign_tracker_core::{calculate_progress, generate_chart_data, Campaign, ChartData, ProgressData};

use crate::app_state::AppState;

pub use error::ApiError;

pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Campaign Tracker API is running" }))
}

pub async fn campaign_progress(
    State(state): State<AppState>,
    Path((user_id, campaign_id)): Path<(String, String)>,
) -> Result<Json<ProgressData>, ApiError> {
    tracing::info!(%user_id, %campaign_id, "progress requested");
    let campaign = lookup(&state, &user_id, &campaign_id, "progress").await?;

    let started = Instant::now();
    let progress = calculate_progress(&campaign, Utc::now());
    record_success(&state, "progress", started);

    tracing::info!(
        %user_id,
        %campaign_id,
        percentage = progress.percentage,
        completed_batches = progress.completed_batches,
        messages_sent = progress.messages_sent,
        next_batch_in = %progress.next_batch_in,
        "progress computed"
    );
    Ok(Json(progress))
}

pub async fn campaign_chart(
    State(state): State<AppState>,
    Path((user_id, campaign_id)): Path<(String, String)>,
) -> Result<Json<ChartData>, ApiError> {
    tracing::info!(%user_id, %campaign_id, "chart requested");
    let campaign = lookup(&state, &user_id, &campaign_id, "chart").await?;

    let started = Instant::now();
    let chart = generate_chart_data(&campaign, Utc::now());
    record_success(&state, "chart", started);

    tracing::info!(
        %user_id,
        %campaign_id,
        points = chart.points.len(),
        total_hours = chart.total_hours,
        total_messages = chart.total_messages,
        "chart computed"
    );
    Ok(Json(chart))
}

/// Fetch a campaign; every failure is reported to the client as not found.
async fn lookup(
    state: &AppState,
    user_id: &str,
    campaign_id: &str,
    endpoint: &'static str,
) -> Result<Campaign, ApiError> {
    let store = state.store();
    match store.get_campaign(user_id, campaign_id).await {
        Ok(Some(campaign)) => {
            tracing::debug!(?campaign, "campaign loaded");
            Ok(campaign)
        }
        Ok(None) => {
            tracing::error!(%user_id, %campaign_id, "campaign not found");
            state.metrics().requests.inc(&[("endpoint", endpoint), ("outcome", "not_found")]);
            Err(not_found())
        }
        Err(e) => {
            tracing::error!(%user_id, %campaign_id, backend = store.backend(), error = %e, "campaign lookup failed");
            state.metrics().store_errors.inc(&[("backend", store.backend())]);
            state.metrics().requests.inc(&[("endpoint", endpoint), ("outcome", "not_found")]);
            Err(not_found())
        }
    }
}

fn not_found() -> ApiError {
    TrackerError::NotFound("campaign".into()).into()
}

fn record_success(state: &AppState, endpoint: &'static str, started: Instant) {
    let metrics = state.metrics();
    metrics.compute_duration.observe(&[("endpoint", endpoint)], started.elapsed());
    metrics.requests.inc(&[("endpoint", endpoint), ("outcome", "ok")]);
}
