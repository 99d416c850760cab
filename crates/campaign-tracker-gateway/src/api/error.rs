//! HTTP mapping of [`TrackerError`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use campaign_tracker_core::error::{ClientCode, TrackerError};

/// Wrapper so handlers can return `Result<_, ApiError>` and use `?`.
#[derive(Debug)]
pub struct ApiError(pub TrackerError);

impl From<TrackerError> for ApiError {
    fn from(err: TrackerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let status = match code {
            ClientCode::BadRequest => StatusCode::BAD_REQUEST,
            ClientCode::NotFound => StatusCode::NOT_FOUND,
            ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = match code {
            ClientCode::Internal => {
                tracing::error!(error = %self.0, "internal server error");
                "internal server error".to_string()
            }
            _ => self.0.to_string(),
        };
        let body = Json(json!({
            "error": code.as_str(),
            "message": message,
        }));
        (status, body).into_response()
    }
}
