//! Shared error type across Campaign Tracker crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input or configuration.
    BadRequest,
    /// Campaign (or other resource) does not exist.
    NotFound,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("document store: {0}")]
    Store(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl TrackerError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            TrackerError::BadRequest(_) => ClientCode::BadRequest,
            TrackerError::NotFound(_) => ClientCode::NotFound,
            TrackerError::Store(_) | TrackerError::Internal(_) => ClientCode::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_are_internal_to_clients() {
        let err = TrackerError::Store("timeout".into());
        assert_eq!(err.client_code(), ClientCode::Internal);
        assert_eq!(err.to_string(), "document store: timeout");
    }

    #[test]
    fn not_found_code() {
        assert_eq!(TrackerError::NotFound("x".into()).client_code().as_str(), "NOT_FOUND");
    }
}
