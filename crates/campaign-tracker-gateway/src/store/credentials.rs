//! Firestore credential resolution.
//!
//! Order: `token_file`, then the `token_env` variable, then anonymous access
//! (accepted by the Firestore emulator).

use std::fs;

use campaign_tracker_core::error::{Result, TrackerError};

use crate::config::FirestoreSection;

/// Resolve the bearer token from the process environment.
pub fn resolve_token(cfg: &FirestoreSection) -> Result<Option<String>> {
    resolve_token_with(cfg, |name| std::env::var(name).ok())
}

/// Resolve the bearer token with an injectable environment lookup.
pub fn resolve_token_with<F>(cfg: &FirestoreSection, env: F) -> Result<Option<String>>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = &cfg.token_file {
        let raw = fs::read_to_string(path).map_err(|e| {
            TrackerError::Internal(format!("read firestore token file {path} failed: {e}"))
        })?;
        let token = raw.trim();
        if token.is_empty() {
            return Err(TrackerError::BadRequest(format!("firestore token file {path} is empty")));
        }
        tracing::info!(%path, "firestore credentials loaded from file");
        return Ok(Some(token.to_string()));
    }

    match env(&cfg.token_env).map(|t| t.trim().to_string()) {
        Some(token) if !token.is_empty() => {
            tracing::info!(var = %cfg.token_env, "firestore credentials loaded from environment");
            Ok(Some(token))
        }
        _ => {
            tracing::warn!(var = %cfg.token_env, "no firestore credentials found, using anonymous access");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn section(token_file: Option<String>) -> FirestoreSection {
        FirestoreSection {
            project_id: "demo".into(),
            database: "(default)".into(),
            base_url: "http://localhost:8080/v1".into(),
            token_env: "TRACKER_TEST_TOKEN".into(),
            token_file,
            timeout_ms: 1000,
        }
    }

    #[test]
    fn token_from_env() {
        let token = resolve_token_with(&section(None), |name| {
            (name == "TRACKER_TEST_TOKEN").then(|| " abc123\n".to_string())
        })
        .unwrap();
        assert_eq!(token.as_deref(), Some("abc123"));
    }

    #[test]
    fn anonymous_when_nothing_configured() {
        assert_eq!(resolve_token_with(&section(None), |_| None).unwrap(), None);
        assert_eq!(resolve_token_with(&section(None), |_| Some("  ".into())).unwrap(), None);
    }

    #[test]
    fn file_wins_over_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "from-file").unwrap();
        let cfg = section(Some(file.path().display().to_string()));
        let token = resolve_token_with(&cfg, |_| Some("from-env".into())).unwrap();
        assert_eq!(token.as_deref(), Some("from-file"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let cfg = section(Some("/nonexistent/campaign-tracker/token".into()));
        let err = resolve_token_with(&cfg, |_| None).unwrap_err();
        assert_eq!(err.client_code().as_str(), "INTERNAL");
    }
}
