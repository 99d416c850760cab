use std::net::SocketAddr;

use axum::http::HeaderValue;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use campaign_tracker_core::error::{Result, TrackerError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub cors: CorsSection,

    pub store: StoreSection,
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TrackerError::BadRequest(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.cors.validate()?;
        self.store.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            shutdown_grace_ms: default_shutdown_grace_ms(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if self.shutdown_grace_ms > 30_000 {
            return Err(TrackerError::BadRequest(
                "server.shutdown_grace_ms must be between 0 and 30000".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            TrackerError::BadRequest(format!(
                "server.listen must be a valid SocketAddr ({}): {e}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".into()
}
fn default_shutdown_grace_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsSection {
    /// `"*"` alone, or a list of explicit origins.
    #[serde(default = "default_allow_origins")]
    pub allow_origins: Vec<String>,
}

impl Default for CorsSection {
    fn default() -> Self {
        Self {
            allow_origins: default_allow_origins(),
        }
    }
}

impl CorsSection {
    pub fn validate(&self) -> Result<()> {
        if self.allow_origins.is_empty() {
            return Err(TrackerError::BadRequest("cors.allow_origins must not be empty".into()));
        }
        if self.allows_any() {
            if self.allow_origins.len() > 1 {
                return Err(TrackerError::BadRequest(
                    "cors.allow_origins: \"*\" cannot be combined with explicit origins".into(),
                ));
            }
            return Ok(());
        }
        for origin in &self.allow_origins {
            HeaderValue::from_str(origin).map_err(|_| {
                TrackerError::BadRequest(format!("cors.allow_origins: invalid origin {origin:?}"))
            })?;
        }
        Ok(())
    }

    pub fn allows_any(&self) -> bool {
        self.allow_origins.iter().any(|o| o == "*")
    }
}

fn default_allow_origins() -> Vec<String> {
    vec!["*".into()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Firestore,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    pub kind: StoreKind,

    #[serde(default)]
    pub firestore: Option<FirestoreSection>,

    #[serde(default)]
    pub memory: MemorySection,
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        match (self.kind, &self.firestore) {
            (StoreKind::Firestore, None) => Err(TrackerError::BadRequest(
                "store.firestore is required when store.kind is firestore".into(),
            )),
            (StoreKind::Firestore, Some(fs)) => fs.validate(),
            (StoreKind::Memory, _) => self.memory.validate(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FirestoreSection {
    pub project_id: String,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Environment variable holding a bearer token.
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// File holding a bearer token; takes precedence over `token_env`.
    #[serde(default)]
    pub token_file: Option<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl FirestoreSection {
    pub fn validate(&self) -> Result<()> {
        if self.project_id.trim().is_empty() {
            return Err(TrackerError::BadRequest("store.firestore.project_id must not be empty".into()));
        }
        if self.database.trim().is_empty() {
            return Err(TrackerError::BadRequest("store.firestore.database must not be empty".into()));
        }
        if reqwest::Url::parse(&self.base_url).is_err() {
            return Err(TrackerError::BadRequest(format!(
                "store.firestore.base_url is not a valid url: {}",
                self.base_url
            )));
        }
        if !(100..=60_000).contains(&self.timeout_ms) {
            return Err(TrackerError::BadRequest(
                "store.firestore.timeout_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }
}

fn default_database() -> String {
    "(default)".into()
}
fn default_base_url() -> String {
    "https://firestore.googleapis.com/v1".into()
}
fn default_token_env() -> String {
    "FIRESTORE_TOKEN".into()
}
fn default_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemorySection {
    #[serde(default)]
    pub campaigns: Vec<SeedCampaign>,
}

/// Bound on `created_minutes_ago` in either direction (about 100 years).
pub const MAX_SEED_AGE_MINUTES: i64 = 100 * 365 * 24 * 60;

impl MemorySection {
    pub fn validate(&self) -> Result<()> {
        for seed in &self.campaigns {
            if seed.created_at.is_some() && seed.created_minutes_ago.is_some() {
                return Err(TrackerError::BadRequest(format!(
                    "store.memory campaign {}/{}: set created_at or created_minutes_ago, not both",
                    seed.user_id, seed.campaign_id
                )));
            }
            if let Some(mins) = seed.created_minutes_ago {
                if !(-MAX_SEED_AGE_MINUTES..=MAX_SEED_AGE_MINUTES).contains(&mins) {
                    return Err(TrackerError::BadRequest(format!(
                        "store.memory campaign {}/{}: created_minutes_ago must be within ±{MAX_SEED_AGE_MINUTES}",
                        seed.user_id, seed.campaign_id
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A campaign document seeded into the in-memory store.
///
/// Field semantics match the stored document: `target_users` wins over
/// `target_count` when non-empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedCampaign {
    pub user_id: String,
    pub campaign_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub campaign_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub target_count: Option<i64>,
    #[serde(default)]
    pub target_users: Vec<String>,
    #[serde(default)]
    pub filtered_users: Option<i64>,
    #[serde(default)]
    pub processing_rate_per_hour: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Start relative to process startup; handy for demos.
    #[serde(default)]
    pub created_minutes_ago: Option<i64>,
}
