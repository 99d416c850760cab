//! Tracker config loader (strict parsing).

pub mod schema;

use std::fs;

use campaign_tracker_core::error::{Result, TrackerError};

pub use schema::{
    CorsSection, FirestoreSection, MemorySection, SeedCampaign, ServerSection, StoreKind,
    StoreSection, TrackerConfig,
};

/// Config path used when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "campaign-tracker.yaml";

pub fn load_from_file(path: &str) -> Result<TrackerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| TrackerError::Internal(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<TrackerConfig> {
    let cfg: TrackerConfig = serde_yaml::from_str(s)
        .map_err(|e| TrackerError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
