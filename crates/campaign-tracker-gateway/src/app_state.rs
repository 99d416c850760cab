//! Shared application state for the tracker gateway.
//!
//! The campaign store is injected here rather than held in a global, so
//! tests can run the full router against an in-memory store.

use std::sync::Arc;

use campaign_tracker_core::error::Result;

use crate::config::TrackerConfig;
use crate::obs::TrackerMetrics;
use crate::store::{self, CampaignStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: TrackerConfig,
    store: Arc<dyn CampaignStore>,
    metrics: Arc<TrackerMetrics>,
}

impl AppState {
    /// Build state with the store selected in config.
    /// Returns Result so main can report startup errors without panicking.
    pub fn new(cfg: TrackerConfig) -> Result<Self> {
        let store = store::from_config(&cfg.store)?;
        tracing::info!(backend = store.backend(), "campaign store initialized");
        Ok(Self::with_store(cfg, store))
    }

    /// Build state around an already-constructed store.
    pub fn with_store(cfg: TrackerConfig, store: Arc<dyn CampaignStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                store,
                metrics: Arc::new(TrackerMetrics::default()),
            }),
        }
    }

    pub fn cfg(&self) -> &TrackerConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> Arc<dyn CampaignStore> {
        Arc::clone(&self.inner.store)
    }

    pub fn metrics(&self) -> Arc<TrackerMetrics> {
        Arc::clone(&self.inner.metrics)
    }

    pub fn set_draining(&self) {
        self.inner.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }
}
