//! Campaign document stores.
//!
//! Handlers only see [`CampaignStore`]; the concrete backend is chosen from
//! config at startup and injected through `AppState`.

pub mod credentials;
pub mod firestore;
pub mod memory;
pub mod record;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use campaign_tracker_core::error::Result;
use campaign_tracker_core::Campaign;

use crate::config::{StoreKind, StoreSection};

pub use firestore::FirestoreStore;
pub use memory::MemoryCampaignStore;
pub use record::{CampaignRecord, CreatedAt};

/// Read access to campaigns stored under `users/{user_id}/campaigns/{campaign_id}`.
#[async_trait]
pub trait CampaignStore: Send + Sync {
    /// Short backend name used in logs and metric labels.
    fn backend(&self) -> &'static str;

    /// `Ok(None)` when the document does not exist.
    async fn get_campaign(&self, user_id: &str, campaign_id: &str) -> Result<Option<Campaign>>;
}

/// Build the backend selected by `store.kind`.
pub fn from_config(cfg: &StoreSection) -> Result<Arc<dyn CampaignStore>> {
    match (cfg.kind, &cfg.firestore) {
        (StoreKind::Firestore, Some(fs)) => Ok(Arc::new(FirestoreStore::new(fs)?)),
        (StoreKind::Firestore, None) => Err(campaign_tracker_core::TrackerError::BadRequest(
            "store.firestore is required when store.kind is firestore".into(),
        )),
        (StoreKind::Memory, _) => Ok(Arc::new(MemoryCampaignStore::from_seeds(
            &cfg.memory.campaigns,
            Utc::now(),
        ))),
    }
}
