//! In-memory campaign store for local runs and tests.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;

use campaign_tracker_core::error::Result;
use campaign_tracker_core::Campaign;

use crate::config::SeedCampaign;
use crate::store::record::{CampaignRecord, CreatedAt};
use crate::store::CampaignStore;

#[derive(Default)]
pub struct MemoryCampaignStore {
    campaigns: DashMap<(String, String), Campaign>,
}

impl MemoryCampaignStore {
    pub fn new() -> Self {
        Self {
            campaigns: DashMap::new(),
        }
    }

    /// Build a store from config seeds, resolving relative start times against `now`.
    pub fn from_seeds(seeds: &[SeedCampaign], now: DateTime<Utc>) -> Self {
        let store = Self::new();
        for seed in seeds {
            let created_at = match (seed.created_at, seed.created_minutes_ago) {
                (Some(ts), _) => Some(CreatedAt::Timestamp(ts)),
                (None, Some(mins)) => match TimeDelta::try_minutes(mins).and_then(|age| now.checked_sub_signed(age)) {
                    Some(ts) => Some(CreatedAt::Timestamp(ts)),
                    None => {
                        // config validation bounds the age, so this only trips on unvalidated seeds
                        tracing::warn!(campaign_id = %seed.campaign_id, mins, "seed start out of range, using fallback");
                        Some(CreatedAt::Unrecognized("created_minutes_ago"))
                    }
                },
                (None, None) => None,
            };
            let record = CampaignRecord {
                id: seed.campaign_id.clone(),
                name: seed.name.clone(),
                campaign_type: seed.campaign_type.clone(),
                status: seed.status.clone(),
                target_count: seed.target_count,
                target_users: seed.target_users.len(),
                filtered_users: seed.filtered_users,
                processing_rate_per_hour: seed.processing_rate_per_hour,
                created_at,
                progress: None,
                total_processed: None,
            };
            store.insert(&seed.user_id, record.into_campaign(now));
        }
        tracing::info!(campaigns = store.len(), "memory store seeded");
        store
    }

    pub fn insert(&self, user_id: &str, campaign: Campaign) {
        self.campaigns
            .insert((user_id.to_string(), campaign.id.clone()), campaign);
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }
}

#[async_trait]
impl CampaignStore for MemoryCampaignStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn get_campaign(&self, user_id: &str, campaign_id: &str) -> Result<Option<Campaign>> {
        let key = (user_id.to_string(), campaign_id.to_string());
        Ok(self.campaigns.get(&key).map(|c| c.value().clone()))
    }
}
