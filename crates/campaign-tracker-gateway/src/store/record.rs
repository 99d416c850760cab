//! Backend-neutral campaign document and its normalization into [`Campaign`].
//!
//! Every store backend decodes into [`CampaignRecord`] first so that field
//! defaults and timestamp coercion behave identically regardless of where a
//! campaign came from.

use chrono::{DateTime, TimeDelta, Utc};

use campaign_tracker_core::{Campaign, DEFAULT_PROCESSING_RATE_PER_HOUR};

/// The shapes a stored `createdAt` has been seen in.
#[derive(Debug, Clone, PartialEq)]
pub enum CreatedAt {
    /// Native timestamp.
    Timestamp(DateTime<Utc>),
    /// Unix epoch in milliseconds.
    EpochMillis(f64),
    /// Textual timestamp, expected to be RFC 3339.
    Text(String),
    /// Anything else; carries the type name for logging.
    Unrecognized(&'static str),
}

impl CreatedAt {
    /// Coerce into a UTC timestamp.
    ///
    /// Values that cannot be interpreted fall back to one hour before `now`,
    /// which still renders as a campaign in progress.
    pub fn normalize(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let fallback = now - TimeDelta::hours(1);
        match self {
            CreatedAt::Timestamp(ts) => *ts,
            CreatedAt::EpochMillis(ms) => {
                let parsed = ms
                    .is_finite()
                    .then(|| DateTime::from_timestamp_millis(*ms as i64))
                    .flatten();
                parsed.unwrap_or_else(|| {
                    tracing::error!(millis = ms, "createdAt epoch out of range, using fallback");
                    fallback
                })
            }
            CreatedAt::Text(s) => match DateTime::parse_from_rfc3339(s) {
                Ok(ts) => ts.with_timezone(&Utc),
                Err(e) => {
                    tracing::error!(value = %s, error = %e, "createdAt text is not RFC 3339, using fallback");
                    fallback
                }
            },
            CreatedAt::Unrecognized(kind) => {
                tracing::warn!(kind, "unrecognized createdAt type, using fallback");
                fallback
            }
        }
    }
}

/// A campaign document with every field optional, as stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignRecord {
    pub id: String,
    pub name: Option<String>,
    pub campaign_type: Option<String>,
    pub status: Option<String>,
    pub target_count: Option<i64>,
    /// Length of `targetUsers` when it is a list.
    pub target_users: usize,
    pub filtered_users: Option<i64>,
    pub processing_rate_per_hour: Option<i64>,
    pub created_at: Option<CreatedAt>,
    pub progress: Option<i64>,
    pub total_processed: Option<i64>,
}

impl CampaignRecord {
    /// Apply defaults and clamps, producing the computation input.
    pub fn into_campaign(self, now: DateTime<Utc>) -> Campaign {
        let target_count = if self.target_users > 0 {
            i64::try_from(self.target_users)
                .unwrap_or(i64::MAX)
                .saturating_add(self.filtered_users.unwrap_or(0))
        } else {
            self.target_count.unwrap_or(0)
        };

        let processing_rate_per_hour = match self.processing_rate_per_hour {
            Some(rate) if rate > 0 => rate,
            Some(rate) => {
                tracing::warn!(campaign_id = %self.id, rate, "non-positive processingRatePerHour, using default");
                DEFAULT_PROCESSING_RATE_PER_HOUR
            }
            None => DEFAULT_PROCESSING_RATE_PER_HOUR,
        };

        let created_at = self.created_at.as_ref().map(|c| c.normalize(now));

        let mut campaign = Campaign::new(self.id, target_count, processing_rate_per_hour, created_at);
        campaign.name = self.name.unwrap_or_default();
        campaign.campaign_type = self.campaign_type.unwrap_or_default();
        if let Some(status) = self.status {
            campaign.status = status;
        }
        campaign.progress = self.progress.unwrap_or(0);
        campaign.total_processed = self.total_processed.unwrap_or(0);
        campaign
    }
}
