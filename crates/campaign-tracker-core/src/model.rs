//! Campaign snapshot (input) and the progress/chart results (output).

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Messages per batch when a stored campaign does not specify a rate.
pub const DEFAULT_PROCESSING_RATE_PER_HOUR: i64 = 3;

/// A batched outbound-messaging job, as read from the document store.
///
/// Only `target_count`, `processing_rate_per_hour` and `created_at` feed the
/// computations; the remaining fields are carried through for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub campaign_type: String,
    /// Total audience size, at least 1.
    pub target_count: i64,
    /// Messages dispatched per completed batch (one batch per hour).
    pub processing_rate_per_hour: i64,
    /// `None` means the campaign has not started.
    pub created_at: Option<DateTime<Utc>>,
    pub status: String,
    pub progress: i64,
    pub total_processed: i64,
}

impl Campaign {
    /// Build a campaign with default metadata. `target_count` is clamped to 1.
    pub fn new(
        id: impl Into<String>,
        target_count: i64,
        processing_rate_per_hour: i64,
        created_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            campaign_type: String::new(),
            target_count: target_count.max(1),
            processing_rate_per_hour,
            created_at,
            status: "processing".to_string(),
            progress: 0,
            total_processed: 0,
        }
    }
}

/// Derived progress for one campaign at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressData {
    pub percentage: u8,
    pub completed_batches: i64,
    pub messages_sent: i64,
    /// `"{minutes}m {seconds}s"`, or `"--:--"` before the campaign starts.
    pub next_batch_in: String,
    /// `H:MM:SS`; empty before the campaign starts.
    pub time_elapsed: String,
    /// Fraction of the current hour already elapsed, 0..=100.
    pub batch_progress: u8,
    #[serde(rename = "estimated_completion")]
    pub estimated_completion_time: Option<DateTime<Utc>>,
    pub is_completed: bool,
}

impl ProgressData {
    /// Sentinel returned for campaigns without a creation time.
    pub fn not_started() -> Self {
        Self {
            percentage: 0,
            completed_batches: 0,
            messages_sent: 0,
            next_batch_in: "--:--".to_string(),
            time_elapsed: String::new(),
            batch_progress: 0,
            estimated_completion_time: None,
            is_completed: false,
        }
    }
}

/// One hourly checkpoint on the progress chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub hour: u32,
    /// Cumulative messages sent by this hour.
    pub messages: i64,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    /// Hour-ascending, capped at 24 hours.
    pub points: Vec<ChartPoint>,
    /// Hours needed to finish, uncapped.
    pub total_hours: i64,
    pub total_messages: i64,
}

impl ChartData {
    /// The point flagged as "you are here", if any.
    pub fn current_point(&self) -> Option<&ChartPoint> {
        self.points.iter().find(|p| p.is_current)
    }
}
