//! Progress calculator.
//!
//! The first batch is credited the moment a campaign is created and one more
//! batch completes every full hour after that.

use chrono::{DateTime, TimeDelta, Utc};

use crate::model::{Campaign, ProgressData};
use crate::schedule::{self, SECS_PER_HOUR};

/// Synthetic age given to stale campaigns (23h45m).
///
/// The chart uses 23h instead (see [`crate::chart::CHART_STALE_AGE_SECS`]), so
/// the two endpoints can disagree on the current hour of a stale campaign.
pub const PROGRESS_STALE_AGE_SECS: i64 = 23 * 3600 + 45 * 60;

/// Compute the progress of `campaign` as observed at `now`.
pub fn calculate_progress(campaign: &Campaign, now: DateTime<Utc>) -> ProgressData {
    let Some(created_at) = campaign.created_at else {
        tracing::warn!(campaign_id = %campaign.id, "campaign has no created_at, returning zero progress");
        return ProgressData::not_started();
    };

    let rate = campaign.processing_rate_per_hour;
    let target = campaign.target_count.max(1);
    if rate <= 0 {
        tracing::warn!(campaign_id = %campaign.id, rate, "non-positive processing rate");
    }

    let start = schedule::effective_start(created_at, now, TimeDelta::seconds(PROGRESS_STALE_AGE_SECS));
    if start != created_at {
        tracing::info!(campaign_id = %campaign.id, %created_at, simulated = %start, "stale campaign, using simulated start");
    }

    let elapsed_secs = schedule::elapsed_seconds(start, now);
    let whole_hours = (elapsed_secs / SECS_PER_HOUR).floor();

    let completed_batches = 1 + whole_hours as i64;
    let messages_sent = schedule::messages_after(completed_batches, rate, target);
    let percentage = (i128::from(messages_sent) * 100 / i128::from(target)) as u8;

    let seconds_into_hour = elapsed_secs - whole_hours * SECS_PER_HOUR;
    let seconds_to_next = SECS_PER_HOUR - seconds_into_hour;
    let next_batch_in = format!(
        "{}m {}s",
        (seconds_to_next / 60.0).floor() as i64,
        (seconds_to_next % 60.0).floor() as i64
    );
    let batch_progress = ((seconds_into_hour / SECS_PER_HOUR) * 100.0).floor().clamp(0.0, 100.0) as u8;

    let estimated_completion_time = estimate_completion(campaign, start, target, rate);

    let progress = ProgressData {
        percentage,
        completed_batches,
        messages_sent,
        next_batch_in,
        time_elapsed: format_elapsed(elapsed_secs),
        batch_progress,
        estimated_completion_time,
        is_completed: messages_sent >= target,
    };

    tracing::debug!(
        campaign_id = %campaign.id,
        elapsed_secs,
        completed_batches,
        messages_sent,
        percentage,
        "progress calculated"
    );
    progress
}

fn estimate_completion(
    campaign: &Campaign,
    start: DateTime<Utc>,
    target: i64,
    rate: i64,
) -> Option<DateTime<Utc>> {
    let Some(hours) = schedule::hours_needed(target, rate) else {
        tracing::warn!(campaign_id = %campaign.id, target, rate, "cannot derive hours needed, no completion estimate");
        return None;
    };
    let estimate = TimeDelta::try_hours(hours).and_then(|d| start.checked_add_signed(d));
    if estimate.is_none() {
        tracing::error!(campaign_id = %campaign.id, hours, "completion time out of range");
    }
    estimate
}

/// `H:MM:SS` with unbounded hours.
fn format_elapsed(elapsed_secs: f64) -> String {
    let total = elapsed_secs.floor() as i64;
    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}
