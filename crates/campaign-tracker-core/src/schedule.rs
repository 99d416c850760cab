//! Time arithmetic shared by the progress and chart computations.

use chrono::{DateTime, TimeDelta, Utc};

/// Campaigns older than this are considered stale.
const STALENESS_THRESHOLD_SECS: i64 = 24 * 3600;

pub(crate) const SECS_PER_HOUR: f64 = 3600.0;

/// Creation time used for the computations.
///
/// A campaign older than 24 hours is re-anchored to `now - stale_age` so that
/// the displayed progress stays bounded.
pub(crate) fn effective_start(
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
    stale_age: TimeDelta,
) -> DateTime<Utc> {
    if now.signed_duration_since(created_at) > TimeDelta::seconds(STALENESS_THRESHOLD_SECS) {
        now - stale_age
    } else {
        created_at
    }
}

/// Fractional seconds between `start` and `now`; never negative.
pub(crate) fn elapsed_seconds(start: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let micros = now
        .signed_duration_since(start)
        .num_microseconds()
        .unwrap_or(0)
        .max(0);
    micros as f64 / 1_000_000.0
}

/// `ceil(target / rate)`, or `None` when either operand is not positive.
pub(crate) fn hours_needed(target_count: i64, rate: i64) -> Option<i64> {
    if target_count <= 0 || rate <= 0 {
        return None;
    }
    Some((target_count - 1) / rate + 1)
}

/// `min(batches * rate, target)`, floored at zero.
pub(crate) fn messages_after(batches: i64, rate: i64, target_count: i64) -> i64 {
    batches.saturating_mul(rate).clamp(0, target_count.max(0))
}
