//! Chart generator: one cumulative checkpoint per hour.

use chrono::{DateTime, TimeDelta, Utc};

use crate::model::{Campaign, ChartData, ChartPoint};
use crate::schedule::{self, SECS_PER_HOUR};

/// Synthetic age given to stale campaigns (23h).
pub const CHART_STALE_AGE_SECS: i64 = 23 * 3600;

/// Charts never display more than this many hours.
pub const MAX_HOURS_TO_DISPLAY: i64 = 24;

/// Build the step chart for `campaign` as observed at `now`.
pub fn generate_chart_data(campaign: &Campaign, now: DateTime<Utc>) -> ChartData {
    let target = campaign.target_count.max(1);
    let rate = campaign.processing_rate_per_hour;

    let total_hours = schedule::hours_needed(target, rate).unwrap_or_else(|| {
        tracing::warn!(campaign_id = %campaign.id, target, rate, "non-positive processing rate, chart degraded");
        0
    });
    let max_hours = total_hours.min(MAX_HOURS_TO_DISPLAY);

    let elapsed_hours = match campaign.created_at {
        None => {
            tracing::warn!(campaign_id = %campaign.id, "campaign has no created_at, using 0 elapsed hours");
            0.0
        }
        Some(created_at) => {
            let start = schedule::effective_start(created_at, now, TimeDelta::seconds(CHART_STALE_AGE_SECS));
            if start != created_at {
                tracing::info!(campaign_id = %campaign.id, simulated = %start, "stale campaign, using simulated start for chart");
            }
            schedule::elapsed_seconds(start, now) / SECS_PER_HOUR
        }
    };

    let mut points: Vec<ChartPoint> = (0..=max_hours)
        .map(|hour| {
            // hour 0 carries the first batch, sent at creation
            let messages = schedule::messages_after(hour + 1, rate, target);
            tracing::trace!(hour, messages, "chart point");
            ChartPoint {
                hour: hour as u32,
                messages,
                is_current: false,
            }
        })
        .collect();

    let current = (elapsed_hours.floor() as i64).min(max_hours);
    match usize::try_from(current).ok().and_then(|i| points.get_mut(i)) {
        Some(point) => point.is_current = true,
        None => tracing::warn!(campaign_id = %campaign.id, current, "current hour outside chart"),
    }

    tracing::debug!(campaign_id = %campaign.id, points = points.len(), total_hours, "chart generated");
    ChartData {
        points,
        total_hours,
        total_messages: target,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn campaign(target: i64, rate: i64, age: Option<TimeDelta>) -> Campaign {
        Campaign::new("c1", target, rate, age.map(|a| now() - a))
    }

    fn current_indices(chart: &ChartData) -> Vec<u32> {
        chart.points.iter().filter(|p| p.is_current).map(|p| p.hour).collect()
    }

    #[test]
    fn fresh_campaign_chart() {
        let chart = generate_chart_data(&campaign(100, 10, Some(TimeDelta::zero())), now());
        assert_eq!(chart.total_hours, 10);
        assert_eq!(chart.total_messages, 100);
        assert_eq!(chart.points.len(), 11);
        assert_eq!(chart.points[0].messages, 10);
        assert_eq!(chart.points[1].messages, 20);
        assert_eq!(chart.points[10].messages, 100);
        assert_eq!(current_indices(&chart), vec![0]);
    }

    #[test]
    fn display_is_capped_at_24_hours() {
        let chart = generate_chart_data(&campaign(1000, 3, Some(TimeDelta::hours(2))), now());
        assert_eq!(chart.total_hours, 334);
        assert_eq!(chart.points.len(), 25);
        assert_eq!(chart.points.last().map(|p| p.hour), Some(24));
        assert_eq!(chart.points[24].messages, 75);
        assert_eq!(current_indices(&chart), vec![2]);
    }

    #[test]
    fn current_index_clamped_to_last_point() {
        // 3 hours needed, 20 hours elapsed
        let chart = generate_chart_data(&campaign(30, 10, Some(TimeDelta::hours(20))), now());
        assert_eq!(chart.points.len(), 4);
        assert_eq!(current_indices(&chart), vec![3]);
        assert!(chart.points.iter().all(|p| p.messages <= 30));
    }

    #[test]
    fn stale_campaign_matches_23h() {
        let stale = generate_chart_data(&campaign(1000, 10, Some(TimeDelta::hours(100))), now());
        let reference = generate_chart_data(
            &campaign(1000, 10, Some(TimeDelta::seconds(CHART_STALE_AGE_SECS))),
            now(),
        );
        assert_eq!(stale, reference);
        assert_eq!(stale.current_point().map(|p| p.hour), Some(23));
    }

    #[test]
    fn missing_created_at_marks_hour_zero() {
        let chart = generate_chart_data(&campaign(50, 10, None), now());
        assert_eq!(chart.total_hours, 5);
        assert_eq!(current_indices(&chart), vec![0]);
    }

    #[test]
    fn messages_never_decrease() {
        let chart = generate_chart_data(&campaign(77, 6, Some(TimeDelta::minutes(200))), now());
        assert!(chart.points.windows(2).all(|w| w[0].messages <= w[1].messages));
        assert_eq!(chart.points.last().map(|p| p.messages), Some(77));
    }

    #[test]
    fn zero_rate_yields_single_empty_point() {
        let chart = generate_chart_data(&campaign(100, 0, Some(TimeDelta::hours(4))), now());
        assert_eq!(chart.total_hours, 0);
        assert_eq!(
            chart.points,
            vec![ChartPoint { hour: 0, messages: 0, is_current: true }]
        );
    }

    #[test]
    fn rate_larger_than_target() {
        let chart = generate_chart_data(&campaign(2, 10, Some(TimeDelta::zero())), now());
        assert_eq!(chart.total_hours, 1);
        assert_eq!(chart.points.len(), 2);
        assert_eq!(chart.points[0].messages, 2);
        assert_eq!(chart.points[1].messages, 2);
    }
}
