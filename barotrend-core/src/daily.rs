//! Day-overlay grouping for comparison charts
//!
//! Splits a series into per-day buckets keyed by fractional hour of the
//! local day, so several days can be drawn over a shared 0-24h axis.
//! Day 0 runs from local midnight to the evaluation instant; older days
//! cover their full calendar day. The number of overlay days is bounded,
//! so the result lives in a fixed-capacity vector.

use alloc::vec::Vec;

use heapless::Vec as BoundedVec;

use crate::{
    config::PipelineConfig,
    constants::MAX_COMPARE_DAYS,
    reading::Point,
    time::{hour_of_day, local_midnight, Timestamp, MS_PER_DAY},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One sample re-keyed to its position within the local day
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HourPoint {
    /// Fractional hour of the local day, `[0, 24)`
    pub hour: f64,
    /// Sample value
    pub value: f64,
}

/// One day's worth of samples on the shared hour axis
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayGroup {
    /// Whole days before the evaluation instant (0 = today)
    pub days_back: u32,
    /// First covered instant (local midnight)
    pub start: Timestamp,
    /// Last covered instant, inclusive
    pub end: Timestamp,
    /// Samples inside the day, ascending by hour
    pub points: Vec<HourPoint>,
}

/// Group a series into per-day hour-keyed buckets
///
/// Produces one [`DayGroup`] per offset in `0..days_back`, newest first,
/// including days with no samples. `days_back` saturates at
/// [`MAX_COMPARE_DAYS`]; zero yields an empty result. The input need not
/// be sorted, output points within each group are.
pub fn group_by_day(
    series: &[Point],
    days_back: u32,
    now: Timestamp,
    config: &PipelineConfig,
) -> BoundedVec<DayGroup, MAX_COMPARE_DAYS> {
    let mut groups = BoundedVec::new();
    let days_back = days_back.min(MAX_COMPARE_DAYS as u32);

    for offset in 0..days_back {
        let start = local_midnight(now, config.utc_offset_min, offset);
        let end = if offset == 0 {
            // Today is clipped at the evaluation instant
            now
        } else {
            start.saturating_add(MS_PER_DAY - 1)
        };

        let mut points: Vec<HourPoint> = series
            .iter()
            .filter(|p| p.x >= start && p.x <= end)
            .map(|p| HourPoint {
                hour: hour_of_day(p.x, config.utc_offset_min),
                value: p.y,
            })
            .collect();
        // Total order is fine here, hours are finite by construction
        points.sort_by(|a, b| a.hour.total_cmp(&b.hour));

        let group = DayGroup {
            days_back: offset,
            start,
            end,
            points,
        };
        // Capacity equals the cap on days_back, push cannot fail
        if groups.push(group).is_err() {
            break;
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::MS_PER_HOUR;
    use alloc::vec;

    // 2024-01-15 12:30:00 UTC
    const NOW: Timestamp = 1_705_321_800_000;

    fn cfg() -> PipelineConfig {
        PipelineConfig::default()
    }

    #[test]
    fn empty_request_yields_no_groups() {
        let groups = group_by_day(&[], 0, NOW, &cfg());
        assert!(groups.is_empty());
    }

    #[test]
    fn three_days_three_groups() {
        let series = vec![
            // Two days ago at 06:00
            Point::new(NOW - 2 * MS_PER_DAY - 6 * MS_PER_HOUR - MS_PER_HOUR / 2, 1010.0),
            // Yesterday at 18:30
            Point::new(NOW + 6 * MS_PER_HOUR - MS_PER_DAY, 1012.0),
            // Today at 09:30
            Point::new(NOW - 3 * MS_PER_HOUR, 1014.0),
        ];
        let groups = group_by_day(&series, 3, NOW, &cfg());

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].days_back, 0);
        assert_eq!(groups[0].points.len(), 1);
        assert!((groups[0].points[0].hour - 9.5).abs() < 1e-9);

        assert_eq!(groups[1].days_back, 1);
        assert!((groups[1].points[0].hour - 18.5).abs() < 1e-9);

        assert_eq!(groups[2].days_back, 2);
        assert!((groups[2].points[0].hour - 6.0).abs() < 1e-9);
    }

    #[test]
    fn today_excludes_future_samples() {
        let series = vec![
            Point::new(NOW - MS_PER_HOUR, 1010.0),
            // Later today, after the evaluation instant
            Point::new(NOW + 2 * MS_PER_HOUR, 1011.0),
        ];
        let groups = group_by_day(&series, 1, NOW, &cfg());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].points.len(), 1);
        assert_eq!(groups[0].end, NOW);
    }

    #[test]
    fn full_day_spans_midnight_to_midnight() {
        let groups = group_by_day(&[], 2, NOW, &cfg());
        let yesterday = &groups[1];
        assert_eq!(yesterday.end - yesterday.start, MS_PER_DAY - 1);
        assert_eq!(groups[0].start - yesterday.start, MS_PER_DAY);
    }

    #[test]
    fn points_sorted_within_group() {
        let series = vec![
            Point::new(NOW - MS_PER_HOUR, 1.0),
            Point::new(NOW - 5 * MS_PER_HOUR, 2.0),
            Point::new(NOW - 3 * MS_PER_HOUR, 3.0),
        ];
        let groups = group_by_day(&series, 1, NOW, &cfg());
        let hours: Vec<f64> = groups[0].points.iter().map(|p| p.hour).collect();
        assert!(hours.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn days_back_saturates_at_capacity() {
        let groups = group_by_day(&[], 30, NOW, &cfg());
        assert_eq!(groups.len(), MAX_COMPARE_DAYS);
    }

    #[test]
    fn offset_shifts_day_boundaries() {
        let mut config = cfg();
        config.utc_offset_min = 120;
        // 2024-01-14 23:00 UTC is already Jan 15 at UTC+2, so it lands in today
        let series = vec![Point::new(NOW - 13 * MS_PER_HOUR - MS_PER_HOUR / 2, 1010.0)];
        let groups = group_by_day(&series, 1, NOW, &config);
        assert_eq!(groups[0].points.len(), 1);
        assert!((groups[0].points[0].hour - 1.0).abs() < 1e-9);
    }
}
