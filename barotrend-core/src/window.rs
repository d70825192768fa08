//! Windowed aggregation over clean series
//!
//! Two small operations the feature extractor is built from, plus the
//! trailing-range filter used to bound how much history an evaluation sees.
//!
//! `delta_over_window` is deliberately anchored at the series' **last
//! sample** timestamp, not at the caller's "now": the delta describes the
//! most recent window the station actually observed. If the feed is stale
//! the delta is equally stale - callers that care compare the series tail
//! against their own clock (see
//! [`FeatureBundle::age_ms`](crate::features::FeatureBundle::age_ms)).

use alloc::vec::Vec;

use crate::{
    reading::Point,
    time::{hours_to_ms, Timestamp},
};

/// Last present, finite value of a series
///
/// Scans backward so a trailing non-finite artifact (which a clean series
/// should never contain, but a hand-built one might) is skipped rather than
/// returned.
pub fn last_valid(series: &[Point]) -> Option<f64> {
    series.iter().rev().map(|p| p.y).find(|y| y.is_finite())
}

/// Change of a value over the trailing window of the series
///
/// Let `cutoff` be the final sample's timestamp minus `window_hours`. The
/// result is `last − first`, where `first` is the first chronological
/// finite value at or after `cutoff` and `last` is the last chronological
/// finite value in the series. Returns `None` when either endpoint cannot
/// be determined (empty series, or no finite value inside the window).
pub fn delta_over_window(series: &[Point], window_hours: f64) -> Option<f64> {
    let ts_last = series.last()?.x;
    let cutoff = ts_last.saturating_sub(hours_to_ms(window_hours));

    let mut first_val = None;
    let mut last_val = None;

    for point in series {
        if point.x < cutoff || !point.y.is_finite() {
            continue;
        }
        if first_val.is_none() {
            first_val = Some(point.y);
        }
        last_val = Some(point.y);
    }

    Some(last_val? - first_val?)
}

/// Points inside the trailing window `[end − hours, end]`, inclusive
pub fn window(series: &[Point], hours: f64, end: Timestamp) -> Vec<Point> {
    let start = end.saturating_sub(hours_to_ms(hours));
    series
        .iter()
        .filter(|p| p.x >= start && p.x <= end)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::MS_PER_HOUR;
    use alloc::vec;

    fn hourly(values: &[f64]) -> Vec<Point> {
        values
            .iter()
            .enumerate()
            .map(|(i, &y)| Point::new(i as u64 * MS_PER_HOUR, y))
            .collect()
    }

    #[test]
    fn last_valid_of_empty_is_none() {
        assert!(last_valid(&[]).is_none());
    }

    #[test]
    fn last_valid_skips_trailing_nan() {
        let series = vec![Point::new(0, 1010.0), Point::new(1000, f64::NAN)];
        assert_eq!(last_valid(&series), Some(1010.0));
    }

    #[test]
    fn delta_of_empty_is_none() {
        assert!(delta_over_window(&[], 3.0).is_none());
    }

    #[test]
    fn delta_over_exact_window() {
        // 1020, 1018, 1016, 1014 at t=0..3h; 3h window covers all of it
        let series = hourly(&[1020.0, 1018.0, 1016.0, 1014.0]);
        assert_eq!(delta_over_window(&series, 3.0), Some(-6.0));
    }

    #[test]
    fn delta_anchored_at_last_sample() {
        // Window starts at t_last − 1h = 2h, so only the last two count
        let series = hourly(&[1020.0, 1018.0, 1016.0, 1014.0]);
        assert_eq!(delta_over_window(&series, 1.0), Some(-2.0));
    }

    #[test]
    fn delta_monotonic_equals_last_minus_first_in_window() {
        let series = hourly(&[1000.0, 1001.0, 1002.0, 1003.0, 1004.0]);
        assert_eq!(delta_over_window(&series, 2.0), Some(2.0));
        assert_eq!(delta_over_window(&series, 100.0), Some(4.0));
    }

    #[test]
    fn delta_single_point_is_zero() {
        // One sample: first and last endpoints coincide
        let series = vec![Point::new(0, 1013.0)];
        assert_eq!(delta_over_window(&series, 3.0), Some(0.0));
    }

    #[test]
    fn delta_skips_non_finite_endpoints() {
        let series = vec![
            Point::new(0, f64::NAN),
            Point::new(MS_PER_HOUR, 1010.0),
            Point::new(2 * MS_PER_HOUR, 1014.0),
        ];
        assert_eq!(delta_over_window(&series, 6.0), Some(4.0));
    }

    #[test]
    fn window_trailing_range_inclusive() {
        let series = hourly(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let tail = window(&series, 2.0, 4 * MS_PER_HOUR);
        let values: Vec<f64> = tail.iter().map(|p| p.y).collect();
        assert_eq!(values, vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn window_with_earlier_end() {
        let series = hourly(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let tail = window(&series, 1.0, 2 * MS_PER_HOUR);
        let values: Vec<f64> = tail.iter().map(|p| p.y).collect();
        assert_eq!(values, vec![2.0, 3.0]);
    }
}
