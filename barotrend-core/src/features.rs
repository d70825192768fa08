//! Forecast feature extraction
//!
//! Assembles the [`FeatureBundle`] the classifier consumes: current values,
//! pressure/humidity deltas at several windows, and cyclical encodings of
//! the hour and day of year. Built fresh per evaluation from the clean
//! series; nothing is cached.
//!
//! The extractor withholds an opinion rather than guessing: with fewer than
//! `min_samples` pressure points in the trailing lookback window it returns
//! `None` and the caller shows no forecast. Any individual field may also
//! be absent - every downstream formula handles `None` by omitting the
//! term, never by substituting zero.

use libm::{cos, sin};

use crate::{
    config::PipelineConfig,
    series::SeriesSet,
    time::{hour_and_day_of_year, Timestamp},
    window::{delta_over_window, last_valid, window},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inputs to the weather classifier, for one evaluation instant
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeatureBundle {
    /// Anchor timestamp: the last pressure sample inside the lookback
    /// window. Deltas are measured against this, not against the caller's
    /// clock - see [`age_ms`](Self::age_ms).
    pub now: Timestamp,

    /// Current pressure (hPa)
    pub p_now: Option<f64>,
    /// Current exterior temperature (°C)
    pub t_now: Option<f64>,
    /// Current exterior humidity (%RH)
    pub h_now: Option<f64>,

    /// Pressure change over the short window (hPa)
    pub dp_1h: Option<f64>,
    /// Pressure change over the trend window (hPa)
    pub dp_3h: Option<f64>,
    /// Pressure change over the long window (hPa)
    pub dp_6h: Option<f64>,

    /// Humidity change over the trend window (%RH)
    pub dh_3h: Option<f64>,
    /// Humidity change over the long window (%RH)
    pub dh_6h: Option<f64>,

    /// Local hour at the anchor instant (0-23)
    pub hour: u32,
    /// Ordinal day of year at the anchor instant (1-366)
    pub day_of_year: u32,
    /// sin(2π·hour/24)
    pub hour_sin: f64,
    /// cos(2π·hour/24)
    pub hour_cos: f64,
    /// sin(2π·doy/365)
    pub doy_sin: f64,
    /// cos(2π·doy/365)
    pub doy_cos: f64,

    /// Pressure samples inside the lookback window
    pub sample_count: usize,
}

impl FeatureBundle {
    /// Milliseconds between the caller's clock and the anchor sample
    ///
    /// Large values mean the feed is stale and every delta in the bundle
    /// describes a window that ended some time ago.
    pub fn age_ms(&self, as_of: Timestamp) -> u64 {
        as_of.saturating_sub(self.now)
    }
}

/// Extract forecast features from the clean series
///
/// `as_of` bounds the lookback window; only points at or before it are
/// considered. Returns `None` when the pressure channel has fewer than
/// `config.min_samples` points inside the window.
pub fn extract_features(
    series: &SeriesSet,
    as_of: Timestamp,
    config: &PipelineConfig,
) -> Option<FeatureBundle> {
    let lookback = config.windows.lookback_h;

    let pressure = window(&series.pressure, lookback, as_of);
    if pressure.len() < config.min_samples {
        return None;
    }
    let humidity = window(&series.humidity, lookback, as_of);
    let temperature = window(&series.temperature, lookback, as_of);

    // Anchor at the last observed pressure sample, not at `as_of`
    let now = pressure.last()?.x;

    let (hour, day_of_year) = hour_and_day_of_year(now, config.utc_offset_min);
    let hour_angle = 2.0 * core::f64::consts::PI * (hour as f64 / 24.0);
    let doy_angle = 2.0 * core::f64::consts::PI * (day_of_year as f64 / 365.0);

    Some(FeatureBundle {
        now,
        p_now: last_valid(&pressure),
        t_now: last_valid(&temperature),
        h_now: last_valid(&humidity),
        dp_1h: delta_over_window(&pressure, config.windows.short_h),
        dp_3h: delta_over_window(&pressure, config.windows.trend_h),
        dp_6h: delta_over_window(&pressure, config.windows.long_h),
        dh_3h: delta_over_window(&humidity, config.windows.trend_h),
        dh_6h: delta_over_window(&humidity, config.windows.long_h),
        hour,
        day_of_year,
        hour_sin: sin(hour_angle),
        hour_cos: cos(hour_angle),
        doy_sin: sin(doy_angle),
        doy_cos: cos(doy_angle),
        sample_count: pressure.len(),
    })
}
