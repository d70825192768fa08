//! Clean series construction: validate, de-spike, summarize
//!
//! [`build_series`] turns the raw reading stream into one clean, ordered
//! [`Point`] series per channel: every sample goes through the range
//! validator, rejects are dropped, and survivors pass through the spike
//! filter. The result is what charts plot and what the window aggregator
//! and feature extractor consume.
//!
//! Spike filtering compares each candidate to the **last retained** value,
//! not the previous raw one - a rejected outlier never becomes the anchor
//! for the next comparison, so an isolated glitch cannot drag the baseline
//! with it. The first point is always retained: with no history there is
//! nothing to compare against, and dropping it would make the filter's
//! output depend on where the query window happened to start.

use alloc::vec::Vec;

use crate::{
    config::PipelineConfig,
    reading::{Channel, Point, Reading},
    validators::RangeValidator,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Remove consecutive outliers exceeding `max_step`
///
/// Single pass, O(n). Retains the first point unconditionally, then keeps a
/// point iff it differs from the last retained value by at most `max_step`.
/// Idempotent: filtering an already-filtered series changes nothing.
pub fn filter_spikes(points: &[Point], max_step: f64) -> Vec<Point> {
    let mut anchor = match points.first() {
        Some(p) => *p,
        None => return Vec::new(),
    };
    let mut clean = Vec::with_capacity(points.len());
    clean.push(anchor);

    for point in &points[1..] {
        if libm::fabs(point.y - anchor.y) <= max_step {
            clean.push(*point);
            anchor = *point;
        }
    }
    clean
}

/// Build the clean series for one channel
///
/// Maps each reading through the channel's range validator, drops rejects
/// and missing values, and de-spikes the survivors when the channel has a
/// step limit configured. Input readings are assumed time-ordered; output
/// order equals input order.
pub fn build_series(readings: &[Reading], channel: Channel, config: &PipelineConfig) -> Vec<Point> {
    let channel_cfg = config.channel(channel);
    let validator = RangeValidator::from(channel_cfg);

    let raw: Vec<Point> = readings
        .iter()
        .filter_map(|reading| {
            let value = reading.get(channel)?;
            validator
                .validate(value)
                .ok()
                .map(|_| Point::new(reading.timestamp, value))
        })
        .collect();

    match channel_cfg.max_step {
        Some(step) => filter_spikes(&raw, step),
        None => raw,
    }
}

/// Min/max summary of a clean series, with the points that achieved them
///
/// Matches what chart annotations need: the extreme values and where they
/// occurred. Ties resolve to the earliest occurrence.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeriesStats {
    /// Point with the minimum value
    pub min: Point,
    /// Point with the maximum value
    pub max: Point,
}

impl SeriesStats {
    /// Compute stats over a series; `None` when empty
    pub fn of(series: &[Point]) -> Option<Self> {
        let first = series.first()?;
        let mut stats = Self {
            min: *first,
            max: *first,
        };
        for point in &series[1..] {
            if point.y < stats.min.y {
                stats.min = *point;
            }
            if point.y > stats.max.y {
                stats.max = *point;
            }
        }
        Some(stats)
    }
}

/// One clean series per channel
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeriesSet {
    /// Clean exterior temperature series
    pub temperature: Vec<Point>,
    /// Clean humidity series
    pub humidity: Vec<Point>,
    /// Clean pressure series
    pub pressure: Vec<Point>,
    /// Clean auxiliary temperature series
    pub aux_temperature: Vec<Point>,
}

impl SeriesSet {
    /// Clean every channel of the reading stream
    pub fn build(readings: &[Reading], config: &PipelineConfig) -> Self {
        Self {
            temperature: build_series(readings, Channel::Temperature, config),
            humidity: build_series(readings, Channel::Humidity, config),
            pressure: build_series(readings, Channel::Pressure, config),
            aux_temperature: build_series(readings, Channel::AuxTemperature, config),
        }
    }

    /// Access one channel's series
    pub fn channel(&self, channel: Channel) -> &[Point] {
        match channel {
            Channel::Temperature => &self.temperature,
            Channel::Humidity => &self.humidity,
            Channel::Pressure => &self.pressure,
            Channel::AuxTemperature => &self.aux_temperature,
        }
    }
}
