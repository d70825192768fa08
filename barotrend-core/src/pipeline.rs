//! Pipeline facade
//!
//! ## Overview
//!
//! [`WeatherPipeline`] runs the full chain in one call: validate and
//! despike every channel, extract forecast features from the trailing
//! window, classify, and hand back a [`Snapshot`] with the clean series,
//! per-channel extremes, and the forecast. The pipeline itself holds only
//! configuration; evaluating the same readings twice produces equal
//! snapshots.
//!
//! ```no_run
//! use barotrend_core::{Channel, PipelineConfig, Reading, WeatherPipeline};
//!
//! let pipeline = WeatherPipeline::new(PipelineConfig::default());
//! let mut reading = Reading::new(1_700_000_000_000);
//! reading.set(Channel::Pressure, 1013.2);
//! let snapshot = pipeline.evaluate(&[reading], 1_700_000_000_000);
//! ```

use heapless::Vec as BoundedVec;

use crate::{
    config::PipelineConfig,
    constants::MAX_COMPARE_DAYS,
    daily::{group_by_day, DayGroup},
    errors::ConfigError,
    features::{extract_features, FeatureBundle},
    forecast::{decide_weather, Classification},
    reading::{Channel, Reading, CHANNEL_COUNT},
    series::{SeriesSet, SeriesStats},
    time::Timestamp,
};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Result of one pipeline evaluation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Snapshot {
    /// Evaluation instant the caller supplied
    pub as_of: Timestamp,
    /// Clean per-channel series
    pub series: SeriesSet,
    /// Min/max markers per channel, `None` for empty series
    pub stats: [Option<SeriesStats>; CHANNEL_COUNT],
    /// Forecast inputs, absent when pressure data is too sparse
    pub features: Option<FeatureBundle>,
    /// Forecast, absent exactly when `features` is
    pub forecast: Option<Classification>,
}

impl Snapshot {
    /// Extremes for one channel
    pub fn channel_stats(&self, channel: Channel) -> Option<&SeriesStats> {
        self.stats[channel.index()].as_ref()
    }
}

/// Stateless evaluator over a reading batch
#[derive(Debug, Clone, Default)]
pub struct WeatherPipeline {
    config: PipelineConfig,
}

impl WeatherPipeline {
    /// Build a pipeline with the given configuration
    ///
    /// The configuration is taken as-is; use [`try_new`](Self::try_new)
    /// to reject inconsistent limits up front.
    pub const fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Build a pipeline, validating the configuration first
    pub fn try_new(config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full chain over a reading batch
    ///
    /// `as_of` is the evaluation instant: readings after it still enter
    /// the clean series, but the forecast window ends there. Readings may
    /// arrive in any order per channel as long as timestamps ascend,
    /// which feed parsers guarantee.
    pub fn evaluate(&self, readings: &[Reading], as_of: Timestamp) -> Snapshot {
        let series = SeriesSet::build(readings, &self.config);

        let mut stats: [Option<SeriesStats>; CHANNEL_COUNT] = [None; CHANNEL_COUNT];
        for channel in Channel::ALL {
            stats[channel.index()] = SeriesStats::of(series.channel(channel));
        }

        let features = extract_features(&series, as_of, &self.config);
        let forecast = features.as_ref().map(|f| decide_weather(f, &self.config));

        #[cfg(feature = "log")]
        match (&features, &forecast) {
            (Some(f), Some(c)) => log::debug!(
                "evaluated {} readings: p_now={:?} dp3h={:?} instability={:.2} -> {}",
                readings.len(),
                f.p_now,
                f.dp_3h,
                c.instability,
                c.icon.name(),
            ),
            _ => log::debug!(
                "evaluated {} readings: insufficient pressure samples, no forecast",
                readings.len(),
            ),
        }

        Snapshot {
            as_of,
            series,
            stats,
            features,
            forecast,
        }
    }

    /// Group one channel of a snapshot into day-overlay buckets
    ///
    /// Uses the configured `compare_days`; day 0 ends at the snapshot's
    /// `as_of`.
    pub fn compare(
        &self,
        snapshot: &Snapshot,
        channel: Channel,
    ) -> BoundedVec<DayGroup, MAX_COMPARE_DAYS> {
        group_by_day(
            snapshot.series.channel(channel),
            self.config.compare_days as u32,
            snapshot.as_of,
            &self.config,
        )
    }
}
