//! Core pipeline for Barotrend
//!
//! Cleans time-ordered environmental sensor readings and derives a
//! short-term weather-trend classification from barometric behavior.
//!
//! The pipeline is a chain of pure transformations:
//!
//! ```text
//! Readings → Validator → Spike Filter → clean series
//!                                         ├→ Window Aggregator → Features → Classifier
//!                                         └→ Day Grouper (overlay comparison)
//! ```
//!
//! No stage holds hidden state; every operation takes its inputs and the
//! [`PipelineConfig`] explicitly and returns fresh values, so re-evaluation
//! over the same readings is idempotent.
//!
//! ```no_run
//! use barotrend_core::{WeatherPipeline, PipelineConfig, Reading, Channel};
//!
//! let pipeline = WeatherPipeline::new(PipelineConfig::default());
//!
//! let mut reading = Reading::new(1_700_000_000_000);
//! reading.set(Channel::Pressure, 1013.2);
//! reading.set(Channel::Temperature, 12.5);
//!
//! let snapshot = pipeline.evaluate(&[reading], 1_700_000_000_000);
//! if let Some(forecast) = &snapshot.forecast {
//!     println!("{}: {}", forecast.summary, forecast.detail);
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

pub mod config;
pub mod constants;
pub mod daily;
pub mod errors;
pub mod features;
pub mod forecast;
pub mod pipeline;
pub mod reading;
pub mod series;
pub mod time;
pub mod validators;
pub mod window;

// Public API
pub use config::PipelineConfig;
pub use errors::{ConfigError, ValidationError, ValidationResult};
pub use features::FeatureBundle;
pub use forecast::{Classification, ForecastIcon, PressureLevel, PressureTrend};
pub use pipeline::{Snapshot, WeatherPipeline};
pub use reading::{Channel, Point, Reading};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
