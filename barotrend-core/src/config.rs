//! Pipeline configuration
//!
//! Everything the pipeline previously could have hard-coded is a parameter
//! here: per-channel validity ranges and spike steps, pressure thresholds,
//! delta windows, instability weights, and the day-overlay span. Defaults
//! come from [`constants`](crate::constants) and describe a mid-latitude
//! station near sea level; deployments at altitude or with different sensor
//! hardware override the relevant fields and call [`validate`] once at
//! startup.
//!
//! [`validate`]: PipelineConfig::validate

use crate::{
    constants::*,
    errors::ConfigError,
    reading::{Channel, CHANNEL_COUNT},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inclusive validity range for one channel
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValueRange {
    /// Minimum accepted value
    pub min: f64,
    /// Maximum accepted value
    pub max: f64,
}

impl ValueRange {
    /// Construct a range
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Cleaning parameters for one channel
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelConfig {
    /// Validity range; samples outside are dropped
    pub range: ValueRange,
    /// Maximum step between consecutive accepted samples;
    /// `None` disables spike filtering for the channel
    pub max_step: Option<f64>,
}

/// Absolute-pressure and 3-hour-trend classification thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrendThresholds {
    /// Pressure at or above this is "high" (hPa)
    pub high_hpa: f64,
    /// Pressure at or below this is "low" (hPa)
    pub low_hpa: f64,
    /// |dp3h| at or above this is a strong trend (hPa)
    pub strong_hpa: f64,
    /// |dp3h| at or above this is a moderate trend (hPa)
    pub medium_hpa: f64,
}

/// Delta-window sizes used by the feature extractor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Windows {
    /// Short pressure window (hours)
    pub short_h: f64,
    /// Trend pressure/humidity window (hours)
    pub trend_h: f64,
    /// Long pressure/humidity window (hours)
    pub long_h: f64,
    /// Total lookback the extractor considers (hours)
    pub lookback_h: f64,
}

/// Weighting coefficients for the instability index
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InstabilityWeights {
    /// Weight of |dp3h|
    pub dp3: f64,
    /// Weight of |dp6h|
    pub dp6: f64,
    /// Weight of |dp1h|
    pub dp1: f64,
    /// Weight per %RH above `humidity_excess_pct`
    pub humidity_excess: f64,
    /// Humidity floor above which excess is penalized (%RH)
    pub humidity_excess_pct: f64,
    /// Weight of a rising 3h humidity delta (per 10 %RH)
    pub dh3: f64,
    /// Weight of a rising 6h humidity delta (per 10 %RH)
    pub dh6: f64,
    /// Amplitude of the seasonal day-of-year modifier
    pub seasonal_amplitude: f64,
}

/// Complete pipeline configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PipelineConfig {
    /// Per-channel cleaning parameters, indexed by [`Channel`]
    pub channels: [ChannelConfig; CHANNEL_COUNT],
    /// Pressure classification thresholds
    pub thresholds: TrendThresholds,
    /// Feature-extraction windows
    pub windows: Windows,
    /// Instability index weights
    pub weights: InstabilityWeights,
    /// Minimum pressure samples in the lookback window before
    /// the extractor produces features at all
    pub min_samples: usize,
    /// Instability above which a falling trend becomes a storm
    pub instability_storm: f64,
    /// Instability above which a stable low/normal becomes rain
    pub instability_rain: f64,
    /// Days the overlay comparison spans (capped at
    /// [`MAX_COMPARE_DAYS`])
    pub compare_days: usize,
    /// Local UTC offset in minutes, for hour-of-day and midnight math
    pub utc_offset_min: i32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            channels: [
                // Temperature (exterior)
                ChannelConfig {
                    range: ValueRange::new(TEMP_EXTERIOR_MIN_C, TEMP_EXTERIOR_MAX_C),
                    max_step: Some(TEMP_MAX_STEP_C),
                },
                // Humidity
                ChannelConfig {
                    range: ValueRange::new(HUMIDITY_MIN_PCT, HUMIDITY_MAX_PCT),
                    max_step: Some(HUMIDITY_MAX_STEP_PCT),
                },
                // Pressure
                ChannelConfig {
                    range: ValueRange::new(PRESSURE_MIN_HPA, PRESSURE_MAX_HPA),
                    max_step: Some(PRESSURE_MAX_STEP_HPA),
                },
                // Aux temperature: wide range, no step limit configured
                ChannelConfig {
                    range: ValueRange::new(AUX_TEMP_MIN_C, AUX_TEMP_MAX_C),
                    max_step: None,
                },
            ],
            thresholds: TrendThresholds {
                high_hpa: PRESSURE_HIGH_HPA,
                low_hpa: PRESSURE_LOW_HPA,
                strong_hpa: DP3_STRONG_HPA,
                medium_hpa: DP3_MEDIUM_HPA,
            },
            windows: Windows {
                short_h: WINDOW_SHORT_H,
                trend_h: WINDOW_TREND_H,
                long_h: WINDOW_LONG_H,
                lookback_h: WINDOW_LOOKBACK_H,
            },
            weights: InstabilityWeights {
                dp3: WEIGHT_DP3,
                dp6: WEIGHT_DP6,
                dp1: WEIGHT_DP1,
                humidity_excess: WEIGHT_HUMIDITY_EXCESS,
                humidity_excess_pct: HUMIDITY_EXCESS_PCT,
                dh3: WEIGHT_DH3,
                dh6: WEIGHT_DH6,
                seasonal_amplitude: SEASONAL_AMPLITUDE,
            },
            min_samples: MIN_FORECAST_SAMPLES,
            instability_storm: INSTABILITY_STORM,
            instability_rain: INSTABILITY_RAIN,
            compare_days: 3,
            utc_offset_min: 0,
        }
    }
}

impl PipelineConfig {
    /// Configuration for an indoor station
    ///
    /// Same as [`default`](Self::default) except the temperature channel
    /// uses the tighter interior validity band: an indoor sensor reading
    /// below −10 °C is a fault, not weather.
    pub fn indoor() -> Self {
        let mut config = Self::default();
        config.channels[Channel::Temperature.index()].range =
            ValueRange::new(TEMP_INTERIOR_MIN_C, TEMP_INTERIOR_MAX_C);
        config
    }

    /// Cleaning parameters for one channel
    pub fn channel(&self, channel: Channel) -> &ChannelConfig {
        &self.channels[channel.index()]
    }

    /// Check the configuration for internal consistency
    ///
    /// Call once at startup; the pipeline itself trusts the config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for channel in Channel::ALL {
            let cfg = self.channel(channel);
            if cfg.range.min > cfg.range.max {
                return Err(ConfigError::InvalidRange {
                    channel: channel.name(),
                    min: cfg.range.min,
                    max: cfg.range.max,
                });
            }
            if let Some(step) = cfg.max_step {
                if step <= 0.0 {
                    return Err(ConfigError::NonPositiveStep {
                        channel: channel.name(),
                        step,
                    });
                }
            }
        }

        for hours in [
            self.windows.short_h,
            self.windows.trend_h,
            self.windows.long_h,
            self.windows.lookback_h,
        ] {
            if hours <= 0.0 {
                return Err(ConfigError::NonPositiveWindow { hours });
            }
        }

        Ok(())
    }
}
