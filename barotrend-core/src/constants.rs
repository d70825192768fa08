//! Default limits, thresholds, and weights
//!
//! Central home for every numeric default the pipeline uses. The values here
//! seed [`PipelineConfig::default`](crate::config::PipelineConfig); nothing
//! outside this module and the config should hard-code a threshold.
//!
//! Sources: validity ranges and step limits come from the station's sensor
//! characteristics (BME280-class ambient sensors polled every couple of
//! minutes); pressure level/trend thresholds are the conventional synoptic
//! ones (≥1020 hPa anticyclonic, ≤1002 hPa cyclonic, ±2/±4 hPa over 3 h for
//! a front passing).

// ===== VALIDITY RANGES =====

/// Minimum plausible interior temperature (°C).
pub const TEMP_INTERIOR_MIN_C: f64 = -10.0;

/// Maximum plausible interior temperature (°C).
pub const TEMP_INTERIOR_MAX_C: f64 = 50.0;

/// Minimum plausible exterior temperature (°C).
pub const TEMP_EXTERIOR_MIN_C: f64 = -30.0;

/// Maximum plausible exterior temperature (°C).
pub const TEMP_EXTERIOR_MAX_C: f64 = 50.0;

/// Minimum relative humidity (%). Physical lower limit.
pub const HUMIDITY_MIN_PCT: f64 = 0.0;

/// Maximum relative humidity (%). Physical upper limit.
pub const HUMIDITY_MAX_PCT: f64 = 100.0;

/// Minimum plausible station-level pressure (hPa).
///
/// Well below any recorded continental low; anything under this is a
/// sensor or transport fault.
pub const PRESSURE_MIN_HPA: f64 = 950.0;

/// Maximum plausible station-level pressure (hPa).
pub const PRESSURE_MAX_HPA: f64 = 1050.0;

/// Minimum auxiliary (device) temperature (°C).
pub const AUX_TEMP_MIN_C: f64 = 0.0;

/// Maximum auxiliary (device) temperature (°C).
pub const AUX_TEMP_MAX_C: f64 = 100.0;

// ===== SPIKE FILTER STEP LIMITS =====
//
// Maximum change between two consecutive accepted samples. At the station's
// poll interval a larger jump is electrical noise or a transport glitch,
// not weather.

/// Maximum temperature step between accepted samples (°C).
pub const TEMP_MAX_STEP_C: f64 = 10.0;

/// Maximum humidity step between accepted samples (%RH).
pub const HUMIDITY_MAX_STEP_PCT: f64 = 20.0;

/// Maximum pressure step between accepted samples (hPa).
pub const PRESSURE_MAX_STEP_HPA: f64 = 6.0;

// ===== PRESSURE CLASSIFICATION THRESHOLDS =====

/// Pressure at or above this is classified as high (hPa).
pub const PRESSURE_HIGH_HPA: f64 = 1020.0;

/// Pressure at or below this is classified as low (hPa).
pub const PRESSURE_LOW_HPA: f64 = 1002.0;

/// 3-hour pressure delta magnitude for a strong trend (hPa). Inclusive.
pub const DP3_STRONG_HPA: f64 = 4.0;

/// 3-hour pressure delta magnitude for a moderate trend (hPa). Inclusive.
pub const DP3_MEDIUM_HPA: f64 = 2.0;

// ===== FORECAST WINDOWS =====

/// Short pressure-delta window (hours).
pub const WINDOW_SHORT_H: f64 = 1.0;

/// Trend pressure/humidity delta window (hours).
pub const WINDOW_TREND_H: f64 = 3.0;

/// Long pressure/humidity delta window (hours).
pub const WINDOW_LONG_H: f64 = 6.0;

/// Lookback window the feature extractor considers at all (hours).
pub const WINDOW_LOOKBACK_H: f64 = 24.0;

/// Minimum pressure samples inside the lookback window.
///
/// Below this the extractor withholds an opinion rather than guessing.
pub const MIN_FORECAST_SAMPLES: usize = 3;

// ===== INSTABILITY INDEX WEIGHTS =====
//
// The instability index is an unbounded heuristic score, not a probability.
// The 3-hour pressure delta carries the most signal, the 6-hour delta
// confirms it, and the 1-hour delta catches fast-moving fronts.

/// Weight of |dp3h| in the instability index.
pub const WEIGHT_DP3: f64 = 1.0;

/// Weight of |dp6h| in the instability index.
pub const WEIGHT_DP6: f64 = 0.5;

/// Weight of |dp1h| in the instability index.
pub const WEIGHT_DP1: f64 = 0.3;

/// Weight per percentage point of humidity above [`HUMIDITY_EXCESS_PCT`].
pub const WEIGHT_HUMIDITY_EXCESS: f64 = 0.02;

/// Humidity above this contributes to instability (%RH).
pub const HUMIDITY_EXCESS_PCT: f64 = 70.0;

/// Weight of a rising 3-hour humidity delta (per 10 %RH).
pub const WEIGHT_DH3: f64 = 0.3;

/// Weight of a rising 6-hour humidity delta (per 10 %RH).
pub const WEIGHT_DH6: f64 = 0.5;

/// Amplitude of the seasonal modifier applied to the instability total.
pub const SEASONAL_AMPLITUDE: f64 = 0.1;

/// Instability above this upgrades a falling-pressure forecast to storm.
pub const INSTABILITY_STORM: f64 = 6.0;

/// Instability above this upgrades a stable low/normal forecast to rain.
pub const INSTABILITY_RAIN: f64 = 5.0;

// ===== ICE / SNOW POST-FILTER =====

/// Lower bound of the ice-risk temperature band (°C).
pub const ICE_BAND_MIN_C: f64 = -3.0;

/// Upper bound of the ice-risk temperature band (°C); also the ceiling
/// below which precipitation is re-labelled frozen.
pub const ICE_BAND_MAX_C: f64 = 1.0;

/// Humidity at or above this inside the ice band flags ice risk (%RH).
pub const ICE_HUMIDITY_PCT: f64 = 80.0;

/// Humidity above this drives the pressure-less rain fallback (%RH).
pub const FALLBACK_RAIN_HUMIDITY_PCT: f64 = 80.0;

// ===== DAY-OVERLAY COMPARISON =====

/// Maximum number of days the overlay comparison can span.
pub const MAX_COMPARE_DAYS: usize = 7;
