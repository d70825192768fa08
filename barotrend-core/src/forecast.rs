//! Rule-based weather classification
//!
//! ## Overview
//!
//! Turns a [`FeatureBundle`] into a [`Classification`]: a pressure level,
//! a pressure trend, a numeric instability index, and a display icon with
//! a short summary. The rules are deliberately simple barometric
//! heuristics - absolute pressure places the regime, the 3h delta gives
//! the trend, and the instability index folds the remaining deltas and
//! humidity into a single scalar compared against two alarm thresholds.
//!
//! A cold-weather post-filter runs last: near-freezing exterior
//! temperature rewrites precipitation icons to snow and flags ice risk,
//! overriding whatever the pressure rules chose.
//!
//! Every step degrades rather than fails. Missing pressure falls back to
//! a humidity-only guess; missing deltas drop out of the index; missing
//! temperature skips the cold-weather pass entirely.

use crate::config::PipelineConfig;
use crate::features::FeatureBundle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Absolute pressure regime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum PressureLevel {
    /// Above the high threshold (anticyclonic)
    High = 0,
    /// Between the thresholds
    Normal = 1,
    /// Below the low threshold (depression)
    Low = 2,
    /// Current pressure unavailable
    Unknown = 3,
}

impl PressureLevel {
    /// Human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Normal => "normal",
            Self::Low => "low",
            Self::Unknown => "unknown",
        }
    }
}

/// Direction and strength of the 3h pressure change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum PressureTrend {
    /// Falling fast
    StrongDown = 0,
    /// Falling
    Down = 1,
    /// Within the dead band
    Stable = 2,
    /// Rising
    Up = 3,
    /// Rising fast
    StrongUp = 4,
    /// Delta unavailable
    Unknown = 5,
}

impl PressureTrend {
    /// Human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::StrongDown => "strong down",
            Self::Down => "down",
            Self::Stable => "stable",
            Self::Up => "up",
            Self::StrongUp => "strong up",
            Self::Unknown => "unknown",
        }
    }

    /// True for [`Up`](Self::Up) and [`StrongUp`](Self::StrongUp)
    pub const fn is_rising(&self) -> bool {
        matches!(self, Self::Up | Self::StrongUp)
    }

    /// True for [`Down`](Self::Down) and [`StrongDown`](Self::StrongDown)
    pub const fn is_falling(&self) -> bool {
        matches!(self, Self::Down | Self::StrongDown)
    }
}

/// Display icon for the forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum ForecastIcon {
    /// Clear sky
    Sun = 0,
    /// Partly cloudy
    Partly = 1,
    /// Overcast
    Cloud = 2,
    /// Rain
    Rain = 3,
    /// Snow
    Snow = 4,
    /// Thunderstorm
    Storm = 5,
    /// Ice or frost
    Ice = 6,
}

impl ForecastIcon {
    /// Emoji glyph for dashboards
    pub const fn glyph(&self) -> &'static str {
        match self {
            Self::Sun => "\u{2600}\u{fe0f}",
            Self::Partly => "\u{26c5}",
            Self::Cloud => "\u{2601}\u{fe0f}",
            Self::Rain => "\u{1f327}\u{fe0f}",
            Self::Snow => "\u{2744}\u{fe0f}",
            Self::Storm => "\u{26c8}\u{fe0f}",
            Self::Ice => "\u{1f9ca}",
        }
    }

    /// Human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Partly => "partly cloudy",
            Self::Cloud => "cloud",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Storm => "storm",
            Self::Ice => "ice",
        }
    }
}

/// Full classifier output
///
/// Serialize-only: the summary strings are static classifier text, not
/// round-trippable data.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Classification {
    /// Absolute pressure regime
    pub level: PressureLevel,
    /// 3h pressure trend
    pub trend: PressureTrend,
    /// Weighted instability index (unitless, higher is worse)
    pub instability: f64,
    /// Display icon after the cold-weather post-filter
    pub icon: ForecastIcon,
    /// One-line forecast
    pub summary: &'static str,
    /// Supporting note
    pub detail: &'static str,
    /// Near-freezing with saturated air
    pub ice_risk: bool,
}

/// Classify absolute pressure against the configured thresholds
///
/// Boundaries belong to the outer regimes: exactly the high threshold is
/// `High`, exactly the low threshold is `Low`. `None` maps to
/// [`PressureLevel::Unknown`].
pub fn classify_pressure_level(p_now: Option<f64>, config: &PipelineConfig) -> PressureLevel {
    let p_now = match p_now {
        Some(p) => p,
        None => return PressureLevel::Unknown,
    };
    if p_now >= config.thresholds.high_hpa {
        PressureLevel::High
    } else if p_now <= config.thresholds.low_hpa {
        PressureLevel::Low
    } else {
        PressureLevel::Normal
    }
}

/// Classify the 3h pressure delta
///
/// Thresholds are inclusive: a delta of exactly ±strong is already the
/// strong variant. `None` maps to [`PressureTrend::Unknown`].
pub fn classify_pressure_trend(dp_3h: Option<f64>, config: &PipelineConfig) -> PressureTrend {
    let dp = match dp_3h {
        Some(dp) => dp,
        None => return PressureTrend::Unknown,
    };
    let strong = config.thresholds.strong_hpa;
    let medium = config.thresholds.medium_hpa;

    if dp <= -strong {
        PressureTrend::StrongDown
    } else if dp <= -medium {
        PressureTrend::Down
    } else if dp >= strong {
        PressureTrend::StrongUp
    } else if dp >= medium {
        PressureTrend::Up
    } else {
        PressureTrend::Stable
    }
}

/// Weighted instability index
///
/// Sums the absolute pressure deltas, humidity excess over the comfort
/// threshold, and positive humidity deltas, each with its configured
/// weight; absent inputs contribute nothing. The total is then modulated
/// by the seasonal factor `1 + amplitude·sin(2π·doy/365)`, slightly
/// raising scores in the unstable half of the year.
pub fn instability_index(features: &FeatureBundle, config: &PipelineConfig) -> f64 {
    let w = &config.weights;
    let mut index = 0.0;

    if let Some(dp3) = features.dp_3h {
        index += w.dp3 * abs(dp3);
    }
    if let Some(dp6) = features.dp_6h {
        index += w.dp6 * abs(dp6);
    }
    if let Some(dp1) = features.dp_1h {
        index += w.dp1 * abs(dp1);
    }
    if let Some(h_now) = features.h_now {
        index += w.humidity_excess * positive(h_now - w.humidity_excess_pct);
    }
    // Rising humidity destabilizes; falling humidity is ignored
    if let Some(dh3) = features.dh_3h {
        index += w.dh3 * positive(dh3) / 10.0;
    }
    if let Some(dh6) = features.dh_6h {
        index += w.dh6 * positive(dh6) / 10.0;
    }

    index * (1.0 + w.seasonal_amplitude * features.doy_sin)
}

/// Produce the final forecast
///
/// Applies the pressure rules, then the cold-weather post-filter. Without
/// a current pressure the result is a humidity-only fallback with the
/// trend forced to [`PressureTrend::Unknown`]; the fallback is returned
/// directly, without the post-filter.
pub fn decide_weather(features: &FeatureBundle, config: &PipelineConfig) -> Classification {
    let instability = instability_index(features, config);
    let h_now = features.h_now;

    let p_now = match features.p_now {
        Some(p) => p,
        None => {
            // Degraded mode: no pressure at all, guess from humidity
            let (icon, summary, detail) = if h_now.unwrap_or(0.0) > crate::constants::FALLBACK_RAIN_HUMIDITY_PCT {
                (
                    ForecastIcon::Rain,
                    "Possible rain",
                    "high humidity, pressure unavailable",
                )
            } else {
                (
                    ForecastIcon::Cloud,
                    "Uncertain",
                    "pressure unavailable",
                )
            };
            // The cold-weather pass only rewrites the pressure branches;
            // the degraded guess is returned as-is
            return Classification {
                level: PressureLevel::Unknown,
                trend: PressureTrend::Unknown,
                instability,
                icon,
                summary,
                detail,
                ice_risk: false,
            };
        }
    };

    let level = classify_pressure_level(Some(p_now), config);
    let trend = classify_pressure_trend(features.dp_3h, config);

    let (icon, summary, detail) = if trend.is_rising() {
        if level == PressureLevel::High {
            (
                ForecastIcon::Sun,
                "Improving",
                "rising pressure on a high, clear spells ahead",
            )
        } else {
            (
                ForecastIcon::Partly,
                "Improving",
                "pressure on the rise",
            )
        }
    } else if trend.is_falling() {
        if instability > config.instability_storm {
            (
                ForecastIcon::Storm,
                "Worsening fast",
                "sharp pressure drop with unstable air",
            )
        } else {
            (
                ForecastIcon::Rain,
                "Worsening",
                "falling pressure, rain likely",
            )
        }
    } else {
        match level {
            PressureLevel::High => (
                ForecastIcon::Sun,
                "Stable",
                "high pressure, good weather holds",
            ),
            PressureLevel::Low => {
                if instability > config.instability_rain {
                    (
                        ForecastIcon::Rain,
                        "Unsettled",
                        "low pressure with persistent instability",
                    )
                } else {
                    (
                        ForecastIcon::Cloud,
                        "Overcast",
                        "low pressure, variable cloud",
                    )
                }
            }
            // Unknown cannot occur here (pressure is present), but the
            // match must stay exhaustive
            PressureLevel::Normal | PressureLevel::Unknown => {
                if instability > config.instability_rain {
                    (
                        ForecastIcon::Rain,
                        "Showers possible",
                        "moderate instability",
                    )
                } else {
                    (
                        ForecastIcon::Partly,
                        "Mostly stable",
                        "no strong signals",
                    )
                }
            }
        }
    };

    cold_weather_filter(
        Classification {
            level,
            trend,
            instability,
            icon,
            summary,
            detail,
            ice_risk: false,
        },
        features,
    )
}

/// Rewrite the icon for near-freezing conditions
///
/// Precipitation at or below the freezing cutoff becomes snow, or ice
/// when the air is also saturated in the frost band. Dry cold on a calm
/// icon still gets a frost warning when the band and humidity both match.
/// Without a temperature reading the classification passes through
/// untouched.
fn cold_weather_filter(mut class: Classification, features: &FeatureBundle) -> Classification {
    use crate::constants::{ICE_BAND_MAX_C, ICE_BAND_MIN_C, ICE_HUMIDITY_PCT};

    let t_now = match features.t_now {
        Some(t) => t,
        None => return class,
    };

    let ice_risk = (ICE_BAND_MIN_C..=ICE_BAND_MAX_C).contains(&t_now)
        && features.h_now.unwrap_or(0.0) >= ICE_HUMIDITY_PCT;
    class.ice_risk = ice_risk;

    if t_now <= ICE_BAND_MAX_C
        && matches!(class.icon, ForecastIcon::Rain | ForecastIcon::Storm)
    {
        if ice_risk {
            class.icon = ForecastIcon::Ice;
            class.summary = "Freezing precipitation";
            class.detail = "snow or ice forming near the ground";
        } else {
            class.icon = ForecastIcon::Snow;
            class.summary = "Possible snowfall";
            class.detail = "precipitation near freezing";
        }
    } else if ice_risk
        && matches!(
            class.icon,
            ForecastIcon::Cloud | ForecastIcon::Partly | ForecastIcon::Sun
        )
    {
        class.icon = ForecastIcon::Ice;
        class.summary = "Frost risk";
        class.detail = "near-freezing with saturated air";
    }

    class
}

fn abs(x: f64) -> f64 {
    libm::fabs(x)
}

fn positive(x: f64) -> f64 {
    if x > 0.0 {
        x
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Timestamp;

    const NOW: Timestamp = 1_705_320_000_000;

    fn bundle() -> FeatureBundle {
        FeatureBundle {
            now: NOW,
            p_now: Some(1013.0),
            t_now: Some(12.0),
            h_now: Some(55.0),
            dp_1h: Some(0.0),
            dp_3h: Some(0.0),
            dp_6h: Some(0.0),
            dh_3h: Some(0.0),
            dh_6h: Some(0.0),
            hour: 12,
            day_of_year: 15,
            hour_sin: 0.0,
            hour_cos: -1.0,
            doy_sin: 0.0,
            doy_cos: 1.0,
            sample_count: 24,
        }
    }

    fn cfg() -> PipelineConfig {
        PipelineConfig::default()
    }

    #[test]
    fn level_boundaries_inclusive() {
        let c = cfg();
        assert_eq!(
            classify_pressure_level(Some(1020.0), &c),
            PressureLevel::High
        );
        assert_eq!(
            classify_pressure_level(Some(1019.9), &c),
            PressureLevel::Normal
        );
        assert_eq!(classify_pressure_level(Some(1002.0), &c), PressureLevel::Low);
        assert_eq!(
            classify_pressure_level(Some(1002.1), &c),
            PressureLevel::Normal
        );
        assert_eq!(classify_pressure_level(None, &c), PressureLevel::Unknown);
    }

    #[test]
    fn trend_boundaries_inclusive() {
        let c = cfg();
        assert_eq!(
            classify_pressure_trend(Some(-4.0), &c),
            PressureTrend::StrongDown
        );
        assert_eq!(classify_pressure_trend(Some(-3.9), &c), PressureTrend::Down);
        assert_eq!(classify_pressure_trend(Some(-2.0), &c), PressureTrend::Down);
        assert_eq!(
            classify_pressure_trend(Some(-1.9), &c),
            PressureTrend::Stable
        );
        assert_eq!(classify_pressure_trend(Some(2.0), &c), PressureTrend::Up);
        assert_eq!(
            classify_pressure_trend(Some(4.0), &c),
            PressureTrend::StrongUp
        );
        assert_eq!(classify_pressure_trend(None, &c), PressureTrend::Unknown);
    }

    #[test]
    fn instability_omits_absent_terms() {
        let mut f = bundle();
        f.dp_1h = None;
        f.dp_6h = None;
        f.dh_3h = None;
        f.dh_6h = None;
        f.h_now = None;
        f.dp_3h = Some(-3.0);
        // Only the dp3 term remains
        assert!((instability_index(&f, &cfg()) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn instability_ignores_falling_humidity() {
        let mut f = bundle();
        f.dh_3h = Some(-20.0);
        f.dh_6h = Some(-30.0);
        assert_eq!(instability_index(&f, &cfg()), 0.0);
    }

    #[test]
    fn instability_seasonal_modulation() {
        let mut f = bundle();
        f.dp_3h = Some(-3.0);
        f.dp_1h = None;
        f.dp_6h = None;
        f.h_now = None;
        f.dh_3h = None;
        f.dh_6h = None;
        f.doy_sin = 1.0;
        assert!((instability_index(&f, &cfg()) - 3.3).abs() < 1e-12);
    }

    #[test]
    fn falling_trend_never_sunny() {
        let mut f = bundle();
        f.p_now = Some(1025.0); // high regime
        f.dp_3h = Some(-5.0); // but crashing
        f.dp_6h = Some(-8.0);
        f.dp_1h = Some(-2.0);
        let class = decide_weather(&f, &cfg());
        assert_eq!(class.trend, PressureTrend::StrongDown);
        assert!(matches!(
            class.icon,
            ForecastIcon::Rain | ForecastIcon::Storm
        ));
    }

    #[test]
    fn sharp_drop_with_humid_air_is_storm() {
        let mut f = bundle();
        f.p_now = Some(1005.0);
        f.dp_1h = Some(-2.0);
        f.dp_3h = Some(-6.0);
        f.dp_6h = Some(-9.0);
        f.h_now = Some(90.0);
        let class = decide_weather(&f, &cfg());
        assert!(class.instability > 6.0);
        assert_eq!(class.icon, ForecastIcon::Storm);
    }

    #[test]
    fn high_and_stable_is_sun() {
        let mut f = bundle();
        f.p_now = Some(1026.0);
        let class = decide_weather(&f, &cfg());
        assert_eq!(class.level, PressureLevel::High);
        assert_eq!(class.trend, PressureTrend::Stable);
        assert_eq!(class.icon, ForecastIcon::Sun);
    }

    #[test]
    fn rising_on_high_clears_up() {
        let mut f = bundle();
        f.p_now = Some(1022.0);
        f.dp_3h = Some(3.0);
        let class = decide_weather(&f, &cfg());
        assert_eq!(class.icon, ForecastIcon::Sun);

        f.p_now = Some(1010.0);
        let class = decide_weather(&f, &cfg());
        assert_eq!(class.icon, ForecastIcon::Partly);
    }

    #[test]
    fn missing_pressure_falls_back_to_humidity() {
        let mut f = bundle();
        f.p_now = None;
        f.h_now = Some(85.0);
        let class = decide_weather(&f, &cfg());
        assert_eq!(class.level, PressureLevel::Unknown);
        assert_eq!(class.trend, PressureTrend::Unknown);
        assert_eq!(class.icon, ForecastIcon::Rain);

        f.h_now = Some(50.0);
        let class = decide_weather(&f, &cfg());
        assert_eq!(class.icon, ForecastIcon::Cloud);
    }

    #[test]
    fn fallback_bypasses_cold_filter() {
        // Freezing and saturated, but with pressure missing the degraded
        // humidity guess stands: no ice override, no ice-risk flag
        let mut f = bundle();
        f.p_now = None;
        f.t_now = Some(0.0);
        f.h_now = Some(85.0);
        let class = decide_weather(&f, &cfg());
        assert_eq!(class.icon, ForecastIcon::Rain);
        assert!(!class.ice_risk);
    }

    #[test]
    fn normal_stable_low_instability_is_partly() {
        let mut f = bundle();
        f.p_now = Some(1013.0);
        let class = decide_weather(&f, &cfg());
        assert_eq!(class.level, PressureLevel::Normal);
        assert_eq!(class.trend, PressureTrend::Stable);
        assert_eq!(class.icon, ForecastIcon::Partly);
    }

    #[test]
    fn freezing_rain_becomes_ice_when_saturated() {
        let mut f = bundle();
        f.p_now = Some(1005.0);
        f.dp_3h = Some(-3.0); // rain path
        f.t_now = Some(0.0);
        f.h_now = Some(85.0);
        let class = decide_weather(&f, &cfg());
        assert!(class.ice_risk);
        assert_eq!(class.icon, ForecastIcon::Ice);
    }

    #[test]
    fn freezing_rain_without_saturation_is_snow() {
        let mut f = bundle();
        f.p_now = Some(1005.0);
        f.dp_3h = Some(-3.0);
        f.t_now = Some(-5.0); // below the frost band, so no ice risk
        f.h_now = Some(60.0);
        let class = decide_weather(&f, &cfg());
        assert!(!class.ice_risk);
        assert_eq!(class.icon, ForecastIcon::Snow);
    }

    #[test]
    fn frost_risk_on_calm_icon() {
        let mut f = bundle();
        f.p_now = Some(1025.0); // sunny and stable
        f.t_now = Some(-1.0);
        f.h_now = Some(90.0);
        let class = decide_weather(&f, &cfg());
        assert!(class.ice_risk);
        assert_eq!(class.icon, ForecastIcon::Ice);
        assert_eq!(class.summary, "Frost risk");
    }

    #[test]
    fn no_temperature_skips_cold_filter() {
        let mut f = bundle();
        f.p_now = Some(1005.0);
        f.dp_3h = Some(-3.0);
        f.t_now = None;
        let class = decide_weather(&f, &cfg());
        assert_eq!(class.icon, ForecastIcon::Rain);
        assert!(!class.ice_risk);
    }

    #[test]
    fn glyphs_and_names_cover_all_icons() {
        for icon in [
            ForecastIcon::Sun,
            ForecastIcon::Partly,
            ForecastIcon::Cloud,
            ForecastIcon::Rain,
            ForecastIcon::Snow,
            ForecastIcon::Storm,
            ForecastIcon::Ice,
        ] {
            assert!(!icon.glyph().is_empty());
            assert!(!icon.name().is_empty());
        }
    }
}
