//! Range validation for raw channel samples
//!
//! The first cleaning stage: a sample survives iff it is a finite number
//! inside the channel's validity range, boundaries included. This is a pure
//! predicate - no history, no side effects; step (rate) rejection lives in
//! the spike filter where the previous *accepted* sample is known.

use crate::{
    config::{ChannelConfig, ValueRange},
    constants::*,
    errors::{ValidationError, ValidationResult},
};

/// Check that a value lies inside an inclusive range
pub fn check_range(value: f64, min: f64, max: f64) -> ValidationResult<()> {
    if value < min || value > max {
        Err(ValidationError::OutOfRange { value, min, max })
    } else {
        Ok(())
    }
}

/// Validity-range validator for one channel
#[derive(Debug, Clone, Copy)]
pub struct RangeValidator {
    min: f64,
    max: f64,
}

impl RangeValidator {
    /// Create a validator with explicit limits
    pub fn new(min: f64, max: f64) -> Self {
        // Tolerate swapped limits rather than silently rejecting everything
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        Self { min, max }
    }

    /// Validator for an exterior temperature sensor
    pub fn exterior_temperature() -> Self {
        Self::new(TEMP_EXTERIOR_MIN_C, TEMP_EXTERIOR_MAX_C)
    }

    /// Validator for an interior temperature sensor (tighter band)
    pub fn interior_temperature() -> Self {
        Self::new(TEMP_INTERIOR_MIN_C, TEMP_INTERIOR_MAX_C)
    }

    /// Validator for relative humidity
    pub fn humidity() -> Self {
        Self::new(HUMIDITY_MIN_PCT, HUMIDITY_MAX_PCT)
    }

    /// Validator for station-level barometric pressure
    pub fn pressure() -> Self {
        Self::new(PRESSURE_MIN_HPA, PRESSURE_MAX_HPA)
    }

    /// Validator for the auxiliary device temperature
    pub fn aux_temperature() -> Self {
        Self::new(AUX_TEMP_MIN_C, AUX_TEMP_MAX_C)
    }

    /// Validate a raw sample
    pub fn validate(&self, value: f64) -> ValidationResult<()> {
        if !value.is_finite() {
            return Err(ValidationError::InvalidValue);
        }
        check_range(value, self.min, self.max)
    }

    /// Convenience predicate form of [`validate`](Self::validate)
    pub fn is_valid(&self, value: f64) -> bool {
        self.validate(value).is_ok()
    }
}

impl From<&ChannelConfig> for RangeValidator {
    fn from(cfg: &ChannelConfig) -> Self {
        let ValueRange { min, max } = cfg.range;
        Self::new(min, max)
    }
}
