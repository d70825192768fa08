//! Error types for validation and configuration
//!
//! Errors are kept small and `Copy` with all context inline - no `String`,
//! only `&'static str` where a reason is needed. Nothing in this crate is
//! fatal: the aggregation and forecast layers never return an error at all,
//! they degrade to `None` when data is missing (see the window and features
//! modules). Errors exist only at the two places where a caller made a
//! checkable mistake: feeding a physically-impossible sample to a validator,
//! or constructing an inconsistent [`PipelineConfig`].
//!
//! [`PipelineConfig`]: crate::config::PipelineConfig

use thiserror_no_std::Error;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Why a raw sample was rejected by a channel validator
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    /// Value outside the channel's validity range
    #[error("Value {value} outside range [{min}, {max}]")]
    OutOfRange {
        /// The raw sample that failed validation
        value: f64,
        /// Minimum acceptable value for the channel
        min: f64,
        /// Maximum acceptable value for the channel
        max: f64,
    },

    /// Value is not a usable number (NaN, infinity)
    #[error("Invalid value: not a finite number")]
    InvalidValue,
}

/// Why a [`PipelineConfig`](crate::config::PipelineConfig) was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A channel's validity range has min above max
    #[error("Channel {channel}: range minimum {min} exceeds maximum {max}")]
    InvalidRange {
        /// Channel name
        channel: &'static str,
        /// Configured minimum
        min: f64,
        /// Configured maximum
        max: f64,
    },

    /// A spike-filter step limit is zero or negative
    #[error("Channel {channel}: max step {step} must be positive")]
    NonPositiveStep {
        /// Channel name
        channel: &'static str,
        /// Configured step limit
        step: f64,
    },

    /// A window size is zero or negative
    #[error("Window of {hours} hours must be positive")]
    NonPositiveWindow {
        /// Configured window size in hours
        hours: f64,
    },
}
