//! Sensor channels, raw readings, and clean series points
//!
//! A [`Reading`] is one poll of the station: a timestamp plus a raw value
//! per channel, any of which may be missing. Channels are a closed set, so
//! readings store their values in a fixed array indexed by [`Channel`]
//! rather than a map - no allocation, O(1) access, and a `Reading` stays
//! `Copy`.

use crate::time::Timestamp;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of sensor channels
pub const CHANNEL_COUNT: usize = 4;

/// A measured physical quantity on the station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Channel {
    /// Exterior air temperature (°C)
    Temperature = 0,
    /// Exterior relative humidity (%)
    Humidity = 1,
    /// Barometric pressure (hPa)
    Pressure = 2,
    /// Auxiliary device temperature, e.g. the logger's CPU (°C)
    AuxTemperature = 3,
}

impl Channel {
    /// All channels, in storage order
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::Temperature,
        Channel::Humidity,
        Channel::Pressure,
        Channel::AuxTemperature,
    ];

    /// Get human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Channel::Temperature => "temperature",
            Channel::Humidity => "humidity",
            Channel::Pressure => "pressure",
            Channel::AuxTemperature => "aux_temperature",
        }
    }

    /// Get unit of measurement
    pub const fn unit(&self) -> &'static str {
        match self {
            Channel::Temperature | Channel::AuxTemperature => "°C",
            Channel::Humidity => "%",
            Channel::Pressure => "hPa",
        }
    }

    /// Storage index within a [`Reading`]
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

/// One poll of the station: timestamp plus raw per-channel values
///
/// Produced by the transport collaborator (one per poll) and immutable once
/// handed to the pipeline. A `None` value means the channel was missing or
/// unparseable in this poll; validation happens later, so values here may
/// still be physically impossible.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    /// When the poll was taken
    pub timestamp: Timestamp,
    /// Raw values, indexed by [`Channel`]
    values: [Option<f64>; CHANNEL_COUNT],
}

impl Reading {
    /// Create an empty reading at the given instant
    pub const fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            values: [None; CHANNEL_COUNT],
        }
    }

    /// Set a channel's raw value
    pub fn set(&mut self, channel: Channel, value: f64) {
        self.values[channel.index()] = Some(value);
    }

    /// Set a channel's raw value, builder style
    pub fn with(mut self, channel: Channel, value: f64) -> Self {
        self.set(channel, value);
        self
    }

    /// Get a channel's raw value, if present
    pub fn get(&self, channel: Channel) -> Option<f64> {
        self.values[channel.index()]
    }
}

/// One validated, de-spiked observation for a single channel
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// Observation instant
    pub x: Timestamp,
    /// Observed value; always finite and inside the channel's validity range
    pub y: f64,
}

impl Point {
    /// Construct a point
    pub const fn new(x: Timestamp, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_metadata() {
        assert_eq!(Channel::Pressure.name(), "pressure");
        assert_eq!(Channel::Pressure.unit(), "hPa");
        assert_eq!(Channel::ALL.len(), CHANNEL_COUNT);
    }

    #[test]
    fn reading_roundtrip() {
        let reading = Reading::new(1000)
            .with(Channel::Temperature, 21.5)
            .with(Channel::Pressure, 1013.0);

        assert_eq!(reading.get(Channel::Temperature), Some(21.5));
        assert_eq!(reading.get(Channel::Pressure), Some(1013.0));
        assert_eq!(reading.get(Channel::Humidity), None);
    }
}
