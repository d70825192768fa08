//! Shared helpers for integration tests

use barotrend_core::{Channel, Reading};

/// Milliseconds per hour
pub const MS_PER_HOUR: u64 = 3_600_000;

/// 2024-01-15 12:00:00 UTC, the evaluation instant used across scenarios
pub const NOW: u64 = 1_705_320_000_000;

/// Builds hourly reading batches ending at a fixed instant
///
/// Channels are supplied as value slices aligned on the same hourly grid,
/// newest value last. `None` leaves the channel absent on that reading.
pub struct BatchBuilder {
    end: u64,
    step: u64,
    channels: Vec<(Channel, Vec<Option<f64>>)>,
}

impl BatchBuilder {
    pub fn hourly() -> Self {
        Self {
            end: NOW,
            step: MS_PER_HOUR,
            channels: Vec::new(),
        }
    }

    pub fn ending_at(mut self, end: u64) -> Self {
        self.end = end;
        self
    }

    pub fn every(mut self, step: u64) -> Self {
        self.step = step;
        self
    }

    pub fn channel(mut self, channel: Channel, values: &[f64]) -> Self {
        self.channels
            .push((channel, values.iter().map(|&v| Some(v)).collect()));
        self
    }

    pub fn channel_sparse(mut self, channel: Channel, values: &[Option<f64>]) -> Self {
        self.channels.push((channel, values.to_vec()));
        self
    }

    pub fn build(self) -> Vec<Reading> {
        let len = self
            .channels
            .iter()
            .map(|(_, v)| v.len())
            .max()
            .unwrap_or(0);

        (0..len)
            .map(|i| {
                let ts = self.end - (len - 1 - i) as u64 * self.step;
                let mut reading = Reading::new(ts);
                for (channel, values) in &self.channels {
                    // Shorter channels are right-aligned on the grid
                    let offset = len - values.len();
                    if i >= offset {
                        if let Some(v) = values[i - offset] {
                            reading.set(*channel, v);
                        }
                    }
                }
                reading
            })
            .collect()
    }
}
