//! ThingSpeak-style feed parsing for Barotrend
//!
//! Converts the `feeds.json` document a ThingSpeak channel export (or any
//! compatible endpoint) returns into [`Reading`] batches for
//! `barotrend-core`. No network I/O happens here: the hosting application
//! fetches the document however it likes and hands the raw JSON string to
//! [`parse_feeds`].
//!
//! Field values arrive as strings and are parsed leniently - an empty,
//! malformed, or non-finite value becomes an absent channel on that
//! reading rather than an error. Entries whose `created_at` cannot be
//! parsed are skipped entirely, since a reading without a timestamp
//! cannot be placed on any series. Only a malformed document or one with
//! no entries at all is reported as an error.
//!
//! ```no_run
//! use barotrend_feeds::{parse_feeds, FieldMap};
//!
//! let json = r#"{"feeds":[{"created_at":"2024-01-15T12:00:00Z","field3":"1013.2"}]}"#;
//! let readings = parse_feeds(json, &FieldMap::default())?;
//! assert_eq!(readings.len(), 1);
//! # Ok::<(), barotrend_feeds::FeedError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

use barotrend_core::{Channel, Reading};
use chrono::DateTime;
use serde::Deserialize;
use thiserror_no_std::Error;

/// Number of numbered fields a ThingSpeak channel carries
pub const FEED_FIELD_COUNT: usize = 8;

/// Errors from feed parsing
#[derive(Debug, Error)]
pub enum FeedError {
    /// The document is not valid JSON or lacks the expected shape
    #[error("invalid feed document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but no entry had a usable timestamp
    #[error("feed document contains no usable entries")]
    Empty,
}

/// Assignment of numbered feed fields to pipeline channels
///
/// The default matches the station firmware's upload order: `field1`
/// exterior temperature, `field2` humidity, `field3` pressure, `field4`
/// the auxiliary board-temperature diagnostic. Fields 5-8 are unmapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMap {
    assignments: [Option<Channel>; FEED_FIELD_COUNT],
}

impl Default for FieldMap {
    fn default() -> Self {
        let mut assignments = [None; FEED_FIELD_COUNT];
        assignments[0] = Some(Channel::Temperature);
        assignments[1] = Some(Channel::Humidity);
        assignments[2] = Some(Channel::Pressure);
        assignments[3] = Some(Channel::AuxTemperature);
        Self { assignments }
    }
}

impl FieldMap {
    /// A map with no fields assigned
    pub const fn empty() -> Self {
        Self {
            assignments: [None; FEED_FIELD_COUNT],
        }
    }

    /// Assign a field (1-based, as in the JSON keys) to a channel
    ///
    /// Out-of-range field numbers are ignored.
    pub fn assign(mut self, field: usize, channel: Channel) -> Self {
        if (1..=FEED_FIELD_COUNT).contains(&field) {
            self.assignments[field - 1] = Some(channel);
        }
        self
    }

    /// Channel assigned to a field (1-based), if any
    pub fn channel(&self, field: usize) -> Option<Channel> {
        self.assignments.get(field.checked_sub(1)?).copied().flatten()
    }
}

/// Channel metadata from the document header
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedChannelInfo {
    /// Channel id
    #[serde(default)]
    pub id: Option<u64>,
    /// Channel display name
    #[serde(default)]
    pub name: Option<String>,
}

/// One raw entry as it appears in the document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedEntry {
    /// RFC 3339 creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,
    /// Server-assigned entry id
    #[serde(default)]
    pub entry_id: Option<u64>,
    #[serde(default)]
    field1: Option<String>,
    #[serde(default)]
    field2: Option<String>,
    #[serde(default)]
    field3: Option<String>,
    #[serde(default)]
    field4: Option<String>,
    #[serde(default)]
    field5: Option<String>,
    #[serde(default)]
    field6: Option<String>,
    #[serde(default)]
    field7: Option<String>,
    #[serde(default)]
    field8: Option<String>,
}

impl FeedEntry {
    /// Raw string value of a field (1-based)
    pub fn field(&self, field: usize) -> Option<&str> {
        let value = match field {
            1 => &self.field1,
            2 => &self.field2,
            3 => &self.field3,
            4 => &self.field4,
            5 => &self.field5,
            6 => &self.field6,
            7 => &self.field7,
            8 => &self.field8,
            _ => &None,
        };
        value.as_deref()
    }
}

/// The whole feed document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedDocument {
    /// Header metadata, when present
    #[serde(default)]
    pub channel: Option<FeedChannelInfo>,
    /// Entries, oldest first in well-behaved exports
    #[serde(default)]
    pub feeds: Vec<FeedEntry>,
}

/// Parse a raw feed document into readings
///
/// Entries without a parseable `created_at`, or with a pre-epoch one, are
/// dropped. The result is sorted by timestamp ascending regardless of the
/// document's order. Returns [`FeedError::Empty`] when nothing survives.
pub fn parse_feeds(json: &str, map: &FieldMap) -> Result<Vec<Reading>, FeedError> {
    let document: FeedDocument = serde_json::from_str(json)?;
    let total = document.feeds.len();

    let mut readings: Vec<Reading> = document
        .feeds
        .iter()
        .filter_map(|entry| reading_from_entry(entry, map))
        .collect();
    readings.sort_by_key(|r| r.timestamp);

    if readings.len() < total {
        log::warn!(
            "dropped {} of {} feed entries with unusable timestamps",
            total - readings.len(),
            total,
        );
    }
    if readings.is_empty() {
        return Err(FeedError::Empty);
    }
    Ok(readings)
}

fn reading_from_entry(entry: &FeedEntry, map: &FieldMap) -> Option<Reading> {
    let created_at = entry.created_at.as_deref()?;
    let timestamp = DateTime::parse_from_rfc3339(created_at.trim())
        .ok()?
        .timestamp_millis();
    let timestamp = u64::try_from(timestamp).ok()?;

    let mut reading = Reading::new(timestamp);
    for field in 1..=FEED_FIELD_COUNT {
        if let Some(channel) = map.channel(field) {
            if let Some(value) = entry.field(field).and_then(parse_value) {
                reading.set(channel, value);
            }
        }
    }
    Some(reading)
}

// Lenient numeric parse: blank, malformed, or non-finite means absent
fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
