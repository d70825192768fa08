//! Time handling for series and calendar math
//!
//! Timestamps are plain `u64` milliseconds since the Unix epoch, matching
//! what feed transports deliver. Calendar decomposition (hour of day, day of
//! year, local midnight) goes through `chrono` with a fixed UTC offset: the
//! pipeline never consults a timezone database, the hosting application
//! passes its offset in minutes via the config. With a fixed offset a local
//! day is always exactly 24 hours, so day-bucket arithmetic stays integral.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc};

/// Timestamp in milliseconds since the Unix epoch
pub type Timestamp = u64;

/// Milliseconds per hour
pub const MS_PER_HOUR: u64 = 3_600_000;

/// Milliseconds per day
pub const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

/// Convert a (possibly fractional) hour count to milliseconds
pub fn hours_to_ms(hours: f64) -> u64 {
    if hours <= 0.0 {
        return 0;
    }
    (hours * MS_PER_HOUR as f64) as u64
}

/// Resolve a timestamp to local civil time at the given UTC offset
///
/// Out-of-range offsets (beyond ±24h) and pre-epoch overflow fall back to
/// UTC at the epoch rather than panicking.
fn local(ts: Timestamp, utc_offset_min: i32) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(utc_offset_min.saturating_mul(60)).unwrap_or(Utc.fix());
    DateTime::from_timestamp_millis(ts as i64)
        .unwrap_or_default()
        .with_timezone(&offset)
}

/// Fractional hour of the local day in `[0, 24)`
///
/// `14:30:00` maps to `14.5`. Sub-second precision is ignored, matching the
/// hour + minute/60 + second/3600 keying used for day-overlay charts.
pub fn hour_of_day(ts: Timestamp, utc_offset_min: i32) -> f64 {
    local(ts, utc_offset_min).time().num_seconds_from_midnight() as f64 / 3600.0
}

/// Local hour (0-23) and ordinal day of year (1-366)
pub fn hour_and_day_of_year(ts: Timestamp, utc_offset_min: i32) -> (u32, u32) {
    let dt = local(ts, utc_offset_min);
    (dt.hour(), dt.ordinal())
}

/// Start of the local calendar day `days_back` days before the day
/// containing `ts`, as a timestamp
///
/// `days_back = 0` is midnight of the day containing `ts` itself.
pub fn local_midnight(ts: Timestamp, utc_offset_min: i32, days_back: u32) -> Timestamp {
    let dt = local(ts, utc_offset_min);
    let since_midnight = dt.time().num_seconds_from_midnight() as u64 * 1000
        + (dt.timestamp_subsec_millis() as u64);
    ts.saturating_sub(since_midnight)
        .saturating_sub(days_back as u64 * MS_PER_DAY)
}
