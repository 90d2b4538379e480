use chrono::{NaiveDateTime, Timelike};

use crate::types::{EpochSeconds, Timestamp};

/// Canonical layout of a combined `Date` and `Time` pair (`yyyy-MM-dd HH:mm:ss`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Combines a calendar date and a time of day into a single timestamp.
///
/// Both parts are trimmed and joined with a single space before being parsed against
/// [`TIMESTAMP_FORMAT`]. A missing part, a leap second, or anything that does not match
/// the layout yields `None`; this never fails loudly because a bad timestamp must not drop the row.
pub fn normalize(date: Option<&str>, time: Option<&str>) -> Option<Timestamp> {
    let (date, time) = (date?.trim(), time?.trim());

    if date.is_empty() || time.is_empty() {
        return None;
    }

    let timestamp = NaiveDateTime::parse_from_str(&format!("{date} {time}"), TIMESTAMP_FORMAT).ok()?;

    // chrono reads second 60 as a leap second, encoded as a full second of nanoseconds
    (timestamp.nanosecond() < 1_000_000_000).then_some(timestamp)
}

/// Linear time used to order and range-compare timestamps. Naive values are read as UTC.
pub fn epoch_seconds(timestamp: &Timestamp) -> EpochSeconds {
    timestamp.and_utc().timestamp()
}
