//! Timestamps for stored records.
//!
//! All timestamps are UTC and always carry six fractional digits, so comparing
//! the strings gives the same order as comparing the instants.

use time::{OffsetDateTime, UtcOffset, macros::format_description};

use crate::Error;

/// The current time as a record timestamp.
///
/// # Errors
/// Returns [Error::TimestampFormat] if the clock reports a time that cannot be formatted.
pub fn now_timestamp() -> Result<String, Error> {
    format_timestamp(OffsetDateTime::now_utc())
}

/// Format `date_time` as a UTC record timestamp, e.g. `2025-10-05T09:30:00.000000Z`.
///
/// # Errors
/// Returns [Error::TimestampFormat] if the year does not fit in four digits.
pub fn format_timestamp(date_time: OffsetDateTime) -> Result<String, Error> {
    let format = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z"
    );

    date_time
        .to_offset(UtcOffset::UTC)
        .format(format)
        .map_err(|error| Error::TimestampFormat(error.to_string()))
}
