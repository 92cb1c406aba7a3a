//! # Time Utilities
//!
//! Clock access and Unix timestamp conversions using chrono.

use chrono::{DateTime, Utc};

/// Current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Drop the sub-second part of a timestamp.
pub fn truncate_to_secs(time: DateTime<Utc>) -> DateTime<Utc> {
    from_unix_secs(time.timestamp()).unwrap_or(time)
}

/// Build a UTC timestamp from whole Unix seconds.
pub fn from_unix_secs(secs: i64) -> Result<DateTime<Utc>, Error> {
    DateTime::from_timestamp(secs, 0).ok_or(Error::OutOfRange(secs))
}

// region:    --- Error
#[derive(Debug)]
pub enum Error {
    OutOfRange(i64),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error
