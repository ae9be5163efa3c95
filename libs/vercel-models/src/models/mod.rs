//! API models

pub mod deployment;
pub mod error;
pub mod files;
pub mod project;
pub mod team;

use chrono::{DateTime, TimeZone, Utc};

/// Convert a millisecond Unix timestamp, as returned by the API, to UTC
pub(crate) fn millis_to_utc(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}
