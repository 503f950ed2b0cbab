//! Timestamp normalization
//!
//! Every timestamp entering the service is turned into an absolute UTC
//! instant before it is compared or stored. Values carrying an offset are
//! converted; values without one are taken as UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

/// Convert any zoned timestamp to UTC. Idempotent for values already in UTC.
pub fn to_utc<Tz: TimeZone>(value: DateTime<Tz>) -> DateTime<Utc> {
    value.with_timezone(&Utc)
}

/// Interpret a wall-clock timestamp without offset as UTC.
pub fn assume_utc(value: NaiveDateTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(&value)
}

/// Parse a timestamp string into a UTC instant.
///
/// Accepted shapes:
/// - RFC 3339 with `Z` or a numeric offset
/// - `YYYY-MM-DDTHH:MM:SS[.fff]` or `YYYY-MM-DD HH:MM:SS[.fff]`, optionally with `+HH:MM`
/// - `YYYY-MM-DD` (midnight UTC)
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(to_utc(dt));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::<FixedOffset>::parse_from_str(raw, fmt) {
            return Ok(to_utc(dt));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(assume_utc(naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(assume_utc(midnight));
        }
    }

    Err(format!("invalid timestamp '{}'", raw))
}

/// `#[serde(deserialize_with = "flexible::deserialize")]` for required fields.
pub mod flexible {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

/// Optional timestamps; pair with `#[serde(default)]`.
pub mod flexible_option {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => parse_timestamp(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

/// Nullable timestamps in patch bodies: absent => `None`, `null` => `Some(None)`.
/// Pair with `#[serde(default)]`.
pub mod flexible_patch {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse_timestamp(&raw)
                .map(|dt| Some(Some(dt)))
                .map_err(serde::de::Error::custom),
            None => Ok(Some(None)),
        }
    }
}
