//! Datetime serialization/deserialization helpers.
//!
//! Custom serde support for the timestamp formats the providers emit:
//! - Serialization: `DateTime<Utc>` -> RFC 3339 string
//! - Deserialization: RFC 3339 string, or the naive
//!   `YYYY-MM-DD HH:MM:SS` form some GleSys responses use
//!   (interpreted as UTC)

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Serialize `Option<DateTime<Utc>>` as an optional RFC 3339 string.
pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

/// Deserialize an optional timestamp from either RFC 3339 or the naive
/// `YYYY-MM-DD HH:MM:SS` form.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<String>::deserialize(deserializer)? {
        Some(s) => parse_timestamp(&s)
            .map(Some)
            .ok_or_else(|| Error::custom(format!("Invalid timestamp: {s}"))),
        None => Ok(None),
    }
}

/// Parse a provider timestamp string.
///
/// Accepts RFC 3339 (vCloud, current GleSys) and the naive
/// `YYYY-MM-DD HH:MM:SS` form (older GleSys responses), the latter
/// interpreted as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
