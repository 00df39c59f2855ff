//! Optional timestamp (de)serialization for API payloads.
//!
//! - Serialization: `Option<DateTime<Utc>>` -> RFC3339 string or `null`
//! - Deserialization: RFC3339 string, Unix timestamp or `null` -> `Option<DateTime<Utc>>`
//!
//! Job timestamps come back as RFC3339, older cPanel rows as epoch millis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Serializes `Option<DateTime<Utc>>` as RFC3339 or `null`.
pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

/// Deserializes `Option<DateTime<Utc>>` from RFC3339, Unix timestamp, or `null`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OptionalTimestamp {
        String(String),
        I64(i64),
        U64(u64),
    }

    match Option::<OptionalTimestamp>::deserialize(deserializer)? {
        Some(OptionalTimestamp::String(s)) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| Error::custom(format!("Invalid RFC3339 timestamp: {e}"))),
        Some(OptionalTimestamp::I64(ts)) => parse_unix_timestamp(ts)
            .map(Some)
            .ok_or_else(|| Error::custom("Invalid Unix timestamp")),
        Some(OptionalTimestamp::U64(ts)) => i64::try_from(ts)
            .ok()
            .and_then(parse_unix_timestamp)
            .map(Some)
            .ok_or_else(|| Error::custom("Invalid Unix timestamp")),
        None => Ok(None),
    }
}

/// Parses a Unix timestamp with second/millisecond auto-detection.
fn parse_unix_timestamp(ts: i64) -> Option<DateTime<Utc>> {
    // Values larger than 10^11 are interpreted as milliseconds.
    if ts > 100_000_000_000 {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    }
}
