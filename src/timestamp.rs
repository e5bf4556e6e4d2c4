//! Serialization helpers for ticket timestamps.
//!
//! Timestamps go over the wire as RFC 3339 with microsecond precision and an
//! explicit `+00:00` offset, e.g. `2026-10-17T09:30:00.123456+00:00`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{de::Error as DeError, Deserialize, Deserializer, Serializer};

pub fn format(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, false)
}

pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(ts))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(DeError::custom)
}
