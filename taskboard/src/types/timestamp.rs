//! Timestamp encoding for persisted dates.
//!
//! Dates are written as RFC 3339 strings with full sub-second precision so a
//! save/load cycle reproduces the exact value. Reading is lenient: besides
//! RFC 3339 it accepts a bare `YYYY-MM-DD` date (midnight UTC), a local
//! date-time without offset (treated as UTC) and epoch milliseconds. A
//! `null`, which is what a browser writes for an invalid date, revives as the
//! Unix epoch.
//!
//! Use with `#[serde(with = "timestamp")]` on `DateTime<Utc>` fields.

use crate::error::{BoardError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;

/// Format a timestamp the way it is persisted
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Revive a persisted timestamp string
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(BoardError::invalid_value(
        "timestamp",
        format!("'{}' is not an ISO-8601 date", raw),
    ))
}

/// Revive epoch milliseconds
pub fn from_millis(millis: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single().ok_or_else(|| {
        BoardError::invalid_value("timestamp", format!("{} ms is out of range", millis))
    })
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(TimestampVisitor)
}

struct TimestampVisitor;

impl Visitor<'_> for TimestampVisitor {
    type Value = DateTime<Utc>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an ISO-8601 date string, epoch milliseconds or null")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        from_millis(0).map_err(E::custom)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        self.visit_unit()
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        parse_timestamp(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
        from_millis(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
        let millis = i64::try_from(v).map_err(E::custom)?;
        from_millis(millis).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
        from_millis(v as i64).map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "super")]
        at: DateTime<Utc>,
    }

    #[test]
    fn test_round_trip_keeps_nanoseconds() {
        let at = Utc::now();
        let json = serde_json::to_string(&Stamped { at }).unwrap();
        let parsed: Stamped = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.at, at);
    }

    #[test]
    fn test_parse_javascript_iso_string() {
        let at = parse_timestamp("2024-03-05T14:30:00.123Z").unwrap();
        assert_eq!(at.year(), 2024);
        assert_eq!(at.hour(), 14);
        assert_eq!(at.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn test_parse_offset_normalised_to_utc() {
        let at = parse_timestamp("2024-03-05T10:00:00+02:00").unwrap();
        assert_eq!(at.hour(), 8);
    }

    #[test]
    fn test_parse_date_only() {
        let at = parse_timestamp("2024-12-31").unwrap();
        assert_eq!((at.year(), at.month(), at.day()), (2024, 12, 31));
        assert_eq!(at.hour(), 0);
    }

    #[test]
    fn test_parse_without_offset() {
        let at = parse_timestamp("2024-01-02T03:04:05").unwrap();
        assert_eq!(at.minute(), 4);
    }

    #[test]
    fn test_epoch_millis() {
        let parsed: Stamped = serde_json::from_str(r#"{"at": 1700000000000}"#).unwrap();
        assert_eq!(parsed.at.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_null_is_epoch() {
        let parsed: Stamped = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert_eq!(parsed.at.timestamp_millis(), 0);
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(parse_timestamp("next tuesday").is_err());
        let result: std::result::Result<Stamped, _> = serde_json::from_str(r#"{"at": "soon"}"#);
        assert!(result.is_err());
    }
}
