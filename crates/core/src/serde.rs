//! Serde helpers for ISO-8601 timestamps.
//!
//! Timestamps are accepted as any RFC 3339 string and normalized to UTC with
//! millisecond precision. They are always emitted as `YYYY-MM-DDTHH:MM:SS.mmmZ`.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Normalize a timestamp to the precision it is stored and emitted with.
pub fn normalize_timestamp(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.trunc_subsecs(3)
}

/// Format a timestamp as an ISO-8601 string with millisecond precision.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 timestamp, converting it to UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| normalize_timestamp(dt.with_timezone(&Utc)))
}

/// `#[serde(with = "todos_core::serde::iso8601")]` for `DateTime<Utc>` fields.
pub mod iso8601 {
    use super::*;

    pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(timestamp))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_timestamp(&s).map_err(serde::de::Error::custom)
    }
}

/// `#[serde(with = "todos_core::serde::option_iso8601")]` for optional timestamps.
///
/// A missing field and an explicit `null` both deserialize to `None`.
pub mod option_iso8601 {
    use super::*;

    pub fn serialize<S>(timestamp: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match timestamp {
            Some(ts) => serializer.serialize_str(&format_timestamp(ts)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Option::deserialize(deserializer)?;
        s.map(|s| parse_timestamp(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestStruct {
        #[serde(with = "iso8601")]
        at: DateTime<Utc>,
        #[serde(default, with = "option_iso8601")]
        maybe: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_format_uses_millis_and_z_suffix() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(format_timestamp(&ts), "2025-03-09T14:05:07.000Z");
    }

    #[test]
    fn test_parse_converts_offset_to_utc() {
        let parsed = parse_timestamp("2025-03-09T16:05:07+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 9, 14, 5, 7).unwrap());
    }

    #[test]
    fn test_parse_truncates_to_millis() {
        let parsed = parse_timestamp("2025-03-09T14:05:07.123456789Z").unwrap();
        assert_eq!(format_timestamp(&parsed), "2025-03-09T14:05:07.123Z");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("next tuesday").is_err());
        assert!(parse_timestamp("2025-03-09").is_err());
    }

    #[test]
    fn test_deserialize_optional_missing_and_null() {
        let missing: TestStruct = serde_json::from_str(r#"{"at": "2025-01-01T00:00:00Z"}"#).unwrap();
        assert_eq!(missing.maybe, None);

        let null: TestStruct =
            serde_json::from_str(r#"{"at": "2025-01-01T00:00:00Z", "maybe": null}"#).unwrap();
        assert_eq!(null.maybe, None);
    }

    #[test]
    fn test_deserialize_invalid_timestamp_fails() {
        let result: Result<TestStruct, _> = serde_json::from_str(r#"{"at": "yesterday"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_round_trip_format() {
        let value = TestStruct {
            at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            maybe: None,
        };
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["at"], "2025-01-01T00:00:00.000Z");
        assert!(json["maybe"].is_null());
    }
}
