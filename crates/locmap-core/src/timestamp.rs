//! Lenient timestamp parsing for record fields.
//!
//! Record stores are not consistent about how they write "no date": some emit
//! `null`, some `false`, some an empty string. Every value that is not a
//! recognizable date becomes `None`, so consumers only ever see valid
//! timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserializer;
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use std::fmt;

/// Key under which `toml` hands a native datetime to `deserialize_any`.
const TOML_DATETIME_KEY: &str = "$__toml_private_datetime";

/// Formats without an offset, all read as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a timestamp string into a `DateTime<Utc>`.
///
/// Supports:
/// - `2024-01-15T10:30:00Z` / `2024-01-15T10:30:00+02:00` (RFC 3339)
/// - `2024-01-15 10:30:00` (database style, assumed UTC)
/// - `2024-01-15T10:30:00` and `2024-01-15T10:30:00.123` (assumed UTC)
/// - `2024-01-15` (midnight UTC)
///
/// Returns `None` for anything else.
///
/// ```rust
/// use locmap_core::timestamp::parse_timestamp;
///
/// assert!(parse_timestamp("2024-01-15").is_some());
/// assert!(parse_timestamp("2024-01-15 08:00:00").is_some());
/// assert!(parse_timestamp("false").is_none());
/// ```
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    tracing::debug!(value = %s, "Ignoring value that is not a timestamp");
    None
}

/// Serde adapter for optional timestamp fields.
///
/// Use with `#[serde(default, deserialize_with = "crate::timestamp::lenient")]`.
pub(crate) fn lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientVisitor)
}

struct LenientVisitor;

impl<'de> Visitor<'de> for LenientVisitor {
    type Value = Option<DateTime<Utc>>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a timestamp string or an empty value")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(parse_timestamp(v))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_i64<E: de::Error>(self, _v: i64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_u64<E: de::Error>(self, _v: u64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(Self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    // TOML datetimes arrive as a single-entry map wrapping the string form;
    // any other map is not a date.
    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut parsed = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == TOML_DATETIME_KEY {
                let value: String = map.next_value()?;
                parsed = parse_timestamp(&value);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(parsed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "lenient")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_parses_rfc3339_with_offset() {
        let dt = parse_timestamp("2024-01-15T10:30:00+02:00").unwrap();
        assert_eq!(dt.hour(), 8);
    }

    #[test]
    fn test_parses_database_format() {
        let dt = parse_timestamp("2023-11-02 17:45:10").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2023, 11, 2));
        assert_eq!(dt.minute(), 45);
    }

    #[test]
    fn test_parses_date_only_as_midnight() {
        let dt = parse_timestamp("2024-02-29").unwrap();
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.day(), 29);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("False").is_none());
        assert!(parse_timestamp("2024-13-40").is_none());
    }

    #[test]
    fn test_json_false_and_null_become_none() {
        let h: Holder = serde_json::from_str(r#"{"at": false}"#).unwrap();
        assert!(h.at.is_none());
        let h: Holder = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert!(h.at.is_none());
        let h: Holder = serde_json::from_str("{}").unwrap();
        assert!(h.at.is_none());
        let h: Holder = serde_json::from_str(r#"{"at": 12}"#).unwrap();
        assert!(h.at.is_none());
    }

    #[test]
    fn test_json_arrays_and_objects_become_none() {
        for json in [
            r#"{"at": []}"#,
            r#"{"at": ["2024-05-01"]}"#,
            r#"{"at": {"$date": 1700000000}}"#,
            r#"{"at": {"date": "2024-05-01", "nested": {"x": [1]}}}"#,
        ] {
            let h: Holder = serde_json::from_str(json).unwrap();
            assert!(h.at.is_none(), "{json}");
        }
    }

    #[test]
    fn test_json_string_is_parsed() {
        let h: Holder = serde_json::from_str(r#"{"at": "2024-05-01 12:00:00"}"#).unwrap();
        assert_eq!(h.at.unwrap().month(), 5);
    }

    #[test]
    fn test_toml_native_datetime_is_parsed() {
        let h: Holder = toml::from_str("at = 2024-05-01T12:00:00Z").unwrap();
        assert_eq!(h.at.unwrap().day(), 1);
    }

    #[test]
    fn test_toml_string_is_parsed() {
        let h: Holder = toml::from_str("at = \"2024-05-01\"").unwrap();
        assert!(h.at.is_some());
    }
}
