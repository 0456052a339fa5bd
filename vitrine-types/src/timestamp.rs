//! Serde adapter for record timestamps.
//!
//! Accepts RFC 3339 strings and bare `YYYY-MM-DD` dates (midnight UTC).
//! Always serializes as RFC 3339.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Parses a timestamp in either accepted format.
pub(crate) fn parse(raw: &str) -> crate::Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| crate::Error::InvalidTimestamp(raw.to_string()))
}

pub(crate) fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339())
}

pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_rfc3339_with_offset() {
        let ts = parse("2024-02-01T10:30:00+02:00").unwrap();
        assert_eq!(ts.hour(), 8);
        assert_eq!(ts.day(), 1);
    }

    #[test]
    fn parses_bare_date_as_midnight_utc() {
        let ts = parse("2024-01-01").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day(), ts.hour()), (2024, 1, 1, 0));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse("yesterday"),
            Err(crate::Error::InvalidTimestamp(raw)) if raw == "yesterday"
        ));
    }
}
