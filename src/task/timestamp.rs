//! Lenient timestamp parsing for the JSON files.
//!
//! Files are written as RFC 3339, but older stores hold naive ISO 8601
//! timestamps (`2025-01-15T10:30:00.123456`) in local time.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

/// Parses RFC 3339, falling back to a naive timestamp read as local time.
///
/// # Errors
///
/// Returns an error message if `raw` is neither form.
pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = raw
        .parse::<NaiveDateTime>()
        .map_err(|e| format!("invalid timestamp {raw:?}: {e}"))?;
    // DST gaps have no local reading; treat those as UTC.
    Ok(Local
        .from_local_datetime(&naive)
        .earliest()
        .map_or_else(|| naive.and_utc(), |dt| dt.with_timezone(&Utc)))
}

/// `deserialize_with` adapter for [`parse`].
pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc3339_keeps_its_offset() {
        let dt = parse("2025-01-15T10:30:00+02:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-01-15T08:30:00+00:00");
    }

    #[test]
    fn naive_timestamp_is_local_time() {
        let dt = parse("2025-01-15T10:30:00.123456").unwrap();
        let expected: NaiveDateTime = "2025-01-15T10:30:00.123456".parse().unwrap();
        assert_eq!(dt.with_timezone(&Local).naive_local(), expected);
    }

    #[test]
    fn naive_without_fraction() {
        assert!(parse("2025-01-15T10:30:00").is_ok());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse("yesterday").unwrap_err().contains("invalid timestamp"));
    }
}
