// src/models/dates.rs
// DOCUMENTATION: Lenient date parsing for request bodies
// PURPOSE: Accept RFC 3339 timestamps as well as bare `YYYY-MM-DD` dates

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer};

/// Parse an RFC 3339 timestamp or a calendar date (taken as midnight UTC)
pub fn parse_date(value: &str) -> Result<DateTime<Utc>, String> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|d| Utc.from_utc_datetime(&d.and_time(NaiveTime::default())))
        .map_err(|_| format!("invalid date `{}`, expected YYYY-MM-DD or RFC 3339", value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(de::Error::custom)
}

/// Optional variant; null and empty strings become `None`.
/// Pair with `#[serde(default)]` so a missing field is also `None`.
pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_date(&raw))
        .transpose()
        .map_err(de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_date_is_midnight_utc() {
        let parsed = parse_date("2024-05-01").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_rfc3339_keeps_offset() {
        let parsed = parse_date("2024-05-01T10:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap());

        let millis = parse_date("2024-05-01T10:00:00.000Z").unwrap();
        assert_eq!(millis, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_date("next tuesday").is_err());
        assert!(parse_date("2024-13-01").is_err());
    }
}
