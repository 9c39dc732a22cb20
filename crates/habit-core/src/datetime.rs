//! Date and time helpers shared by the wire model and the form schemas.
//!
//! The service stores timestamps as ISO strings, while form inputs arrive as
//! `YYYY-MM-DDTHH:MM` (datetime-local) or plain `HH:MM[:SS]` times. All
//! parsing funnels through here so both sides accept the same shapes.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];
const TIME_OF_DAY_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Parses an RFC 3339 timestamp, or a naive `YYYY-MM-DDTHH:MM[:SS]` value
/// taken as UTC.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Parses a time of day in `HH:MM:SS` or `HH:MM` form.
pub fn parse_time_of_day(input: &str) -> Option<NaiveTime> {
    let input = input.trim();
    TIME_OF_DAY_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(input, fmt).ok())
}

/// Midnight UTC of the given calendar date.
pub fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Serde adapter writing a `NaiveTime` as `HH:MM:SS` and reading either
/// `HH:MM:SS` or `HH:MM`.
pub mod hms {
    use super::parse_time_of_day;
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M:%S").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_time_of_day(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time of day: {}", raw)))
    }
}

/// Serde adapter for optional timestamps that tolerates `null`, empty
/// strings and naive datetime-local values.
pub mod lenient_timestamp {
    use super::parse_timestamp;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse_timestamp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_timestamp("2024-03-01T10:30:00.000Z").unwrap();
        assert_eq!(dt.hour(), 10);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_datetime_local() {
        let dt = parse_timestamp("2024-03-01T07:05").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-01T07:05:00+00:00");
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("tomorrow").is_none());
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(
            parse_time_of_day("08:15"),
            NaiveTime::from_hms_opt(8, 15, 0)
        );
        assert_eq!(
            parse_time_of_day("21:00:30"),
            NaiveTime::from_hms_opt(21, 0, 30)
        );
        assert!(parse_time_of_day("25:00").is_none());
    }

    #[test]
    fn test_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(midnight_utc(date).to_rfc3339(), "2024-01-31T00:00:00+00:00");
    }
}
