use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a float that may use comma as decimal separator
pub fn parse_locale_float(s: &str) -> Result<f64, std::num::ParseFloatError> {
    s.trim().replace(',', ".").parse::<f64>()
}

/// Parse a timestamp string, trying RFC 3339 first and then each format in order.
///
/// Date-only formats resolve to midnight. Returns `None` when nothing matches; callers
/// keep the row and leave the timestamp missing.
pub fn parse_timestamp<S: AsRef<str>>(value: &str, formats: &[S]) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    for format in formats {
        let format = format.as_ref();
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive);
        }
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Some(naive);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_locale_float() {
        assert_eq!(parse_locale_float("1,5").unwrap(), 1.5);
        assert_eq!(parse_locale_float(" 23.25 ").unwrap(), 23.25);
        assert!(parse_locale_float("n/a").is_err());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let formats = PipelineConfig::default().timestamp_formats;

        let dt = parse_timestamp("2025-05-26 13:45:10", &formats).unwrap();
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (13, 45, 10));

        let dt = parse_timestamp("2025/05/26 08:30", &formats).unwrap();
        assert_eq!((dt.day(), dt.hour(), dt.minute()), (26, 8, 30));

        let dt = parse_timestamp("2025-05-26", &formats).unwrap();
        assert_eq!((dt.month(), dt.hour()), (5, 0));

        let dt = parse_timestamp("2025-05-26T10:00:00+09:00", &formats).unwrap();
        assert_eq!(dt.hour(), 1);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        let formats = PipelineConfig::default().timestamp_formats;
        assert!(parse_timestamp("not a time", &formats).is_none());
        assert!(parse_timestamp("", &formats).is_none());
        assert!(parse_timestamp("2025-13-45 99:99", &formats).is_none());
    }
}
