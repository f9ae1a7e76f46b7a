use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const NAIVE_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

#[must_use]
pub fn unix_millis_to_datetime(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis.round() as i64)
}

/// Parses a calendar label into a UTC timestamp.
///
/// Accepts RFC 3339, ISO-like date-times without offset, plain dates,
/// `YYYY-MM` and bare four-digit years. Offset-less inputs are read as UTC.
#[must_use]
pub fn parse_time_label(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    for format in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    // `YYYY-MM` and `YYYY` have no day component, so chrono cannot parse them directly.
    let mut parts = text.splitn(2, '-');
    let year = parts.next()?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month: u32 = match parts.next() {
        Some(month) if month.len() == 2 => month.parse().ok()?,
        Some(_) => return None,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year, month, 1)?
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::parse_time_label;

    #[test]
    fn parses_plain_dates_as_utc_midnight() {
        let parsed = parse_time_label("2020-01-03").expect("date");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2020, 1, 3, 0, 0, 0).unwrap());
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_time_label("2020-01-03T12:00:00+02:00").expect("rfc3339");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2020, 1, 3, 10, 0, 0).unwrap());
    }

    #[test]
    fn parses_year_and_month_tokens() {
        assert_eq!(
            parse_time_label("2021-07"),
            Some(Utc.with_ymd_and_hms(2021, 7, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_time_label("1999"),
            Some(Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn rejects_non_calendar_text() {
        assert_eq!(parse_time_label("banana"), None);
        assert_eq!(parse_time_label(""), None);
        assert_eq!(parse_time_label("2020-13"), None);
        assert_eq!(parse_time_label("12345"), None);
    }
}
