//! Date formatting and datetime-local input conversions.
//!
//! All backend timestamps are UTC; form inputs are treated as UTC too, so a
//! value round-trips through the edit dialog unchanged.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

/// Parse a `datetime-local` input value.
pub fn parse_datetime_local(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Render a timestamp back into a `datetime-local` input value.
pub fn to_datetime_local(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M").to_string()
}

pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%b %d, %Y %H:%M").to_string()
}

pub fn format_date(dt: DateTime<Utc>) -> String {
    dt.format("%b %d, %Y").to_string()
}

/// "Today", "Tomorrow", a weekday name inside the coming week, or a short
/// date for anything further out (or in the past).
pub fn format_relative_date(dt: DateTime<Utc>) -> String {
    relative_to(dt.date_naive(), Utc::now().date_naive())
}

fn relative_to(date: NaiveDate, today: NaiveDate) -> String {
    use chrono::Weekday;

    let days_until = (date - today).num_days();
    match days_until {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        2..=6 => match date.weekday() {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
        .to_string(),
        _ => date.format("%b %d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_datetime_local() {
        let parsed = parse_datetime_local("2024-03-15T08:30").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 15, 8, 30, 0).unwrap());
        assert!(parse_datetime_local("").is_none());
        assert!(parse_datetime_local("not a date").is_none());
    }

    #[test]
    fn test_datetime_local_round_trip() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 15, 8, 30, 0).unwrap();
        assert_eq!(parse_datetime_local(&to_datetime_local(dt)).unwrap(), dt);
    }

    #[test]
    fn test_format_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 0).unwrap();
        assert_eq!(format_datetime(dt), "Jan 15, 2024 12:30");
        assert_eq!(format_date(dt), "Jan 15, 2024");
    }

    #[test]
    fn test_relative_to_near_dates() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(); // a Monday
        assert_eq!(relative_to(today, today), "Today");
        assert_eq!(relative_to(today.succ_opt().unwrap(), today), "Tomorrow");
        assert_eq!(
            relative_to(NaiveDate::from_ymd_opt(2024, 3, 13).unwrap(), today),
            "Wednesday"
        );
    }

    #[test]
    fn test_relative_to_far_and_past_dates() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        assert_eq!(
            relative_to(NaiveDate::from_ymd_opt(2024, 3, 25).unwrap(), today),
            "Mar 25"
        );
        assert_eq!(
            relative_to(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), today),
            "Mar 01"
        );
    }
}
