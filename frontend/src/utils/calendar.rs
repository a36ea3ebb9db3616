//! Month-grid date bucketing for the calendar page.

use chrono::{Datelike, Duration, NaiveDate};
use shared::CalendarEvent;
use std::collections::HashMap;

/// Cells in the month grid: six weeks of seven days.
pub const GRID_CELLS: usize = 42;

/// The 42 dates shown for a month, starting on the Sunday on or before the
/// first of the month. Adjacent-month dates fill the leading and trailing
/// cells. Falls back to an empty grid for an invalid year/month pair.
pub fn month_grid(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let lead = first.weekday().num_days_from_sunday() as i64;
    let start = first - Duration::days(lead);
    (0..GRID_CELLS as i64)
        .map(|offset| start + Duration::days(offset))
        .collect()
}

/// Groups events by the calendar date of their display date.
pub fn bucket_by_day(events: &[CalendarEvent]) -> HashMap<NaiveDate, Vec<CalendarEvent>> {
    let mut buckets: HashMap<NaiveDate, Vec<CalendarEvent>> = HashMap::new();
    for event in events {
        buckets
            .entry(event.date.date_naive())
            .or_default()
            .push(event.clone());
    }
    for bucket in buckets.values_mut() {
        bucket.sort_by_key(|e| e.date);
    }
    buckets
}

pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc, Weekday};
    use shared::{EventPriority, EventStatus};

    #[test]
    fn test_month_grid_has_42_cells_starting_sunday() {
        // March 2024 starts on a Friday.
        let grid = month_grid(2024, 3);
        assert_eq!(grid.len(), GRID_CELLS);
        assert_eq!(grid[0], NaiveDate::from_ymd_opt(2024, 2, 25).unwrap());
        assert_eq!(grid[0].weekday(), Weekday::Sun);
        assert!(grid.contains(&NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert!(grid.contains(&NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
    }

    #[test]
    fn test_month_grid_when_first_is_sunday() {
        // September 2024 starts on a Sunday, so there are no leading cells.
        let grid = month_grid(2024, 9);
        assert_eq!(grid[0], NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
    }

    #[test]
    fn test_month_grid_invalid_month_is_empty() {
        assert!(month_grid(2024, 13).is_empty());
    }

    #[test]
    fn test_bucket_by_day_groups_and_orders() {
        let make = |id, day, hour| CalendarEvent {
            id,
            title: String::new(),
            description: String::new(),
            date: Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap(),
            has_deadline: true,
            priority: EventPriority::Medium,
            status: EventStatus::NotStarted,
            category: None,
            tags: Vec::new(),
            duration_minutes: None,
            location: None,
            completion_percentage: 0,
        };

        let buckets = bucket_by_day(&[make(1, 5, 17), make(2, 5, 9), make(3, 6, 8)]);
        let day5 = &buckets[&NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()];
        assert_eq!(day5.len(), 2);
        assert_eq!(day5[0].id, 2);
        assert_eq!(day5[1].id, 1);
        assert_eq!(
            buckets[&NaiveDate::from_ymd_opt(2024, 3, 6).unwrap()].len(),
            1
        );
    }

    #[test]
    fn test_month_arithmetic_wraps_at_year_boundary() {
        assert_eq!(prev_month(2024, 1), (2023, 12));
        assert_eq!(next_month(2024, 12), (2025, 1));
        assert_eq!(prev_month(2024, 6), (2024, 5));
        assert_eq!(next_month(2024, 6), (2024, 7));
    }
}
