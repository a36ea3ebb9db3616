use chrono::{Datelike, NaiveDate, Utc};
use leptos::*;
use shared::CalendarEvent;

use crate::utils::{bucket_by_day, month_grid};

const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Month grid. Clicking an empty area of a day cell starts a new task on
/// that date; clicking an event chip opens that event.
#[component]
pub fn CalendarGrid(
    year: i32,
    month: u32,
    events: Vec<CalendarEvent>,
    #[prop(into)] on_day_click: Callback<NaiveDate>,
    #[prop(into)] on_event_click: Callback<CalendarEvent>,
) -> impl IntoView {
    let today = Utc::now().date_naive();
    let buckets = bucket_by_day(&events);

    view! {
        <div class="calendar-grid">
            {WEEKDAY_HEADERS.iter().map(|day| view! {
                <div class="calendar-weekday">{*day}</div>
            }).collect_view()}

            {month_grid(year, month).into_iter().map(|date| {
                let in_month = date.month() == month;
                let is_today = date == today;
                let day_events = buckets.get(&date).cloned().unwrap_or_default();

                view! {
                    <div
                        class="calendar-cell"
                        class:other-month=!in_month
                        class:today=is_today
                        on:click=move |_| on_day_click.call(date)
                    >
                        <div class="calendar-day-number">{date.day()}</div>
                        {day_events.into_iter().map(|event| {
                            let chip_class = format!(
                                "calendar-event priority-{} status-{}",
                                event.priority.as_str(),
                                event.status.as_str()
                            );
                            let chip_event = event.clone();
                            view! {
                                <div
                                    class=chip_class
                                    title=event.title.clone()
                                    on:click=move |e| {
                                        e.stop_propagation();
                                        on_event_click.call(chip_event.clone());
                                    }
                                >
                                    {event.title.clone()}
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_headers_start_sunday() {
        assert_eq!(WEEKDAY_HEADERS[0], "Sun");
        assert_eq!(WEEKDAY_HEADERS.len(), 7);
    }
}
