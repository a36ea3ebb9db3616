//! In-memory store of calendar events backed by the task endpoints.
//!
//! Holds the last fetched list and patches it from write responses. There
//! is no versioning and no coordination of in-flight calls: whichever
//! response lands last is what the view shows.

use leptos::*;
use shared::{
    ApiFailure, CalendarEvent, CreateTaskRequest, TaskStats, TaskStatus, UpdateTaskRequest,
};

use crate::api::ApiClient;

#[derive(Clone)]
pub struct EventStore {
    pub events: RwSignal<Vec<CalendarEvent>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: create_rw_signal(Vec::new()),
            loading: create_rw_signal(false),
            error: create_rw_signal(None),
        }
    }

    /// Fetch tasks (optionally filtered by backend status) and replace the
    /// in-memory list with their display projections. A failed read
    /// degrades to an empty list plus a banner message.
    pub async fn refresh(&self, status: Option<TaskStatus>) {
        self.loading.set(true);
        self.error.set(None);

        match ApiClient::list_tasks(status, None).await {
            Ok(tasks) => {
                self.events
                    .set(tasks.iter().map(CalendarEvent::from_task).collect());
            }
            Err(failure) => {
                self.events.set(Vec::new());
                self.error.set(Some(failure.to_string()));
            }
        }
        self.loading.set(false);
    }

    /// Full-text search; same degrade-to-empty policy as [`refresh`].
    ///
    /// [`refresh`]: EventStore::refresh
    pub async fn search(&self, query: &str) {
        self.loading.set(true);
        self.error.set(None);

        match ApiClient::search_tasks(query).await {
            Ok(tasks) => {
                self.events
                    .set(tasks.iter().map(CalendarEvent::from_task).collect());
            }
            Err(failure) => {
                self.events.set(Vec::new());
                self.error.set(Some(failure.to_string()));
            }
        }
        self.loading.set(false);
    }

    /// Create on the backend, then append the response's projection.
    /// Write failures are returned to the caller so the form stays open.
    pub async fn create(&self, request: CreateTaskRequest) -> Result<CalendarEvent, ApiFailure> {
        let task = ApiClient::create_task(request).await?;
        let event = CalendarEvent::from_task(&task);
        self.events.update(|list| list.push(event.clone()));
        Ok(event)
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateTaskRequest,
    ) -> Result<CalendarEvent, ApiFailure> {
        let task = ApiClient::update_task(id, request).await?;
        let event = CalendarEvent::from_task(&task);
        self.apply(event.clone());
        Ok(event)
    }

    pub async fn toggle_status(&self, id: i64) -> Result<CalendarEvent, ApiFailure> {
        let task = ApiClient::toggle_task_status(id).await?;
        let event = CalendarEvent::from_task(&task);
        self.apply(event.clone());
        Ok(event)
    }

    pub async fn remove(&self, id: i64) -> Result<(), ApiFailure> {
        ApiClient::delete_task(id).await?;
        self.events.update(|list| list.retain(|e| e.id != id));
        Ok(())
    }

    pub async fn stats(&self) -> Result<TaskStats, ApiFailure> {
        ApiClient::task_stats().await
    }

    /// Soonest open events, for the dashboard.
    pub fn upcoming(&self, limit: usize) -> Vec<CalendarEvent> {
        upcoming_of(&self.events.get(), limit)
    }

    fn apply(&self, event: CalendarEvent) {
        self.events.update(|list| {
            match list.iter_mut().find(|e| e.id == event.id) {
                Some(existing) => *existing = event,
                None => list.push(event),
            }
        });
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

fn upcoming_of(events: &[CalendarEvent], limit: usize) -> Vec<CalendarEvent> {
    use shared::EventStatus;

    let mut open: Vec<CalendarEvent> = events
        .iter()
        .filter(|e| !matches!(e.status, EventStatus::Completed | EventStatus::Cancelled))
        .cloned()
        .collect();
    open.sort_by_key(|e| e.date);
    open.truncate(limit);
    open
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::{EventPriority, EventStatus};

    fn event(id: i64, day: u32, status: EventStatus) -> CalendarEvent {
        CalendarEvent {
            id,
            title: format!("task {}", id),
            description: String::new(),
            date: Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
            has_deadline: true,
            priority: EventPriority::Medium,
            status,
            category: None,
            tags: Vec::new(),
            duration_minutes: None,
            location: None,
            completion_percentage: 0,
        }
    }

    #[test]
    fn test_upcoming_sorted_soonest_first() {
        let events = vec![
            event(1, 20, EventStatus::NotStarted),
            event(2, 5, EventStatus::InProgress),
            event(3, 12, EventStatus::NotStarted),
        ];
        let upcoming = upcoming_of(&events, 10);
        let ids: Vec<i64> = upcoming.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_upcoming_skips_closed_events() {
        let events = vec![
            event(1, 2, EventStatus::Completed),
            event(2, 3, EventStatus::Cancelled),
            event(3, 9, EventStatus::OnHold),
        ];
        let upcoming = upcoming_of(&events, 10);
        let ids: Vec<i64> = upcoming.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_upcoming_respects_limit() {
        let events = vec![
            event(1, 1, EventStatus::NotStarted),
            event(2, 2, EventStatus::NotStarted),
            event(3, 3, EventStatus::NotStarted),
        ];
        assert_eq!(upcoming_of(&events, 2).len(), 2);
    }
}
