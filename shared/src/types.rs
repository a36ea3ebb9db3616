use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// User Types
// ============================================================================

/// How the current session was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    Token,
    Session,
}

impl AuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::Token => "token",
            AuthMethod::Session => "session",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
    pub avatar_url: String,
    pub method: AuthMethod,
}

impl User {
    /// Build a user record from a verified backend identity.
    ///
    /// The display name falls back to the email local part when the backend
    /// does not supply one, and the avatar is always derived from the email
    /// so the same account gets the same picture on every device.
    pub fn from_verified(email: String, name: Option<String>, method: AuthMethod) -> Self {
        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| email.split('@').next().unwrap_or(&email).to_string());
        let avatar_url = derive_avatar_url(&email);
        Self {
            email,
            name,
            avatar_url,
            method,
        }
    }
}

/// Deterministic avatar URL for an email address.
///
/// Uses an initials avatar keyed by the email local part: "jane.doe@x.com"
/// becomes "JD". Initials are restricted to ASCII alphanumerics so the URL
/// never needs percent-encoding.
pub fn derive_avatar_url(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    let initials: String = local
        .split(['.', '_', '-', '+'])
        .filter_map(|part| part.chars().find(|c| c.is_ascii_alphanumeric()))
        .map(|c| c.to_ascii_uppercase())
        .take(2)
        .collect();
    let initials = if initials.is_empty() {
        "U".to_string()
    } else {
        initials
    };
    format!("https://ui-avatars.com/api/?name={}&background=4f46e5&color=fff", initials)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyTokenRequest {
    pub token: String,
}

/// Identity returned by the verify endpoints.
///
/// The backend is loose about this shape, so only the email is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUrlResponse {
    pub auth_url: String,
}

// ============================================================================
// Task Types (backend wire shapes)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
    OnHold,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
            TaskStatus::OnHold => "on_hold",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "cancelled" => Ok(TaskStatus::Cancelled),
            "on_hold" => Ok(TaskStatus::OnHold),
            _ => Err(()),
        }
    }
}

/// A task as the backend stores it. Priority and urgency are 1-5 integers
/// where 1 is the most urgent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scheduled_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub estimated_duration: Option<i64>,
    pub priority: u8,
    #[serde(default)]
    pub urgency: Option<u8>,
    pub status: TaskStatus,
    #[serde(default)]
    pub completion_percentage: u8,
    #[serde(default)]
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<i64>,
    pub tags: Vec<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub estimated_duration: Option<i64>,
    pub priority: u8,
    pub urgency: u8,
    pub status: TaskStatus,
    pub completion_percentage: u8,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<i64>,
    pub tags: Option<Vec<String>>,
    pub deadline: Option<DateTime<Utc>>,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub estimated_duration: Option<i64>,
    pub priority: Option<u8>,
    pub urgency: Option<u8>,
    pub status: Option<TaskStatus>,
    pub completion_percentage: Option<u8>,
    pub location: Option<String>,
}

/// Aggregate counts from `/api/task-stats/`.
///
/// Every field defaults so a malformed body degrades to zeroed statistics
/// instead of a failed page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStats {
    #[serde(default)]
    pub total_tasks: i64,
    #[serde(default)]
    pub pending_tasks: i64,
    #[serde(default)]
    pub in_progress_tasks: i64,
    #[serde(default)]
    pub completed_tasks: i64,
    #[serde(default)]
    pub cancelled_tasks: i64,
    #[serde(default)]
    pub on_hold_tasks: i64,
    #[serde(default)]
    pub completion_rate: f64,
}

// ============================================================================
// Category Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub color: Option<String>,
}

// ============================================================================
// Display Types (calendar view model)
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventPriority {
    Urgent,
    High,
    #[default]
    Medium,
    Low,
}

impl EventPriority {
    /// Display mapping for backend priorities. Total over 1-5; 3 and 4 both
    /// collapse to Medium. Out-of-range values are clamped first.
    pub fn from_backend(value: u8) -> Self {
        match value.clamp(1, 5) {
            1 => EventPriority::Urgent,
            2 => EventPriority::High,
            3 | 4 => EventPriority::Medium,
            _ => EventPriority::Low,
        }
    }

    /// Write-back mapping. Medium always writes 3, so a backend 4 comes back
    /// as 3 after a round trip. That collapse is intentional.
    pub fn to_backend(&self) -> u8 {
        match self {
            EventPriority::Urgent => 1,
            EventPriority::High => 2,
            EventPriority::Medium => 3,
            EventPriority::Low => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventPriority::Urgent => "urgent",
            EventPriority::High => "high",
            EventPriority::Medium => "medium",
            EventPriority::Low => "low",
        }
    }
}

impl FromStr for EventPriority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "urgent" => Ok(EventPriority::Urgent),
            "high" => Ok(EventPriority::High),
            "medium" => Ok(EventPriority::Medium),
            "low" => Ok(EventPriority::Low),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Cancelled,
    OnHold,
}

impl EventStatus {
    /// Identity mapping except `pending`, which displays as `not_started`.
    pub fn from_backend(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Pending => EventStatus::NotStarted,
            TaskStatus::InProgress => EventStatus::InProgress,
            TaskStatus::Completed => EventStatus::Completed,
            TaskStatus::Cancelled => EventStatus::Cancelled,
            TaskStatus::OnHold => EventStatus::OnHold,
        }
    }

    pub fn to_backend(&self) -> TaskStatus {
        match self {
            EventStatus::NotStarted => TaskStatus::Pending,
            EventStatus::InProgress => TaskStatus::InProgress,
            EventStatus::Completed => TaskStatus::Completed,
            EventStatus::Cancelled => TaskStatus::Cancelled,
            EventStatus::OnHold => TaskStatus::OnHold,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::NotStarted => "not_started",
            EventStatus::InProgress => "in_progress",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
            EventStatus::OnHold => "on_hold",
        }
    }
}

impl FromStr for EventStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not_started" => Ok(EventStatus::NotStarted),
            "in_progress" => Ok(EventStatus::InProgress),
            "completed" => Ok(EventStatus::Completed),
            "cancelled" => Ok(EventStatus::Cancelled),
            "on_hold" => Ok(EventStatus::OnHold),
            _ => Err(()),
        }
    }
}

/// Display projection of a [`Task`]. Recomputed on every fetch and never
/// persisted; it must always carry enough to rebuild a valid write payload
/// (title, date, priority, and status are never absent).
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub has_deadline: bool,
    pub priority: EventPriority,
    pub status: EventStatus,
    pub category: Option<i64>,
    pub tags: Vec<String>,
    pub duration_minutes: Option<i64>,
    pub location: Option<String>,
    pub completion_percentage: u8,
}

impl CalendarEvent {
    /// Project a backend task into its display form.
    ///
    /// Display date rule: scheduled time wins, then the deadline, then the
    /// creation time.
    pub fn from_task(task: &Task) -> Self {
        let date = task
            .scheduled_time
            .or(task.deadline)
            .unwrap_or(task.created_at);

        Self {
            id: task.id,
            title: task.name.clone(),
            description: task.description.clone(),
            date,
            has_deadline: task.deadline.is_some(),
            priority: EventPriority::from_backend(task.priority),
            status: EventStatus::from_backend(task.status),
            category: task.category,
            tags: task.tags.clone(),
            duration_minutes: task.estimated_duration,
            location: task.location.clone(),
            completion_percentage: task.completion_percentage,
        }
    }

    /// Inverse projection for creating a task. Urgency mirrors priority on
    /// the way back since the display form has a single priority axis.
    pub fn to_create_request(&self) -> CreateTaskRequest {
        let priority = self.priority.to_backend();
        CreateTaskRequest {
            name: self.title.clone(),
            description: Some(self.description.clone()),
            category: self.category,
            tags: self.tags.clone(),
            deadline: Some(self.date),
            scheduled_time: None,
            estimated_duration: self.duration_minutes,
            priority,
            urgency: priority,
            status: self.status.to_backend(),
            completion_percentage: self.completion_percentage,
            location: self.location.clone(),
        }
    }

    /// Inverse projection for a full update of an existing task.
    pub fn to_update_request(&self) -> UpdateTaskRequest {
        let priority = self.priority.to_backend();
        UpdateTaskRequest {
            name: Some(self.title.clone()),
            description: Some(self.description.clone()),
            category: self.category,
            tags: Some(self.tags.clone()),
            deadline: Some(self.date),
            scheduled_time: None,
            estimated_duration: self.duration_minutes,
            priority: Some(priority),
            urgency: Some(priority),
            status: Some(self.status.to_backend()),
            completion_percentage: Some(self.completion_percentage),
            location: self.location.clone(),
        }
    }
}

// ============================================================================
// API Failure Taxonomy
// ============================================================================

/// Body shape the backend uses for error responses. Both fields are
/// optional in practice, so parsing never fails outright.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Best human-readable message in the body, if any.
    pub fn display_message(&self) -> Option<String> {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .filter(|m| !m.trim().is_empty())
    }
}

/// Everything that can go wrong talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiFailure {
    /// The request never completed (DNS, refused connection, offline).
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Http { status: u16, message: String },
    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiFailure {
    pub fn from_error_body(status: u16, body: ApiErrorBody) -> Self {
        let message = body
            .display_message()
            .unwrap_or_else(|| format!("request failed with status {}", status));
        ApiFailure::Http { status, message }
    }

    /// Authentication problems clear cached credentials; everything else
    /// only surfaces a message.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiFailure::Http { status: 401 | 403, .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_task() -> Task {
        Task {
            id: 7,
            name: "Write report".to_string(),
            description: "Quarterly summary".to_string(),
            category: Some(2),
            tags: vec!["work".to_string()],
            deadline: None,
            scheduled_time: None,
            estimated_duration: Some(90),
            priority: 4,
            urgency: Some(4),
            status: TaskStatus::Pending,
            completion_percentage: 0,
            location: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_priority_display_mapping_total() {
        assert_eq!(EventPriority::from_backend(1), EventPriority::Urgent);
        assert_eq!(EventPriority::from_backend(2), EventPriority::High);
        assert_eq!(EventPriority::from_backend(3), EventPriority::Medium);
        assert_eq!(EventPriority::from_backend(4), EventPriority::Medium);
        assert_eq!(EventPriority::from_backend(5), EventPriority::Low);
    }

    #[test]
    fn test_priority_out_of_range_clamps() {
        assert_eq!(EventPriority::from_backend(0), EventPriority::Urgent);
        assert_eq!(EventPriority::from_backend(9), EventPriority::Low);
    }

    #[test]
    fn test_priority_write_back_mapping() {
        assert_eq!(EventPriority::Urgent.to_backend(), 1);
        assert_eq!(EventPriority::High.to_backend(), 2);
        assert_eq!(EventPriority::Medium.to_backend(), 3);
        assert_eq!(EventPriority::Low.to_backend(), 5);
    }

    #[test]
    fn test_priority_four_round_trips_to_three() {
        let display = EventPriority::from_backend(4);
        assert_eq!(display, EventPriority::Medium);
        assert_eq!(display.to_backend(), 3);
    }

    #[test]
    fn test_status_mapping_identity_except_pending() {
        assert_eq!(
            EventStatus::from_backend(TaskStatus::Pending),
            EventStatus::NotStarted
        );
        assert_eq!(
            EventStatus::from_backend(TaskStatus::InProgress),
            EventStatus::InProgress
        );
        assert_eq!(
            EventStatus::from_backend(TaskStatus::Completed),
            EventStatus::Completed
        );
        assert_eq!(
            EventStatus::from_backend(TaskStatus::Cancelled),
            EventStatus::Cancelled
        );
        assert_eq!(
            EventStatus::from_backend(TaskStatus::OnHold),
            EventStatus::OnHold
        );
    }

    #[test]
    fn test_status_inverse_restores_pending() {
        assert_eq!(EventStatus::NotStarted.to_backend(), TaskStatus::Pending);
        for status in [
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed,
            TaskStatus::Cancelled,
            TaskStatus::OnHold,
        ] {
            assert_eq!(EventStatus::from_backend(status).to_backend(), status);
        }
    }

    #[test]
    fn test_display_date_falls_back_to_creation_time() {
        let task = sample_task();
        let event = CalendarEvent::from_task(&task);
        assert_eq!(event.date, task.created_at);
        assert!(!event.has_deadline);
    }

    #[test]
    fn test_display_date_prefers_scheduled_time() {
        let mut task = sample_task();
        task.deadline = Some(Utc.with_ymd_and_hms(2024, 3, 20, 17, 0, 0).unwrap());
        task.scheduled_time = Some(Utc.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap());
        let event = CalendarEvent::from_task(&task);
        assert_eq!(event.date, task.scheduled_time.unwrap());
    }

    #[test]
    fn test_display_date_uses_deadline_when_unscheduled() {
        let mut task = sample_task();
        task.deadline = Some(Utc.with_ymd_and_hms(2024, 3, 20, 17, 0, 0).unwrap());
        let event = CalendarEvent::from_task(&task);
        assert_eq!(event.date, task.deadline.unwrap());
        assert!(event.has_deadline);
    }

    #[test]
    fn test_pending_priority_four_projection() {
        let task = sample_task();
        let event = CalendarEvent::from_task(&task);
        assert_eq!(event.priority, EventPriority::Medium);
        assert_eq!(event.status, EventStatus::NotStarted);
    }

    #[test]
    fn test_write_payload_always_complete() {
        let event = CalendarEvent::from_task(&sample_task());
        let create = event.to_create_request();
        assert_eq!(create.name, "Write report");
        assert!(create.deadline.is_some());
        assert_eq!(create.priority, 3);
        assert_eq!(create.urgency, create.priority);
        assert_eq!(create.status, TaskStatus::Pending);

        let update = event.to_update_request();
        assert!(update.name.is_some());
        assert!(update.deadline.is_some());
        assert_eq!(update.priority, Some(3));
        assert_eq!(update.status, Some(TaskStatus::Pending));
    }

    #[test]
    fn test_task_status_from_str() {
        assert_eq!("pending".parse(), Ok(TaskStatus::Pending));
        assert_eq!("IN_PROGRESS".parse(), Ok(TaskStatus::InProgress));
        assert_eq!("on_hold".parse(), Ok(TaskStatus::OnHold));
        assert!("invalid".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_event_priority_from_str() {
        assert_eq!("urgent".parse(), Ok(EventPriority::Urgent));
        assert_eq!("HIGH".parse(), Ok(EventPriority::High));
        assert_eq!("medium".parse(), Ok(EventPriority::Medium));
        assert_eq!("low".parse(), Ok(EventPriority::Low));
        assert!("invalid".parse::<EventPriority>().is_err());
    }

    #[test]
    fn test_event_status_from_str() {
        assert_eq!("not_started".parse(), Ok(EventStatus::NotStarted));
        assert_eq!("Completed".parse(), Ok(EventStatus::Completed));
        assert!("pending".parse::<EventStatus>().is_err());
    }

    #[test]
    fn test_task_stats_zeroed_on_malformed_body() {
        let stats: TaskStats = serde_json::from_str("{}").unwrap();
        assert_eq!(stats, TaskStats::default());
        assert_eq!(stats.total_tasks, 0);
        assert_eq!(stats.completion_rate, 0.0);
    }

    #[test]
    fn test_api_error_body_lenient_parse() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"message":"no such task"}"#).unwrap();
        assert_eq!(body.display_message(), Some("no such task".to_string()));

        let body: ApiErrorBody = serde_json::from_str(r#"{"error":"bad request"}"#).unwrap();
        assert_eq!(body.display_message(), Some("bad request".to_string()));

        let body: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.display_message(), None);
    }

    #[test]
    fn test_api_failure_from_empty_body_uses_status() {
        let failure = ApiFailure::from_error_body(500, ApiErrorBody::default());
        assert_eq!(
            failure,
            ApiFailure::Http {
                status: 500,
                message: "request failed with status 500".to_string()
            }
        );
    }

    #[test]
    fn test_auth_failure_detection() {
        assert!(ApiFailure::Http { status: 401, message: String::new() }.is_auth_failure());
        assert!(ApiFailure::Http { status: 403, message: String::new() }.is_auth_failure());
        assert!(!ApiFailure::Http { status: 500, message: String::new() }.is_auth_failure());
        assert!(!ApiFailure::Network("offline".to_string()).is_auth_failure());
    }

    #[test]
    fn test_avatar_url_deterministic() {
        let a = derive_avatar_url("jane.doe@example.com");
        let b = derive_avatar_url("jane.doe@example.com");
        assert_eq!(a, b);
        assert!(a.contains("name=JD"));
    }

    #[test]
    fn test_avatar_url_single_word_local_part() {
        assert!(derive_avatar_url("admin@example.com").contains("name=A"));
        assert!(derive_avatar_url("@example.com").contains("name=U"));
    }

    #[test]
    fn test_user_from_verified_name_fallback() {
        let user = User::from_verified("sam@example.com".to_string(), None, AuthMethod::Session);
        assert_eq!(user.name, "sam");
        assert_eq!(user.method, AuthMethod::Session);

        let user = User::from_verified(
            "sam@example.com".to_string(),
            Some("Sam Carter".to_string()),
            AuthMethod::Token,
        );
        assert_eq!(user.name, "Sam Carter");
        assert_eq!(user.avatar_url, derive_avatar_url("sam@example.com"));
    }

    #[test]
    fn test_task_deserializes_with_missing_optionals() {
        let json = r#"{
            "id": 1,
            "name": "Call dentist",
            "priority": 2,
            "status": "pending",
            "created_at": "2024-03-10T09:00:00Z",
            "updated_at": "2024-03-10T09:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.description, "");
        assert!(task.tags.is_empty());
        assert!(task.deadline.is_none());
        assert_eq!(task.completion_percentage, 0);
    }
}
