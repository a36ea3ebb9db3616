pub mod auth;
pub mod events;
pub mod token_store;

pub use auth::{AuthPhase, AuthState};
pub use events::EventStore;

use gloo_net::http::{Request, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    ApiErrorBody, ApiFailure, AuthUrlResponse, Category, CreateCategoryRequest, CreateTaskRequest,
    Task, TaskStats, TaskStatus, UpdateCategoryRequest, UpdateTaskRequest, VerifyResponse,
    VerifyTokenRequest,
};
use web_sys::RequestCredentials;

const API_BASE: &str = "/api";
const AUTH_BASE: &str = "/auth";

/// Thin typed wrapper over the backend HTTP surface.
///
/// One method per endpoint, one round trip per call. Cookies always ride
/// along so session authentication works without a token; the bearer header
/// is added whenever a token is stored.
pub struct ApiClient;

impl ApiClient {
    fn builder(method: &str, path: &str) -> Result<RequestBuilder, ApiFailure> {
        let builder = match method {
            "GET" => Request::get(path),
            "POST" => Request::post(path),
            "PUT" => Request::put(path),
            "DELETE" => Request::delete(path),
            _ => return Err(ApiFailure::Network(format!("invalid method {}", method))),
        };

        let mut builder = builder.credentials(RequestCredentials::Include);
        if let Some(stored) = token_store::get() {
            builder = builder.header("Authorization", &format!("Bearer {}", stored.token));
        }
        Ok(builder)
    }

    async fn send(
        method: &str,
        path: &str,
        body: Option<impl Serialize>,
    ) -> Result<gloo_net::http::Response, ApiFailure> {
        let builder = Self::builder(method, path)?;

        let response = if let Some(body) = body {
            builder
                .header("Content-Type", "application/json")
                .json(&body)
                .map_err(|e| ApiFailure::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiFailure::Network(e.to_string()))?
        } else {
            builder
                .send()
                .await
                .map_err(|e| ApiFailure::Network(e.to_string()))?
        };

        if response.ok() {
            Ok(response)
        } else {
            let status = response.status();
            let error_body: ApiErrorBody = response.json().await.unwrap_or_default();
            Err(ApiFailure::from_error_body(status, error_body))
        }
    }

    async fn request<T: DeserializeOwned>(
        method: &str,
        path: &str,
        body: Option<impl Serialize>,
    ) -> Result<T, ApiFailure> {
        let response = Self::send(method, path, body).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiFailure::Decode(e.to_string()))
    }

    /// For endpoints that answer 2xx with an empty body.
    async fn request_unit(
        method: &str,
        path: &str,
        body: Option<impl Serialize>,
    ) -> Result<(), ApiFailure> {
        Self::send(method, path, body).await.map(|_| ())
    }

    // Task endpoints

    pub async fn list_tasks(
        status: Option<TaskStatus>,
        priority: Option<u8>,
    ) -> Result<Vec<Task>, ApiFailure> {
        let mut path = format!("{}/tasks/", API_BASE);
        let mut params = Vec::new();
        if let Some(status) = status {
            params.push(format!("status={}", status.as_str()));
        }
        if let Some(priority) = priority {
            params.push(format!("priority={}", priority));
        }
        if !params.is_empty() {
            path = format!("{}?{}", path, params.join("&"));
        }
        Self::request::<Vec<Task>>("GET", &path, None::<()>).await
    }

    pub async fn search_tasks(query: &str) -> Result<Vec<Task>, ApiFailure> {
        let path = format!("{}/search-tasks/?q={}", API_BASE, encode_query(query));
        Self::request::<Vec<Task>>("GET", &path, None::<()>).await
    }

    pub async fn create_task(request: CreateTaskRequest) -> Result<Task, ApiFailure> {
        Self::request("POST", &format!("{}/tasks/", API_BASE), Some(request)).await
    }

    pub async fn update_task(id: i64, request: UpdateTaskRequest) -> Result<Task, ApiFailure> {
        Self::request("PUT", &format!("{}/tasks/{}/", API_BASE, id), Some(request)).await
    }

    pub async fn delete_task(id: i64) -> Result<(), ApiFailure> {
        Self::request_unit("DELETE", &format!("{}/tasks/{}/", API_BASE, id), None::<()>).await
    }

    pub async fn toggle_task_status(id: i64) -> Result<Task, ApiFailure> {
        Self::request(
            "POST",
            &format!("{}/tasks/{}/toggle-status/", API_BASE, id),
            None::<()>,
        )
        .await
    }

    pub async fn task_stats() -> Result<TaskStats, ApiFailure> {
        Self::request::<TaskStats>("GET", &format!("{}/task-stats/", API_BASE), None::<()>).await
    }

    // Category endpoints

    pub async fn list_categories() -> Result<Vec<Category>, ApiFailure> {
        Self::request::<Vec<Category>>("GET", &format!("{}/categories/", API_BASE), None::<()>)
            .await
    }

    pub async fn create_category(request: CreateCategoryRequest) -> Result<Category, ApiFailure> {
        Self::request("POST", &format!("{}/categories/", API_BASE), Some(request)).await
    }

    pub async fn update_category(
        id: i64,
        request: UpdateCategoryRequest,
    ) -> Result<Category, ApiFailure> {
        Self::request(
            "PUT",
            &format!("{}/categories/{}/", API_BASE, id),
            Some(request),
        )
        .await
    }

    pub async fn delete_category(id: i64) -> Result<(), ApiFailure> {
        Self::request_unit(
            "DELETE",
            &format!("{}/categories/{}/", API_BASE, id),
            None::<()>,
        )
        .await
    }

    // Auth endpoints

    pub async fn google_auth_url() -> Result<AuthUrlResponse, ApiFailure> {
        Self::request::<AuthUrlResponse>("GET", &format!("{}/google/", AUTH_BASE), None::<()>)
            .await
    }

    pub async fn verify_token(token: &str) -> Result<VerifyResponse, ApiFailure> {
        Self::request(
            "POST",
            &format!("{}/verify-token/", AUTH_BASE),
            Some(VerifyTokenRequest {
                token: token.to_string(),
            }),
        )
        .await
    }

    pub async fn verify_session() -> Result<VerifyResponse, ApiFailure> {
        Self::request::<VerifyResponse>(
            "POST",
            &format!("{}/verify-session/", AUTH_BASE),
            None::<()>,
        )
        .await
    }

    pub async fn logout() -> Result<(), ApiFailure> {
        Self::request_unit("POST", &format!("{}/logout/", AUTH_BASE), None::<()>).await
    }
}

/// Minimal query-value encoding for the search box. Spaces and the handful
/// of characters that break a query string are escaped; everything else is
/// passed through untouched.
fn encode_query(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            ' ' => out.push_str("%20"),
            '&' => out.push_str("%26"),
            '#' => out.push_str("%23"),
            '%' => out.push_str("%25"),
            '+' => out.push_str("%2B"),
            '=' => out.push_str("%3D"),
            '?' => out.push_str("%3F"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_query_passthrough() {
        assert_eq!(encode_query("report"), "report");
    }

    #[test]
    fn test_encode_query_escapes_separators() {
        assert_eq!(encode_query("write report"), "write%20report");
        assert_eq!(encode_query("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_query("50%"), "50%25");
        assert_eq!(encode_query("c++"), "c%2B%2B");
    }
}
