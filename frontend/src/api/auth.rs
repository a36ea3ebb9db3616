//! Authentication state resolution.
//!
//! On startup the app decides who is signed in by trying, in order: a token
//! embedded in the page URL, a previously stored token still inside its
//! validity window, and finally the cookie session. The first verification
//! that succeeds wins; all three failing just leaves the user anonymous.

use chrono::Utc;
use leptos::*;
use shared::{ApiFailure, AuthMethod, User};
use wasm_bindgen::JsValue;

use crate::api::{token_store, ApiClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Checking,
    Authenticated,
    Anonymous,
}

#[derive(Clone)]
pub struct AuthState {
    pub user: RwSignal<Option<User>>,
    pub phase: RwSignal<AuthPhase>,
    pub error: RwSignal<Option<String>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            user: create_rw_signal(None),
            phase: create_rw_signal(AuthPhase::Checking),
            error: create_rw_signal(None),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase.get() == AuthPhase::Authenticated
    }

    /// Runs the three-step resolution. A token arriving in the URL is
    /// persisted (with a fresh timestamp) before anything else, so it always
    /// outranks whatever was stored earlier.
    pub async fn resolve(&self) {
        self.phase.set(AuthPhase::Checking);
        self.error.set(None);

        let now_ms = Utc::now().timestamp_millis();

        if let Some(token) = take_token_from_url() {
            token_store::set(&token, now_ms);
        }

        if let Some(stored) = token_store::get() {
            if token_store::is_fresh(stored.timestamp_ms, now_ms) {
                match ApiClient::verify_token(&stored.token).await {
                    Ok(identity) => {
                        self.finish_authenticated(User::from_verified(
                            identity.email,
                            identity.name,
                            AuthMethod::Token,
                        ));
                        return;
                    }
                    Err(failure) => {
                        token_store::clear();
                        self.surface_transport_error(&failure);
                    }
                }
            } else {
                // Stale token: purge without ever sending it to the backend.
                token_store::clear();
            }
        }

        match ApiClient::verify_session().await {
            Ok(identity) => {
                self.finish_authenticated(User::from_verified(
                    identity.email,
                    identity.name,
                    AuthMethod::Session,
                ));
            }
            Err(failure) => {
                self.surface_transport_error(&failure);
                self.user.set(None);
                self.phase.set(AuthPhase::Anonymous);
            }
        }
    }

    /// Local credential purge happens first and unconditionally; the
    /// backend logout is best-effort.
    pub async fn sign_out(&self) {
        token_store::clear();
        self.user.set(None);
        self.phase.set(AuthPhase::Anonymous);
        self.error.set(None);

        let _ = ApiClient::logout().await;
    }

    fn finish_authenticated(&self, user: User) {
        self.user.set(Some(user));
        self.phase.set(AuthPhase::Authenticated);
        self.error.set(None);
    }

    /// A rejected credential is a normal outcome, not an error. Only
    /// transport and server-side failures get a visible message.
    fn surface_transport_error(&self, failure: &ApiFailure) {
        if failure.is_auth_failure() {
            return;
        }
        let visible = match failure {
            ApiFailure::Network(_) | ApiFailure::Decode(_) => true,
            ApiFailure::Http { status, .. } => *status >= 500,
        };
        if visible {
            self.error.set(Some(failure.to_string()));
        }
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

/// Pulls a `token` query parameter out of the address bar, if present, and
/// scrubs the query string from history so the credential is not left
/// on-screen or in the back stack.
fn take_token_from_url() -> Option<String> {
    let window = web_sys::window()?;
    let location = window.location();
    let search = location.search().ok()?;
    if search.is_empty() {
        return None;
    }

    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    let token = params.get("token").filter(|t| !t.is_empty())?;

    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&path));
    }

    Some(token)
}
