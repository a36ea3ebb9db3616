use leptos::*;
use leptos_router::*;

use crate::api::{ApiClient, AuthPhase, AuthState};

#[component]
pub fn Login() -> impl IntoView {
    let auth_state = expect_context::<AuthState>();
    let navigate = use_navigate();

    let error = create_rw_signal(Option::<String>::None);
    let redirecting = create_rw_signal(false);

    // Resolution may still be running when this page mounts, or a token may
    // have just been verified; bounce to the dashboard as soon as it lands.
    let auth_for_redirect = auth_state.clone();
    create_effect(move |_| {
        if auth_for_redirect.phase.get() == AuthPhase::Authenticated {
            navigate("/", Default::default());
        }
    });

    let on_google_sign_in = move |_| {
        redirecting.set(true);
        error.set(None);

        wasm_bindgen_futures::spawn_local(async move {
            match ApiClient::google_auth_url().await {
                Ok(response) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href(&response.auth_url);
                    }
                }
                Err(failure) => {
                    error.set(Some(failure.to_string()));
                    redirecting.set(false);
                }
            }
        });
    };

    view! {
        <div class="auth-container">
            <div class="auth-card card">
                <div class="auth-header">
                    <h1 class="auth-title">"DeepTalk"</h1>
                    <p class="auth-subtitle">"Sign in to manage your tasks and calendar"</p>
                </div>

                {move || auth_state.error.get().map(|e| view! {
                    <div class="alert alert-error">{e}</div>
                })}
                {move || error.get().map(|e| view! {
                    <div class="alert alert-error">{e}</div>
                })}

                <Show
                    when=move || auth_state.phase.get() == AuthPhase::Checking
                    fallback=move || view! {
                        <button
                            class="btn btn-primary"
                            style="width: 100%;"
                            disabled=move || redirecting.get()
                            on:click=on_google_sign_in
                        >
                            {move || if redirecting.get() {
                                "Redirecting..."
                            } else {
                                "Sign in with Google"
                            }}
                        </button>
                    }
                >
                    <p class="auth-subtitle">"Checking your session..."</p>
                </Show>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_button_text() {
        let text = |redirecting: bool| {
            if redirecting {
                "Redirecting..."
            } else {
                "Sign in with Google"
            }
        };
        assert_eq!(text(false), "Sign in with Google");
        assert_eq!(text(true), "Redirecting...");
    }
}
