use leptos::*;
use leptos_router::*;

use crate::api::AuthState;

#[component]
pub fn Navbar() -> impl IntoView {
    let auth_state = expect_context::<AuthState>();
    let navigate = use_navigate();

    let sign_out_state = auth_state.clone();
    let on_sign_out = move |_| {
        let auth = sign_out_state.clone();
        let nav = navigate.clone();
        wasm_bindgen_futures::spawn_local(async move {
            auth.sign_out().await;
            nav("/login", Default::default());
        });
    };

    view! {
        <nav class="navbar">
            <div class="container navbar-content">
                <a href="/" class="navbar-brand">"DeepTalk"</a>
                <div class="navbar-links">
                    <a href="/">"Dashboard"</a>
                    <a href="/calendar">"Calendar"</a>
                    <a href="/tasks">"Tasks"</a>
                    <a href="/categories">"Categories"</a>
                    <a href="/assistant">"Assistant"</a>
                </div>
                <div class="navbar-user">
                    {move || auth_state.user.get().map(|user| view! {
                        <img class="navbar-avatar" src=user.avatar_url alt=user.name.clone() />
                        <span class="navbar-username">{user.name}</span>
                    })}
                    <button class="btn btn-outline" on:click=on_sign_out>
                        "Sign Out"
                    </button>
                </div>
            </div>
        </nav>
    }
}
