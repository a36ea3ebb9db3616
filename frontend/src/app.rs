use leptos::*;
use leptos_router::*;

use crate::api::{AuthPhase, AuthState, EventStore};
use crate::components::loading::Loading;
use crate::components::navbar::Navbar;
use crate::pages::{
    assistant::AssistantPage, calendar::CalendarPage, categories::CategoriesPage,
    dashboard::Dashboard, login::Login, tasks::TasksPage,
};

#[component]
pub fn App() -> impl IntoView {
    let auth_state = AuthState::new();
    provide_context(auth_state.clone());
    provide_context(EventStore::new());

    // Resolve who is signed in exactly once, on startup: URL token, then
    // stored token, then cookie session.
    create_effect(move |_| {
        let auth = auth_state.clone();
        wasm_bindgen_futures::spawn_local(async move {
            auth.resolve().await;
        });
    });

    view! {
        <Router>
            <main>
                <Routes>
                    <Route path="/login" view=Login />
                    <Route path="/" view=AuthenticatedLayout>
                        <Route path="" view=Dashboard />
                        <Route path="/calendar" view=CalendarPage />
                        <Route path="/tasks" view=TasksPage />
                        <Route path="/categories" view=CategoriesPage />
                        <Route path="/assistant" view=AssistantPage />
                    </Route>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn AuthenticatedLayout() -> impl IntoView {
    let auth_state = expect_context::<AuthState>();
    let phase = auth_state.phase;

    view! {
        <Show
            when=move || phase.get() != AuthPhase::Checking
            fallback=|| view! { <Loading /> }
        >
            <Show
                when=move || phase.get() == AuthPhase::Authenticated
                fallback=|| view! { <RedirectToLogin /> }
            >
                <Navbar />
                <div class="container">
                    <Outlet />
                </div>
            </Show>
        </Show>
    }
}

#[component]
fn RedirectToLogin() -> impl IntoView {
    let navigate = use_navigate();
    navigate("/login", Default::default());
    view! {}
}
