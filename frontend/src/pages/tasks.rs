use gloo_timers::callback::Timeout;
use leptos::*;
use shared::{CalendarEvent, Category, EventStatus};

use crate::api::{ApiClient, EventStore};
use crate::components::alert::{Alert, AlertVariant};
use crate::components::empty_state::EmptyState;
use crate::components::loading::Loading;
use crate::components::task_card::TaskCard;
use crate::components::task_modal::TaskModal;

#[component]
pub fn TasksPage() -> impl IntoView {
    let store = expect_context::<EventStore>();
    let events = store.events;
    let loading = store.loading;
    let error = store.error;

    let categories = create_rw_signal(Vec::<Category>::new());
    let filter = create_rw_signal("all".to_string());
    let query = create_rw_signal(String::new());
    let show_dialog = create_rw_signal(false);
    let editing = create_rw_signal(Option::<CalendarEvent>::None);
    let toast = create_rw_signal(Option::<String>::None);

    let show_toast = move |message: String| {
        toast.set(Some(message));
        Timeout::new(3_000, move || toast.set(None)).forget();
    };

    // Categories only feed the badge and the dialog dropdown; a failed
    // load just leaves both without category labels.
    create_effect(move |_| {
        wasm_bindgen_futures::spawn_local(async move {
            if let Ok(list) = ApiClient::list_categories().await {
                categories.set(list);
            }
        });
    });

    // Reload whenever the status filter changes. The display filter value
    // is mapped back to the backend enumeration for the query string.
    let filter_store = store.clone();
    create_effect(move |_| {
        let selected = filter.get();
        let store = filter_store.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let status = selected
                .parse::<EventStatus>()
                .ok()
                .map(|display| display.to_backend());
            store.refresh(status).await;
        });
    });

    let search_store = store.clone();
    let on_search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let store = search_store.clone();
        let q = query.get();
        wasm_bindgen_futures::spawn_local(async move {
            if q.trim().is_empty() {
                store.refresh(None).await;
            } else {
                store.search(&q).await;
            }
        });
    };

    let toggle_store = store.clone();
    let on_toggle = Callback::new(move |id: i64| {
        let store = toggle_store.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(failure) = store.toggle_status(id).await {
                error.set(Some(failure.to_string()));
            }
        });
    });

    let delete_store = store.clone();
    let on_delete = Callback::new(move |id: i64| {
        let store = delete_store.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match store.remove(id).await {
                Ok(()) => show_toast("Task deleted".to_string()),
                Err(failure) => error.set(Some(failure.to_string())),
            }
        });
    });

    let on_edit = Callback::new(move |event: CalendarEvent| {
        editing.set(Some(event));
        show_dialog.set(true);
    });

    let on_saved = Callback::new(move |_: CalendarEvent| {
        show_dialog.set(false);
        editing.set(None);
        show_toast("Task saved".to_string());
    });

    let retry_store = store.clone();
    let on_retry = Callback::new(move |_: ()| {
        let store = retry_store.clone();
        wasm_bindgen_futures::spawn_local(async move {
            store.refresh(None).await;
        });
    });

    view! {
        <div class="dashboard-header">
            <h1 class="dashboard-title">"Tasks"</h1>
        </div>

        {move || toast.get().map(|message| view! {
            <Alert variant=AlertVariant::Success>
                <span>{message}</span>
            </Alert>
        })}

        {move || error.get().map(|e| view! {
            <Alert variant=AlertVariant::Error on_retry=Some(on_retry)>
                <span>{e}</span>
            </Alert>
        })}

        <div class="toolbar">
            <button
                class="btn btn-primary"
                on:click=move |_| {
                    editing.set(None);
                    show_dialog.set(true);
                }
            >
                "+ New Task"
            </button>

            <select
                class="form-input toolbar-filter"
                prop:value=move || filter.get()
                on:change=move |ev| filter.set(event_target_value(&ev))
            >
                <option value="all">"All statuses"</option>
                <option value="not_started">"Not started"</option>
                <option value="in_progress">"In progress"</option>
                <option value="completed">"Completed"</option>
                <option value="cancelled">"Cancelled"</option>
                <option value="on_hold">"On hold"</option>
            </select>

            <form class="toolbar-search" on:submit=on_search>
                <input
                    type="search"
                    class="form-input"
                    placeholder="Search tasks..."
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                />
            </form>
        </div>

        <Show when=move || loading.get() fallback=|| ()>
            <Loading />
        </Show>

        <Show when=move || !loading.get() fallback=|| ()>
            {move || {
                let list = events.get();
                let cats = categories.get();
                if list.is_empty() {
                    view! {
                        <EmptyState message="No tasks found.">
                            <p>"Create one or adjust the filter."</p>
                        </EmptyState>
                    }.into_view()
                } else {
                    view! {
                        <div class="card">
                            {list.into_iter().map(|event| view! {
                                <TaskCard
                                    event=event
                                    categories=cats.clone()
                                    on_toggle=on_toggle
                                    on_edit=on_edit
                                    on_delete=on_delete
                                />
                            }).collect_view()}
                        </div>
                    }.into_view()
                }
            }}
        </Show>

        <Show when=move || show_dialog.get() fallback=|| ()>
            {move || view! {
                <TaskModal
                    event=editing.get()
                    categories=categories.get()
                    on_close=Callback::new(move |_| {
                        show_dialog.set(false);
                        editing.set(None);
                    })
                    on_saved=on_saved
                />
            }}
        </Show>
    }
}
