use chrono::{Datelike, NaiveDate, Utc};
use leptos::*;
use shared::{CalendarEvent, Category};

use crate::api::{ApiClient, EventStore};
use crate::components::alert::{Alert, AlertVariant};
use crate::components::calendar_grid::CalendarGrid;
use crate::components::loading::Loading;
use crate::components::task_modal::TaskModal;
use crate::utils::{month_name, next_month, prev_month};

#[component]
pub fn CalendarPage() -> impl IntoView {
    let store = expect_context::<EventStore>();
    let events = store.events;
    let loading = store.loading;
    let error = store.error;

    let today = Utc::now().date_naive();
    let year = create_rw_signal(today.year());
    let month = create_rw_signal(today.month());

    let categories = create_rw_signal(Vec::<Category>::new());
    let show_dialog = create_rw_signal(false);
    let editing = create_rw_signal(Option::<CalendarEvent>::None);
    let pending_date = create_rw_signal(Option::<NaiveDate>::None);

    let load_store = store.clone();
    create_effect(move |_| {
        let store = load_store.clone();
        wasm_bindgen_futures::spawn_local(async move {
            store.refresh(None).await;
            if let Ok(list) = ApiClient::list_categories().await {
                categories.set(list);
            }
        });
    });

    let on_prev = move |_| {
        let (y, m) = prev_month(year.get(), month.get());
        year.set(y);
        month.set(m);
    };
    let on_next = move |_| {
        let (y, m) = next_month(year.get(), month.get());
        year.set(y);
        month.set(m);
    };

    let on_day_click = Callback::new(move |date: NaiveDate| {
        editing.set(None);
        pending_date.set(Some(date));
        show_dialog.set(true);
    });

    let on_event_click = Callback::new(move |event: CalendarEvent| {
        pending_date.set(None);
        editing.set(Some(event));
        show_dialog.set(true);
    });

    let on_saved = Callback::new(move |_: CalendarEvent| {
        show_dialog.set(false);
        editing.set(None);
        pending_date.set(None);
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
            <h1 class="dashboard-title">"Calendar"</h1>
            <div class="calendar-nav">
                <button class="btn btn-outline" on:click=on_prev>"‹"</button>
                <span class="calendar-month-label">
                    {move || format!("{} {}", month_name(month.get()), year.get())}
                </span>
                <button class="btn btn-outline" on:click=on_next>"›"</button>
            </div>
        </div>

        {move || error.get().map(|e| view! {
            <Alert variant=AlertVariant::Error on_retry=Some(on_retry)>
                <span>{e}</span>
            </Alert>
        })}

        <Show when=move || loading.get() fallback=|| ()>
            <Loading />
        </Show>

        <Show when=move || !loading.get() fallback=|| ()>
            {move || view! {
                <CalendarGrid
                    year=year.get()
                    month=month.get()
                    events=events.get()
                    on_day_click=on_day_click
                    on_event_click=on_event_click
                />
            }}
        </Show>

        <Show when=move || show_dialog.get() fallback=|| ()>
            {move || view! {
                <TaskModal
                    event=editing.get()
                    categories=categories.get()
                    initial_date=pending_date.get()
                    on_close=Callback::new(move |_| {
                        show_dialog.set(false);
                        editing.set(None);
                        pending_date.set(None);
                    })
                    on_saved=on_saved
                />
            }}
        </Show>
    }
}
