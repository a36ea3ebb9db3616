use leptos::*;
use shared::TaskStats;

use crate::api::EventStore;
use crate::components::alert::{Alert, AlertVariant};
use crate::components::loading::Loading;
use crate::components::stat_card::StatCard;
use crate::utils::{format_datetime, format_relative_date};

#[component]
pub fn Dashboard() -> impl IntoView {
    let store = expect_context::<EventStore>();
    let store_error = store.error;
    let store_loading = store.loading;

    let stats = create_rw_signal(TaskStats::default());
    let stats_error = create_rw_signal(Option::<String>::None);
    let reload = create_rw_signal(0u32);

    let load_store = store.clone();
    create_effect(move |_| {
        // Re-runs whenever the retry counter bumps.
        reload.get();
        let store = load_store.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match store.stats().await {
                Ok(s) => stats.set(s),
                Err(failure) => {
                    // Zeroed tiles plus a banner; the dashboard still renders.
                    stats.set(TaskStats::default());
                    stats_error.set(Some(failure.to_string()));
                }
            }
            store.refresh(None).await;
        });
    });

    let retry = Callback::new(move |_: ()| {
        stats_error.set(None);
        reload.update(|n| *n += 1);
    });

    let upcoming_store = store.clone();

    view! {
        <div class="dashboard-header">
            <h1 class="dashboard-title">"Dashboard"</h1>
            <p class="dashboard-subtitle">"Your tasks at a glance"</p>
        </div>

        {move || stats_error.get().map(|e| view! {
            <Alert variant=AlertVariant::Error on_retry=Some(retry)>
                <span>{e}</span>
            </Alert>
        })}
        {move || store_error.get().map(|e| view! {
            <Alert variant=AlertVariant::Error on_retry=Some(retry)>
                <span>{e}</span>
            </Alert>
        })}

        <div class="grid grid-4">
            {move || {
                let s = stats.get();
                view! {
                    <StatCard label="Total" value=s.total_tasks.to_string() />
                    <StatCard
                        label="In Progress"
                        value=s.in_progress_tasks.to_string()
                        accent="progress".to_string()
                    />
                    <StatCard
                        label="Completed"
                        value=s.completed_tasks.to_string()
                        accent="done".to_string()
                    />
                    <StatCard
                        label="Completion"
                        value=format!("{:.0}%", s.completion_rate * 100.0)
                        accent="rate".to_string()
                    />
                }
            }}
        </div>

        <h2 class="section-title">"Upcoming"</h2>

        <Show when=move || store_loading.get() fallback=|| ()>
            <Loading />
        </Show>

        <Show when=move || !store_loading.get() fallback=|| ()>
            {
                let store = upcoming_store.clone();
                move || {
                    let upcoming = store.upcoming(5);
                    if upcoming.is_empty() {
                        view! {
                            <div class="card empty-state">
                                <p>"Nothing coming up."</p>
                                <p>"Enjoy the quiet, or add a task from the Tasks page."</p>
                            </div>
                        }.into_view()
                    } else {
                        view! {
                            <div class="card">
                                {upcoming.into_iter().map(|event| view! {
                                    <div class="task-item">
                                        <div class="task-content">
                                            <div class="task-title">{event.title.clone()}</div>
                                            <div class="task-meta">
                                                <span class="task-date" title=format_datetime(event.date)>
                                                    {format_relative_date(event.date)}
                                                </span>
                                                <span class=format!("task-priority priority-{}", event.priority.as_str())>
                                                    {event.priority.as_str()}
                                                </span>
                                            </div>
                                        </div>
                                    </div>
                                }).collect_view()}
                            </div>
                        }.into_view()
                    }
                }
            }
        </Show>
    }
}
