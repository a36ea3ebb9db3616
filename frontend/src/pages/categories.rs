use leptos::*;
use shared::Category;

use crate::api::ApiClient;
use crate::components::alert::{Alert, AlertVariant};
use crate::components::category_modal::CategoryModal;
use crate::components::empty_state::EmptyState;
use crate::components::loading::Loading;

#[component]
pub fn CategoriesPage() -> impl IntoView {
    let categories = create_rw_signal(Vec::<Category>::new());
    let loading = create_rw_signal(true);
    let error = create_rw_signal(Option::<String>::None);
    let show_dialog = create_rw_signal(false);
    let editing = create_rw_signal(Option::<Category>::None);
    let reload = create_rw_signal(0u32);

    create_effect(move |_| {
        // Re-runs whenever the retry counter bumps.
        reload.get();
        wasm_bindgen_futures::spawn_local(async move {
            loading.set(true);
            match ApiClient::list_categories().await {
                Ok(list) => {
                    categories.set(list);
                    error.set(None);
                }
                Err(failure) => {
                    categories.set(Vec::new());
                    error.set(Some(failure.to_string()));
                }
            }
            loading.set(false);
        });
    });

    let on_retry = Callback::new(move |_: ()| reload.update(|n| *n += 1));

    let on_delete = move |id: i64| {
        wasm_bindgen_futures::spawn_local(async move {
            match ApiClient::delete_category(id).await {
                Ok(()) => categories.update(|list| list.retain(|c| c.id != id)),
                Err(failure) => error.set(Some(failure.to_string())),
            }
        });
    };

    let on_saved = Callback::new(move |saved: Category| {
        categories.update(|list| match list.iter_mut().find(|c| c.id == saved.id) {
            Some(existing) => *existing = saved,
            None => list.push(saved),
        });
        show_dialog.set(false);
        editing.set(None);
    });

    view! {
        <div class="dashboard-header">
            <h1 class="dashboard-title">"Categories"</h1>
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
            <div style="margin-bottom: 1rem;">
                <button
                    class="btn btn-primary"
                    on:click=move |_| {
                        editing.set(None);
                        show_dialog.set(true);
                    }
                >
                    "+ New Category"
                </button>
            </div>

            {move || {
                let list = categories.get();
                if list.is_empty() {
                    view! {
                        <EmptyState message="No categories yet.">
                            <p>"Categories help group tasks on the calendar."</p>
                        </EmptyState>
                    }.into_view()
                } else {
                    view! {
                        <div class="card">
                            {list.into_iter().map(|category| {
                                let id = category.id;
                                let edit_category = category.clone();
                                let color = if category.color.is_empty() {
                                    "#6c757d".to_string()
                                } else {
                                    category.color.clone()
                                };
                                view! {
                                    <div class="task-item">
                                        <div class="task-content">
                                            <span
                                                class="category-swatch"
                                                style=format!("background-color: {};", color)
                                            ></span>
                                            <span class="task-title">{category.name.clone()}</span>
                                        </div>
                                        <div class="task-actions">
                                            <button
                                                class="btn btn-outline"
                                                on:click=move |_| {
                                                    editing.set(Some(edit_category.clone()));
                                                    show_dialog.set(true);
                                                }
                                            >
                                                "Edit"
                                            </button>
                                            <button
                                                class="btn btn-danger"
                                                on:click=move |_| on_delete(id)
                                            >
                                                "Delete"
                                            </button>
                                        </div>
                                    </div>
                                }
                            }).collect_view()}
                        </div>
                    }.into_view()
                }
            }}
        </Show>

        <Show when=move || show_dialog.get() fallback=|| ()>
            {move || view! {
                <CategoryModal
                    category=editing.get()
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
