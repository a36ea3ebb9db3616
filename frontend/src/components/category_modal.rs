use leptos::*;
use shared::{Category, CreateCategoryRequest, UpdateCategoryRequest};

use crate::api::ApiClient;
use crate::components::modal::Modal;

/// Create/edit dialog for a category. Pure pass-through to the backend.
#[component]
pub fn CategoryModal(
    category: Option<Category>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_saved: Callback<Category>,
) -> impl IntoView {
    let is_edit = category.is_some();
    let editing_id = category.as_ref().map(|c| c.id);
    let error = create_rw_signal(Option::<String>::None);
    let saving = create_rw_signal(false);

    let name = create_rw_signal(category.as_ref().map(|c| c.name.clone()).unwrap_or_default());
    let color = create_rw_signal(
        category
            .as_ref()
            .map(|c| c.color.clone())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "#4f46e5".to_string()),
    );

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        saving.set(true);
        error.set(None);

        wasm_bindgen_futures::spawn_local(async move {
            let result = match editing_id {
                Some(id) => {
                    ApiClient::update_category(
                        id,
                        UpdateCategoryRequest {
                            name: Some(name.get_untracked()),
                            color: Some(color.get_untracked()),
                        },
                    )
                    .await
                }
                None => {
                    ApiClient::create_category(CreateCategoryRequest {
                        name: name.get_untracked(),
                        color: color.get_untracked(),
                    })
                    .await
                }
            };

            match result {
                Ok(saved) => {
                    saving.set(false);
                    on_saved.call(saved);
                }
                Err(failure) => {
                    error.set(Some(failure.to_string()));
                    saving.set(false);
                }
            }
        });
    };

    let modal_title = if is_edit { "Edit Category" } else { "New Category" };

    view! {
        <Modal title=modal_title on_close=on_close>
            {move || error.get().map(|e| view! {
                <div class="alert alert-error">{e}</div>
            })}

            <form on:submit=on_submit>
                <div class="form-group">
                    <label class="form-label" for="category-name">"Name"</label>
                    <input
                        type="text"
                        id="category-name"
                        class="form-input"
                        placeholder="e.g. Work"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                        required
                    />
                </div>

                <div class="form-group">
                    <label class="form-label" for="category-color">"Color"</label>
                    <input
                        type="color"
                        id="category-color"
                        class="form-input form-color"
                        prop:value=move || color.get()
                        on:input=move |ev| color.set(event_target_value(&ev))
                    />
                </div>

                <button
                    type="submit"
                    class="btn btn-primary"
                    style="width: 100%; margin-top: 1rem;"
                    disabled=move || saving.get()
                >
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </button>
            </form>
        </Modal>
    }
}
