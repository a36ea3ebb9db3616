use leptos::*;
use shared::{
    CalendarEvent, Category, CreateTaskRequest, EventPriority, EventStatus, UpdateTaskRequest,
};

use crate::api::EventStore;
use crate::components::modal::Modal;
use crate::utils::{parse_datetime_local, to_datetime_local};

/// Create/edit dialog for a task. The form works entirely in display
/// enumerations; the backend representation only appears in the request
/// built on submit. A failed save keeps the dialog open with the message.
#[component]
pub fn TaskModal(
    event: Option<CalendarEvent>,
    categories: Vec<Category>,
    #[prop(optional_no_strip)] initial_date: Option<chrono::NaiveDate>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_saved: Callback<CalendarEvent>,
) -> impl IntoView {
    let store = expect_context::<EventStore>();

    let is_edit = event.is_some();
    let editing_id = event.as_ref().map(|e| e.id);
    let error = create_rw_signal(Option::<String>::None);
    let saving = create_rw_signal(false);

    let title = create_rw_signal(event.as_ref().map(|e| e.title.clone()).unwrap_or_default());
    let description = create_rw_signal(
        event
            .as_ref()
            .map(|e| e.description.clone())
            .unwrap_or_default(),
    );
    // Only a real deadline pre-fills the date field; an event that fell back
    // to its creation time starts empty again in the form.
    let date = create_rw_signal(
        event
            .as_ref()
            .filter(|e| e.has_deadline)
            .map(|e| to_datetime_local(e.date))
            .or_else(|| initial_date.map(|d| format!("{}T09:00", d.format("%Y-%m-%d"))))
            .unwrap_or_default(),
    );
    let priority = create_rw_signal(
        event
            .as_ref()
            .map(|e| e.priority.as_str().to_string())
            .unwrap_or_else(|| EventPriority::default().as_str().to_string()),
    );
    let status = create_rw_signal(
        event
            .as_ref()
            .map(|e| e.status.as_str().to_string())
            .unwrap_or_else(|| EventStatus::default().as_str().to_string()),
    );
    let category = create_rw_signal(
        event
            .as_ref()
            .and_then(|e| e.category)
            .map(|id| id.to_string())
            .unwrap_or_default(),
    );
    let tags = create_rw_signal(event.as_ref().map(|e| e.tags.join(", ")).unwrap_or_default());
    let duration = create_rw_signal(
        event
            .as_ref()
            .and_then(|e| e.duration_minutes)
            .map(|d| d.to_string())
            .unwrap_or_default(),
    );
    let location = create_rw_signal(
        event
            .as_ref()
            .and_then(|e| e.location.clone())
            .unwrap_or_default(),
    );
    let completion = event.as_ref().map(|e| e.completion_percentage).unwrap_or(0);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let store = store.clone();
        saving.set(true);
        error.set(None);

        // Unset or unparsable selections fall back to medium / not started.
        let display_priority: EventPriority = priority.get().parse().unwrap_or_default();
        let display_status: EventStatus = status.get().parse().unwrap_or_default();
        let backend_priority = display_priority.to_backend();
        let backend_status = display_status.to_backend();
        let deadline = parse_datetime_local(&date.get());
        let category_id = category.get().parse::<i64>().ok();
        let tag_list = parse_tags(&tags.get());
        let duration_minutes = duration.get().parse::<i64>().ok();
        let place = Some(location.get()).filter(|l| !l.trim().is_empty());
        let summary = Some(description.get()).filter(|d| !d.is_empty());

        wasm_bindgen_futures::spawn_local(async move {
            let result = match editing_id {
                Some(id) => {
                    let request = UpdateTaskRequest {
                        name: Some(title.get_untracked()),
                        description: summary,
                        category: category_id,
                        tags: Some(tag_list),
                        deadline,
                        scheduled_time: None,
                        estimated_duration: duration_minutes,
                        priority: Some(backend_priority),
                        urgency: Some(backend_priority),
                        status: Some(backend_status),
                        completion_percentage: Some(completion),
                        location: place,
                    };
                    store.update(id, request).await
                }
                None => {
                    let request = CreateTaskRequest {
                        name: title.get_untracked(),
                        description: summary,
                        category: category_id,
                        tags: tag_list,
                        deadline,
                        scheduled_time: None,
                        estimated_duration: duration_minutes,
                        priority: backend_priority,
                        urgency: backend_priority,
                        status: backend_status,
                        completion_percentage: completion,
                        location: place,
                    };
                    store.create(request).await
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

    let modal_title = if is_edit { "Edit Task" } else { "New Task" };
    let submit_label = move || {
        if saving.get() {
            "Saving..."
        } else if is_edit {
            "Save Changes"
        } else {
            "Create Task"
        }
    };

    view! {
        <Modal title=modal_title on_close=on_close>
            {move || error.get().map(|e| view! {
                <div class="alert alert-error">{e}</div>
            })}

            <form on:submit=on_submit>
                <div class="form-group">
                    <label class="form-label" for="task-title">"Title"</label>
                    <input
                        type="text"
                        id="task-title"
                        class="form-input"
                        placeholder="What needs doing?"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                        required
                    />
                </div>

                <div class="form-group">
                    <label class="form-label" for="task-description">"Description"</label>
                    <textarea
                        id="task-description"
                        class="form-input"
                        rows="3"
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    ></textarea>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label class="form-label" for="task-deadline">"Deadline"</label>
                        <input
                            type="datetime-local"
                            id="task-deadline"
                            class="form-input"
                            prop:value=move || date.get()
                            on:input=move |ev| date.set(event_target_value(&ev))
                        />
                    </div>

                    <div class="form-group">
                        <label class="form-label" for="task-duration">"Duration (minutes)"</label>
                        <input
                            type="number"
                            id="task-duration"
                            class="form-input"
                            min="0"
                            prop:value=move || duration.get()
                            on:input=move |ev| duration.set(event_target_value(&ev))
                        />
                    </div>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label class="form-label" for="task-priority">"Priority"</label>
                        <select
                            id="task-priority"
                            class="form-input"
                            prop:value=move || priority.get()
                            on:change=move |ev| priority.set(event_target_value(&ev))
                        >
                            <option value="urgent">"Urgent"</option>
                            <option value="high">"High"</option>
                            <option value="medium">"Medium"</option>
                            <option value="low">"Low"</option>
                        </select>
                    </div>

                    <div class="form-group">
                        <label class="form-label" for="task-status">"Status"</label>
                        <select
                            id="task-status"
                            class="form-input"
                            prop:value=move || status.get()
                            on:change=move |ev| status.set(event_target_value(&ev))
                        >
                            <option value="not_started">"Not started"</option>
                            <option value="in_progress">"In progress"</option>
                            <option value="completed">"Completed"</option>
                            <option value="cancelled">"Cancelled"</option>
                            <option value="on_hold">"On hold"</option>
                        </select>
                    </div>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label class="form-label" for="task-category">"Category"</label>
                        <select
                            id="task-category"
                            class="form-input"
                            prop:value=move || category.get()
                            on:change=move |ev| category.set(event_target_value(&ev))
                        >
                            <option value="">"None"</option>
                            {categories.into_iter().map(|c| view! {
                                <option value=c.id.to_string()>{c.name}</option>
                            }).collect_view()}
                        </select>
                    </div>

                    <div class="form-group">
                        <label class="form-label" for="task-location">"Location"</label>
                        <input
                            type="text"
                            id="task-location"
                            class="form-input"
                            placeholder="Optional"
                            prop:value=move || location.get()
                            on:input=move |ev| location.set(event_target_value(&ev))
                        />
                    </div>
                </div>

                <div class="form-group">
                    <label class="form-label" for="task-tags">"Tags"</label>
                    <input
                        type="text"
                        id="task-tags"
                        class="form-input"
                        placeholder="Comma-separated, e.g. work, errands"
                        prop:value=move || tags.get()
                        on:input=move |ev| tags.set(event_target_value(&ev))
                    />
                </div>

                <button
                    type="submit"
                    class="btn btn-primary"
                    style="width: 100%; margin-top: 1rem;"
                    disabled=move || saving.get()
                >
                    {submit_label}
                </button>
            </form>
        </Modal>
    }
}

/// Comma-separated tag input into a deduplicated tag set.
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for raw in input.split(',') {
        let tag = raw.trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags_trims_and_drops_empties() {
        assert_eq!(parse_tags(" work , errands ,, "), vec!["work", "errands"]);
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
    }

    #[test]
    fn test_parse_tags_deduplicates() {
        assert_eq!(parse_tags("work, work, home"), vec!["work", "home"]);
    }
}
