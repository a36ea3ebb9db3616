use leptos::*;
use shared::{CalendarEvent, Category, EventStatus};

use crate::components::category_badge::CategoryBadge;
use crate::utils::format_relative_date;

#[component]
pub fn TaskCard(
    event: CalendarEvent,
    categories: Vec<Category>,
    #[prop(into)] on_toggle: Callback<i64>,
    #[prop(into)] on_edit: Callback<CalendarEvent>,
    #[prop(into)] on_delete: Callback<i64>,
) -> impl IntoView {
    let id = event.id;
    let edit_event = event.clone();
    let done = event.status == EventStatus::Completed;

    let toggle_label = if done { "Reopen" } else { "Done" };
    let status_class = format!("task-status status-{}", event.status.as_str());
    let priority_class = format!("task-priority priority-{}", event.priority.as_str());

    view! {
        <div class="task-item" class:task-done=done>
            <div class="task-content">
                <div class="task-title">{event.title.clone()}</div>
                <div class="task-meta">
                    <span class=priority_class>{event.priority.as_str()}</span>
                    <span class=status_class>{event.status.as_str()}</span>
                    <span class="task-date">{format_relative_date(event.date)}</span>
                    <CategoryBadge category_id=event.category categories=categories />
                    {event.location.clone().map(|loc| view! {
                        <span class="task-location">{loc}</span>
                    })}
                </div>
                {(!event.tags.is_empty()).then(|| view! {
                    <div class="task-tags">
                        {event.tags.iter().map(|tag| view! {
                            <span class="tag">{tag.clone()}</span>
                        }).collect_view()}
                    </div>
                })}
                {(event.completion_percentage > 0 && !done).then(|| view! {
                    <div class="progress-bar">
                        <div
                            class="progress-fill"
                            style=format!("width: {}%;", event.completion_percentage)
                        ></div>
                    </div>
                })}
            </div>
            <div class="task-actions">
                <button class="btn btn-outline" on:click=move |_| on_toggle.call(id)>
                    {toggle_label}
                </button>
                <button class="btn btn-outline" on:click=move |_| on_edit.call(edit_event.clone())>
                    "Edit"
                </button>
                <button class="btn btn-danger" on:click=move |_| on_delete.call(id)>
                    "Delete"
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_toggle_label() {
        let label = |done: bool| if done { "Reopen" } else { "Done" };
        assert_eq!(label(true), "Reopen");
        assert_eq!(label(false), "Done");
    }
}
