use leptos::*;
use shared::Category;

/// Small colored chip naming the category a task belongs to. Renders
/// nothing when the task is uncategorized or the category list has not
/// loaded the referenced id.
#[component]
pub fn CategoryBadge(category_id: Option<i64>, categories: Vec<Category>) -> impl IntoView {
    let found = category_id.and_then(|id| categories.into_iter().find(|c| c.id == id));

    found.map(|category| {
        let color = if category.color.is_empty() {
            "#6c757d".to_string()
        } else {
            category.color
        };
        view! {
            <span class="category-badge" style=format!("background-color: {};", color)>
                {category.name}
            </span>
        }
    })
}
