use leptos::*;

#[component]
pub fn EmptyState(#[prop(into)] message: String, children: Children) -> impl IntoView {
    view! {
        <div class="card empty-state">
            <p>{message}</p>
            {children()}
        </div>
    }
}
