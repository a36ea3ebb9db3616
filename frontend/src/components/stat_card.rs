use leptos::*;

#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    #[prop(into)] value: String,
    #[prop(optional, into)] accent: Option<String>,
) -> impl IntoView {
    let class = match accent {
        Some(accent) => format!("card stat-card stat-{}", accent),
        None => "card stat-card".to_string(),
    };

    view! {
        <div class=class>
            <div class="stat-value">{value}</div>
            <div class="stat-label">{label}</div>
        </div>
    }
}
