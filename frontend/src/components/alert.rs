use leptos::*;

#[derive(Default, Clone, Copy, PartialEq)]
pub enum AlertVariant {
    #[default]
    Info,
    Success,
    Error,
}

/// Banner for surfacing request outcomes. Read failures pass an `on_retry`
/// so the user can re-issue the fetch in place.
#[component]
pub fn Alert(
    #[prop(optional)] variant: AlertVariant,
    #[prop(optional_no_strip)] on_retry: Option<Callback<()>>,
    #[prop(optional)] on_dismiss: Option<Callback<()>>,
    children: Children,
) -> impl IntoView {
    let variant_class = match variant {
        AlertVariant::Info => "alert",
        AlertVariant::Success => "alert alert-success",
        AlertVariant::Error => "alert alert-error",
    };

    view! {
        <div class=variant_class>
            {children()}
            {on_retry.map(|retry| view! {
                <button
                    class="btn btn-outline alert-action"
                    type="button"
                    on:click=move |_| retry.call(())
                >
                    "Retry"
                </button>
            })}
            {on_dismiss.map(|dismiss| view! {
                <button
                    class="alert-dismiss"
                    type="button"
                    on:click=move |_| dismiss.call(())
                >
                    "×"
                </button>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_variant_classes() {
        let class = |v: AlertVariant| match v {
            AlertVariant::Info => "alert",
            AlertVariant::Success => "alert alert-success",
            AlertVariant::Error => "alert alert-error",
        };
        assert_eq!(class(AlertVariant::Info), "alert");
        assert_eq!(class(AlertVariant::Error), "alert alert-error");
    }
}
