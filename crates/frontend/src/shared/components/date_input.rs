use leptos::prelude::*;

/// Native date picker bound to a `YYYY-MM-DD` value.
///
/// An empty value means "not set".
#[component]
pub fn DateInput(
    #[prop(into)]
    value: Signal<String>,
    on_change: Callback<String>,
    #[prop(optional, into)]
    title: String,
) -> impl IntoView {
    view! {
        <input
            type="date"
            class="filter-panel__date"
            title=title
            prop:value=value
            on:input=move |ev| on_change.run(event_target_value(&ev))
        />
    }
}
