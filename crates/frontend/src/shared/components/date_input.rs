use leptos::prelude::*;

/// Native date picker bound to a `YYYY-MM-DD` string
#[component]
pub fn DateInput(
    value: RwSignal<String>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(into, optional)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <input
            type="date"
            class="date-input"
            id=id
            prop:value=move || value.get()
            on:input=move |ev| value.set(event_target_value(&ev))
            disabled=move || disabled.get()
        />
    }
}
