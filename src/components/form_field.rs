//! Form Field Component
//!
//! Labelled input with its validation message underneath.

use leptos::prelude::*;

use crate::validation::FieldErrors;

#[component]
pub fn FormField(
    #[prop(into)] label: String,
    /// Key into the form's [`FieldErrors`]
    field: &'static str,
    value: RwSignal<String>,
    errors: ReadSignal<FieldErrors>,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] placeholder: Option<&'static str>,
) -> impl IntoView {
    let error = move || errors.with(|e| e.get(field).map(str::to_string));

    view! {
        <label class="form-field" class:invalid=move || error().is_some()>
            <span class="form-label">{label}</span>
            <input
                type=input_type.unwrap_or("text")
                name=field
                placeholder=placeholder.unwrap_or("")
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <span class="field-error">{error}</span>
        </label>
    }
}

/// Outcome line shown under a form after submit
#[component]
pub fn FormStatus(status: ReadSignal<Option<(bool, String)>>) -> impl IntoView {
    move || {
        status.get().map(|(ok, message)| {
            let class = if ok { "form-status ok" } else { "form-status failed" };
            view! { <p class=class>{message}</p> }
        })
    }
}
