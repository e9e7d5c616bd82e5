//! Diagnostics Panel Component
//!
//! Recent warnings and errors from the in-app log.

use leptos::prelude::*;
use tracing::Level;

use crate::context::use_app_context;

#[component]
pub fn DiagnosticsPanel() -> impl IntoView {
    let ctx = use_app_context();
    let Some(logs) = ctx.logs() else {
        return ().into_any();
    };
    let logs = StoredValue::new(logs);
    let (records, set_records) = signal(Vec::new());

    let refresh = move || set_records.set(logs.with_value(|logs| logs.at_least(Level::WARN)));

    view! {
        <details class="diagnostics" on:toggle=move |_| refresh()>
            <summary>"Diagnostics"</summary>
            <div class="panel-controls">
                <button type="button" on:click=move |_| refresh()>"Refresh"</button>
                <button
                    type="button"
                    on:click=move |_| {
                        logs.with_value(|logs| logs.clear());
                        refresh();
                    }
                >
                    "Clear"
                </button>
            </div>
            <Show
                when=move || !records.with(Vec::is_empty)
                fallback=|| view! { <p class="empty">"No warnings or errors."</p> }
            >
                <ul class="log-lines">
                    {move || records.get().into_iter().map(|record| {
                        let class = if record.level == Level::ERROR { "log-line error" } else { "log-line warn" };
                        view! { <li class=class>{record.to_string()}</li> }
                    }).collect_view()}
                </ul>
            </Show>
        </details>
    }
    .into_any()
}
