//! Tab Bar Component
//!
//! Switches between the desk sections.

use leptos::prelude::*;

use crate::context::{use_app_context, Tab};

#[component]
pub fn TabBar() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <nav class="tab-bar">
            {Tab::ALL.iter().map(|&tab| {
                let tab_class = move || {
                    if ctx.active_tab.get() == tab { "tab active" } else { "tab" }
                };
                view! {
                    <button class=tab_class on:click=move |_| ctx.select_tab(tab)>
                        {tab.label()}
                    </button>
                }
            }).collect_view()}
        </nav>
    }
}
