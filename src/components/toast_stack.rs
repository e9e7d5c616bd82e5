//! Toast Stack Component
//!
//! Renders queued notices and the loading indicator.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn ToastStack() -> impl IntoView {
    let ctx = use_app_context();
    let toasts = ctx.toasts;

    view! {
        <div class="toast-stack" role="status">
            <For
                each=move || toasts.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.notice.level.css_class() on:click=move |_| toasts.dismiss(id)>
                            {toast.notice.message.clone()}
                        </div>
                    }
                }
            />
        </div>
    }
}

#[component]
pub fn LoadingIndicator() -> impl IntoView {
    let busy = use_app_context().toasts.is_busy();

    view! {
        <Show when=move || busy.get()>
            <div class="loading-bar">"Loading..."</div>
        </Show>
    }
}
