//! Receipt View Component

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

/// Printable receipt for the latest ticket or parcel
#[component]
pub fn ReceiptView() -> impl IntoView {
    let store = use_app_store();

    move || {
        store.last_receipt().get().map(|receipt| {
            let kind = receipt.kind().map(|k| k.label()).unwrap_or("Receipt");
            view! {
                <aside class="receipt">
                    <header>
                        <strong>{kind}</strong>
                        " #"
                        {receipt.receipt_id.clone()}
                    </header>
                    <pre class="receipt-text">{receipt.receipt_text.clone()}</pre>
                    <footer>
                        <span>{format!("Amount: {:.2}", receipt.amount)}</span>
                        {receipt.created_at.clone().map(|at| view! { <span class="issued-at">{at}</span> })}
                    </footer>
                    <button type="button" on:click=|_| print_page()>"Print"</button>
                </aside>
            }
        })
    }
}

fn print_page() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.print() {
            tracing::warn!(error = ?e, "print failed");
        }
    }
}
