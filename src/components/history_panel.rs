//! History Panel Component
//!
//! Ticket and parcel transactions over a chosen period.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::models::{Period, TransactionHistory};

#[component]
pub fn HistoryPanel() -> impl IntoView {
    let ctx = use_app_context();
    let (period, set_period) = signal(Period::Today);
    let (history, set_history) = signal::<Option<TransactionHistory>>(None);

    Effect::new(move |_| {
        let period = period.get();
        let api = ctx.api();
        let ticket = ctx.nav_ticket();
        spawn_local(async move {
            let result = api.transactions(period).await;
            if ticket.is_current() {
                set_history.set(result.ok());
            }
        });
    });

    view! {
        <section class="history-panel">
            <h2>"Transactions"</h2>
            <div class="panel-controls">
                <select
                    prop:value=move || period.get().as_str()
                    on:change=move |ev| set_period.set(event_target_value(&ev).parse().unwrap_or(Period::Today))
                >
                    {Period::ALL.iter().map(|p| view! {
                        <option value=p.as_str()>{p.label()}</option>
                    }).collect_view()}
                </select>
            </div>
            {move || match history.get() {
                Some(history) if history.transactions.is_empty() => {
                    view! { <p class="empty">"No transactions for this period."</p> }.into_any()
                }
                Some(history) => view! {
                    <table>
                        <thead>
                            <tr>
                                <th>"Receipt"</th>
                                <th>"Type"</th>
                                <th>"Amount"</th>
                                <th>"Date"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {history.transactions.into_iter().map(|tx| view! {
                                <tr>
                                    <td>{tx.receipt_id}</td>
                                    <td>{tx.kind.label()}</td>
                                    <td class="amount">{format!("{:.2}", tx.amount)}</td>
                                    <td>{tx.created_at.unwrap_or_default()}</td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                        <tfoot>
                            <tr>
                                <td colspan="2">"Total"</td>
                                <td class="amount">{format!("{:.2}", history.total)}</td>
                                <td></td>
                            </tr>
                        </tfoot>
                    </table>
                }.into_any(),
                None => view! { <p class="empty">"No transaction data."</p> }.into_any(),
            }}
        </section>
    }
}
