//! Reports Panel Component
//!
//! Fleet and revenue totals.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::models::Report;

#[component]
pub fn ReportsPanel() -> impl IntoView {
    let ctx = use_app_context();
    let (report, set_report) = signal::<Option<Report>>(None);
    let (reload, set_reload) = signal(0u32);

    Effect::new(move |_| {
        let _ = reload.get();
        let api = ctx.api();
        let ticket = ctx.nav_ticket();
        spawn_local(async move {
            let result = api.report().await;
            if ticket.is_current() {
                set_report.set(result.ok());
            }
        });
    });

    view! {
        <section class="reports-panel">
            <div class="panel-controls">
                <h2>"Reports"</h2>
                <button type="button" on:click=move |_| set_reload.update(|n| *n += 1)>"Refresh"</button>
            </div>
            {move || report.get().map(|report| view! {
                {report.estimated.then(|| view! {
                    <p class="estimate-note">"Estimated from records saved on this device."</p>
                })}
                <dl class="report-grid">
                    <dt>"Vehicles"</dt>
                    <dd>{report.total_vehicles}</dd>
                    <dt>"Tickets"</dt>
                    <dd>{report.total_tickets}</dd>
                    <dt>"Parcels"</dt>
                    <dd>{report.total_parcels}</dd>
                    <dt>"Ticket revenue"</dt>
                    <dd>{format!("{:.2}", report.ticket_revenue)}</dd>
                    <dt>"Parcel revenue"</dt>
                    <dd>{format!("{:.2}", report.parcel_revenue)}</dd>
                    <dt>"Total revenue"</dt>
                    <dd class="total">{format!("{:.2}", report.total_revenue)}</dd>
                </dl>
            })}
        </section>
    }
}
