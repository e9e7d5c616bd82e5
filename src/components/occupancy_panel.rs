//! Occupancy Panel Component
//!
//! Seat map for one vehicle.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::VehiclePicker;
use crate::context::use_app_context;
use crate::models::{Occupancy, Vehicle};

#[component]
pub fn OccupancyPanel() -> impl IntoView {
    let ctx = use_app_context();
    let vehicle_id = RwSignal::new(String::new());
    let (occupancy, set_occupancy) = signal::<Option<Occupancy>>(None);
    let (reload, set_reload) = signal(0u32);

    Effect::new(move |_| {
        let _ = reload.get();
        let id = vehicle_id.get();
        set_occupancy.set(None);
        if id.is_empty() {
            return;
        }
        let api = ctx.api();
        let ticket = ctx.nav_ticket();
        spawn_local(async move {
            let result = api.occupancy(&id).await;
            if ticket.is_current() {
                set_occupancy.set(result.ok());
            }
        });
    });

    view! {
        <section class="occupancy-panel">
            <h2>"Seat Occupancy"</h2>
            <div class="panel-controls">
                <VehiclePicker value=vehicle_id on_pick={|_: Option<Vehicle>| {}} />
                <button
                    type="button"
                    disabled=move || vehicle_id.get().is_empty()
                    on:click=move |_| set_reload.update(|n| *n += 1)
                >
                    "Refresh"
                </button>
            </div>
            {move || occupancy.get().map(|occ| view! { <SeatGrid occupancy=occ /> })}
        </section>
    }
}

#[component]
fn SeatGrid(occupancy: Occupancy) -> impl IntoView {
    let summary = format!(
        "{} of {} seats taken, {} free",
        occupancy.occupied_seats.len(),
        occupancy.capacity,
        occupancy.available_seats.len()
    );

    view! {
        <p class="occupancy-summary">{summary}</p>
        <div class="seat-grid">
            {(1..=occupancy.capacity).map(|seat| {
                let class = if occupancy.is_occupied(seat) { "seat occupied" } else { "seat available" };
                view! { <span class=class>{seat}</span> }
            }).collect_view()}
        </div>
    }
}
