//! Ticket Issuance Component
//!
//! Books a seat on a vehicle and shows the resulting receipt.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{FormField, FormStatus, ReceiptView, VehiclePicker};
use crate::api::is_local_id;
use crate::context::use_app_context;
use crate::models::Vehicle;
use crate::notify::{Notice, Notifier};
use crate::store::{store_set_receipt, use_app_store};
use crate::validation::{FieldErrors, TicketForm};

#[component]
pub fn TicketIssuance() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let vehicle_id = RwSignal::new(String::new());
    let customer_name = RwSignal::new(String::new());
    let phone_number = RwSignal::new(String::new());
    let route = RwSignal::new(String::new());
    let amount = RwSignal::new(String::new());
    let seat_number = RwSignal::new(String::new());
    let cashier = RwSignal::new(String::new());
    let (errors, set_errors) = signal(FieldErrors::new());
    let (status, set_status) = signal::<Option<(bool, String)>>(None);

    store_set_receipt(&store, None);

    // Route defaults to the chosen vehicle's route
    let on_pick = move |vehicle: Option<Vehicle>| {
        if let Some(vehicle) = vehicle {
            route.set(vehicle.route);
        }
    };
    let vehicle_error = Signal::derive(move || errors.with(|e| e.get("vehicle_id").map(str::to_string)));

    let issue = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = TicketForm {
            vehicle_id: vehicle_id.get_untracked(),
            customer_name: customer_name.get_untracked(),
            phone_number: phone_number.get_untracked(),
            route: route.get_untracked(),
            amount: amount.get_untracked(),
            seat_number: seat_number.get_untracked(),
            cashier: cashier.get_untracked(),
        };
        let booking = match form.validate() {
            Ok(booking) => booking,
            Err(invalid) => {
                set_errors.set(invalid);
                set_status.set(None);
                return;
            }
        };
        set_errors.set(FieldErrors::new());
        store_set_receipt(&store, None);

        let api = ctx.api();
        let ticket = ctx.nav_ticket();
        spawn_local(async move {
            let issued = match api.issue_ticket(&booking).await {
                Ok(issued) => issued,
                Err(e) => {
                    if ticket.is_current() {
                        set_status.set(Some((false, format!("Ticket not issued: {}", e.user_message()))));
                    }
                    return;
                }
            };
            if !ticket.is_current() {
                return;
            }
            set_status.set(Some((true, format!("Ticket ID: {}", issued.ticket_id))));
            for field in [customer_name, phone_number, amount, seat_number] {
                field.set(String::new());
            }
            if is_local_id(&issued.ticket_id) {
                return;
            }
            ctx.toasts.notify(Notice::success(format!(
                "Seat {} booked for {}",
                booking.seat_number, booking.customer_name
            )));

            let Some(receipt_id) = issued.receipt_id else {
                return;
            };
            let receipt = api.receipt(&receipt_id).await;
            if ticket.is_current() {
                store_set_receipt(&store, receipt.ok());
            }
        });
    };

    view! {
        <div class="issue-layout">
            <form class="entry-form ticket-form" on:submit=issue>
                <h2>"Issue Ticket"</h2>
                <VehiclePicker value=vehicle_id on_pick=on_pick error=vehicle_error />
                <FormField label="Customer name" field="customer_name" value=customer_name errors=errors />
                <FormField
                    label="Phone number"
                    field="phone_number"
                    value=phone_number
                    errors=errors
                    input_type="tel"
                    placeholder="+254712345678"
                />
                <FormField label="Route" field="route" value=route errors=errors />
                <FormField label="Amount" field="amount" value=amount errors=errors input_type="number" />
                <FormField label="Seat number" field="seat_number" value=seat_number errors=errors input_type="number" />
                <FormField label="Cashier" field="cashier" value=cashier errors=errors />
                <button type="submit">"Issue"</button>
                <FormStatus status=status />
            </form>
            <ReceiptView />
        </div>
    }
}
