//! Parcel Posting Component
//!
//! Accepts a parcel for delivery between two stations.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{FormField, FormStatus, ReceiptView};
use crate::api::is_local_id;
use crate::context::use_app_context;
use crate::notify::{Notice, Notifier};
use crate::store::{store_set_receipt, use_app_store};
use crate::validation::{FieldErrors, ParcelForm};

#[component]
pub fn ParcelPosting() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let description = RwSignal::new(String::new());
    let origin = RwSignal::new(String::new());
    let destination = RwSignal::new(String::new());
    let charge = RwSignal::new(String::new());
    let sender_name = RwSignal::new(String::new());
    let sender_phone = RwSignal::new(String::new());
    let receiver_name = RwSignal::new(String::new());
    let receiver_phone = RwSignal::new(String::new());
    let (errors, set_errors) = signal(FieldErrors::new());
    let (status, set_status) = signal::<Option<(bool, String)>>(None);

    store_set_receipt(&store, None);

    let post = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = ParcelForm {
            description: description.get_untracked(),
            origin: origin.get_untracked(),
            destination: destination.get_untracked(),
            charge: charge.get_untracked(),
            sender_name: sender_name.get_untracked(),
            sender_phone: sender_phone.get_untracked(),
            receiver_name: receiver_name.get_untracked(),
            receiver_phone: receiver_phone.get_untracked(),
        };
        let parcel = match form.validate() {
            Ok(parcel) => parcel,
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
            let posted = match api.post_parcel(&parcel).await {
                Ok(posted) => posted,
                Err(e) => {
                    if ticket.is_current() {
                        set_status.set(Some((false, format!("Parcel not posted: {}", e.user_message()))));
                    }
                    return;
                }
            };
            if !ticket.is_current() {
                return;
            }
            set_status.set(Some((true, format!("Parcel ID: {}", posted.parcel_id))));
            for field in [
                description,
                charge,
                sender_name,
                sender_phone,
                receiver_name,
                receiver_phone,
            ] {
                field.set(String::new());
            }
            if is_local_id(&posted.parcel_id) {
                return;
            }
            ctx.toasts.notify(Notice::success(format!(
                "Parcel to {} accepted",
                parcel.destination
            )));

            if let Some(receipt_id) = posted.receipt_id {
                let receipt = api.receipt(&receipt_id).await;
                if ticket.is_current() {
                    store_set_receipt(&store, receipt.ok());
                }
            }
        });
    };

    view! {
        <div class="issue-layout">
            <form class="entry-form parcel-form" on:submit=post>
                <h2>"Post Parcel"</h2>
                <FormField label="Description" field="description" value=description errors=errors />
                <FormField label="Origin" field="origin" value=origin errors=errors />
                <FormField label="Destination" field="destination" value=destination errors=errors />
                <FormField label="Charge" field="charge" value=charge errors=errors input_type="number" />
                <fieldset>
                    <legend>"Sender"</legend>
                    <FormField label="Name" field="sender_name" value=sender_name errors=errors />
                    <FormField label="Phone" field="sender_phone" value=sender_phone errors=errors input_type="tel" />
                </fieldset>
                <fieldset>
                    <legend>"Receiver"</legend>
                    <FormField label="Name" field="receiver_name" value=receiver_name errors=errors />
                    <FormField
                        label="Phone"
                        field="receiver_phone"
                        value=receiver_phone
                        errors=errors
                        input_type="tel"
                    />
                </fieldset>
                <button type="submit">"Post"</button>
                <FormStatus status=status />
            </form>
            <ReceiptView />
        </div>
    }
}
