//! Vehicle Picker Component
//!
//! Select box over the registered vehicles.

use leptos::prelude::*;

use crate::models::Vehicle;
use crate::store::{store_find_vehicle, use_app_store, AppStateStoreFields};

#[component]
pub fn VehiclePicker(
    value: RwSignal<String>,
    /// Called with the vehicle once one is chosen
    #[prop(into)]
    on_pick: Callback<Option<Vehicle>>,
    #[prop(optional)] error: Option<Signal<Option<String>>>,
) -> impl IntoView {
    let store = use_app_store();

    let pick = move |ev: leptos::ev::Event| {
        let vehicle_id = event_target_value(&ev);
        let vehicle = store_find_vehicle(&store, &vehicle_id);
        value.set(vehicle_id);
        on_pick.run(vehicle);
    };

    view! {
        <label class="form-field">
            <span class="form-label">"Vehicle"</span>
            <select prop:value=move || value.get() on:change=pick>
                <option value="">"Select a vehicle"</option>
                <For
                    each=move || store.vehicles().get()
                    key=|vehicle| vehicle.vehicle_id.clone()
                    children=move |vehicle| {
                        let caption = format!("{} ({}) - {}", vehicle.name, vehicle.plate_number, vehicle.route);
                        view! { <option value=vehicle.vehicle_id.clone()>{caption}</option> }
                    }
                />
            </select>
            <span class="field-error">{move || error.and_then(|e| e.get())}</span>
        </label>
    }
}
