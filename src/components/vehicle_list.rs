//! Vehicle List Component
//!
//! Fleet table fed from the shared store.

use leptos::prelude::*;

use crate::api::is_local_id;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn VehicleList() -> impl IntoView {
    let store = use_app_store();

    view! {
        <section class="vehicle-list">
            <h2>"Fleet"</h2>
            <Show
                when=move || !store.vehicles().read().is_empty()
                fallback=|| view! { <p class="empty">"No vehicles registered yet."</p> }
            >
                <table>
                    <thead>
                        <tr>
                            <th>"ID"</th>
                            <th>"Name"</th>
                            <th>"Plate"</th>
                            <th>"Capacity"</th>
                            <th>"Route"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || store.vehicles().get()
                            key=|vehicle| vehicle.vehicle_id.clone()
                            children=move |vehicle| {
                                let pending = is_local_id(&vehicle.vehicle_id);
                                view! {
                                    <tr class:pending=pending>
                                        <td>{vehicle.vehicle_id.clone()}</td>
                                        <td>{vehicle.name.clone()}</td>
                                        <td>{vehicle.plate_number.clone()}</td>
                                        <td>{vehicle.capacity}</td>
                                        <td>{vehicle.route.clone()}</td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>
        </section>
    }
}
