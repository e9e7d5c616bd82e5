//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Receipt, Vehicle};

/// State shared between tabs
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Registered vehicles, feeding the vehicle pickers
    pub vehicles: Vec<Vehicle>,
    /// Receipt from the latest ticket or parcel
    pub last_receipt: Option<Receipt>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the vehicle list
pub fn store_set_vehicles(store: &AppStore, vehicles: Vec<Vehicle>) {
    *store.vehicles().write() = vehicles;
}

/// Look up a vehicle by ID
pub fn store_find_vehicle(store: &AppStore, vehicle_id: &str) -> Option<Vehicle> {
    store
        .vehicles()
        .read_untracked()
        .iter()
        .find(|vehicle| vehicle.vehicle_id == vehicle_id)
        .cloned()
}

pub fn store_set_receipt(store: &AppStore, receipt: Option<Receipt>) {
    *store.last_receipt().write() = receipt;
}
