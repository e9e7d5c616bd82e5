//! Transit Desk App
//!
//! Builds the service stack from configuration and lays out the tabs.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use ring_logger::LogBuffer;

use crate::api::{DataAccess, FetchTransport, TransitApi};
use crate::cache::{BrowserStorage, KeyValueStore, LocalCache, MemoryStorage};
use crate::components::{
    DiagnosticsPanel, HistoryPanel, LoadingIndicator, OccupancyPanel, ParcelPosting, ReportsPanel, TabBar,
    TicketIssuance, ToastStack, VehicleList, VehicleRegistration,
};
use crate::config::AppConfig;
use crate::context::{AppContext, Tab};
use crate::notify::ToastQueue;
use crate::store::{store_set_vehicles, AppState};

/// Storage for the cache and the config override
pub fn open_storage() -> Arc<dyn KeyValueStore> {
    match BrowserStorage::open() {
        Some(storage) => Arc::new(storage),
        None => {
            tracing::warn!("localStorage unavailable, offline data will not survive a reload");
            Arc::new(MemoryStorage::new())
        }
    }
}

#[component]
pub fn App(config: AppConfig, storage: Arc<dyn KeyValueStore>, logs: Option<LogBuffer>) -> impl IntoView {
    tracing::info!(
        api = %config.api_base_url,
        offline_fallback = config.offline_fallback,
        "starting transit desk"
    );

    let toasts = ToastQueue::new(config.toast_duration_ms);
    let transport = Arc::new(FetchTransport::new(config.api_base_url.clone(), config.request_timeout_ms));
    let cache = LocalCache::new(storage, config.storage_prefix.clone());
    let data = DataAccess::new(transport, cache, Arc::new(toasts)).with_offline_fallback(config.offline_fallback);
    let api = Arc::new(TransitApi::new(data));

    let (vehicles_trigger, set_vehicles_trigger) = signal(0u32);
    let (active_tab, set_active_tab) = signal(Tab::Vehicles);

    let ctx = AppContext::new(
        api,
        toasts,
        logs,
        (active_tab, set_active_tab),
        (vehicles_trigger, set_vehicles_trigger),
    );
    provide_context(ctx);

    let store = Store::new(AppState::default());
    provide_context(store);

    // Load vehicles on mount and whenever a registration lands
    Effect::new(move |_| {
        let _ = vehicles_trigger.get();
        let api = ctx.api();
        spawn_local(async move {
            if let Ok(vehicles) = api.list_vehicles().await {
                tracing::debug!(count = vehicles.len(), "vehicles loaded");
                store_set_vehicles(&store, vehicles);
            }
        });
    });

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Transit Desk"</h1>
                <LoadingIndicator />
            </header>

            <TabBar />

            <main class="main-content">
                {move || match active_tab.get() {
                    Tab::Vehicles => view! {
                        <VehicleRegistration />
                        <VehicleList />
                    }.into_any(),
                    Tab::Tickets => view! { <TicketIssuance /> }.into_any(),
                    Tab::Parcels => view! { <ParcelPosting /> }.into_any(),
                    Tab::Occupancy => view! { <OccupancyPanel /> }.into_any(),
                    Tab::History => view! { <HistoryPanel /> }.into_any(),
                    Tab::Reports => view! { <ReportsPanel /> }.into_any(),
                }}
            </main>

            <DiagnosticsPanel />
            <ToastStack />
        </div>
    }
}
