//! Application Context
//!
//! Shared services and signals provided via Leptos Context API.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use leptos::prelude::*;
use ring_logger::LogBuffer;

use crate::api::TransitApi;
use crate::notify::ToastQueue;

/// Top-level sections of the desk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Vehicles,
    Tickets,
    Parcels,
    Occupancy,
    History,
    Reports,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Vehicles,
        Tab::Tickets,
        Tab::Parcels,
        Tab::Occupancy,
        Tab::History,
        Tab::Reports,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Vehicles => "Vehicles",
            Tab::Tickets => "Tickets",
            Tab::Parcels => "Parcels",
            Tab::Occupancy => "Occupancy",
            Tab::History => "History",
            Tab::Reports => "Reports",
        }
    }
}

/// Navigation counter used to drop completions that arrive after the user
/// has moved on
#[derive(Debug, Clone, Default)]
pub struct NavEpoch(Arc<AtomicU64>);

impl NavEpoch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    /// Snapshot taken before an await
    pub fn ticket(&self) -> NavTicket {
        NavTicket {
            epoch: self.clone(),
            seen: self.0.load(Ordering::SeqCst),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NavTicket {
    epoch: NavEpoch,
    seen: u64,
}

impl NavTicket {
    /// False once any navigation happened after the ticket was taken
    pub fn is_current(&self) -> bool {
        self.epoch.0.load(Ordering::SeqCst) == self.seen
    }
}

/// App-wide services and signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    api: StoredValue<Arc<TransitApi>>,
    epoch: StoredValue<NavEpoch>,
    logs: StoredValue<Option<LogBuffer>>,
    pub toasts: ToastQueue,
    /// Active tab - read
    pub active_tab: ReadSignal<Tab>,
    /// Active tab - write
    set_active_tab: WriteSignal<Tab>,
    /// Trigger to reload the vehicle list - read
    pub vehicles_trigger: ReadSignal<u32>,
    /// Trigger to reload the vehicle list - write
    set_vehicles_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(
        api: Arc<TransitApi>,
        toasts: ToastQueue,
        logs: Option<LogBuffer>,
        active_tab: (ReadSignal<Tab>, WriteSignal<Tab>),
        vehicles_trigger: (ReadSignal<u32>, WriteSignal<u32>),
    ) -> Self {
        Self {
            api: StoredValue::new(api),
            epoch: StoredValue::new(NavEpoch::new()),
            logs: StoredValue::new(logs),
            toasts,
            active_tab: active_tab.0,
            set_active_tab: active_tab.1,
            vehicles_trigger: vehicles_trigger.0,
            set_vehicles_trigger: vehicles_trigger.1,
        }
    }

    pub fn api(&self) -> Arc<TransitApi> {
        self.api.get_value()
    }

    pub fn logs(&self) -> Option<LogBuffer> {
        self.logs.get_value()
    }

    /// Capture the navigation state before starting async work
    pub fn nav_ticket(&self) -> NavTicket {
        self.epoch.with_value(NavEpoch::ticket)
    }

    /// Switch tab; in-flight completions for the old view become stale
    pub fn select_tab(&self, tab: Tab) {
        if self.active_tab.get_untracked() != tab {
            self.epoch.with_value(NavEpoch::advance);
            self.set_active_tab.set(tab);
        }
    }

    /// Ask every vehicle list to reload
    pub fn reload_vehicles(&self) {
        self.set_vehicles_trigger.update(|v| *v += 1);
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
