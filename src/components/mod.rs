//! UI Components
//!
//! Leptos components for the desk sections.

mod diagnostics_panel;
mod form_field;
mod history_panel;
mod occupancy_panel;
mod parcel_posting;
mod receipt_view;
mod reports_panel;
mod tab_bar;
mod ticket_issuance;
mod toast_stack;
mod vehicle_list;
mod vehicle_picker;
mod vehicle_registration;

pub use diagnostics_panel::DiagnosticsPanel;
pub use form_field::{FormField, FormStatus};
pub use history_panel::HistoryPanel;
pub use occupancy_panel::OccupancyPanel;
pub use parcel_posting::ParcelPosting;
pub use receipt_view::ReceiptView;
pub use reports_panel::ReportsPanel;
pub use tab_bar::TabBar;
pub use ticket_issuance::TicketIssuance;
pub use toast_stack::{LoadingIndicator, ToastStack};
pub use vehicle_list::VehicleList;
pub use vehicle_picker::VehiclePicker;
pub use vehicle_registration::VehicleRegistration;
