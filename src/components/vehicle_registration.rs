//! Vehicle Registration Component
//!
//! Form for adding a vehicle to the fleet.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{FormField, FormStatus};
use crate::api::{is_local_id, ApiResult};
use crate::context::use_app_context;
use crate::models::{NewVehicle, VehicleCreated};
use crate::notify::{Notice, Notifier};
use crate::validation::{FieldErrors, VehicleForm, MAX_CAPACITY};

/// Effects of a finished registration.
///
/// The shared vehicle list and the toast are app-wide and apply whether or
/// not the form is still on screen; the inline status and field reset only
/// apply to the view that submitted.
#[derive(Debug, Default, PartialEq)]
struct RegistrationOutcome {
    reload_vehicles: bool,
    toast: Option<String>,
    status: Option<(bool, String)>,
    reset_fields: bool,
}

impl RegistrationOutcome {
    fn new(vehicle: &NewVehicle, result: &ApiResult<VehicleCreated>, view_current: bool) -> Self {
        let mut outcome = match result {
            Ok(created) => Self {
                reload_vehicles: true,
                toast: (!is_local_id(&created.vehicle_id))
                    .then(|| format!("Vehicle {} registered", vehicle.plate_number)),
                status: Some((true, format!("Vehicle ID: {}", created.vehicle_id))),
                reset_fields: true,
            },
            Err(e) => Self {
                status: Some((false, format!("Vehicle not registered: {}", e.user_message()))),
                ..Self::default()
            },
        };
        if !view_current {
            outcome.status = None;
            outcome.reset_fields = false;
        }
        outcome
    }
}

#[component]
pub fn VehicleRegistration() -> impl IntoView {
    let ctx = use_app_context();

    let name = RwSignal::new(String::new());
    let plate_number = RwSignal::new(String::new());
    let capacity = RwSignal::new(String::new());
    let route = RwSignal::new(String::new());
    let (errors, set_errors) = signal(FieldErrors::new());
    let (status, set_status) = signal::<Option<(bool, String)>>(None);

    let register = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = VehicleForm {
            name: name.get_untracked(),
            plate_number: plate_number.get_untracked(),
            capacity: capacity.get_untracked(),
            route: route.get_untracked(),
        };
        let vehicle = match form.validate() {
            Ok(vehicle) => vehicle,
            Err(invalid) => {
                set_errors.set(invalid);
                set_status.set(None);
                return;
            }
        };
        set_errors.set(FieldErrors::new());

        let api = ctx.api();
        let ticket = ctx.nav_ticket();
        spawn_local(async move {
            let result = api.register_vehicle(&vehicle).await;
            let outcome = RegistrationOutcome::new(&vehicle, &result, ticket.is_current());

            if outcome.reload_vehicles {
                ctx.reload_vehicles();
            }
            if let Some(message) = outcome.toast {
                ctx.toasts.notify(Notice::success(message));
            }
            if let Some(line) = outcome.status {
                set_status.set(Some(line));
            }
            if outcome.reset_fields {
                for field in [name, plate_number, capacity, route] {
                    field.set(String::new());
                }
            }
        });
    };

    view! {
        <form class="entry-form vehicle-form" on:submit=register>
            <h2>"Register Vehicle"</h2>
            <FormField label="Name" field="name" value=name errors=errors />
            <FormField
                label="Plate number"
                field="plate_number"
                value=plate_number
                errors=errors
                placeholder="KBC 456D"
            />
            <FormField
                label=format!("Capacity (max {})", MAX_CAPACITY)
                field="capacity"
                value=capacity
                errors=errors
                input_type="number"
            />
            <FormField label="Route" field="route" value=route errors=errors placeholder="Town - Airport" />
            <button type="submit">"Register"</button>
            <FormStatus status=status />
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ConnectivityCause};

    fn vehicle() -> NewVehicle {
        NewVehicle {
            name: "Shuttle".into(),
            plate_number: "KBC 456D".into(),
            capacity: 14,
            route: "Town - Airport".into(),
        }
    }

    fn created(id: &str) -> ApiResult<VehicleCreated> {
        Ok(VehicleCreated { vehicle_id: id.into() })
    }

    #[test]
    fn test_success_on_screen_updates_everything() {
        let outcome = RegistrationOutcome::new(&vehicle(), &created("v9"), true);
        assert!(outcome.reload_vehicles);
        assert!(outcome.reset_fields);
        assert_eq!(outcome.toast.as_deref(), Some("Vehicle KBC 456D registered"));
        assert_eq!(outcome.status, Some((true, "Vehicle ID: v9".to_string())));
    }

    #[test]
    fn test_success_after_navigation_still_reloads_fleet() {
        let outcome = RegistrationOutcome::new(&vehicle(), &created("v9"), false);
        assert!(outcome.reload_vehicles);
        assert!(outcome.toast.is_some());
        assert_eq!(outcome.status, None);
        assert!(!outcome.reset_fields);
    }

    #[test]
    fn test_offline_registration_skips_toast() {
        let outcome = RegistrationOutcome::new(&vehicle(), &created("local-1700000000000"), true);
        assert!(outcome.reload_vehicles);
        assert_eq!(outcome.toast, None);
    }

    #[test]
    fn test_failure_only_touches_status() {
        let err: ApiResult<VehicleCreated> = Err(ApiError::from_status(409, ""));
        let outcome = RegistrationOutcome::new(&vehicle(), &err, true);
        assert!(!outcome.reload_vehicles);
        assert!(!outcome.reset_fields);
        assert!(matches!(outcome.status, Some((false, _))));

        let err: ApiResult<VehicleCreated> = Err(ApiError::Connectivity(ConnectivityCause::Timeout));
        assert_eq!(RegistrationOutcome::new(&vehicle(), &err, false), RegistrationOutcome::default());
    }
}
