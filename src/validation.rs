//! Form Validation
//!
//! Pure checks over raw form input. Every rule runs on every submit so the
//! form can show all problems at once.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{NewParcel, NewTicket, NewVehicle};

static PLATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}\s[0-9]{3}[A-Z]$").expect("plate pattern"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+254|0)[17][0-9]{8}$").expect("phone pattern"));

pub const MIN_CAPACITY: i64 = 1;
pub const MAX_CAPACITY: i64 = 100;

/// Field name → message, ordered by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

// ========================
// Field Rules
// ========================

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn required(errors: &mut FieldErrors, field: &'static str, label: &str, value: &str) {
    if is_blank(value) {
        errors.insert(field, format!("{} is required", label));
    }
}

/// Required check first; the format message only appears for non-empty input.
fn patterned(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    value: &str,
    pattern: &Regex,
    format_message: &str,
) {
    if is_blank(value) {
        errors.insert(field, format!("{} is required", label));
    } else if !pattern.is_match(value) {
        errors.insert(field, format_message);
    }
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE.is_match(value)
}

pub fn is_valid_plate(value: &str) -> bool {
    PLATE.is_match(value)
}

const PHONE_FORMAT: &str = "Enter a valid Kenyan phone number (e.g. 0712345678 or +254712345678)";
const PLATE_FORMAT: &str = "Plate must look like KAA 123A";

fn phone(errors: &mut FieldErrors, field: &'static str, label: &str, value: &str) {
    patterned(errors, field, label, value, &PHONE, PHONE_FORMAT);
}

fn capacity(errors: &mut FieldErrors, field: &'static str, value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(field, "Capacity is required");
        return None;
    }
    match value.parse::<i64>() {
        Err(_) => {
            errors.insert(field, "Capacity must be a whole number");
            None
        }
        Ok(n) if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&n) => {
            errors.insert(
                field,
                format!("Capacity must be between {} and {}", MIN_CAPACITY, MAX_CAPACITY),
            );
            None
        }
        Ok(n) => u32::try_from(n).ok(),
    }
}

fn money(errors: &mut FieldErrors, field: &'static str, label: &str, value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(field, format!("{} is required", label));
        return None;
    }
    match value.parse::<f64>() {
        Ok(n) if !n.is_finite() => {
            errors.insert(field, format!("{} must be a number", label));
            None
        }
        Ok(n) if n < 0.0 => {
            errors.insert(field, format!("{} cannot be negative", label));
            None
        }
        Ok(n) => Some(n),
        Err(_) => {
            errors.insert(field, format!("{} must be a number", label));
            None
        }
    }
}

fn seat(errors: &mut FieldErrors, field: &'static str, value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(field, "Seat number is required");
        return None;
    }
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            errors.insert(field, "Seat number must be a positive whole number");
            None
        }
    }
}

// ========================
// Forms
// ========================

/// Raw vehicle registration input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleForm {
    pub name: String,
    pub plate_number: String,
    pub capacity: String,
    pub route: String,
}

impl VehicleForm {
    pub fn validate(&self) -> Result<NewVehicle, FieldErrors> {
        let mut errors = FieldErrors::new();
        required(&mut errors, "name", "Vehicle name", &self.name);
        patterned(&mut errors, "plate_number", "Plate number", &self.plate_number, &PLATE, PLATE_FORMAT);
        let capacity = capacity(&mut errors, "capacity", &self.capacity);
        required(&mut errors, "route", "Route", &self.route);

        errors.into_result(|| NewVehicle {
            name: self.name.trim().to_string(),
            plate_number: self.plate_number.clone(),
            capacity: capacity.unwrap_or_default(),
            route: self.route.trim().to_string(),
        })
    }
}

/// Raw ticket issuance input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketForm {
    pub vehicle_id: String,
    pub customer_name: String,
    pub phone_number: String,
    pub route: String,
    pub amount: String,
    pub seat_number: String,
    pub cashier: String,
}

impl TicketForm {
    pub fn validate(&self) -> Result<NewTicket, FieldErrors> {
        let mut errors = FieldErrors::new();
        if is_blank(&self.vehicle_id) {
            errors.insert("vehicle_id", "Select a vehicle");
        }
        required(&mut errors, "customer_name", "Customer name", &self.customer_name);
        phone(&mut errors, "phone_number", "Phone number", &self.phone_number);
        required(&mut errors, "route", "Route", &self.route);
        let amount = money(&mut errors, "amount", "Amount", &self.amount);
        let seat_number = seat(&mut errors, "seat_number", &self.seat_number);
        required(&mut errors, "cashier", "Cashier", &self.cashier);

        errors.into_result(|| NewTicket {
            vehicle_id: self.vehicle_id.trim().to_string(),
            customer_name: self.customer_name.trim().to_string(),
            phone_number: self.phone_number.clone(),
            route: self.route.trim().to_string(),
            amount: amount.unwrap_or_default(),
            seat_number: seat_number.unwrap_or_default(),
            cashier: self.cashier.trim().to_string(),
        })
    }
}

/// Raw parcel posting input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParcelForm {
    pub description: String,
    pub origin: String,
    pub destination: String,
    pub charge: String,
    pub sender_name: String,
    pub sender_phone: String,
    pub receiver_name: String,
    pub receiver_phone: String,
}

impl ParcelForm {
    pub fn validate(&self) -> Result<NewParcel, FieldErrors> {
        let mut errors = FieldErrors::new();
        required(&mut errors, "description", "Description", &self.description);
        required(&mut errors, "origin", "Origin", &self.origin);
        required(&mut errors, "destination", "Destination", &self.destination);
        let charge = money(&mut errors, "charge", "Charge", &self.charge);
        required(&mut errors, "sender_name", "Sender name", &self.sender_name);
        phone(&mut errors, "sender_phone", "Sender phone", &self.sender_phone);
        required(&mut errors, "receiver_name", "Receiver name", &self.receiver_name);
        phone(&mut errors, "receiver_phone", "Receiver phone", &self.receiver_phone);

        errors.into_result(|| NewParcel {
            description: self.description.trim().to_string(),
            origin: self.origin.trim().to_string(),
            destination: self.destination.trim().to_string(),
            charge: charge.unwrap_or_default(),
            sender_name: self.sender_name.trim().to_string(),
            sender_phone: self.sender_phone.clone(),
            receiver_name: self.receiver_name.trim().to_string(),
            receiver_phone: self.receiver_phone.clone(),
        })
    }
}
