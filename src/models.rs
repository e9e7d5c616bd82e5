//! Frontend Models
//!
//! Data structures matching the transit API payloads.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Vehicle registered with the system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(deserialize_with = "de::id")]
    pub vehicle_id: String,
    pub name: String,
    pub plate_number: String,
    pub capacity: u32,
    pub route: String,
}

/// Registration payload (`POST /vehicles`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVehicle {
    pub name: String,
    pub plate_number: String,
    pub capacity: u32,
    pub route: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleCreated {
    #[serde(deserialize_with = "de::id")]
    pub vehicle_id: String,
}

/// Ticket as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(deserialize_with = "de::id")]
    pub ticket_id: String,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub receipt_id: Option<String>,
    #[serde(deserialize_with = "de::id")]
    pub vehicle_id: String,
    pub customer_name: String,
    pub phone_number: String,
    pub route: String,
    pub amount: f64,
    pub seat_number: u32,
    pub cashier: String,
    #[serde(default)]
    pub issued_at: Option<String>,
}

/// Issuance payload (`POST /tickets`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTicket {
    pub vehicle_id: String,
    pub customer_name: String,
    pub phone_number: String,
    pub route: String,
    pub amount: f64,
    pub seat_number: u32,
    pub cashier: String,
}

/// Result of an issuance: only `ticket_id` is guaranteed (offline issuance
/// returns nothing else)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketIssued {
    #[serde(deserialize_with = "de::id")]
    pub ticket_id: String,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub receipt_id: Option<String>,
}

/// Parcel as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    #[serde(deserialize_with = "de::id")]
    pub parcel_id: String,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub receipt_id: Option<String>,
    pub description: String,
    pub origin: String,
    pub destination: String,
    pub charge: f64,
    pub sender_name: String,
    pub sender_phone: String,
    pub receiver_name: String,
    pub receiver_phone: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Posting payload (`POST /parcels`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewParcel {
    pub description: String,
    pub origin: String,
    pub destination: String,
    pub charge: f64,
    pub sender_name: String,
    pub sender_phone: String,
    pub receiver_name: String,
    pub receiver_phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParcelPosted {
    #[serde(deserialize_with = "de::id")]
    pub parcel_id: String,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub receipt_id: Option<String>,
}

/// What a receipt or transaction was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Ticket,
    Parcel,
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Ticket => "Ticket",
            TransactionKind::Parcel => "Parcel",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    #[serde(deserialize_with = "de::id")]
    pub receipt_id: String,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub ticket_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub parcel_id: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub receipt_text: String,
}

impl Receipt {
    /// Which record the receipt covers.
    ///
    /// `None` when both or neither reference is set.
    pub fn kind(&self) -> Option<TransactionKind> {
        match (&self.ticket_id, &self.parcel_id) {
            (Some(_), None) => Some(TransactionKind::Ticket),
            (None, Some(_)) => Some(TransactionKind::Parcel),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(deserialize_with = "de::id")]
    pub receipt_id: String,
    pub amount: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(alias = "type")]
    pub kind: TransactionKind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionHistory {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub total: f64,
}

/// Reporting window for transaction history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Today,
    Week,
    Month,
    All,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Today, Period::Week, Period::Month, Period::All];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Week => "week",
            Period::Month => "month",
            Period::All => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Today => "Today",
            Period::Week => "This week",
            Period::Month => "This month",
            Period::All => "All time",
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(Period::Today),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "all" => Ok(Period::All),
            other => Err(format!("unknown period: {}", other)),
        }
    }
}

/// Seat map for one vehicle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Occupancy {
    pub capacity: u32,
    #[serde(default)]
    pub occupied_seats: Vec<u32>,
    #[serde(default)]
    pub available_seats: Vec<u32>,
}

impl Occupancy {
    pub fn is_occupied(&self, seat: u32) -> bool {
        self.occupied_seats.contains(&seat)
    }
}

/// Aggregates over vehicles, tickets and parcels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub total_vehicles: u64,
    #[serde(default)]
    pub total_tickets: u64,
    #[serde(default)]
    pub total_parcels: u64,
    #[serde(default)]
    pub ticket_revenue: f64,
    #[serde(default)]
    pub parcel_revenue: f64,
    #[serde(default)]
    pub total_revenue: f64,
    /// Set when the figures were approximated from locally cached records
    #[serde(default)]
    pub estimated: bool,
}

impl Report {
    /// Approximate a report from raw cached records.
    ///
    /// Returns `None` when there is nothing to count.
    pub fn estimate(
        vehicles: &[serde_json::Value],
        tickets: &[serde_json::Value],
        parcels: &[serde_json::Value],
    ) -> Option<Self> {
        if vehicles.is_empty() && tickets.is_empty() && parcels.is_empty() {
            return None;
        }
        let sum = |records: &[serde_json::Value], field: &str| -> f64 {
            records.iter().filter_map(|r| r.get(field)?.as_f64()).sum()
        };
        let ticket_revenue = sum(tickets, "amount");
        let parcel_revenue = sum(parcels, "charge");

        Some(Self {
            total_vehicles: vehicles.len() as u64,
            total_tickets: tickets.len() as u64,
            total_parcels: parcels.len() as u64,
            ticket_revenue,
            parcel_revenue,
            total_revenue: ticket_revenue + parcel_revenue,
            estimated: true,
        })
    }
}

/// Wire identifiers arrive as strings or integers; both become `String`.
mod de {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    impl From<RawId> for String {
        fn from(raw: RawId) -> Self {
            match raw {
                RawId::Text(s) => s,
                RawId::Int(n) => n.to_string(),
            }
        }
    }

    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        RawId::deserialize(deserializer).map(String::from)
    }

    pub fn opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_ids_become_strings() {
        let vehicle: Vehicle = serde_json::from_value(json!({
            "vehicle_id": 7,
            "name": "Matatu",
            "plate_number": "KAA 123A",
            "capacity": 14,
            "route": "CBD - Rongai"
        }))
        .unwrap();
        assert_eq!(vehicle.vehicle_id, "7");
    }

    #[test]
    fn test_ticket_issued_accepts_offline_shape() {
        let issued: TicketIssued = serde_json::from_value(json!({ "ticket_id": "local-1" })).unwrap();
        assert_eq!(issued.ticket_id, "local-1");
        assert_eq!(issued.receipt_id, None);
    }

    #[test]
    fn test_receipt_kind() {
        let mut receipt: Receipt = serde_json::from_value(json!({
            "receipt_id": "r1",
            "ticket_id": 3,
            "amount": 50.0
        }))
        .unwrap();
        assert_eq!(receipt.kind(), Some(TransactionKind::Ticket));

        receipt.parcel_id = Some("p1".to_string());
        assert_eq!(receipt.kind(), None);

        receipt.ticket_id = None;
        assert_eq!(receipt.kind(), Some(TransactionKind::Parcel));
    }

    #[test]
    fn test_transaction_accepts_type_alias() {
        let tx: Transaction = serde_json::from_value(json!({
            "receipt_id": "r9",
            "amount": 120,
            "type": "parcel"
        }))
        .unwrap();
        assert_eq!(tx.kind, TransactionKind::Parcel);
        assert_eq!(tx.amount, 120.0);
    }

    #[test]
    fn test_report_estimate() {
        let vehicles = vec![json!({ "vehicle_id": "local-1" })];
        let tickets = vec![json!({ "amount": 50 }), json!({ "amount": 70.5 })];
        let parcels = vec![json!({ "charge": 200 }), json!({ "description": "no charge" })];

        let report = Report::estimate(&vehicles, &tickets, &parcels).unwrap();
        assert_eq!(report.total_vehicles, 1);
        assert_eq!(report.total_tickets, 2);
        assert_eq!(report.total_parcels, 2);
        assert_eq!(report.ticket_revenue, 120.5);
        assert_eq!(report.parcel_revenue, 200.0);
        assert_eq!(report.total_revenue, 320.5);
        assert!(report.estimated);

        assert!(Report::estimate(&[], &[], &[]).is_none());
    }

    #[test]
    fn test_period_round_trip_str() {
        for period in Period::ALL {
            assert_eq!(period.as_str().parse::<Period>(), Ok(period));
        }
        assert!("fortnight".parse::<Period>().is_err());
    }
}
