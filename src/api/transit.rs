//! Transit API
//!
//! One typed operation per remote endpoint, all routed through
//! [`DataAccess`].

use super::data_access::DataAccess;
use super::error::ApiResult;
use super::path::encode;
use crate::cache::Collection;
use crate::models::{
    NewParcel, NewTicket, NewVehicle, Occupancy, ParcelPosted, Period, Receipt, Report, TicketIssued,
    TransactionHistory, Vehicle, VehicleCreated,
};

pub struct TransitApi {
    data: DataAccess,
}

impl TransitApi {
    pub fn new(data: DataAccess) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &DataAccess {
        &self.data
    }

    // ========================
    // Vehicles
    // ========================

    pub async fn list_vehicles(&self) -> ApiResult<Vec<Vehicle>> {
        self.data.fetch("/vehicles").await
    }

    pub async fn register_vehicle(&self, vehicle: &NewVehicle) -> ApiResult<VehicleCreated> {
        self.data.submit("/vehicles", vehicle).await
    }

    pub async fn occupancy(&self, vehicle_id: &str) -> ApiResult<Occupancy> {
        self.data
            .fetch(&format!("/vehicles/{}/occupancy", encode(vehicle_id)))
            .await
    }

    // ========================
    // Tickets & Parcels
    // ========================

    pub async fn issue_ticket(&self, ticket: &NewTicket) -> ApiResult<TicketIssued> {
        self.data.submit("/tickets", ticket).await
    }

    pub async fn post_parcel(&self, parcel: &NewParcel) -> ApiResult<ParcelPosted> {
        self.data.submit("/parcels", parcel).await
    }

    pub async fn receipt(&self, receipt_id: &str) -> ApiResult<Receipt> {
        self.data
            .fetch(&format!("/receipts/{}", encode(receipt_id)))
            .await
    }

    // ========================
    // History & Reports
    // ========================

    pub async fn transactions(&self, period: Period) -> ApiResult<TransactionHistory> {
        self.data
            .fetch(&format!("/transactions?period={}", encode(period.as_str())))
            .await
    }

    /// Backend report, or an estimate from cached records when offline
    pub async fn report(&self) -> ApiResult<Report> {
        self.data
            .fetch_or_derive("/reports", |cache| {
                let estimate = Report::estimate(
                    &cache.load_from(Collection::Vehicles),
                    &cache.load_from(Collection::Tickets),
                    &cache.load_from(Collection::Parcels),
                )?;
                serde_json::to_value(estimate).ok()
            })
            .await
    }
}
