//! Data models for the Parking Engine.
//!
//! The `models` module defines the serialisable value types that flow
//! in and out of a [`ParkingFacility`](crate::facility::ParkingFacility):
//! vehicle classes, the record describing one parked vehicle, and the
//! results handed back on checkout, quote and report.  They derive
//! `Serialize` and `Deserialize` so the HTTP layer can pass them
//! straight through as JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The class of a vehicle.  Each class carries a fixed base fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VehicleClass {
    Car,
    Motorcycle,
    MiniBus,
    Bus,
}

impl VehicleClass {
    /// Fee charged for any stay inside the free window.
    pub fn base_fee(self) -> u64 {
        match self {
            VehicleClass::Car => 20,
            VehicleClass::Motorcycle => 15,
            VehicleClass::MiniBus => 25,
            VehicleClass::Bus => 30,
        }
    }
}

/// One vehicle's parking session.
///
/// Records are built by the caller and never mutated by the facility,
/// which only stores and removes them.  The plate is the identity key:
/// the facility indexes records by plate, so two records with the same
/// plate are the same vehicle whatever their other fields say.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub plate: String,
    pub vehicle_class: VehicleClass,
    pub check_in_time: DateTime<Utc>,
    /// Presence alone makes the vehicle eligible for the discount; the
    /// card value itself is not checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_card_id: Option<String>,
}

impl VehicleRecord {
    pub fn new(
        plate: impl Into<String>,
        vehicle_class: VehicleClass,
        check_in_time: DateTime<Utc>,
        discount_card_id: Option<String>,
    ) -> Self {
        Self {
            plate: plate.into(),
            vehicle_class,
            check_in_time,
            discount_card_id,
        }
    }

    /// Whole minutes elapsed between check-in and `now`.  A `now` earlier
    /// than the check-in time counts as zero minutes.
    pub fn parked_minutes(&self, now: DateTime<Utc>) -> u64 {
        let minutes = now.signed_duration_since(self.check_in_time).num_minutes();
        u64::try_from(minutes).unwrap_or(0)
    }

    pub fn has_discount_card(&self) -> bool {
        self.discount_card_id
            .as_deref()
            .is_some_and(|card| !card.is_empty())
    }
}

/// The outcome of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    pub plate: String,
    pub vehicle_class: VehicleClass,
    pub parked_minutes: u64,
    /// Fee before the discount.
    pub base_fee: u64,
    pub discount_applied: bool,
    /// The amount charged and added to the facility's earnings.
    pub fee: u64,
}

/// What a parked vehicle would be charged if it left at a given instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuote {
    pub plate: String,
    pub vehicle_class: VehicleClass,
    pub parked_minutes: u64,
    pub fee: u64,
}

/// Aggregate statistics accumulated over the facility's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Number of successful checkouts.
    pub visit_count: u64,
    /// Sum of every fee charged.
    pub total_earnings: u64,
}
