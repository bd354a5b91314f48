//! Parking facility state machine.
//!
//! The `facility` module owns the set of parked vehicles.  It admits
//! vehicles while there is room and the plate is not already inside,
//! releases them against a fee computed by a [`FeeCalculator`], and
//! accumulates visit and earnings statistics.  Quotes for the whole
//! roster are computed in parallel with [`rayon`].

use crate::error::{AdmissionError, ConfigError, ReleaseError};
use crate::fees::{apply_discount, FeeCalculator, TieredFeeCalculator};
use crate::models::{Checkout, FeeQuote, Report, VehicleRecord};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

pub struct ParkingFacility {
    capacity: usize,
    vehicles: HashMap<String, VehicleRecord>,
    report: Report,
    calculator: Arc<dyn FeeCalculator>,
}

impl fmt::Debug for ParkingFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParkingFacility")
            .field("capacity", &self.capacity)
            .field("occupancy", &self.vehicles.len())
            .field("report", &self.report)
            .finish()
    }
}

impl ParkingFacility {
    /// Creates an empty facility priced with the standard tiered schedule.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_calculator(capacity, Arc::new(TieredFeeCalculator))
    }

    pub fn with_calculator(
        capacity: usize,
        calculator: Arc<dyn FeeCalculator>,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::InvalidCapacity(capacity.to_string()));
        }
        Ok(Self {
            capacity,
            vehicles: HashMap::with_capacity(capacity),
            report: Report::default(),
            calculator,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn occupancy(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_parked(&self, plate: &str) -> bool {
        self.vehicles.contains_key(plate)
    }

    /// Parks `record`.  The lot-full check runs before the duplicate check,
    /// and a rejected vehicle leaves the facility untouched.
    pub fn admit(&mut self, record: VehicleRecord) -> Result<(), AdmissionError> {
        if self.vehicles.len() >= self.capacity {
            debug!(plate = %record.plate, capacity = self.capacity, "admission rejected: lot full");
            return Err(AdmissionError::LotFull {
                capacity: self.capacity,
            });
        }
        if self.vehicles.contains_key(&record.plate) {
            debug!(plate = %record.plate, "admission rejected: already parked");
            return Err(AdmissionError::AlreadyParked(record.plate));
        }
        info!(
            plate = %record.plate,
            class = ?record.vehicle_class,
            occupancy = self.vehicles.len() + 1,
            "vehicle admitted"
        );
        self.vehicles.insert(record.plate.clone(), record);
        Ok(())
    }

    /// Removes the vehicle with `plate`, charges it for its stay up to `now`
    /// and records the visit.
    pub fn release(&mut self, plate: &str, now: DateTime<Utc>) -> Result<Checkout, ReleaseError> {
        let record = self.vehicles.remove(plate).ok_or_else(|| {
            debug!(plate, "release failed: not parked");
            ReleaseError::NotFound(plate.to_string())
        })?;
        let checkout = self.price(&record, now);
        self.report.total_earnings += checkout.fee;
        self.report.visit_count += 1;
        info!(
            plate = %checkout.plate,
            minutes = checkout.parked_minutes,
            fee = checkout.fee,
            discount = checkout.discount_applied,
            "vehicle released"
        );
        Ok(checkout)
    }

    /// What `release` would charge at `now`, without releasing.
    pub fn quote(&self, plate: &str, now: DateTime<Utc>) -> Result<FeeQuote, ReleaseError> {
        self.vehicles
            .get(plate)
            .map(|record| self.price(record, now).into())
            .ok_or_else(|| ReleaseError::NotFound(plate.to_string()))
    }

    /// Quotes every parked vehicle at `now`, ordered by plate.
    pub fn quote_all(&self, now: DateTime<Utc>) -> Vec<FeeQuote> {
        let mut quotes: Vec<FeeQuote> = self
            .vehicles
            .par_iter()
            .map(|(_, record)| self.price(record, now).into())
            .collect();
        quotes.sort_by(|a, b| a.plate.cmp(&b.plate));
        quotes
    }

    /// Snapshot of the parked vehicles, oldest check-in first.
    pub fn list_parked(&self) -> Vec<VehicleRecord> {
        let mut roster: Vec<VehicleRecord> = self.vehicles.values().cloned().collect();
        roster.sort_by(|a, b| {
            a.check_in_time
                .cmp(&b.check_in_time)
                .then_with(|| a.plate.cmp(&b.plate))
        });
        roster
    }

    pub fn report(&self) -> Report {
        self.report
    }

    fn price(&self, record: &VehicleRecord, now: DateTime<Utc>) -> Checkout {
        let parked_minutes = record.parked_minutes(now);
        let base_fee = self.calculator.base_fee(record.vehicle_class, parked_minutes);
        let discount_applied = record.has_discount_card();
        let fee = if discount_applied {
            apply_discount(base_fee)
        } else {
            base_fee
        };
        Checkout {
            plate: record.plate.clone(),
            vehicle_class: record.vehicle_class,
            parked_minutes,
            base_fee,
            discount_applied,
            fee,
        }
    }
}

impl From<Checkout> for FeeQuote {
    fn from(checkout: Checkout) -> Self {
        FeeQuote {
            plate: checkout.plate,
            vehicle_class: checkout.vehicle_class,
            parked_minutes: checkout.parked_minutes,
            fee: checkout.fee,
        }
    }
}
