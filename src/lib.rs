//! Parking Engine library crate.
//!
//! This crate exposes the core of a bounded-capacity parking facility:
//! admission and release of vehicles, time-based fees with a tiered
//! surcharge and card discount, and aggregate visit and earnings
//! statistics.  External applications may depend on the
//! `parking_engine` crate and drive [`facility::ParkingFacility`]
//! directly or embed the API via `api::build_router`.

pub mod api;
pub mod config;
pub mod error;
pub mod facility;
pub mod fees;
pub mod models;

pub use error::{AdmissionError, ConfigError, ReleaseError};
pub use facility::ParkingFacility;
pub use models::{Checkout, FeeQuote, Report, VehicleClass, VehicleRecord};
