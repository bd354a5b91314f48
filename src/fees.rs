//! Fee calculation traits and structures.
//!
//! The `fees` module defines the abstraction a facility uses to price a
//! stay.  It provides the `FeeCalculator` trait and the standard
//! [`TieredFeeCalculator`], which charges the class base fee for the
//! first two hours and a surcharge for every started quarter hour
//! after that.

use crate::models::VehicleClass;

/// Minutes covered by the base fee alone.
pub const FREE_WINDOW_MINUTES: u64 = 120;
/// Length of one surcharge block past the free window.
pub const SURCHARGE_BLOCK_MINUTES: u64 = 15;
/// Amount added per started surcharge block.
pub const SURCHARGE_UNIT: u64 = 5;
/// Discount granted to vehicles presenting a discount card.
pub const DISCOUNT_PERCENT: u64 = 15;

/// A fee calculator prices a stay of a given length for a vehicle class,
/// before any discount.
///
/// Calculators must be thread‑safe (`Send + Sync`) because quotes for a
/// whole roster may be computed concurrently across multiple threads.
pub trait FeeCalculator: Send + Sync {
    fn base_fee(&self, vehicle_class: VehicleClass, parked_minutes: u64) -> u64;
}

/// The standard tiered schedule.
#[derive(Debug, Clone, Copy, Default)]
pub struct TieredFeeCalculator;

impl FeeCalculator for TieredFeeCalculator {
    fn base_fee(&self, vehicle_class: VehicleClass, parked_minutes: u64) -> u64 {
        let fee = vehicle_class.base_fee();
        if parked_minutes < FREE_WINDOW_MINUTES {
            return fee;
        }
        // A started block counts as a whole one: 121 minutes is one unit.
        let extra_units = (parked_minutes - FREE_WINDOW_MINUTES).div_ceil(SURCHARGE_BLOCK_MINUTES);
        fee + extra_units * SURCHARGE_UNIT
    }
}

/// Applies the card discount, truncating toward zero.
pub fn apply_discount(fee: u64) -> u64 {
    fee * (100 - DISCOUNT_PERCENT) / 100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_tier_boundary() {
        let calc = TieredFeeCalculator;
        assert_eq!(calc.base_fee(VehicleClass::Car, 119), 20);
        assert_eq!(calc.base_fee(VehicleClass::Car, 120), 20);
        assert_eq!(calc.base_fee(VehicleClass::Car, 121), 25);
        assert_eq!(calc.base_fee(VehicleClass::Car, 135), 25);
        assert_eq!(calc.base_fee(VehicleClass::Car, 136), 30);
    }

    #[test]
    fn test_bus_surcharge_rounds_up() {
        // (198 - 120) / 15 = 5.2, so six units.
        assert_eq!(TieredFeeCalculator.base_fee(VehicleClass::Bus, 198), 60);
    }

    #[test]
    fn test_class_base_fees() {
        let calc = TieredFeeCalculator;
        assert_eq!(calc.base_fee(VehicleClass::Motorcycle, 0), 15);
        assert_eq!(calc.base_fee(VehicleClass::MiniBus, 0), 25);
        assert_eq!(calc.base_fee(VehicleClass::Bus, 0), 30);
    }

    #[test]
    fn test_discount_truncates() {
        assert_eq!(apply_discount(20), 17);
        assert_eq!(apply_discount(15), 12);
        assert_eq!(apply_discount(25), 21);
        assert_eq!(apply_discount(0), 0);
    }
}
