//! Facility classification from consumption profiles.

use crate::models::{Consumption, FacilityType};

/// Classify a facility from its consumption profile.
///
/// Rules are checked in order and the first match wins. All thresholds are
/// strict comparisons, so a value sitting exactly on a boundary falls
/// through to the next rule. Water consumption never participates.
pub fn classify(consumption: &Consumption) -> FacilityType {
    if consumption.electricity > 50_000.0 && consumption.gas > 10_000.0 {
        FacilityType::Factory
    } else if consumption.electricity > 20_000.0 && consumption.fuel > 5_000.0 {
        FacilityType::Warehouse
    } else if consumption.electricity > 10_000.0 && consumption.gas > 2_000.0 {
        FacilityType::Office
    } else if consumption.fuel > 10_000.0 {
        FacilityType::Distribution
    } else if consumption.electricity > 30_000.0 {
        FacilityType::Hub
    } else {
        FacilityType::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consumption(electricity: f64, gas: f64, water: f64, fuel: f64) -> Consumption {
        Consumption {
            electricity,
            gas,
            water,
            fuel,
        }
    }

    #[test]
    fn test_factory() {
        assert_eq!(
            classify(&consumption(60_000.0, 15_000.0, 0.0, 0.0)),
            FacilityType::Factory
        );
    }

    #[test]
    fn test_warehouse() {
        assert_eq!(
            classify(&consumption(25_000.0, 0.0, 0.0, 6_000.0)),
            FacilityType::Warehouse
        );
    }

    #[test]
    fn test_office() {
        assert_eq!(
            classify(&consumption(15_000.0, 3_000.0, 0.0, 0.0)),
            FacilityType::Office
        );
    }

    #[test]
    fn test_distribution() {
        assert_eq!(
            classify(&consumption(5_000.0, 0.0, 0.0, 12_000.0)),
            FacilityType::Distribution
        );
    }

    #[test]
    fn test_hub() {
        assert_eq!(
            classify(&consumption(35_000.0, 0.0, 0.0, 0.0)),
            FacilityType::Hub
        );
    }

    #[test]
    fn test_other() {
        assert_eq!(
            classify(&consumption(1_000.0, 100.0, 50.0, 10.0)),
            FacilityType::Other
        );
    }

    #[test]
    fn test_earlier_rule_wins() {
        // Satisfies the factory, warehouse, distribution, and hub rules at
        // once; the first listed rule must take it.
        assert_eq!(
            classify(&consumption(60_000.0, 15_000.0, 0.0, 20_000.0)),
            FacilityType::Factory
        );
    }

    #[test]
    fn test_boundary_values_fall_through() {
        // Exactly 50000 kWh misses the strict factory threshold and lands
        // on the office rule instead.
        assert_eq!(
            classify(&consumption(50_000.0, 15_000.0, 0.0, 0.0)),
            FacilityType::Office
        );
    }

    #[test]
    fn test_water_never_affects_classification() {
        let dry = classify(&consumption(15_000.0, 3_000.0, 0.0, 0.0));
        let wet = classify(&consumption(15_000.0, 3_000.0, 1_000_000_000.0, 0.0));
        assert_eq!(dry, wet);
    }
}
