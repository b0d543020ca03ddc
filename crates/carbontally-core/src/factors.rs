//! Emission factor table and footprint arithmetic.

use serde::{Deserialize, Serialize};

use crate::models::Consumption;

/// Emission factors in tonnes of CO2 per unit of consumption.
///
/// Units: electricity in kWh, gas in m3, fuel in liters, water in m3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactors {
    pub electricity: f64,
    pub gas: f64,
    pub fuel: f64,
    pub water: f64,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            electricity: 0.000233,
            gas: 0.00184,
            fuel: 0.00237,
            water: 0.000344,
        }
    }
}

impl EmissionFactors {
    /// Total footprint for one consumption profile, in tonnes of CO2.
    ///
    /// The sum is left unrounded; rounding happens wherever values are
    /// stored or displayed.
    pub fn emissions(&self, consumption: &Consumption) -> f64 {
        consumption.electricity * self.electricity
            + consumption.gas * self.gas
            + consumption.fuel * self.fuel
            + consumption.water * self.water
    }
}

/// Footprint for one consumption profile using the standard factor table.
pub fn calculate_emissions(consumption: &Consumption) -> f64 {
    EmissionFactors::default().emissions(consumption)
}

/// Round to two decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_factor_table() {
        let factors = EmissionFactors::default();
        assert_eq!(factors.electricity, 0.000233);
        assert_eq!(factors.gas, 0.00184);
        assert_eq!(factors.fuel, 0.00237);
        assert_eq!(factors.water, 0.000344);
    }

    #[test]
    fn test_known_profile() {
        let consumption = Consumption {
            electricity: 100000.0,
            gas: 20000.0,
            water: 0.0,
            fuel: 0.0,
        };
        // 100000 * 0.000233 + 20000 * 0.00184 = 23.3 + 36.8
        assert_eq!(round2(calculate_emissions(&consumption)), 60.1);
    }

    #[test]
    fn test_zero_consumption_is_zero() {
        let consumption = Consumption {
            electricity: 0.0,
            gas: 0.0,
            water: 0.0,
            fuel: 0.0,
        };
        assert_eq!(calculate_emissions(&consumption), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.236), 1.24);
        assert_eq!(round2(-1.236), -1.24);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(60.099999999999994), 60.1);
    }

    proptest! {
        #[test]
        fn prop_total_is_sum_of_category_terms(
            electricity in 0.0..1_000_000.0f64,
            gas in 0.0..1_000_000.0f64,
            water in 0.0..1_000_000.0f64,
            fuel in 0.0..1_000_000.0f64,
        ) {
            let consumption = Consumption { electricity, gas, water, fuel };
            let total = calculate_emissions(&consumption);

            let factors = EmissionFactors::default();
            let by_category = electricity * factors.electricity
                + gas * factors.gas
                + fuel * factors.fuel
                + water * factors.water;

            prop_assert!((total - by_category).abs() < 1e-9);
        }

        #[test]
        fn prop_single_category_is_linear(electricity in 0.0..1_000_000.0f64) {
            let consumption = Consumption {
                electricity,
                gas: 0.0,
                water: 0.0,
                fuel: 0.0,
            };
            prop_assert_eq!(
                calculate_emissions(&consumption),
                electricity * EmissionFactors::default().electricity
            );
        }
    }
}
