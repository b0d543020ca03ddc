use serde::{Deserialize, Serialize};

use crate::error::{CarbontallyError, Result};

/// Raw utility usage for one facility over a reporting period.
///
/// Units: electricity in kWh, gas in m3, water in m3, fuel in liters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Consumption {
    pub electricity: f64,
    pub gas: f64,
    pub water: f64,
    pub fuel: f64,
}

impl Consumption {
    /// Reject non-finite or negative values.
    ///
    /// Applied to every record before derivation; extracted documents can
    /// carry anything, while drawn values are in range by construction.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("electricity", self.electricity),
            ("gas", self.gas),
            ("water", self.water),
            ("fuel", self.fuel),
        ] {
            if !value.is_finite() {
                return Err(CarbontallyError::Validation {
                    field: field.to_string(),
                    reason: format!("value must be finite, got {}", value),
                });
            }
            if value < 0.0 {
                return Err(CarbontallyError::Validation {
                    field: field.to_string(),
                    reason: format!("value must be non-negative, got {}", value),
                });
            }
        }
        Ok(())
    }
}
