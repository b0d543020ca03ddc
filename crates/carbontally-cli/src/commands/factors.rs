//! Factors command implementation

use crate::output::OutputWriter;
use crate::output_types::{FactorInfo, FactorsOutput};
use anyhow::Result;
use carbontally_core::factors::EmissionFactors;
use tabled::Tabled;

#[derive(Tabled)]
struct FactorRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Unit")]
    unit: String,
    #[tabled(rename = "tCO₂ per unit")]
    factor: f64,
}

pub fn execute(output: &OutputWriter) -> Result<()> {
    let factors = EmissionFactors::default();
    let entries = [
        ("electricity", "kWh", factors.electricity),
        ("gas", "m³", factors.gas),
        ("fuel", "L", factors.fuel),
        ("water", "m³", factors.water),
    ];

    if output.is_json() {
        let json_output = FactorsOutput {
            factors: entries
                .iter()
                .map(|(category, unit, value)| FactorInfo {
                    category: category.to_string(),
                    unit: unit.to_string(),
                    tco2_per_unit: *value,
                })
                .collect(),
        };
        output.result(json_output)?;
    } else {
        let rows: Vec<FactorRow> = entries
            .iter()
            .map(|(category, unit, value)| FactorRow {
                category: category.to_string(),
                unit: unit.to_string(),
                factor: *value,
            })
            .collect();
        output.table(rows);
    }

    Ok(())
}
