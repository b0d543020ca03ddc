//! Aggregations over derived location records.
//!
//! Every function takes any iterator of location references, so callers can
//! summarize a single report or a whole session with the same code. Category
//! totals are recomputed from consumption and the factor table rather than
//! summed from the stored per-location figures, which keeps them free of
//! intermediate rounding.

use std::collections::HashMap;

use serde::Serialize;

use crate::factors::{round2, EmissionFactors};
use crate::models::{FacilityType, Location};

/// Emissions split by consumption category, in tCO₂.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub electricity: f64,
    pub gas: f64,
    pub fuel: f64,
    pub water: f64,
}

impl CategoryBreakdown {
    /// Sum of all four categories, rounded the way location totals are.
    pub fn total(&self) -> f64 {
        round2(self.electricity + self.gas + self.fuel + self.water)
    }
}

/// Emissions grouped by facility type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TypeBreakdown {
    pub facility_type: FacilityType,
    pub count: usize,
    pub total_emissions: f64,
    pub average_emissions: f64,
}

/// Per-category emissions across all given locations. Each category is
/// accumulated unrounded and rounded once at the end.
pub fn emissions_by_category<'a, I>(locations: I) -> CategoryBreakdown
where
    I: IntoIterator<Item = &'a Location>,
{
    let factors = EmissionFactors::default();
    let mut electricity = 0.0;
    let mut gas = 0.0;
    let mut fuel = 0.0;
    let mut water = 0.0;

    for location in locations {
        electricity += location.consumption.electricity * factors.electricity;
        gas += location.consumption.gas * factors.gas;
        fuel += location.consumption.fuel * factors.fuel;
        water += location.consumption.water * factors.water;
    }

    CategoryBreakdown {
        electricity: round2(electricity),
        gas: round2(gas),
        fuel: round2(fuel),
        water: round2(water),
    }
}

/// Per-facility-type groups over the stored per-location emissions, ordered
/// by descending total. Types with no locations are omitted.
pub fn emissions_by_type<'a, I>(locations: I) -> Vec<TypeBreakdown>
where
    I: IntoIterator<Item = &'a Location>,
{
    let mut groups: HashMap<FacilityType, (usize, f64)> = HashMap::new();
    for location in locations {
        let entry = groups.entry(location.facility_type).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += location.emissions;
    }

    let mut breakdowns: Vec<TypeBreakdown> = FacilityType::ALL
        .iter()
        .filter_map(|facility_type| {
            groups.get(facility_type).map(|&(count, total)| TypeBreakdown {
                facility_type: *facility_type,
                count,
                total_emissions: round2(total),
                average_emissions: round2(total / count as f64),
            })
        })
        .collect();

    breakdowns.sort_by(|a, b| {
        b.total_emissions
            .partial_cmp(&a.total_emissions)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    breakdowns
}

/// Combined emissions of the given locations, from the stored rounded
/// per-location figures.
pub fn total_emissions<'a, I>(locations: I) -> f64
where
    I: IntoIterator<Item = &'a Location>,
{
    round2(locations.into_iter().map(|l| l.emissions).sum())
}

/// Number of locations flagged with a peak alert.
pub fn peak_alert_count<'a, I>(locations: I) -> usize
where
    I: IntoIterator<Item = &'a Location>,
{
    locations.into_iter().filter(|l| l.peak_alert).count()
}

/// Mean per-location emissions, rounded to two decimals. Zero when there are
/// no locations.
pub fn average_emissions<'a, I>(locations: I) -> f64
where
    I: IntoIterator<Item = &'a Location>,
{
    let mut count = 0usize;
    let mut total = 0.0;
    for location in locations {
        count += 1;
        total += location.emissions;
    }
    if count == 0 {
        0.0
    } else {
        round2(total / count as f64)
    }
}

/// Render the given locations as CSV, one row per location.
pub fn locations_csv<'a, I>(locations: I) -> String
where
    I: IntoIterator<Item = &'a Location>,
{
    let mut out = String::from(
        "Location,Type,Emissions (tCO₂),Electricity (kWh),Gas (m³),Fuel (L),Water (m³)\n",
    );
    for location in locations {
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            csv_field(&location.name),
            location.facility_type,
            location.emissions,
            location.consumption.electricity,
            location.consumption.gas,
            location.consumption.fuel,
            location.consumption.water,
        ));
    }
    out
}

/// Quote a field when it carries a comma, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
