use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Consumption;
use crate::trend::Trend;

/// Facility category derived from a consumption profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacilityType {
    Office,
    Warehouse,
    Factory,
    Distribution,
    Hub,
    Other,
}

impl FacilityType {
    /// All categories, in classification rule order.
    pub const ALL: [FacilityType; 6] = [
        FacilityType::Factory,
        FacilityType::Warehouse,
        FacilityType::Office,
        FacilityType::Distribution,
        FacilityType::Hub,
        FacilityType::Other,
    ];
}

impl fmt::Display for FacilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FacilityType::Office => "office",
            FacilityType::Warehouse => "warehouse",
            FacilityType::Factory => "factory",
            FacilityType::Distribution => "distribution",
            FacilityType::Hub => "hub",
            FacilityType::Other => "other",
        };
        write!(f, "{}", label)
    }
}

/// Geographic position of a facility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Reporting period covered by a location's consumption figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for Period {
    /// Calendar year 2024, assumed whenever a document does not say.
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            end: NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date"),
        }
    }
}

/// Provenance of a location's consumption figures.
///
/// Synthetic data is labeled so it can never be mistaken for figures that
/// were actually read out of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    /// Every consumption field was read from the source document.
    Extracted,
    /// At least one missing field was filled with a drawn value.
    PartiallySynthesized,
    /// The whole record was fabricated.
    Synthesized,
}

/// One facility profile produced by ingestion.
///
/// Locations are immutable once built: emissions, classification, and trend
/// are derived at construction and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// Identifier in the form `<file name>-<index>`.
    pub id: String,
    pub name: String,
    pub address: String,
    pub coordinates: Option<Coordinates>,
    pub consumption: Consumption,
    /// Derived footprint in tonnes of CO2, rounded to two decimals.
    pub emissions: f64,
    pub period: Period,
    pub facility_type: FacilityType,
    /// Synthetic trend; absent when synthesis is disabled.
    pub trend: Option<Trend>,
    pub peak_alert: bool,
    pub origin: DataOrigin,
}
