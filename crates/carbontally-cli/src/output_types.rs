use carbontally_core::models::{FileKind, Location};
use carbontally_core::summary::{CategoryBreakdown, TypeBreakdown};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Output for process command
#[derive(Debug, Serialize)]
pub struct ProcessOutput {
    pub files: Vec<FileReportInfo>,
    pub failed: Vec<FailedFileInfo>,
    pub rejected: Vec<RejectedFileInfo>,
    pub locations: Vec<Location>,
    pub totals: SessionTotals,
    pub by_category: CategoryBreakdown,
    pub by_type: Vec<TypeBreakdown>,
}

#[derive(Debug, Serialize)]
pub struct FileReportInfo {
    pub file_name: String,
    pub kind: FileKind,
    pub location_count: usize,
    pub total_emissions: f64,
    pub source: String,
    pub version: Option<String>,
    pub processed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct FailedFileInfo {
    pub file_name: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct RejectedFileInfo {
    pub file_name: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct SessionTotals {
    pub location_count: usize,
    pub total_emissions: f64,
    pub average_emissions: f64,
    pub peak_alerts: usize,
}

/// Output for formats command
#[derive(Debug, Serialize)]
pub struct FormatsOutput {
    pub formats: Vec<FormatInfo>,
}

#[derive(Debug, Serialize)]
pub struct FormatInfo {
    pub name: String,
    pub extensions: Vec<String>,
}

/// Output for factors command
#[derive(Debug, Serialize)]
pub struct FactorsOutput {
    pub factors: Vec<FactorInfo>,
}

#[derive(Debug, Serialize)]
pub struct FactorInfo {
    pub category: String,
    pub unit: String,
    pub tco2_per_unit: f64,
}
