use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Location;
use crate::factors::round2;

/// Source format of an ingested file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Xml,
    Pdf,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Xml => write!(f, "XML"),
            FileKind::Pdf => write!(f, "PDF"),
        }
    }
}

/// Report-level metadata recorded on every processed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Reporting period label.
    pub period: String,
    /// Human-readable description of the data source.
    pub source: String,
    /// Document version, when the format carries one.
    pub version: Option<String>,
}

/// Output of ingesting one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedFile {
    /// Identifier in the form `processed-<unix millis>`.
    pub id: String,
    pub file_name: String,
    pub kind: FileKind,
    /// Locations in extraction order.
    pub locations: Vec<Location>,
    /// Sum of per-location emissions, rounded to two decimals.
    pub total_emissions: f64,
    pub processed_at: DateTime<Utc>,
    pub metadata: ReportMetadata,
}

impl ProcessedFile {
    /// Assemble a result, deriving its id, timestamp, and emissions total.
    pub fn new(
        file_name: String,
        kind: FileKind,
        locations: Vec<Location>,
        metadata: ReportMetadata,
    ) -> Self {
        let processed_at = Utc::now();
        let total_emissions = round2(locations.iter().map(|l| l.emissions).sum::<f64>());
        Self {
            id: format!("processed-{}", processed_at.timestamp_millis()),
            file_name,
            kind,
            locations,
            total_emissions,
            processed_at,
            metadata,
        }
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }
}

/// Format an emissions value for display.
///
/// Values of a thousand tonnes or more render with a `k` suffix.
pub fn format_emissions(tonnes: f64) -> String {
    if tonnes >= 1000.0 {
        format!("{:.1}k tCO₂", tonnes / 1000.0)
    } else {
        format!("{:.1} tCO₂", tonnes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Consumption, DataOrigin, FacilityType, Period};

    fn location(emissions: f64) -> Location {
        Location {
            id: "report.xml-0".to_string(),
            name: "Location 1".to_string(),
            address: "Address 1".to_string(),
            coordinates: None,
            consumption: Consumption {
                electricity: 0.0,
                gas: 0.0,
                water: 0.0,
                fuel: 0.0,
            },
            emissions,
            period: Period::default(),
            facility_type: FacilityType::Other,
            trend: None,
            peak_alert: false,
            origin: DataOrigin::Extracted,
        }
    }

    #[test]
    fn test_total_is_rounded_sum_of_location_emissions() {
        let result = ProcessedFile::new(
            "report.xml".to_string(),
            FileKind::Xml,
            vec![location(0.1), location(0.2)],
            ReportMetadata {
                period: "2024".to_string(),
                source: "XML Energy Data".to_string(),
                version: Some("1.0".to_string()),
            },
        );
        assert_eq!(result.total_emissions, 0.3);
        assert_eq!(result.location_count(), 2);
        assert!(result.id.starts_with("processed-"));
    }

    #[test]
    fn test_empty_file_has_zero_total() {
        let result = ProcessedFile::new(
            "report.pdf".to_string(),
            FileKind::Pdf,
            vec![],
            ReportMetadata {
                period: "2024".to_string(),
                source: "PDF Energy Report".to_string(),
                version: None,
            },
        );
        assert_eq!(result.total_emissions, 0.0);
        assert_eq!(result.location_count(), 0);
    }

    #[test]
    fn test_format_emissions_below_threshold() {
        assert_eq!(format_emissions(60.1), "60.1 tCO₂");
        assert_eq!(format_emissions(999.94), "999.9 tCO₂");
        assert_eq!(format_emissions(0.0), "0.0 tCO₂");
    }

    #[test]
    fn test_format_emissions_kilotonnes() {
        assert_eq!(format_emissions(1000.0), "1.0k tCO₂");
        assert_eq!(format_emissions(1500.0), "1.5k tCO₂");
        assert_eq!(format_emissions(12_340.0), "12.3k tCO₂");
    }

    #[test]
    fn test_file_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&FileKind::Xml).unwrap(), "\"xml\"");
        assert_eq!(serde_json::to_string(&FileKind::Pdf).unwrap(), "\"pdf\"");
    }
}
