pub mod consumption;
pub mod location;
pub mod report;

pub use consumption::Consumption;
pub use location::{Coordinates, DataOrigin, FacilityType, Location, Period};
pub use report::{format_emissions, FileKind, ProcessedFile, ReportMetadata};
