//! Ingestion layer for facility energy reports.
//!
//! Each supported format implements the `Ingestor` trait, and the
//! `IngestorRegistry` dispatches incoming files to the right one by
//! lower-cased filename extension. `IngestorRegistry::process_file` is the
//! single entry point of the pipeline.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::classify::classify;
use crate::error::{CarbontallyError, Result};
use crate::factors::{calculate_emissions, round2};
use crate::models::{Consumption, Coordinates, DataOrigin, Location, Period, ProcessedFile};
use crate::rng::SynthRng;
use crate::trend::Trend;

pub mod pdf;
pub(crate) mod synth;
pub mod xml;

pub use pdf::SimulatedPdfIngestor;
pub use xml::XmlIngestor;

/// Raw file handed to the ingestion pipeline.
///
/// Only the name (for extension dispatch and id prefixes) and the byte
/// content are ever consulted.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl FileSource {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a source from disk, keeping only the final path component as
    /// its name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed")
            .to_string();
        let bytes = std::fs::read(path)?;
        Ok(Self { name, bytes })
    }

    /// Size of the content in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Whether missing data may be filled in with drawn values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisPolicy {
    /// Fabricate missing fields and whole records, labeled by origin.
    #[default]
    Allow,
    /// Fail instead of fabricating; trends are omitted entirely.
    Deny,
}

/// Whether the simulated PDF ingestor sleeps before answering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfDelay {
    /// Sleep 1.5 to 3.5 seconds, imitating document extraction work.
    #[default]
    Simulated,
    /// Skip the sleep and its random draw.
    Disabled,
}

/// Tunables for an ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOptions {
    pub synthesis: SynthesisPolicy,
    pub pdf_delay: PdfDelay,
}

/// Mutable state threaded through an ingestion run.
///
/// Holds the random source, so a seeded context makes a whole run
/// reproducible apart from wall-clock ids and timestamps.
pub struct IngestContext {
    pub rng: SynthRng,
    pub options: IngestOptions,
}

impl IngestContext {
    /// Context drawing from operating system entropy.
    pub fn new(options: IngestOptions) -> Self {
        Self {
            rng: SynthRng::from_entropy(),
            options,
        }
    }

    /// Context with a fixed seed.
    pub fn seeded(seed: u64, options: IngestOptions) -> Self {
        Self {
            rng: SynthRng::from_seed(seed),
            options,
        }
    }
}

/// Format ingestor trait that all supported formats implement.
#[async_trait]
pub trait Ingestor: Send + Sync + std::fmt::Debug {
    /// Ingest one file to completion, producing its processed result.
    ///
    /// There is no partial success: the file either yields a full
    /// `ProcessedFile` or fails entirely.
    async fn ingest(&self, source: &FileSource, ctx: &mut IngestContext) -> Result<ProcessedFile>;

    /// Supported file extensions, lower case (e.g. `["xml"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Human-readable format name (e.g. "XML").
    fn format_name(&self) -> &str;
}

/// Location fields assembled by an ingestor before derivation.
pub(crate) struct DraftLocation {
    pub id: String,
    pub name: String,
    pub address: String,
    pub coordinates: Option<Coordinates>,
    pub consumption: Consumption,
    pub period: Period,
    pub origin: DataOrigin,
}

impl DraftLocation {
    /// Validate the consumption figures and run the derivation chain:
    /// emissions, classification, trend, peak alert.
    pub fn finish(self, ctx: &mut IngestContext) -> Result<Location> {
        self.consumption.validate()?;
        let emissions = round2(calculate_emissions(&self.consumption));
        let facility_type = classify(&self.consumption);
        let trend = match ctx.options.synthesis {
            SynthesisPolicy::Allow => Some(Trend::generate(&mut ctx.rng)),
            SynthesisPolicy::Deny => None,
        };
        let peak_alert = trend.map(|t| t.peak_alert()).unwrap_or(false);
        Ok(Location {
            id: self.id,
            name: self.name,
            address: self.address,
            coordinates: self.coordinates,
            consumption: self.consumption,
            emissions,
            period: self.period,
            facility_type,
            trend,
            peak_alert,
            origin: self.origin,
        })
    }
}

/// Central registry for format ingestors.
pub struct IngestorRegistry {
    ingestors: Vec<Box<dyn Ingestor>>,
}

impl IngestorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            ingestors: Vec::new(),
        }
    }

    /// Registry with the two built-in formats registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(XmlIngestor));
        registry.register(Box::new(SimulatedPdfIngestor));
        registry
    }

    /// Register a format ingestor.
    pub fn register(&mut self, ingestor: Box<dyn Ingestor>) {
        self.ingestors.push(ingestor);
    }

    /// Select the ingestor for a file name by its lower-cased extension.
    pub fn detect_format(&self, file_name: &str) -> Result<&dyn Ingestor> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| CarbontallyError::UnsupportedFormat {
                extension: "none".to_string(),
            })?;

        self.ingestors
            .iter()
            .find(|i| i.supported_extensions().contains(&extension.as_str()))
            .map(|i| i.as_ref())
            .ok_or(CarbontallyError::UnsupportedFormat { extension })
    }

    /// All supported extensions across registered ingestors.
    pub fn supported_extensions(&self) -> Vec<String> {
        self.ingestors
            .iter()
            .flat_map(|i| i.supported_extensions())
            .map(|s| s.to_string())
            .collect()
    }

    /// All registered ingestors.
    pub fn ingestors(&self) -> &[Box<dyn Ingestor>] {
        &self.ingestors
    }

    /// Ingest one file end to end.
    pub async fn process_file(
        &self,
        source: &FileSource,
        ctx: &mut IngestContext,
    ) -> Result<ProcessedFile> {
        let ingestor = self.detect_format(&source.name)?;
        tracing::info!(file = %source.name, format = ingestor.format_name(), "ingesting file");
        let result = ingestor.ingest(source, ctx).await?;
        tracing::info!(
            file = %source.name,
            locations = result.location_count(),
            total_emissions = result.total_emissions,
            "ingestion complete"
        );
        Ok(result)
    }
}

impl Default for IngestorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
