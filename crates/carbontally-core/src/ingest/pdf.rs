//! Simulated PDF ingestor.
//!
//! No PDF bytes are ever inspected. The ingestor models the latency and
//! shape of a real extraction pipeline by sleeping for a drawn interval and
//! fabricating a batch of location records, all labeled as synthesized.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::error::Result;
use crate::ingest::{synth, FileSource, IngestContext, Ingestor, PdfDelay};
use crate::models::{FileKind, ProcessedFile, ReportMetadata};

/// Stand-in for a PDF extraction pipeline.
#[derive(Debug)]
pub struct SimulatedPdfIngestor;

#[async_trait]
impl Ingestor for SimulatedPdfIngestor {
    async fn ingest(&self, source: &FileSource, ctx: &mut IngestContext) -> Result<ProcessedFile> {
        synth::require_synthesis(ctx, "simulated PDF extraction")?;

        // The delay is drawn before the record count so a given seed always
        // yields the same batch whether or not the sleep is enabled.
        let millis = ctx.rng.gen_range(1500..3500);
        if ctx.options.pdf_delay == PdfDelay::Simulated {
            tracing::debug!(file = %source.name, millis, "simulating extraction latency");
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }

        let count = ctx.rng.gen_range(3..18);
        tracing::info!(file = %source.name, count, "fabricating records for PDF report");

        let locations = synth::synthesize_locations(
            &source.name,
            "PDF Location",
            "PDF Address",
            count,
            &synth::PDF_SYNTH_RANGES,
            ctx,
        )?;

        let metadata = ReportMetadata {
            period: "2024".to_string(),
            source: "PDF Energy Report".to_string(),
            version: None,
        };

        Ok(ProcessedFile::new(
            source.name.clone(),
            FileKind::Pdf,
            locations,
            metadata,
        ))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn format_name(&self) -> &str {
        "Simulated PDF"
    }
}
