//! Fabrication of whole location records.
//!
//! Both ingestors fall back to drawn data when a document carries none;
//! the ranges differ per format but the assembly is shared here. Every
//! fabricated record is labeled `DataOrigin::Synthesized`.

use rand::Rng;

use crate::error::{CarbontallyError, Result};
use crate::ingest::{DraftLocation, IngestContext, SynthesisPolicy};
use crate::models::{Consumption, DataOrigin, Location, Period};

/// Per-category uniform draw ranges for fabricated records.
pub(crate) struct ConsumptionRanges {
    pub electricity: (f64, f64),
    pub gas: (f64, f64),
    pub water: (f64, f64),
    pub fuel: (f64, f64),
}

/// Ranges for records invented by the XML ingestor.
pub(crate) const XML_SYNTH_RANGES: ConsumptionRanges = ConsumptionRanges {
    electricity: (10_000.0, 110_000.0),
    gas: (2_000.0, 22_000.0),
    water: (500.0, 5_500.0),
    fuel: (1_000.0, 11_000.0),
};

/// Ranges for records invented by the simulated PDF ingestor.
pub(crate) const PDF_SYNTH_RANGES: ConsumptionRanges = ConsumptionRanges {
    electricity: (5_000.0, 85_000.0),
    gas: (1_000.0, 16_000.0),
    water: (300.0, 4_300.0),
    fuel: (500.0, 8_500.0),
};

impl ConsumptionRanges {
    /// Draw one profile; field order is electricity, gas, water, fuel.
    pub fn draw(&self, ctx: &mut IngestContext) -> Consumption {
        Consumption {
            electricity: ctx.rng.gen_range(self.electricity.0..self.electricity.1),
            gas: ctx.rng.gen_range(self.gas.0..self.gas.1),
            water: ctx.rng.gen_range(self.water.0..self.water.1),
            fuel: ctx.rng.gen_range(self.fuel.0..self.fuel.1),
        }
    }
}

/// Fail unless the active policy permits fabrication.
pub(crate) fn require_synthesis(ctx: &IngestContext, context: &str) -> Result<()> {
    match ctx.options.synthesis {
        SynthesisPolicy::Allow => Ok(()),
        SynthesisPolicy::Deny => Err(CarbontallyError::SynthesisDisabled {
            context: context.to_string(),
        }),
    }
}

/// Fabricate `count` whole records with the given ranges.
///
/// Names and addresses are numbered placeholders; ids follow the usual
/// `<file name>-<index>` form.
pub(crate) fn synthesize_locations(
    file_name: &str,
    name_prefix: &str,
    address_prefix: &str,
    count: usize,
    ranges: &ConsumptionRanges,
    ctx: &mut IngestContext,
) -> Result<Vec<Location>> {
    let mut locations = Vec::with_capacity(count);
    for index in 0..count {
        let consumption = ranges.draw(ctx);
        let location = DraftLocation {
            id: format!("{}-{}", file_name, index),
            name: format!("{} {}", name_prefix, index + 1),
            address: format!("{} {}", address_prefix, index + 1),
            coordinates: None,
            consumption,
            period: Period::default(),
            origin: DataOrigin::Synthesized,
        }
        .finish(ctx)?;
        locations.push(location);
    }
    Ok(locations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{IngestOptions, PdfDelay};

    fn ctx() -> IngestContext {
        IngestContext::seeded(
            11,
            IngestOptions {
                synthesis: SynthesisPolicy::Allow,
                pdf_delay: PdfDelay::Disabled,
            },
        )
    }

    #[test]
    fn test_draws_stay_inside_ranges() {
        let mut ctx = ctx();
        for _ in 0..200 {
            let consumption = XML_SYNTH_RANGES.draw(&mut ctx);
            assert!((10_000.0..110_000.0).contains(&consumption.electricity));
            assert!((2_000.0..22_000.0).contains(&consumption.gas));
            assert!((500.0..5_500.0).contains(&consumption.water));
            assert!((1_000.0..11_000.0).contains(&consumption.fuel));
        }
    }

    #[test]
    fn test_synthesized_records_are_labeled_and_numbered() {
        let mut ctx = ctx();
        let locations =
            synthesize_locations("report.xml", "Location", "Address", 4, &XML_SYNTH_RANGES, &mut ctx)
                .unwrap();

        assert_eq!(locations.len(), 4);
        assert_eq!(locations[0].id, "report.xml-0");
        assert_eq!(locations[0].name, "Location 1");
        assert_eq!(locations[3].address, "Address 4");
        assert!(locations.iter().all(|l| l.origin == DataOrigin::Synthesized));
        assert!(locations.iter().all(|l| l.coordinates.is_none()));
    }

    #[test]
    fn test_require_synthesis_fails_under_deny() {
        let ctx = IngestContext::seeded(
            1,
            IngestOptions {
                synthesis: SynthesisPolicy::Deny,
                pdf_delay: PdfDelay::Disabled,
            },
        );
        let err = require_synthesis(&ctx, "a missing record").unwrap_err();
        assert!(err.to_string().contains("synthesis is disabled"));
    }
}
