//! XML ingestor for facility energy reports.
//!
//! The document is parsed leniently: any well-formed XML is accepted, and
//! each field of a location entry is resolved through an ordered list of
//! strategies (structured element, flat lower-case element, fallback).
//! Documents without a `Locations/Location` path at all are answered with
//! wholly fabricated records instead.

use async_trait::async_trait;
use chrono::NaiveDate;
use rand::Rng;
use serde::Deserialize;

use crate::error::{CarbontallyError, Result};
use crate::ingest::{synth, DraftLocation, FileSource, IngestContext, Ingestor};
use crate::models::{
    Consumption, Coordinates, DataOrigin, FileKind, Location, Period, ProcessedFile,
    ReportMetadata,
};

/// XML ingestor.
#[derive(Debug)]
pub struct XmlIngestor;

#[async_trait]
impl Ingestor for XmlIngestor {
    async fn ingest(&self, source: &FileSource, ctx: &mut IngestContext) -> Result<ProcessedFile> {
        let text = std::str::from_utf8(&source.bytes).map_err(|_| CarbontallyError::Parse {
            format: "XML".to_string(),
            message: "file is not valid UTF-8 text".to_string(),
        })?;

        let document: RawDocument =
            quick_xml::de::from_str(text).map_err(|e| CarbontallyError::Parse {
                format: "XML".to_string(),
                message: e.to_string(),
            })?;

        let entries = document.locations.map(|l| l.entries).unwrap_or_default();

        let locations = if entries.is_empty() {
            synth::require_synthesis(ctx, "document without location entries")?;
            let count = ctx.rng.gen_range(5..25);
            tracing::warn!(
                file = %source.name,
                count,
                "no location entries found; fabricating records"
            );
            synth::synthesize_locations(
                &source.name,
                "Location",
                "Address",
                count,
                &synth::XML_SYNTH_RANGES,
                ctx,
            )?
        } else {
            let mut locations = Vec::with_capacity(entries.len());
            for (index, entry) in entries.iter().enumerate() {
                locations.push(self.extract_location(&source.name, index, entry, ctx)?);
            }
            locations
        };

        let metadata = ReportMetadata {
            period: "2024".to_string(),
            source: "XML Energy Data".to_string(),
            version: Some(
                document
                    .version
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| "1.0".to_string()),
            ),
        };

        Ok(ProcessedFile::new(
            source.name.clone(),
            FileKind::Xml,
            locations,
            metadata,
        ))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["xml"]
    }

    fn format_name(&self) -> &str {
        "XML"
    }
}

impl XmlIngestor {
    /// Resolve one location entry into a derived record.
    fn extract_location(
        &self,
        file_name: &str,
        index: usize,
        entry: &RawLocation,
        ctx: &mut IngestContext,
    ) -> Result<Location> {
        let node = entry.consumption.as_ref();
        let mut drawn = false;

        let electricity = resolve_number(
            node.and_then(|c| c.electricity.as_deref()),
            entry.electricity.as_deref(),
            "electricity",
            100_000.0,
            &mut drawn,
            ctx,
        )?;
        let gas = resolve_number(
            node.and_then(|c| c.gas.as_deref()),
            entry.gas.as_deref(),
            "gas",
            20_000.0,
            &mut drawn,
            ctx,
        )?;
        let water = resolve_number(
            node.and_then(|c| c.water.as_deref()),
            entry.water.as_deref(),
            "water",
            5_000.0,
            &mut drawn,
            ctx,
        )?;
        let fuel = resolve_number(
            node.and_then(|c| c.fuel.as_deref()),
            entry.fuel.as_deref(),
            "fuel",
            10_000.0,
            &mut drawn,
            ctx,
        )?;

        let consumption = Consumption {
            electricity,
            gas,
            water,
            fuel,
        };

        let name = resolve_text(
            entry.name.as_deref(),
            entry.name_flat.as_deref(),
            || format!("Location {}", index + 1),
        );
        let address = resolve_text(
            entry.address.as_deref(),
            entry.address_flat.as_deref(),
            || format!("Address {}", index + 1),
        );

        let default_period = Period::default();
        let period = Period {
            start: resolve_date(
                entry.period.as_ref().and_then(|p| p.start.as_deref()),
                entry.period_flat.as_ref().and_then(|p| p.start.as_deref()),
                default_period.start,
                "period start",
            ),
            end: resolve_date(
                entry.period.as_ref().and_then(|p| p.end.as_deref()),
                entry.period_flat.as_ref().and_then(|p| p.end.as_deref()),
                default_period.end,
                "period end",
            ),
        };

        let origin = if drawn {
            DataOrigin::PartiallySynthesized
        } else {
            DataOrigin::Extracted
        };

        DraftLocation {
            id: format!("{}-{}", file_name, index),
            name,
            address,
            coordinates: resolve_coordinates(entry.coordinates.as_ref()),
            consumption,
            period,
            origin,
        }
        .finish(ctx)
    }
}

/// First strategy that carries non-blank text.
fn first_present<'a>(structured: Option<&'a str>, flat: Option<&'a str>) -> Option<&'a str> {
    [structured, flat]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|t| !t.is_empty())
}

/// Resolve a consumption field: structured element, flat element, then a
/// drawn value in `[0, fallback_high)`.
fn resolve_number(
    structured: Option<&str>,
    flat: Option<&str>,
    field: &str,
    fallback_high: f64,
    drawn: &mut bool,
    ctx: &mut IngestContext,
) -> Result<f64> {
    if let Some(text) = first_present(structured, flat) {
        return text.parse::<f64>().map_err(|_| CarbontallyError::Validation {
            field: field.to_string(),
            reason: format!("not a number: '{}'", text),
        });
    }

    synth::require_synthesis(ctx, &format!("missing consumption field '{}'", field))?;
    tracing::warn!(field, "consumption field missing; drawing a replacement value");
    *drawn = true;
    Ok(ctx.rng.gen_range(0.0..fallback_high))
}

/// Resolve a display field: structured element, flat element, then a
/// numbered placeholder.
fn resolve_text(
    structured: Option<&str>,
    flat: Option<&str>,
    default: impl FnOnce() -> String,
) -> String {
    first_present(structured, flat)
        .map(str::to_string)
        .unwrap_or_else(default)
}

/// Resolve a period bound; unparsable dates fall back to the default.
fn resolve_date(
    structured: Option<&str>,
    flat: Option<&str>,
    default: NaiveDate,
    field: &str,
) -> NaiveDate {
    match first_present(structured, flat) {
        Some(text) => match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                tracing::warn!(field, value = text, "unparsable date; using the default period");
                default
            }
        },
        None => default,
    }
}

/// Coordinates are kept only when both components parse as finite numbers.
fn resolve_coordinates(raw: Option<&RawCoordinates>) -> Option<Coordinates> {
    let raw = raw?;
    let lat = parse_finite(first_present(raw.lat.as_deref(), raw.lat_upper.as_deref()));
    let lng = parse_finite(first_present(raw.lng.as_deref(), raw.lng_upper.as_deref()));
    match (lat, lng) {
        (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
        _ => {
            tracing::warn!("coordinates present but unparsable; omitting them");
            None
        }
    }
}

fn parse_finite(text: Option<&str>) -> Option<f64> {
    text.and_then(|t| t.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Raw document tree as deserialized, before field resolution. The root
/// element name is not checked; only the `Locations/Location` path counts.
#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(rename = "@version")]
    version: Option<String>,
    #[serde(rename = "Locations")]
    locations: Option<RawLocations>,
}

#[derive(Debug, Deserialize)]
struct RawLocations {
    #[serde(rename = "Location", default)]
    entries: Vec<RawLocation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLocation {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "name")]
    name_flat: Option<String>,
    #[serde(rename = "Address")]
    address: Option<String>,
    #[serde(rename = "address")]
    address_flat: Option<String>,
    #[serde(rename = "Consumption")]
    consumption: Option<RawConsumption>,
    electricity: Option<String>,
    gas: Option<String>,
    water: Option<String>,
    fuel: Option<String>,
    #[serde(rename = "Coordinates")]
    coordinates: Option<RawCoordinates>,
    #[serde(rename = "Period")]
    period: Option<RawPeriod>,
    #[serde(rename = "period")]
    period_flat: Option<RawPeriodFlat>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConsumption {
    #[serde(rename = "Electricity")]
    electricity: Option<String>,
    #[serde(rename = "Gas")]
    gas: Option<String>,
    #[serde(rename = "Water")]
    water: Option<String>,
    #[serde(rename = "Fuel")]
    fuel: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCoordinates {
    lat: Option<String>,
    #[serde(rename = "Lat")]
    lat_upper: Option<String>,
    lng: Option<String>,
    #[serde(rename = "Lng")]
    lng_upper: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPeriod {
    #[serde(rename = "Start")]
    start: Option<String>,
    #[serde(rename = "End")]
    end: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPeriodFlat {
    start: Option<String>,
    end: Option<String>,
}
