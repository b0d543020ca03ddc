//! Integration tests for the XML ingestion pipeline

use carbontally_core::factors::round2;
use carbontally_core::ingest::{
    FileSource, IngestContext, IngestOptions, IngestorRegistry, SynthesisPolicy,
};
use carbontally_core::models::{DataOrigin, FacilityType, FileKind};
use carbontally_core::CarbontallyError;
use std::fs;
use tempfile::TempDir;

fn seeded_ctx() -> IngestContext {
    IngestContext::seeded(17, IngestOptions::default())
}

#[tokio::test]
async fn test_xml_complete_workflow() {
    let registry = IngestorRegistry::with_defaults();

    // Write the report to disk and load it back, as the CLI does.
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("sites.xml");

    let xml_content = r#"<?xml version="1.0" encoding="UTF-8"?>
<EnergyData version="3.2">
  <Locations>
    <Location>
      <Name>Main Plant</Name>
      <Address>1 Foundry Way</Address>
      <Consumption>
        <Electricity>100000</Electricity>
        <Gas>20000</Gas>
        <Water>0</Water>
        <Fuel>0</Fuel>
      </Consumption>
    </Location>
    <Location>
      <Name>City Office</Name>
      <Consumption>
        <Electricity>12000</Electricity>
        <Gas>3000</Gas>
        <Water>400</Water>
        <Fuel>0</Fuel>
      </Consumption>
    </Location>
    <Location>
      <Name>Truck Yard</Name>
      <Consumption>
        <Electricity>900</Electricity>
        <Gas>0</Gas>
        <Water>0</Water>
        <Fuel>12000</Fuel>
      </Consumption>
    </Location>
  </Locations>
</EnergyData>"#;

    fs::write(&file_path, xml_content).unwrap();
    let source = FileSource::from_path(&file_path).unwrap();

    let mut ctx = seeded_ctx();
    let result = registry.process_file(&source, &mut ctx).await.unwrap();

    // Report shape
    assert_eq!(result.kind, FileKind::Xml);
    assert_eq!(result.file_name, "sites.xml");
    assert!(result.id.starts_with("processed-"));
    assert_eq!(result.metadata.source, "XML Energy Data");
    assert_eq!(result.metadata.version.as_deref(), Some("3.2"));
    assert_eq!(result.location_count(), 3);

    // Per-location derivation
    let plant = &result.locations[0];
    assert_eq!(plant.id, "sites.xml-0");
    assert_eq!(plant.emissions, 60.1);
    assert_eq!(plant.facility_type, FacilityType::Factory);
    assert_eq!(plant.origin, DataOrigin::Extracted);
    assert!(plant.trend.is_some());

    let office = &result.locations[1];
    assert_eq!(office.facility_type, FacilityType::Office);

    let yard = &result.locations[2];
    assert_eq!(yard.facility_type, FacilityType::Distribution);

    // The report total is the rounded sum of stored per-location figures.
    let expected: f64 = result.locations.iter().map(|l| l.emissions).sum();
    assert_eq!(result.total_emissions, round2(expected));
}

#[tokio::test]
async fn test_xml_field_fallback_chain() {
    let registry = IngestorRegistry::with_defaults();

    let xml_content = r#"<EnergyData>
  <Locations>
    <Location>
      <Consumption><Electricity>70000</Electricity></Consumption>
      <electricity>123</electricity>
      <gas>4000</gas>
      <water>200</water>
    </Location>
  </Locations>
</EnergyData>"#;

    let source = FileSource::new("mixed.xml", xml_content.as_bytes().to_vec());
    let mut ctx = seeded_ctx();
    let result = registry.process_file(&source, &mut ctx).await.unwrap();

    let location = &result.locations[0];

    // Structured electricity shadows the flat element, gas and water come
    // from flat elements, and the absent fuel is drawn.
    assert_eq!(location.consumption.electricity, 70_000.0);
    assert_eq!(location.consumption.gas, 4_000.0);
    assert_eq!(location.consumption.water, 200.0);
    assert!((0.0..10_000.0).contains(&location.consumption.fuel));
    assert_eq!(location.origin, DataOrigin::PartiallySynthesized);

    // Missing name and address get numbered placeholders.
    assert_eq!(location.name, "Location 1");
    assert_eq!(location.address, "Address 1");
}

#[tokio::test]
async fn test_xml_without_locations_synthesizes_batch() {
    let registry = IngestorRegistry::with_defaults();
    let source = FileSource::new("empty.xml", b"<EnergyData/>".to_vec());

    let mut ctx = seeded_ctx();
    let result = registry.process_file(&source, &mut ctx).await.unwrap();

    assert!((5..25).contains(&result.locations.len()));
    for location in &result.locations {
        assert_eq!(location.origin, DataOrigin::Synthesized);
        assert!((10_000.0..110_000.0).contains(&location.consumption.electricity));
        assert!((2_000.0..22_000.0).contains(&location.consumption.gas));
        assert!((500.0..5_500.0).contains(&location.consumption.water));
        assert!((1_000.0..11_000.0).contains(&location.consumption.fuel));
        assert_eq!(location.emissions, round2(location.emissions));
    }
}

#[tokio::test]
async fn test_registry_rejects_unknown_extensions() {
    let registry = IngestorRegistry::with_defaults();
    let source = FileSource::new("data.csv", b"a,b,c".to_vec());

    let mut ctx = seeded_ctx();
    let result = registry.process_file(&source, &mut ctx).await;

    match result {
        Err(CarbontallyError::UnsupportedFormat { extension }) => {
            assert_eq!(extension, "csv");
        }
        other => panic!("expected unsupported format, got {:?}", other.map(|r| r.id)),
    }
}

#[tokio::test]
async fn test_strict_mode_rejects_incomplete_documents() {
    let registry = IngestorRegistry::with_defaults();
    let options = IngestOptions {
        synthesis: SynthesisPolicy::Deny,
        ..Default::default()
    };

    let incomplete = FileSource::new(
        "partial.xml",
        br#"<EnergyData><Locations><Location><gas>5</gas></Location></Locations></EnergyData>"#
            .to_vec(),
    );
    let mut ctx = IngestContext::seeded(17, options);
    let result = registry.process_file(&incomplete, &mut ctx).await;
    assert!(matches!(
        result,
        Err(CarbontallyError::SynthesisDisabled { .. })
    ));

    // A fully specified document still passes, with no fabricated trend.
    let complete = FileSource::new(
        "full.xml",
        br#"<EnergyData><Locations><Location>
            <electricity>40000</electricity><gas>1</gas><water>1</water><fuel>1</fuel>
        </Location></Locations></EnergyData>"#
            .to_vec(),
    );
    let mut ctx = IngestContext::seeded(17, options);
    let result = registry.process_file(&complete, &mut ctx).await.unwrap();

    let location = &result.locations[0];
    assert_eq!(location.facility_type, FacilityType::Hub);
    assert!(location.trend.is_none());
    assert!(!location.peak_alert);
}
