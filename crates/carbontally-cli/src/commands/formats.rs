//! Formats command implementation

use crate::output::OutputWriter;
use crate::output_types::{FormatInfo, FormatsOutput};
use anyhow::Result;
use carbontally_core::ingest::IngestorRegistry;
use tabled::Tabled;

#[derive(Tabled)]
struct FormatRow {
    #[tabled(rename = "Format")]
    name: String,
    #[tabled(rename = "Extensions")]
    extensions: String,
}

pub fn execute(output: &OutputWriter) -> Result<()> {
    let registry = IngestorRegistry::with_defaults();

    let formats: Vec<FormatInfo> = registry
        .ingestors()
        .iter()
        .map(|ingestor| FormatInfo {
            name: ingestor.format_name().to_string(),
            extensions: ingestor
                .supported_extensions()
                .iter()
                .map(|e| e.to_string())
                .collect(),
        })
        .collect();

    if output.is_json() {
        output.result(FormatsOutput { formats })?;
    } else {
        let rows: Vec<FormatRow> = formats
            .into_iter()
            .map(|format| FormatRow {
                name: format.name,
                extensions: format
                    .extensions
                    .iter()
                    .map(|e| format!(".{}", e))
                    .collect::<Vec<_>>()
                    .join(", "),
            })
            .collect();
        output.table(rows);
    }

    Ok(())
}
