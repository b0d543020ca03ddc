//! Process command implementation

use crate::cli::ProcessArgs;
use crate::dry_run::{display_planned_actions, ActionType, PlannedAction};
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::{
    FailedFileInfo, FileReportInfo, ProcessOutput, RejectedFileInfo, SessionTotals,
};
use crate::progress;
use crate::scan;
use anyhow::{Context, Result};
use carbontally_core::config::{CliConfigOverrides, LayeredConfig};
use carbontally_core::ingest::{FileSource, IngestorRegistry, PdfDelay, SynthesisPolicy};
use carbontally_core::models::format_emissions;
use carbontally_core::session::IngestSession;
use carbontally_core::summary;
use carbontally_core::trend::TrendDirection;
use carbontally_core::validation::pre_ingest_validation;
use std::fs;
use std::path::{Path, PathBuf};
use tabled::Tabled;

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Format")]
    format: String,
    #[tabled(rename = "Locations")]
    locations: usize,
    #[tabled(rename = "Emissions")]
    emissions: String,
}

#[derive(Tabled)]
struct LocationRow {
    #[tabled(rename = "Location")]
    name: String,
    #[tabled(rename = "Type")]
    facility_type: String,
    #[tabled(rename = "Emissions (tCO₂)")]
    emissions: f64,
    #[tabled(rename = "Trend")]
    trend: String,
    #[tabled(rename = "Origin")]
    origin: String,
}

#[derive(Tabled)]
struct TypeRow {
    #[tabled(rename = "Facility Type")]
    facility_type: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Total (tCO₂)")]
    total: f64,
    #[tabled(rename = "Average (tCO₂)")]
    average: f64,
}

pub async fn execute(
    args: ProcessArgs,
    output: &OutputWriter,
    dry_run: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path, &args)?;
    let registry = IngestorRegistry::with_defaults();
    let supported = registry.supported_extensions();

    // Expand directories into concrete files
    let mut files: Vec<PathBuf> = Vec::new();
    for path in &args.paths {
        if path.is_dir() {
            let found = scan::scan_directory(path, &registry, args.recursive)?;
            if found.is_empty() {
                output.warning(format!("No supported files in {}", path.display()));
            }
            files.extend(found.into_iter().map(|f| f.path));
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(errors::file_not_found(path).into());
        }
    }

    if files.is_empty() {
        return Err(errors::no_supported_files().into());
    }

    // Intake checks before anything reaches the pipeline
    let max_size_mb = config.max_file_size_mb.value;
    let mut sources: Vec<FileSource> = Vec::new();
    let mut rejected: Vec<RejectedFileInfo> = Vec::new();
    for path in &files {
        let source = FileSource::from_path(path)?;
        let validation = pre_ingest_validation(&source, &supported, max_size_mb);
        for warning in &validation.warnings {
            output.warning(format!("{}: {}", source.name, warning));
        }
        if validation.is_valid() {
            sources.push(source);
        } else {
            let reason = validation.errors.join("; ");
            output.error(format!("{}: {}", source.name, reason));
            rejected.push(RejectedFileInfo {
                file_name: source.name,
                reason,
            });
        }
    }

    if dry_run {
        let actions = plan_actions(&sources, &registry, args.export.as_deref());
        display_planned_actions(output, &actions);
        return Ok(());
    }

    if sources.is_empty() {
        return Err(errors::all_files_rejected().into());
    }

    // One session, so every file draws from the same random stream
    let options = config.ingest_options();
    tracing::debug!(?options, files = sources.len(), "starting ingest session");
    let mut session = match config.seed.value {
        Some(seed) => IngestSession::seeded(seed, options),
        None => IngestSession::new(options),
    };

    let total = sources.len();
    let bar = if output.is_json() {
        None
    } else if total == 1 {
        Some(progress::create_spinner("Processing file..."))
    } else {
        Some(progress::create_progress_bar(total as u64, "Processing files"))
    };

    let mut completed_count = 0usize;
    for source in sources {
        session.add_file(source);
        let outcome = session.process_all().await;
        completed_count += outcome.completed;
        if let Some(bar) = &bar {
            bar.inc(1);
        }
    }

    if let Some(bar) = &bar {
        if completed_count == 0 {
            progress::finish_error(bar, "No files could be processed");
        } else {
            progress::finish_success(
                bar,
                &format!("Processed {} of {} files", completed_count, total),
            );
        }
    }

    // Summaries span every derived location in the session
    let locations: Vec<_> = session.locations().collect();
    let by_category = summary::emissions_by_category(locations.iter().copied());
    let by_type = summary::emissions_by_type(locations.iter().copied());
    let average = summary::average_emissions(locations.iter().copied());
    let peak_alerts = summary::peak_alert_count(locations.iter().copied());
    let session_total = session.total_emissions();

    if completed_count > 0 {
        if let Some(export_path) = &args.export {
            let csv = summary::locations_csv(locations.iter().copied());
            fs::write(export_path, csv).context(format!(
                "Failed to write CSV export: {}",
                export_path.display()
            ))?;
        }
    }

    let failed: Vec<FailedFileInfo> = session
        .entries()
        .iter()
        .filter_map(|entry| {
            entry.error().map(|error| FailedFileInfo {
                file_name: entry.file_name.clone(),
                error: error.to_string(),
            })
        })
        .collect();

    if output.is_json() {
        let files: Vec<FileReportInfo> = session
            .completed()
            .map(|report| FileReportInfo {
                file_name: report.file_name.clone(),
                kind: report.kind,
                location_count: report.location_count(),
                total_emissions: report.total_emissions,
                source: report.metadata.source.clone(),
                version: report.metadata.version.clone(),
                processed_at: report.processed_at,
            })
            .collect();

        let json_output = ProcessOutput {
            files,
            failed,
            rejected,
            locations: locations.iter().map(|l| (*l).clone()).collect(),
            totals: SessionTotals {
                location_count: locations.len(),
                total_emissions: session_total,
                average_emissions: average,
                peak_alerts,
            },
            by_category,
            by_type,
        };
        output.result(json_output)?;
    } else {
        if completed_count > 0 {
            output.success(format!(
                "Processed {} of {} files",
                completed_count, total
            ));
        }

        if !failed.is_empty() {
            output.section("Failed Files");
            for failure in &failed {
                output.error(format!("{} - {}", failure.file_name, failure.error));
            }
        }

        if completed_count > 0 {
            output.section("Reports");
            let rows: Vec<ReportRow> = session
                .completed()
                .map(|report| ReportRow {
                    file: report.file_name.clone(),
                    format: report.kind.to_string(),
                    locations: report.location_count(),
                    emissions: format_emissions(report.total_emissions),
                })
                .collect();
            output.table(rows);

            output.section("Locations");
            let location_rows: Vec<LocationRow> = locations
                .iter()
                .map(|location| {
                    let trend = match &location.trend {
                        Some(trend) => {
                            let arrow = match trend.direction {
                                TrendDirection::Up => "↑",
                                TrendDirection::Down => "↓",
                            };
                            if location.peak_alert {
                                format!("{} {:.1}% ⚠", arrow, trend.percentage)
                            } else {
                                format!("{} {:.1}%", arrow, trend.percentage)
                            }
                        }
                        None => "-".to_string(),
                    };
                    LocationRow {
                        name: location.name.clone(),
                        facility_type: location.facility_type.to_string(),
                        emissions: location.emissions,
                        trend,
                        origin: format!("{:?}", location.origin),
                    }
                })
                .collect();
            output.table(location_rows);

            output.section("Emissions by Category");
            output.kv("Electricity", format!("{} tCO₂", by_category.electricity));
            output.kv("Gas", format!("{} tCO₂", by_category.gas));
            output.kv("Fuel", format!("{} tCO₂", by_category.fuel));
            output.kv("Water", format!("{} tCO₂", by_category.water));

            output.section("Emissions by Facility Type");
            let type_rows: Vec<TypeRow> = by_type
                .iter()
                .map(|breakdown| TypeRow {
                    facility_type: breakdown.facility_type.to_string(),
                    count: breakdown.count,
                    total: breakdown.total_emissions,
                    average: breakdown.average_emissions,
                })
                .collect();
            output.table(type_rows);

            if peak_alerts > 0 {
                output.warning(format!(
                    "{} locations report a consumption spike above 20%",
                    peak_alerts
                ));
            }

            output.section("Session Total");
            output.kv("Locations", locations.len());
            output.kv("Total Emissions", format_emissions(session_total));
            output.kv("Average per Location", format_emissions(average));

            if let Some(export_path) = &args.export {
                output.success(format!(
                    "Exported {} locations to {}",
                    locations.len(),
                    export_path.display()
                ));
            }
        }
    }

    if completed_count == 0 {
        return Err(errors::all_files_failed().into());
    }

    Ok(())
}

/// Resolve the layered configuration for this run
fn load_config(config_path: Option<&Path>, args: &ProcessArgs) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();
    if let Some(path) = config_path {
        config = config.load_from_file(path)?;
    }
    let mut config = config.load_from_env();
    config.update_from_cli(CliConfigOverrides {
        synthesis: args.deny_synthesis.then_some(SynthesisPolicy::Deny),
        pdf_delay: args.no_delay.then_some(PdfDelay::Disabled),
        max_file_size_mb: args.max_file_size_mb,
        seed: args.seed,
    });
    Ok(config)
}

fn plan_actions(
    sources: &[FileSource],
    registry: &IngestorRegistry,
    export: Option<&Path>,
) -> Vec<PlannedAction> {
    let mut actions: Vec<PlannedAction> = sources
        .iter()
        .map(|source| {
            let format = registry
                .detect_format(&source.name)
                .map(|ingestor| ingestor.format_name().to_string())
                .unwrap_or_else(|_| "unknown".to_string());
            PlannedAction::new(ActionType::ProcessFile, format!("Ingest {}", source.name))
                .with_detail(format!("Format: {}", format))
                .with_detail(format!("Size: {} bytes", source.size()))
        })
        .collect();

    if let Some(path) = export {
        actions.push(
            PlannedAction::new(ActionType::WriteFile, "Write CSV export")
                .with_detail(format!("Path: {}", path.display())),
        );
    }

    actions
}
