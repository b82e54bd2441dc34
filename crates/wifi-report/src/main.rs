mod bootstrap;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use report_core::error::ReportError;
use report_core::models::{ReportOptions, SessionRecord};
use report_core::settings::Settings;
use report_core::time_utils::end_time_bounds;
use report_data::reader;
use report_render::workbook::build_report;
use serde::Serialize;
use tracing::info;

fn main() -> Result<()> {
    let settings = Settings::parse();
    bootstrap::setup_logging(&settings.log_level)?;

    info!("WiFi client report generator v{}", env!("CARGO_PKG_VERSION"));

    let records = reader::ingest(&settings.inputs)?;
    if records.is_empty() {
        return Err(ReportError::NoRecords.into());
    }
    info!(
        "Loaded {} session records from {} input(s)",
        records.len(),
        settings.inputs.len()
    );

    if settings.list_sites {
        return print_load_summary(&records, settings.json);
    }

    if settings.sites.is_empty() {
        return Err(ReportError::NoSites.into());
    }
    let output = settings
        .output
        .as_deref()
        .context("--output is required when generating a report")?;

    let options = ReportOptions {
        selected_sites: settings.sites.clone(),
        date_from: settings.date_from,
        date_to: settings.date_to,
        aggregate_floors: settings.aggregate_floors,
        tab_per_building: settings.tab_per_building,
    };
    build_report(&records, &options, output)?;

    info!("Report saved to {}", output.display());
    Ok(())
}

// ── Load summary (--list-sites) ────────────────────────────────────────────────

/// What the desktop form showed after "load": the distinct sites and the
/// date bounds used to seed the range pickers.
#[derive(Debug, Serialize)]
struct LoadSummary {
    records: usize,
    sites: Vec<String>,
    first_date: NaiveDate,
    last_date: NaiveDate,
}

impl LoadSummary {
    fn from_records(records: &[SessionRecord]) -> Result<Self> {
        let (min, max) = end_time_bounds(records).ok_or(ReportError::NoValidDates)?;

        let mut sites: Vec<String> = records
            .iter()
            .map(|r| r.location.clone())
            .filter(|s| !s.is_empty())
            .collect();
        sites.sort();
        sites.dedup();

        Ok(Self {
            records: records.len(),
            sites,
            first_date: min.date(),
            last_date: max.date(),
        })
    }
}

fn print_load_summary(records: &[SessionRecord], as_json: bool) -> Result<()> {
    let summary = LoadSummary::from_records(records)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Records: {}", summary.records);
    println!("Date range: {} .. {}", summary.first_date, summary.last_date);
    println!("Sites ({}):", summary.sites.len());
    for site in &summary.sites {
        println!("  {site}");
    }
    Ok(())
}
