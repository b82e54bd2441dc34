use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Turn WiFi client-session CSV exports into a formatted Excel summary.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wifi-report",
    about = "Generate formatted Excel summaries from WiFi client-session CSV exports",
    version
)]
pub struct Settings {
    /// CSV or ZIP input; directories are scanned recursively. Repeatable.
    #[arg(long = "input", short = 'i', required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Site (location) to include in the report. Repeatable.
    #[arg(long = "site", short = 's')]
    pub sites: Vec<String>,

    /// Output workbook path (.xlsx).
    #[arg(long, short = 'o', required_unless_present = "list_sites")]
    pub output: Option<PathBuf>,

    /// Inclusive start of the report range (YYYY-MM-DD).
    #[arg(long = "from", value_parser = parse_date)]
    pub date_from: Option<NaiveDate>,

    /// Inclusive end of the report range (YYYY-MM-DD).
    #[arg(long = "to", value_parser = parse_date)]
    pub date_to: Option<NaiveDate>,

    /// Collapse per-floor rows into building totals.
    #[arg(long)]
    pub aggregate_floors: bool,

    /// Emit one extra sheet per building.
    #[arg(long, requires = "aggregate_floors")]
    pub tab_per_building: bool,

    /// List the sites and date bounds found in the inputs, then exit.
    #[arg(long)]
    pub list_sites: bool,

    /// Emit the --list-sites summary as JSON.
    #[arg(long, requires = "list_sites")]
    pub json: bool,

    /// Logging level.
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,
}

/// Parse a `YYYY-MM-DD` CLI date argument.
fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("invalid date `{value}`, expected YYYY-MM-DD"))
}
