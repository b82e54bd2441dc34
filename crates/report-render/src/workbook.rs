//! Workbook assembly: sheet planning, naming, rendering and save.
//!
//! One run renders, in order: a combined sheet when more than one site is
//! selected, one sheet per selected site that has rows, and (when floors
//! are aggregated with per-building tabs) one sheet per distinct building
//! across the selection. Every sheet shares the same day-column grid.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use report_core::error::{ReportError, Result};
use report_core::models::{ReportOptions, SessionRecord, SessionRow};
use report_data::aggregator::day_columns;
use report_data::transform::{filter_by_date, normalize_records};
use rust_xlsxwriter::Workbook;
use tracing::{debug, info};

use crate::sheet::render_sheet;
use crate::styles::SheetStyles;

/// Excel's hard limit on worksheet name length.
const SHEET_NAME_MAX: usize = 31;

// ── Sheet naming ──────────────────────────────────────────────────────────────

/// Assigns workbook-unique sheet names within the 31-character limit.
///
/// Names that collide after truncation get a ` (2)`, ` (3)`… suffix fitted
/// inside the limit.
#[derive(Debug, Default)]
pub struct SheetNamer {
    used: HashSet<String>,
}

impl SheetNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve and return the workbook-unique name for `raw`.
    pub fn assign(&mut self, raw: &str) -> String {
        let base = truncate_chars(raw, SHEET_NAME_MAX);
        if self.used.insert(base.clone()) {
            return base;
        }

        for counter in 2usize.. {
            let suffix = format!(" ({counter})");
            let stem = truncate_chars(&base, SHEET_NAME_MAX - suffix.chars().count());
            let candidate = format!("{stem}{suffix}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
        unreachable!("suffix counter exhausted");
    }
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

// ── Sheet planning ────────────────────────────────────────────────────────────

/// One sheet to be rendered: its final name, its row subset, and whether
/// floor rows collapse into buildings.
#[derive(Debug)]
pub struct SheetPlan<'a> {
    pub name: String,
    pub rows: Vec<&'a SessionRow>,
    pub aggregate_floors: bool,
}

/// Compute the ordered sheet list for one run.
///
/// The combined sheet is included (even when empty) whenever more than one
/// site is selected; per-site sheets are skipped when the site has no
/// rows; building sheets cover the distinct buildings present across the
/// selection, ascending, and always aggregate floors.
pub fn plan_sheets<'a>(rows: &'a [SessionRow], options: &ReportOptions) -> Vec<SheetPlan<'a>> {
    let mut namer = SheetNamer::new();
    let mut plans: Vec<SheetPlan<'a>> = Vec::new();

    let selected: Vec<&SessionRow> = rows
        .iter()
        .filter(|r| options.selected_sites.iter().any(|s| *s == r.location))
        .collect();

    if options.selected_sites.len() > 1 {
        plans.push(SheetPlan {
            name: namer.assign("Report"),
            rows: selected.clone(),
            aggregate_floors: options.aggregate_floors,
        });
    }

    for site in &options.selected_sites {
        let site_rows: Vec<&SessionRow> = selected
            .iter()
            .copied()
            .filter(|r| r.location == *site)
            .collect();
        if site_rows.is_empty() {
            debug!("Skipping sheet for site {site:?}: no matching rows");
            continue;
        }
        plans.push(SheetPlan {
            name: namer.assign(site),
            rows: site_rows,
            aggregate_floors: options.aggregate_floors,
        });
    }

    if options.aggregate_floors && options.tab_per_building {
        let buildings: BTreeSet<&str> = selected.iter().map(|r| r.building.as_str()).collect();
        for building in buildings {
            let building_rows: Vec<&SessionRow> = selected
                .iter()
                .copied()
                .filter(|r| r.building == building)
                .collect();
            plans.push(SheetPlan {
                name: namer.assign(&format!("Bldg - {building}")),
                rows: building_rows,
                aggregate_floors: true,
            });
        }
    }

    plans
}

// ── Report build ──────────────────────────────────────────────────────────────

/// Build the full report workbook and save it to `output`.
///
/// Normalizes every record (hard failure on any unparseable timestamp),
/// applies the inclusive date filter, derives the shared day columns, then
/// renders the planned sheets. Fails with [`ReportError::EmptySelection`]
/// when no sheet would be produced at all.
pub fn build_report(
    records: &[SessionRecord],
    options: &ReportOptions,
    output: &Path,
) -> Result<()> {
    let rows = normalize_records(records)?;
    let rows = filter_by_date(rows, options.date_from, options.date_to);
    let days = day_columns(&rows);
    info!(
        "Building report: {} rows in range, {} day columns",
        rows.len(),
        days.len()
    );

    let plans = plan_sheets(&rows, options);
    if plans.is_empty() {
        return Err(ReportError::EmptySelection);
    }

    let mut workbook = Workbook::new();
    let styles = SheetStyles::new();

    for plan in &plans {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&plan.name)?;
        render_sheet(
            worksheet,
            &plan.name,
            &plan.rows,
            &days,
            plan.aggregate_floors,
            &styles,
        )?;
        debug!("Rendered sheet {:?} ({} sessions)", plan.name, plan.rows.len());
    }

    workbook.save(output)?;
    info!("Wrote {} sheets to {}", plans.len(), output.display());
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use report_data::aggregator::{group_by, Tally};
    use tempfile::TempDir;

    fn record(location: &str, sublocation: &str, ssid: &str, mac: &str, end: &str) -> SessionRecord {
        SessionRecord {
            location: location.to_string(),
            sublocation: sublocation.to_string(),
            ssid: ssid.to_string(),
            client_mac: mac.to_string(),
            start_time: "2024-01-01 08:00:00".to_string(),
            end_time: end.to_string(),
            ..SessionRecord::default()
        }
    }

    fn options(sites: &[&str]) -> ReportOptions {
        ReportOptions {
            selected_sites: sites.iter().map(|s| s.to_string()).collect(),
            ..ReportOptions::default()
        }
    }

    // ── SheetNamer ────────────────────────────────────────────────────────────

    #[test]
    fn test_namer_passes_short_names_through() {
        let mut namer = SheetNamer::new();
        assert_eq!(namer.assign("Site A"), "Site A");
    }

    #[test]
    fn test_namer_truncates_to_31_chars() {
        let mut namer = SheetNamer::new();
        let name = namer.assign("Bldg - Extremely Long Building Name Annex");
        assert_eq!(name.chars().count(), 31);
        assert!(name.starts_with("Bldg - Extremely Long Building"));
    }

    #[test]
    fn test_namer_disambiguates_collisions() {
        let mut namer = SheetNamer::new();
        let long = "Bldg - Extremely Long Building Name Annex";
        let first = namer.assign(long);
        let second = namer.assign(long);
        assert_ne!(first, second);
        assert!(second.ends_with(" (2)"));
        assert!(second.chars().count() <= 31);
    }

    // ── plan_sheets ───────────────────────────────────────────────────────────

    fn rows(records: &[SessionRecord]) -> Vec<SessionRow> {
        normalize_records(records).unwrap()
    }

    #[test]
    fn test_plan_single_site() {
        let all = rows(&[record("Site A", "HQ|1", "Guest", "aa", "2024-01-01 09:00:00")]);
        let plans = plan_sheets(&all, &options(&["Site A"]));

        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].name, "Site A");
    }

    #[test]
    fn test_plan_combined_sheet_for_multiple_sites() {
        let all = rows(&[
            record("Site A", "HQ|1", "Guest", "aa", "2024-01-01 09:00:00"),
            record("Site B", "HQ|1", "Guest", "bb", "2024-01-01 09:00:00"),
        ]);
        let plans = plan_sheets(&all, &options(&["Site A", "Site B"]));

        let names: Vec<&str> = plans.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Report", "Site A", "Site B"]);
        assert_eq!(plans[0].rows.len(), 2);
    }

    #[test]
    fn test_plan_skips_empty_site_but_not_run() {
        let all = rows(&[record("Site A", "HQ|1", "Guest", "aa", "2024-01-01 09:00:00")]);
        let plans = plan_sheets(&all, &options(&["Site A", "Ghost Town"]));

        let names: Vec<&str> = plans.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Report", "Site A"]);
    }

    #[test]
    fn test_plan_combined_sheet_kept_even_when_empty() {
        let all = rows(&[record("Elsewhere", "HQ|1", "Guest", "aa", "2024-01-01 09:00:00")]);
        let plans = plan_sheets(&all, &options(&["Site A", "Site B"]));

        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].name, "Report");
        assert!(plans[0].rows.is_empty());
    }

    #[test]
    fn test_plan_building_tabs_sorted() {
        let all = rows(&[
            record("Site A", "West|1", "Guest", "aa", "2024-01-01 09:00:00"),
            record("Site A", "East|1", "Guest", "bb", "2024-01-01 09:00:00"),
        ]);
        let opts = ReportOptions {
            selected_sites: vec!["Site A".to_string()],
            aggregate_floors: true,
            tab_per_building: true,
            ..ReportOptions::default()
        };
        let plans = plan_sheets(&all, &opts);

        let names: Vec<&str> = plans.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Site A", "Bldg - East", "Bldg - West"]);
        assert!(plans[1].aggregate_floors);
    }

    #[test]
    fn test_plan_no_building_tabs_without_aggregate_floors() {
        let all = rows(&[record("Site A", "West|1", "Guest", "aa", "2024-01-01 09:00:00")]);
        let opts = ReportOptions {
            selected_sites: vec!["Site A".to_string()],
            aggregate_floors: false,
            tab_per_building: false,
            ..ReportOptions::default()
        };
        assert_eq!(plan_sheets(&all, &opts).len(), 1);
    }

    // ── End-to-end scenario ───────────────────────────────────────────────────

    #[test]
    fn test_two_record_scenario_counts() {
        let records = vec![
            record("Site A", "Bldg1|F1", "Guest", "AA:BB", "2024-01-01 08:30:00"),
            record("Site A", "Bldg1|F2", "Guest", "CC:DD", "2024-01-01 09:15:00"),
        ];
        let all = rows(&records);
        let days = day_columns(&all);
        assert_eq!(days.len(), 1);

        let plans = plan_sheets(&all, &options(&["Site A"]));
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].name, "Site A");

        let sheet_rows = &plans[0].rows;
        let locations = group_by(sheet_rows, |r| r.location.as_str());
        assert_eq!(locations.len(), 1);
        assert_eq!(Tally::of(locations[0].rows.iter().copied()).sessions, 2);
        assert_eq!(Tally::of(locations[0].rows.iter().copied()).users, 2);

        let ssids = group_by(&locations[0].rows, |r| r.ssid.as_str());
        assert_eq!(ssids.len(), 1);
        assert_eq!(ssids[0].label, "Guest");
        assert_eq!(Tally::of(ssids[0].rows.iter().copied()).sessions, 2);

        let sublocations = group_by(&locations[0].rows, |r| r.sublocation.as_str());
        assert_eq!(sublocations.len(), 2);
        for group in &sublocations {
            let tally = Tally::of(group.rows.iter().copied());
            assert_eq!(tally.sessions, 1);
            assert_eq!(tally.users, 1);
        }
    }

    // ── build_report ──────────────────────────────────────────────────────────

    #[test]
    fn test_build_report_writes_workbook() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("report.xlsx");
        let records = vec![
            record("Site A", "Bldg1|F1", "Guest", "AA:BB", "2024-01-01 08:30:00"),
            record("Site A", "Bldg1|F2", "Guest", "CC:DD", "2024-01-01 09:15:00"),
        ];

        build_report(&records, &options(&["Site A"]), &output).unwrap();

        let metadata = std::fs::metadata(&output).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_build_report_bad_timestamp_aborts() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("report.xlsx");
        let records = vec![record("Site A", "HQ|1", "Guest", "aa", "eventually")];

        let err = build_report(&records, &options(&["Site A"]), &output).unwrap_err();
        assert_eq!(err.to_string(), "Invalid date format: eventually");
        assert!(!output.exists());
    }

    #[test]
    fn test_build_report_empty_selection_errors() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("report.xlsx");
        let records = vec![record("Site A", "HQ|1", "Guest", "aa", "2024-01-01 09:00:00")];

        let err = build_report(&records, &options(&["Nowhere"]), &output).unwrap_err();
        assert!(matches!(err, ReportError::EmptySelection));
        assert!(!output.exists());
    }

    #[test]
    fn test_build_report_date_range_scopes_sheets() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("report.xlsx");
        let records = vec![
            record("Site A", "HQ|1", "Guest", "aa", "2024-01-01 09:00:00"),
            record("Site A", "HQ|1", "Guest", "bb", "2024-02-01 09:00:00"),
        ];
        let opts = ReportOptions {
            selected_sites: vec!["Site A".to_string()],
            date_from: Some(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            date_to: Some(chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
            ..ReportOptions::default()
        };

        build_report(&records, &opts, &output).unwrap();
        assert!(output.exists());
    }
}
