//! Fixed-grid rendering of one report sheet.
//!
//! Layout: title band, merged sheet label, a sessions/users summary block,
//! static column headers, one banded "Sessions"/"Users" column pair per
//! day, a time-stamps box, and per-location breakdown rows (location
//! summary, then SSIDs, then buildings or sublocations). Every breakdown
//! row is written by the same helper; only the label column and formats
//! differ per level.

use chrono::NaiveDate;
use report_core::models::SessionRow;
use report_core::time_utils::day_label;
use report_data::aggregator::{group_by, Tally};
use rust_xlsxwriter::{Format, Worksheet, XlsxError};

use crate::styles::SheetStyles;

/// Column index of the first day pair; columns 0-4 hold labels, counts and
/// a spacer.
const FIRST_DAY_COL: u16 = 5;

/// Row index of the first location breakdown row.
const FIRST_DATA_ROW: u32 = 8;

const REPORT_TITLE: &str = "WiFi Statistics Summary Report";

/// Render one sheet for `rows` (already scoped to the sheet's subset).
///
/// `days` is the shared day-column list for the whole run; an empty subset
/// still gets the title, label, summary and header chrome, but no
/// time-stamps box and no data rows.
pub fn render_sheet(
    worksheet: &mut Worksheet,
    label: &str,
    rows: &[&SessionRow],
    days: &[NaiveDate],
    aggregate_floors: bool,
    styles: &SheetStyles,
) -> Result<(), XlsxError> {
    worksheet.set_column_width(0, 20.5)?;
    for col in 1..=35u16 {
        worksheet.set_column_width(col, 14.8)?;
    }

    // ── Title and summary ─────────────────────────────────────────────────────
    worksheet.merge_range(0, 0, 0, 4, REPORT_TITLE, &styles.title)?;
    worksheet.merge_range(1, 0, 6, 0, label, &styles.site_label)?;

    let total = Tally::of(rows.iter().copied());
    worksheet.write_string_with_format(3, 2, "Client User Summary", &styles.heading)?;
    worksheet.write_string_with_format(4, 2, "Number of Sessions", &styles.column_title)?;
    worksheet.write_string_with_format(4, 3, "Number of Users", &styles.column_title)?;
    worksheet.write_number(5, 2, total.sessions as f64)?;
    worksheet.write_number(5, 3, total.users as f64)?;

    // ── Static headers ────────────────────────────────────────────────────────
    worksheet.write_string_with_format(7, 0, "Locations", &styles.header)?;
    worksheet.write_string_with_format(7, 1, "SSID", &styles.header)?;
    worksheet.write_string_with_format(7, 2, "Number of Sessions", &styles.header)?;
    worksheet.write_string_with_format(7, 3, "Number of Users", &styles.header)?;
    worksheet.write_string_with_format(7, 4, "", &styles.header)?;

    // ── Day headers and sheet-level day tallies ───────────────────────────────
    for (idx, day) in days.iter().enumerate() {
        let base = day_base_col(idx);
        worksheet.merge_range(5, base, 5, base + 1, &day_label(*day), &styles.day_header)?;
        worksheet.write_string_with_format(6, base, "Sessions", &styles.header_day_sep)?;
        worksheet.write_string_with_format(6, base + 1, "Users", &styles.header)?;

        let tally = Tally::on_day(rows, *day);
        worksheet.write_number_with_format(7, base, tally.sessions as f64, styles.day_sessions(idx))?;
        worksheet.write_number_with_format(7, base + 1, tally.users as f64, styles.day_users(idx))?;

        worksheet.set_column_width(base, 14.8)?;
        worksheet.set_column_width(base + 1, 14.8)?;
    }

    // ── Time-stamps box ───────────────────────────────────────────────────────
    let earliest = rows.iter().map(|r| r.end_time).min();
    let latest = rows.iter().map(|r| r.end_time).max();
    if let (Some(first), Some(last)) = (earliest, latest) {
        let box_col = day_base_col(days.len()) + 2;
        worksheet.write_string_with_format(4, box_col, "Time Stamps from Client Summary", &styles.heading)?;
        worksheet.write_string(5, box_col, "Start time:")?;
        worksheet.write_string(5, box_col + 1, first.format("%Y-%m-%d %H:%M:%S").to_string())?;
        worksheet.write_string(6, box_col, "End time:")?;
        worksheet.write_string(6, box_col + 1, last.format("%Y-%m-%d %H:%M:%S").to_string())?;
    }

    // ── Data rows ─────────────────────────────────────────────────────────────
    let mut row = FIRST_DATA_ROW;

    for location in group_by(rows, |r| r.location.as_str()) {
        write_breakdown_row(
            worksheet,
            row,
            0,
            &format!("    {}", location.label),
            &styles.location_label,
            &styles.location_count,
            &location.rows,
            days,
            styles,
        )?;
        row += 1;

        for ssid in group_by(&location.rows, |r| r.ssid.as_str()) {
            write_breakdown_row(
                worksheet,
                row,
                1,
                &format!("    {}", ssid.label),
                &styles.ssid_label,
                &styles.ssid_count,
                &ssid.rows,
                days,
                styles,
            )?;
            row += 1;
        }

        let subgroup_key: fn(&SessionRow) -> &str = if aggregate_floors {
            |r| r.building.as_str()
        } else {
            |r| r.sublocation.as_str()
        };
        for subgroup in group_by(&location.rows, subgroup_key) {
            write_breakdown_row(
                worksheet,
                row,
                0,
                &format!("        {}", subgroup.label),
                &styles.subgroup_label,
                &styles.subgroup_count,
                &subgroup.rows,
                days,
                styles,
            )?;
            row += 1;
        }
    }

    Ok(())
}

/// First column of the day pair at `day_index`.
fn day_base_col(day_index: usize) -> u16 {
    FIRST_DAY_COL + (day_index as u16) * 2
}

/// Write one breakdown row: label, total sessions/users, and the per-day
/// pairs. Used identically for location, SSID and building/sublocation
/// rows.
#[allow(clippy::too_many_arguments)]
fn write_breakdown_row(
    worksheet: &mut Worksheet,
    row: u32,
    label_col: u16,
    label: &str,
    label_format: &Format,
    count_format: &Format,
    rows: &[&SessionRow],
    days: &[NaiveDate],
    styles: &SheetStyles,
) -> Result<(), XlsxError> {
    worksheet.write_string_with_format(row, label_col, label, label_format)?;

    let tally = Tally::of(rows.iter().copied());
    worksheet.write_number_with_format(row, 2, tally.sessions as f64, count_format)?;
    worksheet.write_number_with_format(row, 3, tally.users as f64, count_format)?;

    for (idx, day) in days.iter().enumerate() {
        let base = day_base_col(idx);
        let day_tally = Tally::on_day(rows, *day);
        worksheet.write_number_with_format(row, base, day_tally.sessions as f64, styles.day_sessions(idx))?;
        worksheet.write_number_with_format(row, base + 1, day_tally.users as f64, styles.day_users(idx))?;
    }

    Ok(())
}
