//! Record normalization and date-range filtering.
//!
//! The first stage of a report build: parse every raw record's timestamps
//! into a typed [`SessionRow`] and drop rows outside the requested range.

use chrono::NaiveDate;
use report_core::error::Result;
use report_core::models::{SessionRecord, SessionRow};
use tracing::debug;

/// Normalize every record into a [`SessionRow`].
///
/// Strict: a single unparseable timestamp aborts the whole transform.
/// Aggregate correctness depends on every row being comparable, so there
/// is no row-level tolerance here, unlike the date-bounds scan.
pub fn normalize_records(records: &[SessionRecord]) -> Result<Vec<SessionRow>> {
    records.iter().map(SessionRow::from_record).collect()
}

/// Keep rows whose `session_date` falls inside the inclusive range.
///
/// An omitted bound leaves that side unbounded.
pub fn filter_by_date(
    rows: Vec<SessionRow>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<SessionRow> {
    let before = rows.len();
    let kept: Vec<SessionRow> = rows
        .into_iter()
        .filter(|row| from.map_or(true, |d| row.session_date >= d))
        .filter(|row| to.map_or(true, |d| row.session_date <= d))
        .collect();

    debug!("Date filter kept {} of {} rows", kept.len(), before);
    kept
}
