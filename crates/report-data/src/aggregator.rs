//! Session/user tallies and ordered grouping over session rows.
//!
//! Every number in the report is one of two statistics applied to some
//! subset of rows: the row count ("Sessions") and the distinct
//! `client_mac` count ("Users"). One grouping function, parameterized by a
//! key extractor, serves every breakdown level.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::NaiveDate;
use report_core::models::SessionRow;

// ── Tally ─────────────────────────────────────────────────────────────────────

/// Session and unique-user counts for one subset of rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Number of rows in the subset.
    pub sessions: usize,
    /// Number of distinct `client_mac` values in the subset.
    pub users: usize,
}

impl Tally {
    /// Count sessions and unique users over `rows`.
    pub fn of<'a>(rows: impl IntoIterator<Item = &'a SessionRow>) -> Self {
        let mut sessions = 0usize;
        let mut macs: HashSet<&str> = HashSet::new();
        for row in rows {
            sessions += 1;
            macs.insert(row.client_mac.as_str());
        }
        Self {
            sessions,
            users: macs.len(),
        }
    }

    /// The tally restricted to rows whose `session_date` equals `day`.
    pub fn on_day(rows: &[&SessionRow], day: NaiveDate) -> Self {
        Self::of(rows.iter().copied().filter(|r| r.session_date == day))
    }
}

// ── Grouping ──────────────────────────────────────────────────────────────────

/// One distinct key value and the rows carrying it.
#[derive(Debug, Clone)]
pub struct Group<'a> {
    pub label: String,
    pub rows: Vec<&'a SessionRow>,
}

/// Group `rows` by `key`, preserving the order in which each distinct key
/// first appears.
///
/// Applied uniformly at every breakdown level of a sheet: locations within
/// the sheet scope, SSIDs within a location, buildings or sublocations
/// within a location.
pub fn group_by<'a, K>(rows: &[&'a SessionRow], key: K) -> Vec<Group<'a>>
where
    K: for<'r> Fn(&'r SessionRow) -> &'r str,
{
    let mut order: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Group<'a>> = Vec::new();

    for &row in rows {
        let label = key(row);
        match order.get(label) {
            Some(&idx) => groups[idx].rows.push(row),
            None => {
                order.insert(label.to_string(), groups.len());
                groups.push(Group {
                    label: label.to_string(),
                    rows: vec![row],
                });
            }
        }
    }

    groups
}

/// The distinct calendar dates present in `rows`, ascending.
///
/// These drive one "Sessions"/"Users" column pair per day, shared by every
/// sheet in a run.
pub fn day_columns(rows: &[SessionRow]) -> Vec<NaiveDate> {
    let days: BTreeSet<NaiveDate> = rows.iter().map(|r| r.session_date).collect();
    days.into_iter().collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
