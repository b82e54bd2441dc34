use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::time_utils::normalize_timestamp;

/// One client connection event as read from a CSV export.
///
/// All fields are raw trimmed strings; columns absent from a file's header
/// row are left empty rather than treated as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Site name. Always present: ingestion only accepts files whose
    /// header row carries the `location` column.
    #[serde(default)]
    pub location: String,
    /// Free-text sub-site label, conventionally `"building|floor"`.
    #[serde(default)]
    pub sublocation: String,
    #[serde(default)]
    pub associate_vlan: String,
    #[serde(default)]
    pub device_mac: String,
    /// Deduplication key for unique-user counts at every level.
    #[serde(default)]
    pub client_mac: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub client_ip: String,
    #[serde(default)]
    pub client_host_name: String,
    #[serde(default)]
    pub client_os_name: String,
    #[serde(default)]
    pub bssid: String,
    #[serde(default)]
    pub ssid: String,
}

/// A session record with parsed timestamps and derived grouping fields,
/// ready for aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRow {
    pub location: String,
    pub sublocation: String,
    /// Part of `sublocation` before the first `|`, trimmed.
    pub building: String,
    pub ssid: String,
    pub client_mac: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// `end_time - start_time` in seconds. May be negative: sessions with
    /// end before start are accepted silently, not clamped.
    pub connected_secs: i64,
    /// `end_time` truncated to the calendar day.
    pub session_date: NaiveDate,
}

impl SessionRow {
    /// Parse a raw record into a normalized row.
    ///
    /// Fails with [`crate::error::ReportError::TimestampParse`] when either
    /// timestamp matches neither accepted format.
    pub fn from_record(record: &SessionRecord) -> Result<Self> {
        let start_time = normalize_timestamp(&record.start_time)?;
        let end_time = normalize_timestamp(&record.end_time)?;

        Ok(Self {
            location: record.location.clone(),
            sublocation: record.sublocation.clone(),
            building: building_of(&record.sublocation).to_string(),
            ssid: record.ssid.clone(),
            client_mac: record.client_mac.clone(),
            start_time,
            end_time,
            connected_secs: (end_time - start_time).num_seconds(),
            session_date: end_time.date(),
        })
    }
}

/// Extract the building name from a sublocation label.
///
/// The building is the substring before the first `|`, or the whole string
/// when no `|` is present, trimmed of surrounding whitespace.
pub fn building_of(sublocation: &str) -> &str {
    match sublocation.split_once('|') {
        Some((building, _floor)) => building.trim(),
        None => sublocation.trim(),
    }
}

/// User choices driving one report-generation run.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Sites to report on; one sheet each, plus a combined sheet when more
    /// than one is selected.
    pub selected_sites: Vec<String>,
    /// Inclusive lower bound on `session_date`; `None` = unbounded.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on `session_date`; `None` = unbounded.
    pub date_to: Option<NaiveDate>,
    /// Collapse per-floor (sublocation) rows into building totals.
    pub aggregate_floors: bool,
    /// Emit one extra sheet per building. Only honored together with
    /// `aggregate_floors`.
    pub tab_per_building: bool,
}
