//! The expected CSV column schema and per-file header mapping.
//!
//! Exports from different controller versions put the columns in different
//! orders and sometimes omit the optional ones, so every file gets its own
//! header-name → column-index mapping built from its detected header row.

use csv::StringRecord;
use report_core::models::SessionRecord;

/// The twelve columns a client-session export may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Location,
    Sublocation,
    AssociateVlan,
    DeviceMac,
    ClientMac,
    StartTime,
    EndTime,
    ClientIp,
    ClientHostName,
    ClientOsName,
    Bssid,
    Ssid,
}

impl Column {
    /// Every expected column, in canonical export order.
    pub const ALL: [Column; 12] = [
        Column::Location,
        Column::Sublocation,
        Column::AssociateVlan,
        Column::DeviceMac,
        Column::ClientMac,
        Column::StartTime,
        Column::EndTime,
        Column::ClientIp,
        Column::ClientHostName,
        Column::ClientOsName,
        Column::Bssid,
        Column::Ssid,
    ];

    /// Columns whose joint presence marks a row as the header row.
    pub const REQUIRED: [Column; 4] = [
        Column::Location,
        Column::Sublocation,
        Column::AssociateVlan,
        Column::DeviceMac,
    ];

    /// The header name as it appears in the CSV.
    pub fn name(self) -> &'static str {
        match self {
            Column::Location => "location",
            Column::Sublocation => "sublocation",
            Column::AssociateVlan => "associate_vlan",
            Column::DeviceMac => "device_mac",
            Column::ClientMac => "client_mac",
            Column::StartTime => "start_time",
            Column::EndTime => "end_time",
            Column::ClientIp => "client_ip",
            Column::ClientHostName => "client_host_name",
            Column::ClientOsName => "client_os_name",
            Column::Bssid => "bssid",
            Column::Ssid => "ssid",
        }
    }

    fn ordinal(self) -> usize {
        Column::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }
}

/// Column-name → index mapping for one file, restricted to the expected
/// headers actually present.
#[derive(Debug, Clone)]
pub struct HeaderMap {
    indices: [Option<usize>; 12],
    mapped: usize,
}

impl HeaderMap {
    /// Try to interpret `row` as the header row.
    ///
    /// Succeeds only when all of [`Column::REQUIRED`] appear somewhere in
    /// the row (any order, any position). Optional columns that are absent
    /// simply stay unmapped.
    pub fn detect(row: &StringRecord) -> Option<Self> {
        let mut indices = [None; 12];
        let mut mapped = 0usize;

        for column in Column::ALL {
            if let Some(idx) = row.iter().position(|cell| cell.trim() == column.name()) {
                indices[column.ordinal()] = Some(idx);
                mapped += 1;
            }
        }

        let required_present = Column::REQUIRED
            .iter()
            .all(|c| indices[c.ordinal()].is_some());
        if !required_present {
            return None;
        }

        Some(Self { indices, mapped })
    }

    /// Number of expected columns present in the header row.
    pub fn mapped_len(&self) -> usize {
        self.mapped
    }

    /// The trimmed cell value for `column` in a data row, or `None` when
    /// the column is unmapped or the row is too short.
    pub fn get<'r>(&self, column: Column, row: &'r StringRecord) -> Option<&'r str> {
        let idx = self.indices[column.ordinal()]?;
        row.get(idx).map(str::trim)
    }

    /// Convert a data row into a [`SessionRecord`].
    ///
    /// Unmapped columns yield empty strings.
    pub fn record_from_row(&self, row: &StringRecord) -> SessionRecord {
        let field = |column| self.get(column, row).unwrap_or("").to_string();
        SessionRecord {
            location: field(Column::Location),
            sublocation: field(Column::Sublocation),
            associate_vlan: field(Column::AssociateVlan),
            device_mac: field(Column::DeviceMac),
            client_mac: field(Column::ClientMac),
            start_time: field(Column::StartTime),
            end_time: field(Column::EndTime),
            client_ip: field(Column::ClientIp),
            client_host_name: field(Column::ClientHostName),
            client_os_name: field(Column::ClientOsName),
            bssid: field(Column::Bssid),
            ssid: field(Column::Ssid),
        }
    }
}
