use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the report generator.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV stream could not be decoded.
    #[error("Failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A ZIP archive could not be opened or an entry could not be read.
    #[error("Failed to read archive {path}: {source}")]
    ArchiveRead {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// A timestamp string matched neither accepted format.
    #[error("Invalid date format: {0}")]
    TimestampParse(String),

    /// No session records were produced by ingestion.
    #[error("No valid CSV data found in the given inputs")]
    NoRecords,

    /// No end-time value in the loaded data could be parsed.
    #[error("No valid timestamps found in the loaded data")]
    NoValidDates,

    /// The caller selected no sites.
    #[error("No sites selected")]
    NoSites,

    /// Every planned sheet was empty, so no workbook was written.
    #[error("No sessions matched the selected sites and date range")]
    EmptySelection,

    /// An error from the workbook writer.
    #[error("Failed to write workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the report crates.
pub type Result<T> = std::result::Result<T, ReportError>;
