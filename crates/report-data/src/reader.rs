//! CSV and ZIP ingestion for the report generator.
//!
//! Accepts a mix of `.csv` files, `.zip` archives and directories, and
//! turns everything into one combined list of [`SessionRecord`]s. Each
//! file is parsed against its own detected header row; files where no
//! header row is found contribute zero records.

use std::fs::File;
use std::path::{Path, PathBuf};

use report_core::error::{ReportError, Result};
use report_core::models::SessionRecord;
use tracing::{debug, warn};

use crate::schema::HeaderMap;

// ── Public API ────────────────────────────────────────────────────────────────

/// Expand the given inputs into a flat, sorted list of CSV/ZIP files.
///
/// Plain file paths are kept as-is; directories are walked recursively and
/// contribute every `.csv` and `.zip` file found underneath them.
pub fn collect_input_files(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = walkdir::WalkDir::new(input)
                .follow_links(true)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| {
                    entry.file_type().is_file()
                        && (has_extension(entry.path(), "csv") || has_extension(entry.path(), "zip"))
                })
                .map(|entry| entry.into_path())
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }

    files
}

/// Ingest every input into one combined record list.
///
/// Record order across inputs is not significant. An unreadable file or a
/// malformed archive aborts the whole ingestion.
pub fn ingest(inputs: &[PathBuf]) -> Result<Vec<SessionRecord>> {
    let files = collect_input_files(inputs);
    let mut records: Vec<SessionRecord> = Vec::new();

    for path in &files {
        if has_extension(path, "csv") {
            records.extend(import_csv(path)?);
        } else if has_extension(path, "zip") {
            records.extend(import_zip(path)?);
        } else {
            debug!("Skipping unrecognised input {}", path.display());
        }
    }

    debug!("Ingested {} records from {} files", records.len(), files.len());
    Ok(records)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Case-insensitive extension check.
fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

/// Strip a UTF-8 byte-order mark, if present.
///
/// Controller exports are frequently written as `utf-8-sig`; without this
/// the BOM glues itself onto the first header name.
fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes)
}

/// Parse one CSV file into session records.
fn import_csv(path: &Path) -> Result<Vec<SessionRecord>> {
    let bytes = std::fs::read(path).map_err(|source| ReportError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    parse_csv(strip_bom(&bytes), path)
}

/// Scan `bytes` for the header row, then convert every following row.
///
/// Rows shorter than the number of mapped headers are skipped silently;
/// rows before the header row are ignored (exports often carry preamble
/// lines above the real header).
fn parse_csv(bytes: &[u8], path: &Path) -> Result<Vec<SessionRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut header: Option<HeaderMap> = None;
    let mut records: Vec<SessionRecord> = Vec::new();
    let mut skipped = 0usize;

    for row in reader.records() {
        let row = row.map_err(|source| ReportError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;

        match &header {
            None => header = HeaderMap::detect(&row),
            Some(map) => {
                if row.len() < map.mapped_len() {
                    skipped += 1;
                    continue;
                }
                records.push(map.record_from_row(&row));
            }
        }
    }

    if header.is_none() {
        warn!("No header row found in {}", path.display());
    }
    debug!(
        "File {}: {} records, {} short rows skipped",
        path.display(),
        records.len(),
        skipped,
    );

    Ok(records)
}

/// Extract every `.csv` entry of a ZIP archive to a scratch directory and
/// parse each. The scratch directory is released when ingestion returns.
fn import_zip(path: &Path) -> Result<Vec<SessionRecord>> {
    let file = File::open(path).map_err(|source| ReportError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|source| ReportError::ArchiveRead {
        path: path.to_path_buf(),
        source,
    })?;

    let scratch = tempfile::tempdir()?;
    let mut records: Vec<SessionRecord> = Vec::new();

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|source| ReportError::ArchiveRead {
                path: path.to_path_buf(),
                source,
            })?;
        if !entry.name().to_ascii_lowercase().ends_with(".csv") {
            continue;
        }

        // Flat indexed names sidestep hostile entry paths.
        let extracted = scratch.path().join(format!("entry-{index}.csv"));
        let mut out = File::create(&extracted)?;
        std::io::copy(&mut entry, &mut out)?;
        drop(entry);

        records.extend(import_csv(&extracted)?);
    }

    Ok(records)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
