//! Workbook rendering layer for the WiFi client report generator.
//!
//! Provides the named cell-style table, the fixed per-sheet grid renderer,
//! and the workbook assembly pipeline that plans sheets, renders each, and
//! saves the document.

pub mod sheet;
pub mod styles;
pub mod workbook;

pub use report_core as core;
