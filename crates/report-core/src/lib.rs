//! Core domain layer for the WiFi client report generator.
//!
//! Defines the session data model, the crate-wide error type, timestamp
//! parsing for the two export formats, and the CLI settings struct shared
//! with the binary.

pub mod error;
pub mod models;
pub mod settings;
pub mod time_utils;
