//! Handling malformed rows during range parsing.
//!
//! A row whose field count differs from the schema's is a *content* error: the
//! parser has already stepped past it, so the caller chooses what happens next.
//! This module provides:
//! - **Error handling modes** - skip bad rows, log and collect them, or fail fast
//! - **Error collector** - accumulates rejected rows for batch reporting
//!
//! Setup errors (I/O, bad terminators, out-of-bounds ranges) are never subject
//! to a mode; they always abort.
//!
//! # Example
//!
//! ```no_run
//! use partial_csv::*;
//! use std::sync::{Arc, Mutex};
//!
//! # fn main() -> anyhow::Result<()> {
//! let schema = CsvSchema::open("data.csv", CsvConfig::default())?.shared();
//! let collector = Arc::new(Mutex::new(ErrorCollector::new()));
//! let out = read_all(&schema, ErrorMode::LogAndContinue, Some(Arc::clone(&collector)))?;
//!
//! println!("Valid rows: {}", out.rows.len());
//! println!("Rejected: {}", collector.lock().unwrap().error_count());
//! # Ok(())
//! # }
//! ```

use crate::error::CsvError;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// What to do when a row has the wrong number of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorMode {
    /// Drop the row silently and continue.
    SkipInvalid,
    /// Log the row, record it in the collector (if any), and continue.
    LogAndContinue,
    /// Stop at the first malformed row.
    #[default]
    FailFast,
}

/// A rejected row with enough context to find it in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// Byte offset of the line's first byte.
    pub offset: usize,
    pub found: usize,
    pub expected: usize,
    /// The offending line, terminator excluded.
    pub line: String,
}

impl RowError {
    /// Extract the row context from a content error; `None` for setup errors.
    #[must_use]
    pub fn from_csv_error(err: &CsvError) -> Option<Self> {
        match err {
            CsvError::ColumnMismatch {
                offset,
                found,
                expected,
                line,
            } => Some(Self {
                offset: *offset,
                found: *found,
                expected: *expected,
                line: line.clone(),
            }),
            _ => None,
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "byte {}: {} columns, expected {}: {}",
            self.offset, self.found, self.expected, self.line
        )
    }
}

/// Collects rejected rows for batch reporting.
///
/// Use with [`ErrorMode::LogAndContinue`]; share it across workers behind a
/// `Mutex`.
#[derive(Debug, Clone, Default)]
pub struct ErrorCollector {
    errors: Vec<RowError>,
}

impl ErrorCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: RowError) {
        self.errors.push(error);
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Collected errors, in arrival order.
    #[must_use]
    pub fn errors(&self) -> &[RowError] {
        &self.errors
    }

    /// Collected errors sorted by file offset.
    ///
    /// Workers report concurrently, so arrival order is not file order.
    #[must_use]
    pub fn sorted_errors(&self) -> Vec<RowError> {
        let mut out = self.errors.clone();
        out.sort_by_key(|e| e.offset);
        out
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Emit every error at `warn` level.
    pub fn log_errors(&self) {
        for err in &self.errors {
            warn!("rejected row at {err}");
        }
    }

    /// Export errors as pretty-printed JSON.
    ///
    /// # Errors
    /// Propagates serialization failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.errors)
    }

    /// Write errors to a file in JSON format.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

impl fmt::Display for ErrorCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ErrorCollector({} errors)", self.error_count())
    }
}
