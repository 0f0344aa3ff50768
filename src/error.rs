//! Error taxonomy for partial CSV parsing.
//!
//! Errors fall into two groups:
//! - **Setup errors** (I/O, invalid terminators, out-of-bounds ranges, empty input).
//!   These abort the operation that raised them.
//! - **Content errors** ([`CsvError::ColumnMismatch`]). The parser has already moved
//!   past the offending line, so the caller may skip it and keep going.
//!
//! Use [`CsvError::is_recoverable`] to tell them apart.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the core parsing API.
pub type Result<T, E = CsvError> = std::result::Result<T, E>;

/// Which of the two terminator bytes a configuration error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    Field,
    Line,
}

impl fmt::Display for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminator::Field => f.write_str("field"),
            Terminator::Line => f.write_str("line"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CsvError {
    /// The file could not be opened, inspected or mapped.
    #[error("map {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A terminator byte is outside the ASCII range.
    #[error("{which} terminator {byte:#04x} is outside the ASCII range 0..=127")]
    InvalidTerminator { which: Terminator, byte: u8 },

    /// The buffer has no bytes at all.
    #[error("input is empty")]
    EmptyInput,

    /// Header names were requested from a schema opened without a header line.
    #[error("schema was opened without a header line")]
    NoHeader,

    /// `parse_from` lies before the first body byte.
    #[error("parse_from {from} is before the body offset {body_offset}")]
    FromBeforeBody { from: usize, body_offset: usize },

    /// `parse_to` lies at or past the end of the file.
    #[error("parse_to {to} is out of bounds for a {file_size}-byte file")]
    ToPastEnd { to: usize, file_size: usize },

    /// A line lookup was attempted outside the buffer.
    #[error("position {position} is out of bounds for a {len}-byte buffer")]
    PositionOutOfBounds { position: usize, len: usize },

    /// A row's field count differs from the first line's.
    #[error(
        "line at byte {offset} has {found} columns, while the first line has {expected} columns: {line}"
    )]
    ColumnMismatch {
        offset: usize,
        found: usize,
        expected: usize,
        line: String,
    },
}

impl CsvError {
    /// `true` for content errors the caller may skip past.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CsvError::ColumnMismatch { .. })
    }
}
