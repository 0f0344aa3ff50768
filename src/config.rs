//! Configuration surface for opening a delimited-text file.
//!
//! [`CsvConfig`] carries the three knobs that decide how a file is read:
//! whether the first line is a header, the field terminator and the line
//! terminator. Both terminators are single ASCII bytes so that they can never
//! appear inside a multi-byte UTF-8 sequence.
//!
//! # Example
//!
//! ```
//! use partial_csv::CsvConfig;
//!
//! let tsv = CsvConfig::default().with_field_terminator(b'\t');
//! assert!(tsv.has_header_line);
//! assert!(tsv.validate().is_ok());
//!
//! let cfg: CsvConfig = serde_json::from_str(r#"{"has_header_line": false, "field_terminator": ";"}"#)?;
//! assert_eq!(cfg.field_terminator, b';');
//! assert_eq!(cfg.line_terminator, b'\n');
//! # Ok::<(), serde_json::Error>(())
//! ```

use crate::error::{CsvError, Result, Terminator};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How to interpret a delimited-text file.
///
/// Fields missing from a deserialized document take their defaults
/// (header on, `,` and `\n`). Terminators may be written either as a
/// one-character string or as a byte value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    /// Treat the first line as column names.
    pub has_header_line: bool,
    /// Byte separating fields within a line.
    #[serde(with = "ascii_byte")]
    pub field_terminator: u8,
    /// Byte separating lines.
    #[serde(with = "ascii_byte")]
    pub line_terminator: u8,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            has_header_line: true,
            field_terminator: b',',
            line_terminator: b'\n',
        }
    }
}

impl CsvConfig {
    /// Comma-separated, header line present, `\n` line terminator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tab-separated variant of [`CsvConfig::default`].
    #[must_use]
    pub fn tsv() -> Self {
        Self::default().with_field_terminator(b'\t')
    }

    #[must_use]
    pub fn with_header(mut self, has_header_line: bool) -> Self {
        self.has_header_line = has_header_line;
        self
    }

    #[must_use]
    pub fn with_field_terminator(mut self, terminator: u8) -> Self {
        self.field_terminator = terminator;
        self
    }

    #[must_use]
    pub fn with_line_terminator(mut self, terminator: u8) -> Self {
        self.line_terminator = terminator;
        self
    }

    /// Check that both terminators are ASCII.
    ///
    /// # Errors
    /// Returns [`CsvError::InvalidTerminator`] naming the first offending byte.
    pub fn validate(&self) -> Result<()> {
        if !self.field_terminator.is_ascii() {
            return Err(CsvError::InvalidTerminator {
                which: Terminator::Field,
                byte: self.field_terminator,
            });
        }
        if !self.line_terminator.is_ascii() {
            return Err(CsvError::InvalidTerminator {
                which: Terminator::Line,
                byte: self.line_terminator,
            });
        }
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid JSON for
    /// [`CsvConfig`], or names a non-ASCII terminator.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .with_context(|| format!("parse CSV config {}", path.display()))?;
        cfg.validate()
            .with_context(|| format!("validate CSV config {}", path.display()))?;
        Ok(cfg)
    }
}

/// Serde adapter: a terminator is written as a one-character string and read
/// back from either a one-byte string or an integer.
mod ascii_byte {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Byte(u8),
        Text(String),
    }

    pub fn serialize<S: Serializer>(byte: &u8, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_char(char::from(*byte))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<u8, D::Error> {
        match Repr::deserialize(d)? {
            Repr::Byte(b) => Ok(b),
            Repr::Text(text) => match text.as_bytes() {
                [b] => Ok(*b),
                _ => Err(D::Error::custom(format!(
                    "expected a single-byte terminator, got {text:?}"
                ))),
            },
        }
    }
}
