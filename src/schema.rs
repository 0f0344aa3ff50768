//! File-level schema shared by every range parser.
//!
//! A [`CsvSchema`] owns the file's bytes and the facts derived from its first
//! line: column count, optional header names and the offset where the body
//! starts. It is immutable once built; share it across workers with
//! [`CsvSchema::shared`] (an `Arc`).

use crate::buffer::ByteBuffer;
use crate::config::CsvConfig;
use crate::error::{CsvError, Result};
use crate::fields::split_fields;
use crate::line::locate_line;
use log::debug;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug)]
pub struct CsvSchema {
    buffer: ByteBuffer,
    config: CsvConfig,
    column_count: usize,
    headers: Option<Vec<String>>,
    body_offset: usize,
}

impl CsvSchema {
    /// Memory-map `path` and read its first line.
    ///
    /// Terminators are validated before the file is touched.
    ///
    /// # Errors
    /// [`CsvError::InvalidTerminator`] for a non-ASCII terminator,
    /// [`CsvError::Io`] if the file cannot be mapped,
    /// [`CsvError::EmptyInput`] for an empty file.
    pub fn open(path: impl AsRef<Path>, config: CsvConfig) -> Result<Self> {
        config.validate()?;
        Self::with_buffer(ByteBuffer::map(path)?, config)
    }

    /// Build a schema over in-memory content.
    ///
    /// # Errors
    /// As [`CsvSchema::open`], minus the I/O case.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>, config: CsvConfig) -> Result<Self> {
        Self::with_buffer(ByteBuffer::from_vec(bytes.into())?, config)
    }

    /// Build a schema over an already acquired buffer.
    ///
    /// # Errors
    /// [`CsvError::InvalidTerminator`] for a non-ASCII terminator.
    pub fn with_buffer(buffer: ByteBuffer, config: CsvConfig) -> Result<Self> {
        config.validate()?;
        let bytes = buffer.as_bytes();
        let first = locate_line(bytes, 0, config.line_terminator)?;
        let columns = split_fields(first.slice(bytes), config.field_terminator);
        let column_count = columns.len();

        let (headers, body_offset) = if config.has_header_line {
            (Some(columns), first.next_start())
        } else {
            (None, 0)
        };
        debug!(
            "schema: {} bytes, {} columns, body at {}",
            buffer.len(),
            column_count,
            body_offset
        );
        Ok(Self {
            buffer,
            config,
            column_count,
            headers,
            body_offset,
        })
    }

    /// Wrap in an `Arc` for sharing across parsers.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Number of fields on the first line; every row must match it.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Header names from the first line.
    ///
    /// # Errors
    /// [`CsvError::NoHeader`] if the schema was opened with `has_header_line = false`.
    pub fn headers(&self) -> Result<&[String]> {
        self.headers.as_deref().ok_or(CsvError::NoHeader)
    }

    /// Offset of the first body byte: 0 without a header, otherwise just past
    /// the header's terminator.
    ///
    /// For a header-only file this can equal, or exceed by one, [`file_size`](Self::file_size).
    #[must_use]
    pub fn body_offset(&self) -> usize {
        self.body_offset
    }

    /// Bytes in the body region `[body_offset, file_size)`.
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.file_size().saturating_sub(self.body_offset)
    }

    #[must_use]
    pub fn file_size(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn content(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    #[must_use]
    pub fn has_header(&self) -> bool {
        self.config.has_header_line
    }

    #[must_use]
    pub fn field_terminator(&self) -> u8 {
        self.config.field_terminator
    }

    #[must_use]
    pub fn line_terminator(&self) -> u8 {
        self.config.line_terminator
    }
}
