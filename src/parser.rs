//! Range-restricted row parsing.
//!
//! A [`PartialCsvParser`] is given an *approximate* byte range `[from, to]` and
//! emits exactly the lines whose first byte falls inside it. Ranges can be cut
//! anywhere, without knowing where lines begin, and the union of the outputs
//! over any partition of the body is exactly one full parse.
//!
//! The rule: **the parser whose range covers the beginning of a line parses
//! that line.**
//!
//! ```text
//! (start of body)  aaaaaaaaaaaaaaaa EOF
//!                  <---><-----><-->
//!                   (1)   (2)   (3)
//! ```
//! Only (1) covers the start of `aaaa...`, so only (1) emits it.
//!
//! ```text
//! (start of body)  aaaaaaaaaaaaa \n bbbbbbbbbbb EOF
//!                  <---><-------->  <--------->
//!                   (1)    (2)          (3)
//! ```
//! (1) emits `aaaa...`, (2) emits nothing, (3) emits `bbbb...`.
//!
//! ```text
//! (start of body)  aaaaaaaaaaaaa \n bbbbbbbbbbb EOF
//!                  <---><-----------><-------->
//!                   (1)      (2)         (3)
//! ```
//! (1) emits `aaaa...`, (2) reaches the start of `bbbb...` and emits it,
//! (3) emits nothing.

use crate::error::{CsvError, Result};
use crate::fields::{Row, count_fields, split_fields};
use crate::line::{LineSpan, locate_line};
use crate::schema::CsvSchema;
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

/// Where a parser's range begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseFrom {
    /// The schema's body offset (just past the header, if any).
    #[default]
    BodyStart,
    /// An absolute byte offset into the file.
    Offset(usize),
}

/// Where a parser's range ends (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseTo {
    /// The last byte of the file.
    #[default]
    FileEnd,
    /// An absolute byte offset into the file.
    Offset(usize),
}

impl From<usize> for ParseFrom {
    fn from(offset: usize) -> Self {
        ParseFrom::Offset(offset)
    }
}

impl From<usize> for ParseTo {
    fn from(offset: usize) -> Self {
        ParseTo::Offset(offset)
    }
}

/// A closed byte interval `[from, to]` in whole-file offsets.
///
/// `from > to` is a valid, empty range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ByteRange {
    pub from: usize,
    pub to: usize,
}

impl ByteRange {
    #[must_use]
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.from > self.to
    }

    /// Number of bytes covered.
    #[must_use]
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.to - self.from + 1
        }
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.from, self.to)
    }
}

/// A line owned by a parser, borrowed from the schema's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    /// Offset of the line's first byte.
    pub offset: usize,
    /// Line content, terminator excluded.
    pub bytes: &'a [u8],
}

/// Walks one byte range of a shared [`CsvSchema`], yielding the rows it owns.
///
/// Each parser holds its own cursor and nothing else mutable, so any number of
/// them can run concurrently over the same schema.
///
/// ```
/// use partial_csv::{CsvConfig, CsvSchema, PartialCsvParser, ParseFrom, ParseTo};
///
/// let schema = CsvSchema::from_bytes("a,b,c\n1,2,3\n4,5,6\n", CsvConfig::default())?.shared();
/// // Cut inside "4,5,6": the first range still reaches the start of that line.
/// let mut first = PartialCsvParser::new(schema.clone(), ParseFrom::BodyStart, ParseTo::Offset(13))?;
/// let mut second = PartialCsvParser::new(schema, ParseFrom::Offset(14), ParseTo::FileEnd)?;
///
/// assert_eq!(first.next_row()?, Some(vec!["1".into(), "2".into(), "3".into()]));
/// assert_eq!(first.next_row()?, Some(vec!["4".into(), "5".into(), "6".into()]));
/// assert_eq!(first.next_row()?, None);
/// assert_eq!(second.next_row()?, None);
/// # Ok::<(), partial_csv::CsvError>(())
/// ```
#[derive(Debug)]
pub struct PartialCsvParser {
    schema: Arc<CsvSchema>,
    range: ByteRange,
    cursor: usize,
}

impl PartialCsvParser {
    /// Resolve `from`/`to` against `schema` and position the cursor at `from`.
    ///
    /// `from > to` is accepted and yields no rows; a header-only file produces
    /// exactly that with the default bounds.
    ///
    /// # Errors
    /// [`CsvError::FromBeforeBody`] if `from < body_offset`,
    /// [`CsvError::ToPastEnd`] if `to >= file_size`.
    pub fn new(schema: Arc<CsvSchema>, from: ParseFrom, to: ParseTo) -> Result<Self> {
        let body_offset = schema.body_offset();
        let file_size = schema.file_size();
        let from = match from {
            ParseFrom::BodyStart => body_offset,
            ParseFrom::Offset(offset) => offset,
        };
        let to = match to {
            ParseTo::FileEnd => file_size - 1,
            ParseTo::Offset(offset) => offset,
        };
        if from < body_offset {
            return Err(CsvError::FromBeforeBody { from, body_offset });
        }
        if to >= file_size {
            return Err(CsvError::ToPastEnd { to, file_size });
        }
        trace!("range parser over [{from}, {to}] of {file_size} bytes");
        Ok(Self {
            schema,
            range: ByteRange { from, to },
            cursor: from,
        })
    }

    /// Parser over the whole body.
    ///
    /// # Errors
    /// Never for a well-formed schema; see [`PartialCsvParser::new`].
    pub fn whole_body(schema: Arc<CsvSchema>) -> Result<Self> {
        Self::new(schema, ParseFrom::BodyStart, ParseTo::FileEnd)
    }

    /// Parser over an explicit closed range.
    ///
    /// # Errors
    /// See [`PartialCsvParser::new`].
    pub fn for_range(schema: Arc<CsvSchema>, range: ByteRange) -> Result<Self> {
        Self::new(
            schema,
            ParseFrom::Offset(range.from),
            ParseTo::Offset(range.to),
        )
    }

    /// The resolved range.
    #[must_use]
    pub fn range(&self) -> ByteRange {
        self.range
    }

    /// Current cursor. Never decreases.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Bytes walked so far, from `from` to the cursor (clamped to the file).
    #[must_use]
    pub fn bytes_scanned(&self) -> usize {
        self.cursor
            .min(self.schema.file_size())
            .saturating_sub(self.range.from)
    }

    /// Advance to the next line this range owns.
    fn next_owned_line(&mut self) -> Result<Option<LineSpan>> {
        let bytes = self.schema.content();
        let terminator = self.schema.line_terminator();

        while self.cursor <= self.range.to {
            let line = locate_line(bytes, self.cursor, terminator)?;

            // The cursor sits on the first byte of the line: ours.
            if line.start == self.cursor {
                self.cursor = line.next_start();
                return Ok(Some(line));
            }

            // The line started in an earlier range. Skip it; if `to` is still
            // inside it, no line start is left for this range.
            self.cursor = line.next_start();
            if self.range.to < self.cursor {
                return Ok(None);
            }
        }
        Ok(None)
    }

    /// Next owned line, unsplit.
    ///
    /// # Errors
    /// Propagates buffer lookup failures; never returns a content error.
    pub fn next_record(&mut self) -> Result<Option<RawLine<'_>>> {
        let Some(line) = self.next_owned_line()? else {
            return Ok(None);
        };
        Ok(Some(RawLine {
            offset: line.start,
            bytes: line.slice(self.schema.content()),
        }))
    }

    /// Next owned row, or `None` once the range is exhausted.
    ///
    /// After `None`, every further call returns `None`.
    ///
    /// # Errors
    /// [`CsvError::ColumnMismatch`] if the line's field count differs from the
    /// schema's. The cursor has already moved past that line, so calling again
    /// continues with the next one.
    pub fn next_row(&mut self) -> Result<Option<Row>> {
        let Some(line) = self.next_owned_line()? else {
            return Ok(None);
        };
        let bytes = line.slice(self.schema.content());
        let delimiter = self.schema.field_terminator();
        let expected = self.schema.column_count();

        let found = count_fields(bytes, delimiter);
        if found != expected {
            return Err(CsvError::ColumnMismatch {
                offset: line.start,
                found,
                expected,
                line: String::from_utf8_lossy(bytes).into_owned(),
            });
        }
        Ok(Some(split_fields(bytes, delimiter)))
    }
}

impl Iterator for PartialCsvParser {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}

impl FusedIterator for PartialCsvParser {}
