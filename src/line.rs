//! Locating the line that contains a byte position.
//!
//! Both the start of the buffer and its end are implicit line boundaries, so a
//! last line without a trailing terminator is still a complete line.
//!
//! ```text
//!  \n aaaaaaaaaaa \n bbbbbbbbbbbbb \n
//!     ^         ^  ^
//!    (1)       (2)(3)
//! ```
//!
//! Any position from (1) through (3), including the terminator at (3), resolves
//! to the line starting at (1).

use crate::error::{CsvError, Result};
use memchr::{memchr, memrchr};

/// A line inside a buffer, as `(start, len)` with `len` excluding the terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineSpan {
    pub start: usize,
    pub len: usize,
}

impl LineSpan {
    /// Offset one past the last content byte: the terminator, or the buffer end.
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Offset where the following line would start (past the terminator).
    ///
    /// For a last line without a terminator this is one past the buffer end.
    #[inline]
    #[must_use]
    pub fn next_start(&self) -> usize {
        self.end() + 1
    }

    /// The line's content bytes.
    ///
    /// # Panics
    /// If the span does not lie within `bytes`. Spans produced by
    /// [`locate_line`] on the same buffer always do.
    #[inline]
    #[must_use]
    pub fn slice<'a>(&self, bytes: &'a [u8]) -> &'a [u8] {
        &bytes[self.start..self.end()]
    }
}

/// Find the line containing `position`.
///
/// Scans backward to the byte after the previous terminator (or the buffer
/// start) and forward to the next terminator (or the buffer end).
///
/// # Errors
/// [`CsvError::PositionOutOfBounds`] if `position >= bytes.len()`.
pub fn locate_line(bytes: &[u8], position: usize, terminator: u8) -> Result<LineSpan> {
    if position >= bytes.len() {
        return Err(CsvError::PositionOutOfBounds {
            position,
            len: bytes.len(),
        });
    }
    let start = memrchr(terminator, &bytes[..position]).map_or(0, |i| i + 1);
    let end = memchr(terminator, &bytes[position..]).map_or(bytes.len(), |i| position + i);
    Ok(LineSpan {
        start,
        len: end - start,
    })
}
