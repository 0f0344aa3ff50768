//! Splitting a line into fields on a single-byte delimiter.
//!
//! No quoting, escaping or trimming: `k` delimiters always give `k + 1`
//! fields, and empty fields are kept.

use memchr::memchr_iter;

/// One parsed row: the line's fields in order.
pub type Row = Vec<String>;

/// Number of fields `line` splits into, without allocating.
#[inline]
#[must_use]
pub fn count_fields(line: &[u8], delimiter: u8) -> usize {
    memchr_iter(delimiter, line).count() + 1
}

/// Split `line` on every occurrence of `delimiter`.
///
/// Field bytes are decoded as UTF-8; invalid sequences become U+FFFD.
///
/// ```
/// use partial_csv::split_fields;
///
/// assert_eq!(split_fields(b"a,,b", b','), vec!["a", "", "b"]);
/// assert_eq!(split_fields(b"", b','), vec![""]);
/// ```
#[must_use]
pub fn split_fields(line: &[u8], delimiter: u8) -> Row {
    line.split(|&b| b == delimiter)
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}
