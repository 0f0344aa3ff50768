//! Cutting a file's body into approximate byte ranges.
//!
//! Ranges are computed from byte counts alone, in O(parts); no line boundary
//! is looked at. [`PartialCsvParser`](crate::PartialCsvParser) resolves which
//! lines each range owns.

use crate::parser::ByteRange;
use crate::schema::CsvSchema;
use std::iter;

/// Split `[body_offset, file_size)` into `parts` contiguous closed ranges.
///
/// Sizes differ by at most one byte; the first `body_len % parts` ranges take
/// the extra byte. `parts` is clamped to `[1, body_len]`. A header-only file
/// (empty body) yields no ranges.
#[must_use]
pub fn partition_body(schema: &CsvSchema, parts: usize) -> Vec<ByteRange> {
    let len = schema.body_len();
    if len == 0 {
        return Vec::new();
    }
    let parts = parts.clamp(1, len);
    let base = len / parts;
    let rem = len % parts;

    let mut out = Vec::with_capacity(parts);
    let mut from = schema.body_offset();
    for idx in 0..parts {
        let size = base + usize::from(idx < rem);
        out.push(ByteRange::new(from, from + size - 1));
        from += size;
    }
    out
}

/// Build ranges from caller-chosen cut points.
///
/// Each point starts a new range. Points outside the body's interior are
/// dropped, duplicates collapse, and order does not matter.
#[must_use]
pub fn split_at_points(schema: &CsvSchema, points: &[usize]) -> Vec<ByteRange> {
    let start = schema.body_offset();
    let end = schema.file_size();
    if start >= end {
        return Vec::new();
    }
    let mut cuts: Vec<usize> = points
        .iter()
        .copied()
        .filter(|&p| p > start && p < end)
        .collect();
    cuts.sort_unstable();
    cuts.dedup();

    let mut out = Vec::with_capacity(cuts.len() + 1);
    let mut from = start;
    for cut in cuts.into_iter().chain(iter::once(end)) {
        out.push(ByteRange::new(from, cut - 1));
        from = cut;
    }
    out
}
