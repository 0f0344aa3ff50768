//! Assertion functions for checking range partitions.
//!
//! These compare what a set of range parsers produce against one parser over
//! the whole body, and panic with a detailed message when they differ.

use crate::error::Result;
use crate::fields::Row;
use crate::parser::{ByteRange, PartialCsvParser};
use crate::schema::CsvSchema;
use std::collections::HashSet;
use std::sync::Arc;

/// Every row `range` owns, failing on the first malformed one.
///
/// # Errors
/// Propagates range and content errors.
pub fn collect_rows(schema: &Arc<CsvSchema>, range: ByteRange) -> Result<Vec<Row>> {
    PartialCsvParser::for_range(Arc::clone(schema), range)?.collect()
}

/// Every row of the whole body.
///
/// # Errors
/// Propagates content errors.
pub fn collect_body(schema: &Arc<CsvSchema>) -> Result<Vec<Row>> {
    PartialCsvParser::whole_body(Arc::clone(schema))?.collect()
}

/// First-byte offsets of every line `range` owns.
///
/// # Errors
/// Propagates range errors.
pub fn collect_offsets(schema: &Arc<CsvSchema>, range: ByteRange) -> Result<Vec<usize>> {
    let mut parser = PartialCsvParser::for_range(Arc::clone(schema), range)?;
    let mut out = Vec::new();
    while let Some(line) = parser.next_record()? {
        out.push(line.offset);
    }
    Ok(out)
}

/// Assert that `ranges`, parsed independently and concatenated in order, give
/// exactly the whole-body parse, and that no line is owned by two ranges.
///
/// # Panics
///
/// Panics on a missing, extra or duplicated row, or if any parse fails.
///
/// # Example
///
/// ```
/// use partial_csv::{CsvConfig, CsvSchema, split_at_points};
/// use partial_csv::testing::assert_partition_complete;
///
/// let schema = CsvSchema::from_bytes("h\n1\n22\n333\n", CsvConfig::default()).unwrap().shared();
/// assert_partition_complete(&schema, &split_at_points(&schema, &[3, 6, 7]));
/// ```
pub fn assert_partition_complete(schema: &Arc<CsvSchema>, ranges: &[ByteRange]) {
    let expected = collect_body(schema).expect("whole-body parse failed");

    let mut actual: Vec<Row> = Vec::with_capacity(expected.len());
    let mut seen = HashSet::new();
    for &range in ranges {
        let rows = collect_rows(schema, range)
            .unwrap_or_else(|e| panic!("parse of range {range} failed: {e}"));
        actual.extend(rows);

        let offsets = collect_offsets(schema, range)
            .unwrap_or_else(|e| panic!("offsets of range {range} failed: {e}"));
        for offset in offsets {
            assert!(
                seen.insert(offset),
                "line at byte {offset} emitted twice (again by range {range})\n  Ranges: {ranges:?}"
            );
        }
    }

    assert_eq!(
        actual.len(),
        expected.len(),
        "Row count mismatch:\n  Expected: {}\n  Actual: {}\n  Ranges: {ranges:?}",
        expected.len(),
        actual.len()
    );
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Row mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Ranges: {ranges:?}"
        );
    }
}

/// Assert that `parser` is exhausted now and stays exhausted.
///
/// # Panics
///
/// Panics if any of `calls` further calls yields a row or an error.
pub fn assert_exhausted(parser: &mut PartialCsvParser, calls: usize) {
    for i in 0..calls {
        match parser.next_row() {
            Ok(None) => {}
            other => panic!("call #{i} after exhaustion returned {other:?}"),
        }
    }
}
