//! Running one range parser per worker on a rayon pool.
//!
//! The schema is shared by `Arc`; each worker owns its parser. Results are
//! gathered in range order, so concatenating them gives the same row sequence
//! as a single full parse.
//!
//! # Feature
//! Requires the `parallel-io` feature.

use crate::fields::Row;
use crate::io::{RangeOutput, read_range};
use crate::metrics::ParseReport;
use crate::parser::ByteRange;
use crate::partition::partition_body;
use crate::schema::CsvSchema;
use crate::validation::{ErrorCollector, ErrorMode};
use anyhow::Result;
use log::debug;
use rayon::prelude::*;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Rows from a partitioned run, grouped per range in range order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRanges {
    pub rows: Vec<Vec<Row>>,
    pub report: ParseReport,
}

impl ParsedRanges {
    /// Concatenate every range's rows in range order.
    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows.into_iter().flatten().collect()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

/// Parse each of `ranges` on its own rayon task.
///
/// `ranges` need not come from this crate; any contiguous, non-overlapping
/// cover of the body gives every row exactly once.
///
/// # Errors
/// Returns the first error any range reports (see [`read_range`]).
pub fn parse_partitioned(
    schema: &Arc<CsvSchema>,
    ranges: &[ByteRange],
    mode: ErrorMode,
    collector: Option<Arc<Mutex<ErrorCollector>>>,
) -> Result<ParsedRanges> {
    let start = Instant::now();
    let outputs: Vec<RangeOutput> = ranges
        .par_iter()
        .map(|&range| read_range(schema, range, mode, collector.clone()))
        .collect::<Result<Vec<_>>>()?;

    let (rows, stats): (Vec<_>, Vec<_>) = outputs
        .into_iter()
        .map(|out| (out.rows, out.stats))
        .unzip();
    let report = ParseReport::new(stats, start.elapsed());
    debug!(
        "partitioned parse: {} ranges, {} rows",
        ranges.len(),
        report.total_rows()
    );
    Ok(ParsedRanges { rows, report })
}

/// Split the body into `workers` equal byte ranges and parse them in parallel.
///
/// * `workers`: if `None`, defaults to `num_cpus::get()`.
///
/// # Errors
/// See [`parse_partitioned`].
pub fn parse_par(
    schema: &Arc<CsvSchema>,
    workers: Option<usize>,
    mode: ErrorMode,
    collector: Option<Arc<Mutex<ErrorCollector>>>,
) -> Result<ParsedRanges> {
    let workers = workers.unwrap_or_else(num_cpus::get).max(1);
    let ranges = partition_body(schema, workers);
    parse_partitioned(schema, &ranges, mode, collector)
}

/// Total number of fields over every body row, counted by `workers` ranges in
/// parallel. Fails on the first malformed row.
///
/// # Errors
/// See [`parse_partitioned`].
pub fn count_columns_par(schema: &Arc<CsvSchema>, workers: Option<usize>) -> Result<usize> {
    let parsed = parse_par(schema, workers, ErrorMode::FailFast, None)?;
    Ok(parsed.rows.iter().flatten().map(Vec::len).sum())
}
