//! Draining ranges into row vectors.
//!
//! This module provides:
//! - **Single range**: [`read_range`] parses one [`ByteRange`] under an [`ErrorMode`]
//! - **Whole body**: [`read_all`] is `read_range` over `[body_offset, file_size)`
//! - **Path convenience**: [`read_csv_rows`] opens, maps and reads a file in one call
//!
//! Setup failures always abort; content errors follow the mode. Errors carry
//! the range they came from.

use crate::config::CsvConfig;
use crate::fields::Row;
use crate::metrics::RangeStats;
use crate::parser::{ByteRange, PartialCsvParser};
use crate::schema::CsvSchema;
use crate::validation::{ErrorCollector, ErrorMode, RowError};
use anyhow::{Context, Result, anyhow};
use log::{debug, warn};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Rows owned by one range, with its statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeOutput {
    pub rows: Vec<Row>,
    pub stats: RangeStats,
}

/// Parse every row `range` owns.
///
/// * `mode` decides what happens to rows with the wrong column count.
/// * `collector` receives rejected rows under [`ErrorMode::LogAndContinue`].
///
/// # Errors
/// Returns an error if the range is out of bounds, or on the first malformed
/// row under [`ErrorMode::FailFast`].
pub fn read_range(
    schema: &Arc<CsvSchema>,
    range: ByteRange,
    mode: ErrorMode,
    collector: Option<Arc<Mutex<ErrorCollector>>>,
) -> Result<RangeOutput> {
    let mut parser = PartialCsvParser::for_range(Arc::clone(schema), range)
        .with_context(|| format!("set up parser for bytes {range}"))?;
    let mut rows = Vec::<Row>::new();
    let mut rejected = 0usize;

    loop {
        match parser.next_row() {
            Ok(Some(row)) => rows.push(row),
            Ok(None) => break,
            Err(err) if err.is_recoverable() => {
                rejected += 1;
                match mode {
                    ErrorMode::FailFast => {
                        return Err(err).with_context(|| format!("parse bytes {range}"));
                    }
                    ErrorMode::SkipInvalid => {}
                    ErrorMode::LogAndContinue => {
                        warn!("skipping malformed row: {err}");
                        if let (Some(c), Some(row_err)) =
                            (collector.as_ref(), RowError::from_csv_error(&err))
                        {
                            c.lock()
                                .map_err(|_| anyhow!("error collector lock poisoned"))?
                                .add_error(row_err);
                        }
                    }
                }
            }
            Err(err) => return Err(err).with_context(|| format!("parse bytes {range}")),
        }
    }

    let stats = RangeStats {
        range: parser.range(),
        rows: rows.len(),
        rejected,
        bytes_scanned: parser.bytes_scanned(),
    };
    debug!(
        "range {}: {} rows, {} rejected",
        stats.range, stats.rows, stats.rejected
    );
    Ok(RangeOutput { rows, stats })
}

/// Parse the whole body as a single range.
///
/// A header-only file yields no rows.
///
/// # Errors
/// See [`read_range`].
pub fn read_all(
    schema: &Arc<CsvSchema>,
    mode: ErrorMode,
    collector: Option<Arc<Mutex<ErrorCollector>>>,
) -> Result<RangeOutput> {
    let range = PartialCsvParser::whole_body(Arc::clone(schema))
        .context("set up whole-body parser")?
        .range();
    read_range(schema, range, mode, collector)
}

/// Open `path` with `config` and return every body row, failing on the first
/// malformed one.
///
/// # Errors
/// Returns an error if the file cannot be opened or mapped, the config is
/// invalid, or any row has the wrong column count.
pub fn read_csv_rows(path: impl AsRef<Path>, config: CsvConfig) -> Result<Vec<Row>> {
    let path = path.as_ref();
    let schema = CsvSchema::open(path, config)
        .with_context(|| format!("open {}", path.display()))?
        .shared();
    let out = read_all(&schema, ErrorMode::FailFast, None)
        .with_context(|| format!("read {}", path.display()))?;
    Ok(out.rows)
}
