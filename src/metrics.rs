//! Parse statistics per range and for a whole partitioned run.
//!
//! [`RangeStats`] is filled in by [`read_range`](crate::read_range);
//! [`ParseReport`] aggregates them for a run and can be printed or saved as
//! JSON.

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::parser::ByteRange;

/// What one range parser did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeStats {
    pub range: ByteRange,
    /// Rows emitted.
    pub rows: usize,
    /// Rows rejected for a column-count mismatch.
    pub rejected: usize,
    /// Bytes between the range start and where the cursor stopped.
    pub bytes_scanned: usize,
}

/// Aggregate over every range of one run, in range order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseReport {
    pub ranges: Vec<RangeStats>,
    pub elapsed: Duration,
}

impl ParseReport {
    #[must_use]
    pub fn new(ranges: Vec<RangeStats>, elapsed: Duration) -> Self {
        Self { ranges, elapsed }
    }

    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.ranges.iter().map(|r| r.rows).sum()
    }

    #[must_use]
    pub fn total_rejected(&self) -> usize {
        self.ranges.iter().map(|r| r.rejected).sum()
    }

    #[must_use]
    pub fn total_bytes_scanned(&self) -> usize {
        self.ranges.iter().map(|r| r.bytes_scanned).sum()
    }

    /// Ranges that owned no line start.
    #[must_use]
    pub fn idle_ranges(&self) -> usize {
        self.ranges
            .iter()
            .filter(|r| r.rows == 0 && r.rejected == 0)
            .count()
    }

    /// Summary plus per-range detail as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let elapsed_ms = u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX);
        json!({
            "ranges": self.ranges.len(),
            "rows": self.total_rows(),
            "rejected": self.total_rejected(),
            "bytes_scanned": self.total_bytes_scanned(),
            "idle_ranges": self.idle_ranges(),
            "execution_time_ms": elapsed_ms,
            "per_range": self.ranges,
        })
    }

    /// Log a one-line summary at `info` level.
    pub fn log_summary(&self) {
        info!(
            "parsed {} rows ({} rejected) over {} ranges in {:.3}s",
            self.total_rows(),
            self.total_rejected(),
            self.ranges.len(),
            self.elapsed.as_secs_f64()
        );
    }

    /// Print the report to stdout in a human-readable format.
    pub fn print(&self) {
        println!("\n========== Parse Report ==========");
        println!(
            "Execution Time: {:.3}s ({} ms)",
            self.elapsed.as_secs_f64(),
            self.elapsed.as_millis()
        );
        println!("----------------------------------");
        for (idx, r) in self.ranges.iter().enumerate() {
            println!(
                "range #{idx} {}: rows={} rejected={} scanned={}",
                r.range, r.rows, r.rejected, r.bytes_scanned
            );
        }
        println!("----------------------------------");
        println!(
            "total: rows={} rejected={} idle_ranges={}",
            self.total_rows(),
            self.total_rejected(),
            self.idle_ranges()
        );
        println!("==================================\n");
    }

    /// Save the report as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written to.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        let formatted = serde_json::to_string_pretty(&self.to_json())?;
        file.write_all(formatted.as_bytes())
            .with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}
