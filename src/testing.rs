//! Testing utilities for range-partitioned parsing.
//!
//! This module provides:
//!
//! - **Fixtures**: small delimited files and a [`TempCsv`] temp-file wrapper
//! - **Generators**: [`generate_csv`] for larger deterministic inputs
//! - **Assertions**: [`assert_partition_complete`] checks that a set of ranges
//!   reproduces the whole-body parse with no duplicate lines
//!
//! # Quick Start
//!
//! ```
//! use partial_csv::*;
//! use partial_csv::testing::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let file = TempCsv::new(generate_csv(50, 3, true))?;
//! let schema = file.schema(CsvConfig::default())?;
//!
//! assert_partition_complete(&schema, &partition_body(&schema, 7));
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;
