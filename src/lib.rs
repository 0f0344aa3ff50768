//! # partial-csv
//!
//! Parse one large delimited-text file as a set of **independent byte ranges**, so
//! that N workers can each take a slice of the same file without double-counting
//! or dropping rows, and without knowing where the lines begin.
//!
//! Splitting by byte offset is O(1); splitting by row count needs a full scan.
//! This crate makes the cheap split safe.
//!
//! ## Key Features
//!
//! - **Approximate ranges** - cut the body anywhere; each line goes to the range
//!   covering its first byte
//! - **Shared, read-only schema** - one memory-mapped [`CsvSchema`] per file,
//!   shared by `Arc` across any number of [`PartialCsvParser`]s
//! - **Typed errors** - setup errors abort; column-count mismatches are
//!   recoverable and carry the offending line
//! - **Optional parallel driver** - [`parse_par`] runs one parser per range on rayon
//!   (feature `parallel-io`)
//!
//! ## Quick Start
//!
//! ```
//! use partial_csv::*;
//!
//! # fn main() -> Result<(), CsvError> {
//! let schema = CsvSchema::from_bytes("a,b,c\n1,2,3\n4,5,6\n", CsvConfig::default())?.shared();
//! assert_eq!(schema.column_count(), 3);
//! assert_eq!(schema.headers()?, ["a", "b", "c"]);
//! assert_eq!(schema.body_offset(), 6);
//!
//! let mut parser = PartialCsvParser::whole_body(schema)?;
//! assert_eq!(parser.next_row()?, Some(vec!["1".to_string(), "2".into(), "3".into()]));
//! assert_eq!(parser.next_row()?, Some(vec!["4".to_string(), "5".into(), "6".into()]));
//! assert_eq!(parser.next_row()?, None);
//! # Ok(())
//! # }
//! ```
//!
//! ## Splitting Across Workers
//!
//! ```no_run
//! use partial_csv::*;
//! use std::thread;
//!
//! # fn main() -> anyhow::Result<()> {
//! let schema = CsvSchema::open("in.csv", CsvConfig::default().with_header(false))?.shared();
//!
//! let handles: Vec<_> = partition_body(&schema, 4)
//!     .into_iter()
//!     .map(|range| {
//!         let schema = schema.clone();
//!         thread::spawn(move || -> Result<usize, CsvError> {
//!             let parser = PartialCsvParser::for_range(schema, range)?;
//!             parser.map(|row| row.map(|r| r.len())).sum()
//!         })
//!     })
//!     .collect();
//!
//! let mut fields = 0;
//! for h in handles {
//!     fields += h.join().expect("worker panicked")?;
//! }
//! println!("{fields}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`buffer`] - read-only byte buffers (memory map or owned vector)
//! - [`line`] - locating the line around a byte position
//! - [`fields`] - splitting a line on a single-byte delimiter
//! - [`schema`] - column count, headers and body offset of a file
//! - [`parser`] - the range parser and its ownership rule
//! - [`partition`] - computing approximate ranges
//! - [`io`] - draining ranges into rows under an [`ErrorMode`]
//! - [`parallel`] - rayon driver (feature `parallel-io`)
//! - [`validation`] - error modes and collector for malformed rows
//! - [`metrics`] - per-range statistics and run reports
//! - [`testing`] - fixtures and partition assertions

pub mod buffer;
pub mod config;
pub mod error;
pub mod fields;
pub mod io;
pub mod line;
pub mod metrics;
pub mod parser;
pub mod partition;
pub mod schema;
pub mod testing;
pub mod validation;

#[cfg_attr(docsrs, doc(cfg(feature = "parallel-io")))]
#[cfg(feature = "parallel-io")]
pub mod parallel;

// General re-exports
pub use buffer::ByteBuffer;
pub use config::CsvConfig;
pub use error::{CsvError, Terminator};
pub use fields::{Row, count_fields, split_fields};
pub use io::{RangeOutput, read_all, read_csv_rows, read_range};
pub use line::{LineSpan, locate_line};
pub use metrics::{ParseReport, RangeStats};
pub use parser::{ByteRange, ParseFrom, ParseTo, PartialCsvParser, RawLine};
pub use partition::{partition_body, split_at_points};
pub use schema::CsvSchema;
pub use validation::{ErrorCollector, ErrorMode, RowError};

// Gated re-exports
#[cfg(feature = "parallel-io")]
pub use parallel::{ParsedRanges, count_columns_par, parse_par, parse_partitioned};
