//! Count every field of a large delimited file with N workers.
//!
//! Each worker gets an equal byte slice of the body and parses only the lines
//! whose first byte falls in its slice; the per-worker totals add up to the
//! single-pass count.
//!
//! Run with: cargo run --release --example parallel_count -- in.csv 8 [--no-header] [--tsv]
//!
//! Set `RUST_LOG=debug` to see per-range statistics.

use anyhow::{Context, Result, bail};
use partial_csv::*;
use std::env;
use std::sync::{Arc, Mutex};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: parallel_count <file> [workers] [--no-header] [--tsv]");
    };
    let mut workers = None;
    let mut config = CsvConfig::default();
    for arg in args {
        match arg.as_str() {
            "--no-header" => config = config.with_header(false),
            "--tsv" => config = config.with_field_terminator(b'\t'),
            n => workers = Some(n.parse::<usize>().with_context(|| format!("workers: {n}"))?),
        }
    }

    let schema = CsvSchema::open(&path, config)
        .with_context(|| format!("open {path}"))?
        .shared();
    println!(
        "{path}: {} bytes, {} columns, body at {}",
        schema.file_size(),
        schema.column_count(),
        schema.body_offset()
    );

    let collector = Arc::new(Mutex::new(ErrorCollector::new()));
    let parsed = parse_par(
        &schema,
        workers,
        ErrorMode::LogAndContinue,
        Some(Arc::clone(&collector)),
    )?;
    parsed.report.print();
    parsed.report.log_summary();

    let total_fields: usize = parsed.rows.iter().flatten().map(Vec::len).sum();
    println!("{total_fields}");

    let collector = collector
        .lock()
        .map_err(|_| anyhow::anyhow!("error collector lock poisoned"))?;
    if !collector.is_empty() {
        collector.log_errors();
        eprintln!("{collector}");
    }
    Ok(())
}
