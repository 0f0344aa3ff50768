#![cfg(feature = "parallel-io")]

use partial_csv::testing::*;
use partial_csv::*;
use std::sync::{Arc, Mutex};

fn schema(text: &str) -> anyhow::Result<Arc<CsvSchema>> {
    Ok(CsvSchema::from_bytes(text, CsvConfig::default())?.shared())
}

#[test]
fn parallel_rows_match_single_pass() -> anyhow::Result<()> {
    let s = schema(&generate_csv(200, 6, true))?;
    let single = read_all(&s, ErrorMode::FailFast, None)?.rows;
    for workers in [1, 2, 3, 4, 8, 13, 64] {
        let parsed = parse_par(&s, Some(workers), ErrorMode::FailFast, None)?;
        assert_eq!(parsed.rows.len(), workers);
        assert_eq!(parsed.row_count(), 200);
        assert_eq!(parsed.into_rows(), single, "workers = {workers}");
    }
    Ok(())
}

#[test]
fn default_worker_count() -> anyhow::Result<()> {
    let s = schema(&generate_csv(50, 3, true))?;
    let parsed = parse_par(&s, None, ErrorMode::FailFast, None)?;
    assert_eq!(parsed.report.ranges.len(), num_cpus::get().min(s.body_len()));
    assert_eq!(parsed.row_count(), 50);
    Ok(())
}

#[test]
fn counts_every_field() -> anyhow::Result<()> {
    // Without a header the column count comes from row one, which is still
    // part of the body.
    let s = CsvSchema::from_bytes(
        generate_csv(120, 7, false),
        CsvConfig::default().with_header(false),
    )?
    .shared();
    for workers in [1, 4, 9] {
        assert_eq!(count_columns_par(&s, Some(workers))?, 120 * 7);
    }
    Ok(())
}

#[test]
fn explicit_ranges_are_respected() -> anyhow::Result<()> {
    let s = schema("a,b,c\n1,2,3\n4,5,6\n")?;
    let ranges = split_at_points(&s, &[14]);
    let parsed = parse_partitioned(&s, &ranges, ErrorMode::FailFast, None)?;
    assert_eq!(parsed.rows[0].len(), 2);
    assert!(parsed.rows[1].is_empty());
    assert_eq!(parsed.report.idle_ranges(), 1);
    assert_eq!(parsed.report.ranges[0].range, ByteRange::new(6, 13));
    Ok(())
}

const MIXED: &str = "a,b\n1,2\n3\n4,5\n6,7,8\n9,10\n";

#[test]
fn fail_fast_stops_the_run() -> anyhow::Result<()> {
    let s = schema(MIXED)?;
    let err = parse_par(&s, Some(3), ErrorMode::FailFast, None).unwrap_err();
    let root = err
        .downcast_ref::<CsvError>()
        .expect("root cause is a CsvError");
    assert!(matches!(root, CsvError::ColumnMismatch { .. }));
    assert!(count_columns_par(&s, Some(2)).is_err());
    Ok(())
}

#[test]
fn skip_invalid_counts_rejections() -> anyhow::Result<()> {
    let s = schema(MIXED)?;
    let parsed = parse_par(&s, Some(4), ErrorMode::SkipInvalid, None)?;
    assert_eq!(parsed.report.total_rejected(), 2);
    assert_eq!(parsed.report.total_rows(), 3);
    assert_eq!(
        parsed.into_rows(),
        vec![
            vec!["1".to_string(), "2".to_string()],
            vec!["4".to_string(), "5".to_string()],
            vec!["9".to_string(), "10".to_string()],
        ]
    );
    Ok(())
}

#[test]
fn log_and_continue_collects_rejections() -> anyhow::Result<()> {
    let s = schema(MIXED)?;
    let collector = Arc::new(Mutex::new(ErrorCollector::new()));
    let parsed = parse_par(
        &s,
        Some(5),
        ErrorMode::LogAndContinue,
        Some(Arc::clone(&collector)),
    )?;
    assert_eq!(parsed.row_count(), 3);

    let collector = collector.lock().unwrap();
    assert_eq!(collector.error_count(), 2);
    let sorted = collector.sorted_errors();
    assert_eq!(sorted[0].offset, 8);
    assert_eq!(sorted[0].line, "3");
    assert_eq!(sorted[0].found, 1);
    assert_eq!(sorted[1].line, "6,7,8");
    assert_eq!(sorted[1].expected, 2);
    Ok(())
}

#[test]
fn header_only_file_parses_to_nothing() -> anyhow::Result<()> {
    for text in ["a,b\n", "a,b"] {
        let s = schema(text)?;
        let parsed = parse_par(&s, Some(4), ErrorMode::FailFast, None)?;
        assert_eq!(parsed.row_count(), 0);
        assert!(parsed.report.ranges.is_empty());
        assert_eq!(count_columns_par(&s, None)?, 0);
    }
    Ok(())
}

#[test]
fn report_totals_add_up() -> anyhow::Result<()> {
    let s = schema(&generate_csv(40, 2, true))?;
    let parsed = parse_par(&s, Some(6), ErrorMode::FailFast, None)?;
    let report = &parsed.report;
    assert_eq!(report.total_rows(), 40);
    assert_eq!(report.total_rejected(), 0);
    assert!(report.total_bytes_scanned() >= s.body_len());

    report.log_summary();

    let json = report.to_json();
    assert_eq!(json["rows"], 40);
    assert_eq!(json["ranges"], 6);
    assert_eq!(json["per_range"].as_array().map(Vec::len), Some(6));
    Ok(())
}
