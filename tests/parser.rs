use partial_csv::testing::*;
use partial_csv::*;
use std::sync::Arc;

fn row(fields: &[&str]) -> Row {
    fields.iter().map(|f| (*f).to_string()).collect()
}

fn schema(text: &str, config: CsvConfig) -> anyhow::Result<Arc<CsvSchema>> {
    Ok(CsvSchema::from_bytes(text, config)?.shared())
}

fn expect_three_rows(parser: &mut PartialCsvParser) -> anyhow::Result<()> {
    assert_eq!(parser.next_row()?, Some(row(&["101", "102"])));
    assert_eq!(parser.next_row()?, Some(row(&["201", "202"])));
    assert_eq!(parser.next_row()?, Some(row(&["301", "302"])));
    assert_eq!(parser.next_row()?, None);
    Ok(())
}

#[test]
fn one_worker_with_header_with_last_nl() -> anyhow::Result<()> {
    let file = TempCsv::new(WITH_HEADER_WITH_LAST_NL)?;
    let schema = file.schema(CsvConfig::default())?;
    assert_eq!(schema.headers()?, ["col1", "col2"]);
    expect_three_rows(&mut PartialCsvParser::whole_body(schema)?)
}

#[test]
fn one_worker_with_header_without_last_nl() -> anyhow::Result<()> {
    let file = TempCsv::new(WITH_HEADER_WITHOUT_LAST_NL)?;
    let schema = file.schema(CsvConfig::default())?;
    expect_three_rows(&mut PartialCsvParser::whole_body(schema)?)
}

#[test]
fn one_worker_without_header_with_last_nl() -> anyhow::Result<()> {
    let file = TempCsv::new(WITHOUT_HEADER_WITH_LAST_NL)?;
    let schema = file.schema(CsvConfig::default().with_header(false))?;
    expect_three_rows(&mut PartialCsvParser::whole_body(schema)?)
}

#[test]
fn one_worker_tsv() -> anyhow::Result<()> {
    let file = TempCsv::new(WITH_HEADER_WITH_LAST_NL_TSV)?;
    let schema = file.schema(CsvConfig::tsv())?;
    expect_three_rows(&mut PartialCsvParser::whole_body(schema)?)
}

#[test]
fn full_body_scenario() -> anyhow::Result<()> {
    let s = schema("a,b,c\n1,2,3\n4,5,6\n", CsvConfig::default())?;
    let mut parser = PartialCsvParser::new(s, ParseFrom::BodyStart, ParseTo::FileEnd)?;
    assert_eq!(parser.range(), ByteRange::new(6, 17));
    assert_eq!(parser.next_row()?, Some(row(&["1", "2", "3"])));
    assert_eq!(parser.next_row()?, Some(row(&["4", "5", "6"])));
    assert_eq!(parser.next_row()?, None);
    Ok(())
}

#[test]
fn split_inside_second_row() -> anyhow::Result<()> {
    // "4,5,6" starts at byte 12; cut between "4," and "5,6".
    let s = schema("a,b,c\n1,2,3\n4,5,6\n", CsvConfig::default())?;
    let k = 14;
    let a: Vec<Row> =
        PartialCsvParser::new(Arc::clone(&s), ParseFrom::BodyStart, ParseTo::Offset(k - 1))?
            .collect::<Result<_, _>>()?;
    let b: Vec<Row> = PartialCsvParser::new(s, ParseFrom::Offset(k), ParseTo::FileEnd)?
        .collect::<Result<_, _>>()?;

    assert_eq!(a, vec![row(&["1", "2", "3"]), row(&["4", "5", "6"])]);
    assert!(b.is_empty());
    Ok(())
}

#[test]
fn range_starting_exactly_at_line_start_owns_it() -> anyhow::Result<()> {
    let s = schema("a,b,c\n1,2,3\n4,5,6\n", CsvConfig::default())?;
    let a = collect_rows(&s, ByteRange::new(6, 11))?;
    let b = collect_rows(&s, ByteRange::new(12, 17))?;
    assert_eq!(a, vec![row(&["1", "2", "3"])]);
    assert_eq!(b, vec![row(&["4", "5", "6"])]);
    Ok(())
}

#[test]
fn range_inside_one_line_owns_nothing() -> anyhow::Result<()> {
    let s = schema("h\naaaaaaaaaaaaaaaa", CsvConfig::default())?;
    // (1) covers the line start, (2) and (3) sit inside it.
    assert_eq!(collect_rows(&s, ByteRange::new(2, 5))?.len(), 1);
    assert!(collect_rows(&s, ByteRange::new(6, 11))?.is_empty());
    assert!(collect_rows(&s, ByteRange::new(12, 17))?.is_empty());
    Ok(())
}

#[test]
fn middle_range_reaching_next_line_start_owns_it() -> anyhow::Result<()> {
    // body: "aaaaaaaaaaaaa\nbbbbbbbbbbb", "b..." starts at 16
    let s = schema("h\naaaaaaaaaaaaa\nbbbbbbbbbbb", CsvConfig::default())?;
    assert_eq!(collect_offsets(&s, ByteRange::new(2, 6))?, vec![2]);
    assert_eq!(collect_offsets(&s, ByteRange::new(7, 16))?, vec![16]);
    assert!(collect_offsets(&s, ByteRange::new(17, 26))?.is_empty());

    // Same text, middle range stops on the terminator: it owns nothing.
    assert!(collect_offsets(&s, ByteRange::new(7, 15))?.is_empty());
    assert_eq!(collect_offsets(&s, ByteRange::new(16, 26))?, vec![16]);
    Ok(())
}

#[test]
fn exhaustion_is_idempotent() -> anyhow::Result<()> {
    let s = schema(WITH_HEADER_WITHOUT_LAST_NL, CsvConfig::default())?;
    let mut parser = PartialCsvParser::whole_body(Arc::clone(&s))?;
    while parser.next_row()?.is_some() {}
    assert_exhausted(&mut parser, 5);

    let mut partial = PartialCsvParser::for_range(s, ByteRange::new(12, 14))?;
    assert_exhausted(&mut partial, 5);
    Ok(())
}

#[test]
fn cursor_never_moves_backwards() -> anyhow::Result<()> {
    let s = schema(&generate_csv(20, 3, true), CsvConfig::default())?;
    let mut parser = PartialCsvParser::whole_body(s)?;
    let mut last = parser.position();
    while parser.next_row()?.is_some() {
        assert!(parser.position() > last);
        last = parser.position();
    }
    parser.next_row()?;
    assert_eq!(parser.position(), last);
    Ok(())
}

#[test]
fn header_only_file_yields_nothing() -> anyhow::Result<()> {
    for text in ["a,b,c\n", "a,b,c"] {
        let s = schema(text, CsvConfig::default())?;
        let mut parser = PartialCsvParser::whole_body(s)?;
        assert!(parser.range().is_empty());
        assert_eq!(parser.next_row()?, None);
        assert_exhausted(&mut parser, 3);
    }
    Ok(())
}

#[test]
fn from_at_end_of_buffer_is_empty() -> anyhow::Result<()> {
    let s = schema("a,b\n1,2", CsvConfig::default())?;
    let size = s.file_size();
    let mut parser = PartialCsvParser::new(s, ParseFrom::Offset(size), ParseTo::FileEnd)?;
    assert_eq!(parser.next_row()?, None);
    assert_eq!(parser.bytes_scanned(), 0);
    Ok(())
}

#[test]
fn range_bounds_are_checked() -> anyhow::Result<()> {
    let s = schema("a,b\n1,2\n", CsvConfig::default())?;
    let err = PartialCsvParser::new(Arc::clone(&s), ParseFrom::Offset(3), ParseTo::FileEnd)
        .unwrap_err();
    assert!(matches!(
        err,
        CsvError::FromBeforeBody {
            from: 3,
            body_offset: 4
        }
    ));

    let err = PartialCsvParser::new(Arc::clone(&s), ParseFrom::BodyStart, ParseTo::Offset(8))
        .unwrap_err();
    assert!(matches!(err, CsvError::ToPastEnd { to: 8, file_size: 8 }));
    assert!(!err.is_recoverable());

    // from > to is valid and empty.
    let mut parser = PartialCsvParser::new(s, ParseFrom::Offset(7), ParseTo::Offset(5))?;
    assert_eq!(parser.next_row()?, None);
    Ok(())
}

#[test]
fn mismatch_with_header() -> anyhow::Result<()> {
    let file = TempCsv::new(DIFFERENT_NUMBER_OF_COLUMNS)?;
    let schema = file.schema(CsvConfig::default())?;
    assert_eq!(schema.headers()?, ["a", "a", "a"]);

    let mut parser = PartialCsvParser::whole_body(schema)?;
    assert_eq!(parser.next_row()?, Some(row(&["b", "b", "b"])));
    let err = parser.next_row().unwrap_err();
    assert!(err.is_recoverable());
    match &err {
        CsvError::ColumnMismatch {
            offset,
            found,
            expected,
            line,
        } => {
            assert_eq!(*offset, 12);
            assert_eq!(*found, 2);
            assert_eq!(*expected, 3);
            assert_eq!(line, "c,c");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(err.to_string().contains("c,c"));
    Ok(())
}

#[test]
fn mismatch_without_header() -> anyhow::Result<()> {
    let s = schema(DIFFERENT_NUMBER_OF_COLUMNS, CsvConfig::default().with_header(false))?;
    let mut parser = PartialCsvParser::whole_body(s)?;
    assert_eq!(parser.next_row()?, Some(row(&["a", "a", "a"])));
    assert_eq!(parser.next_row()?, Some(row(&["b", "b", "b"])));
    assert!(matches!(
        parser.next_row(),
        Err(CsvError::ColumnMismatch { found: 2, .. })
    ));
    Ok(())
}

#[test]
fn parsing_continues_after_a_mismatch() -> anyhow::Result<()> {
    let s = schema("a,b\n1,2\n3\n4,5\n", CsvConfig::default())?;
    let results: Vec<_> = PartialCsvParser::whole_body(s)?.collect();
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(CsvError::ColumnMismatch { offset: 8, .. })));
    assert_eq!(results[2].as_ref().ok(), Some(&row(&["4", "5"])));
    Ok(())
}

#[test]
fn empty_fields_are_kept() -> anyhow::Result<()> {
    let s = schema("a,b,c\n,,\nx,,z\n", CsvConfig::default())?;
    let rows = collect_body(&s)?;
    assert_eq!(rows, vec![row(&["", "", ""]), row(&["x", "", "z"])]);
    Ok(())
}

#[test]
fn raw_records_borrow_the_buffer() -> anyhow::Result<()> {
    let s = schema("a,b,c\n1,2,3\n4,5,6\n", CsvConfig::default())?;
    let mut parser = PartialCsvParser::whole_body(s)?;
    let first = parser.next_record()?.map(|r| (r.offset, r.bytes.to_vec()));
    assert_eq!(first, Some((6, b"1,2,3".to_vec())));
    let second = parser.next_record()?.map(|r| r.offset);
    assert_eq!(second, Some(12));
    assert!(parser.next_record()?.is_none());
    Ok(())
}

#[test]
fn custom_line_terminator() -> anyhow::Result<()> {
    let s = schema(
        "k|v;1|one;2|two",
        CsvConfig::default()
            .with_field_terminator(b'|')
            .with_line_terminator(b';'),
    )?;
    assert_eq!(s.body_offset(), 4);
    let rows = collect_body(&s)?;
    assert_eq!(rows, vec![row(&["1", "one"]), row(&["2", "two"])]);
    Ok(())
}
