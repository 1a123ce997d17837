//! End-to-end tests for the tabular, aggregate and XML insert operations.

use chrono::NaiveDate;
use quill_sheets::prelude::*;

fn point(row: u32, column: u32) -> Point {
    Point::new(row, column).unwrap()
}

#[test]
fn test_insert_rows_advances_one_row_per_entry() {
    let rows = vec![
        vec![Value::from("a"), Value::from(1.0)],
        vec![Value::from("b"), Value::from(2.0)],
        vec![Value::from("c"), Value::from(3.0)],
    ];

    let mut document = Document::new();
    document.insert(InsertRows::new("Sheet1", point(5, 2), rows));
    assert!(!document.has_errors());

    let result = document.last_result().unwrap();
    assert_eq!(
        result.context().touched,
        Some(Range::parse("B5:C7").unwrap())
    );

    let sheet = document.workbook().worksheet("Sheet1").unwrap();
    assert_eq!(sheet.value(5, 2), CellValue::text("a"));
    assert_eq!(sheet.value(6, 2), CellValue::text("b"));
    assert_eq!(sheet.value(7, 3), CellValue::text("3"));
}

#[test]
fn test_insert_table_writes_header_then_rows() {
    let header_style = StyleDescriptor::new("TableHeader").with_fill(Color::BLUE);
    let value_style = StyleDescriptor::new("TableValue").with_banded_fill(Color::WHITE, Color::GRAY);

    let mut document = Document::new();
    document.insert(
        InsertTable::new(
            "Sheet1",
            point(1, 1),
            vec![
                vec![Value::from("north"), Value::from(10.0)],
                vec![Value::from("south"), Value::from(20.0)],
            ],
        )
        .with_header(vec!["Region".into(), "Total".into()])
        .with_header_style(header_style)
        .with_value_style(value_style),
    );
    assert!(!document.has_errors());

    let result = document.last_result().unwrap();
    assert_eq!(
        result.context().touched,
        Some(Range::parse("A1:B3").unwrap())
    );

    let sheet = document.workbook().worksheet("Sheet1").unwrap();
    assert_eq!(sheet.value(1, 1), CellValue::text("Region"));
    assert_eq!(sheet.value(2, 1), CellValue::text("north"));
    assert_eq!(sheet.value(3, 2), CellValue::text("20"));

    // Header row 1 is odd but the header style has no alternate; data rows
    // band by parity
    assert_eq!(sheet.style_name(1, 1), Some("TableHeader"));
    assert_eq!(sheet.style_name(2, 1), Some("TableValue"));
    assert_eq!(sheet.style_name(3, 1), Some("TableValue_Alternate"));
}

#[test]
fn test_insert_dictionary_dispatches_value_styles_by_type() {
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let entries = vec![
        ("Name".to_string(), Value::from("Quill")),
        ("Count".to_string(), Value::from(42.0)),
        ("Since".to_string(), Value::from(date)),
        ("Active".to_string(), Value::from(true)),
    ];

    let mut document = Document::new();
    document.insert(
        InsertDictionary::new("Sheet1", point(1, 1), entries)
            .with_key_style(StyleDescriptor::new("Key"))
            .with_text_style(StyleDescriptor::new("Text"))
            .with_number_style(
                StyleDescriptor::new("Num").with_format(ValueFormat::number(0)),
            )
            .with_date_time_style(
                StyleDescriptor::new("Date")
                    .with_format(ValueFormat::date_time("%d.%m.%Y")),
            )
            .with_fallback_style(StyleDescriptor::new("Other")),
    );
    assert!(!document.has_errors());

    let sheet = document.workbook().worksheet("Sheet1").unwrap();
    // Keys go down the anchor column
    assert_eq!(sheet.value(1, 1), CellValue::text("Name"));
    assert_eq!(sheet.value(4, 1), CellValue::text("Active"));
    assert_eq!(sheet.style_name(2, 1), Some("Key"));

    // Values one column right, styled by type and formatted accordingly
    assert_eq!(sheet.style_name(1, 2), Some("Text"));
    assert_eq!(sheet.style_name(2, 2), Some("Num"));
    assert_eq!(sheet.value(2, 2), CellValue::text("42"));
    assert_eq!(sheet.style_name(3, 2), Some("Date"));
    assert_eq!(sheet.value(3, 2), CellValue::text("01.05.2024"));
    assert_eq!(sheet.style_name(4, 2), Some("Other"));
}

#[test]
fn test_insert_aggregate_writes_sum_formula() {
    let mut document = Document::new();
    document.insert(InsertAggregate::new(
        "Sheet1",
        point(14, 2),
        AggregateDefinition::new(AggregateKind::Sum, Range::parse("B4:B13").unwrap()),
    ));
    assert!(!document.has_errors());

    let sheet = document.workbook().worksheet("Sheet1").unwrap();
    assert_eq!(sheet.value(14, 2), CellValue::formula("=SUM(B4:B13)"));
}

#[test]
fn test_insert_aggregate_with_auto_filter_uses_subtotal() {
    let mut document = Document::new();
    document.insert(InsertAggregate::new(
        "Sheet1",
        point(14, 2),
        AggregateDefinition::new(AggregateKind::Sum, Range::parse("B4:B13").unwrap())
            .with_auto_filter(true),
    ));
    assert!(!document.has_errors());

    let sheet = document.workbook().worksheet("Sheet1").unwrap();
    assert_eq!(sheet.value(14, 2), CellValue::formula("=SUBTOTAL(9,B4:B13)"));
}

#[test]
fn test_insert_aggregate_against_other_sheet() {
    let mut document = Document::new();
    document
        .insert(InsertWorksheet::new("Data"))
        .insert(InsertAggregate::new(
            "Sheet1",
            point(1, 1),
            AggregateDefinition::new(AggregateKind::Average, Range::parse("C2:C20").unwrap())
                .with_worksheet("Data"),
        ));
    assert!(!document.has_errors());

    let sheet = document.workbook().worksheet("Sheet1").unwrap();
    assert_eq!(
        sheet.value(1, 1),
        CellValue::formula("=AVERAGE(Data!C2:C20)")
    );
}

#[test]
fn test_insert_aggregate_missing_source_sheet_fails() {
    let mut document = Document::new();
    document.insert(InsertAggregate::new(
        "Sheet1",
        point(1, 1),
        AggregateDefinition::new(AggregateKind::Count, Range::parse("A1:A5").unwrap())
            .with_worksheet("Nowhere"),
    ));

    let result = document.last_result().unwrap();
    assert!(!result.is_success());
    assert_eq!(result.errors(), &[OpError::SheetNotFound("Nowhere".into())]);
}

#[test]
fn test_insert_xml_rows() {
    let xml = r#"<report>
        <row><region>North</region><total>120</total></row>
        <row><region>South</region><total>80</total></row>
    </report>"#;

    let mut document = Document::new();
    document.insert(InsertXml::new("Sheet1", point(2, 1), xml));
    assert!(!document.has_errors());

    let sheet = document.workbook().worksheet("Sheet1").unwrap();
    assert_eq!(sheet.value(2, 1), CellValue::text("North"));
    assert_eq!(sheet.value(2, 2), CellValue::text("120"));
    assert_eq!(sheet.value(3, 1), CellValue::text("South"));
    assert_eq!(
        document.last_result().unwrap().context().touched,
        Some(Range::parse("A2:B3").unwrap())
    );
}

#[test]
fn test_insert_xml_malformed_document_fails() {
    let mut document = Document::new();
    document.insert(InsertXml::new("Sheet1", point(1, 1), "<rows><row></rows>"));

    let result = document.last_result().unwrap();
    assert!(!result.is_success());
    assert!(matches!(result.errors()[0], OpError::Validation(_)));
}

#[test]
fn test_copy_range_across_sheets() {
    let mut document = Document::new();
    document
        .insert(InsertWorksheet::new("Target"))
        .insert(InsertRows::new(
            "Sheet1",
            point(1, 1),
            vec![
                vec![Value::from("x"), Value::from("y")],
                vec![Value::from("z"), Value::from("w")],
            ],
        ))
        .insert(
            InsertCopyRange::new("Target", Range::parse("A1:B2").unwrap(), point(10, 5))
                .with_source_sheet("Sheet1"),
        );
    assert!(!document.has_errors());

    let target = document.workbook().worksheet("Target").unwrap();
    assert_eq!(target.value(10, 5), CellValue::text("x"));
    assert_eq!(target.value(11, 6), CellValue::text("w"));
}

#[test]
fn test_transpose_produces_swapped_block_with_styles() {
    let mut document = Document::new();
    // 2 columns x 10 rows of labels/values
    let rows: Vec<Vec<Value>> = (1..=10)
        .map(|i| vec![Value::from(format!("label{}", i)), Value::from(f64::from(i))])
        .collect();
    document
        .insert(InsertRows::new("Sheet1", point(1, 1), rows))
        .insert(
            InsertTransposeRange::new("Sheet1", Range::parse("A1:B10").unwrap(), point(20, 1))
                .with_header_style(StyleDescriptor::new("TH"))
                .with_value_style(StyleDescriptor::new("TV")),
        );
    assert!(!document.has_errors());

    let result = document.last_result().unwrap();
    // 10 columns x 2 rows, exactly bounded
    assert_eq!(
        result.context().touched,
        Some(Range::parse("A20:J21").unwrap())
    );

    let sheet = document.workbook().worksheet("Sheet1").unwrap();
    for column in 1..=10 {
        assert_eq!(sheet.style_name(20, column), Some("TH"));
        assert_eq!(sheet.style_name(21, column), Some("TV"));
    }
    // No overlap or gap around the block
    assert!(sheet.style_name(19, 1).is_none());
    assert!(sheet.style_name(22, 1).is_none());
    assert!(sheet.style_name(20, 11).is_none());
}
