//! End-to-end tests for the visual-element operations: pictures, shapes,
//! mini-charts and full charts.

use quill_sheets::prelude::*;
use quill_sheets::DrawingBorder;

const PNG_STUB: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x01];

fn point(row: u32, column: u32) -> Point {
    Point::new(row, column).unwrap()
}

#[test]
fn test_insert_picture_from_bytes() {
    let mut document = Document::new();
    document.insert(
        InsertPicture::new(
            "Sheet1",
            "logo",
            PictureSource::Bytes(PNG_STUB.to_vec()),
            Range::parse("B2:E8").unwrap(),
        )
        .with_border(DrawingBorder::new(Color::BLACK, 1.5)),
    );
    assert!(!document.has_errors());

    let sheet = document.workbook().worksheet("Sheet1").unwrap();
    assert_eq!(sheet.pictures().len(), 1);
    let picture = &sheet.pictures()[0];
    assert_eq!(picture.name, "logo");
    assert_eq!(picture.anchor, Range::parse("B2:E8").unwrap());
    assert!(picture.border.is_some());
}

#[test]
fn test_insert_picture_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logo.png");
    std::fs::write(&path, PNG_STUB).unwrap();

    let mut document = Document::new();
    document.insert(InsertPicture::new(
        "Sheet1",
        "logo",
        PictureSource::Path(path),
        Range::parse("A1:C4").unwrap(),
    ));
    assert!(!document.has_errors());
    assert_eq!(
        document.workbook().worksheet("Sheet1").unwrap().pictures().len(),
        1
    );
}

#[test]
fn test_insert_picture_missing_file_is_an_error_not_a_noop() {
    let mut document = Document::new();
    document.insert(InsertPicture::new(
        "Sheet1",
        "logo",
        PictureSource::Path("/definitely/not/here.png".into()),
        Range::parse("A1:C4").unwrap(),
    ));

    let result = document.last_result().unwrap();
    assert!(!result.is_success());
    assert!(matches!(result.errors()[0], OpError::NotFound(_)));
    assert_eq!(result.before(), result.after());
}

#[test]
fn test_duplicate_drawing_names_are_rejected_per_sheet() {
    let mut document = Document::new();
    document
        .insert(InsertWorksheet::new("Other"))
        .insert(InsertShape::new(
            "Sheet1",
            "badge",
            ShapeKind::Rectangle,
            Range::parse("A1:B2").unwrap(),
        ))
        // Same name on another sheet is fine
        .insert(InsertShape::new(
            "Other",
            "badge",
            ShapeKind::Rectangle,
            Range::parse("A1:B2").unwrap(),
        ))
        // Same name on the same sheet collides, even across element kinds
        .insert(InsertPicture::new(
            "Sheet1",
            "badge",
            PictureSource::Bytes(PNG_STUB.to_vec()),
            Range::parse("D1:E2").unwrap(),
        ));

    assert_eq!(document.results().len(), 4);
    assert!(document.results()[1].is_success());
    assert!(document.results()[2].is_success());

    let collision = &document.results()[3];
    assert!(!collision.is_success());
    assert_eq!(collision.errors(), &[OpError::Duplicate("badge".into())]);
}

#[test]
fn test_insert_shape_translates_descriptors() {
    let mut document = Document::new();
    document.insert(
        InsertShape::new(
            "Sheet1",
            "note",
            ShapeKind::RoundedRectangle,
            Range::parse("C3:F9").unwrap(),
        )
        .with_text("Reviewed")
        .with_fill(Color::rgb(255, 250, 205))
        .with_line(DrawingBorder::new(Color::GRAY, 0.75))
        .with_shadow(true),
    );
    assert!(!document.has_errors());

    let sheet = document.workbook().worksheet("Sheet1").unwrap();
    let shape = &sheet.shapes()[0];
    assert_eq!(shape.kind, ShapeKind::RoundedRectangle);
    assert_eq!(shape.text.as_deref(), Some("Reviewed"));
    assert_eq!(shape.fill, Some(Color::rgb(255, 250, 205)));
    assert!(shape.shadow);
}

#[test]
fn test_insert_mini_chart_expands_fixed_size() {
    let mut document = Document::new();
    document.insert(
        InsertMiniChart::new(
            "Sheet1",
            "trend",
            point(2, 4),
            Sparkline::new(SparklineKind::Column, Range::parse("A2:A13").unwrap())
                .with_color(Color::BLUE),
        )
        .with_extent(1, 3),
    );
    assert!(!document.has_errors());

    let sheet = document.workbook().worksheet("Sheet1").unwrap();
    let group = &sheet.sparkline_groups()[0];
    assert_eq!(group.location, Range::parse("D2:F2").unwrap());
    assert_eq!(group.sparkline.color, Color::BLUE);
}

#[test]
fn test_insert_chart_with_series() {
    let chart = Chart::new(ChartType::ColumnClustered)
        .with_title("Totals by region")
        .with_series(
            DataSeries::new(DataReference::formula("Sheet1!$B$2:$B$10"))
                .with_name("Totals")
                .with_categories(DataReference::formula("Sheet1!$A$2:$A$10")),
        )
        .with_legend(Legend::new(LegendPosition::Bottom));

    let mut document = Document::new();
    document.insert(InsertChart::new(
        "Sheet1",
        "totals",
        chart,
        Range::parse("D2:K20").unwrap(),
    ));
    assert!(!document.has_errors());

    let sheet = document.workbook().worksheet("Sheet1").unwrap();
    let embedded = &sheet.charts()[0];
    assert_eq!(embedded.name, "totals");
    assert_eq!(embedded.chart.title.as_deref(), Some("Totals by region"));
    assert_eq!(embedded.chart.series.len(), 1);
}

#[test]
fn test_insert_chart_without_series_fails_validation() {
    let mut document = Document::new();
    document.insert(InsertChart::new(
        "Sheet1",
        "empty",
        Chart::new(ChartType::Line),
        Range::parse("A1:D8").unwrap(),
    ));

    let result = document.last_result().unwrap();
    assert!(!result.is_success());
    assert!(matches!(result.errors()[0], OpError::Validation(_)));
}

#[test]
fn test_absent_anchor_is_a_noop() {
    let mut document = Document::new();
    document.insert(InsertShape::optional(
        "Sheet1",
        "floating",
        ShapeKind::Ellipse,
        None,
    ));

    let result = document.last_result().unwrap();
    assert!(result.is_success());
    assert_eq!(result.before(), result.after());
    assert!(document
        .workbook()
        .worksheet("Sheet1")
        .unwrap()
        .shapes()
        .is_empty());
}
