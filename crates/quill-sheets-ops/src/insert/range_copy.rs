//! Copy and transpose rectangular ranges

use super::Extent;
use crate::error::OpError;
use crate::operation::{check_sheet_name, sheet_mut, ApplyOutcome, Operation, Validation};
use crate::resolve::StyleResolver;
use quill_sheets_core::{Point, Range, StyleDescriptor};
use quill_sheets_engine::{Cell, CellValue, Workbook};

/// Copies a rectangular source range (values and styles) to a destination
/// anchor, optionally from another worksheet.
#[derive(Debug, Clone)]
pub struct InsertCopyRange {
    sheet: String,
    source_sheet: Option<String>,
    source: Option<Range>,
    destination: Option<Point>,
}

impl InsertCopyRange {
    /// Copy `source` to `destination` on `sheet`
    pub fn new<S: Into<String>>(sheet: S, source: Range, destination: Point) -> Self {
        Self {
            sheet: sheet.into(),
            source_sheet: None,
            source: Some(source),
            destination: Some(destination),
        }
    }

    /// Build from optional configuration; a missing source or destination
    /// makes the operation a validated no-op
    pub fn optional<S: Into<String>>(
        sheet: S,
        source: Option<Range>,
        destination: Option<Point>,
    ) -> Self {
        Self {
            sheet: sheet.into(),
            source_sheet: None,
            source,
            destination,
        }
    }

    /// Read the source range from another worksheet
    pub fn with_source_sheet<S: Into<String>>(mut self, sheet: S) -> Self {
        self.source_sheet = Some(sheet.into());
        self
    }
}

impl Operation for InsertCopyRange {
    fn label(&self) -> &'static str {
        "insert-copy-range"
    }

    fn target_sheet(&self) -> Option<&str> {
        Some(&self.sheet)
    }

    fn validate(&self) -> Validation {
        if let Some(invalid) = check_sheet_name(&self.sheet) {
            return invalid;
        }
        if self.source.is_none() {
            return Validation::Skip("no source range");
        }
        if self.destination.is_none() {
            return Validation::Skip("no destination");
        }
        Validation::Ready
    }

    fn apply(
        &self,
        workbook: &mut Workbook,
        _styles: &mut StyleResolver,
    ) -> Result<ApplyOutcome, OpError> {
        let (Some(source), Some(destination)) = (self.source.as_ref(), self.destination.as_ref())
        else {
            return Err(OpError::Validation(
                "source range and destination are required".into(),
            ));
        };

        let source_sheet_name = self.source_sheet.as_deref().unwrap_or(&self.sheet);
        // Read everything first so the source may be the destination sheet
        let copied: Vec<(u32, u32, Cell)> = {
            let source_sheet = workbook
                .worksheet(source_sheet_name)
                .ok_or_else(|| OpError::SheetNotFound(source_sheet_name.to_string()))?;
            source
                .cells()
                .filter_map(|point| {
                    source_sheet.cell(point.row(), point.column()).map(|cell| {
                        (
                            point.row() - source.start().row(),
                            point.column() - source.start().column(),
                            cell.clone(),
                        )
                    })
                })
                .collect()
        };

        let sheet = sheet_mut(workbook, &self.sheet)?;
        for (row_offset, column_offset, cell) in copied {
            let row = destination.row().saturating_add(row_offset);
            let column = destination.column().saturating_add(column_offset);
            sheet.set_value(row, column, cell.value)?;
            if let Some(style) = cell.style {
                sheet.set_style_name(row, column, style)?;
            }
        }

        // The copy always covers the source's full rectangle at the anchor
        let end = Point::new(
            destination.row().saturating_add(source.row_count() - 1),
            destination.column().saturating_add(source.column_count() - 1),
        )
        .map_err(|err| OpError::Validation(err.to_string()))?;
        Ok(ApplyOutcome::touched(Range::new(*destination, end)))
    }
}

/// Copies a rectangular source range to a destination anchor with rows and
/// columns swapped, styling cells from the source's first column as headers
/// and everything else as values.
#[derive(Debug, Clone)]
pub struct InsertTransposeRange {
    sheet: String,
    source_sheet: Option<String>,
    source: Option<Range>,
    destination: Option<Point>,
    header_style: Option<StyleDescriptor>,
    value_style: Option<StyleDescriptor>,
}

impl InsertTransposeRange {
    /// Transpose `source` to `destination` on `sheet`
    pub fn new<S: Into<String>>(sheet: S, source: Range, destination: Point) -> Self {
        Self {
            sheet: sheet.into(),
            source_sheet: None,
            source: Some(source),
            destination: Some(destination),
            header_style: None,
            value_style: None,
        }
    }

    /// Build from optional configuration; a missing source or destination
    /// makes the operation a validated no-op
    pub fn optional<S: Into<String>>(
        sheet: S,
        source: Option<Range>,
        destination: Option<Point>,
    ) -> Self {
        Self {
            sheet: sheet.into(),
            source_sheet: None,
            source,
            destination,
            header_style: None,
            value_style: None,
        }
    }

    /// Read the source range from another worksheet
    pub fn with_source_sheet<S: Into<String>>(mut self, sheet: S) -> Self {
        self.source_sheet = Some(sheet.into());
        self
    }

    /// Style cells transposed from the source's first column
    pub fn with_header_style(mut self, style: StyleDescriptor) -> Self {
        self.header_style = Some(style);
        self
    }

    /// Style all other transposed cells
    pub fn with_value_style(mut self, style: StyleDescriptor) -> Self {
        self.value_style = Some(style);
        self
    }
}

impl Operation for InsertTransposeRange {
    fn label(&self) -> &'static str {
        "insert-transpose-range"
    }

    fn target_sheet(&self) -> Option<&str> {
        Some(&self.sheet)
    }

    fn validate(&self) -> Validation {
        if let Some(invalid) = check_sheet_name(&self.sheet) {
            return invalid;
        }
        if self.source.is_none() {
            return Validation::Skip("no source range");
        }
        if self.destination.is_none() {
            return Validation::Skip("no destination");
        }
        Validation::Ready
    }

    fn apply(
        &self,
        workbook: &mut Workbook,
        styles: &mut StyleResolver,
    ) -> Result<ApplyOutcome, OpError> {
        let (Some(source), Some(destination)) = (self.source.as_ref(), self.destination.as_ref())
        else {
            return Err(OpError::Validation(
                "source range and destination are required".into(),
            ));
        };

        let header_handle = styles.resolve_or_default(workbook, self.header_style.as_ref())?;
        let value_handle = styles.resolve_or_default(workbook, self.value_style.as_ref())?;

        let source_sheet_name = self.source_sheet.as_deref().unwrap_or(&self.sheet);
        let read: Vec<(u32, u32, CellValue)> = {
            let source_sheet = workbook
                .worksheet(source_sheet_name)
                .ok_or_else(|| OpError::SheetNotFound(source_sheet_name.to_string()))?;
            source
                .cells()
                .map(|point| {
                    (
                        point.row(),
                        point.column(),
                        source_sheet.value(point.row(), point.column()),
                    )
                })
                .collect()
        };

        let sheet = sheet_mut(workbook, &self.sheet)?;
        let mut extent = Extent::new(*destination);

        for (row, column, value) in read {
            // Transpose: the source's column offset becomes the row offset
            let row_offset = column - source.start().column();
            let column_offset = row - source.start().row();
            let target = Point::new(
                destination.row().saturating_add(row_offset),
                destination.column().saturating_add(column_offset),
            )
            .map_err(|err| OpError::Validation(err.to_string()))?;

            let handle = if column == source.start().column() {
                &header_handle
            } else {
                &value_handle
            };

            sheet.set_value(target.row(), target.column(), value)?;
            sheet.set_style_name(
                target.row(),
                target.column(),
                handle.name_for_row(target.row()),
            )?;
            extent.touch(&target);
        }

        Ok(ApplyOutcome {
            touched: extent.into_range(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::run;

    fn point(row: u32, column: u32) -> Point {
        Point::new(row, column).unwrap()
    }

    #[test]
    fn test_transpose_swaps_axes_and_bounds_block() {
        let mut workbook = Workbook::new();
        {
            let sheet = workbook.worksheet_mut("Sheet1").unwrap();
            // 2 columns x 10 rows: labels in A, values in B
            for row in 1..=10 {
                sheet
                    .set_value(row, 1, CellValue::text(format!("label{}", row)))
                    .unwrap();
                sheet
                    .set_value(row, 2, CellValue::Number(f64::from(row)))
                    .unwrap();
            }
        }

        let operation = InsertTransposeRange::new(
            "Sheet1",
            Range::parse("A1:B10").unwrap(),
            point(20, 1),
        );
        let mut styles = StyleResolver::new();
        let mut snapshot = Vec::new();
        let result = run(&operation, &mut workbook, &mut styles, &mut snapshot);
        assert!(result.is_success());

        // 10 columns x 2 rows at the destination, exactly bounded
        assert_eq!(
            result.context().touched,
            Some(Range::parse("A20:J21").unwrap())
        );

        let sheet = workbook.worksheet("Sheet1").unwrap();
        assert_eq!(sheet.value(20, 1), CellValue::text("label1"));
        assert_eq!(sheet.value(20, 10), CellValue::text("label10"));
        assert_eq!(sheet.value(21, 1), CellValue::Number(1.0));
        assert_eq!(sheet.value(21, 10), CellValue::Number(10.0));

        // Nothing beyond the block
        assert_eq!(sheet.value(22, 1), CellValue::Empty);
        assert_eq!(sheet.value(20, 11), CellValue::Empty);
        assert!(sheet.style_name(22, 1).is_none());
        assert!(sheet.style_name(20, 11).is_none());
    }

    #[test]
    fn test_copy_range_covers_source_rectangle() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet("Target").unwrap();
        {
            let sheet = workbook.worksheet_mut("Sheet1").unwrap();
            sheet.set_value(1, 1, CellValue::text("a")).unwrap();
            sheet.set_value(2, 2, CellValue::Number(2.0)).unwrap();
        }

        let operation = InsertCopyRange::new("Target", Range::parse("A1:B2").unwrap(), point(5, 3))
            .with_source_sheet("Sheet1");
        let mut styles = StyleResolver::new();
        let mut snapshot = Vec::new();
        let result = run(&operation, &mut workbook, &mut styles, &mut snapshot);
        assert!(result.is_success());
        assert_eq!(
            result.context().touched,
            Some(Range::parse("C5:D6").unwrap())
        );

        let target = workbook.worksheet("Target").unwrap();
        assert_eq!(target.value(5, 3), CellValue::text("a"));
        assert_eq!(target.value(6, 4), CellValue::Number(2.0));
    }
}
