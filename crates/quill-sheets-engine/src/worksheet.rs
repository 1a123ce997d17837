//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{Cell, CellValue};
use crate::drawing::{ChartObject, Picture, Shape, SparklineGroup};
use crate::error::{EngineError, Result};
use quill_sheets_core::{Range, MAX_COLUMNS, MAX_ROWS};

/// A worksheet (single sheet in a workbook)
///
/// Cells are stored sparsely, keyed by 1-based (row, column). Besides cells,
/// a worksheet owns its merged regions, display settings and drawing
/// collections.
#[derive(Debug, Clone)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Sparse cells, keyed by (row, column), both 1-based
    cells: BTreeMap<(u32, u32), Cell>,
    /// Merged regions
    merged: Vec<Range>,
    /// Grid lines shown on screen
    show_grid_lines: bool,
    /// Autofilter range
    auto_filter: Option<Range>,
    /// Embedded pictures
    pictures: Vec<Picture>,
    /// Drawn shapes
    shapes: Vec<Shape>,
    /// Sparkline groups
    sparklines: Vec<SparklineGroup>,
    /// Embedded charts
    charts: Vec<ChartObject>,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
            merged: Vec::new(),
            show_grid_lines: true,
            auto_filter: None,
            pictures: Vec::new(),
            shapes: Vec::new(),
            sparklines: Vec::new(),
            charts: Vec::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Cell access ===

    /// Get a cell, if it exists
    pub fn cell(&self, row: u32, column: u32) -> Option<&Cell> {
        self.cells.get(&(row, column))
    }

    /// Get a cell's value; missing cells read as [`CellValue::Empty`]
    pub fn value(&self, row: u32, column: u32) -> CellValue {
        self.cells
            .get(&(row, column))
            .map(|c| c.value.clone())
            .unwrap_or(CellValue::Empty)
    }

    /// Get a cell's style name, if one is set
    pub fn style_name(&self, row: u32, column: u32) -> Option<&str> {
        self.cells
            .get(&(row, column))
            .and_then(|c| c.style.as_deref())
    }

    /// Set a cell value
    pub fn set_value(&mut self, row: u32, column: u32, value: CellValue) -> Result<()> {
        self.validate_position(row, column)?;
        self.cells.entry((row, column)).or_default().value = value;
        Ok(())
    }

    /// Set a cell's style by registered style name
    pub fn set_style_name<S: Into<String>>(&mut self, row: u32, column: u32, name: S) -> Result<()> {
        self.validate_position(row, column)?;
        self.cells.entry((row, column)).or_default().style = Some(name.into());
        Ok(())
    }

    /// Remove a cell entirely
    pub fn clear_cell(&mut self, row: u32, column: u32) {
        self.cells.remove(&(row, column));
    }

    /// Iterate over all stored cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u32, &Cell)> {
        self.cells.iter().map(|(&(row, col), cell)| (row, col, cell))
    }

    /// Number of stored cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if the worksheet holds no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounds of all stored cells
    pub fn used_range(&self) -> Option<Range> {
        let mut iter = self.cells.keys();
        let &(first_row, first_col) = iter.next()?;
        let (mut min_row, mut min_col, mut max_row, mut max_col) =
            (first_row, first_col, first_row, first_col);
        for &(row, col) in iter {
            min_row = min_row.min(row);
            min_col = min_col.min(col);
            max_row = max_row.max(row);
            max_col = max_col.max(col);
        }
        Range::from_coordinates(min_row, min_col, max_row, max_col).ok()
    }

    // === Merged regions ===

    /// Merge a range of cells; overlapping an existing region is rejected
    pub fn merge_cells(&mut self, range: &Range) -> Result<()> {
        for existing in &self.merged {
            if range.overlaps(existing) {
                return Err(EngineError::MergeConflict(range.address()));
            }
        }
        self.merged.push(*range);
        Ok(())
    }

    /// Get all merged regions
    pub fn merged_regions(&self) -> &[Range] {
        &self.merged
    }

    // === Display settings ===

    /// Grid lines shown on screen
    pub fn show_grid_lines(&self) -> bool {
        self.show_grid_lines
    }

    /// Show or hide grid lines
    pub fn set_show_grid_lines(&mut self, show: bool) {
        self.show_grid_lines = show;
    }

    /// Current autofilter range
    pub fn auto_filter(&self) -> Option<&Range> {
        self.auto_filter.as_ref()
    }

    /// Set or clear the autofilter range
    pub fn set_auto_filter(&mut self, range: Option<Range>) {
        self.auto_filter = range;
    }

    // === Drawing elements ===

    /// Check whether any drawing element on this sheet has the given name
    pub fn has_drawing_named(&self, name: &str) -> bool {
        self.pictures.iter().any(|p| p.name == name)
            || self.shapes.iter().any(|s| s.name == name)
            || self.sparklines.iter().any(|s| s.name == name)
            || self.charts.iter().any(|c| c.name == name)
    }

    /// Attach a picture
    pub fn add_picture(&mut self, picture: Picture) -> Result<()> {
        self.ensure_drawing_name_free(&picture.name)?;
        self.pictures.push(picture);
        Ok(())
    }

    /// Attach a shape
    pub fn add_shape(&mut self, shape: Shape) -> Result<()> {
        self.ensure_drawing_name_free(&shape.name)?;
        self.shapes.push(shape);
        Ok(())
    }

    /// Attach a sparkline group
    pub fn add_sparkline_group(&mut self, group: SparklineGroup) -> Result<()> {
        self.ensure_drawing_name_free(&group.name)?;
        self.sparklines.push(group);
        Ok(())
    }

    /// Attach a chart
    pub fn add_chart(&mut self, chart: ChartObject) -> Result<()> {
        self.ensure_drawing_name_free(&chart.name)?;
        self.charts.push(chart);
        Ok(())
    }

    /// All pictures on this sheet
    pub fn pictures(&self) -> &[Picture] {
        &self.pictures
    }

    /// All shapes on this sheet
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// All sparkline groups on this sheet
    pub fn sparkline_groups(&self) -> &[SparklineGroup] {
        &self.sparklines
    }

    /// All charts on this sheet
    pub fn charts(&self) -> &[ChartObject] {
        &self.charts
    }

    // === Internal ===

    fn ensure_drawing_name_free(&self, name: &str) -> Result<()> {
        if self.has_drawing_named(name) {
            return Err(EngineError::DuplicateDrawingName {
                sheet: self.name.clone(),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn validate_position(&self, row: u32, column: u32) -> Result<()> {
        if row == 0 || row > MAX_ROWS {
            return Err(EngineError::RowOutOfBounds(row, MAX_ROWS));
        }
        if column == 0 || column > MAX_COLUMNS {
            return Err(EngineError::ColumnOutOfBounds(column, MAX_COLUMNS));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_sheets_chart::{Sparkline, SparklineKind};

    #[test]
    fn test_cells_default_to_empty() {
        let ws = Worksheet::new("Test");
        assert_eq!(ws.value(1, 1), CellValue::Empty);
        assert!(ws.cell(1, 1).is_none());
    }

    #[test]
    fn test_set_value_and_style() {
        let mut ws = Worksheet::new("Test");
        ws.set_value(1, 2, CellValue::text("Hello")).unwrap();
        ws.set_style_name(1, 2, "Header").unwrap();

        assert_eq!(ws.value(1, 2), CellValue::text("Hello"));
        assert_eq!(ws.style_name(1, 2), Some("Header"));
    }

    #[test]
    fn test_position_bounds() {
        let mut ws = Worksheet::new("Test");
        assert!(ws.set_value(0, 1, CellValue::Empty).is_err());
        assert!(ws.set_value(1, 0, CellValue::Empty).is_err());
        assert!(ws.set_value(MAX_ROWS + 1, 1, CellValue::Empty).is_err());
        assert!(ws.set_value(1, MAX_COLUMNS + 1, CellValue::Empty).is_err());
        assert!(ws.set_value(MAX_ROWS, MAX_COLUMNS, CellValue::Empty).is_ok());
    }

    #[test]
    fn test_used_range() {
        let mut ws = Worksheet::new("Test");
        assert!(ws.used_range().is_none());

        ws.set_value(5, 3, CellValue::Number(1.0)).unwrap();
        ws.set_value(10, 7, CellValue::Number(2.0)).unwrap();

        let range = ws.used_range().unwrap();
        assert_eq!(range.start().row(), 5);
        assert_eq!(range.start().column(), 3);
        assert_eq!(range.end().row(), 10);
        assert_eq!(range.end().column(), 7);
    }

    #[test]
    fn test_merge_conflict() {
        let mut ws = Worksheet::new("Test");
        ws.merge_cells(&Range::parse("A1:C3").unwrap()).unwrap();
        assert!(matches!(
            ws.merge_cells(&Range::parse("B2:D4").unwrap()),
            Err(EngineError::MergeConflict(_))
        ));
        assert_eq!(ws.merged_regions().len(), 1);
    }

    #[test]
    fn test_duplicate_drawing_name_rejected_across_kinds() {
        let mut ws = Worksheet::new("Test");
        let range = Range::parse("B2:D6").unwrap();

        ws.add_shape(Shape {
            name: "logo".into(),
            kind: crate::drawing::ShapeKind::Rectangle,
            anchor: range,
            text: None,
            fill: None,
            line: None,
            shadow: false,
        })
        .unwrap();

        let group = SparklineGroup {
            name: "logo".into(),
            sparkline: Sparkline::new(SparklineKind::Line, Range::parse("A1:A5").unwrap()),
            location: Range::parse("F2").unwrap(),
        };
        assert!(matches!(
            ws.add_sparkline_group(group),
            Err(EngineError::DuplicateDrawingName { .. })
        ));
    }
}
