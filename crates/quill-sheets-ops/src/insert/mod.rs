//! Insert operations
//!
//! One module per operation family. All cell-writing inserts share the same
//! conventions: values are formatted through the resolved style's
//! [`ValueFormat`](quill_sheets_core::ValueFormat), odd target rows take the
//! style's banding alternate, and a merge descriptor expands the anchor
//! before anything is written.

mod aggregate;
mod chart;
mod dictionary;
mod picture;
mod range_copy;
mod rows;
mod shape;
mod sparkline;
mod text;
mod worksheet;
mod xml;

pub use aggregate::InsertAggregate;
pub use chart::InsertChart;
pub use dictionary::InsertDictionary;
pub use picture::{InsertPicture, PictureSource};
pub use range_copy::{InsertCopyRange, InsertTransposeRange};
pub use rows::{InsertRows, InsertTable};
pub use shape::InsertShape;
pub use sparkline::InsertMiniChart;
pub use text::InsertText;
pub use worksheet::InsertWorksheet;
pub use xml::InsertXml;

use crate::error::OpError;
use crate::operation::sheet_mut;
use crate::resolve::StyleHandle;
use quill_sheets_core::{Point, Range, Value};
use quill_sheets_engine::{CellValue, Workbook, Worksheet};

/// Write one (possibly merge-expanded) styled value.
///
/// Expands the anchor by the style's merge descriptor, merges the cells when
/// needed, writes the formatted value (unless the style hides content) and
/// applies the row-parity style name to every cell of the range.
pub(crate) fn write_styled_cell(
    workbook: &mut Workbook,
    sheet_name: &str,
    anchor: &Point,
    content: Option<CellValue>,
    handle: &StyleHandle,
) -> Result<Range, OpError> {
    let range = handle.merged_range(anchor);
    let sheet = sheet_mut(workbook, sheet_name)?;

    if !range.is_single_cell() {
        sheet.merge_cells(&range)?;
    }
    if let Some(value) = content {
        sheet.set_value(anchor.row(), anchor.column(), value)?;
    }

    let style_name = handle.name_for_row(anchor.row()).to_string();
    for point in range.cells() {
        sheet.set_style_name(point.row(), point.column(), style_name.clone())?;
    }
    Ok(range)
}

/// Write one tabular cell: formatted value plus row-parity style, no merge.
pub(crate) fn write_banded_value(
    sheet: &mut Worksheet,
    point: &Point,
    value: &Value,
    handle: &StyleHandle,
) -> Result<(), OpError> {
    if handle.show_content() {
        let text = handle.format().format(value);
        sheet.set_value(point.row(), point.column(), CellValue::Text(text))?;
    }
    sheet.set_style_name(point.row(), point.column(), handle.name_for_row(point.row()))?;
    Ok(())
}

/// Tracks the furthest cell a multi-cell insert touches, to report the exact
/// bounding rectangle.
pub(crate) struct Extent {
    start: Point,
    max_row: u32,
    max_column: u32,
    any: bool,
}

impl Extent {
    pub(crate) fn new(start: Point) -> Self {
        Self {
            start,
            max_row: start.row(),
            max_column: start.column(),
            any: false,
        }
    }

    pub(crate) fn touch(&mut self, point: &Point) {
        self.max_row = self.max_row.max(point.row());
        self.max_column = self.max_column.max(point.column());
        self.any = true;
    }

    pub(crate) fn into_range(self) -> Option<Range> {
        if !self.any {
            return None;
        }
        let end = Point::new(self.max_row, self.max_column).expect("touched cells are valid");
        Some(Range::new(self.start, end))
    }
}
