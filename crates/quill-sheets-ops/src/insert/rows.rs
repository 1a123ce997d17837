//! Insert tabular row data

use super::{write_banded_value, Extent};
use crate::error::OpError;
use crate::operation::{check_sheet_name, sheet_mut, ApplyOutcome, Operation, Validation};
use crate::resolve::StyleResolver;
use quill_sheets_core::{Point, StyleDescriptor, Value};
use quill_sheets_engine::Workbook;

/// Writes a sequence of value rows starting at an anchor point, one sheet
/// row per entry.
#[derive(Debug, Clone)]
pub struct InsertRows {
    sheet: String,
    location: Option<Point>,
    rows: Option<Vec<Vec<Value>>>,
    style: Option<StyleDescriptor>,
}

impl InsertRows {
    /// Insert `rows` starting at `location` on `sheet`
    pub fn new<S: Into<String>>(sheet: S, location: Point, rows: Vec<Vec<Value>>) -> Self {
        Self {
            sheet: sheet.into(),
            location: Some(location),
            rows: Some(rows),
            style: None,
        }
    }

    /// Build from optional configuration; a missing location or data makes
    /// the operation a validated no-op
    pub fn optional<S: Into<String>>(
        sheet: S,
        location: Option<Point>,
        rows: Option<Vec<Vec<Value>>>,
    ) -> Self {
        Self {
            sheet: sheet.into(),
            location,
            rows,
            style: None,
        }
    }

    /// Style the written cells
    pub fn with_style(mut self, style: StyleDescriptor) -> Self {
        self.style = Some(style);
        self
    }
}

impl Operation for InsertRows {
    fn label(&self) -> &'static str {
        "insert-rows"
    }

    fn target_sheet(&self) -> Option<&str> {
        Some(&self.sheet)
    }

    fn validate(&self) -> Validation {
        if let Some(invalid) = check_sheet_name(&self.sheet) {
            return invalid;
        }
        if self.location.is_none() {
            return Validation::Skip("no location");
        }
        if self.rows.is_none() {
            return Validation::Skip("no data");
        }
        Validation::Ready
    }

    fn apply(
        &self,
        workbook: &mut Workbook,
        styles: &mut StyleResolver,
    ) -> Result<ApplyOutcome, OpError> {
        let (Some(start), Some(rows)) = (self.location.as_ref(), self.rows.as_ref()) else {
            return Err(OpError::Validation("location and data are required".into()));
        };

        let handle = styles.resolve_or_default(workbook, self.style.as_ref())?;
        let sheet = sheet_mut(workbook, &self.sheet)?;

        let mut extent = Extent::new(*start);
        // Work on a copy of the anchor so the caller's point is never moved
        let mut row_anchor = *start;
        for row in rows {
            let mut cell = row_anchor;
            for value in row {
                write_banded_value(sheet, &cell, value, &handle)?;
                extent.touch(&cell);
                cell.offset(0, 1);
            }
            row_anchor.offset(1, 0);
        }

        Ok(ApplyOutcome {
            touched: extent.into_range(),
        })
    }
}

/// Writes a table: an optional header row followed by value rows, with
/// distinct header and value styles.
#[derive(Debug, Clone)]
pub struct InsertTable {
    sheet: String,
    location: Option<Point>,
    header: Option<Vec<String>>,
    rows: Option<Vec<Vec<Value>>>,
    header_style: Option<StyleDescriptor>,
    value_style: Option<StyleDescriptor>,
}

impl InsertTable {
    /// Insert a table of `rows` starting at `location` on `sheet`
    pub fn new<S: Into<String>>(sheet: S, location: Point, rows: Vec<Vec<Value>>) -> Self {
        Self {
            sheet: sheet.into(),
            location: Some(location),
            header: None,
            rows: Some(rows),
            header_style: None,
            value_style: None,
        }
    }

    /// Build from optional configuration; a missing location or data makes
    /// the operation a validated no-op
    pub fn optional<S: Into<String>>(
        sheet: S,
        location: Option<Point>,
        rows: Option<Vec<Vec<Value>>>,
    ) -> Self {
        Self {
            sheet: sheet.into(),
            location,
            header: None,
            rows,
            header_style: None,
            value_style: None,
        }
    }

    /// Add a header row above the data
    pub fn with_header(mut self, header: Vec<String>) -> Self {
        self.header = Some(header);
        self
    }

    /// Style the header row
    pub fn with_header_style(mut self, style: StyleDescriptor) -> Self {
        self.header_style = Some(style);
        self
    }

    /// Style the value rows
    pub fn with_value_style(mut self, style: StyleDescriptor) -> Self {
        self.value_style = Some(style);
        self
    }
}

impl Operation for InsertTable {
    fn label(&self) -> &'static str {
        "insert-table"
    }

    fn target_sheet(&self) -> Option<&str> {
        Some(&self.sheet)
    }

    fn validate(&self) -> Validation {
        if let Some(invalid) = check_sheet_name(&self.sheet) {
            return invalid;
        }
        if self.location.is_none() {
            return Validation::Skip("no location");
        }
        if self.rows.is_none() {
            return Validation::Skip("no data");
        }
        Validation::Ready
    }

    fn apply(
        &self,
        workbook: &mut Workbook,
        styles: &mut StyleResolver,
    ) -> Result<ApplyOutcome, OpError> {
        let (Some(start), Some(rows)) = (self.location.as_ref(), self.rows.as_ref()) else {
            return Err(OpError::Validation("location and data are required".into()));
        };

        let header_handle = styles.resolve_or_default(workbook, self.header_style.as_ref())?;
        let value_handle = styles.resolve_or_default(workbook, self.value_style.as_ref())?;
        let sheet = sheet_mut(workbook, &self.sheet)?;

        let mut extent = Extent::new(*start);
        let mut row_anchor = *start;

        if let Some(header) = &self.header {
            let mut cell = row_anchor;
            for title in header {
                let value = Value::Text(title.clone());
                write_banded_value(sheet, &cell, &value, &header_handle)?;
                extent.touch(&cell);
                cell.offset(0, 1);
            }
            row_anchor.offset(1, 0);
        }

        for row in rows {
            let mut cell = row_anchor;
            for value in row {
                write_banded_value(sheet, &cell, value, &value_handle)?;
                extent.touch(&cell);
                cell.offset(0, 1);
            }
            row_anchor.offset(1, 0);
        }

        Ok(ApplyOutcome {
            touched: extent.into_range(),
        })
    }
}
