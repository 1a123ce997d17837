//! Insert a single formatted value

use crate::error::OpError;
use crate::operation::{check_sheet_name, ApplyOutcome, Operation, Validation};
use crate::resolve::StyleResolver;
use super::write_styled_cell;
use quill_sheets_core::{Point, StyleDescriptor, Value};
use quill_sheets_engine::{CellValue, Workbook};

/// Writes one formatted value into a (possibly merge-expanded) range.
///
/// Odd target rows take the style's banding alternate. When the style's
/// content flag is off, the value is not written but the styling (and merge)
/// is still applied.
#[derive(Debug, Clone)]
pub struct InsertText {
    sheet: String,
    location: Option<Point>,
    value: Option<Value>,
    style: Option<StyleDescriptor>,
}

impl InsertText {
    /// Insert `value` at `location` on `sheet`
    pub fn new<S, V>(sheet: S, location: Point, value: V) -> Self
    where
        S: Into<String>,
        V: Into<Value>,
    {
        Self {
            sheet: sheet.into(),
            location: Some(location),
            value: Some(value.into()),
            style: None,
        }
    }

    /// Build from optional configuration; a missing location or value makes
    /// the operation a validated no-op
    pub fn optional<S: Into<String>>(
        sheet: S,
        location: Option<Point>,
        value: Option<Value>,
    ) -> Self {
        Self {
            sheet: sheet.into(),
            location,
            value,
            style: None,
        }
    }

    /// Style the written value
    pub fn with_style(mut self, style: StyleDescriptor) -> Self {
        self.style = Some(style);
        self
    }
}

impl Operation for InsertText {
    fn label(&self) -> &'static str {
        "insert-text"
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
        if self.value.is_none() {
            return Validation::Skip("no value");
        }
        Validation::Ready
    }

    fn apply(
        &self,
        workbook: &mut Workbook,
        styles: &mut StyleResolver,
    ) -> Result<ApplyOutcome, OpError> {
        let (Some(anchor), Some(value)) = (self.location.as_ref(), self.value.as_ref()) else {
            return Err(OpError::Validation("location and value are required".into()));
        };

        let handle = styles.resolve_or_default(workbook, self.style.as_ref())?;
        let content = handle
            .show_content()
            .then(|| CellValue::Text(handle.format().format(value)));

        let range = write_styled_cell(workbook, &self.sheet, anchor, content, &handle)?;
        Ok(ApplyOutcome::touched(range))
    }
}
