//! Insert key/value pairs with type-dispatched value styles

use super::{write_banded_value, Extent};
use crate::error::OpError;
use crate::operation::{check_sheet_name, sheet_mut, ApplyOutcome, Operation, Validation};
use crate::resolve::{StyleHandle, StyleResolver};
use quill_sheets_core::{Point, StyleDescriptor, Value, ValueKind};
use quill_sheets_engine::Workbook;

/// Writes an ordered sequence of key/value pairs, one sheet row per entry:
/// the key in the anchor column, the value one column right.
///
/// Value cells pick their style by the value's type (text, number,
/// date-time), falling back to the fallback style and finally the default.
#[derive(Debug, Clone)]
pub struct InsertDictionary {
    sheet: String,
    location: Option<Point>,
    entries: Option<Vec<(String, Value)>>,
    key_style: Option<StyleDescriptor>,
    text_style: Option<StyleDescriptor>,
    number_style: Option<StyleDescriptor>,
    date_time_style: Option<StyleDescriptor>,
    fallback_style: Option<StyleDescriptor>,
}

impl InsertDictionary {
    /// Insert `entries` starting at `location` on `sheet`
    pub fn new<S: Into<String>>(
        sheet: S,
        location: Point,
        entries: Vec<(String, Value)>,
    ) -> Self {
        Self {
            sheet: sheet.into(),
            location: Some(location),
            entries: Some(entries),
            key_style: None,
            text_style: None,
            number_style: None,
            date_time_style: None,
            fallback_style: None,
        }
    }

    /// Build from optional configuration; a missing location or data makes
    /// the operation a validated no-op
    pub fn optional<S: Into<String>>(
        sheet: S,
        location: Option<Point>,
        entries: Option<Vec<(String, Value)>>,
    ) -> Self {
        Self {
            sheet: sheet.into(),
            location,
            entries,
            key_style: None,
            text_style: None,
            number_style: None,
            date_time_style: None,
            fallback_style: None,
        }
    }

    /// Style the key column
    pub fn with_key_style(mut self, style: StyleDescriptor) -> Self {
        self.key_style = Some(style);
        self
    }

    /// Style text values
    pub fn with_text_style(mut self, style: StyleDescriptor) -> Self {
        self.text_style = Some(style);
        self
    }

    /// Style numeric values
    pub fn with_number_style(mut self, style: StyleDescriptor) -> Self {
        self.number_style = Some(style);
        self
    }

    /// Style date-time values
    pub fn with_date_time_style(mut self, style: StyleDescriptor) -> Self {
        self.date_time_style = Some(style);
        self
    }

    /// Style values no per-type style covers
    pub fn with_fallback_style(mut self, style: StyleDescriptor) -> Self {
        self.fallback_style = Some(style);
        self
    }
}

impl Operation for InsertDictionary {
    fn label(&self) -> &'static str {
        "insert-dictionary"
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
        if self.entries.is_none() {
            return Validation::Skip("no data");
        }
        Validation::Ready
    }

    fn apply(
        &self,
        workbook: &mut Workbook,
        styles: &mut StyleResolver,
    ) -> Result<ApplyOutcome, OpError> {
        let (Some(start), Some(entries)) = (self.location.as_ref(), self.entries.as_ref()) else {
            return Err(OpError::Validation("location and data are required".into()));
        };

        let key_handle = styles.resolve_or_default(workbook, self.key_style.as_ref())?;
        let fallback_handle = styles.resolve_or_default(workbook, self.fallback_style.as_ref())?;
        let text_handle = self.resolve_opt(workbook, styles, &self.text_style)?;
        let number_handle = self.resolve_opt(workbook, styles, &self.number_style)?;
        let date_time_handle = self.resolve_opt(workbook, styles, &self.date_time_style)?;

        let sheet = sheet_mut(workbook, &self.sheet)?;
        let mut extent = Extent::new(*start);
        let mut anchor = *start;

        for (key, value) in entries {
            let key_point = anchor;
            let value_point = anchor.offsetted(0, 1);

            let key_value = Value::Text(key.clone());
            write_banded_value(sheet, &key_point, &key_value, &key_handle)?;
            extent.touch(&key_point);

            let handle = match value.kind() {
                ValueKind::Text => text_handle.as_ref(),
                ValueKind::Number => number_handle.as_ref(),
                ValueKind::DateTime => date_time_handle.as_ref(),
                ValueKind::Bool | ValueKind::Empty => None,
            }
            .unwrap_or(&fallback_handle);
            write_banded_value(sheet, &value_point, value, handle)?;
            extent.touch(&value_point);

            anchor.offset(1, 0);
        }

        Ok(ApplyOutcome {
            touched: extent.into_range(),
        })
    }
}

impl InsertDictionary {
    fn resolve_opt(
        &self,
        workbook: &mut Workbook,
        styles: &mut StyleResolver,
        descriptor: &Option<StyleDescriptor>,
    ) -> Result<Option<StyleHandle>, OpError> {
        match descriptor {
            Some(descriptor) => Ok(Some(styles.resolve(workbook, descriptor)?)),
            None => Ok(None),
        }
    }
}
