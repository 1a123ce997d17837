//! Insert an aggregate-function formula

use super::write_styled_cell;
use crate::aggregate::AggregateDefinition;
use crate::error::OpError;
use crate::operation::{check_sheet_name, ApplyOutcome, Operation, Validation};
use crate::resolve::StyleResolver;
use quill_sheets_core::{Point, StyleDescriptor};
use quill_sheets_engine::{CellValue, Workbook};

/// Resolves an [`AggregateDefinition`] into a formula and writes it into a
/// (possibly merged) cell, with odd/even styling exactly like a text insert.
#[derive(Debug, Clone)]
pub struct InsertAggregate {
    sheet: String,
    location: Option<Point>,
    definition: Option<AggregateDefinition>,
    style: Option<StyleDescriptor>,
}

impl InsertAggregate {
    /// Insert the aggregate at `location` on `sheet`
    pub fn new<S: Into<String>>(
        sheet: S,
        location: Point,
        definition: AggregateDefinition,
    ) -> Self {
        Self {
            sheet: sheet.into(),
            location: Some(location),
            definition: Some(definition),
            style: None,
        }
    }

    /// Build from optional configuration; a missing location or definition
    /// makes the operation a validated no-op
    pub fn optional<S: Into<String>>(
        sheet: S,
        location: Option<Point>,
        definition: Option<AggregateDefinition>,
    ) -> Self {
        Self {
            sheet: sheet.into(),
            location,
            definition,
            style: None,
        }
    }

    /// Style the formula cell
    pub fn with_style(mut self, style: StyleDescriptor) -> Self {
        self.style = Some(style);
        self
    }
}

impl Operation for InsertAggregate {
    fn label(&self) -> &'static str {
        "insert-aggregate"
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
        if self.definition.is_none() {
            return Validation::Skip("no aggregate definition");
        }
        Validation::Ready
    }

    fn apply(
        &self,
        workbook: &mut Workbook,
        styles: &mut StyleResolver,
    ) -> Result<ApplyOutcome, OpError> {
        let (Some(anchor), Some(definition)) =
            (self.location.as_ref(), self.definition.as_ref())
        else {
            return Err(OpError::Validation(
                "location and aggregate definition are required".into(),
            ));
        };

        // The source worksheet must exist before a formula references it
        if let Some(source) = &definition.worksheet {
            if !workbook.has_worksheet(source) {
                return Err(OpError::SheetNotFound(source.clone()));
            }
        }

        let handle = styles.resolve_or_default(workbook, self.style.as_ref())?;
        let content = handle
            .show_content()
            .then(|| CellValue::formula(definition.formula(&self.sheet)));

        let range = write_styled_cell(workbook, &self.sheet, anchor, content, &handle)?;
        Ok(ApplyOutcome::touched(range))
    }
}
