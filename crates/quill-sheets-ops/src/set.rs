//! Set operations: single-property worksheet display mutations
//!
//! Validated and executed with the same mechanics as the insert operations.

use crate::error::OpError;
use crate::operation::{check_sheet_name, sheet_mut, ApplyOutcome, Operation, Validation};
use crate::resolve::StyleResolver;
use quill_sheets_core::Range;
use quill_sheets_engine::Workbook;

/// Shows or hides a worksheet's grid lines
#[derive(Debug, Clone)]
pub struct SetGridLines {
    sheet: String,
    show: bool,
}

impl SetGridLines {
    /// Set grid-line visibility on `sheet`
    pub fn new<S: Into<String>>(sheet: S, show: bool) -> Self {
        Self {
            sheet: sheet.into(),
            show,
        }
    }
}

impl Operation for SetGridLines {
    fn label(&self) -> &'static str {
        "set-grid-lines"
    }

    fn target_sheet(&self) -> Option<&str> {
        Some(&self.sheet)
    }

    fn validate(&self) -> Validation {
        if let Some(invalid) = check_sheet_name(&self.sheet) {
            return invalid;
        }
        Validation::Ready
    }

    fn apply(
        &self,
        workbook: &mut Workbook,
        _styles: &mut StyleResolver,
    ) -> Result<ApplyOutcome, OpError> {
        let sheet = sheet_mut(workbook, &self.sheet)?;
        sheet.set_show_grid_lines(self.show);
        Ok(ApplyOutcome::none())
    }
}

/// Sets or clears a worksheet's autofilter range
#[derive(Debug, Clone)]
pub struct SetAutoFilter {
    sheet: String,
    filter: Option<Range>,
}

impl SetAutoFilter {
    /// Filter `range` on `sheet`
    pub fn new<S: Into<String>>(sheet: S, range: Range) -> Self {
        Self {
            sheet: sheet.into(),
            filter: Some(range),
        }
    }

    /// Remove the autofilter from `sheet`
    pub fn clear<S: Into<String>>(sheet: S) -> Self {
        Self {
            sheet: sheet.into(),
            filter: None,
        }
    }
}

impl Operation for SetAutoFilter {
    fn label(&self) -> &'static str {
        "set-auto-filter"
    }

    fn target_sheet(&self) -> Option<&str> {
        Some(&self.sheet)
    }

    fn validate(&self) -> Validation {
        if let Some(invalid) = check_sheet_name(&self.sheet) {
            return invalid;
        }
        Validation::Ready
    }

    fn apply(
        &self,
        workbook: &mut Workbook,
        _styles: &mut StyleResolver,
    ) -> Result<ApplyOutcome, OpError> {
        let sheet = sheet_mut(workbook, &self.sheet)?;
        sheet.set_auto_filter(self.filter);
        Ok(ApplyOutcome::none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::run;

    #[test]
    fn test_grid_lines_toggle() {
        let mut workbook = Workbook::new();
        let mut styles = StyleResolver::new();
        let mut snapshot = Vec::new();

        let result = run(
            &SetGridLines::new("Sheet1", false),
            &mut workbook,
            &mut styles,
            &mut snapshot,
        );
        assert!(result.is_success());
        assert!(!workbook.worksheet("Sheet1").unwrap().show_grid_lines());
    }

    #[test]
    fn test_auto_filter_set_and_clear() {
        let mut workbook = Workbook::new();
        let mut styles = StyleResolver::new();
        let mut snapshot = Vec::new();
        let range = Range::parse("A1:D20").unwrap();

        run(
            &SetAutoFilter::new("Sheet1", range),
            &mut workbook,
            &mut styles,
            &mut snapshot,
        );
        assert_eq!(
            workbook.worksheet("Sheet1").unwrap().auto_filter(),
            Some(&range)
        );

        run(
            &SetAutoFilter::clear("Sheet1"),
            &mut workbook,
            &mut styles,
            &mut snapshot,
        );
        assert_eq!(workbook.worksheet("Sheet1").unwrap().auto_filter(), None);
    }

    #[test]
    fn test_missing_sheet_is_an_error() {
        let mut workbook = Workbook::new();
        let mut styles = StyleResolver::new();
        let mut snapshot = Vec::new();

        let result = run(
            &SetGridLines::new("Nope", false),
            &mut workbook,
            &mut styles,
            &mut snapshot,
        );
        assert!(!result.is_success());
        assert_eq!(result.errors()[0], OpError::SheetNotFound("Nope".into()));
    }
}
