//! Insert a new worksheet

use crate::error::OpError;
use crate::operation::{ApplyOutcome, Operation, Validation};
use crate::resolve::StyleResolver;
use quill_sheets_engine::Workbook;

/// Adds a new, empty worksheet by name. The only insert operation that does
/// not require an existing target sheet.
#[derive(Debug, Clone)]
pub struct InsertWorksheet {
    name: String,
}

impl InsertWorksheet {
    /// Add a worksheet named `name`
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }
}

impl Operation for InsertWorksheet {
    fn label(&self) -> &'static str {
        "insert-worksheet"
    }

    fn target_sheet(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn validate(&self) -> Validation {
        if self.name.trim().is_empty() {
            return Validation::Invalid(OpError::Validation(
                "worksheet name must not be blank".into(),
            ));
        }
        Validation::Ready
    }

    fn apply(
        &self,
        workbook: &mut Workbook,
        _styles: &mut StyleResolver,
    ) -> Result<ApplyOutcome, OpError> {
        workbook.add_worksheet(&self.name)?;
        Ok(ApplyOutcome::none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::run;

    #[test]
    fn test_adds_sheet_and_rejects_duplicates() {
        let mut workbook = Workbook::new();
        let mut styles = StyleResolver::new();
        let mut snapshot = Vec::new();

        let result = run(
            &InsertWorksheet::new("Data"),
            &mut workbook,
            &mut styles,
            &mut snapshot,
        );
        assert!(result.is_success());
        assert!(workbook.has_worksheet("Data"));

        // Sheet names are case-insensitive, so "data" collides
        let result = run(
            &InsertWorksheet::new("data"),
            &mut workbook,
            &mut styles,
            &mut snapshot,
        );
        assert!(!result.is_success());
        assert!(matches!(result.errors()[0], OpError::Duplicate(_)));
    }
}
