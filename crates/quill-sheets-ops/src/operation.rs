//! The operation contract and runner
//!
//! Each operation moves through `Constructed -> Validated -> Executed`; no
//! instance runs twice. Validation is pure and never touches the workbook.
//! Execution happens against a working copy: the runner commits the copy and
//! refreshes the chain's snapshot only when both the mutation and the
//! serialization succeed, so a failed operation leaves the live workbook at
//! the last good state.

use crate::error::OpError;
use crate::resolve::StyleResolver;
use crate::result::{OperationContext, OperationData, OperationResult};
use quill_sheets_core::Range;
use quill_sheets_engine::{Workbook, Worksheet};

/// Outcome of a pure validation pass
#[derive(Debug, Clone)]
pub enum Validation {
    /// Execute the operation
    Ready,
    /// Nothing to do (an optional collaborator is absent): succeed without
    /// touching the workbook
    Skip(&'static str),
    /// Required configuration is bad or missing: fail without touching the
    /// workbook
    Invalid(OpError),
}

/// What an executed operation touched
#[derive(Debug, Clone, Default)]
pub struct ApplyOutcome {
    /// Bounding rectangle of all cells written or styled
    pub touched: Option<Range>,
}

impl ApplyOutcome {
    /// No cell-level footprint (e.g. display settings, new sheets)
    pub fn none() -> Self {
        Self::default()
    }

    /// The operation touched exactly this rectangle
    pub fn touched(range: Range) -> Self {
        Self {
            touched: Some(range),
        }
    }
}

/// One atomic, validated, independently-resulted workbook mutation
pub trait Operation {
    /// Short operation label used in results and logs (e.g. "insert-text")
    fn label(&self) -> &'static str;

    /// The sheet this operation targets, if it has one
    fn target_sheet(&self) -> Option<&str> {
        None
    }

    /// Pure checks on the operation's own fields
    fn validate(&self) -> Validation;

    /// Perform the mutation against the workbook
    fn apply(
        &self,
        workbook: &mut Workbook,
        styles: &mut StyleResolver,
    ) -> Result<ApplyOutcome, OpError>;
}

/// Execute one operation and produce its result.
///
/// `snapshot` is the serialized state of `workbook` after the last
/// successful operation (an empty vector means "not yet serialized" and is
/// computed here). On success the workbook and snapshot advance together; on
/// any failure both stay at the last good state and the result's `after`
/// equals its `before`.
pub fn run<O: Operation + ?Sized>(
    operation: &O,
    workbook: &mut Workbook,
    styles: &mut StyleResolver,
    snapshot: &mut Vec<u8>,
) -> OperationResult {
    let mut context = OperationContext {
        operation: operation.label().to_string(),
        sheet: operation.target_sheet().map(|s| s.to_string()),
        touched: None,
    };

    if snapshot.is_empty() {
        match workbook.save_to_bytes() {
            Ok(bytes) => *snapshot = bytes,
            Err(err) => {
                let data = OperationData {
                    before: Vec::new(),
                    after: Vec::new(),
                    context,
                };
                return OperationResult::error(vec![err.into()], data);
            }
        }
    }
    let before = snapshot.clone();

    match operation.validate() {
        Validation::Invalid(err) => {
            log::debug!("operation '{}' failed validation: {}", operation.label(), err);
            let data = OperationData {
                before: before.clone(),
                after: before,
                context,
            };
            OperationResult::error(vec![err], data)
        }
        Validation::Skip(reason) => {
            log::debug!("operation '{}' is a no-op: {}", operation.label(), reason);
            let data = OperationData {
                before: before.clone(),
                after: before,
                context,
            };
            OperationResult::success(data)
        }
        Validation::Ready => {
            let mut working = workbook.clone();
            let mark = styles.mark();

            let applied = operation.apply(&mut working, styles).and_then(|outcome| {
                let after = working.save_to_bytes().map_err(OpError::from)?;
                Ok((outcome, after))
            });

            match applied {
                Ok((outcome, after)) => {
                    *workbook = working;
                    *snapshot = after.clone();
                    context.touched = outcome.touched;
                    OperationResult::success(OperationData {
                        before,
                        after,
                        context,
                    })
                }
                Err(err) => {
                    log::debug!("operation '{}' failed: {}", operation.label(), err);
                    styles.rollback(mark);
                    let data = OperationData {
                        before: before.clone(),
                        after: before,
                        context,
                    };
                    OperationResult::error(vec![err], data)
                }
            }
        }
    }
}

/// Validate that a required sheet name is present
pub(crate) fn check_sheet_name(name: &str) -> Option<Validation> {
    if name.trim().is_empty() {
        Some(Validation::Invalid(OpError::Validation(
            "target sheet name must not be blank".into(),
        )))
    } else {
        None
    }
}

/// Look up the target worksheet (case-insensitive) or report it missing
pub(crate) fn sheet_mut<'a>(
    workbook: &'a mut Workbook,
    name: &str,
) -> Result<&'a mut Worksheet, OpError> {
    workbook
        .worksheet_mut(name)
        .ok_or_else(|| OpError::SheetNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_sheets_engine::CellValue;

    struct WriteOne;

    impl Operation for WriteOne {
        fn label(&self) -> &'static str {
            "write-one"
        }

        fn validate(&self) -> Validation {
            Validation::Ready
        }

        fn apply(
            &self,
            workbook: &mut Workbook,
            _styles: &mut StyleResolver,
        ) -> Result<ApplyOutcome, OpError> {
            let sheet = sheet_mut(workbook, "Sheet1")?;
            sheet.set_value(1, 1, CellValue::Number(1.0))?;
            Ok(ApplyOutcome::none())
        }
    }

    struct AlwaysFails;

    impl Operation for AlwaysFails {
        fn label(&self) -> &'static str {
            "always-fails"
        }

        fn validate(&self) -> Validation {
            Validation::Ready
        }

        fn apply(
            &self,
            _workbook: &mut Workbook,
            _styles: &mut StyleResolver,
        ) -> Result<ApplyOutcome, OpError> {
            Err(OpError::Engine("boom".into()))
        }
    }

    #[test]
    fn test_success_advances_snapshot() {
        let mut workbook = Workbook::new();
        let mut styles = StyleResolver::new();
        let mut snapshot = Vec::new();

        let result = run(&WriteOne, &mut workbook, &mut styles, &mut snapshot);
        assert!(result.is_success());
        assert_ne!(result.before(), result.after());
        assert_eq!(snapshot, result.after());
        assert_eq!(
            workbook.worksheet("Sheet1").unwrap().value(1, 1),
            CellValue::Number(1.0)
        );
    }

    #[test]
    fn test_failure_preserves_state() {
        let mut workbook = Workbook::new();
        let mut styles = StyleResolver::new();
        let mut snapshot = Vec::new();

        let before_failure = run(&WriteOne, &mut workbook, &mut styles, &mut snapshot)
            .after()
            .to_vec();
        let result = run(&AlwaysFails, &mut workbook, &mut styles, &mut snapshot);

        assert!(!result.is_success());
        assert_eq!(result.errors(), &[OpError::Engine("boom".into())]);
        assert_eq!(result.before(), result.after());
        assert_eq!(result.before(), before_failure.as_slice());
        assert_eq!(snapshot, before_failure);
    }
}
