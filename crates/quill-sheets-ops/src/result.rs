//! Operation results
//!
//! Every executed operation reports exactly one [`OperationResult`]: either
//! success or a list of errors, and in both cases the data slot is populated
//! with the serialized workbook before and after the operation. On failure
//! the two snapshots are identical, so a caller can keep chaining from the
//! last good state or re-drive the failed operation against the unmodified
//! input.

use crate::error::OpError;
use quill_sheets_core::Range;

/// What the operation was and where it aimed
#[derive(Debug, Clone, Default)]
pub struct OperationContext {
    /// Operation label (e.g. "insert-text")
    pub operation: String,
    /// Target sheet name, if the operation had one
    pub sheet: Option<String>,
    /// Bounding rectangle of all cells the operation touched, if any
    pub touched: Option<Range>,
}

/// Snapshots and context carried by every result, success or error
#[derive(Debug, Clone)]
pub struct OperationData {
    /// Serialized workbook before the operation ran
    pub before: Vec<u8>,
    /// Serialized workbook after the operation; equals `before` on failure
    /// or no-op
    pub after: Vec<u8>,
    /// Originating context
    pub context: OperationContext,
}

/// Success/error tag of a result
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The operation applied (or was a validated no-op)
    Success,
    /// The operation failed; the workbook is unchanged
    Error(Vec<OpError>),
}

/// The uniform result of one operation
#[derive(Debug, Clone)]
pub struct OperationResult {
    outcome: Outcome,
    data: OperationData,
}

impl OperationResult {
    pub(crate) fn success(data: OperationData) -> Self {
        Self {
            outcome: Outcome::Success,
            data,
        }
    }

    pub(crate) fn error(errors: Vec<OpError>, data: OperationData) -> Self {
        Self {
            outcome: Outcome::Error(errors),
            data,
        }
    }

    /// Whether the operation succeeded
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success)
    }

    /// The success/error tag
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// The errors of a failed operation (empty on success)
    pub fn errors(&self) -> &[OpError] {
        match &self.outcome {
            Outcome::Error(errors) => errors,
            Outcome::Success => &[],
        }
    }

    /// The error messages of a failed operation (empty on success)
    pub fn messages(&self) -> Vec<String> {
        self.errors().iter().map(|e| e.to_string()).collect()
    }

    /// Snapshots and context
    pub fn data(&self) -> &OperationData {
        &self.data
    }

    /// Serialized workbook before the operation
    pub fn before(&self) -> &[u8] {
        &self.data.before
    }

    /// Serialized workbook after the operation
    pub fn after(&self) -> &[u8] {
        &self.data.after
    }

    /// Originating context
    pub fn context(&self) -> &OperationContext {
        &self.data.context
    }
}
