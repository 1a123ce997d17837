//! Operation error taxonomy

use quill_sheets_engine::EngineError;
use thiserror::Error;

/// Errors an operation can report.
///
/// Engine failures are converted at the operation boundary and never
/// propagate past it; the variants mirror how a failure was detected rather
/// than where.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OpError {
    /// Bad or missing required configuration, caught before touching the
    /// workbook
    #[error("Invalid operation input: {0}")]
    Validation(String),

    /// The named target worksheet does not exist
    #[error("Worksheet not found: {0}")]
    SheetNotFound(String),

    /// A referenced collaborator (file, element) is absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// A sheet, style or drawing element name collides
    #[error("Duplicate name: {0}")]
    Duplicate(String),

    /// Any failure surfaced by the engine during execution, wrapped with its
    /// message
    #[error("Engine error: {0}")]
    Engine(String),

    /// Invalid style configuration (e.g. an inheritance cycle)
    #[error("Style configuration error: {0}")]
    Configuration(String),
}

impl From<EngineError> for OpError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::SheetNotFound(name) => OpError::SheetNotFound(name),
            EngineError::DuplicateSheetName(name) | EngineError::DuplicateStyleName(name) => {
                OpError::Duplicate(name)
            }
            EngineError::DuplicateDrawingName { name, .. } => OpError::Duplicate(name),
            EngineError::InvalidSheetName(name) => {
                OpError::Validation(format!("invalid sheet name: {}", name))
            }
            other => OpError::Engine(other.to_string()),
        }
    }
}
