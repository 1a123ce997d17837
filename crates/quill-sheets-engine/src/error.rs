//! Error types for quill-sheets-engine

use thiserror::Error;

/// Result type alias using [`EngineError`]
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors surfaced by the workbook engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// Row number outside the sheet bounds
    #[error("Row {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column number outside the sheet bounds
    #[error("Column {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u32, u32),

    /// Worksheet not found by name
    #[error("Worksheet not found: {0}")]
    SheetNotFound(String),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Invalid style name
    #[error("Invalid style name: {0}")]
    InvalidStyleName(String),

    /// Duplicate named style
    #[error("Style name already registered: {0}")]
    DuplicateStyleName(String),

    /// Duplicate drawing element name on one sheet
    #[error("Drawing element name already exists on sheet '{sheet}': {name}")]
    DuplicateDrawingName { sheet: String, name: String },

    /// Merge would overlap an existing merged region
    #[error("Range {0} overlaps an existing merged region")]
    MergeConflict(String),

    /// I/O failure during (de)serialization
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP packaging failure
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML parse failure
    #[error("XML error: {0}")]
    Xml(String),

    /// Structurally invalid workbook data
    #[error("Invalid workbook: {0}")]
    InvalidFormat(String),
}
