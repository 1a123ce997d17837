//! Error types for quill-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in quill-sheets-core
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Row or column outside the 1-based coordinate domain
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Invalid cell range format
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    /// Invalid expansion size (zero cells in either axis)
    #[error("Invalid expansion size: {0}")]
    InvalidSize(String),

    /// Invalid style configuration
    #[error("Invalid style: {0}")]
    InvalidStyle(String),
}
