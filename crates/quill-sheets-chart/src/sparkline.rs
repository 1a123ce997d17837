//! Sparkline (mini-chart) types

use quill_sheets_core::{Color, Range};

/// Sparkline kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SparklineKind {
    #[default]
    Line,
    Column,
    WinLoss,
}

/// A mini-chart rendered inside a cell range
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sparkline {
    /// Sparkline kind
    pub kind: SparklineKind,
    /// Source data range
    pub data: Range,
    /// Worksheet the data range lives on; the target sheet when unset
    pub data_sheet: Option<String>,
    /// Series color
    pub color: Color,
}

impl Sparkline {
    /// Create a new sparkline over the given data range
    pub fn new(kind: SparklineKind, data: Range) -> Self {
        Self {
            kind,
            data,
            data_sheet: None,
            color: Color::Auto,
        }
    }

    /// Set the worksheet the data range lives on
    pub fn with_data_sheet<S: Into<String>>(mut self, sheet: S) -> Self {
        self.data_sheet = Some(sheet.into());
        self
    }

    /// Set the series color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}
