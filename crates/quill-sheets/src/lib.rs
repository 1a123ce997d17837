//! # quill-sheets
//!
//! Declarative spreadsheet document assembly: describe cells, ranges,
//! styles, pictures, shapes, charts and tables as plain data objects and
//! chain them into a finished workbook.
//!
//! Every `insert`/`set` call is one independently validated operation with a
//! uniform result; a failed operation never leaves a half-applied workbook
//! behind, so a chain can halt on the first failure or keep building from
//! the last good state - the caller chooses.
//!
//! ## Example
//!
//! ```rust
//! use quill_sheets::prelude::*;
//!
//! let mut document = Document::new();
//! document
//!     .insert(InsertText::new(
//!         "Sheet1",
//!         Point::new(1, 2).unwrap(),
//!         "Hello",
//!     ))
//!     .set(SetGridLines::new("Sheet1", false));
//!
//! assert!(!document.has_errors());
//! let bytes = document.save_to_bytes().unwrap();
//! assert!(bytes.starts_with(b"PK"));
//! ```

pub mod document;
pub mod prelude;

pub use document::{ChainMode, Document};

// Re-export core types
pub use quill_sheets_core::{
    AbsoluteStrategy, Alignment, BorderEdge, BorderLine, Borders, Color, DateTimeFormatSpec,
    FillSpec, FontSpec, HorizontalAlignment, MergeOrientation, MergeSpec, NumberFormatSpec,
    NumberLocale, Point, Range, StyleAttributes, StyleDescriptor, Underline, Value, ValueFormat,
    ValueKind, VerticalAlignment, MAX_COLUMNS, MAX_ROWS, MAX_SHEET_NAME_LEN,
};

// Re-export chart types
pub use quill_sheets_chart::{
    Axis, AxisPosition, Chart, ChartType, DataReference, DataSeries, Legend, LegendPosition,
    Sparkline, SparklineKind,
};

// Re-export engine types
pub use quill_sheets_engine::{
    Cell, CellValue, ChartObject, DrawingBorder, EngineError, NamedStyle, Picture, PictureFormat,
    Shape, ShapeKind, SparklineGroup, Workbook, Worksheet,
};

// Re-export the operation pipeline
pub use quill_sheets_ops::{
    alternate_name, AggregateDefinition, AggregateKind, ApplyOutcome, InsertAggregate,
    InsertChart, InsertCopyRange, InsertDictionary, InsertMiniChart, InsertPicture, InsertRows,
    InsertShape, InsertTable, InsertText, InsertTransposeRange, InsertWorksheet, InsertXml,
    OpError, Operation, OperationContext, OperationData, OperationResult, Outcome, PictureSource,
    SetAutoFilter, SetGridLines, StyleHandle, StyleResolver, Validation, DEFAULT_STYLE_NAME,
};
