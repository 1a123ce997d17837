//! Prelude module - common imports for quill-sheets users
//!
//! ```rust
//! use quill_sheets::prelude::*;
//! ```

pub use crate::{
    // Aggregates
    AggregateDefinition,
    AggregateKind,
    // Style types
    Alignment,
    BorderLine,
    Borders,
    // Engine cell types
    CellValue,
    // The façade
    ChainMode,
    // Chart types
    Chart,
    ChartType,
    Color,
    DataReference,
    DataSeries,
    Document,
    FontSpec,
    HorizontalAlignment,
    // Operations
    InsertAggregate,
    InsertChart,
    InsertCopyRange,
    InsertDictionary,
    InsertMiniChart,
    InsertPicture,
    InsertRows,
    InsertShape,
    InsertTable,
    InsertText,
    InsertTransposeRange,
    InsertWorksheet,
    InsertXml,
    Legend,
    LegendPosition,
    MergeOrientation,
    MergeSpec,
    NumberFormatSpec,
    // Error and result types
    OpError,
    OperationResult,
    Outcome,
    PictureSource,
    // Coordinates
    Point,
    Range,
    SetAutoFilter,
    SetGridLines,
    ShapeKind,
    Sparkline,
    SparklineKind,
    StyleDescriptor,
    // Raw values
    Value,
    ValueFormat,
    VerticalAlignment,
    // The engine workbook
    Workbook,
};
