//! # quill-sheets-core
//!
//! Coordinate and style primitives for the quill-sheets document assembler.
//!
//! This crate provides the types every operation depends on:
//! - [`Point`] and [`Range`] - 1-based cell coordinates and rectangular ranges
//! - [`StyleDescriptor`] - named style bundles with inheritance and banding
//! - [`ValueFormat`] - the single place raw values are turned into cell text
//! - [`Value`] - the raw datum a caller hands to an insert operation
//!
//! ## Example
//!
//! ```rust
//! use quill_sheets_core::{Point, Range};
//!
//! let anchor = Point::new(4, 2).unwrap();
//! assert_eq!(anchor.address(), "B4");
//!
//! let range = Range::parse("B4:B13").unwrap();
//! assert_eq!(range.row_count(), 10);
//! ```

pub mod error;
pub mod point;
pub mod range;
pub mod style;
pub mod value;

pub use error::{Error, Result};
pub use point::{AbsoluteStrategy, Point};
pub use range::Range;
pub use value::{Value, ValueKind};

// Re-export all style types for convenience
pub use style::{
    Alignment, BorderEdge, BorderLine, Borders, Color, DateTimeFormatSpec, FillSpec, FontSpec,
    HorizontalAlignment, MergeOrientation, MergeSpec, NumberFormatSpec, NumberLocale,
    StyleAttributes, StyleDescriptor, Underline, ValueFormat, VerticalAlignment,
};

/// Maximum row number in a worksheet (1-based, Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum column number in a worksheet (1-based, Excel limit)
pub const MAX_COLUMNS: u32 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
