//! # quill-sheets-engine
//!
//! The in-memory workbook engine quill-sheets operations execute against.
//!
//! The engine exposes a narrow, `Result`-returning surface: worksheets
//! looked up by (case-insensitive) name, cell value and style-name access,
//! named-style registration, drawing collections with duplicate-name
//! rejection, and workbook serialization to/from XLSX bytes.
//!
//! Operations never reach around this API; the assembly layer above treats
//! the engine as a collaborator and converts every [`EngineError`] at its own
//! boundary.
//!
//! ## Example
//!
//! ```rust
//! use quill_sheets_engine::{CellValue, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut("Sheet1").unwrap();
//! sheet.set_value(1, 1, CellValue::text("Hello")).unwrap();
//!
//! let bytes = workbook.save_to_bytes().unwrap();
//! assert!(bytes.starts_with(b"PK"));
//! ```

pub mod cell;
pub mod drawing;
pub mod error;
pub mod reader;
pub mod workbook;
pub mod worksheet;
pub mod writer;

pub use cell::{Cell, CellValue};
pub use drawing::{ChartObject, DrawingBorder, Picture, PictureFormat, Shape, ShapeKind, SparklineGroup};
pub use error::{EngineError, Result};
pub use workbook::{NamedStyle, Workbook};
pub use worksheet::Worksheet;
