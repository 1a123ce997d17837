//! # quill-sheets-ops
//!
//! The operation pipeline: every mutation of a workbook-in-progress is one
//! [`Operation`] that validates its own configuration, executes against the
//! engine, and reports a uniform [`OperationResult`] carrying before/after
//! snapshots.
//!
//! Operations never panic on engine failures and never leave a half-applied
//! mutation behind: the runner executes against a working copy of the
//! workbook and commits it only on success.
//!
//! Style resolution lives here too: [`StyleResolver`] turns named
//! [`StyleDescriptor`](quill_sheets_core::StyleDescriptor)s into registered,
//! addressable workbook styles - idempotently, with inheritance and odd/even
//! banding.

pub mod aggregate;
pub mod error;
pub mod insert;
pub mod operation;
pub mod resolve;
pub mod result;
pub mod set;

pub use aggregate::{AggregateDefinition, AggregateKind};
pub use error::OpError;
pub use insert::{
    InsertAggregate, InsertChart, InsertCopyRange, InsertDictionary, InsertMiniChart,
    InsertPicture, InsertRows, InsertShape, InsertTable, InsertText, InsertTransposeRange,
    InsertWorksheet, InsertXml, PictureSource,
};
pub use operation::{run, ApplyOutcome, Operation, Validation};
pub use resolve::{alternate_name, StyleHandle, StyleResolver, DEFAULT_STYLE_NAME};
pub use result::{OperationContext, OperationData, OperationResult, Outcome};
pub use set::{SetAutoFilter, SetGridLines};
