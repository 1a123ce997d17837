//! The chaining document façade

use std::path::Path;

use quill_sheets_core::StyleDescriptor;
use quill_sheets_engine::{Result as EngineResult, Workbook};
use quill_sheets_ops::{run, Operation, OperationResult, StyleResolver};

/// How the chain reacts to a failed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainMode {
    /// Record the failure and keep chaining from the last good state
    #[default]
    Continue,
    /// Skip every later operation after the first failure
    Halt,
}

/// The workbook-in-progress and its operation chain.
///
/// A `Document` owns the engine workbook, the style resolver and the list of
/// applied operation results. `insert` and `set` are chainable; each call
/// constructs exactly one operation, executes it, and records its result.
///
/// Operations run strictly in call order against the single shared workbook;
/// for concurrent generation, use one independent `Document` per thread -
/// nothing is shared between instances.
pub struct Document {
    workbook: Workbook,
    styles: StyleResolver,
    snapshot: Vec<u8>,
    results: Vec<OperationResult>,
    mode: ChainMode,
    halted: bool,
}

impl Document {
    /// Create a document with a fresh workbook (one sheet, "Sheet1")
    pub fn new() -> Self {
        Self::with_workbook(Workbook::new())
    }

    /// Create a document with a fresh workbook and a style configuration
    /// (the registry styles can be referenced via `inherits` and are
    /// resolved on first use)
    pub fn with_styles(styles: Vec<StyleDescriptor>) -> Self {
        let mut document = Self::new();
        document.styles = StyleResolver::with_styles(styles);
        document
    }

    /// Create a document over an existing workbook
    pub fn with_workbook(workbook: Workbook) -> Self {
        Self {
            workbook,
            styles: StyleResolver::new(),
            snapshot: Vec::new(),
            results: Vec::new(),
            mode: ChainMode::default(),
            halted: false,
        }
    }

    /// Open a document from serialized workbook bytes
    pub fn open(bytes: &[u8]) -> EngineResult<Self> {
        Ok(Self::with_workbook(Workbook::from_bytes(bytes)?))
    }

    /// Choose how the chain reacts to failures
    pub fn chain_mode(mut self, mode: ChainMode) -> Self {
        self.mode = mode;
        self
    }

    /// Add a style descriptor to the resolver registry
    pub fn register_style(&mut self, descriptor: StyleDescriptor) -> &mut Self {
        self.styles.register(descriptor);
        self
    }

    /// Apply one insert operation and record its result
    pub fn insert<O: Operation>(&mut self, operation: O) -> &mut Self {
        self.run_operation(operation)
    }

    /// Apply one set operation and record its result
    pub fn set<O: Operation>(&mut self, operation: O) -> &mut Self {
        self.run_operation(operation)
    }

    fn run_operation<O: Operation>(&mut self, operation: O) -> &mut Self {
        if self.halted {
            log::debug!(
                "chain is halted; operation '{}' not executed",
                operation.label()
            );
            return self;
        }

        let result = run(
            &operation,
            &mut self.workbook,
            &mut self.styles,
            &mut self.snapshot,
        );
        if !result.is_success() && self.mode == ChainMode::Halt {
            self.halted = true;
        }
        self.results.push(result);
        self
    }

    /// Results of every executed operation, in order
    pub fn results(&self) -> &[OperationResult] {
        &self.results
    }

    /// Result of the most recently executed operation
    pub fn last_result(&self) -> Option<&OperationResult> {
        self.results.last()
    }

    /// Whether any executed operation failed
    pub fn has_errors(&self) -> bool {
        self.results.iter().any(|r| !r.is_success())
    }

    /// Whether a failure halted the chain (only in [`ChainMode::Halt`])
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Inspect the workbook-in-progress
    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    /// Produce the final output artifact
    pub fn save_to_bytes(&self) -> EngineResult<Vec<u8>> {
        self.workbook.save_to_bytes()
    }

    /// Write the final output artifact to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> EngineResult<()> {
        let bytes = self.save_to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
