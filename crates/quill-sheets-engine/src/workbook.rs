//! Workbook type - the engine's main document structure

use crate::error::{EngineError, Result};
use crate::worksheet::Worksheet;
use quill_sheets_core::{StyleAttributes, MAX_SHEET_NAME_LEN};

/// A named style as registered on a workbook
#[derive(Debug, Clone, PartialEq)]
pub struct NamedStyle {
    /// Unique style name
    pub name: String,
    /// Concrete style attributes
    pub attributes: StyleAttributes,
}

impl NamedStyle {
    /// Create a named style
    pub fn new<S: Into<String>>(name: S, attributes: StyleAttributes) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }
}

/// A workbook: worksheets plus the registry of named styles
///
/// Worksheet lookup by name is case-insensitive, matching how spreadsheet
/// applications treat sheet names. Style names are exact.
#[derive(Debug, Clone)]
pub struct Workbook {
    /// Worksheets in order
    worksheets: Vec<Worksheet>,
    /// Registered named styles in registration order
    styles: Vec<NamedStyle>,
}

impl Workbook {
    /// Create a new workbook with one worksheet named "Sheet1"
    pub fn new() -> Self {
        let mut workbook = Self::empty();
        workbook
            .add_worksheet("Sheet1")
            .expect("default sheet name is valid");
        workbook
    }

    /// Create a workbook with no worksheets
    pub fn empty() -> Self {
        Self {
            worksheets: Vec::new(),
            styles: Vec::new(),
        }
    }

    // === Worksheets ===

    /// Number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Get a worksheet by index
    pub fn worksheet_at(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a worksheet by name (case-insensitive)
    pub fn worksheet(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets
            .iter()
            .find(|ws| ws.name().eq_ignore_ascii_case(name))
    }

    /// Get a mutable worksheet by name (case-insensitive)
    pub fn worksheet_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.worksheets
            .iter_mut()
            .find(|ws| ws.name().eq_ignore_ascii_case(name))
    }

    /// Check whether a worksheet with this name exists (case-insensitive)
    pub fn has_worksheet(&self, name: &str) -> bool {
        self.worksheet(name).is_some()
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// All sheet names, in order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.worksheets.iter().map(|ws| ws.name()).collect()
    }

    /// Add a new, empty worksheet with the given name
    pub fn add_worksheet(&mut self, name: &str) -> Result<()> {
        self.validate_sheet_name(name)?;
        self.worksheets.push(Worksheet::new(name));
        Ok(())
    }

    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(EngineError::InvalidSheetName("empty name".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(EngineError::InvalidSheetName(format!(
                "'{}' exceeds {} characters",
                name, MAX_SHEET_NAME_LEN
            )));
        }
        if name.contains(['[', ']', ':', '*', '?', '/', '\\']) {
            return Err(EngineError::InvalidSheetName(format!(
                "'{}' contains a forbidden character",
                name
            )));
        }
        if self.has_worksheet(name) {
            return Err(EngineError::DuplicateSheetName(name.to_string()));
        }
        Ok(())
    }

    // === Named styles ===

    /// Register a named style; duplicate names are rejected
    pub fn add_named_style(&mut self, style: NamedStyle) -> Result<()> {
        if style.name.trim().is_empty() {
            return Err(EngineError::InvalidStyleName("empty name".into()));
        }
        if self.has_named_style(&style.name) {
            return Err(EngineError::DuplicateStyleName(style.name));
        }
        log::debug!("registering named style '{}'", style.name);
        self.styles.push(style);
        Ok(())
    }

    /// Look up a registered style by exact name
    pub fn named_style(&self, name: &str) -> Option<&NamedStyle> {
        self.styles.iter().find(|s| s.name == name)
    }

    /// Check whether a style name is registered
    pub fn has_named_style(&self, name: &str) -> bool {
        self.named_style(name).is_some()
    }

    /// All registered styles, in registration order
    pub fn named_styles(&self) -> &[NamedStyle] {
        &self.styles
    }

    // === Serialization ===

    /// Serialize the workbook to XLSX bytes
    pub fn save_to_bytes(&self) -> Result<Vec<u8>> {
        crate::writer::write_to_bytes(self)
    }

    /// Read a workbook back from XLSX bytes.
    ///
    /// Restores sheets, cell values/formulas, merged regions and display
    /// settings; cell style assignments are not read back.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        crate::reader::read_from_bytes(data)
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}
