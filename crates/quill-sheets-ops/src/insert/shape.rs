//! Insert a shape

use crate::error::OpError;
use crate::operation::{check_sheet_name, sheet_mut, ApplyOutcome, Operation, Validation};
use crate::resolve::StyleResolver;
use quill_sheets_core::{Color, Range};
use quill_sheets_engine::{DrawingBorder, Shape, ShapeKind, Workbook};

/// Draws a shape over an anchor range, translating the content, outline and
/// shadow descriptors into the engine's drawing model one property at a
/// time. Duplicate element names on the same sheet are rejected.
#[derive(Debug, Clone)]
pub struct InsertShape {
    sheet: String,
    name: String,
    kind: ShapeKind,
    anchor: Option<Range>,
    text: Option<String>,
    fill: Option<Color>,
    line: Option<DrawingBorder>,
    shadow: bool,
}

impl InsertShape {
    /// Draw the shape `name` over `anchor` on `sheet`
    pub fn new<S, N>(sheet: S, name: N, kind: ShapeKind, anchor: Range) -> Self
    where
        S: Into<String>,
        N: Into<String>,
    {
        Self {
            sheet: sheet.into(),
            name: name.into(),
            kind,
            anchor: Some(anchor),
            text: None,
            fill: None,
            line: None,
            shadow: false,
        }
    }

    /// Build from optional configuration; a missing anchor makes the
    /// operation a validated no-op
    pub fn optional<S, N>(sheet: S, name: N, kind: ShapeKind, anchor: Option<Range>) -> Self
    where
        S: Into<String>,
        N: Into<String>,
    {
        Self {
            sheet: sheet.into(),
            name: name.into(),
            kind,
            anchor,
            text: None,
            fill: None,
            line: None,
            shadow: false,
        }
    }

    /// Text content inside the shape
    pub fn with_text<T: Into<String>>(mut self, text: T) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Fill color
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    /// Outline
    pub fn with_line(mut self, line: DrawingBorder) -> Self {
        self.line = Some(line);
        self
    }

    /// Drop shadow
    pub fn with_shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }
}

impl Operation for InsertShape {
    fn label(&self) -> &'static str {
        "insert-shape"
    }

    fn target_sheet(&self) -> Option<&str> {
        Some(&self.sheet)
    }

    fn validate(&self) -> Validation {
        if let Some(invalid) = check_sheet_name(&self.sheet) {
            return invalid;
        }
        if self.name.trim().is_empty() {
            return Validation::Invalid(OpError::Validation(
                "shape name must not be blank".into(),
            ));
        }
        if self.anchor.is_none() {
            return Validation::Skip("no anchor");
        }
        Validation::Ready
    }

    fn apply(
        &self,
        workbook: &mut Workbook,
        _styles: &mut StyleResolver,
    ) -> Result<ApplyOutcome, OpError> {
        let Some(anchor) = self.anchor.as_ref() else {
            return Err(OpError::Validation("anchor is required".into()));
        };

        let sheet = sheet_mut(workbook, &self.sheet)?;
        sheet.add_shape(Shape {
            name: self.name.clone(),
            kind: self.kind,
            anchor: *anchor,
            text: self.text.clone(),
            fill: self.fill,
            line: self.line,
            shadow: self.shadow,
        })?;

        Ok(ApplyOutcome::touched(*anchor))
    }
}
