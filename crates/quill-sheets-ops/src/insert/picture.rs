//! Insert a picture

use std::path::PathBuf;

use crate::error::OpError;
use crate::operation::{check_sheet_name, sheet_mut, ApplyOutcome, Operation, Validation};
use crate::resolve::StyleResolver;
use quill_sheets_core::Range;
use quill_sheets_engine::{DrawingBorder, Picture, PictureFormat, Workbook};

/// Where a picture's bytes come from
#[derive(Debug, Clone)]
pub enum PictureSource {
    /// Read from a file path at execution time
    Path(PathBuf),
    /// Already-loaded image data
    Bytes(Vec<u8>),
}

/// Attaches a picture to an anchor range, rejecting duplicate element names
/// on the same sheet. A missing or unreadable image source is an error, not
/// a silent no-op.
#[derive(Debug, Clone)]
pub struct InsertPicture {
    sheet: String,
    name: String,
    source: Option<PictureSource>,
    anchor: Option<Range>,
    border: Option<DrawingBorder>,
}

impl InsertPicture {
    /// Attach the picture `name` over `anchor` on `sheet`
    pub fn new<S, N>(sheet: S, name: N, source: PictureSource, anchor: Range) -> Self
    where
        S: Into<String>,
        N: Into<String>,
    {
        Self {
            sheet: sheet.into(),
            name: name.into(),
            source: Some(source),
            anchor: Some(anchor),
            border: None,
        }
    }

    /// Build from optional configuration; a missing anchor makes the
    /// operation a validated no-op (a missing source does not)
    pub fn optional<S, N>(
        sheet: S,
        name: N,
        source: Option<PictureSource>,
        anchor: Option<Range>,
    ) -> Self
    where
        S: Into<String>,
        N: Into<String>,
    {
        Self {
            sheet: sheet.into(),
            name: name.into(),
            source,
            anchor,
            border: None,
        }
    }

    /// Outline the picture
    pub fn with_border(mut self, border: DrawingBorder) -> Self {
        self.border = Some(border);
        self
    }
}

impl Operation for InsertPicture {
    fn label(&self) -> &'static str {
        "insert-picture"
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
                "picture name must not be blank".into(),
            ));
        }
        if self.source.is_none() {
            return Validation::Invalid(OpError::Validation(
                "picture source is required".into(),
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
        let (Some(source), Some(anchor)) = (self.source.as_ref(), self.anchor.as_ref()) else {
            return Err(OpError::Validation("source and anchor are required".into()));
        };

        let data = match source {
            PictureSource::Bytes(bytes) => bytes.clone(),
            PictureSource::Path(path) => std::fs::read(path).map_err(|err| {
                OpError::NotFound(format!("picture source '{}': {}", path.display(), err))
            })?,
        };
        let format = PictureFormat::sniff(&data).ok_or_else(|| {
            OpError::Validation(format!("unrecognized image data for picture '{}'", self.name))
        })?;

        let sheet = sheet_mut(workbook, &self.sheet)?;
        sheet.add_picture(Picture {
            name: self.name.clone(),
            data,
            format,
            anchor: *anchor,
            border: self.border,
        })?;

        Ok(ApplyOutcome::touched(*anchor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::run;

    const PNG_STUB: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00];

    fn anchor() -> Range {
        Range::parse("B2:E8").unwrap()
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let operation = InsertPicture::new(
            "Sheet1",
            "logo",
            PictureSource::Path(PathBuf::from("/nonexistent/logo.png")),
            anchor(),
        );
        let mut workbook = Workbook::new();
        let mut styles = StyleResolver::new();
        let mut snapshot = Vec::new();

        let result = run(&operation, &mut workbook, &mut styles, &mut snapshot);
        assert!(!result.is_success());
        assert!(matches!(result.errors()[0], OpError::NotFound(_)));
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut workbook = Workbook::new();
        let mut styles = StyleResolver::new();
        let mut snapshot = Vec::new();

        let first = InsertPicture::new(
            "Sheet1",
            "logo",
            PictureSource::Bytes(PNG_STUB.to_vec()),
            anchor(),
        );
        assert!(run(&first, &mut workbook, &mut styles, &mut snapshot).is_success());

        let second = InsertPicture::new(
            "Sheet1",
            "logo",
            PictureSource::Bytes(PNG_STUB.to_vec()),
            Range::parse("G2:J8").unwrap(),
        );
        let result = run(&second, &mut workbook, &mut styles, &mut snapshot);
        assert!(!result.is_success());
        assert!(matches!(result.errors()[0], OpError::Duplicate(_)));
    }

    #[test]
    fn test_unrecognized_data_is_an_error() {
        let operation = InsertPicture::new(
            "Sheet1",
            "logo",
            PictureSource::Bytes(b"plainly not an image".to_vec()),
            anchor(),
        );
        let mut workbook = Workbook::new();
        let mut styles = StyleResolver::new();
        let mut snapshot = Vec::new();

        let result = run(&operation, &mut workbook, &mut styles, &mut snapshot);
        assert!(!result.is_success());
        assert!(matches!(result.errors()[0], OpError::Validation(_)));
    }
}
