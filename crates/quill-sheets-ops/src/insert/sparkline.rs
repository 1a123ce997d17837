//! Insert a mini-chart (sparkline)

use crate::error::OpError;
use crate::operation::{check_sheet_name, sheet_mut, ApplyOutcome, Operation, Validation};
use crate::resolve::StyleResolver;
use quill_sheets_chart::Sparkline;
use quill_sheets_core::Point;
use quill_sheets_engine::{SparklineGroup, Workbook};

/// Renders a sparkline over a fixed-size range expanded from an anchor
/// point. Duplicate element names on the same sheet are rejected.
#[derive(Debug, Clone)]
pub struct InsertMiniChart {
    sheet: String,
    name: String,
    location: Option<Point>,
    rows: u32,
    columns: u32,
    sparkline: Option<Sparkline>,
}

impl InsertMiniChart {
    /// Render `sparkline` in the single cell at `location` on `sheet`
    pub fn new<S, N>(sheet: S, name: N, location: Point, sparkline: Sparkline) -> Self
    where
        S: Into<String>,
        N: Into<String>,
    {
        Self {
            sheet: sheet.into(),
            name: name.into(),
            location: Some(location),
            rows: 1,
            columns: 1,
            sparkline: Some(sparkline),
        }
    }

    /// Build from optional configuration; a missing location or sparkline
    /// makes the operation a validated no-op
    pub fn optional<S, N>(
        sheet: S,
        name: N,
        location: Option<Point>,
        sparkline: Option<Sparkline>,
    ) -> Self
    where
        S: Into<String>,
        N: Into<String>,
    {
        Self {
            sheet: sheet.into(),
            name: name.into(),
            location,
            rows: 1,
            columns: 1,
            sparkline,
        }
    }

    /// Expand the anchor to a fixed `rows` x `columns` cell block
    pub fn with_extent(mut self, rows: u32, columns: u32) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }
}

impl Operation for InsertMiniChart {
    fn label(&self) -> &'static str {
        "insert-mini-chart"
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
                "mini-chart name must not be blank".into(),
            ));
        }
        if self.rows == 0 || self.columns == 0 {
            return Validation::Invalid(OpError::Validation(
                "mini-chart extent must cover at least one cell".into(),
            ));
        }
        if self.location.is_none() {
            return Validation::Skip("no location");
        }
        if self.sparkline.is_none() {
            return Validation::Skip("no sparkline data");
        }
        Validation::Ready
    }

    fn apply(
        &self,
        workbook: &mut Workbook,
        _styles: &mut StyleResolver,
    ) -> Result<ApplyOutcome, OpError> {
        let (Some(anchor), Some(sparkline)) = (self.location.as_ref(), self.sparkline.as_ref())
        else {
            return Err(OpError::Validation(
                "location and sparkline data are required".into(),
            ));
        };

        // The data range may live on another sheet; it must exist
        if let Some(data_sheet) = &sparkline.data_sheet {
            if !workbook.has_worksheet(data_sheet) {
                return Err(OpError::SheetNotFound(data_sheet.clone()));
            }
        }

        let location = anchor
            .expand(self.rows, self.columns)
            .map_err(|err| OpError::Validation(err.to_string()))?;

        let sheet = sheet_mut(workbook, &self.sheet)?;
        sheet.add_sparkline_group(SparklineGroup {
            name: self.name.clone(),
            sparkline: sparkline.clone(),
            location,
        })?;

        Ok(ApplyOutcome::touched(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::run;
    use quill_sheets_chart::SparklineKind;
    use quill_sheets_core::Range;

    #[test]
    fn test_extent_expands_from_anchor() {
        let sparkline = Sparkline::new(SparklineKind::Column, Range::parse("A1:A12").unwrap());
        let operation = InsertMiniChart::new(
            "Sheet1",
            "trend",
            Point::new(2, 4).unwrap(),
            sparkline,
        )
        .with_extent(1, 3);

        let mut workbook = Workbook::new();
        let mut styles = StyleResolver::new();
        let mut snapshot = Vec::new();
        let result = run(&operation, &mut workbook, &mut styles, &mut snapshot);

        assert!(result.is_success());
        assert_eq!(
            result.context().touched,
            Some(Range::parse("D2:F2").unwrap())
        );

        let sheet = workbook.worksheet("Sheet1").unwrap();
        assert_eq!(sheet.sparkline_groups().len(), 1);
        assert_eq!(
            sheet.sparkline_groups()[0].location,
            Range::parse("D2:F2").unwrap()
        );
    }

    #[test]
    fn test_missing_data_sheet_is_an_error() {
        let sparkline = Sparkline::new(SparklineKind::Line, Range::parse("A1:A12").unwrap())
            .with_data_sheet("Numbers");
        let operation =
            InsertMiniChart::new("Sheet1", "trend", Point::new(1, 1).unwrap(), sparkline);

        let mut workbook = Workbook::new();
        let mut styles = StyleResolver::new();
        let mut snapshot = Vec::new();
        let result = run(&operation, &mut workbook, &mut styles, &mut snapshot);

        assert!(!result.is_success());
        assert!(matches!(result.errors()[0], OpError::SheetNotFound(_)));
    }
}
