//! Insert a full chart

use crate::error::OpError;
use crate::operation::{check_sheet_name, sheet_mut, ApplyOutcome, Operation, Validation};
use crate::resolve::StyleResolver;
use quill_sheets_chart::Chart;
use quill_sheets_core::Range;
use quill_sheets_engine::{ChartObject, Workbook};

/// Embeds a chart over an anchor range. Duplicate element names on the same
/// sheet are rejected, and a chart without data series fails validation.
#[derive(Debug, Clone)]
pub struct InsertChart {
    sheet: String,
    name: String,
    chart: Option<Chart>,
    anchor: Option<Range>,
}

impl InsertChart {
    /// Embed `chart` as `name` over `anchor` on `sheet`
    pub fn new<S, N>(sheet: S, name: N, chart: Chart, anchor: Range) -> Self
    where
        S: Into<String>,
        N: Into<String>,
    {
        Self {
            sheet: sheet.into(),
            name: name.into(),
            chart: Some(chart),
            anchor: Some(anchor),
        }
    }

    /// Build from optional configuration; a missing chart or anchor makes
    /// the operation a validated no-op
    pub fn optional<S, N>(sheet: S, name: N, chart: Option<Chart>, anchor: Option<Range>) -> Self
    where
        S: Into<String>,
        N: Into<String>,
    {
        Self {
            sheet: sheet.into(),
            name: name.into(),
            chart,
            anchor,
        }
    }
}

impl Operation for InsertChart {
    fn label(&self) -> &'static str {
        "insert-chart"
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
                "chart name must not be blank".into(),
            ));
        }
        match &self.chart {
            None => return Validation::Skip("no chart definition"),
            Some(chart) if chart.series.is_empty() => {
                return Validation::Invalid(OpError::Validation(
                    "chart has no data series".into(),
                ));
            }
            Some(_) => {}
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
        let (Some(chart), Some(anchor)) = (self.chart.as_ref(), self.anchor.as_ref()) else {
            return Err(OpError::Validation("chart and anchor are required".into()));
        };

        let sheet = sheet_mut(workbook, &self.sheet)?;
        sheet.add_chart(ChartObject {
            name: self.name.clone(),
            chart: chart.clone(),
            anchor: *anchor,
        })?;

        Ok(ApplyOutcome::touched(*anchor))
    }
}
