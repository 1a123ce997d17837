//! Aggregate formula resolution
//!
//! An [`AggregateDefinition`] is a declarative description of a worksheet
//! aggregate; resolving it produces the formula text written into a cell.
//! With the autofilter flag set, the filter-aware `SUBTOTAL` variant is used
//! so hidden rows are excluded the way the spreadsheet application does it.

use quill_sheets_core::Range;

/// Aggregate function kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateKind {
    Count,
    Sum,
    Average,
    Min,
    Max,
}

impl AggregateKind {
    /// Plain worksheet function name
    pub fn function_name(&self) -> &'static str {
        match self {
            AggregateKind::Count => "COUNT",
            AggregateKind::Sum => "SUM",
            AggregateKind::Average => "AVERAGE",
            AggregateKind::Min => "MIN",
            AggregateKind::Max => "MAX",
        }
    }

    /// SUBTOTAL function number used when the source range is autofiltered
    pub fn subtotal_code(&self) -> u8 {
        match self {
            AggregateKind::Average => 1,
            AggregateKind::Count => 2,
            AggregateKind::Max => 4,
            AggregateKind::Min => 5,
            AggregateKind::Sum => 9,
        }
    }
}

/// Declarative description of a worksheet aggregate
#[derive(Debug, Clone)]
pub struct AggregateDefinition {
    /// Worksheet the source range lives on; the operation's target sheet
    /// when unset
    pub worksheet: Option<String>,
    /// Aggregate function
    pub kind: AggregateKind,
    /// Source range
    pub range: Range,
    /// Use the filter-aware aggregate variant
    pub has_auto_filter: bool,
}

impl AggregateDefinition {
    /// Create a definition over a range on the target sheet
    pub fn new(kind: AggregateKind, range: Range) -> Self {
        Self {
            worksheet: None,
            kind,
            range,
            has_auto_filter: false,
        }
    }

    /// Aggregate over a range on another worksheet
    pub fn with_worksheet<S: Into<String>>(mut self, worksheet: S) -> Self {
        self.worksheet = Some(worksheet.into());
        self
    }

    /// Use the filter-aware aggregate variant
    pub fn with_auto_filter(mut self, has_auto_filter: bool) -> Self {
        self.has_auto_filter = has_auto_filter;
        self
    }

    /// Resolve into formula text for a cell on `target_sheet`.
    ///
    /// The range reference is sheet-qualified only when the source worksheet
    /// differs from the target.
    pub fn formula(&self, target_sheet: &str) -> String {
        let reference = match &self.worksheet {
            Some(source) if !source.eq_ignore_ascii_case(target_sheet) => {
                format!("{}!{}", quote_sheet_name(source), self.range.address())
            }
            _ => self.range.address(),
        };

        if self.has_auto_filter {
            format!("=SUBTOTAL({},{})", self.kind.subtotal_code(), reference)
        } else {
            format!("={}({})", self.kind.function_name(), reference)
        }
    }
}

/// Quote a sheet name for use in a formula reference when needed
fn quote_sheet_name(name: &str) -> String {
    let needs_quotes = !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if needs_quotes {
        format!("'{}'", name.replace('\'', "''"))
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn range() -> Range {
        // (column=2,row=4) through (column=2,row=13)
        Range::parse("B4:B13").unwrap()
    }

    #[test]
    fn test_plain_sum() {
        let definition = AggregateDefinition::new(AggregateKind::Sum, range());
        assert_eq!(definition.formula("Sheet1"), "=SUM(B4:B13)");
    }

    #[test]
    fn test_all_plain_function_names() {
        for (kind, expected) in [
            (AggregateKind::Count, "=COUNT(B4:B13)"),
            (AggregateKind::Average, "=AVERAGE(B4:B13)"),
            (AggregateKind::Min, "=MIN(B4:B13)"),
            (AggregateKind::Max, "=MAX(B4:B13)"),
        ] {
            let definition = AggregateDefinition::new(kind, range());
            assert_eq!(definition.formula("Sheet1"), expected);
        }
    }

    #[test]
    fn test_auto_filter_uses_subtotal_codes() {
        for (kind, expected) in [
            (AggregateKind::Average, "=SUBTOTAL(1,B4:B13)"),
            (AggregateKind::Count, "=SUBTOTAL(2,B4:B13)"),
            (AggregateKind::Max, "=SUBTOTAL(4,B4:B13)"),
            (AggregateKind::Min, "=SUBTOTAL(5,B4:B13)"),
            (AggregateKind::Sum, "=SUBTOTAL(9,B4:B13)"),
        ] {
            let definition =
                AggregateDefinition::new(kind, range()).with_auto_filter(true);
            assert_eq!(definition.formula("Sheet1"), expected);
        }
    }

    #[test]
    fn test_cross_sheet_reference_is_qualified() {
        let definition =
            AggregateDefinition::new(AggregateKind::Sum, range()).with_worksheet("Data");
        assert_eq!(definition.formula("Report"), "=SUM(Data!B4:B13)");
    }

    #[test]
    fn test_same_sheet_reference_is_unqualified() {
        let definition =
            AggregateDefinition::new(AggregateKind::Sum, range()).with_worksheet("report");
        assert_eq!(definition.formula("Report"), "=SUM(B4:B13)");
    }

    #[test]
    fn test_sheet_names_with_spaces_are_quoted() {
        let definition = AggregateDefinition::new(AggregateKind::Sum, range())
            .with_worksheet("Raw Data");
        assert_eq!(definition.formula("Report"), "=SUM('Raw Data'!B4:B13)");
    }
}
