//! Insert XML-sourced row data

use quick_xml::events::Event;
use quick_xml::Reader;

use super::{write_banded_value, Extent};
use crate::error::OpError;
use crate::operation::{check_sheet_name, sheet_mut, ApplyOutcome, Operation, Validation};
use crate::resolve::StyleResolver;
use quill_sheets_core::{Point, StyleDescriptor, Value};
use quill_sheets_engine::Workbook;

/// Writes rows parsed from an XML document: every `<row>` element (the
/// element name is configurable) becomes one sheet row, each child element's
/// text one cell.
#[derive(Debug, Clone)]
pub struct InsertXml {
    sheet: String,
    location: Option<Point>,
    xml: Option<String>,
    row_element: String,
    style: Option<StyleDescriptor>,
}

impl InsertXml {
    /// Insert the rows of `xml` starting at `location` on `sheet`
    pub fn new<S, X>(sheet: S, location: Point, xml: X) -> Self
    where
        S: Into<String>,
        X: Into<String>,
    {
        Self {
            sheet: sheet.into(),
            location: Some(location),
            xml: Some(xml.into()),
            row_element: "row".to_string(),
            style: None,
        }
    }

    /// Build from optional configuration; a missing location or document
    /// makes the operation a validated no-op
    pub fn optional<S: Into<String>>(
        sheet: S,
        location: Option<Point>,
        xml: Option<String>,
    ) -> Self {
        Self {
            sheet: sheet.into(),
            location,
            xml,
            row_element: "row".to_string(),
            style: None,
        }
    }

    /// Name of the element that delimits one row (default "row")
    pub fn with_row_element<E: Into<String>>(mut self, element: E) -> Self {
        self.row_element = element.into();
        self
    }

    /// Style the written cells
    pub fn with_style(mut self, style: StyleDescriptor) -> Self {
        self.style = Some(style);
        self
    }
}

impl Operation for InsertXml {
    fn label(&self) -> &'static str {
        "insert-xml"
    }

    fn target_sheet(&self) -> Option<&str> {
        Some(&self.sheet)
    }

    fn validate(&self) -> Validation {
        if let Some(invalid) = check_sheet_name(&self.sheet) {
            return invalid;
        }
        if self.row_element.trim().is_empty() {
            return Validation::Invalid(OpError::Validation(
                "row element name must not be blank".into(),
            ));
        }
        if self.location.is_none() {
            return Validation::Skip("no location");
        }
        if self.xml.is_none() {
            return Validation::Skip("no document");
        }
        Validation::Ready
    }

    fn apply(
        &self,
        workbook: &mut Workbook,
        styles: &mut StyleResolver,
    ) -> Result<ApplyOutcome, OpError> {
        let (Some(start), Some(xml)) = (self.location.as_ref(), self.xml.as_ref()) else {
            return Err(OpError::Validation("location and document are required".into()));
        };

        let rows = parse_rows(xml, &self.row_element)?;
        let handle = styles.resolve_or_default(workbook, self.style.as_ref())?;
        let sheet = sheet_mut(workbook, &self.sheet)?;

        let mut extent = Extent::new(*start);
        let mut row_anchor = *start;
        for row in rows {
            let mut cell = row_anchor;
            for value in row {
                write_banded_value(sheet, &cell, &value, &handle)?;
                extent.touch(&cell);
                cell.offset(0, 1);
            }
            row_anchor.offset(1, 0);
        }

        Ok(ApplyOutcome {
            touched: extent.into_range(),
        })
    }
}

/// Parse row/cell values out of an XML document.
///
/// Each element named `row_element` opens a row; each of its child elements
/// contributes one text cell (empty elements contribute an empty cell).
fn parse_rows(xml: &str, row_element: &str) -> Result<Vec<Vec<Value>>, OpError> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.trim_text(true);

    let mut rows: Vec<Vec<Value>> = Vec::new();
    let mut current_row: Option<Vec<Value>> = None;
    let mut in_field = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if e.name().as_ref() == row_element.as_bytes() {
                    current_row = Some(Vec::new());
                } else if let Some(row) = current_row.as_mut() {
                    row.push(Value::Text(String::new()));
                    in_field = true;
                }
            }
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == row_element.as_bytes() {
                    rows.push(Vec::new());
                } else if let Some(row) = current_row.as_mut() {
                    row.push(Value::Text(String::new()));
                }
            }
            Ok(Event::Text(e)) => {
                if in_field {
                    if let (Ok(text), Some(row)) = (e.unescape(), current_row.as_mut()) {
                        if let Some(Value::Text(last)) = row.last_mut() {
                            *last = text.to_string();
                        }
                    }
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == row_element.as_bytes() {
                    if let Some(row) = current_row.take() {
                        rows.push(row);
                    }
                } else {
                    in_field = false;
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(OpError::Validation(format!("malformed XML document: {}", err)))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_rows() {
        let xml = r#"<data>
            <row><name>Alpha</name><count>3</count></row>
            <row><name>Beta</name><count/></row>
        </data>"#;

        let rows = parse_rows(xml, "row").unwrap();
        assert_eq!(
            rows,
            vec![
                vec![Value::Text("Alpha".into()), Value::Text("3".into())],
                vec![Value::Text("Beta".into()), Value::Text(String::new())],
            ]
        );
    }

    #[test]
    fn test_parse_custom_row_element() {
        let xml = "<items><item><v>1</v></item><item><v>2</v></item></items>";
        let rows = parse_rows(xml, "item").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![Value::Text("1".into())]);
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let result = parse_rows("<data><row></data>", "row");
        assert!(matches!(result, Err(OpError::Validation(_))));
    }
}
