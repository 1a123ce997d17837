//! XLSX reader
//!
//! Reads workbook structure back from XLSX bytes: sheet names, cell values
//! and formulas, merged regions, autofilter and gridline settings. Style
//! assignments and drawing objects are not restored; the reader exists so a
//! document chain can start from an existing file's content.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::cell::CellValue;
use crate::error::{EngineError, Result};
use crate::workbook::Workbook;
use crate::worksheet::Worksheet;
use quill_sheets_core::{Point, Range};

/// Read a workbook from XLSX bytes
pub fn read_from_bytes(data: &[u8]) -> Result<Workbook> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;

    let workbook_xml = read_archive_file(&mut archive, "xl/workbook.xml")?;
    let sheet_names = parse_sheet_names(&workbook_xml)?;
    if sheet_names.is_empty() {
        return Err(EngineError::InvalidFormat("workbook has no sheets".into()));
    }

    let mut workbook = Workbook::empty();
    for (i, name) in sheet_names.iter().enumerate() {
        workbook.add_worksheet(name)?;
        let path = format!("xl/worksheets/sheet{}.xml", i + 1);
        let sheet_xml = read_archive_file(&mut archive, &path)?;
        let sheet = workbook
            .worksheet_mut(name)
            .expect("sheet was just added");
        parse_worksheet(&sheet_xml, sheet)?;
    }

    log::debug!("read workbook with {} sheet(s)", workbook.sheet_count());
    Ok(workbook)
}

fn read_archive_file(
    archive: &mut zip::ZipArchive<Cursor<&[u8]>>,
    path: &str,
) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|_| EngineError::InvalidFormat(format!("missing part '{}'", path)))?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(content)
}

fn parse_sheet_names(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.trim_text(true);

    let mut names = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"sheet" {
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"name" {
                            if let Ok(name) = attr.unescape_value() {
                                names.push(name.to_string());
                            }
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(EngineError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }
    Ok(names)
}

fn parse_worksheet(xml: &str, sheet: &mut Worksheet) -> Result<()> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.trim_text(true);

    let mut buf = Vec::new();

    let mut in_cell = false;
    let mut in_value = false;
    let mut in_formula = false;
    let mut in_inline_text = false;
    let mut cell_ref: Option<String> = None;
    let mut cell_type: Option<String> = None;
    let mut cell_value: Option<CellValue> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"c" => {
                    in_cell = true;
                    cell_ref = None;
                    cell_type = None;
                    cell_value = None;
                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"r" => {
                                cell_ref = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"t" => {
                                cell_type = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            _ => {}
                        }
                    }
                }
                b"v" if in_cell => in_value = true,
                b"f" if in_cell => in_formula = true,
                b"t" if in_cell => in_inline_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"sheetView" => {
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"showGridLines" {
                            if let Ok(v) = attr.unescape_value() {
                                if v.as_ref() == "0" || v.as_ref() == "false" {
                                    sheet.set_show_grid_lines(false);
                                }
                            }
                        }
                    }
                }
                b"autoFilter" => {
                    if let Some(range) = ref_attr_range(&e) {
                        sheet.set_auto_filter(Some(range));
                    }
                }
                b"mergeCell" => {
                    if let Some(range) = ref_attr_range(&e) {
                        if let Err(err) = sheet.merge_cells(&range) {
                            log::warn!("skipping merged region {}: {}", range.address(), err);
                        }
                    }
                }
                // Style-only cells carry no value; nothing to restore
                b"c" => {}
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if let Ok(text) = e.unescape() {
                    let text = text.to_string();
                    if in_formula {
                        cell_value = Some(CellValue::formula(text));
                    } else if in_inline_text {
                        cell_value = Some(CellValue::Text(text));
                    } else if in_value {
                        // A formula's cached <v> must not overwrite the formula
                        if cell_value.is_none() {
                            cell_value = Some(typed_value(cell_type.as_deref(), text));
                        }
                    }
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"c" => {
                    if let (Some(r), Some(value)) = (cell_ref.as_deref(), cell_value.take()) {
                        let point = Point::parse(r)
                            .map_err(|err| EngineError::Xml(err.to_string()))?;
                        sheet.set_value(point.row(), point.column(), value)?;
                    }
                    in_cell = false;
                }
                b"v" => in_value = false,
                b"f" => in_formula = false,
                b"t" => in_inline_text = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(EngineError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn ref_attr_range(e: &quick_xml::events::BytesStart<'_>) -> Option<Range> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"ref" {
            if let Ok(value) = attr.unescape_value() {
                return Range::parse(&value).ok();
            }
        }
    }
    None
}

fn typed_value(cell_type: Option<&str>, text: String) -> CellValue {
    match cell_type {
        Some("b") => CellValue::Bool(text == "1" || text == "true"),
        Some("str") | Some("inlineStr") => CellValue::Text(text),
        _ => match text.parse::<f64>() {
            Ok(n) => CellValue::Number(n),
            Err(_) => CellValue::Text(text),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_structure() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet("Data").unwrap();
        {
            let sheet = workbook.worksheet_mut("Sheet1").unwrap();
            sheet.set_value(1, 1, CellValue::text("Hello")).unwrap();
            sheet.set_value(2, 2, CellValue::Number(42.5)).unwrap();
            sheet.set_value(3, 1, CellValue::Bool(true)).unwrap();
            sheet
                .set_value(4, 1, CellValue::formula("SUM(B2:B4)"))
                .unwrap();
            sheet
                .merge_cells(&Range::parse("A6:C6").unwrap())
                .unwrap();
            sheet.set_show_grid_lines(false);
            sheet.set_auto_filter(Some(Range::parse("A1:B4").unwrap()));
        }

        let bytes = workbook.save_to_bytes().unwrap();
        let read_back = Workbook::from_bytes(&bytes).unwrap();

        assert_eq!(read_back.sheet_names(), vec!["Sheet1", "Data"]);
        let sheet = read_back.worksheet("Sheet1").unwrap();
        assert_eq!(sheet.value(1, 1), CellValue::text("Hello"));
        assert_eq!(sheet.value(2, 2), CellValue::Number(42.5));
        assert_eq!(sheet.value(3, 1), CellValue::Bool(true));
        assert_eq!(sheet.value(4, 1), CellValue::formula("SUM(B2:B4)"));
        assert_eq!(sheet.merged_regions(), &[Range::parse("A6:C6").unwrap()]);
        assert!(!sheet.show_grid_lines());
        assert_eq!(sheet.auto_filter(), Some(&Range::parse("A1:B4").unwrap()));
    }

    #[test]
    fn test_rejects_non_zip() {
        assert!(Workbook::from_bytes(b"not a workbook").is_err());
    }
}
