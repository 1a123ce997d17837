//! XLSX writer
//!
//! Serializes a workbook into a minimal Office Open XML package: content
//! types, relationships, workbook part, a style sheet derived from the
//! named-style registry, and one worksheet part per sheet. Strings are
//! written inline; drawing objects are model-level state and are not encoded.

use std::collections::HashMap;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;

use crate::cell::CellValue;
use crate::error::Result;
use crate::workbook::Workbook;
use crate::worksheet::Worksheet;
use quill_sheets_core::{Alignment, Borders, Color, FontSpec, Point, Underline, ValueFormat};

/// Serialize a workbook to XLSX bytes
pub fn write_to_bytes(workbook: &Workbook) -> Result<Vec<u8>> {
    log::debug!(
        "serializing workbook: {} sheet(s), {} named style(s)",
        workbook.sheet_count(),
        workbook.named_styles().len()
    );

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    let style_table = StyleTable::build(workbook);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(content_types_xml(workbook).as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(ROOT_RELS.as_bytes())?;

    zip.start_file("xl/workbook.xml", options)?;
    zip.write_all(workbook_xml(workbook).as_bytes())?;

    zip.start_file("xl/_rels/workbook.xml.rels", options)?;
    zip.write_all(workbook_rels_xml(workbook).as_bytes())?;

    zip.start_file("xl/styles.xml", options)?;
    zip.write_all(style_table.to_xml().as_bytes())?;

    for (i, sheet) in workbook.worksheets().enumerate() {
        zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)?;
        zip.write_all(worksheet_xml(sheet, &style_table).as_bytes())?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

fn content_types_xml(workbook: &Workbook) -> String {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
    );

    for i in 0..workbook.sheet_count() {
        content.push_str(&format!(
            r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
            i + 1
        ));
    }

    content.push_str("\n</Types>");
    content
}

fn workbook_xml(workbook: &Workbook) -> String {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
    );

    for (i, sheet) in workbook.worksheets().enumerate() {
        content.push_str(&format!(
            r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape_xml(sheet.name()),
            i + 1,
            i + 1
        ));
    }

    content.push_str(
        r#"
    </sheets>
</workbook>"#,
    );
    content
}

fn workbook_rels_xml(workbook: &Workbook) -> String {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );

    for i in 0..workbook.sheet_count() {
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            i + 1,
            i + 1
        ));
    }

    content.push_str(&format!(
        r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#,
        workbook.sheet_count() + 1
    ));
    content
}

fn worksheet_xml(sheet: &Worksheet, style_table: &StyleTable) -> String {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );

    if !sheet.show_grid_lines() {
        content.push_str(
            "\n    <sheetViews>\n        <sheetView workbookViewId=\"0\" showGridLines=\"0\"/>\n    </sheetViews>",
        );
    }

    content.push_str("\n    <sheetData>");

    let mut current_row: Option<u32> = None;
    for (row, col, cell) in sheet.iter_cells() {
        if current_row != Some(row) {
            if current_row.is_some() {
                content.push_str("\n        </row>");
            }
            content.push_str(&format!("\n        <row r=\"{}\">", row));
            current_row = Some(row);
        }

        let cell_ref = format!("{}{}", Point::column_to_letters(col), row);
        let style_attr = match cell.style.as_deref().and_then(|n| style_table.xf_index(n)) {
            Some(xf) if xf != 0 => format!(" s=\"{}\"", xf),
            _ => {
                if let Some(name) = cell.style.as_deref() {
                    if style_table.xf_index(name).is_none() {
                        log::warn!("cell {} references unregistered style '{}'", cell_ref, name);
                    }
                }
                String::new()
            }
        };

        match &cell.value {
            CellValue::Number(n) => {
                content.push_str(&format!(
                    "\n            <c r=\"{}\"{}><v>{}</v></c>",
                    cell_ref, style_attr, n
                ));
            }
            CellValue::Text(s) => {
                content.push_str(&format!(
                    "\n            <c r=\"{}\"{} t=\"inlineStr\"><is><t>{}</t></is></c>",
                    cell_ref,
                    style_attr,
                    escape_xml(s)
                ));
            }
            CellValue::Bool(b) => {
                content.push_str(&format!(
                    "\n            <c r=\"{}\"{} t=\"b\"><v>{}</v></c>",
                    cell_ref,
                    style_attr,
                    if *b { 1 } else { 0 }
                ));
            }
            CellValue::Formula(text) => {
                let formula_text = text.strip_prefix('=').unwrap_or(text.as_str());
                content.push_str(&format!(
                    "\n            <c r=\"{}\"{}><f>{}</f></c>",
                    cell_ref,
                    style_attr,
                    escape_xml(formula_text)
                ));
            }
            CellValue::Empty => {
                // Preserve style-only cells
                if !style_attr.is_empty() {
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{} />",
                        cell_ref, style_attr
                    ));
                }
            }
        }
    }
    if current_row.is_some() {
        content.push_str("\n        </row>");
    }
    content.push_str("\n    </sheetData>");

    if let Some(filter) = sheet.auto_filter() {
        content.push_str(&format!("\n    <autoFilter ref=\"{}\"/>", filter.address()));
    }

    let merged = sheet.merged_regions();
    if !merged.is_empty() {
        content.push_str(&format!("\n    <mergeCells count=\"{}\">", merged.len()));
        for range in merged {
            content.push_str(&format!("\n        <mergeCell ref=\"{}\"/>", range.address()));
        }
        content.push_str("\n    </mergeCells>");
    }

    content.push_str("\n</worksheet>");
    content
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Workbook-wide style table: deduplicated fonts/fills/borders/number
/// formats plus one cell format (xf) per registered named style.
struct StyleTable {
    fonts: Vec<FontSpec>,
    fills: Vec<Color>,
    borders: Vec<Borders>,
    num_fmts: Vec<String>,
    xfs: Vec<XfEntry>,
    xf_by_name: HashMap<String, usize>,
}

struct XfEntry {
    font_id: usize,
    fill_id: usize,
    border_id: usize,
    num_fmt_id: u32,
    alignment: Alignment,
}

const FIRST_CUSTOM_NUM_FMT_ID: u32 = 164;
const TEXT_NUM_FMT_ID: u32 = 49; // built-in "@"

impl StyleTable {
    fn build(workbook: &Workbook) -> Self {
        let mut table = StyleTable {
            fonts: vec![FontSpec::default()],
            fills: Vec::new(),
            borders: vec![Borders::default()],
            num_fmts: Vec::new(),
            xfs: Vec::new(),
            xf_by_name: HashMap::new(),
        };

        for style in workbook.named_styles() {
            let attrs = &style.attributes;

            let font_id = match table.fonts.iter().position(|f| *f == attrs.font) {
                Some(i) => i,
                None => {
                    table.fonts.push(attrs.font.clone());
                    table.fonts.len() - 1
                }
            };

            // Fill indices 0 (none) and 1 (gray125) are reserved by the format.
            let fill_id = match attrs.fill {
                None => 0,
                Some(color) => match table.fills.iter().position(|c| *c == color) {
                    Some(i) => i + 2,
                    None => {
                        table.fills.push(color);
                        table.fills.len() + 1
                    }
                },
            };

            let border_id = if attrs.borders.is_empty() {
                0
            } else {
                match table.borders.iter().position(|b| *b == attrs.borders) {
                    Some(i) => i,
                    None => {
                        table.borders.push(attrs.borders.clone());
                        table.borders.len() - 1
                    }
                }
            };

            let num_fmt_id = match &attrs.format {
                ValueFormat::Text => TEXT_NUM_FMT_ID,
                other => {
                    let code = other.xlsx_code();
                    let idx = match table.num_fmts.iter().position(|c| *c == code) {
                        Some(i) => i,
                        None => {
                            table.num_fmts.push(code);
                            table.num_fmts.len() - 1
                        }
                    };
                    FIRST_CUSTOM_NUM_FMT_ID + idx as u32
                }
            };

            table.xfs.push(XfEntry {
                font_id,
                fill_id,
                border_id,
                num_fmt_id,
                alignment: attrs.alignment,
            });
            // xf index 0 is the default format
            table
                .xf_by_name
                .insert(style.name.clone(), table.xfs.len());
        }

        table
    }

    /// The cellXfs index for a style name (0 is the default format)
    fn xf_index(&self, name: &str) -> Option<usize> {
        self.xf_by_name.get(name).copied()
    }

    fn to_xml(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        if !self.num_fmts.is_empty() {
            xml.push_str(&format!("\n    <numFmts count=\"{}\">", self.num_fmts.len()));
            for (i, code) in self.num_fmts.iter().enumerate() {
                xml.push_str(&format!(
                    "\n        <numFmt numFmtId=\"{}\" formatCode=\"{}\"/>",
                    FIRST_CUSTOM_NUM_FMT_ID + i as u32,
                    escape_xml(code)
                ));
            }
            xml.push_str("\n    </numFmts>");
        }

        xml.push_str(&format!("\n    <fonts count=\"{}\">", self.fonts.len()));
        for font in &self.fonts {
            xml.push_str("\n        <font>");
            if font.bold {
                xml.push_str("<b/>");
            }
            if font.italic {
                xml.push_str("<i/>");
            }
            match font.underline {
                Underline::None => {}
                Underline::Single => xml.push_str("<u/>"),
                Underline::Double => xml.push_str("<u val=\"double\"/>"),
            }
            xml.push_str(&format!("<sz val=\"{}\"/>", font.size));
            if let Some(argb) = font.color.argb_hex() {
                xml.push_str(&format!("<color rgb=\"{}\"/>", argb));
            }
            xml.push_str(&format!("<name val=\"{}\"/>", escape_xml(&font.name)));
            xml.push_str("</font>");
        }
        xml.push_str("\n    </fonts>");

        xml.push_str(&format!("\n    <fills count=\"{}\">", self.fills.len() + 2));
        xml.push_str("\n        <fill><patternFill patternType=\"none\"/></fill>");
        xml.push_str("\n        <fill><patternFill patternType=\"gray125\"/></fill>");
        for color in &self.fills {
            let argb = color.argb_hex().unwrap_or_else(|| "FFFFFFFF".to_string());
            xml.push_str(&format!(
                "\n        <fill><patternFill patternType=\"solid\"><fgColor rgb=\"{}\"/><bgColor indexed=\"64\"/></patternFill></fill>",
                argb
            ));
        }
        xml.push_str("\n    </fills>");

        xml.push_str(&format!("\n    <borders count=\"{}\">", self.borders.len()));
        for borders in &self.borders {
            xml.push_str("\n        <border>");
            for (tag, edge) in [
                ("left", &borders.left),
                ("right", &borders.right),
                ("top", &borders.top),
                ("bottom", &borders.bottom),
            ] {
                match edge {
                    Some(edge) => {
                        xml.push_str(&format!("<{} style=\"{}\">", tag, edge.line.xlsx_name()));
                        if let Some(argb) = edge.color.argb_hex() {
                            xml.push_str(&format!("<color rgb=\"{}\"/>", argb));
                        }
                        xml.push_str(&format!("</{}>", tag));
                    }
                    None => xml.push_str(&format!("<{}/>", tag)),
                }
            }
            xml.push_str("<diagonal/></border>");
        }
        xml.push_str("\n    </borders>");

        xml.push_str("\n    <cellStyleXfs count=\"1\">\n        <xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/>\n    </cellStyleXfs>");

        xml.push_str(&format!("\n    <cellXfs count=\"{}\">", self.xfs.len() + 1));
        xml.push_str("\n        <xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\"/>");
        for xf in &self.xfs {
            xml.push_str(&format!(
                "\n        <xf numFmtId=\"{}\" fontId=\"{}\" fillId=\"{}\" borderId=\"{}\" xfId=\"0\" applyNumberFormat=\"1\" applyFont=\"1\" applyFill=\"1\" applyBorder=\"1\"",
                xf.num_fmt_id, xf.font_id, xf.fill_id, xf.border_id
            ));
            if xf.alignment.is_default() {
                xml.push_str("/>");
            } else {
                xml.push_str(" applyAlignment=\"1\"><alignment");
                use quill_sheets_core::{HorizontalAlignment, VerticalAlignment};
                match xf.alignment.horizontal {
                    HorizontalAlignment::General => {}
                    HorizontalAlignment::Left => xml.push_str(" horizontal=\"left\""),
                    HorizontalAlignment::Center => xml.push_str(" horizontal=\"center\""),
                    HorizontalAlignment::Right => xml.push_str(" horizontal=\"right\""),
                    HorizontalAlignment::Justify => xml.push_str(" horizontal=\"justify\""),
                }
                match xf.alignment.vertical {
                    VerticalAlignment::Bottom => {}
                    VerticalAlignment::Top => xml.push_str(" vertical=\"top\""),
                    VerticalAlignment::Center => xml.push_str(" vertical=\"center\""),
                }
                if xf.alignment.wrap_text {
                    xml.push_str(" wrapText=\"1\"");
                }
                xml.push_str("/></xf>");
            }
        }
        xml.push_str("\n    </cellXfs>");

        xml.push_str("\n    <cellStyles count=\"1\">\n        <cellStyle name=\"Normal\" xfId=\"0\" builtinId=\"0\"/>\n    </cellStyles>");
        xml.push_str("\n</styleSheet>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::NamedStyle;
    use quill_sheets_core::StyleAttributes;

    #[test]
    fn test_output_is_zip() {
        let workbook = Workbook::new();
        let bytes = write_to_bytes(&workbook).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_style_table_indices() {
        let mut workbook = Workbook::new();
        workbook
            .add_named_style(NamedStyle::new("First", StyleAttributes::default()))
            .unwrap();
        workbook
            .add_named_style(NamedStyle::new("Second", StyleAttributes::default()))
            .unwrap();

        let table = StyleTable::build(&workbook);
        assert_eq!(table.xf_index("First"), Some(1));
        assert_eq!(table.xf_index("Second"), Some(2));
        assert_eq!(table.xf_index("Missing"), None);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
