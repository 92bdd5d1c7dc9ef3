//! Minimal Office Open XML (`.xlsx`) writer for a [`MemoryGrid`].
//!
//! Produces a single-sheet workbook: inline strings, numeric cells and merged
//! ranges. No shared string table, formulas or cell styles beyond the default.

use super::{cell_reference, CellValue, MemoryGrid, MAX_COLUMN, MAX_ROW};
use crate::constants::APP_NAME;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs></styleSheet>"#;

const SPREADSHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

/// Path of the single worksheet inside the archive.
pub const SHEET_PART: &str = "xl/worksheets/sheet1.xml";

/// Writes a [`MemoryGrid`] as a one-sheet workbook.
#[derive(Debug, Clone)]
pub struct XlsxWriter<'a> {
    grid: &'a MemoryGrid,
    sheet_name: String,
    created: DateTime<Utc>,
}

impl<'a> XlsxWriter<'a> {
    /// Creates a writer for the given grid and sheet name.
    pub fn new(grid: &'a MemoryGrid, sheet_name: impl Into<String>) -> Self {
        Self {
            grid,
            sheet_name: sheet_name.into(),
            created: Utc::now(),
        }
    }

    /// Overrides the creation timestamp stored in the document properties.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    /// Saves the workbook to `path`.
    ///
    /// Writes to a temporary file next to the target and renames it into place,
    /// so an existing workbook is never left half-written.
    ///
    /// # Errors
    ///
    /// Returns errors for:
    /// - Missing parent directory or permission issues
    /// - Archive write failures (e.g. disk full)
    /// - Atomic rename failures
    pub fn save(&self, path: &Path) -> Result<()> {
        let temp_path = path.with_extension("xlsx.tmp");

        let file = File::create(&temp_path).with_context(|| {
            format!("Failed to create temporary workbook: {}", temp_path.display())
        })?;

        if let Err(err) = self.write_to(file) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(err.context(format!("Failed to write workbook: {}", path.display())));
        }

        std::fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename temporary workbook to: {}", path.display()))?;

        Ok(())
    }

    /// Writes the workbook archive into any seekable writer and returns it.
    ///
    /// # Errors
    ///
    /// Fails before writing anything if the grid reaches past the last cell a
    /// worksheet can hold (`XFD1048576`).
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<W> {
        if let Some(dimension) = self.grid.dimension() {
            if dimension.last_row > MAX_ROW || dimension.last_col > MAX_COLUMN {
                anyhow::bail!(
                    "Sheet range {} exceeds the worksheet limit {}",
                    dimension.to_a1(),
                    cell_reference(MAX_ROW, MAX_COLUMN)
                );
            }
        }

        let mut zip = ZipWriter::new(writer);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        add_part(&mut zip, "[Content_Types].xml", CONTENT_TYPES_XML, options)?;
        add_part(&mut zip, "_rels/.rels", ROOT_RELS_XML, options)?;
        add_part(&mut zip, "docProps/core.xml", &self.core_properties_xml(), options)?;
        add_part(&mut zip, "xl/workbook.xml", &self.workbook_xml(), options)?;
        add_part(&mut zip, "xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML, options)?;
        add_part(&mut zip, "xl/styles.xml", STYLES_XML, options)?;
        add_part(&mut zip, SHEET_PART, &self.sheet_xml(), options)?;

        zip.finish().context("Failed to finalize workbook archive")
    }

    fn core_properties_xml(&self) -> String {
        format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                "\n",
                r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
                r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
                r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
                "<dc:creator>{creator}</dc:creator>",
                r#"<dcterms:created xsi:type="dcterms:W3CDTF">{created}</dcterms:created>"#,
                "</cp:coreProperties>"
            ),
            creator = APP_NAME,
            created = self.created.format("%Y-%m-%dT%H:%M:%SZ"),
        )
    }

    fn workbook_xml(&self) -> String {
        format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                "\n",
                r#"<workbook xmlns="{ns}" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
                r#"<sheets><sheet name="{name}" sheetId="1" r:id="rId1"/></sheets></workbook>"#
            ),
            ns = SPREADSHEET_NS,
            name = escape_xml(&self.sheet_name),
        )
    }

    /// Builds the worksheet part.
    pub(crate) fn sheet_xml(&self) -> String {
        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        let _ = write!(xml, r#"<worksheet xmlns="{SPREADSHEET_NS}">"#);

        if let Some(dimension) = self.grid.dimension() {
            let _ = write!(xml, r#"<dimension ref="{}"/>"#, dimension.to_a1());
        }

        xml.push_str("<sheetData>");
        let mut current_row = None;
        for ((row, col), value) in self.grid.iter() {
            if current_row != Some(row) {
                if current_row.is_some() {
                    xml.push_str("</row>");
                }
                let _ = write!(xml, r#"<row r="{row}">"#);
                current_row = Some(row);
            }
            push_cell(&mut xml, row, col, value);
        }
        if current_row.is_some() {
            xml.push_str("</row>");
        }
        xml.push_str("</sheetData>");

        let merges = self.grid.merges();
        if !merges.is_empty() {
            let _ = write!(xml, r#"<mergeCells count="{}">"#, merges.len());
            for range in merges {
                let _ = write!(xml, r#"<mergeCell ref="{}"/>"#, range.to_a1());
            }
            xml.push_str("</mergeCells>");
        }

        xml.push_str("</worksheet>");
        xml
    }
}

fn push_cell(xml: &mut String, row: u32, col: u32, value: &CellValue) {
    let reference = cell_reference(row, col);
    match value {
        CellValue::Empty => {}
        CellValue::Text(text) => push_inline_string(xml, &reference, text),
        CellValue::Integer(number) => {
            let _ = write!(xml, r#"<c r="{reference}"><v>{number}</v></c>"#);
        }
        // Spreadsheets have no NaN or infinity; keep them readable as text
        CellValue::Number(number) if !number.is_finite() => {
            push_inline_string(xml, &reference, &number.to_string());
        }
        CellValue::Number(number) => {
            let _ = write!(xml, r#"<c r="{reference}"><v>{number:?}</v></c>"#);
        }
    }
}

fn push_inline_string(xml: &mut String, reference: &str, text: &str) {
    let _ = write!(
        xml,
        r#"<c r="{reference}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
        escape_xml(text)
    );
}

/// Escapes XML special characters and drops characters XML 1.0 cannot carry.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' | '\n' | '\r' => escaped.push(c),
            c if c < ' ' => {}
            c => escaped.push(c),
        }
    }
    escaped
}

/// Adds one part to the archive.
fn add_part<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    content: &str,
    options: SimpleFileOptions,
) -> Result<()> {
    zip.start_file(name, options)
        .with_context(|| format!("Failed to start workbook part {name}"))?;
    zip.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write workbook part {name}"))?;
    Ok(())
}
