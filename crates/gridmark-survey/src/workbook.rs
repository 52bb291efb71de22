//! Minimal XLSX cell reader
//!
//! Survey exports are read for their cell values only: shared strings,
//! inline strings, numbers and booleans. Formula cells yield their cached
//! value; styles are ignored.

use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use ahash::AHashMap;
use gridmark_opc::{resolve_target, Package};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{SurveyError, SurveyResult};

const WORKBOOK: &str = "xl/workbook.xml";
const SHARED_STRINGS: &str = "xl/sharedStrings.xml";

/// A cell value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "\"{}\"", s),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

/// Format 0-based coordinates as an A1 reference
pub fn cell_name(row: u32, col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = col + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect::<String>() + &(row + 1).to_string()
}

/// Parse an A1 reference into 0-based `(row, col)`
pub fn parse_cell_name(reference: &str) -> Option<(u32, u32)> {
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }

    let mut col: u32 = 0;
    for b in letters.bytes() {
        col = col
            .checked_mul(26)?
            .checked_add((b.to_ascii_uppercase() - b'A') as u32 + 1)?;
    }
    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row - 1, col - 1))
}

/// One worksheet's cells
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    name: String,
    cells: AHashMap<(u32, u32), CellValue>,
}

impl Sheet {
    /// Create an empty sheet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: AHashMap::new(),
        }
    }

    /// Sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set a cell (0-based)
    pub fn set(&mut self, row: u32, col: u32, value: CellValue) {
        self.cells.insert((row, col), value);
    }

    /// Cell value (0-based), `None` when empty
    pub fn get(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.cells.get(&(row, col))
    }

    /// Cell as text; empty cells give an empty string
    pub fn text(&self, row: u32, col: u32) -> String {
        match self.get(row, col) {
            Some(CellValue::Text(s)) => s.trim().to_string(),
            Some(CellValue::Number(n)) => n.to_string(),
            Some(CellValue::Boolean(b)) => b.to_string(),
            None => String::new(),
        }
    }

    /// Cell as a number
    ///
    /// Numeric text is accepted. Empty and non-numeric cells are errors.
    pub fn number(&self, row: u32, col: u32) -> SurveyResult<f64> {
        self.number_or(row, col, None)
    }

    /// Cell as a number, with `default` standing in for an empty cell
    pub fn number_or(&self, row: u32, col: u32, default: Option<f64>) -> SurveyResult<f64> {
        let found = match self.get(row, col) {
            Some(CellValue::Number(n)) => return Ok(*n),
            Some(CellValue::Text(s)) => match s.trim().parse::<f64>() {
                Ok(n) => return Ok(n),
                Err(_) if s.trim().is_empty() => None,
                Err(_) => Some(CellValue::Text(s.clone()).to_string()),
            },
            Some(other) => Some(other.to_string()),
            None => None,
        };

        match (found, default) {
            (None, Some(default)) => Ok(default),
            (found, _) => Err(SurveyError::NonNumeric {
                sheet: self.name.clone(),
                cell: cell_name(row, col),
                found: found.unwrap_or_else(|| "an empty cell".into()),
            }),
        }
    }
}

/// A workbook's sheets, in workbook order
#[derive(Debug, Clone, Default)]
pub struct SurveyWorkbook {
    sheets: Vec<Sheet>,
}

impl SurveyWorkbook {
    /// Build a workbook from sheets
    pub fn from_sheets(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Read a workbook from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> SurveyResult<Self> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> SurveyResult<Self> {
        let package = Package::from_reader(reader)?;

        let shared_strings = match package.part(SHARED_STRINGS) {
            Some(xml) => read_shared_strings(xml)?,
            None => Vec::new(),
        };
        let rels = package.relationships(WORKBOOK)?;

        let mut sheets = Vec::new();
        for (name, r_id) in read_sheet_entries(package.require(WORKBOOK)?)? {
            let Some(rel) = rels.iter().find(|r| r.id == r_id && r.is_kind("worksheet")) else {
                log::warn!("sheet '{}' has no worksheet part ({})", name, r_id);
                continue;
            };
            let path = resolve_target(WORKBOOK, &rel.target);
            let sheet = read_worksheet(package.require(&path)?, name, &shared_strings)?;
            log::debug!("read sheet '{}' with {} cells", sheet.name, sheet.cells.len());
            sheets.push(sheet);
        }

        Ok(Self { sheets })
    }

    /// Sheet by name
    pub fn sheet(&self, name: &str) -> SurveyResult<&Sheet> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| SurveyError::MissingSheet(name.to_string()))
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|s| s.name.as_str())
    }
}

/// Decode the `_xHHHH_` escapes spreadsheet exports use for control characters
///
/// `_x000D_` is a carriage return and `_x005F_` a literal underscore, so
/// `_x005F_x000D_` reads back as the text `_x000D_`.
pub fn decode_escapes(s: &str) -> Cow<'_, str> {
    if !s.contains("_x") {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find("_x") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match escaped_char(tail) {
            Some(c) => {
                out.push(c);
                rest = &tail[7..];
            }
            None => {
                out.push('_');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// The character of a complete `_xHHHH_` at the start of `s`
fn escaped_char(s: &str) -> Option<char> {
    let hex = s.get(2..6)?;
    if s.as_bytes().get(6) != Some(&b'_') || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    char::from_u32(u32::from_str_radix(hex, 16).ok()?)
}

fn read_shared_strings(xml: &[u8]) -> SurveyResult<Vec<String>> {
    let mut xml_reader = Reader::from_reader(xml);
    xml_reader.trim_text(false);

    let mut buf = Vec::new();
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_si = false;
    let mut in_t = false;

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => {
                    in_si = true;
                    current.clear();
                }
                b"t" if in_si => in_t = true,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Event::End(e) => match e.local_name().as_ref() {
                b"si" => {
                    strings.push(decode_escapes(&current).into_owned());
                    in_si = false;
                }
                b"t" => in_t = false,
                _ => {}
            },
            Event::Text(e) if in_t => current.push_str(&e.unescape()?),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}

/// `(name, r:id)` of every `<sheet>` in the workbook part
fn read_sheet_entries(xml: &[u8]) -> SurveyResult<Vec<(String, String)>> {
    let mut xml_reader = Reader::from_reader(xml);
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut entries = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"sheet" => {
                let attr = |key: &[u8]| {
                    e.attributes()
                        .flatten()
                        .find(|a| a.key.as_ref() == key)
                        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
                };
                if let (Some(name), Some(r_id)) = (attr(&b"name"[..]), attr(&b"r:id"[..])) {
                    entries.push((name, r_id));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(entries)
}

fn read_worksheet(xml: &[u8], name: String, shared_strings: &[String]) -> SurveyResult<Sheet> {
    let mut xml_reader = Reader::from_reader(xml);
    xml_reader.trim_text(false);

    let mut sheet = Sheet::new(name);
    let mut buf = Vec::new();

    let mut cell_ref: Option<String> = None;
    let mut cell_type: Option<String> = None;
    let mut value = String::new();
    let mut in_value = false;

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"c" => {
                    cell_ref = None;
                    cell_type = None;
                    value.clear();
                    for attr in e.attributes().flatten() {
                        let text = attr.unescape_value().ok().map(|v| v.into_owned());
                        match attr.key.as_ref() {
                            b"r" => cell_ref = text,
                            b"t" => cell_type = text,
                            _ => {}
                        }
                    }
                }
                // <v> for stored values, <t> inside <is> for inline strings
                b"v" | b"t" => in_value = true,
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"c" => {
                    if let Some(reference) = cell_ref.take() {
                        store_cell(&mut sheet, &reference, cell_type.as_deref(), &value, shared_strings)?;
                    }
                }
                b"v" | b"t" => in_value = false,
                _ => {}
            },
            Event::Text(e) if in_value => value.push_str(&e.unescape()?),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sheet)
}

fn store_cell(
    sheet: &mut Sheet,
    reference: &str,
    cell_type: Option<&str>,
    value: &str,
    shared_strings: &[String],
) -> SurveyResult<()> {
    let (row, col) = parse_cell_name(reference).ok_or_else(|| {
        SurveyError::InvalidFormat(format!("invalid cell reference '{}'", reference))
    })?;

    let cell = match cell_type {
        Some("s") => {
            let idx: usize = value.trim().parse().map_err(|_| {
                SurveyError::InvalidFormat(format!("invalid shared string index '{}'", value))
            })?;
            let s = shared_strings.get(idx).ok_or_else(|| {
                SurveyError::InvalidFormat(format!("shared string index {} out of bounds", idx))
            })?;
            CellValue::Text(s.clone())
        }
        Some("b") => CellValue::Boolean(value == "1" || value.eq_ignore_ascii_case("true")),
        Some("str") | Some("inlineStr") => CellValue::Text(decode_escapes(value).into_owned()),
        Some("e") => CellValue::Text(value.to_string()),
        _ if value.is_empty() => return Ok(()),
        _ => match value.trim().parse::<f64>() {
            Ok(n) => CellValue::Number(n),
            Err(_) => CellValue::Text(value.to_string()),
        },
    };

    sheet.set(row, col, cell);
    Ok(())
}
