//! PPTX table reader

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{PptxError, PptxResult};
use crate::presentation::slide_paths;
use gridmark_opc::Package;
use gridmark_core::{SlideId, SourceTable};

/// Reads the first table of every slide
pub struct PptxReader;

impl PptxReader {
    /// Read tables from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> PptxResult<Vec<SourceTable>> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read tables from a reader
    pub fn read<R: Read + Seek>(reader: R) -> PptxResult<Vec<SourceTable>> {
        let package = Package::from_reader(reader)?;
        Self::read_tables(&package)
    }

    /// First table of every slide, in presentation order
    ///
    /// Slides without a table contribute nothing. Each cell's paragraphs are
    /// joined with `'\n'`.
    pub fn read_tables(package: &Package) -> PptxResult<Vec<SourceTable>> {
        let mut tables = Vec::new();

        for (index, path) in slide_paths(package)?.iter().enumerate() {
            let slide = SlideId(index as u32 + 1);
            let xml = package.require(path)?;

            if let Some(rows) = Self::first_table(xml)? {
                log::debug!("{} ({}): table with {} rows", slide, path, rows.len());
                tables.push(SourceTable { slide, rows });
            }
        }

        Ok(tables)
    }

    /// Extract the rows of the first `<a:tbl>` in a slide part
    fn first_table(xml: &[u8]) -> PptxResult<Option<Vec<Vec<String>>>> {
        let mut xml_reader = Reader::from_reader(xml);
        xml_reader.trim_text(false);

        let mut buf = Vec::new();
        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut current_row: Vec<String> = Vec::new();
        let mut current_cell = String::new();
        let mut paragraphs = 0usize;

        let mut in_table = false;
        let mut in_cell = false;
        let mut in_text = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"tbl" if !in_table => in_table = true,
                    b"tr" if in_table => current_row.clear(),
                    b"tc" if in_table => {
                        in_cell = true;
                        current_cell.clear();
                        paragraphs = 0;
                    }
                    b"p" if in_cell => {
                        if paragraphs > 0 {
                            current_cell.push('\n');
                        }
                        paragraphs += 1;
                    }
                    b"t" if in_cell => in_text = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                    b"tc" if in_table => current_row.push(String::new()),
                    b"p" if in_cell => {
                        if paragraphs > 0 {
                            current_cell.push('\n');
                        }
                        paragraphs += 1;
                    }
                    b"br" if in_cell => current_cell.push('\n'),
                    _ => {}
                },
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"t" => in_text = false,
                    b"tc" if in_cell => {
                        current_row.push(std::mem::take(&mut current_cell));
                        in_cell = false;
                    }
                    b"tr" if in_table => rows.push(std::mem::take(&mut current_row)),
                    b"tbl" if in_table => return Ok(Some(rows)),
                    _ => {}
                },
                Ok(Event::Text(e)) if in_text => {
                    let text = e.unescape().map_err(PptxError::Xml)?;
                    current_cell.push_str(&text);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(PptxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        if in_table {
            return Err(PptxError::InvalidFormat("unterminated table".into()));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SLIDE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:cSld><p:spTree>
<p:sp><p:txBody><a:p><a:r><a:t>Title</a:t></a:r></a:p></p:txBody></p:sp>
<p:graphicFrame><a:graphic><a:graphicData><a:tbl>
<a:tr h="370840"><a:tc><a:txBody><a:p><a:r><a:t>AFKORTING</a:t></a:r></a:p></a:txBody></a:tc><a:tc><a:txBody><a:p><a:r><a:t>SPF</a:t></a:r></a:p></a:txBody></a:tc></a:tr>
<a:tr h="370840"><a:tc><a:txBody><a:p><a:r><a:t>FI</a:t></a:r><a:r><a:t>01</a:t></a:r></a:p></a:txBody></a:tc><a:tc><a:txBody><a:p><a:endParaRPr/></a:p></a:txBody></a:tc></a:tr>
<a:tr h="370840"><a:tc><a:txBody><a:p><a:r><a:t>R&amp;D</a:t></a:r></a:p><a:p><a:r><a:t>two</a:t></a:r></a:p></a:txBody></a:tc><a:tc/></a:tr>
</a:tbl></a:graphicData></a:graphic></p:graphicFrame>
<p:graphicFrame><a:graphic><a:graphicData><a:tbl><a:tr><a:tc><a:txBody><a:p><a:r><a:t>second</a:t></a:r></a:p></a:txBody></a:tc></a:tr></a:tbl></a:graphicData></a:graphic></p:graphicFrame>
</p:spTree></p:cSld></p:sld>"#;

    #[test]
    fn test_first_table_only() {
        let rows = PptxReader::first_table(SLIDE.as_bytes()).unwrap().unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["AFKORTING".to_string(), "SPF".to_string()],
                vec!["FI01".to_string(), String::new()],
                vec!["R&D\ntwo".to_string(), String::new()],
            ]
        );
    }

    #[test]
    fn test_slide_without_table() {
        let xml = br#"<p:sld xmlns:a="a" xmlns:p="p"><p:cSld><p:spTree><p:sp><p:txBody><a:p><a:r><a:t>x</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#;
        assert_eq!(PptxReader::first_table(xml).unwrap(), None);
    }
}
