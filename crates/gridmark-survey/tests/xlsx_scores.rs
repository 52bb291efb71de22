//! Aggregate scores from a real `.xlsx` package

use std::io::{Cursor, Write};

use gridmark_survey::{aggregate_question, CellValue, Question, SurveyError, SurveyWorkbook};
use pretty_assertions::assert_eq;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/></Types>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Summary" sheetId="1" r:id="rId1"/><sheet name="Question 4" sheetId="2" r:id="rId2"/></sheets></workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="/xl/worksheets/sheet2.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/></Relationships>"#;

const SHARED_STRINGS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="3" uniqueCount="3"><si><t>Item</t></si><si><r><t xml:space="preserve">Average </t></r><r><t>score</t></r></si><si><t>Ideas are tested_x000D__x000A_early</t></si></sst>"#;

fn question_sheet(values: &[f64]) -> String {
    let mut rows = String::from(
        r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>2</v></c><c r="C1" t="inlineStr"><is><t>Owner_x000D_</t></is></c><c r="M1" t="s"><v>1</v></c></row>"#,
    );
    for (i, value) in values.iter().enumerate() {
        let r = i + 4;
        rows.push_str(&format!(
            r#"<row r="{r}"><c r="A{r}" t="inlineStr"><is><t>item {i}</t></is></c><c r="M{r}"><f>AVERAGE(B{r}:L{r})</f><v>{value}</v></c></row>"#,
            r = r,
            i = i,
            value = value
        ));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
        rows
    )
}

fn fixture(values: &[f64]) -> Vec<u8> {
    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("xl/workbook.xml", WORKBOOK.to_string()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
        ("xl/sharedStrings.xml", SHARED_STRINGS.to_string()),
        ("xl/worksheets/sheet1.xml", question_sheet(&[])),
        ("xl/worksheets/sheet2.xml", question_sheet(values)),
    ];

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in parts {
        zip.start_file(name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

#[test]
fn test_read_cells() {
    let workbook = SurveyWorkbook::read(Cursor::new(fixture(&[3.0, 4.5]))).unwrap();

    assert_eq!(workbook.sheet_names().collect::<Vec<_>>(), vec!["Summary", "Question 4"]);
    let sheet = workbook.sheet("Question 4").unwrap();
    assert_eq!(sheet.get(0, 0), Some(&CellValue::Text("Item".into())));
    assert_eq!(sheet.get(0, 12), Some(&CellValue::Text("Average score".into())));
    assert_eq!(sheet.get(0, 1), Some(&CellValue::Text("Ideas are tested\r\nearly".into())));
    assert_eq!(sheet.text(0, 2), "Owner");
    assert_eq!(sheet.text(3, 0), "item 0");
    assert_eq!(sheet.number(4, 12).unwrap(), 4.5);
}

#[test]
fn test_aggregate_question_four_from_file() {
    let values = [3.0, 3.0, 4.0, 4.0, 4.0, 1.0, 2.0, 5.0, 2.0, 2.0, 2.0, 3.0];
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("survey.xlsx");
    std::fs::write(&path, fixture(&values)).unwrap();

    let workbook = SurveyWorkbook::open(&path).unwrap();
    let scores = aggregate_question(&workbook, Question::Q4).unwrap();
    assert_eq!(scores.averages(), vec![3.5, 4.0, 2.25]);
}

#[test]
fn test_short_sheet_reports_the_empty_cell() {
    let workbook = SurveyWorkbook::read(Cursor::new(fixture(&[3.0; 6]))).unwrap();
    match aggregate_question(&workbook, Question::Q4) {
        Err(SurveyError::NonNumeric { sheet, cell, .. }) => {
            assert_eq!(sheet, "Question 4");
            assert_eq!(cell, "M10");
        }
        other => panic!("expected NonNumeric, got {:?}", other),
    }
}
