//! Read a small presentation, append a marker slide, read the result back.

use std::io::{Cursor, Write};

use gridmark_core::{
    Color, GridConfig, Marker, MarkerLink, PresentationWriter, SlideId, SourceTable,
};
use gridmark_pptx::{slide_paths, Package, PptxReader, PptxWriter};
use pretty_assertions::assert_eq;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/><Override PartName="/ppt/slides/slide1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/><Override PartName="/ppt/slides/slide2.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/></Types>"#;

const PRESENTATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst><p:sldId id="256" r:id="rId2"/><p:sldId id="257" r:id="rId3"/></p:sldIdLst><p:sldSz cx="12192000" cy="6858000"/></p:presentation>"#;

const PRESENTATION_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide2.xml"/></Relationships>"#;

const TITLE_SLIDE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:sp><p:txBody><a:p><a:r><a:t>Portfolio</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#;

fn cell(text: &str) -> String {
    format!(
        "<a:tc><a:txBody><a:bodyPr/><a:p><a:r><a:t>{}</a:t></a:r></a:p></a:txBody></a:tc>",
        text
    )
}

fn table_slide(rows: &[&[&str]]) -> String {
    let body: String = rows
        .iter()
        .map(|row| format!("<a:tr h=\"370840\">{}</a:tr>", row.iter().map(|c| cell(c)).collect::<String>()))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:graphicFrame><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl>{}</a:tbl></a:graphicData></a:graphic></p:graphicFrame></p:spTree></p:cSld></p:sld>"#,
        body
    )
}

fn layout(kind: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="{}"><p:cSld/></p:sldLayout>"#,
        kind
    )
}

fn fixture() -> Vec<u8> {
    let lookup = table_slide(&[
        &["AFKORTING", "TITEL", "SPF"],
        &["FI01", "Ledger", "B2"],
        &["FI02", "Audit", "B2"],
        &["HR01", "Hiring", "C3"],
    ]);
    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("ppt/presentation.xml", PRESENTATION.to_string()),
        ("ppt/_rels/presentation.xml.rels", PRESENTATION_RELS.to_string()),
        ("ppt/slides/slide1.xml", TITLE_SLIDE.to_string()),
        ("ppt/slides/slide2.xml", lookup),
        ("ppt/slideLayouts/slideLayout1.xml", layout("title")),
        ("ppt/slideLayouts/slideLayout7.xml", layout("blank")),
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
fn test_read_first_table_per_slide() {
    let tables = PptxReader::read(Cursor::new(fixture())).unwrap();

    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].slide, SlideId(2));
    assert_eq!(tables[0].rows[0], vec!["AFKORTING", "TITEL", "SPF"]);
    assert_eq!(tables[0].rows[3], vec!["HR01", "Hiring", "C3"]);
}

#[test]
fn test_missing_content_types_is_rejected() {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("ppt/presentation.xml", zip::write::SimpleFileOptions::default())
        .unwrap();
    zip.write_all(PRESENTATION.as_bytes()).unwrap();
    let bytes = zip.finish().unwrap().into_inner();

    assert!(PptxReader::read(Cursor::new(bytes)).is_err());
}

#[test]
fn test_append_marker_slide_and_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("updated_presentation.pptx");

    let mut writer = PptxWriter::from_reader(Cursor::new(fixture())).unwrap();
    assert_eq!(writer.existing_slides(), 2);

    let config = GridConfig::new(3, 3, 1.0, 1.0);
    let slide = writer.add_slide().unwrap();
    writer.add_grid(slide, &config).unwrap();

    let marker = |label: &str, x: f64| Marker {
        label: label.into(),
        fill: Color::rgb(229, 45, 45),
        x,
        y: 20.0,
        diameter: 9.0,
        font_size: 4.0,
        link: Some(MarkerLink {
            target: SlideId(2),
            tooltip: format!("{} : Ledger", label),
        }),
    };
    let a = writer.add_marker(slide, &marker("FI01", 30.0)).unwrap();
    let b = writer.add_marker(slide, &marker("FI02", 39.0)).unwrap();
    writer.group_shapes(slide, "FI_group", &[a, b]).unwrap();
    assert!(writer.group_shapes(slide, "again", &[a]).is_err());

    writer.write_file(&output).unwrap();
    assert!(output.exists());

    let package = Package::from_reader(std::fs::File::open(&output).unwrap()).unwrap();
    assert_eq!(
        slide_paths(&package).unwrap(),
        vec![
            "ppt/slides/slide1.xml".to_string(),
            "ppt/slides/slide2.xml".to_string(),
            "ppt/slides/slide3.xml".to_string(),
        ]
    );

    let types = String::from_utf8(package.part("[Content_Types].xml").unwrap().to_vec()).unwrap();
    assert!(types.contains(r#"PartName="/ppt/slides/slide3.xml""#));

    let rels = String::from_utf8(
        package
            .part("ppt/slides/_rels/slide3.xml.rels")
            .unwrap()
            .to_vec(),
    )
    .unwrap();
    assert!(rels.contains(r#"Target="../slideLayouts/slideLayout7.xml""#));
    assert!(rels.contains(r#"Id="rId2""#));
    assert!(rels.contains(r#"Target="slide2.xml""#));

    let slide_xml =
        String::from_utf8(package.part("ppt/slides/slide3.xml").unwrap().to_vec()).unwrap();
    assert!(slide_xml.contains(r#"<p:cNvPr id="5" name="FI_group"/>"#));
    assert_eq!(slide_xml.matches("<p:grpSp>").count(), 1);
    assert_eq!(slide_xml.matches(r#"prst="ellipse""#).count(), 2);
    assert!(slide_xml.contains(r#"tooltip="FI01 : Ledger""#));

    let tables: Vec<SourceTable> = PptxReader::read_file(&output).unwrap();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[1].slide, SlideId(3));
    assert_eq!(tables[1].rows[0], vec!["A1", "B1", "C1"]);
    assert_eq!(tables[1].rows[2], vec!["A3", "B3", "C3"]);
}

#[test]
fn test_no_new_slides_keeps_package() {
    let writer = PptxWriter::from_reader(Cursor::new(fixture())).unwrap();
    let package = writer.finish().unwrap();
    assert_eq!(slide_paths(&package).unwrap().len(), 2);
}
