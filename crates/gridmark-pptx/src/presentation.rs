//! The few PresentationML parts gridmark reads and edits

use gridmark_opc::{resolve_target, Package};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{PptxError, PptxResult};

pub(crate) const PRESENTATION: &str = "ppt/presentation.xml";
pub(crate) const PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";

pub(crate) const REL_SLIDE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
pub(crate) const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
pub(crate) const CT_SLIDE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";

/// A `<p:sldId>` entry from the presentation part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideEntry {
    pub id: u32,
    pub r_id: String,
}

/// Slide part paths in presentation order
pub fn slide_paths(package: &Package) -> PptxResult<Vec<String>> {
    let entries = parse_slide_ids(package.require(PRESENTATION)?)?;
    let rels = package.relationships(PRESENTATION)?;

    let mut paths = Vec::with_capacity(entries.len());
    for entry in entries {
        match rels.iter().find(|r| r.id == entry.r_id) {
            Some(rel) => paths.push(resolve_target(PRESENTATION, &rel.target)),
            None => {
                return Err(PptxError::InvalidFormat(format!(
                    "slide relationship {} not found",
                    entry.r_id
                )))
            }
        }
    }
    Ok(paths)
}

/// Parse the `<p:sldIdLst>` of the presentation part
pub fn parse_slide_ids(xml: &[u8]) -> PptxResult<Vec<SlideEntry>> {
    let mut xml_reader = Reader::from_reader(xml);
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut slides = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.local_name().as_ref() == b"sldId" => {
                let mut id = None;
                let mut r_id = None;

                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"id" => {
                            id = attr
                                .unescape_value()
                                .ok()
                                .and_then(|s| s.parse::<u32>().ok());
                        }
                        b"r:id" => r_id = attr.unescape_value().ok().map(|s| s.to_string()),
                        _ => {}
                    }
                }

                if let (Some(id), Some(r_id)) = (id, r_id) {
                    slides.push(SlideEntry { id, r_id });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(PptxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(slides)
}

/// Read the `type` attribute of a slide layout's root element
pub fn layout_type(xml: &[u8]) -> PptxResult<Option<String>> {
    let mut xml_reader = Reader::from_reader(xml);
    xml_reader.trim_text(true);
    let mut buf = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"sldLayout" => {
                let layout = e
                    .attributes()
                    .flatten()
                    .find(|attr| attr.key.as_ref() == b"type")
                    .and_then(|attr| attr.unescape_value().ok().map(|s| s.to_string()));
                return Ok(layout);
            }
            Ok(Event::Eof) => return Ok(None),
            Err(e) => return Err(PptxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_slide_ids() {
        let presentation = br#"<p:presentation xmlns:p="p" xmlns:r="r"><p:sldIdLst>
            <p:sldId id="257" r:id="rId3"/><p:sldId id="256" r:id="rId2"/></p:sldIdLst></p:presentation>"#;
        let ids = parse_slide_ids(presentation).unwrap();
        assert_eq!(
            ids,
            vec![
                SlideEntry { id: 257, r_id: "rId3".into() },
                SlideEntry { id: 256, r_id: "rId2".into() },
            ]
        );
    }

    #[test]
    fn test_slide_paths_follow_presentation_order() {
        let mut package = Package::default();
        package.set_part(
            PRESENTATION,
            br#"<p:presentation xmlns:p="p" xmlns:r="r"><p:sldIdLst><p:sldId id="257" r:id="rId3"/><p:sldId id="256" r:id="rId2"/></p:sldIdLst></p:presentation>"#.to_vec(),
        );
        package.set_part(
            PRESENTATION_RELS,
            br#"<Relationships><Relationship Id="rId2" Type="t/slide" Target="slides/slide1.xml"/><Relationship Id="rId3" Type="t/slide" Target="/ppt/slides/slide2.xml"/></Relationships>"#.to_vec(),
        );

        assert_eq!(
            slide_paths(&package).unwrap(),
            vec!["ppt/slides/slide2.xml", "ppt/slides/slide1.xml"]
        );
    }

    #[test]
    fn test_layout_type() {
        let xml = br#"<?xml version="1.0"?><p:sldLayout xmlns:p="p" type="blank" preserve="1"/>"#;
        assert_eq!(layout_type(xml).unwrap().as_deref(), Some("blank"));
        let xml = br#"<p:sldLayout xmlns:p="p"><p:cSld/></p:sldLayout>"#;
        assert_eq!(layout_type(xml).unwrap(), None);
    }
}
