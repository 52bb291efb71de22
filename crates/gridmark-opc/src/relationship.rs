//! Relationship parts and part-name arithmetic

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{OpcError, OpcResult};

/// A relationship from a `.rels` part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
}

impl Relationship {
    /// Whether the type URI ends in `/<kind>`, e.g. `worksheet` or `slide`
    pub fn is_kind(&self, kind: &str) -> bool {
        self.rel_type
            .rsplit_once('/')
            .map_or(false, |(_, last)| last == kind)
    }
}

/// Parse a `.rels` part
pub fn parse_relationships(xml: &[u8]) -> OpcResult<Vec<Relationship>> {
    let mut xml_reader = Reader::from_reader(xml);
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut rels = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let mut id = None;
                let mut target = None;
                let mut rel_type = None;

                for attr in e.attributes().flatten() {
                    let value = attr.unescape_value().ok().map(|s| s.to_string());
                    match attr.key.as_ref() {
                        b"Id" => id = value,
                        b"Target" => target = value,
                        b"Type" => rel_type = value,
                        _ => {}
                    }
                }

                match (id, target, rel_type) {
                    (Some(id), Some(target), Some(rel_type)) => rels.push(Relationship {
                        id,
                        rel_type,
                        target,
                    }),
                    _ => log::warn!("skipping incomplete relationship"),
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(OpcError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

/// Path of the relationships part belonging to `part`
///
/// `ppt/slides/slide1.xml` → `ppt/slides/_rels/slide1.xml.rels`
pub fn rels_path_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

/// Resolve a relationship target against the part that owns it
pub fn resolve_target(source_part: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = source_part.split('/').collect();
    segments.pop();

    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Relative target from `source_part` to `target_part`, both package paths
pub fn relative_target(source_part: &str, target_part: &str) -> String {
    let source_dirs: Vec<&str> = match source_part.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    let target_segments: Vec<&str> = target_part.split('/').collect();

    let common = source_dirs
        .iter()
        .zip(&target_segments)
        .take_while(|(a, b)| a == b)
        .count();

    let mut out: Vec<&str> = vec![".."; source_dirs.len() - common];
    out.extend_from_slice(&target_segments[common..]);
    out.join("/")
}

/// Trailing number of a part name such as `ppt/slides/slide12.xml`
pub fn part_number(part: &str, prefix: &str) -> Option<u32> {
    part.strip_prefix(prefix)?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_target() {
        assert_eq!(
            resolve_target("ppt/presentation.xml", "slides/slide1.xml"),
            "ppt/slides/slide1.xml"
        );
        assert_eq!(
            resolve_target("ppt/slides/slide1.xml", "../slideLayouts/slideLayout7.xml"),
            "ppt/slideLayouts/slideLayout7.xml"
        );
        assert_eq!(
            resolve_target("xl/workbook.xml", "/xl/worksheets/sheet2.xml"),
            "xl/worksheets/sheet2.xml"
        );
    }

    #[test]
    fn test_relative_target() {
        assert_eq!(
            relative_target("ppt/slides/slide4.xml", "ppt/slides/slide1.xml"),
            "slide1.xml"
        );
        assert_eq!(
            relative_target("ppt/slides/slide4.xml", "ppt/slideLayouts/slideLayout7.xml"),
            "../slideLayouts/slideLayout7.xml"
        );
        assert_eq!(
            relative_target("ppt/presentation.xml", "ppt/slides/slide4.xml"),
            "slides/slide4.xml"
        );
    }

    #[test]
    fn test_rels_path_and_numbers() {
        assert_eq!(rels_path_for("ppt/slides/slide1.xml"), "ppt/slides/_rels/slide1.xml.rels");
        assert_eq!(rels_path_for("xl/workbook.xml"), "xl/_rels/workbook.xml.rels");
        assert_eq!(part_number("ppt/slides/slide12.xml", "ppt/slides/slide"), Some(12));
        assert_eq!(part_number("ppt/slides/_rels/slide1.xml.rels", "ppt/slides/slide"), None);
    }

    #[test]
    fn test_parse_relationships() {
        let rels = br#"<Relationships>
            <Relationship Id="rId2" Type="http://x/relationships/slide" Target="slides/slide1.xml"/>
            <Relationship Id="rId3" Type="http://x/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
            <Relationship Id="rId4" Target="missing-type.xml"/>
        </Relationships>"#;
        let parsed = parse_relationships(rels).unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].target, "slides/slide1.xml");
        assert!(parsed[0].is_kind("slide"));
        assert!(!parsed[1].is_kind("slide"));
        assert!(parsed[1].is_kind("slideLayout"));
    }
}
