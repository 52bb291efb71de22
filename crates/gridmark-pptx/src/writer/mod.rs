//! PPTX marker writer
//!
//! Appends slides to an existing presentation. The source package is kept in
//! memory; new slides are serialized and spliced into the presentation part,
//! its relationships and the content types when the package is written.

use std::fs::File;
use std::io::{BufReader, Read, Seek, Write};
use std::path::Path;

use crate::error::{PptxError, PptxResult};
use crate::presentation::{
    layout_type, parse_slide_ids, slide_paths, CT_SLIDE, PRESENTATION, PRESENTATION_RELS,
    REL_SLIDE, REL_SLIDE_LAYOUT,
};
use quick_xml::escape::escape;
use gridmark_opc::{part_number, relative_target, rels_path_for, Package, CONTENT_TYPES};
use gridmark_core::units::points_to_emu;
use gridmark_core::{
    Color, Error, GridConfig, GridReference, Marker, PresentationWriter, Result, ShapeHandle,
    SlideHandle, SlideId,
};

const SLIDE_PREFIX: &str = "ppt/slides/slide";
const LAYOUT_PREFIX: &str = "ppt/slideLayouts/slideLayout";

/// Font size of the grid cell labels, in points
pub const GRID_LABEL_FONT_SIZE: f64 = 7.0;

/// Border width of the grid cells, in EMU
const GRID_BORDER_EMU: i64 = 6350;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    x: i64,
    y: i64,
    cx: i64,
    cy: i64,
}

impl Bounds {
    fn union(self, other: Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.cx).max(other.x + other.cx);
        let bottom = (self.y + self.cy).max(other.y + other.cy);
        Bounds {
            x,
            y,
            cx: right - x,
            cy: bottom - y,
        }
    }
}

#[derive(Debug, Clone)]
struct MarkerShape {
    xml: String,
    bounds: Bounds,
    group: Option<usize>,
}

#[derive(Debug, Clone)]
struct GroupShape {
    id: u32,
    name: String,
    members: Vec<usize>,
}

#[derive(Debug, Clone)]
struct NewSlide {
    grid: Option<String>,
    markers: Vec<MarkerShape>,
    groups: Vec<GroupShape>,
    /// Slide parts this slide links to; relationship `rId{n + 2}`
    links: Vec<String>,
    next_id: u32,
}

impl NewSlide {
    fn new() -> Self {
        Self {
            grid: None,
            markers: Vec::new(),
            groups: Vec::new(),
            links: Vec::new(),
            next_id: 2,
        }
    }

    fn take_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn link_rid(&mut self, target: &str) -> String {
        let index = match self.links.iter().position(|p| p == target) {
            Some(i) => i,
            None => {
                self.links.push(target.to_string());
                self.links.len() - 1
            }
        };
        format!("rId{}", index + 2)
    }
}

/// Adds marker slides to an existing presentation
#[derive(Debug, Clone)]
pub struct PptxWriter {
    package: Package,
    slide_paths: Vec<String>,
    layout_path: String,
    slides: Vec<NewSlide>,
}

impl PptxWriter {
    /// Open a presentation file
    pub fn from_file<P: AsRef<Path>>(path: P) -> PptxResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Open a presentation from a reader
    pub fn from_reader<R: Read + Seek>(reader: R) -> PptxResult<Self> {
        Self::from_package(Package::from_reader(reader)?)
    }

    /// Wrap an already loaded package
    pub fn from_package(package: Package) -> PptxResult<Self> {
        let slide_paths = slide_paths(&package)?;
        let layout_path = Self::pick_layout(&package)?;
        log::debug!(
            "presentation has {} slides, new slides use {}",
            slide_paths.len(),
            layout_path
        );
        Ok(Self {
            package,
            slide_paths,
            layout_path,
            slides: Vec::new(),
        })
    }

    /// Number of slides added so far
    pub fn added_slides(&self) -> usize {
        self.slides.len()
    }

    /// Number of slides in the source presentation
    pub fn existing_slides(&self) -> usize {
        self.slide_paths.len()
    }

    /// Write the updated presentation to a file
    ///
    /// The archive is written to a temporary file next to `path` and then
    /// renamed over it, so `path` never holds a partial package.
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> PptxResult<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        self.write(temp.as_file_mut())?;
        temp.persist(path).map_err(|e| PptxError::Io(e.error))?;
        Ok(())
    }

    /// Write the updated presentation to a writer
    pub fn write<W: Write + Seek>(&self, writer: W) -> PptxResult<()> {
        self.finish()?.write(writer)?;
        Ok(())
    }

    /// Build the updated package
    pub fn finish(&self) -> PptxResult<Package> {
        let mut package = self.package.clone();
        if self.slides.is_empty() {
            return Ok(package);
        }

        let first_number = package
            .part_names()
            .filter_map(|name| part_number(name, SLIDE_PREFIX))
            .max()
            .unwrap_or(0)
            + 1;
        let mut next_rid = package
            .relationships(PRESENTATION)?
            .iter()
            .filter_map(|rel| rel.id.strip_prefix("rId")?.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        let mut next_slide_id = parse_slide_ids(package.require(PRESENTATION)?)?
            .iter()
            .map(|entry| entry.id)
            .max()
            .unwrap_or(255)
            .max(255)
            + 1;

        let mut relationships = String::new();
        let mut slide_ids = String::new();
        let mut overrides = String::new();

        for (i, slide) in self.slides.iter().enumerate() {
            let path = format!("{}{}.xml", SLIDE_PREFIX, first_number as usize + i);
            package.set_part(&path, Self::slide_xml(slide).into_bytes());
            package.set_part(
                &rels_path_for(&path),
                self.slide_rels_xml(&path, slide).into_bytes(),
            );

            let rid = format!("rId{}", next_rid);
            next_rid += 1;
            relationships.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                rid,
                REL_SLIDE,
                relative_target(PRESENTATION, &path)
            ));
            slide_ids.push_str(&format!(r#"<p:sldId id="{}" r:id="{}"/>"#, next_slide_id, rid));
            next_slide_id += 1;
            overrides.push_str(&format!(
                r#"<Override PartName="/{}" ContentType="{}"/>"#,
                path, CT_SLIDE
            ));
        }

        let rels = part_text(&package, PRESENTATION_RELS)?;
        let rels = insert_before(&rels, "</Relationships>", &relationships)
            .ok_or_else(|| PptxError::InvalidFormat("presentation relationships not closed".into()))?;
        package.set_part(PRESENTATION_RELS, rels.into_bytes());

        let presentation = part_text(&package, PRESENTATION)?;
        let presentation = Self::add_slide_ids(&presentation, &slide_ids)?;
        package.set_part(PRESENTATION, presentation.into_bytes());

        let types = part_text(&package, CONTENT_TYPES)?;
        let types = insert_before(&types, "</Types>", &overrides)
            .ok_or_else(|| PptxError::InvalidFormat("content types not closed".into()))?;
        package.set_part(CONTENT_TYPES, types.into_bytes());

        Ok(package)
    }

    /// Prefer a layout of type "blank", otherwise the lowest-numbered one
    fn pick_layout(package: &Package) -> PptxResult<String> {
        let mut layouts: Vec<(u32, &str)> = package
            .part_names()
            .filter_map(|name| part_number(name, LAYOUT_PREFIX).map(|n| (n, name)))
            .collect();
        layouts.sort_unstable();

        for (_, name) in &layouts {
            if layout_type(package.require(name)?)?.as_deref() == Some("blank") {
                return Ok(name.to_string());
            }
        }

        layouts
            .first()
            .map(|(_, name)| name.to_string())
            .ok_or_else(|| PptxError::MissingPart(format!("{}1.xml", LAYOUT_PREFIX)))
    }

    fn add_slide_ids(presentation: &str, slide_ids: &str) -> PptxResult<String> {
        if let Some(updated) = insert_before(presentation, "</p:sldIdLst>", slide_ids) {
            return Ok(updated);
        }

        let list = format!("<p:sldIdLst>{}</p:sldIdLst>", slide_ids);
        if presentation.contains("<p:sldIdLst/>") {
            return Ok(presentation.replacen("<p:sldIdLst/>", &list, 1));
        }

        // sldIdLst follows the master lists
        for anchor in [
            "</p:handoutMasterIdLst>",
            "</p:notesMasterIdLst>",
            "</p:sldMasterIdLst>",
        ] {
            if let Some(pos) = presentation.find(anchor) {
                let at = pos + anchor.len();
                return Ok(format!("{}{}{}", &presentation[..at], list, &presentation[at..]));
            }
        }

        Err(PptxError::InvalidFormat(
            "presentation part has no slide master list".into(),
        ))
    }

    fn slide_xml(slide: &NewSlide) -> String {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
        );

        if let Some(grid) = &slide.grid {
            content.push_str(grid);
        }

        for (index, marker) in slide.markers.iter().enumerate() {
            match marker.group {
                None => content.push_str(&marker.xml),
                Some(g) => {
                    let group = &slide.groups[g];
                    if group.members.first() == Some(&index) {
                        Self::write_group(&mut content, slide, group);
                    }
                }
            }
        }

        content.push_str(
            r#"</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#,
        );
        content
    }

    fn write_group(content: &mut String, slide: &NewSlide, group: &GroupShape) {
        let bounds = group
            .members
            .iter()
            .map(|&m| slide.markers[m].bounds)
            .reduce(Bounds::union)
            .unwrap_or(Bounds {
                x: 0,
                y: 0,
                cx: 0,
                cy: 0,
            });

        content.push_str(&format!(
            r#"<p:grpSp><p:nvGrpSpPr><p:cNvPr id="{}" name="{}"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/><a:chOff x="{x}" y="{y}"/><a:chExt cx="{cx}" cy="{cy}"/></a:xfrm></p:grpSpPr>"#,
            group.id,
            escape(&group.name),
            x = bounds.x,
            y = bounds.y,
            cx = bounds.cx,
            cy = bounds.cy,
        ));
        for &m in &group.members {
            content.push_str(&slide.markers[m].xml);
        }
        content.push_str("</p:grpSp>");
    }

    fn slide_rels_xml(&self, path: &str, slide: &NewSlide) -> String {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        content.push_str(&format!(
            r#"<Relationship Id="rId1" Type="{}" Target="{}"/>"#,
            REL_SLIDE_LAYOUT,
            relative_target(path, &self.layout_path)
        ));
        for (i, target) in slide.links.iter().enumerate() {
            content.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="{}" Target="{}"/>"#,
                i + 2,
                REL_SLIDE,
                relative_target(path, target)
            ));
        }
        content.push_str("</Relationships>");
        content
    }

    fn grid_xml(id: u32, config: &GridConfig) -> String {
        let cell_w = points_to_emu(config.cell_width_points());
        let cell_h = points_to_emu(config.cell_height_points());
        let border = |side: &str| {
            format!(
                r#"<a:{side} w="{}" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:prstDash val="solid"/></a:{side}>"#,
                GRID_BORDER_EMU,
                Color::BLACK.to_hex(),
                side = side
            )
        };
        let borders: String = ["lnL", "lnR", "lnT", "lnB"].iter().map(|s| border(s)).collect();

        let mut content = format!(
            r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="{}" name="Grid"/><p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr><p:nvPr/></p:nvGraphicFramePr><p:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></p:xfrm><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl><a:tblPr/><a:tblGrid>"#,
            id,
            points_to_emu(config.origin_x),
            points_to_emu(config.origin_y),
            cell_w * config.cols as i64,
            cell_h * config.rows as i64,
        );
        for _ in 0..config.cols {
            content.push_str(&format!(r#"<a:gridCol w="{}"/>"#, cell_w));
        }
        content.push_str("</a:tblGrid>");

        for row in 1..=config.rows {
            content.push_str(&format!(r#"<a:tr h="{}">"#, cell_h));
            for column in 1..=config.cols {
                let label = GridReference { row, column }.to_a1_string();
                content.push_str(&format!(
                    r#"<a:tc><a:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:rPr lang="nl-NL" sz="{}" dirty="0"><a:solidFill><a:srgbClr val="{}"/></a:solidFill></a:rPr><a:t>{}</a:t></a:r></a:p></a:txBody><a:tcPr marL="18000" marR="18000" marT="0" marB="0">{}<a:solidFill><a:srgbClr val="{}"/></a:solidFill></a:tcPr></a:tc>"#,
                    font_size_attr(GRID_LABEL_FONT_SIZE),
                    Color::BLACK.to_hex(),
                    label,
                    borders,
                    Color::WHITE.to_hex(),
                ));
            }
            content.push_str("</a:tr>");
        }

        content.push_str("</a:tbl></a:graphicData></a:graphic></p:graphicFrame>");
        content
    }

    fn marker_xml(id: u32, marker: &Marker, bounds: Bounds, link: Option<(&str, &str)>) -> String {
        let hyperlink = match link {
            Some((rid, tooltip)) => format!(
                r#"<a:hlinkClick r:id="{}" action="ppaction://hlinksldjump" tooltip="{}"/>"#,
                rid,
                escape(tooltip)
            ),
            None => String::new(),
        };
        let label = escape(&marker.label);

        format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{label}">{hyperlink}</p:cNvPr><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="ellipse"><a:avLst/></a:prstGeom><a:solidFill><a:srgbClr val="{fill}"/></a:solidFill><a:ln><a:noFill/></a:ln></p:spPr><p:txBody><a:bodyPr wrap="none" lIns="0" tIns="0" rIns="0" bIns="0" rtlCol="0" anchor="ctr"/><a:lstStyle/><a:p><a:pPr algn="ctr"/><a:r><a:rPr lang="nl-NL" sz="{sz}" dirty="0"/><a:t>{label}</a:t></a:r></a:p></p:txBody></p:sp>"#,
            id = id,
            label = label,
            hyperlink = hyperlink,
            x = bounds.x,
            y = bounds.y,
            cx = bounds.cx,
            cy = bounds.cy,
            fill = marker.fill.to_hex(),
            sz = font_size_attr(marker.font_size),
        )
    }

    fn slide_mut(&mut self, slide: SlideHandle) -> Result<&mut NewSlide> {
        self.slides
            .get_mut(slide.0)
            .ok_or(Error::UnknownSlide(slide.0))
    }

    fn link_target(&self, target: SlideId) -> Result<String> {
        (target.0 as usize)
            .checked_sub(1)
            .and_then(|i| self.slide_paths.get(i))
            .cloned()
            .ok_or_else(|| Error::writer(format!("cannot link to {}: not in presentation", target)))
    }
}

impl PresentationWriter for PptxWriter {
    fn add_slide(&mut self) -> Result<SlideHandle> {
        self.slides.push(NewSlide::new());
        Ok(SlideHandle(self.slides.len() - 1))
    }

    fn add_grid(&mut self, slide: SlideHandle, config: &GridConfig) -> Result<()> {
        let new_slide = self.slide_mut(slide)?;
        let id = new_slide.take_id();
        new_slide.grid = Some(Self::grid_xml(id, config));
        Ok(())
    }

    fn add_marker(&mut self, slide: SlideHandle, marker: &Marker) -> Result<ShapeHandle> {
        let link = match &marker.link {
            Some(link) => Some((self.link_target(link.target)?, link.tooltip.as_str())),
            None => None,
        };

        let diameter = points_to_emu(marker.diameter);
        let bounds = Bounds {
            x: points_to_emu(marker.x),
            y: points_to_emu(marker.y),
            cx: diameter,
            cy: diameter,
        };

        let new_slide = self.slide_mut(slide)?;
        let id = new_slide.take_id();
        let rid = link
            .as_ref()
            .map(|(target, tooltip)| (new_slide.link_rid(target), *tooltip));
        let xml = Self::marker_xml(
            id,
            marker,
            bounds,
            rid.as_ref().map(|(rid, tooltip)| (rid.as_str(), *tooltip)),
        );

        new_slide.markers.push(MarkerShape {
            xml,
            bounds,
            group: None,
        });
        Ok(ShapeHandle((new_slide.markers.len() - 1) as u32))
    }

    fn group_shapes(&mut self, slide: SlideHandle, name: &str, shapes: &[ShapeHandle]) -> Result<()> {
        let new_slide = self.slide_mut(slide)?;
        if shapes.is_empty() {
            return Err(Error::writer(format!("group '{}' has no members", name)));
        }

        let mut members = Vec::with_capacity(shapes.len());
        for shape in shapes {
            let index = shape.0 as usize;
            match new_slide.markers.get(index) {
                None => return Err(Error::UnknownShape(shape.0, slide.0)),
                Some(marker) if marker.group.is_some() => {
                    return Err(Error::writer(format!(
                        "shape {} is already grouped",
                        shape.0
                    )))
                }
                Some(_) => members.push(index),
            }
        }
        members.sort_unstable();
        members.dedup();

        let group_index = new_slide.groups.len();
        for &m in &members {
            new_slide.markers[m].group = Some(group_index);
        }
        let id = new_slide.take_id();
        new_slide.groups.push(GroupShape {
            id,
            name: name.to_string(),
            members,
        });
        Ok(())
    }
}

fn part_text(package: &Package, name: &str) -> PptxResult<String> {
    String::from_utf8(package.require(name)?.to_vec())
        .map_err(|_| PptxError::InvalidFormat(format!("{} is not UTF-8", name)))
}

fn insert_before(xml: &str, closing: &str, insert: &str) -> Option<String> {
    let pos = xml.rfind(closing)?;
    Some(format!("{}{}{}", &xml[..pos], insert, &xml[pos..]))
}

/// `sz` attribute value: hundredths of a point
fn font_size_attr(points: f64) -> u32 {
    (points * 100.0).round().max(100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_union() {
        let a = Bounds { x: 10, y: 10, cx: 5, cy: 5 };
        let b = Bounds { x: 20, y: 0, cx: 5, cy: 5 };
        assert_eq!(a.union(b), Bounds { x: 10, y: 0, cx: 15, cy: 15 });
    }

    #[test]
    fn test_add_slide_ids_variants() {
        let with_list = r#"<p:presentation><p:sldMasterIdLst/><p:sldIdLst><p:sldId id="256" r:id="rId2"/></p:sldIdLst></p:presentation>"#;
        let updated = PptxWriter::add_slide_ids(with_list, "<new/>").unwrap();
        assert!(updated.contains(r#"r:id="rId2"/><new/></p:sldIdLst>"#));

        let empty_list = r#"<p:presentation><p:sldIdLst/></p:presentation>"#;
        let updated = PptxWriter::add_slide_ids(empty_list, "<new/>").unwrap();
        assert!(updated.contains("<p:sldIdLst><new/></p:sldIdLst>"));

        let no_list = r#"<p:presentation><p:sldMasterIdLst><x/></p:sldMasterIdLst><p:notesMasterIdLst><y/></p:notesMasterIdLst><p:sldSz/></p:presentation>"#;
        let updated = PptxWriter::add_slide_ids(no_list, "<new/>").unwrap();
        assert!(updated.contains("</p:notesMasterIdLst><p:sldIdLst><new/></p:sldIdLst><p:sldSz/>"));

        assert!(PptxWriter::add_slide_ids("<p:presentation/>", "<new/>").is_err());
    }

    #[test]
    fn test_grid_xml_labels_cells() {
        let config = GridConfig::new(2, 3, 1.0, 1.0);
        let xml = PptxWriter::grid_xml(2, &config);
        assert_eq!(xml.matches("<a:tc>").count(), 6);
        assert_eq!(xml.matches("<a:gridCol ").count(), 3);
        assert!(xml.contains("<a:t>A1</a:t>"));
        assert!(xml.contains("<a:t>C2</a:t>"));
        assert!(xml.contains(r#"sz="700""#));
        assert!(xml.contains(r#"<a:lnB w="6350""#));
    }

    #[test]
    fn test_marker_xml_escapes_and_links() {
        let marker = Marker {
            label: "R&D1".into(),
            fill: Color::rgb(229, 45, 45),
            x: 10.0,
            y: 20.0,
            diameter: 9.0,
            font_size: 4.0,
            link: None,
        };
        let bounds = Bounds { x: 127_000, y: 254_000, cx: 114_300, cy: 114_300 };
        let xml = PptxWriter::marker_xml(7, &marker, bounds, Some(("rId2", "R&D1 : \"Lab\" <Ops'>")));

        assert!(xml.contains(r#"name="R&amp;D1""#));
        assert!(xml.contains(r#"<a:srgbClr val="E52D2D"/>"#));
        assert!(xml.contains(r#"tooltip="R&amp;D1 : &quot;Lab&quot; &lt;Ops&apos;&gt;""#));
        assert!(xml.contains(r#"action="ppaction://hlinksldjump""#));
        assert!(xml.contains(r#"sz="400""#));
    }
}
