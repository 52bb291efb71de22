//! Presentation writer capability
//!
//! The placement pipeline never touches a file format directly. It asks a
//! [`PresentationWriter`] for a slide, draws the grid, adds markers and
//! finally groups them. [`MemoryWriter`] records every call and backs dry
//! runs and tests; file-backed writers live in their own crates.

use crate::color::Color;
use crate::config::GridConfig;
use crate::error::{Error, Result};
use crate::record::SlideId;

/// Handle to a slide created by a writer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlideHandle(pub usize);

/// Handle to a shape on a writer-created slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeHandle(pub u32);

/// Click action jumping back to the slide a record came from
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerLink {
    /// Slide to jump to
    pub target: SlideId,
    /// Hover text
    pub tooltip: String,
}

/// A labelled, filled circle
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Visible text (the project code)
    pub label: String,
    /// Fill color
    pub fill: Color,
    /// Left edge in points
    pub x: f64,
    /// Top edge in points
    pub y: f64,
    /// Diameter in points
    pub diameter: f64,
    /// Label font size in points
    pub font_size: f64,
    /// Optional link back to the origin slide
    pub link: Option<MarkerLink>,
}

/// Something that can add slides, grids and markers to a presentation
pub trait PresentationWriter {
    /// Append a new empty slide
    fn add_slide(&mut self) -> Result<SlideHandle>;

    /// Draw the labelled `rows × cols` grid table at the configured origin
    fn add_grid(&mut self, slide: SlideHandle, config: &GridConfig) -> Result<()>;

    /// Add a marker shape and return its handle
    fn add_marker(&mut self, slide: SlideHandle, marker: &Marker) -> Result<ShapeHandle>;

    /// Combine existing shapes into one named group
    fn group_shapes(&mut self, slide: SlideHandle, name: &str, shapes: &[ShapeHandle]) -> Result<()>;
}

/// A group recorded by [`MemoryWriter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedGroup {
    pub name: String,
    pub shapes: Vec<ShapeHandle>,
}

/// Everything [`MemoryWriter`] saw for one slide
#[derive(Debug, Clone, Default)]
pub struct RecordedSlide {
    /// Grid drawn on the slide, if any
    pub grid: Option<GridConfig>,
    /// Markers in insertion order; a marker's handle is its index
    pub markers: Vec<Marker>,
    /// Groups in creation order
    pub groups: Vec<RecordedGroup>,
}

/// Writer that keeps everything in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    slides: Vec<RecordedSlide>,
}

impl MemoryWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded slides in creation order
    pub fn slides(&self) -> &[RecordedSlide] {
        &self.slides
    }

    /// Total number of markers on all slides
    pub fn marker_count(&self) -> usize {
        self.slides.iter().map(|s| s.markers.len()).sum()
    }

    fn slide_mut(&mut self, slide: SlideHandle) -> Result<&mut RecordedSlide> {
        self.slides
            .get_mut(slide.0)
            .ok_or(Error::UnknownSlide(slide.0))
    }
}

impl PresentationWriter for MemoryWriter {
    fn add_slide(&mut self) -> Result<SlideHandle> {
        self.slides.push(RecordedSlide::default());
        Ok(SlideHandle(self.slides.len() - 1))
    }

    fn add_grid(&mut self, slide: SlideHandle, config: &GridConfig) -> Result<()> {
        self.slide_mut(slide)?.grid = Some(config.clone());
        Ok(())
    }

    fn add_marker(&mut self, slide: SlideHandle, marker: &Marker) -> Result<ShapeHandle> {
        let recorded = self.slide_mut(slide)?;
        recorded.markers.push(marker.clone());
        Ok(ShapeHandle((recorded.markers.len() - 1) as u32))
    }

    fn group_shapes(&mut self, slide: SlideHandle, name: &str, shapes: &[ShapeHandle]) -> Result<()> {
        let recorded = self.slide_mut(slide)?;
        if let Some(missing) = shapes
            .iter()
            .find(|shape| shape.0 as usize >= recorded.markers.len())
        {
            return Err(Error::UnknownShape(missing.0, slide.0));
        }
        recorded.groups.push(RecordedGroup {
            name: name.to_string(),
            shapes: shapes.to_vec(),
        });
        Ok(())
    }
}
