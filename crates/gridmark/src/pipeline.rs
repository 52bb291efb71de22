//! The bullet-placement pipeline, end to end
//!
//! Lookup tables are scanned, mapped onto the grid, placed, coloured and
//! written through a [`PresentationWriter`]. [`generate_bullet_deck`] wires
//! this to `.pptx` files.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use gridmark_core::{
    BulletPlacer, DepartmentColorTable, DepartmentGrouper, DropPolicy, DropReport, GridConfig,
    GridMapper, HeaderVocabulary, MappedRecord, Marker, MarkerLink, MemoryWriter,
    PresentationWriter, SlideHandle, SlideId, SourceTable, TableScanner,
};
use gridmark_pptx::{Package, PptxError, PptxReader, PptxWriter};
use tracing::{debug, info, info_span, warn};

use crate::error::Result;

/// File name used when no output path is given
pub const DEFAULT_OUTPUT_NAME: &str = "updated_presentation.pptx";

/// How placed markers are spread over output slides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SlideLayout {
    /// All markers on one new slide
    #[default]
    Combined,
    /// One new slide per source slide that produced markers
    PerSourceSlide,
}

/// Options of a bullet run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BulletOptions {
    pub grid: GridConfig,
    pub vocabulary: HeaderVocabulary,
    pub drop_policy: DropPolicy,
    /// Group markers of the same department on each slide
    pub group_by_department: bool,
    /// Give each marker a click action back to its source slide
    pub link_to_origin: bool,
    pub layout: SlideLayout,
    /// Draw the labelled grid table under the markers
    pub draw_grid: bool,
}

impl Default for BulletOptions {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            vocabulary: HeaderVocabulary::default(),
            drop_policy: DropPolicy::Silent,
            group_by_department: false,
            link_to_origin: true,
            layout: SlideLayout::Combined,
            draw_grid: true,
        }
    }
}

/// Summary of one output slide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideSummary {
    pub slide: SlideHandle,
    /// Source slide the markers came from (per-source layout only)
    pub source: Option<SlideId>,
    pub markers: usize,
    pub groups: usize,
}

/// Outcome of [`run_bullets`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulletRun {
    /// Records produced by the scanner
    pub records: usize,
    /// Records that landed inside the grid
    pub mapped: usize,
    pub slides: Vec<SlideSummary>,
    pub drops: DropReport,
}

impl BulletRun {
    /// Markers written over all slides
    pub fn markers(&self) -> usize {
        self.slides.iter().map(|s| s.markers).sum()
    }

    /// Groups created over all slides
    pub fn groups(&self) -> usize {
        self.slides.iter().map(|s| s.groups).sum()
    }
}

/// Run the bullet pipeline over `tables` into `writer`
///
/// Department colours are assigned in scan order, before placement, and
/// persist in `colors` across runs.
pub fn run_bullets<W: PresentationWriter>(
    tables: &[SourceTable],
    options: &BulletOptions,
    colors: &mut DepartmentColorTable,
    writer: &mut W,
) -> Result<BulletRun> {
    options.grid.validate()?;

    let span = info_span!("bullets", tables = tables.len());
    let _enter = span.enter();

    let mut drops = DropReport::new();
    let scanner = TableScanner::new(options.vocabulary.clone(), options.drop_policy);
    let records = scanner.scan(tables, &mut drops);
    for record in &records {
        colors.color_for(record.department());
    }

    let mapper = GridMapper::new(&options.grid, options.drop_policy);
    let mapped = mapper.map_all(&records, &mut drops);
    debug!(records = records.len(), mapped = mapped.len(), "records mapped onto the grid");

    let batches: Vec<(Option<SlideId>, &[MappedRecord])> = match options.layout {
        SlideLayout::Combined => vec![(None, mapped.as_slice())],
        SlideLayout::PerSourceSlide => split_by_origin(&mapped)
            .into_iter()
            .map(|(origin, batch)| (Some(origin), batch))
            .collect(),
    };

    let mut slides = Vec::with_capacity(batches.len());
    for (source, batch) in batches {
        slides.push(write_slide(batch, source, options, colors, writer)?);
    }

    if !drops.is_empty() {
        info!(dropped = drops.dropped_rows(), "{}", drops);
    }

    Ok(BulletRun {
        records: records.len(),
        mapped: mapped.len(),
        slides,
        drops,
    })
}

/// Contiguous runs of records sharing a source slide
fn split_by_origin(mapped: &[MappedRecord]) -> Vec<(SlideId, &[MappedRecord])> {
    let mut batches = Vec::new();
    let mut start = 0;
    for i in 1..=mapped.len() {
        if i == mapped.len() || mapped[i].record.origin != mapped[start].record.origin {
            batches.push((mapped[start].record.origin, &mapped[start..i]));
            start = i;
        }
    }
    batches
}

fn write_slide<W: PresentationWriter>(
    batch: &[MappedRecord],
    source: Option<SlideId>,
    options: &BulletOptions,
    colors: &mut DepartmentColorTable,
    writer: &mut W,
) -> Result<SlideSummary> {
    let slide = writer.add_slide()?;
    if options.draw_grid {
        writer.add_grid(slide, &options.grid)?;
    }

    // Fresh placer: occupancy is per output slide
    let mut placer = BulletPlacer::new(&options.grid);
    let mut shapes = Vec::with_capacity(batch.len());
    for placement in placer.place_all(batch) {
        let record = placement.record;
        let marker = Marker {
            label: record.code.clone(),
            fill: colors.color_for(record.department()),
            x: placement.x,
            y: placement.y,
            diameter: options.grid.marker_diameter,
            font_size: options.grid.label_font_size,
            link: options.link_to_origin.then(|| MarkerLink {
                target: record.origin,
                tooltip: record.tooltip(),
            }),
        };
        let handle = writer.add_marker(slide, &marker)?;
        shapes.push((record.department().clone(), handle));
    }

    let mut groups = 0;
    if options.group_by_department {
        for group in DepartmentGrouper::groups(&shapes) {
            writer.group_shapes(slide, &group.name, &group.members)?;
            groups += 1;
        }
    }

    debug!(slide = slide.0, markers = shapes.len(), groups, "slide written");
    Ok(SlideSummary {
        slide,
        source,
        markers: shapes.len(),
        groups,
    })
}

/// Result of [`generate_bullet_deck`]
#[derive(Debug, Clone)]
pub struct BulletDeck {
    /// Where the presentation was written
    pub output: PathBuf,
    pub run: BulletRun,
}

/// Default output path: `updated_presentation.pptx` next to the input
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_file_name(DEFAULT_OUTPUT_NAME)
}

fn open_package(input: &Path) -> Result<Package> {
    if !input.is_file() {
        return Err(gridmark_core::Error::InputNotFound(input.display().to_string()).into());
    }
    let file = File::open(input).map_err(PptxError::from)?;
    Ok(Package::from_reader(BufReader::new(file)).map_err(PptxError::from)?)
}

/// Read `input`, append the marker slides and write the result
///
/// Nothing is written unless the whole run succeeds; the output goes to a
/// temporary file in the destination directory first.
pub fn generate_bullet_deck(
    input: &Path,
    output: Option<&Path>,
    options: &BulletOptions,
    colors: &mut DepartmentColorTable,
) -> Result<BulletDeck> {
    let span = info_span!("deck", input = %input.display());
    let _enter = span.enter();

    let package = open_package(input)?;
    let tables = PptxReader::read_tables(&package)?;
    if tables.is_empty() {
        warn!("no slide in the presentation holds a table");
    }

    let mut writer = PptxWriter::from_package(package)?;
    let run = run_bullets(&tables, options, colors, &mut writer)?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input));
    writer.write_file(&output)?;

    info!(
        output = %output.display(),
        slides = run.slides.len(),
        markers = run.markers(),
        "presentation written"
    );
    Ok(BulletDeck { output, run })
}

/// Run the pipeline on `input` without writing anything
pub fn preview_bullets(
    input: &Path,
    options: &BulletOptions,
    colors: &mut DepartmentColorTable,
) -> Result<(BulletRun, MemoryWriter)> {
    let package = open_package(input)?;
    let tables = PptxReader::read_tables(&package)?;

    let mut writer = MemoryWriter::new();
    let run = run_bullets(&tables, options, colors, &mut writer)?;
    Ok((run, writer))
}
