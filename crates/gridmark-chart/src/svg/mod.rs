//! SVG chart rendering
//!
//! Drawing happens in points (72 per inch) through the `viewBox`; the
//! `width`/`height` attributes carry the pixel size at the export DPI.

mod bar;
mod polar;
mod raster;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use gridmark_core::Color;
use quick_xml::escape::escape;

use crate::chart::{Chart, ChartSize, ChartType};
use crate::error::{ChartError, ChartResult};

/// File format of an exported chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartFormat {
    Svg,
    /// Raster image at the chart's export DPI
    #[default]
    Png,
}

impl ChartFormat {
    /// Format named by a path's extension (case-insensitive)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref().extension()?.to_str()?.parse().ok()
    }

    /// File extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            ChartFormat::Svg => "svg",
            ChartFormat::Png => "png",
        }
    }
}

impl fmt::Display for ChartFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ChartFormat {
    type Err = ChartError;

    fn from_str(s: &str) -> ChartResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(ChartFormat::Svg),
            "png" => Ok(ChartFormat::Png),
            _ => Err(ChartError::UnknownFormat(s.to_string())),
        }
    }
}

/// Renders [`Chart`]s as standalone SVG documents, or PNG images rasterized from them
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    font_family: String,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
        }
    }

    pub fn with_font_family<S: Into<String>>(mut self, family: S) -> Self {
        self.font_family = family.into();
        self
    }

    /// Render a chart into an SVG document
    pub fn render(&self, chart: &Chart) -> ChartResult<String> {
        chart.validate()?;

        let mut doc = SvgDocument::new(&chart.size, &self.font_family);
        match chart.chart_type {
            ChartType::PolarBar | ChartType::PolarDetail => polar::draw(chart, &mut doc)?,
            ChartType::BarStacked => bar::draw(chart, &mut doc)?,
        }

        log::debug!(
            "rendered {:?} chart with {} series ({}x{} px)",
            chart.chart_type,
            chart.series.len(),
            chart.size.pixel_width(),
            chart.size.pixel_height()
        );
        Ok(doc.finish())
    }

    /// Render a chart into PNG bytes
    ///
    /// The image is `width × dpi` by `height × dpi` pixels on a white
    /// background.
    pub fn render_png(&self, chart: &Chart) -> ChartResult<Vec<u8>> {
        let svg = self.render(chart)?;
        raster::rasterize(&svg, &self.font_family)
    }

    /// Render a chart and write it to `path` in `format`
    pub fn export<P: AsRef<Path>>(&self, chart: &Chart, path: P, format: ChartFormat) -> ChartResult<()> {
        match format {
            ChartFormat::Svg => std::fs::write(path, self.render(chart)?)?,
            ChartFormat::Png => std::fs::write(path, self.render_png(chart)?)?,
        }
        Ok(())
    }

    /// Render a chart and write it to `path`
    ///
    /// A `.png` path gets a PNG image; anything else an SVG document.
    pub fn write_file<P: AsRef<Path>>(&self, chart: &Chart, path: P) -> ChartResult<()> {
        let format = ChartFormat::from_path(&path).unwrap_or(ChartFormat::Svg);
        self.export(chart, path, format)
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Vertical text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Baseline {
    /// Text sits on the anchor point
    Bottom,
    Center,
    Top,
}

impl Baseline {
    fn as_str(self) -> &'static str {
        match self {
            Baseline::Bottom => "auto",
            Baseline::Center => "central",
            Baseline::Top => "hanging",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct TextStyle {
    pub size: f64,
    pub anchor: Anchor,
    pub baseline: Baseline,
    pub bold: bool,
    /// Rotation in degrees around the anchor point
    pub rotate: f64,
}

impl TextStyle {
    pub fn new(size: f64) -> Self {
        Self {
            size,
            anchor: Anchor::Start,
            baseline: Baseline::Center,
            bold: false,
            rotate: 0.0,
        }
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = degrees;
        self
    }
}

/// Stroke of a line or outline
#[derive(Debug, Clone, Copy)]
pub(crate) struct Stroke {
    pub color: Color,
    pub width: f64,
    pub dashed: bool,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dashed: false,
        }
    }

    pub fn dashed(mut self, dashed: bool) -> Self {
        self.dashed = dashed;
        self
    }

    fn attrs(&self) -> String {
        let mut attrs = format!(
            r#"stroke="{}" stroke-width="{}""#,
            self.color,
            num(self.width)
        );
        if self.dashed {
            attrs.push_str(&format!(
                r#" stroke-dasharray="{} {}""#,
                num(self.width * 3.7),
                num(self.width * 1.6)
            ));
        }
        attrs
    }
}

/// Fill of a shape
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fill {
    pub color: Color,
    pub opacity: f64,
}

impl Fill {
    pub fn new(color: Color, opacity: f64) -> Self {
        Self { color, opacity }
    }

    fn attrs(&self) -> String {
        if self.opacity < 1.0 {
            format!(
                r#"fill="{}" fill-opacity="{}""#,
                self.color,
                num(self.opacity)
            )
        } else {
            format!(r#"fill="{}""#, self.color)
        }
    }
}

/// An SVG document under construction
pub(crate) struct SvgDocument {
    width: f64,
    height: f64,
    pixel_width: u32,
    pixel_height: u32,
    font_family: String,
    body: String,
}

impl SvgDocument {
    pub fn new(size: &ChartSize, font_family: &str) -> Self {
        Self {
            width: size.width_points(),
            height: size.height_points(),
            pixel_width: size.pixel_width(),
            pixel_height: size.pixel_height(),
            font_family: font_family.to_string(),
            body: String::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    #[allow(clippy::too_many_arguments)]
    pub fn rect(&mut self, class: &str, x: f64, y: f64, w: f64, h: f64, fill: Fill, stroke: Option<Stroke>) {
        let stroke = stroke.map(|s| s.attrs()).unwrap_or_default();
        self.body.push_str(&format!(
            r#"<rect class="{}" x="{}" y="{}" width="{}" height="{}" {} {}/>"#,
            class,
            num(x),
            num(y),
            num(w),
            num(h),
            fill.attrs(),
            stroke
        ));
        self.body.push('\n');
    }

    pub fn line(&mut self, class: &str, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke) {
        self.body.push_str(&format!(
            r#"<line class="{}" x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
            class,
            num(x1),
            num(y1),
            num(x2),
            num(y2),
            stroke.attrs()
        ));
        self.body.push('\n');
    }

    pub fn circle(&mut self, class: &str, cx: f64, cy: f64, r: f64, fill: Option<Fill>, stroke: Option<Stroke>) {
        let fill = fill.map(|f| f.attrs()).unwrap_or_else(|| r#"fill="none""#.to_string());
        let stroke = stroke.map(|s| s.attrs()).unwrap_or_default();
        self.body.push_str(&format!(
            r#"<circle class="{}" cx="{}" cy="{}" r="{}" {} {}/>"#,
            class,
            num(cx),
            num(cy),
            num(r),
            fill,
            stroke
        ));
        self.body.push('\n');
    }

    pub fn path(&mut self, class: &str, d: &str, fill: Fill, stroke: Option<Stroke>) {
        let stroke = stroke.map(|s| s.attrs()).unwrap_or_default();
        self.body.push_str(&format!(
            r#"<path class="{}" d="{}" {} {}/>"#,
            class,
            d,
            fill.attrs(),
            stroke
        ));
        self.body.push('\n');
    }

    pub fn text(&mut self, class: &str, x: f64, y: f64, content: &str, style: TextStyle) {
        let weight = if style.bold { r#" font-weight="bold""# } else { "" };
        let transform = if style.rotate != 0.0 {
            format!(
                r#" transform="rotate({} {} {})""#,
                num(style.rotate),
                num(x),
                num(y)
            )
        } else {
            String::new()
        };
        self.body.push_str(&format!(
            r#"<text class="{}" x="{}" y="{}" font-size="{}" text-anchor="{}" dominant-baseline="{}"{}{}>{}</text>"#,
            class,
            num(x),
            num(y),
            num(style.size),
            style.anchor.as_str(),
            style.baseline.as_str(),
            weight,
            transform,
            escape(content)
        ));
        self.body.push('\n');
    }

    pub fn finish(self) -> String {
        format!(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}" font-family="{}">
{}</svg>
"##,
            self.pixel_width,
            self.pixel_height,
            num(self.width),
            num(self.height),
            escape(&self.font_family),
            self.body
        )
    }
}

/// Rough rendered width of `text` at `size` points
pub(crate) fn text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * 0.55
}

/// Format a coordinate with at most two decimals
pub(crate) fn num(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}
