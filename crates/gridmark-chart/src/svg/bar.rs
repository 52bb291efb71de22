//! Stacked horizontal bar charts
//!
//! The first category is drawn at the bottom. Series stack left to right
//! in their given order.

use gridmark_core::Color;

use super::{text_width, Anchor, Baseline, Fill, Stroke, SvgDocument, TextStyle};
use crate::chart::Chart;
use crate::error::ChartResult;
use crate::legend::{Legend, LegendPosition};

const TITLE_SIZE: f64 = 16.0;
const AXIS_TITLE_SIZE: f64 = 14.0;
const TICK_SIZE: f64 = 11.0;
/// Share of a category band covered by its bar
const BAR_HEIGHT: f64 = 0.8;

struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    min: f64,
    max: f64,
}

impl PlotArea {
    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn x(&self, value: f64) -> f64 {
        let v = value.clamp(self.min, self.max);
        self.left + (v - self.min) / (self.max - self.min) * self.width
    }
}

pub(super) fn draw(chart: &Chart, doc: &mut SvgDocument) -> ChartResult<()> {
    let (min, max) = chart.value_bounds();
    let value_axis = chart.value_axis.as_ref();
    let category_axis = chart.category_axis.as_ref();

    let label_width = chart
        .categories
        .iter()
        .map(|c| text_width(c, TICK_SIZE))
        .fold(0.0, f64::max);
    let category_title = category_axis.and_then(|a| a.title.as_deref());
    let value_title = value_axis.and_then(|a| a.title.as_deref());

    let left = 12.0 + label_width + if category_title.is_some() { AXIS_TITLE_SIZE * 2.0 } else { 0.0 };
    let top = if chart.title.is_some() { TITLE_SIZE * 3.0 } else { 12.0 };
    let mut bottom_space = TICK_SIZE * 2.0;
    if value_title.is_some() {
        bottom_space += AXIS_TITLE_SIZE * 2.0;
    }
    if let Some(legend) = chart.legend.as_ref().filter(|l| l.position == LegendPosition::Bottom) {
        bottom_space += legend_height(chart, legend) + 8.0;
    }

    let plot = PlotArea {
        left,
        top,
        width: (doc.width() - left - 24.0).max(1.0),
        height: (doc.height() - top - bottom_space).max(1.0),
        min,
        max,
    };

    if let Some(title) = &chart.title {
        doc.text(
            "title",
            plot.left + plot.width / 2.0,
            top - TITLE_SIZE * 1.25,
            title,
            TextStyle::new(TITLE_SIZE)
                .anchor(Anchor::Middle)
                .baseline(Baseline::Bottom)
                .bold(),
        );
    }

    // Grid lines go under the bars
    if let Some(axis) = value_axis {
        if let Some(gridlines) = axis.gridlines {
            let stroke = Stroke::new(Color::GRAY, gridlines.width).dashed(gridlines.dashed);
            for tick in axis.ticks() {
                let x = plot.x(tick);
                doc.line("grid", x, plot.top, x, plot.bottom(), stroke);
            }
        }
    }

    let band = plot.height / chart.categories.len().max(1) as f64;
    for (i, category) in chart.categories.iter().enumerate() {
        let center = plot.bottom() - (i as f64 + 0.5) * band;
        let bar_height = band * BAR_HEIGHT;

        let mut start = min;
        for series in &chart.series {
            let value = series.values[i];
            let x0 = plot.x(start);
            let x1 = plot.x(start + value);
            start += value;
            if x1 - x0 <= 0.0 {
                continue;
            }
            doc.rect(
                "bar",
                x0,
                center - bar_height / 2.0,
                x1 - x0,
                bar_height,
                Fill::new(series.fill, series.opacity),
                None,
            );
        }

        doc.text(
            "category",
            plot.left - 6.0,
            center,
            category,
            TextStyle::new(TICK_SIZE).anchor(Anchor::End),
        );
    }

    if let Some(axis) = value_axis {
        if axis.tick_labels {
            for tick in axis.ticks() {
                doc.text(
                    "tick",
                    plot.x(tick),
                    plot.bottom() + 4.0,
                    &axis.tick_label(tick),
                    TextStyle::new(TICK_SIZE)
                        .anchor(Anchor::Middle)
                        .baseline(Baseline::Top),
                );
            }
        }
    }

    let mut cursor = plot.bottom() + TICK_SIZE * 2.0;
    if let Some(title) = value_title {
        doc.text(
            "axis-title",
            plot.left + plot.width / 2.0,
            cursor + AXIS_TITLE_SIZE * 0.5,
            title,
            TextStyle::new(AXIS_TITLE_SIZE)
                .anchor(Anchor::Middle)
                .baseline(Baseline::Top),
        );
        cursor += AXIS_TITLE_SIZE * 2.0;
    }
    if let Some(title) = category_title {
        doc.text(
            "axis-title",
            AXIS_TITLE_SIZE,
            plot.top + plot.height / 2.0,
            title,
            TextStyle::new(AXIS_TITLE_SIZE)
                .anchor(Anchor::Middle)
                .rotate(-90.0),
        );
    }

    if let Some(legend) = &chart.legend {
        let y = match legend.position {
            LegendPosition::Bottom => cursor + 8.0,
            LegendPosition::TopRight => plot.top,
        };
        draw_legend(chart, legend, &plot, y, doc);
    }

    Ok(())
}

fn legend_height(chart: &Chart, legend: &Legend) -> f64 {
    let entries = chart.series.iter().filter(|s| s.in_legend).count();
    let columns = legend.columns.max(1);
    let rows = (entries + columns - 1) / columns;
    let title = if legend.title.is_some() { legend.font_size * 1.5 } else { 0.0 };
    title + rows as f64 * legend.font_size * 1.4
}

/// Legend without a frame, entries laid out in rows of `columns`
fn draw_legend(chart: &Chart, legend: &Legend, plot: &PlotArea, y: f64, doc: &mut SvgDocument) {
    let entries: Vec<_> = chart.series.iter().filter(|s| s.in_legend).collect();
    if entries.is_empty() {
        return;
    }

    let size = legend.font_size;
    let swatch = size * 0.9;
    let columns = legend.columns.max(1).min(entries.len());
    let column_width = entries
        .iter()
        .map(|s| swatch + size * 0.4 + text_width(&s.name, size) + size)
        .fold(0.0, f64::max);
    let total_width = column_width * columns as f64;
    let x0 = match legend.position {
        LegendPosition::Bottom => plot.left + (plot.width - total_width) / 2.0,
        LegendPosition::TopRight => plot.left + plot.width - total_width,
    };

    let mut y = y;
    if let Some(title) = &legend.title {
        doc.text(
            "legend-title",
            x0 + total_width / 2.0,
            y + size * 0.5,
            title,
            TextStyle::new(size).anchor(Anchor::Middle),
        );
        y += size * 1.5;
    }

    for (i, series) in entries.iter().enumerate() {
        let row = (i / columns) as f64;
        let col = (i % columns) as f64;
        let x = x0 + col * column_width;
        let cy = y + row * size * 1.4 + size * 0.7;
        doc.rect(
            "legend-swatch",
            x,
            cy - swatch / 2.0,
            swatch,
            swatch,
            Fill::new(series.fill, series.opacity),
            None,
        );
        doc.text(
            "legend-label",
            x + swatch + size * 0.4,
            cy,
            &series.name,
            TextStyle::new(size),
        );
    }
}
