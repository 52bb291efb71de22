//! Survey scores to charts
//!
//! Builders for the three chart kinds: the polar average chart, one detail
//! chart per category, and the department insights bar chart.

use std::path::{Path, PathBuf};

use gridmark_chart::{
    Axis, AxisPosition, Chart, ChartFormat, ChartType, DataSeries, Gridlines, Legend,
    LegendPosition, ValueLabels,
};
use gridmark_core::Color;
use gridmark_survey::{
    extract_department, Distribution, QuestionScores, StatementRow, SurveyWorkbook,
    RESPONSE_LABELS,
};
use tracing::{debug, info_span};

use crate::error::Result;

/// Category colours of the polar charts
pub const STRONG_PALETTE: [Color; 3] = [
    Color::rgb(0x7C, 0xAE, 0xAD),
    Color::rgb(0x91, 0x76, 0x70),
    Color::rgb(0xCD, 0xB4, 0x86),
];

/// Muted category colours for the non-highlighted detail segments
pub const LIGHT_PALETTE: [Color; 3] = [
    Color::rgb(0xC0, 0xE4, 0xE0),
    Color::rgb(0xD6, 0xCC, 0xC8),
    Color::rgb(0xE4, 0xD9, 0xD3),
];

/// Response colours, Strongly Disagree to Strongly Agree
pub const RESPONSE_PALETTE: [Color; 5] = [
    Color::rgb(0xC0, 0x00, 0x00),
    Color::rgb(0xDE, 0x7E, 0x35),
    Color::rgb(0xFF, 0xFB, 0xB9),
    Color::rgb(0xA7, 0xC2, 0x3D),
    Color::rgb(0x4F, 0x7A, 0x27),
];

const BAR_OPACITY: f64 = 0.75;

fn radial_axis() -> Axis {
    Axis::new()
        .with_bounds(0.0, 5.0)
        .with_major_unit(1.0)
        .without_tick_labels()
        .with_gridlines(Gridlines::solid(0.75))
        .with_position(AxisPosition::Radial)
}

/// Polar chart with one bar per category at the category average
pub fn polar_chart(scores: &QuestionScores) -> Chart {
    let mut chart = Chart::new(ChartType::PolarBar)
        .with_value_axis(radial_axis())
        .with_legend(Legend::new(LegendPosition::TopRight).with_font_size(20.0));

    for (i, category) in scores.categories.iter().enumerate() {
        chart.add_series(
            DataSeries::new(
                category.name.clone(),
                vec![category.average],
                STRONG_PALETTE[i % STRONG_PALETTE.len()],
            )
            .with_opacity(BAR_OPACITY)
            .with_labels(ValueLabels::at_offset(-1.0).with_font_size(20.0)),
        );
    }
    chart
}

/// One detail chart per category, each highlighting that category
///
/// Every chart shows all raw item values; only the highlighted category
/// uses the strong colour, carries value labels and appears in the legend.
pub fn detail_charts(scores: &QuestionScores) -> Vec<(String, Chart)> {
    (0..scores.categories.len())
        .map(|k| {
            let highlighted = &scores.categories[k];
            let mut chart = Chart::new(ChartType::PolarDetail)
                .with_value_axis(radial_axis())
                .with_legend(Legend::new(LegendPosition::TopRight));

            for (i, category) in scores.categories.iter().enumerate() {
                let series = if i == k {
                    DataSeries::new(
                        category.name.clone(),
                        category.raw.clone(),
                        STRONG_PALETTE[i % STRONG_PALETTE.len()],
                    )
                    .with_labels(ValueLabels::at_offset(-0.75))
                } else {
                    DataSeries::new(
                        category.name.clone(),
                        category.raw.clone(),
                        LIGHT_PALETTE[i % LIGHT_PALETTE.len()],
                    )
                    .hidden_from_legend()
                };
                chart.add_series(series.with_opacity(BAR_OPACITY));
            }

            (highlighted.name.clone(), chart)
        })
        .collect()
}

/// Stacked bar chart of how each department answered `statement`
pub fn insights_chart(statement: &str, distributions: &[Distribution]) -> Chart {
    let mut chart = Chart::new(ChartType::BarStacked)
        .with_title(statement)
        .with_categories(distributions.iter().map(|d| d.department.clone()))
        .with_category_axis(
            Axis::new()
                .with_title("Department")
                .with_position(AxisPosition::Left),
        )
        .with_value_axis(
            Axis::new()
                .with_title("Percentage of Responses")
                .with_bounds(0.0, 100.0)
                .with_major_unit(10.0)
                .with_tick_suffix("%")
                .with_gridlines(Gridlines::dashed(0.5)),
        )
        .with_legend(
            Legend::new(LegendPosition::Bottom)
                .with_title("Response")
                .with_columns(RESPONSE_LABELS.len())
                .with_font_size(11.0),
        );

    for (j, label) in RESPONSE_LABELS.iter().enumerate() {
        let values = distributions.iter().map(|d| d.percentages[j]).collect();
        chart.add_series(DataSeries::new(*label, values, RESPONSE_PALETTE[j]));
    }
    chart
}

/// Statement rows of several department workbooks
///
/// Each input pairs a department name with its workbook.
pub fn load_insights<P: AsRef<Path>>(inputs: &[(String, P)]) -> Result<Vec<StatementRow>> {
    let span = info_span!("insights", workbooks = inputs.len());
    let _enter = span.enter();

    let mut rows = Vec::new();
    for (department, path) in inputs {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(gridmark_core::Error::InputNotFound(path.display().to_string()).into());
        }
        let workbook = SurveyWorkbook::open(path)?;
        rows.extend(extract_department(&workbook, department)?);
    }
    debug!(rows = rows.len(), "statement rows loaded");
    Ok(rows)
}

/// Department name taken from a workbook's file stem
pub fn department_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// File name for a chart: `kind` and the parts, joined by `_`
///
/// Characters outside `[A-Za-z0-9-]` become `_`.
pub fn chart_file_name(kind: &str, parts: &[&str], format: ChartFormat) -> PathBuf {
    let mut name = kind.to_string();
    for part in parts {
        name.push('_');
        name.extend(part.chars().map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' }));
    }
    name.push('.');
    name.push_str(format.extension());
    PathBuf::from(name)
}
