//! Data series types

use gridmark_core::Color;

/// Value labels drawn next to a series' bars
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueLabels {
    /// Shift along the value axis, applied to the value before placing the label
    pub offset: f64,
    /// Font size in points
    pub font_size: f64,
}

impl ValueLabels {
    /// Labels placed `offset` away from the bar end
    pub fn at_offset(offset: f64) -> Self {
        Self {
            offset,
            font_size: 17.0,
        }
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }
}

/// Data series for a chart
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataSeries {
    /// Series name
    pub name: String,
    /// Values, one per category for bar charts
    pub values: Vec<f64>,
    /// Fill colour
    pub fill: Color,
    /// Fill opacity in `0.0..=1.0`
    pub opacity: f64,
    /// Whether the series gets a legend entry
    pub in_legend: bool,
    /// Optional value labels
    pub labels: Option<ValueLabels>,
}

impl DataSeries {
    /// Create a new data series
    pub fn new<S: Into<String>>(name: S, values: Vec<f64>, fill: Color) -> Self {
        Self {
            name: name.into(),
            values,
            fill,
            opacity: 1.0,
            in_legend: true,
            labels: None,
        }
    }

    /// Set fill opacity (clamped to `0.0..=1.0`)
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Show value labels
    pub fn with_labels(mut self, labels: ValueLabels) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Leave the series out of the legend
    pub fn hidden_from_legend(mut self) -> Self {
        self.in_legend = false;
        self
    }

    /// Largest value, `None` for an empty series
    pub fn max_value(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }
}
