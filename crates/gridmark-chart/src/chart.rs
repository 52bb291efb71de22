//! Chart types

use crate::axis::Axis;
use crate::error::{ChartError, ChartResult};
use crate::legend::Legend;
use crate::series::DataSeries;

/// Chart types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChartType {
    /// Polar chart with one wedge per series filling its whole segment
    PolarBar,
    /// Polar chart where each series' segment is split into one sub-bar per value
    PolarDetail,
    /// Horizontal bars, one per category, with the series stacked left to right
    BarStacked,
}

impl ChartType {
    pub fn is_polar(self) -> bool {
        matches!(self, ChartType::PolarBar | ChartType::PolarDetail)
    }
}

/// Physical size of the rendered document
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartSize {
    /// Width in inches
    pub width: f64,
    /// Height in inches
    pub height: f64,
    /// Export resolution
    pub dpi: u32,
}

impl ChartSize {
    /// Default export resolution
    pub const DEFAULT_DPI: u32 = 600;

    pub fn inches(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            dpi: Self::DEFAULT_DPI,
        }
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Pixel width at the export resolution
    pub fn pixel_width(&self) -> u32 {
        (self.width * self.dpi as f64).round() as u32
    }

    /// Pixel height at the export resolution
    pub fn pixel_height(&self) -> u32 {
        (self.height * self.dpi as f64).round() as u32
    }

    /// Width in points (the drawing coordinate space)
    pub fn width_points(&self) -> f64 {
        self.width * 72.0
    }

    /// Height in points
    pub fn height_points(&self) -> f64 {
        self.height * 72.0
    }
}

/// Chart definition
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chart {
    /// Chart type
    pub chart_type: ChartType,
    /// Chart title
    pub title: Option<String>,
    /// Category labels (bar charts: one bar per category)
    pub categories: Vec<String>,
    /// Data series
    pub series: Vec<DataSeries>,
    /// Category axis
    pub category_axis: Option<Axis>,
    /// Value axis (radial for polar charts)
    pub value_axis: Option<Axis>,
    /// Legend
    pub legend: Option<Legend>,
    /// Document size
    pub size: ChartSize,
}

impl Chart {
    /// Create a new chart
    ///
    /// Polar charts default to 8 x 8 in, bar charts to 12 x 8 in.
    pub fn new(chart_type: ChartType) -> Self {
        let size = if chart_type.is_polar() {
            ChartSize::inches(8.0, 8.0)
        } else {
            ChartSize::inches(12.0, 8.0)
        };
        Self {
            chart_type,
            title: None,
            categories: Vec::new(),
            series: Vec::new(),
            category_axis: None,
            value_axis: None,
            legend: None,
            size,
        }
    }

    /// Set chart title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_category_axis(mut self, axis: Axis) -> Self {
        self.category_axis = Some(axis);
        self
    }

    pub fn with_value_axis(mut self, axis: Axis) -> Self {
        self.value_axis = Some(axis);
        self
    }

    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = Some(legend);
        self
    }

    pub fn with_size(mut self, size: ChartSize) -> Self {
        self.size = size;
        self
    }

    /// Add a data series
    pub fn add_series(&mut self, series: DataSeries) {
        self.series.push(series);
    }

    /// Value range of the plot
    ///
    /// Taken from the value axis; a missing bound falls back to 0 and to
    /// the largest value (or stacked total for bar charts).
    pub fn value_bounds(&self) -> (f64, f64) {
        let axis = self.value_axis.as_ref();
        let min = axis.and_then(|a| a.minimum).unwrap_or(0.0);
        let max = axis.and_then(|a| a.maximum).unwrap_or_else(|| self.data_max());
        (min, max)
    }

    fn data_max(&self) -> f64 {
        let max = match self.chart_type {
            ChartType::BarStacked => (0..self.categories.len())
                .map(|i| {
                    self.series
                        .iter()
                        .filter_map(|s| s.values.get(i))
                        .sum::<f64>()
                })
                .fold(0.0, f64::max),
            _ => self
                .series
                .iter()
                .filter_map(DataSeries::max_value)
                .fold(0.0, f64::max),
        };
        if max > 0.0 {
            max
        } else {
            1.0
        }
    }

    /// Check that the chart can be rendered
    pub fn validate(&self) -> ChartResult<()> {
        let size = self.size;
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(size.width) || !positive(size.height) || size.dpi == 0 {
            return Err(ChartError::InvalidSize {
                width: size.width,
                height: size.height,
            });
        }

        if self.series.is_empty() {
            return Err(ChartError::NoSeries);
        }

        for series in &self.series {
            if series.values.iter().any(|v| !v.is_finite()) {
                return Err(ChartError::NonFinite {
                    series: series.name.clone(),
                });
            }
            match self.chart_type {
                ChartType::BarStacked => {
                    if series.values.len() != self.categories.len() {
                        return Err(ChartError::LengthMismatch {
                            series: series.name.clone(),
                            expected: self.categories.len(),
                            found: series.values.len(),
                        });
                    }
                }
                ChartType::PolarBar | ChartType::PolarDetail => {
                    if series.values.is_empty() {
                        return Err(ChartError::EmptySeries(series.name.clone()));
                    }
                }
            }
        }

        let (min, max) = self.value_bounds();
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ChartError::InvalidBounds { min, max });
        }

        Ok(())
    }
}
