//! # gridmark-chart
//!
//! Chart model and SVG rendering for gridmark.
//!
//! A [`Chart`] holds a type, data series, axes and a legend. The
//! [`SvgRenderer`] turns it into a standalone SVG document sized in inches
//! at an export DPI.
//!
//! ## Example
//!
//! ```rust
//! use gridmark_chart::{Axis, Chart, ChartType, DataSeries, SvgRenderer};
//! use gridmark_core::Color;
//!
//! let mut chart = Chart::new(ChartType::PolarBar)
//!     .with_value_axis(Axis::new().with_bounds(0.0, 5.0).with_major_unit(1.0));
//! chart.add_series(DataSeries::new("Focus", vec![3.5], Color::rgb(0x7C, 0xAE, 0xAD)));
//!
//! let svg = SvgRenderer::new().render(&chart).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

mod axis;
mod chart;
mod error;
mod legend;
mod series;
mod svg;

pub use axis::{Axis, AxisPosition, Gridlines};
pub use chart::{Chart, ChartSize, ChartType};
pub use error::{ChartError, ChartResult};
pub use legend::{Legend, LegendPosition};
pub use series::{DataSeries, ValueLabels};
pub use svg::{ChartFormat, SvgRenderer};
