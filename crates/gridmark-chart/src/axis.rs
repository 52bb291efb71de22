//! Axis types

/// Chart axis
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Axis {
    /// Axis title
    pub title: Option<String>,
    /// Minimum value
    pub minimum: Option<f64>,
    /// Maximum value
    pub maximum: Option<f64>,
    /// Distance between ticks and grid lines
    pub major_unit: Option<f64>,
    /// Text appended to every tick label (e.g. "%")
    pub tick_suffix: Option<String>,
    /// Whether tick labels are drawn
    pub tick_labels: bool,
    /// Grid lines at every major unit
    pub gridlines: Option<Gridlines>,
    /// Position
    pub position: AxisPosition,
}

impl Axis {
    /// Create a new axis
    pub fn new() -> Self {
        Self {
            tick_labels: true,
            ..Self::default()
        }
    }

    /// Set axis title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set axis bounds
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.minimum = Some(min);
        self.maximum = Some(max);
        self
    }

    pub fn with_major_unit(mut self, unit: f64) -> Self {
        self.major_unit = Some(unit);
        self
    }

    pub fn with_tick_suffix<S: Into<String>>(mut self, suffix: S) -> Self {
        self.tick_suffix = Some(suffix.into());
        self
    }

    pub fn without_tick_labels(mut self) -> Self {
        self.tick_labels = false;
        self
    }

    pub fn with_gridlines(mut self, gridlines: Gridlines) -> Self {
        self.gridlines = Some(gridlines);
        self
    }

    pub fn with_position(mut self, position: AxisPosition) -> Self {
        self.position = position;
        self
    }

    /// Tick positions from the minimum to the maximum, both included
    ///
    /// Empty unless bounds and a positive major unit are set.
    pub fn ticks(&self) -> Vec<f64> {
        let (Some(min), Some(max), Some(unit)) = (self.minimum, self.maximum, self.major_unit) else {
            return Vec::new();
        };
        if unit <= 0.0 || max < min {
            return Vec::new();
        }
        let steps = ((max - min) / unit + 1e-9).floor() as usize;
        (0..=steps).map(|i| min + i as f64 * unit).collect()
    }

    /// Tick label text
    pub fn tick_label(&self, value: f64) -> String {
        let number = if value.fract() == 0.0 {
            format!("{}", value as i64)
        } else {
            format!("{}", value)
        };
        match &self.tick_suffix {
            Some(suffix) => format!("{}{}", number, suffix),
            None => number,
        }
    }
}

/// Grid line style
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gridlines {
    /// Stroke width in points
    pub width: f64,
    pub dashed: bool,
}

impl Gridlines {
    pub fn solid(width: f64) -> Self {
        Self {
            width,
            dashed: false,
        }
    }

    pub fn dashed(width: f64) -> Self {
        Self { width, dashed: true }
    }
}

/// Axis position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisPosition {
    #[default]
    Bottom,
    Left,
    /// Radial axis of a polar chart
    Radial,
}
