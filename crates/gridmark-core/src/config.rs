//! Grid configuration

use crate::error::{Error, Result};
use crate::units::LengthUnit;
use crate::MAX_GRID_COLS;

/// Dimensions of the marker grid drawn on an output slide
///
/// `cell_width` and `cell_height` are expressed in `unit`; the marker
/// diameter, origin and label font size are always in points.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Number of grid rows
    pub rows: u32,
    /// Number of grid columns (at most 26, one letter each)
    pub cols: u32,
    /// Width of one cell
    pub cell_width: f64,
    /// Height of one cell
    pub cell_height: f64,
    /// Unit of `cell_width` / `cell_height`
    pub unit: LengthUnit,
    /// Marker diameter in points
    pub marker_diameter: f64,
    /// Left edge of the grid in points
    pub origin_x: f64,
    /// Top edge of the grid in points
    pub origin_y: f64,
    /// Font size of the marker label in points
    pub label_font_size: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 23,
            cols: 15,
            cell_width: 1.62,
            cell_height: 0.7,
            unit: LengthUnit::Centimeters,
            marker_diameter: 9.0,
            origin_x: 10.0,
            origin_y: 10.0,
            label_font_size: 4.0,
        }
    }
}

impl GridConfig {
    /// Create a configuration with the given grid size and cell dimensions (cm)
    pub fn new(rows: u32, cols: u32, cell_width: f64, cell_height: f64) -> Self {
        Self {
            rows,
            cols,
            cell_width,
            cell_height,
            ..Default::default()
        }
    }

    /// Set the marker diameter (points)
    pub fn with_marker_diameter(mut self, diameter: f64) -> Self {
        self.marker_diameter = diameter;
        self
    }

    /// Set the unit used for cell dimensions
    pub fn with_unit(mut self, unit: LengthUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Check that every dimension is usable
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 {
            return Err(Error::InvalidConfig("rows must be at least 1".into()));
        }
        if self.cols == 0 || self.cols > MAX_GRID_COLS {
            return Err(Error::InvalidConfig(format!(
                "cols must be between 1 and {} (got {})",
                MAX_GRID_COLS, self.cols
            )));
        }

        let lengths = [
            ("cell_width", self.cell_width),
            ("cell_height", self.cell_height),
            ("marker_diameter", self.marker_diameter),
            ("label_font_size", self.label_font_size),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a positive number (got {})",
                    name, value
                )));
            }
        }

        if !self.origin_x.is_finite() || !self.origin_y.is_finite() {
            return Err(Error::InvalidConfig("origin must be finite".into()));
        }

        Ok(())
    }

    /// Cell width converted to points
    pub fn cell_width_points(&self) -> f64 {
        self.unit.to_points(self.cell_width)
    }

    /// Cell height converted to points
    pub fn cell_height_points(&self) -> f64 {
        self.unit.to_points(self.cell_height)
    }

    /// Total grid width in points
    pub fn grid_width_points(&self) -> f64 {
        self.cell_width_points() * self.cols as f64
    }

    /// Total grid height in points
    pub fn grid_height_points(&self) -> f64 {
        self.cell_height_points() * self.rows as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GridConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rows, 23);
        assert_eq!(config.cols, 15);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(GridConfig::new(0, 5, 1.0, 1.0).validate().is_err());
        assert!(GridConfig::new(5, 27, 1.0, 1.0).validate().is_err());
        assert!(GridConfig::new(5, 5, -1.0, 1.0).validate().is_err());
        assert!(GridConfig::new(5, 5, 1.0, f64::NAN).validate().is_err());
        assert!(GridConfig::new(5, 5, 1.0, 1.0)
            .with_marker_diameter(0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_cell_size_in_points() {
        let config = GridConfig::new(2, 2, 2.54, 2.54);
        assert!((config.cell_width_points() - 72.0).abs() < 1e-9);
        assert!((config.grid_height_points() - 144.0).abs() < 1e-9);

        let config = config.with_unit(LengthUnit::Points);
        assert_eq!(config.cell_width_points(), 2.54);
    }
}
