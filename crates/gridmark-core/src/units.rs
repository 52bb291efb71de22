//! Length units and conversions
//!
//! Grid dimensions are entered in centimetres or points. Placement works in
//! points; PresentationML stores English Metric Units (EMU).

/// Centimetres per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// EMUs per point
pub const EMU_PER_POINT: f64 = 12_700.0;

/// Unit in which grid cell dimensions are configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LengthUnit {
    /// Centimetres (the default input unit)
    #[default]
    Centimeters,
    /// Typographic points (1/72 inch)
    Points,
}

impl LengthUnit {
    /// Convert a length in this unit to points
    pub fn to_points(self, value: f64) -> f64 {
        match self {
            LengthUnit::Centimeters => cm_to_points(value),
            LengthUnit::Points => value,
        }
    }
}

impl std::str::FromStr for LengthUnit {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cm" | "centimeters" | "centimetres" => Ok(LengthUnit::Centimeters),
            "pt" | "points" => Ok(LengthUnit::Points),
            other => Err(crate::Error::InvalidConfig(format!(
                "unknown length unit '{}'",
                other
            ))),
        }
    }
}

/// Convert centimetres to points
pub fn cm_to_points(cm: f64) -> f64 {
    cm / CM_PER_INCH * POINTS_PER_INCH
}

/// Convert points to EMUs, rounded to the nearest unit
pub fn points_to_emu(points: f64) -> i64 {
    (points * EMU_PER_POINT).round() as i64
}
