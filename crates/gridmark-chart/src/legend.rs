//! Legend types

/// Chart legend
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Legend {
    /// Position
    pub position: LegendPosition,
    /// Title shown above the entries
    pub title: Option<String>,
    /// Entries per row
    pub columns: usize,
    /// Font size in points
    pub font_size: f64,
}

impl Legend {
    /// Create a new legend
    pub fn new(position: LegendPosition) -> Self {
        Self {
            position,
            title: None,
            columns: 1,
            font_size: 18.0,
        }
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Lay entries out in rows of `columns` (at least 1)
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }
}

impl Default for Legend {
    fn default() -> Self {
        Self::new(LegendPosition::default())
    }
}

/// Legend position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LegendPosition {
    #[default]
    TopRight,
    /// Centered below the plot area
    Bottom,
}
