//! Grid references

use crate::config::GridConfig;
use crate::error::{Error, Result};
use crate::MAX_GRID_COLS;
use std::fmt;
use std::str::FromStr;

/// A grid cell in chessboard notation (e.g., "C14")
///
/// A reference is exactly one column letter followed by a positive row
/// number. Both coordinates are 1-based: "A1" is the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridReference {
    /// Row number (1-based)
    pub row: u32,
    /// Column number (1-based, A=1 .. Z=26)
    pub column: u32,
}

impl GridReference {
    /// Create a reference from 1-based row and column numbers
    pub fn new(row: u32, column: u32) -> Result<Self> {
        if row == 0 {
            return Err(Error::InvalidReference("row number must be >= 1".into()));
        }
        if column == 0 || column > MAX_GRID_COLS {
            return Err(Error::InvalidReference(format!(
                "column number {} outside A..Z",
                column
            )));
        }
        Ok(Self { row, column })
    }

    /// Parse a reference such as "C14"
    ///
    /// The column letter is case-insensitive and surrounding whitespace is
    /// ignored.
    ///
    /// # Examples
    /// ```
    /// use gridmark_core::GridReference;
    ///
    /// let cell = GridReference::parse("C14").unwrap();
    /// assert_eq!(cell.row, 14);
    /// assert_eq!(cell.column, 3);
    /// assert_eq!(cell.to_string(), "C14");
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut chars = s.chars();

        let letter = match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => c.to_ascii_uppercase(),
            Some(_) => {
                return Err(Error::InvalidReference(format!(
                    "'{}' does not start with a column letter",
                    s
                )))
            }
            None => return Err(Error::InvalidReference("empty reference".into())),
        };
        let column = letter as u32 - 'A' as u32 + 1;

        let row_str = chars.as_str();
        if row_str.is_empty() {
            return Err(Error::InvalidReference(format!("no row number in '{}'", s)));
        }
        if !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidReference(format!(
                "invalid row number in '{}'",
                s
            )));
        }

        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidReference(format!("row number too large in '{}'", s)))?;

        Self::new(row, column)
    }

    /// The column letter ('A'..='Z')
    pub fn column_letter(&self) -> char {
        (b'A' + (self.column - 1) as u8) as char
    }

    /// Format as chessboard notation
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", self.column_letter(), self.row)
    }

    /// Whether the reference lies inside the configured grid
    pub fn is_within(&self, config: &GridConfig) -> bool {
        (1..=config.rows).contains(&self.row) && (1..=config.cols).contains(&self.column)
    }
}

impl fmt::Display for GridReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for GridReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
