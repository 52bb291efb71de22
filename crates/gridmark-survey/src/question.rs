//! The fixed question catalog
//!
//! Every question lives on its own sheet ("Question 4" .. "Question 8").
//! Item scores sit in column M; each category owns a fixed block of rows.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::error::SurveyError;

/// Column holding item scores (0-based, "M")
pub const VALUE_COLUMN: u32 = 12;

/// How a category's raw values are prepared before averaging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Average the raw values
    Identity,
    /// Reverse-coded "Balance" items: `[v0, v3, 5 - v1, 5 - v2]`
    Balance,
}

/// One category of a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpec {
    /// Display name
    pub name: &'static str,
    /// Rows holding the category's items (0-based, end-exclusive)
    pub rows: Range<u32>,
    /// Preparation applied before averaging
    pub transform: Transform,
}

impl CategorySpec {
    const fn plain(name: &'static str, start: u32, end: u32) -> Self {
        Self {
            name,
            rows: start..end,
            transform: Transform::Identity,
        }
    }
}

/// A survey question with a fixed sheet layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Question {
    Q4,
    Q5,
    Q6,
    Q7,
    Q8,
}

impl Question {
    /// Every question in order
    pub const ALL: [Question; 5] = [
        Question::Q4,
        Question::Q5,
        Question::Q6,
        Question::Q7,
        Question::Q8,
    ];

    /// Question number as printed on the sheet tab
    pub fn number(self) -> u8 {
        match self {
            Question::Q4 => 4,
            Question::Q5 => 5,
            Question::Q6 => 6,
            Question::Q7 => 7,
            Question::Q8 => 8,
        }
    }

    /// Sheet holding the question's data
    pub fn sheet_name(self) -> String {
        format!("Question {}", self.number())
    }

    /// Theme the question measures
    pub fn title(self) -> &'static str {
        match self {
            Question::Q4 => "Portfolio Success",
            Question::Q5 => "Effectiveness",
            Question::Q6 => "Decision Making",
            Question::Q7 => "Input Processes",
            Question::Q8 => "Collective Ambition",
        }
    }

    /// Categories in chart order
    pub fn categories(self) -> Vec<CategorySpec> {
        match self {
            Question::Q4 => vec![
                CategorySpec::plain("Strategic Alignment", 3, 7),
                CategorySpec {
                    name: "Balance",
                    rows: 7..11,
                    transform: Transform::Balance,
                },
                CategorySpec::plain("Maximal Value", 11, 15),
            ],
            Question::Q5 => vec![
                CategorySpec::plain("Portfolio Mindset", 3, 8),
                CategorySpec::plain("Focus", 8, 12),
                CategorySpec::plain("Agility", 12, 16),
            ],
            Question::Q6 => vec![
                CategorySpec::plain("Evidence", 3, 7),
                CategorySpec::plain("Informal Power", 7, 11),
                CategorySpec::plain("Opinion", 11, 15),
            ],
            Question::Q7 => vec![
                CategorySpec::plain("Cross-functional collaboration", 3, 7),
                CategorySpec::plain("Critical thinking", 7, 11),
                CategorySpec::plain("Market immersion", 11, 15),
            ],
            Question::Q8 => vec![CategorySpec::plain("Culture", 3, 7)],
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Question {}", self.number())
    }
}

impl FromStr for Question {
    type Err = SurveyError;

    /// Accepts "4", "Q4" or "Question 4" (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let digits = lower
            .strip_prefix("question")
            .or_else(|| lower.strip_prefix('q'))
            .unwrap_or(&lower)
            .trim();

        Question::ALL
            .into_iter()
            .find(|q| digits == q.number().to_string())
            .ok_or_else(|| SurveyError::UnknownQuestion(s.to_string()))
    }
}
