//! # gridmark-survey
//!
//! Survey spreadsheets in, chart-ready numbers out.
//!
//! - [`SurveyWorkbook`] reads cell values from `.xlsx` exports
//! - [`Question`] describes the fixed sheet layout of each question
//! - [`aggregate_question`] averages every category, applying
//!   [`balance_transform`] to the reverse-coded Balance items
//! - [`extract_department`] and [`statement_distribution`] feed the
//!   department insights chart
//!
//! ## Example
//!
//! ```rust
//! use gridmark_survey::{balance_transform, mean};
//!
//! let prepared = balance_transform(&[4.0, 1.0, 2.0, 5.0]).unwrap();
//! assert_eq!(prepared, [4.0, 5.0, 4.0, 3.0]);
//! assert_eq!(mean(&prepared), Some(4.0));
//! ```

pub mod aggregate;
pub mod error;
pub mod insights;
pub mod question;
pub mod workbook;

pub use aggregate::{
    aggregate_question, balance_transform, mean, read_category, score_category, CategoryScore,
    QuestionScores,
};
pub use error::{SurveyError, SurveyResult};
pub use insights::{
    extract_department, insight_sheets, statement_distribution, statements, Distribution,
    InsightSheet, StatementRow, RESPONSE_LABELS,
};
pub use question::{CategorySpec, Question, Transform, VALUE_COLUMN};
pub use workbook::{CellValue, Sheet, SurveyWorkbook};
