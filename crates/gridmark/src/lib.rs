//! # gridmark
//!
//! Grid-positioned project markers for presentations, and charts for
//! survey results.
//!
//! ## Features
//!
//! - Read the lookup table of every slide of a `.pptx` file
//! - Place one coloured, labelled marker per project on a grid slide
//! - Keep department colours stable across runs
//! - Average survey categories from `.xlsx` exports and render polar and
//!   stacked bar charts as SVG
//!
//! ## Example
//!
//! ```rust
//! use gridmark::prelude::*;
//!
//! let table = SourceTable::new(
//!     SlideId(1),
//!     vec![vec!["AFKORTING", "SPF", "TITEL"], vec!["FI01", "C14", "Ledger"]],
//! );
//!
//! let mut colors = DepartmentColorTable::new();
//! let mut writer = MemoryWriter::new();
//! let run = run_bullets(&[table], &BulletOptions::default(), &mut colors, &mut writer).unwrap();
//!
//! assert_eq!(run.markers(), 1);
//! assert_eq!(writer.slides()[0].markers[0].label, "FI01");
//!
//! // Writing a presentation file:
//! // generate_bullet_deck(Path::new("deck.pptx"), None, &BulletOptions::default(), &mut colors)?;
//! ```

pub mod charts;
pub mod error;
pub mod pipeline;
pub mod prelude;

pub use charts::{
    chart_file_name, department_from_path, detail_charts, insights_chart, load_insights,
    polar_chart, LIGHT_PALETTE, RESPONSE_PALETTE, STRONG_PALETTE,
};
pub use error::{Error, Result};
pub use pipeline::{
    default_output_path, generate_bullet_deck, preview_bullets, run_bullets, BulletDeck,
    BulletOptions, BulletRun, SlideLayout, SlideSummary, DEFAULT_OUTPUT_NAME,
};

// Re-export core types
pub use gridmark_core::{
    Category, Color, Department, DepartmentColorTable, DropPolicy, DropReport, GridConfig,
    GridReference, HeaderVocabulary, LengthUnit, Marker, MemoryWriter, PresentationWriter,
    ProjectRecord, SlideId, SourceTable,
};

// Re-export I/O types
pub use gridmark_pptx::{PptxError, PptxReader, PptxWriter};
pub use gridmark_survey::{
    aggregate_question, balance_transform, statement_distribution, statements, Question,
    QuestionScores, SurveyError, SurveyWorkbook,
};

// Re-export chart types
pub use gridmark_chart::{Chart, ChartError, ChartFormat, ChartType, SvgRenderer};
