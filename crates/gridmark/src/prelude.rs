//! Prelude module - common imports for gridmark users
//!
//! ```rust
//! use gridmark::prelude::*;
//! ```

pub use crate::{
    // Pipelines
    generate_bullet_deck,
    preview_bullets,
    run_bullets,
    BulletOptions,
    BulletRun,
    SlideLayout,

    // Core types
    Color,
    DepartmentColorTable,
    DropPolicy,
    GridConfig,
    LengthUnit,
    MemoryWriter,
    PresentationWriter,
    SlideId,
    SourceTable,

    // Survey and charts
    aggregate_question,
    detail_charts,
    ChartFormat,
    insights_chart,
    polar_chart,
    Question,
    SurveyWorkbook,
    SvgRenderer,

    // Error types
    Error,
    Result,
};
