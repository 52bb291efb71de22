//! # gridmark-core
//!
//! Core types for the gridmark bullet-placement engine.
//!
//! This crate turns lookup tables into positioned, colored markers:
//! - [`TableScanner`] - reads [`ProjectRecord`]s from slide tables
//! - [`GridMapper`] - decodes [`GridReference`]s and drops out-of-grid rows
//! - [`BulletPlacer`] - lays markers out inside their cells
//! - [`DepartmentColorTable`] - stable first-seen colors per [`Department`]
//! - [`DepartmentGrouper`] - groups same-department markers
//! - [`PresentationWriter`] - the output capability, with [`MemoryWriter`]
//!
//! ## Example
//!
//! ```rust
//! use gridmark_core::{
//!     BulletPlacer, DepartmentColorTable, DropPolicy, DropReport, GridConfig, GridMapper,
//!     SlideId, SourceTable, TableScanner,
//! };
//!
//! let table = SourceTable::new(
//!     SlideId(1),
//!     vec![vec!["AFKORTING", "SPF"], vec!["FI01", "C14"], vec!["FI02", "C14"]],
//! );
//!
//! let config = GridConfig::default();
//! let mut report = DropReport::new();
//! let records = TableScanner::default().scan(&[table], &mut report);
//! let mapped = GridMapper::new(&config, DropPolicy::Silent).map_all(&records, &mut report);
//!
//! let mut colors = DepartmentColorTable::new();
//! let mut placer = BulletPlacer::new(&config);
//! for placement in placer.place_all(&mapped) {
//!     let fill = colors.color_for(placement.record.department());
//!     println!("{} at ({:.1}, {:.1}) in {}", placement.record.code, placement.x, placement.y, fill);
//! }
//! assert!(report.is_empty());
//! ```

pub mod color;
pub mod config;
pub mod drops;
pub mod error;
pub mod grid;
pub mod group;
pub mod mapper;
pub mod palette;
pub mod placement;
pub mod record;
pub mod scanner;
pub mod units;
pub mod writer;

// Re-exports for convenience
pub use color::Color;
pub use config::GridConfig;
pub use drops::{DropPolicy, DropReason, DropReport};
pub use error::{Error, Result};
pub use grid::GridReference;
pub use group::{DepartmentGrouper, MarkerGroup};
pub use mapper::{GridMapper, MappedRecord};
pub use palette::DepartmentColorTable;
pub use placement::{BulletPlacer, CellOccupancy, MarkerSlot, Placement, Placements};
pub use record::{Category, Department, ProjectRecord, SlideId};
pub use scanner::{HeaderVocabulary, SourceTable, TableScanner};
pub use units::LengthUnit;
pub use writer::{
    Marker, MarkerLink, MemoryWriter, PresentationWriter, RecordedGroup, RecordedSlide,
    ShapeHandle, SlideHandle,
};

/// Maximum number of grid columns (one letter each, A..Z)
pub const MAX_GRID_COLS: u32 = 26;
