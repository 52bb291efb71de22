//! Bullet Placer: marker positions inside grid cells
//!
//! Markers that share a cell are laid out left to right in rows of
//! [`MARKERS_PER_ROW`]. Only [`VISIBLE_MARKERS_PER_CELL`] distinct slots exist;
//! the 11th marker in a cell lands exactly on the 1st, the 12th on the 2nd,
//! and so on.

use ahash::AHashMap;

use crate::config::GridConfig;
use crate::grid::GridReference;
use crate::mapper::MappedRecord;
use crate::record::ProjectRecord;

/// Markers per row inside a cell
pub const MARKERS_PER_ROW: u32 = 5;

/// Distinct marker slots per cell before positions repeat
pub const VISIBLE_MARKERS_PER_CELL: u32 = 10;

/// Markers already placed per cell
///
/// Counts only grow; start a new counter for every output slide.
#[derive(Debug, Clone, Default)]
pub struct CellOccupancy {
    counts: AHashMap<GridReference, u32>,
}

impl CellOccupancy {
    /// Create an empty counter
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the zero-based slot for the next marker in `cell` and count it
    pub fn next_slot(&mut self, cell: GridReference) -> u32 {
        let count = self.counts.entry(cell).or_insert(0);
        let slot = *count;
        *count += 1;
        slot
    }

    /// Markers placed in `cell` so far
    pub fn count(&self, cell: GridReference) -> u32 {
        self.counts.get(&cell).copied().unwrap_or(0)
    }

    /// Total markers placed
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }
}

/// Where a marker sits within its cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerSlot {
    /// Zero-based arrival order within the cell
    pub slot_index: u32,
    /// `slot_index` folded onto the visible slots
    pub visible_index: u32,
    /// Row inside the cell (0 or 1)
    pub sub_row: u32,
    /// Column inside the cell (0..5)
    pub sub_col: u32,
}

impl MarkerSlot {
    /// Lay out the marker that arrived `slot_index`-th in its cell
    pub fn from_slot_index(slot_index: u32) -> Self {
        let visible_index = slot_index % VISIBLE_MARKERS_PER_CELL;
        Self {
            slot_index,
            visible_index,
            sub_row: visible_index / MARKERS_PER_ROW,
            sub_col: visible_index % MARKERS_PER_ROW,
        }
    }
}

/// A positioned marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement<'a> {
    /// Record the marker stands for
    pub record: &'a ProjectRecord,
    /// Cell the marker belongs to
    pub cell: GridReference,
    /// Slot within the cell
    pub slot: MarkerSlot,
    /// Left edge in points
    pub x: f64,
    /// Top edge in points
    pub y: f64,
}

/// Assigns positions to markers in input order
#[derive(Debug, Clone)]
pub struct BulletPlacer<'c> {
    config: &'c GridConfig,
    occupancy: CellOccupancy,
}

impl<'c> BulletPlacer<'c> {
    /// Create a placer with an empty occupancy counter
    pub fn new(config: &'c GridConfig) -> Self {
        Self {
            config,
            occupancy: CellOccupancy::new(),
        }
    }

    /// Position of the next marker in `cell`, in points
    pub fn place_cell(&mut self, cell: GridReference) -> (MarkerSlot, f64, f64) {
        let slot = MarkerSlot::from_slot_index(self.occupancy.next_slot(cell));
        let diameter = self.config.marker_diameter;

        let dx = slot.sub_col as f64 * diameter;
        let dy = slot.sub_row as f64 * diameter;
        let x = self.config.origin_x + (cell.column - 1) as f64 * self.config.cell_width_points() + dx;
        let y = self.config.origin_y + (cell.row - 1) as f64 * self.config.cell_height_points() + dy;

        (slot, x, y)
    }

    /// Place one mapped record
    pub fn place<'r>(&mut self, mapped: &'r MappedRecord) -> Placement<'r> {
        let (slot, x, y) = self.place_cell(mapped.cell);
        Placement {
            record: &mapped.record,
            cell: mapped.cell,
            slot,
            x,
            y,
        }
    }

    /// Place every record in order
    pub fn place_all<'p, 'a>(&'p mut self, mapped: &'a [MappedRecord]) -> Placements<'p, 'c, 'a> {
        Placements {
            placer: self,
            records: mapped.iter(),
        }
    }

    /// The occupancy counter so far
    pub fn occupancy(&self) -> &CellOccupancy {
        &self.occupancy
    }
}

/// Iterator returned by [`BulletPlacer::place_all`]
#[derive(Debug)]
pub struct Placements<'p, 'c, 'a> {
    placer: &'p mut BulletPlacer<'c>,
    records: std::slice::Iter<'a, MappedRecord>,
}

impl<'p, 'c, 'a> Iterator for Placements<'p, 'c, 'a> {
    type Item = Placement<'a>;

    fn next(&mut self) -> Option<Placement<'a>> {
        let mapped = self.records.next()?;
        Some(self.placer.place(mapped))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}
