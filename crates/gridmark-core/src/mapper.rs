//! Grid Mapper: decode and bound-check record references

use crate::config::GridConfig;
use crate::drops::{DropPolicy, DropReason, DropReport};
use crate::grid::GridReference;
use crate::record::ProjectRecord;

/// A record together with the grid cell it maps to
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRecord {
    /// The scanned record
    pub record: ProjectRecord,
    /// Target cell, guaranteed inside the grid
    pub cell: GridReference,
}

/// Maps records onto a `rows × cols` grid
#[derive(Debug, Clone, Copy)]
pub struct GridMapper<'a> {
    config: &'a GridConfig,
    policy: DropPolicy,
}

impl<'a> GridMapper<'a> {
    /// Create a mapper for the given grid
    pub fn new(config: &'a GridConfig, policy: DropPolicy) -> Self {
        Self { config, policy }
    }

    /// Decode one record's reference
    ///
    /// Malformed and out-of-grid references are dropped, not errors.
    pub fn map(&self, record: &ProjectRecord, report: &mut DropReport) -> Option<GridReference> {
        let context = || format!("{} ({})", record.code, record.grid_ref);

        let cell = match GridReference::parse(&record.grid_ref) {
            Ok(cell) => cell,
            Err(_) => {
                report.record(self.policy, DropReason::MalformedReference, &context());
                return None;
            }
        };

        if !cell.is_within(self.config) {
            report.record(self.policy, DropReason::OutOfBounds, &context());
            return None;
        }

        Some(cell)
    }

    /// Map records in order, keeping those that land inside the grid
    pub fn map_all(&self, records: &[ProjectRecord], report: &mut DropReport) -> Vec<MappedRecord> {
        records
            .iter()
            .filter_map(|record| {
                self.map(record, report).map(|cell| MappedRecord {
                    record: record.clone(),
                    cell,
                })
            })
            .collect()
    }
}
