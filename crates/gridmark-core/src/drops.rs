//! Accounting for rows and tables that never become markers

use std::fmt;

/// What to do when input is dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DropPolicy {
    /// Count only
    #[default]
    Silent,
    /// Count and log a warning per drop
    Warn,
}

/// Why an input row or table was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Table has neither a code nor a grid-reference column
    MissingColumns,
    /// Code shorter than two characters
    ShortCode,
    /// Grid-reference cell is empty
    EmptyReference,
    /// Grid reference is not `<letter><number>`
    MalformedReference,
    /// Grid reference lies outside `rows × cols`
    OutOfBounds,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DropReason::MissingColumns => "table lacks code and grid-reference columns",
            DropReason::ShortCode => "code too short to name a department",
            DropReason::EmptyReference => "grid reference is empty",
            DropReason::MalformedReference => "grid reference is malformed",
            DropReason::OutOfBounds => "grid reference outside the grid",
        };
        f.write_str(text)
    }
}

/// Per-run drop counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropReport {
    /// Tables skipped for missing columns
    pub skipped_tables: usize,
    /// Rows whose code is shorter than two characters
    pub short_codes: usize,
    /// Rows with an empty grid reference
    pub empty_references: usize,
    /// Rows with an unparseable grid reference
    pub malformed_references: usize,
    /// Rows whose reference falls outside the grid
    pub out_of_bounds: usize,
}

impl DropReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a drop, logging it when the policy asks for it
    pub fn record(&mut self, policy: DropPolicy, reason: DropReason, context: &str) {
        match reason {
            DropReason::MissingColumns => self.skipped_tables += 1,
            DropReason::ShortCode => self.short_codes += 1,
            DropReason::EmptyReference => self.empty_references += 1,
            DropReason::MalformedReference => self.malformed_references += 1,
            DropReason::OutOfBounds => self.out_of_bounds += 1,
        }

        if policy == DropPolicy::Warn {
            log::warn!("dropped {}: {}", context, reason);
        }
    }

    /// Number of dropped rows (skipped tables excluded)
    pub fn dropped_rows(&self) -> usize {
        self.short_codes + self.empty_references + self.malformed_references + self.out_of_bounds
    }

    /// Whether nothing was dropped
    pub fn is_empty(&self) -> bool {
        self.skipped_tables == 0 && self.dropped_rows() == 0
    }

    /// Add another report's counters to this one
    pub fn merge(&mut self, other: &DropReport) {
        self.skipped_tables += other.skipped_tables;
        self.short_codes += other.short_codes;
        self.empty_references += other.empty_references;
        self.malformed_references += other.malformed_references;
        self.out_of_bounds += other.out_of_bounds;
    }
}

impl fmt::Display for DropReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows dropped ({} short codes, {} empty, {} malformed, {} out of bounds), {} tables skipped",
            self.dropped_rows(),
            self.short_codes,
            self.empty_references,
            self.malformed_references,
            self.out_of_bounds,
            self.skipped_tables
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_by_reason() {
        let mut report = DropReport::new();
        assert!(report.is_empty());

        report.record(DropPolicy::Silent, DropReason::OutOfBounds, "P99");
        report.record(DropPolicy::Warn, DropReason::OutOfBounds, "Q1");
        report.record(DropPolicy::Silent, DropReason::MissingColumns, "slide 2");

        assert_eq!(report.out_of_bounds, 2);
        assert_eq!(report.skipped_tables, 1);
        assert_eq!(report.dropped_rows(), 2);
        assert!(!report.is_empty());
    }

    #[test]
    fn test_merge() {
        let mut a = DropReport {
            short_codes: 1,
            ..Default::default()
        };
        let b = DropReport {
            short_codes: 2,
            malformed_references: 1,
            ..Default::default()
        };
        a.merge(&b);
        assert_eq!(a.short_codes, 3);
        assert_eq!(a.malformed_references, 1);
    }
}
