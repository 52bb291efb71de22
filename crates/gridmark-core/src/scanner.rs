//! Table Scanner: lookup tables to project records

use crate::drops::{DropPolicy, DropReason, DropReport};
use crate::record::{Category, ProjectRecord, SlideId};

/// The first table found on a slide, as rows of cell text
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTable {
    /// Slide the table sits on
    pub slide: SlideId,
    /// Cell text, row-major
    pub rows: Vec<Vec<String>>,
}

impl SourceTable {
    /// Create a table from rows of string-like cells
    pub fn new<R, C>(slide: SlideId, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            slide,
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }
}

/// Header labels that identify the lookup-table columns
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeaderVocabulary {
    /// Project code column
    pub code: String,
    /// Grid reference column
    pub grid_ref: String,
    /// Title column
    pub title: String,
    /// Category column
    pub category: String,
}

impl Default for HeaderVocabulary {
    fn default() -> Self {
        Self {
            code: "AFKORTING".into(),
            grid_ref: "SPF".into(),
            title: "TITEL".into(),
            category: "PROJECT / IDEA / TASK".into(),
        }
    }
}

/// Column positions resolved from a header row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct ColumnMap {
    code: Option<usize>,
    grid_ref: Option<usize>,
    title: Option<usize>,
    category: Option<usize>,
}

impl ColumnMap {
    fn resolve(header: &[String], vocabulary: &HeaderVocabulary) -> Self {
        let find = |label: &str| {
            header
                .iter()
                .position(|cell| cell.trim().eq_ignore_ascii_case(label.trim()))
        };
        Self {
            code: find(&vocabulary.code),
            grid_ref: find(&vocabulary.grid_ref),
            title: find(&vocabulary.title),
            category: find(&vocabulary.category),
        }
    }

    fn identifies_table(&self) -> bool {
        self.code.is_some() || self.grid_ref.is_some()
    }
}

/// Turns lookup tables into [`ProjectRecord`]s
#[derive(Debug, Clone, Default)]
pub struct TableScanner {
    vocabulary: HeaderVocabulary,
    policy: DropPolicy,
}

impl TableScanner {
    /// Create a scanner with the given header vocabulary and drop policy
    pub fn new(vocabulary: HeaderVocabulary, policy: DropPolicy) -> Self {
        Self { vocabulary, policy }
    }

    /// Scan every table in order
    pub fn scan(&self, tables: &[SourceTable], report: &mut DropReport) -> Vec<ProjectRecord> {
        tables
            .iter()
            .flat_map(|table| self.scan_table(table, report))
            .collect()
    }

    /// Scan a single table
    ///
    /// The header is the first row naming a code or grid-reference column;
    /// every later row yields at most one record. Missing columns read as
    /// empty text.
    pub fn scan_table(&self, table: &SourceTable, report: &mut DropReport) -> Vec<ProjectRecord> {
        let header = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| (i, ColumnMap::resolve(row, &self.vocabulary)))
            .find(|(_, columns)| columns.identifies_table());

        let (header_index, columns) = match header {
            Some(found) => found,
            None => {
                report.record(
                    self.policy,
                    DropReason::MissingColumns,
                    &format!("table on {}", table.slide),
                );
                return Vec::new();
            }
        };

        let mut records = Vec::new();
        for (offset, row) in table.rows[header_index + 1..].iter().enumerate() {
            let cell = |column: Option<usize>| {
                column
                    .and_then(|i| row.get(i))
                    .map(|text| text.trim())
                    .unwrap_or("")
            };

            let code = cell(columns.code);
            let grid_ref = cell(columns.grid_ref);
            let context = format!("row {} on {}", header_index + offset + 2, table.slide);

            if grid_ref.is_empty() {
                report.record(self.policy, DropReason::EmptyReference, &context);
                continue;
            }

            match ProjectRecord::new(
                code,
                grid_ref,
                cell(columns.title),
                Category::parse(cell(columns.category)),
                table.slide,
            ) {
                Some(record) => records.push(record),
                None => report.record(self.policy, DropReason::ShortCode, &context),
            }
        }

        log::debug!(
            "scanned {} records from table on {}",
            records.len(),
            table.slide
        );
        records
    }
}
