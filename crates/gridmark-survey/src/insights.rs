//! Department insights: response distributions per statement
//!
//! Each department exports its own workbook. On the sheets "Question 4"
//! .. "Question 7" every data row holds a statement, five response counts
//! and a weighted average. Rows are counted below the header row.

use std::ops::Range;

use crate::error::SurveyResult;
use crate::workbook::SurveyWorkbook;

/// Response options, from most negative to most positive
pub const RESPONSE_LABELS: [&str; 5] = [
    "Strongly Disagree",
    "Disagree",
    "Neutral",
    "Agree",
    "Strongly Agree",
];

const STATEMENT_COLUMN: u32 = 0;
const FIRST_RESPONSE_COLUMN: u32 = 1;
const WEIGHTED_AVERAGE_COLUMN: u32 = 6;

/// Rows of one insights sheet, relative to the first row below the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightSheet {
    pub sheet_name: &'static str,
    pub rows: Range<u32>,
}

/// Sheets read from every department workbook
pub fn insight_sheets() -> [InsightSheet; 4] {
    [
        InsightSheet {
            sheet_name: "Question 4",
            rows: 2..14,
        },
        InsightSheet {
            sheet_name: "Question 5",
            rows: 2..15,
        },
        InsightSheet {
            sheet_name: "Question 6",
            rows: 2..14,
        },
        InsightSheet {
            sheet_name: "Question 7",
            rows: 2..14,
        },
    ]
}

/// One statement row of one department
#[derive(Debug, Clone, PartialEq)]
pub struct StatementRow {
    pub department: String,
    /// Sheet the row came from
    pub question: String,
    pub statement: String,
    /// Response counts in [`RESPONSE_LABELS`] order
    pub counts: [f64; 5],
    pub weighted_average: Option<f64>,
}

/// Read every statement row of a department workbook
///
/// Rows without statement text are skipped; empty count cells read as 0.
pub fn extract_department(workbook: &SurveyWorkbook, department: &str) -> SurveyResult<Vec<StatementRow>> {
    let mut rows = Vec::new();

    for info in insight_sheets() {
        let sheet = workbook.sheet(info.sheet_name)?;

        for offset in info.rows.clone() {
            // Row 0 of the sheet is the header
            let row = offset + 1;
            let statement = sheet.text(row, STATEMENT_COLUMN);
            if statement.is_empty() {
                continue;
            }

            let mut counts = [0.0; 5];
            for (i, count) in counts.iter_mut().enumerate() {
                *count = sheet.number_or(row, FIRST_RESPONSE_COLUMN + i as u32, Some(0.0))?;
            }
            let weighted_average = match sheet.get(row, WEIGHTED_AVERAGE_COLUMN) {
                Some(_) => Some(sheet.number(row, WEIGHTED_AVERAGE_COLUMN)?),
                None => None,
            };

            rows.push(StatementRow {
                department: department.to_string(),
                question: info.sheet_name.to_string(),
                statement,
                counts,
                weighted_average,
            });
        }
    }

    log::debug!("department '{}': {} statement rows", department, rows.len());
    Ok(rows)
}

/// Distinct statements in first-seen order
pub fn statements(rows: &[StatementRow]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for row in rows {
        if !seen.contains(&row.statement.as_str()) {
            seen.push(&row.statement);
        }
    }
    seen
}

/// One department's answers to a statement
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub department: String,
    /// Summed counts in [`RESPONSE_LABELS`] order
    pub counts: [f64; 5],
    /// Share of each response in percent (all zero when nobody answered)
    pub percentages: [f64; 5],
}

/// Response distribution of `statement` per department
///
/// Departments appear in first-seen order. A statement that occurs on
/// several sheets for one department has its counts summed.
pub fn statement_distribution(rows: &[StatementRow], statement: &str) -> Vec<Distribution> {
    let mut result: Vec<Distribution> = Vec::new();

    for row in rows.iter().filter(|r| r.statement == statement) {
        let index = match result.iter().position(|d| d.department == row.department) {
            Some(i) => i,
            None => {
                result.push(Distribution {
                    department: row.department.clone(),
                    counts: [0.0; 5],
                    percentages: [0.0; 5],
                });
                result.len() - 1
            }
        };
        for (total, count) in result[index].counts.iter_mut().zip(row.counts) {
            *total += count;
        }
    }

    for distribution in &mut result {
        let total: f64 = distribution.counts.iter().sum();
        if total > 0.0 {
            for (pct, count) in distribution.percentages.iter_mut().zip(distribution.counts) {
                *pct = count / total * 100.0;
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::{CellValue, Sheet};
    use pretty_assertions::assert_eq;

    fn row(department: &str, question: &str, statement: &str, counts: [f64; 5]) -> StatementRow {
        StatementRow {
            department: department.into(),
            question: question.into(),
            statement: statement.into(),
            counts,
            weighted_average: None,
        }
    }

    #[test]
    fn test_distribution_percentages() {
        let rows = vec![
            row("Finance", "Question 4", "We say no", [1.0, 1.0, 0.0, 2.0, 0.0]),
            row("HR", "Question 4", "We say no", [0.0, 0.0, 0.0, 0.0, 0.0]),
            row("Finance", "Question 5", "Other", [5.0, 0.0, 0.0, 0.0, 0.0]),
        ];
        let result = statement_distribution(&rows, "We say no");

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].department, "Finance");
        assert_eq!(result[0].percentages, [25.0, 25.0, 0.0, 50.0, 0.0]);
        assert_eq!(result[1].percentages, [0.0; 5]);
    }

    #[test]
    fn test_repeated_statement_is_summed() {
        let rows = vec![
            row("IT", "Question 4", "Same", [1.0, 0.0, 0.0, 0.0, 1.0]),
            row("IT", "Question 6", "Same", [1.0, 0.0, 0.0, 0.0, 1.0]),
        ];
        let result = statement_distribution(&rows, "Same");
        assert_eq!(result[0].counts, [2.0, 0.0, 0.0, 0.0, 2.0]);
        assert_eq!(statements(&rows), vec!["Same"]);
    }

    #[test]
    fn test_extract_department_reads_below_header() {
        let sheets = insight_sheets()
            .into_iter()
            .map(|info| {
                let mut sheet = Sheet::new(info.sheet_name);
                sheet.set(0, 0, CellValue::Text("Statement".into()));
                // offset 2 → sheet row 3
                sheet.set(3, 0, CellValue::Text(format!("{} first", info.sheet_name)));
                for col in 1..=5 {
                    sheet.set(3, col, CellValue::Number(col as f64));
                }
                sheet.set(3, 6, CellValue::Number(3.67));
                sheet.set(4, 0, CellValue::Text("partial".into()));
                sheet.set(4, 2, CellValue::Number(7.0));
                sheet
            })
            .collect();
        let workbook = SurveyWorkbook::from_sheets(sheets);

        let rows = extract_department(&workbook, "Sales").unwrap();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].statement, "Question 4 first");
        assert_eq!(rows[0].counts, [1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(rows[0].weighted_average, Some(3.67));
        assert_eq!(rows[1].counts, [0.0, 7.0, 0.0, 0.0, 0.0]);
        assert_eq!(rows[1].weighted_average, None);
        assert_eq!(rows[7].question, "Question 7");
    }
}
