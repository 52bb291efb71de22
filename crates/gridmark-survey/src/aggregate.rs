//! Chart Aggregator: per-category averages

use crate::error::{SurveyError, SurveyResult};
use crate::question::{CategorySpec, Question, Transform, VALUE_COLUMN};
use crate::workbook::{Sheet, SurveyWorkbook};

/// Midpoint the reverse-coded items are reflected against
pub const REFLECTION_POINT: f64 = 5.0;

/// Reorder and reflect the four Balance items
///
/// `[v0, v1, v2, v3]` becomes `[v0, v3, 5 - v1, 5 - v2]`.
pub fn balance_transform(values: &[f64]) -> SurveyResult<[f64; 4]> {
    match values {
        [v0, v1, v2, v3] => Ok([
            *v0,
            *v3,
            REFLECTION_POINT - v1,
            REFLECTION_POINT - v2,
        ]),
        _ => Err(SurveyError::InvalidBalance(values.len())),
    }
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Scores of one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    /// Category name
    pub name: String,
    /// Item values as read from the sheet
    pub raw: Vec<f64>,
    /// Values that were averaged (equal to `raw` unless transformed)
    pub prepared: Vec<f64>,
    /// Mean of `prepared`
    pub average: f64,
}

/// Scores of every category of a question
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionScores {
    pub question: Question,
    pub categories: Vec<CategoryScore>,
}

impl QuestionScores {
    /// Category names in chart order
    pub fn names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// Category averages in chart order
    pub fn averages(&self) -> Vec<f64> {
        self.categories.iter().map(|c| c.average).collect()
    }
}

/// Score a category from its raw item values
pub fn score_category(spec: &CategorySpec, raw: Vec<f64>) -> SurveyResult<CategoryScore> {
    let prepared = match spec.transform {
        Transform::Identity => raw.clone(),
        Transform::Balance => balance_transform(&raw)?.to_vec(),
    };
    let average = mean(&prepared).ok_or_else(|| {
        SurveyError::InvalidFormat(format!("category '{}' has no items", spec.name))
    })?;

    Ok(CategoryScore {
        name: spec.name.to_string(),
        raw,
        prepared,
        average,
    })
}

/// Read a category's item values from its sheet
pub fn read_category(sheet: &Sheet, spec: &CategorySpec) -> SurveyResult<Vec<f64>> {
    spec.rows
        .clone()
        .map(|row| sheet.number(row, VALUE_COLUMN))
        .collect()
}

/// Read and average every category of `question`
pub fn aggregate_question(workbook: &SurveyWorkbook, question: Question) -> SurveyResult<QuestionScores> {
    let sheet = workbook.sheet(&question.sheet_name())?;

    let categories = question
        .categories()
        .iter()
        .map(|spec| score_category(spec, read_category(sheet, spec)?))
        .collect::<SurveyResult<Vec<_>>>()?;

    for category in &categories {
        log::debug!("{} / {}: average {:.2}", question, category.name, category.average);
    }

    Ok(QuestionScores {
        question,
        categories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::CellValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_balance_transform() {
        let transformed = balance_transform(&[4.0, 1.0, 2.0, 5.0]).unwrap();
        assert_eq!(transformed, [4.0, 5.0, 4.0, 3.0]);
        assert_eq!(mean(&transformed), Some(4.0));

        // v1 and v2 are reflected against 5, v3 moves to the second slot
        assert_eq!(balance_transform(&[1.0, 5.0, 0.0, 2.0]).unwrap(), [1.0, 2.0, 0.0, 5.0]);
    }

    #[test]
    fn test_balance_needs_four_values() {
        assert!(matches!(
            balance_transform(&[1.0, 2.0, 3.0]),
            Err(SurveyError::InvalidBalance(3))
        ));
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
    }

    #[test]
    fn test_aggregate_question_four() {
        let mut sheet = Sheet::new("Question 4");
        let column: [f64; 12] = [3.0, 3.0, 4.0, 4.0, 4.0, 1.0, 2.0, 5.0, 2.0, 2.0, 2.0, 3.0];
        for (i, value) in column.iter().enumerate() {
            sheet.set(3 + i as u32, VALUE_COLUMN, CellValue::Number(*value));
        }
        let workbook = SurveyWorkbook::from_sheets(vec![sheet]);

        let scores = aggregate_question(&workbook, Question::Q4).unwrap();
        assert_eq!(scores.names(), vec!["Strategic Alignment", "Balance", "Maximal Value"]);
        assert_eq!(scores.averages(), vec![3.5, 4.0, 2.25]);
        assert_eq!(scores.categories[1].raw, vec![4.0, 1.0, 2.0, 5.0]);
        assert_eq!(scores.categories[1].prepared, vec![4.0, 5.0, 4.0, 3.0]);
    }

    #[test]
    fn test_missing_sheet_and_values() {
        let workbook = SurveyWorkbook::from_sheets(vec![Sheet::new("Question 8")]);
        assert!(matches!(
            aggregate_question(&workbook, Question::Q4),
            Err(SurveyError::MissingSheet(_))
        ));
        assert!(matches!(
            aggregate_question(&workbook, Question::Q8),
            Err(SurveyError::NonNumeric { .. })
        ));
    }
}
