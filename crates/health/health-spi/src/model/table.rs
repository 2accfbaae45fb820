//! In-memory tabular input.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result};

/// Tokens read as missing values, compared case-insensitively.
const MISSING_TOKENS: &[&str] = &["na", "n/a", "nan", "null", "none", "-", "#n/a"];

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}

impl Cell {
    /// Parse a raw field.
    ///
    /// Blank fields and common NA tokens become [`Cell::Missing`]; finite numbers
    /// become [`Cell::Number`]; everything else is kept as text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || is_missing_token(trimmed) {
            return Cell::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Cell::Number(value),
            Ok(_) => Cell::Missing,
            Err(_) => Cell::Text(trimmed.to_string()),
        }
    }

    /// Finite numeric value, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(value) if value.is_finite() => Some(*value),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Missing => true,
            Cell::Number(value) => !value.is_finite(),
            Cell::Text(_) => false,
        }
    }

    /// Render the cell as text, `None` when missing.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Cell::Number(value) if value.is_finite() => Some(value.to_string()),
            Cell::Text(text) => Some(text.clone()),
            _ => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(raw: &str) -> Self {
        Cell::parse(raw)
    }
}

fn is_missing_token(value: &str) -> bool {
    MISSING_TOKENS
        .iter()
        .any(|token| value.eq_ignore_ascii_case(token))
}

/// Rows of named columns, as produced by an upstream CSV or format parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create a table, rejecting duplicate column names and ragged rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.trim()) {
                return Err(InputError::DuplicateColumn(column.clone()).into());
            }
        }
        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(InputError::RaggedRow {
                    row: index,
                    expected: columns.len(),
                    got: row.len(),
                }
                .into());
            }
        }
        Ok(Self { columns, rows })
    }

    /// Create a table from raw string fields, parsing each with [`Cell::parse`].
    pub fn from_string_rows<H, R, F>(headers: H, rows: R) -> Result<Self>
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = F>,
        F: IntoIterator,
        F::Item: AsRef<str>,
    {
        let columns = headers.into_iter().map(Into::into).collect();
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|field| Cell::parse(field.as_ref())).collect())
            .collect();
        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the column whose trimmed name equals `name`, ignoring ASCII case.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.columns
            .iter()
            .position(|column| column.trim().eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    #[test]
    fn test_cell_parse_number() {
        assert_eq!(Cell::parse(" 42.5 "), Cell::Number(42.5));
        assert_eq!(Cell::parse("-3"), Cell::Number(-3.0));
    }

    #[test]
    fn test_cell_parse_missing_tokens() {
        for raw in ["", "  ", "NA", "n/a", "NaN", "null", "None", "-", "#N/A"] {
            assert_eq!(Cell::parse(raw), Cell::Missing, "token {:?}", raw);
        }
    }

    #[test]
    fn test_cell_parse_non_finite_is_missing() {
        assert_eq!(Cell::parse("inf"), Cell::Missing);
        assert!(Cell::Number(f64::NAN).is_missing());
    }

    #[test]
    fn test_cell_parse_text() {
        assert_eq!(Cell::parse("u-17"), Cell::Text("u-17".to_string()));
        assert_eq!(Cell::parse("2024-01-01").as_f64(), None);
    }

    #[test]
    fn test_table_rejects_ragged_rows() {
        let result = Table::from_string_rows(["date", "steps"], vec![vec!["2024-01-01"]]);
        assert!(matches!(
            result,
            Err(AnalysisError::InvalidInput(InputError::RaggedRow {
                row: 0,
                expected: 2,
                got: 1
            }))
        ));
    }

    #[test]
    fn test_table_rejects_duplicate_columns() {
        let result = Table::new(vec!["date".into(), "steps".into(), "steps".into()], vec![]);
        assert!(matches!(
            result,
            Err(AnalysisError::InvalidInput(InputError::DuplicateColumn(name))) if name == "steps"
        ));
    }

    #[test]
    fn test_column_index_ignores_case() {
        let table = Table::new(vec!["Date".into(), "Steps".into()], vec![]).unwrap();
        assert_eq!(table.column_index("date"), Some(0));
        assert_eq!(table.column_index(" STEPS "), Some(1));
        assert_eq!(table.column_index("sleep"), None);
        assert!(table.is_empty());
    }
}
