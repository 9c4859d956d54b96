//! Data Table Module
//! Converts row-oriented tabular data into a typed table for chart rendering.
//!
//! The first row carries the column labels. Column types are inferred from
//! the first non-null cell of each column.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("Data table is empty")]
    Empty,
    #[error("Column {column} header must be a string")]
    InvalidHeader { column: usize },
    #[error("Row {row} has {found} columns, but must have {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Type mismatch. Value in row {row} does not match type {expected} in column index {column}")]
    TypeMismatch {
        row: usize,
        column: usize,
        expected: ColumnType,
    },
}

/// A single value of tabular input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Cell {
    fn column_type(&self) -> Option<ColumnType> {
        match self {
            Cell::Null => None,
            Cell::Bool(_) => Some(ColumnType::Boolean),
            Cell::Number(_) => Some(ColumnType::Number),
            Cell::Text(_) => Some(ColumnType::String),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::Number(v) => write!(f, "{}", v),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Null)
    }
}

/// Inferred type of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    String,
    Number,
    Boolean,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::String => "string",
            ColumnType::Number => "number",
            ColumnType::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub label: String,
    pub kind: ColumnType,
}

/// Typed, rectangular table built from header + data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
}

impl DataTable {
    /// Build a table from rows whose first row holds the column labels.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Result<Self, TableError> {
        let (header, data) = rows.split_first().ok_or(TableError::Empty)?;

        let labels = header
            .iter()
            .enumerate()
            .map(|(column, cell)| match cell {
                Cell::Text(label) => Ok(label.clone()),
                _ => Err(TableError::InvalidHeader { column }),
            })
            .collect::<Result<Vec<String>, TableError>>()?;

        let width = labels.len();
        for (i, row) in data.iter().enumerate() {
            if row.len() != width {
                return Err(TableError::RaggedRow {
                    row: i + 1,
                    expected: width,
                    found: row.len(),
                });
            }
        }

        let mut columns = Vec::with_capacity(width);
        for (column, label) in labels.into_iter().enumerate() {
            let kind = data
                .iter()
                .find_map(|row| row[column].column_type())
                .unwrap_or(ColumnType::Number);

            // Every non-null cell must agree with the inferred type
            for (i, row) in data.iter().enumerate() {
                if let Some(found) = row[column].column_type() {
                    if found != kind {
                        return Err(TableError::TypeMismatch {
                            row: i + 1,
                            column,
                            expected: kind,
                        });
                    }
                }
            }

            columns.push(Column { label, kind });
        }

        Ok(Self {
            columns,
            rows: data.to_vec(),
        })
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_label(&self, column: usize) -> Option<&str> {
        self.columns.get(column).map(|c| c.label.as_str())
    }

    pub fn column_type(&self, column: usize) -> Option<ColumnType> {
        self.columns.get(column).map(|c| c.kind)
    }

    pub fn value(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Numeric value of a cell, `None` for nulls and non-numeric cells.
    pub fn number(&self, row: usize, column: usize) -> Option<f64> {
        self.value(row, column).and_then(Cell::as_f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales_rows() -> Vec<Vec<Cell>> {
        vec![
            vec!["Year".into(), "Sales".into()],
            vec!["2020".into(), 10.into()],
            vec!["2021".into(), 20.into()],
        ]
    }

    #[test]
    fn infers_column_types_from_first_value() {
        let table = DataTable::from_rows(&sales_rows()).unwrap();

        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_label(0), Some("Year"));
        assert_eq!(table.column_type(0), Some(ColumnType::String));
        assert_eq!(table.column_type(1), Some(ColumnType::Number));
        assert_eq!(table.number(1, 1), Some(20.0));
        assert_eq!(table.value(0, 0), Some(&Cell::from("2020")));
    }

    #[test]
    fn header_only_table_has_no_rows() {
        let rows = vec![vec![Cell::from("x"), Cell::from("y")]];
        let table = DataTable::from_rows(&rows).unwrap();

        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_type(1), Some(ColumnType::Number));
    }

    #[test]
    fn nulls_do_not_decide_the_column_type() {
        let rows = vec![
            vec!["x".into(), "y".into()],
            vec![1.into(), Cell::Null],
            vec![2.into(), "late".into()],
        ];
        let table = DataTable::from_rows(&rows).unwrap();

        assert_eq!(table.column_type(1), Some(ColumnType::String));
        assert_eq!(table.number(0, 1), None);
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(DataTable::from_rows(&[]), Err(TableError::Empty));
    }

    #[test]
    fn rejects_non_text_header() {
        let rows = vec![vec!["Year".into(), 5.into()]];
        assert_eq!(
            DataTable::from_rows(&rows),
            Err(TableError::InvalidHeader { column: 1 })
        );
    }

    #[test]
    fn rejects_ragged_rows() {
        let mut rows = sales_rows();
        rows.push(vec!["2022".into()]);

        assert_eq!(
            DataTable::from_rows(&rows),
            Err(TableError::RaggedRow {
                row: 3,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn rejects_mixed_column_types() {
        let mut rows = sales_rows();
        rows.push(vec!["2022".into(), "thirty".into()]);

        let err = DataTable::from_rows(&rows).unwrap_err();
        assert_eq!(
            err,
            TableError::TypeMismatch {
                row: 3,
                column: 1,
                expected: ColumnType::Number
            }
        );
        assert!(err.to_string().contains("type number in column index 1"));
    }

    #[test]
    fn cells_deserialize_from_untyped_json() {
        let rows: Vec<Vec<Cell>> =
            serde_json::from_str(r#"[["Year","Sales"],["2020",10],["2021",null],[true,2.5]]"#)
                .unwrap();

        assert_eq!(rows[1], vec![Cell::from("2020"), Cell::Number(10.0)]);
        assert_eq!(rows[2][1], Cell::Null);
        assert_eq!(rows[3], vec![Cell::Bool(true), Cell::Number(2.5)]);
    }
}
