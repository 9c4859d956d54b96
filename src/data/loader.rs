//! Tabular Data Loader Module
//! Reads chart rows from CSV (via Polars) or JSON files.

use crate::data::Cell;
use polars::prelude::*;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Failed to read JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Failed to open {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Unsupported data file format: {0}")]
    UnsupportedFormat(String),
}

/// Loads row-oriented tabular data; the first row is always the header.
pub struct DataLoader;

impl DataLoader {
    /// Load rows from a `.csv` or `.json` file.
    pub fn load(path: &Path) -> Result<Vec<Vec<Cell>>, LoaderError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Self::load_csv(path),
            "json" => Self::load_json(path),
            _ => Err(LoaderError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Load a JSON array of rows, e.g. `[["Year","Sales"],["2020",10]]`.
    pub fn load_json(path: &Path) -> Result<Vec<Vec<Cell>>, LoaderError> {
        let file = File::open(path).map_err(|source| LoaderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let rows = serde_json::from_reader(BufReader::new(file))?;
        Ok(rows)
    }

    /// Load a CSV file using Polars; column names become the header row.
    pub fn load_csv(path: &Path) -> Result<Vec<Vec<Cell>>, LoaderError> {
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        Ok(Self::dataframe_to_rows(&df))
    }

    /// Convert a DataFrame into header + data rows.
    pub fn dataframe_to_rows(df: &DataFrame) -> Vec<Vec<Cell>> {
        let header: Vec<Cell> = df
            .get_column_names()
            .iter()
            .map(|name| Cell::Text(name.to_string()))
            .collect();

        let mut rows = Vec::with_capacity(df.height() + 1);
        rows.push(header);

        let columns = df.get_columns();
        for i in 0..df.height() {
            let row = columns
                .iter()
                .map(|col| {
                    col.as_materialized_series()
                        .get(i)
                        .map(|value| Self::any_value_to_cell(&value))
                        .unwrap_or(Cell::Null)
                })
                .collect();
            rows.push(row);
        }

        rows
    }

    fn any_value_to_cell(value: &AnyValue) -> Cell {
        match value {
            AnyValue::Null => Cell::Null,
            AnyValue::Boolean(b) => Cell::Bool(*b),
            AnyValue::String(s) => Cell::Text(s.to_string()),
            AnyValue::StringOwned(s) => Cell::Text(s.to_string()),
            other => match other.extract::<f64>() {
                Some(v) => Cell::Number(v),
                None => Cell::Text(other.to_string().trim_matches('"').to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_json_rows() {
        let file = write_temp(".json", r#"[["Year","Sales"],["2020",10],["2021",20]]"#);
        let rows = DataLoader::load(file.path()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec![Cell::from("Year"), Cell::from("Sales")]);
        assert_eq!(rows[2], vec![Cell::from("2021"), Cell::Number(20.0)]);
    }

    #[test]
    fn loads_csv_with_header_row() {
        let file = write_temp(".csv", "Course,Mean,Max\nA,6.5,9\nB,7.25,10\nC,,8\n");
        let rows = DataLoader::load(file.path()).unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows[0],
            vec![Cell::from("Course"), Cell::from("Mean"), Cell::from("Max")]
        );
        assert_eq!(rows[1][0], Cell::from("A"));
        assert_eq!(rows[2][1], Cell::Number(7.25));
        assert_eq!(rows[2][2], Cell::Number(10.0));
        assert_eq!(rows[3][1], Cell::Null);
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = write_temp(".txt", "Year,Sales\n");
        let err = DataLoader::load(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::UnsupportedFormat(_)));
    }

    #[test]
    fn missing_json_file_reports_path() {
        let err = DataLoader::load(Path::new("/nonexistent/rows.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/rows.json"));
    }
}
