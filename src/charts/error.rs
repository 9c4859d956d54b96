use crate::data::{ColumnType, TableError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("Container is not defined: {0}")]
    ElementNotFound(String),
    #[error("Package {0} is not loaded")]
    PackageNotLoaded(&'static str),
    #[error("Not enough columns given to draw the requested chart (found {found}, need 2)")]
    NotEnoughColumns { found: usize },
    #[error("Data column {column} ({label}) cannot be of type {kind}")]
    InvalidSeriesColumn {
        column: usize,
        label: String,
        kind: ColumnType,
    },
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Image encoding failed: {0}")]
    Encode(String),
}

pub(crate) fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}
