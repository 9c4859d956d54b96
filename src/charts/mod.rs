//! Charts module - Line chart rendering

mod curve;
mod error;
mod options;
mod plotter;
mod visualization;

pub use curve::smooth;
pub use error::RenderError;
pub use options::{CurveType, Legend, LegendPosition, LineChartOptions, OutputFormat, RenderConfig};
pub use plotter::{LineChartPlotter, RenderedChart, PALETTE};
pub use visualization::{LineChartBackend, Package, Visualization};
