//! Chartify Line - line chart render adapter
//!
//! Draws tabular data as line charts into named display elements and exports
//! them as an HTML page.

pub mod adapter;
pub mod charts;
pub mod config;
pub mod data;
pub mod document;
pub mod logging;

pub use adapter::{draw_chart, draw_graph, graph_options};
pub use charts::{LineChartBackend, LineChartOptions, Package, RenderConfig, RenderError, Visualization};
pub use data::{Cell, DataLoader, DataTable};
pub use document::Document;
