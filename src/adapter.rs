//! Chart Render Adapter
//! Binds application rows to the line chart draw routine with fixed options:
//! smoothed curves, legend at the bottom, caller-supplied title.

use crate::charts::{CurveType, LegendPosition, LineChartBackend, LineChartOptions, RenderError};
use crate::data::{Cell, DataTable};

/// Options every adapter draw uses.
pub fn graph_options(title: &str) -> LineChartOptions {
    LineChartOptions::new(title)
        .with_curve_type(CurveType::Function)
        .with_legend_position(LegendPosition::Bottom)
}

/// Draw `rows` as a line chart into the element `container_id`.
///
/// Errors come straight from the table constructor or the backend.
pub fn draw_graph<B: LineChartBackend + ?Sized>(
    backend: &mut B,
    rows: &[Vec<Cell>],
    container_id: &str,
    title: &str,
) -> Result<(), RenderError> {
    let options = graph_options(title);
    let table = DataTable::from_rows(rows)?;
    backend.draw_line_chart(container_id, &table, &options)
}

/// Same as [`draw_graph`].
pub fn draw_chart<B: LineChartBackend + ?Sized>(
    backend: &mut B,
    rows: &[Vec<Cell>],
    container_id: &str,
    title: &str,
) -> Result<(), RenderError> {
    draw_graph(backend, rows, container_id, title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TableError;
    use serde_json::json;

    /// Records every draw call instead of rendering.
    #[derive(Default)]
    struct RecordingBackend {
        calls: Vec<(String, DataTable, LineChartOptions)>,
    }

    impl LineChartBackend for RecordingBackend {
        fn draw_line_chart(
            &mut self,
            container_id: &str,
            table: &DataTable,
            options: &LineChartOptions,
        ) -> Result<(), RenderError> {
            self.calls
                .push((container_id.to_string(), table.clone(), options.clone()));
            Ok(())
        }
    }

    fn sales_rows() -> Vec<Vec<Cell>> {
        serde_json::from_value(json!([["Year", "Sales"], ["2020", 10], ["2021", 20]])).unwrap()
    }

    #[test]
    fn draws_once_with_fixed_options() {
        let mut backend = RecordingBackend::default();
        draw_graph(&mut backend, &sales_rows(), "chart1", "Sales").unwrap();

        assert_eq!(backend.calls.len(), 1);
        let (container, table, options) = &backend.calls[0];
        assert_eq!(container, "chart1");
        assert_eq!(table, &DataTable::from_rows(&sales_rows()).unwrap());
        assert_eq!(
            serde_json::to_value(options).unwrap(),
            json!({
                "title": "Sales",
                "curveType": "function",
                "legend": { "position": "bottom" }
            })
        );
    }

    #[test]
    fn draw_chart_forwards_unchanged() {
        let mut direct = RecordingBackend::default();
        let mut forwarded = RecordingBackend::default();

        draw_graph(&mut direct, &sales_rows(), "chart1", "Sales").unwrap();
        draw_chart(&mut forwarded, &sales_rows(), "chart1", "Sales").unwrap();

        assert_eq!(direct.calls, forwarded.calls);
    }

    #[test]
    fn table_errors_propagate_without_drawing() {
        let mut backend = RecordingBackend::default();
        let err = draw_graph(&mut backend, &[], "chart1", "Sales").unwrap_err();

        assert!(matches!(err, RenderError::Table(TableError::Empty)));
        assert!(backend.calls.is_empty());
    }

    #[test]
    fn works_through_a_trait_object() {
        let mut backend = RecordingBackend::default();
        let dyn_backend: &mut dyn LineChartBackend = &mut backend;
        draw_chart(dyn_backend, &sales_rows(), "media", "Means").unwrap();

        assert_eq!(backend.calls[0].2.title, "Means");
    }
}
