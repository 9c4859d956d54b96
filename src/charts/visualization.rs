//! Visualization Runtime
//! Explicitly loaded charting runtime that owns the display document.

use crate::charts::{LineChartOptions, LineChartPlotter, RenderConfig, RenderError};
use crate::data::DataTable;
use crate::document::Document;
use tracing::{debug, info};

/// Chart packages a `Visualization` can be loaded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Package {
    /// Line, area and other cartesian charts
    CoreChart,
}

impl Package {
    pub fn name(&self) -> &'static str {
        match self {
            Package::CoreChart => "corechart",
        }
    }
}

/// Draw capability used by the render adapter.
pub trait LineChartBackend {
    /// Draw `table` as a line chart into the element identified by `container_id`.
    fn draw_line_chart(
        &mut self,
        container_id: &str,
        table: &DataTable,
        options: &LineChartOptions,
    ) -> Result<(), RenderError>;
}

/// Loaded charting runtime.
///
/// Created once with [`Visualization::load`] before any chart is drawn and
/// kept for as long as charts are rendered.
pub struct Visualization {
    packages: Vec<Package>,
    document: Document,
    config: RenderConfig,
}

impl Visualization {
    pub fn load(packages: &[Package], document: Document, config: RenderConfig) -> Self {
        let names: Vec<&str> = packages.iter().map(Package::name).collect();
        info!("Visualization loaded with packages {:?}", names);

        Self {
            packages: packages.to_vec(),
            document,
            config,
        }
    }

    pub fn is_loaded(&self, package: Package) -> bool {
        self.packages.contains(&package)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

impl LineChartBackend for Visualization {
    fn draw_line_chart(
        &mut self,
        container_id: &str,
        table: &DataTable,
        options: &LineChartOptions,
    ) -> Result<(), RenderError> {
        if !self.is_loaded(Package::CoreChart) {
            return Err(RenderError::PackageNotLoaded(Package::CoreChart.name()));
        }

        let element = self
            .document
            .element_mut(container_id)
            .ok_or_else(|| RenderError::ElementNotFound(container_id.to_string()))?;

        let chart = LineChartPlotter::render(table, options, &self.config, element.size())?;
        debug!(
            container = container_id,
            options = %serde_json::to_string(options).unwrap_or_default(),
            bytes = chart.data.len(),
            "line chart drawn"
        );
        element.paint(options.clone(), chart);

        Ok(())
    }
}
