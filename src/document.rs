//! Display Document Module
//! Named display elements that charts are drawn into, plus HTML page export.

use crate::charts::{LineChartOptions, OutputFormat, RenderedChart};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Invalid element id: {0:?}")]
    InvalidId(String),
    #[error("Element {0} already exists")]
    DuplicateId(String),
    #[error("Element {0} must have a non-zero size")]
    InvalidSize(String),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Options and output of the most recent draw into an element.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSnapshot {
    pub options: LineChartOptions,
    pub chart: RenderedChart,
}

/// A display region identified by id.
#[derive(Debug, Clone)]
pub struct Element {
    id: String,
    size: (u32, u32),
    snapshot: Option<ChartSnapshot>,
    paint_count: u64,
}

impl Element {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn snapshot(&self) -> Option<&ChartSnapshot> {
        self.snapshot.as_ref()
    }

    /// Title of the chart currently shown.
    pub fn title(&self) -> Option<&str> {
        self.snapshot.as_ref().map(|s| s.options.title.as_str())
    }

    /// Number of draws this element has received.
    pub fn paint_count(&self) -> u64 {
        self.paint_count
    }

    /// Replace the element content; the latest draw always wins.
    pub(crate) fn paint(&mut self, options: LineChartOptions, chart: RenderedChart) {
        self.snapshot = Some(ChartSnapshot { options, chart });
        self.paint_count += 1;
    }

    fn file_name(&self) -> Option<String> {
        self.snapshot
            .as_ref()
            .map(|s| format!("{}.{}", self.id, s.chart.format.extension()))
    }
}

/// Ordered collection of display elements.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element. Ids are ASCII letters, digits, `-` and `_`.
    pub fn create_element(&mut self, id: &str, size: (u32, u32)) -> Result<&mut Element, DocumentError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(DocumentError::InvalidId(id.to_string()));
        }
        if self.element(id).is_some() {
            return Err(DocumentError::DuplicateId(id.to_string()));
        }
        if size.0 == 0 || size.1 == 0 {
            return Err(DocumentError::InvalidSize(id.to_string()));
        }

        self.elements.push(Element {
            id: id.to_string(),
            size,
            snapshot: None,
            paint_count: 0,
        });
        let last = self.elements.len() - 1;
        Ok(&mut self.elements[last])
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Build an HTML page with one `div` per element.
    ///
    /// SVG charts are inlined; PNG charts are referenced as `<id>.png`.
    pub fn to_html(&self, page_title: &str) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str("  <meta charset=\"utf-8\">\n");
        html.push_str(&format!("  <title>{}</title>\n", escape_html(page_title)));
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!("  <h1>{}</h1>\n", escape_html(page_title)));

        for element in &self.elements {
            let (width, height) = element.size;
            html.push_str(&format!(
                "  <div id=\"{}\" style=\"width: {}px; height: {}px;\">\n",
                element.id, width, height
            ));
            if let Some(snapshot) = &element.snapshot {
                match snapshot.chart.format {
                    OutputFormat::Svg => {
                        html.push_str(snapshot.chart.as_svg().unwrap_or_default());
                        html.push('\n');
                    }
                    OutputFormat::Png => {
                        html.push_str(&format!(
                            "    <img src=\"{}.png\" alt=\"{}\">\n",
                            element.id,
                            escape_html(&snapshot.options.title)
                        ));
                    }
                }
            }
            html.push_str("  </div>\n");
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    /// Write every drawn element as `<id>.<ext>` plus `index.html` into `dir`.
    pub fn write_to_dir(&self, dir: &Path, page_title: &str) -> Result<PathBuf, DocumentError> {
        let io_err = |path: &Path| {
            let path = path.display().to_string();
            move |source: std::io::Error| DocumentError::Io { path, source }
        };

        fs::create_dir_all(dir).map_err(io_err(dir))?;

        for element in &self.elements {
            if let (Some(snapshot), Some(name)) = (&element.snapshot, element.file_name()) {
                let path = dir.join(name);
                fs::write(&path, &snapshot.chart.data).map_err(io_err(&path))?;
                info!("Chart written: {:?}", path);
            }
        }

        let index = dir.join("index.html");
        fs::write(&index, self.to_html(page_title)).map_err(io_err(&index))?;
        info!("Page written: {:?}", index);

        Ok(index)
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
