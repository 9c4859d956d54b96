//! Line chart display options and rendering configuration.

use serde::{Deserialize, Serialize};

/// Line interpolation style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveType {
    /// Straight segments between points
    #[default]
    None,
    /// Smoothed curve through every point
    Function,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Bottom,
    Top,
    #[default]
    Right,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Legend {
    pub position: LegendPosition,
}

/// Options handed to the line chart draw routine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChartOptions {
    pub title: String,
    pub curve_type: CurveType,
    pub legend: Legend,
}

impl LineChartOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_curve_type(mut self, curve_type: CurveType) -> Self {
        self.curve_type = curve_type;
        self
    }

    pub fn with_legend_position(mut self, position: LegendPosition) -> Self {
        self.legend.position = position;
        self
    }
}

/// Rendered image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Svg,
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

/// Static rendering settings shared by every chart drawn through a
/// `Visualization`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
    pub font_family: String,
    pub title_font_size: u32,
    pub font_size: u32,
    pub line_width: u32,
    /// Interpolated points per interval when smoothing
    pub curve_samples: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 500,
            format: OutputFormat::Svg,
            font_family: "sans-serif".to_string(),
            title_font_size: 20,
            font_size: 14,
            line_width: 2,
            curve_samples: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn options_serialize_in_camel_case() {
        let options = LineChartOptions::new("Sales")
            .with_curve_type(CurveType::Function)
            .with_legend_position(LegendPosition::Bottom);

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "title": "Sales",
                "curveType": "function",
                "legend": { "position": "bottom" }
            })
        );
    }

    #[test]
    fn render_config_fills_missing_fields() {
        let config: RenderConfig =
            serde_json::from_str(r#"{ "width": 640, "format": "png" }"#).unwrap();

        assert_eq!(config.width, 640);
        assert_eq!(config.height, 500);
        assert_eq!(config.format, OutputFormat::Png);
        assert_eq!(config.format.extension(), "png");
    }
}
