//! Line Chart Plotter Module
//! Renders a `DataTable` as a line chart image using plotters.
//!
//! Layout:
//! 1. Title across the top (omitted when empty)
//! 2. Legend strip pinned to the configured side
//! 3. Plot area: column 0 is the domain (x), every other column is a series

use crate::charts::curve;
use crate::charts::error::{draw_err, RenderError};
use crate::charts::{CurveType, LegendPosition, LineChartOptions, OutputFormat, RenderConfig};
use crate::data::{ColumnType, DataTable};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Cursor;
use std::ops::Range;

/// Series color palette
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(51, 102, 204),  // Blue
    RGBColor(220, 57, 18),   // Red
    RGBColor(255, 153, 0),   // Orange
    RGBColor(16, 150, 24),   // Green
    RGBColor(153, 0, 153),   // Purple
    RGBColor(0, 153, 198),   // Cyan
    RGBColor(221, 68, 119),  // Pink
    RGBColor(102, 170, 0),   // Lime
    RGBColor(184, 46, 46),   // Dark Red
    RGBColor(49, 99, 149),   // Steel Blue
];

const LEGEND_SWATCH: i32 = 24;
const LEGEND_GAP: i32 = 6;
const LEGEND_SPACING: i32 = 18;

/// Encoded chart image.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub format: OutputFormat,
    pub data: Vec<u8>,
}

impl RenderedChart {
    /// SVG markup, `None` for raster output.
    pub fn as_svg(&self) -> Option<&str> {
        match self.format {
            OutputFormat::Svg => std::str::from_utf8(&self.data).ok(),
            OutputFormat::Png => None,
        }
    }
}

/// One table column turned into drawable line segments.
#[derive(Debug, Clone, PartialEq)]
struct SeriesData {
    label: String,
    segments: Vec<Vec<(f64, f64)>>,
}

/// Table data mapped into chart coordinates.
#[derive(Debug, Clone, PartialEq)]
struct PreparedChart {
    /// Category labels for a discrete domain axis
    categories: Option<Vec<String>>,
    x_range: Range<f64>,
    y_range: Range<f64>,
    series: Vec<SeriesData>,
}

impl PreparedChart {
    fn from_table(table: &DataTable, curve_type: CurveType, samples: usize) -> Result<Self, RenderError> {
        if table.column_count() < 2 {
            return Err(RenderError::NotEnoughColumns {
                found: table.column_count(),
            });
        }

        for (column, col) in table.columns().iter().enumerate().skip(1) {
            if col.kind != ColumnType::Number {
                return Err(RenderError::InvalidSeriesColumn {
                    column,
                    label: col.label.clone(),
                    kind: col.kind,
                });
            }
        }

        let discrete = table.column_type(0) != Some(ColumnType::Number);
        let domain: Vec<Option<f64>> = (0..table.row_count())
            .map(|row| {
                if discrete {
                    Some(row as f64)
                } else {
                    table.number(row, 0)
                }
            })
            .collect();

        let categories = discrete.then(|| {
            (0..table.row_count())
                .map(|row| table.value(row, 0).map(|v| v.to_string()).unwrap_or_default())
                .collect::<Vec<String>>()
        });

        let mut series = Vec::with_capacity(table.column_count() - 1);
        for column in 1..table.column_count() {
            // Nulls split the line into separate segments
            let mut segments: Vec<Vec<(f64, f64)>> = Vec::new();
            let mut current: Vec<(f64, f64)> = Vec::new();
            for (row, x) in domain.iter().enumerate() {
                match (x, table.number(row, column)) {
                    (Some(x), Some(y)) => current.push((*x, y)),
                    _ => {
                        if !current.is_empty() {
                            segments.push(std::mem::take(&mut current));
                        }
                    }
                }
            }
            if !current.is_empty() {
                segments.push(current);
            }

            if curve_type == CurveType::Function {
                segments = segments
                    .iter()
                    .map(|segment| curve::smooth(segment, samples))
                    .collect();
            }

            series.push(SeriesData {
                label: table.column_label(column).unwrap_or_default().to_string(),
                segments,
            });
        }

        let x_range = match &categories {
            Some(labels) => -0.5..(labels.len().max(1) as f64 - 0.5),
            None => {
                let xs: Vec<f64> = domain.iter().flatten().copied().collect();
                span(&xs).map(|(lo, hi)| widen(lo, hi)).unwrap_or(0.0..1.0)
            }
        };

        let ys: Vec<f64> = series
            .iter()
            .flat_map(|s| s.segments.iter().flatten().map(|&(_, y)| y))
            .collect();
        let y_range = span(&ys).map(|(lo, hi)| pad_range(lo, hi)).unwrap_or(0.0..1.0);

        Ok(Self {
            categories,
            x_range,
            y_range,
            series,
        })
    }
}

fn span(values: &[f64]) -> Option<(f64, f64)> {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    finite.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn widen(lo: f64, hi: f64) -> Range<f64> {
    if hi > lo {
        lo..hi
    } else {
        (lo - 1.0)..(hi + 1.0)
    }
}

/// Value range with 10% padding on both sides (at least 1.0).
fn pad_range(lo: f64, hi: f64) -> Range<f64> {
    let padding = ((hi - lo) * 0.1).max(1.0);
    (lo - padding)..(hi + padding)
}

/// Short numeric label: "2.50" -> "2.5", "3.00" -> "3".
fn format_number(v: f64) -> String {
    let formatted = format!("{:.2}", v);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Rough text advance for legend layout.
fn text_width(text: &str, font_size: u32) -> i32 {
    (text.chars().count() as f64 * font_size as f64 * 0.6).ceil() as i32
}

/// Draws line charts with plotters.
pub struct LineChartPlotter;

impl LineChartPlotter {
    /// Render `table` with `options` into an image of `size` pixels.
    pub fn render(
        table: &DataTable,
        options: &LineChartOptions,
        config: &RenderConfig,
        size: (u32, u32),
    ) -> Result<RenderedChart, RenderError> {
        let prepared = PreparedChart::from_table(table, options.curve_type, config.curve_samples)?;

        let data = match config.format {
            OutputFormat::Svg => Self::render_svg(&prepared, options, config, size)?.into_bytes(),
            OutputFormat::Png => Self::render_png(&prepared, options, config, size)?,
        };

        Ok(RenderedChart {
            format: config.format,
            data,
        })
    }

    fn render_svg(
        prepared: &PreparedChart,
        options: &LineChartOptions,
        config: &RenderConfig,
        size: (u32, u32),
    ) -> Result<String, RenderError> {
        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, size).into_drawing_area();
            Self::draw_on(&root, prepared, options, config)?;
            root.present().map_err(draw_err)?;
        }
        Ok(buffer)
    }

    fn render_png(
        prepared: &PreparedChart,
        options: &LineChartOptions,
        config: &RenderConfig,
        size: (u32, u32),
    ) -> Result<Vec<u8>, RenderError> {
        let (width, height) = size;
        let mut pixels = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut pixels, size).into_drawing_area();
            Self::draw_on(&root, prepared, options, config)?;
            root.present().map_err(draw_err)?;
        }

        let image = image::RgbImage::from_raw(width, height, pixels)
            .ok_or_else(|| RenderError::Encode("pixel buffer size mismatch".to_string()))?;
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        Ok(bytes)
    }

    fn draw_on<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        prepared: &PreparedChart,
        options: &LineChartOptions,
        config: &RenderConfig,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE).map_err(draw_err)?;

        let titled = if options.title.is_empty() {
            None
        } else {
            let title_font = (config.font_family.as_str(), config.title_font_size as f64)
                .into_font()
                .color(&BLACK);
            Some(root.titled(&options.title, title_font).map_err(draw_err)?)
        };
        let body = titled.as_ref().unwrap_or(root);

        let labels: Vec<&str> = prepared.series.iter().map(|s| s.label.as_str()).collect();
        let (width, height) = body.dim_in_pixel();
        let strip = (config.font_size as i32 * 2 + 10).min(height as i32 / 3);

        let (plot_area, legend_area) = match options.legend.position {
            LegendPosition::Bottom => {
                let (plot, legend) = body.split_vertically(height as i32 - strip);
                (plot, Some(legend))
            }
            LegendPosition::Top => {
                let (legend, plot) = body.split_vertically(strip);
                (plot, Some(legend))
            }
            LegendPosition::Right => {
                let widest = labels
                    .iter()
                    .map(|l| text_width(l, config.font_size))
                    .max()
                    .unwrap_or(0);
                let side = (LEGEND_SWATCH + LEGEND_GAP + widest + 20).min(width as i32 / 3);
                let (plot, legend) = body.split_horizontally(width as i32 - side);
                (plot, Some(legend))
            }
            LegendPosition::None => (body.margin(0, 0, 0, 0), None),
        };

        Self::draw_plot(&plot_area, prepared, config)?;

        if let Some(area) = legend_area {
            Self::draw_legend(&area, &labels, options.legend.position, config)?;
        }

        Ok(())
    }

    fn draw_plot<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        prepared: &PreparedChart,
        config: &RenderConfig,
    ) -> Result<(), RenderError> {
        let mut chart = ChartBuilder::on(area)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(prepared.x_range.clone(), prepared.y_range.clone())
            .map_err(draw_err)?;

        let label_font = (config.font_family.as_str(), config.font_size as f64).into_font();
        let format_x = |x: &f64| match &prepared.categories {
            Some(categories) => {
                let idx = x.round();
                if (x - idx).abs() < 1e-6 && idx >= 0.0 {
                    categories.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            }
            None => format_number(*x),
        };
        let format_y = |y: &f64| format_number(*y);
        let x_label_count = prepared
            .categories
            .as_ref()
            .map(|c| c.len().clamp(1, 12))
            .unwrap_or(10);

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(x_label_count)
            .y_labels(8)
            .x_label_style(label_font.clone())
            .y_label_style(label_font)
            .x_label_formatter(&format_x)
            .y_label_formatter(&format_y)
            .draw()
            .map_err(draw_err)?;

        for (i, series) in prepared.series.iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            for segment in &series.segments {
                if let [point] = segment.as_slice() {
                    chart
                        .draw_series(std::iter::once(Circle::new(*point, 3, color.filled())))
                        .map_err(draw_err)?;
                    continue;
                }
                chart
                    .draw_series(LineSeries::new(
                        segment.iter().copied(),
                        color.stroke_width(config.line_width),
                    ))
                    .map_err(draw_err)?;
            }
        }

        Ok(())
    }

    fn draw_legend<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        labels: &[&str],
        position: LegendPosition,
        config: &RenderConfig,
    ) -> Result<(), RenderError> {
        let (width, height) = area.dim_in_pixel();
        let font = (config.font_family.as_str(), config.font_size as f64)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));

        let entry = |x: i32, y: i32, i: usize, label: &str| -> Result<(), RenderError> {
            let color = PALETTE[i % PALETTE.len()];
            area.draw(&PathElement::new(
                vec![(x, y), (x + LEGEND_SWATCH, y)],
                color.stroke_width(config.line_width + 1),
            ))
            .map_err(draw_err)?;
            area.draw(&Text::new(
                label.to_string(),
                (x + LEGEND_SWATCH + LEGEND_GAP, y),
                font.clone(),
            ))
            .map_err(draw_err)?;
            Ok(())
        };

        match position {
            LegendPosition::Bottom | LegendPosition::Top => {
                let widths: Vec<i32> = labels
                    .iter()
                    .map(|l| LEGEND_SWATCH + LEGEND_GAP + text_width(l, config.font_size))
                    .collect();
                let total = widths.iter().sum::<i32>()
                    + LEGEND_SPACING * (widths.len() as i32 - 1).max(0);
                let mut x = ((width as i32 - total) / 2).max(0);
                let y = height as i32 / 2;
                for (i, (label, w)) in labels.iter().zip(&widths).enumerate() {
                    entry(x, y, i, label)?;
                    x += w + LEGEND_SPACING;
                }
            }
            LegendPosition::Right => {
                let line_height = config.font_size as i32 * 2;
                let mut y = line_height;
                for (i, label) in labels.iter().enumerate() {
                    entry(10, y, i, label)?;
                    y += line_height;
                }
            }
            LegendPosition::None => {}
        }

        Ok(())
    }
}
