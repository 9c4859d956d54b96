//! Configuration Module
//! Command line arguments and the JSON configuration file.

use crate::charts::{OutputFormat, RenderConfig};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("--data requires --id")]
    MissingId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Svg,
    Png,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Svg => OutputFormat::Svg,
            FormatArg::Png => OutputFormat::Png,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "chartify-line", about = "Render line charts from CSV/JSON tables into an HTML page")]
pub struct Cli {
    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Table to chart (.csv or .json)
    #[arg(long)]
    pub data: Option<PathBuf>,
    /// Element id the chart is drawn into
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long, default_value = "")]
    pub title: String,
    /// Output directory
    #[arg(long)]
    pub out: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
    #[arg(long)]
    pub page_title: Option<String>,
    /// Open the generated page when done
    #[arg(long)]
    pub open: bool,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// One chart to draw: table file, target element and title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartJob {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub data: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output_dir: PathBuf,
    pub page_title: String,
    pub log_level: String,
    pub render: RenderConfig,
    pub charts: Vec<ChartJob>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("charts_out"),
            page_title: "Charts".to_string(),
            log_level: "info".to_string(),
            render: RenderConfig::default(),
            charts: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Resolve the effective configuration: file first, then CLI overrides.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(out) = &cli.out {
            config.output_dir = out.clone();
        }
        if let Some(format) = cli.format {
            config.render.format = format.into();
        }
        if let Some(page_title) = &cli.page_title {
            config.page_title = page_title.clone();
        }
        match cli.verbose {
            0 => {}
            1 => config.log_level = "debug".to_string(),
            _ => config.log_level = "trace".to_string(),
        }

        if let Some(data) = &cli.data {
            let id = cli.id.clone().ok_or(ConfigError::MissingId)?;
            config.charts.push(ChartJob {
                id,
                title: cli.title.clone(),
                data: data.clone(),
            });
        }

        Ok(config)
    }
}
