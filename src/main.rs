//! Chartify Line - CSV/JSON to line chart page generator
//!
//! Loads each configured table, draws it into its element and writes the
//! charts plus an `index.html` page to the output directory.

use anyhow::{bail, Context};
use chartify_line::charts::{Package, Visualization};
use chartify_line::config::{AppConfig, Cli};
use chartify_line::{draw_chart, logging, DataLoader, Document};
use clap::Parser;
use rayon::prelude::*;
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(&cli)?;
    logging::init(&config.log_level);

    if config.charts.is_empty() {
        bail!("No charts to draw: pass --data and --id, or list charts in --config");
    }

    // Tables load in parallel, drawing stays sequential
    let tables = config
        .charts
        .par_iter()
        .map(|job| {
            DataLoader::load(&job.data)
                .with_context(|| format!("Failed to load {}", job.data.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut document = Document::new();
    for job in &config.charts {
        document.create_element(&job.id, (config.render.width, config.render.height))?;
    }

    let mut viz = Visualization::load(&[Package::CoreChart], document, config.render.clone());
    for (job, rows) in config.charts.iter().zip(&tables) {
        draw_chart(&mut viz, rows, &job.id, &job.title)
            .with_context(|| format!("Failed to draw chart {}", job.id))?;
        info!("Chart {} drawn from {:?}", job.id, job.data);
    }

    let index = viz
        .document()
        .write_to_dir(&config.output_dir, &config.page_title)?;

    if cli.open {
        if let Err(e) = open::that(&index) {
            warn!("Could not open {:?}: {}", index, e);
        }
    }

    Ok(())
}
