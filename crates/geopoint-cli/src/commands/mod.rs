//! Command implementations

mod config;
mod distance;
mod export;
mod filter;
mod inspect;
mod run;

use crate::cli::{Cli, Commands, RenderArgs};
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use geopoint_core::config::{CliConfigOverrides, LayeredConfig};
use geopoint_core::ingest::{CollectingDiagnostics, SkippedRow};
use geopoint_core::models::{BoundingBox, PointSet};
use geopoint_export::PlottersRenderer;
use std::path::Path;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Inspect(args) => inspect::execute(args, &config, &output),
        Commands::Filter(args) => filter::execute(args, &config, &output),
        Commands::Distance(args) => distance::execute(args, &output),
        Commands::Export(args) => export::execute(args, config, &output),
        Commands::Run(args) => run::execute(args, config, &output),
        Commands::Config => config::execute(&config, &output),
    }
}

/// Defaults, then the config file, then GEOPOINT_* variables, then global flags
fn load_config(cli: &Cli) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults()
        .load_file_if_present(cli.config.as_deref())?
        .load_from_env();

    config.update_from_cli(CliConfigOverrides { delimiter: cli.delimiter, ..Default::default() })?;
    Ok(config)
}

/// Apply per-command render flags on top of the layered config
fn apply_render_args(config: &mut LayeredConfig, args: &RenderArgs) -> Result<()> {
    config.update_from_cli(CliConfigOverrides {
        plot_width: args.width,
        plot_height: args.height,
        font_path: args.font.clone(),
        ..Default::default()
    })?;
    Ok(())
}

fn renderer(config: &LayeredConfig) -> PlottersRenderer {
    let renderer = PlottersRenderer::new(config.plot_width.value, config.plot_height.value);
    match &config.font_path.value {
        Some(font) => renderer.with_font(font),
        None => renderer,
    }
}

/// Load a point table, reporting every skipped row as a warning
fn load_points(
    path: &Path,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<(PointSet, Vec<SkippedRow>)> {
    let mut diagnostics = CollectingDiagnostics::new();
    let points = PointSet::from_csv_with(path, &config.ingest_options(), &mut diagnostics)
        .with_context(|| format!("Failed to load points from {}", path.display()))?;

    let skipped = diagnostics.into_skipped();
    for row in &skipped {
        tracing::debug!(row = row.row_number, "Skipped {}", row);
        output.warning(format!("Skipped {}", row));
    }

    Ok((points, skipped))
}

fn format_bbox(bbox: Option<BoundingBox>) -> String {
    bbox.map(|b| b.to_string()).unwrap_or_else(|| "(no data)".to_string())
}
