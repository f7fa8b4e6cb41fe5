//! Export command implementation

use super::{apply_render_args, load_points, renderer};
use crate::cli::ExportArgs;
use crate::output::OutputWriter;
use crate::output_types::ExportOutput;
use anyhow::{bail, Context, Result};
use geopoint_core::config::LayeredConfig;
use geopoint_export::{JsonDocumentWriter, PointSetExt};

pub fn execute(args: ExportArgs, mut config: LayeredConfig, output: &OutputWriter) -> Result<()> {
    if args.plot.is_none() && args.summary.is_none() {
        bail!("Nothing to export: pass --plot <PATH> and/or --summary <PATH>");
    }

    apply_render_args(&mut config, &args.render)?;
    let (points, skipped) = load_points(&args.path, &config, output)?;

    let points = match &args.tag {
        Some(tag) => points.filter_by_tag(tag),
        None => points,
    };

    if let Some(plot_path) = &args.plot {
        points
            .plot_lat_lon_with(&renderer(&config), plot_path)
            .with_context(|| format!("Failed to write preview {}", plot_path.display()))?;
        output.success(format!("Preview written to {}", plot_path.display()));
    }

    if let Some(summary_path) = &args.summary {
        let writer = JsonDocumentWriter { pretty: config.pretty_json.value };
        points
            .generate_summary_json_with(&writer, summary_path)
            .with_context(|| format!("Failed to write summary {}", summary_path.display()))?;
        output.success(format!("Summary written to {}", summary_path.display()));
    }

    output.result(ExportOutput {
        source: args.path.display().to_string(),
        tag: args.tag,
        exported_points: points.count(),
        skipped_rows: skipped.len(),
        plot: args.plot.map(|p| p.display().to_string()),
        summary: args.summary.map(|p| p.display().to_string()),
    })
}
