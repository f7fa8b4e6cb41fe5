//! Run command implementation
//!
//! The whole analyst workflow in one command: load, report, filter, export.

use super::{apply_render_args, format_bbox, load_points, renderer};
use crate::cli::RunArgs;
use crate::output::OutputWriter;
use crate::output_types::RunOutput;
use anyhow::{Context, Result};
use geopoint_core::config::LayeredConfig;
use geopoint_export::{JsonDocumentWriter, PointSetExt};

const PREVIEW_FILE: &str = "preview.png";
const REPORT_FILE: &str = "report.json";

pub fn execute(args: RunArgs, mut config: LayeredConfig, output: &OutputWriter) -> Result<()> {
    apply_render_args(&mut config, &args.render)?;
    let (points, skipped) = load_points(&args.path, &config, output)?;

    output.section("All points");
    output.kv("Count", points.count());
    output.kv("Bounding box", format_bbox(points.bbox()));

    let poi_tag = config.poi_tag.value.clone();
    let pois = points.filter_by_tag(&poi_tag);

    output.section(format!("Tagged '{}'", poi_tag));
    output.kv("Count", pois.count());
    output.kv("Bounding box", format_bbox(pois.bbox()));

    let preview_path = args.output_dir.join(PREVIEW_FILE);
    let report_path = args.output_dir.join(REPORT_FILE);

    points
        .plot_lat_lon_with(&renderer(&config), &preview_path)
        .with_context(|| format!("Failed to write preview {}", preview_path.display()))?;
    let writer = JsonDocumentWriter { pretty: config.pretty_json.value };
    points
        .generate_summary_json_with(&writer, &report_path)
        .with_context(|| format!("Failed to write summary {}", report_path.display()))?;

    output.section("Artifacts");
    output.success(format!("Preview written to {}", preview_path.display()));
    output.success(format!("Summary written to {}", report_path.display()));

    output.result(RunOutput {
        source: args.path.display().to_string(),
        total_points: points.count(),
        bbox: points.bbox(),
        poi_tag,
        poi_points: pois.count(),
        poi_bbox: pois.bbox(),
        skipped_rows: skipped.len(),
        preview: preview_path.display().to_string(),
        report: report_path.display().to_string(),
    })
}
