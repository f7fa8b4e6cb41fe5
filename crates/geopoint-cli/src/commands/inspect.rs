//! Inspect command implementation

use super::{format_bbox, load_points};
use crate::cli::InspectArgs;
use crate::output::OutputWriter;
use crate::output_types::{InspectOutput, PointInfo};
use anyhow::Result;
use geopoint_core::config::LayeredConfig;
use tabled::Tabled;

#[derive(Tabled)]
struct TagRow {
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Points")]
    count: usize,
}

#[derive(Tabled)]
struct PointRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Lon")]
    lon: f64,
    #[tabled(rename = "Lat")]
    lat: f64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Tag")]
    tag: String,
}

pub fn execute(args: InspectArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let (points, skipped) = load_points(&args.path, config, output)?;
    let tags = points.tag_counts();
    let poi_points = points.pois().count();

    if output.is_json() {
        let listed = args.points.then(|| {
            points
                .iter()
                .map(|p| PointInfo {
                    id: p.id().to_string(),
                    lon: p.lon(),
                    lat: p.lat(),
                    name: p.name().map(str::to_string),
                    tag: p.tag().map(str::to_string),
                })
                .collect()
        });

        return output.result(InspectOutput {
            source: args.path.display().to_string(),
            total_points: points.count(),
            bbox: points.bbox(),
            poi_points,
            tags,
            skipped_rows: skipped,
            points: listed,
        });
    }

    output.section("Point Table");
    output.kv("Source", args.path.display());
    output.kv("Valid points", points.count());
    output.kv("Skipped rows", skipped.len());
    output.kv("Bounding box", format_bbox(points.bbox()));
    output.kv("POIs", poi_points);

    output.section("Tags");
    let rows: Vec<TagRow> = tags
        .iter()
        .map(|t| TagRow {
            tag: t.tag.clone().unwrap_or_else(|| "(none)".to_string()),
            count: t.count,
        })
        .collect();
    output.table(rows);

    if args.points {
        output.section("Points");
        let rows: Vec<PointRow> = points
            .iter()
            .map(|p| PointRow {
                id: p.id().to_string(),
                lon: p.lon(),
                lat: p.lat(),
                name: p.name().unwrap_or("").to_string(),
                tag: p.tag().unwrap_or("").to_string(),
            })
            .collect();
        output.table(rows);
    }

    Ok(())
}
