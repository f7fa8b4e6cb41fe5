//! Filter command implementation

use super::{format_bbox, load_points};
use crate::cli::FilterArgs;
use crate::output::OutputWriter;
use crate::output_types::FilterOutput;
use anyhow::Result;
use geopoint_core::config::LayeredConfig;

pub fn execute(args: FilterArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let (points, _) = load_points(&args.path, config, output)?;
    let matched = points.filter_by_tag(&args.tag);

    if output.is_json() {
        return output.result(FilterOutput {
            source: args.path.display().to_string(),
            tag: args.tag,
            total_points: points.count(),
            matched_points: matched.count(),
            bbox: matched.bbox(),
        });
    }

    output.section(format!("Points tagged '{}'", args.tag));
    output.kv("Matched", format!("{} of {}", matched.count(), points.count()));
    output.kv("Bounding box", format_bbox(matched.bbox()));

    if matched.is_empty() {
        output.info("No points carry this tag (matching is exact and case-sensitive)");
    }

    Ok(())
}
