use clap::{Args, Parser, Subcommand};
use geopoint_core::config::parse_delimiter;
use std::path::PathBuf;

/// GeoPoint - validate, query and export geographic point tables
#[derive(Parser, Debug)]
#[command(name = "geopoint")]
#[command(about = "Validate, query and export geographic point tables", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./geopoint.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Field delimiter of the input table (a single character, or "tab")
    #[arg(long, global = true, value_parser = parse_delimiter_arg)]
    pub delimiter: Option<char>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a point table and show count, bounding box and tags
    Inspect(InspectArgs),

    /// Show the points carrying an exact tag
    Filter(FilterArgs),

    /// Great-circle distance between two lon/lat pairs
    Distance(DistanceArgs),

    /// Write a scatter preview and/or a JSON summary
    Export(ExportArgs),

    /// Load, filter by the POI tag, and write preview and report in one go
    Run(RunArgs),

    /// Show effective configuration and where each value comes from
    Config,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Path to the point table (CSV with id, lon, lat and optional name, tag columns)
    pub path: PathBuf,

    /// List every valid point
    #[arg(long)]
    pub points: bool,
}

#[derive(Parser, Debug)]
pub struct FilterArgs {
    /// Path to the point table
    pub path: PathBuf,

    /// Tag to match (exact, case-sensitive)
    #[arg(long)]
    pub tag: String,
}

#[derive(Parser, Debug)]
pub struct DistanceArgs {
    /// Longitude of the first point
    #[arg(allow_negative_numbers = true)]
    pub lon1: f64,

    /// Latitude of the first point
    #[arg(allow_negative_numbers = true)]
    pub lat1: f64,

    /// Longitude of the second point
    #[arg(allow_negative_numbers = true)]
    pub lon2: f64,

    /// Latitude of the second point
    #[arg(allow_negative_numbers = true)]
    pub lat2: f64,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Path to the point table
    pub path: PathBuf,

    /// Write a scatter preview to this path (.png, or .svg for vector output)
    #[arg(long, value_name = "PATH")]
    pub plot: Option<PathBuf>,

    /// Write the JSON summary report to this path
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,

    /// Export only the points carrying this exact tag
    #[arg(long)]
    pub tag: Option<String>,

    #[command(flatten)]
    pub render: RenderArgs,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the point table
    pub path: PathBuf,

    /// Directory receiving preview.png and report.json
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub render: RenderArgs,
}

/// Preview rendering overrides
#[derive(Args, Debug, Default)]
pub struct RenderArgs {
    /// Preview width in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Preview height in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    /// TTF font used for preview titles and labels
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,
}

fn parse_delimiter_arg(s: &str) -> Result<char, String> {
    parse_delimiter(s).map_err(|e| e.to_string())
}
