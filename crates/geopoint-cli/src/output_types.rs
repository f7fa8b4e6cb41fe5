use geopoint_core::ingest::SkippedRow;
use geopoint_core::models::{BoundingBox, TagCount};
use serde::Serialize;

/// Output for inspect command
#[derive(Debug, Serialize)]
pub struct InspectOutput {
    pub source: String,
    pub total_points: usize,
    pub bbox: Option<BoundingBox>,
    pub poi_points: usize,
    pub tags: Vec<TagCount>,
    pub skipped_rows: Vec<SkippedRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<PointInfo>>,
}

#[derive(Debug, Serialize)]
pub struct PointInfo {
    pub id: String,
    pub lon: f64,
    pub lat: f64,
    pub name: Option<String>,
    pub tag: Option<String>,
}

/// Output for filter command
#[derive(Debug, Serialize)]
pub struct FilterOutput {
    pub source: String,
    pub tag: String,
    pub total_points: usize,
    pub matched_points: usize,
    pub bbox: Option<BoundingBox>,
}

/// Output for distance command
#[derive(Debug, Serialize)]
pub struct DistanceOutput {
    pub from: [f64; 2],
    pub to: [f64; 2],
    pub meters: f64,
    pub kilometers: f64,
}

/// Output for export command
#[derive(Debug, Serialize)]
pub struct ExportOutput {
    pub source: String,
    pub tag: Option<String>,
    pub exported_points: usize,
    pub skipped_rows: usize,
    pub plot: Option<String>,
    pub summary: Option<String>,
}

/// Output for run command
#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub source: String,
    pub total_points: usize,
    pub bbox: Option<BoundingBox>,
    pub poi_tag: String,
    pub poi_points: usize,
    pub poi_bbox: Option<BoundingBox>,
    pub skipped_rows: usize,
    pub preview: String,
    pub report: String,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub values: Vec<ConfigEntry>,
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub source: String,
}
