//! JSON summary reports.

use geopoint_core::error::Result;
use geopoint_core::models::{BoundingBox, PointSet, TagCount};
use geopoint_core::ports::DocumentWriter;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Aggregate report of a point set.
///
/// Serialized shape:
/// `{"total_points": n, "bbox": [min_lon, min_lat, max_lon, max_lat] | null, "tags": [{"<tag>": count}, ...]}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub total_points: usize,
    pub bbox: Option<BoundingBox>,
    pub tags: Vec<TagCount>,
}

impl SummaryReport {
    pub fn from_point_set(points: &PointSet) -> Self {
        Self { total_points: points.count(), bbox: points.bbox(), tags: points.tag_counts() }
    }
}

/// Writes documents as UTF-8 JSON
#[derive(Debug, Clone, Copy)]
pub struct JsonDocumentWriter {
    /// Two-space indented output when true
    pub pretty: bool,
}

impl Default for JsonDocumentWriter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl DocumentWriter for JsonDocumentWriter {
    fn write<T: Serialize + ?Sized>(&self, document: &T, output_path: &Path) -> Result<()> {
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(output_path)?);
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, document)?;
        } else {
            serde_json::to_writer(&mut writer, document)?;
        }
        writeln!(writer)?;
        writer.flush()?;

        tracing::info!("Wrote summary {}", output_path.display());
        Ok(())
    }
}
