//! Ordered collections of validated points.

use crate::error::Result;
use crate::ingest::{self, IngestOptions, RowDiagnostics, TracingDiagnostics};
use crate::models::bbox::BoundingBox;
use crate::models::point::Point;
use crate::models::tags::{count_tags, TagCount};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Points in source order. Every element passed validation when it was built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a comma-separated file, skipping invalid rows with a `tracing` warning
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_csv_with(path, &IngestOptions::default(), &mut TracingDiagnostics)
    }

    /// Load a delimiter-separated file, reporting skipped rows to `diagnostics`.
    ///
    /// A missing file fails the whole call; a row whose coordinates are missing,
    /// non-numeric or out of range is left out and reported.
    pub fn from_csv_with(
        path: impl AsRef<Path>,
        options: &IngestOptions,
        diagnostics: &mut dyn RowDiagnostics,
    ) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading points from {}", path.display());

        let rows = ingest::read_rows(path, options)?;
        let total = rows.len();
        let points = ingest::parse_or_skip(rows, Point::from_row, diagnostics)?;

        tracing::debug!("Kept {} of {} rows from {}", points.len(), total, path.display());
        Ok(Self::new(points))
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn count(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(min_lon, min_lat, max_lon, max_lat)` over all points, `None` when empty
    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::from_coords(self.points.iter().map(Point::to_tuple))
    }

    /// New set with the points whose tag is exactly `tag` (case-sensitive)
    pub fn filter_by_tag(&self, tag: &str) -> PointSet {
        self.points.iter().filter(|p| p.tag() == Some(tag)).cloned().collect()
    }

    /// New set with the points tagged "poi" in any letter case
    pub fn pois(&self) -> PointSet {
        self.points.iter().filter(|p| p.is_poi()).cloned().collect()
    }

    pub fn get_lat_list(&self) -> Vec<f64> {
        self.points.iter().map(Point::lat).collect()
    }

    pub fn get_lon_list(&self) -> Vec<f64> {
        self.points.iter().map(Point::lon).collect()
    }

    /// Occurrences of each tag value (untagged points included) in first-seen order
    pub fn tag_counts(&self) -> Vec<TagCount> {
        count_tags(self.points.iter().map(Point::tag))
    }
}

impl FromIterator<Point> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for PointSet {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
