//! GeoPoint Export - Scatter previews and summary reports
//!
//! This crate provides the plotters and serde_json adapters for the core ports,
//! and the [`PointSetExt`] extension trait that drives them.

pub mod plot;
pub mod summary;

pub use plot::PlottersRenderer;
pub use summary::{JsonDocumentWriter, SummaryReport};

use geopoint_core::error::Result;
use geopoint_core::models::PointSet;
use geopoint_core::ports::{DocumentWriter, ScatterPlot, ScatterRenderer};
use std::path::Path;

/// Title of a preview that has points to show
pub const PREVIEW_TITLE: &str = "Point Preview (lon vs lat)";

/// Title of the placeholder preview written for an empty set
pub const EMPTY_PREVIEW_TITLE: &str = "Preview Plot (No valid coordinates to plot)";

/// Export operations on a [`PointSet`]
pub trait PointSetExt {
    /// Write a longitude/latitude scatter preview with the default renderer
    fn plot_lat_lon(&self, output_path: impl AsRef<Path>) -> Result<()> {
        self.plot_lat_lon_with(&PlottersRenderer::default(), output_path)
    }

    /// Write a longitude/latitude scatter preview with `renderer`.
    ///
    /// An empty set still produces an image, titled to say there is no data.
    fn plot_lat_lon_with<R: ScatterRenderer>(
        &self,
        renderer: &R,
        output_path: impl AsRef<Path>,
    ) -> Result<()>;

    /// Build the summary report
    fn summary(&self) -> SummaryReport;

    /// Write the summary report as pretty-printed JSON
    fn generate_summary_json(&self, output_path: impl AsRef<Path>) -> Result<()> {
        self.generate_summary_json_with(&JsonDocumentWriter::default(), output_path)
    }

    /// Write the summary report with `writer`
    fn generate_summary_json_with<W: DocumentWriter>(
        &self,
        writer: &W,
        output_path: impl AsRef<Path>,
    ) -> Result<()> {
        writer.write(&self.summary(), output_path.as_ref())
    }
}

impl PointSetExt for PointSet {
    fn plot_lat_lon_with<R: ScatterRenderer>(
        &self,
        renderer: &R,
        output_path: impl AsRef<Path>,
    ) -> Result<()> {
        let lons = self.get_lon_list();
        let lats = self.get_lat_list();
        let title = if self.is_empty() { EMPTY_PREVIEW_TITLE } else { PREVIEW_TITLE };

        let plot = ScatterPlot {
            xs: &lons,
            ys: &lats,
            title,
            x_label: "Longitude",
            y_label: "Latitude",
        };
        renderer.render(&plot, output_path.as_ref())
    }

    fn summary(&self) -> SummaryReport {
        SummaryReport::from_point_set(self)
    }
}
