//! Port trait definitions
//!
//! These traits describe the output collaborators; adapters live in `geopoint-export`.

use crate::error::Result;
use serde::Serialize;
use std::path::Path;

/// Scatter plot request. Holds no drawing state; a renderer builds and tears
/// down its canvas within a single call.
#[derive(Debug, Clone, Copy)]
pub struct ScatterPlot<'a> {
    pub xs: &'a [f64],
    pub ys: &'a [f64],
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
}

/// Renders x/y scatter plots to image files
pub trait ScatterRenderer {
    fn render(&self, plot: &ScatterPlot<'_>, output_path: &Path) -> Result<()>;
}

/// Writes structured documents to text files
pub trait DocumentWriter {
    fn write<T: Serialize + ?Sized>(&self, document: &T, output_path: &Path) -> Result<()>;
}
