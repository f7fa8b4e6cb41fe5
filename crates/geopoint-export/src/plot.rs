//! Scatter previews rendered with plotters.

use geopoint_core::error::{GeopointError, Result};
use geopoint_core::ports::{ScatterPlot, ScatterRenderer};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use std::collections::HashMap;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

/// DejaVu Sans, distributed under the Bitstream Vera license (see `assets/DejaVuSans-LICENSE`)
static BUNDLED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Family name the bundled font is registered under
const BUNDLED_FAMILY: &str = "geopoint-sans";

/// Extensions the bitmap encoder recognizes; anything else is written as PNG
const RASTER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Range shown on an axis when there is nothing to plot
const EMPTY_LON_RANGE: Range<f64> = -180.0..180.0;
const EMPTY_LAT_RANGE: Range<f64> = -90.0..90.0;

/// Renders scatter plots to PNG, or to SVG when the output path ends in `.svg`.
///
/// Each call creates its own drawing area and flushes it before returning.
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    pub width: u32,
    pub height: u32,
    pub font_path: Option<PathBuf>,
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self { width: 1200, height: 900, font_path: None }
    }
}

impl PlottersRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, font_path: None }
    }

    pub fn with_font(mut self, font_path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(font_path.into());
        self
    }
}

impl ScatterRenderer for PlottersRenderer {
    fn render(&self, plot: &ScatterPlot<'_>, output_path: &Path) -> Result<()> {
        let parent = output_path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(parent) = parent {
            fs::create_dir_all(parent)?;
        }

        let render_error = |reason: String| GeopointError::Render {
            path: output_path.to_path_buf(),
            reason,
        };
        let family = font_family(self.font_path.as_deref()).map_err(render_error)?;
        let size = (self.width, self.height);

        match OutputKind::of(output_path) {
            OutputKind::Svg => {
                let root = SVGBackend::new(output_path, size).into_drawing_area();
                draw_scatter(&root, plot, &family).map_err(|e| render_error(e.to_string()))?;
            }
            OutputKind::Raster => {
                let root = BitMapBackend::new(output_path, size).into_drawing_area();
                draw_scatter(&root, plot, &family).map_err(|e| render_error(e.to_string()))?;
            }
            OutputKind::DefaultPng => {
                // the encoder picks its format from the extension, so draw to a
                // `.png` sibling and move it into place
                let staged = tempfile::Builder::new()
                    .prefix(".geopoint-preview")
                    .suffix(".png")
                    .tempfile_in(parent.unwrap_or_else(|| Path::new(".")))?;
                {
                    let root = BitMapBackend::new(staged.path(), size).into_drawing_area();
                    draw_scatter(&root, plot, &family)
                        .map_err(|e| render_error(e.to_string()))?;
                }
                staged.persist(output_path).map_err(|e| GeopointError::Io(e.error))?;
            }
        }

        tracing::info!("Wrote preview {}", output_path.display());
        Ok(())
    }
}

fn draw_scatter<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plot: &ScatterPlot<'_>,
    family: &str,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let x_range = padded_range(plot.xs, EMPTY_LON_RANGE);
    let y_range = padded_range(plot.ys, EMPTY_LAT_RANGE);

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .caption(plot.title, (family, 28))
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .label_style((family, 14))
        .axis_desc_style((family, 16))
        .x_desc(plot.x_label)
        .y_desc(plot.y_label)
        .draw()?;

    chart.draw_series(
        plot.xs.iter().zip(plot.ys.iter()).map(|(x, y)| Circle::new((*x, *y), 4, BLUE.filled())),
    )?;

    root.present()?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputKind {
    Svg,
    Raster,
    DefaultPng,
}

impl OutputKind {
    fn of(path: &Path) -> Self {
        let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("svg") => OutputKind::Svg,
            Some(ext) if RASTER_EXTENSIONS.contains(&ext) => OutputKind::Raster,
            _ => OutputKind::DefaultPng,
        }
    }
}

/// Data extent with a 5% margin; a single value gets a fixed half-degree margin
fn padded_range(values: &[f64], empty: Range<f64>) -> Range<f64> {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));

    if !min.is_finite() || !max.is_finite() {
        return empty;
    }

    let pad = if max > min { (max - min) * 0.05 } else { 0.5 };
    (min - pad)..(max + pad)
}

/// Font family for a render call.
///
/// A requested TTF is registered the first time its path is seen, under a family
/// name of its own; unreadable or invalid files fall back to the bundled font.
fn font_family(preferred: Option<&Path>) -> std::result::Result<String, String> {
    if let Some(path) = preferred {
        if let Some(family) = register_font_file(path) {
            return Ok(family);
        }
    }

    static BUNDLED_READY: OnceLock<bool> = OnceLock::new();
    let ready = *BUNDLED_READY
        .get_or_init(|| register_font(BUNDLED_FAMILY, FontStyle::Normal, BUNDLED_FONT).is_ok());

    if ready {
        Ok(BUNDLED_FAMILY.to_string())
    } else {
        Err("bundled font could not be loaded".to_string())
    }
}

fn register_font_file(path: &Path) -> Option<String> {
    static REGISTERED: OnceLock<Mutex<HashMap<PathBuf, Option<String>>>> = OnceLock::new();

    let mut registered = REGISTERED
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(family) = registered.get(path) {
        return family.clone();
    }

    let family = match fs::read(path) {
        Ok(bytes) => {
            let family = format!("geopoint-font-{}", registered.len());
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            match register_font(&family, FontStyle::Normal, bytes) {
                Ok(()) => {
                    tracing::debug!("Using font {} for previews", path.display());
                    Some(family)
                }
                Err(_) => {
                    tracing::warn!(
                        "{} is not a usable TTF font; using the bundled font",
                        path.display()
                    );
                    None
                }
            }
        }
        Err(e) => {
            tracing::warn!("Cannot read font {}: {}; using the bundled font", path.display(), e);
            None
        }
    };

    registered.insert(path.to_path_buf(), family.clone());
    family
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range(&[], -1.0..1.0), -1.0..1.0);
        assert_eq!(padded_range(&[10.0], -1.0..1.0), 9.5..10.5);

        let range = padded_range(&[0.0, 100.0, 50.0], -1.0..1.0);
        assert_eq!(range, -5.0..105.0);
    }

    #[test]
    fn test_output_kind() {
        assert_eq!(OutputKind::of(Path::new("out/preview.SVG")), OutputKind::Svg);
        assert_eq!(OutputKind::of(Path::new("out/preview.png")), OutputKind::Raster);
        assert_eq!(OutputKind::of(Path::new("out/preview.JPG")), OutputKind::Raster);
        assert_eq!(OutputKind::of(Path::new("preview")), OutputKind::DefaultPng);
        assert_eq!(OutputKind::of(Path::new("preview.img")), OutputKind::DefaultPng);
    }

    #[test]
    fn test_bundled_font_is_used_without_preference() {
        assert_eq!(font_family(None).unwrap(), BUNDLED_FAMILY);
    }

    #[test]
    fn test_unreadable_font_falls_back() {
        let family = font_family(Some(Path::new("no/such/font.ttf"))).unwrap();
        assert_eq!(family, BUNDLED_FAMILY);
    }

    #[test]
    fn test_each_font_path_gets_its_own_family() {
        let font = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join("DejaVuSans.ttf");

        let first = font_family(Some(font.as_path())).unwrap();
        let again = font_family(Some(font.as_path())).unwrap();

        assert!(first.starts_with("geopoint-font-"));
        assert_eq!(first, again);
    }
}
