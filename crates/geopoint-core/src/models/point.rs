//! Validated geographic point records.

use crate::error::{Axis, GeopointError, Result};
use crate::ingest::RowRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean Earth radius in meters used by [`haversine_m`]
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Tag value that marks a point of interest (compared case-insensitively)
pub const POI_TAG: &str = "poi";

/// A single validated lon/lat record with optional metadata.
///
/// Fields are private so a `Point` can only be obtained through [`Point::new`]
/// or [`Point::from_row`], both of which enforce the coordinate domains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint")]
pub struct Point {
    id: String,
    lon: f64,
    lat: f64,
    name: Option<String>,
    tag: Option<String>,
}

impl Point {
    /// Create a point, rejecting longitudes outside [-180, 180] and latitudes
    /// outside [-90, 90]. Longitude is checked first.
    pub fn new(
        id: impl Into<String>,
        lon: f64,
        lat: f64,
        name: Option<String>,
        tag: Option<String>,
    ) -> Result<Self> {
        check_axis(Axis::Longitude, lon)?;
        check_axis(Axis::Latitude, lat)?;

        Ok(Self { id: id.into(), lon, lat, name, tag })
    }

    /// Build a point from one tabular record.
    ///
    /// `id`, `lon` and `lat` are required. The `id` is taken as text, so an empty
    /// `id` cell gives an empty id; only a row without the cell is rejected.
    /// `name` and `tag` are optional and an empty cell counts as absent.
    pub fn from_row(row: &RowRecord) -> Result<Self> {
        let id = row
            .cell("id")
            .ok_or_else(|| GeopointError::MissingField { field: "id".to_string() })?;
        let lon = parse_coordinate(row, "lon")?;
        let lat = parse_coordinate(row, "lat")?;

        Self::new(id, lon, lat, row.optional("name"), row.optional("tag"))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Coordinate as a `(lon, lat)` pair
    pub fn to_tuple(&self) -> (f64, f64) {
        (self.lon, self.lat)
    }

    /// Great-circle distance to `other` in meters
    pub fn distance_to(&self, other: &Point) -> f64 {
        haversine_m(self.lon, self.lat, other.lon, other.lat)
    }

    /// True when the tag equals "poi" ignoring case
    pub fn is_poi(&self) -> bool {
        self.tag().unwrap_or_default().to_lowercase() == POI_TAG
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.id, self.lon, self.lat)?;
        if let Some(name) = &self.name {
            write!(f, " \"{}\"", name)?;
        }
        if let Some(tag) = &self.tag {
            write!(f, " [{}]", tag)?;
        }
        Ok(())
    }
}

/// Haversine distance in meters between two lon/lat pairs given in degrees.
///
/// Uses a spherical Earth of radius [`EARTH_RADIUS_M`]; poles and the
/// antimeridian get no special treatment beyond what the formula provides.
pub fn haversine_m(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    // rounding can push `a` just past 1 for near-antipodal pairs
    let a = a.min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

fn check_axis(axis: Axis, value: f64) -> Result<()> {
    let (min, max) = axis.bounds();
    // NaN fails the range test as well
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(GeopointError::out_of_range(axis, value))
    }
}

fn parse_coordinate(row: &RowRecord, field: &str) -> Result<f64> {
    let raw = row.require(field)?;
    raw.parse::<f64>().map_err(|_| GeopointError::InvalidNumber {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// Unchecked mirror of [`Point`] so deserialization goes through validation
#[derive(Deserialize)]
struct RawPoint {
    id: String,
    lon: f64,
    lat: f64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    tag: Option<String>,
}

impl TryFrom<RawPoint> for Point {
    type Error = GeopointError;

    fn try_from(raw: RawPoint) -> Result<Self> {
        Point::new(raw.id, raw.lon, raw.lat, raw.name, raw.tag)
    }
}
