//! GeoPoint Core - Point model, ingestion, and configuration
//!
//! This crate holds the validated point model, row-tolerant CSV ingestion and the
//! port definitions consumed by the export adapters.

pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod ports;

pub use error::{GeopointError, Result};
pub use models::{BoundingBox, Point, PointSet, TagCount};
