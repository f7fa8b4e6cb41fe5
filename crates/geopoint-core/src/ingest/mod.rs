//! Row-tolerant ingestion of tabular point data
//!
//! A source is read into [`RowRecord`]s in full, then every record goes through a
//! fallible parser. Records that fail with a row-level error are dropped and
//! reported to a [`RowDiagnostics`] sink; any other error aborts the batch.

mod row;
mod table;

pub use row::RowRecord;
pub use table::{read_rows, REQUIRED_COLUMNS};

use crate::error::Result;
use serde::Serialize;
use std::fmt;

/// Options for reading a delimiter-separated source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    pub delimiter: u8,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl IngestOptions {
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

/// A record that was left out of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based data row number
    pub row_number: usize,
    /// The row's `id` cell, when it has one
    pub id: Option<String>,
    pub reason: String,
}

impl fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "row {} (id {}): {}", self.row_number, id, self.reason),
            None => write!(f, "row {}: {}", self.row_number, self.reason),
        }
    }
}

/// Side channel that receives one event per skipped row
pub trait RowDiagnostics {
    fn row_skipped(&mut self, skipped: &SkippedRow);
}

/// Reports skipped rows as `tracing` warnings
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl RowDiagnostics for TracingDiagnostics {
    fn row_skipped(&mut self, skipped: &SkippedRow) {
        tracing::warn!(
            row = skipped.row_number,
            id = skipped.id.as_deref().unwrap_or("<none>"),
            "Skipping invalid row: {}",
            skipped.reason
        );
    }
}

/// Keeps skipped rows in memory for later inspection
#[derive(Debug, Default, Clone)]
pub struct CollectingDiagnostics {
    skipped: Vec<SkippedRow>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skipped(&self) -> &[SkippedRow] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn into_skipped(self) -> Vec<SkippedRow> {
        self.skipped
    }
}

impl RowDiagnostics for CollectingDiagnostics {
    fn row_skipped(&mut self, skipped: &SkippedRow) {
        self.skipped.push(skipped.clone());
    }
}

/// Parse every record, keeping successes in order and reporting row-level
/// failures to `diagnostics`.
///
/// Errors that are not row-level (see [`GeopointError::is_row_level`]) stop the
/// batch and are returned unchanged.
///
/// [`GeopointError::is_row_level`]: crate::error::GeopointError::is_row_level
pub fn parse_or_skip<I, T, F>(
    rows: I,
    mut parse: F,
    diagnostics: &mut dyn RowDiagnostics,
) -> Result<Vec<T>>
where
    I: IntoIterator<Item = RowRecord>,
    F: FnMut(&RowRecord) -> Result<T>,
{
    let mut parsed = Vec::new();

    for row in rows {
        match parse(&row) {
            Ok(item) => parsed.push(item),
            Err(err) if err.is_row_level() => {
                diagnostics.row_skipped(&SkippedRow {
                    row_number: row.row_number(),
                    id: row.id().map(str::to_string),
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    Ok(parsed)
}
