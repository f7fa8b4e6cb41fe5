use super::{IngestOptions, RowRecord};
use crate::error::{GeopointError, Result};
use std::borrow::Cow;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Columns every point table must provide
pub const REQUIRED_COLUMNS: [&str; 3] = ["id", "lon", "lat"];

/// Read a delimiter-separated file with a header row into records.
///
/// The whole file is materialized before returning. A missing file yields
/// [`GeopointError::DataSourceNotFound`]. Short rows are accepted; their absent
/// cells surface later as missing fields. Cells that are not valid UTF-8 are
/// decoded lossily so one bad byte only affects its own row.
pub fn read_rows(path: &Path, options: &IngestOptions) -> Result<Vec<RowRecord>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => GeopointError::DataSourceNotFound { path: path.to_path_buf() },
        _ => GeopointError::Io(e),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> =
        reader.byte_headers()?.iter().map(|h| decode_cell(h).into_owned()).collect();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            tracing::warn!(
                "{} has no '{}' column; every row will be skipped",
                path.display(),
                column
            );
        }
    }

    let mut rows = Vec::new();
    for (index, record) in reader.byte_records().enumerate() {
        let record = record?;
        let row_number = index + 1;
        if std::str::from_utf8(record.as_slice()).is_err() {
            tracing::warn!(
                row = row_number,
                "{} row {} is not valid UTF-8; undecodable bytes replaced",
                path.display(),
                row_number
            );
        }

        let cells = headers.iter().map(String::as_str).zip(record.iter().map(decode_cell));
        rows.push(RowRecord::from_pairs(row_number, cells));
    }

    tracing::debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn decode_cell(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_rows_with_semicolons() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "id;lon;lat;tag\nA;1.5;2.5;poi\nB;3;4\n").unwrap();

        let rows = read_rows(file.path(), &IngestOptions::with_delimiter(b';')).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("lon"), Some("1.5"));
        assert_eq!(rows[0].get("tag"), Some("poi"));
        assert_eq!(rows[1].row_number(), 2);
        assert_eq!(rows[1].get("tag"), None);
    }

    #[test]
    fn test_missing_file() {
        let result = read_rows(Path::new("does/not/exist.csv"), &IngestOptions::default());
        assert!(matches!(result, Err(GeopointError::DataSourceNotFound { .. })));
    }
}
