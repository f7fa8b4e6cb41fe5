//! Integration tests for CSV ingestion into a PointSet

use geopoint_core::error::GeopointError;
use geopoint_core::ingest::{CollectingDiagnostics, IngestOptions};
use geopoint_core::PointSet;
use std::fs;
use tempfile::TempDir;

fn write_csv(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_invalid_row_is_skipped_and_reported() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(
        &temp_dir,
        "points.csv",
        "id,lon,lat,name,tag\n\
         A,121.0,14.6,Manila,poi\n\
         B,121.2,95,Nowhere,poi\n\
         C,121.4,14.23,Cavite,road\n",
    );

    let mut diagnostics = CollectingDiagnostics::new();
    let set = PointSet::from_csv_with(&path, &IngestOptions::default(), &mut diagnostics).unwrap();

    assert_eq!(set.count(), 2);
    let ids: Vec<&str> = set.iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec!["A", "C"]);

    assert_eq!(diagnostics.len(), 1);
    let skipped = &diagnostics.skipped()[0];
    assert_eq!(skipped.id.as_deref(), Some("B"));
    assert_eq!(skipped.row_number, 2);
    assert!(skipped.reason.contains("Latitude"));
}

#[test]
fn test_non_numeric_and_missing_coordinates_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(
        &temp_dir,
        "messy.csv",
        "id,lon,lat\n\
         A,10,20\n\
         B,ten,20\n\
         C,,20\n\
         D,-5,30\n\
         E,15\n",
    );

    let mut diagnostics = CollectingDiagnostics::new();
    let set = PointSet::from_csv_with(&path, &IngestOptions::default(), &mut diagnostics).unwrap();

    assert_eq!(set.count(), 2);
    let skipped_ids: Vec<_> =
        diagnostics.skipped().iter().map(|s| s.id.clone().unwrap()).collect();
    assert_eq!(skipped_ids, vec!["B", "C", "E"]);
}

#[test]
fn test_optional_columns_absent() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(&temp_dir, "plain.csv", "id,lon,lat\n1,0,0\n2,1,1\n");

    let set = PointSet::from_csv(&path).unwrap();

    assert_eq!(set.count(), 2);
    assert!(set.iter().all(|p| p.name().is_none() && p.tag().is_none()));
    assert_eq!(set.tag_counts().len(), 1);
}

#[test]
fn test_tab_separated_source() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(&temp_dir, "points.tsv", "id\tlon\tlat\ttag\nA\t1\t2\tpoi\n");

    let mut diagnostics = CollectingDiagnostics::new();
    let set =
        PointSet::from_csv_with(&path, &IngestOptions::with_delimiter(b'\t'), &mut diagnostics)
            .unwrap();

    assert_eq!(set.count(), 1);
    assert_eq!(set.points()[0].tag(), Some("poi"));
    assert!(diagnostics.is_empty());
}

#[test]
fn test_missing_file_fails_ingestion() {
    let result = PointSet::from_csv("does/not/exist.csv");

    match result {
        Err(GeopointError::DataSourceNotFound { path }) => {
            assert!(path.ends_with("exist.csv"));
        }
        other => panic!("expected DataSourceNotFound, got {:?}", other),
    }
}

#[test]
fn test_header_only_file_is_empty_set() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(&temp_dir, "empty.csv", "id,lon,lat\n");

    let set = PointSet::from_csv(&path).unwrap();

    assert!(set.is_empty());
    assert_eq!(set.bbox(), None);
}

#[test]
fn test_invalid_utf8_stays_within_its_row() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("latin1.csv");
    let mut content = b"id,lon,lat,name\nA,1,2,ok\nB,3,4,caf".to_vec();
    content.push(0xE9);
    content.extend_from_slice(b"\nC,5,6,ok\nD,7,");
    content.push(0xFF);
    content.extend_from_slice(b",bad\n");
    fs::write(&path, content).unwrap();

    let mut diagnostics = CollectingDiagnostics::new();
    let set = PointSet::from_csv_with(&path, &IngestOptions::default(), &mut diagnostics).unwrap();

    let ids: Vec<&str> = set.iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
    assert_eq!(set.points()[1].name(), Some("caf\u{FFFD}"));

    // an undecodable coordinate is a bad number like any other
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.skipped()[0].id.as_deref(), Some("D"));
    assert_eq!(diagnostics.skipped()[0].row_number, 4);
}

#[test]
fn test_empty_id_cell_is_kept() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(&temp_dir, "anon.csv", "id,lon,lat\n,1,2\nB,3,4\n");

    let mut diagnostics = CollectingDiagnostics::new();
    let set = PointSet::from_csv_with(&path, &IngestOptions::default(), &mut diagnostics).unwrap();

    assert_eq!(set.count(), 2);
    assert_eq!(set.points()[0].id(), "");
    assert!(diagnostics.is_empty());
}
