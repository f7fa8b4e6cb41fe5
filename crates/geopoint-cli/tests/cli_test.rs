//! Integration tests for the geopoint binary
//!
//! These tests run the built executable against temporary point tables.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const POINTS_CSV: &str = "id,lon,lat,name,tag\n\
A,121.0,14.6,Manila,poi\n\
B,121.2,95,Nowhere,poi\n\
C,121.4,14.23,Cavite,road\n\
D,120.9,14.5,,\n";

fn geopoint_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_geopoint"))
}

fn geopoint(dir: &Path, args: &[&str]) -> Output {
    Command::new(geopoint_bin())
        .current_dir(dir)
        .env("RUST_LOG", "error")
        .env_remove("GEOPOINT_DELIMITER")
        .env_remove("GEOPOINT_PLOT_WIDTH")
        .env_remove("GEOPOINT_PLOT_HEIGHT")
        .env_remove("GEOPOINT_FONT_PATH")
        .env_remove("GEOPOINT_PRETTY_JSON")
        .env_remove("GEOPOINT_POI_TAG")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn json_data(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");
    assert_eq!(parsed["status"], "success");
    parsed["data"].clone()
}

fn workspace() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("points.csv"), POINTS_CSV).unwrap();
    temp_dir
}

#[test]
fn test_inspect_reports_skipped_rows() {
    let dir = workspace();

    let output = geopoint(dir.path(), &["inspect", "points.csv", "--json"]);

    assert!(output.status.success(), "Command should succeed");
    let data = json_data(&output);
    assert_eq!(data["total_points"], 3);
    assert_eq!(data["poi_points"], 1);
    assert_eq!(data["skipped_rows"].as_array().unwrap().len(), 1);
    assert_eq!(data["skipped_rows"][0]["id"], "B");
    assert_eq!(data["tags"], serde_json::json!([{"poi": 1}, {"road": 1}, {"null": 1}]));
}

#[test]
fn test_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    let output = geopoint(dir.path(), &["inspect", "does/not/exist.csv"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Point table not found"), "stderr was: {}", stderr);
}

#[test]
fn test_filter_is_exact_match() {
    let dir = workspace();

    let output = geopoint(dir.path(), &["filter", "points.csv", "--tag", "POI", "--json"]);

    assert!(output.status.success());
    let data = json_data(&output);
    assert_eq!(data["matched_points"], 0);
    assert!(data["bbox"].is_null());
}

#[test]
fn test_distance_equator_to_pole() {
    let dir = TempDir::new().unwrap();

    let output = geopoint(dir.path(), &["distance", "0", "0", "0", "90", "--json"]);

    assert!(output.status.success());
    let meters = json_data(&output)["meters"].as_f64().unwrap();
    assert!((meters - 10_007_543.0).abs() < 1.0);
}

#[test]
fn test_distance_rejects_out_of_range() {
    let dir = TempDir::new().unwrap();

    let output = geopoint(dir.path(), &["distance", "181", "0", "0", "0"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid coordinate"));
}

#[test]
fn test_run_writes_artifacts() {
    let dir = workspace();

    let output = geopoint(
        dir.path(),
        &["run", "points.csv", "--output-dir", "out", "--width", "320", "--height", "240", "--json"],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let data = json_data(&output);
    assert_eq!(data["total_points"], 3);
    assert_eq!(data["poi_points"], 1);

    assert!(dir.path().join("out").join("preview.png").exists());
    let report: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("out").join("report.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(report["total_points"], 3);
    assert_eq!(report["bbox"], serde_json::json!([120.9, 14.23, 121.4, 14.6]));
}

#[test]
fn test_export_filtered_summary() {
    let dir = workspace();

    let output = geopoint(
        dir.path(),
        &["export", "points.csv", "--tag", "road", "--summary", "road.json", "--json"],
    );

    assert!(output.status.success());
    assert_eq!(json_data(&output)["exported_points"], 1);

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("road.json")).unwrap()).unwrap();
    assert_eq!(report["tags"], serde_json::json!([{"road": 1}]));
}

#[test]
fn test_export_requires_a_target() {
    let dir = workspace();

    let output = geopoint(dir.path(), &["export", "points.csv"]);

    assert!(!output.status.success());
}

#[test]
fn test_config_sources() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("geopoint.toml"), "delimiter = \";\"\n").unwrap();

    let output = Command::new(geopoint_bin())
        .current_dir(dir.path())
        .env("GEOPOINT_PLOT_WIDTH", "640")
        .args(["config", "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let values = json_data(&output)["values"].as_array().unwrap().clone();
    let find = |key: &str| values.iter().find(|v| v["key"] == key).unwrap().clone();

    assert_eq!(find("delimiter")["source"], "File");
    assert_eq!(find("plot_width")["value"], "640");
    assert_eq!(find("plot_width")["source"], "Environment");
    assert_eq!(find("plot_height")["source"], "Default");
}
