//! Integration tests for the ebaguio library and CLI

use std::io::Write;
use std::process::{Command, Output};

use ebaguio::{
    CapacityClassifier, CapacityTier, CenterDirectory, EvacuationCenter, GeoDistanceModel,
    GeoPoint, ProximitySearch, StaticDirectory,
};
use tempfile::NamedTempFile;

/// Run the binary with an empty config file in place of the user's
fn run_ebaguio(args: &[&str]) -> Output {
    let config = NamedTempFile::new().unwrap();
    Command::new(env!("CARGO_BIN_EXE_ebaguio"))
        .arg("--config")
        .arg(config.path())
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Device near Session Road looking at Burnham Park Pavilion
#[test]
fn test_end_to_end_assessment() {
    let origin = GeoPoint::new(16.4000, 120.5900).unwrap();
    let center = EvacuationCenter::new(7, "Burnham Park Pavilion", "Burnham Park", 300)
        .unwrap()
        .with_location(GeoPoint::new(16.4119, 120.5924).unwrap())
        .with_occupancy(273);

    let km = GeoDistanceModel::distance_km(&origin, center.location.as_ref().unwrap());
    assert!((km - 1.35).abs() < 0.02, "unexpected distance {km}");
    assert_eq!(GeoDistanceModel::format(km), "1.35 km");

    let status = CapacityClassifier::classify(273, 300).unwrap();
    assert_eq!(status.percentage, 91.0);
    assert_eq!(status.tier, CapacityTier::Critical);
    assert_eq!(status.tier.color_hex(), "#E74C3C");

    let assessment = ProximitySearch::assess(&center, Some(&origin)).unwrap();
    assert_eq!(assessment.distance_display(), "1.35 km away");
}

#[test]
fn test_directory_listing_is_deterministic() {
    let directory = StaticDirectory::builtin();
    let first: Vec<u32> = directory.list().iter().map(|c| c.id).collect();
    let second: Vec<u32> = directory.list().iter().map(|c| c.id).collect();
    assert_eq!(first, second);
    assert_eq!(first, vec![1, 2, 3]);
}

#[test]
fn test_custom_directory_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"id": 10, "name": "Irisan Gym", "address": "Irisan", "capacity": 200,
              "current_occupancy": 150, "location": {{"latitude": 16.42, "longitude": 120.56}}}},
            {{"id": 11, "name": "Pinsao Hall", "address": "Pinsao", "capacity": 80}}
        ]"#
    )
    .unwrap();

    let directory = StaticDirectory::load(file.path()).unwrap();
    let origin = GeoPoint::new(16.4, 120.59).unwrap();
    let assessments = ProximitySearch::assess_all(&directory, Some(&origin)).unwrap();

    assert_eq!(assessments[0].center.name, "Irisan Gym");
    assert_eq!(assessments[0].capacity.tier, CapacityTier::Warning);
    assert!(assessments[1].distance.is_none());
    assert_eq!(assessments[1].capacity.tier, CapacityTier::Normal);
}

#[test]
fn test_cli_help() {
    let output = run_ebaguio(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ebaguio"));
    assert!(stdout.contains("Evacuation center proximity"));
}

#[test]
fn test_cli_centers_near_position() {
    let output = run_ebaguio(&["centers", "--at", "16.4,120.59"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Burnham Park Pavilion"));
    assert!(stdout.contains("Critical"));
    assert!(stdout.contains("1.02 km away"));
}

#[test]
fn test_cli_directions() {
    let output = run_ebaguio(&["directions", "3", "--at", "16.4,120.59", "--platform", "web"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(
        "https://www.google.com/maps/dir/?api=1&origin=16.4,120.59&destination=16.4119,120.5924"
    ));
}

#[test]
fn test_cli_rejects_out_of_range_position() {
    let output = run_ebaguio(&["centers", "--at", "95,0"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("latitude"), "unexpected stderr: {stderr}");
}

#[test]
fn test_cli_unknown_center() {
    let output = run_ebaguio(&["show", "99"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No evacuation center with id 99"));
}

#[test]
fn test_cli_rejects_negative_radius() {
    let output = run_ebaguio(&["nearest", "--at", "16.4,120.59", "--radius", "-5"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("radius"), "unexpected stderr: {stderr}");
}

#[test]
fn test_cli_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_ebaguio"))
        .arg("--config")
        .arg(dir.path().join("typo.toml"))
        .arg("centers")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}
