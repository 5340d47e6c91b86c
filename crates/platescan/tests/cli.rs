mod common;

use assert_cmd::Command;
use common::{scene, write_models, BLUE, GREEN};
use image::{Rgb, RgbImage};
use platescan::{RecognizerConfig, Region};
use predicates::prelude::*;

fn platescan() -> Command {
    Command::cargo_bin("platescan").unwrap()
}

fn setup(dir: &std::path::Path) -> std::path::PathBuf {
    let config = dir.join("platescan.json");
    RecognizerConfig::new(write_models(dir))
        .write_json(&config)
        .unwrap();
    config
}

#[test]
fn hsv_prints_opencv_scale_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blue.png");
    RgbImage::from_pixel(8, 8, Rgb([0, 0, 255])).save(&path).unwrap();

    let out = platescan()
        .args(["hsv", path.to_str().unwrap(), "3", "4"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["x"], 3);
    assert_eq!(v["y"], 4);
    assert_eq!(v["h"], 120);
    assert_eq!(v["s"], 255);
    assert_eq!(v["v"], 255);
}

#[test]
fn hsv_outside_the_image_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.png");
    RgbImage::new(4, 4).save(&path).unwrap();
    platescan()
        .args(["hsv", path.to_str().unwrap(), "9", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside"));
}

#[test]
fn info_lists_candidates_without_models() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("car.png");
    scene(1200, 800, Region::new(400, 340, 408, 108), BLUE)
        .save(&path)
        .unwrap();
    platescan()
        .args(["info", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"width\": 1200"))
        .stdout(predicate::str::contains("hsv:blue"));
}

#[test]
fn all_colors_switch_adds_green_pass() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taxi.png");
    scene(600, 450, Region::new(150, 200, 240, 60), GREEN)
        .save(&path)
        .unwrap();
    platescan()
        .args(["info", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("hsv:green").not());
    platescan()
        .args(["info", path.to_str().unwrap(), "--all-colors"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hsv:green"));
}

#[test]
fn recognize_prints_plates_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());
    let path = dir.path().join("car.png");
    scene(1200, 800, Region::new(400, 340, 408, 108), BLUE)
        .save(&path)
        .unwrap();

    let out = platescan()
        .args(["recognize", path.to_str().unwrap(), "--config"])
        .arg(&config)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let plates: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let plates = plates.as_array().unwrap();
    assert!(plates.iter().any(|p| p["plate"] == "苏AAAAAA"), "{plates:?}");
}

#[test]
fn recognize_missing_image_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());
    platescan()
        .args(["recognize", "does-not-exist.jpg", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("NotAFile"));
}

#[test]
fn batch_reports_every_image() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());
    let images = dir.path().join("images");
    std::fs::create_dir(&images).unwrap();
    scene(1200, 800, Region::new(400, 340, 408, 108), BLUE)
        .save(images.join("a.png"))
        .unwrap();
    RgbImage::from_pixel(320, 240, Rgb([110, 112, 108]))
        .save(images.join("b.png"))
        .unwrap();
    std::fs::write(images.join("c.jpg"), b"not a jpeg").unwrap();
    std::fs::write(images.join("notes.txt"), b"ignored").unwrap();

    let out = platescan()
        .arg("batch")
        .arg(&images)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let entries: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert!(!entries[0]["plates"].as_array().unwrap().is_empty());
    assert!(entries[1]["plates"].as_array().unwrap().is_empty());
    assert!(entries[2]["error"].as_str().unwrap().contains("decode"));
}
