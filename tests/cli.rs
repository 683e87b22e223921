//! End-to-end tests that run the `letterbox` binary against a temp project.
//!
//! Each test builds an `images/` directory with synthetic screenshots, runs
//! the CLI with `--root`, and inspects stdout plus the files written to
//! `images/processed/`.

use image::{GenericImageView, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn letterbox(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_letterbox"))
        .arg("--root")
        .arg(root)
        .args(args)
        .output()
        .unwrap()
}

fn stdout_lines(out: &Output) -> Vec<String> {
    String::from_utf8_lossy(&out.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

/// Project with three of the four default screenshots; `dev_search.png` is missing
/// and `personal_capsule.png` is corrupt.
fn setup_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let images = tmp.path().join("images");
    std::fs::create_dir_all(&images).unwrap();

    RgbaImage::from_pixel(300, 600, Rgba([0, 128, 0, 255]))
        .save(images.join("sih.png"))
        .unwrap();
    std::fs::write(images.join("personal_capsule.png"), b"\x89PNG truncated").unwrap();
    RgbImage::from_pixel(1600, 600, Rgb([30, 30, 200]))
        .save_with_format(images.join("RestAPI.jpg"), ImageFormat::Jpeg)
        .unwrap();
    tmp
}

#[test]
fn default_run_processes_fixed_list() {
    let tmp = setup_project();
    let out = letterbox(tmp.path(), &[]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let lines = stdout_lines(&out);
    assert_eq!(lines[0], "Successfully processed sih.png -> processed_sih.png");
    assert!(lines[1].starts_with("Error processing "), "{}", lines[1]);
    assert!(lines[1].contains("personal_capsule.png"));
    assert_eq!(lines[2], "Image not found: dev_search.png");
    assert_eq!(lines[3], "Successfully processed RestAPI.jpg -> processed_RestAPI.jpg");
    assert_eq!(lines[4], "Processed 2, failed 1, missing 1");

    let processed = tmp.path().join("images/processed");
    assert!(!processed.join("processed_personal_capsule.png").exists());
    assert!(!processed.join("processed_dev_search.png").exists());

    let png_bytes = std::fs::read(processed.join("processed_sih.png")).unwrap();
    assert_eq!(image::guess_format(&png_bytes).unwrap(), ImageFormat::Png);
    let png = image::load_from_memory(&png_bytes).unwrap();
    assert_eq!(png.dimensions(), (1280, 720));
    // Portrait source: pillarboxed, white on both sides
    assert_eq!(png.get_pixel(0, 360).0, [255, 255, 255, 255]);
    assert_eq!(png.get_pixel(1279, 360).0, [255, 255, 255, 255]);

    let jpg_bytes = std::fs::read(processed.join("processed_RestAPI.jpg")).unwrap();
    assert_eq!(image::guess_format(&jpg_bytes).unwrap(), ImageFormat::Jpeg);
    let jpg = image::load_from_memory(&jpg_bytes).unwrap();
    assert_eq!(jpg.dimensions(), (1280, 720));
}

#[test]
fn explicit_names_and_json_report() {
    let tmp = setup_project();
    let report = tmp.path().join("report.json");
    let out = letterbox(
        tmp.path(),
        &["run", "--report", report.to_str().unwrap(), "sih.png", "nope.png"],
    );
    assert!(out.status.success());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["summary"]["processed"], 1);
    assert_eq!(json["summary"]["missing"], 1);
    assert_eq!(json["outcomes"][0]["status"], "processed");
    assert_eq!(json["outcomes"][0]["format"], "png");
    assert_eq!(json["outcomes"][0]["placement"]["width"], 360);
    assert_eq!(json["outcomes"][0]["placement"]["x"], 460);
    assert_eq!(json["outcomes"][1]["status"], "not_found");
}

#[test]
fn all_flag_discovers_source_directory() {
    let tmp = setup_project();
    let out = letterbox(tmp.path(), &["run", "--all"]);
    assert!(out.status.success());

    let lines = stdout_lines(&out);
    // Sorted by name: RestAPI.jpg, personal_capsule.png, sih.png
    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("RestAPI.jpg"));
    assert!(lines[1].contains("personal_capsule.png"));
    assert!(lines[2].contains("sih.png"));
    assert_eq!(lines[3], "Processed 2, failed 1, missing 0");
}

#[test]
fn jpeg_extension_is_written_as_png() {
    let tmp = setup_project();
    RgbImage::from_pixel(640, 480, Rgb([200, 100, 0]))
        .save_with_format(tmp.path().join("images/foo.jpeg"), ImageFormat::Jpeg)
        .unwrap();

    let out = letterbox(tmp.path(), &["run", "foo.jpeg"]);
    assert!(out.status.success());
    assert_eq!(
        stdout_lines(&out)[0],
        "Successfully processed foo.jpeg -> processed_foo.jpeg"
    );

    let bytes = std::fs::read(tmp.path().join("images/processed/processed_foo.jpeg")).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
}

#[test]
fn source_and_output_resolve_against_root() {
    let tmp = TempDir::new().unwrap();
    let shots = tmp.path().join("shots");
    std::fs::create_dir_all(&shots).unwrap();
    RgbImage::from_pixel(160, 90, Rgb([0, 0, 0]))
        .save(shots.join("a.png"))
        .unwrap();

    let out = letterbox(
        tmp.path(),
        &["--source", "shots", "--output", "done", "run", "a.png"],
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(tmp.path().join("done/processed_a.png").is_file());
}

#[test]
fn config_overrides_canvas() {
    let tmp = setup_project();
    std::fs::write(
        tmp.path().join("letterbox.toml"),
        "[canvas]\nwidth = 200\nheight = 200\n\n[batch]\nimages = [\"RestAPI.jpg\"]\n",
    )
    .unwrap();

    let out = letterbox(tmp.path(), &[]);
    assert!(out.status.success());

    let img = image::open(tmp.path().join("images/processed/processed_RestAPI.jpg")).unwrap();
    assert_eq!(img.dimensions(), (200, 200));
}

#[test]
fn invalid_config_fails() {
    let tmp = setup_project();
    std::fs::write(tmp.path().join("letterbox.toml"), "[encoding]\nquality = 0\n").unwrap();

    let out = letterbox(tmp.path(), &[]);
    assert!(!out.status.success());
    assert!(!tmp.path().join("images/processed").exists());
}

#[test]
fn check_reports_without_processing() {
    let tmp = setup_project();
    let out = letterbox(tmp.path(), &["check"]);
    assert!(out.status.success());

    let lines = stdout_lines(&out);
    assert!(lines.contains(&"Image not found: dev_search.png".to_string()));
    assert_eq!(lines.last().unwrap(), "3 of 4 images found");
    assert!(!tmp.path().join("images/processed").exists());
}

#[test]
fn gen_config_prints_stock_toml() {
    let tmp = TempDir::new().unwrap();
    let out = letterbox(tmp.path(), &["gen-config"]);
    assert!(out.status.success());

    let text = String::from_utf8_lossy(&out.stdout);
    let value: toml::Value = toml::from_str(&text).unwrap();
    assert_eq!(value["canvas"]["width"].as_integer(), Some(1280));
    assert_eq!(value["encoding"]["quality"].as_integer(), Some(85));
}
