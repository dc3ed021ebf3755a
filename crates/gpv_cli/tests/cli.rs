//! End-to-end runs of the `gpv` binary over the shared Kyiv fixture.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const NOW: &str = "1761818400"; // 2025-10-30 12:00 Kyiv

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/kyiv-region.json")
}

fn gpv() -> Command {
    let mut cmd = Command::cargo_bin("gpv").unwrap();
    cmd.env_remove("RUST_LOG").arg("--now").arg(NOW);
    cmd
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn single_summary_render_as_json() {
    let out = TempDir::new().unwrap();
    gpv()
        .arg("--data")
        .arg(fixture())
        .args(["--gpv", "GPV1.1", "--mode", "summary", "--render", "json", "-q"])
        .arg("--out")
        .arg(out.path())
        .assert()
        .success();

    let v = read_json(&out.path().join("gpv-1-1-summary.json"));
    assert_eq!(v["mode"], "summary");
    assert_eq!(v["metadata"]["activeKey"], "GPV1.1");
    assert_eq!(v["groupBadge"], Value::Null);
    assert_eq!(v["summary"]["status"], "OFF");
    assert_eq!(v["summary"]["groupNumber"], "1.1");
    let texts: Vec<&str> = v["summary"]["intervals"]
        .as_array()
        .unwrap()
        .iter()
        .map(|iv| iv["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, ["з 06:00 до 08:30", "з 18:30 до 20:00"]);
}

#[test]
fn single_render_writes_each_requested_format() {
    let out = TempDir::new().unwrap();
    gpv()
        .arg("--data")
        .arg(fixture())
        .args(["--gpv", "GPV1.2", "--mode", "emergency", "--render", "html", "text", "-q"])
        .arg("--out")
        .arg(out.path())
        .assert()
        .success();

    let html = fs::read_to_string(out.path().join("gpv-1-2-emergency.html")).unwrap();
    assert!(html.contains("Черга: 1.2"));
    assert!(html.contains(r#"<section id="today">"#));
    assert!(!html.contains(r#"<section id="matrix">"#));
    let text = fs::read_to_string(out.path().join("gpv-1-2-emergency.txt")).unwrap();
    assert!(text.contains("Завтра (31.10)"));
}

#[test]
fn all_groups_batch_renders_every_group_and_mode() {
    let out = TempDir::new().unwrap();
    gpv()
        .arg("--data")
        .arg(fixture())
        .args(["--all-groups", "--render", "html"])
        .arg("--out")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered: 9/9 succeeded, 0 failed"));

    let region = out.path().join("kyiv-region");
    for stem in ["gpv-1-1", "gpv-1-2", "gpv-2-1"] {
        for suffix in ["", "-emergency", "-week"] {
            let f = region.join(format!("{stem}{suffix}.html"));
            assert!(f.is_file(), "missing {}", f.display());
        }
    }
    assert_eq!(fs::read_dir(&region).unwrap().count(), 9);
}

#[test]
fn record_lists_outputs_and_input_digest() {
    let out = TempDir::new().unwrap();
    gpv()
        .arg("--data")
        .arg(fixture())
        .args(["--gpv", "GPV1.1", "--render", "json", "html", "--record", "-q"])
        .arg("--out")
        .arg(out.path())
        .assert()
        .success();

    let rec = read_json(&out.path().join("render_record.json"));
    assert_eq!(rec["region"], "kyiv-region");
    assert_eq!(rec["engine"]["name"], "gpv_cli");
    assert_eq!(rec["input"]["sha256"].as_str().unwrap().len(), 64);
    let r = &rec["renders"][0];
    assert_eq!(r["mode"], "full");
    assert_eq!(r["activeKey"], "GPV1.1");
    assert_eq!(r["activeDayEpoch"], 1_761_775_200_i64);
    assert_eq!(r["lastUpdatedLabel"], "30.10.2025 21:51");
    assert_eq!(r["outputs"], serde_json::json!(["gpv-1-1.json", "gpv-1-1.html"]));
}

#[test]
fn validate_only_rejects_broken_json() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("broken.json");
    fs::write(&bad, "{ \"preset\": ").unwrap();
    gpv()
        .arg("--data")
        .arg(&bad)
        .arg("--validate-only")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("gpv: error: validation"));
}

#[test]
fn validate_only_accepts_fixture() {
    gpv()
        .arg("--data")
        .arg(fixture())
        .arg("--validate-only")
        .assert()
        .success()
        .stderr(predicate::str::contains("validate-only: kyiv-region OK"));
}

#[test]
fn missing_input_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    gpv()
        .arg("--data")
        .arg(dir.path().join("nope.json"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found: --data"));
}

#[test]
fn remote_paths_are_rejected() {
    gpv()
        .args(["--data", "https://example.org/kyiv-region.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("path must be local"));
}

#[test]
fn data_dir_filters_by_region_and_skips_invalid_files() {
    let data = TempDir::new().unwrap();
    let src = fs::read_to_string(fixture()).unwrap();
    fs::write(data.path().join("kyiv-region.json"), &src).unwrap();
    let lviv = src.replacen(r#""regionId": "kyiv-region""#, r#""regionId": "lviv""#, 1);
    fs::write(data.path().join("lviv-oblast.json"), lviv).unwrap();
    fs::write(data.path().join("empty.json"), "{}").unwrap();

    let out = TempDir::new().unwrap();
    gpv()
        .arg("--data-dir")
        .arg(data.path())
        .args(["--region", "lviv", "--render", "json"])
        .arg("--out")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered: 9/9 succeeded, 0 failed"));

    assert!(out.path().join("lviv/gpv-2-1-week.json").is_file());
    assert!(!out.path().join("kyiv-region").exists());

    let out_all = TempDir::new().unwrap();
    gpv()
        .arg("--data-dir")
        .arg(data.path())
        .args(["--render", "json", "-q"])
        .arg("--out")
        .arg(out_all.path())
        .assert()
        .success();
    assert!(out_all.path().join("kyiv-region").is_dir());
    assert!(out_all.path().join("lviv").is_dir());
    assert!(!out_all.path().join("empty").exists());
}
