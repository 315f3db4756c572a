use assert_cmd::Command;
use predicates::prelude::*;

const SMALL_BOARD: [&str; 6] = ["--height", "80", "--width", "80", "--border", "10"];

fn dart_aim() -> Command {
    let mut cmd = Command::cargo_bin("dart-aim").expect("binary");
    cmd.env("DART_AIM_LOG", "warn");
    cmd
}

#[test]
fn analyze_prints_aim_per_radius_and_writes_outputs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out_dir = dir.path().join("figs");
    let report = dir.path().join("report.json");

    dart_aim()
        .arg("analyze")
        .args(SMALL_BOARD)
        .args(["--radius", "20", "--radius", "120"])
        .arg("--out-dir")
        .arg(&out_dir)
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Analysis of a player with accuracy radius: 20mm",
        ))
        .stdout(predicate::str::contains(
            "Analysis of a player with accuracy radius: 120mm",
        ))
        .stdout(predicate::str::contains("Aim for "));

    assert!(out_dir.join("board.png").exists());
    assert!(out_dir.join("expected_scores.png").exists());

    let raw = std::fs::read_to_string(&report).expect("report");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
    let recs = json["recommendations"].as_array().expect("recommendations");
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0]["accuracy_radius_mm"], 20.0);
    assert!(json["figure_path"].as_str().is_some());
}

#[test]
fn probe_reads_double_bull_at_center() {
    dart_aim()
        .arg("probe")
        .args(SMALL_BOARD)
        .args(["--x", "40", "--y", "40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("x=40.0000, y=40.0000, z=50.0000"));
}

#[test]
fn probe_outside_image_has_no_value() {
    dart_aim()
        .arg("probe")
        .args(SMALL_BOARD)
        .args(["--x", "-3", "--y", "5"])
        .assert()
        .success()
        .stdout(predicate::str::diff("x=-3.0000, y=5.0000\n"));
}

#[test]
fn probe_smoothed_map_is_below_raw_peak() {
    let out = dart_aim()
        .arg("probe")
        .args(SMALL_BOARD)
        .args(["--x", "40", "--y", "40", "--radius", "50"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let line = String::from_utf8(out).expect("utf8");
    let z: f64 = line
        .trim()
        .rsplit("z=")
        .next()
        .and_then(|v| v.parse().ok())
        .expect("z value");
    assert!(z > 0.0 && z < 50.0, "z = {z}");
}

#[test]
fn init_config_round_trips_through_analyze() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = dir.path().join("cfg/dart_aim.json");

    dart_aim()
        .arg("init-config")
        .arg("--out")
        .arg(&cfg)
        .assert()
        .success();

    let raw = std::fs::read_to_string(&cfg).expect("config");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(json["board"]["height"], 1024);
    assert_eq!(json["accuracy_radii_mm"].as_array().map(|a| a.len()), Some(9));

    dart_aim()
        .arg("analyze")
        .arg("--config")
        .arg(&cfg)
        .args(SMALL_BOARD)
        .args(["--radius", "35", "--no-figures"])
        .assert()
        .success()
        .stdout(predicate::str::contains("accuracy radius: 35mm"));
}

#[test]
fn board_writes_png() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("board.png");
    dart_aim()
        .arg("board")
        .args(SMALL_BOARD)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();
    let bytes = std::fs::read(&out).expect("png");
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn invalid_board_fails() {
    dart_aim()
        .arg("board")
        .args(["--height", "50", "--border", "60"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("border"));
}
