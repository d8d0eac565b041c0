use assert_cmd::Command;
use polars::prelude::{ParquetReader, SerReader};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn pqd_compute_reports_the_quadrant() {
    let mut cmd = Command::cargo_bin("pqd").unwrap();
    cmd.args(["compute", "--angle-deg", "45"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quadrant I:"))
        .stdout(predicate::str::contains("lagging"));
}

#[test]
fn pqd_compute_json_closes_the_triangle() {
    let mut cmd = Command::cargo_bin("pqd").unwrap();
    let output = cmd
        .args([
            "--log-level",
            "error",
            "compute",
            "--angle-deg",
            "30",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let p = value["power"]["p"].as_f64().unwrap();
    let q = value["power"]["q"].as_f64().unwrap();
    let s = value["apparent"].as_f64().unwrap();
    assert!((p.powi(2) + q.powi(2) - s.powi(2)).abs() < 1e-9);
    assert_eq!(value["quadrant"], "I");
    // EEI reads overexcited operation as a negative power factor.
    assert!(value["power_factor"]["value"].as_f64().unwrap() < 0.0);
}

#[test]
fn pqd_compute_jsonl_row_is_flat() {
    let mut cmd = Command::cargo_bin("pqd").unwrap();
    let output = cmd
        .args([
            "--log-level",
            "error",
            "compute",
            "--angle-rad",
            "0",
            "--format",
            "jsonl",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    assert_eq!(text.trim().lines().count(), 1);
    let row: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
    assert_eq!(row["quadrant"], "I");
    assert_eq!(row["current_angle_deg"].as_f64().unwrap(), 0.0);
    assert_eq!(row["convention"], "eei");
}

#[test]
fn pqd_compute_rejects_unknown_conventions() {
    let mut cmd = Command::cargo_bin("pqd").unwrap();
    cmd.args(["compute", "--convention", "ansi"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("unknown sign convention"));
}

#[test]
fn pqd_compute_rejects_negative_magnitudes() {
    let mut cmd = Command::cargo_bin("pqd").unwrap();
    cmd.args(["compute", "--magnitude=-0.5"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("invalid input"));
}

#[test]
fn pqd_compute_solves_a_named_preset() {
    let mut cmd = Command::cargo_bin("pqd").unwrap();
    cmd.args(["compute", "--preset", "condenser"])
        .assert()
        .success()
        .stdout(predicate::str::contains("S 0.600 VA"))
        .stdout(predicate::str::contains("Quadrant I:"));
}

#[test]
fn pqd_compute_rejects_unknown_presets() {
    let mut cmd = Command::cargo_bin("pqd").unwrap();
    cmd.args(["compute", "--preset", "flux-capacitor"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("unknown preset"));
}

#[test]
fn pqd_compute_preset_excludes_angle_flags() {
    let mut cmd = Command::cargo_bin("pqd").unwrap();
    cmd.args(["compute", "--preset", "idle", "--angle-deg", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn pqd_compute_angle_flags_are_exclusive() {
    let mut cmd = Command::cargo_bin("pqd").unwrap();
    cmd.args(["compute", "--angle-deg", "10", "--angle-rad", "0.2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn pqd_sweep_writes_csv_rows() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("sweep.csv");
    let mut cmd = Command::cargo_bin("pqd").unwrap();
    cmd.args([
        "sweep",
        "--start-deg",
        "0",
        "--end-deg",
        "360",
        "--steps",
        "5",
        "--out",
        out.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Wrote 5 sweep rows"));

    let text = fs::read_to_string(&out).unwrap();
    let header = text.lines().next().unwrap();
    assert_eq!(
        header,
        "angle_rad,angle_deg,p,q,s,cos_phi,power_factor,phase,flow,quadrant"
    );
    assert_eq!(text.trim().lines().count(), 6);
}

#[test]
fn pqd_sweep_writes_parquet() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("sweep.parquet");
    Command::cargo_bin("pqd")
        .unwrap()
        .args(["sweep", "--steps", "9", "--out", out.to_str().unwrap()])
        .assert()
        .success();

    let file = fs::File::open(&out).unwrap();
    let df = ParquetReader::new(file).finish().unwrap();
    assert_eq!(df.height(), 9);
    assert_eq!(df.width(), 10);
}

#[test]
fn pqd_sweep_table_walks_the_quadrants() {
    let mut cmd = Command::cargo_bin("pqd").unwrap();
    let output = cmd
        .args([
            "--log-level",
            "error",
            "sweep",
            "--start-deg",
            "45",
            "--end-deg",
            "315",
            "--steps",
            "4",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("QUADRANT"));
    for numeral in ["I", "II", "III", "IV"] {
        assert!(text.contains(numeral), "missing quadrant {numeral}");
    }
}

#[test]
fn pqd_waveforms_table_prints_every_sample() {
    let mut cmd = Command::cargo_bin("pqd").unwrap();
    let output = cmd
        .args(["--log-level", "error", "waveforms", "--samples", "5"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.lines().next().unwrap().starts_with("TIME MS"));
    assert_eq!(text.trim().lines().count(), 6);
}

#[test]
fn pqd_waveforms_csv_carries_all_columns() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("waves.csv");
    Command::cargo_bin("pqd")
        .unwrap()
        .args([
            "waveforms",
            "--angle-deg",
            "60",
            "--samples",
            "11",
            "--out",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 11 waveform samples"));

    let text = fs::read_to_string(&out).unwrap();
    let header = text.lines().next().unwrap();
    assert_eq!(
        header,
        "time_ms,voltage,current,active_current,reactive_current,summed_current,\
         active_power,reactive_power,apparent_power"
    );
    assert_eq!(text.trim().lines().count(), 12);
}

#[test]
fn pqd_presets_lists_the_catalog() {
    let mut cmd = Command::cargo_bin("pqd").unwrap();
    cmd.args(["presets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unity-export"))
        .stdout(predicate::str::contains("condenser"));
}

#[test]
fn pqd_presets_json_is_the_full_catalog() {
    let mut cmd = Command::cargo_bin("pqd").unwrap();
    let output = cmd
        .args(["--log-level", "error", "presets", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 8);
    assert!(entries.iter().any(|e| e["id"] == "unity-import"));
}

#[test]
fn pqd_quadrants_prints_the_reference() {
    let mut cmd = Command::cargo_bin("pqd").unwrap();
    cmd.args(["quadrants"])
        .assert()
        .success()
        .stdout(predicate::str::contains("overexcited"))
        .stdout(predicate::str::contains("EEI"))
        .stdout(predicate::str::contains("IEC"));
}

#[test]
fn pqd_completions_emit_a_script() {
    let mut cmd = Command::cargo_bin("pqd").unwrap();
    cmd.args(["--log-level", "error", "completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pqd"));
}

#[test]
fn pqd_tui_config_writes_the_template() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("config.toml");
    Command::cargo_bin("pqd")
        .unwrap()
        .args(["tui", "config", "--out", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote pqd-tui config"));

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("tick_ms=250"));
    assert!(text.contains("convention=\"eei\""));
}
