#![cfg(feature = "cli")]

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use shuntlog_record::{RawChannel, RawSnapshot, SnapshotWriter, SNAPSHOT_LENGTH};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "shuntlog-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn write_capture(path: &Path, count: i32) {
    let file = File::create(path).expect("capture should be creatable");
    let mut writer = SnapshotWriter::new(file, 5);
    for i in 0..count {
        writer
            .write_snapshot(&RawSnapshot {
                timestamp: 1_690_116_360 + 60 * i,
                channels: vec![
                    RawChannel {
                        bus_raw: 800,
                        shunt_raw: 400_000,
                    };
                    5
                ],
            })
            .expect("snapshot should be writable");
    }
    writer.flush().expect("capture should flush");
}

fn shuntlog(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shuntlog"))
        .arg("--log-level")
        .arg("error")
        .args(args)
        .env_remove("SHUNTLOG_CALIBRATION")
        .env_remove("SHUNTLOG_CHANNELS")
        .env_remove("SHUNTLOG_SHUNT_OHMS")
        .output()
        .expect("shuntlog should run")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp paths are utf-8")
}

#[test]
fn convert_writes_csv_next_to_capture() {
    let dir = unique_temp_dir("convert");
    let input = dir.join("20230723T124600.bin0");
    write_capture(&input, 3);

    let output = shuntlog(&["--format", "json", "convert", path_str(&input)]);
    assert!(output.status.success(), "{output:?}");

    let csv = std::fs::read_to_string(dir.join("20230723T124600.csv"))
        .expect("csv should be written");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("timestamp,bus_voltage_1,shunt_voltage_1,current_1,power_1,"));
    assert!(lines[0].ends_with("current_5,power_5"));
    assert!(lines[1].starts_with("2023-07-23 12:46:00,1.0,1.0,10000.0,10000.0,"));
    assert!(lines[3].starts_with("2023-07-23 12:48:00,"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"snapshots\":3"));
    assert!(stdout.contains("\"error\":null"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn convert_keeps_rows_before_truncation() {
    let dir = unique_temp_dir("convert-truncated");
    let input = dir.join("cut.bin0");
    let csv_path = dir.join("out.csv");
    write_capture(&input, 2);
    let mut bytes = std::fs::read(&input).expect("capture should be readable");
    let partial = bytes[..SNAPSHOT_LENGTH / 3].to_vec();
    bytes.extend_from_slice(&partial);
    std::fs::write(&input, bytes).expect("capture should be writable");

    let output = shuntlog(&[
        "--format",
        "json",
        "convert",
        path_str(&input),
        "--output",
        path_str(&csv_path),
    ]);
    assert_eq!(output.status.code(), Some(60));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("conversion stopped after 2 snapshots"));
    assert!(stderr.contains("truncated"));

    let csv = std::fs::read_to_string(&csv_path).expect("partial csv should exist");
    assert_eq!(csv.lines().count(), 3);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn check_reports_range() {
    let dir = unique_temp_dir("check");
    let input = dir.join("ok.bin0");
    write_capture(&input, 5);

    let output = shuntlog(&["--format", "json", "check", path_str(&input)]);
    assert!(output.status.success());

    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("summary should be json");
    assert_eq!(summary["snapshots"], 5);
    assert_eq!(summary["first"], "2023-07-23 12:46:00");
    assert_eq!(summary["last"], "2023-07-23 12:50:00");
    assert!(summary["error"].is_null());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn check_flags_checksum_mismatch() {
    let dir = unique_temp_dir("check-corrupt");
    let input = dir.join("bad.bin0");
    write_capture(&input, 3);
    let mut bytes = std::fs::read(&input).expect("capture should be readable");
    // a payload byte of the second snapshot's timestamp
    bytes[SNAPSHOT_LENGTH + 6] ^= 0x10;
    std::fs::write(&input, bytes).expect("capture should be writable");

    let output = shuntlog(&["--format", "json", "check", path_str(&input)]);
    assert_eq!(output.status.code(), Some(60));

    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("summary should be json");
    assert_eq!(summary["snapshots"], 1);
    let error = summary["error"].as_str().expect("error should be reported");
    assert!(error.contains("snapshot 1"));
    assert!(error.contains("checksum mismatch"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn dump_csv_honours_count() {
    let dir = unique_temp_dir("dump");
    let input = dir.join("dump.bin0");
    write_capture(&input, 4);

    let output = shuntlog(&["--format", "csv", "dump", path_str(&input), "--count", "2"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 3);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn dump_json_applies_calibration_flags() {
    let dir = unique_temp_dir("dump-cal");
    let input = dir.join("cal.bin0");
    write_capture(&input, 1);

    let output = shuntlog(&[
        "--format",
        "json",
        "dump",
        path_str(&input),
        "--shunt-ohms",
        "0.001",
    ]);
    assert!(output.status.success());

    let snapshot: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("snapshot should be json");
    assert_eq!(snapshot["timestamp"], "2023-07-23 12:46:00");
    assert_eq!(snapshot["channels"][0]["current_amps"], 1000.0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn calibration_file_with_bad_value_is_usage_error() {
    let dir = unique_temp_dir("bad-cal");
    let input = dir.join("cal.bin0");
    let calibration = dir.join("calibration.json");
    write_capture(&input, 1);
    std::fs::write(&calibration, r#"{"shunt_ohms": -1.0}"#).expect("calibration should write");

    let output = shuntlog(&[
        "check",
        path_str(&input),
        "--calibration",
        path_str(&calibration),
    ]);
    assert_eq!(output.status.code(), Some(64));
    assert!(String::from_utf8_lossy(&output.stderr).contains("shunt_ohms"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn oversized_channel_count_is_usage_error() {
    let dir = unique_temp_dir("channels");
    let input = dir.join("e.bin0");
    write_capture(&input, 1);

    let output = shuntlog(&["check", path_str(&input), "--channels", "100000000000"]);
    assert_eq!(output.status.code(), Some(64));
    assert!(String::from_utf8_lossy(&output.stderr).contains("exceeds the maximum"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_input_exits_with_failure() {
    let output = shuntlog(&["check", "/nonexistent/shuntlog/missing.bin0"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn version_extended_prints_build_stamp() {
    let output = shuntlog(&["version", "--extended"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("name: shuntlog"));
    let built = stdout
        .lines()
        .find_map(|line| line.strip_prefix("built: "))
        .expect("build stamp should be printed");
    assert_eq!(built.len(), "YYYY-MM-DD HH:MM:SS".len());
    assert!(!stdout.contains("git_hash"));
    assert!(stdout.lines().all(|line| !line.ends_with(": unknown")));
}
