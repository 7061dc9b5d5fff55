//! End-to-end tests running the `attend` binary.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn attend_binary() -> String {
    env!("CARGO_BIN_EXE_attend").to_string()
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Builds a command isolated from the caller's config and environment.
fn attend(home: &Path) -> Command {
    let mut command = Command::new(attend_binary());
    command
        .env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("ATTEND_FORMAT")
        .env_remove("ATTEND_THREADS")
        .env_remove("RUST_LOG");
    command
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_overlap_recorded_lesson() {
    let temp = TempDir::new().unwrap();
    let output = attend(temp.path())
        .args([
            "overlap",
            "--lesson",
            "1594663200,1594666800",
            "--pupil",
            "1594663340,1594663389,1594663390,1594663395,1594663396,1594666472",
            "--tutor",
            "1594663290,1594663430,1594663443,1594666473",
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "Overlap: 3117s (51m 57s)\n");
}

#[test]
fn test_overlap_without_sessions_is_zero() {
    let temp = TempDir::new().unwrap();
    let output = attend(temp.path())
        .args(["overlap", "--lesson", "0,1000", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["total"], 0);
}

#[test]
fn test_overlap_accepts_negative_times() {
    let temp = TempDir::new().unwrap();
    let output = attend(temp.path())
        .args([
            "overlap", "--lesson", "-100,100", "--pupil", "-50,50", "--tutor", "-80,10", "--json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["total"], 60);
}

#[test]
fn test_overlap_rejects_reversed_session() {
    let temp = TempDir::new().unwrap();
    let output = attend(temp.path())
        .args(["overlap", "--lesson", "0,1000", "--pupil", "500,100"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(
        stderr(&output).contains("interval cannot end before it starts"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn test_overlap_rejects_reversed_lesson_window() {
    let temp = TempDir::new().unwrap();
    let output = attend(temp.path())
        .args(["overlap", "--lesson", "1000,0"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("lesson window cannot end before it starts"));
}

#[test]
fn test_env_selects_json_output() {
    let temp = TempDir::new().unwrap();
    let output = attend(temp.path())
        .env("ATTEND_FORMAT", "json")
        .args([
            "overlap", "--lesson", "0,1000", "--pupil", "100,500", "--tutor", "200,300", "--spans",
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"total": 100, "spans": [{"start": 200, "end": 300}]})
    );
}

#[test]
fn test_config_file_selects_json_output() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("attend.toml");
    std::fs::write(&config_path, "format = \"json\"\n").unwrap();

    let output = attend(temp.path())
        .arg("--config")
        .arg(&config_path)
        .args(["overlap", "--lesson", "0,1000", "--pupil", "100,200", "--tutor", "150,250"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["total"], 50);
}

#[test]
fn test_check_recorded_lessons_all_pass() {
    let temp = TempDir::new().unwrap();
    let output = attend(temp.path())
        .arg("check")
        .arg(fixture("lessons.json"))
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert_eq!(stdout.lines().filter(|l| l.starts_with("PASS")).count(), 14);
    assert!(stdout.ends_with("14 cases: 14 passed, 0 failed, 0 invalid, 0 unchecked\n"));
}

#[test]
fn test_check_json_report_with_thread_pool() {
    let temp = TempDir::new().unwrap();
    let output = attend(temp.path())
        .env("ATTEND_THREADS", "2")
        .arg("check")
        .arg(fixture("lessons.json"))
        .arg("--json")
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["summary"]["passed"], 14);
    assert_eq!(value["cases"][0]["id"], "provided-1");
    assert_eq!(value["cases"][0]["actual"], 3117);
}

#[test]
fn test_check_from_stdin_reports_failures() {
    let temp = TempDir::new().unwrap();
    let cases = r#"[
        {"id": "right", "intervals": {"lesson": [0, 1000], "pupil": [100, 500], "tutor": [200, 300]}, "answer": 100},
        {"id": "wrong", "intervals": {"lesson": [0, 1000], "pupil": [100, 200], "tutor": [200, 300]}, "answer": 5},
        {"id": "broken", "intervals": {"lesson": [0, 1000], "pupil": [100], "tutor": []}}
    ]"#;

    let mut child = attend(temp.path())
        .args(["check", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(cases.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(!output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("PASS       right"), "stdout: {stdout}");
    assert!(stdout.contains("got 0, expected 5"), "stdout: {stdout}");
    assert!(stdout.contains("INVALID    broken"), "stdout: {stdout}");
    assert!(stderr(&output).contains("2 of 3 cases did not pass"));
}

#[test]
fn test_no_subcommand_prints_help() {
    let temp = TempDir::new().unwrap();
    let output = attend(temp.path()).output().unwrap();

    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage: attend"));
}
