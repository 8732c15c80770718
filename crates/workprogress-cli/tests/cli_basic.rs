//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data
//! directory and checks the JSON it prints.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_workprogress"))
        .args(args)
        .env("WORKPROGRESS_DATA_DIR", data_dir)
        .env_remove("WORKPROGRESS_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

fn seed_task(data_dir: &Path) -> String {
    let section = run_json(data_dir, &["section", "add", "Study"]);
    let section_id = section["id"].to_string();
    let task = run_json(data_dir, &["task", "add", &section_id, "Reading"]);
    task["id"].to_string()
}

#[test]
fn test_streak_on_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let streak = run_json(dir.path(), &["streak", "--today", "2025-01-10"]);
    assert_eq!(streak["current"], 0);
    assert_eq!(streak["longest"], 0);
}

#[test]
fn test_log_and_streak() {
    let dir = tempfile::tempdir().unwrap();
    let task_id = seed_task(dir.path());

    for date in ["2025-01-01", "2025-01-02", "2025-01-05"] {
        let count = run_json(dir.path(), &["log", &task_id, "--date", date]);
        assert_eq!(count["count"], 1);
    }

    let streak = run_json(dir.path(), &["streak", "--today", "2025-01-05"]);
    assert_eq!(streak["current"], 1);
    assert_eq!(streak["longest"], 2);
}

#[test]
fn test_mood_counts_unless_policy_is_count_only() {
    let dir = tempfile::tempdir().unwrap();
    let task_id = seed_task(dir.path());
    run_json(dir.path(), &["log", &task_id, "--date", "2025-02-01", "--set", "2"]);
    run_json(dir.path(), &["mood", "🙂", "--date", "2025-02-02"]);

    let streak = run_json(dir.path(), &["streak", "--today", "2025-02-02"]);
    assert_eq!(streak["current"], 2);

    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "streak.policy", "count_only"]);
    assert_eq!(code, 0, "{stderr}");
    let streak = run_json(dir.path(), &["streak", "--today", "2025-02-02"]);
    assert_eq!(streak["current"], 1);
    assert_eq!(streak["longest"], 1);
}

#[test]
fn test_day_summary() {
    let dir = tempfile::tempdir().unwrap();
    let task_id = seed_task(dir.path());
    run_json(dir.path(), &["log", &task_id, "--date", "2025-03-01", "--add", "3"]);
    run_json(dir.path(), &["note", "chapter 4 done", "--date", "2025-03-01"]);

    let day = run_json(dir.path(), &["day", "--date", "2025-03-01"]);
    assert_eq!(day["total"], 3);
    assert_eq!(day["notes"], "chapter 4 done");
    assert_eq!(day["counts"][0]["task_name"], "Reading");
    assert_eq!(day["qualifies"], true);
}

#[test]
fn test_stats_range() {
    let dir = tempfile::tempdir().unwrap();
    let task_id = seed_task(dir.path());
    run_json(dir.path(), &["log", &task_id, "--date", "2025-01-06", "--set", "4"]);
    run_json(dir.path(), &["log", &task_id, "--date", "2025-01-07", "--set", "6"]);

    let stats = run_json(
        dir.path(),
        &["stats", "--from", "2025-01-01", "--to", "2025-01-31"],
    );
    assert_eq!(stats["total_count"], 10);
    assert_eq!(stats["days_in_range"], 31);
    assert_eq!(stats["best_day"]["date"], "2025-01-07");
}

#[test]
fn test_invalid_date_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["streak", "--today", "2025-13-01"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("expected YYYY-MM-DD"), "stderr: {stderr}");
}

#[test]
fn test_unknown_task_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["log", "999", "--date", "2025-01-01"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("task 999 not found"), "stderr: {stderr}");
}

#[test]
fn test_config_get_and_reset() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "streak.policy"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "count_or_mood");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "streak.policy", "sometimes"]);
    assert_ne!(code, 0);

    run_cli(dir.path(), &["config", "set", "display.default_range_days", "7"]);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "display.default_range_days"]);
    assert_eq!(stdout.trim(), "7");

    let (_, _, code) = run_cli(dir.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "display.default_range_days"]);
    assert_eq!(stdout.trim(), "30");
}

#[test]
fn test_streak_policy_flag_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let task_id = seed_task(dir.path());
    run_json(dir.path(), &["log", &task_id, "--date", "2025-04-01"]);
    run_json(dir.path(), &["mood", "🙂", "--date", "2025-04-02"]);

    let args = ["streak", "--today", "2025-04-03", "--policy", "count_only"];
    let strict = run_json(dir.path(), &args);
    assert_eq!(strict["current"], 0);
    assert_eq!(strict["longest"], 1);

    let lenient = run_json(
        dir.path(),
        &["streak", "--today", "2025-04-03", "--policy", "count_or_mood"],
    );
    assert_eq!(lenient["current"], 2);

    let (_, stderr, code) = run_cli(dir.path(), &["streak", "--policy", "mood_only"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("mood_only"), "stderr: {stderr}");
}

#[test]
fn test_mood_and_note_clear() {
    let dir = tempfile::tempdir().unwrap();
    run_json(dir.path(), &["mood", "😴", "--date", "2025-05-01"]);
    run_json(dir.path(), &["note", "short day", "--date", "2025-05-01"]);

    let entry = run_json(dir.path(), &["mood", "--clear", "--date", "2025-05-01"]);
    assert!(entry["mood"].is_null());
    assert_eq!(entry["notes"], "short day");

    let entry = run_json(dir.path(), &["note", "--clear", "--date", "2025-05-01"]);
    assert!(entry["mood"].is_null());
    assert!(entry["notes"].is_null());

    let day = run_json(dir.path(), &["day", "--date", "2025-05-01"]);
    assert_eq!(day["qualifies"], false);

    let (_, _, code) = run_cli(dir.path(), &["mood", "🙂", "--clear"]);
    assert_ne!(code, 0);
}

#[test]
fn test_out_of_range_default_span_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[display]\ndefault_range_days = 4000000000\n",
    )
    .unwrap();

    let (_, stderr, code) = run_cli(dir.path(), &["stats", "--to", "2025-01-10"]);
    assert_eq!(code, 1, "stderr: {stderr}");
    assert!(stderr.contains("default_range_days"), "stderr: {stderr}");

    run_cli(dir.path(), &["config", "reset"]);
    let (_, _, code) = run_cli(
        dir.path(),
        &["config", "set", "display.default_range_days", "4000000000"],
    );
    assert_eq!(code, 1);
}

#[test]
fn test_oversized_counts_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let task_id = seed_task(dir.path());

    let (_, stderr, code) = run_cli(
        dir.path(),
        &["log", &task_id, "--date", "2025-01-01", "--set", "9223372036854775807"],
    );
    assert_eq!(code, 1, "stderr: {stderr}");
    assert!(stderr.contains("count"), "stderr: {stderr}");

    run_json(dir.path(), &["log", &task_id, "--date", "2025-01-01", "--set", "1000000000"]);
    let (_, _, code) = run_cli(dir.path(), &["log", &task_id, "--date", "2025-01-01"]);
    assert_eq!(code, 1);

    let day = run_json(dir.path(), &["day", "--date", "2025-01-01"]);
    assert_eq!(day["total"], 1_000_000_000);
}
