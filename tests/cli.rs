//! End-to-end tests that run the compiled binary against a scratch data directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn focusdeck(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("focusdeck").unwrap();
    cmd.env("FOCUSDECK_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    focusdeck(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pomodoro"))
        .stdout(predicate::str::contains("countdown"));
}

#[test]
fn task_add_then_list_as_json() {
    let home = TempDir::new().unwrap();

    focusdeck(&home)
        .args(["task", "add", "Essay draft", "--priority", "high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added task #1"));
    focusdeck(&home)
        .args(["task", "add", "Flashcards", "--priority", "low"])
        .assert()
        .success();

    let list = json(focusdeck(&home).args(["-o", "json", "task", "list"]));
    assert_eq!(list["count"], 2);
    assert_eq!(list["items"][0]["title"], "Essay draft");
    assert_eq!(list["items"][0]["priority"], "high");
    assert_eq!(list["items"][0]["sessions"], 0);
}

#[test]
fn task_done_and_filter() {
    let home = TempDir::new().unwrap();
    focusdeck(&home).args(["task", "add", "Read"]).assert().success();
    focusdeck(&home).args(["task", "done", "1"]).assert().success();

    let pending = json(focusdeck(&home).args(["-o", "json", "task", "list", "--filter", "pending"]));
    assert_eq!(pending["count"], 0);

    let done = json(focusdeck(&home).args(["-o", "json", "task", "list", "-f", "completed"]));
    assert_eq!(done["count"], 1);
}

#[test]
fn missing_task_is_an_error() {
    let home = TempDir::new().unwrap();
    focusdeck(&home)
        .args(["task", "show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));
}

#[test]
fn bad_deadline_is_rejected() {
    let home = TempDir::new().unwrap();
    focusdeck(&home)
        .args(["task", "add", "Essay", "--deadline", "next week"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn settings_persist_between_runs() {
    let home = TempDir::new().unwrap();
    focusdeck(&home)
        .args(["settings", "set", "--work", "50", "--interval", "3"])
        .assert()
        .success();

    let status = json(focusdeck(&home).args(["-o", "json", "pomodoro", "status"]));
    assert_eq!(status["timer"]["work_seconds"], 3000);
    assert_eq!(status["timer"]["short_break_seconds"], 300);
    assert_eq!(status["timer"]["long_break_interval"], 3);
    assert_eq!(status["completed_work_sessions"], 0);
}

#[test]
fn invalid_settings_are_rejected_and_not_saved() {
    let home = TempDir::new().unwrap();
    focusdeck(&home)
        .args(["settings", "set", "--interval", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid settings"));
    focusdeck(&home)
        .args(["settings", "set", "--work", "0"])
        .assert()
        .failure();

    let status = json(focusdeck(&home).args(["-o", "json", "settings", "show"]));
    assert_eq!(status["timer"]["work_seconds"], 1500);
    assert_eq!(status["timer"]["long_break_interval"], 4);
}

#[test]
fn alert_preferences_persist() {
    let home = TempDir::new().unwrap();
    focusdeck(&home)
        .args(["settings", "alerts", "--sound", "off", "--cue", "bell"])
        .assert()
        .success();

    let status = json(focusdeck(&home).args(["-o", "json", "settings", "show"]));
    assert_eq!(status["alerts"]["sound_enabled"], false);
    assert_eq!(status["alerts"]["cue"], "bell");
}

#[test]
fn config_file_supplies_defaults() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "general:\n  default_output: json\npomodoro:\n  work_minutes: 45\n",
    )
    .unwrap();

    let status = json(focusdeck(&home).args(["pomodoro", "status"]));
    assert_eq!(status["timer"]["work_seconds"], 2700);
}

#[test]
fn goal_milestones_drive_progress() {
    let home = TempDir::new().unwrap();
    focusdeck(&home)
        .args(["goal", "add", "Finish course", "-m", "Module 1", "-m", "Module 2"])
        .assert()
        .success();

    let goal = json(focusdeck(&home).args(["-o", "json", "goal", "show", "1"]));
    let first = goal["milestones"][0]["id"].as_i64().unwrap().to_string();

    let goal = json(focusdeck(&home).args(["-o", "json", "goal", "check", "1", first.as_str()]));
    assert_eq!(goal["progress"], 50);
    assert_eq!(goal["completed"], false);
}

#[test]
fn note_search_and_export() {
    let home = TempDir::new().unwrap();
    focusdeck(&home)
        .args(["note", "new", "--title", "Biology", "--content", "Mitochondria", "--tag", "exam"])
        .assert()
        .success();
    focusdeck(&home)
        .args(["note", "new", "--content", "unrelated"])
        .assert()
        .success();

    let found = json(focusdeck(&home).args(["-o", "json", "note", "search", "mito"]));
    assert_eq!(found["count"], 1);
    assert_eq!(found["items"][0]["title"], "Biology");

    let untitled = json(focusdeck(&home).args(["-o", "json", "note", "show", "2"]));
    assert_eq!(untitled["title"], "Untitled Note");

    let export_dir = home.path().join("out");
    let exported = json(focusdeck(&home).args([
        "-o",
        "json",
        "note",
        "export",
        "--dir",
        export_dir.to_str().unwrap(),
    ]));
    let path = exported["path"].as_str().unwrap();
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(written.as_array().unwrap().len(), 2);
}

#[test]
fn empty_stats_report() {
    let home = TempDir::new().unwrap();
    let report = json(focusdeck(&home).args(["-o", "json", "stats", "report", "--period", "week"]));
    assert_eq!(report["total_sessions"], 0);
    assert_eq!(report["streak_days"], 0);
    assert_eq!(report["period"], "This Week");
}

#[test]
fn pomodoro_reset_and_history() {
    let home = TempDir::new().unwrap();
    focusdeck(&home).args(["pomodoro", "reset"]).assert().success();

    let history = json(focusdeck(&home).args(["-o", "json", "pomodoro", "history"]));
    assert_eq!(history["count"], 0);
}

#[test]
fn countdown_rejects_invalid_durations() {
    let home = TempDir::new().unwrap();
    focusdeck(&home)
        .args(["countdown", "--seconds", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));
    focusdeck(&home)
        .args(["countdown", "--minutes", "75"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time format"));
}

#[test]
fn countdown_runs_to_completion() {
    let home = TempDir::new().unwrap();
    let done = json(focusdeck(&home).args(["-o", "json", "countdown", "1s", "--quiet"]));
    assert_eq!(done["completed"], true);
    assert_eq!(done["total_seconds"], 1);
}

#[test]
fn completions_do_not_touch_data_dir() {
    let home = TempDir::new().unwrap();
    let root = home.path().join("never-created");
    Command::cargo_bin("focusdeck")
        .unwrap()
        .env("FOCUSDECK_HOME", &root)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("focusdeck"));
    assert!(!root.exists());
}

#[test]
fn database_setup_is_logged() {
    let home = TempDir::new().unwrap();
    focusdeck(&home)
        .env("RUST_LOG", "focusdeck=debug")
        .args(["task", "list"])
        .assert()
        .success();

    let log = std::fs::read_to_string(home.path().join("logs").join("focusdeck.log")).unwrap();
    assert!(log.contains("running schema migration"));
}

#[test]
fn oversized_config_durations_fall_back_to_defaults() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "pomodoro:\n  work_minutes: 4294967295\n",
    )
    .unwrap();

    let status = json(focusdeck(&home).args(["-o", "json", "pomodoro", "status"]));
    assert_eq!(status["timer"]["work_seconds"], 1500);

    focusdeck(&home)
        .args(["settings", "set", "--work", "30"])
        .assert()
        .success();
    let status = json(focusdeck(&home).args(["-o", "json", "settings", "show"]));
    assert_eq!(status["timer"]["work_seconds"], 1800);
}

#[test]
fn invalid_config_defaults_do_not_lock_settings() {
    let home = TempDir::new().unwrap();
    focusdeck(&home)
        .args(["settings", "set", "--work", "30"])
        .assert()
        .success();
    std::fs::write(home.path().join("config.yaml"), "pomodoro:\n  work_minutes: 0\n").unwrap();

    let status = json(focusdeck(&home).args(["-o", "json", "settings", "show"]));
    assert_eq!(status["timer"]["work_seconds"], 1800);

    focusdeck(&home)
        .args(["settings", "set", "--work", "25"])
        .assert()
        .success();
}
