//! Integration tests for the repbook binary.
//!
//! These tests verify end-to-end behavior including:
//! - Draft lifecycle (start, edit, finish, cancel)
//! - Routine management
//! - Stats and weekly summaries over the logged history
//! - CSV export

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli(data_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("repbook"));
    cmd.arg("--data-dir").arg(data_dir);
    cmd
}

#[test]
fn test_cli_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("repbook"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout and routine tracking system"));
}

#[test]
fn test_start_creates_draft() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["start", "Push Day"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Started 'Push Day'"));

    let drafts = fs::read_to_string(data_dir.join("drafts.json")).expect("drafts written");
    assert!(drafts.contains("Push Day"));
}

#[test]
fn test_start_twice_requires_force() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir).args(["start", "First"]).assert().success();
    cli(data_dir).args(["start", "Second"]).assert().failure();
    cli(data_dir)
        .args(["start", "Second", "--force"])
        .assert()
        .success();
}

#[test]
fn test_exercise_and_set_flow() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir).args(["start", "Push Day"]).assert().success();

    cli(data_dir)
        .args(["exercise", "add", "Bench Press", "--sets", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'Bench Press' with 2 sets"));

    cli(data_dir)
        .args([
            "set", "add", "Bench Press", "--reps", "5", "--weight", "100", "--done",
        ])
        .assert()
        .success();

    cli(data_dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bench Press"))
        .stdout(predicate::str::contains("100 kg x 5 reps"));
}

#[test]
fn test_set_add_unknown_exercise_fails() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir).args(["start", "Push Day"]).assert().success();

    cli(data_dir)
        .args(["set", "add", "Curl", "--reps", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ExerciseNotFound"));
}

#[test]
fn test_finish_moves_draft_to_log() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir).args(["start", "Leg Day"]).assert().success();
    cli(data_dir)
        .args(["exercise", "add", "Squat", "--sets", "1"])
        .assert()
        .success();
    cli(data_dir)
        .args([
            "set", "edit", "Squat", "1", "--reps", "5", "--weight", "120", "--done",
        ])
        .assert()
        .success();

    cli(data_dir)
        .arg("finish")
        .assert()
        .success()
        .stdout(predicate::str::contains("Finished 'Leg Day'"));

    // Draft slot is empty again
    cli(data_dir).arg("show").assert().failure();

    // Workout landed in the log
    let workouts = fs::read_to_string(data_dir.join("workouts.json")).expect("log written");
    assert!(workouts.contains("Leg Day"));

    cli(data_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Leg Day"))
        .stdout(predicate::str::contains("600 volume"));
}

#[test]
fn test_cancel_discards_draft() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir).args(["start", "Scratch"]).assert().success();
    cli(data_dir)
        .arg("cancel")
        .assert()
        .success()
        .stdout(predicate::str::contains("Discarded draft 'Scratch'"));

    cli(data_dir).arg("show").assert().failure();
    assert!(!data_dir.join("workouts.json").exists());
}

#[test]
fn test_stats_over_logged_workout() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir).args(["start", "Push Day"]).assert().success();
    cli(data_dir)
        .args(["exercise", "add", "Bench Press", "--sets", "1"])
        .assert()
        .success();
    cli(data_dir)
        .args([
            "set", "edit", "Bench Press", "1", "--reps", "5", "--weight", "100", "--done",
        ])
        .assert()
        .success();
    cli(data_dir).arg("finish").assert().success();

    cli(data_dir)
        .args(["stats", "--metric", "volume"])
        .assert()
        .success()
        .stdout(predicate::str::contains("500"));

    cli(data_dir)
        .args([
            "stats",
            "--exercise",
            "Bench Press",
            "--metric",
            "heaviest",
            "--range",
            "all",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("100"));
}

#[test]
fn test_stats_empty_log() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["stats", "--metric", "volume"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No data in range."));
}

#[test]
fn test_stats_rejects_unknown_metric() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["stats", "--metric", "swole"])
        .assert()
        .failure();
}

#[test]
fn test_week_summary_output() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir).args(["start", "Quick Session"]).assert().success();
    cli(data_dir)
        .args(["exercise", "add", "Deadlift", "--sets", "1"])
        .assert()
        .success();
    cli(data_dir)
        .args([
            "set", "edit", "Deadlift", "1", "--reps", "3", "--weight", "140", "--done",
        ])
        .assert()
        .success();
    cli(data_dir).arg("finish").assert().success();

    cli(data_dir)
        .arg("week")
        .assert()
        .success()
        .stdout(predicate::str::contains("420 kg"))
        .stdout(predicate::str::contains("3 reps"));
}

#[test]
fn test_routine_draft_lifecycle() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["routine", "new", "Upper Body"])
        .assert()
        .success();
    cli(data_dir)
        .args(["routine", "add", "Pull-up", "--sets", "3"])
        .assert()
        .success();
    cli(data_dir)
        .args(["routine", "save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved routine 'Upper Body'"));

    cli(data_dir)
        .args(["routine", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Upper Body  (1 exercises)"));

    // Starting from the routine copies its plan into the draft
    cli(data_dir)
        .args(["start", "--routine", "Upper Body"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 exercises"));

    cli(data_dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pull-up"));
}

#[test]
fn test_routine_from_active() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir).args(["start", "Push Day"]).assert().success();
    cli(data_dir)
        .args(["exercise", "add", "Bench Press"])
        .assert()
        .success();
    cli(data_dir)
        .args(["routine", "from-active", "Push Template"])
        .assert()
        .success();

    cli(data_dir)
        .args(["routine", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Push Template"));
}

#[test]
fn test_routine_delete() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["routine", "new", "Doomed"])
        .assert()
        .success();
    cli(data_dir).args(["routine", "save"]).assert().success();
    cli(data_dir)
        .args(["routine", "delete", "Doomed"])
        .assert()
        .success();

    cli(data_dir)
        .args(["routine", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No routines saved yet."));
}

#[test]
fn test_repeat_last_workout() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir).args(["start", "Original"]).assert().success();
    cli(data_dir)
        .args(["exercise", "add", "Squat", "--sets", "2"])
        .assert()
        .success();
    cli(data_dir).arg("finish").assert().success();

    cli(data_dir)
        .args(["start", "--repeat-last"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Started 'Original' with 1 exercises"));
}

#[test]
fn test_export_writes_csv() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir).args(["start", "Push Day"]).assert().success();
    cli(data_dir)
        .args(["exercise", "add", "Bench Press", "--sets", "2"])
        .assert()
        .success();
    cli(data_dir).arg("finish").assert().success();

    cli(data_dir)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 set rows"));

    let csv = fs::read_to_string(data_dir.join("history.csv")).expect("csv written");
    assert!(csv.contains("Bench Press"));
}
