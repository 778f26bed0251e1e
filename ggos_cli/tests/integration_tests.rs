//! Integration tests for the ggos binary.
//!
//! These tests verify end-to-end behavior including:
//! - Workout generation and logging
//! - Exercise catalog management
//! - History display, clearing and CSV export
//! - Settings persistence

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("ggos"))
}

/// CLI pointed at an isolated data and config directory
fn ggos(dir: &Path) -> Command {
    let mut cmd = cli();
    cmd.env("XDG_CONFIG_HOME", dir.join("config"))
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

fn write_config(dir: &Path, contents: &str) {
    let config_dir = dir.join("config").join("ggos");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), contents).unwrap();
}

fn read_json(path: &Path) -> Value {
    let raw = fs::read_to_string(path).expect("Failed to read JSON file");
    serde_json::from_str(&raw).expect("Invalid JSON")
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Turn gaming deaths into a bodyweight workout",
        ));
}

#[test]
fn test_first_run_seeds_catalog_and_logs_workout() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    ggos(dir)
        .args(["generate", "5", "--auto-complete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WORKOUT FOR 5 DEATHS"))
        .stdout(predicate::str::contains("Workout logged"));

    let exercises = read_json(&dir.join("data/exercises.json"));
    assert_eq!(exercises.as_array().unwrap().len(), 20);

    let history = read_json(&dir.join("data/workout_history.json"));
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["requested_deaths"], 5);
    assert!(history[0]["total_deaths_accounted"].as_u64().unwrap() <= 5);
    assert!(history[0]["summary"].is_string());
    assert!(history[0]["timestamp"].is_string());
}

#[test]
fn test_dry_run_does_not_log() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    ggos(dir)
        .args(["generate", "8", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(!dir.join("data/workout_history.json").exists());
}

#[test]
fn test_zero_and_negative_deaths_give_empty_workout() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    for deaths in ["0", "-3"] {
        ggos(dir)
            .args(["generate", deaths, "--auto-complete"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No exercises"))
            .stdout(predicate::str::contains("Nothing to record"));
    }

    assert!(!dir.join("data/workout_history.json").exists());
}

#[test]
fn test_single_exercise_workout() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    write_config(dir, "[catalog]\nseed_defaults = false\n");

    ggos(dir)
        .args(["exercises", "add", "Plank", "--unit", "seconds", "--amount", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'Plank' (5 seconds per death)"));

    ggos(dir)
        .args(["generate", "1", "--auto-complete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5 Plank (1 deaths)"))
        .stdout(predicate::str::contains("Total: 5 seconds"));
}

#[test]
fn test_empty_catalog_without_seeding() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    write_config(dir, "[catalog]\nseed_defaults = false\n");

    ggos(dir)
        .args(["exercises", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No exercises"));

    ggos(dir)
        .args(["generate", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No exercises"));
}

#[test]
fn test_duplicate_exercise_name_rejected() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    // The starter set already has "Squats"
    ggos(dir)
        .args(["exercises", "add", "squats", "--amount", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DuplicateName"));
}

#[test]
fn test_edit_and_remove_exercise() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    ggos(dir)
        .args(["exercises", "edit", "push-ups", "--amount", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated 'Push-ups' (4 reps per death)"));

    ggos(dir)
        .args(["exercises", "remove", "Push-ups"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 'Push-ups'"));

    ggos(dir)
        .args(["exercises", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(". Push-ups -").not());

    ggos(dir)
        .args(["exercises", "remove", "Push-ups"])
        .assert()
        .failure();
}

#[test]
fn test_reset_and_presets() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    ggos(dir)
        .args(["exercises", "remove", "Plank"])
        .assert()
        .success();

    ggos(dir)
        .args(["exercises", "presets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 1 preset exercises"));

    ggos(dir)
        .args(["exercises", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 20 default exercises"));
}

#[test]
fn test_prompt_quit_discards_workout() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    ggos(dir)
        .args(["generate", "6"])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout discarded"));

    assert!(!dir.join("data/workout_history.json").exists());
}

#[test]
fn test_prompt_reroll_then_done() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    ggos(dir)
        .args(["generate", "6"])
        .write_stdin("r\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rerolling"))
        .stdout(predicate::str::contains("Workout logged"));

    let history = read_json(&dir.join("data/workout_history.json"));
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[test]
fn test_history_statistics() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    for deaths in ["2", "4", "12"] {
        ggos(dir)
            .args(["generate", deaths, "--auto-complete"])
            .assert()
            .success();
    }

    ggos(dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total workouts: 3"))
        .stdout(predicate::str::contains("Total deaths:   18"))
        .stdout(predicate::str::contains("Avg deaths:     6.0"));

    ggos(dir)
        .args(["history", "--filter", "high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deaths: 12"))
        .stdout(predicate::str::contains("Deaths: 2 ").not());
}

#[test]
fn test_history_limit_from_config() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    write_config(dir, "[history]\nmax_entries = 2\n");

    for deaths in ["1", "2", "3"] {
        ggos(dir)
            .args(["generate", deaths, "--auto-complete"])
            .assert()
            .success();
    }

    let history = read_json(&dir.join("data/workout_history.json"));
    let requested: Vec<_> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["requested_deaths"].as_u64().unwrap())
        .collect();
    assert_eq!(requested, vec![2, 3]);
}

#[test]
fn test_history_clear() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    ggos(dir)
        .args(["generate", "3", "--auto-complete"])
        .assert()
        .success();

    ggos(dir)
        .args(["history", "--clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("history cleared"));

    ggos(dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No workout history found"));
}

#[test]
fn test_export_creates_csv() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    let csv_path = dir.join("export/history.csv");

    ggos(dir)
        .args(["generate", "5", "--auto-complete"])
        .assert()
        .success();

    ggos(dir)
        .arg("export")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("from 1 workouts"));

    let csv_content = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(csv_content.starts_with("workout_id,timestamp,requested_deaths"));
    assert!(csv_content.lines().count() >= 2);
}

#[test]
fn test_export_without_history() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    ggos(dir)
        .arg("export")
        .arg(dir.join("history.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to export"));

    assert!(!dir.join("history.csv").exists());
}

#[test]
fn test_settings_set_and_list() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    ggos(dir)
        .args(["settings", "set", "theme", "light"])
        .assert()
        .success();

    ggos(dir)
        .args(["settings", "set", "auto_input_enabled", "true"])
        .assert()
        .success();

    ggos(dir)
        .arg("settings")
        .assert()
        .success()
        .stdout(predicate::str::contains("theme = \"light\""))
        .stdout(predicate::str::contains("auto_input_enabled = true"))
        .stdout(predicate::str::contains("window_size = \"800x600\""));
}
