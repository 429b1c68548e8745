//! Basic CLI E2E tests.
//!
//! Tests run the built `taskmon` binary against a throwaway data directory.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_taskmon"))
        .args(args)
        .env("TASKMON_DATA_DIR", dir)
        .env_remove("TASKMON_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(dir, args);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    stdout
}

fn json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Failed to parse JSON output")
}

fn with_starter() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["config", "set", "seed", "42"]);
    run_ok(dir.path(), &["profile", "starter", "charmander", "--trainer-name", "Ash"]);
    dir
}

#[test]
fn test_config_defaults_and_set() {
    let dir = tempfile::tempdir().unwrap();
    let listed = json(&run_ok(dir.path(), &["config", "list"]));
    assert_eq!(listed["session"]["study_minutes"], 30);
    assert_eq!(listed["session"]["default_type"], "Psychic");

    run_ok(dir.path(), &["config", "set", "session.study_minutes", "45"]);
    let value = run_ok(dir.path(), &["config", "get", "session.study_minutes"]);
    assert_eq!(value.trim(), "45");

    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "session.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_fresh_profile_is_incomplete() {
    let dir = tempfile::tempdir().unwrap();
    let profile = json(&run_ok(dir.path(), &["profile", "show", "--json"]));
    assert_eq!(profile["trainerName"], "Trainer");
    assert_eq!(profile["trainerGender"], "male");
    assert_eq!(profile["isProfileComplete"], false);
    assert_eq!(profile["pokemon_inventory"].as_array().unwrap().len(), 0);
}

#[test]
fn test_starter_selection_once() {
    let dir = with_starter();
    let pokedex = json(&run_ok(dir.path(), &["pokedex", "--json"]));
    assert_eq!(pokedex, serde_json::json!([{"id": 4, "name": "Charmander"}]));

    let inventory = json(&run_ok(dir.path(), &["inventory", "--json"]));
    assert_eq!(inventory[0]["isPartner"], true);
    assert_eq!(inventory[0]["exp"], 0.0);

    let (_, stderr, code) = run_cli(dir.path(), &["profile", "starter", "squirtle"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("already complete"));
}

#[test]
fn test_non_starter_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["profile", "starter", "Pikachu"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("not a starter"));
}

#[test]
fn test_session_requires_starter() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        dir.path(),
        &["session", "run", "--study", "10", "--skip-catch", "--tick-ms", "1"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("starter"));
}

#[test]
fn test_session_with_catch_all() {
    let dir = with_starter();
    let stdout = run_ok(
        dir.path(),
        &[
            "session", "run", "--type", "fire", "--study", "10", "--catch-all", "--no-rest",
            "--tick-ms", "1", "--json",
        ],
    );
    let events: Vec<serde_json::Value> = stdout
        .lines()
        .filter_map(|l| serde_json::from_str(l).ok())
        .collect();
    let expired: Vec<_> = events.iter().filter(|e| e["type"] == "phase_expired").collect();
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0]["rewards"]["expGained"], 33);
    assert_eq!(expired[0]["rewards"]["encounters"].as_array().unwrap().len(), 1);

    let inventory = json(&run_ok(dir.path(), &["inventory", "--json"]));
    let inventory = inventory.as_array().unwrap();
    assert_eq!(inventory.len(), 2);
    assert_eq!(inventory[0]["exp"], 33.0);
    assert_eq!(inventory[1]["type"], "Fire");
    assert_eq!(inventory[1]["isPartner"], false);
}

#[test]
fn test_pending_encounter_across_invocations() {
    let dir = with_starter();
    run_ok(
        dir.path(),
        &["session", "run", "--type", "ghost", "--study", "20", "--tick-ms", "1"],
    );

    let pending = json(&run_ok(dir.path(), &["encounter", "show", "--json"]));
    let offered = pending["rewards"]["encounters"].as_array().unwrap();
    assert_eq!(offered.len(), 2);
    for name in offered {
        assert!(["Gastly", "Haunter", "Gengar"].contains(&name.as_str().unwrap()));
    }

    let (_, stderr, code) = run_cli(
        dir.path(),
        &["session", "run", "--study", "10", "--skip-catch", "--tick-ms", "1"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("awaiting resolution"));

    run_ok(dir.path(), &["encounter", "resolve", "--all"]);
    let inventory = json(&run_ok(dir.path(), &["inventory", "--json"]));
    assert_eq!(inventory.as_array().unwrap().len(), 3);

    let pending = json(&run_ok(dir.path(), &["encounter", "show", "--json"]));
    assert!(pending.is_null());
}

#[test]
fn test_zero_minute_rest_returns_to_menu() {
    let dir = with_starter();
    let stdout = run_ok(dir.path(), &["rest", "--minutes", "0", "--tick-ms", "1"]);
    assert!(stdout.contains("Rest over"));
}

#[test]
fn test_rest_with_zero_study_length_configured() {
    let dir = with_starter();
    run_ok(dir.path(), &["config", "set", "session.study_minutes", "0"]);
    let stdout = run_ok(dir.path(), &["rest", "--minutes", "0", "--tick-ms", "1"]);
    assert!(stdout.contains("Rest over"));
}

#[test]
fn test_catalog_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let info = json(&run_ok(dir.path(), &["catalog", "show", "pikachu", "--json"]));
    assert_eq!(info["id"], 25);
    assert_eq!(info["type"], "Electric");
    assert_eq!(info["evo_threshold"], 300);

    let (_, _, code) = run_cli(dir.path(), &["catalog", "show", "Missingno"]);
    assert_eq!(code, 1);
}
