//! End-to-end tests of the `roommate` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("roommate").unwrap();
    cmd.env_remove("ROOMMATE_CONFIG");
    cmd
}

fn student(id: &str, sleep: &str, level: u8, habits: &str, lifestyle: &str) -> Value {
    json!({
        "_id": id,
        "name": format!("Student {id}"),
        "studentId": format!("S-{id}"),
        "sleepSchedule": sleep,
        "cleanliness": level,
        "studyHabits": habits,
        "noiseTolerance": 10 - level,
        "lifestyle": lifestyle
    })
}

fn early_bird(id: &str) -> Value {
    student(id, "Early (10 PM)", 9, "Quiet Library", "Reserved")
}

fn party_goer(id: &str) -> Value {
    student(id, "Late (3 AM)", 2, "Group music", "Outgoing party")
}

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).unwrap()
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("match-groups"))
        .stdout(predicate::str::contains("health"));
}

#[test]
fn no_subcommand_errors() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn health_reports_healthy() {
    let output = cmd().arg("health").assert().success().get_output().clone();
    assert_eq!(
        stdout_json(&output.stdout),
        json!({ "status": "healthy", "service": "ai-matching" })
    );
}

#[test]
fn match_from_stdin() {
    let request = json!({
        "targetStudent": early_bird("t"),
        "candidates": [party_goer("p"), early_bird("e")],
        "topK": 5
    });
    let output = cmd()
        .arg("match")
        .write_stdin(request.to_string())
        .assert()
        .success()
        .get_output()
        .clone();
    let body = stdout_json(&output.stdout);
    assert_eq!(body["targetStudent"]["_id"], "t");
    assert_eq!(body["totalCandidates"], 2);
    assert_eq!(body["matchesFound"], 1);
    assert_eq!(body["matches"][0]["student"]["_id"], "e");
    assert_eq!(body["matches"][0]["compatibilityScore"], 100);
}

#[test]
fn match_without_target_is_client_error() {
    cmd()
        .arg("match")
        .write_stdin(json!({ "candidates": [early_bird("e")] }).to_string())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("targetStudent is required"));
}

#[test]
fn match_without_body_is_client_error() {
    cmd()
        .arg("match")
        .write_stdin("")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("No data provided"));
}

#[test]
fn match_with_malformed_json_is_client_error() {
    cmd()
        .arg("match")
        .write_stdin("{ \"targetStudent\": ")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Invalid JSON body"));
}

#[test]
fn match_without_candidates_succeeds() {
    let output = cmd()
        .arg("match")
        .write_stdin(json!({ "targetStudent": early_bird("t") }).to_string())
        .assert()
        .success()
        .get_output()
        .clone();
    assert_eq!(
        stdout_json(&output.stdout),
        json!({ "matches": [], "message": "No candidates provided for matching" })
    );
}

#[test]
fn match_with_config_and_cluster_override() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{ "minMatchScore": 0 }"#).unwrap();
    let request = json!({
        "targetStudent": early_bird("t"),
        "candidates": [party_goer("p"), early_bird("e")]
    });

    let output = cmd()
        .arg("--config")
        .arg(&config)
        .args(["--clusters", "1", "match"])
        .write_stdin(request.to_string())
        .assert()
        .success()
        .get_output()
        .clone();
    let body = stdout_json(&output.stdout);
    assert_eq!(body["matchesFound"], 2);
    assert_eq!(body["matches"][0]["student"]["_id"], "e");
    assert_eq!(body["matches"][1]["student"]["_id"], "p");
    assert_eq!(body["matches"][1]["compatibilityScore"], 0);
}

#[test]
fn missing_config_file_fails() {
    cmd()
        .args(["--config", "/nonexistent/config.json", "health"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to open engine config file"));
}

#[test]
fn match_groups_between_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("request.json");
    let output = dir.path().join("response.json");
    let request = json!({
        "students": [
            early_bird("e1"),
            party_goer("p1"),
            early_bird("e2"),
            party_goer("p2"),
            early_bird("e3")
        ],
        "roomCapacity": 2
    });
    fs::write(&input, request.to_string()).unwrap();

    cmd()
        .arg("match-groups")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let body: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(body["totalGroups"], 2);
    assert_eq!(body["roomCapacity"], 2);
    let rooms = body["groups"]
        .as_array()
        .unwrap()
        .iter()
        .map(|group| {
            group["students"]
                .as_array()
                .unwrap()
                .iter()
                .map(|s| s["_id"].as_str().unwrap().to_owned())
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    assert_eq!(rooms, [["e1", "e2"], ["p1", "p2"]]);
}

#[test]
fn match_groups_zero_capacity_is_client_error() {
    cmd()
        .arg("match-groups")
        .write_stdin(json!({ "students": [early_bird("a")], "roomCapacity": 0 }).to_string())
        .assert()
        .code(2);
}

#[test]
fn match_groups_small_roster() {
    let output = cmd()
        .arg("match-groups")
        .write_stdin(json!({ "students": [early_bird("a")], "roomCapacity": 2 }).to_string())
        .assert()
        .success()
        .get_output()
        .clone();
    assert_eq!(
        stdout_json(&output.stdout)["message"],
        "Not enough students (1) for room capacity 2"
    );
}
