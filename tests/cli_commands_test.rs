//! Tests for the remote-backed commands that fail before any request.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let env = TestEnv::new();

    env.asa()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("board"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version() {
    let env = TestEnv::new();

    env.asa()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("asa "));
}

#[test]
fn test_commands_require_token() {
    let env = TestEnv::new();

    for args in [
        vec!["who"],
        vec!["me"],
        vec!["teams"],
        vec!["board"],
        vec!["search", "fix"],
    ] {
        env.asa()
            .args(&args)
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("No Asana token"));
    }
}

#[test]
fn test_missing_token_json_error() {
    let env = TestEnv::new();

    let output = env.asa().args(["--json", "who"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert!(json["error"].as_str().unwrap().contains("ASANA_TOKEN"));
}

#[test]
fn test_board_without_default_suggests_init() {
    let env = TestEnv::new();

    env.asa()
        .arg("board")
        .env("ASANA_TOKEN", "dummy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No board given"))
        .stderr(predicate::str::contains("--board"))
        .stderr(predicate::str::contains("asa config --init"));
}

#[test]
fn test_team_without_default_suggests_init() {
    let env = TestEnv::new();

    env.asa()
        .arg("boards")
        .env("ASANA_TOKEN", "dummy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No team given"));
}

#[test]
fn test_teams_without_workspace_suggests_init() {
    let env = TestEnv::new();

    env.asa()
        .args(["teams", "--token", "dummy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No workspace given"))
        .stderr(predicate::str::contains("--workspace"));
}

#[test]
fn test_search_requires_text() {
    let env = TestEnv::new();

    env.asa().arg("search").assert().failure().code(2);
}

#[test]
fn test_config_flags_conflict() {
    let env = TestEnv::new();

    env.asa()
        .args(["config", "--init", "--path"])
        .assert()
        .failure()
        .code(2);
}
