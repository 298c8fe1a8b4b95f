//! Tests for the `claude-manager` binary.

use assert_cmd::Command;
use claude_manager::constants::{AGENTS_DIR_ENV, BACKUP_DIR_ENV, CONFIG_PATH_ENV};
use claude_manager::test_utils::{ConfigFixture, write_agent};
use predicates::prelude::*;
use serde_json::json;
use std::fs;

fn fixture() -> ConfigFixture {
    ConfigFixture::with_document(&json!({
        "numStartups": 3,
        "projects": {
            "/work/app": {
                "history": [{"display": "one"}, {"display": "two"}, {"display": "three"}],
                "mcpServers": {},
                "hasTrustDialogAccepted": true
            }
        }
    }))
}

/// The binary with every path pointed into the fixture.
fn cmd(fixture: &ConfigFixture) -> Command {
    let mut cmd = Command::cargo_bin("claude-manager").unwrap();
    cmd.env(CONFIG_PATH_ENV, fixture.config_path())
        .env(BACKUP_DIR_ENV, &fixture.paths().backup_dir)
        .env(AGENTS_DIR_ENV, &fixture.paths().global_agents_dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn backup_count(fixture: &ConfigFixture) -> usize {
    fs::read_dir(&fixture.paths().backup_dir).map(|entries| entries.count()).unwrap_or(0)
}

#[test]
fn test_projects_lists_entries() {
    let fixture = fixture();
    cmd(&fixture)
        .arg("projects")
        .arg("--details")
        .assert()
        .success()
        .stdout(predicate::str::contains("/work/app"))
        .stdout(predicate::str::contains("history: 3"));
}

#[test]
fn test_missing_config_exits_with_error() {
    let fixture = ConfigFixture::new();
    cmd(&fixture)
        .arg("stats")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_config_flag_overrides_environment() {
    let fixture = fixture();
    let other = ConfigFixture::new();
    let config = fixture.config_path().to_string_lossy().into_owned();
    cmd(&other)
        .args(["--config", config.as_str(), "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Startups: 3"));
}

#[test]
fn test_mcp_add_rejects_unknown_fields() {
    let fixture = fixture();
    let before = fs::read(fixture.config_path()).unwrap();

    cmd(&fixture)
        .args(["mcp", "add", "/work/app", "bad", "--json", r#"{"command": "npx", "bogus": 1}"#])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown fields: bogus"));

    assert_eq!(fs::read(fixture.config_path()).unwrap(), before);
    assert_eq!(backup_count(&fixture), 0);
}

#[test]
fn test_mcp_add_prints_advisory_and_saves_with_backup() {
    let fixture = fixture();
    cmd(&fixture)
        .args([
            "mcp",
            "add",
            "/work/app",
            "github",
            "--json",
            r#"{"command": "npx", "args": ["@modelcontextprotocol/server-github"]}"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("GITHUB_TOKEN"));

    let config = fixture.read_config();
    assert_eq!(
        config["projects"]["/work/app"]["mcpServers"]["github"]["command"],
        json!("npx")
    );
    assert_eq!(backup_count(&fixture), 1);
}

#[test]
fn test_mcp_add_from_template_and_remove() {
    let fixture = fixture();
    cmd(&fixture)
        .args(["--no-backup", "mcp", "add", "/work/app", "mem", "--template", "memory"])
        .assert()
        .success();
    assert_eq!(
        fixture.read_config()["projects"]["/work/app"]["mcpServers"]["mem"]["args"][1],
        json!("@modelcontextprotocol/server-memory")
    );

    cmd(&fixture)
        .args(["--no-backup", "mcp", "remove", "/work/app", "mem"])
        .assert()
        .success();
    assert_eq!(fixture.read_config()["projects"]["/work/app"]["mcpServers"], json!({}));
    assert_eq!(backup_count(&fixture), 0);
}

#[test]
fn test_mcp_validate() {
    let fixture = ConfigFixture::new();
    cmd(&fixture)
        .args(["mcp", "validate", "--json", r#"{"command": "node"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration valid"));

    cmd(&fixture)
        .args(["mcp", "validate", "--json", r#"{"args": ["x"]}"#])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing required fields: command"));

    cmd(&fixture)
        .args(["mcp", "validate", "--json", "{not json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid JSON"));
}

#[test]
fn test_mcp_templates_lists_all() {
    let fixture = ConfigFixture::new();
    let assert = cmd(&fixture).args(["mcp", "templates"]).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    for name in ["filesystem", "github", "postgres", "claude-flow", "memory", "custom"] {
        assert!(stdout.contains(name), "missing template {name}: {stdout}");
    }
}

#[test]
fn test_clear_history_keep() {
    let fixture = fixture();
    cmd(&fixture)
        .args(["clear-history", "/work/app", "--keep", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 2 history entries"));

    let history = fixture.read_config()["projects"]["/work/app"]["history"].clone();
    assert_eq!(history, json!([{"display": "three"}]));
}

#[test]
fn test_remove_unknown_project_fails() {
    let fixture = fixture();
    cmd(&fixture)
        .args(["remove", "/nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Project not found: /nope"));
}

#[test]
fn test_backup_create_list_restore() {
    let fixture = fixture();
    cmd(&fixture).args(["backup", "create"]).assert().success();
    assert_eq!(backup_count(&fixture), 1);

    let backup_name = fs::read_dir(&fixture.paths().backup_dir)
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .file_name()
        .to_string_lossy()
        .into_owned();

    cmd(&fixture)
        .args(["backup", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(backup_name.as_str()));

    cmd(&fixture).args(["--no-backup", "remove", "/work/app"]).assert().success();
    assert_eq!(fixture.read_config()["projects"], json!({}));

    cmd(&fixture).args(["backup", "restore", backup_name.as_str()]).assert().success();
    assert!(fixture.read_config()["projects"].get("/work/app").is_some());
    assert_eq!(backup_count(&fixture), 1);
}

#[test]
fn test_backup_delete_by_name() {
    let fixture = fixture();
    cmd(&fixture).args(["backup", "create"]).assert().success();
    let backup_name = fs::read_dir(&fixture.paths().backup_dir)
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .file_name()
        .to_string_lossy()
        .into_owned();

    cmd(&fixture)
        .args(["backup", "delete", backup_name.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted backup"));
    assert_eq!(backup_count(&fixture), 0);
    assert!(fixture.config_path().exists());

    cmd(&fixture)
        .args(["backup", "delete", backup_name.as_str()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Backup not found"));
}

#[test]
fn test_agents_with_project() {
    let fixture = fixture();
    fixture.write_global_agent("reviewer.md", "name: reviewer\ndescription: global one");
    let project = fixture.project_dir("app");
    write_agent(
        &project.join(".claude").join("agents"),
        "reviewer.md",
        "name: reviewer\ndescription: project one",
    );

    let project_arg = project.to_string_lossy().into_owned();
    cmd(&fixture)
        .args(["agents", "--project", project_arg.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("reviewer"))
        .stdout(predicate::str::contains("global one").not())
        .stdout(predicate::str::contains("project one"));
}
