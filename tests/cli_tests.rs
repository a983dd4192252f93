//! Integration tests for the composio-sharepoint CLI
//!
//! These tests run the actual binary and verify output. None of them reach
//! the network: `run` is only exercised on paths that fail before the call.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get the binary to test
fn cli_cmd() -> Command {
    let mut cmd = Command::cargo_bin("composio-sharepoint").unwrap();
    cmd.env_remove("COMPOSIO_API_KEY")
        .env_remove("COMPOSIO_BASE_URL")
        .env_remove("COMPOSIO_ENTITY_ID")
        .env_remove("COMPOSIO_TIMEOUT_SECS")
        .env("RUST_LOG", "off");
    cmd
}

fn write_node(dir: &TempDir, name: &str, yaml: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, yaml).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_help_flag() {
    cli_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "SharePoint workflow node backed by Composio",
        ));
}

#[test]
fn test_actions_lists_table() {
    cli_cmd()
        .arg("actions")
        .assert()
        .success()
        .stdout(predicate::str::contains("Create Folder"))
        .stdout(predicate::str::contains("SHARE_POINT_SHAREPOINT_REMOVE_USER"))
        .stdout(predicate::str::contains("document_library, folder_name, relative_path"));
}

#[test]
fn test_schema_is_json() {
    let output = cli_cmd().arg("schema").output().unwrap();
    assert!(output.status.success());

    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(schema["name"], "SharePointAPI");
    assert_eq!(schema["documentation"], "https://docs.composio.dev/tools/share-point");
}

// ============================================================================
// validate
// ============================================================================

#[test]
fn test_validate_complete_node() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_node(
        &temp_dir,
        "folder.yaml",
        r#"
action:
  - name: Create Folder
fields:
  document_library: Shared Documents
  folder_name: Reports
  relative_path: 2024/Q3
"#,
    );

    cli_cmd()
        .args(["validate", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("SHARE_POINT_SHAREPOINT_CREATE_FOLDER"))
        .stdout(predicate::str::contains("Fields set: 3"))
        .stdout(predicate::str::contains("not set").not());
}

#[test]
fn test_validate_reports_unset_fields() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_node(
        &temp_dir,
        "user.yaml",
        r#"
action: Create User
fields:
  email: user@example.com
  title: ""
"#,
    );

    cli_cmd()
        .args(["validate", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("login_name, title"));
}

#[test]
fn test_validate_blank_and_numeric_fields() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_node(
        &temp_dir,
        "list.yaml",
        r#"
action: Create List
fields:
  name: Tasks
  template: 100
  description:
"#,
    );

    cli_cmd()
        .args(["validate", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fields set: 2"))
        .stdout(predicate::str::contains("not set: description"));
}

#[test]
fn test_validate_invalid_action() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_node(&temp_dir, "bad.yaml", "action: Invalid Action\n");

    cli_cmd()
        .args(["validate", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid action: Invalid Action"))
        .stderr(predicate::str::contains("Fix:"));
}

#[test]
fn test_validate_unknown_field() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_node(
        &temp_dir,
        "typo.yaml",
        "action: Find User\nfields:\n  emial: user@example.com\n",
    );

    cli_cmd()
        .args(["validate", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("emial"));
}

#[test]
fn test_validate_missing_file() {
    cli_cmd()
        .args(["validate", "/nonexistent/node.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

// ============================================================================
// run
// ============================================================================

#[test]
fn test_run_without_api_key_fails_with_action_name() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_node(
        &temp_dir,
        "find.yaml",
        "action: Find User\nfields:\n  email: user@example.com\n",
    );

    cli_cmd()
        .current_dir(temp_dir.path())
        .args(["run", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to execute Find User"))
        .stderr(predicate::str::contains("COMPOSIO_API_KEY"));
}

#[test]
fn test_run_rejects_insecure_base_url() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_node(&temp_dir, "find.yaml", "action: Find User\n");

    cli_cmd()
        .current_dir(temp_dir.path())
        .env("COMPOSIO_BASE_URL", "http://composio.example.com")
        .args(["run", &file, "--api-key", "k"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must use https"));
}
