//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command with HOME pointed at a scratch directory
fn userdesk(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("userdesk").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("USERDESK_ENDPOINT")
        .env_remove("USERDESK_CONFIG")
        .env("USERDESK_QUIET", "1");
    cmd
}

// === Help Tests ===

#[test]
fn test_top_level_help_lists_commands() {
    let home = TempDir::new().unwrap();
    userdesk(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_list_help() {
    let home = TempDir::new().unwrap();
    userdesk(&home)
        .args(["list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Output format"));
}

#[test]
fn test_add_help_names_fields() {
    let home = TempDir::new().unwrap();
    userdesk(&home)
        .args(["add", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--name"))
        .stdout(predicate::str::contains("--email"))
        .stdout(predicate::str::contains("--department"));
}

#[test]
fn test_delete_help() {
    let home = TempDir::new().unwrap();
    userdesk(&home)
        .args(["delete", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skip the confirmation prompt"));
}

// === Validation Tests ===

#[test]
fn test_add_rejects_bad_email_before_any_request() {
    let home = TempDir::new().unwrap();
    userdesk(&home)
        .args(["--endpoint", "http://127.0.0.1:9/users"])
        .args(["add", "--name", "Ada", "--email", "nope", "--department", "Eng"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid email address"));
}

#[test]
fn test_update_requires_numeric_id() {
    let home = TempDir::new().unwrap();
    userdesk(&home)
        .args(["update", "abc", "--name", "A", "--email", "a@b.co", "--department", "X"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid"));
}

#[test]
fn test_delete_without_tty_needs_yes() {
    let home = TempDir::new().unwrap();
    userdesk(&home)
        .args(["delete", "3"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Pass --yes"));
}

// === Config Tests ===

#[test]
fn test_config_path_honours_file_flag() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("custom.toml");
    userdesk(&home)
        .args(["config", "path", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_config_init_then_show() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("config.toml");

    userdesk(&home)
        .args(["config", "init", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config"));

    // Second init without --force refuses
    userdesk(&home)
        .args(["config", "init", "--file"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    userdesk(&home)
        .args(["config", "show", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("create_ids = \"sequential\""));
}

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    userdesk(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("userdesk"));
}

#[test]
fn test_config_env_feeds_collection_commands() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("custom.toml");
    std::fs::write(&file, "[api]\nendpoint = \"http://127.0.0.1:9/users?page=2\"\n").unwrap();

    userdesk(&home)
        .env("USERDESK_CONFIG", &file)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("users?page=2"));

    // The endpoint from the custom file is used, and rejected before any request
    userdesk(&home)
        .env("USERDESK_CONFIG", &file)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("http://127.0.0.1:9/users?page=2"))
        .stderr(predicate::str::contains("jsonplaceholder").not());
}

#[test]
fn test_config_flag_sets_config_path() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("flagged.toml");
    userdesk(&home)
        .args(["--config"])
        .arg(&file)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("flagged.toml"));
}
