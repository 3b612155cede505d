//! Basic binary invocation tests (assert_cmd).

mod common;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::Path;

use common::{sample_token, temp_root, write_client_secrets};

fn pc_cmd(root: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("project-context");
    cmd.env("PROJECT_CONTEXT_HOME", root);
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_version() {
    let (_tmp, root) = temp_root();
    pc_cmd(&root)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("project-context"));
}

#[test]
fn test_cli_help() {
    let (_tmp, root) = temp_root();
    pc_cmd(&root)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Google Drive"));
}

#[test]
fn test_cli_no_args_shows_error() {
    let (_tmp, root) = temp_root();
    pc_cmd(&root).assert().failure();
}

#[test]
fn test_login_without_client_secret_names_path() {
    let (_tmp, root) = temp_root();
    let expected = root.join("client_secrets.json");
    pc_cmd(&root)
        .args(["auth", "login"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(expected.display().to_string()));
}

#[test]
fn test_login_with_valid_token_needs_no_browser() {
    let (_tmp, root) = temp_root();
    let token_path = root.join("profiles").join("default").join("token.json");
    std::fs::create_dir_all(token_path.parent().unwrap()).unwrap();
    sample_token("http://127.0.0.1:9/token", 3600)
        .save(&token_path)
        .unwrap();

    pc_cmd(&root)
        .args(["auth", "login"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already authorized"));
}

#[test]
fn test_auth_status_and_logout() {
    let (_tmp, root) = temp_root();
    pc_cmd(&root)
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("login required"));

    let token_path = root.join("profiles").join("default").join("token.json");
    sample_token("http://127.0.0.1:9/token", 3600)
        .save(&token_path)
        .unwrap();
    pc_cmd(&root)
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("active"));

    pc_cmd(&root).args(["auth", "logout"]).assert().success();
    assert!(!token_path.exists());
}

#[test]
fn test_auth_status_reports_corrupted_token() {
    let (_tmp, root) = temp_root();
    let token_path = root.join("profiles").join("default").join("token.json");
    std::fs::create_dir_all(token_path.parent().unwrap()).unwrap();
    std::fs::write(&token_path, "garbage").unwrap();

    pc_cmd(&root)
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("corrupted"));
}

#[test]
fn test_profile_add_use_list() {
    let (_tmp, root) = temp_root();
    pc_cmd(&root).args(["profile", "add", "work"]).assert().success();
    pc_cmd(&root).args(["profile", "add", "home"]).assert().success();
    pc_cmd(&root).args(["profile", "use", "work"]).assert().success();

    pc_cmd(&root)
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* work"))
        .stdout(predicate::str::contains("  home"));
}

#[test]
fn test_profile_use_unknown_fails() {
    let (_tmp, root) = temp_root();
    pc_cmd(&root)
        .args(["profile", "use", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_use_flag_requires_existing_profile() {
    let (_tmp, root) = temp_root();
    pc_cmd(&root)
        .args(["--use", "ghost", "auth", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn test_profile_set_secrets_and_info() {
    let (tmp, root) = temp_root();
    let downloaded = tmp.path().join("client_secret_123.json");
    write_client_secrets(&downloaded, "https://oauth2.googleapis.com/token");

    pc_cmd(&root).args(["profile", "add", "work"]).assert().success();
    pc_cmd(&root)
        .args(["profile", "set-secrets"])
        .arg(&downloaded)
        .assert()
        .success();

    pc_cmd(&root)
        .args(["profile", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile:  work"))
        .stdout(predicate::str::contains("profile (specific)"));
}
