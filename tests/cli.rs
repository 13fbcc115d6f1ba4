//! Integration tests for the brewbundle CLI.
//!
//! These tests run the compiled binary and verify its output.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::os::unix::fs::PermissionsExt;

/// Get brewbundle command for testing, isolated from any config in the
/// caller's environment.
fn brewbundle(temp: &assert_fs::TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("brewbundle");
    cmd.env_remove("BREWBUNDLE_CONFIG");
    cmd.current_dir(temp.path());
    cmd
}

/// Install a fake `brew` that records its arguments and exits with `code`.
fn fake_brew(temp: &assert_fs::TempDir, code: i32) -> std::path::PathBuf {
    let bin = temp.child("bin");
    bin.create_dir_all().unwrap();
    let brew = bin.child("brew");
    brew.write_str(&format!(
        "#!/bin/sh\necho \"$@\" > \"$(dirname \"$0\")/args\"\nexit {code}\n"
    ))
    .unwrap();
    std::fs::set_permissions(brew.path(), std::fs::Permissions::from_mode(0o755)).unwrap();
    bin.path().to_path_buf()
}

const CONFIG: &str = r#"{
  "taps": ["homebrew/cask-fonts"],
  "brews": ["jq", {"name": "postgresql", "restart_service": "changed"}],
  "casks": [{"name": "firefox", "greedy": true}],
  "masApps": {"Xcode": 497799835}
}"#;

// ============================================================================
// Basic CLI tests
// ============================================================================

#[test]
fn cli_no_args_shows_help() {
    let temp = assert_fs::TempDir::new().unwrap();
    brewbundle(&temp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn cli_help_flag_shows_about() {
    let temp = assert_fs::TempDir::new().unwrap();
    brewbundle(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Compile a Homebrew configuration"));
}

#[test]
fn cli_version_flag_shows_version() {
    let temp = assert_fs::TempDir::new().unwrap();
    brewbundle(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("brewbundle"));
}

// ============================================================================
// Compile command tests
// ============================================================================

#[test]
fn compile_prints_brewfile() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("brewbundle.json").write_str(CONFIG).unwrap();

    brewbundle(&temp)
        .arg("compile")
        .assert()
        .success()
        .stdout(predicate::str::contains("tap \"homebrew/cask-fonts\"\n"))
        .stdout(predicate::str::contains(
            "brew \"jq\"\nbrew \"postgresql\", restart_service: :changed\nbrew \"mas\"\n",
        ))
        .stdout(predicate::str::contains("cask \"firefox\", greedy: true"))
        .stdout(predicate::str::contains("mas \"Xcode\", id: 497799835"))
        .stdout(predicate::str::contains("# Docker containers").not());
}

#[test]
fn compile_reads_yaml() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("brew.yaml")
        .write_str("brews:\n  - wget\nwhalebrews:\n  - whalebrew/wget\n")
        .unwrap();

    brewbundle(&temp)
        .args(["-c", "brew.yaml", "compile"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "# Brews\nbrew \"wget\"\nbrew \"whalebrew\"\n\n",
        ))
        .stdout(predicate::str::contains("whalebrew \"whalebrew/wget\""));
}

#[test]
fn compile_config_from_env() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("other.json").write_str(r#"{"brews": ["fd"]}"#).unwrap();

    brewbundle(&temp)
        .env("BREWBUNDLE_CONFIG", "other.json")
        .arg("compile")
        .assert()
        .success()
        .stdout(predicate::str::contains("brew \"fd\""));
}

#[test]
fn compile_writes_output_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("brewbundle.json").write_str(CONFIG).unwrap();

    brewbundle(&temp)
        .args(["compile", "-o", "out/Brewfile"])
        .assert()
        .success();

    temp.child("out/Brewfile")
        .assert(predicate::str::starts_with("# Generated by brewbundle"))
        .assert(predicate::str::contains("brew \"jq\""));
}

#[test]
fn compile_is_byte_identical_across_runs() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("brewbundle.json").write_str(CONFIG).unwrap();

    let first = brewbundle(&temp).arg("compile").output().unwrap();
    let second = brewbundle(&temp).arg("compile").output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn compile_missing_config_fails() {
    let temp = assert_fs::TempDir::new().unwrap();

    brewbundle(&temp)
        .arg("compile")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config"));
}

#[test]
fn compile_rejects_bad_restart_service() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("brewbundle.json")
        .write_str(r#"{"brews": [{"name": "redis", "restart_service": "later"}]}"#)
        .unwrap();

    brewbundle(&temp)
        .arg("compile")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid restart_service value"));
}

// ============================================================================
// Command / env tests
// ============================================================================

#[test]
fn command_prints_guarded_script() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("brewbundle.json")
        .write_str(r#"{"brewPrefix": "/opt/homebrew/bin", "onActivation": {"cleanup": "zap"}}"#)
        .unwrap();

    brewbundle(&temp)
        .args(["command", "--brewfile", "/etc/Brewfile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("if [ -f /opt/homebrew/bin/brew ]; then"))
        .stdout(predicate::str::contains(
            "HOMEBREW_NO_AUTO_UPDATE=1 brew bundle --file='/etc/Brewfile' --no-lock --no-upgrade --cleanup --zap",
        ));
}

#[test]
fn env_prints_exports() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("brewbundle.json")
        .write_str(r#"{"global": {"brewfile": true}}"#)
        .unwrap();

    brewbundle(&temp)
        .args(["env", "--brewfile", "/etc/Brewfile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("export HOMEBREW_BUNDLE_FILE=/etc/Brewfile"))
        .stdout(predicate::str::contains("export HOMEBREW_BUNDLE_NO_LOCK=1"));
}

// ============================================================================
// Activate tests
// ============================================================================

#[test]
fn activate_without_brew_warns_and_succeeds() {
    let temp = assert_fs::TempDir::new().unwrap();
    let prefix = temp.child("missing");
    temp.child("brewbundle.json")
        .write_str(&format!(
            r#"{{"brewPrefix": "{}", "brews": ["jq"]}}"#,
            prefix.path().display()
        ))
        .unwrap();

    brewbundle(&temp)
        .arg("activate")
        .assert()
        .success()
        .stderr(predicate::str::contains("Homebrew is not installed"));

    temp.child("Brewfile")
        .assert(predicate::str::contains("brew \"jq\""));
}

#[test]
fn activate_runs_brew_bundle() {
    let temp = assert_fs::TempDir::new().unwrap();
    let prefix = fake_brew(&temp, 0);
    temp.child("brewbundle.json")
        .write_str(&format!(
            r#"{{"brewPrefix": "{}", "brews": ["jq"]}}"#,
            prefix.display()
        ))
        .unwrap();

    brewbundle(&temp)
        .args(["activate", "--cleanup", "uninstall"])
        .assert()
        .success();

    let brewfile = temp.child("Brewfile");
    brewfile.assert(predicate::path::exists());
    temp.child("bin/args").assert(predicate::str::contains(format!(
        "bundle --file={} --no-lock --no-upgrade --cleanup",
        brewfile.path().display()
    )));
}

#[test]
fn activate_passes_exit_code_through() {
    let temp = assert_fs::TempDir::new().unwrap();
    let prefix = fake_brew(&temp, 3);
    temp.child("brewbundle.json")
        .write_str(&format!(r#"{{"brewPrefix": "{}"}}"#, prefix.display()))
        .unwrap();

    brewbundle(&temp)
        .arg("activate")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("brew bundle failed"));
}

#[test]
fn activate_dry_run_writes_nothing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let prefix = fake_brew(&temp, 0);
    temp.child("brewbundle.json")
        .write_str(&format!(r#"{{"brewPrefix": "{}"}}"#, prefix.display()))
        .unwrap();

    brewbundle(&temp)
        .args(["activate", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would run:"));

    temp.child("Brewfile").assert(predicate::path::missing());
    temp.child("bin/args").assert(predicate::path::missing());
}

#[test]
fn activate_disabled_writes_nothing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let prefix = fake_brew(&temp, 0);
    temp.child("brewbundle.json")
        .write_str(&format!(
            r#"{{"enable": false, "brewPrefix": "{}", "brews": ["jq"]}}"#,
            prefix.display()
        ))
        .unwrap();

    brewbundle(&temp)
        .arg("activate")
        .assert()
        .success()
        .stdout(predicate::str::contains("disabled"));

    temp.child("Brewfile").assert(predicate::path::missing());
    temp.child("bin/args").assert(predicate::path::missing());
}

// ============================================================================
// Schema / completions tests
// ============================================================================

#[test]
fn schema_prints_json_schema() {
    let temp = assert_fs::TempDir::new().unwrap();
    brewbundle(&temp)
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"masApps\""))
        .stdout(predicate::str::contains("\"restart_service\""));
}

#[test]
fn completions_generate_for_bash() {
    let temp = assert_fs::TempDir::new().unwrap();
    brewbundle(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("brewbundle"));
}
