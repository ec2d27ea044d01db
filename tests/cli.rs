//! End-to-end tests of the runx binary

mod common;

use assert_cmd::Command;
use common::create_test_config;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn runx(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("runx").unwrap();
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd
}

const CONFIG: &str = r#"
name: demo
scripts:
  hello: echo hello-from-runx
  greet:
    command: echo ${name:string}
    description: Greet someone
  build:
    command: touch built
    depends: hello
  fail: exit 4
"#;

#[test]
fn test_list_scripts() {
    let (temp_dir, _) = create_test_config(CONFIG);

    runx(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available scripts:"))
        .stdout(predicate::str::contains("Greet someone"))
        .stdout(predicate::str::contains("(depends: hello)"));
}

#[test]
fn test_run_script_by_name() {
    let (temp_dir, _) = create_test_config(CONFIG);

    runx(temp_dir.path())
        .arg("hello")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello-from-runx"))
        .stderr(predicate::str::contains("Running: echo hello-from-runx"));
}

#[test]
fn test_run_builtin() {
    let (temp_dir, _) = create_test_config(CONFIG);

    runx(temp_dir.path())
        .args(["run", "greet", "world"])
        .assert()
        .success()
        .stdout(predicate::str::contains("world"));
}

#[test]
fn test_placeholder_from_arguments() {
    let (temp_dir, _) = create_test_config(CONFIG);

    runx(temp_dir.path())
        .args(["greet", "big world"])
        .assert()
        .success()
        .stdout(predicate::str::contains("big world"));
}

#[test]
fn test_missing_input_fails() {
    let (temp_dir, _) = create_test_config(CONFIG);

    runx(temp_dir.path())
        .arg("greet")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("name"));
}

#[test]
fn test_dependencies_run_before_target() {
    let (temp_dir, _) = create_test_config(CONFIG);

    runx(temp_dir.path())
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello-from-runx"));

    assert!(temp_dir.path().join("built").exists());
}

#[test]
fn test_dry_run() {
    let (temp_dir, _) = create_test_config(CONFIG);

    runx(temp_dir.path())
        .args(["build", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello-from-runx").not())
        .stderr(predicate::str::contains("Running: touch built"));

    assert!(!temp_dir.path().join("built").exists());
}

#[test]
fn test_exit_code_passes_through() {
    let (temp_dir, _) = create_test_config(CONFIG);

    runx(temp_dir.path())
        .arg("fail")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Script 'fail' failed"));
}

#[test]
fn test_silent_hides_runner_output() {
    let (temp_dir, _) = create_test_config(CONFIG);

    runx(temp_dir.path())
        .args(["-s", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello-from-runx"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_explicit_config_file() {
    let (temp_dir, config_path) = create_test_config(CONFIG);
    let elsewhere = TempDir::new().unwrap();

    runx(elsewhere.path())
        .arg("-f")
        .arg(&config_path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello"));

    // Scripts run relative to the config file, not the caller
    runx(elsewhere.path())
        .arg("--file")
        .arg(&config_path)
        .arg("build")
        .assert()
        .success();
    assert!(temp_dir.path().join("built").exists());
}

#[test]
fn test_config_found_from_subdirectory() {
    let (temp_dir, _) = create_test_config(CONFIG);
    let sub = temp_dir.path().join("nested");
    fs::create_dir(&sub).unwrap();

    runx(&sub).arg("hello").assert().success();
}

#[test]
fn test_validate() {
    let (temp_dir, _) = create_test_config(CONFIG);
    runx(temp_dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("no problems found"));

    let (bad_dir, _) = create_test_config(
        r#"
scripts:
  a:
    command: echo a
    depends: b
  b:
    command: echo ${msg}
    depends: a
"#,
    );
    runx(bad_dir.path())
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Circular dependency: a → b → a"))
        .stdout(predicate::str::contains("Script 'b':"));
}

#[test]
fn test_reserved_name_warning() {
    let (temp_dir, _) = create_test_config("scripts:\n  list: echo shadowed\n  ok: echo ok\n");

    runx(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"))
        .stderr(predicate::str::contains("conflicts with built-in command"));

    runx(temp_dir.path())
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Script 'list' conflicts with built-in command",
        ));
}

#[test]
fn test_input_without_placeholder_is_appended() {
    let (temp_dir, _) = create_test_config(CONFIG);

    runx(temp_dir.path())
        .args(["hello", "world"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello-from-runx world"))
        .stderr(predicate::str::contains("passed as extra arguments"))
        .stderr(predicate::str::contains("ignored").not());
}

#[test]
fn test_missing_config() {
    let temp_dir = TempDir::new().unwrap();

    runx(temp_dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to find config file"));
}

#[test]
fn test_init() {
    let temp_dir = TempDir::new().unwrap();

    runx(temp_dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));
    assert!(temp_dir.path().join("runx.yml").exists());

    runx(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    runx(temp_dir.path()).args(["init", "--force"]).assert().success();

    // The sample config is valid
    runx(temp_dir.path()).arg("validate").assert().success();
}

#[test]
fn test_completions() {
    let temp_dir = TempDir::new().unwrap();

    runx(temp_dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("runx"));
}

#[test]
fn test_version() {
    let temp_dir = TempDir::new().unwrap();

    runx(temp_dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
