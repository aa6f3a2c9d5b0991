use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

fn chrononame() -> Command {
    let mut cmd = Command::cargo_bin("chrononame").unwrap();
    // Keep output independent of the invoking environment.
    cmd.env_remove("NO_COLOR").env_remove("CHRONONAME_YES");
    cmd
}

#[test]
fn test_help_command() {
    chrononame()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Rename files by their true timestamps",
        ));
}

#[test]
fn test_plan_invalid_directory_fails() {
    chrononame()
        .args(["plan", "/definitely/not/a/real/path"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid directory"));
}

#[test]
fn test_plan_empty_directory_is_success() {
    let temp = TempDir::new().unwrap();
    chrononame()
        .args(["plan", temp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No files to rename"));
}

#[test]
fn test_plan_lists_planned_names_without_renaming() {
    let temp = TempDir::new().unwrap();
    temp.child("photo.jpg").write_str("x").unwrap();

    chrononame()
        .args(["plan", temp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("photo.jpg"))
        .stdout(predicate::str::contains("Total files planned: 1"));

    temp.child("photo.jpg").assert(predicate::path::exists());
    temp.child("rename_log.csv")
        .assert(predicate::path::missing());
}

#[test]
fn test_plan_json_output() {
    let temp = TempDir::new().unwrap();
    temp.child("photo.jpg").write_str("x").unwrap();

    let output = chrononame()
        .args(["plan", temp.path().to_str().unwrap(), "--output", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["operation"], "plan");
    assert_eq!(value["total"], 1);
}

#[test]
fn test_execute_with_yes_renames_and_creates_log() {
    let temp = TempDir::new().unwrap();
    temp.child("a.jpg").write_str("x").unwrap();
    temp.child("b.txt").write_str("y").unwrap();

    chrononame()
        .args(["execute", temp.path().to_str().unwrap(), "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 renamed"));

    temp.child("a.jpg").assert(predicate::path::missing());
    temp.child("rename_log.csv").assert(predicate::path::exists());
}

#[test]
fn test_execute_declined_confirmation_leaves_files_alone() {
    let temp = TempDir::new().unwrap();
    temp.child("a.jpg").write_str("x").unwrap();

    chrononame()
        .args(["execute", temp.path().to_str().unwrap()])
        .write_stdin("no\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rename canceled by user."));

    temp.child("a.jpg").assert(predicate::path::exists());
    temp.child("rename_log.csv")
        .assert(predicate::path::missing());
}

#[test]
fn test_rollback_restores_last_batch() {
    let temp = TempDir::new().unwrap();
    temp.child("photo.jpg").write_str("x").unwrap();

    chrononame()
        .args(["execute", temp.path().to_str().unwrap(), "--yes"])
        .assert()
        .success();
    temp.child("photo.jpg").assert(predicate::path::missing());

    chrononame()
        .args(["rollback", temp.path().to_str().unwrap(), "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 restored"));

    temp.child("photo.jpg").assert(predicate::path::exists());
}

#[test]
fn test_no_color_flag_overrides_configured_color() {
    let temp = TempDir::new().unwrap();
    temp.child(".chrononame/config.toml")
        .write_str("[defaults]\nuse_color = true\n")
        .unwrap();
    temp.child("photo.jpg").write_str("x").unwrap();

    // Configured color applies even on a piped stdout.
    let output = chrononame()
        .current_dir(temp.path())
        .args(["plan", "."])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert!(String::from_utf8(output).unwrap().contains('\u{1b}'));

    // The flag beats the config.
    let output = chrononame()
        .current_dir(temp.path())
        .args(["plan", ".", "--no-color"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert!(!String::from_utf8(output).unwrap().contains('\u{1b}'));
}

#[test]
fn test_rollback_invalid_directory_fails_before_prompting() {
    chrononame()
        .args(["rollback", "/definitely/not/a/real/path"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid directory"))
        .stdout(predicate::str::contains("Rollback last batch").not());
}

#[test]
fn test_rollback_with_no_history_is_success() {
    let temp = TempDir::new().unwrap();
    chrononame()
        .args(["rollback", temp.path().to_str().unwrap(), "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No batch to rollback"));
}

#[test]
fn test_no_recursive_skips_subdirectories() {
    let temp = TempDir::new().unwrap();
    temp.child("top.txt").write_str("x").unwrap();
    temp.child("nested/deep.txt").write_str("y").unwrap();

    chrononame()
        .args([
            "execute",
            temp.path().to_str().unwrap(),
            "--no-recursive",
            "--yes",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 renamed"));

    temp.child("nested/deep.txt").assert(predicate::path::exists());
}
