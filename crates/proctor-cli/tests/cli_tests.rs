//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn proctor() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("proctor").unwrap()
}

#[test]
fn help_output() {
    proctor()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Exam assembly, presentation, and audit toolkit",
        ));
}

#[test]
fn version_output() {
    proctor()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("proctor"));
}

#[test]
fn init_creates_starter_definitions() {
    let dir = TempDir::new().unwrap();

    proctor()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("math-practice.toml"))
        .stdout(predicate::str::contains("cs-final.toml"))
        .stdout(predicate::str::contains("Next steps"));

    assert!(dir.path().join("exams/math-practice.toml").exists());
    assert!(dir.path().join("exams/cs-final.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    proctor()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    proctor()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_into_named_directory() {
    let dir = TempDir::new().unwrap();

    proctor()
        .current_dir(dir.path())
        .arg("init")
        .arg("campus")
        .assert()
        .success();

    assert!(dir.path().join("campus/exams/math-practice.toml").exists());
}

#[test]
fn validate_practice_definition() {
    let dir = TempDir::new().unwrap();
    proctor()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    proctor()
        .current_dir(dir.path())
        .arg("validate")
        .arg("exams/math-practice.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Midterm Practice"))
        .stdout(predicate::str::contains("2 questions"))
        .stdout(predicate::str::contains("Total marks: 15"))
        .stdout(predicate::str::contains("All exam definitions valid"));
}

#[test]
fn validate_directory() {
    let dir = TempDir::new().unwrap();
    proctor()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    proctor()
        .current_dir(dir.path())
        .arg("validate")
        .arg("exams")
        .assert()
        .success()
        .stdout(predicate::str::contains("Midterm Practice"))
        .stdout(predicate::str::contains("Final Examination"));
}

#[test]
fn validate_nonexistent_file() {
    proctor()
        .arg("validate")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_rejects_out_of_range_answer() {
    let dir = TempDir::new().unwrap();
    let bad = r#"
[exam]
title = "Broken"
kind = "practice"

[subject]
name = "Advanced Mathematics"
code = "MATH301"
credit_hours = 3

[[questions]]
kind = "single-choice"
header = "Calculus"
body = "What is the derivative of x²?"
marks = 10
options = ["2x", "x", "2", "x²"]
correct = 4
"#;
    std::fs::write(dir.path().join("bad.toml"), bad).unwrap();

    proctor()
        .current_dir(dir.path())
        .arg("validate")
        .arg("bad.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn audit_missing_log_is_a_notice_not_an_error() {
    let dir = TempDir::new().unwrap();

    proctor()
        .current_dir(dir.path())
        .arg("audit")
        .arg("question-logs/questions-1.log")
        .assert()
        .success()
        .stdout(predicate::str::contains("No audit log"));
}
