extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const USAGE_LINE: &str = "USAGE: newton [--n=<value>]\n";

fn newton() -> Command {
    let mut cmd = Command::cargo_bin("newton").unwrap();
    cmd.env("NEWTON_THREADS", "2").env("RUST_LOG", "warn");
    cmd
}

#[test]
fn unknown_flags_print_usage() {
    let dir = tempfile::tempdir().unwrap();
    newton()
        .current_dir(dir.path())
        .arg("--roots=3")
        .assert()
        .failure()
        .stderr(USAGE_LINE);
    assert!(!dir.path().join("newton.ppm").exists());
}

#[test]
fn positional_arguments_are_rejected() {
    newton()
        .arg("5")
        .assert()
        .failure()
        .stderr(USAGE_LINE);
}

#[test]
fn zero_roots_is_rejected() {
    newton()
        .arg("--n=0")
        .assert()
        .failure()
        .stderr(USAGE_LINE);
}

#[test]
fn non_numeric_roots_are_rejected() {
    newton()
        .arg("--n=three")
        .assert()
        .failure()
        .stderr(USAGE_LINE);
}

#[test]
fn help_and_version_flags_are_not_accepted() {
    for flag in &["--help", "-h", "--version", "-V"] {
        newton()
            .arg(flag)
            .assert()
            .failure()
            .stdout("")
            .stderr(USAGE_LINE);
    }
}

#[test]
fn value_must_be_joined_with_an_equals_sign() {
    newton()
        .args(&["--n", "5"])
        .assert()
        .failure()
        .stderr(USAGE_LINE);
}

#[test]
fn repeated_flag_is_rejected() {
    newton()
        .args(&["--n=3", "--n=4"])
        .assert()
        .failure()
        .stderr(USAGE_LINE);
}

#[test]
fn bad_thread_override_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    newton()
        .current_dir(dir.path())
        .env("NEWTON_THREADS", "lots")
        .arg("--n=1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("NEWTON_THREADS"));
    assert!(!dir.path().join("newton_serial.ppm").exists());
}

#[test]
fn full_run_writes_three_images_and_a_report() {
    let dir = tempfile::tempdir().unwrap();
    newton()
        .current_dir(dir.path())
        .arg("--n=1")
        .assert()
        .success()
        .stdout(predicate::str::contains("@newton serial best"))
        .stdout(predicate::str::contains("speedup from tasks over flat"))
        .stdout(predicate::str::contains("Wrote image file"));
    for name in &["newton.ppm", "newton_serial.ppm", "newton_tasks.ppm"] {
        assert!(dir.path().join(name).exists(), "{} missing", name);
    }
}
