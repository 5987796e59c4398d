//! Integration tests for rfpack-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::fs::File;
use std::path::Path;
use tempfile::TempDir;

const ARCHIVE_NAME: &str = "rf-dashboard-deployment.zip";

fn rfpack_cmd(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("rfpack");
    cmd.current_dir(dir);
    cmd
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn entry_names(archive: &Path) -> Vec<String> {
    let file = File::open(archive).expect("archive not created");
    let archive = zip::ZipArchive::new(file).expect("invalid archive");
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().expect("failed to create temp dir");
    rfpack_cmd(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rfpack"));
}

#[test]
fn test_help_flag() {
    let temp = TempDir::new().expect("failed to create temp dir");
    rfpack_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deployment archive"));
}

#[test]
fn test_packages_current_directory() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let root = temp.path();
    write(root, "a.txt", "a");
    write(root, "node_modules/b.txt", "b");
    write(root, ".git/HEAD", "ref: refs/heads/main");
    write(root, "src/c.txt", "c");

    rfpack_cmd(root)
        .assert()
        .success()
        .stdout(predicate::str::contains("Added: a.txt\n"))
        .stdout(predicate::str::contains("Added: src/c.txt\n"))
        .stdout(predicate::str::contains("node_modules").not())
        .stdout(predicate::str::contains(".git").not());

    assert_eq!(entry_names(&root.join(ARCHIVE_NAME)), vec!["a.txt", "src/c.txt"]);
}

#[test]
fn test_output_format() {
    let temp = TempDir::new().expect("failed to create temp dir");
    write(temp.path(), "index.html", "<html></html>");

    let output = rfpack_cmd(temp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    assert_eq!(
        stdout,
        "Added: index.html\n\n✅ Created rf-dashboard-deployment.zip (0.00 MB)\n"
    );
}

#[test]
fn test_empty_directory() {
    let temp = TempDir::new().expect("failed to create temp dir");

    rfpack_cmd(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("\n✅ Created rf-dashboard-deployment.zip ("));

    assert!(entry_names(&temp.path().join(ARCHIVE_NAME)).is_empty());
}

#[test]
fn test_previous_archive_not_included_or_appended() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let root = temp.path();
    write(root, "app.js", "1");

    rfpack_cmd(root).assert().success();
    rfpack_cmd(root)
        .assert()
        .success()
        .stdout(predicate::str::contains(ARCHIVE_NAME).count(1));

    assert_eq!(entry_names(&root.join(ARCHIVE_NAME)), vec!["app.js"]);
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let temp = TempDir::new().expect("failed to create temp dir");
    write(temp.path(), "dist/bundle.js", "min");
    write(temp.path(), "main.py", "print()");

    rfpack_cmd(temp.path())
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("dist").not())
        .stderr(predicate::str::contains("pruned directory"));
}

#[test]
fn test_rejects_arguments() {
    let temp = TempDir::new().expect("failed to create temp dir");
    rfpack_cmd(temp.path())
        .arg("somewhere")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unexpected argument"));
    assert!(!temp.path().join(ARCHIVE_NAME).exists());
}

#[cfg(unix)]
#[test]
fn test_unreadable_entry_fails_run() {
    use std::os::unix::fs::symlink;

    let temp = TempDir::new().expect("failed to create temp dir");
    symlink(temp.path().join("missing-target"), temp.path().join("broken-link")).unwrap();

    rfpack_cmd(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("failed to create rf-dashboard-deployment.zip"));
}
