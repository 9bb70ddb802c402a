mod common;

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use common::{git_add_and_commit, init_git_repo, is_git_available, write_file};
use predicates::prelude::*;
use tempfile::tempdir;

const FOO: &str = "public class Foo {\n}\n";

fn docauthor() -> Command {
  let mut cmd = Command::cargo_bin("docauthor").expect("binary is built");
  cmd.arg("--no-config").arg("--colors=never");
  cmd
}

#[test]
fn test_help_lists_supported_languages() {
  Command::cargo_bin("docauthor")
    .unwrap()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("--language"))
    .stdout(predicate::str::contains("java"));
}

#[test]
fn test_missing_arguments_fail() {
  Command::cargo_bin("docauthor").unwrap().assert().failure();
}

#[test]
fn test_unsupported_language_fails_before_touching_files() {
  let dir = tempdir().unwrap();
  fs::write(dir.path().join("Foo.java"), FOO).unwrap();

  docauthor()
    .args(["--language", "java", "cobol", "--dir"])
    .arg(dir.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("Language cobol not supported"))
    .stderr(predicate::str::contains("java"));

  assert_eq!(fs::read_to_string(dir.path().join("Foo.java")).unwrap(), FOO);
}

#[test]
fn test_missing_directory_fails() {
  let dir = tempdir().unwrap();
  let missing = dir.path().join("missing");

  docauthor()
    .args(["--language", "java", "--dir"])
    .arg(&missing)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Not a directory"));
}

#[test]
fn test_file_given_as_directory_fails() {
  let dir = tempdir().unwrap();
  let file = dir.path().join("Foo.java");
  fs::write(&file, FOO).unwrap();

  docauthor()
    .args(["-l", "java", "-d"])
    .arg(&file)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Not a directory"));

  assert_eq!(fs::read_to_string(&file).unwrap(), FOO);
}

#[test]
fn test_quiet_conflicts_with_verbose() {
  let dir = tempdir().unwrap();

  docauthor()
    .args(["-l", "java", "-q", "-v", "-d"])
    .arg(dir.path())
    .assert()
    .failure();
}

#[test]
fn test_run_updates_committed_file() {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return;
  }

  let repo = tempdir().unwrap();
  init_git_repo(repo.path()).unwrap();
  write_file(repo.path(), "src/Foo.java", FOO).unwrap();
  git_add_and_commit(repo.path(), "src/Foo.java", "Add Foo").unwrap();

  docauthor()
    .args(["-l", "java", "-d"])
    .arg(repo.path().join("src"))
    .assert()
    .success()
    .stdout(predicate::str::contains("Summary: 1 scanned, 1 updated"));

  assert_eq!(
    fs::read_to_string(repo.path().join("src/Foo.java")).unwrap(),
    "/**\n * Class Foo\n * @author Test User\n */\npublic class Foo {\n}\n"
  );
}

#[test]
fn test_dry_run_reports_without_writing() {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return;
  }

  let repo = tempdir().unwrap();
  init_git_repo(repo.path()).unwrap();
  write_file(repo.path(), "Foo.java", FOO).unwrap();
  git_add_and_commit(repo.path(), "Foo.java", "Add Foo").unwrap();

  docauthor()
    .args(["-l", "java", "--dry-run", "--show-diff", "-d"])
    .arg(repo.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("1 to update"))
    .stderr(predicate::str::contains("+ * @author Test User"));

  assert_eq!(fs::read_to_string(repo.path().join("Foo.java")).unwrap(), FOO);
}

#[test]
fn test_config_file_sets_prefix_and_ignores() {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return;
  }

  let repo = tempdir().unwrap();
  init_git_repo(repo.path()).unwrap();
  write_file(repo.path(), "Foo.java", FOO).unwrap();
  write_file(repo.path(), "generated/Bar.java", FOO).unwrap();
  git_add_and_commit(repo.path(), ".", "Add sources").unwrap();

  let config_dir = tempdir().unwrap();
  let config = config_dir.path().join("docauthor.toml");
  fs::write(&config, "summary-prefix = \"Type\"\nignore = [\"generated/**\"]\n").unwrap();

  Command::cargo_bin("docauthor")
    .unwrap()
    .arg("--config")
    .arg(&config)
    .args(["-l", "java", "-d"])
    .arg(repo.path())
    .assert()
    .success();

  assert_eq!(
    fs::read_to_string(repo.path().join("Foo.java")).unwrap(),
    "/**\n * Type Foo\n * @author Test User\n */\npublic class Foo {\n}\n"
  );
  assert_eq!(fs::read_to_string(repo.path().join("generated/Bar.java")).unwrap(), FOO);
}

/// Directory holding an executable `git` script with the given body.
#[cfg(unix)]
fn fake_git(body: &str) -> tempfile::TempDir {
  use std::os::unix::fs::PermissionsExt;

  let bin = tempdir().unwrap();
  let script = bin.path().join("git");
  fs::write(&script, format!("#!/bin/sh\n{body}\n")).unwrap();
  fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
  bin
}

#[cfg(unix)]
#[test]
fn test_blame_timeout_aborts_run() {
  let repo = tempdir().unwrap();
  git2::Repository::init(repo.path()).unwrap();
  fs::write(repo.path().join("Foo.java"), FOO).unwrap();

  let config_dir = tempdir().unwrap();
  let config = config_dir.path().join("docauthor.toml");
  fs::write(&config, "blame-timeout-secs = 1\n").unwrap();

  let bin = fake_git("exec sleep 30");
  let path = format!("{}:{}", bin.path().display(), std::env::var("PATH").unwrap_or_default());

  Command::cargo_bin("docauthor")
    .unwrap()
    .env("PATH", path)
    .arg("--config")
    .arg(&config)
    .args(["-l", "java", "-d"])
    .arg(repo.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("did not finish within 1s"));

  assert_eq!(fs::read_to_string(repo.path().join("Foo.java")).unwrap(), FOO);
}

#[test]
fn test_missing_git_binary_aborts_run() {
  let repo = tempdir().unwrap();
  git2::Repository::init(repo.path()).unwrap();
  fs::write(repo.path().join("Foo.java"), FOO).unwrap();

  let empty_bin = tempdir().unwrap();

  docauthor()
    .env("PATH", empty_bin.path())
    .args(["-l", "java", "-d"])
    .arg(repo.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to run git blame"));

  assert_eq!(fs::read_to_string(repo.path().join("Foo.java")).unwrap(), FOO);
}
