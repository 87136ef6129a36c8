// tests/integration_test.rs
use std::path::Path;
use std::process::{Command, Output};

use git2::{Repository, Signature};
use tempfile::TempDir;

fn run_bin(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_git-release-rc"))
        .args(args)
        .current_dir(dir)
        .env_remove("GIT_RELEASE_RC_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

/// Repository with a single empty commit carrying the given tags
fn repo_with_tags(tags: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();

    let sig = Signature::now("Release Bot", "release@example.com").unwrap();
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let commit_id = repo
        .commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
        .unwrap();
    let commit = repo.find_object(commit_id, None).unwrap();

    for tag in tags {
        repo.tag_lightweight(tag, &commit, false).unwrap();
    }

    dir
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    let output = run_bin(dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("git-release-rc"));
    assert!(stdout.contains("release-candidate tag"));
    assert!(stdout.contains("--dry-run"));
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    let output = run_bin(dir.path(), &["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_outside_repository_exits_one() {
    let dir = TempDir::new().unwrap();
    let output = run_bin(dir.path(), &["--dry-run"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERROR"));
}

#[test]
fn test_repository_without_tags_exits_one() {
    let dir = repo_with_tags(&[]);
    let handoff = dir.path().join("handoff");
    let output = run_bin(
        dir.path(),
        &["--dry-run", "--output", handoff.to_str().unwrap()],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(!handoff.exists());
}

#[test]
fn test_dry_run_reports_plan() {
    let dir = repo_with_tags(&["0.9.38", "0.9.39", "nightly"]);
    let handoff = dir.path().join("handoff");
    let output = run_bin(
        dir.path(),
        &["--dry-run", "--output", handoff.to_str().unwrap()],
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = console::strip_ansi_codes(&String::from_utf8_lossy(&output.stdout)).into_owned();
    assert!(stdout.contains("got latest version: 0.9.39"));
    assert!(stdout.contains("got a new version: 0.9.40"));
    assert!(stdout.contains("git checkout -b release-0.9.40"));
    assert!(stdout.contains("git push origin 0.9.40-rc.0"));
    assert!(!handoff.exists());
}

#[test]
fn test_invalid_override_exits_one() {
    let dir = repo_with_tags(&["1.0.0"]);
    let output = run_bin(dir.path(), &["--dry-run", "--max-patch", "0"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("max_patch"));
}

#[test]
fn test_flag_overrides_invalid_config_value() {
    let dir = repo_with_tags(&["1.0.5"]);
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "[release]\nmax_patch = 0\n").unwrap();

    let output = run_bin(
        dir.path(),
        &[
            "--dry-run",
            "--config",
            config.to_str().unwrap(),
            "--max-patch",
            "5",
        ],
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = console::strip_ansi_codes(&String::from_utf8_lossy(&output.stdout)).into_owned();
    assert!(stdout.contains("got a new version: 1.1.0"));
}
