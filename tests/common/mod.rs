//! Shared test helpers for rift integration tests.
//!
//! All tests use temp directories — no side effects on the real repo. Each
//! test gets its own git repository, parked mid-merge on a conflicted file,
//! via `setup_conflict_repo()`.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// The conflicted file every test repo contains.
pub const CONFLICT_FILE: &str = "greeting.txt";

/// Create a git repo stopped on a merge conflict in [`CONFLICT_FILE`].
///
/// The file has two conflict regions (the first and last lines differ on
/// both branches, separated by enough context to keep the hunks apart):
/// `trunk` holds the `*-MAIN` lines, `feature` the `*-FEAT` lines.
pub fn setup_conflict_repo() -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    let root = dir.path();

    run_git(root, &["init", "-q"]);
    run_git(root, &["config", "user.email", "test@example.com"]);
    run_git(root, &["config", "user.name", "Test"]);
    run_git(root, &["config", "merge.conflictStyle", "merge"]);
    run_git(root, &["checkout", "-q", "-b", "trunk"]);

    write_file(
        root,
        CONFLICT_FILE,
        "alpha\nkeep one\nkeep two\nkeep three\nkeep four\nkeep five\nkeep six\nomega\n",
    );
    run_git(root, &["add", "."]);
    run_git(root, &["commit", "-q", "-m", "base"]);

    run_git(root, &["checkout", "-q", "-b", "feature"]);
    write_file(
        root,
        CONFLICT_FILE,
        "ALPHA-FEAT\nkeep one\nkeep two\nkeep three\nkeep four\nkeep five\nkeep six\nOMEGA-FEAT\n",
    );
    run_git(root, &["commit", "-q", "-am", "feature change"]);

    run_git(root, &["checkout", "-q", "trunk"]);
    write_file(
        root,
        CONFLICT_FILE,
        "ALPHA-MAIN\nkeep one\nkeep two\nkeep three\nkeep four\nkeep five\nkeep six\nOMEGA-MAIN\n",
    );
    run_git(root, &["commit", "-q", "-am", "trunk change"]);

    // The merge is supposed to stop on conflicts — don't assert success.
    let out = Command::new("git")
        .args(["merge", "feature"])
        .current_dir(root)
        .output()
        .expect("failed to run git merge");
    assert!(
        !out.status.success(),
        "expected the merge to conflict, but it succeeded"
    );

    dir
}

/// Run a git command in the given directory. Panics on failure.
pub fn run_git(dir: &Path, args: &[&str]) -> String {
    let out = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap_or_else(|e| panic!("failed to run git {}: {e}", args.join(" ")));
    assert!(
        out.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).to_string()
}

/// Run rift in `dir`, returning the raw output.
pub fn rift_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rift"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to execute rift")
}

/// Run rift and assert it succeeds. Returns stdout as string.
pub fn rift_ok(dir: &Path, args: &[&str]) -> String {
    let out = rift_in(dir, args);
    let stderr = String::from_utf8_lossy(&out.stderr);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        out.status.success(),
        "rift {} failed:\nstdout: {stdout}\nstderr: {stderr}",
        args.join(" "),
    );
    stdout.to_string()
}

/// Run rift and assert it fails. Returns stderr as string.
pub fn rift_fails(dir: &Path, args: &[&str]) -> String {
    let out = rift_in(dir, args);
    assert!(
        !out.status.success(),
        "Expected rift {} to fail, but it succeeded.\nstdout: {}",
        args.join(" "),
        String::from_utf8_lossy(&out.stdout),
    );
    String::from_utf8_lossy(&out.stderr).to_string()
}

/// Write a file under the repo root.
pub fn write_file(root: &Path, name: &str, content: &str) {
    std::fs::write(root.join(name), content).expect("failed to write file");
}

/// Read a file under the repo root.
pub fn read_file(root: &Path, name: &str) -> String {
    std::fs::read_to_string(root.join(name)).expect("failed to read file")
}
