//! Git working-tree collaborator.
//!
//! Everything fallible lives here, behind call/return interfaces the core
//! consumes: enumerating files with unresolved conflicts, fetching the three
//! index-stage variants of a conflicted file, and writing a resolved
//! document back (optionally staging it). The core engine never touches git
//! or the filesystem itself, so it stays synchronous and independently
//! testable.
//!
//! All git access shells out to the `git` binary, one blocking subprocess
//! per call. Failures surface as [`RiftError::Git`] and never corrupt
//! in-memory session state.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::error::RiftError;

// ---------------------------------------------------------------------------
// Variants
// ---------------------------------------------------------------------------

/// The up-to-three textual variants of a conflicted file, from the index.
///
/// Any subset may be absent (e.g. no base stage for an add/add conflict);
/// absence is "not available", not an error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Variants {
    /// Stage 1 — the common ancestor.
    pub base: Option<String>,
    /// Stage 2 — our side.
    pub local: Option<String>,
    /// Stage 3 — their side.
    pub remote: Option<String>,
}

// ---------------------------------------------------------------------------
// GitWorkingTree
// ---------------------------------------------------------------------------

/// A git repository's working tree, addressed from its root.
#[derive(Debug)]
pub struct GitWorkingTree {
    root: PathBuf,
}

impl GitWorkingTree {
    /// Wrap an already-known repository root.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Locate the repository containing `dir`.
    ///
    /// # Errors
    /// [`RiftError::NotARepository`] if `dir` is not inside a git work tree.
    pub fn discover(dir: &Path) -> Result<Self, RiftError> {
        let output = Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(dir)
            .output()
            .map_err(RiftError::Io)?;
        if output.status.success() {
            let root = String::from_utf8_lossy(&output.stdout).trim().to_owned();
            debug!(root, "discovered repository");
            Ok(Self::new(PathBuf::from(root)))
        } else {
            Err(RiftError::NotARepository {
                dir: dir.to_path_buf(),
            })
        }
    }

    /// The repository root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run a git command in the repository root and return its stdout.
    fn git_stdout(&self, args: &[&str]) -> Result<String, RiftError> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(RiftError::Io)?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(RiftError::Git {
                command: format!("git {}", args.join(" ")),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
                exit_code: output.status.code(),
            })
        }
    }

    /// Run a git command, ignoring output.
    fn git_run(&self, args: &[&str]) -> Result<(), RiftError> {
        self.git_stdout(args)?;
        Ok(())
    }

    /// Paths of files currently carrying unresolved conflicts, in git's
    /// (sorted) order.
    ///
    /// # Errors
    /// [`RiftError::Git`] if the enumeration itself fails.
    pub fn conflicted_paths(&self) -> Result<Vec<PathBuf>, RiftError> {
        let stdout = self.git_stdout(&["diff", "--name-only", "--diff-filter=U"])?;
        let paths: Vec<PathBuf> = stdout
            .lines()
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect();
        info!(count = paths.len(), "enumerated conflicted files");
        Ok(paths)
    }

    /// Fetch the index-stage variants of `path`.
    ///
    /// A missing stage yields `None` for that variant.
    ///
    /// # Errors
    /// [`RiftError::Io`] if git itself cannot be spawned.
    pub fn variants(&self, path: &Path) -> Result<Variants, RiftError> {
        Ok(Variants {
            base: self.stage_content(1, path)?,
            local: self.stage_content(2, path)?,
            remote: self.stage_content(3, path)?,
        })
    }

    /// `git show :<stage>:<path>`, tolerating a missing stage.
    fn stage_content(&self, stage: u8, path: &Path) -> Result<Option<String>, RiftError> {
        let spec = format!(":{stage}:{}", path.display());
        let output = Command::new("git")
            .args(["show", &spec])
            .current_dir(&self.root)
            .output()
            .map_err(RiftError::Io)?;
        if output.status.success() {
            Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
        } else {
            Ok(None)
        }
    }

    /// Read a working-tree file.
    ///
    /// # Errors
    /// [`RiftError::Io`] on filesystem failure.
    pub fn read_working(&self, path: &Path) -> Result<String, RiftError> {
        Ok(std::fs::read_to_string(self.root.join(path))?)
    }

    /// Write a working-tree file.
    ///
    /// # Errors
    /// [`RiftError::Io`] on filesystem failure.
    pub fn write_working(&self, path: &Path, text: &str) -> Result<(), RiftError> {
        Ok(std::fs::write(self.root.join(path), text)?)
    }

    /// Write the resolved document and mark the file resolved in the index.
    ///
    /// # Errors
    /// [`RiftError::Io`] on write failure, [`RiftError::Git`] if staging
    /// fails — reported, never swallowed.
    pub fn mark_resolved(&self, path: &Path, text: &str) -> Result<(), RiftError> {
        self.write_working(path, text)?;
        let spec = path.display().to_string();
        self.git_run(&["add", "--", &spec])?;
        info!(path = %path.display(), "marked resolved and staged");
        Ok(())
    }

    /// Re-materialize the conflicted version of `path` from the index,
    /// bringing its markers back into the working tree.
    ///
    /// # Errors
    /// [`RiftError::Git`] if the checkout fails (e.g. the file is not
    /// unmerged).
    pub fn restore_conflict(&self, path: &Path) -> Result<(), RiftError> {
        let spec = path.display().to_string();
        self.git_run(&["checkout", "--merge", "--", &spec])?;
        info!(path = %path.display(), "restored conflict markers from index");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests — exercised end-to-end against real repos in tests/.
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discover_fails_outside_a_repository() {
        let dir = tempfile::tempdir().unwrap();
        let err = GitWorkingTree::discover(dir.path()).unwrap_err();
        assert!(matches!(err, RiftError::NotARepository { .. }));
    }

    #[test]
    fn variants_default_to_all_absent() {
        let v = Variants::default();
        assert!(v.base.is_none());
        assert!(v.local.is_none());
        assert!(v.remote.is_none());
    }
}
