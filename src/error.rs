//! Unified error type for rift operations.
//!
//! Defines [`RiftError`], the single error type the library surfaces. Error
//! messages are designed to be actionable: each variant includes a clear
//! description of what went wrong and guidance on how to fix it.
//!
//! The core engine — parser, store, resolution, diff — is total over
//! well-formed in-memory state; the only errors it can produce are the
//! non-fatal [`RiftError::UnknownRegion`] / [`RiftError::AlreadyResolved`]
//! statuses. Everything else comes from the boundary: git, the filesystem,
//! or the config file.

use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// RiftError
// ---------------------------------------------------------------------------

/// Unified error type for rift operations.
#[derive(Debug)]
pub enum RiftError {
    /// A resolve or revert referenced a region id the store does not track.
    ///
    /// A no-op on session state; callers report it and continue.
    UnknownRegion {
        /// The id that was not found.
        id: u64,
    },

    /// A resolve referenced a region that is already resolved.
    ///
    /// A no-op on session state; callers report it and continue.
    AlreadyResolved {
        /// The id of the already-resolved region.
        id: u64,
    },

    /// A git command failed.
    Git {
        /// The git command that was run (e.g. `"git add src/main.rs"`).
        command: String,
        /// Captured stderr from git.
        stderr: String,
        /// Process exit code, if available.
        exit_code: Option<i32>,
    },

    /// The working directory is not inside a git repository.
    NotARepository {
        /// The directory that was probed.
        dir: PathBuf,
    },

    /// A file still carries conflict markers and cannot be marked resolved.
    MarkersRemain {
        /// The file that was about to be staged.
        path: PathBuf,
        /// How many marker lines remain.
        count: usize,
    },

    /// A configuration file could not be parsed.
    Config {
        /// Path to the configuration file.
        path: PathBuf,
        /// Human-readable description of the problem.
        detail: String,
    },

    /// An I/O error occurred at the boundary.
    Io(std::io::Error),
}

// ---------------------------------------------------------------------------
// Display — actionable error messages
// ---------------------------------------------------------------------------

impl fmt::Display for RiftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRegion { id } => {
                write!(
                    f,
                    "conflict region #{id} not found.\n  To fix: list the current regions:\n    rift show <file>"
                )
            }
            Self::AlreadyResolved { id } => {
                write!(
                    f,
                    "conflict region #{id} is already resolved.\n  To fix: revert the file first to change a decision:\n    rift revert <file>"
                )
            }
            Self::Git {
                command,
                stderr,
                exit_code,
            } => {
                write!(f, "`{command}` failed")?;
                if let Some(code) = exit_code {
                    write!(f, " (exit code {code})")?;
                }
                if !stderr.is_empty() {
                    write!(f, ": {stderr}")?;
                }
                write!(
                    f,
                    "\n  To fix: check git state and retry. Run `git status` for details."
                )
            }
            Self::NotARepository { dir } => {
                write!(
                    f,
                    "'{}' is not inside a git repository.\n  To fix: run rift from a repository with an in-progress merge.",
                    dir.display()
                )
            }
            Self::MarkersRemain { path, count } => {
                write!(
                    f,
                    "'{}' still contains {count} conflict marker line(s).\n  To fix: resolve the remaining regions first:\n    rift show {}\n    rift resolve {} --take <local|remote|base>",
                    path.display(),
                    path.display(),
                    path.display()
                )
            }
            Self::Config { path, detail } => {
                write!(
                    f,
                    "configuration error in '{}': {}\n  To fix: edit the config file and correct the issue.",
                    path.display(),
                    detail
                )
            }
            Self::Io(err) => {
                write!(
                    f,
                    "I/O error: {err}\n  To fix: check file permissions and paths."
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// std::error::Error
// ---------------------------------------------------------------------------

impl std::error::Error for RiftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// From impls
// ---------------------------------------------------------------------------

impl From<std::io::Error> for RiftError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
