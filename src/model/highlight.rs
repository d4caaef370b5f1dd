//! Diff highlight model — derived output of the diff engine, never persisted.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// HighlightKind
// ---------------------------------------------------------------------------

/// What a highlighted range represents relative to the rejected content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightKind {
    /// Present in the chosen content, absent from the rejected content.
    Added,
    /// Present in the rejected content, absent from the chosen content.
    Removed,
    /// Replaced in place.
    Changed,
}

impl HighlightKind {
    /// Single-glyph prefix used by the text renderer.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Added => "[+]",
            Self::Removed => "[-]",
            Self::Changed => "[~]",
        }
    }
}

impl fmt::Display for HighlightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "added"),
            Self::Removed => write!(f, "removed"),
            Self::Changed => write!(f, "changed"),
        }
    }
}

// ---------------------------------------------------------------------------
// DiffHighlight
// ---------------------------------------------------------------------------

/// One highlighted line range, anchored in the chosen content's numbering.
///
/// `start_line..end_line` is a half-open 0-based range. A `Removed`
/// highlight marks where the rejected line *would* sit in the chosen
/// numbering; it does not occupy a chosen line itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffHighlight {
    /// First line of the range (0-based, inclusive).
    pub start_line: usize,
    /// One past the last line of the range (exclusive).
    pub end_line: usize,
    /// What the range represents.
    pub kind: HighlightKind,
    /// The affected line content.
    pub content: Vec<String>,
}

impl DiffHighlight {
    /// Create a single-line highlight at `line`.
    #[must_use]
    pub fn single(line: usize, kind: HighlightKind, content: String) -> Self {
        Self {
            start_line: line,
            end_line: line + 1,
            kind,
            content: vec![content],
        }
    }

    /// Whether `line` falls inside this highlight's range.
    #[must_use]
    pub const fn covers(&self, line: usize) -> bool {
        self.start_line <= line && line < self.end_line
    }
}

impl fmt::Display for DiffHighlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines {}..{}",
            self.kind, self.start_line, self.end_line
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
