//! Line-oriented document buffer.
//!
//! [`Document`] is the single shared resource every component operates on by
//! line index. It preserves the loaded text exactly: lines keep any carriage
//! returns, and a trailing-newline flag makes `to_text` a byte-exact inverse
//! of `from_text`.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// An ordered, mutable sequence of text lines.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    lines: Vec<String>,
    trailing_newline: bool,
}

impl Document {
    /// Split `text` into lines on `\n`, keeping carriage returns as part of
    /// the line content so CRLF documents round-trip unchanged.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        let trailing_newline = text.ends_with('\n');
        let mut lines: Vec<String> = text.split('\n').map(ToOwned::to_owned).collect();
        if trailing_newline {
            lines.pop();
        }
        Self {
            lines,
            trailing_newline,
        }
    }

    /// Build a document directly from lines, with a final trailing newline.
    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            trailing_newline: true,
        }
    }

    /// Reassemble the document text. Byte-exact inverse of [`Self::from_text`].
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut text = self.lines.join("\n");
        if self.trailing_newline && !self.lines.is_empty() {
            text.push('\n');
        }
        text
    }

    /// Number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// All lines, in order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The line at `index`, if in range.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Replace the inclusive line range `start..=end` with `replacement`.
    ///
    /// The replacement may be shorter, longer, or empty; later lines shift
    /// accordingly. Out-of-range indices are a caller bug and will panic the
    /// same way slicing would.
    pub fn splice(&mut self, start: usize, end: usize, replacement: &[String]) {
        self.lines.splice(start..=end, replacement.iter().cloned());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
