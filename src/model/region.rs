//! Conflict region model — candidate sides, resolution state, and serialization.
//!
//! A [`ConflictRegion`] identifies one marker-delimited conflict block in a
//! document: the line indices of its marker lines plus the candidate content
//! captured between them. Resolution state is a tagged union — a region is
//! either [`Resolution::Unresolved`] or carries the full record of what was
//! chosen and what was rejected. Invalid combinations (resolved lines without
//! a resolved state, and vice versa) are unrepresentable.
//!
//! # Serialization
//!
//! All types use tagged snake_case JSON for clean, machine-parseable output:
//!
//! ```json
//! {
//!   "id": 0,
//!   "start": 4,
//!   "separator_middle": 6,
//!   "end": 8,
//!   "local_lines": ["left"],
//!   "remote_lines": ["right"],
//!   "resolution": { "state": "resolved", "choice": "local", ... }
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Choice — the side a resolve operation takes
// ---------------------------------------------------------------------------

/// The candidate side taken by a resolve operation.
///
/// Manual resolutions are not a [`Choice`]: they carry caller-supplied
/// content and are recorded as [`ResolvedChoice::Manual`] instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    /// The current side (between the start marker and the separator).
    Local,
    /// The incoming side (between the separator and the end marker).
    Remote,
    /// The common-ancestor content (may be absent, resolving to nothing).
    Base,
}

impl Choice {
    /// Return the choice name as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
            Self::Base => "base",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ResolvedChoice — how a resolved region was settled
// ---------------------------------------------------------------------------

/// How a resolved region was settled: one of the three candidate sides, or
/// caller-supplied content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedChoice {
    /// The local candidate was taken.
    Local,
    /// The remote candidate was taken.
    Remote,
    /// The base candidate was taken.
    Base,
    /// Caller-supplied content was taken.
    Manual,
}

impl ResolvedChoice {
    /// Return the variant name as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
            Self::Base => "base",
            Self::Manual => "manual",
        }
    }
}

impl From<Choice> for ResolvedChoice {
    fn from(choice: Choice) -> Self {
        match choice {
            Choice::Local => Self::Local,
            Choice::Remote => Self::Remote,
            Choice::Base => Self::Base,
        }
    }
}

impl fmt::Display for ResolvedChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Resolution — tagged resolution state
// ---------------------------------------------------------------------------

/// Resolution state of a region.
///
/// A resolved region always carries both the content that replaced the
/// marker span and the content that was turned down, so the rejection can
/// be previewed (or audited) after the fact.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Resolution {
    /// The region still carries its markers in the document.
    #[default]
    Unresolved,
    /// The region was resolved; the marker span was replaced by `chosen`.
    Resolved {
        /// Which side (or manual content) was taken.
        choice: ResolvedChoice,
        /// The lines spliced into the document.
        chosen: Vec<String>,
        /// The candidate lines that were turned down.
        rejected: Vec<String>,
    },
}

impl Resolution {
    /// Whether this region has been resolved.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    /// The resolved choice, if any.
    #[must_use]
    pub const fn choice(&self) -> Option<ResolvedChoice> {
        match self {
            Self::Unresolved => None,
            Self::Resolved { choice, .. } => Some(*choice),
        }
    }
}

// ---------------------------------------------------------------------------
// ConflictRegion
// ---------------------------------------------------------------------------

/// One marker-delimited conflict block in a document.
///
/// Line indices are 0-based positions of the marker lines in the *current*
/// document. `separator_base` is present only for diff3-style blocks that
/// carry a `|||||||` section. Indices of unresolved regions are kept valid
/// across resolutions by the store's rebasing; a resolved region's indices
/// are the last span its markers occupied and are not maintained further.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictRegion {
    /// Stable id, assigned in document order at parse time. Never reused or
    /// renumbered within a session.
    pub id: u64,

    /// Line index of the `<<<<<<<` marker.
    pub start: usize,

    /// Line index of the `|||||||` marker, for diff3-style blocks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator_base: Option<usize>,

    /// Line index of the `=======` marker.
    pub separator_middle: usize,

    /// Line index of the `>>>>>>>` marker.
    pub end: usize,

    /// Lines captured between the start marker and the first separator.
    pub local_lines: Vec<String>,

    /// Lines captured between `|||||||` and `=======`. Empty when the block
    /// has no base section.
    pub base_lines: Vec<String>,

    /// Lines captured between `=======` and the end marker.
    pub remote_lines: Vec<String>,

    /// Resolution state plus chosen/rejected record.
    #[serde(default)]
    pub resolution: Resolution,
}

impl ConflictRegion {
    /// Number of document lines the full marker span covers, markers included.
    #[must_use]
    pub const fn span_len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Whether this region has been resolved.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.resolution.is_resolved()
    }

    /// Candidate lines for a choice. `Base` may be empty.
    #[must_use]
    pub fn candidate(&self, choice: Choice) -> &[String] {
        match choice {
            Choice::Local => &self.local_lines,
            Choice::Remote => &self.remote_lines,
            Choice::Base => &self.base_lines,
        }
    }

    /// The content rejected when `choice` is taken: the opposite side for
    /// local/remote, or both sides in order when the base is taken.
    #[must_use]
    pub fn rejected_for(&self, choice: Choice) -> Vec<String> {
        match choice {
            Choice::Local => self.remote_lines.clone(),
            Choice::Remote => self.local_lines.clone(),
            Choice::Base => {
                let mut rejected = self.local_lines.clone();
                rejected.extend(self.remote_lines.iter().cloned());
                rejected
            }
        }
    }

    /// Whether this region's candidate content matches another's, side by
    /// side. Used to recognize a region across a re-parse.
    #[must_use]
    pub fn same_candidates(&self, other: &Self) -> bool {
        self.local_lines == other.local_lines
            && self.base_lines == other.base_lines
            && self.remote_lines == other.remote_lines
    }

    /// Return a human-readable summary of this region.
    #[must_use]
    pub fn summary(&self) -> String {
        let status = match self.resolution.choice() {
            Some(choice) => format!("resolved({choice})"),
            None => "unresolved".to_owned(),
        };
        format!(
            "#{} lines {}..={} [{status}] local {} / remote {} / base {}",
            self.id,
            self.start,
            self.end,
            self.local_lines.len(),
            self.remote_lines.len(),
            self.base_lines.len(),
        )
    }
}

impl fmt::Display for ConflictRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn test_region() -> ConflictRegion {
        ConflictRegion {
            id: 3,
            start: 10,
            separator_base: None,
            separator_middle: 12,
            end: 14,
            local_lines: lines(&["ours"]),
            base_lines: Vec::new(),
            remote_lines: lines(&["theirs", "more"]),
            resolution: Resolution::Unresolved,
        }
    }

    // -----------------------------------------------------------------------
    // Choice / ResolvedChoice
    // -----------------------------------------------------------------------

    #[test]
    fn choice_display() {
        assert_eq!(format!("{}", Choice::Local), "local");
        assert_eq!(format!("{}", Choice::Remote), "remote");
        assert_eq!(format!("{}", Choice::Base), "base");
    }

    #[test]
    fn resolved_choice_from_choice() {
        assert_eq!(ResolvedChoice::from(Choice::Local), ResolvedChoice::Local);
        assert_eq!(ResolvedChoice::from(Choice::Remote), ResolvedChoice::Remote);
        assert_eq!(ResolvedChoice::from(Choice::Base), ResolvedChoice::Base);
    }

    #[test]
    fn choice_serde_snake_case() {
        let json = serde_json::to_string(&Choice::Remote).unwrap();
        assert_eq!(json, "\"remote\"");
        let json = serde_json::to_string(&ResolvedChoice::Manual).unwrap();
        assert_eq!(json, "\"manual\"");
    }

    // -----------------------------------------------------------------------
    // Resolution
    // -----------------------------------------------------------------------

    #[test]
    fn resolution_default_is_unresolved() {
        assert_eq!(Resolution::default(), Resolution::Unresolved);
        assert!(!Resolution::default().is_resolved());
        assert_eq!(Resolution::default().choice(), None);
    }

    #[test]
    fn resolution_resolved_carries_record() {
        let res = Resolution::Resolved {
            choice: ResolvedChoice::Local,
            chosen: lines(&["a"]),
            rejected: lines(&["b"]),
        };
        assert!(res.is_resolved());
        assert_eq!(res.choice(), Some(ResolvedChoice::Local));
    }

    #[test]
    fn resolution_serde_tag() {
        let json = serde_json::to_string(&Resolution::Unresolved).unwrap();
        assert!(json.contains("\"state\":\"unresolved\""));

        let res = Resolution::Resolved {
            choice: ResolvedChoice::Base,
            chosen: Vec::new(),
            rejected: lines(&["x"]),
        };
        let json = serde_json::to_string(&res).unwrap();
        assert!(json.contains("\"state\":\"resolved\""));
        assert!(json.contains("\"choice\":\"base\""));

        let decoded: Resolution = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, res);
    }

    // -----------------------------------------------------------------------
    // ConflictRegion
    // -----------------------------------------------------------------------

    #[test]
    fn span_len_is_inclusive() {
        let region = test_region();
        assert_eq!(region.span_len(), 5);
    }

    #[test]
    fn candidate_selects_side() {
        let region = test_region();
        assert_eq!(region.candidate(Choice::Local), lines(&["ours"]).as_slice());
        assert_eq!(
            region.candidate(Choice::Remote),
            lines(&["theirs", "more"]).as_slice()
        );
        assert!(region.candidate(Choice::Base).is_empty());
    }

    #[test]
    fn rejected_for_local_is_remote() {
        let region = test_region();
        assert_eq!(region.rejected_for(Choice::Local), lines(&["theirs", "more"]));
    }

    #[test]
    fn rejected_for_base_concatenates_both_sides() {
        let region = test_region();
        assert_eq!(
            region.rejected_for(Choice::Base),
            lines(&["ours", "theirs", "more"])
        );
    }

    #[test]
    fn same_candidates_ignores_indices() {
        let a = test_region();
        let mut b = test_region();
        b.id = 99;
        b.start = 0;
        b.separator_middle = 2;
        b.end = 4;
        assert!(a.same_candidates(&b));

        b.remote_lines = lines(&["different"]);
        assert!(!a.same_candidates(&b));
    }

    #[test]
    fn summary_reports_state() {
        let mut region = test_region();
        assert!(region.summary().contains("unresolved"));
        assert!(region.summary().contains("#3"));

        region.resolution = Resolution::Resolved {
            choice: ResolvedChoice::Remote,
            chosen: region.remote_lines.clone(),
            rejected: region.local_lines.clone(),
        };
        assert!(region.summary().contains("resolved(remote)"));
    }

    #[test]
    fn region_serde_roundtrip() {
        let region = test_region();
        let json = serde_json::to_string(&region).unwrap();
        // No base separator → field omitted entirely.
        assert!(!json.contains("separator_base"));
        let decoded: ConflictRegion = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, region);
    }
}
