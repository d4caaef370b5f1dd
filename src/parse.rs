//! Conflict marker parser.
//!
//! Scans line-oriented text for git-style conflict blocks and emits ordered
//! [`ConflictRegion`]s. The scan is a single forward pass over an explicit
//! state machine — pure and total: malformed or unterminated marker
//! sequences are simply not reported as regions, never as errors.
//!
//! Marker lines are recognized by a fixed 7-character prefix; any trailing
//! label text (`<<<<<<< HEAD`, `>>>>>>> feature`) is ignored. A line inside
//! a section that happens to start with an unexpected marker prefix is
//! treated as content, not as a new block.

use crate::model::ConflictRegion;

/// Prefix of the line opening a conflict block.
pub const CONFLICT_START: &str = "<<<<<<<";
/// Prefix of the optional common-ancestor separator (diff3 style).
pub const BASE_SEPARATOR: &str = "|||||||";
/// Prefix of the separator between the local and remote sections.
pub const MIDDLE_SEPARATOR: &str = "=======";
/// Prefix of the line closing a conflict block.
pub const CONFLICT_END: &str = ">>>>>>>";

/// Whether `line` carries any of the four marker prefixes.
#[must_use]
pub fn is_marker_line(line: &str) -> bool {
    line.starts_with(CONFLICT_START)
        || line.starts_with(BASE_SEPARATOR)
        || line.starts_with(MIDDLE_SEPARATOR)
        || line.starts_with(CONFLICT_END)
}

// ---------------------------------------------------------------------------
// Scanner state machine
// ---------------------------------------------------------------------------

/// Where the scan currently sits relative to a conflict block.
enum ScanState {
    /// Outside any block, looking for a start marker.
    Seeking,
    /// After the start marker, accumulating local lines.
    InLocal,
    /// After a base separator, accumulating base lines.
    InBase,
    /// After the middle separator, accumulating remote lines.
    InRemote,
}

/// A block being assembled; discarded if end-of-text arrives first.
#[derive(Default)]
struct PartialRegion {
    start: usize,
    separator_base: Option<usize>,
    separator_middle: usize,
    local_lines: Vec<String>,
    base_lines: Vec<String>,
    remote_lines: Vec<String>,
}

/// Parse conflict blocks out of `text`.
///
/// Regions are emitted strictly in the order their start markers appear;
/// ids are `0..N-1`, monotonically increasing with document order.
#[must_use]
pub fn parse(text: &str) -> Vec<ConflictRegion> {
    // Mirror Document's splitting so indices line up for CRLF input too.
    let trailing = text.ends_with('\n');
    let mut split: Vec<&str> = if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    };
    if trailing {
        split.pop();
    }
    parse_lines(split)
}

/// Parse conflict blocks out of already-split lines.
pub fn parse_lines<'a, I>(lines: I) -> Vec<ConflictRegion>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut regions = Vec::new();
    let mut state = ScanState::Seeking;
    let mut partial = PartialRegion::default();

    for (index, line) in lines.into_iter().enumerate() {
        match state {
            ScanState::Seeking => {
                if line.starts_with(CONFLICT_START) {
                    partial = PartialRegion {
                        start: index,
                        ..PartialRegion::default()
                    };
                    state = ScanState::InLocal;
                }
            }
            ScanState::InLocal => {
                if line.starts_with(BASE_SEPARATOR) {
                    partial.separator_base = Some(index);
                    state = ScanState::InBase;
                } else if line.starts_with(MIDDLE_SEPARATOR) {
                    partial.separator_middle = index;
                    state = ScanState::InRemote;
                } else {
                    partial.local_lines.push(line.to_owned());
                }
            }
            ScanState::InBase => {
                if line.starts_with(MIDDLE_SEPARATOR) {
                    partial.separator_middle = index;
                    state = ScanState::InRemote;
                } else {
                    partial.base_lines.push(line.to_owned());
                }
            }
            ScanState::InRemote => {
                if line.starts_with(CONFLICT_END) {
                    let id = regions.len() as u64;
                    regions.push(ConflictRegion {
                        id,
                        start: partial.start,
                        separator_base: partial.separator_base,
                        separator_middle: partial.separator_middle,
                        end: index,
                        local_lines: std::mem::take(&mut partial.local_lines),
                        base_lines: std::mem::take(&mut partial.base_lines),
                        remote_lines: std::mem::take(&mut partial.remote_lines),
                        resolution: crate::model::Resolution::Unresolved,
                    });
                    state = ScanState::Seeking;
                } else {
                    partial.remote_lines.push(line.to_owned());
                }
            }
        }
    }

    // A block still open at end-of-text is dropped, not reported.
    regions
}

/// Remove every marker line from `text`, keeping all other lines.
///
/// This is the escape hatch for half-formed blocks the parser cannot
/// report: it strips the marker soup so the document can be hand-fixed.
#[must_use]
pub fn strip_marker_lines(text: &str) -> String {
    let doc = crate::document::Document::from_text(text);
    let kept: Vec<String> = doc
        .lines()
        .iter()
        .filter(|line| !is_marker_line(line))
        .cloned()
        .collect();
    let mut out = kept.join("\n");
    if text.ends_with('\n') && !kept.is_empty() {
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------
