//! Diff engine — line-level differences and rejection previews.
//!
//! Runs a line-based LCS diff (via `diffy`) between the rejected and chosen
//! content of a resolution and renders the result two ways: structured
//! [`DiffHighlight`]s anchored in the chosen content's line numbering, and a
//! human-readable unified-style rejection preview. Everything here is
//! derived, deterministic, presentation-only output — no mutation, no
//! failure modes.

use diffy::{DiffOptions, Line};
use tracing::debug;

use crate::model::{DiffHighlight, HighlightKind};

/// Context lines shown around changes in a rejection preview.
pub const DEFAULT_PREVIEW_CONTEXT: usize = 1;

// ---------------------------------------------------------------------------
// compute_line_diff
// ---------------------------------------------------------------------------

/// Diff `rejected` (old) against `chosen` (new) and return highlights.
///
/// Each line deleted from `rejected` becomes a `Removed` highlight, each
/// line inserted in `chosen` an `Added` one; positions are anchored in
/// `chosen`'s numbering using the diff hunk offsets. Identical inputs
/// produce an empty list.
#[must_use]
pub fn compute_line_diff(chosen: &[String], rejected: &[String]) -> Vec<DiffHighlight> {
    if chosen.is_empty() && rejected.is_empty() {
        return Vec::new();
    }

    let old = join_lines(rejected);
    let new = join_lines(chosen);
    let patch = DiffOptions::new().set_context_len(0).create_patch(&old, &new);

    let mut highlights = Vec::new();
    for hunk in patch.hunks() {
        // Hunk ranges are 1-based; a zero-length new side anchors the hunk
        // just before the following line, exactly where a pure removal sits.
        let mut position = hunk.new_range().start().saturating_sub(1);
        for line in hunk.lines() {
            match line {
                Line::Context(_) => position += 1,
                Line::Delete(content) => {
                    highlights.push(DiffHighlight::single(
                        position,
                        HighlightKind::Removed,
                        clip_newline(content),
                    ));
                }
                Line::Insert(content) => {
                    highlights.push(DiffHighlight::single(
                        position,
                        HighlightKind::Added,
                        clip_newline(content),
                    ));
                    position += 1;
                }
            }
        }
    }

    debug!(highlights = highlights.len(), "computed line diff");
    highlights
}

// ---------------------------------------------------------------------------
// Rejection preview
// ---------------------------------------------------------------------------

/// Render what was turned down by a resolution, with default context.
#[must_use]
pub fn render_rejection_preview(chosen: &[String], rejected: &[String]) -> String {
    render_rejection_preview_with_context(chosen, rejected, DEFAULT_PREVIEW_CONTEXT)
}

/// Render what was turned down by a resolution.
///
/// Identical inputs render an annotated `(identical)` block; an empty
/// rejection renders a fixed placeholder. Otherwise the output is a
/// unified-style diff with changed lines labeled `CHOSEN:` / `REJECTED:`
/// and unchanged context passed through unlabeled.
#[must_use]
pub fn render_rejection_preview_with_context(
    chosen: &[String],
    rejected: &[String],
    context: usize,
) -> String {
    if rejected.is_empty() {
        return "// No alternative content to show".to_owned();
    }

    let mut out = vec!["// ===== REJECTED ALTERNATIVE =====".to_owned()];

    if chosen == rejected {
        out.push("// (identical to chosen content)".to_owned());
        out.extend(rejected.iter().map(|line| format!("// {line}")));
    } else {
        let old = join_lines(chosen);
        let new = join_lines(rejected);
        let patch = DiffOptions::new()
            .set_context_len(context)
            .create_patch(&old, &new);
        for hunk in patch.hunks() {
            out.push(format!(
                "// @@ -{},{} +{},{} @@",
                hunk.old_range().start(),
                hunk.old_range().len(),
                hunk.new_range().start(),
                hunk.new_range().len()
            ));
            for line in hunk.lines() {
                match line {
                    Line::Context(content) => {
                        out.push(format!("//          {}", clip_newline(content)));
                    }
                    Line::Delete(content) => {
                        out.push(format!("// CHOSEN:   {}", clip_newline(content)));
                    }
                    Line::Insert(content) => {
                        out.push(format!("// REJECTED: {}", clip_newline(content)));
                    }
                }
            }
        }
    }

    out.push("// ===== END REJECTED =====".to_owned());
    out.join("\n")
}

// ---------------------------------------------------------------------------
// apply_highlights
// ---------------------------------------------------------------------------

/// Prefix each highlighted line of `text` with its kind glyph.
///
/// Lines covered by a highlight get `[+]` / `[-]` / `[~]`; all others are
/// indented to keep columns aligned. The first matching highlight wins.
#[must_use]
pub fn apply_highlights(text: &str, highlights: &[DiffHighlight]) -> String {
    if highlights.is_empty() {
        return text.to_owned();
    }

    text.lines()
        .enumerate()
        .map(|(index, line)| {
            highlights
                .iter()
                .find(|h| h.covers(index))
                .map_or_else(|| format!("    {line}"), |h| format!("{} {line}", h.kind.glyph()))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Join candidate lines into the newline-terminated block diffy expects.
fn join_lines(lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Drop the trailing newline diffy keeps on hunk line content.
fn clip_newline(content: &str) -> String {
    content.strip_suffix('\n').unwrap_or(content).to_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_lines() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[ -~]{0,10}", 0..12)
    }

    proptest! {
        // Identity law: diffing content against itself yields nothing.
        #[test]
        fn prop_diff_identity(content in arb_lines()) {
            prop_assert!(compute_line_diff(&content, &content).is_empty());
        }

        // The preview of identical content always says so.
        #[test]
        fn prop_preview_identity(content in arb_lines()) {
            let preview = render_rejection_preview(&content, &content);
            if content.is_empty() {
                prop_assert_eq!(preview, "// No alternative content to show");
            } else {
                prop_assert!(preview.contains("(identical to chosen content)"));
            }
        }

        // Every added highlight carries a line that exists in chosen at the
        // anchored position.
        #[test]
        fn prop_added_anchors_are_valid(chosen in arb_lines(), rejected in arb_lines()) {
            for h in compute_line_diff(&chosen, &rejected) {
                if h.kind == HighlightKind::Added {
                    prop_assert!(h.start_line < chosen.len());
                    prop_assert_eq!(&chosen[h.start_line], &h.content[0]);
                }
            }
        }
    }
}
