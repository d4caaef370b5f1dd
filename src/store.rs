//! Conflict store — owns the ordered region collection for one document.
//!
//! The store keeps every unresolved region's line indices valid in the
//! *current* document as resolutions land one at a time, without re-scanning
//! the whole text after each change. Resolutions splice replacement text
//! into the document at the resolved span; every region strictly after that
//! span shifts by exactly the net line-count delta, regions before it are
//! untouched. Because each rebase only moves regions not yet touched, the
//! invariant holds for resolutions applied in any order.
//!
//! Ids are allocated from a session-level counter and are never reused or
//! renumbered, including across [`ConflictStore::reconcile`].

use tracing::debug;

use crate::model::ConflictRegion;

// ---------------------------------------------------------------------------
// StoreCounts
// ---------------------------------------------------------------------------

/// Region tally for one document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreCounts {
    /// All regions tracked, resolved or not.
    pub total: usize,
    /// Regions carrying a resolution record.
    pub resolved: usize,
}

impl StoreCounts {
    /// Regions still awaiting a decision.
    #[must_use]
    pub const fn unresolved(&self) -> usize {
        self.total - self.resolved
    }
}

// ---------------------------------------------------------------------------
// ConflictStore
// ---------------------------------------------------------------------------

/// The ordered collection of conflict regions for one loaded document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConflictStore {
    regions: Vec<ConflictRegion>,
    next_id: u64,
}

impl ConflictStore {
    /// Build a store from a freshly parsed region list.
    #[must_use]
    pub fn new(regions: Vec<ConflictRegion>) -> Self {
        let next_id = regions.iter().map(|r| r.id + 1).max().unwrap_or(0);
        Self { regions, next_id }
    }

    /// All regions, in document order (resolved regions keep the last span
    /// their markers occupied).
    #[must_use]
    pub fn regions(&self) -> &[ConflictRegion] {
        &self.regions
    }

    /// Look up a region by stable id.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&ConflictRegion> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: u64) -> Option<&mut ConflictRegion> {
        self.regions.iter_mut().find(|r| r.id == id)
    }

    /// Ids of unresolved regions in ascending `start` order — the order bulk
    /// resolution must process them in.
    #[must_use]
    pub fn unresolved_ids(&self) -> Vec<u64> {
        let mut unresolved: Vec<&ConflictRegion> =
            self.regions.iter().filter(|r| !r.is_resolved()).collect();
        unresolved.sort_by_key(|r| r.start);
        unresolved.iter().map(|r| r.id).collect()
    }

    /// Region tally.
    #[must_use]
    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            total: self.regions.len(),
            resolved: self.regions.iter().filter(|r| r.is_resolved()).count(),
        }
    }

    /// Shift every region after a resolved span by the net line-count delta.
    ///
    /// `lines_removed` is `(end - start + 1) - chosen.len()` for the region
    /// just resolved — negative when the replacement is longer than the
    /// marker span, in which case later regions shift down the other way.
    /// Regions at or before the resolved span are untouched.
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn rebase_after_resolution(&mut self, resolved_id: u64, resolved_end: usize, lines_removed: i64) {
        let shift = |index: usize| -> usize { (index as i64 - lines_removed) as usize };
        for region in &mut self.regions {
            if region.id == resolved_id || region.start <= resolved_end {
                continue;
            }
            region.start = shift(region.start);
            region.separator_base = region.separator_base.map(shift);
            region.separator_middle = shift(region.separator_middle);
            region.end = shift(region.end);
        }
        debug!(resolved_id, lines_removed, "rebased regions after resolution");
    }

    /// Reconcile the store against a fresh parse of an externally edited
    /// document.
    ///
    /// Each freshly parsed region is matched, in document order, against the
    /// first not-yet-consumed unresolved region with identical candidate
    /// content; a match keeps its stable id. Unmatched fresh regions get new
    /// ids from the session counter. Resolved regions survive untouched:
    /// their markers are gone from the document, so a re-parse can say
    /// nothing about them. Unresolved regions that no longer parse were
    /// dissolved by the edit and are dropped.
    pub fn reconcile(&mut self, fresh: Vec<ConflictRegion>) {
        let previous = std::mem::take(&mut self.regions);
        let (kept_resolved, candidates): (Vec<_>, Vec<_>) =
            previous.into_iter().partition(ConflictRegion::is_resolved);

        let mut consumed = vec![false; candidates.len()];
        let mut next = Vec::with_capacity(fresh.len() + kept_resolved.len());

        for mut region in fresh {
            let matched = candidates
                .iter()
                .enumerate()
                .find(|(i, existing)| !consumed[*i] && existing.same_candidates(&region));
            if let Some((i, existing)) = matched {
                consumed[i] = true;
                region.id = existing.id;
            } else {
                region.id = self.next_id;
                self.next_id += 1;
            }
            next.push(region);
        }

        let dropped = consumed.iter().filter(|c| !**c).count();
        if dropped > 0 {
            debug!(dropped, "edit dissolved previously tracked regions");
        }

        next.extend(kept_resolved);
        next.sort_by_key(|r| r.start);
        self.regions = next;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Resolution, ResolvedChoice};

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn region(id: u64, start: usize, local: &[&str], remote: &[&str]) -> ConflictRegion {
        let middle = start + local.len() + 1;
        ConflictRegion {
            id,
            start,
            separator_base: None,
            separator_middle: middle,
            end: middle + remote.len() + 1,
            local_lines: lines(local),
            base_lines: Vec::new(),
            remote_lines: lines(remote),
            resolution: Resolution::Unresolved,
        }
    }

    fn resolved(mut r: ConflictRegion) -> ConflictRegion {
        r.resolution = Resolution::Resolved {
            choice: ResolvedChoice::Local,
            chosen: r.local_lines.clone(),
            rejected: r.remote_lines.clone(),
        };
        r
    }

    // -----------------------------------------------------------------------
    // Lookup and ordering
    // -----------------------------------------------------------------------

    #[test]
    fn get_by_stable_id() {
        let store = ConflictStore::new(vec![region(0, 0, &["a"], &["b"]), region(1, 10, &["c"], &["d"])]);
        assert_eq!(store.get(1).map(|r| r.start), Some(10));
        assert!(store.get(7).is_none());
    }

    #[test]
    fn unresolved_ids_sorted_by_start() {
        let mut store = ConflictStore::new(vec![
            region(0, 20, &["a"], &["b"]),
            region(1, 0, &["c"], &["d"]),
            region(2, 10, &["e"], &["f"]),
        ]);
        assert_eq!(store.unresolved_ids(), vec![1, 2, 0]);

        let r = store.get_mut(2).unwrap();
        r.resolution = Resolution::Resolved {
            choice: ResolvedChoice::Remote,
            chosen: lines(&["f"]),
            rejected: lines(&["e"]),
        };
        assert_eq!(store.unresolved_ids(), vec![1, 0]);
    }

    #[test]
    fn counts_track_resolution() {
        let store = ConflictStore::new(vec![
            region(0, 0, &["a"], &["b"]),
            resolved(region(1, 10, &["c"], &["d"])),
        ]);
        let counts = store.counts();
        assert_eq!(counts.total, 2);
        assert_eq!(counts.resolved, 1);
        assert_eq!(counts.unresolved(), 1);
    }

    // -----------------------------------------------------------------------
    // Rebasing
    // -----------------------------------------------------------------------

    #[test]
    fn rebase_shifts_only_later_regions() {
        // Region 0 spans lines 0..=3 (4 lines) and is replaced by 1 line:
        // lines_removed = 3.
        let mut store = ConflictStore::new(vec![
            region(0, 0, &["x"], &["y"]),
            region(1, 10, &["c"], &["d"]),
        ]);
        store.rebase_after_resolution(0, 3, 3);

        let untouched = store.get(0).unwrap();
        assert_eq!(untouched.start, 0);

        let shifted = store.get(1).unwrap();
        assert_eq!(shifted.start, 7);
        assert_eq!(shifted.separator_middle, 9);
        assert_eq!(shifted.end, 11);
    }

    #[test]
    fn rebase_negative_delta_shifts_up() {
        let mut store = ConflictStore::new(vec![
            region(0, 0, &["x"], &["y"]),
            region(1, 10, &["c"], &["d"]),
        ]);
        // Replacement longer than the span: later regions move down by 2.
        store.rebase_after_resolution(0, 3, -2);
        assert_eq!(store.get(1).unwrap().start, 12);
    }

    #[test]
    fn rebase_leaves_earlier_regions_unchanged() {
        let mut store = ConflictStore::new(vec![
            region(0, 0, &["a"], &["b"]),
            region(1, 10, &["c"], &["d"]),
        ]);
        // Resolving the later region must not move the earlier one.
        store.rebase_after_resolution(1, 13, 2);
        assert_eq!(store.get(0).unwrap().start, 0);
        assert_eq!(store.get(0).unwrap().end, region(0, 0, &["a"], &["b"]).end);
    }

    #[test]
    fn rebase_shifts_base_separator_when_present() {
        let mut later = region(1, 10, &["c"], &["d"]);
        later.separator_base = Some(12);
        let mut store = ConflictStore::new(vec![region(0, 0, &["a"], &["b"]), later]);
        store.rebase_after_resolution(0, 3, 3);
        assert_eq!(store.get(1).unwrap().separator_base, Some(9));
    }

    // -----------------------------------------------------------------------
    // Reconciliation
    // -----------------------------------------------------------------------

    #[test]
    fn reconcile_keeps_ids_for_matching_content() {
        let mut store = ConflictStore::new(vec![
            region(0, 0, &["a"], &["b"]),
            region(1, 10, &["c"], &["d"]),
        ]);
        // The edit moved both blocks but left their content intact.
        let fresh = vec![region(0, 5, &["a"], &["b"]), region(0, 15, &["c"], &["d"])];
        store.reconcile(fresh);

        assert_eq!(store.counts().total, 2);
        assert_eq!(store.get(0).map(|r| r.start), Some(5));
        assert_eq!(store.get(1).map(|r| r.start), Some(15));
    }

    #[test]
    fn reconcile_assigns_fresh_ids_to_new_blocks() {
        let mut store = ConflictStore::new(vec![region(0, 0, &["a"], &["b"])]);
        let fresh = vec![
            region(0, 0, &["a"], &["b"]),
            region(0, 10, &["new"], &["block"]),
        ];
        store.reconcile(fresh);

        assert_eq!(store.counts().total, 2);
        // The unmatched block gets the next session id, not a recycled one.
        assert!(store.get(1).is_some());
        assert_eq!(store.get(1).unwrap().local_lines, lines(&["new"]));
    }

    #[test]
    fn reconcile_drops_dissolved_regions() {
        let mut store = ConflictStore::new(vec![
            region(0, 0, &["a"], &["b"]),
            region(1, 10, &["c"], &["d"]),
        ]);
        store.reconcile(vec![region(0, 0, &["a"], &["b"])]);
        assert_eq!(store.counts().total, 1);
        assert!(store.get(1).is_none());
    }

    #[test]
    fn reconcile_preserves_resolved_records() {
        let mut store = ConflictStore::new(vec![
            resolved(region(0, 0, &["a"], &["b"])),
            region(1, 10, &["c"], &["d"]),
        ]);
        store.reconcile(vec![region(0, 8, &["c"], &["d"])]);

        let counts = store.counts();
        assert_eq!(counts.total, 2);
        assert_eq!(counts.resolved, 1);
        assert_eq!(store.get(0).unwrap().resolution.choice(), Some(ResolvedChoice::Local));
        assert_eq!(store.get(1).unwrap().start, 8);
    }

    #[test]
    fn reconcile_never_reuses_ids() {
        let mut store = ConflictStore::new(vec![region(0, 0, &["a"], &["b"])]);
        // Drop the only region, then introduce a different one.
        store.reconcile(vec![]);
        store.reconcile(vec![region(0, 3, &["x"], &["y"])]);
        assert!(store.get(0).is_none());
        assert_eq!(store.get(1).map(|r| r.start), Some(3));
    }

    #[test]
    fn reconcile_duplicate_content_matches_in_order() {
        let mut store = ConflictStore::new(vec![
            region(0, 0, &["same"], &["same2"]),
            region(1, 10, &["same"], &["same2"]),
        ]);
        let fresh = vec![region(0, 2, &["same"], &["same2"])];
        store.reconcile(fresh);
        // First existing twin is consumed first; the second is dropped.
        assert_eq!(store.counts().total, 1);
        assert_eq!(store.get(0).map(|r| r.start), Some(2));
        assert!(store.get(1).is_none());
    }
}
