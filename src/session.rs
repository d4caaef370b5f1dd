//! Resolution engine — mutates the document and the store in lock-step.
//!
//! A [`DocumentSession`] binds one [`Document`] to its [`ConflictStore`] and
//! an immutable snapshot of the loaded text. It is the only mutator of the
//! pair: every operation either completes leaving all unresolved regions'
//! indices valid in the current document, or (for an unknown region id)
//! changes nothing at all.
//!
//! Revert is forward-only by design: coordinate rebasing accumulates deltas
//! that are not meant to be inverted, so reverting any one region reloads
//! the whole snapshot — exact original bytes, at the cost of discarding
//! sibling resolutions made in the same session.

use tracing::{debug, info};

use crate::document::Document;
use crate::error::RiftError;
use crate::model::{Choice, Resolution, ResolvedChoice};
use crate::parse;
use crate::store::{ConflictStore, StoreCounts};

// ---------------------------------------------------------------------------
// ResolvedRegion
// ---------------------------------------------------------------------------

/// The outcome of one resolution, returned for preview rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRegion {
    /// The region that was resolved.
    pub id: u64,
    /// How it was settled.
    pub choice: ResolvedChoice,
    /// Lines spliced into the document.
    pub chosen: Vec<String>,
    /// Lines turned down.
    pub rejected: Vec<String>,
}

// ---------------------------------------------------------------------------
// DocumentSession
// ---------------------------------------------------------------------------

/// One loaded document plus its conflict regions and pristine snapshot.
#[derive(Clone, Debug)]
pub struct DocumentSession {
    document: Document,
    store: ConflictStore,
    original_text: String,
}

impl DocumentSession {
    /// Parse `text` once and capture the snapshot revert reloads from.
    #[must_use]
    pub fn load(text: &str) -> Self {
        let document = Document::from_text(text);
        let regions = parse::parse_lines(document.lines().iter().map(String::as_str));
        info!(regions = regions.len(), "loaded document");
        Self {
            document,
            store: ConflictStore::new(regions),
            original_text: text.to_owned(),
        }
    }

    /// The current document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The current region collection.
    #[must_use]
    pub fn store(&self) -> &ConflictStore {
        &self.store
    }

    /// The current document text.
    #[must_use]
    pub fn current_text(&self) -> String {
        self.document.to_text()
    }

    /// Region tally.
    #[must_use]
    pub fn counts(&self) -> StoreCounts {
        self.store.counts()
    }

    /// Resolve one region by taking a candidate side.
    ///
    /// Splices the chosen lines over the region's full marker span, records
    /// the resolution, and rebases every later region by the net line-count
    /// delta.
    ///
    /// # Errors
    /// [`RiftError::UnknownRegion`] if `id` is not tracked, or
    /// [`RiftError::AlreadyResolved`] if it no longer carries markers —
    /// both no-ops on session state, reported as non-fatal by callers.
    pub fn resolve(&mut self, id: u64, choice: Choice) -> Result<ResolvedRegion, RiftError> {
        let region = self.store.get(id).ok_or(RiftError::UnknownRegion { id })?;
        if region.is_resolved() {
            return Err(RiftError::AlreadyResolved { id });
        }
        let chosen = region.candidate(choice).to_vec();
        let rejected = region.rejected_for(choice);
        self.apply_resolution(id, choice.into(), chosen, rejected)
    }

    /// Resolve one region with caller-supplied content.
    ///
    /// Both candidate sides are recorded as rejected.
    ///
    /// # Errors
    /// [`RiftError::UnknownRegion`] or [`RiftError::AlreadyResolved`] as
    /// for [`Self::resolve`]; session state is untouched.
    pub fn resolve_manual(
        &mut self,
        id: u64,
        lines: Vec<String>,
    ) -> Result<ResolvedRegion, RiftError> {
        let region = self.store.get(id).ok_or(RiftError::UnknownRegion { id })?;
        if region.is_resolved() {
            return Err(RiftError::AlreadyResolved { id });
        }
        let mut rejected = region.local_lines.clone();
        rejected.extend(region.remote_lines.iter().cloned());
        self.apply_resolution(id, ResolvedChoice::Manual, lines, rejected)
    }

    /// Resolve every currently unresolved region with the same side.
    ///
    /// Regions are processed in ascending `start` order — rebasing only
    /// shifts later regions, so this keeps every subsequent coordinate
    /// valid without extra bookkeeping.
    pub fn resolve_all(&mut self, choice: Choice) -> Vec<ResolvedRegion> {
        let ids = self.store.unresolved_ids();
        let mut outcomes = Vec::with_capacity(ids.len());
        for id in ids {
            match self.resolve(id, choice) {
                Ok(outcome) => outcomes.push(outcome),
                // The id list was taken from the store a moment ago; a miss
                // here cannot happen, but a bulk operation must not die on it.
                Err(err) => debug!(id, %err, "skipping region during bulk resolve"),
            }
        }
        info!(resolved = outcomes.len(), choice = %choice, "bulk resolution complete");
        outcomes
    }

    /// Revert one region to its unresolved state.
    ///
    /// Implemented as a full reload of the original snapshot: the mutated
    /// document and region list are discarded and rebuilt by re-parsing the
    /// text captured at load time. Restores exact original bytes; sibling
    /// resolutions from this session are discarded with it.
    ///
    /// # Errors
    /// [`RiftError::UnknownRegion`] if `id` is not tracked; nothing is
    /// reloaded in that case.
    pub fn revert(&mut self, id: u64) -> Result<(), RiftError> {
        if self.store.get(id).is_none() {
            return Err(RiftError::UnknownRegion { id });
        }
        info!(id, "reverting region via snapshot reload");
        self.restore_all();
        Ok(())
    }

    /// Discard all resolutions and reload the original snapshot.
    pub fn restore_all(&mut self) {
        self.document = Document::from_text(&self.original_text);
        let regions = parse::parse_lines(self.document.lines().iter().map(String::as_str));
        self.store = ConflictStore::new(regions);
    }

    /// Reconcile the session with a document edited outside the engine.
    ///
    /// Replaces the document wholesale, re-runs the parser, and matches the
    /// result against tracked regions by candidate-content identity so
    /// stable ids survive where the edit left a block's content intact.
    pub fn reconcile_manual_edit(&mut self, new_text: &str) {
        self.document = Document::from_text(new_text);
        let fresh = parse::parse_lines(self.document.lines().iter().map(String::as_str));
        debug!(fresh = fresh.len(), "re-parsed after manual edit");
        self.store.reconcile(fresh);
    }

    /// Splice + record + rebase, in that order. The store is consistent
    /// again by the time this returns.
    fn apply_resolution(
        &mut self,
        id: u64,
        choice: ResolvedChoice,
        chosen: Vec<String>,
        rejected: Vec<String>,
    ) -> Result<ResolvedRegion, RiftError> {
        let region = self.store.get(id).ok_or(RiftError::UnknownRegion { id })?;
        let (start, end) = (region.start, region.end);
        let span_len = region.span_len();

        self.document.splice(start, end, &chosen);

        let record = self.store.get_mut(id).ok_or(RiftError::UnknownRegion { id })?;
        record.resolution = Resolution::Resolved {
            choice,
            chosen: chosen.clone(),
            rejected: rejected.clone(),
        };

        #[allow(clippy::cast_possible_wrap)]
        let lines_removed = span_len as i64 - chosen.len() as i64;
        self.store.rebase_after_resolution(id, end, lines_removed);

        info!(id, choice = %choice, lines_removed, "resolved region");
        Ok(ResolvedRegion {
            id,
            choice,
            chosen,
            rejected,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
