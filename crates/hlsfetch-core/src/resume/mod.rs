//! Resume filter: decides per slot whether a fetch is needed.
//!
//! The filesystem is the only run state. A slot that exists with non-zero size
//! is trusted as already downloaded; its bytes are not validated. A zero-byte
//! or missing slot is the only "not done" signal.

use crate::segmenter::Segment;
use std::path::Path;

/// On-disk state of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Missing,
    Empty,
    /// Non-empty, with its size in bytes.
    Filled(u64),
}

impl SlotState {
    pub fn is_filled(&self) -> bool {
        matches!(self, SlotState::Filled(_))
    }
}

/// Inspects `slot` on disk. Anything that is not a readable regular file with
/// a non-zero length counts as missing or empty.
pub fn slot_state(slot: &Path) -> SlotState {
    match std::fs::metadata(slot) {
        Ok(meta) if meta.is_file() && meta.len() > 0 => SlotState::Filled(meta.len()),
        Ok(meta) if meta.is_file() => SlotState::Empty,
        _ => SlotState::Missing,
    }
}

/// Without resume every slot is fetched (existing slots get overwritten).
/// With resume only missing or zero-size slots are fetched.
pub fn should_fetch(slot: &Path, resume_requested: bool) -> bool {
    !resume_requested || !slot_state(slot).is_filled()
}

/// Splits `segments` into those that need fetching and the indices that were
/// skipped because their slot is already filled. Both keep index order.
pub fn partition_pending(segments: &[Segment], resume_requested: bool) -> (Vec<Segment>, Vec<usize>) {
    let mut pending = Vec::new();
    let mut skipped = Vec::new();
    for segment in segments {
        if should_fetch(&segment.slot, resume_requested) {
            pending.push(segment.clone());
        } else {
            tracing::debug!(index = segment.index, slot = %segment.slot.display(), "slot already filled, skipping");
            skipped.push(segment.index);
        }
    }
    (pending, skipped)
}
