use crate::common::types::{FrameIndex, PageId};
use crate::sim::step::{SlotMeta, SlotSnapshot};

/// Fixed-size table of frame slots for one simulation run.
///
/// Holds occupancy only; policy-specific bookkeeping (recency stamps,
/// reference bits, write pointers) lives with each engine.
#[derive(Debug, Clone)]
pub struct FrameTable {
    slots: Vec<Option<PageId>>,
}

impl FrameTable {
    /// Create a table with `frame_count` empty slots
    pub fn new(frame_count: usize) -> Self {
        Self {
            slots: vec![None; frame_count],
        }
    }

    /// Number of slots in the table
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Find the slot currently holding `page`
    pub fn find(&self, page: PageId) -> Option<FrameIndex> {
        self.slots.iter().position(|&occupant| occupant == Some(page))
    }

    /// Find the first unoccupied slot, scanning left to right
    pub fn first_empty(&self) -> Option<FrameIndex> {
        self.slots.iter().position(|occupant| occupant.is_none())
    }

    /// Occupant of a slot, `None` while the slot is still empty
    pub fn occupant(&self, index: FrameIndex) -> Option<PageId> {
        self.slots[index]
    }

    /// Write `page` into a slot, returning the displaced occupant if any
    pub fn replace(&mut self, index: FrameIndex, page: PageId) -> Option<PageId> {
        self.slots[index].replace(page)
    }

    /// Capture the state of every slot after a step has been applied.
    ///
    /// `hit` marks the slot that satisfied the reference, `newly_loaded` the
    /// slot that was just written; at most one of the two is set per step.
    pub fn snapshot(
        &self,
        hit: Option<FrameIndex>,
        newly_loaded: Option<FrameIndex>,
        meta: impl Fn(FrameIndex) -> SlotMeta,
    ) -> Vec<SlotSnapshot> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, &occupant)| SlotSnapshot {
                occupant,
                is_hit: hit == Some(index),
                is_new: newly_loaded == Some(index),
                meta: meta(index),
            })
            .collect()
    }
}
