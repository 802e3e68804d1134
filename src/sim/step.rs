// Simulation Step Data Model
//
// This module defines the immutable trace records produced by the engines.
// One step is emitted per input reference; each step carries a full snapshot
// of the frame table as it stands after the reference was applied.

use serde::Serialize;

use crate::common::types::{FrameIndex, PageId};

/// Policy-specific slot bookkeeping captured in a snapshot.
///
/// Each engine records only the metadata it actually maintains, so a trace
/// never carries unused fields for the other policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SlotMeta {
    /// FIFO and Optimal keep no per-slot state
    None,
    /// Reference-string index of the slot's most recent use, `None` until
    /// the slot has been touched
    LastUsed(Option<usize>),
    /// Second-chance reference bit, set to 1 on load or hit
    ReferenceBit(u8),
}

/// State of a single frame slot after a step was applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotSnapshot {
    pub occupant: Option<PageId>,
    /// This slot satisfied the reference
    pub is_hit: bool,
    /// This slot was written during the step (initial load or replacement)
    pub is_new: bool,
    pub meta: SlotMeta,
}

/// One entry in a simulation trace.
///
/// Steps are immutable once produced; the step sequence is the sole output
/// artifact of an engine run and is owned by the caller thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationStep {
    /// The referenced page that triggered this step
    pub page: PageId,
    /// Snapshot of every frame slot, post-processing
    pub slots: Vec<SlotSnapshot>,
    /// Whether the reference missed (page fault) or hit
    pub fault: bool,
    /// Human-readable account of the decision taken
    pub description: String,
    /// Clock only: position of the replacement pointer after this step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_pointer: Option<FrameIndex>,
}
