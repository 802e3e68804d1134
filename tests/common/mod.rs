use pagesim::{PageId, SimulationStep};

/// Reference string from the classic textbook example
pub const TEXTBOOK_REFS: [PageId; 13] = [7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2];

/// Longer variant used for invariant sweeps
pub const LONG_REFS: [PageId; 20] = [7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2, 1, 2, 0, 1, 7, 0, 1];

/// Occupants of every slot at a given step, in slot order
pub fn occupants(step: &SimulationStep) -> Vec<Option<PageId>> {
    step.slots.iter().map(|slot| slot.occupant).collect()
}

/// Check the structural invariants every trace must satisfy: one step per
/// reference, no duplicate occupants, and monotonic slot fill.
pub fn assert_trace_invariants(reference_string: &[PageId], steps: &[SimulationStep]) {
    assert_eq!(steps.len(), reference_string.len());

    let mut previously_occupied = 0;
    for (index, step) in steps.iter().enumerate() {
        assert_eq!(step.page, reference_string[index]);

        let mut pages: Vec<PageId> = step.slots.iter().filter_map(|slot| slot.occupant).collect();
        let occupied = pages.len();
        pages.sort_unstable();
        pages.dedup();
        assert_eq!(pages.len(), occupied, "duplicate occupant at step {}", index);

        assert!(
            occupied >= previously_occupied,
            "slot emptied at step {}",
            index
        );
        previously_occupied = occupied;
    }
}
