use log::debug;

use crate::common::types::{FrameIndex, PageId};
use crate::sim::engine::check_input;
use crate::sim::error::SimResult;
use crate::sim::frame::FrameTable;
use crate::sim::step::{SimulationStep, SlotMeta};

/// Belady's optimal replacement.
///
/// Keeps no metadata beyond occupancy; every eviction decision is recomputed
/// from the remainder of the reference string. An occupant that never recurs
/// is evicted immediately (the left-to-right scan short-circuits on the first
/// such slot); otherwise the slot whose next use lies farthest ahead is
/// chosen, with the first slot at the maximum winning ties.
///
/// The victim scan is O(frame_count x remaining length) per fault, which is
/// fine for a theoretical benchmark over short inputs.
pub fn simulate(
    reference_string: &[PageId],
    frame_count: usize,
) -> SimResult<Vec<SimulationStep>> {
    check_input(reference_string, frame_count)?;

    let mut steps = Vec::with_capacity(reference_string.len());
    let mut frames = FrameTable::new(frame_count);

    for (index, &page) in reference_string.iter().enumerate() {
        if let Some(hit_index) = frames.find(page) {
            steps.push(SimulationStep {
                page,
                slots: frames.snapshot(Some(hit_index), None, |_| SlotMeta::None),
                fault: false,
                description: format!("Page {} found in frame {} (HIT)", page, hit_index),
                clock_pointer: None,
            });
        } else if let Some(empty_index) = frames.first_empty() {
            frames.replace(empty_index, page);
            steps.push(SimulationStep {
                page,
                slots: frames.snapshot(None, Some(empty_index), |_| SlotMeta::None),
                fault: true,
                description: format!(
                    "Page {} loaded into empty frame {} (PAGE FAULT)",
                    page, empty_index
                ),
                clock_pointer: None,
            });
        } else {
            let victim = farthest_next_use(&frames, reference_string, index);
            let evicted = frames.replace(victim, page);
            debug!("optimal: evicted page {:?} from frame {}", evicted, victim);

            let description = match evicted {
                Some(old) => format!(
                    "Page {} replaced optimal victim {} in frame {} (PAGE FAULT)",
                    page, old, victim
                ),
                None => format!(
                    "Page {} loaded into empty frame {} (PAGE FAULT)",
                    page, victim
                ),
            };
            steps.push(SimulationStep {
                page,
                slots: frames.snapshot(None, Some(victim), |_| SlotMeta::None),
                fault: true,
                description,
                clock_pointer: None,
            });
        }
    }

    Ok(steps)
}

/// Occupied slot whose page is reused farthest in the future, or the first
/// slot whose page is never reused at all.
fn farthest_next_use(
    frames: &FrameTable,
    reference_string: &[PageId],
    index: usize,
) -> FrameIndex {
    let mut victim = 0;
    let mut farthest_use = 0;

    for i in 0..frames.len() {
        let occupant = frames.occupant(i);
        let next_use = reference_string[index + 1..]
            .iter()
            .position(|&future| Some(future) == occupant)
            .map(|offset| index + 1 + offset);

        match next_use {
            // Never referenced again: no later slot can beat this one.
            None => return i,
            Some(next) if next > farthest_use => {
                farthest_use = next;
                victim = i;
            }
            Some(_) => {}
        }
    }

    victim
}
