use log::debug;

use crate::common::types::{FrameIndex, PageId};
use crate::sim::engine::check_input;
use crate::sim::error::SimResult;
use crate::sim::frame::FrameTable;
use crate::sim::step::{SimulationStep, SlotMeta};

/// First-in-first-out replacement.
///
/// A single circular write pointer tracks the oldest slot. Slot-fill order
/// is exactly FIFO order, so the eviction target is always the slot under
/// the pointer and no other bookkeeping is needed.
pub fn simulate(
    reference_string: &[PageId],
    frame_count: usize,
) -> SimResult<Vec<SimulationStep>> {
    check_input(reference_string, frame_count)?;

    let mut steps = Vec::with_capacity(reference_string.len());
    let mut frames = FrameTable::new(frame_count);
    let mut next_victim: FrameIndex = 0;

    for &page in reference_string {
        if let Some(hit_index) = frames.find(page) {
            steps.push(SimulationStep {
                page,
                slots: frames.snapshot(Some(hit_index), None, |_| SlotMeta::None),
                fault: false,
                description: format!("Page {} found in frame {} (HIT)", page, hit_index),
                clock_pointer: None,
            });
        } else if let Some(empty_index) = frames.first_empty() {
            // Initial fill does not move the pointer; the pointer only
            // matters once every slot is occupied.
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
            let victim = next_victim;
            let evicted = frames.replace(victim, page);
            next_victim = (next_victim + 1) % frame_count;
            debug!("fifo: evicted page {:?} from frame {}", evicted, victim);

            let description = match evicted {
                Some(old) => format!(
                    "Page {} replaced page {} in frame {} (PAGE FAULT)",
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
