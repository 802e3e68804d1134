use log::debug;

use crate::common::types::{FrameIndex, PageId};
use crate::sim::engine::check_input;
use crate::sim::error::SimResult;
use crate::sim::frame::FrameTable;
use crate::sim::step::{SimulationStep, SlotMeta};

/// Second-chance (clock) replacement.
///
/// Every slot carries a reference bit, set on load and on hit. On a fault
/// with a full table a pointer sweeps the slots circularly, clearing set
/// bits; the first slot found with a clear bit is the victim. A cleared bit
/// cannot be set again during the same sweep, so the sweep terminates within
/// one full revolution. Each emitted step records the pointer position as it
/// stands after the step.
pub fn simulate(
    reference_string: &[PageId],
    frame_count: usize,
) -> SimResult<Vec<SimulationStep>> {
    check_input(reference_string, frame_count)?;

    let mut steps = Vec::with_capacity(reference_string.len());
    let mut frames = FrameTable::new(frame_count);
    let mut reference_bits: Vec<u8> = vec![0; frame_count];
    let mut clock_pointer: FrameIndex = 0;

    for &page in reference_string {
        if let Some(hit_index) = frames.find(page) {
            reference_bits[hit_index] = 1;
            steps.push(SimulationStep {
                page,
                slots: frames.snapshot(Some(hit_index), None, |i| {
                    SlotMeta::ReferenceBit(reference_bits[i])
                }),
                fault: false,
                description: format!(
                    "Page {} found in frame {}, reference bit set to 1 (HIT)",
                    page, hit_index
                ),
                clock_pointer: Some(clock_pointer),
            });
        } else if let Some(empty_index) = frames.first_empty() {
            frames.replace(empty_index, page);
            reference_bits[empty_index] = 1;
            clock_pointer = (empty_index + 1) % frame_count;
            steps.push(SimulationStep {
                page,
                slots: frames.snapshot(None, Some(empty_index), |i| {
                    SlotMeta::ReferenceBit(reference_bits[i])
                }),
                fault: true,
                description: format!(
                    "Page {} loaded into empty frame {} (PAGE FAULT)",
                    page, empty_index
                ),
                clock_pointer: Some(clock_pointer),
            });
        } else {
            // Sweep: give every set bit a second chance, then evict the
            // first slot whose bit is already clear.
            while reference_bits[clock_pointer] == 1 {
                reference_bits[clock_pointer] = 0;
                clock_pointer = (clock_pointer + 1) % frame_count;
            }

            let victim = clock_pointer;
            let evicted = frames.replace(victim, page);
            reference_bits[victim] = 1;
            clock_pointer = (victim + 1) % frame_count;
            debug!("clock: evicted page {:?} from frame {}", evicted, victim);

            let description = match evicted {
                Some(old) => format!(
                    "Page {} replaced {} in frame {} (PAGE FAULT)",
                    page, old, victim
                ),
                None => format!(
                    "Page {} loaded into empty frame {} (PAGE FAULT)",
                    page, victim
                ),
            };
            steps.push(SimulationStep {
                page,
                slots: frames.snapshot(None, Some(victim), |i| {
                    SlotMeta::ReferenceBit(reference_bits[i])
                }),
                fault: true,
                description,
                clock_pointer: Some(clock_pointer),
            });
        }
    }

    Ok(steps)
}
