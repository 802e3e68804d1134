use log::debug;

use crate::common::types::{FrameIndex, PageId};
use crate::sim::engine::check_input;
use crate::sim::error::SimResult;
use crate::sim::frame::FrameTable;
use crate::sim::step::{SimulationStep, SlotMeta};

/// Least-recently-used replacement.
///
/// Every slot carries the reference-string index of its most recent touch
/// (`None` until first use, ordering below any real index). On a fault with
/// a full table the slot with the minimum stamp is evicted; the left-to-right
/// scan uses a strictly-less comparison, so the lowest-indexed slot wins
/// ties.
pub fn simulate(
    reference_string: &[PageId],
    frame_count: usize,
) -> SimResult<Vec<SimulationStep>> {
    check_input(reference_string, frame_count)?;

    let mut steps = Vec::with_capacity(reference_string.len());
    let mut frames = FrameTable::new(frame_count);
    let mut last_used: Vec<Option<usize>> = vec![None; frame_count];

    for (index, &page) in reference_string.iter().enumerate() {
        if let Some(hit_index) = frames.find(page) {
            last_used[hit_index] = Some(index);
            steps.push(SimulationStep {
                page,
                slots: frames.snapshot(Some(hit_index), None, |i| {
                    SlotMeta::LastUsed(last_used[i])
                }),
                fault: false,
                description: format!("Page {} found in frame {} (HIT)", page, hit_index),
                clock_pointer: None,
            });
        } else if let Some(empty_index) = frames.first_empty() {
            frames.replace(empty_index, page);
            last_used[empty_index] = Some(index);
            steps.push(SimulationStep {
                page,
                slots: frames.snapshot(None, Some(empty_index), |i| {
                    SlotMeta::LastUsed(last_used[i])
                }),
                fault: true,
                description: format!(
                    "Page {} loaded into empty frame {} (PAGE FAULT)",
                    page, empty_index
                ),
                clock_pointer: None,
            });
        } else {
            let victim = least_recently_used(&last_used);
            let evicted = frames.replace(victim, page);
            last_used[victim] = Some(index);
            debug!("lru: evicted page {:?} from frame {}", evicted, victim);

            let description = match evicted {
                Some(old) => format!(
                    "Page {} replaced LRU page {} in frame {} (PAGE FAULT)",
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
                    SlotMeta::LastUsed(last_used[i])
                }),
                fault: true,
                description,
                clock_pointer: None,
            });
        }
    }

    Ok(steps)
}

/// Slot with the minimum recency stamp; first slot encountered wins ties.
fn least_recently_used(last_used: &[Option<usize>]) -> FrameIndex {
    let mut victim = 0;
    for i in 1..last_used.len() {
        if last_used[i] < last_used[victim] {
            victim = i;
        }
    }
    victim
}

#[cfg(test)]
mod tests {
    use super::least_recently_used;

    #[test]
    fn test_never_used_slot_is_picked_first() {
        assert_eq!(least_recently_used(&[Some(4), None, Some(2)]), 1);
    }

    #[test]
    fn test_lowest_index_wins_ties() {
        assert_eq!(least_recently_used(&[None, None, None]), 0);
    }

    #[test]
    fn test_minimum_stamp_is_selected() {
        assert_eq!(least_recently_used(&[Some(5), Some(1), Some(3)]), 1);
    }
}
