use anyhow::Result;

use pagesim::{compare_all, Algorithm, SimulationStats, SlotMeta};

mod common;
use common::{assert_trace_invariants, occupants, LONG_REFS, TEXTBOOK_REFS};

#[test]
fn test_every_engine_emits_one_step_per_reference() -> Result<()> {
    for algorithm in Algorithm::ALL {
        for frame_count in 1..=7 {
            let steps = algorithm.simulate(&LONG_REFS, frame_count)?;
            assert_trace_invariants(&LONG_REFS, &steps);
        }
    }
    Ok(())
}

#[test]
fn test_repeated_runs_are_identical() -> Result<()> {
    for algorithm in Algorithm::ALL {
        let first = algorithm.simulate(&LONG_REFS, 3)?;
        let second = algorithm.simulate(&LONG_REFS, 3)?;
        assert_eq!(first, second);
    }
    Ok(())
}

#[test]
fn test_fifo_textbook_trace() -> Result<()> {
    let steps = Algorithm::Fifo.simulate(&TEXTBOOK_REFS, 3)?;
    let stats = SimulationStats::from_steps(&steps);

    assert_eq!(stats.page_faults, 10);
    assert_eq!(stats.page_hits, 3);
    assert_eq!(occupants(&steps[12]), vec![Some(0), Some(2), Some(3)]);
    Ok(())
}

#[test]
fn test_fifo_single_frame_always_evicts_previous_page() -> Result<()> {
    let steps = Algorithm::Fifo.simulate(&[1, 2, 3], 1)?;

    // Every reference after the first faults and displaces its predecessor
    assert!(steps.iter().all(|step| step.fault));
    assert_eq!(occupants(&steps[0]), vec![Some(1)]);
    assert_eq!(occupants(&steps[1]), vec![Some(2)]);
    assert_eq!(occupants(&steps[2]), vec![Some(3)]);
    assert!(steps[1].description.contains("replaced page 1"));
    assert!(steps[2].description.contains("replaced page 2"));
    Ok(())
}

#[test]
fn test_fifo_pointer_skips_hits() -> Result<()> {
    // A hit must not advance the write pointer: after [1,2,1,3] with two
    // frames, the next eviction still takes frame 0 (the oldest load).
    let steps = Algorithm::Fifo.simulate(&[1, 2, 1, 3], 2)?;

    assert!(!steps[2].fault);
    assert!(steps[3].fault);
    assert_eq!(occupants(&steps[3]), vec![Some(3), Some(2)]);
    Ok(())
}

#[test]
fn test_lru_textbook_fault_count() -> Result<()> {
    let steps = Algorithm::Lru.simulate(&TEXTBOOK_REFS, 3)?;
    let stats = SimulationStats::from_steps(&steps);

    // Standard textbook result for this string with three frames
    assert_eq!(stats.page_faults, 9);
    assert_eq!(stats.page_hits, 4);
    assert_eq!(occupants(&steps[12]), vec![Some(0), Some(3), Some(2)]);
    Ok(())
}

#[test]
fn test_lru_evicts_least_recently_touched_slot() -> Result<()> {
    // 1 and 2 fill the table, the hit on 1 refreshes it, so 3 must displace 2
    let steps = Algorithm::Lru.simulate(&[1, 2, 1, 3], 2)?;

    assert_eq!(occupants(&steps[3]), vec![Some(1), Some(3)]);
    assert!(steps[3].description.contains("replaced LRU page 2"));
    Ok(())
}

#[test]
fn test_lru_snapshots_carry_recency_stamps() -> Result<()> {
    let steps = Algorithm::Lru.simulate(&[4, 5, 4], 3)?;

    assert_eq!(steps[2].slots[0].meta, SlotMeta::LastUsed(Some(2)));
    assert_eq!(steps[2].slots[1].meta, SlotMeta::LastUsed(Some(1)));
    // Untouched slot still reports "never used"
    assert_eq!(steps[2].slots[2].meta, SlotMeta::LastUsed(None));
    Ok(())
}

#[test]
fn test_optimal_textbook_trace() -> Result<()> {
    let steps = Algorithm::Optimal.simulate(&TEXTBOOK_REFS, 3)?;
    let stats = SimulationStats::from_steps(&steps);

    assert_eq!(stats.page_faults, 7);
    assert_eq!(stats.page_hits, 6);
    assert_eq!(occupants(&steps[12]), vec![Some(2), Some(0), Some(3)]);
    Ok(())
}

#[test]
fn test_optimal_is_a_lower_bound_for_the_other_engines() -> Result<()> {
    for frame_count in 1..=5 {
        let optimal_steps = Algorithm::Optimal.simulate(&LONG_REFS, frame_count)?;
        let optimal_faults = SimulationStats::from_steps(&optimal_steps).page_faults;

        for algorithm in [Algorithm::Fifo, Algorithm::Lru, Algorithm::Clock] {
            let steps = algorithm.simulate(&LONG_REFS, frame_count)?;
            let faults = SimulationStats::from_steps(&steps).page_faults;
            assert!(
                optimal_faults <= faults,
                "Optimal produced {} faults but {} produced {} with {} frames",
                optimal_faults,
                algorithm,
                faults,
                frame_count
            );
        }
    }
    Ok(())
}

#[test]
fn test_optimal_evicts_never_reused_page_immediately() -> Result<()> {
    // 2 never recurs, so it is the victim even though 1's reuse is imminent
    let steps = Algorithm::Optimal.simulate(&[1, 2, 3, 1], 2)?;

    assert_eq!(occupants(&steps[2]), vec![Some(1), Some(3)]);
    assert!(steps[2].slots[1].is_new);
    assert!(steps[2].description.contains("replaced optimal victim 2"));
    assert!(!steps[3].fault);
    Ok(())
}

#[test]
fn test_clock_full_sweep_gives_second_chances() -> Result<()> {
    let steps = Algorithm::Clock.simulate(&[1, 2, 3, 4, 1, 2], 3)?;

    assert!(steps.iter().all(|step| step.fault));

    // Initial loads advance the pointer past each filled slot
    assert_eq!(steps[0].clock_pointer, Some(1));
    assert_eq!(steps[1].clock_pointer, Some(2));
    assert_eq!(steps[2].clock_pointer, Some(0));

    // All bits are set, so the sweep clears the whole ring and comes back
    // to frame 0 as the victim
    assert_eq!(occupants(&steps[3]), vec![Some(4), Some(2), Some(3)]);
    assert!(steps[3].slots[0].is_new);
    assert_eq!(steps[3].clock_pointer, Some(1));

    // The cleared bits make the following evictions immediate
    assert_eq!(occupants(&steps[4]), vec![Some(4), Some(1), Some(3)]);
    assert_eq!(steps[4].clock_pointer, Some(2));
    assert_eq!(occupants(&steps[5]), vec![Some(4), Some(1), Some(2)]);
    assert_eq!(steps[5].clock_pointer, Some(0));
    Ok(())
}

#[test]
fn test_clock_hit_sets_bit_without_moving_pointer() -> Result<()> {
    let steps = Algorithm::Clock.simulate(&[1, 2, 1], 3)?;

    let hit = &steps[2];
    assert!(!hit.fault);
    assert_eq!(hit.slots[0].meta, SlotMeta::ReferenceBit(1));
    // Pointer still sits where the last load left it
    assert_eq!(hit.clock_pointer, Some(2));
    Ok(())
}

#[test]
fn test_single_frame_degenerate_case() -> Result<()> {
    let refs = [5, 5, 1, 1, 5];
    for algorithm in Algorithm::ALL {
        let steps = algorithm.simulate(&refs, 1)?;

        // A reference hits iff it equals the sole occupant
        let faults: Vec<bool> = steps.iter().map(|step| step.fault).collect();
        assert_eq!(faults, vec![true, false, true, false, true], "{}", algorithm);
        assert_eq!(occupants(&steps[4]), vec![Some(5)], "{}", algorithm);
    }
    Ok(())
}

#[test]
fn test_compare_all_covers_every_algorithm() -> Result<()> {
    let results = compare_all(&TEXTBOOK_REFS, 3)?;

    assert_eq!(results.len(), 4);
    let algorithms: Vec<Algorithm> = results.iter().map(|(algorithm, _)| *algorithm).collect();
    assert_eq!(algorithms, Algorithm::ALL.to_vec());

    for (_, stats) in &results {
        assert_eq!(stats.total_references, TEXTBOOK_REFS.len());
        assert_eq!(stats.page_faults + stats.page_hits, stats.total_references);
        assert!((stats.hit_ratio + stats.fault_ratio - 1.0).abs() < 1e-9);
    }
    Ok(())
}

#[test]
fn test_steps_serialize_to_json() -> Result<()> {
    let steps = Algorithm::Clock.simulate(&[1, 2], 2)?;
    let json = serde_json::to_string(&steps)?;

    assert!(json.contains("\"fault\":true"));
    assert!(json.contains("\"clock_pointer\""));

    // The other engines skip the pointer field entirely
    let fifo_json = serde_json::to_string(&Algorithm::Fifo.simulate(&[1], 1)?)?;
    assert!(!fifo_json.contains("clock_pointer"));
    Ok(())
}
