// Page Replacement Engines
//
// Four independent, pure simulations sharing one contract: consume a
// reference string and a frame count, produce one step per reference. Each
// engine owns its frame table and bookkeeping for the duration of a run; no
// state survives across calls.

pub mod clock;
pub mod fifo;
pub mod lru;
pub mod optimal;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::common::types::PageId;
use crate::sim::error::{SimResult, SimulationError};
use crate::sim::stats::SimulationStats;
use crate::sim::step::SimulationStep;

/// The four supported replacement policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Algorithm {
    Fifo,
    Lru,
    Optimal,
    Clock,
}

impl Algorithm {
    /// All policies, in presentation order
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Fifo,
        Algorithm::Lru,
        Algorithm::Optimal,
        Algorithm::Clock,
    ];

    /// Run this policy over the given input
    pub fn simulate(
        &self,
        reference_string: &[PageId],
        frame_count: usize,
    ) -> SimResult<Vec<SimulationStep>> {
        match self {
            Algorithm::Fifo => fifo::simulate(reference_string, frame_count),
            Algorithm::Lru => lru::simulate(reference_string, frame_count),
            Algorithm::Optimal => optimal::simulate(reference_string, frame_count),
            Algorithm::Clock => clock::simulate(reference_string, frame_count),
        }
    }

    /// Display name, including the customary expansion
    pub fn title(&self) -> &'static str {
        match self {
            Algorithm::Fifo => "FIFO (First In First Out)",
            Algorithm::Lru => "LRU (Least Recently Used)",
            Algorithm::Optimal => "Optimal Page Replacement",
            Algorithm::Clock => "Clock Algorithm (Second Chance)",
        }
    }

    /// One-paragraph explanation of how the policy decides evictions
    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::Fifo => {
                "The simplest page replacement algorithm. It maintains a queue of pages in \
                 memory. When a page fault occurs, the oldest page (first page that entered) is \
                 replaced. Easy to implement but doesn't consider page usage patterns, which can \
                 lead to suboptimal performance."
            }
            Algorithm::Lru => {
                "Replaces the page that has not been used for the longest period of time. Based \
                 on the principle that pages used recently are likely to be used again soon. \
                 Requires tracking the time of last use for each page. Generally performs better \
                 than FIFO but requires more overhead."
            }
            Algorithm::Optimal => {
                "The theoretical best algorithm that replaces the page that will not be used for \
                 the longest time in the future. Impossible to implement in practice (requires \
                 future knowledge), but serves as a benchmark to compare other algorithms. \
                 Guarantees the lowest possible page fault rate."
            }
            Algorithm::Clock => {
                "An approximation of LRU that uses a reference bit for each page. A circular \
                 list (clock) with a pointer is maintained. When a page fault occurs, the \
                 algorithm checks the reference bit: if 1, it's given a second chance (bit set \
                 to 0), if 0, the page is replaced. More efficient than LRU with lower overhead."
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Fifo => "FIFO",
            Algorithm::Lru => "LRU",
            Algorithm::Optimal => "Optimal",
            Algorithm::Clock => "Clock",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Algorithm {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fifo" => Ok(Algorithm::Fifo),
            "lru" => Ok(Algorithm::Lru),
            "optimal" | "opt" => Ok(Algorithm::Optimal),
            "clock" | "second-chance" => Ok(Algorithm::Clock),
            other => Err(SimulationError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Run every policy over the same input for side-by-side comparison
pub fn compare_all(
    reference_string: &[PageId],
    frame_count: usize,
) -> SimResult<Vec<(Algorithm, SimulationStats)>> {
    let mut results = Vec::with_capacity(Algorithm::ALL.len());
    for algorithm in Algorithm::ALL {
        let steps = algorithm.simulate(reference_string, frame_count)?;
        results.push((algorithm, SimulationStats::from_steps(&steps)));
    }
    Ok(results)
}

/// Reject caller-input errors before any engine runs
fn check_input(reference_string: &[PageId], frame_count: usize) -> SimResult<()> {
    if reference_string.is_empty() {
        return Err(SimulationError::EmptyReferenceString);
    }
    if frame_count == 0 {
        return Err(SimulationError::InvalidFrameCount(frame_count));
    }
    Ok(())
}
