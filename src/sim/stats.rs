use serde::Serialize;

use crate::sim::step::SimulationStep;

/// Summary counts derived from a step sequence.
///
/// Pure function of the trace, no hidden state; faults and hits always sum
/// to the total reference count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationStats {
    pub total_references: usize,
    pub page_faults: usize,
    pub page_hits: usize,
    pub hit_ratio: f64,
    pub fault_ratio: f64,
}

impl SimulationStats {
    /// Aggregate a step sequence into summary statistics
    pub fn from_steps(steps: &[SimulationStep]) -> Self {
        let total = steps.len();
        let faults = steps.iter().filter(|step| step.fault).count();
        let hits = total - faults;

        Self {
            total_references: total,
            page_faults: faults,
            page_hits: hits,
            hit_ratio: hits as f64 / total as f64,
            fault_ratio: faults as f64 / total as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::engine::Algorithm;

    #[test]
    fn test_counts_and_ratios() {
        let steps = Algorithm::Fifo.simulate(&[1, 2, 1, 3], 2).unwrap();

        let stats = SimulationStats::from_steps(&steps);
        assert_eq!(stats.total_references, 4);
        assert_eq!(stats.page_faults, 3);
        assert_eq!(stats.page_hits, 1);
        assert!((stats.hit_ratio - 0.25).abs() < 1e-9);
        assert!((stats.fault_ratio - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_faults_and_hits_complement() {
        let steps = Algorithm::Lru.simulate(&[5, 5, 5], 1).unwrap();

        let stats = SimulationStats::from_steps(&steps);
        assert_eq!(stats.page_faults + stats.page_hits, stats.total_references);
        assert!((stats.hit_ratio + stats.fault_ratio - 1.0).abs() < 1e-9);
    }
}
