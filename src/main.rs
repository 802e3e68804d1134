use anyhow::Result;

use pagesim::{Algorithm, SimulationStats};

fn main() -> Result<()> {
    env_logger::init();

    // Textbook reference string, three frames
    let reference_string = [7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2, 1, 2, 0, 1, 7, 0, 1];
    let frame_count = 3;

    for algorithm in Algorithm::ALL {
        let steps = algorithm.simulate(&reference_string, frame_count)?;
        let stats = SimulationStats::from_steps(&steps);

        println!("{}", algorithm.title());
        for (index, step) in steps.iter().enumerate() {
            println!("  step {:>2}: {}", index, step.description);
        }
        println!(
            "  {} faults, {} hits over {} references ({:.1}% hit ratio)",
            stats.page_faults,
            stats.page_hits,
            stats.total_references,
            stats.hit_ratio * 100.0
        );
        println!();
    }

    Ok(())
}
