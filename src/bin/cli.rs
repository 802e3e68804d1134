use anyhow::Result;
use clap::{Parser, Subcommand};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use pagesim::{compare_all, Algorithm, PageId, SimulationStats, SimulationStep, SlotMeta};

const HISTORY_FILE: &str = ".psim_history";

/// Default input taken from the classic textbook example
const DEFAULT_REFERENCE_STRING: &str = "7,0,1,2,0,3,0,4,2,3,0,3,2,1,2,0,1,7,0,1";

#[derive(Parser)]
#[command(author, version, about = "PageSim CLI - page replacement algorithm visualizer")]
struct Cli {
    /// Reference string, comma or whitespace separated page numbers
    #[arg(short, long, default_value = DEFAULT_REFERENCE_STRING)]
    reference_string: String,

    /// Number of physical memory frames (typical range 1-7)
    #[arg(short, long, default_value_t = 3)]
    frames: usize,

    /// Command to execute
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one algorithm and print its full step trace
    Run {
        /// Algorithm to simulate (fifo, lru, optimal, clock)
        #[arg(value_parser = parse_algorithm)]
        algorithm: Algorithm,

        /// Emit the step sequence as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run all four algorithms and print a comparison table
    Compare,

    /// Print an explanation of an algorithm's eviction policy
    Explain {
        /// Algorithm to describe (fifo, lru, optimal, clock)
        #[arg(value_parser = parse_algorithm)]
        algorithm: Algorithm,
    },

    /// Start an interactive shell
    Shell,
}

fn parse_algorithm(s: &str) -> Result<Algorithm, pagesim::SimulationError> {
    s.parse()
}

/// Parse a user-supplied reference string, discarding non-numeric tokens.
///
/// Validation of the parsed result (non-empty, positive frame count) is the
/// engines' job; this only does the lexical split.
fn parse_reference_string(input: &str) -> Vec<PageId> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(|token| token.trim().parse::<PageId>().ok())
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let reference_string = parse_reference_string(&cli.reference_string);

    match cli.command {
        Some(Commands::Run { algorithm, json }) => {
            let steps = algorithm.simulate(&reference_string, cli.frames)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&steps)?);
            } else {
                display_trace(algorithm, &steps);
                display_stats(&SimulationStats::from_steps(&steps));
            }
        }
        Some(Commands::Compare) => {
            let results = compare_all(&reference_string, cli.frames)?;
            display_comparison(&results);
        }
        Some(Commands::Explain { algorithm }) => {
            println!("{}", algorithm.title());
            println!("{}", algorithm.description());
        }
        Some(Commands::Shell) | None => {
            let mut session = Session {
                reference_string,
                frames: cli.frames,
                trace: None,
                cursor: 0,
            };
            run_shell(&mut session)?;
        }
    }

    Ok(())
}

/// Interactive shell state: the current input plus an optional precomputed
/// trace that playback commands index into.
struct Session {
    reference_string: Vec<PageId>,
    frames: usize,
    trace: Option<(Algorithm, Vec<SimulationStep>)>,
    cursor: usize,
}

impl Session {
    fn run(&mut self, algorithm: Algorithm) {
        match algorithm.simulate(&self.reference_string, self.frames) {
            Ok(steps) => {
                self.cursor = 0;
                println!(
                    "{}: {} steps computed, showing step 0",
                    algorithm,
                    steps.len()
                );
                display_step(0, &steps[0]);
                self.trace = Some((algorithm, steps));
            }
            Err(err) => println!("Error: {}", err),
        }
    }

    fn seek(&mut self, target: usize) {
        match &self.trace {
            Some((_, steps)) => {
                if target >= steps.len() {
                    println!("Step {} is out of range (trace has {} steps)", target, steps.len());
                } else {
                    self.cursor = target;
                    display_step(target, &steps[target]);
                }
            }
            None => println!("No trace yet. Use 'run <algorithm>' first."),
        }
    }

    fn show_stats(&self) {
        match &self.trace {
            Some((algorithm, steps)) => {
                println!("{}", algorithm.title());
                display_stats(&SimulationStats::from_steps(steps));
            }
            None => println!("No trace yet. Use 'run <algorithm>' first."),
        }
    }
}

fn run_shell(session: &mut Session) -> Result<()> {
    println!("Welcome to PageSim. Type 'help' for assistance or 'exit' to quit.");
    println!(
        "Current input: {} references, {} frames",
        session.reference_string.len(),
        session.frames
    );

    let mut rl = Editor::<(), DefaultHistory>::new()?;
    if let Err(err) = rl.load_history(HISTORY_FILE) {
        if !err.to_string().contains("No such file or directory") {
            println!("Error loading history: {}", err);
        }
    }

    loop {
        let readline = rl.readline("psim> ");
        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);

                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let mut words = line.split_whitespace();
                let command = words.next().unwrap_or("").to_lowercase();
                let rest: Vec<&str> = words.collect();

                match command.as_str() {
                    "exit" | "quit" => {
                        println!("Goodbye!");
                        break;
                    }
                    "help" => print_help(),
                    "run" => match rest.first() {
                        Some(name) => match name.parse::<Algorithm>() {
                            Ok(algorithm) => session.run(algorithm),
                            Err(err) => println!("Error: {}", err),
                        },
                        None => println!("Usage: run <fifo|lru|optimal|clock>"),
                    },
                    "next" | "n" => {
                        let target = session.cursor + 1;
                        session.seek(target);
                    }
                    "prev" | "p" => {
                        if session.cursor == 0 {
                            println!("Already at the first step");
                        } else {
                            let target = session.cursor - 1;
                            session.seek(target);
                        }
                    }
                    "goto" => match rest.first().and_then(|s| s.parse::<usize>().ok()) {
                        Some(target) => session.seek(target),
                        None => println!("Usage: goto <step-number>"),
                    },
                    "show" => session.seek(session.cursor),
                    "stats" => session.show_stats(),
                    "compare" => match compare_all(&session.reference_string, session.frames) {
                        Ok(results) => display_comparison(&results),
                        Err(err) => println!("Error: {}", err),
                    },
                    "explain" => match rest.first() {
                        Some(name) => match name.parse::<Algorithm>() {
                            Ok(algorithm) => {
                                println!("{}", algorithm.title());
                                println!("{}", algorithm.description());
                            }
                            Err(err) => println!("Error: {}", err),
                        },
                        None => println!("Usage: explain <fifo|lru|optimal|clock>"),
                    },
                    "set" => match rest.split_first() {
                        Some((&"frames", value)) => {
                            match value.first().and_then(|s| s.parse::<usize>().ok()) {
                                Some(frames) => {
                                    session.frames = frames;
                                    session.trace = None;
                                    println!("Frame count set to {}", frames);
                                }
                                None => println!("Usage: set frames <count>"),
                            }
                        }
                        Some((&"refs", value)) => {
                            let parsed = parse_reference_string(&value.join(" "));
                            if parsed.is_empty() {
                                println!("No page numbers found in input");
                            } else {
                                println!("Reference string set to {} pages", parsed.len());
                                session.reference_string = parsed;
                                session.trace = None;
                            }
                        }
                        _ => println!("Usage: set frames <count> | set refs <pages...>"),
                    },
                    _ => println!("Unknown command: {}. Type 'help' for assistance.", command),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {}", err);
                break;
            }
        }
    }

    if let Err(err) = rl.save_history(HISTORY_FILE) {
        println!("Error saving history: {}", err);
    }
    Ok(())
}

fn print_help() {
    println!("Available commands:");
    println!("  run <algorithm>        - Simulate fifo, lru, optimal or clock");
    println!("  next / n               - Advance playback by one step");
    println!("  prev / p               - Move playback back one step");
    println!("  goto <n>               - Jump playback to step n");
    println!("  show                   - Re-display the current step");
    println!("  stats                  - Summary statistics for the current trace");
    println!("  compare                - Run all four algorithms side by side");
    println!("  explain <algorithm>    - Describe an algorithm's eviction policy");
    println!("  set frames <count>     - Change the frame count (discards the trace)");
    println!("  set refs <pages...>    - Change the reference string (discards the trace)");
    println!("  help                   - Display this help message");
    println!("  exit                   - Exit the shell");
}

/// Render one slot as e.g. "3*" (hit), "3+" (newly written) or "-" (empty)
fn format_slots(step: &SimulationStep) -> String {
    let cells: Vec<String> = step
        .slots
        .iter()
        .map(|slot| {
            let occupant = match slot.occupant {
                Some(page) => page.to_string(),
                None => "-".to_string(),
            };
            let marker = if slot.is_hit {
                "*"
            } else if slot.is_new {
                "+"
            } else {
                ""
            };
            format!("{}{}", occupant, marker)
        })
        .collect();
    format!("[{}]", cells.join(" "))
}

/// Render the policy bookkeeping carried by a step, if any
fn format_meta(step: &SimulationStep) -> Option<String> {
    let mut parts = Vec::new();

    let stamps: Vec<String> = step
        .slots
        .iter()
        .filter_map(|slot| match slot.meta {
            SlotMeta::LastUsed(stamp) => Some(match stamp {
                Some(index) => index.to_string(),
                None => "-".to_string(),
            }),
            _ => None,
        })
        .collect();
    if !stamps.is_empty() {
        parts.push(format!("last-used [{}]", stamps.join(" ")));
    }

    let bits: Vec<String> = step
        .slots
        .iter()
        .filter_map(|slot| match slot.meta {
            SlotMeta::ReferenceBit(bit) => Some(bit.to_string()),
            _ => None,
        })
        .collect();
    if !bits.is_empty() {
        parts.push(format!("bits [{}]", bits.join(" ")));
    }

    if let Some(pointer) = step.clock_pointer {
        parts.push(format!("ptr {}", pointer));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn display_step(index: usize, step: &SimulationStep) {
    let outcome = if step.fault { "FAULT" } else { "HIT" };
    let mut line = format!(
        "step {:>3} | ref {:>3} | {:<5} | {}",
        index,
        step.page,
        outcome,
        format_slots(step)
    );
    if let Some(meta) = format_meta(step) {
        line.push_str(&format!(" | {}", meta));
    }
    println!("{}", line);
    println!("          {}", step.description);
}

fn display_trace(algorithm: Algorithm, steps: &[SimulationStep]) {
    println!("{}", algorithm.title());
    for (index, step) in steps.iter().enumerate() {
        display_step(index, step);
    }
}

fn display_stats(stats: &SimulationStats) {
    println!(
        "references: {}  faults: {}  hits: {}  hit ratio: {:.1}%  fault ratio: {:.1}%",
        stats.total_references,
        stats.page_faults,
        stats.page_hits,
        stats.hit_ratio * 100.0,
        stats.fault_ratio * 100.0
    );
}

fn display_comparison(results: &[(Algorithm, SimulationStats)]) {
    println!(
        "{:<10} {:>8} {:>8} {:>11} {:>13}",
        "algorithm", "faults", "hits", "hit ratio", "fault ratio"
    );
    for (algorithm, stats) in results {
        println!(
            "{:<10} {:>8} {:>8} {:>10.1}% {:>12.1}%",
            algorithm.to_string(),
            stats.page_faults,
            stats.page_hits,
            stats.hit_ratio * 100.0,
            stats.fault_ratio * 100.0
        );
    }
}
