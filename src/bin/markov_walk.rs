//! One long walk on the classic chain, checked against the power iteration.
//!
//! The ergodic theorem in table form: visit fractions of a single trajectory
//! land on the same numbers the matrix powers produce.

use std::time::Instant;

use probsim::markov::{self, TransitionMatrix};
use probsim::series;

struct Args {
    start: usize,
    steps: u64,
    sample_every: u64,
    seed: u64,
    output: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut start = 2usize;
    let mut steps = 10_000u64;
    let mut sample_every = 10u64;
    let mut seed = 42u64;
    let mut output: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--start" => {
                i += 1;
                if i < args.len() {
                    start = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --start value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--steps" => {
                i += 1;
                if i < args.len() {
                    steps = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --steps value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--sample-every" => {
                i += 1;
                if i < args.len() {
                    sample_every = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --sample-every value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --seed value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--output" => {
                i += 1;
                if i < args.len() {
                    output = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                println!(
                    "Usage: markov_walk [--start S] [--steps N] [--sample-every N] [--seed S] [--output DIR]"
                );
                println!();
                println!("Options:");
                println!("  --start S         Starting state (default: 2)");
                println!("  --steps N         Walk length in transitions (default: 10000)");
                println!("  --sample-every N  Occupancy snapshot stride, 0 disables (default: 10)");
                println!("  --seed S          RNG seed (default: 42)");
                println!("  --output DIR      Write the occupancy trajectories as JSON to DIR");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!(
                    "Usage: markov_walk [--start S] [--steps N] [--sample-every N] [--seed S] [--output DIR]"
                );
                std::process::exit(1);
            }
        }
        i += 1;
    }

    Args {
        start,
        steps,
        sample_every,
        seed,
        output,
    }
}

fn main() {
    let _base = probsim::env_config::init_base_path();
    let args = parse_args();

    let matrix = TransitionMatrix::new(vec![
        vec![0.64, 0.32, 0.04],
        vec![0.40, 0.50, 0.10],
        vec![0.25, 0.50, 0.25],
    ])
    .expect("chain rows must sum to 1");

    if args.start >= matrix.size() {
        eprintln!(
            "Error: --start must name one of the {} states",
            matrix.size()
        );
        std::process::exit(1);
    }

    let stationary = matrix.stationary_row(1e-9, 10_000).unwrap_or_else(|| {
        eprintln!("Error: power iteration did not converge; no reference distribution");
        std::process::exit(1);
    });

    println!(
        "Random walk on a {}-state chain ({} steps from state {})",
        matrix.size(),
        args.steps,
        args.start
    );
    println!("  Seed:  {}", args.seed);
    println!();

    let start_time = Instant::now();
    let occupancy = markov::walk_occupancy(&matrix, args.start, args.steps, args.sample_every, args.seed);

    println!(
        "{:>6} {:>12} {:>12} {:>10}",
        "state", "stationary", "occupancy", "error"
    );
    println!("{}", "─".repeat(44));
    for s in 0..matrix.size() {
        let fraction = occupancy.final_fraction(s);
        println!(
            "{:>6} {:>12.6} {:>12.6} {:>10.6}",
            s,
            stationary[s],
            fraction,
            (stationary[s] - fraction).abs()
        );
    }

    println!();
    println!(
        "  Elapsed:  {:.1} ms",
        start_time.elapsed().as_secs_f64() * 1000.0
    );

    if let Some(ref output_dir) = args.output {
        std::fs::create_dir_all(output_dir).expect("Failed to create output directory");
        let json_path = format!("{}/markov_walk.json", output_dir);
        series::save_json(&occupancy, &json_path);
        println!("  Trajectories:  {}", json_path);
    }
}
