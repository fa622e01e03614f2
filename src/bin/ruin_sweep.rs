//! Gambler's ruin versus win probability.
//!
//! Sweeps the per-turn win probability p over 0.0..=1.0 and, at each grid
//! point, sets the closed-form ruin probability against N simulated games.
//! Defaults reproduce the classic setup: both players start with 50 units
//! and every point runs 10000 games.

use std::time::Instant;

use probsim::ruin::{self, RuinParams};
use probsim::series::ComparisonSeries;

struct Args {
    trials: u64,
    capital_a: u32,
    capital_b: u32,
    grid_steps: u32,
    seed: u64,
    output: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut trials = 10_000u64;
    let mut capital_a = 50u32;
    let mut capital_b = 50u32;
    let mut grid_steps = 10u32;
    let mut seed = 42u64;
    let mut output: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--trials" => {
                i += 1;
                if i < args.len() {
                    trials = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --trials value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--capital-a" => {
                i += 1;
                if i < args.len() {
                    capital_a = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --capital-a value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--capital-b" => {
                i += 1;
                if i < args.len() {
                    capital_b = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --capital-b value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--grid-steps" => {
                i += 1;
                if i < args.len() {
                    grid_steps = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --grid-steps value: {}", args[i]);
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
                    "Usage: ruin_sweep [--trials N] [--capital-a N] [--capital-b N] [--grid-steps N] [--seed S] [--output DIR]"
                );
                println!();
                println!("Options:");
                println!("  --trials N      Games simulated per grid point (default: 10000)");
                println!("  --capital-a N   Player A starting capital (default: 50)");
                println!("  --capital-b N   Player B starting capital (default: 50)");
                println!("  --grid-steps N  Sweep resolution: p = 0/N..N/N (default: 10)");
                println!("  --seed S        RNG seed (default: 42)");
                println!("  --output DIR    Write the paired series as JSON and CSV to DIR");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!(
                    "Usage: ruin_sweep [--trials N] [--capital-a N] [--capital-b N] [--grid-steps N] [--seed S] [--output DIR]"
                );
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if grid_steps == 0 {
        eprintln!("Error: --grid-steps must be positive");
        std::process::exit(1);
    }

    Args {
        trials,
        capital_a,
        capital_b,
        grid_steps,
        seed,
        output,
    }
}

fn main() {
    let _base = probsim::env_config::init_base_path();
    let args = parse_args();
    let num_threads = probsim::env_config::init_rayon_threads();

    println!(
        "Gambler's ruin sweep ({} games per point, {} threads)",
        args.trials, num_threads
    );
    println!(
        "  Capitals:  a = {}, b = {}",
        args.capital_a, args.capital_b
    );
    println!("  Seed:      {}", args.seed);
    println!();

    let mut series = ComparisonSeries::new("ruin probability vs win probability", "p");
    let start = Instant::now();

    println!(
        "{:>6} {:>12} {:>12} {:>10} {:>8}",
        "p", "theory", "empirical", "error", "z"
    );
    println!("{}", "─".repeat(52));
    for step in 0..=args.grid_steps {
        let p = step as f64 / args.grid_steps as f64;
        let params = RuinParams {
            p,
            a: args.capital_a,
            b: args.capital_b,
        };
        let theory = ruin::ruin_probability(p, args.capital_a, args.capital_b);
        let est = ruin::simulate_ruin(&params, args.trials, args.seed);
        let z = est.z_score(theory);
        series.push(p, theory, est.mean);
        println!(
            "{:>6.2} {:>12.6} {:>12.6} {:>10.6} {:>8.2}",
            p,
            theory,
            est.mean,
            (theory - est.mean).abs(),
            z
        );
        if z.abs() > 3.5 {
            eprintln!(
                "WARNING: p={:.2} deviates from theory by {:.1} standard errors",
                p,
                z.abs()
            );
        }
    }

    println!();
    println!("  Max abs error:  {:.6}", series.max_abs_error());
    println!(
        "  Elapsed:        {:.1} ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    if let Some(ref output_dir) = args.output {
        std::fs::create_dir_all(output_dir).expect("Failed to create output directory");
        let json_path = format!("{}/ruin_sweep.json", output_dir);
        let csv_path = format!("{}/ruin_sweep.csv", output_dir);
        series.save_json(&json_path);
        series.save_csv(&csv_path);
        println!("  Series:         {} and {}", json_path, csv_path);
    }
}
