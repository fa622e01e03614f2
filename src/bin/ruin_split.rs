//! Gambler's ruin versus the split of a fixed bankroll.
//!
//! Holds the per-turn win probability fixed and moves the boundary between
//! the two starting capitals: a goes from 0 to the total, b covers the rest.
//! Shows how quickly a small edge compounds once the underdog has to climb
//! a longer ladder.

use std::time::Instant;

use probsim::ruin::{self, RuinParams};
use probsim::series::ComparisonSeries;

struct Args {
    trials: u64,
    p: f64,
    total: u32,
    stride: u32,
    seed: u64,
    output: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut trials = 5_000u64;
    let mut p = 0.47f64;
    let mut total = 100u32;
    let mut stride = 10u32;
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
            "--p" => {
                i += 1;
                if i < args.len() {
                    p = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --p value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--total" => {
                i += 1;
                if i < args.len() {
                    total = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --total value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--stride" => {
                i += 1;
                if i < args.len() {
                    stride = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --stride value: {}", args[i]);
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
                    "Usage: ruin_split [--trials N] [--p P] [--total N] [--stride N] [--seed S] [--output DIR]"
                );
                println!();
                println!("Options:");
                println!("  --trials N   Games simulated per split (default: 5000)");
                println!("  --p P        Per-turn win probability for player A (default: 0.47)");
                println!("  --total N    Combined bankroll split between the players (default: 100)");
                println!("  --stride N   Step between consecutive values of a (default: 10)");
                println!("  --seed S     RNG seed (default: 42)");
                println!("  --output DIR Write the paired series as JSON and CSV to DIR");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!(
                    "Usage: ruin_split [--trials N] [--p P] [--total N] [--stride N] [--seed S] [--output DIR]"
                );
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if stride == 0 || stride > total {
        eprintln!("Error: --stride must be in 1..=total");
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&p) {
        eprintln!("Error: --p must be in [0, 1]");
        std::process::exit(1);
    }

    Args {
        trials,
        p,
        total,
        stride,
        seed,
        output,
    }
}

fn main() {
    let _base = probsim::env_config::init_base_path();
    let args = parse_args();
    let num_threads = probsim::env_config::init_rayon_threads();

    println!(
        "Bankroll split sweep ({} games per split, {} threads)",
        args.trials, num_threads
    );
    println!("  Win probability:  {:.2}", args.p);
    println!("  Total bankroll:   {}", args.total);
    println!();

    let mut series = ComparisonSeries::new("ruin probability vs starting capital", "a");
    let start = Instant::now();

    println!(
        "{:>6} {:>6} {:>12} {:>12} {:>8}",
        "a", "b", "theory", "empirical", "z"
    );
    println!("{}", "─".repeat(48));
    let mut a = 0u32;
    while a <= args.total {
        let b = args.total - a;
        let params = RuinParams { p: args.p, a, b };
        let theory = ruin::ruin_probability(args.p, a, b);
        let est = ruin::simulate_ruin(&params, args.trials, args.seed);
        let z = est.z_score(theory);
        series.push(a as f64, theory, est.mean);
        println!(
            "{:>6} {:>6} {:>12.6} {:>12.6} {:>8.2}",
            a, b, theory, est.mean, z
        );
        if z.abs() > 3.5 {
            eprintln!(
                "WARNING: a={} deviates from theory by {:.1} standard errors",
                a,
                z.abs()
            );
        }
        a += args.stride;
    }

    println!();
    println!("  Max abs error:  {:.6}", series.max_abs_error());
    println!(
        "  Elapsed:        {:.1} ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    if let Some(ref output_dir) = args.output {
        std::fs::create_dir_all(output_dir).expect("Failed to create output directory");
        let json_path = format!("{}/ruin_split.json", output_dir);
        let csv_path = format!("{}/ruin_split.csv", output_dir);
        series.save_json(&json_path);
        series.save_csv(&csv_path);
        println!("  Series:         {} and {}", json_path, csv_path);
    }
}
