//! Game length across the win-probability range.
//!
//! For each p on the grid, plays N games to ruin and reports the mean,
//! spread, and maximum number of turns. Games near p = 0.5 meander the
//! longest; the maximum column is the one worth staring at. A second
//! section zooms in on the fair game and prints the full length
//! distribution, which is heavily right-skewed.

use std::time::Instant;

use probsim::ruin::{self, RuinParams};
use probsim::{montecarlo, stats};

struct Args {
    trials: u64,
    capital_a: u32,
    capital_b: u32,
    grid_steps: u32,
    seed: u64,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut trials = 1_000u64;
    let mut capital_a = 50u32;
    let mut capital_b = 50u32;
    let mut grid_steps = 10u32;
    let mut seed = 42u64;

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
            "--help" | "-h" => {
                println!(
                    "Usage: ruin_length [--trials N] [--capital-a N] [--capital-b N] [--grid-steps N] [--seed S]"
                );
                println!();
                println!("Options:");
                println!("  --trials N      Games played per grid point (default: 1000)");
                println!("  --capital-a N   Player A starting capital (default: 50)");
                println!("  --capital-b N   Player B starting capital (default: 50)");
                println!("  --grid-steps N  Sweep resolution: p = 0/N..N/N (default: 10)");
                println!("  --seed S        RNG seed (default: 42)");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!(
                    "Usage: ruin_length [--trials N] [--capital-a N] [--capital-b N] [--grid-steps N] [--seed S]"
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
    }
}

fn main() {
    let _base = probsim::env_config::init_base_path();
    let args = parse_args();
    let num_threads = probsim::env_config::init_rayon_threads();

    println!(
        "Game length sweep ({} games per point, {} threads)",
        args.trials, num_threads
    );
    println!(
        "  Capitals:  a = {}, b = {}",
        args.capital_a, args.capital_b
    );
    println!();

    let start = Instant::now();

    println!(
        "{:>6} {:>12} {:>12} {:>10}",
        "p", "mean turns", "std dev", "longest"
    );
    println!("{}", "─".repeat(44));
    let mut overall_longest = 0u64;
    let mut longest_p = 0.0f64;
    for step in 0..=args.grid_steps {
        let p = step as f64 / args.grid_steps as f64;
        let params = RuinParams {
            p,
            a: args.capital_a,
            b: args.capital_b,
        };
        let lengths = montecarlo::estimate_par(args.trials, args.seed, move |rng| {
            ruin::play(&params, rng).turns as f64
        });
        let longest = ruin::longest_game(&params, args.trials, args.seed);
        if longest > overall_longest {
            overall_longest = longest;
            longest_p = p;
        }
        println!(
            "{:>6.2} {:>12.1} {:>12.1} {:>10}",
            p, lengths.mean, lengths.std_dev, longest
        );
    }

    println!();
    println!(
        "  Longest game:  {} turns at p = {:.2}",
        overall_longest, longest_p
    );

    let fair = RuinParams {
        p: 0.5,
        a: args.capital_a,
        b: args.capital_b,
    };
    let lengths = montecarlo::collect_par(args.trials, args.seed, move |rng| {
        ruin::play(&fair, rng).turns as f64
    });
    let summary = stats::summarize(&lengths);

    println!();
    println!("Fair game (p = 0.50) length distribution:");
    println!("  Median:  {:.0} turns", summary.median);
    println!("  Mean:    {:.1} turns", summary.mean);
    println!("  Range:   {:.0} to {:.0} turns", summary.min, summary.max);
    println!();
    println!("{:>16} {:>8}", "turns", "games");
    println!("{}", "─".repeat(25));
    for bin in stats::histogram(&lengths, 10) {
        println!("{:>7.0} -{:>7.0} {:>8}", bin.lo, bin.hi, bin.count);
    }

    println!();
    println!(
        "  Elapsed:       {:.1} ms",
        start.elapsed().as_secs_f64() * 1000.0
    );
}
