//! Blackjack strategy shootout.
//!
//! Plays every stand-at-N threshold from 8 to 20 plus the two-table basic
//! strategy, each over the same games (game i reuses seed base+i across
//! strategies), and ranks them by win rate. Ties go to the dealer, no
//! splits or doubles, so even the best column stays under one half.

use std::time::Instant;

use probsim::blackjack::{self, Strategy};
use probsim::series;

struct Args {
    games: u64,
    base_seed: u64,
    output: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut games = 50_000u64;
    let mut base_seed = 100u64;
    let mut output: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                if i < args.len() {
                    games = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --games value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--base-seed" => {
                i += 1;
                if i < args.len() {
                    base_seed = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --base-seed value: {}", args[i]);
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
                println!("Usage: blackjack_strategy [--games N] [--base-seed S] [--output DIR]");
                println!();
                println!("Options:");
                println!("  --games N      Games played per strategy (default: 50000)");
                println!("  --base-seed S  Seed of game 0; game i adds i (default: 100)");
                println!("  --output DIR   Write the comparison as JSON to DIR");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Usage: blackjack_strategy [--games N] [--base-seed S] [--output DIR]");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if games == 0 {
        eprintln!("Error: --games must be positive");
        std::process::exit(1);
    }

    Args {
        games,
        base_seed,
        output,
    }
}

fn main() {
    let _base = probsim::env_config::init_base_path();
    let args = parse_args();
    let num_threads = probsim::env_config::init_rayon_threads();

    let mut strategies: Vec<Strategy> = (8..=20).map(Strategy::Threshold).collect();
    strategies.push(Strategy::Basic);

    println!("═══════════════════════════════════════════════════════");
    println!("  Blackjack Strategy Shootout");
    println!("═══════════════════════════════════════════════════════");
    println!("  Games per strategy:  {}", args.games);
    println!("  Base seed:           {}", args.base_seed);
    println!("  Threads:             {}", num_threads);
    println!();

    let start = Instant::now();
    let comparison = blackjack::compare_strategies(&strategies, args.games, args.base_seed);
    let best_label = comparison.best().map(|r| r.label.clone());

    println!("{:>16} {:>10} {:>10}", "strategy", "wins", "win rate");
    println!("{}", "─".repeat(38));
    for result in &comparison.results {
        let marker = if Some(&result.label) == best_label.as_ref() {
            "  <- best"
        } else {
            ""
        };
        println!(
            "{:>16} {:>10} {:>10.4}{}",
            result.label, result.wins, result.win_rate, marker
        );
    }

    println!();
    if let Some(label) = best_label {
        println!("  Best strategy:  {}", label);
    }
    println!(
        "  Elapsed:        {:.1} ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    if let Some(ref output_dir) = args.output {
        std::fs::create_dir_all(output_dir).expect("Failed to create output directory");
        let json_path = format!("{}/blackjack_strategy.json", output_dir);
        series::save_json(&comparison, &json_path);
        println!("  Comparison:     {}", json_path);
    }
}
