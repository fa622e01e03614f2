//! Bankroll trajectory of a repeated dice duel.
//!
//! At even payout the player bleeds a sixth of a unit per round and the
//! trajectory crosses zero near six times the starting capital. At payout
//! 1.4 the game is fair and the same plot is a driftless wander.

use probsim::dice::{self, BankrollParams};
use probsim::series::ComparisonSeries;

struct Args {
    capital: f64,
    payout: f64,
    rounds: u64,
    sample_every: u64,
    seed: u64,
    output: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut capital = 5000.0f64;
    let mut payout = 1.0f64;
    let mut rounds = 100_000u64;
    let mut sample_every = 10u64;
    let mut seed = 42u64;
    let mut output: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--capital" => {
                i += 1;
                if i < args.len() {
                    capital = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --capital value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--payout" => {
                i += 1;
                if i < args.len() {
                    payout = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --payout value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--rounds" => {
                i += 1;
                if i < args.len() {
                    rounds = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --rounds value: {}", args[i]);
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
                    "Usage: dice_bankroll [--capital C] [--payout W] [--rounds N] [--sample-every N] [--seed S] [--output DIR]"
                );
                println!();
                println!("Options:");
                println!("  --capital C       Starting bankroll (default: 5000)");
                println!("  --payout W        Payout per won round at stake 1 (default: 1.0)");
                println!("  --rounds N        Round budget (default: 100000)");
                println!("  --sample-every N  Trajectory sampling stride, 0 disables (default: 10)");
                println!("  --seed S          RNG seed (default: 42)");
                println!("  --output DIR      Write trajectory vs drift line as JSON and CSV to DIR");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!(
                    "Usage: dice_bankroll [--capital C] [--payout W] [--rounds N] [--sample-every N] [--seed S] [--output DIR]"
                );
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if capital <= 0.0 {
        eprintln!("Error: --capital must be positive");
        std::process::exit(1);
    }

    Args {
        capital,
        payout,
        rounds,
        sample_every,
        seed,
        output,
    }
}

fn main() {
    let _base = probsim::env_config::init_base_path();
    let args = parse_args();

    let params = BankrollParams {
        capital: args.capital,
        payout: args.payout,
        rounds: args.rounds,
        sample_every: args.sample_every,
    };
    let drift = dice::expected_round_profit(args.payout);

    println!(
        "Bankroll run (capital {}, payout {:.1}, up to {} rounds)",
        args.capital, args.payout, args.rounds
    );
    println!("  Drift per round:  {:+.4}", drift);
    if drift < 0.0 {
        println!(
            "  Expected ruin:    around round {:.0}",
            -args.capital / drift
        );
    }
    println!();

    let path = dice::simulate_bankroll(&params, args.seed);

    let mut series = ComparisonSeries::new("bankroll vs round", "round");
    for &(round, capital) in &path.samples {
        // the drift line is only meaningful down to the ruin horizon
        let line = (args.capital + drift * round as f64).max(0.0);
        series.push(round as f64, line, capital);
    }

    match path.ruined_at {
        Some(round) => println!("  Ruined at round:   {}", round),
        None => println!("  Survived all {} rounds", path.rounds_played),
    }
    println!("  Final capital:     {:.1}", path.final_capital);
    println!(
        "  Profit per round:  {:+.4} (drift {:+.4})",
        path.profit_per_round(args.capital),
        drift
    );
    println!("  Samples kept:      {}", path.samples.len());

    if let Some(ref output_dir) = args.output {
        std::fs::create_dir_all(output_dir).expect("Failed to create output directory");
        let json_path = format!("{}/dice_bankroll.json", output_dir);
        let csv_path = format!("{}/dice_bankroll.csv", output_dir);
        series.save_json(&json_path);
        series.save_csv(&csv_path);
        println!("  Series:            {} and {}", json_path, csv_path);
    }
}
