//! Win rate of the strictly-higher-die duel.
//!
//! A million rounds against the closed-form 15/36: the game looks like a
//! coin flip but ties lose, which is where the house edge hides.

use std::time::Instant;

use serde::Serialize;

use probsim::dice;
use probsim::series;

#[derive(Serialize)]
struct DuelReport {
    trials: u64,
    seed: u64,
    theory: f64,
    empirical: f64,
    std_error: f64,
    z: f64,
}

struct Args {
    trials: u64,
    payout: f64,
    seed: u64,
    output: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut trials = 1_000_000u64;
    let mut payout = 1.0f64;
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
            "--payout" => {
                i += 1;
                if i < args.len() {
                    payout = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --payout value: {}", args[i]);
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
                println!("Usage: dice_duel [--trials N] [--payout W] [--seed S] [--output DIR]");
                println!();
                println!("Options:");
                println!("  --trials N   Rounds to simulate (default: 1000000)");
                println!("  --payout W   Payout per won round at stake 1 (default: 1.0)");
                println!("  --seed S     RNG seed (default: 42)");
                println!("  --output DIR Write the report as JSON to DIR");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Usage: dice_duel [--trials N] [--payout W] [--seed S] [--output DIR]");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    Args {
        trials,
        payout,
        seed,
        output,
    }
}

fn main() {
    let _base = probsim::env_config::init_base_path();
    let args = parse_args();
    let num_threads = probsim::env_config::init_rayon_threads();

    println!(
        "Dice duel ({} rounds, {} threads)",
        args.trials, num_threads
    );
    println!("  Seed:  {}", args.seed);
    println!();

    let start = Instant::now();
    let est = dice::simulate_duels(args.trials, args.seed);
    let theory = dice::DUEL_WIN_PROBABILITY;
    let z = est.z_score(theory);

    println!("  Theoretical win rate:  {:.4} ({:.2}%)", theory, theory * 100.0);
    println!(
        "  Empirical win rate:    {:.4} ({:.2}%)",
        est.mean,
        est.mean * 100.0
    );
    println!("  Std error:             {:.6}", est.std_error);
    println!("  z-score:               {:.2}", z);
    if z.abs() > 3.5 {
        eprintln!(
            "WARNING: empirical rate deviates from 15/36 by {:.1} standard errors",
            z.abs()
        );
    }

    println!();
    println!(
        "  Expected profit per round at payout {:.1}:  {:+.4}",
        args.payout,
        dice::expected_round_profit(args.payout)
    );
    println!(
        "  Elapsed:  {:.1} ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    if let Some(ref output_dir) = args.output {
        std::fs::create_dir_all(output_dir).expect("Failed to create output directory");
        let report = DuelReport {
            trials: args.trials,
            seed: args.seed,
            theory,
            empirical: est.mean,
            std_error: est.std_error,
            z,
        };
        let json_path = format!("{}/dice_duel.json", output_dir);
        series::save_json(&report, &json_path);
        println!("  Report:   {}", json_path);
    }
}
