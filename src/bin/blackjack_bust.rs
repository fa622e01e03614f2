//! How many cards does it take to bust?
//!
//! Draws from a fresh 52-card deck (aces low) until the total passes 21 and
//! tallies the number of pulls. The support is 3 through 12: two cards top
//! out at 20, while twelve of the smallest cards are the slowest possible
//! climb past 21.

use std::time::Instant;

use probsim::blackjack;
use probsim::series;

struct Args {
    deals: u64,
    seed: u64,
    output: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut deals = 10_000u64;
    let mut seed = 42u64;
    let mut output: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--deals" => {
                i += 1;
                if i < args.len() {
                    deals = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --deals value: {}", args[i]);
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
                println!("Usage: blackjack_bust [--deals N] [--seed S] [--output DIR]");
                println!();
                println!("Options:");
                println!("  --deals N    Decks dealt to bust (default: 10000)");
                println!("  --seed S     RNG seed (default: 42)");
                println!("  --output DIR Write the pull distribution as JSON to DIR");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Usage: blackjack_bust [--deals N] [--seed S] [--output DIR]");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if deals == 0 {
        eprintln!("Error: --deals must be positive");
        std::process::exit(1);
    }

    Args {
        deals,
        seed,
        output,
    }
}

fn main() {
    let _base = probsim::env_config::init_base_path();
    let args = parse_args();
    let num_threads = probsim::env_config::init_rayon_threads();

    println!(
        "Cards to bust ({} deals, {} threads)",
        args.deals, num_threads
    );
    println!("  Seed:  {}", args.seed);
    println!();

    let start = Instant::now();
    let dist = blackjack::bust_distribution(args.deals, args.seed);

    println!(
        "{:>6} {:>10} {:>10} {:>12}",
        "pulls", "count", "fraction", "cumulative"
    );
    println!("{}", "─".repeat(42));
    for (pulls, &count) in dist.counts.iter().enumerate() {
        println!(
            "{:>6} {:>10} {:>10.4} {:>12.4}",
            pulls,
            count,
            count as f64 / args.deals as f64,
            dist.cumulative[pulls]
        );
    }

    let mean_pulls: f64 = dist
        .counts
        .iter()
        .enumerate()
        .map(|(pulls, &count)| pulls as f64 * count as f64)
        .sum::<f64>()
        / args.deals as f64;

    println!();
    println!("  Mean pulls to bust:  {:.3}", mean_pulls);
    println!(
        "  Elapsed:             {:.1} ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    if let Some(ref output_dir) = args.output {
        std::fs::create_dir_all(output_dir).expect("Failed to create output directory");
        let json_path = format!("{}/blackjack_bust.json", output_dir);
        series::save_json(&dist, &json_path);
        println!("  Distribution:        {}", json_path);
    }
}
