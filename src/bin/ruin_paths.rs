//! Individual game trajectories.
//!
//! Two views of the same random walk. The first counts player A's wins over
//! a short series of games at favorable, fair, and unfavorable odds. The
//! second follows the capital of a single game turn by turn until one side
//! is ruined.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use probsim::ruin::{self, RuinParams};
use probsim::series;

#[derive(Serialize)]
struct WinsExport {
    p: f64,
    capital: u32,
    trajectory: Vec<(u32, u32)>,
}

#[derive(Serialize)]
struct CapitalExport {
    p: f64,
    capital: u32,
    path: Vec<(u64, i64)>,
}

struct Args {
    games: u32,
    wins_capital: u32,
    path_capital: u32,
    seed: u64,
    output: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut games = 10u32;
    let mut wins_capital = 50u32;
    let mut path_capital = 20u32;
    let mut seed = 42u64;
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
            "--wins-capital" => {
                i += 1;
                if i < args.len() {
                    wins_capital = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --wins-capital value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--path-capital" => {
                i += 1;
                if i < args.len() {
                    path_capital = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --path-capital value: {}", args[i]);
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
                    "Usage: ruin_paths [--games N] [--wins-capital N] [--path-capital N] [--seed S] [--output DIR]"
                );
                println!();
                println!("Options:");
                println!("  --games N         Games in each win-count series (default: 10)");
                println!("  --wins-capital N  Starting capital for the win-count view (default: 50)");
                println!("  --path-capital N  Starting capital for the capital view (default: 20)");
                println!("  --seed S          RNG seed (default: 42)");
                println!("  --output DIR      Write both trajectory sets as JSON to DIR");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!(
                    "Usage: ruin_paths [--games N] [--wins-capital N] [--path-capital N] [--seed S] [--output DIR]"
                );
                std::process::exit(1);
            }
        }
        i += 1;
    }

    Args {
        games,
        wins_capital,
        path_capital,
        seed,
        output,
    }
}

fn main() {
    let _base = probsim::env_config::init_base_path();
    let args = parse_args();

    println!("Win counts over {} games per odds setting", args.games);
    println!("  Capitals:  a = b = {}", args.wins_capital);
    println!();

    let mut wins_exports = Vec::new();
    println!(
        "{:>6} {:>8} {:>12} {:>12}",
        "p", "games", "wins", "expected"
    );
    println!("{}", "─".repeat(42));
    for &p in &[0.3f64, 0.5, 0.7] {
        let params = RuinParams {
            p,
            a: args.wins_capital,
            b: args.wins_capital,
        };
        let mut rng = SmallRng::seed_from_u64(args.seed);
        let trajectory = ruin::wins_trajectory(&params, args.games, &mut rng);
        let (games, wins) = *trajectory.last().unwrap();
        let expected =
            args.games as f64 * (1.0 - ruin::ruin_probability(p, params.a, params.b));
        println!("{:>6.2} {:>8} {:>12} {:>12.1}", p, games, wins, expected);
        wins_exports.push(WinsExport {
            p,
            capital: args.wins_capital,
            trajectory,
        });
    }

    println!();
    println!("Capital trajectories, one game per odds setting");
    println!("  Capitals:  a = b = {}", args.path_capital);
    println!();

    let mut capital_exports = Vec::new();
    println!("{:>6} {:>10} {:>14}", "p", "turns", "final capital");
    println!("{}", "─".repeat(32));
    for &p in &[0.25f64, 0.5, 0.75] {
        let params = RuinParams {
            p,
            a: args.path_capital,
            b: args.path_capital,
        };
        let mut rng = SmallRng::seed_from_u64(args.seed);
        let path = ruin::capital_path(&params, &mut rng);
        let (turns, capital) = *path.last().unwrap();
        println!("{:>6.2} {:>10} {:>14}", p, turns, capital);
        capital_exports.push(CapitalExport {
            p,
            capital: args.path_capital,
            path,
        });
    }

    if let Some(ref output_dir) = args.output {
        std::fs::create_dir_all(output_dir).expect("Failed to create output directory");
        let wins_path = format!("{}/ruin_wins_trajectories.json", output_dir);
        let capital_json = format!("{}/ruin_capital_paths.json", output_dir);
        series::save_json(&wins_exports, &wins_path);
        series::save_json(&capital_exports, &capital_json);
        println!();
        println!("  Trajectories:  {} and {}", wins_path, capital_json);
    }
}
