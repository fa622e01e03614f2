//! Population decline under reproduction policies.
//!
//! Starts a million people and watches ten generations under the one-child
//! policy, the until-first-son policy, or both side by side, with the
//! mean-field projection as the theory column. The punchline of the
//! exercise: stopping at the first boy does not tilt the sex ratio, since
//! every birth is still the same independent coin; it only changes how many
//! children a couple has.

use probsim::population::{self, Policy, PopulationParams};
use probsim::series::ComparisonSeries;

struct Args {
    population: u64,
    generations: u32,
    men_fraction: f64,
    fertility: f64,
    lawbreakers: f64,
    policies: Vec<Policy>,
    seed: u64,
    output: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut population = 1_000_000u64;
    let mut generations = 10u32;
    let mut men_fraction = 0.51f64;
    let mut fertility = 0.92f64;
    let mut lawbreakers = 0.0f64;
    let mut policies = vec![Policy::OneChild, Policy::OneSon];
    let mut seed = 42u64;
    let mut output: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--population" => {
                i += 1;
                if i < args.len() {
                    population = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --population value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--generations" => {
                i += 1;
                if i < args.len() {
                    generations = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --generations value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--men-fraction" => {
                i += 1;
                if i < args.len() {
                    men_fraction = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --men-fraction value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--fertility" => {
                i += 1;
                if i < args.len() {
                    fertility = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --fertility value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--lawbreakers" => {
                i += 1;
                if i < args.len() {
                    lawbreakers = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --lawbreakers value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--policy" => {
                i += 1;
                if i < args.len() {
                    policies = match args[i].as_str() {
                        "one-child" => vec![Policy::OneChild],
                        "one-son" => vec![Policy::OneSon],
                        "both" => vec![Policy::OneChild, Policy::OneSon],
                        other => {
                            eprintln!(
                                "Invalid --policy value: {} (expected one-child, one-son, or both)",
                                other
                            );
                            std::process::exit(1);
                        }
                    };
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
                    "Usage: population_sim [--population N] [--generations N] [--men-fraction P] [--fertility P] [--lawbreakers P] [--policy NAME] [--seed S] [--output DIR]"
                );
                println!();
                println!("Options:");
                println!("  --population N    Starting population (default: 1000000)");
                println!("  --generations N   Generations to simulate (default: 10)");
                println!("  --men-fraction P  Probability a newborn is a boy (default: 0.51)");
                println!("  --fertility P     Fraction of pairs that reproduce (default: 0.92)");
                println!("  --lawbreakers P   Fraction of couples having 6 children (default: 0)");
                println!("  --policy NAME     one-child, one-son, or both (default: both)");
                println!("  --seed S          RNG seed (default: 42)");
                println!("  --output DIR      Write per-policy series as JSON and CSV to DIR");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!(
                    "Usage: population_sim [--population N] [--generations N] [--men-fraction P] [--fertility P] [--lawbreakers P] [--policy NAME] [--seed S] [--output DIR]"
                );
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if !(0.0..=1.0).contains(&men_fraction) || men_fraction == 0.0 {
        eprintln!("Error: --men-fraction must be in (0, 1]");
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&fertility) || !(0.0..=1.0).contains(&lawbreakers) {
        eprintln!("Error: --fertility and --lawbreakers must be in [0, 1]");
        std::process::exit(1);
    }

    Args {
        population,
        generations,
        men_fraction,
        fertility,
        lawbreakers,
        policies,
        seed,
        output,
    }
}

fn policy_name(policy: Policy) -> &'static str {
    match policy {
        Policy::OneChild => "one-child",
        Policy::OneSon => "one-son",
    }
}

fn main() {
    let _base = probsim::env_config::init_base_path();
    let args = parse_args();

    println!(
        "Population run ({} people, {} generations)",
        args.population, args.generations
    );
    println!("  Boy probability:  {:.2}", args.men_fraction);
    println!("  Fertility:        {:.2}", args.fertility);
    if args.lawbreakers > 0.0 {
        println!("  Lawbreakers:      {:.2}", args.lawbreakers);
    }
    println!();

    let mut all_series = Vec::new();
    for &policy in &args.policies {
        let params = PopulationParams {
            policy,
            men_fraction: args.men_fraction,
            fertility: args.fertility,
            lawbreakers: args.lawbreakers,
        };
        let history = population::simulate_generations(
            args.population,
            args.generations,
            &params,
            args.seed,
        );
        let projected =
            population::project_generations(args.population, args.generations, &params);

        println!("Policy: {}", policy_name(policy));
        println!(
            "{:>4} {:>12} {:>12} {:>12} {:>12}",
            "gen", "projected", "simulated", "men", "women"
        );
        println!("{}", "─".repeat(58));
        let mut series = ComparisonSeries::new(
            &format!("population vs generation ({})", policy_name(policy)),
            "generation",
        );
        for (gen, (g, e)) in history.iter().zip(projected.iter()).enumerate() {
            series.push(gen as f64, *e, g.population as f64);
            println!(
                "{:>4} {:>12.0} {:>12} {:>12} {:>12}",
                gen, e, g.population, g.men, g.women
            );
        }
        let survivors = history.last().unwrap().population;
        println!(
            "  Remaining after {} generations: {} of {} ({:.2}%)",
            args.generations,
            survivors,
            args.population,
            100.0 * survivors as f64 / args.population as f64
        );
        println!();
        all_series.push((policy, series));
    }

    if let Some(ref output_dir) = args.output {
        std::fs::create_dir_all(output_dir).expect("Failed to create output directory");
        for (policy, series) in &all_series {
            let json_path = format!("{}/population_{}.json", output_dir, policy_name(*policy));
            let csv_path = format!("{}/population_{}.csv", output_dir, policy_name(*policy));
            series.save_json(&json_path);
            series.save_csv(&csv_path);
            println!("  Series:  {} and {}", json_path, csv_path);
        }
    }
}
