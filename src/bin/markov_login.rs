//! Logged-in-user counts as a birth-death chain.
//!
//! 100 users log in and out independently each tick; the logged-in count is
//! the observed chain. Under a fixed logout probability the count follows a
//! Binomial stationary law and the occupancy table is checked against it.
//! With --adaptive each user stays with probability 0.008k + 0.1 for current
//! count k, a crowd-following rule with no closed form.

use probsim::markov::{self, LoginChain, StayRegime};
use probsim::series;

struct Args {
    users: u32,
    login_p: f64,
    logout_p: f64,
    adaptive: bool,
    steps: u64,
    sample_every: u64,
    seed: u64,
    output: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut users = 100u32;
    let mut login_p = 0.2f64;
    let mut logout_p = 0.5f64;
    let mut adaptive = false;
    let mut steps = 10_000u64;
    let mut sample_every = 10u64;
    let mut seed = 42u64;
    let mut output: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--users" => {
                i += 1;
                if i < args.len() {
                    users = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --users value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--login" => {
                i += 1;
                if i < args.len() {
                    login_p = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --login value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--logout" => {
                i += 1;
                if i < args.len() {
                    logout_p = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --logout value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--adaptive" => {
                adaptive = true;
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
                    "Usage: markov_login [--users N] [--login P] [--logout P] [--adaptive] [--steps N] [--sample-every N] [--seed S] [--output DIR]"
                );
                println!();
                println!("Options:");
                println!("  --users N         Number of independent users (default: 100)");
                println!("  --login P         Per-step login probability (default: 0.2)");
                println!("  --logout P        Per-step logout probability (default: 0.5)");
                println!("  --adaptive        Stay probability 0.008k + 0.1 instead of fixed logout");
                println!("  --steps N         Chain steps (default: 10000)");
                println!("  --sample-every N  Occupancy snapshot stride, 0 disables (default: 10)");
                println!("  --seed S          RNG seed (default: 42)");
                println!("  --output DIR      Write occupancy trajectories as JSON to DIR");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!(
                    "Usage: markov_login [--users N] [--login P] [--logout P] [--adaptive] [--steps N] [--sample-every N] [--seed S] [--output DIR]"
                );
                std::process::exit(1);
            }
        }
        i += 1;
    }

    Args {
        users,
        login_p,
        logout_p,
        adaptive,
        steps,
        sample_every,
        seed,
        output,
    }
}

fn main() {
    let _base = probsim::env_config::init_base_path();
    let args = parse_args();

    let regime = if args.adaptive {
        StayRegime::Adaptive {
            slope: 0.008,
            intercept: 0.1,
        }
    } else {
        StayRegime::Fixed {
            logout_p: args.logout_p,
        }
    };
    let chain = LoginChain {
        users: args.users,
        login_p: args.login_p,
        regime,
    };

    let tracked: Vec<u32> = if args.adaptive {
        vec![20, 25, 30, 35]
    } else {
        vec![29, 31, 33, 35]
    };
    let tracked: Vec<u32> = tracked.into_iter().filter(|&k| k <= args.users).collect();

    if args.adaptive {
        println!(
            "Login chain, adaptive regime ({} users, {} steps)",
            args.users, args.steps
        );
        println!("  Login probability:  {:.2}", args.login_p);
        println!("  Stay probability:   0.008k + 0.1");
    } else {
        println!(
            "Login chain, fixed regime ({} users, {} steps)",
            args.users, args.steps
        );
        println!("  Login probability:   {:.2}", args.login_p);
        println!("  Logout probability:  {:.2}", args.logout_p);
    }
    println!();

    let occupancy = chain.occupancy_history(&tracked, args.steps, args.sample_every, args.seed);

    if args.adaptive {
        println!("{:>8} {:>12}", "count", "occupancy");
        println!("{}", "─".repeat(22));
        for &k in &tracked {
            println!("{:>8} {:>12.6}", k, occupancy.final_fraction(k));
        }
    } else {
        println!(
            "{:>8} {:>12} {:>12} {:>10}",
            "count", "binomial", "occupancy", "error"
        );
        println!("{}", "─".repeat(46));
        for &k in &tracked {
            let expected =
                markov::stationary_occupancy(args.users, args.login_p, args.logout_p, k);
            let fraction = occupancy.final_fraction(k);
            println!(
                "{:>8} {:>12.6} {:>12.6} {:>10.6}",
                k,
                expected,
                fraction,
                (expected - fraction).abs()
            );
        }
    }

    println!();
    println!("  Mean logged-in count:  {:.2}", occupancy.mean_count());
    if !args.adaptive {
        let pi = args.login_p / (args.login_p + args.logout_p);
        println!(
            "  Stationary mean:       {:.2}",
            args.users as f64 * pi
        );
    }

    if let Some(ref output_dir) = args.output {
        std::fs::create_dir_all(output_dir).expect("Failed to create output directory");
        let json_path = format!("{}/markov_login.json", output_dir);
        series::save_json(&occupancy, &json_path);
        println!("  Trajectories:          {}", json_path);
    }
}
