//! Power iteration on the classic three-state weather chain.
//!
//! Squares nothing, multiplies everything: computes P, P^2, P^3, ... and
//! watches the maximum entry settle. Once consecutive powers agree within
//! the tolerance, every row of P^n is the stationary distribution.

use probsim::markov::TransitionMatrix;
use probsim::series;

struct Args {
    tol: f64,
    max_steps: usize,
    output: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut tol = 1e-5f64;
    let mut max_steps = 500usize;
    let mut output: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--tol" => {
                i += 1;
                if i < args.len() {
                    tol = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --tol value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--max-steps" => {
                i += 1;
                if i < args.len() {
                    max_steps = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --max-steps value: {}", args[i]);
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
                println!("Usage: markov_power [--tol T] [--max-steps N] [--output DIR]");
                println!();
                println!("Options:");
                println!("  --tol T        Convergence tolerance on the max entry (default: 1e-5)");
                println!("  --max-steps N  Multiplication budget (default: 500)");
                println!("  --output DIR   Write the convergence snapshots as JSON to DIR");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Usage: markov_power [--tol T] [--max-steps N] [--output DIR]");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    Args {
        tol,
        max_steps,
        output,
    }
}

fn main() {
    let _base = probsim::env_config::init_base_path();
    let args = parse_args();

    let matrix = TransitionMatrix::new(vec![
        vec![0.64, 0.32, 0.04],
        vec![0.40, 0.50, 0.10],
        vec![0.25, 0.50, 0.25],
    ])
    .expect("chain rows must sum to 1");
    let n = matrix.size();

    println!("Power iteration on a {}x{} chain", n, n);
    println!("  Tolerance:  {:e}", args.tol);
    println!();

    let result = matrix.power_until_stable(args.tol, args.max_steps);

    println!("{:>6} {:>12} {:>12}", "power", "max entry", "delta");
    println!("{}", "─".repeat(32));
    for (k, window) in result.snapshots.windows(2).enumerate() {
        let prev = window[0].iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let next = window[1].iter().copied().fold(f64::NEG_INFINITY, f64::max);
        println!("{:>6} {:>12.8} {:>12.8}", k + 2, next, (next - prev).abs());
    }

    println!();
    if !result.converged {
        eprintln!(
            "WARNING: no convergence within {} multiplications; stationary row not trusted",
            args.max_steps
        );
    }
    println!(
        "  Converged:   {} after {} multiplications",
        result.converged, result.steps
    );

    let last = result.snapshots.last().unwrap();
    print!("  Stationary: ");
    for j in 0..n {
        print!(" {:.6}", last[j]);
    }
    println!();

    println!();
    println!("Final power, row by row:");
    for i in 0..n {
        print!(" ");
        for j in 0..n {
            print!(" {:.6}", last[i * n + j]);
        }
        println!();
    }

    if let Some(ref output_dir) = args.output {
        std::fs::create_dir_all(output_dir).expect("Failed to create output directory");
        let json_path = format!("{}/markov_power.json", output_dir);
        series::save_json(&result, &json_path);
        println!();
        println!("  Snapshots:  {}", json_path);
    }
}
