//! Overloaded single-server queue.
//!
//! Tasks arrive faster than the server clears them, so the waiting line
//! grows. Prints the head of the task log, then compares the queue seen by
//! each arrival to the idealized line (arrival_rate - service_rate) * t.

use probsim::queueing::{self, QueueParams};
use probsim::series::ComparisonSeries;

struct Args {
    arrival_rate: f64,
    service_rate: f64,
    max_time: f64,
    head: usize,
    seed: u64,
    output: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut arrival_rate = 1.0 / 15.0;
    let mut service_rate = 1.0 / 100.0;
    let mut max_time = 1000.0f64;
    let mut head = 20usize;
    let mut seed = 42u64;
    let mut output: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--arrival-rate" => {
                i += 1;
                if i < args.len() {
                    arrival_rate = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --arrival-rate value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--service-rate" => {
                i += 1;
                if i < args.len() {
                    service_rate = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --service-rate value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--max-time" => {
                i += 1;
                if i < args.len() {
                    max_time = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --max-time value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--head" => {
                i += 1;
                if i < args.len() {
                    head = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --head value: {}", args[i]);
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
                    "Usage: queue_sim [--arrival-rate R] [--service-rate R] [--max-time T] [--head N] [--seed S] [--output DIR]"
                );
                println!();
                println!("Options:");
                println!("  --arrival-rate R  Interarrival rate (default: 1/15)");
                println!("  --service-rate R  Service rate (default: 1/100)");
                println!("  --max-time T      Arrival-clock horizon (default: 1000)");
                println!("  --head N          Task-log rows to print (default: 20)");
                println!("  --seed S          RNG seed (default: 42)");
                println!("  --output DIR      Write the queue series as JSON and CSV to DIR");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!(
                    "Usage: queue_sim [--arrival-rate R] [--service-rate R] [--max-time T] [--head N] [--seed S] [--output DIR]"
                );
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if arrival_rate <= 0.0 || service_rate <= 0.0 {
        eprintln!("Error: rates must be positive");
        std::process::exit(1);
    }

    Args {
        arrival_rate,
        service_rate,
        max_time,
        head,
        seed,
        output,
    }
}

fn main() {
    let _base = probsim::env_config::init_base_path();
    let args = parse_args();

    let params = QueueParams {
        arrival_rate: args.arrival_rate,
        service_rate: args.service_rate,
        max_time: args.max_time,
    };

    println!("Single-server queue up to t = {}", args.max_time);
    println!("  Arrival rate:  {:.6}", args.arrival_rate);
    println!("  Service rate:  {:.6}", args.service_rate);
    println!();

    let records = queueing::simulate(&params, args.seed);
    let backlog = queueing::backlog_after(&records);

    println!(
        "{:>5} {:>10} {:>10} {:>10} {:>7} {:>8}",
        "task", "arrival", "service", "end", "queue", "backlog"
    );
    println!("{}", "─".repeat(55));
    for (i, r) in records.iter().take(args.head).enumerate() {
        println!(
            "{:>5} {:>10.3} {:>10.3} {:>10.3} {:>7} {:>8}",
            i, r.arrival, r.service, r.completion, r.queue_at_arrival, backlog[i]
        );
    }
    if records.len() > args.head {
        println!("  ... {} more tasks", records.len() - args.head);
    }

    let mut series = ComparisonSeries::new("queue length vs arrival time", "t");
    for r in &records {
        series.push(
            r.arrival,
            queueing::theoretical_backlog(&params, r.arrival),
            r.queue_at_arrival as f64,
        );
    }

    let last = records.last();
    let max_queue = records.iter().map(|r| r.queue_at_arrival).max().unwrap_or(0);
    let mean_queue = if records.is_empty() {
        f64::NAN
    } else {
        records.iter().map(|r| r.queue_at_arrival as f64).sum::<f64>() / records.len() as f64
    };

    println!();
    println!("  Tasks served:      {}", records.len());
    println!("  Max queue seen:    {}", max_queue);
    println!("  Mean queue seen:   {:.2}", mean_queue);
    if let Some(r) = last {
        println!(
            "  Idealized line at last arrival:  {:.1}",
            queueing::theoretical_backlog(&params, r.arrival)
        );
    }

    if let Some(ref output_dir) = args.output {
        std::fs::create_dir_all(output_dir).expect("Failed to create output directory");
        let json_path = format!("{}/queue_sim.json", output_dir);
        let csv_path = format!("{}/queue_sim.csv", output_dir);
        series.save_json(&json_path);
        series.save_csv(&csv_path);
        println!("  Series:            {} and {}", json_path, csv_path);
    }
}
