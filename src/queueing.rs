//! Single-server queue fed by exponential interarrival and service times.
//!
//! Intervals use the exercise's base-10 inverse transform,
//! `-log10(u) / rate`, rounded to 3 decimals; the effective mean interval is
//! therefore `1 / (rate * ln 10)`. Completions follow the single-server
//! recursion `end_i = max(arrival_i, end_{i-1}) + service_i`. With the
//! arrival rate above the service rate the waiting line grows without bound,
//! which the experiment compares against the straight line
//! `(arrival_rate - service_rate) * t`.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Arrival/service rates and the arrival-clock horizon.
#[derive(Debug, Clone, Copy)]
pub struct QueueParams {
    pub arrival_rate: f64,
    pub service_rate: f64,
    /// Tasks keep arriving while the arrival clock is at most this.
    pub max_time: f64,
}

/// One served task.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TaskRecord {
    pub arrival: f64,
    pub service: f64,
    pub completion: f64,
    /// Earlier tasks still unfinished when this one arrived.
    pub queue_at_arrival: u32,
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// Draw one interval: `-log10(u) / rate` for uniform `u` in (0, 1],
/// rounded to 3 decimals.
pub fn sample_interval(rate: f64, rng: &mut SmallRng) -> f64 {
    let u = 1.0 - rng.random::<f64>();
    round3(-u.log10() / rate)
}

/// Generate and serve tasks until the arrival clock passes `max_time`.
///
/// The final task may arrive past the horizon: the clock is checked before
/// each draw, not after.
pub fn simulate(params: &QueueParams, seed: u64) -> Vec<TaskRecord> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut records: Vec<TaskRecord> = Vec::new();
    let mut clock = 0.0;
    let mut prev_completion: f64 = 0.0;
    while clock <= params.max_time {
        let gap = sample_interval(params.arrival_rate, &mut rng);
        let service = sample_interval(params.service_rate, &mut rng);
        clock += gap;
        let arrival = clock;
        let completion = prev_completion.max(arrival) + service;
        let queue_at_arrival = records.iter().filter(|r| r.completion > arrival).count() as u32;
        records.push(TaskRecord {
            arrival,
            service,
            completion,
            queue_at_arrival,
        });
        prev_completion = completion;
    }
    records
}

/// Waiting-line size seen looking back from each completion: arrivals before
/// task `i` finished, minus the one in service and the one just served,
/// minus the `i` already completed. Clamped at zero.
pub fn backlog_after(records: &[TaskRecord]) -> Vec<u32> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let arrived = records.iter().filter(|x| x.arrival < r.completion).count();
            arrived.saturating_sub(i + 2) as u32
        })
        .collect()
}

/// The exercise's idealized backlog line at time `t`.
pub fn theoretical_backlog(params: &QueueParams, t: f64) -> f64 {
    (params.arrival_rate - params.service_rate) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> QueueParams {
        QueueParams {
            arrival_rate: 1.0 / 15.0,
            service_rate: 1.0 / 100.0,
            max_time: 500.0,
        }
    }

    #[test]
    fn test_sample_interval_positive_and_rounded() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..1000 {
            let x = sample_interval(1.0 / 15.0, &mut rng);
            assert!(x >= 0.0);
            assert!(((x * 1000.0).round() - x * 1000.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_arrivals_nondecreasing() {
        let records = simulate(&params(), 42);
        assert!(!records.is_empty());
        for w in records.windows(2) {
            assert!(w[1].arrival >= w[0].arrival);
        }
    }

    #[test]
    fn test_completions_ordered_and_after_arrival() {
        let records = simulate(&params(), 42);
        for r in &records {
            assert!(r.completion >= r.arrival);
        }
        for w in records.windows(2) {
            assert!(w[1].completion >= w[0].completion);
        }
    }

    #[test]
    fn test_queue_at_arrival_recounts() {
        let records = simulate(&params(), 7);
        for (i, r) in records.iter().enumerate() {
            let expected = records[..i].iter().filter(|x| x.completion > r.arrival).count();
            assert_eq!(r.queue_at_arrival as usize, expected, "task {}", i);
        }
    }

    #[test]
    fn test_overloaded_queue_builds_up() {
        // service is far slower than arrivals, so the line must grow
        let records = simulate(&params(), 42);
        let max_queue = records.iter().map(|r| r.queue_at_arrival).max().unwrap();
        assert!(max_queue >= 5, "queue never built up (max {})", max_queue);
    }

    #[test]
    fn test_backlog_nonnegative_and_bounded() {
        let records = simulate(&params(), 42);
        let backlog = backlog_after(&records);
        assert_eq!(backlog.len(), records.len());
        // at most n - i - 2 tasks can still be waiting behind task i
        for (i, &b) in backlog.iter().enumerate() {
            assert!((b as usize) < records.len() - i);
        }
    }

    #[test]
    fn test_simulation_deterministic() {
        let a = simulate(&params(), 11);
        let b = simulate(&params(), 11);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.arrival, y.arrival);
            assert_eq!(x.completion, y.completion);
        }
    }

    #[test]
    fn test_theoretical_backlog_line() {
        let p = params();
        assert_eq!(theoretical_backlog(&p, 0.0), 0.0);
        let slope = 1.0 / 15.0 - 1.0 / 100.0;
        assert!((theoretical_backlog(&p, 300.0) - slope * 300.0).abs() < 1e-12);
    }
}
