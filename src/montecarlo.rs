//! Generic Monte Carlo trial runner.
//!
//! Every experiment in this crate reduces to the same pattern: run N
//! independent trials of a random procedure and average the outcomes.
//! A trial is a closure over its own `SmallRng`; trial `i` of a run with
//! seed `s` always gets `SmallRng::seed_from_u64(s.wrapping_add(i))`, so
//! results are reproducible and independent of thread count.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

/// Aggregated outcome of a batch of trials.
///
/// `std_dev` is the population standard deviation of the observed outcomes,
/// `std_error` the standard error of `mean` (`std_dev / sqrt(trials)`).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Estimate {
    pub trials: u64,
    pub mean: f64,
    pub std_dev: f64,
    pub std_error: f64,
}

impl Estimate {
    /// Sentinel for an empty batch: NaN mean, zero spread.
    pub fn empty() -> Self {
        Estimate {
            trials: 0,
            mean: f64::NAN,
            std_dev: 0.0,
            std_error: 0.0,
        }
    }

    /// Aggregate raw outcomes. Empty input yields [`Estimate::empty`].
    pub fn from_outcomes(outcomes: &[f64]) -> Self {
        let n = outcomes.len();
        if n == 0 {
            return Estimate::empty();
        }
        let mean = outcomes.iter().sum::<f64>() / n as f64;
        let variance = outcomes.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        let std_dev = variance.sqrt();
        Estimate {
            trials: n as u64,
            mean,
            std_dev,
            std_error: std_dev / (n as f64).sqrt(),
        }
    }

    /// How many standard errors `mean` sits from a reference value.
    /// Returns 0 when the standard error vanishes.
    pub fn z_score(&self, reference: f64) -> f64 {
        if self.std_error > 0.0 {
            (self.mean - reference) / self.std_error
        } else {
            0.0
        }
    }
}

/// Run `trials` trials sequentially, returning every outcome in trial order.
pub fn collect<F>(trials: u64, seed: u64, mut trial: F) -> Vec<f64>
where
    F: FnMut(&mut SmallRng) -> f64,
{
    let mut outcomes = Vec::with_capacity(trials as usize);
    for i in 0..trials {
        let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(i));
        outcomes.push(trial(&mut rng));
    }
    outcomes
}

/// Parallel twin of [`collect`]. Outcomes still land in trial order.
pub fn collect_par<F>(trials: u64, seed: u64, trial: F) -> Vec<f64>
where
    F: Fn(&mut SmallRng) -> f64 + Sync,
{
    (0..trials)
        .into_par_iter()
        .map(|i| {
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(i));
            trial(&mut rng)
        })
        .collect()
}

/// Run `trials` trials sequentially and aggregate the outcomes.
///
/// `trials == 0` returns the NaN-mean sentinel rather than dividing by zero.
pub fn estimate<F>(trials: u64, seed: u64, trial: F) -> Estimate
where
    F: FnMut(&mut SmallRng) -> f64,
{
    Estimate::from_outcomes(&collect(trials, seed, trial))
}

/// Parallel driver over the same contract as [`estimate`].
///
/// Outcomes are aggregated in trial order, so the result is bit-identical
/// to the sequential driver for the same seed.
pub fn estimate_par<F>(trials: u64, seed: u64, trial: F) -> Estimate
where
    F: Fn(&mut SmallRng) -> f64 + Sync,
{
    Estimate::from_outcomes(&collect_par(trials, seed, trial))
}

/// Estimate the probability of a boolean trial (success fraction).
pub fn estimate_proportion<F>(trials: u64, seed: u64, mut trial: F) -> Estimate
where
    F: FnMut(&mut SmallRng) -> bool,
{
    estimate(trials, seed, |rng| if trial(rng) { 1.0 } else { 0.0 })
}

/// Parallel variant of [`estimate_proportion`].
pub fn estimate_proportion_par<F>(trials: u64, seed: u64, trial: F) -> Estimate
where
    F: Fn(&mut SmallRng) -> bool + Sync,
{
    estimate_par(trials, seed, |rng| if trial(rng) { 1.0 } else { 0.0 })
}
