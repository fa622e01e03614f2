//! Occupancy fractions of a single long random walk on a chain.
//!
//! The empirical counterpart of the power iteration: walk the chain for many
//! steps, tally visits per state, and watch the visit fractions settle toward
//! the stationary distribution.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use super::matrix::TransitionMatrix;

/// One sampled point of an occupancy trajectory.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OccupancySample {
    pub step: u64,
    pub fraction: f64,
}

/// Visit tallies and per-state occupancy trajectories of one walk.
#[derive(Debug, Clone, Serialize)]
pub struct WalkOccupancy {
    pub start: usize,
    pub steps: u64,
    /// Total visits per state over the whole walk.
    pub visits: Vec<u64>,
    /// For each state, the visit fraction sampled every `sample_every` steps.
    pub history: Vec<Vec<OccupancySample>>,
}

impl WalkOccupancy {
    /// Final visit fraction of `state` over the whole walk.
    pub fn final_fraction(&self, state: usize) -> f64 {
        if self.steps == 0 {
            return f64::NAN;
        }
        self.visits[state] as f64 / self.steps as f64
    }
}

/// Walk `steps` transitions from `start`, tallying the state after each
/// step and snapshotting visit fractions every `sample_every` steps.
pub fn walk_occupancy(
    matrix: &TransitionMatrix,
    start: usize,
    steps: u64,
    sample_every: u64,
    seed: u64,
) -> WalkOccupancy {
    let n = matrix.size();
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut visits = vec![0u64; n];
    let mut history = vec![Vec::new(); n];
    let mut state = start;
    for step in 1..=steps {
        state = matrix.sample_next(state, &mut rng);
        visits[state] += 1;
        if sample_every > 0 && step % sample_every == 0 {
            for (s, samples) in history.iter_mut().enumerate() {
                samples.push(OccupancySample {
                    step,
                    fraction: visits[s] as f64 / step as f64,
                });
            }
        }
    }
    WalkOccupancy {
        start,
        steps,
        visits,
        history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic() -> TransitionMatrix {
        TransitionMatrix::new(vec![
            vec![0.64, 0.32, 0.04],
            vec![0.40, 0.50, 0.10],
            vec![0.25, 0.50, 0.25],
        ])
        .unwrap()
    }

    #[test]
    fn test_visits_sum_to_steps() {
        let occ = walk_occupancy(&classic(), 2, 5000, 10, 42);
        let total: u64 = occ.visits.iter().sum();
        assert_eq!(total, 5000);
    }

    #[test]
    fn test_fractions_sum_to_one_at_each_sample() {
        let occ = walk_occupancy(&classic(), 2, 1000, 100, 42);
        let samples_per_state = occ.history[0].len();
        assert_eq!(samples_per_state, 10);
        for k in 0..samples_per_state {
            let sum: f64 = occ.history.iter().map(|h| h[k].fraction).sum();
            assert!((sum - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_walk_deterministic_for_seed() {
        let a = walk_occupancy(&classic(), 2, 1000, 10, 9);
        let b = walk_occupancy(&classic(), 2, 1000, 10, 9);
        assert_eq!(a.visits, b.visits);
    }

    #[test]
    fn test_occupancy_approaches_stationary() {
        let m = classic();
        let pi = m.stationary_row(1e-9, 1000).unwrap();
        let occ = walk_occupancy(&m, 2, 100_000, 0, 42);
        for s in 0..m.size() {
            assert!(
                (occ.final_fraction(s) - pi[s]).abs() < 0.05,
                "state {}: walk {} vs stationary {}",
                s,
                occ.final_fraction(s),
                pi[s]
            );
        }
    }
}
