//! Logged-in-users chain: `users` independent two-state (in/out) chains
//! observed through the count of logged-in users, a birth-death process on
//! `0..=users`.
//!
//! Two regimes for the logged-in side. `Fixed` logs out with a constant
//! probability; the count then settles to a Binomial(users, pi) stationary
//! law with `pi = login / (login + logout)`, exposed by
//! [`stationary_occupancy`]. `Adaptive` stays logged in with probability
//! `slope * k + intercept` for current count k, which has no closed form and
//! is studied by simulation only.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::walk::OccupancySample;

/// What a logged-in user does each step.
#[derive(Debug, Clone, Copy)]
pub enum StayRegime {
    /// Log out with this probability.
    Fixed { logout_p: f64 },
    /// Stay logged in with probability `slope * count + intercept`.
    Adaptive { slope: f64, intercept: f64 },
}

/// The full chain: user count, login probability, logged-in regime.
#[derive(Debug, Clone, Copy)]
pub struct LoginChain {
    pub users: u32,
    pub login_p: f64,
    pub regime: StayRegime,
}

/// Visit tallies of the logged-in count plus trajectories for tracked counts.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOccupancy {
    pub tracked: Vec<u32>,
    pub steps: u64,
    /// Visits per count value, index `0..=users`.
    pub visits: Vec<u64>,
    /// For each tracked count, visit fraction sampled over time.
    pub history: Vec<Vec<OccupancySample>>,
}

impl LoginOccupancy {
    /// Final visit fraction of count `k`.
    pub fn final_fraction(&self, k: u32) -> f64 {
        if self.steps == 0 {
            return f64::NAN;
        }
        self.visits[k as usize] as f64 / self.steps as f64
    }

    /// Time-average logged-in count.
    pub fn mean_count(&self) -> f64 {
        if self.steps == 0 {
            return f64::NAN;
        }
        let weighted: f64 = self
            .visits
            .iter()
            .enumerate()
            .map(|(k, &v)| k as f64 * v as f64)
            .sum();
        weighted / self.steps as f64
    }
}

impl LoginChain {
    fn logout_probability(&self, logged_in: u32) -> f64 {
        match self.regime {
            StayRegime::Fixed { logout_p } => logout_p,
            StayRegime::Adaptive { slope, intercept } => {
                1.0 - (slope * logged_in as f64 + intercept).clamp(0.0, 1.0)
            }
        }
    }

    /// Run the chain for `steps` steps from the all-logged-out state,
    /// tallying the count after each step and snapshotting the visit
    /// fractions of `tracked` counts every `sample_every` steps.
    ///
    /// The logout probability of the adaptive regime is evaluated once per
    /// step from the count entering that step, not per user.
    pub fn occupancy_history(
        &self,
        tracked: &[u32],
        steps: u64,
        sample_every: u64,
        seed: u64,
    ) -> LoginOccupancy {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut states = vec![false; self.users as usize];
        let mut visits = vec![0u64; self.users as usize + 1];
        let mut history = vec![Vec::new(); tracked.len()];
        let mut count = 0u32;

        for step in 1..=steps {
            let logout_p = self.logout_probability(count);
            for state in states.iter_mut() {
                if *state {
                    if rng.random::<f64>() < logout_p {
                        *state = false;
                    }
                } else if rng.random::<f64>() < self.login_p {
                    *state = true;
                }
            }
            count = states.iter().filter(|&&s| s).count() as u32;
            visits[count as usize] += 1;

            if sample_every > 0 && step % sample_every == 0 {
                for (t, samples) in tracked.iter().zip(history.iter_mut()) {
                    samples.push(OccupancySample {
                        step,
                        fraction: visits[*t as usize] as f64 / step as f64,
                    });
                }
            }
        }

        LoginOccupancy {
            tracked: tracked.to_vec(),
            steps,
            visits,
            history,
        }
    }
}

/// Stationary probability of seeing exactly `k` users logged in under the
/// fixed regime: Binomial(users, login / (login + logout)) at `k`.
pub fn stationary_occupancy(users: u32, login_p: f64, logout_p: f64, k: u32) -> f64 {
    if k > users {
        return 0.0;
    }
    let denom = login_p + logout_p;
    if denom <= 0.0 {
        return f64::NAN;
    }
    let pi = login_p / denom;
    if pi <= 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    if pi >= 1.0 {
        return if k == users { 1.0 } else { 0.0 };
    }
    let n = users as f64;
    let kf = k as f64;
    let ln_pmf = ln_choose(users, k) + kf * pi.ln() + (n - kf) * (1.0 - pi).ln();
    ln_pmf.exp()
}

fn ln_choose(n: u32, k: u32) -> f64 {
    ln_factorial(n) - ln_factorial(k) - ln_factorial(n - k)
}

fn ln_factorial(n: u32) -> f64 {
    (2..=n).map(|i| (i as f64).ln()).sum()
}
