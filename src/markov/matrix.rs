//! Row-stochastic transition matrices and power-iteration convergence.

use rand::rngs::SmallRng;
use rand::Rng;
use serde::Serialize;

/// A square row-stochastic matrix: entries in [0, 1], every row summing to 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionMatrix {
    n: usize,
    rows: Vec<Vec<f64>>,
}

/// History of repeated self-multiplication until the maximum entry stabilizes.
///
/// `snapshots` holds the flattened matrix after each power, base matrix
/// first, converged power last. `steps` counts multiplications performed.
#[derive(Debug, Clone, Serialize)]
pub struct PowerConvergence {
    pub snapshots: Vec<Vec<f64>>,
    pub steps: usize,
    pub converged: bool,
}

impl TransitionMatrix {
    /// Validate and build. Returns `None` unless `rows` is square, non-empty,
    /// all entries lie in [0, 1], and each row sums to 1 within 1e-9.
    pub fn new(rows: Vec<Vec<f64>>) -> Option<Self> {
        let n = rows.len();
        if n == 0 {
            return None;
        }
        for row in &rows {
            if row.len() != n {
                return None;
            }
            if row.iter().any(|&p| !(0.0..=1.0).contains(&p)) {
                return None;
            }
            let sum: f64 = row.iter().sum();
            if (sum - 1.0).abs() > 1e-9 {
                return None;
            }
        }
        Some(TransitionMatrix { n, rows })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.rows[i]
    }

    pub fn entry(&self, i: usize, j: usize) -> f64 {
        self.rows[i][j]
    }

    /// Largest entry across the whole matrix.
    pub fn max_entry(&self) -> f64 {
        self.rows
            .iter()
            .flat_map(|row| row.iter().copied())
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Row-major flattening, used for convergence snapshots.
    pub fn flatten(&self) -> Vec<f64> {
        self.rows.iter().flat_map(|row| row.iter().copied()).collect()
    }

    /// Matrix product `self * other`. Both matrices must be the same size.
    pub fn multiply(&self, other: &TransitionMatrix) -> TransitionMatrix {
        assert_eq!(self.n, other.n, "matrix sizes differ");
        let n = self.n;
        let mut rows = vec![vec![0.0; n]; n];
        for i in 0..n {
            for k in 0..n {
                let a = self.rows[i][k];
                if a == 0.0 {
                    continue;
                }
                for j in 0..n {
                    rows[i][j] += a * other.rows[k][j];
                }
            }
        }
        TransitionMatrix { n, rows }
    }

    /// Repeatedly multiply by the base matrix (P, P^2, P^3, ...) until the
    /// maximum entry moves less than `tol` between consecutive powers, or
    /// `max_steps` multiplications have been performed.
    ///
    /// A regular stochastic matrix converges here in a handful of steps; the
    /// bound keeps periodic chains from spinning forever, reported through
    /// `converged`.
    pub fn power_until_stable(&self, tol: f64, max_steps: usize) -> PowerConvergence {
        let mut current = self.clone();
        let mut snapshots = vec![current.flatten()];
        let mut steps = 0;
        let mut converged = false;
        while steps < max_steps {
            let next = current.multiply(self);
            steps += 1;
            let delta = (next.max_entry() - current.max_entry()).abs();
            current = next;
            snapshots.push(current.flatten());
            if delta < tol {
                converged = true;
                break;
            }
        }
        PowerConvergence {
            snapshots,
            steps,
            converged,
        }
    }

    /// Stationary distribution as read off the converged power (all rows of
    /// P^n agree at convergence). `None` when `max_steps` ran out first.
    pub fn stationary_row(&self, tol: f64, max_steps: usize) -> Option<Vec<f64>> {
        let result = self.power_until_stable(tol, max_steps);
        if !result.converged {
            return None;
        }
        let flat = result.snapshots.last()?;
        Some(flat[..self.n].to_vec())
    }

    /// Sample the successor of `state` from its transition row.
    pub fn sample_next(&self, state: usize, rng: &mut SmallRng) -> usize {
        let u = rng.random::<f64>();
        let mut acc = 0.0;
        for (j, &p) in self.rows[state].iter().enumerate() {
            acc += p;
            if u < acc {
                return j;
            }
        }
        self.n - 1 // row sums to 1; only float rounding lands here
    }
}
