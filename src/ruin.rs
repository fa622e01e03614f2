//! Gambler's ruin: a random walk on integer capital between two absorbing
//! boundaries.
//!
//! Player A starts with `a` units, player B with `b`. Each turn A wins one
//! unit from B with probability `p`, otherwise loses one to B. The game ends
//! when either side reaches zero. The closed form for A's ruin probability
//! is checked against Monte Carlo runs of the walk itself.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

use crate::montecarlo::{self, Estimate};

/// Parameters of one ruin game: win probability and starting capitals.
#[derive(Debug, Clone, Copy)]
pub struct RuinParams {
    /// Probability that player A wins a single turn.
    pub p: f64,
    /// Player A's starting capital.
    pub a: u32,
    /// Player B's starting capital.
    pub b: u32,
}

/// Result of a single played-out game.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RuinOutcome {
    /// True when player A lost everything.
    pub ruined: bool,
    /// Turns until absorption.
    pub turns: u64,
}

/// Exact ruin probability for player A.
///
/// For the symmetric game (p = q) this is `1 - a / (a + b)`; otherwise
/// `((q/p)^a - (q/p)^(a+b)) / (1 - (q/p)^(a+b))` with q = 1 - p. Any
/// non-finite evaluation (the p = 0 boundary drives q/p to infinity) falls
/// back to 1.0, the correct limit.
pub fn ruin_probability(p: f64, a: u32, b: u32) -> f64 {
    let q = 1.0 - p;
    let total = (a + b) as f64;
    let prob = if (p - q).abs() < 1e-12 {
        1.0 - a as f64 / total
    } else {
        let r = q / p;
        let r_total = r.powi((a + b) as i32);
        (r.powi(a as i32) - r_total) / (1.0 - r_total)
    };
    if prob.is_finite() {
        prob
    } else {
        1.0
    }
}

/// Play one game to absorption.
///
/// A player starting at zero counts as ruined after zero turns.
pub fn play(params: &RuinParams, rng: &mut SmallRng) -> RuinOutcome {
    let mut a = params.a as i64;
    let mut b = params.b as i64;
    let mut turns = 0u64;
    while a > 0 && b > 0 {
        if rng.random::<f64>() < params.p {
            a += 1;
            b -= 1;
        } else {
            a -= 1;
            b += 1;
        }
        turns += 1;
    }
    RuinOutcome { ruined: a == 0, turns }
}

/// Capital of player A after every turn of a single game, starting at
/// `(0, a)`.
pub fn capital_path(params: &RuinParams, rng: &mut SmallRng) -> Vec<(u64, i64)> {
    let mut a = params.a as i64;
    let mut b = params.b as i64;
    let mut path = vec![(0, a)];
    let mut turn = 0u64;
    while a > 0 && b > 0 {
        if rng.random::<f64>() < params.p {
            a += 1;
            b -= 1;
        } else {
            a -= 1;
            b += 1;
        }
        turn += 1;
        path.push((turn, a));
    }
    path
}

/// Cumulative wins of player A after each of `games` games, starting at
/// `(0, 0)`. A win is the opponent's ruin.
pub fn wins_trajectory(params: &RuinParams, games: u32, rng: &mut SmallRng) -> Vec<(u32, u32)> {
    let mut wins = 0u32;
    let mut trajectory = vec![(0, 0)];
    for game in 1..=games {
        if !play(params, rng).ruined {
            wins += 1;
        }
        trajectory.push((game, wins));
    }
    trajectory
}

/// Monte Carlo ruin probability over `trials` independent games.
pub fn simulate_ruin(params: &RuinParams, trials: u64, seed: u64) -> Estimate {
    let params = *params;
    montecarlo::estimate_proportion_par(trials, seed, move |rng| play(&params, rng).ruined)
}

/// Longest game observed over `trials` independent games.
pub fn longest_game(params: &RuinParams, trials: u64, seed: u64) -> u64 {
    let params = *params;
    (0..trials)
        .into_par_iter()
        .map(|i| {
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(i));
            play(&params, &mut rng).turns
        })
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_formula() {
        // p = q = 0.5 must give 1 - a/(a+b)
        assert!((ruin_probability(0.5, 50, 50) - 0.5).abs() < 1e-12);
        assert!((ruin_probability(0.5, 25, 75) - 0.75).abs() < 1e-12);
        assert!((ruin_probability(0.5, 75, 25) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_boundary_capitals() {
        assert_eq!(ruin_probability(0.4, 0, 100), 1.0);
        assert_eq!(ruin_probability(0.4, 100, 0), 0.0);
        assert_eq!(ruin_probability(0.5, 0, 100), 1.0);
        assert_eq!(ruin_probability(0.5, 100, 0), 0.0);
    }

    #[test]
    fn test_boundary_probabilities() {
        // p = 0 hits the divide-by-zero fallback; p = 1 never loses
        assert_eq!(ruin_probability(0.0, 50, 50), 1.0);
        assert_eq!(ruin_probability(1.0, 50, 50), 0.0);
    }

    #[test]
    fn test_formula_monotone_in_p() {
        let mut prev = ruin_probability(0.1, 20, 20);
        for i in 2..10 {
            let p = i as f64 / 10.0;
            let cur = ruin_probability(p, 20, 20);
            assert!(cur <= prev + 1e-12, "not monotone at p={}", p);
            prev = cur;
        }
    }

    #[test]
    fn test_play_absorbs() {
        let params = RuinParams { p: 0.5, a: 5, b: 5 };
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..100 {
            let outcome = play(&params, &mut rng);
            assert!(outcome.turns >= 5); // needs at least min(a, b) turns
        }
    }

    #[test]
    fn test_play_zero_capital() {
        let mut rng = SmallRng::seed_from_u64(1);
        let outcome = play(&RuinParams { p: 0.5, a: 0, b: 10 }, &mut rng);
        assert!(outcome.ruined);
        assert_eq!(outcome.turns, 0);
    }

    #[test]
    fn test_play_certain_loss_length() {
        // p = 0 loses every turn: exactly a turns to ruin
        let mut rng = SmallRng::seed_from_u64(3);
        let outcome = play(&RuinParams { p: 0.0, a: 7, b: 3 }, &mut rng);
        assert!(outcome.ruined);
        assert_eq!(outcome.turns, 7);
    }

    #[test]
    fn test_capital_path_shape() {
        let params = RuinParams { p: 0.5, a: 10, b: 10 };
        let mut rng = SmallRng::seed_from_u64(5);
        let path = capital_path(&params, &mut rng);
        assert_eq!(path[0], (0, 10));
        let (last_turn, last_capital) = *path.last().unwrap();
        assert!(last_capital == 0 || last_capital == 20);
        assert_eq!(last_turn as usize, path.len() - 1);
        // each step moves capital by exactly one
        for w in path.windows(2) {
            assert_eq!((w[1].1 - w[0].1).abs(), 1);
        }
    }

    #[test]
    fn test_wins_trajectory_monotone() {
        let params = RuinParams { p: 0.7, a: 10, b: 10 };
        let mut rng = SmallRng::seed_from_u64(9);
        let traj = wins_trajectory(&params, 10, &mut rng);
        assert_eq!(traj.len(), 11);
        assert_eq!(traj[0], (0, 0));
        for w in traj.windows(2) {
            assert!(w[1].1 == w[0].1 || w[1].1 == w[0].1 + 1);
        }
    }

    #[test]
    fn test_simulation_matches_theory_symmetric() {
        // symmetric game with equal capitals: exactly 0.5 in theory
        let params = RuinParams { p: 0.5, a: 10, b: 10 };
        let est = simulate_ruin(&params, 10_000, 42);
        assert!(
            (est.mean - 0.5).abs() < 0.02,
            "estimate {} outside ±2% of 0.5",
            est.mean
        );
    }

    #[test]
    fn test_simulation_deterministic() {
        let params = RuinParams { p: 0.47, a: 20, b: 20 };
        let a = simulate_ruin(&params, 500, 7);
        let b = simulate_ruin(&params, 500, 7);
        assert_eq!(a.mean, b.mean);
    }

    #[test]
    fn test_longest_game_at_least_min_capital() {
        let params = RuinParams { p: 0.5, a: 10, b: 10 };
        assert!(longest_game(&params, 100, 11) >= 10);
    }
}
