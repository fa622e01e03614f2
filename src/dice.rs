//! Dice duel: roll against the house, win on the strictly higher die.
//!
//! Of the 36 ordered outcomes, 15 are strict wins, so the round win
//! probability is 15/36 and the per-round profit at stake 1 and payout `w`
//! is `(15w - 21) / 36`: a sixth of a unit lost per round at even payout,
//! exactly fair at `w = 1.4`.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::montecarlo::{self, Estimate};

/// Probability that one fair die strictly beats another: 15/36.
pub const DUEL_WIN_PROBABILITY: f64 = 15.0 / 36.0;

/// Roll a fair six-sided die.
pub fn roll_die(rng: &mut SmallRng) -> u32 {
    rng.random_range(1..=6)
}

/// One duel round: your roll strictly higher wins; ties lose.
pub fn duel_round(rng: &mut SmallRng) -> bool {
    roll_die(rng) > roll_die(rng)
}

/// Expected profit per round at stake 1 and the given payout.
pub fn expected_round_profit(payout: f64) -> f64 {
    (15.0 * payout - 21.0) / 36.0
}

/// Monte Carlo estimate of the duel win probability.
pub fn simulate_duels(trials: u64, seed: u64) -> Estimate {
    montecarlo::estimate_proportion_par(trials, seed, |rng| duel_round(rng))
}

/// Bankroll experiment parameters: starting capital, payout per winning
/// round (loss is always 1), round budget, and sampling stride.
#[derive(Debug, Clone, Copy)]
pub struct BankrollParams {
    pub capital: f64,
    pub payout: f64,
    pub rounds: u64,
    pub sample_every: u64,
}

/// A played-out bankroll trajectory.
#[derive(Debug, Clone, Serialize)]
pub struct BankrollPath {
    /// (round, capital) samples, starting at (0, capital); the ruin round is
    /// always included when hit.
    pub samples: Vec<(u64, f64)>,
    pub final_capital: f64,
    pub rounds_played: u64,
    pub ruined_at: Option<u64>,
}

impl BankrollPath {
    /// Realized mean profit per round.
    pub fn profit_per_round(&self, initial_capital: f64) -> f64 {
        if self.rounds_played == 0 {
            return f64::NAN;
        }
        (self.final_capital - initial_capital) / self.rounds_played as f64
    }
}

/// Play rounds until the budget is spent or the bankroll hits zero.
pub fn bankroll_path(params: &BankrollParams, rng: &mut SmallRng) -> BankrollPath {
    let mut capital = params.capital;
    let mut samples = vec![(0, capital)];
    let mut ruined_at = None;
    let mut rounds_played = 0;
    for round in 1..=params.rounds {
        capital += if duel_round(rng) { params.payout } else { -1.0 };
        rounds_played = round;
        if capital <= 0.0 {
            ruined_at = Some(round);
            samples.push((round, capital));
            break;
        }
        if params.sample_every > 0 && round % params.sample_every == 0 {
            samples.push((round, capital));
        }
    }
    BankrollPath {
        samples,
        final_capital: capital,
        rounds_played,
        ruined_at,
    }
}

/// Bankroll path from a fresh seeded generator.
pub fn simulate_bankroll(params: &BankrollParams, seed: u64) -> BankrollPath {
    let mut rng = SmallRng::seed_from_u64(seed);
    bankroll_path(params, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_probability_constant() {
        assert!((DUEL_WIN_PROBABILITY - 15.0 / 36.0).abs() < 1e-15);
    }

    #[test]
    fn test_expected_profit_exact() {
        assert!((expected_round_profit(1.0) + 1.0 / 6.0).abs() < 1e-15);
        assert!(expected_round_profit(1.4).abs() < 1e-12);
    }

    #[test]
    fn test_rolls_in_range() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..1000 {
            let d = roll_die(&mut rng);
            assert!((1..=6).contains(&d));
        }
    }

    #[test]
    fn test_duel_estimate_near_theory() {
        let est = simulate_duels(20_000, 42);
        assert!(
            (est.mean - DUEL_WIN_PROBABILITY).abs() < 0.015,
            "estimate {} vs theory {}",
            est.mean,
            DUEL_WIN_PROBABILITY
        );
    }

    #[test]
    fn test_bankroll_even_payout_ruins() {
        // EV is -1/6 per round: starting at 60, ruin is expected near round
        // 360 and the 100k budget makes survival essentially impossible
        let params = BankrollParams {
            capital: 60.0,
            payout: 1.0,
            rounds: 100_000,
            sample_every: 10,
        };
        let path = simulate_bankroll(&params, 42);
        assert!(path.ruined_at.is_some());
        assert!(path.final_capital <= 0.0);
        let (last_round, last_capital) = *path.samples.last().unwrap();
        assert_eq!(Some(last_round), path.ruined_at);
        assert_eq!(last_capital, path.final_capital);
    }

    #[test]
    fn test_bankroll_sampling_stride() {
        let params = BankrollParams {
            capital: 1000.0,
            payout: 1.4,
            rounds: 100,
            sample_every: 10,
        };
        let path = simulate_bankroll(&params, 7);
        assert_eq!(path.samples[0], (0, 1000.0));
        // no ruin at this scale; samples at 0, 10, ..., 100
        assert!(path.ruined_at.is_none());
        assert_eq!(path.samples.len(), 11);
        assert_eq!(path.rounds_played, 100);
    }

    #[test]
    fn test_bankroll_deterministic() {
        let params = BankrollParams {
            capital: 500.0,
            payout: 1.4,
            rounds: 10_000,
            sample_every: 10,
        };
        let a = simulate_bankroll(&params, 9);
        let b = simulate_bankroll(&params, 9);
        assert_eq!(a.final_capital, b.final_capital);
        assert_eq!(a.samples, b.samples);
    }

    #[test]
    fn test_profit_per_round_tracks_ev() {
        let params = BankrollParams {
            capital: 100_000.0,
            payout: 1.0,
            rounds: 50_000,
            sample_every: 0,
        };
        let path = simulate_bankroll(&params, 42);
        // per-round sd is ~1, so the mean over 50k rounds sits within
        // a few times 1/sqrt(50k) ~ 0.0045 of -1/6
        assert!(
            (path.profit_per_round(params.capital) + 1.0 / 6.0).abs() < 0.02,
            "profit per round {}",
            path.profit_per_round(params.capital)
        );
    }
}
