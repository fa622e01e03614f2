//! Property-based tests for the probability models.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use probsim::blackjack::Hand;
use probsim::dice;
use probsim::markov::TransitionMatrix;
use probsim::montecarlo;
use probsim::queueing;
use probsim::ruin;

/// Strategy: a win probability strictly inside (0, 1).
fn win_probability() -> impl Strategy<Value = f64> {
    0.01..0.99f64
}

/// Strategy: a 3x3 row-stochastic matrix from normalized positive weights.
fn stochastic_matrix() -> impl Strategy<Value = TransitionMatrix> {
    prop::collection::vec(0.05..5.0f64, 9).prop_map(|w| {
        let rows: Vec<Vec<f64>> = w
            .chunks(3)
            .map(|row| {
                let sum: f64 = row.iter().sum();
                row.iter().map(|x| x / sum).collect()
            })
            .collect();
        TransitionMatrix::new(rows).unwrap()
    })
}

proptest! {
    // 1. The closed-form ruin probability is a probability
    #[test]
    fn ruin_probability_bounded(p in 0.0..=1.0f64, a in 0..=50u32, b in 0..=50u32) {
        prop_assume!(a + b > 0);
        let prob = ruin::ruin_probability(p, a, b);
        prop_assert!((0.0..=1.0).contains(&prob), "prob={prob} for p={p} a={a} b={b}");
    }

    // 2. Ruin probability never increases with the win probability
    #[test]
    fn ruin_probability_monotone_in_p(p in win_probability(), delta in 0.001..0.3f64) {
        let p2 = (p + delta).min(0.999);
        let lo = ruin::ruin_probability(p2, 20, 20);
        let hi = ruin::ruin_probability(p, 20, 20);
        prop_assert!(lo <= hi + 1e-9, "ruin({p2})={lo} > ruin({p})={hi}");
    }

    // 3. A game with zero capital on one side is already decided
    #[test]
    fn ruin_probability_boundaries(p in win_probability(), c in 1..=50u32) {
        prop_assert_eq!(ruin::ruin_probability(p, 0, c), 1.0);
        prop_assert_eq!(ruin::ruin_probability(p, c, 0), 0.0);
    }

    // 4. Matrix product of stochastic matrices stays stochastic
    #[test]
    fn multiply_preserves_row_sums(m in stochastic_matrix()) {
        let sq = m.multiply(&m);
        for i in 0..sq.size() {
            let sum: f64 = sq.row(i).iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-9, "row {i} sums to {sum}");
        }
    }

    // 5. Sampling a successor always lands on a state
    #[test]
    fn sample_next_in_range(m in stochastic_matrix(), state in 0..3usize, seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        for _ in 0..50 {
            prop_assert!(m.sample_next(state, &mut rng) < m.size());
        }
    }

    // 6. Dice stay on their faces
    #[test]
    fn die_rolls_in_range(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        for _ in 0..100 {
            let d = dice::roll_die(&mut rng);
            prop_assert!((1..=6).contains(&d));
        }
    }

    // 7. Proportion estimates are proportions
    #[test]
    fn proportion_estimate_bounded(trials in 1..2000u64, seed in any::<u64>()) {
        let est = montecarlo::estimate_proportion(trials, seed, |rng| rng.random::<f64>() < 0.3);
        prop_assert!((0.0..=1.0).contains(&est.mean));
        prop_assert_eq!(est.trials, trials);
    }

    // 8. Sequential and parallel drivers agree bit for bit
    #[test]
    fn drivers_agree(trials in 1..500u64, seed in any::<u64>()) {
        let seq = montecarlo::estimate(trials, seed, |rng| rng.random::<f64>());
        let par = montecarlo::estimate_par(trials, seed, |rng| rng.random::<f64>());
        prop_assert_eq!(seq.mean, par.mean);
        prop_assert_eq!(seq.std_dev, par.std_dev);
    }

    // 9. A busted hand holds no high ace
    #[test]
    fn busted_hands_are_hard(cards in prop::collection::vec(2..=11u8, 1..12)) {
        let mut hand = Hand::new();
        for card in cards {
            hand.hit(card);
        }
        if hand.total() > 21 {
            prop_assert!(!hand.is_soft(), "busted at {} yet soft", hand.total());
        }
    }

    // 10. Queue intervals are non-negative and already rounded
    #[test]
    fn intervals_rounded(rate in 0.01..1.0f64, seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        for _ in 0..100 {
            let x = queueing::sample_interval(rate, &mut rng);
            prop_assert!(x >= 0.0);
            prop_assert!(((x * 1000.0).round() - x * 1000.0).abs() < 1e-9);
        }
    }
}
