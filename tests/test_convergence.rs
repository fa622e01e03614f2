//! Empirical estimates against their closed-form references at fixed seeds.
//!
//! The bounds are wide multiples of the standard error of each estimate, so
//! a failure means a real regression rather than sampling noise.

use probsim::blackjack::{self, Strategy};
use probsim::dice;
use probsim::markov::{self, LoginChain, StayRegime, TransitionMatrix};
use probsim::montecarlo;
use probsim::population::{self, Policy, PopulationParams};
use probsim::ruin::{self, RuinParams};

fn weather_chain() -> TransitionMatrix {
    TransitionMatrix::new(vec![
        vec![0.64, 0.32, 0.04],
        vec![0.40, 0.50, 0.10],
        vec![0.25, 0.50, 0.25],
    ])
    .unwrap()
}

#[test]
fn test_ruin_estimates_track_theory() {
    // 10000 games per point keeps the standard error at or under 0.005,
    // so the 0.02 band is at least four standard errors wide
    for &p in &[0.2, 0.35, 0.5, 0.65, 0.8] {
        let params = RuinParams { p, a: 10, b: 10 };
        let theory = ruin::ruin_probability(p, 10, 10);
        let est = ruin::simulate_ruin(&params, 10_000, 42);
        assert!(
            (est.mean - theory).abs() < 0.02,
            "p={}: estimate {} vs theory {}",
            p,
            est.mean,
            theory
        );
    }
}

#[test]
fn test_symmetric_game_is_exactly_half() {
    for &a in &[1u32, 10, 50, 100] {
        assert_eq!(ruin::ruin_probability(0.5, a, a), 0.5);
    }
}

#[test]
fn test_power_iteration_converges_on_weather_chain() {
    let result = weather_chain().power_until_stable(1e-9, 1000);
    assert!(result.converged);
    assert!(result.steps < 200, "took {} multiplications", result.steps);

    let pi = weather_chain().stationary_row(1e-9, 1000).unwrap();
    let expected = [0.510204, 0.408163, 0.081633];
    for (i, (&got, &want)) in pi.iter().zip(expected.iter()).enumerate() {
        assert!(
            (got - want).abs() < 1e-3,
            "state {}: stationary {} vs {}",
            i,
            got,
            want
        );
    }
}

#[test]
fn test_walk_agrees_with_power_iteration() {
    let m = weather_chain();
    let pi = m.stationary_row(1e-9, 1000).unwrap();
    let occupancy = markov::walk_occupancy(&m, 0, 200_000, 0, 42);
    for s in 0..m.size() {
        assert!(
            (occupancy.final_fraction(s) - pi[s]).abs() < 0.02,
            "state {}: occupancy {} vs stationary {}",
            s,
            occupancy.final_fraction(s),
            pi[s]
        );
    }
}

#[test]
fn test_login_counts_near_binomial_mean() {
    let chain = LoginChain {
        users: 100,
        login_p: 0.2,
        regime: StayRegime::Fixed { logout_p: 0.5 },
    };
    let occupancy = chain.occupancy_history(&[], 100_000, 0, 42);
    let expected = 100.0 * 0.2 / 0.7;
    assert!(
        (occupancy.mean_count() - expected).abs() < 0.5,
        "mean count {} vs stationary mean {}",
        occupancy.mean_count(),
        expected
    );

    // the modal counts carry stationary mass too
    for k in [27u32, 29, 31] {
        let pmf = markov::stationary_occupancy(100, 0.2, 0.5, k);
        assert!(
            (occupancy.final_fraction(k) - pmf).abs() < 0.015,
            "count {}: occupancy {} vs pmf {}",
            k,
            occupancy.final_fraction(k),
            pmf
        );
    }
}

#[test]
fn test_duel_rate_within_two_percent() {
    let est = dice::simulate_duels(10_000, 42);
    assert!(
        (est.mean - dice::DUEL_WIN_PROBABILITY).abs() < 0.02,
        "estimate {} vs theory {}",
        est.mean,
        dice::DUEL_WIN_PROBABILITY
    );
}

#[test]
#[ignore] // a million rounds; run with --ignored
fn test_duel_rate_tight_at_a_million() {
    let est = dice::simulate_duels(1_000_000, 42);
    assert!(
        (est.mean - dice::DUEL_WIN_PROBABILITY).abs() < 0.002,
        "estimate {} vs theory {}",
        est.mean,
        dice::DUEL_WIN_PROBABILITY
    );
}

#[test]
fn test_bankroll_ruin_near_drift_horizon() {
    // drift -1/6 per round puts ruin of 5000 around round 30000, with a
    // standard deviation near 1000
    let params = dice::BankrollParams {
        capital: 5000.0,
        payout: 1.0,
        rounds: 100_000,
        sample_every: 0,
    };
    let path = dice::simulate_bankroll(&params, 42);
    let ruined_at = path.ruined_at.expect("the bankroll must hit zero");
    assert!(
        (20_000..40_000).contains(&ruined_at),
        "ruined at {}",
        ruined_at
    );
}

#[test]
fn test_threshold_ladder_orders_strategies() {
    let strategies = [
        Strategy::Threshold(11),
        Strategy::Threshold(17),
        Strategy::Threshold(21),
        Strategy::Basic,
    ];
    let comparison = blackjack::compare_strategies(&strategies, 20_000, 100);
    let rate = |i: usize| comparison.results[i].win_rate;

    // chasing 21 busts almost every hand; any sane strategy clears it by far
    assert!(rate(1) > rate(2) + 0.1, "17: {} vs 21: {}", rate(1), rate(2));
    assert!(rate(3) > rate(2) + 0.1, "basic: {} vs 21: {}", rate(3), rate(2));
    // ties lose, so even the best column stays below one half
    for i in 0..strategies.len() {
        assert!(rate(i) < 0.5, "{}: rate {}", comparison.results[i].label, rate(i));
    }
    // standing pat still wins every dealer bust
    assert!(rate(0) > 0.2, "stand at 11 rate {}", rate(0));
}

#[test]
fn test_one_son_policy_keeps_newborn_ratio() {
    let params = PopulationParams {
        policy: Policy::OneSon,
        men_fraction: 0.51,
        fertility: 0.92,
        lawbreakers: 0.0,
    };
    let history = population::simulate_generations(1_000_000, 3, &params, 42);
    // stopping at the first boy leaves every birth a 0.51 coin, so the
    // newborn generations keep the same boy fraction
    for g in history.iter().skip(1) {
        let ratio = g.men as f64 / g.population as f64;
        assert!(
            (ratio - 0.51).abs() < 0.005,
            "boy fraction {} in a generation of {}",
            ratio,
            g.population
        );
    }
}

#[test]
fn test_both_policies_shrink() {
    for policy in [Policy::OneChild, Policy::OneSon] {
        let params = PopulationParams {
            policy,
            men_fraction: 0.51,
            fertility: 0.92,
            lawbreakers: 0.0,
        };
        let history = population::simulate_generations(100_000, 6, &params, 42);
        for w in history.windows(2) {
            assert!(
                w[1].population < w[0].population,
                "{:?} grew from {} to {}",
                policy,
                w[0].population,
                w[1].population
            );
        }
    }
}

#[test]
fn test_drivers_agree_on_ruin_probability() {
    let params = RuinParams { p: 0.5, a: 5, b: 5 };
    let seq = montecarlo::estimate_proportion(2_000, 42, |rng| ruin::play(&params, rng).ruined);
    let par = ruin::simulate_ruin(&params, 2_000, 42);
    assert_eq!(seq.mean, par.mean);
    assert_eq!(seq.std_error, par.std_error);
}
