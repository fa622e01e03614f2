//! Population under a reproduction policy, simulated generation by
//! generation.
//!
//! Each generation pairs everyone off (`pairs = min(men, women)`), a
//! `fertility` fraction of pairs has children, and the policy fixes how
//! many: one child, or children until the first son. An optional fraction
//! of rule-breaking couples has six children regardless of policy. The
//! children are the entire next generation.
//!
//! The paired theory line is a mean-field projection: the same recursion on
//! expected counts, first-order only (expectations are pushed through `min`
//! and `floor`).

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// How many children a reproducing couple has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Exactly one child.
    OneChild,
    /// Children until the first boy; the boy is the last child.
    OneSon,
}

/// Demographic parameters shared by simulation and projection.
#[derive(Debug, Clone, Copy)]
pub struct PopulationParams {
    pub policy: Policy,
    /// Probability a newborn is a boy; also fixes the initial sex split.
    pub men_fraction: f64,
    /// Fraction of pairs that reproduce.
    pub fertility: f64,
    /// Fraction of reproducing couples that break policy and have 6 children.
    pub lawbreakers: f64,
}

/// One generation's composition.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Generation {
    pub population: u64,
    pub men: u64,
    pub women: u64,
}

fn initial_split(initial: u64, men_fraction: f64) -> Generation {
    let men = (initial as f64 * men_fraction).round() as u64;
    Generation {
        population: initial,
        men,
        women: initial - men,
    }
}

/// Simulate `generations` generations from `initial` people.
///
/// Returns `generations + 1` entries, the initial split first.
pub fn simulate_generations(
    initial: u64,
    generations: u32,
    params: &PopulationParams,
    seed: u64,
) -> Vec<Generation> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut history = vec![initial_split(initial, params.men_fraction)];
    let mut current = history[0];

    for _ in 0..generations {
        let pairs = current.men.min(current.women);
        let couples = (pairs as f64 * params.fertility).floor() as u64;
        let mut boys = 0u64;
        let mut girls = 0u64;
        for _ in 0..couples {
            if params.lawbreakers > 0.0 && rng.random::<f64>() < params.lawbreakers {
                for _ in 0..6 {
                    if rng.random::<f64>() < params.men_fraction {
                        boys += 1;
                    } else {
                        girls += 1;
                    }
                }
            } else {
                match params.policy {
                    Policy::OneChild => {
                        if rng.random::<f64>() < params.men_fraction {
                            boys += 1;
                        } else {
                            girls += 1;
                        }
                    }
                    Policy::OneSon => loop {
                        if rng.random::<f64>() < params.men_fraction {
                            boys += 1;
                            break;
                        }
                        girls += 1;
                    },
                }
            }
        }
        current = Generation {
            population: boys + girls,
            men: boys,
            women: girls,
        };
        history.push(current);
    }
    history
}

/// Mean-field projection of expected population sizes, same length and
/// layout as [`simulate_generations`].
pub fn project_generations(
    initial: u64,
    generations: u32,
    params: &PopulationParams,
) -> Vec<f64> {
    let start = initial_split(initial, params.men_fraction);
    let mut men = start.men as f64;
    let mut women = start.women as f64;
    let mut sizes = vec![start.population as f64];

    let mf = params.men_fraction;
    let q = params.lawbreakers;
    // expected boys/girls per reproducing couple under the policy
    let (policy_boys, policy_girls) = match params.policy {
        Policy::OneChild => (mf, 1.0 - mf),
        Policy::OneSon => (1.0, (1.0 - mf) / mf),
    };
    let boys_per_couple = q * 6.0 * mf + (1.0 - q) * policy_boys;
    let girls_per_couple = q * 6.0 * (1.0 - mf) + (1.0 - q) * policy_girls;

    for _ in 0..generations {
        let pairs = men.min(women);
        let couples = (pairs * params.fertility).floor();
        men = couples * boys_per_couple;
        women = couples * girls_per_couple;
        sizes.push(men + women);
    }
    sizes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(policy: Policy) -> PopulationParams {
        PopulationParams {
            policy,
            men_fraction: 0.51,
            fertility: 0.92,
            lawbreakers: 0.0,
        }
    }

    #[test]
    fn test_one_child_next_size_is_exact() {
        // 1000 people: 510 men, 490 women, 490 pairs, floor(490*0.92) = 450
        // couples, one child each: the next size is 450 for any seed
        let history = simulate_generations(1000, 1, &params(Policy::OneChild), 42);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].men, 510);
        assert_eq!(history[0].women, 490);
        assert_eq!(history[1].population, 450);
    }

    #[test]
    fn test_one_son_yields_one_boy_per_couple() {
        let history = simulate_generations(1000, 1, &params(Policy::OneSon), 42);
        // 450 reproducing couples, each stops at exactly one boy
        assert_eq!(history[1].men, 450);
        assert!(history[1].population >= 450);
    }

    #[test]
    fn test_population_shrinks_under_one_child() {
        let history = simulate_generations(100_000, 10, &params(Policy::OneChild), 42);
        for w in history.windows(2) {
            assert!(w[1].population < w[0].population);
        }
    }

    #[test]
    fn test_generation_components_consistent() {
        let history = simulate_generations(10_000, 5, &params(Policy::OneSon), 7);
        for g in &history {
            assert_eq!(g.population, g.men + g.women);
        }
    }

    #[test]
    fn test_deterministic_for_seed() {
        let a = simulate_generations(10_000, 5, &params(Policy::OneSon), 11);
        let b = simulate_generations(10_000, 5, &params(Policy::OneSon), 11);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.population, y.population);
        }
    }

    #[test]
    fn test_projection_matches_one_child() {
        // the first generation's size is deterministic; later ones only
        // wobble with the binomial sex split, well under 2% at this scale
        let p = params(Policy::OneChild);
        let sim = simulate_generations(1_000_000, 5, &p, 42);
        let proj = project_generations(1_000_000, 5, &p);
        assert!((sim[1].population as f64 - proj[1]).abs() < 1e-6);
        for (g, e) in sim.iter().zip(proj.iter()).skip(2) {
            let rel = (g.population as f64 - e).abs() / e;
            assert!(rel < 0.02, "simulated {} vs projected {}", g.population, e);
        }
    }

    #[test]
    fn test_projection_tracks_one_son_scale() {
        let p = params(Policy::OneSon);
        let sim = simulate_generations(1_000_000, 5, &p, 42);
        let proj = project_generations(1_000_000, 5, &p);
        let last_sim = sim.last().unwrap().population as f64;
        let last_proj = *proj.last().unwrap();
        let rel = (last_sim - last_proj).abs() / last_proj;
        assert!(rel < 0.05, "relative gap {} too large", rel);
    }

    #[test]
    fn test_lawbreakers_grow_population() {
        let mut p = params(Policy::OneChild);
        p.lawbreakers = 0.06;
        let with = simulate_generations(1_000_000, 5, &p, 42);
        let without = simulate_generations(1_000_000, 5, &params(Policy::OneChild), 42);
        assert!(with.last().unwrap().population > without.last().unwrap().population);
    }
}
