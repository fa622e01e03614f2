//! How many cards does it take to bust? Draw from a fresh deck (ace = 1)
//! until the running total passes 21 and count the pulls.
//!
//! Two cards can reach at most 20, so busting takes at least 3 pulls; by
//! the twelfth pull the smallest possible total is already past 21, so the
//! support is 3..=12.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use super::deck::Deck;
use crate::stats;

/// Draw until the total exceeds 21; returns the number of cards drawn.
pub fn bust_length(rng: &mut SmallRng) -> u32 {
    let mut deck = Deck::fresh(1);
    let mut total = 0u32;
    let mut pulls = 0u32;
    while total <= 21 {
        total += deck.draw(rng) as u32;
        pulls += 1;
    }
    pulls
}

/// Pull-count distribution over many deals.
#[derive(Debug, Clone, Serialize)]
pub struct BustDistribution {
    pub deals: u64,
    /// Deals that busted on exactly `k` pulls, indexed by `k` from zero.
    pub counts: Vec<u64>,
    /// Fraction of deals busted within `k` pulls.
    pub cumulative: Vec<f64>,
}

/// Run `deals` independent deals and tally the bust lengths.
pub fn bust_distribution(deals: u64, seed: u64) -> BustDistribution {
    if deals == 0 {
        return BustDistribution {
            deals: 0,
            counts: Vec::new(),
            cumulative: Vec::new(),
        };
    }
    let pulls: Vec<u32> = (0..deals)
        .into_par_iter()
        .map(|i| {
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(i));
            bust_length(&mut rng)
        })
        .collect();
    let counts = stats::tally(&pulls);
    let mut cumulative = Vec::with_capacity(counts.len());
    let mut seen = 0u64;
    for &c in &counts {
        seen += c;
        cumulative.push(seen as f64 / deals as f64);
    }
    BustDistribution {
        deals,
        counts,
        cumulative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bust_length_support() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..2000 {
            let pulls = bust_length(&mut rng);
            assert!((3..=12).contains(&pulls), "bust after {} pulls", pulls);
        }
    }

    #[test]
    fn test_distribution_accounts_for_every_deal() {
        let dist = bust_distribution(5000, 42);
        assert_eq!(dist.counts.iter().sum::<u64>(), 5000);
        assert_eq!(dist.counts[0], 0);
        assert_eq!(dist.counts[1], 0);
        assert_eq!(dist.counts[2], 0);
        assert!((dist.cumulative.last().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cumulative_monotone() {
        let dist = bust_distribution(2000, 7);
        for w in dist.cumulative.windows(2) {
            assert!(w[1] >= w[0]);
        }
    }

    #[test]
    fn test_distribution_deterministic() {
        let a = bust_distribution(1000, 11);
        let b = bust_distribution(1000, 11);
        assert_eq!(a.counts, b.counts);
    }

    #[test]
    fn test_empty_distribution() {
        let dist = bust_distribution(0, 42);
        assert!(dist.counts.is_empty());
        assert!(dist.cumulative.is_empty());
    }
}
