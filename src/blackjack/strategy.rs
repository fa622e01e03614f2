//! Player strategies compared under common random numbers.
//!
//! Game rules, as the exercise defines them: deal order player, dealer,
//! player, dealer; the player draws per strategy and loses immediately on
//! busting; the dealer then hits below 17 and never demotes aces (a dealer
//! drawing two aces busts at 22); the player wins when the dealer busts or
//! when the player's total is strictly higher. Ties lose.
//!
//! Game `i` of every strategy runs on `SmallRng::seed_from_u64(base + i)`,
//! so all strategies face identical shuffles and their win rates differ
//! only through play.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use super::deck::Deck;

/// A player policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Hit while the hand total is below the threshold.
    Threshold(u32),
    /// The classic two-table basic strategy (no splits or doubles).
    Basic,
}

impl Strategy {
    pub fn label(&self) -> String {
        match self {
            Strategy::Threshold(t) => format!("stand at {}", t),
            Strategy::Basic => "basic table".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Hit,
    Stand,
}

/// A player hand. Aces enter as 11 and are demoted to 1 one at a time while
/// the total would bust; a hand still holding an 11 is soft.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<u8>,
}

impl Hand {
    pub fn new() -> Self {
        Hand {
            cards: Vec::with_capacity(8),
        }
    }

    pub fn hit(&mut self, card: u8) {
        self.cards.push(card);
        while self.total() > 21 {
            match self.cards.iter().position(|&c| c == 11) {
                Some(i) => self.cards[i] = 1,
                None => break,
            }
        }
    }

    pub fn total(&self) -> u32 {
        self.cards.iter().map(|&c| c as u32).sum()
    }

    pub fn is_soft(&self) -> bool {
        self.cards.contains(&11)
    }
}

/// Basic-strategy action for the current hand against the dealer upcard.
fn basic_action(hand: &Hand, upcard: u8) -> Action {
    let total = hand.total();
    let show = upcard as u32;
    if hand.is_soft() {
        // row keyed by the non-ace part of the hand
        let upper = total - 11;
        if upper >= 8 {
            Action::Stand
        } else if upper == 7 {
            if show <= 8 {
                Action::Stand
            } else {
                Action::Hit
            }
        } else {
            Action::Hit
        }
    } else {
        match total {
            t if t >= 17 => Action::Stand,
            t if t <= 11 => Action::Hit,
            12 => {
                if (4..=6).contains(&show) {
                    Action::Stand
                } else {
                    Action::Hit
                }
            }
            _ => {
                // 13..=16
                if (2..=6).contains(&show) {
                    Action::Stand
                } else {
                    Action::Hit
                }
            }
        }
    }
}

fn decide(strategy: Strategy, hand: &Hand, upcard: u8) -> Action {
    match strategy {
        Strategy::Threshold(t) => {
            if hand.total() < t {
                Action::Hit
            } else {
                Action::Stand
            }
        }
        Strategy::Basic => basic_action(hand, upcard),
    }
}

/// Play one game; true when the player wins.
pub fn play_game(strategy: Strategy, rng: &mut SmallRng) -> bool {
    let mut deck = Deck::fresh(11);
    let mut player = Hand::new();
    let mut dealer_cards: Vec<u8> = Vec::with_capacity(8);

    player.hit(deck.draw(rng));
    dealer_cards.push(deck.draw(rng));
    player.hit(deck.draw(rng));
    dealer_cards.push(deck.draw(rng));
    let upcard = dealer_cards[0];

    loop {
        if player.total() > 21 {
            return false;
        }
        if decide(strategy, &player, upcard) == Action::Stand {
            break;
        }
        player.hit(deck.draw(rng));
    }

    // dealer counts aces at face value, no demotion
    let mut dealer_total: u32 = dealer_cards.iter().map(|&c| c as u32).sum();
    loop {
        if dealer_total > 21 {
            return true;
        }
        if dealer_total >= 17 {
            break;
        }
        dealer_total += deck.draw(rng) as u32;
    }
    player.total() > dealer_total
}

/// Win rate of one strategy.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyWinRate {
    pub label: String,
    pub wins: u64,
    pub games: u64,
    pub win_rate: f64,
}

/// Win rates of several strategies over the same games.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyComparison {
    pub games: u64,
    pub base_seed: u64,
    pub results: Vec<StrategyWinRate>,
}

impl StrategyComparison {
    /// The result with the highest win rate.
    pub fn best(&self) -> Option<&StrategyWinRate> {
        self.results
            .iter()
            .max_by(|a, b| a.win_rate.partial_cmp(&b.win_rate).unwrap())
    }
}

/// Play `games` games per strategy under common random numbers.
pub fn compare_strategies(
    strategies: &[Strategy],
    games: u64,
    base_seed: u64,
) -> StrategyComparison {
    let results = strategies
        .iter()
        .map(|&strategy| {
            let wins: u64 = (0..games)
                .into_par_iter()
                .map(|i| {
                    let mut rng = SmallRng::seed_from_u64(base_seed.wrapping_add(i));
                    u64::from(play_game(strategy, &mut rng))
                })
                .sum();
            let win_rate = if games > 0 {
                wins as f64 / games as f64
            } else {
                f64::NAN
            };
            StrategyWinRate {
                label: strategy.label(),
                wins,
                games,
                win_rate,
            }
        })
        .collect();
    StrategyComparison {
        games,
        base_seed,
        results,
    }
}
