//! Blackjack experiments: how fast a hand busts when forced to draw, and
//! how stand-at-threshold strategies fare against the basic-strategy table.

pub mod bust;
pub mod deck;
pub mod strategy;

pub use bust::{bust_distribution, bust_length, BustDistribution};
pub use deck::Deck;
pub use strategy::{
    compare_strategies, play_game, Hand, Strategy, StrategyComparison, StrategyWinRate,
};
