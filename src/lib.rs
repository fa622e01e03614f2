//! Probability course experiments in Rust.
//!
//! Each experiment pairs a closed-form ("theoretical") probability with a
//! Monte Carlo ("experimental") estimate of the same quantity and reports
//! both side by side. The library holds the probability models; the binaries
//! under `src/bin/` drive one classroom exercise each.
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | `montecarlo` | generic trial runner: N seeded trials, mean and spread    |
//! | `stats`      | summary statistics and histograms                         |
//! | `series`     | paired (parameter, theory, empirical) series, JSON/CSV    |
//! | `ruin`       | gambler's ruin: exact formula, walks, trajectories        |
//! | `markov`     | stochastic matrices, power convergence, walks, logins     |
//! | `queueing`   | single-server queue with exponential arrivals/services    |
//! | `dice`       | high-die duel, payout expectations, bankroll paths        |
//! | `population` | reproduction policies simulated over generations          |
//! | `blackjack`  | bust-length distribution, threshold vs basic strategy     |
//! | `env_config` | base path and rayon thread pool from environment          |

pub mod blackjack;
pub mod dice;
pub mod env_config;
pub mod markov;
pub mod montecarlo;
pub mod population;
pub mod queueing;
pub mod ruin;
pub mod series;
pub mod stats;
