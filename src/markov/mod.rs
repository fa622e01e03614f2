//! Markov chains: stochastic matrices, power-iteration convergence, random
//! walks, and the logged-in-users birth-death chain.

pub mod login;
pub mod matrix;
pub mod walk;

pub use login::{stationary_occupancy, LoginChain, LoginOccupancy, StayRegime};
pub use matrix::{PowerConvergence, TransitionMatrix};
pub use walk::{walk_occupancy, OccupancySample, WalkOccupancy};
