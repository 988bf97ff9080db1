//! # ucb-mcts
//!
//! A game-agnostic Monte Carlo Tree Search engine for perfect-information,
//! turn-based games, scored with the UCB1 bandit formula.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: The engine only talks to the `Game` trait. States
//!    and actions are opaque value types.
//!
//! 2. **Transposition Sharing**: Statistics are keyed by (state, action)
//!    rather than by tree position.
//!
//! 3. **Deterministic**: All randomness comes from a seeded `SearchRng`.
//!
//! ## Modules
//!
//! - `core`: Player IDs and the seeded RNG
//! - `rules`: The `Game` trait games implement
//! - `mcts`: Search engine, statistics table, policies, observer hook
//! - `games`: Bundled Nim and tic-tac-toe

pub mod core;
pub mod rules;
pub mod mcts;
pub mod games;

// Re-export commonly used types
pub use crate::core::{PlayerId, SearchRng};

pub use crate::rules::Game;

pub use crate::mcts::{
    Coverage, Fallback, MCTSConfig, MCTSSearch, Phase, RootStateError, SearchError,
    SearchEvent, SearchObserver, SearchOutcome, SearchStats, SelectionPolicy, StatsEntry,
    StatsTable, StopSignal, TracingObserver, WinRate, UCB1,
};
