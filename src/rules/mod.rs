//! The game contract consumed by the search engine.
//!
//! Games implement `Game` to define:
//! - Legal actions for each state
//! - How an action produces the next state
//! - Termination, winner and turn queries
//!
//! The engine calls into `Game` but never interprets game-specific
//! structure directly.

pub mod game;

pub use game::Game;
