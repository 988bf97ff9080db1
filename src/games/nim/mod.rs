//! Single-pile Nim.
//!
//! Players alternately remove between 1 and `max_take` tokens from a pile.
//! Under normal play whoever takes the last token wins; under misère play
//! whoever takes the last token loses.
//!
//! Small piles are solvable by hand, which makes this the canonical
//! convergence check for the search.

mod game;

pub use game::{Nim, NimRule, NimState, Take};
