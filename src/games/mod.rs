//! Bundled game implementations.
//!
//! Small, exactly-solvable games used to exercise and benchmark the engine:
//! - `nim`: one pile, take 1..=k tokens, normal or misère play
//! - `tictactoe`: 3x3 noughts and crosses, with draws

pub mod nim;
pub mod tictactoe;
