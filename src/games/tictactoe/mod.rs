//! Tic-tac-toe on a 3x3 board.
//!
//! Player 0 places crosses, player 1 places noughts. A full board without a
//! line is a draw, reported as no winner.

mod game;

pub use game::{Cell, TicTacToe, TicTacToeState};
