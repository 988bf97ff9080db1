//! Tic-tac-toe game implementation.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::rules::Game;

/// One board square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Taken(PlayerId),
}

/// Board contents and whose turn it is. Squares are indexed row-major 0..9.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicTacToeState {
    pub board: [Cell; 9],
    pub to_move: PlayerId,
}

impl TicTacToeState {
    /// Build a position from a 9-character row-major string of `X`, `O` and `.`.
    ///
    /// The player to move is inferred from the piece counts.
    ///
    /// ```
    /// use ucb_mcts::games::tictactoe::TicTacToeState;
    /// use ucb_mcts::core::PlayerId;
    ///
    /// let state = TicTacToeState::parse("XX.OO....").unwrap();
    /// assert_eq!(state.to_move, PlayerId::new(0));
    /// ```
    pub fn parse(layout: &str) -> Option<Self> {
        let mut board = [Cell::Empty; 9];
        let mut count = 0;
        for ch in layout.chars().filter(|c| !c.is_whitespace()) {
            if count == 9 {
                return None;
            }
            board[count] = match ch {
                'X' | 'x' => Cell::Taken(PlayerId::new(0)),
                'O' | 'o' => Cell::Taken(PlayerId::new(1)),
                '.' | '-' => Cell::Empty,
                _ => return None,
            };
            count += 1;
        }
        if count != 9 {
            return None;
        }

        let crosses = board
            .iter()
            .filter(|c| **c == Cell::Taken(PlayerId::new(0)))
            .count();
        let noughts = board
            .iter()
            .filter(|c| **c == Cell::Taken(PlayerId::new(1)))
            .count();
        let to_move = match crosses.checked_sub(noughts) {
            Some(0) => PlayerId::new(0),
            Some(1) => PlayerId::new(1),
            _ => return None,
        };
        Some(Self { board, to_move })
    }
}

impl std::fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.board.chunks(3) {
            for cell in row {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::Taken(p) if p.index() == 0 => 'X',
                    Cell::Taken(_) => 'O',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Tic-tac-toe rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct TicTacToe;

impl TicTacToe {
    const PLAYERS: usize = 2;

    pub fn new() -> Self {
        Self
    }

    /// The empty board, crosses to move.
    #[must_use]
    pub fn initial_state(&self) -> TicTacToeState {
        TicTacToeState::default()
    }

    /// Owner of a completed line, if any.
    fn line_owner(state: &TicTacToeState) -> Option<PlayerId> {
        LINES.iter().find_map(|&[a, b, c]| match state.board[a] {
            Cell::Taken(p) if state.board[b] == Cell::Taken(p) && state.board[c] == Cell::Taken(p) => {
                Some(p)
            }
            _ => None,
        })
    }
}

impl Game for TicTacToe {
    type State = TicTacToeState;
    /// Square index 0..9.
    type Action = u8;
    type Player = PlayerId;

    fn is_terminal(&self, state: &TicTacToeState) -> bool {
        Self::line_owner(state).is_some() || state.board.iter().all(|c| *c != Cell::Empty)
    }

    fn legal_actions(&self, state: &TicTacToeState) -> Vec<u8> {
        if Self::line_owner(state).is_some() {
            return Vec::new();
        }
        (0..9u8)
            .filter(|&i| state.board[i as usize] == Cell::Empty)
            .collect()
    }

    fn next_state(&self, state: &TicTacToeState, action: &u8) -> TicTacToeState {
        let mut next = *state;
        next.board[*action as usize] = Cell::Taken(state.to_move);
        next.to_move = state.to_move.next(Self::PLAYERS);
        next
    }

    fn winner(&self, state: &TicTacToeState) -> Option<PlayerId> {
        Self::line_owner(state)
    }

    fn current_player(&self, state: &TicTacToeState) -> PlayerId {
        state.to_move
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let game = TicTacToe::new();
        let state = game.initial_state();
        assert!(!game.is_terminal(&state));
        assert_eq!(game.legal_actions(&state).len(), 9);
        assert_eq!(game.current_player(&state), PlayerId::new(0));
    }

    #[test]
    fn test_row_win() {
        let game = TicTacToe::new();
        let state = TicTacToeState::parse("XX.OO....").unwrap();
        let won = game.next_state(&state, &2);

        assert!(game.is_terminal(&won));
        assert_eq!(game.winner(&won), Some(PlayerId::new(0)));
        assert!(game.legal_actions(&won).is_empty());
    }

    #[test]
    fn test_draw_has_no_winner() {
        let game = TicTacToe::new();
        let state = TicTacToeState::parse("XOXXOOOXX").unwrap();

        assert!(game.is_terminal(&state));
        assert_eq!(game.winner(&state), None);
    }

    #[test]
    fn test_parse_rejects_bad_layouts() {
        assert!(TicTacToeState::parse("XX").is_none());
        assert!(TicTacToeState::parse("XXX......").is_none());
        assert!(TicTacToeState::parse("XO?......").is_none());
        assert!(TicTacToeState::parse("XO.......X").is_none());
    }

    #[test]
    fn test_display_roundtrip() {
        let state = TicTacToeState::parse("XO.\n.X.\n..O").unwrap();
        assert_eq!(state.to_string(), "XO.\n.X.\n..O\n");
    }
}
