//! Nim game implementation.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::rules::Game;

/// Who wins when the pile runs out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NimRule {
    /// Taking the last token wins.
    #[default]
    Normal,
    /// Taking the last token loses.
    Misere,
}

/// Remove this many tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Take(pub u32);

impl Take {
    /// Number of tokens removed.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0
    }
}

/// Tokens left and whose turn it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NimState {
    pub tokens: u32,
    pub to_move: PlayerId,
}

/// Two-player single-pile Nim.
#[derive(Clone, Debug)]
pub struct Nim {
    tokens: u32,
    max_take: u32,
    rule: NimRule,
}

impl Nim {
    const PLAYERS: usize = 2;

    /// Create a game starting from `tokens` with moves of 1..=`max_take`.
    pub fn new(tokens: u32, max_take: u32, rule: NimRule) -> Self {
        assert!(max_take >= 1, "max_take must be at least 1");
        Self {
            tokens,
            max_take,
            rule,
        }
    }

    /// The starting position, player 0 to move.
    #[must_use]
    pub fn initial_state(&self) -> NimState {
        NimState {
            tokens: self.tokens,
            to_move: PlayerId::new(0),
        }
    }

    /// The play rule.
    #[must_use]
    pub fn rule(&self) -> NimRule {
        self.rule
    }

    /// Whether the player to move at `tokens` loses against perfect play.
    #[must_use]
    pub fn is_losing_position(&self, tokens: u32) -> bool {
        let period = self.max_take + 1;
        match self.rule {
            NimRule::Normal => tokens % period == 0,
            NimRule::Misere => tokens % period == 1,
        }
    }
}

impl Game for Nim {
    type State = NimState;
    type Action = Take;
    type Player = PlayerId;

    fn is_terminal(&self, state: &NimState) -> bool {
        state.tokens == 0
    }

    fn legal_actions(&self, state: &NimState) -> Vec<Take> {
        (1..=self.max_take.min(state.tokens)).map(Take).collect()
    }

    fn next_state(&self, state: &NimState, action: &Take) -> NimState {
        NimState {
            tokens: state.tokens.saturating_sub(action.count()),
            to_move: state.to_move.next(Self::PLAYERS),
        }
    }

    fn winner(&self, state: &NimState) -> Option<PlayerId> {
        // At an empty pile the player to move did not take the last token.
        match self.rule {
            NimRule::Normal => Some(state.to_move.next(Self::PLAYERS)),
            NimRule::Misere => Some(state.to_move),
        }
    }

    fn current_player(&self, state: &NimState) -> PlayerId {
        state.to_move
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_actions_capped_by_pile() {
        let game = Nim::new(5, 3, NimRule::Normal);
        let state = game.initial_state();
        assert_eq!(game.legal_actions(&state), vec![Take(1), Take(2), Take(3)]);

        let small = NimState {
            tokens: 2,
            to_move: PlayerId::new(1),
        };
        assert_eq!(game.legal_actions(&small), vec![Take(1), Take(2)]);
    }

    #[test]
    fn test_terminal_has_no_actions() {
        let game = Nim::new(0, 2, NimRule::Normal);
        let state = game.initial_state();
        assert!(game.is_terminal(&state));
        assert!(game.legal_actions(&state).is_empty());
    }

    #[test]
    fn test_next_state_alternates_players() {
        let game = Nim::new(3, 2, NimRule::Normal);
        let state = game.next_state(&game.initial_state(), &Take(2));
        assert_eq!(state.tokens, 1);
        assert_eq!(state.to_move, PlayerId::new(1));
        assert_eq!(game.current_player(&state), PlayerId::new(1));
    }

    #[test]
    fn test_winner_normal_play() {
        let game = Nim::new(1, 2, NimRule::Normal);
        let end = game.next_state(&game.initial_state(), &Take(1));
        assert_eq!(game.winner(&end), Some(PlayerId::new(0)));
    }

    #[test]
    fn test_winner_misere_play() {
        let game = Nim::new(1, 2, NimRule::Misere);
        let end = game.next_state(&game.initial_state(), &Take(1));
        assert_eq!(game.winner(&end), Some(PlayerId::new(1)));
    }

    #[test]
    fn test_losing_positions() {
        let normal = Nim::new(0, 2, NimRule::Normal);
        assert!(normal.is_losing_position(3));
        assert!(normal.is_losing_position(6));
        assert!(!normal.is_losing_position(4));

        let misere = Nim::new(0, 2, NimRule::Misere);
        assert!(misere.is_losing_position(1));
        assert!(misere.is_losing_position(4));
        assert!(!misere.is_losing_position(3));
    }
}
