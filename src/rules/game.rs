//! Game trait for search targets.

use std::fmt::Debug;
use std::hash::Hash;

/// A two-or-more player, perfect-information, turn-based game.
///
/// The engine treats states and actions as opaque values. It stores them
/// as statistics keys, so two equal states must be interchangeable: that is
/// what lets positions reached by different move orders share statistics.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Empty iff the state is terminal. Enumeration order
///   is the tie-break order for action selection.
/// - `next_state`: Pure. Must not mutate `state` or any shared data.
/// - `winner`: Only called on terminal states. `None` is a draw.
/// - `current_player`: Whose decision `legal_actions` enumerates.
pub trait Game {
    /// Position identifier. Value semantics, usable as a map key.
    type State: Clone + Eq + Hash + Debug;

    /// Move identifier at some state. Value semantics, usable as a map key.
    type Action: Clone + Eq + Hash + Debug;

    /// Player identity, compared against the winner during backpropagation.
    type Player: Clone + Eq + Debug;

    /// Check if the game is over at `state`.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Legal actions at `state` in a stable order.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// The state reached by playing `action` at `state`.
    fn next_state(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// The winner of a terminal state, or `None` for a draw.
    fn winner(&self, state: &Self::State) -> Option<Self::Player>;

    /// The player to move at `state`.
    fn current_player(&self, state: &Self::State) -> Self::Player;
}
