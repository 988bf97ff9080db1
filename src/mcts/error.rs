//! Errors surfaced by the search engine.

use thiserror::Error;

/// Why a root state cannot be searched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RootStateError {
    /// The game reports the root as terminal.
    #[error("root state is terminal")]
    Terminal,
    /// The root is not terminal but has no legal actions.
    #[error("root state is not terminal but has no legal actions")]
    NoLegalActions,
}

/// Errors that can occur during MCTS search.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Invalid root state: {0}")]
    InvalidRootState(#[from] RootStateError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A non-terminal state reached during expansion or a rollout had no
    /// legal actions, so the playout cannot finish.
    #[error("Playout stalled at a non-terminal state with no legal actions")]
    StalledPlayout,
}
