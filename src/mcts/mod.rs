//! UCB1 Monte Carlo Tree Search.
//!
//! ## Overview
//!
//! The engine keeps no explicit tree. Statistics live in a table keyed by
//! (state, action), so positions reached through different move orders share
//! one entry. Key features:
//!
//! - **Game-Agnostic**: Works with any `Game` implementation
//! - **Deterministic**: A fixed seed reproduces a search exactly
//! - **Persistent Statistics**: Optionally keep the table across calls
//! - **Early Stopping**: Deadline and stop signal, checked between iterations
//! - **Observable**: Structured phase events through an optional hook
//!
//! ## Usage
//!
//! ```rust
//! use ucb_mcts::games::nim::{Nim, NimRule, Take};
//! use ucb_mcts::mcts::{MCTSConfig, MCTSSearch};
//!
//! // Three tokens, take one or two, whoever takes the last token loses.
//! let game = Nim::new(3, 2, NimRule::Misere);
//! let root = game.initial_state();
//!
//! let mut search = MCTSSearch::new(game, MCTSConfig::default().with_seed(7));
//! let outcome = search.search(&root, 2000).unwrap();
//!
//! // Leaving a single token forces the opponent to take it.
//! assert_eq!(outcome.action, Take(2));
//! assert!(outcome.is_confident());
//! ```
//!
//! ## Custom Policies
//!
//! ```rust,ignore
//! use ucb_mcts::mcts::{MCTSSearch, MCTSConfig, TracingObserver};
//!
//! let search = MCTSSearch::new(game, config)
//!     .with_observer(TracingObserver);
//! ```

pub mod budget;
pub mod config;
pub mod error;
pub mod observer;
pub mod policy;
pub mod search;
pub mod stats;
pub mod table;

// Re-export main types
pub use budget::StopSignal;
pub use config::{Fallback, MCTSConfig};
pub use error::{RootStateError, SearchError};
pub use observer::{Phase, SearchEvent, SearchObserver, TracingObserver};
pub use policy::{SelectionPolicy, WinRate, UCB1};
pub use search::{Coverage, MCTSSearch, SearchOutcome};
pub use stats::SearchStats;
pub use table::{StatsEntry, StatsTable};
