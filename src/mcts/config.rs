//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

use super::error::SearchError;

/// Final decision when some root actions were never tried.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fallback {
    /// Pick uniformly among all root actions, ignoring partial statistics.
    #[default]
    Uniform,
    /// Pick the best win rate among the root actions that do have statistics.
    BestCovered,
}

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// Iterations used by `MCTSSearch::run`.
    pub iterations: u32,

    /// UCB1 exploration constant (default: 1.4).
    /// Higher values favor exploration over exploitation.
    pub exploration_constant: f64,

    /// Keep the statistics table across `search` calls.
    /// When false, each search starts from an empty table and discards it.
    pub persist_statistics: bool,

    /// Random seed for expansion, rollouts and the root fallback.
    /// Same seed produces deterministic searches.
    pub seed: u64,

    /// Wall-clock budget per search in milliseconds (0 = unlimited).
    /// Checked only between iterations.
    pub time_limit_ms: u64,

    /// Expand only actions that have no statistics yet.
    /// Off by default: expansion draws from the full legal action set.
    pub expand_untried_only: bool,

    /// What to return when the root is not fully covered.
    pub fallback: Fallback,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration_constant: 1.4,
            persist_statistics: false,
            seed: 42,
            time_limit_ms: 0,
            expand_untried_only: false,
            fallback: Fallback::Uniform,
        }
    }
}

impl MCTSConfig {
    /// Create a new config with a custom iteration budget.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Create a new config with custom exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Create a new config that keeps statistics between searches.
    pub fn with_persistence(mut self, persist: bool) -> Self {
        self.persist_statistics = persist;
        self
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with a per-search time limit.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Create a new config with a custom root fallback.
    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Create a new config that only expands untried actions.
    pub fn with_untried_expansion(mut self, enabled: bool) -> Self {
        self.expand_untried_only = enabled;
        self
    }

    /// Check the parameters every search depends on.
    ///
    /// `iterations` is only read by `MCTSSearch::run`, which checks it there.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        Ok(())
    }
}
