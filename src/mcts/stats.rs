//! MCTS run counters for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Counters collected during the most recent search call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Iterations completed.
    pub iterations: u32,

    /// Iterations whose leaf was expanded (the leaf was not terminal).
    pub expansions: u32,

    /// Rollouts performed (one per iteration).
    pub simulations: u32,

    /// Random moves played across all rollouts.
    pub rollout_steps: u64,

    /// Deepest UCB1 descent from the root.
    pub max_selection_depth: u16,

    /// Whether the iteration budget was cut short by the deadline or stop signal.
    pub stopped_early: bool,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate iterations per second.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.iterations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Average number of random moves per rollout.
    #[must_use]
    pub fn avg_rollout_length(&self) -> f64 {
        if self.simulations == 0 {
            0.0
        } else {
            self.rollout_steps as f64 / self.simulations as f64
        }
    }
}
