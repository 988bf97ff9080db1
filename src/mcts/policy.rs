//! MCTS action scoring policies.
//!
//! Policies are trait-based to allow customization:
//! - `UCB1`: tree traversal, balances win rate against an exploration bonus
//! - `WinRate`: final decision at the root, pure exploitation
//!
//! Both are only defined over actions that already have statistics. Ties go
//! to the action enumerated first.

use super::config::MCTSConfig;
use super::table::StatsEntry;

/// Policy for scoring and choosing among a state's fully-visited actions.
pub trait SelectionPolicy: Send + Sync {
    /// Score one action.
    ///
    /// `ln_total` is the natural log of the summed plays over all of the
    /// state's actions.
    fn score(&self, entry: &StatsEntry, ln_total: f64, config: &MCTSConfig) -> f64;

    /// Index of the highest-scoring entry, first one on ties.
    ///
    /// Panics if `entries` is empty or any entry has zero plays.
    fn select(&self, entries: &[StatsEntry], config: &MCTSConfig) -> usize {
        assert!(!entries.is_empty(), "selection over an empty action set");
        let ln_total = ln_total_plays(entries);

        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (i, entry) in entries.iter().enumerate() {
            let score = self.score(entry, ln_total, config);
            if score > best_score {
                best = i;
                best_score = score;
            }
        }
        best
    }

    /// Scores for every entry, in order.
    fn scores(&self, entries: &[StatsEntry], config: &MCTSConfig) -> Vec<f64> {
        let ln_total = ln_total_plays(entries);
        entries
            .iter()
            .map(|e| self.score(e, ln_total, config))
            .collect()
    }
}

/// Natural log of the summed plays. Every entry must have been played.
fn ln_total_plays(entries: &[StatsEntry]) -> f64 {
    let total: u64 = entries
        .iter()
        .map(|e| {
            assert!(e.plays > 0, "scoring an action with zero plays");
            e.plays
        })
        .sum();
    (total as f64).ln()
}

/// UCB1 (Upper Confidence Bound) selection policy.
///
/// Formula: wins/plays + c * sqrt(ln(N) / plays)
#[derive(Clone, Debug, Default)]
pub struct UCB1;

impl SelectionPolicy for UCB1 {
    fn score(&self, entry: &StatsEntry, ln_total: f64, config: &MCTSConfig) -> f64 {
        entry.win_rate()
            + config.exploration_constant * (ln_total / entry.plays as f64).sqrt()
    }
}

/// Greedy win-rate policy for the final decision.
///
/// Formula: wins/plays
#[derive(Clone, Debug, Default)]
pub struct WinRate;

impl SelectionPolicy for WinRate {
    fn score(&self, entry: &StatsEntry, _ln_total: f64, _config: &MCTSConfig) -> f64 {
        entry.win_rate()
    }
}
