//! Play/win statistics keyed by (state, action).
//!
//! Entries are created lazily on first backpropagation and never removed.
//! A missing entry means zero plays. Because keys are state values rather
//! than tree positions, transpositions share one entry.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Per-state entry buffer; most games have few legal actions.
pub type EntryBuf = SmallVec<[StatsEntry; 16]>;

/// Plays and wins recorded for one (state, action) pair.
///
/// Invariant: `wins <= plays`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatsEntry {
    /// Simulations that passed through this pair.
    pub plays: u64,
    /// Of those, simulations won by the player to move at the state.
    pub wins: u64,
}

impl StatsEntry {
    /// Create an entry from raw counts.
    #[must_use]
    pub fn new(plays: u64, wins: u64) -> Self {
        debug_assert!(wins <= plays, "wins ({wins}) exceed plays ({plays})");
        Self { plays, wins }
    }

    /// Record one simulation.
    pub fn record(&mut self, won: bool) {
        self.plays += 1;
        if won {
            self.wins += 1;
        }
    }

    /// Empirical win rate. Panics if the entry has no plays.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        assert!(self.plays > 0, "win rate of an entry with zero plays");
        self.wins as f64 / self.plays as f64
    }
}

/// Mapping from (state, action) to `StatsEntry`.
///
/// Stored as a two-level map so a state's actions can be looked up without
/// cloning keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsTable<S: Eq + Hash, A: Eq + Hash> {
    entries: FxHashMap<S, FxHashMap<A, StatsEntry>>,
    len: usize,
}

impl<S: Eq + Hash, A: Eq + Hash> Default for StatsTable<S, A> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
            len: 0,
        }
    }
}

impl<S: Eq + Hash, A: Eq + Hash> StatsTable<S, A> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics for a pair, if any simulation has touched it.
    #[must_use]
    pub fn get(&self, state: &S, action: &A) -> Option<StatsEntry> {
        self.entries.get(state)?.get(action).copied()
    }

    /// Whether a pair has statistics.
    #[must_use]
    pub fn contains(&self, state: &S, action: &A) -> bool {
        self.get(state, action).is_some()
    }

    /// Entries for `actions` at `state`, in the same order.
    ///
    /// Returns `None` unless every action has statistics.
    #[must_use]
    pub fn entries_for(&self, state: &S, actions: &[A]) -> Option<EntryBuf> {
        let row = self.entries.get(state)?;
        actions.iter().map(|a| row.get(a).copied()).collect()
    }

    /// Record one simulation for a pair, creating the entry at (0, 0) if absent.
    pub fn record(&mut self, state: S, action: A, won: bool) {
        let row = self.entries.entry(state).or_default();
        if !row.contains_key(&action) {
            self.len += 1;
        }
        row.entry(action).or_default().record(won);
    }

    /// Number of (state, action) pairs with statistics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sum of plays over all recorded actions at `state`.
    #[must_use]
    pub fn total_plays(&self, state: &S) -> u64 {
        self.entries
            .get(state)
            .map(|row| row.values().map(|e| e.plays).sum())
            .unwrap_or(0)
    }

    /// Iterate over all (state, action, entry) triples in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &A, &StatsEntry)> {
        self.entries
            .iter()
            .flat_map(|(s, row)| row.iter().map(move |(a, e)| (s, a, e)))
    }
}
