//! Core MCTS search algorithm.
//!
//! Each iteration runs four phases against a shared `StatsTable`:
//!
//! 1. Selection: descend with UCB1 while every legal action has statistics
//! 2. Expansion: at the first not-fully-covered state, play one random action
//! 3. Simulation: random playout to a terminal state
//! 4. Backpropagation: credit every (state, action) pair touched in 1-2
//!
//! After the budget is spent the root's actions are reduced to one choice by
//! win rate.

use std::mem;
use std::time::Instant;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::SearchRng;
use crate::rules::Game;

use super::budget::{Budget, StopSignal};
use super::config::{Fallback, MCTSConfig};
use super::error::{RootStateError, SearchError};
use super::observer::{SearchEvent, SearchObserver};
use super::policy::{SelectionPolicy, WinRate, UCB1};
use super::stats::SearchStats;
use super::table::{StatsEntry, StatsTable};

/// How well the root was explored when the decision was made.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coverage {
    /// Every root action had statistics; the action has the best win rate.
    Complete,
    /// Some root action was never tried; the action came from the fallback.
    Incomplete,
}

/// Result of a search call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome<A> {
    /// Chosen action at the root.
    pub action: A,

    /// Whether `action` was computed from full root statistics.
    pub coverage: Coverage,

    /// Iterations actually completed.
    pub iterations: u32,

    /// Root actions in enumeration order with their statistics, if any.
    pub root_stats: Vec<(A, Option<StatsEntry>)>,
}

impl<A> SearchOutcome<A> {
    /// True unless the decision fell back to the coverage fallback.
    #[must_use]
    pub fn is_confident(&self) -> bool {
        self.coverage == Coverage::Complete
    }
}

/// (state, action) pairs touched by one iteration's selection and expansion.
type VisitedSet<G> = FxHashSet<(<G as Game>::State, <G as Game>::Action)>;

/// Main MCTS search context.
///
/// Generic over the game type. Owns the configuration, the random source and,
/// when statistics persist, the statistics table.
pub struct MCTSSearch<G: Game> {
    /// The game rules.
    game: G,

    /// Search configuration.
    config: MCTSConfig,

    /// Statistics kept between searches. Always empty without persistence.
    table: StatsTable<G::State, G::Action>,

    /// RNG for expansion, rollouts and the root fallback.
    rng: SearchRng,

    /// Tree traversal policy.
    selection: Box<dyn SelectionPolicy>,

    /// Final root decision policy.
    decision: Box<dyn SelectionPolicy>,

    /// Optional diagnostics hook.
    observer: Option<Box<dyn SearchObserver<G>>>,

    /// Optional external cancellation.
    stop: Option<StopSignal>,

    /// Counters for the last search.
    stats: SearchStats,
}

impl<G: Game> MCTSSearch<G> {
    /// Create a new MCTS search context.
    pub fn new(game: G, config: MCTSConfig) -> Self {
        let rng = SearchRng::new(config.seed);

        Self {
            game,
            config,
            table: StatsTable::new(),
            rng,
            selection: Box::new(UCB1),
            decision: Box::new(WinRate),
            observer: None,
            stop: None,
            stats: SearchStats::default(),
        }
    }

    /// Set a custom tree traversal policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom final decision policy.
    pub fn with_decision<S: SelectionPolicy + 'static>(mut self, decision: S) -> Self {
        self.decision = Box::new(decision);
        self
    }

    /// Attach a diagnostics observer.
    pub fn with_observer<O: SearchObserver<G> + 'static>(mut self, observer: O) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Stop searches at the next iteration boundary once `signal` fires.
    pub fn with_stop_signal(mut self, signal: StopSignal) -> Self {
        self.stop = Some(signal);
        self
    }

    /// Run a search with the configured iteration budget.
    pub fn run(&mut self, root: &G::State) -> Result<SearchOutcome<G::Action>, SearchError> {
        if self.config.iterations == 0 {
            return Err(SearchError::InvalidConfig(
                "configured iterations must be at least 1".into(),
            ));
        }
        self.search(root, self.config.iterations)
    }

    /// Run MCTS search for a given number of iterations.
    ///
    /// Fails if `root` is terminal or has no legal actions. An outcome with
    /// `Coverage::Incomplete` means the budget ran out before every root
    /// action was tried.
    pub fn search(
        &mut self,
        root: &G::State,
        iterations: u32,
    ) -> Result<SearchOutcome<G::Action>, SearchError> {
        self.config.validate()?;
        if iterations == 0 {
            return Err(SearchError::InvalidConfig(
                "iterations must be at least 1".into(),
            ));
        }
        if self.game.is_terminal(root) {
            return Err(SearchError::InvalidRootState(RootStateError::Terminal));
        }
        if self.game.legal_actions(root).is_empty() {
            return Err(SearchError::InvalidRootState(RootStateError::NoLegalActions));
        }

        let start = Instant::now();
        self.stats.reset();

        let mut table = if self.config.persist_statistics {
            mem::take(&mut self.table)
        } else {
            StatsTable::new()
        };

        let budget = Budget::start(&self.config, self.stop.clone());
        let outcome = self
            .iterate(root, iterations, &budget, &mut table)
            .and_then(|completed| self.decide(root, completed, &table));

        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            iterations = self.stats.iterations,
            table_entries = table.len(),
            time_us = self.stats.time_us,
            stopped_early = self.stats.stopped_early,
            "MCTS search complete"
        );

        if self.config.persist_statistics {
            self.table = table;
        }
        outcome
    }

    /// Run iterations until the count or the budget is exhausted.
    fn iterate(
        &mut self,
        root: &G::State,
        iterations: u32,
        budget: &Budget,
        table: &mut StatsTable<G::State, G::Action>,
    ) -> Result<u32, SearchError> {
        for i in 0..iterations {
            if budget.exhausted() {
                self.stats.stopped_early = true;
                break;
            }
            self.iteration(root, i, table)?;
            self.stats.iterations += 1;
        }
        Ok(self.stats.iterations)
    }

    /// Single MCTS iteration: select, expand, simulate, backpropagate.
    fn iteration(
        &mut self,
        root: &G::State,
        iteration: u32,
        table: &mut StatsTable<G::State, G::Action>,
    ) -> Result<(), SearchError> {
        let mut visited: VisitedSet<G> = FxHashSet::default();
        let mut state = root.clone();
        let mut depth: u16 = 0;

        // === SELECTION ===
        let leaf_actions = loop {
            if self.game.is_terminal(&state) {
                break Vec::new();
            }
            let actions = self.game.legal_actions(&state);
            if actions.is_empty() {
                break actions;
            }
            let Some(entries) = table.entries_for(&state, &actions) else {
                break actions;
            };

            let idx = self.selection.select(&entries, &self.config);
            if let Some(observer) = self.observer.as_mut() {
                let scores = paired(&actions, self.selection.scores(&entries, &self.config));
                observer.on_event(&SearchEvent::Selected {
                    iteration,
                    state: &state,
                    action: &actions[idx],
                    scores: &scores,
                });
            }

            let action = actions[idx].clone();
            let next = self.game.next_state(&state, &action);
            visited.insert((state, action));
            state = next;
            depth = depth.saturating_add(1);
        };
        self.stats.max_selection_depth = self.stats.max_selection_depth.max(depth);

        // === EXPANSION ===
        if !leaf_actions.is_empty() {
            let idx = self.expansion_index(&state, &leaf_actions, table)?;
            let action = leaf_actions[idx].clone();
            if let Some(observer) = self.observer.as_mut() {
                observer.on_event(&SearchEvent::Expanded {
                    iteration,
                    state: &state,
                    action: &action,
                });
            }
            let next = self.game.next_state(&state, &action);
            visited.insert((state, action));
            state = next;
            self.stats.expansions += 1;
        }

        // === SIMULATION ===
        let mut rollout_rng = self.rng.fork();
        let mut steps: u32 = 0;
        while !self.game.is_terminal(&state) {
            let actions = self.game.legal_actions(&state);
            let action = rollout_rng
                .choose(&actions)
                .ok_or(SearchError::StalledPlayout)?;
            state = self.game.next_state(&state, action);
            steps += 1;
        }
        let winner = self.game.winner(&state);
        self.stats.simulations += 1;
        self.stats.rollout_steps += steps as u64;
        if let Some(observer) = self.observer.as_mut() {
            observer.on_event(&SearchEvent::Simulated {
                iteration,
                winner: winner.as_ref(),
                steps,
            });
        }

        // === BACKPROPAGATION ===
        let updated = visited.len();
        for (state, action) in visited {
            let won = winner.as_ref() == Some(&self.game.current_player(&state));
            table.record(state, action, won);
        }
        if let Some(observer) = self.observer.as_mut() {
            observer.on_event(&SearchEvent::Backpropagated { iteration, updated });
        }

        Ok(())
    }

    /// Pick the action to expand at a leaf that is not fully covered.
    fn expansion_index(
        &mut self,
        state: &G::State,
        actions: &[G::Action],
        table: &StatsTable<G::State, G::Action>,
    ) -> Result<usize, SearchError> {
        if !self.config.expand_untried_only {
            return self
                .rng
                .choose_index(actions.len())
                .ok_or(SearchError::StalledPlayout);
        }

        let untried: SmallVec<[usize; 16]> = actions
            .iter()
            .enumerate()
            .filter(|(_, a)| !table.contains(state, a))
            .map(|(i, _)| i)
            .collect();
        self.rng
            .choose(&untried)
            .copied()
            .ok_or(SearchError::StalledPlayout)
    }

    /// Reduce the root's statistics to one action.
    fn decide(
        &mut self,
        root: &G::State,
        completed: u32,
        table: &StatsTable<G::State, G::Action>,
    ) -> Result<SearchOutcome<G::Action>, SearchError> {
        let actions = self.game.legal_actions(root);
        let root_stats: Vec<_> = actions
            .iter()
            .map(|a| (a.clone(), table.get(root, a)))
            .collect();

        let (idx, coverage, scores) = match table.entries_for(root, &actions) {
            Some(entries) => {
                let idx = self.decision.select(&entries, &self.config);
                (idx, Coverage::Complete, self.decision.scores(&entries, &self.config))
            }
            None => {
                debug!(
                    actions = actions.len(),
                    covered = root_stats.iter().filter(|(_, e)| e.is_some()).count(),
                    "root not fully covered, using fallback"
                );
                (self.fallback_index(&root_stats)?, Coverage::Incomplete, Vec::new())
            }
        };

        if let Some(observer) = self.observer.as_mut() {
            let scores = if scores.is_empty() {
                Vec::new()
            } else {
                paired(&actions, scores)
            };
            observer.on_event(&SearchEvent::Decided {
                action: &actions[idx],
                coverage,
                scores: &scores,
            });
        }

        Ok(SearchOutcome {
            action: actions[idx].clone(),
            coverage,
            iterations: completed,
            root_stats,
        })
    }

    /// Fallback choice when some root action has no statistics.
    fn fallback_index(
        &mut self,
        root_stats: &[(G::Action, Option<StatsEntry>)],
    ) -> Result<usize, SearchError> {
        if self.config.fallback == Fallback::BestCovered {
            let (indices, entries): (SmallVec<[usize; 16]>, SmallVec<[StatsEntry; 16]>) =
                root_stats
                    .iter()
                    .enumerate()
                    .filter_map(|(i, (_, e))| e.map(|e| (i, e)))
                    .unzip();
            if !entries.is_empty() {
                return Ok(indices[self.decision.select(&entries, &self.config)]);
            }
        }
        self.rng
            .choose_index(root_stats.len())
            .ok_or(SearchError::InvalidRootState(RootStateError::NoLegalActions))
    }

    /// Get search statistics for the last call.
    #[must_use]
    pub fn search_stats(&self) -> &SearchStats {
        &self.stats
    }

    /// The retained statistics table, when statistics persist.
    #[must_use]
    pub fn stats_table(&self) -> Option<&StatsTable<G::State, G::Action>> {
        self.config.persist_statistics.then_some(&self.table)
    }

    /// Take ownership of the retained statistics table, when statistics persist.
    pub fn into_stats_table(self) -> Option<StatsTable<G::State, G::Action>> {
        self.config.persist_statistics.then_some(self.table)
    }

    /// Forget all retained statistics.
    pub fn clear_statistics(&mut self) {
        self.table = StatsTable::new();
    }

    /// Get the game reference.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Get the configuration.
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }
}

/// Pair actions with their scores for observer events.
fn paired<A: Clone>(actions: &[A], scores: Vec<f64>) -> Vec<(A, f64)> {
    actions.iter().cloned().zip(scores).collect()
}
