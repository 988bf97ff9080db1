//! Optional diagnostics hook.
//!
//! The search loop itself is silent. An attached `SearchObserver` receives a
//! structured event at each phase boundary; score vectors are only built when
//! an observer is attached.

use tracing::trace;

use crate::rules::Game;

use super::search::Coverage;

/// Search phase an event belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Selection,
    Expansion,
    Simulation,
    Backpropagation,
    Decision,
}

/// One phase-boundary event.
pub enum SearchEvent<'a, G: Game> {
    /// UCB1 chose `action` at `state`. `scores` covers every legal action.
    Selected {
        iteration: u32,
        state: &'a G::State,
        action: &'a G::Action,
        scores: &'a [(G::Action, f64)],
    },
    /// A random action was expanded at a leaf.
    Expanded {
        iteration: u32,
        state: &'a G::State,
        action: &'a G::Action,
    },
    /// A rollout finished after `steps` random moves.
    Simulated {
        iteration: u32,
        winner: Option<&'a G::Player>,
        steps: u32,
    },
    /// `updated` (state, action) pairs received the rollout result.
    Backpropagated { iteration: u32, updated: usize },
    /// The final root decision. `scores` is empty for a uniform fallback.
    Decided {
        action: &'a G::Action,
        coverage: Coverage,
        scores: &'a [(G::Action, f64)],
    },
}

impl<G: Game> SearchEvent<'_, G> {
    /// The phase this event reports on.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            SearchEvent::Selected { .. } => Phase::Selection,
            SearchEvent::Expanded { .. } => Phase::Expansion,
            SearchEvent::Simulated { .. } => Phase::Simulation,
            SearchEvent::Backpropagated { .. } => Phase::Backpropagation,
            SearchEvent::Decided { .. } => Phase::Decision,
        }
    }

    /// The state the event happened at, for selection and expansion.
    #[must_use]
    pub fn state(&self) -> Option<&G::State> {
        match self {
            SearchEvent::Selected { state, .. } | SearchEvent::Expanded { state, .. } => {
                Some(*state)
            }
            _ => None,
        }
    }
}

/// Receiver for search events. Never required for correctness.
pub trait SearchObserver<G: Game> {
    fn on_event(&mut self, event: &SearchEvent<'_, G>);
}

impl<G, F> SearchObserver<G> for F
where
    G: Game,
    F: FnMut(&SearchEvent<'_, G>),
{
    fn on_event(&mut self, event: &SearchEvent<'_, G>) {
        self(event)
    }
}

/// Observer that forwards every event to `tracing` at TRACE level.
#[derive(Clone, Debug, Default)]
pub struct TracingObserver;

impl<G: Game> SearchObserver<G> for TracingObserver {
    fn on_event(&mut self, event: &SearchEvent<'_, G>) {
        match event {
            SearchEvent::Selected {
                iteration,
                state,
                action,
                scores,
            } => trace!(iteration, ?state, ?action, ?scores, "selection"),
            SearchEvent::Expanded {
                iteration,
                state,
                action,
            } => trace!(iteration, ?state, ?action, "expansion"),
            SearchEvent::Simulated {
                iteration,
                winner,
                steps,
            } => trace!(iteration, ?winner, steps, "simulation"),
            SearchEvent::Backpropagated { iteration, updated } => {
                trace!(iteration, updated, "backpropagation")
            }
            SearchEvent::Decided {
                action,
                coverage,
                scores,
            } => trace!(?action, ?coverage, ?scores, "decision"),
        }
    }
}
