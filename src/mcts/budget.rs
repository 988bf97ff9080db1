//! Early stopping: a shared stop flag and a per-search deadline.
//!
//! Both are only checked between iterations, so a stopped search never
//! leaves a half-applied backpropagation behind.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::config::MCTSConfig;

/// Cloneable cancellation token.
///
/// ```
/// use ucb_mcts::mcts::StopSignal;
///
/// let signal = StopSignal::new();
/// let handle = signal.clone();
/// handle.stop();
/// assert!(signal.is_stopped());
/// ```
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that searches using this signal stop at the next iteration boundary.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Clear a previous stop request.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Stop conditions for one search call.
#[derive(Debug)]
pub(crate) struct Budget {
    deadline: Option<Instant>,
    signal: Option<StopSignal>,
}

impl Budget {
    pub(crate) fn start(config: &MCTSConfig, signal: Option<StopSignal>) -> Self {
        let deadline = (config.time_limit_ms > 0)
            .then(|| Instant::now() + Duration::from_millis(config.time_limit_ms));
        Self { deadline, signal }
    }

    /// Whether the search should stop before starting another iteration.
    pub(crate) fn exhausted(&self) -> bool {
        if self.signal.as_ref().is_some_and(StopSignal::is_stopped) {
            return true;
        }
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_budget() {
        let budget = Budget::start(&MCTSConfig::default(), None);
        assert!(!budget.exhausted());
    }

    #[test]
    fn test_signal_stops_budget() {
        let signal = StopSignal::new();
        let budget = Budget::start(&MCTSConfig::default(), Some(signal.clone()));
        assert!(!budget.exhausted());

        signal.stop();
        assert!(budget.exhausted());

        signal.reset();
        assert!(!budget.exhausted());
    }

    #[test]
    fn test_deadline_expires() {
        let config = MCTSConfig::default().with_time_limit_ms(1);
        let budget = Budget::start(&config, None);
        std::thread::sleep(Duration::from_millis(5));
        assert!(budget.exhausted());
    }
}
