//! MCTS integration tests using the bundled games.

use ucb_mcts::core::PlayerId;
use ucb_mcts::games::nim::{Nim, NimRule, NimState, Take};
use ucb_mcts::games::tictactoe::{TicTacToe, TicTacToeState};
use ucb_mcts::mcts::{
    Coverage, Fallback, MCTSConfig, MCTSSearch, RootStateError, SearchError, StopSignal,
};

// =============================================================================
// Convergence Tests
// =============================================================================

#[test]
fn test_misere_nim_three_tokens_takes_two() {
    // Whoever takes the last token loses: leaving one token wins.
    let mut correct = 0;
    for seed in 0..20 {
        let game = Nim::new(3, 2, NimRule::Misere);
        let root = game.initial_state();
        let mut search = MCTSSearch::new(game, MCTSConfig::default().with_seed(seed));

        let outcome = search.search(&root, 2000).unwrap();
        assert!(outcome.is_confident(), "seed {seed} should cover the root");
        if outcome.action == Take(2) {
            correct += 1;
        }
    }
    assert_eq!(correct, 20, "every seed should find the forced win");
}

#[test]
fn test_normal_nim_moves_to_losing_position() {
    // Normal play, take 1..=2: multiples of 3 lose for the player to move.
    for tokens in [4u32, 5, 7, 8] {
        let game = Nim::new(tokens, 2, NimRule::Normal);
        let root = game.initial_state();
        let mut search = MCTSSearch::new(game.clone(), MCTSConfig::default().with_seed(9));

        let outcome = search.search(&root, 5000).unwrap();
        let left = tokens - outcome.action.count();
        assert!(
            game.is_losing_position(left),
            "from {tokens} the engine left {left}, a winning position for the opponent"
        );
    }
}

#[test]
fn test_tictactoe_takes_immediate_win() {
    let game = TicTacToe::new();
    let root = TicTacToeState::parse("XX.OO....").unwrap();
    let mut search = MCTSSearch::new(game, MCTSConfig::default());

    let outcome = search.search(&root, 3000).unwrap();
    assert_eq!(outcome.action, 2);
}

#[test]
fn test_tictactoe_blocks_opponent_line() {
    // Noughts to move; crosses threaten the top row.
    let game = TicTacToe::new();
    let root = TicTacToeState::parse("XX..O....").unwrap();
    assert_eq!(root.to_move, PlayerId::new(1));
    let mut search = MCTSSearch::new(game, MCTSConfig::default().with_seed(3));

    let outcome = search.search(&root, 5000).unwrap();
    assert_eq!(outcome.action, 2);
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[test]
fn test_mcts_deterministic_with_seed() {
    let config = MCTSConfig::default()
        .with_seed(12345)
        .with_persistence(true);
    let game = TicTacToe::new();
    let root = game.initial_state();

    let mut search1 = MCTSSearch::new(game, config.clone());
    let mut search2 = MCTSSearch::new(game, config);

    let outcome1 = search1.search(&root, 500).unwrap();
    let outcome2 = search2.search(&root, 500).unwrap();

    assert_eq!(outcome1, outcome2, "Same seed should produce same outcome");
    assert_eq!(search1.stats_table(), search2.stats_table());
}

#[test]
fn test_mcts_different_seeds_complete() {
    let game = TicTacToe::new();
    let root = game.initial_state();

    let mut search1 = MCTSSearch::new(game, MCTSConfig::default().with_seed(111));
    let mut search2 = MCTSSearch::new(game, MCTSConfig::default().with_seed(222));

    search1.search(&root, 300).unwrap();
    search2.search(&root, 300).unwrap();

    assert_eq!(search1.search_stats().iterations, 300);
    assert_eq!(search2.search_stats().iterations, 300);
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_persistent_plays_are_monotonic() {
    let game = Nim::new(10, 3, NimRule::Normal);
    let root = game.initial_state();
    let config = MCTSConfig::default().with_persistence(true);
    let mut search = MCTSSearch::new(game, config);

    search.search(&root, 400).unwrap();
    let first = search.stats_table().unwrap().clone();

    search.search(&root, 400).unwrap();
    let second = search.stats_table().unwrap();

    assert!(second.len() >= first.len());
    for (state, action, entry) in first.iter() {
        let later = second.get(state, action).expect("entries are never deleted");
        assert!(later.plays >= entry.plays);
        assert!(later.wins >= entry.wins);
    }
    assert_eq!(second.total_plays(&root), 800);
}

#[test]
fn test_persistent_table_shared_across_roots() {
    let game = Nim::new(6, 2, NimRule::Normal);
    let root = game.initial_state();
    let config = MCTSConfig::default().with_persistence(true);
    let mut search = MCTSSearch::new(game, config);

    search.search(&root, 300).unwrap();
    let child = NimState {
        tokens: 5,
        to_move: PlayerId::new(1),
    };
    let before = search.stats_table().unwrap().total_plays(&child);

    search.search(&child, 100).unwrap();
    let after = search.stats_table().unwrap().total_plays(&child);

    assert_eq!(after, before + 100);
}

#[test]
fn test_non_persistent_search_exposes_no_table() {
    let game = Nim::new(6, 2, NimRule::Normal);
    let root = game.initial_state();
    let mut search = MCTSSearch::new(game, MCTSConfig::default());

    search.search(&root, 50).unwrap();
    assert!(search.stats_table().is_none());
    assert!(search.into_stats_table().is_none());
}

#[test]
fn test_into_stats_table_hands_over_statistics() {
    let game = Nim::new(6, 2, NimRule::Normal);
    let root = game.initial_state();
    let mut search = MCTSSearch::new(game, MCTSConfig::default().with_persistence(true));

    search.search(&root, 50).unwrap();
    let table = search.into_stats_table().unwrap();
    assert_eq!(table.total_plays(&root), 50);
}

// =============================================================================
// Coverage and Error Tests
// =============================================================================

#[test]
fn test_single_iteration_flags_incomplete_coverage() {
    let game = Nim::new(5, 2, NimRule::Normal);
    let root = game.initial_state();
    let mut search = MCTSSearch::new(game, MCTSConfig::default());

    let outcome = search.search(&root, 1).unwrap();
    assert_eq!(outcome.coverage, Coverage::Incomplete);
    assert!(!outcome.is_confident());
    assert!(outcome.action == Take(1) || outcome.action == Take(2));
}

#[test]
fn test_best_covered_fallback() {
    let game = TicTacToe::new();
    let root = game.initial_state();
    let config = MCTSConfig::default().with_fallback(Fallback::BestCovered);
    let mut search = MCTSSearch::new(game, config);

    // Nine root actions cannot all be tried in three iterations.
    let outcome = search.search(&root, 3).unwrap();
    assert_eq!(outcome.coverage, Coverage::Incomplete);
    let chosen = outcome
        .root_stats
        .iter()
        .find(|(a, _)| *a == outcome.action)
        .unwrap();
    assert!(chosen.1.is_some(), "fallback should pick a tried action");
}

#[test]
fn test_terminal_root_rejected() {
    let game = Nim::new(0, 2, NimRule::Normal);
    let root = game.initial_state();
    let mut search = MCTSSearch::new(game, MCTSConfig::default());

    assert_eq!(
        search.search(&root, 100),
        Err(SearchError::InvalidRootState(RootStateError::Terminal))
    );
}

#[test]
fn test_finished_tictactoe_rejected() {
    let game = TicTacToe::new();
    let root = TicTacToeState::parse("XXXOO....").unwrap();
    let mut search = MCTSSearch::new(game, MCTSConfig::default());

    assert!(matches!(
        search.search(&root, 10),
        Err(SearchError::InvalidRootState(RootStateError::Terminal))
    ));
}

#[test]
fn test_invalid_config_rejected() {
    let game = Nim::new(5, 2, NimRule::Normal);
    let root = game.initial_state();
    let mut search = MCTSSearch::new(game, MCTSConfig::default().with_exploration(-0.5));

    assert!(matches!(
        search.search(&root, 10),
        Err(SearchError::InvalidConfig(_))
    ));
}

#[test]
fn test_explicit_search_ignores_run_budget() {
    let game = Nim::new(5, 2, NimRule::Normal);
    let root = game.initial_state();
    let mut search = MCTSSearch::new(game, MCTSConfig::default().with_iterations(0));

    let outcome = search.search(&root, 10).unwrap();
    assert_eq!(outcome.iterations, 10);
}

// =============================================================================
// Budget Tests
// =============================================================================

#[test]
fn test_stop_signal_from_another_thread() {
    let game = Nim::new(30, 3, NimRule::Normal);
    let root = game.initial_state();
    let signal = StopSignal::new();
    let mut search =
        MCTSSearch::new(game, MCTSConfig::default()).with_stop_signal(signal.clone());

    let stopper = std::thread::spawn(move || signal.stop());
    stopper.join().unwrap();

    let outcome = search.search(&root, 1_000_000).unwrap();
    assert_eq!(outcome.iterations, 0);
    assert!(search.search_stats().stopped_early);
}

#[test]
fn test_time_limit_cuts_search_short() {
    let game = TicTacToe::new();
    let root = game.initial_state();
    let config = MCTSConfig::default().with_time_limit_ms(20);
    let mut search = MCTSSearch::new(game, config);

    let outcome = search.search(&root, u32::MAX).unwrap();
    assert!(outcome.iterations < u32::MAX);
    assert!(outcome.iterations > 0);
    assert!(search.search_stats().stopped_early);
}
