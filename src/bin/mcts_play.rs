//! mcts-play - watch the engine play a bundled game against itself.
//!
//! Each move is chosen by a fresh search from the current position. Set
//! `RUST_LOG=ucb_mcts=trace` to see every phase event.

use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use ucb_mcts::games::nim::{Nim, NimRule};
use ucb_mcts::games::tictactoe::TicTacToe;
use ucb_mcts::mcts::{Fallback, MCTSConfig, MCTSSearch, SearchError, TracingObserver};
use ucb_mcts::rules::Game;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GameKind {
    Nim,
    Misere,
    Tictactoe,
}

#[derive(Debug, Parser)]
#[command(name = "mcts-play", about = "Self-play a bundled game with UCB1 MCTS")]
struct Args {
    /// Game to play
    #[arg(long, value_enum, default_value = "tictactoe")]
    game: GameKind,

    /// Iterations per move
    #[arg(long, default_value_t = 2000)]
    iterations: u32,

    /// UCB1 exploration constant
    #[arg(long, default_value_t = 1.4)]
    exploration: f64,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Per-move time limit in milliseconds (0 = none)
    #[arg(long, default_value_t = 0)]
    time_limit_ms: u64,

    /// Starting pile for the Nim variants
    #[arg(long, default_value_t = 10)]
    tokens: u32,

    /// Maximum tokens taken per Nim move
    #[arg(long, default_value_t = 2)]
    max_take: u32,

    /// Pick the best tried root action instead of a random one when coverage is incomplete
    #[arg(long)]
    best_covered: bool,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

/// Play one game to the end, searching afresh before every move.
fn self_play<G>(game: G, root: G::State, config: MCTSConfig) -> Result<(), SearchError>
where
    G: Game + Clone + 'static,
{
    let mut state = root;
    let mut ply = 0u32;
    let mut search = MCTSSearch::new(game.clone(), config).with_observer(TracingObserver);

    while !game.is_terminal(&state) {
        let player = game.current_player(&state);
        let outcome = search.run(&state)?;
        if !outcome.is_confident() {
            warn!(ply, "root not fully explored, move chosen by fallback");
        }
        info!(
            ply,
            player = ?player,
            action = ?outcome.action,
            coverage = ?outcome.coverage,
            iterations = outcome.iterations,
            "move"
        );
        state = game.next_state(&state, &outcome.action);
        ply += 1;
    }

    match game.winner(&state) {
        Some(winner) => info!(winner = ?winner, plies = ply, "game over"),
        None => info!(plies = ply, "game drawn"),
    }
    Ok(())
}

fn main() -> Result<(), SearchError> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = MCTSConfig::default()
        .with_iterations(args.iterations)
        .with_exploration(args.exploration)
        .with_seed(args.seed)
        .with_time_limit_ms(args.time_limit_ms)
        .with_fallback(if args.best_covered {
            Fallback::BestCovered
        } else {
            Fallback::Uniform
        });
    config.validate()?;
    info!(game = ?args.game, iterations = config.iterations, seed = config.seed, "starting self-play");

    match args.game {
        GameKind::Nim | GameKind::Misere => {
            let rule = match args.game {
                GameKind::Misere => NimRule::Misere,
                _ => NimRule::Normal,
            };
            let game = Nim::new(args.tokens, args.max_take.max(1), rule);
            let root = game.initial_state();
            self_play(game, root, config)
        }
        GameKind::Tictactoe => {
            let game = TicTacToe::new();
            let root = game.initial_state();
            self_play(game, root, config)
        }
    }
}
