//! Flip-Gomoku command line.
//!
//! ## Usage
//!
//! - `flip-gomoku` - Start the text protocol on stdin/stdout
//! - `flip-gomoku protocol` - Same as above
//! - `flip-gomoku demo` - Play random turns until someone wins
//! - `flip-gomoku walkthrough` - Play the scripted opening, printing each step

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use flip_gomoku::board::WinRule;
use flip_gomoku::config::GameConfig;
use flip_gomoku::constants::{DEFAULT_COLS, DEFAULT_ROWS};
use flip_gomoku::protocol::ProtocolEngine;
use flip_gomoku::session::{SharedBoard, WALKTHROUGH};

/// Flip-Gomoku: five in a row with Reversi-style flipping
#[derive(Parser)]
#[command(name = "flip-gomoku")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of columns
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: usize,

    /// Number of rows
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,

    /// Only a line of exactly five wins (overlines do not count)
    #[arg(long)]
    exact_five: bool,

    /// Log filter, e.g. `debug` or `flip_gomoku=trace`. Falls back to RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read protocol commands from stdin and answer on stdout
    Protocol {
        /// Seed for the `random` command
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play random turns on one shared board and print every reply
    Demo {
        /// Seed for the random moves
        #[arg(long)]
        seed: Option<u64>,
        /// Stop after this many turns if nobody has won
        #[arg(long, default_value_t = 500)]
        max_moves: usize,
    },
    /// Play a fixed move sequence, printing the board and status after each move
    Walkthrough,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            cols: self.cols,
            rows: self.rows,
            win_rule: if self.exact_five { WinRule::ExactFive } else { WinRule::Freestyle },
        }
    }
}

fn rng(seed: Option<u64>) -> fastrand::Rng {
    seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed)
}

fn init_tracing(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).context("invalid --log-level")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref())?;
    let config = cli.game_config();

    match cli.command {
        Some(Commands::Demo { seed, max_moves }) => run_demo(config, seed, max_moves),
        Some(Commands::Walkthrough) => run_walkthrough(config),
        Some(Commands::Protocol { seed }) => run_protocol(config, seed),
        None => run_protocol(config, None),
    }
}

fn run_protocol(config: GameConfig, seed: Option<u64>) -> Result<()> {
    let mut engine = ProtocolEngine::new(config, rng(seed)).context("cannot create board")?;
    let stdin = io::stdin();
    engine
        .run(stdin.lock(), io::stdout())
        .context("protocol I/O failed")
}

fn run_demo(config: GameConfig, seed: Option<u64>, max_moves: usize) -> Result<()> {
    let board = config.build_board().context("cannot create board")?;
    let shared = SharedBoard::new(board);
    let mut rng = rng(seed);

    info!(cols = config.cols, rows = config.rows, max_moves, "starting demo");
    for turn in 1..=max_moves {
        let reply = shared.random_turn(&mut rng);
        println!("turn {turn}:\n{reply}\n");
        if shared.is_game_over().0 {
            return Ok(());
        }
    }
    println!("No winner after {max_moves} turns.");
    Ok(())
}

fn run_walkthrough(config: GameConfig) -> Result<()> {
    let board = config.build_board().context("cannot create board")?;
    let shared = SharedBoard::new(board);
    println!("{}\n", shared.render());

    for &(player, col, row) in WALKTHROUGH {
        match shared.place(player, col, row) {
            Ok(placement) => println!(
                "player {player} at ({col}, {row}): flipped {}, line {}",
                placement.flipped.len(),
                placement.line_length
            ),
            Err(e) => println!("player {player} at ({col}, {row}) rejected: {e}"),
        }
        println!("{}", shared.render());
        match shared.is_game_over() {
            (true, Some(winner)) => println!("over, player {winner} won\n"),
            _ => println!("not over\n"),
        }
    }
    Ok(())
}
