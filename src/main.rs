//! gogo: Go rules engine and MCTS player.
//!
//! ## Usage
//!
//! - `gogo` - Show a self-play demo
//! - `gogo gtp` - Start GTP server for GUI integration
//! - `gogo play --color white` - Play against the engine in the terminal
//! - `gogo demo` - Run the self-play demo

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use gogo::board::{Board, Color, Move};
use gogo::constants::{DEFAULT_BOARD_SIZE, DEFAULT_KOMI, N_SIMS};
use gogo::gtp::GtpEngine;
use gogo::mcts::{Budget, MctsBot, MctsConfig};
use gogo::session::Session;

/// gogo: A Go engine driven by Monte Carlo Tree Search
#[derive(Parser)]
#[command(name = "gogo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board size (1 to 19)
    #[arg(long, global = true, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    /// Points added to White's score
    #[arg(long, global = true, default_value_t = DEFAULT_KOMI)]
    komi: f64,

    /// Simulations per move
    #[arg(long, global = true, conflicts_with = "time")]
    sims: Option<usize>,

    /// Thinking time per move in milliseconds
    #[arg(long, global = true)]
    time: Option<u64>,

    /// Start every search from a fresh tree
    #[arg(long, global = true)]
    no_reuse: bool,

    /// Seed for reproducible searches
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp,
    /// Play against the engine in the terminal
    Play {
        /// Your color
        #[arg(long, value_enum, default_value_t = Side::Black)]
        color: Side,
    },
    /// Let the engine play itself and print the game
    Demo,
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    Black,
    White,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Color::Black,
            Side::White => Color::White,
        }
    }
}

impl Cli {
    fn mcts_config(&self) -> MctsConfig {
        let budget = match (self.sims, self.time) {
            (_, Some(ms)) => Budget::Time(Duration::from_millis(ms)),
            (Some(sims), None) => Budget::Simulations(sims),
            (None, None) => Budget::Simulations(N_SIMS),
        };
        MctsConfig {
            budget,
            reuse_tree: !self.no_reuse,
            komi: self.komi,
            seed: self.seed,
            ..MctsConfig::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gogo=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.mcts_config();

    match cli.command {
        Some(Commands::Gtp) => {
            let mut engine = GtpEngine::new(cli.size, config);
            engine.run(io::stdin().lock(), io::stdout())?;
        }
        Some(Commands::Play { color }) => run_play(cli.size, cli.komi, config, color.into())?,
        Some(Commands::Demo) | None => run_demo(cli.size, cli.komi, config),
    }
    Ok(())
}

/// Human vs engine on stdin/stdout.
fn run_play(size: usize, komi: f64, config: MctsConfig, human: Color) -> anyhow::Result<()> {
    let mut session = Session::new(size);
    let mut bot = MctsBot::new(config);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("You are {human}. Enter moves as `x y`, or `pass`, `undo`, `resign`, `quit`.\n");
    while !session.is_over() {
        if session.to_move() != human {
            let mv = engine_move(&mut bot, &session, komi);
            session.play(mv).context("engine produced an illegal move")?;
            report(&session, mv);
            continue;
        }

        println!("{}", session.board());
        print!("{human}> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;
        let result = match line.trim() {
            "" => continue,
            "resign" => {
                session.resign();
                Ok(())
            }
            "undo" => {
                // Take back the engine's reply as well as our own move.
                bot.reset();
                session.undo().and_then(|()| session.undo())
            }
            input => match parse_move(session.board(), input, human) {
                Some(mv) if mv.is_quit() => return Ok(()),
                Some(mv) => session.play(mv),
                None => {
                    println!("Unrecognized input: {input}");
                    continue;
                }
            },
        };
        if let Err(e) = result {
            println!("{e}");
        }
    }

    println!("{}", session.board());
    print_result(&session, komi);
    Ok(())
}

/// Parse `x y`, `pass` or `quit` into a move for `color`.
fn parse_move(board: &Board, input: &str, color: Color) -> Option<Move> {
    let words: Vec<&str> = input.split_whitespace().collect();
    match words.as_slice() {
        ["pass"] => Some(Move::pass(color)),
        ["quit"] => Some(Move::quit(color)),
        [x, y] => {
            let (x, y) = (x.parse::<usize>().ok()?, y.parse::<usize>().ok()?);
            board
                .in_bounds(x, y)
                .then(|| Move::new(board.point(x, y), color))
        }
        _ => None,
    }
}

/// Engine self-play.
fn run_demo(size: usize, komi: f64, config: MctsConfig) {
    println!("gogo: Go MCTS engine self-play on {size}x{size}\n");

    let mut session = Session::new(size);
    let mut bot = MctsBot::new(config);
    let max_moves = 2 * session.board().size().pow(2);

    while !session.is_over() && session.move_count() < max_moves {
        let mv = engine_move(&mut bot, &session, komi);
        if let Err(e) = session.play(mv) {
            tracing::warn!("demo stopped: {e}");
            break;
        }
        report(&session, mv);
        if let Some(stats) = bot.last_stats() {
            println!(
                "    {} simulations, winrate {:.1}%",
                stats.simulations,
                stats.winrate * 100.0
            );
        }
    }

    println!("\n{}", session.board());
    print_result(&session, komi);
}

/// Search for the side to move, or pass back when passing already wins.
fn engine_move(bot: &mut MctsBot, session: &Session, komi: f64) -> Move {
    let color = session.to_move();
    if session.pass_wins(color, komi) {
        return Move::pass(color);
    }
    bot.select_move(session.board(), color)
}

fn report(session: &Session, mv: Move) {
    if mv.is_pass() {
        println!("{} passes", mv.color);
    } else {
        let (x, y) = session.board().xy(mv.point);
        println!("{} plays {x} {y}", mv.color);
    }
}

fn print_result(session: &Session, komi: f64) {
    if let Some(loser) = session.resigned() {
        println!("{loser} resigns, {} wins", loser.opponent());
        return;
    }
    let score = session.final_score(komi);
    println!(
        "Final score: Black {} White {} ({score})",
        score.black, score.white
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move() {
        let board = Board::new(9);
        let mv = parse_move(&board, "3 4", Color::White).unwrap();
        assert_eq!(mv, Move::new(board.point(3, 4), Color::White));
        assert!(parse_move(&board, "pass", Color::Black).unwrap().is_pass());

        let quit = parse_move(&board, "quit", Color::Black).unwrap();
        assert!(quit.is_quit());
        assert!(!quit.is_pass());

        assert!(parse_move(&board, "0 4", Color::Black).is_none());
        assert!(parse_move(&board, "10 1", Color::Black).is_none());
        assert!(parse_move(&board, "a b", Color::Black).is_none());
        assert!(parse_move(&board, "resign now", Color::Black).is_none());
    }
}
