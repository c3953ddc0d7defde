//! gogo: A Go rules engine with a Monte Carlo Tree Search player.
//!
//! Boards are immutable snapshots: [`board::Board::apply`] validates a move
//! and returns the next position, leaving the original untouched. That makes
//! it cheap for the search to keep one board per tree node.
//!
//! ## Modules
//!
//! - [`constants`] - Board limits and engine parameters
//! - [`board`] - Stones, groups, liberties, captures and ko
//! - [`union_find`] - Disjoint sets backing group membership
//! - [`zobrist`] - Position hashing for superko
//! - [`scoring`] - Area scoring and dead-stone cleanup
//! - [`movegen`] - Exhaustive and sampled legal moves
//! - [`heuristics`] - Eye detection and position evaluators
//! - [`playout`] - Random game simulation for position evaluation
//! - [`mcts`] - Monte Carlo Tree Search with UCB1
//! - [`bot`] - The `Bot` trait and a greedy evaluator-driven player
//! - [`session`] - A game with turn order, passes and undo/redo
//! - [`gtp`] - Go Text Protocol front-end
//!
//! ## Example
//!
//! ```
//! use gogo::board::{Board, Color, Move};
//! use gogo::mcts::MctsBot;
//!
//! // Create a new game and play a move
//! let board = Board::new(9);
//! let board = board.apply(Move::new(board.point(5, 5), Color::Black)).unwrap();
//!
//! // Run MCTS to find White's reply
//! let mut bot = MctsBot::with_simulations(100);
//! let reply = bot.select_move(&board, Color::White);
//! assert!(board.is_legal(reply));
//! ```

pub mod board;
pub mod bot;
pub mod constants;
pub mod gtp;
pub mod heuristics;
pub mod mcts;
pub mod movegen;
pub mod playout;
pub mod scoring;
pub mod session;
pub mod union_find;
pub mod zobrist;
