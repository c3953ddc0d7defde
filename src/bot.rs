//! Computer players.
//!
//! Front-ends talk to a [`Bot`] and never care which search is behind it.

use crate::board::{Board, Color, Move};
use crate::heuristics::Evaluator;
use crate::mcts::MctsBot;
use crate::movegen::legal_moves;

/// Anything that can pick a move for `color` on `board`.
pub trait Bot {
    /// Choose a move; returns [`Move::pass`] when there is nothing to play.
    fn select_move(&mut self, board: &Board, color: Color) -> Move;

    /// Drop any state carried between moves (new game, undo).
    fn reset(&mut self) {}
}

impl Bot for MctsBot {
    fn select_move(&mut self, board: &Board, color: Color) -> Move {
        MctsBot::select_move(self, board, color)
    }

    fn reset(&mut self) {
        MctsBot::reset(self);
    }
}

/// One-ply player: plays the legal move whose resulting position the
/// evaluator likes best. Ties go to the lowest point.
#[derive(Debug, Clone, Default)]
pub struct GreedyBot<E> {
    evaluator: E,
}

impl<E: Evaluator> GreedyBot<E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }
}

impl<E: Evaluator> Bot for GreedyBot<E> {
    fn select_move(&mut self, board: &Board, color: Color) -> Move {
        let mut best: Option<(Move, f64)> = None;
        for mv in legal_moves(board, color) {
            let Ok(next) = board.apply(mv) else {
                continue;
            };
            let value = self.evaluator.evaluate(&next, color);
            if best.is_none_or(|(_, b)| value > b) {
                best = Some((mv, value));
            }
        }
        best.map(|(mv, _)| mv).unwrap_or(Move::pass(color))
    }
}
