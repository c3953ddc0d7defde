//! Monte Carlo playouts (random game simulation).
//!
//! A playout plays random legal moves, alternating colors, until both sides
//! pass in a row or the move cap is hit, then scores the final position.
//! Moves come from the fast sampler, which never fills the mover's own eyes,
//! so living groups usually survive to the end.

use crate::board::{Board, Color};
use crate::constants::{BLOWOUT_MARGIN, ROLLOUT_CANDIDATES, ROLLOUT_CHECK_INTERVAL, ROLLOUT_MAX_MOVES};
use crate::movegen::sample_legal_moves;
use crate::scoring::KomiScore;

/// Outcome of a single playout.
#[derive(Debug, Clone)]
pub struct Playout {
    /// Final position of the simulated game
    pub board: Board,
    /// Stones placed during the playout (passes not counted)
    pub moves: usize,
    /// Score of the final position under the playout komi
    pub score: KomiScore,
}

impl Playout {
    /// Winning color, or `None` for a draw.
    pub fn winner(&self) -> Option<Color> {
        self.score.winner
    }
}

/// Play a random game from `board` with `to_move` moving first.
///
/// Every [`ROLLOUT_CHECK_INTERVAL`] moves the score is checked and the playout
/// stops early if one side leads by more than [`BLOWOUT_MARGIN`].
pub fn mcplayout(board: &Board, to_move: Color, komi: f64, rng: &mut fastrand::Rng) -> Playout {
    let mut board = board.clone();
    let mut color = to_move;
    let mut passes = 0;
    let mut moves = 0;

    while moves < ROLLOUT_MAX_MOVES {
        if moves > 0 && moves % ROLLOUT_CHECK_INTERVAL == 0 {
            let margin = board.score_with_komi(komi).margin();
            if margin.abs() > BLOWOUT_MARGIN {
                break;
            }
        }

        let candidates = sample_legal_moves(&board, color, ROLLOUT_CANDIDATES, rng);
        if candidates.is_empty() {
            passes += 1;
            if passes >= 2 {
                break;
            }
            color = color.opponent();
            continue;
        }

        let mv = candidates[rng.usize(..candidates.len())];
        board = match board.apply(mv) {
            Ok(next) => next,
            Err(e) => unreachable!("sampled move {mv:?} rejected by the rules: {e}"),
        };
        passes = 0;
        moves += 1;
        color = color.opponent();
    }

    let score = board.score_with_komi(komi);
    Playout {
        board,
        moves,
        score,
    }
}
