//! Legal move generation.
//!
//! [`legal_moves`] tries every empty point and is exact. [`sample_legal_moves`]
//! trades completeness for speed: it draws random points, skips likely eye
//! fills, and stops as soon as it has enough candidates. Playouts use the
//! sampler; the search tree uses the exhaustive list.

use crate::board::{Board, Color, Move};
use crate::constants::FAST_MOVES_MIN;
use crate::heuristics::is_eye_fill;

/// Every legal placement for `color`, in row-major order.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    board
        .points()
        .filter(|&p| board.color(p) == Color::Empty)
        .map(|p| Move::new(p, color))
        .filter(|&mv| board.is_legal(mv))
        .collect()
}

/// Up to `max` distinct legal placements for `color`, chosen at random.
///
/// Points are drawn without replacement, at most `min(size², 3 * max)` times,
/// and likely eye fills are skipped. If the random phase finds fewer than
/// [`FAST_MOVES_MIN`] moves, every empty point not yet returned is scanned in
/// row-major order to top the list up. That scan only checks legality, so a
/// side whose last legal moves are its own eyes still gets them.
pub fn sample_legal_moves(
    board: &Board,
    color: Color,
    max: usize,
    rng: &mut fastrand::Rng,
) -> Vec<Move> {
    let mut moves = Vec::with_capacity(max);
    if max == 0 {
        return moves;
    }

    let candidate = |mv: Move| {
        board.color(mv.point) == Color::Empty && !is_eye_fill(board, mv) && board.is_legal(mv)
    };

    let mut pool: Vec<_> = board.points().collect();
    let area = pool.len();
    let attempts = area.min(max.saturating_mul(3));
    let mut tried = 0;
    while tried < attempts && moves.len() < max {
        let j = rng.usize(tried..area);
        pool.swap(tried, j);
        let mv = Move::new(pool[tried], color);
        tried += 1;
        if candidate(mv) {
            moves.push(mv);
        }
    }

    if moves.len() < FAST_MOVES_MIN {
        for p in board.points() {
            if moves.len() >= max {
                break;
            }
            let mv = Move::new(p, color);
            if board.color(p) == Color::Empty && !moves.contains(&mv) && board.is_legal(mv) {
                moves.push(mv);
            }
        }
    }
    moves
}
