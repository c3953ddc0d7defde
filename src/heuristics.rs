//! Cheap positional heuristics.
//!
//! These are pure functions over a [`Board`]. The eye-fill test screens moves in
//! the fast move generator; the evaluators score whole positions for
//! evaluator-driven players such as [`crate::bot::GreedyBot`].

use crate::board::{Board, Color, Move, Point};
use crate::constants::{
    DEFAULT_KOMI, HYBRID_INFLUENCE_WEIGHT, HYBRID_SCORE_WEIGHT, INFLUENCE_PER_LIBERTY,
};

/// Check if playing `mv` would most likely fill one of the mover's own eyes.
///
/// True when the point is empty, no in-bounds neighbor is empty, and at least
/// three in-bounds neighbors are the mover's stones. Edge and corner eyes have
/// fewer in-bounds neighbors, so a corner point never qualifies.
pub fn is_eye_fill(board: &Board, mv: Move) -> bool {
    if board.color(mv.point) != Color::Empty {
        return false;
    }
    let mut friendly = 0;
    for n in board.neighbors(mv.point) {
        match board.color(n) {
            Color::Empty => return false,
            c if c == mv.color => friendly += 1,
            _ => {}
        }
    }
    friendly >= 3
}

/// Stones of `color` plus a fractional bonus for every empty point next to one.
///
/// An empty point shared by two stones counts twice.
pub fn influence_score(board: &Board, color: Color) -> f64 {
    board
        .points()
        .filter(|&p| board.color(p) == color)
        .map(|p| {
            let open = board
                .neighbors(p)
                .iter()
                .filter(|&&n| board.color(n) == Color::Empty)
                .count();
            1.0 + open as f64 * INFLUENCE_PER_LIBERTY
        })
        .sum()
}

/// Bonus for points near an edge: `(4 - d) * 0.1` within three lines, else 0.
///
/// `d` is the distance to the nearest edge (0 on the first line).
pub fn corner_proximity_bonus(board: &Board, pt: Point) -> f64 {
    let (x, y) = board.xy(pt);
    if !board.in_bounds(x, y) {
        return 0.0;
    }
    let size = board.size();
    let d = (x - 1).min(size - x).min(y - 1).min(size - y);
    if d <= 3 { (4 - d) as f64 * 0.1 } else { 0.0 }
}

/// Scores a position from one player's point of view (positive is good for `color`).
pub trait Evaluator {
    fn evaluate(&self, board: &Board, color: Color) -> f64;
}

/// Area score difference under standard komi.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEvaluator;

impl Evaluator for ScoreEvaluator {
    fn evaluate(&self, board: &Board, color: Color) -> f64 {
        let diff = board.score_with_komi(DEFAULT_KOMI).margin();
        if color == Color::White { -diff } else { diff }
    }
}

/// Influence difference.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfluenceEvaluator;

impl Evaluator for InfluenceEvaluator {
    fn evaluate(&self, board: &Board, color: Color) -> f64 {
        influence_score(board, color) - influence_score(board, color.opponent())
    }
}

/// Weighted blend of [`ScoreEvaluator`] and [`InfluenceEvaluator`].
#[derive(Debug, Clone, Copy)]
pub struct HybridEvaluator {
    pub score_weight: f64,
    pub influence_weight: f64,
}

impl Default for HybridEvaluator {
    fn default() -> Self {
        Self {
            score_weight: HYBRID_SCORE_WEIGHT,
            influence_weight: HYBRID_INFLUENCE_WEIGHT,
        }
    }
}

impl Evaluator for HybridEvaluator {
    fn evaluate(&self, board: &Board, color: Color) -> f64 {
        self.score_weight * ScoreEvaluator.evaluate(board, color)
            + self.influence_weight * InfluenceEvaluator.evaluate(board, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(board: &Board, moves: &[(usize, usize, Color)]) -> Board {
        moves.iter().fold(board.clone(), |b, &(x, y, c)| {
            b.apply(Move::new(b.point(x, y), c)).unwrap()
        })
    }

    #[test]
    fn test_eye_fill_center_and_edge() {
        let board = play(
            &Board::new(9),
            &[
                (5, 4, Color::Black),
                (4, 5, Color::Black),
                (6, 5, Color::Black),
                (5, 6, Color::Black),
                (4, 1, Color::Black),
                (6, 1, Color::Black),
                (5, 2, Color::Black),
            ],
        );
        let center = board.point(5, 5);
        assert!(is_eye_fill(&board, Move::new(center, Color::Black)));
        assert!(!is_eye_fill(&board, Move::new(center, Color::White)));
        assert!(is_eye_fill(&board, Move::new(board.point(5, 1), Color::Black)));
        // Open point next to a single stone.
        assert!(!is_eye_fill(&board, Move::new(board.point(5, 3), Color::Black)));
    }

    #[test]
    fn test_corner_never_eye_fill() {
        let board = play(&Board::new(9), &[(2, 1, Color::Black), (1, 2, Color::Black)]);
        assert!(!is_eye_fill(&board, Move::new(board.point(1, 1), Color::Black)));
    }

    #[test]
    fn test_influence() {
        let board = play(&Board::new(9), &[(5, 5, Color::Black), (1, 1, Color::White)]);
        assert!((influence_score(&board, Color::Black) - 2.2).abs() < 1e-9);
        assert!((influence_score(&board, Color::White) - 1.6).abs() < 1e-9);
        assert!(InfluenceEvaluator.evaluate(&board, Color::Black) > 0.0);
        assert!(InfluenceEvaluator.evaluate(&board, Color::White) < 0.0);
    }

    #[test]
    fn test_evaluators_are_antisymmetric() {
        let board = play(&Board::new(9), &[(3, 3, Color::Black), (7, 7, Color::White)]);
        let evaluators: [&dyn Evaluator; 3] =
            [&ScoreEvaluator, &InfluenceEvaluator, &HybridEvaluator::default()];
        for e in evaluators {
            let b = e.evaluate(&board, Color::Black);
            let w = e.evaluate(&board, Color::White);
            assert!((b + w).abs() < 1e-9);
        }
        // Komi puts white ahead on a symmetric board.
        assert!(ScoreEvaluator.evaluate(&board, Color::White) > 0.0);
    }

    #[test]
    fn test_corner_proximity() {
        let board = Board::new(9);
        assert!((corner_proximity_bonus(&board, board.point(1, 1)) - 0.4).abs() < 1e-9);
        assert!((corner_proximity_bonus(&board, board.point(3, 5)) - 0.2).abs() < 1e-9);
        assert!((corner_proximity_bonus(&board, board.point(4, 5)) - 0.1).abs() < 1e-9);
        assert_eq!(corner_proximity_bonus(&board, board.point(5, 5)), 0.0);
        assert_eq!(corner_proximity_bonus(&board, 0), 0.0);
    }
}
