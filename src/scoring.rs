//! Area scoring and end-of-game cleanup.
//!
//! Scoring follows area (Chinese) rules: each side gets its stones on the board
//! plus every empty region that only its stones border. Regions touching both
//! colors, or none, are dame.
//!
//! Dead stones are found with a cheap local heuristic rather than a
//! life-and-death search, so contested positions may be misjudged.

use std::collections::VecDeque;

use crate::board::{Board, Color, Group, Point};

/// Area score breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub black: usize,
    pub white: usize,
    pub black_stones: usize,
    pub white_stones: usize,
    pub black_area: usize,
    pub white_area: usize,
    pub dame: usize,
}

/// Totals after komi and the resulting winner (`None` is a draw).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KomiScore {
    pub black: f64,
    pub white: f64,
    pub winner: Option<Color>,
}

impl KomiScore {
    /// Black's lead (negative when White is ahead).
    pub fn margin(&self) -> f64 {
        self.black - self.white
    }
}

impl std::fmt::Display for KomiScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.winner {
            Some(Color::Black) => write!(f, "B+{}", self.margin()),
            Some(Color::White) => write!(f, "W+{}", -self.margin()),
            _ => write!(f, "0"),
        }
    }
}

impl Board {
    /// Count stones and territory for both colors.
    pub fn area_score(&self) -> Score {
        let mut score = Score::default();
        let mut visited = vec![false; self.stride_len()];

        for p in self.points() {
            if visited[p] {
                continue;
            }
            match self.color(p) {
                Color::Black => score.black_stones += 1,
                Color::White => score.white_stones += 1,
                Color::Empty => {
                    let (region, owner) = self.flood_fill_region(p, &mut visited);
                    match owner {
                        Some(Color::Black) => score.black_area += region,
                        Some(Color::White) => score.white_area += region,
                        _ => score.dame += region,
                    }
                }
                Color::Border => {}
            }
            visited[p] = true;
        }

        score.black = score.black_stones + score.black_area;
        score.white = score.white_stones + score.white_area;
        score
    }

    /// Area score with `komi` added to White.
    pub fn score_with_komi(&self, komi: f64) -> KomiScore {
        let score = self.area_score();
        let black = score.black as f64;
        let white = score.white as f64 + komi;
        let winner = if black > white {
            Some(Color::Black)
        } else if white > black {
            Some(Color::White)
        } else {
            None
        };
        KomiScore {
            black,
            white,
            winner,
        }
    }

    /// Score after removing stones the heuristic considers dead.
    pub fn final_score(&self, komi: f64) -> KomiScore {
        self.without_dead_stones().score_with_komi(komi)
    }

    /// A copy of this board with presumed-dead groups taken off.
    ///
    /// Groups are rebuilt from the remaining stones afterwards; the hash
    /// history is kept so the result is still a valid snapshot.
    pub fn without_dead_stones(&self) -> Board {
        let dead = self.dead_stones();
        let mut board = self.clone();
        if dead.is_empty() {
            return board;
        }
        board.clear_points(&dead);
        board.rebuild_groups();
        board
    }

    /// Stones belonging to groups the heuristic considers dead, in point order.
    pub fn dead_stones(&self) -> Vec<Point> {
        let mut dead: Vec<Point> = self
            .groups()
            .filter(|g| self.is_group_dead(g))
            .flat_map(|g| g.stones.iter().copied())
            .collect();
        dead.sort_unstable();
        dead
    }

    /// A group with two or more liberties is alive. A group in atari is dead
    /// when its last liberty has no empty neighbor and at least as many enemy
    /// neighbors as friendly ones.
    pub fn is_group_dead(&self, group: &Group) -> bool {
        match group.liberties.len() {
            0 => true,
            1 => group.liberties.iter().all(|&lib| {
                let enemy = group.color.opponent();
                let (mut friendly, mut hostile, mut empty) = (0, 0, 0);
                for n in self.neighbors(lib) {
                    match self.color(n) {
                        Color::Empty => empty += 1,
                        c if c == group.color => friendly += 1,
                        c if c == enemy => hostile += 1,
                        _ => {}
                    }
                }
                empty == 0 && hostile >= friendly
            }),
            _ => false,
        }
    }

    fn stride_len(&self) -> usize {
        let stride = self.size() + 2;
        stride * stride
    }

    /// Explore the empty region containing `start`.
    ///
    /// Returns the region size and the single color bordering it, if any.
    fn flood_fill_region(&self, start: Point, visited: &mut [bool]) -> (usize, Option<Color>) {
        let mut queue = VecDeque::from([start]);
        visited[start] = true;
        let mut size = 0;
        let (mut black, mut white) = (false, false);

        while let Some(p) = queue.pop_front() {
            size += 1;
            for n in self.neighbors(p) {
                match self.color(n) {
                    Color::Empty if !visited[n] => {
                        visited[n] = true;
                        queue.push_back(n);
                    }
                    Color::Black => black = true,
                    Color::White => white = true,
                    _ => {}
                }
            }
        }

        let owner = match (black, white) {
            (true, false) => Some(Color::Black),
            (false, true) => Some(Color::White),
            _ => None,
        };
        (size, owner)
    }
}
