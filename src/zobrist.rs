//! Zobrist keys for position hashing.
//!
//! One pseudorandom key per (playable point, stone color) pair, generated from a
//! fixed seed the first time a hash is needed. The table is sized for
//! [`MAX_BOARD_SIZE`] and indexed by 1-based playable coordinates, so every
//! smaller board shares the same keys.

use std::sync::OnceLock;

use crate::board::Color;
use crate::constants::{MAX_BOARD_SIZE, ZOBRIST_SEED};

const TABLE_LEN: usize = MAX_BOARD_SIZE * MAX_BOARD_SIZE * 2;

static ZOBRIST: OnceLock<Vec<u64>> = OnceLock::new();

fn table() -> &'static [u64] {
    ZOBRIST.get_or_init(|| {
        let mut rng = fastrand::Rng::with_seed(ZOBRIST_SEED);
        (0..TABLE_LEN).map(|_| rng.u64(..)).collect()
    })
}

/// Key for a stone of `color` at playable coordinate `(x, y)` (both 1-based).
///
/// Returns 0 for `Empty` and `Border`, which never contribute to a hash.
#[inline]
pub fn key(x: usize, y: usize, color: Color) -> u64 {
    let offset = match color {
        Color::Black => 0,
        Color::White => 1,
        Color::Empty | Color::Border => return 0,
    };
    let idx = ((y - 1) * MAX_BOARD_SIZE + (x - 1)) * 2 + offset;
    table()[idx]
}
