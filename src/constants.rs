//! Constants for board dimensions, search parameters, and rollout tuning.
//!
//! The board uses a 1D array with a one-cell border frame on every side, so a
//! board of size `n` occupies `(n + 2) * (n + 2)` cells. Unlike a fixed-size
//! engine the dimension is chosen at runtime, up to [`MAX_BOARD_SIZE`].

// =============================================================================
// Board Geometry
// =============================================================================

/// Largest supported board dimension. The position-hash table is sized for it.
pub const MAX_BOARD_SIZE: usize = 19;

/// Board dimension used when a caller asks for a size of zero.
pub const DEFAULT_BOARD_SIZE: usize = 9;

/// Standard komi (compensation points for White).
pub const DEFAULT_KOMI: f64 = 6.5;

// =============================================================================
// Special Move Values
// =============================================================================

/// Pass move marker (index 0 is always border, so it never names a playable point).
pub const PASS_MOVE: usize = 0;

/// Quit/abort marker, reserved for front-ends.
pub const QUIT_MOVE: usize = usize::MAX;

// =============================================================================
// Position Hashing
// =============================================================================

/// Fixed seed for the Zobrist table so hashes are reproducible across runs.
pub const ZOBRIST_SEED: u64 = 42;

// =============================================================================
// MCTS (Monte Carlo Tree Search) Parameters
// =============================================================================

/// Default number of simulations per move.
pub const N_SIMS: usize = 1000;

/// Multiplier applied to the exploration constant once half the budget is spent.
pub const EXPLORATION_DECAY: f64 = 0.8;

// =============================================================================
// Playout Parameters
// =============================================================================

/// Hard cap on moves played in a single rollout.
pub const ROLLOUT_MAX_MOVES: usize = 150;

/// Candidate moves sampled per rollout turn.
pub const ROLLOUT_CANDIDATES: usize = 25;

/// Number of rollout moves between blowout checks.
pub const ROLLOUT_CHECK_INTERVAL: usize = 30;

/// Score margin beyond which a rollout is cut short.
pub const BLOWOUT_MARGIN: f64 = 20.0;

/// Below this many sampled candidates the fast generator tops up with a scan.
pub const FAST_MOVES_MIN: usize = 5;

// =============================================================================
// Heuristic Weights
// =============================================================================

/// Influence credited per empty point next to a stone.
pub const INFLUENCE_PER_LIBERTY: f64 = 0.3;

/// Default weight of the score term in the hybrid evaluator.
pub const HYBRID_SCORE_WEIGHT: f64 = 0.7;

/// Default weight of the influence term in the hybrid evaluator.
pub const HYBRID_INFLUENCE_WEIGHT: f64 = 0.3;
