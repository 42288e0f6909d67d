//! Engine module: 4x4 board, row reduction, direction handling, spawn
//! policy and terminal detection. Public API stays small and ergonomic.
//!
//! - `Board` is a `Copy` 4x4 grid with useful methods.
//! - Free functions mirror the methods when convenient (e.g., `shift`).
//! - The stateful session (score, RNG, game-over latch) lives in [`crate::game`].

mod ops;
mod spawn;
pub mod state;

pub use state::{Board, Direction, Line, Score, Shifted, Tile, TilesIter, MAX_TILE, SIZE};

pub use spawn::{Spawn, TileDistribution, TileWeight};

pub use ops::{count_empty, get_highest_tile_val, is_terminal, reduce_row, shift};
