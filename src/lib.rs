//! grid-2048: the rule engine of a 4x4 sliding-tile merge puzzle
//!
//! This crate provides:
//! - A `Copy` 4x4 `Board` with ergonomic methods (`shift`, `with_random_tile`, `is_terminal`, ...)
//! - The row reduction (`engine::reduce_row`) every direction is built on
//! - A stateful `Game` owning board, score and RNG (`game` module)
//! - A configurable spawn policy (`engine::TileDistribution`, `config::GameConfig`)
//! - An input adapter from key names and swipes to directions (`input` module)
//!
//! Quick start:
//! ```
//! use grid_2048::engine::{Board, Direction, TileDistribution};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic board initialization with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let dist = TileDistribution::default();
//! let b0 = Board::EMPTY.with_random_tile(&mut rng, &dist).with_random_tile(&mut rng, &dist);
//! let b1 = b0.shift(Direction::Left);
//! assert!(b1.count_empty() >= 14);
//! ```
//!
//! Full loop (simplest possible)
//! ```
//! use grid_2048::engine::Direction;
//! use grid_2048::game::Game;
//!
//! // 1) Start a session with two random tiles (deterministic via seed)
//! let mut game = Game::seeded(123);
//! let mut moves = 0u32;
//!
//! // 2) Cycle through directions; `play` spawns only after a real move
//! let cycle = [Direction::Left, Direction::Up, Direction::Right, Direction::Down];
//! while !game.is_terminal() && moves < 16 {
//!     let outcome = game.play(cycle[moves as usize % 4]);
//!     assert_eq!(outcome.moved, outcome.spawned.is_some());
//!     moves += 1;
//! }
//!
//! // 3) Inspect final state (score, highest tile, etc.)
//! let state = game.state();
//! assert!(state.board.highest_tile() >= 2);
//! ```
//!
//! Turn protocol for embedders that drive each step themselves:
//! ```
//! use grid_2048::engine::Direction;
//! use grid_2048::game::Game;
//!
//! let mut game = Game::seeded(7);
//! let dir: Direction = "ArrowLeft".parse().unwrap();
//! let outcome = game.apply_move(dir);
//! if outcome.moved {
//!     game.spawn_tile();
//! }
//! let _over = game.is_terminal();
//! ```
//!
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod input;
