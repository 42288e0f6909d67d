//! The stateful engine: one board, one score, one RNG.
//!
//! A [`Game`] is the only owner of its board. Callers drive it one call at a
//! time (`&mut self` everywhere), so an embedding that shares a game across
//! threads must serialize access itself, e.g. behind a single owning task.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::engine::{Board, Direction, Score, Spawn, TileDistribution};
use crate::error::ConfigError;

/// Read-only snapshot handed to renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub score: Score,
    pub is_over: bool,
}

/// Result of [`Game::apply_move`] and [`Game::play`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub moved: bool,
    /// Score gained by merges during this move.
    pub gained: Score,
    /// Tile placed after the move, if any (only [`Game::play`] spawns).
    pub spawned: Option<Spawn>,
    pub state: GameState,
}

/// A 2048 session.
///
/// ```
/// use grid_2048::engine::Direction;
/// use grid_2048::game::Game;
///
/// let mut game = Game::seeded(42);
/// assert_eq!(game.state().board.count_empty(), 14);
/// let outcome = game.play(Direction::Left);
/// if outcome.moved {
///     assert!(outcome.spawned.is_some());
/// }
/// assert!(!game.is_terminal());
/// ```
#[derive(Debug)]
pub struct Game<R = StdRng> {
    board: Board,
    score: Score,
    over: bool,
    distribution: TileDistribution,
    initial_tiles: usize,
    rng: R,
}

impl Game<StdRng> {
    /// Default rules with a deterministic RNG.
    pub fn seeded(seed: u64) -> Self {
        Game::new(TileDistribution::default(), StdRng::seed_from_u64(seed))
    }

    /// Default rules with an OS-seeded RNG.
    pub fn from_entropy() -> Self {
        Game::new(TileDistribution::default(), StdRng::from_entropy())
    }
}

impl<R: Rng> Game<R> {
    /// Start a session with `distribution` and place the two opening tiles.
    pub fn new(distribution: TileDistribution, rng: R) -> Self {
        let mut game = Game {
            board: Board::EMPTY,
            score: 0,
            over: false,
            distribution,
            initial_tiles: 2,
            rng,
        };
        game.reset();
        game
    }

    /// Start a session from a validated configuration.
    pub fn from_config(config: &GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut game = Game {
            board: Board::EMPTY,
            score: 0,
            over: false,
            distribution: config.tile_distribution(),
            initial_tiles: config.initial_tiles,
            rng,
        };
        game.reset();
        Ok(game)
    }

    /// Replace the current position, e.g. to resume a position a renderer
    /// already holds. The terminal flag is recomputed from `board`.
    pub fn with_board(mut self, board: Board, score: Score) -> Self {
        self.board = board;
        self.score = score;
        self.over = board.is_terminal();
        self
    }

    /// Clear the board and score, then place the opening tiles.
    pub fn reset(&mut self) -> GameState {
        self.board = Board::EMPTY;
        self.score = 0;
        self.over = false;
        for _ in 0..self.initial_tiles {
            self.board.spawn(&mut self.rng, &self.distribution);
        }
        self.refresh_terminal();
        debug!("reset: {} tiles placed", self.initial_tiles);
        self.state()
    }

    /// Slide and merge in `direction`, adding merge values to the score.
    ///
    /// Does not spawn; a caller following the turn protocol spawns only when
    /// `moved` is true. See [`Game::play`] for the whole turn.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        let shifted = self.board.shifted(direction);
        if shifted.moved {
            self.board = shifted.board;
            self.score += shifted.gained;
            self.refresh_terminal();
        }
        debug!(
            "move {direction}: moved={} gained={} score={}",
            shifted.moved, shifted.gained, self.score
        );
        MoveOutcome {
            moved: shifted.moved,
            gained: shifted.gained,
            spawned: None,
            state: self.state(),
        }
    }

    /// Place one tile from the spawn policy. No-op on a full board.
    pub fn spawn_tile(&mut self) -> Option<Spawn> {
        let spawn = self.board.spawn(&mut self.rng, &self.distribution);
        self.refresh_terminal();
        spawn
    }

    /// One full turn: move, spawn only if the move changed the board, then
    /// update the terminal flag.
    pub fn play(&mut self, direction: Direction) -> MoveOutcome {
        let mut outcome = self.apply_move(direction);
        if outcome.moved {
            outcome.spawned = self.spawn_tile();
            outcome.state = self.state();
        }
        outcome
    }

    /// True once no move can change the board. Stays true until [`Game::reset`].
    pub fn is_terminal(&self) -> bool {
        self.over
    }

    pub fn state(&self) -> GameState {
        GameState { board: self.board, score: self.score, is_over: self.over }
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Directions that would change the board right now.
    pub fn legal_moves(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.board.can_move(d))
            .collect()
    }

    pub fn distribution(&self) -> &TileDistribution {
        &self.distribution
    }

    fn refresh_terminal(&mut self) {
        if !self.over && self.board.is_terminal() {
            self.over = true;
            info!(
                "game over: score {} highest tile {}",
                self.score,
                self.board.highest_tile()
            );
        }
    }
}
