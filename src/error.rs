use std::io;

/// Errors raised at the engine's input boundary.
///
/// Moves, spawns and terminal checks are total and never fail; these only
/// come from turning untrusted input (key names, raw boards) into engine types.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unrecognized direction: {0:?}")]
    InvalidDirection(String),
    #[error("invalid tile {value} at ({row}, {col}): must be 0 or a power of two >= 2")]
    InvalidTile { row: usize, col: usize, value: u32 },
    #[error("board must be 4x4, got {rows} rows with a {cols}-wide row")]
    BoardShape { rows: usize, cols: usize },
}

/// Errors raised while loading or validating a [`crate::config::GameConfig`].
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported board size {0}: only 4x4 boards are supported")]
    UnsupportedBoardSize(usize),
    #[error("initial tile count {0} out of range 1..=16")]
    InitialTiles(usize),
    #[error("swipe threshold {0} must be a finite, non-negative pixel distance")]
    SwipeThreshold(f64),
    #[error("invalid tile distribution: {0}")]
    InvalidDistribution(String),
}
