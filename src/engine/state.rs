use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ops;
use super::spawn::{self, Spawn, TileDistribution};
use crate::error::EngineError;

/// Board edge length. The engine only supports square 4x4 boards.
pub const SIZE: usize = 4;

/// Largest face value a 4x4 board can hold (reachable when 4s spawn).
pub const MAX_TILE: Tile = 1 << 18;

/// Face value of a cell: 0 for empty, otherwise 2, 4, 8, ...
pub type Tile = u32;
/// Score accumulated from merges.
pub type Score = u64;
/// One row or column, oriented so that index 0 is the end tiles slide toward.
pub type Line = [Tile; SIZE];

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in the order [`crate::game::Game::legal_moves`] reports them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// True for moves that operate on columns (through the transpose).
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// True for moves that slide toward the high-index end of a line.
    #[inline]
    pub fn is_reversed(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// Result of sliding a board in one direction, before any tile is spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shifted {
    pub board: Board,
    /// Sum of the values of every tile produced by a merge during this shift.
    pub gained: Score,
    /// True if at least one line differs element-wise from its pre-move content.
    pub moved: bool,
}

/// A 4x4 grid of tile face values, stored row-major.
///
/// `Board` is a small `Copy` value: every operation returns a new board and
/// leaves the receiver untouched. Ownership of the live board belongs to
/// [`crate::game::Game`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "[Line; SIZE]", into = "[Line; SIZE]")]
pub struct Board(pub(crate) [Line; SIZE]);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([[0; SIZE]; SIZE]);

    /// Build a board from rows, rejecting cells that are not 0 or a power of
    /// two in `2..=MAX_TILE`.
    ///
    /// ```
    /// use grid_2048::engine::Board;
    /// let b = Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
    /// assert_eq!(b.count_empty(), 14);
    /// assert!(Board::from_rows([[3, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).is_err());
    /// ```
    pub fn from_rows(rows: [Line; SIZE]) -> Result<Self, EngineError> {
        for (row, line) in rows.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if !is_valid_tile(value) {
                    return Err(EngineError::InvalidTile { row, col, value });
                }
            }
        }
        Ok(Board(rows))
    }

    /// Build a board from a dynamically sized matrix (e.g. decoded JSON).
    pub fn from_vecs(rows: &[Vec<Tile>]) -> Result<Self, EngineError> {
        let mut out = [[0; SIZE]; SIZE];
        if rows.len() != SIZE {
            let cols = rows.first().map_or(0, Vec::len);
            return Err(EngineError::BoardShape { rows: rows.len(), cols });
        }
        for (dst, src) in out.iter_mut().zip(rows) {
            if src.len() != SIZE {
                return Err(EngineError::BoardShape { rows: rows.len(), cols: src.len() });
            }
            dst.copy_from_slice(src);
        }
        Board::from_rows(out)
    }

    /// Borrow the rows of this board.
    #[inline]
    pub fn rows(&self) -> &[Line; SIZE] {
        &self.0
    }

    /// Consume this board, returning its rows.
    #[inline]
    pub fn into_rows(self) -> [Line; SIZE] {
        self.0
    }

    /// Face value at `(row, col)`; 0 when empty.
    #[inline]
    pub fn tile(&self, row: usize, col: usize) -> Tile {
        self.0[row][col]
    }

    /// Return the board resulting from sliding/merging tiles in `dir` (no random insert).
    ///
    /// ```
    /// use grid_2048::engine::{Board, Direction};
    /// let b = Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
    /// assert_eq!(b.shift(Direction::Left).rows()[0], [4, 0, 0, 0]);
    /// ```
    #[inline]
    pub fn shift(self, dir: Direction) -> Self {
        ops::shift(self, dir).board
    }

    /// Like [`Board::shift`] but also reports merge score and whether anything moved.
    #[inline]
    pub fn shifted(self, dir: Direction) -> Shifted {
        ops::shift(self, dir)
    }

    /// True if shifting in `dir` would change the board.
    #[inline]
    pub fn can_move(self, dir: Direction) -> bool {
        ops::shift(self, dir).moved
    }

    /// Place one tile drawn from `dist` on a uniformly chosen empty cell.
    ///
    /// A full board is returned unchanged.
    ///
    /// ```
    /// use grid_2048::engine::{Board, TileDistribution};
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let dist = TileDistribution::default();
    /// let b = Board::EMPTY.with_random_tile(&mut rng, &dist).with_random_tile(&mut rng, &dist);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    #[inline]
    pub fn with_random_tile<R: Rng + ?Sized>(self, rng: &mut R, dist: &TileDistribution) -> Self {
        let mut board = self;
        spawn::place_random_tile(&mut board, rng, dist);
        board
    }

    /// In-place variant of [`Board::with_random_tile`] reporting where the tile landed.
    #[inline]
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, dist: &TileDistribution) -> Option<Spawn> {
        spawn::place_random_tile(self, rng, dist)
    }

    /// Return true if no empty cell and no adjacent equal pair remain.
    ///
    /// ```
    /// use grid_2048::engine::Board;
    /// assert!(!Board::EMPTY.is_terminal());
    /// let packed = Board::from_rows([
    ///     [2, 4, 2, 4],
    ///     [4, 2, 4, 2],
    ///     [2, 4, 2, 4],
    ///     [4, 2, 4, 2],
    /// ]).unwrap();
    /// assert!(packed.is_terminal());
    /// ```
    #[inline]
    pub fn is_terminal(self) -> bool {
        ops::is_terminal(self)
    }

    /// Return the highest tile value (e.g., 2048) present on the board.
    #[inline]
    pub fn highest_tile(self) -> Tile {
        ops::get_highest_tile_val(self)
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(self) -> usize {
        ops::count_empty(self)
    }

    /// Coordinates of every empty cell in row-major order.
    pub fn empty_cells(self) -> Vec<(usize, usize)> {
        self.tiles()
            .enumerate()
            .filter(|&(_, v)| v == 0)
            .map(|(idx, _)| (idx / SIZE, idx % SIZE))
            .collect()
    }

    /// Iterate over tile values in row-major order.
    #[inline]
    pub fn tiles(self) -> TilesIter {
        TilesIter { board: self, idx: 0 }
    }

    /// Convenience: collect tile values into a `Vec<Tile>`.
    #[inline]
    pub fn to_vec(self) -> Vec<Tile> {
        self.tiles().collect()
    }
}

pub(crate) fn is_valid_tile(value: Tile) -> bool {
    value == 0 || (value >= 2 && value <= MAX_TILE && value.is_power_of_two())
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for (idx, row) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f, "{}", "-".repeat(32))?;
            }
            let cells: Vec<String> = row.iter().map(|&v| ops::format_val(v)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

impl From<Board> for [Line; SIZE] {
    fn from(b: Board) -> Self {
        b.into_rows()
    }
}

impl TryFrom<[Line; SIZE]> for Board {
    type Error = EngineError;
    fn try_from(rows: [Line; SIZE]) -> Result<Self, Self::Error> {
        Board::from_rows(rows)
    }
}

/// Iterator over board tile values in row-major order.
pub struct TilesIter {
    board: Board,
    idx: usize,
}

impl Iterator for TilesIter {
    type Item = Tile;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= SIZE * SIZE {
            return None;
        }
        let v = self.board.0[self.idx / SIZE][self.idx % SIZE];
        self.idx += 1;
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = SIZE * SIZE - self.idx;
        (rest, Some(rest))
    }
}

impl IntoIterator for Board {
    type Item = Tile;
    type IntoIter = TilesIter;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}

impl IntoIterator for &Board {
    type Item = Tile;
    type IntoIter = TilesIter;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}
