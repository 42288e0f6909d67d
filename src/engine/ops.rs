use log::trace;

use super::state::{Board, Direction, Line, Score, Shifted, Tile, MAX_TILE, SIZE};

/// Slide and merge one line toward index 0.
///
/// Compacts non-zero tiles, merges adjacent equal pairs in a single
/// left-to-right pass (a freshly merged tile never merges again in the same
/// pass), then compacts once more. Tiles already at [`MAX_TILE`] never
/// merge. Returns the reduced line and the sum of the merged tiles' new values.
///
/// ```
/// use grid_2048::engine::reduce_row;
/// assert_eq!(reduce_row([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
/// assert_eq!(reduce_row([2, 0, 2, 4]), ([4, 4, 0, 0], 4));
/// assert_eq!(reduce_row([4, 4, 4, 0]), ([8, 4, 0, 0], 8));
/// ```
pub fn reduce_row(row: Line) -> (Line, Score) {
    let mut line = compact(row);
    let gained = merge(&mut line);
    (compact(line), gained)
}

fn compact(row: Line) -> Line {
    let mut out = [0; SIZE];
    for (dst, v) in out.iter_mut().zip(row.into_iter().filter(|&v| v != 0)) {
        *dst = v;
    }
    out
}

/// True if `a` and `b` combine into one tile.
#[inline]
fn can_merge(a: Tile, b: Tile) -> bool {
    a != 0 && a == b && a < MAX_TILE
}

fn merge(line: &mut Line) -> Score {
    let mut gained = 0;
    let mut idx = 0;
    while idx + 1 < SIZE {
        if can_merge(line[idx], line[idx + 1]) {
            line[idx] *= 2;
            line[idx + 1] = 0;
            gained += Score::from(line[idx]);
            idx += 2;
        } else {
            idx += 1;
        }
    }
    gained
}

fn reverse(mut line: Line) -> Line {
    line.reverse();
    line
}

/// Swap rows and columns. Its own inverse on a square board.
pub(crate) fn transpose(rows: [Line; SIZE]) -> [Line; SIZE] {
    let mut out = [[0; SIZE]; SIZE];
    for (r, row) in rows.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            out[c][r] = v;
        }
    }
    out
}

/// Reduce a line that slides toward its high-index end when `reversed`.
fn reduce_oriented(line: Line, reversed: bool) -> (Line, Score) {
    if reversed {
        let (out, gained) = reduce_row(reverse(line));
        (reverse(out), gained)
    } else {
        reduce_row(line)
    }
}

/// Slide/merge tiles in the given direction. No randomness.
///
/// Vertical moves enter column space through [`transpose`], reduce each
/// column as a row, and transpose back.
pub fn shift(board: Board, direction: Direction) -> Shifted {
    let lines = if direction.is_vertical() { transpose(board.0) } else { board.0 };
    let mut out = [[0; SIZE]; SIZE];
    let mut gained = 0;
    let mut moved = false;
    for (idx, (dst, &line)) in out.iter_mut().zip(lines.iter()).enumerate() {
        let (reduced, line_gain) = reduce_oriented(line, direction.is_reversed());
        if reduced != line {
            moved = true;
            trace!("{direction} line {idx}: {line:?} -> {reduced:?} (+{line_gain})");
        }
        *dst = reduced;
        gained += line_gain;
    }
    let rows = if direction.is_vertical() { transpose(out) } else { out };
    Shifted { board: Board(rows), gained, moved }
}

/// True if the board is full and no row or column has an adjacent mergeable pair.
pub fn is_terminal(board: Board) -> bool {
    let rows = &board.0;
    for r in 0..SIZE {
        for c in 0..SIZE {
            let v = rows[r][c];
            if v == 0 {
                return false;
            }
            if c + 1 < SIZE && can_merge(v, rows[r][c + 1]) {
                return false;
            }
            if r + 1 < SIZE && can_merge(v, rows[r + 1][c]) {
                return false;
            }
        }
    }
    true
}

/// Count the number of zero tiles.
pub fn count_empty(board: Board) -> usize {
    board.tiles().filter(|&v| v == 0).count()
}

pub fn get_highest_tile_val(board: Board) -> Tile {
    board.tiles().max().unwrap_or(0)
}

pub(crate) fn format_val(val: Tile) -> String {
    match val {
        0 => " ".repeat(7),
        v => format!("{:^7}", v),
    }
}
