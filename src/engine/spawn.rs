use log::debug;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{is_valid_tile, Board, Tile, MAX_TILE};
use crate::error::ConfigError;

/// One `{value: weight}` entry of a new-tile distribution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileWeight {
    pub value: Tile,
    pub weight: f64,
}

/// Where a spawned tile landed and what it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub row: usize,
    pub col: usize,
    pub value: Tile,
}

/// Weighted choice of the face value for newly spawned tiles.
///
/// Weights are relative; they need not sum to 1. The default is the hard
/// policy (2 with weight 0.4, 4 with weight 0.6).
///
/// In TOML this is a list of `{ value, weight }` tables:
/// ```toml
/// new_tile_distribution = [{ value = 2, weight = 0.9 }, { value = 4, weight = 0.1 }]
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<TileWeight>", into = "Vec<TileWeight>")]
pub struct TileDistribution {
    entries: Vec<TileWeight>,
    index: WeightedIndex<f64>,
}

impl TileDistribution {
    /// Validate and build a distribution.
    ///
    /// ```
    /// use grid_2048::engine::{TileDistribution, TileWeight};
    /// let d = TileDistribution::new(vec![TileWeight { value: 2, weight: 1.0 }]).unwrap();
    /// assert_eq!(d.entries().len(), 1);
    /// assert!(TileDistribution::new(vec![TileWeight { value: 3, weight: 1.0 }]).is_err());
    /// ```
    pub fn new(entries: Vec<TileWeight>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::InvalidDistribution("no tile values".into()));
        }
        for e in &entries {
            if e.value == 0 || !is_valid_tile(e.value) {
                return Err(ConfigError::InvalidDistribution(format!(
                    "tile value {} is not a power of two in 2..={MAX_TILE}",
                    e.value
                )));
            }
        }
        let index = WeightedIndex::new(entries.iter().map(|e| e.weight))
            .map_err(|e| ConfigError::InvalidDistribution(e.to_string()))?;
        Ok(Self { entries, index })
    }

    /// 2 with weight 0.4, 4 with weight 0.6.
    pub fn hard() -> Self {
        Self::two_four(0.4, 0.6)
    }

    /// 2 with weight 0.9, 4 with weight 0.1.
    pub fn classic() -> Self {
        Self::two_four(0.9, 0.1)
    }

    fn two_four(two: f64, four: f64) -> Self {
        let entries = vec![
            TileWeight { value: 2, weight: two },
            TileWeight { value: 4, weight: four },
        ];
        let index = WeightedIndex::new(entries.iter().map(|e| e.weight))
            .expect("preset weights are positive");
        Self { entries, index }
    }

    pub fn entries(&self) -> &[TileWeight] {
        &self.entries
    }

    /// Draw one tile value.
    pub fn sample_value<R: Rng + ?Sized>(&self, rng: &mut R) -> Tile {
        self.entries[self.index.sample(rng)].value
    }
}

impl Default for TileDistribution {
    fn default() -> Self {
        Self::hard()
    }
}

impl PartialEq for TileDistribution {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl TryFrom<Vec<TileWeight>> for TileDistribution {
    type Error = ConfigError;
    fn try_from(entries: Vec<TileWeight>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<TileDistribution> for Vec<TileWeight> {
    fn from(d: TileDistribution) -> Self {
        d.entries
    }
}

/// Place one tile on a uniformly chosen empty cell.
///
/// The empty-cell set is recomputed on every call, so consecutive spawns
/// never collide. Returns `None` and leaves the board untouched when full.
pub(crate) fn place_random_tile<R: Rng + ?Sized>(
    board: &mut Board,
    rng: &mut R,
    dist: &TileDistribution,
) -> Option<Spawn> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        debug!("spawn skipped: board is full");
        return None;
    }
    let (row, col) = empty[rng.gen_range(0..empty.len())];
    let value = dist.sample_value(rng);
    board.0[row][col] = value;
    debug!("spawned {value} at ({row}, {col}) among {} empty cells", empty.len());
    Some(Spawn { row, col, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn it_fills_the_board_one_cell_at_a_time() {
        let mut rng = StdRng::seed_from_u64(3);
        let dist = TileDistribution::default();
        let mut board = Board::EMPTY;
        for placed in 1..=16 {
            let before = board;
            let spawn = place_random_tile(&mut board, &mut rng, &dist).unwrap();
            assert_eq!(before.tile(spawn.row, spawn.col), 0);
            assert!(spawn.value == 2 || spawn.value == 4);
            assert_eq!(board.count_empty(), 16 - placed);
            let changed = before.tiles().zip(board.tiles()).filter(|(a, b)| a != b).count();
            assert_eq!(changed, 1);
        }
        let full = board;
        assert_eq!(place_random_tile(&mut board, &mut rng, &dist), None);
        assert_eq!(board, full);
    }

    #[test]
    fn it_respects_weights() {
        let mut rng = StdRng::seed_from_u64(99);
        let n = 20_000;
        let fours = |dist: &TileDistribution, rng: &mut StdRng| {
            (0..n).filter(|_| dist.sample_value(&mut *rng) == 4).count() as f64 / n as f64
        };
        let hard = fours(&TileDistribution::hard(), &mut rng);
        let classic = fours(&TileDistribution::classic(), &mut rng);
        assert!((hard - 0.6).abs() < 0.02, "hard 4-rate {hard}");
        assert!((classic - 0.1).abs() < 0.02, "classic 4-rate {classic}");
    }

    #[test]
    fn it_only_draws_listed_values() {
        let mut rng = StdRng::seed_from_u64(1);
        let dist = TileDistribution::new(vec![
            TileWeight { value: 8, weight: 1.0 },
            TileWeight { value: 2, weight: 0.0 },
        ])
        .unwrap();
        assert!((0..500).all(|_| dist.sample_value(&mut rng) == 8));
    }

    #[test]
    fn it_rejects_invalid_distributions() {
        assert!(TileDistribution::new(vec![]).is_err());
        assert!(TileDistribution::new(vec![TileWeight { value: 0, weight: 1.0 }]).is_err());
        assert!(TileDistribution::new(vec![TileWeight { value: 2, weight: -1.0 }]).is_err());
        assert!(TileDistribution::new(vec![TileWeight { value: 2, weight: 0.0 }]).is_err());
        assert!(TileDistribution::new(vec![TileWeight { value: 2, weight: f64::NAN }]).is_err());
        assert!(TileDistribution::new(vec![TileWeight { value: 1 << 31, weight: 1.0 }]).is_err());
        assert!(TileDistribution::new(vec![TileWeight { value: MAX_TILE * 2, weight: 1.0 }]).is_err());
        assert!(TileDistribution::new(vec![TileWeight { value: MAX_TILE, weight: 1.0 }]).is_ok());
    }

    #[test]
    fn it_builds_both_presets() {
        let pairs = |d: &TileDistribution| -> Vec<(Tile, f64)> {
            d.entries().iter().map(|e| (e.value, e.weight)).collect()
        };
        assert_eq!(pairs(&TileDistribution::hard()), vec![(2, 0.4), (4, 0.6)]);
        assert_eq!(pairs(&TileDistribution::classic()), vec![(2, 0.9), (4, 0.1)]);
        assert_eq!(TileDistribution::default(), TileDistribution::hard());
    }

    #[test]
    fn it_roundtrips_through_serde() {
        let json = serde_json::to_string(&TileDistribution::classic()).unwrap();
        assert_eq!(json, r#"[{"value":2,"weight":0.9},{"value":4,"weight":0.1}]"#);
        let bad: Result<TileDistribution, _> = serde_json::from_str(r#"[{"value":6,"weight":1.0}]"#);
        assert!(bad.is_err());
    }
}
