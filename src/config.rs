use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::{TileDistribution, SIZE};
use crate::error::ConfigError;

/// Named spawn policies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 2 at 40%, 4 at 60%.
    #[default]
    Hard,
    /// 2 at 90%, 4 at 10%.
    Classic,
}

impl Difficulty {
    pub fn distribution(self) -> TileDistribution {
        match self {
            Difficulty::Hard => TileDistribution::hard(),
            Difficulty::Classic => TileDistribution::classic(),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hard" => Ok(Difficulty::Hard),
            "classic" => Ok(Difficulty::Classic),
            other => Err(format!("unknown difficulty {other:?} (expected hard or classic)")),
        }
    }
}

/// Engine configuration, usually read from TOML.
///
/// Every key is optional:
/// ```toml
/// board_size = 4
/// difficulty = "classic"
/// initial_tiles = 2
/// # Overrides `difficulty` when present.
/// new_tile_distribution = [{ value = 2, weight = 0.75 }, { value = 4, weight = 0.25 }]
///
/// [input]
/// swipe_threshold_px = 50.0
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "defaults::board_size")]
    pub board_size: usize,

    #[serde(default)]
    pub difficulty: Difficulty,

    /// Explicit `{value, weight}` list; takes precedence over `difficulty`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_tile_distribution: Option<TileDistribution>,

    /// Tiles placed by `reset()`.
    #[serde(default = "defaults::initial_tiles")]
    pub initial_tiles: usize,

    #[serde(default)]
    pub input: InputConfig,
}

/// Settings for the input adapter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Minimum pointer/touch travel along the dominant axis to count as a swipe.
    #[serde(default = "defaults::swipe_threshold_px")]
    pub swipe_threshold_px: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: defaults::board_size(),
            difficulty: Difficulty::default(),
            new_tile_distribution: None,
            initial_tiles: defaults::initial_tiles(),
            input: InputConfig::default(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { swipe_threshold_px: defaults::swipe_threshold_px() }
    }
}

impl GameConfig {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate a TOML document.
    ///
    /// ```
    /// use grid_2048::config::{Difficulty, GameConfig};
    /// let cfg = GameConfig::from_toml_str("difficulty = \"classic\"").unwrap();
    /// assert_eq!(cfg.difficulty, Difficulty::Classic);
    /// assert!(GameConfig::from_toml_str("board_size = 5").is_err());
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size != SIZE {
            return Err(ConfigError::UnsupportedBoardSize(self.board_size));
        }
        if !(1..=SIZE * SIZE).contains(&self.initial_tiles) {
            return Err(ConfigError::InitialTiles(self.initial_tiles));
        }
        let t = self.input.swipe_threshold_px;
        if !t.is_finite() || t < 0.0 {
            return Err(ConfigError::SwipeThreshold(t));
        }
        Ok(())
    }

    /// The effective spawn distribution: the explicit list if set, else the difficulty preset.
    pub fn tile_distribution(&self) -> TileDistribution {
        self.new_tile_distribution
            .clone()
            .unwrap_or_else(|| self.difficulty.distribution())
    }
}

mod defaults {
    pub fn board_size() -> usize { 4 }
    pub fn initial_tiles() -> usize { 2 }
    pub fn swipe_threshold_px() -> f64 { 50.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TileWeight;

    #[test]
    fn it_defaults_to_hard() {
        let cfg = GameConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, GameConfig::default());
        assert_eq!(cfg.board_size, 4);
        assert_eq!(cfg.initial_tiles, 2);
        assert_eq!(cfg.input.swipe_threshold_px, 50.0);
        assert_eq!(cfg.tile_distribution(), TileDistribution::hard());
    }

    #[test]
    fn it_reads_explicit_distribution() {
        let cfg = GameConfig::from_toml_str(
            r#"
            difficulty = "classic"
            new_tile_distribution = [{ value = 2, weight = 3.0 }, { value = 8, weight = 1.0 }]

            [input]
            swipe_threshold_px = 30.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.difficulty, Difficulty::Classic);
        assert_eq!(
            cfg.tile_distribution().entries(),
            &[TileWeight { value: 2, weight: 3.0 }, TileWeight { value: 8, weight: 1.0 }]
        );
        assert_eq!(cfg.input.swipe_threshold_px, 30.0);
    }

    #[test]
    fn it_rejects_bad_values() {
        assert!(matches!(
            GameConfig::from_toml_str("board_size = 5"),
            Err(ConfigError::UnsupportedBoardSize(5))
        ));
        assert!(matches!(
            GameConfig::from_toml_str("initial_tiles = 0"),
            Err(ConfigError::InitialTiles(0))
        ));
        assert!(matches!(
            GameConfig::from_toml_str("[input]\nswipe_threshold_px = -1.0"),
            Err(ConfigError::SwipeThreshold(_))
        ));
        assert!(matches!(
            GameConfig::from_toml_str("new_tile_distribution = [{ value = 3, weight = 1.0 }]"),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            GameConfig::from_toml_str("new_tile_distribution = [{ value = 2147483648, weight = 1.0 }]"),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            GameConfig::from_toml_str("difficulty = \"nightmare\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn it_parses_difficulty_names() {
        assert_eq!("Classic".parse::<Difficulty>(), Ok(Difficulty::Classic));
        assert_eq!(" hard ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("easy".parse::<Difficulty>().is_err());
    }

    #[test]
    fn it_reports_missing_file() {
        let err = GameConfig::from_toml("/nonexistent/grid-2048.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
