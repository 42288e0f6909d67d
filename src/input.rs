//! Input adapter: turns raw key names and pointer gestures into [`Direction`]s.
//!
//! Unrecognized keys are rejected here, at the boundary, so the engine only
//! ever sees one of the four valid directions.

use std::str::FromStr;

use crate::config::InputConfig;
use crate::engine::Direction;
use crate::error::EngineError;

impl FromStr for Direction {
    type Err = EngineError;

    /// Accepts DOM/terminal arrow key names, plain direction words, WASD and
    /// vi keys, case-insensitively.
    ///
    /// ```
    /// use grid_2048::engine::Direction;
    /// assert_eq!("ArrowUp".parse::<Direction>().unwrap(), Direction::Up);
    /// assert_eq!("a".parse::<Direction>().unwrap(), Direction::Left);
    /// assert!("Enter".parse::<Direction>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arrowup" | "up" | "w" | "k" => Ok(Direction::Up),
            "arrowdown" | "down" | "s" | "j" => Ok(Direction::Down),
            "arrowleft" | "left" | "a" | "h" => Ok(Direction::Left),
            "arrowright" | "right" | "d" | "l" => Ok(Direction::Right),
            _ => Err(EngineError::InvalidDirection(s.to_string())),
        }
    }
}

/// Map a key name to a direction. Same as `key.parse::<Direction>()`.
pub fn parse_key(key: &str) -> Result<Direction, EngineError> {
    key.parse()
}

/// A screen-space point in pixels; `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Classifies pointer-down/up (or touch-start/end) pairs as swipes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeDetector {
    threshold_px: f64,
}

impl SwipeDetector {
    pub fn new(threshold_px: f64) -> Self {
        Self { threshold_px }
    }

    pub fn from_config(cfg: &InputConfig) -> Self {
        Self::new(cfg.swipe_threshold_px)
    }

    pub fn threshold_px(&self) -> f64 {
        self.threshold_px
    }

    /// Direction of the gesture from `start` to `end`, if any.
    ///
    /// Only the dominant axis counts, and its travel must strictly exceed the
    /// threshold. Diagonals with equal travel resolve to the horizontal axis.
    ///
    /// ```
    /// use grid_2048::engine::Direction;
    /// use grid_2048::input::{Point, SwipeDetector};
    /// let swipe = SwipeDetector::default();
    /// let d = swipe.classify(Point::new(100.0, 100.0), Point::new(100.0, 180.0));
    /// assert_eq!(d, Some(Direction::Down));
    /// assert_eq!(swipe.classify(Point::new(0.0, 0.0), Point::new(30.0, 10.0)), None);
    /// ```
    pub fn classify(&self, start: Point, end: Point) -> Option<Direction> {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        if dx.abs() >= dy.abs() {
            if dx.abs() > self.threshold_px {
                return Some(if dx > 0.0 { Direction::Right } else { Direction::Left });
            }
        } else if dy.abs() > self.threshold_px {
            return Some(if dy > 0.0 { Direction::Down } else { Direction::Up });
        }
        None
    }
}

impl Default for SwipeDetector {
    fn default() -> Self {
        Self::from_config(&InputConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_maps_every_key_family() {
        for (keys, dir) in [
            (["ArrowUp", "UP", "w", "K"], Direction::Up),
            (["ArrowDown", "down", "S", "j"], Direction::Down),
            (["ArrowLeft", "Left", "a", "h"], Direction::Left),
            (["ArrowRight", "right", "D", "l"], Direction::Right),
        ] {
            for key in keys {
                assert_eq!(parse_key(key), Ok(dir), "{key}");
            }
        }
    }

    #[test]
    fn it_rejects_unknown_keys() {
        assert_eq!(parse_key("Escape"), Err(EngineError::InvalidDirection("Escape".into())));
        assert!(parse_key("").is_err());
        assert!(parse_key("upp").is_err());
    }

    #[test]
    fn it_round_trips_display_names() {
        for dir in Direction::ALL {
            assert_eq!(dir.to_string().parse::<Direction>(), Ok(dir));
        }
    }

    #[test]
    fn it_classifies_swipes_on_dominant_axis() {
        let s = SwipeDetector::new(50.0);
        let o = Point::new(200.0, 200.0);
        assert_eq!(s.classify(o, Point::new(260.0, 230.0)), Some(Direction::Right));
        assert_eq!(s.classify(o, Point::new(120.0, 170.0)), Some(Direction::Left));
        assert_eq!(s.classify(o, Point::new(210.0, 120.0)), Some(Direction::Up));
        assert_eq!(s.classify(o, Point::new(170.0, 290.0)), Some(Direction::Down));
    }

    #[test]
    fn it_ignores_short_swipes() {
        let s = SwipeDetector::default();
        let o = Point::new(0.0, 0.0);
        assert_eq!(s.classify(o, Point::new(50.0, 0.0)), None);
        assert_eq!(s.classify(o, Point::new(0.0, -50.0)), None);
        // Dominant axis is below threshold even though the sum is not.
        assert_eq!(s.classify(o, Point::new(40.0, 45.0)), None);
        assert_eq!(s.classify(o, Point::new(51.0, 51.0)), Some(Direction::Right));
    }
}
