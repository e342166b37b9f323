//! Grid construction parameters.

use crate::cell::WallPolicy;
use crate::geom::Point;

/// Dimensions, endpoints and wall policy of a grid.
///
/// The default is a 20 × 50 board with the start at (10, 15) and the
/// finish at (10, 35).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    pub rows: i32,
    pub cols: i32,
    pub start: Point,
    pub finish: Point,
    pub wall_policy: WallPolicy,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 50,
            start: Point::new(10, 15),
            finish: Point::new(10, 35),
            wall_policy: WallPolicy::Forbid,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: GridConfig = serde_json::from_str(r#"{"rows": 5, "cols": 8}"#).unwrap();
        assert_eq!(cfg.rows, 5);
        assert_eq!(cfg.cols, 8);
        assert_eq!(cfg.start, Point::new(10, 15));
        assert_eq!(cfg.wall_policy, WallPolicy::Forbid);
    }

    #[test]
    fn policy_round_trip() {
        let cfg = GridConfig {
            wall_policy: WallPolicy::Allow,
            ..GridConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: GridConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
