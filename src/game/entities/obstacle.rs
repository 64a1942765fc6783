//! Obstacle (hazard) entity.

use serde::{Deserialize, Serialize};

use crate::game::types::{ObstacleId, ObstacleKind, Position};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub kind: ObstacleKind,
    pub pos: Position,
    /// Only meaningful for pits. Once set it stays set.
    pub plugged: bool,
}

impl Obstacle {
    pub fn new(id: ObstacleId, kind: ObstacleKind, pos: Position) -> Self {
        Self { id, kind, pos, plugged: false }
    }

    pub fn is_pit(&self) -> bool {
        self.kind == ObstacleKind::Pit
    }

    pub fn is_open_pit(&self) -> bool {
        self.is_pit() && !self.plugged
    }

    pub fn is_plugged_pit(&self) -> bool {
        self.is_pit() && self.plugged
    }

    /// Display tag on the grid. A plugged pit shows as `PH`.
    pub fn tag(&self) -> &'static str {
        if self.is_plugged_pit() { "PH" } else { self.kind.tag() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pit_tags_follow_plug_state() {
        let mut pit = Obstacle::new(ObstacleId(0), ObstacleKind::Pit, Position::new(1, 1));
        assert_eq!(pit.tag(), "HI");
        assert!(pit.is_open_pit());

        pit.plugged = true;
        assert_eq!(pit.tag(), "PH");
        assert!(pit.is_plugged_pit());
        assert_eq!(pit.kind.tag(), "HI");
    }

    #[test]
    fn test_plug_flag_ignored_off_pits() {
        for (kind, tag) in [
            (ObstacleKind::SlidableLight, "LB"),
            (ObstacleKind::Immovable, "HB"),
            (ObstacleKind::SlidableBouncer, "SL"),
        ] {
            let mut obstacle = Obstacle::new(ObstacleId(3), kind, Position::new(0, 0));
            obstacle.plugged = true;
            assert!(!obstacle.is_plugged_pit());
            assert_eq!(obstacle.tag(), tag);
        }
    }
}
