use std::fmt;

use serde::{Deserialize, Serialize};

/// Column/row pair. Values outside the grid are representable so that
/// "one step past the edge" can be computed and rejected by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring position one step in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self { x: self.x + dx, y: self.y + dy }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed enumeration order used by the AI heuristic.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit vector; rows grow downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Parse a one-letter answer (`U`, `D`, `L`, `R`), case-insensitive.
    pub fn from_letter(input: &str) -> Option<Self> {
        match input.trim().to_ascii_uppercase().as_str() {
            "U" => Some(Direction::Up),
            "D" => Some(Direction::Down),
            "L" => Some(Direction::Left),
            "R" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Sliding actor variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    /// May halt voluntarily on the 5th step of a slide.
    StopAt5,
    /// May halt voluntarily on the 3rd step of a slide.
    StopAt3,
    /// May take one careful step before sliding.
    SafeStep,
    /// May hop over the first hazard ahead.
    Jumper,
}

impl ActorKind {
    pub const ALL: [ActorKind; 4] =
        [ActorKind::StopAt5, ActorKind::StopAt3, ActorKind::SafeStep, ActorKind::Jumper];

    pub fn display_name(self) -> &'static str {
        match self {
            ActorKind::StopAt5 => "King Penguin",
            ActorKind::StopAt3 => "Emperor Penguin",
            ActorKind::SafeStep => "Royal Penguin",
            ActorKind::Jumper => "Rockhopper Penguin",
        }
    }
}

/// Hazard variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    SlidableLight,
    Immovable,
    SlidableBouncer,
    Pit,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::SlidableLight,
        ObstacleKind::Immovable,
        ObstacleKind::SlidableBouncer,
        ObstacleKind::Pit,
    ];

    pub fn is_slidable(self) -> bool {
        matches!(self, ObstacleKind::SlidableLight | ObstacleKind::SlidableBouncer)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ObstacleKind::SlidableLight => "LightIceBlock",
            ObstacleKind::Immovable => "HeavyIceBlock",
            ObstacleKind::SlidableBouncer => "SeaLion",
            ObstacleKind::Pit => "HoleInIce",
        }
    }

    /// Two-letter tag used on the grid and in narration.
    pub fn tag(self) -> &'static str {
        match self {
            ObstacleKind::SlidableLight => "LB",
            ObstacleKind::Immovable => "HB",
            ObstacleKind::SlidableBouncer => "SL",
            ObstacleKind::Pit => "HI",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Krill,
    Crustacean,
    Anchovy,
    Squid,
    Mackerel,
}

impl ItemKind {
    pub const ALL: [ItemKind; 5] =
        [ItemKind::Krill, ItemKind::Crustacean, ItemKind::Anchovy, ItemKind::Squid, ItemKind::Mackerel];

    pub fn symbol(self) -> &'static str {
        match self {
            ItemKind::Krill => "Kr",
            ItemKind::Crustacean => "Cr",
            ItemKind::Anchovy => "An",
            ItemKind::Squid => "Sq",
            ItemKind::Mackerel => "Ma",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ItemKind::Krill => "Krill",
            ItemKind::Crustacean => "Crustacean",
            ItemKind::Anchovy => "Anchovy",
            ItemKind::Squid => "Squid",
            ItemKind::Mackerel => "Mackerel",
        }
    }
}

/// Index of an actor in the game's actor arena. Actors are never removed
/// from the arena, only marked fallen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub usize);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

/// A reference held by a grid cell. The objects themselves live in the
/// arenas of [`crate::game::state::GameState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    Actor(ActorId),
    Obstacle(ObstacleId),
    Item(ItemId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_and_opposite_cancel_out() {
        let start = Position::new(4, 7);
        for dir in Direction::ALL {
            assert_eq!(start.step(dir).step(dir.opposite()), start);
        }
    }

    #[test]
    fn test_up_decreases_row() {
        assert_eq!(Position::new(2, 3).step(Direction::Up), Position::new(2, 2));
        assert_eq!(Position::new(2, 3).step(Direction::Right), Position::new(3, 3));
    }

    #[test]
    fn test_direction_letters() {
        assert_eq!(Direction::from_letter(" r "), Some(Direction::Right));
        assert_eq!(Direction::from_letter("U"), Some(Direction::Up));
        assert_eq!(Direction::from_letter("x"), None);
        assert_eq!(Direction::from_letter(""), None);
    }

    #[test]
    fn test_actor_id_display_is_one_based() {
        assert_eq!(ActorId(0).to_string(), "P1");
        assert_eq!(ActorId(2).to_string(), "P3");
    }
}
