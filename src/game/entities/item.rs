//! Item (food) entity.

use serde::{Deserialize, Serialize};

use crate::game::types::{ItemId, ItemKind, Position};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    pub weight: u32,
    pub pos: Position,
}

impl Item {
    pub fn new(id: ItemId, kind: ItemKind, weight: u32, pos: Position) -> Self {
        Self { id, kind, weight, pos }
    }

    pub fn tag(&self) -> &'static str {
        self.kind.symbol()
    }

    /// "Sq (3 units)", as listed on the scoreboard.
    pub fn scoreboard_label(&self) -> String {
        format!("{} ({} units)", self.kind.symbol(), self.weight)
    }
}

/// How an item left the grid without being collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemFate {
    /// Run over by a sliding obstacle.
    Crushed,
    /// Collected, then lost as an Immovable collision penalty.
    Dropped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LostItem {
    pub item: Item,
    pub fate: ItemFate,
}
