//! Actor entity.
//!
//! Shared sliding state plus the per-variant ability bookkeeping the engine
//! consults while stepping.

use serde::{Deserialize, Serialize};

use crate::config::game::{STOP_AT_3_THRESHOLD, STOP_AT_5_THRESHOLD};
use crate::game::entities::Item;
use crate::game::types::{ActorId, ActorKind, Direction, Position};

/// Ability state that only lives for the turn it was activated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArmedAbility {
    #[default]
    None,
    /// Voluntary stop: `steps` counts slide steps since activation.
    StopAfter { threshold: u32, steps: u32 },
    /// Jumper: hop over the hazard at `target` during this slide.
    Jump { target: Position },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorKind,
    /// Once fallen: the pit it dropped into or the last cell before the water.
    pub pos: Position,
    /// Collected items, oldest first.
    pub inventory: Vec<Item>,
    pub special_used: bool,
    pub stunned: bool,
    pub fallen: bool,
    pub player_controlled: bool,
    pub last_move: Option<Direction>,
    pub armed: ArmedAbility,
}

impl Actor {
    pub fn new(id: ActorId, kind: ActorKind, pos: Position) -> Self {
        Self {
            id,
            kind,
            pos,
            inventory: Vec::new(),
            special_used: false,
            stunned: false,
            fallen: false,
            player_controlled: false,
            last_move: None,
            armed: ArmedAbility::None,
        }
    }

    /// Display tag on the grid ("P1", "P2", ...).
    pub fn tag(&self) -> String {
        self.id.to_string()
    }

    /// Total weight of collected items.
    pub fn score(&self) -> u32 {
        self.inventory.iter().map(|item| item.weight).sum()
    }

    pub fn collect(&mut self, item: Item) {
        self.inventory.push(item);
    }

    /// Remove the lightest item. Among equal weights the earliest collected goes.
    pub fn drop_lightest(&mut self) -> Option<Item> {
        let (index, _) = self
            .inventory
            .iter()
            .enumerate()
            .min_by_key(|(i, item)| (item.weight, *i))?;
        Some(self.inventory.remove(index))
    }

    /// Voluntary-stop threshold for StopAt variants.
    pub fn stop_threshold(&self) -> Option<u32> {
        match self.kind {
            ActorKind::StopAt5 => Some(STOP_AT_5_THRESHOLD),
            ActorKind::StopAt3 => Some(STOP_AT_3_THRESHOLD),
            ActorKind::SafeStep | ActorKind::Jumper => None,
        }
    }

    /// Count one slide step. Returns true once an armed stop counter has
    /// reached its threshold.
    pub fn count_step(&mut self) -> bool {
        if self.fallen {
            return false;
        }
        match &mut self.armed {
            ArmedAbility::StopAfter { threshold, steps } => {
                *steps += 1;
                *steps >= *threshold
            }
            _ => false,
        }
    }

    pub fn jump_target(&self) -> Option<Position> {
        match self.armed {
            ArmedAbility::Jump { target } => Some(target),
            _ => None,
        }
    }

    /// Clear per-turn ability state. Called when a turn starts and ends.
    pub fn disarm(&mut self) {
        self.armed = ArmedAbility::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{ItemId, ItemKind};

    fn item(id: u32, weight: u32) -> Item {
        Item::new(ItemId(id), ItemKind::Krill, weight, Position::new(0, 0))
    }

    #[test]
    fn test_score_is_sum_of_weights() {
        let mut actor = Actor::new(ActorId(0), ActorKind::StopAt5, Position::new(0, 0));
        actor.collect(item(1, 2));
        actor.collect(item(2, 5));
        assert_eq!(actor.score(), 7);
    }

    #[test]
    fn test_drop_lightest_prefers_earliest_on_tie() {
        let mut actor = Actor::new(ActorId(0), ActorKind::Jumper, Position::new(0, 0));
        actor.collect(item(1, 3));
        actor.collect(item(2, 1));
        actor.collect(item(3, 1));
        let dropped = actor.drop_lightest().unwrap();
        assert_eq!(dropped.id, ItemId(2));
        assert_eq!(actor.score(), 4);
    }

    #[test]
    fn test_drop_lightest_on_empty_inventory() {
        let mut actor = Actor::new(ActorId(0), ActorKind::Jumper, Position::new(0, 0));
        assert!(actor.drop_lightest().is_none());
    }

    #[test]
    fn test_count_step_only_when_armed() {
        let mut actor = Actor::new(ActorId(1), ActorKind::StopAt3, Position::new(0, 0));
        assert!(!actor.count_step());

        actor.armed = ArmedAbility::StopAfter { threshold: 3, steps: 0 };
        assert!(!actor.count_step());
        assert!(!actor.count_step());
        assert!(actor.count_step());

        actor.disarm();
        assert!(!actor.count_step());
    }
}
