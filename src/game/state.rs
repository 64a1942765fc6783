use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game::entities::{Actor, Item, ItemFate, LostItem, Obstacle};
use crate::game::error::EngineError;
use crate::game::grid::Grid;
use crate::game::types::{
    ActorId, ActorKind, ItemId, ItemKind, ObstacleId, ObstacleKind, Occupant, Position,
};

/// What a single cell holds, classified for collision dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellContents {
    pub items: Vec<ItemId>,
    pub actor: Option<ActorId>,
    /// First obstacle that still blocks passage (plugged pits are skipped).
    pub obstacle: Option<ObstacleId>,
    pub plugged_pit: bool,
}

impl CellContents {
    /// Nothing but items (or nothing at all).
    pub fn only_items(&self) -> bool {
        self.actor.is_none() && self.obstacle.is_none() && !self.plugged_pit
    }
}

/// The whole simulation: the grid is the source of truth for placement,
/// the arenas own the objects and are looked up by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub grid: Grid,
    /// Every actor ever created, fallen ones included (their inventory still scores).
    pub actors: Vec<Actor>,
    /// Live obstacles only.
    pub obstacles: BTreeMap<ObstacleId, Obstacle>,
    /// Items still lying on the grid.
    pub items: BTreeMap<ItemId, Item>,
    /// Items that left the grid without ending up in an inventory.
    pub lost_items: Vec<LostItem>,
    /// Current round, 1-based. Zero before the game starts.
    pub round: u32,
    pub seed: Option<u64>,
    next_obstacle_id: u32,
    next_item_id: u32,
}

impl GameState {
    /// An empty board of the given size.
    pub fn empty(size: usize) -> Self {
        Self {
            grid: Grid::new(size),
            actors: Vec::new(),
            obstacles: BTreeMap::new(),
            items: BTreeMap::new(),
            lost_items: Vec::new(),
            round: 0,
            seed: None,
            next_obstacle_id: 0,
            next_item_id: 0,
        }
    }

    pub fn spawn_actor(&mut self, kind: ActorKind, pos: Position) -> ActorId {
        let id = ActorId(self.actors.len());
        self.actors.push(Actor::new(id, kind, pos));
        self.grid.place(pos, Occupant::Actor(id));
        id
    }

    pub fn spawn_obstacle(&mut self, kind: ObstacleKind, pos: Position) -> ObstacleId {
        let id = ObstacleId(self.next_obstacle_id);
        self.next_obstacle_id += 1;
        self.obstacles.insert(id, Obstacle::new(id, kind, pos));
        self.grid.place(pos, Occupant::Obstacle(id));
        id
    }

    pub fn spawn_item(&mut self, kind: ItemKind, weight: u32, pos: Position) -> ItemId {
        let id = ItemId(self.next_item_id);
        self.next_item_id += 1;
        self.items.insert(id, Item::new(id, kind, weight, pos));
        self.grid.place(pos, Occupant::Item(id));
        id
    }

    pub fn actor(&self, id: ActorId) -> Result<&Actor, EngineError> {
        self.actors.get(id.0).ok_or(EngineError::UnknownActor(id))
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Result<&mut Actor, EngineError> {
        self.actors.get_mut(id.0).ok_or(EngineError::UnknownActor(id))
    }

    pub fn obstacle(&self, id: ObstacleId) -> Result<&Obstacle, EngineError> {
        self.obstacles.get(&id).ok_or(EngineError::UnknownObstacle(id))
    }

    pub fn obstacle_mut(&mut self, id: ObstacleId) -> Result<&mut Obstacle, EngineError> {
        self.obstacles.get_mut(&id).ok_or(EngineError::UnknownObstacle(id))
    }

    /// Classify the occupants of a cell.
    pub fn cell(&self, pos: Position) -> CellContents {
        let mut contents = CellContents::default();
        for occupant in self.grid.occupants_at(pos) {
            match *occupant {
                Occupant::Item(id) => contents.items.push(id),
                Occupant::Actor(id) => {
                    contents.actor.get_or_insert(id);
                }
                Occupant::Obstacle(id) => match self.obstacles.get(&id) {
                    Some(obstacle) if obstacle.is_plugged_pit() => contents.plugged_pit = true,
                    Some(_) => {
                        contents.obstacle.get_or_insert(id);
                    }
                    None => {}
                },
            }
        }
        contents
    }

    /// Take an item off the grid and out of the arena.
    pub(crate) fn take_item(&mut self, id: ItemId) -> Option<Item> {
        let item = self.items.remove(&id)?;
        self.grid.remove(item.pos, Occupant::Item(id));
        Some(item)
    }

    pub(crate) fn record_lost(&mut self, item: Item, fate: ItemFate) {
        self.lost_items.push(LostItem { item, fate });
    }

    /// Actors that are still on the ice, in turn order.
    pub fn standing_actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter().filter(|a| !a.fallen)
    }

    pub fn player_actor(&self) -> Option<&Actor> {
        self.actors.iter().find(|a| a.player_controlled)
    }

    /// Actors ordered by score, highest first. Ties keep creation order.
    pub fn ranking(&self) -> Vec<&Actor> {
        let mut ranked: Vec<&Actor> = self.actors.iter().collect();
        ranked.sort_by(|a, b| b.score().cmp(&a.score()));
        ranked
    }

    /// Deep value copy of the whole board.
    pub fn snapshot(&self) -> GameState {
        self.clone()
    }

    /// Verify that the grid and the arenas agree: every live object sits in
    /// exactly the bucket its position names, fallen actors and removed
    /// objects are absent, and nothing dangles.
    pub fn check_consistency(&self) -> Result<(), EngineError> {
        let fail = |msg: String| Err(EngineError::Inconsistent(msg));

        for actor in &self.actors {
            let cells = self.grid.locate(Occupant::Actor(actor.id));
            if actor.fallen {
                if !cells.is_empty() {
                    return fail(format!("fallen actor {} still on grid at {:?}", actor.id, cells));
                }
            } else if cells != [actor.pos] {
                return fail(format!("actor {} at {} found in cells {:?}", actor.id, actor.pos, cells));
            }
        }
        for obstacle in self.obstacles.values() {
            let cells = self.grid.locate(Occupant::Obstacle(obstacle.id));
            if cells != [obstacle.pos] {
                return fail(format!("obstacle {:?} at {} found in cells {:?}", obstacle.id, obstacle.pos, cells));
            }
        }
        for item in self.items.values() {
            let cells = self.grid.locate(Occupant::Item(item.id));
            if cells != [item.pos] {
                return fail(format!("item {:?} at {} found in cells {:?}", item.id, item.pos, cells));
            }
        }
        for (pos, occupant) in self.grid.iter() {
            let known = match occupant {
                Occupant::Actor(id) => self.actors.get(id.0).is_some_and(|a| !a.fallen),
                Occupant::Obstacle(id) => self.obstacles.contains_key(&id),
                Occupant::Item(id) => self.items.contains_key(&id),
            };
            if !known {
                return fail(format!("dangling {:?} at {}", occupant, pos));
            }
        }
        Ok(())
    }
}
