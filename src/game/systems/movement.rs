//! Slide resolution system.
//!
//! An actor or obstacle set in motion advances one cell at a time until an
//! edge, a collision or a voluntary stop ends the slide. Collisions may set
//! other objects sliding, so the two entry points call each other (through
//! the collision rules in [`super::rules`]) with an explicit depth counter.
//!
//! Every slide removes the mover from the grid first and puts it back
//! exactly once (or never, if it is destroyed or falls).

use log::debug;

use crate::config::game::MAX_CHAIN_DEPTH;
use crate::game::entities::ItemFate;
use crate::game::error::EngineError;
use crate::game::events::{FallCause, GameEvent};
use crate::game::state::GameState;
use crate::game::systems::rules::{
    collect_item, collide_with_obstacle, fall, place_actor, place_obstacle,
};
use crate::game::types::{ActorId, Direction, ObstacleId, ObstacleKind, Occupant};

/// Slide an actor until something stops it, resolving every chain reaction.
pub fn resolve_actor_slide(
    game_state: &mut GameState,
    actor_id: ActorId,
    direction: Direction,
) -> Result<Vec<GameEvent>, EngineError> {
    let mut chain = SlideChain::default();
    slide_actor(game_state, actor_id, direction, &mut chain, 0)?;
    Ok(chain.events)
}

/// Slide a slidable obstacle until something stops or absorbs it.
pub fn resolve_obstacle_slide(
    game_state: &mut GameState,
    obstacle_id: ObstacleId,
    direction: Direction,
) -> Result<Vec<GameEvent>, EngineError> {
    let mut chain = SlideChain::default();
    slide_obstacle(game_state, obstacle_id, direction, &mut chain, 0)?;
    Ok(chain.events)
}

/// Bookkeeping shared by every hop of one chain reaction.
#[derive(Debug, Default)]
pub(crate) struct SlideChain {
    pub events: Vec<GameEvent>,
    /// (actor, bouncer) pairs that already rebounded in this chain.
    pub rebounds: Vec<(ActorId, ObstacleId)>,
}

fn check_depth(depth: usize) -> Result<(), EngineError> {
    if depth >= MAX_CHAIN_DEPTH {
        return Err(EngineError::ChainTooDeep { limit: MAX_CHAIN_DEPTH });
    }
    Ok(())
}

pub(crate) fn slide_actor(
    game_state: &mut GameState,
    actor_id: ActorId,
    direction: Direction,
    chain: &mut SlideChain,
    depth: usize,
) -> Result<(), EngineError> {
    check_depth(depth)?;

    let actor = game_state.actor(actor_id)?;
    if actor.fallen {
        return Err(EngineError::ActorFallen(actor_id));
    }
    let start = actor.pos;
    if !game_state.grid.remove(start, Occupant::Actor(actor_id)) {
        return Err(EngineError::ActorNotOnGrid(actor_id));
    }
    game_state.actor_mut(actor_id)?.last_move = Some(direction);
    debug!("[Slide] actor={} dir={:?} from={} depth={}", actor_id, direction, start, depth);

    let mut current = start;
    loop {
        let next = current.step(direction);

        if !game_state.grid.is_valid(next) {
            return fall(game_state, actor_id, FallCause::Water, current, chain);
        }

        // Jumper: hop over the hazard picked when the ability was activated.
        let jump_over = game_state
            .actor(actor_id)?
            .jump_target()
            .filter(|target| *target == next)
            .and_then(|_| game_state.cell(next).obstacle);
        if let Some(hazard) = jump_over {
            let hazard_kind = game_state.obstacle(hazard)?.kind;
            game_state.actor_mut(actor_id)?.disarm();

            let landing = next.step(direction);
            if !game_state.grid.is_valid(landing) {
                return fall(game_state, actor_id, FallCause::JumpIntoWater, current, chain);
            }
            let landing_cell = game_state.cell(landing);
            if landing_cell.only_items() {
                debug!("[Slide] actor={} jumps over={:?} landing={}", actor_id, hazard_kind, landing);
                chain.events.push(GameEvent::Jumped { actor: actor_id, over: hazard_kind, landing });
                current = landing;
                if let Some(&item_id) = landing_cell.items.first() {
                    place_actor(game_state, actor_id, landing)?;
                    return collect_item(game_state, actor_id, item_id, chain);
                }
                continue;
            }
            chain.events.push(GameEvent::JumpBlocked { actor: actor_id, at: landing });
        }

        // StopAt variants: halt once the armed counter reaches its threshold,
        // whatever the next cell holds.
        if game_state.actor_mut(actor_id)?.count_step() {
            place_actor(game_state, actor_id, next)?;
            game_state.actor_mut(actor_id)?.disarm();
            debug!("[Slide] actor={} voluntary stop at={}", actor_id, next);
            chain.events.push(GameEvent::VoluntaryStop { actor: actor_id, at: next });
            return Ok(());
        }

        let cell = game_state.cell(next);
        if let Some(&item_id) = cell.items.first() {
            place_actor(game_state, actor_id, next)?;
            return collect_item(game_state, actor_id, item_id, chain);
        }

        if let Some(struck) = cell.actor {
            place_actor(game_state, actor_id, current)?;
            debug!("[Slide] actor={} hits actor={} at={}", actor_id, struck, next);
            chain.events.push(GameEvent::ActorsCollided { mover: actor_id, struck, direction });
            return slide_actor(game_state, struck, direction, chain, depth + 1);
        }

        if let Some(obstacle_id) = cell.obstacle {
            return collide_with_obstacle(game_state, actor_id, obstacle_id, current, direction, chain, depth);
        }

        // Empty ice or a plugged pit: keep going.
        current = next;
    }
}

pub(crate) fn slide_obstacle(
    game_state: &mut GameState,
    obstacle_id: ObstacleId,
    direction: Direction,
    chain: &mut SlideChain,
    depth: usize,
) -> Result<(), EngineError> {
    check_depth(depth)?;

    let obstacle = game_state.obstacle(obstacle_id)?;
    let kind = obstacle.kind;
    if !kind.is_slidable() {
        return Err(EngineError::ObstacleNotSlidable { id: obstacle_id, kind });
    }
    let start = obstacle.pos;
    if !game_state.grid.remove(start, Occupant::Obstacle(obstacle_id)) {
        return Err(EngineError::ObstacleNotOnGrid(obstacle_id));
    }
    debug!("[Slide] obstacle={:?} kind={:?} dir={:?} from={} depth={}", obstacle_id, kind, direction, start, depth);
    chain.events.push(GameEvent::ObstacleSlideStarted { obstacle: obstacle_id, kind, direction });

    let mut current = start;
    loop {
        let next = current.step(direction);

        if !game_state.grid.is_valid(next) {
            game_state.obstacles.remove(&obstacle_id);
            debug!("[Slide] obstacle={:?} fell off at={}", obstacle_id, current);
            chain.events.push(GameEvent::ObstacleFell { obstacle: obstacle_id, kind });
            return Ok(());
        }

        let cell = game_state.cell(next);

        if let Some(actor) = cell.actor {
            place_obstacle(game_state, obstacle_id, current)?;
            chain.events.push(GameEvent::ObstacleStoppedByActor { obstacle: obstacle_id, kind, actor });
            return Ok(());
        }

        if let Some(other_id) = cell.obstacle {
            let other_kind = game_state.obstacle(other_id)?.kind;

            if other_kind == ObstacleKind::Pit {
                // Only open pits reach here; plugged ones are transparent.
                game_state.obstacle_mut(other_id)?.plugged = true;
                game_state.obstacles.remove(&obstacle_id);
                debug!("[Slide] obstacle={:?} plugs pit={:?} at={}", obstacle_id, other_id, next);
                chain.events.push(GameEvent::PitPlugged { obstacle: obstacle_id, kind, pit: other_id, at: next });
                return Ok(());
            }

            place_obstacle(game_state, obstacle_id, current)?;
            if kind == ObstacleKind::SlidableLight && other_kind == ObstacleKind::SlidableBouncer {
                chain.events.push(GameEvent::ObstaclesCollided { mover: obstacle_id, struck: other_id, direction });
                return slide_obstacle(game_state, other_id, direction, chain, depth + 1);
            }
            chain.events.push(GameEvent::ObstacleStoppedByObstacle { obstacle: obstacle_id, kind, against: other_kind });
            return Ok(());
        }

        // Obstacles plough through items.
        for item_id in cell.items {
            if let Some(item) = game_state.take_item(item_id) {
                debug!("[Slide] obstacle={:?} crushes item={:?} at={}", obstacle_id, item.id, next);
                game_state.record_lost(item.clone(), ItemFate::Crushed);
                chain.events.push(GameEvent::ItemCrushed { obstacle: obstacle_id, kind, item });
            }
        }

        current = next;
    }
}
