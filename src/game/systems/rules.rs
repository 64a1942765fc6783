//! Collision rules.
//!
//! What happens to a sliding actor when it runs into each obstacle variant,
//! plus the placement helpers every rule shares.

use log::debug;

use crate::game::entities::ItemFate;
use crate::game::error::EngineError;
use crate::game::events::{FallCause, GameEvent};
use crate::game::state::GameState;
use crate::game::systems::movement::{SlideChain, slide_actor, slide_obstacle};
use crate::game::types::{ActorId, Direction, ItemId, ObstacleId, ObstacleKind, Occupant, Position};

/// Put an in-transit actor down at `pos`.
pub(crate) fn place_actor(game_state: &mut GameState, actor_id: ActorId, pos: Position) -> Result<(), EngineError> {
    game_state.actor_mut(actor_id)?.pos = pos;
    game_state.grid.place(pos, Occupant::Actor(actor_id));
    Ok(())
}

/// Put an in-transit obstacle down at `pos`.
pub(crate) fn place_obstacle(
    game_state: &mut GameState,
    obstacle_id: ObstacleId,
    pos: Position,
) -> Result<(), EngineError> {
    game_state.obstacle_mut(obstacle_id)?.pos = pos;
    game_state.grid.place(pos, Occupant::Obstacle(obstacle_id));
    Ok(())
}

/// Mark an actor that is already off the grid as fallen at `at`, the last
/// ice cell it touched or the pit it dropped into. Its inventory stays.
pub(crate) fn fall(
    game_state: &mut GameState,
    actor_id: ActorId,
    cause: FallCause,
    at: Position,
    chain: &mut SlideChain,
) -> Result<(), EngineError> {
    let actor = game_state.actor_mut(actor_id)?;
    actor.fallen = true;
    actor.pos = at;
    actor.disarm();
    debug!("[Rules] actor={} fell cause={:?} near={}", actor_id, cause, actor.pos);
    chain.events.push(GameEvent::ActorFell { actor: actor_id, cause });
    Ok(())
}

/// Move an item from the grid into the actor's inventory.
pub(crate) fn collect_item(
    game_state: &mut GameState,
    actor_id: ActorId,
    item_id: ItemId,
    chain: &mut SlideChain,
) -> Result<(), EngineError> {
    if let Some(item) = game_state.take_item(item_id) {
        debug!("[Rules] actor={} collects item={:?} weight={}", actor_id, item.id, item.weight);
        game_state.actor_mut(actor_id)?.collect(item.clone());
        chain.events.push(GameEvent::ItemCollected { actor: actor_id, item });
    }
    Ok(())
}

/// Apply the effect of `obstacle_id` on an actor that was sliding in
/// `direction` and is still in transit. `stop` is the last free cell before
/// the obstacle.
pub(crate) fn collide_with_obstacle(
    game_state: &mut GameState,
    actor_id: ActorId,
    obstacle_id: ObstacleId,
    stop: Position,
    direction: Direction,
    chain: &mut SlideChain,
    depth: usize,
) -> Result<(), EngineError> {
    let obstacle = game_state.obstacle(obstacle_id)?;
    let kind = obstacle.kind;
    let obstacle_pos = obstacle.pos;
    debug!("[Rules] actor={} hits obstacle={:?} kind={:?} stop={}", actor_id, obstacle_id, kind, stop);

    match kind {
        ObstacleKind::Pit => {
            // Plugged pits never reach here: the slide passes over them.
            fall(game_state, actor_id, FallCause::Pit, obstacle_pos, chain)
        }
        ObstacleKind::SlidableLight => {
            place_actor(game_state, actor_id, stop)?;
            game_state.actor_mut(actor_id)?.stunned = true;
            chain.events.push(GameEvent::Stunned { actor: actor_id, obstacle: obstacle_id });
            slide_obstacle(game_state, obstacle_id, direction, chain, depth + 1)
        }
        ObstacleKind::Immovable => {
            place_actor(game_state, actor_id, stop)?;
            let dropped = game_state.actor_mut(actor_id)?.drop_lightest();
            if let Some(item) = &dropped {
                game_state.record_lost(item.clone(), ItemFate::Dropped);
            }
            chain.events.push(GameEvent::HitImmovable { actor: actor_id, dropped });
            Ok(())
        }
        ObstacleKind::SlidableBouncer => {
            // An actor pinned between two stuck bouncers would otherwise
            // rebound forever: each pair rebounds once per chain.
            if chain.rebounds.contains(&(actor_id, obstacle_id)) {
                place_actor(game_state, actor_id, stop)?;
                chain.events.push(GameEvent::ReboundSpent { actor: actor_id, obstacle: obstacle_id });
                return slide_obstacle(game_state, obstacle_id, direction, chain, depth + 1);
            }
            chain.rebounds.push((actor_id, obstacle_id));

            let bounce = direction.opposite();
            chain.events.push(GameEvent::Bounced { actor: actor_id, direction: bounce });
            slide_obstacle(game_state, obstacle_id, direction, chain, depth + 1)?;

            place_actor(game_state, actor_id, stop)?;
            chain.events.push(GameEvent::Sliding { actor: actor_id, direction: bounce });
            slide_actor(game_state, actor_id, bounce, chain, depth + 1)
        }
    }
}
