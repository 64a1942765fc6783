//! Special abilities.
//!
//! Each actor gets one activation per game. Activation either arms state the
//! slide engine reads during the same turn (stop counter, jump target) or, for
//! SafeStep, moves the actor right away.

use log::debug;

use crate::game::entities::ArmedAbility;
use crate::game::error::EngineError;
use crate::game::events::{Blocker, FallCause, SpecialOutcome};
use crate::game::state::GameState;
use crate::game::types::{ActorId, ActorKind, Direction, Occupant, Position};

/// Activate the actor's special ability towards `direction`.
///
/// A second activation is a no-op reported as [`SpecialOutcome::AlreadyUsed`].
pub fn activate_special(
    game_state: &mut GameState,
    actor_id: ActorId,
    direction: Direction,
) -> Result<SpecialOutcome, EngineError> {
    let actor = game_state.actor(actor_id)?;
    if actor.fallen {
        return Err(EngineError::ActorFallen(actor_id));
    }
    if !game_state.grid.occupants_at(actor.pos).contains(&Occupant::Actor(actor_id)) {
        return Err(EngineError::ActorNotOnGrid(actor_id));
    }
    if actor.special_used {
        return Ok(SpecialOutcome::AlreadyUsed);
    }
    let kind = actor.kind;
    let threshold = actor.stop_threshold();
    game_state.actor_mut(actor_id)?.special_used = true;

    let outcome = match kind {
        ActorKind::StopAt5 | ActorKind::StopAt3 => {
            let threshold = threshold.unwrap_or_default();
            game_state.actor_mut(actor_id)?.armed = ArmedAbility::StopAfter { threshold, steps: 0 };
            SpecialOutcome::StopArmed { threshold }
        }
        ActorKind::SafeStep => safe_step(game_state, actor_id, direction)?,
        ActorKind::Jumper => {
            let from = game_state.actor(actor_id)?.pos;
            match first_hazard_ahead(game_state, from, direction) {
                Some(target) => {
                    game_state.actor_mut(actor_id)?.armed = ArmedAbility::Jump { target };
                    SpecialOutcome::JumpPrepared { target }
                }
                None => SpecialOutcome::NoJumpTarget,
            }
        }
    };
    debug!("[Ability] actor={} kind={:?} dir={:?} outcome={:?}", actor_id, kind, direction, outcome);
    Ok(outcome)
}

/// First cell along `direction` (excluding `from`) that holds an obstacle
/// other than a plugged pit.
pub fn first_hazard_ahead(game_state: &GameState, from: Position, direction: Direction) -> Option<Position> {
    let mut pos = from.step(direction);
    while game_state.grid.is_valid(pos) {
        if game_state.cell(pos).obstacle.is_some() {
            return Some(pos);
        }
        pos = pos.step(direction);
    }
    None
}

fn safe_step(game_state: &mut GameState, actor_id: ActorId, direction: Direction) -> Result<SpecialOutcome, EngineError> {
    let from = game_state.actor(actor_id)?.pos;
    let target = from.step(direction);

    if !game_state.grid.is_valid(target) {
        game_state.grid.remove(from, Occupant::Actor(actor_id));
        game_state.actor_mut(actor_id)?.fallen = true;
        return Ok(SpecialOutcome::Fell { cause: FallCause::Water });
    }

    let cell = game_state.cell(target);
    if let Some(other) = cell.actor {
        return Ok(SpecialOutcome::StepBlocked { by: Blocker::Actor(other) });
    }
    if let Some(obstacle_id) = cell.obstacle {
        let obstacle = game_state.obstacle(obstacle_id)?;
        if obstacle.is_open_pit() {
            game_state.grid.remove(from, Occupant::Actor(actor_id));
            let actor = game_state.actor_mut(actor_id)?;
            actor.fallen = true;
            actor.pos = target;
            return Ok(SpecialOutcome::Fell { cause: FallCause::Pit });
        }
        return Ok(SpecialOutcome::StepBlocked { by: Blocker::Obstacle(obstacle.kind) });
    }

    game_state.grid.remove(from, Occupant::Actor(actor_id));
    game_state.grid.place(target, Occupant::Actor(actor_id));
    let mut collected = Vec::new();
    for item_id in cell.items {
        if let Some(item) = game_state.take_item(item_id) {
            collected.push(item);
        }
    }
    let actor = game_state.actor_mut(actor_id)?;
    actor.pos = target;
    actor.last_move = Some(direction);
    for item in &collected {
        actor.collect(item.clone());
    }
    Ok(SpecialOutcome::Stepped { to: target, direction, collected })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{ItemKind, ObstacleKind};

    #[test]
    fn test_stop_ability_arms_counter() {
        let mut state = GameState::empty(10);
        let actor = state.spawn_actor(ActorKind::StopAt3, Position::new(0, 0));

        let outcome = activate_special(&mut state, actor, Direction::Right).unwrap();
        assert_eq!(outcome, SpecialOutcome::StopArmed { threshold: 3 });
        assert_eq!(state.actors[0].armed, ArmedAbility::StopAfter { threshold: 3, steps: 0 });
        assert!(state.actors[0].special_used);
    }

    #[test]
    fn test_second_activation_is_noop() {
        let mut state = GameState::empty(10);
        let actor = state.spawn_actor(ActorKind::StopAt5, Position::new(0, 0));
        activate_special(&mut state, actor, Direction::Right).unwrap();
        state.actor_mut(actor).unwrap().disarm();

        let outcome = activate_special(&mut state, actor, Direction::Right).unwrap();
        assert_eq!(outcome, SpecialOutcome::AlreadyUsed);
        assert_eq!(state.actors[0].armed, ArmedAbility::None);
    }

    #[test]
    fn test_safe_step_collects_items() {
        let mut state = GameState::empty(10);
        let actor = state.spawn_actor(ActorKind::SafeStep, Position::new(3, 0));
        state.spawn_item(ItemKind::Anchovy, 4, Position::new(3, 1));

        let outcome = activate_special(&mut state, actor, Direction::Down).unwrap();
        assert!(outcome.is_success());
        assert_eq!(state.actors[0].pos, Position::new(3, 1));
        assert_eq!(state.actors[0].score(), 4);
        assert!(state.items.is_empty());
        assert!(state.check_consistency().is_ok());
    }

    #[test]
    fn test_safe_step_blocked_still_consumes() {
        let mut state = GameState::empty(10);
        let actor = state.spawn_actor(ActorKind::SafeStep, Position::new(3, 3));
        state.spawn_obstacle(ObstacleKind::Immovable, Position::new(4, 3));

        let outcome = activate_special(&mut state, actor, Direction::Right).unwrap();
        assert_eq!(outcome, SpecialOutcome::StepBlocked { by: Blocker::Obstacle(ObstacleKind::Immovable) });
        assert_eq!(state.actors[0].pos, Position::new(3, 3));
        assert!(state.actors[0].special_used);
    }

    #[test]
    fn test_safe_step_into_open_pit_falls() {
        let mut state = GameState::empty(10);
        let actor = state.spawn_actor(ActorKind::SafeStep, Position::new(3, 3));
        state.spawn_obstacle(ObstacleKind::Pit, Position::new(3, 2));

        let outcome = activate_special(&mut state, actor, Direction::Up).unwrap();
        assert_eq!(outcome, SpecialOutcome::Fell { cause: FallCause::Pit });
        assert!(state.actors[0].fallen);
        assert_eq!(state.actors[0].pos, Position::new(3, 2));
        assert!(state.check_consistency().is_ok());
    }

    #[test]
    fn test_safe_step_over_plugged_pit() {
        let mut state = GameState::empty(10);
        let actor = state.spawn_actor(ActorKind::SafeStep, Position::new(3, 3));
        let pit = state.spawn_obstacle(ObstacleKind::Pit, Position::new(2, 3));
        state.obstacle_mut(pit).unwrap().plugged = true;

        let outcome = activate_special(&mut state, actor, Direction::Left).unwrap();
        assert!(matches!(outcome, SpecialOutcome::Stepped { .. }));
        assert_eq!(state.actors[0].pos, Position::new(2, 3));
    }

    #[test]
    fn test_safe_step_off_edge() {
        let mut state = GameState::empty(10);
        let actor = state.spawn_actor(ActorKind::SafeStep, Position::new(0, 5));

        let outcome = activate_special(&mut state, actor, Direction::Left).unwrap();
        assert_eq!(outcome, SpecialOutcome::Fell { cause: FallCause::Water });
        assert!(state.grid.locate(Occupant::Actor(actor)).is_empty());
    }

    #[test]
    fn test_jumper_targets_first_hazard() {
        let mut state = GameState::empty(10);
        let actor = state.spawn_actor(ActorKind::Jumper, Position::new(0, 4));
        state.spawn_item(ItemKind::Squid, 2, Position::new(2, 4));
        state.spawn_obstacle(ObstacleKind::SlidableLight, Position::new(5, 4));
        state.spawn_obstacle(ObstacleKind::Pit, Position::new(7, 4));

        let outcome = activate_special(&mut state, actor, Direction::Right).unwrap();
        assert_eq!(outcome, SpecialOutcome::JumpPrepared { target: Position::new(5, 4) });
    }

    #[test]
    fn test_jumper_without_hazard_wastes_ability() {
        let mut state = GameState::empty(10);
        let actor = state.spawn_actor(ActorKind::Jumper, Position::new(0, 4));

        let outcome = activate_special(&mut state, actor, Direction::Right).unwrap();
        assert_eq!(outcome, SpecialOutcome::NoJumpTarget);
        assert!(state.actors[0].special_used);
        assert_eq!(state.actors[0].armed, ArmedAbility::None);
    }

    #[test]
    fn test_fallen_actor_is_rejected() {
        let mut state = GameState::empty(10);
        let actor = state.spawn_actor(ActorKind::Jumper, Position::new(0, 4));
        state.grid.remove(Position::new(0, 4), Occupant::Actor(actor));
        state.actor_mut(actor).unwrap().fallen = true;

        assert_eq!(
            activate_special(&mut state, actor, Direction::Right),
            Err(EngineError::ActorFallen(actor))
        );
    }
}
