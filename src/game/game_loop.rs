//! Turn controller.
//!
//! Runs the rounds, asks a [`Controller`] for every decision and hands the
//! moves to the engine. Narration is written to any `Write` sink.

use std::io::{BufRead, Write};

use log::info;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::game::entities::Actor;
use crate::game::error::GameError;
use crate::game::events::GameEvent;
use crate::game::state::GameState;
use crate::game::systems::{activate_special, ai, render_grid, render_roster, render_scoreboard, resolve_actor_slide};
use crate::game::types::{ActorId, ActorKind, Direction};

/// Source of decisions for one or more actors.
pub trait Controller {
    fn slide_direction(&mut self, game_state: &GameState, actor: &Actor) -> Result<Direction, GameError>;

    /// `direction` is the planned slide, or `None` when the ability is used
    /// before the slide is chosen (SafeStep).
    fn wants_special(
        &mut self,
        game_state: &GameState,
        actor: &Actor,
        direction: Option<Direction>,
    ) -> Result<bool, GameError>;

    fn step_direction(&mut self, game_state: &GameState, actor: &Actor) -> Result<Direction, GameError>;
}

/// Greedy computer player.
pub struct AiController {
    rng: Pcg32,
    special_chance: f64,
}

impl AiController {
    pub fn new(rng: Pcg32, special_chance: f64) -> Self {
        Self { rng, special_chance }
    }
}

impl Controller for AiController {
    fn slide_direction(&mut self, game_state: &GameState, actor: &Actor) -> Result<Direction, GameError> {
        Ok(ai::choose_direction(game_state, actor.pos, &mut self.rng))
    }

    fn wants_special(
        &mut self,
        game_state: &GameState,
        actor: &Actor,
        direction: Option<Direction>,
    ) -> Result<bool, GameError> {
        Ok(match direction {
            Some(direction) => ai::wants_special(
                game_state,
                actor.kind,
                actor.pos,
                direction,
                self.special_chance,
                &mut self.rng,
            ),
            None => self.rng.random_bool(self.special_chance.clamp(0.0, 1.0)),
        })
    }

    fn step_direction(&mut self, game_state: &GameState, actor: &Actor) -> Result<Direction, GameError> {
        Ok(ai::choose_safe_step_direction(game_state, actor.pos, &mut self.rng))
    }
}

/// Prompts a person on a line-oriented terminal.
pub struct HumanController<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanController<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask until `parse` accepts the trimmed, upper-cased answer.
    fn ask<T>(
        &mut self,
        prompt: &str,
        retry: &str,
        what: &'static str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T, GameError> {
        loop {
            write!(self.output, "{prompt} --> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(GameError::InputClosed(what));
            }
            if let Some(answer) = parse(line.trim().to_uppercase().as_str()) {
                return Ok(answer);
            }
            writeln!(self.output, "{retry}")?;
        }
    }

    fn ask_direction(&mut self, prompt: String) -> Result<Direction, GameError> {
        self.ask(
            &format!("{prompt} Answer with U (Up), D (Down), L (Left), R (Right)"),
            "Invalid input. Please enter U, D, L, or R.",
            "a direction",
            Direction::from_letter,
        )
    }
}

impl<R: BufRead, W: Write> Controller for HumanController<R, W> {
    fn slide_direction(&mut self, _game_state: &GameState, actor: &Actor) -> Result<Direction, GameError> {
        self.ask_direction(format!("Which direction will {} move?", actor.id))
    }

    fn wants_special(
        &mut self,
        _game_state: &GameState,
        actor: &Actor,
        _direction: Option<Direction>,
    ) -> Result<bool, GameError> {
        self.ask(
            &format!("Will {} use its special action? Answer with Y or N", actor.id),
            "Invalid input. Please enter Y or N.",
            "a yes/no answer",
            |answer| match answer {
                "Y" => Some(true),
                "N" => Some(false),
                _ => None,
            },
        )
    }

    fn step_direction(&mut self, _game_state: &GameState, actor: &Actor) -> Result<Direction, GameError> {
        self.ask_direction(format!("Which direction will {} use its special action?", actor.id))
    }
}

/// Ask the controller whether to use the ability and apply it.
fn maybe_special(
    game_state: &mut GameState,
    actor_id: ActorId,
    controller: &mut dyn Controller,
    slide: Option<Direction>,
    events: &mut Vec<GameEvent>,
) -> Result<(), GameError> {
    let actor = game_state.actor(actor_id)?.clone();
    if actor.special_used {
        return Ok(());
    }
    if !controller.wants_special(game_state, &actor, slide)? {
        events.push(GameEvent::SpecialDeclined { actor: actor_id });
        return Ok(());
    }
    events.push(GameEvent::SpecialChosen { actor: actor_id });

    let direction = match slide {
        Some(direction) => direction,
        None => controller.step_direction(game_state, &actor)?,
    };
    let outcome = activate_special(game_state, actor_id, direction)?;
    events.push(GameEvent::SpecialActivated { actor: actor_id, outcome });
    game_state.check_consistency()?;
    Ok(())
}

fn slide(
    game_state: &mut GameState,
    actor_id: ActorId,
    direction: Direction,
    events: &mut Vec<GameEvent>,
) -> Result<(), GameError> {
    events.push(GameEvent::SlideStarted { actor: actor_id, direction });
    events.extend(resolve_actor_slide(game_state, actor_id, direction)?);
    Ok(())
}

/// Play one actor's turn and return what happened, in order.
///
/// Fallen actors do nothing. A stunned actor loses this turn and recovers.
/// Ability state armed during the turn does not outlive it.
pub fn take_turn(
    game_state: &mut GameState,
    actor_id: ActorId,
    controller: &mut dyn Controller,
) -> Result<Vec<GameEvent>, GameError> {
    let mut events = Vec::new();
    let actor = game_state.actor_mut(actor_id)?;
    if actor.fallen {
        return Ok(events);
    }
    actor.disarm();
    if actor.stunned {
        actor.stunned = false;
        info!("[Turn] round={} actor={} skipped=stunned", game_state.round, actor_id);
        events.push(GameEvent::TurnSkipped { actor: actor_id });
        return Ok(events);
    }
    let kind = actor.kind;

    if kind == ActorKind::SafeStep {
        maybe_special(game_state, actor_id, controller, None, &mut events)?;
        let actor = game_state.actor(actor_id)?.clone();
        if !actor.fallen {
            let direction = controller.slide_direction(game_state, &actor)?;
            slide(game_state, actor_id, direction, &mut events)?;
        }
    } else {
        let actor = game_state.actor(actor_id)?.clone();
        let direction = controller.slide_direction(game_state, &actor)?;
        maybe_special(game_state, actor_id, controller, Some(direction), &mut events)?;
        if !game_state.actor(actor_id)?.fallen {
            slide(game_state, actor_id, direction, &mut events)?;
        }
    }

    game_state.actor_mut(actor_id)?.disarm();
    game_state.check_consistency()?;
    info!(
        "[Turn] round={} actor={} kind={:?} events={}",
        game_state.round,
        actor_id,
        kind,
        events.len()
    );
    Ok(events)
}

/// Play every round and print the final scoreboard.
pub fn run_game(
    game_state: &mut GameState,
    human: &mut dyn Controller,
    computer: &mut dyn Controller,
    rounds: u32,
    out: &mut dyn Write,
) -> Result<(), GameError> {
    writeln!(out, "The initial icy terrain grid:")?;
    writeln!(out, "{}", render_grid(game_state))?;
    writeln!(out, "{}", render_roster(game_state))?;

    for round in 1..=rounds {
        game_state.round = round;
        for index in 0..game_state.actors.len() {
            let actor_id = ActorId(index);
            let actor = game_state.actor(actor_id)?;
            if actor.fallen {
                continue;
            }
            let player = actor.player_controlled;
            let marker = if player { " (Your Penguin):" } else { ":" };
            writeln!(out, "*** Turn {round} - {actor_id}{marker}")?;

            let controller: &mut dyn Controller = if player { &mut *human } else { &mut *computer };
            let events = take_turn(game_state, actor_id, controller)?;
            for event in &events {
                writeln!(out, "{event}")?;
            }
            if !matches!(events.as_slice(), [GameEvent::TurnSkipped { .. }]) {
                writeln!(out, "New state of the grid:")?;
            }
            writeln!(out, "{}", render_grid(game_state))?;
        }
    }

    writeln!(out, "***** GAME OVER *****")?;
    writeln!(out)?;
    write!(out, "{}", render_scoreboard(game_state))?;
    info!("[Game] finished rounds={} standing={}", rounds, game_state.standing_actors().count());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::ArmedAbility;
    use crate::game::events::SpecialOutcome;
    use crate::game::types::{ItemKind, ObstacleKind, Occupant, Position};
    use rand::SeedableRng;
    use std::io::Cursor;

    /// Replays a fixed script of decisions.
    struct Scripted {
        slides: Vec<Direction>,
        special: bool,
        step: Direction,
    }

    impl Controller for Scripted {
        fn slide_direction(&mut self, _: &GameState, _: &Actor) -> Result<Direction, GameError> {
            Ok(self.slides.remove(0))
        }
        fn wants_special(&mut self, _: &GameState, _: &Actor, _: Option<Direction>) -> Result<bool, GameError> {
            Ok(self.special)
        }
        fn step_direction(&mut self, _: &GameState, _: &Actor) -> Result<Direction, GameError> {
            Ok(self.step)
        }
    }

    fn scripted(slides: Vec<Direction>, special: bool) -> Scripted {
        Scripted { slides, special, step: Direction::Down }
    }

    #[test]
    fn test_stunned_actor_skips_once() {
        let mut state = GameState::empty(10);
        let actor = state.spawn_actor(ActorKind::StopAt5, Position::new(0, 5));
        state.actor_mut(actor).unwrap().stunned = true;
        let mut controller = scripted(vec![Direction::Right], false);

        let events = take_turn(&mut state, actor, &mut controller).unwrap();
        assert_eq!(events, vec![GameEvent::TurnSkipped { actor }]);
        assert!(!state.actors[0].stunned);
        assert_eq!(state.actors[0].pos, Position::new(0, 5));
    }

    #[test]
    fn test_fallen_actor_does_nothing() {
        let mut state = GameState::empty(10);
        let actor = state.spawn_actor(ActorKind::StopAt5, Position::new(0, 5));
        state.grid.remove(Position::new(0, 5), Occupant::Actor(actor));
        state.actor_mut(actor).unwrap().fallen = true;
        let mut controller = scripted(vec![], true);

        assert!(take_turn(&mut state, actor, &mut controller).unwrap().is_empty());
    }

    #[test]
    fn test_stop_ability_halts_slide_and_is_disarmed() {
        let mut state = GameState::empty(10);
        let actor = state.spawn_actor(ActorKind::StopAt3, Position::new(0, 5));
        let mut controller = scripted(vec![Direction::Right], true);

        let events = take_turn(&mut state, actor, &mut controller).unwrap();
        assert_eq!(state.actors[0].pos, Position::new(3, 5));
        assert!(events.contains(&GameEvent::VoluntaryStop { actor, at: Position::new(3, 5) }));
        assert_eq!(state.actors[0].armed, ArmedAbility::None);
        assert!(state.actors[0].special_used);
    }

    #[test]
    fn test_armed_stop_does_not_leak_into_other_turns() {
        let mut state = GameState::empty(10);
        let stopper = state.spawn_actor(ActorKind::StopAt5, Position::new(0, 2));
        state.spawn_obstacle(ObstacleKind::Immovable, Position::new(2, 2));
        let pusher = state.spawn_actor(ActorKind::StopAt3, Position::new(0, 9));

        // Stopper arms, then bumps into the block after one step.
        take_turn(&mut state, stopper, &mut scripted(vec![Direction::Right], true)).unwrap();
        assert_eq!(state.actors[0].pos, Position::new(1, 2));

        // Pusher drives it down the column: no voluntary stop on someone else's turn.
        state.grid.remove(Position::new(0, 9), Occupant::Actor(pusher));
        state.actor_mut(pusher).unwrap().pos = Position::new(1, 0);
        state.grid.place(Position::new(1, 0), Occupant::Actor(pusher));
        take_turn(&mut state, pusher, &mut scripted(vec![Direction::Down], false)).unwrap();
        assert!(state.actors[0].fallen);
    }

    #[test]
    fn test_safe_step_then_slide() {
        let mut state = GameState::empty(10);
        let actor = state.spawn_actor(ActorKind::SafeStep, Position::new(4, 0));
        state.spawn_item(ItemKind::Krill, 2, Position::new(4, 1));
        state.spawn_item(ItemKind::Squid, 3, Position::new(7, 1));
        let mut controller = scripted(vec![Direction::Right], true);

        let events = take_turn(&mut state, actor, &mut controller).unwrap();
        assert!(matches!(events[0], GameEvent::SpecialChosen { .. }));
        assert!(matches!(
            events[1],
            GameEvent::SpecialActivated { outcome: SpecialOutcome::Stepped { .. }, .. }
        ));
        assert_eq!(state.actors[0].pos, Position::new(7, 1));
        assert_eq!(state.actors[0].score(), 5);
    }

    #[test]
    fn test_safe_step_fall_skips_slide() {
        let mut state = GameState::empty(10);
        let actor = state.spawn_actor(ActorKind::SafeStep, Position::new(4, 9));
        let mut controller = scripted(vec![], true);

        let events = take_turn(&mut state, actor, &mut controller).unwrap();
        assert!(state.actors[0].fallen);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::SlideStarted { .. })));
    }

    #[test]
    fn test_human_prompts_reprompt_on_bad_input() {
        let mut state = GameState::empty(10);
        let actor = state.spawn_actor(ActorKind::StopAt5, Position::new(0, 0));
        let input = Cursor::new(b"x\nq\nr\nn\n".to_vec());
        let mut output = Vec::new();

        {
            let mut human = HumanController::new(input, &mut output);
            let events = take_turn(&mut state, actor, &mut human).unwrap();
            assert_eq!(events[0], GameEvent::SpecialDeclined { actor });
        }
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Invalid input. Please enter U, D, L, or R.").count(), 2);
        assert!(text.contains("Will P1 use its special action? Answer with Y or N --> "));
        assert!(state.actors[0].fallen);
    }

    #[test]
    fn test_human_input_closed_is_error() {
        let mut state = GameState::empty(10);
        let actor = state.spawn_actor(ActorKind::Jumper, Position::new(0, 0));
        let mut human = HumanController::new(Cursor::new(Vec::new()), Vec::new());

        assert!(matches!(
            take_turn(&mut state, actor, &mut human),
            Err(GameError::InputClosed(_))
        ));
    }

    #[test]
    fn test_full_ai_game_runs_to_scoreboard() {
        let config = crate::config::GameConfig { human_player: false, ..Default::default() };
        let (_, mut rng) = crate::game::systems::seeded_rng(Some(2024));
        let mut state = crate::game::systems::populate(&config, &mut rng).unwrap();
        let mut first = AiController::new(Pcg32::seed_from_u64(1), 0.3);
        let mut second = AiController::new(Pcg32::seed_from_u64(2), 0.3);
        let mut out = Vec::new();

        run_game(&mut state, &mut first, &mut second, config.rounds, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("The initial icy terrain grid:"));
        assert!(text.contains("***** GAME OVER *****"));
        assert!(text.contains("1st place:"));
        assert!(state.check_consistency().is_ok());
    }
}
