//! Explicit outcome values produced by the engine and the ability system.
//!
//! Their `Display` text is the narration shown to the player.

use std::fmt;

use serde::Serialize;

use crate::game::entities::Item;
use crate::game::types::{ActorId, Direction, ObstacleId, ObstacleKind, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FallCause {
    /// Slid or stepped off the grid.
    Water,
    /// Jumped over a hazard and landed off the grid.
    JumpIntoWater,
    /// Entered an unplugged pit.
    Pit,
}

/// What stopped a careful step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Blocker {
    Actor(ActorId),
    Obstacle(ObstacleKind),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    SlideStarted { actor: ActorId, direction: Direction },
    ActorFell { actor: ActorId, cause: FallCause },
    ItemCollected { actor: ActorId, item: Item },
    /// Momentum passed from `mover` to `struck`.
    ActorsCollided { mover: ActorId, struck: ActorId, direction: Direction },
    VoluntaryStop { actor: ActorId, at: Position },
    Jumped { actor: ActorId, over: ObstacleKind, landing: Position },
    JumpBlocked { actor: ActorId, at: Position },
    Stunned { actor: ActorId, obstacle: ObstacleId },
    HitImmovable { actor: ActorId, dropped: Option<Item> },
    Bounced { actor: ActorId, direction: Direction },
    /// The actor already rebounded off this bouncer earlier in the chain and stays put.
    ReboundSpent { actor: ActorId, obstacle: ObstacleId },
    Sliding { actor: ActorId, direction: Direction },
    ObstacleSlideStarted { obstacle: ObstacleId, kind: ObstacleKind, direction: Direction },
    ObstacleFell { obstacle: ObstacleId, kind: ObstacleKind },
    PitPlugged { obstacle: ObstacleId, kind: ObstacleKind, pit: ObstacleId, at: Position },
    ItemCrushed { obstacle: ObstacleId, kind: ObstacleKind, item: Item },
    ObstacleStoppedByActor { obstacle: ObstacleId, kind: ObstacleKind, actor: ActorId },
    ObstacleStoppedByObstacle { obstacle: ObstacleId, kind: ObstacleKind, against: ObstacleKind },
    /// A sliding light block set a bouncer in motion.
    ObstaclesCollided { mover: ObstacleId, struck: ObstacleId, direction: Direction },
    TurnSkipped { actor: ActorId },
    SpecialChosen { actor: ActorId },
    SpecialDeclined { actor: ActorId },
    SpecialActivated { actor: ActorId, outcome: SpecialOutcome },
}

/// Grid tag of a slidable or blocking obstacle kind.
fn item_taken(f: &mut fmt::Formatter<'_>, actor: ActorId, item: &Item) -> fmt::Result {
    write!(
        f,
        "{} takes the {} on the ground. (Weight={} units)",
        actor,
        item.kind.display_name(),
        item.weight
    )
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::SlideStarted { actor, direction } => {
                write!(f, "{actor} chooses to move {direction}.")
            }
            GameEvent::ActorFell { actor, cause } => {
                let how = match cause {
                    FallCause::Water => "falls into the water!",
                    FallCause::JumpIntoWater => "jumps but falls into the water!",
                    FallCause::Pit => "falls into the HoleInIce!",
                };
                write!(f, "{actor} {how}\n*** {actor} IS REMOVED FROM THE GAME!")
            }
            GameEvent::ItemCollected { actor, item } => item_taken(f, *actor, item),
            GameEvent::ActorsCollided { mover, struck, direction } => {
                write!(f, "{mover} collides with {struck}!\n{struck} starts sliding {direction}.")
            }
            GameEvent::VoluntaryStop { actor, .. } => {
                write!(f, "{actor} stops at an empty square using its special action.")
            }
            GameEvent::Jumped { actor, over, .. } => {
                write!(f, "{actor} jumps over {} in its path.", over.display_name())
            }
            GameEvent::JumpBlocked { actor, .. } => {
                write!(f, "{actor} tries to jump but the landing spot is occupied!")
            }
            GameEvent::Stunned { actor, .. } => {
                write!(f, "{actor} hits a LightIceBlock and is STUNNED!")
            }
            GameEvent::HitImmovable { actor, dropped } => {
                write!(f, "{actor} hits a HeavyIceBlock!")?;
                if let Some(item) = dropped {
                    write!(
                        f,
                        "\n{actor} drops {} ({} units) as a penalty.",
                        item.kind.display_name(),
                        item.weight
                    )?;
                }
                Ok(())
            }
            GameEvent::Bounced { actor, direction } => {
                write!(f, "{actor} hits a SeaLion and bounces back!")
            }
            GameEvent::ReboundSpent { actor, .. } => {
                write!(f, "{actor} hits the same SeaLion again and comes to rest.")
            }
            GameEvent::Sliding { actor, direction } => write!(f, "{actor} slides {direction}."),
            GameEvent::ObstacleSlideStarted { kind, direction, .. } => {
                write!(f, "{} starts sliding {direction}.", kind.display_name())
            }
            GameEvent::ObstacleFell { kind, .. } => {
                write!(f, "{} falls into the water!", kind.tag())
            }
            GameEvent::PitPlugged { kind, .. } => {
                write!(f, "{} falls into HoleInIce and PLUGS it!", kind.tag())
            }
            GameEvent::ItemCrushed { kind, item, .. } => {
                write!(f, "{} destroys {}!", kind.tag(), item.kind.display_name())
            }
            GameEvent::ObstacleStoppedByActor { kind, actor, .. } => {
                write!(f, "{} stops near {actor}.", kind.tag())
            }
            GameEvent::ObstacleStoppedByObstacle { kind, against, .. } => {
                write!(f, "{} stops at {}.", kind.tag(), against.tag())
            }
            GameEvent::ObstaclesCollided { .. } => f.write_str("LightIceBlock hits SeaLion!"),
            GameEvent::TurnSkipped { actor } => {
                write!(f, "{actor}'s turn is SKIPPED due to being stunned.")
            }
            GameEvent::SpecialChosen { actor } => write!(f, "{actor} chooses to USE its special action."),
            GameEvent::SpecialDeclined { actor } => write!(f, "{actor} does NOT use its special action."),
            GameEvent::SpecialActivated { actor, outcome } => {
                write!(f, "{}", Narrated { actor: *actor, outcome })
            }
        }
    }
}

/// Result of `activate_special`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SpecialOutcome {
    /// StopAt variants: the voluntary-stop counter is running for this turn.
    StopArmed { threshold: u32 },
    /// SafeStep moved one cell, collecting whatever lay there.
    Stepped { to: Position, direction: Direction, collected: Vec<Item> },
    /// SafeStep target was occupied. The ability is spent anyway.
    StepBlocked { by: Blocker },
    /// SafeStep went off the grid or into an open pit.
    Fell { cause: FallCause },
    JumpPrepared { target: Position },
    /// Jumper scan reached the edge without finding a hazard.
    NoJumpTarget,
    /// The ability was spent on an earlier turn; nothing happened.
    AlreadyUsed,
}

impl SpecialOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            SpecialOutcome::StopArmed { .. }
                | SpecialOutcome::Stepped { .. }
                | SpecialOutcome::JumpPrepared { .. }
        )
    }
}

/// Narration for an outcome needs the actor's name, so it is rendered
/// through this wrapper.
pub struct Narrated<'a> {
    pub actor: ActorId,
    pub outcome: &'a SpecialOutcome,
}

impl fmt::Display for Narrated<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let actor = self.actor;
        match self.outcome {
            SpecialOutcome::StopArmed { threshold } => {
                write!(f, "{actor} will stop on square {threshold} of its slide.")
            }
            SpecialOutcome::Stepped { direction, collected, .. } => {
                write!(f, "{actor} moves one square to the {direction}.")?;
                for item in collected {
                    f.write_str("\n")?;
                    item_taken(f, actor, item)?;
                }
                Ok(())
            }
            SpecialOutcome::StepBlocked { by } => {
                let blocker = match by {
                    Blocker::Actor(other) => other.to_string(),
                    Blocker::Obstacle(kind) => kind.display_name().to_string(),
                };
                write!(
                    f,
                    "{actor} cannot step there! Blocked by {blocker}.\n{actor}'s special action is wasted."
                )
            }
            SpecialOutcome::Fell { cause } => {
                let into = match cause {
                    FallCause::Pit => "the HoleInIce",
                    FallCause::Water | FallCause::JumpIntoWater => "the water",
                };
                write!(f, "{actor} accidentally steps into {into}!\n*** {actor} IS REMOVED FROM THE GAME!")
            }
            SpecialOutcome::JumpPrepared { .. } => {
                write!(f, "{actor} prepares to jump over a hazard in its path.")
            }
            SpecialOutcome::NoJumpTarget => {
                write!(f, "{actor} finds no hazard to jump over. The special action is wasted.")
            }
            SpecialOutcome::AlreadyUsed => write!(f, "{actor} has already used its special action."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{ItemId, ItemKind};

    #[test]
    fn test_collect_narration() {
        let item = Item::new(ItemId(0), ItemKind::Squid, 3, Position::new(1, 1));
        let event = GameEvent::ItemCollected { actor: ActorId(0), item };
        assert_eq!(event.to_string(), "P1 takes the Squid on the ground. (Weight=3 units)");
    }

    #[test]
    fn test_fall_narration_mentions_removal() {
        let event = GameEvent::ActorFell { actor: ActorId(1), cause: FallCause::Water };
        assert_eq!(
            event.to_string(),
            "P2 falls into the water!\n*** P2 IS REMOVED FROM THE GAME!"
        );
    }

    #[test]
    fn test_blocked_step_narration() {
        let outcome = SpecialOutcome::StepBlocked { by: Blocker::Obstacle(ObstacleKind::Immovable) };
        let text = Narrated { actor: ActorId(2), outcome: &outcome }.to_string();
        assert!(text.starts_with("P3 cannot step there! Blocked by HeavyIceBlock."));
        assert!(!outcome.is_success());
    }
}
