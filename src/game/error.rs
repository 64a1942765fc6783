//! Engine precondition failures.
//!
//! In-bounds outcomes (falling, blocked steps, failed jumps) are reported as
//! events. These errors mean the caller's bookkeeping is wrong.

use thiserror::Error;

use crate::game::types::{ActorId, ObstacleId, ObstacleKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unknown actor {0}")]
    UnknownActor(ActorId),
    #[error("actor {0} has already fallen")]
    ActorFallen(ActorId),
    #[error("actor {0} is not on the grid at its recorded position")]
    ActorNotOnGrid(ActorId),
    #[error("obstacle {0:?} no longer exists")]
    UnknownObstacle(ObstacleId),
    #[error("obstacle {0:?} is not on the grid at its recorded position")]
    ObstacleNotOnGrid(ObstacleId),
    #[error("obstacle {id:?} ({kind:?}) cannot slide")]
    ObstacleNotSlidable { id: ObstacleId, kind: ObstacleKind },
    #[error("slide chain exceeded {limit} nested moves")]
    ChainTooDeep { limit: usize },
    #[error("grid bookkeeping is inconsistent: {0}")]
    Inconsistent(String),
}

/// Failure of a whole turn or game: an engine precondition or terminal I/O.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("input closed while waiting for {0}")]
    InputClosed(&'static str),
}
