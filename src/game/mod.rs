pub mod types;
pub mod grid;
pub mod entities;
pub mod state;
pub mod events;
pub mod error;
pub mod systems;
pub mod game_loop;


pub use error::{EngineError, GameError};
pub use events::{GameEvent, SpecialOutcome};
pub use state::GameState;
