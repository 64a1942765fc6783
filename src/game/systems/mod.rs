//! Game systems.
//!
//! The slide engine and its collision rules, ability activation, the AI
//! heuristic, board setup and text rendering.

pub mod abilities;
pub mod ai;
pub mod movement;
pub mod render;
pub mod rules;
pub mod setup;

pub use abilities::{activate_special, first_hazard_ahead};
pub use movement::{resolve_actor_slide, resolve_obstacle_slide};
pub use render::{render_grid, render_roster, render_scoreboard};
pub use setup::{SetupError, populate, seeded_rng};
