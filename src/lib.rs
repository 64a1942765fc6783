//! Turn-based sliding puzzle on a frictionless grid.
//!
//! The core is the slide-resolution engine in [`game::systems::movement`];
//! setup, rendering and the turn controller are thin layers around it.

pub mod config;
pub mod game;
