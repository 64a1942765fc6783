//! Game entities module.
//!
//! This module organizes actor, obstacle and item entities.

pub mod actor;
pub mod item;
pub mod obstacle;

pub use actor::*;
pub use item::*;
pub use obstacle::*;
