//! Grid module.
//!
//! Holds the bounded multi-occupancy surface the objects slide on.

pub mod grid;

pub use grid::*;
