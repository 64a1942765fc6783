/// Game configuration constants.
/// 
/// This module defines the main gameplay parameters such as grid size,
/// object counts, round count and ability thresholds.
pub const GRID_SIZE: usize = 10; // Width and height of the square grid.

/// Number of actors placed on the edge cells at setup.
pub const ACTOR_COUNT: usize = 3;

/// Number of obstacles placed at setup.
pub const OBSTACLE_COUNT: usize = 15;

/// Number of items placed at setup.
pub const ITEM_COUNT: usize = 20;

/// Number of rounds in a game. Every standing actor acts once per round.
pub const TOTAL_ROUNDS: u32 = 4;

/// Lightest item weight (inclusive).
pub const MIN_ITEM_WEIGHT: u32 = 1;

/// Heaviest item weight (inclusive).
pub const MAX_ITEM_WEIGHT: u32 = 5;

/// Probability that an AI actor (other than a Jumper) uses its special ability on a turn.
pub const AI_SPECIAL_CHANCE: f64 = 0.30;

/// Steps after which an armed StopAt5 actor halts.
pub const STOP_AT_5_THRESHOLD: u32 = 5;

/// Steps after which an armed StopAt3 actor halts.
pub const STOP_AT_3_THRESHOLD: u32 = 3;

/// Maximum nesting of slide chains (momentum transfers and bounces) in one action.
pub const MAX_CHAIN_DEPTH: usize = 256;
