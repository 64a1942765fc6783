//! Runtime game settings.
//!
//! Defaults come from [`crate::config::game`]; a JSON file or CLI flags may override them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::game::{
    ACTOR_COUNT, AI_SPECIAL_CHANCE, GRID_SIZE, ITEM_COUNT, MAX_ITEM_WEIGHT, MIN_ITEM_WEIGHT,
    OBSTACLE_COUNT, TOTAL_ROUNDS,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid size must be at least 2, got {0}")]
    GridTooSmall(usize),
    #[error("at least one actor is required")]
    NoActors,
    #[error("{actors} actors do not fit on the {edge_cells} edge cells")]
    TooManyActors { actors: usize, edge_cells: usize },
    #[error("{objects} objects do not fit on a grid of {cells} cells")]
    TooManyObjects { objects: usize, cells: usize },
    #[error("a game needs at least one round")]
    NoRounds,
    #[error("item weight range {min}..={max} is empty")]
    EmptyWeightRange { min: u32, max: u32 },
    #[error("special ability chance {0} is outside [0, 1]")]
    InvalidChance(f64),
    #[error("invalid config JSON: {0}")]
    Parse(String),
}

/// Settings for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_size: usize,
    pub actor_count: usize,
    pub obstacle_count: usize,
    pub item_count: usize,
    pub rounds: u32,
    pub min_item_weight: u32,
    pub max_item_weight: u32,
    pub ai_special_chance: f64,
    /// Board seed. Drawn from entropy when absent.
    pub seed: Option<u64>,
    /// Whether one actor is controlled by a human at the terminal.
    pub human_player: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            actor_count: ACTOR_COUNT,
            obstacle_count: OBSTACLE_COUNT,
            item_count: ITEM_COUNT,
            rounds: TOTAL_ROUNDS,
            min_item_weight: MIN_ITEM_WEIGHT,
            max_item_weight: MAX_ITEM_WEIGHT,
            ai_special_chance: AI_SPECIAL_CHANCE,
            seed: None,
            human_player: true,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }
        if self.actor_count == 0 {
            return Err(ConfigError::NoActors);
        }
        let edge_cells = 4 * (self.grid_size - 1);
        if self.actor_count > edge_cells {
            return Err(ConfigError::TooManyActors {
                actors: self.actor_count,
                edge_cells,
            });
        }
        let cells = self.grid_size * self.grid_size;
        let objects = self.actor_count + self.obstacle_count + self.item_count;
        if objects > cells {
            return Err(ConfigError::TooManyObjects { objects, cells });
        }
        if self.rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        if self.min_item_weight > self.max_item_weight {
            return Err(ConfigError::EmptyWeightRange {
                min: self.min_item_weight,
                max: self.max_item_weight,
            });
        }
        if !(0.0..=1.0).contains(&self.ai_special_chance) {
            return Err(ConfigError::InvalidChance(self.ai_special_chance));
        }
        Ok(())
    }
}
