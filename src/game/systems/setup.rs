//! Random board population.

use log::{info, warn};
use rand::seq::{IndexedRandom, IteratorRandom};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use thiserror::Error;

use crate::config::{ConfigError, GameConfig};
use crate::game::state::GameState;
use crate::game::types::{ActorKind, ItemKind, ObstacleKind, Position};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no free cell left to place {0}")]
    NoFreeCell(&'static str),
}

/// Board RNG. Without a configured seed one is drawn from entropy; the seed
/// actually used is returned so the game can be replayed.
pub fn seeded_rng(seed: Option<u64>) -> (u64, Pcg32) {
    let seed = seed.unwrap_or_else(rand::random);
    (seed, Pcg32::seed_from_u64(seed))
}

/// Build a fresh board: actors on distinct edge cells, then obstacles and
/// items on empty cells anywhere.
pub fn populate<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<GameState, SetupError> {
    config.validate()?;
    let mut game_state = GameState::empty(config.grid_size);
    game_state.seed = config.seed;

    for _ in 0..config.actor_count {
        let pos = random_empty(&game_state, game_state.grid.edge_positions(), rng)
            .ok_or(SetupError::NoFreeCell("an actor"))?;
        let kind = *ActorKind::ALL.choose(rng).unwrap_or(&ActorKind::StopAt5);
        game_state.spawn_actor(kind, pos);
    }
    if config.human_player {
        let index = rng.random_range(0..game_state.actors.len());
        game_state.actors[index].player_controlled = true;
    }

    for _ in 0..config.obstacle_count {
        let pos = random_empty(&game_state, game_state.grid.positions(), rng)
            .ok_or(SetupError::NoFreeCell("an obstacle"))?;
        let kind = *ObstacleKind::ALL.choose(rng).unwrap_or(&ObstacleKind::Immovable);
        game_state.spawn_obstacle(kind, pos);
    }

    for _ in 0..config.item_count {
        let Some(pos) = random_empty(&game_state, game_state.grid.positions(), rng) else {
            warn!("[Setup] board full, placed {} of {} items", game_state.items.len(), config.item_count);
            break;
        };
        let kind = *ItemKind::ALL.choose(rng).unwrap_or(&ItemKind::Krill);
        let weight = rng.random_range(config.min_item_weight..=config.max_item_weight);
        game_state.spawn_item(kind, weight, pos);
    }

    info!(
        "[Setup] seed={:?} size={} actors={} obstacles={} items={}",
        config.seed,
        config.grid_size,
        game_state.actors.len(),
        game_state.obstacles.len(),
        game_state.items.len()
    );
    Ok(game_state)
}

fn random_empty<R: Rng + ?Sized>(
    game_state: &GameState,
    candidates: impl Iterator<Item = Position>,
    rng: &mut R,
) -> Option<Position> {
    candidates
        .filter(|&pos| game_state.grid.is_empty(pos))
        .choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::Occupant;

    #[test]
    fn test_populate_matches_config() {
        let config = GameConfig { seed: Some(11), ..GameConfig::default() };
        let (_, mut rng) = seeded_rng(config.seed);
        let state = populate(&config, &mut rng).unwrap();

        assert_eq!(state.actors.len(), 3);
        assert_eq!(state.obstacles.len(), 15);
        assert_eq!(state.items.len(), 20);
        assert_eq!(state.actors.iter().filter(|a| a.player_controlled).count(), 1);
        assert!(state.check_consistency().is_ok());
    }

    #[test]
    fn test_actors_start_on_edges_and_cells_are_single() {
        let config = GameConfig { human_player: false, ..GameConfig::default() };
        let (_, mut rng) = seeded_rng(Some(3));
        let state = populate(&config, &mut rng).unwrap();

        let last = config.grid_size as i32 - 1;
        for actor in &state.actors {
            let Position { x, y } = actor.pos;
            assert!(x == 0 || y == 0 || x == last || y == last);
            assert!(!actor.player_controlled);
        }
        for pos in state.grid.positions() {
            assert!(state.grid.occupants_at(pos).len() <= 1);
        }
    }

    #[test]
    fn test_same_seed_same_board() {
        let config = GameConfig::default();
        let (_, mut a) = seeded_rng(Some(99));
        let (_, mut b) = seeded_rng(Some(99));
        let first = populate(&config, &mut a).unwrap();
        let second = populate(&config, &mut b).unwrap();

        let layout = |s: &GameState| -> Vec<(Position, Occupant)> { s.grid.iter().collect() };
        assert_eq!(layout(&first), layout(&second));
    }

    #[test]
    fn test_item_weights_in_range() {
        let config = GameConfig { min_item_weight: 2, max_item_weight: 3, ..GameConfig::default() };
        let (_, mut rng) = seeded_rng(Some(5));
        let state = populate(&config, &mut rng).unwrap();
        assert!(state.items.values().all(|item| (2..=3).contains(&item.weight)));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig { rounds: 0, ..GameConfig::default() };
        let (_, mut rng) = seeded_rng(Some(1));
        assert_eq!(
            populate(&config, &mut rng).unwrap_err(),
            SetupError::Config(ConfigError::NoRounds)
        );
    }
}
