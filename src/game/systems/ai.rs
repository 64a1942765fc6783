//! Greedy heuristic for computer-controlled actors.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::game::state::GameState;
use crate::game::systems::abilities::first_hazard_ahead;
use crate::game::types::{ActorKind, Direction, ObstacleKind, Occupant, Position};

/// What the forward scan in one direction ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathView {
    /// At least one item before the first other occupant (or the edge).
    Item,
    /// No item, then an obstacle that is not a pit.
    Obstacle,
    Nothing,
}

/// Scan forward cell by cell. Items keep the scan going; any other occupant
/// ends it.
fn scan_path(game_state: &GameState, from: Position, direction: Direction) -> PathView {
    let mut pos = from.step(direction);
    while game_state.grid.is_valid(pos) {
        for occupant in game_state.grid.occupants_at(pos) {
            match *occupant {
                Occupant::Item(_) => return PathView::Item,
                Occupant::Obstacle(id) => {
                    return match game_state.obstacles.get(&id) {
                        Some(obstacle) if obstacle.kind != ObstacleKind::Pit => PathView::Obstacle,
                        _ => PathView::Nothing,
                    };
                }
                Occupant::Actor(_) => return PathView::Nothing,
            }
        }
        pos = pos.step(direction);
    }
    PathView::Nothing
}

/// Slide direction for an actor standing at `from`.
pub fn choose_direction<R: Rng + ?Sized>(game_state: &GameState, from: Position, rng: &mut R) -> Direction {
    let views: Vec<(Direction, PathView)> =
        Direction::ALL.iter().map(|&d| (d, scan_path(game_state, from, d))).collect();

    views
        .iter()
        .find(|(_, view)| *view == PathView::Item)
        .or_else(|| views.iter().find(|(_, view)| *view == PathView::Obstacle))
        .map(|(d, _)| *d)
        .or_else(|| Direction::ALL.into_iter().find(|&d| game_state.grid.is_valid(from.step(d))))
        .unwrap_or_else(|| random_direction(rng))
}

/// Direction for a SafeStep single-cell step: prefer a cell the step can
/// actually enter, then any in-bounds cell that is not an open pit.
pub fn choose_safe_step_direction<R: Rng + ?Sized>(
    game_state: &GameState,
    from: Position,
    rng: &mut R,
) -> Direction {
    let enterable = Direction::ALL.into_iter().find(|&d| {
        let target = from.step(d);
        let cell = game_state.cell(target);
        game_state.grid.is_valid(target) && cell.actor.is_none() && cell.obstacle.is_none()
    });
    let survivable = || {
        Direction::ALL.into_iter().find(|&d| {
            let target = from.step(d);
            let open_pit = game_state
                .cell(target)
                .obstacle
                .and_then(|id| game_state.obstacles.get(&id))
                .is_some_and(|o| o.is_open_pit());
            game_state.grid.is_valid(target) && !open_pit
        })
    };
    enterable.or_else(survivable).unwrap_or_else(|| random_direction(rng))
}

/// Whether an actor of `kind` at `from` uses its ability before sliding in
/// `direction`. Jumpers decide from the board, everyone else flips a coin.
pub fn wants_special<R: Rng + ?Sized>(
    game_state: &GameState,
    kind: ActorKind,
    from: Position,
    direction: Direction,
    chance: f64,
    rng: &mut R,
) -> bool {
    match kind {
        ActorKind::Jumper => first_hazard_ahead(game_state, from, direction).is_some(),
        _ => rng.random_bool(chance.clamp(0.0, 1.0)),
    }
}

fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Direction {
    *Direction::ALL.choose(rng).unwrap_or(&Direction::Up)
}
