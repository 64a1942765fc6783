use std::fmt::Write;

use crate::game::state::GameState;
use crate::game::types::{Occupant, Position};

/// Cell tag shown on the grid. Actors win over obstacles, obstacles over items.
fn cell_tag(game_state: &GameState, occupants: &[Occupant]) -> String {
    let actor = occupants.iter().find_map(|o| match o {
        Occupant::Actor(id) => Some(id.to_string()),
        _ => None,
    });
    let obstacle = || {
        occupants.iter().find_map(|o| match o {
            Occupant::Obstacle(id) => game_state.obstacles.get(id).map(|ob| ob.tag().to_string()),
            _ => None,
        })
    };
    let item = || {
        occupants.iter().find_map(|o| match o {
            Occupant::Item(id) => game_state.items.get(id).map(|it| it.tag().to_string()),
            _ => None,
        })
    };
    actor.or_else(obstacle).or_else(item).unwrap_or_default()
}

/// The grid framed by separator lines. Each cell is a two-character tag
/// padded to five columns including its `|` border.
pub fn render_grid(game_state: &GameState) -> String {
    let size = game_state.grid.size();
    let separator = "-".repeat(size * 5 + 1);
    let mut out = String::new();

    let _ = writeln!(out, "{separator}");
    for y in 0..size as i32 {
        out.push('|');
        for x in 0..size as i32 {
            let occupants = game_state.grid.occupants_at(Position::new(x, y));
            let _ = write!(out, " {:<2} |", cell_tag(game_state, occupants));
        }
        out.push('\n');
        let _ = writeln!(out, "{separator}");
    }
    out
}

/// One line per actor with its variant and the player marker.
pub fn render_roster(game_state: &GameState) -> String {
    let mut out = String::from("These are the penguins on the icy terrain:\n");
    for actor in &game_state.actors {
        let marker = if actor.player_controlled { " ---> YOUR PENGUIN" } else { "" };
        let _ = writeln!(
            out,
            "- Penguin {} ({}): {}{}",
            actor.id.0 + 1,
            actor.tag(),
            actor.kind.display_name(),
            marker
        );
    }
    out
}

fn ordinal(place: usize) -> String {
    let suffix = match (place % 10, place % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{place}{suffix}")
}

/// Final standings, heaviest haul first. Ties keep creation order.
pub fn render_scoreboard(game_state: &GameState) -> String {
    let mut out = String::from("***** SCOREBOARD FOR THE PENGUINS *****\n");
    for (i, actor) in game_state.ranking().into_iter().enumerate() {
        let marker = if actor.player_controlled { " (Your Penguin)" } else { "" };
        let items = if actor.inventory.is_empty() {
            "None".to_string()
        } else {
            actor
                .inventory
                .iter()
                .map(|item| item.scoreboard_label())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let _ = writeln!(out, "* {} place: {}{}", ordinal(i + 1), actor.tag(), marker);
        let _ = writeln!(out, "  |---> Food items: {items}");
        let _ = writeln!(out, "  |---> Total weight: {} units", actor.score());
    }
    out
}
