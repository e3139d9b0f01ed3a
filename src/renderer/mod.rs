//! Text rendering module
//!
//! Draws the grid one character per cell and overlays each actor at its
//! rounded position. Read-only: nothing here touches simulation state.

use crate::sim::{Actor, ActorKind, FireballPattern, Level, Tile};

fn tile_char(tile: Tile) -> char {
    match tile {
        Tile::Empty => ' ',
        Tile::Wall => 'x',
        Tile::Lava => '!',
    }
}

fn actor_char(actor: &Actor) -> char {
    match actor.kind {
        ActorKind::Actor => '?',
        ActorKind::Player { .. } => '@',
        ActorKind::Coin(_) => 'o',
        ActorKind::Fireball { pattern, .. } => match pattern {
            FireballPattern::Horizontal => '=',
            FireballPattern::Vertical => '|',
            FireballPattern::Rain => 'v',
        },
    }
}

/// Render a level as `height` lines of `width` characters
pub fn render_ascii(level: &Level) -> String {
    let mut rows: Vec<Vec<char>> = (0..level.height)
        .map(|y| (0..level.width).map(|x| tile_char(level.tile(x, y))).collect())
        .collect();

    // Player last so it stays visible over anything it overlaps
    let (players, others): (Vec<&Actor>, Vec<&Actor>) =
        level.actors().iter().partition(|a| a.is_player());
    for actor in others.into_iter().chain(players) {
        let x = actor.pos.x().round();
        // Row of the cell the actor's feet are in
        let y = (actor.bottom() - 1.0).round();
        if x < 0.0 || y < 0.0 {
            continue;
        }
        if let Some(cell) = rows.get_mut(y as usize).and_then(|row| row.get_mut(x as usize)) {
            *cell = actor_char(actor);
        }
    }

    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
