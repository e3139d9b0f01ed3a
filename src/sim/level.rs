//! Level: the static tile grid plus the live actors
//!
//! The level is the single owner of shared mutable state. Actors never hold
//! references to each other; removals and status changes go through
//! `remove_actor` and `player_touched`.

use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId};
use super::vector::Vector;
use crate::consts::FINISH_DELAY;

/// Static terrain of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Wall,
    Lava,
}

/// Terminal outcome of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Won,
    Lost,
}

/// What the player touched: a tile, or an actor of some type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Lava,
    Wall,
    Actor,
    Player,
    Coin,
    Fireball,
}

impl Contact {
    /// Contact for a blocking tile returned by `Level::obstacle_at`
    pub fn from_obstacle(tile: Tile) -> Self {
        match tile {
            Tile::Lava => Contact::Lava,
            Tile::Wall | Tile::Empty => Contact::Wall,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Level {
    grid: Vec<Vec<Tile>>,
    /// Live actors in plan order (row-major)
    actors: Vec<Actor>,
    /// First player actor, resolved once
    player: Option<ActorId>,
    pub height: usize,
    pub width: usize,
    status: Option<Status>,
    finish_delay: f32,
}

impl Level {
    pub fn new(grid: Vec<Vec<Tile>>, actors: Vec<Actor>) -> Self {
        let player = actors.iter().find(|a| a.is_player()).map(Actor::id);
        let height = grid.len();
        let width = grid.iter().map(Vec::len).max().unwrap_or(0);

        if player.is_none() {
            log::warn!("Level {}x{} has no player", width, height);
        }
        log::debug!("Level {}x{} with {} actors", width, height, actors.len());

        Self {
            grid,
            actors,
            player,
            height,
            width,
            status: None,
            finish_delay: FINISH_DELAY,
        }
    }

    pub fn grid(&self) -> &[Vec<Tile>] {
        &self.grid
    }

    /// Tile at a cell; cells past the end of a short row are empty
    pub fn tile(&self, x: usize, y: usize) -> Tile {
        self.grid
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or_default()
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id() == id)
    }

    pub fn player(&self) -> Option<&Actor> {
        self.player.and_then(|id| self.actor(id))
    }

    /// Mutable player access for the input collaborator
    pub fn player_mut(&mut self) -> Option<&mut Actor> {
        let id = self.player?;
        self.actors.iter_mut().find(|a| a.id() == id)
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }

    pub fn finish_delay(&self) -> f32 {
        self.finish_delay
    }

    /// A status is set and the finish delay has run out
    pub fn is_finished(&self) -> bool {
        self.status.is_some() && self.finish_delay < 0.0
    }

    /// First live actor overlapping `query`, skipping `query` itself
    pub fn actor_at(&self, query: &Actor) -> Option<&Actor> {
        self.actors.iter().find(|a| a.intersects(query))
    }

    /// Classify the box at `pos`/`size` against the world.
    ///
    /// Below the bottom edge is lava; past the left, right or top edge is
    /// wall. Otherwise the first non-empty tile among the cells covered by
    /// the rounded box, row-major.
    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Tile> {
        let left = pos.x();
        let top = pos.y();
        let right = left + size.x();
        let bottom = top + size.y();

        if bottom > self.height as f32 {
            return Some(Tile::Lava);
        }
        if left < 0.0 || right > self.width as f32 || top < 0.0 {
            return Some(Tile::Wall);
        }

        // Bounds are non-negative here, so the casts cannot wrap
        let rows = top.round() as usize..bottom.round() as usize;
        let cols = left.round() as usize..right.round() as usize;
        for y in rows {
            for x in cols.clone() {
                let tile = self.tile(x, y);
                if tile != Tile::Empty {
                    return Some(tile);
                }
            }
        }

        None
    }

    /// Remove an actor by identity; no-op if it is already gone
    pub fn remove_actor(&mut self, id: ActorId) {
        self.actors.retain(|a| a.id() != id);
    }

    /// No live actor of this type remains
    pub fn no_more_actors(&self, kind: Contact) -> bool {
        !self.actors.iter().any(|a| a.contact() == kind)
    }

    /// Win/lose transition. Only the first terminal event counts.
    pub fn player_touched(&mut self, kind: Contact, actor: Option<ActorId>) {
        if self.status.is_some() {
            return;
        }

        match kind {
            Contact::Lava | Contact::Fireball => {
                self.status = Some(Status::Lost);
                log::info!("Level lost: player touched {:?}", kind);
            }
            Contact::Coin => {
                if let Some(id) = actor {
                    self.remove_actor(id);
                }
                if self.no_more_actors(Contact::Coin) {
                    self.status = Some(Status::Won);
                    log::info!("Level won: all coins collected");
                }
            }
            Contact::Wall | Contact::Actor | Contact::Player => {}
        }
    }

    /// Advance every live actor by `dt`, then resolve player contacts.
    ///
    /// Updates run over a snapshot of actor ids taken at the start of the
    /// pass; an actor removed mid-pass (a coin the player already picked up)
    /// is skipped and never written back.
    pub fn act(&mut self, dt: f32) {
        if self.status.is_some() {
            self.finish_delay -= dt;
        }

        let ids: Vec<ActorId> = self.actors.iter().map(Actor::id).collect();
        for id in ids {
            let Some(mut actor) = self.actor(id).copied() else {
                continue;
            };
            actor.act(dt, self);
            if let Some(slot) = self.actors.iter_mut().find(|a| a.id() == id) {
                *slot = actor;
            }
        }

        // Actors that moved into the player after it acted
        if let Some(player) = self.player().copied() {
            self.resolve_contacts(&player);
        }
    }

    /// One `player_touched` per actor overlapping `player`; nothing once
    /// the level has an outcome
    pub fn resolve_contacts(&mut self, player: &Actor) {
        if self.status.is_some() {
            return;
        }

        let touching: Vec<(ActorId, Contact)> = self
            .actors
            .iter()
            .filter(|a| a.intersects(player))
            .map(|a| (a.id(), a.contact()))
            .collect();

        for (id, kind) in touching {
            log::trace!("Player touching {:?} (actor {})", kind, id.get());
            self.player_touched(kind, Some(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::FireballPattern;

    fn empty_grid(width: usize, height: usize) -> Vec<Vec<Tile>> {
        vec![vec![Tile::Empty; width]; height]
    }

    #[test]
    fn test_dimensions_from_jagged_grid() {
        let grid = vec![vec![Tile::Wall], vec![Tile::Empty, Tile::Empty, Tile::Lava]];
        let level = Level::new(grid, Vec::new());
        assert_eq!(level.height, 2);
        assert_eq!(level.width, 3);
        assert_eq!(level.tile(2, 0), Tile::Empty);
        assert_eq!(level.tile(2, 1), Tile::Lava);
        assert_eq!(level.status(), None);
        assert_eq!(level.finish_delay(), 1.0);
        assert!(!level.is_finished());
    }

    #[test]
    fn test_empty_level() {
        let level = Level::new(Vec::new(), Vec::new());
        assert_eq!(level.height, 0);
        assert_eq!(level.width, 0);
        assert!(level.player().is_none());
    }

    #[test]
    fn test_player_is_first_player_actor() {
        let coin = Actor::coin(Vector::ZERO, 0.0);
        let first = Actor::player(Vector::new(1.0, 1.0));
        let second = Actor::player(Vector::new(2.0, 1.0));
        let level = Level::new(empty_grid(3, 3), vec![coin, first, second]);
        assert_eq!(level.player().map(Actor::id), Some(first.id()));
    }

    #[test]
    fn test_actor_at_finds_overlap_and_skips_itself() {
        let player = Actor::player(Vector::new(1.0, 1.0));
        let coin = Actor::coin(Vector::new(1.0, 1.0), 0.0);
        let far = Actor::at(Vector::new(5.0, 5.0));
        let level = Level::new(empty_grid(8, 8), vec![player, coin, far]);

        assert_eq!(level.actor_at(&player).map(Actor::id), Some(coin.id()));
        assert!(level.actor_at(&far).is_none());
    }

    #[test]
    fn test_obstacle_below_bottom_is_lava() {
        let level = Level::new(vec![vec![Tile::Wall; 3]; 3], Vec::new());
        assert_eq!(level.obstacle_at(Vector::new(0.0, 5.0), Vector::ONE), Some(Tile::Lava));
    }

    #[test]
    fn test_obstacle_outside_sides_is_wall() {
        let level = Level::new(empty_grid(3, 3), Vec::new());
        assert_eq!(level.obstacle_at(Vector::new(-0.5, 1.0), Vector::ONE), Some(Tile::Wall));
        assert_eq!(level.obstacle_at(Vector::new(2.5, 1.0), Vector::ONE), Some(Tile::Wall));
        assert_eq!(level.obstacle_at(Vector::new(1.0, -0.1), Vector::ONE), Some(Tile::Wall));
        assert_eq!(level.obstacle_at(Vector::new(1.0, 1.0), Vector::ONE), None);
    }

    #[test]
    fn test_obstacle_samples_rounded_cells() {
        let mut grid = empty_grid(3, 3);
        grid[1][2] = Tile::Lava;
        grid[2][0] = Tile::Wall;
        let level = Level::new(grid, Vec::new());

        assert_eq!(level.obstacle_at(Vector::new(2.0, 1.0), Vector::ONE), Some(Tile::Lava));
        // Mostly in column 1; rounds away from the lava cell
        assert_eq!(level.obstacle_at(Vector::new(1.4, 1.0), Vector::new(0.8, 1.0)), None);
        // Mostly in column 2; rounds onto the lava cell
        assert_eq!(level.obstacle_at(Vector::new(1.8, 1.0), Vector::new(0.8, 1.0)), Some(Tile::Lava));
        assert_eq!(level.obstacle_at(Vector::new(0.0, 1.6), Vector::ONE), Some(Tile::Wall));
    }

    #[test]
    fn test_obstacle_first_in_row_major_order() {
        let mut grid = empty_grid(2, 2);
        grid[0][1] = Tile::Lava;
        grid[1][0] = Tile::Wall;
        let level = Level::new(grid, Vec::new());
        assert_eq!(
            level.obstacle_at(Vector::ZERO, Vector::new(2.0, 2.0)),
            Some(Tile::Lava)
        );
    }

    #[test]
    fn test_obstacle_short_row_is_empty() {
        let grid = vec![vec![Tile::Empty, Tile::Empty, Tile::Empty], vec![Tile::Empty]];
        let level = Level::new(grid, Vec::new());
        assert_eq!(level.obstacle_at(Vector::new(2.0, 1.0), Vector::ONE), None);
    }

    #[test]
    fn test_remove_actor_is_idempotent() {
        let a = Actor::at(Vector::ZERO);
        let b = Actor::at(Vector::new(2.0, 0.0));
        let mut level = Level::new(empty_grid(4, 1), vec![a, b]);

        level.remove_actor(a.id());
        assert_eq!(level.actors().len(), 1);
        level.remove_actor(a.id());
        assert_eq!(level.actors().len(), 1);
        assert_eq!(level.actors()[0].id(), b.id());
    }

    #[test]
    fn test_no_more_actors() {
        let coin = Actor::coin(Vector::ZERO, 0.0);
        let mut level = Level::new(empty_grid(2, 2), vec![coin]);
        assert!(!level.no_more_actors(Contact::Coin));
        assert!(level.no_more_actors(Contact::Fireball));
        level.remove_actor(coin.id());
        assert!(level.no_more_actors(Contact::Coin));
    }

    #[test]
    fn test_lava_loses_once() {
        let coin = Actor::coin(Vector::ZERO, 0.0);
        let mut level = Level::new(empty_grid(2, 2), vec![coin]);

        level.player_touched(Contact::Lava, None);
        assert_eq!(level.status(), Some(Status::Lost));

        // Later events never overwrite the outcome
        level.player_touched(Contact::Coin, Some(coin.id()));
        assert_eq!(level.status(), Some(Status::Lost));
        assert_eq!(level.actors().len(), 1);
    }

    #[test]
    fn test_fireball_loses() {
        let mut level = Level::new(empty_grid(2, 2), Vec::new());
        level.player_touched(Contact::Fireball, None);
        assert_eq!(level.status(), Some(Status::Lost));
    }

    #[test]
    fn test_other_contacts_are_ignored() {
        let mut level = Level::new(empty_grid(2, 2), Vec::new());
        level.player_touched(Contact::Wall, None);
        level.player_touched(Contact::Actor, None);
        assert_eq!(level.status(), None);
    }

    #[test]
    fn test_collecting_coins() {
        let first = Actor::coin(Vector::ZERO, 0.0);
        let second = Actor::coin(Vector::new(1.0, 0.0), 0.0);
        let mut level = Level::new(empty_grid(2, 2), vec![first, second]);

        level.player_touched(Contact::Coin, Some(first.id()));
        assert!(level.actor(first.id()).is_none());
        assert_eq!(level.status(), None);

        level.player_touched(Contact::Coin, Some(second.id()));
        assert!(level.actors().is_empty());
        assert_eq!(level.status(), Some(Status::Won));
    }

    #[test]
    fn test_finish_delay_runs_out() {
        let mut level = Level::new(empty_grid(2, 2), Vec::new());
        level.player_touched(Contact::Lava, None);
        assert!(!level.is_finished());

        level.act(0.5);
        assert!(!level.is_finished());
        level.act(0.5);
        // Exactly zero is not finished yet
        assert!(!level.is_finished());
        level.act(0.1);
        assert!(level.is_finished());
    }

    #[test]
    fn test_finish_delay_untouched_while_running() {
        let mut level = Level::new(empty_grid(2, 2), Vec::new());
        level.act(5.0);
        assert_eq!(level.finish_delay(), 1.0);
        assert!(!level.is_finished());
    }

    #[test]
    fn test_act_collects_overlapping_coin() {
        let player = Actor::player(Vector::new(1.0, 1.0));
        let coin = Actor::coin(Vector::new(1.0, 1.0), 0.0);
        let other = Actor::coin(Vector::new(4.0, 1.0), 0.0);
        let mut level = Level::new(empty_grid(6, 3), vec![player, coin, other]);

        level.act(0.01);
        assert!(level.actor(coin.id()).is_none());
        assert!(level.actor(other.id()).is_some());
        assert_eq!(level.status(), None);
    }

    #[test]
    fn test_coin_collected_mid_pass_is_skipped() {
        // The player acts first and picks up the coin before its turn
        let player = Actor::player(Vector::new(1.0, 1.0));
        let coin = Actor::coin(Vector::new(1.0, 1.0), 0.0);
        let other = Actor::coin(Vector::new(4.0, 1.0), 0.0);
        let mut level = Level::new(empty_grid(6, 3), vec![player, coin, other]);

        level.act(0.01);
        assert!(level.actor(coin.id()).is_none());
        assert_eq!(level.actors().len(), 2);
        assert!(level.actors().iter().all(|a| a.id() != coin.id()));

        // The remaining coin still got its update
        let moved = level.actor(other.id()).map(|a| a.pos);
        assert_ne!(moved, Some(other.pos));
    }

    #[test]
    fn test_coin_before_player_is_collected_after_its_update() {
        let coin = Actor::coin(Vector::new(1.0, 1.0), 0.0);
        let player = Actor::player(Vector::new(1.0, 1.0));
        let mut level = Level::new(empty_grid(6, 3), vec![coin, player]);

        level.act(0.01);
        assert!(level.actor(coin.id()).is_none());
        assert_eq!(level.status(), Some(Status::Won));
    }

    #[test]
    fn test_resolve_contacts_ignored_after_outcome() {
        let player = Actor::player(Vector::new(1.0, 1.0));
        let coin = Actor::coin(Vector::new(1.0, 1.0), 0.0);
        let mut level = Level::new(empty_grid(6, 3), vec![player, coin]);

        level.player_touched(Contact::Lava, None);
        level.resolve_contacts(&player);
        assert!(level.actor(coin.id()).is_some());
        assert_eq!(level.status(), Some(Status::Lost));
    }

    #[test]
    fn test_act_fireball_hits_player() {
        let player = Actor::player(Vector::new(3.0, 1.0));
        let fireball = Actor::fireball(Vector::new(1.0, 1.0), FireballPattern::Horizontal);
        let mut level = Level::new(empty_grid(6, 3), vec![player, fireball]);

        level.act(0.5);
        assert_eq!(level.status(), None);
        level.act(0.5);
        assert_eq!(level.status(), Some(Status::Lost));
    }

    #[test]
    fn test_act_updates_every_actor_once() {
        let a = Actor::fireball(Vector::new(0.0, 0.0), FireballPattern::Horizontal);
        let b = Actor::fireball(Vector::new(0.0, 2.0), FireballPattern::Horizontal);
        let mut level = Level::new(empty_grid(10, 4), vec![a, b]);

        level.act(1.0);
        assert_eq!(level.actor(a.id()).map(|a| a.pos), Some(Vector::new(2.0, 0.0)));
        assert_eq!(level.actor(b.id()).map(|b| b.pos), Some(Vector::new(2.0, 2.0)));
    }

    #[test]
    fn test_level_without_player_is_inert() {
        let coin = Actor::coin(Vector::ZERO, 0.0);
        let fireball = Actor::fireball(Vector::ZERO, FireballPattern::Horizontal);
        let mut level = Level::new(empty_grid(4, 2), vec![coin, fireball]);
        for _ in 0..10 {
            level.act(0.1);
        }
        assert_eq!(level.status(), None);
        assert_eq!(level.actors().len(), 2);
    }
}
