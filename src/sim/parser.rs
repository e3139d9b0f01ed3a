//! Text plan parser
//!
//! A plan is a list of rows. `x` is wall, `!` is lava, and any symbol in
//! the actor dictionary spawns an actor at its cell. Everything else is
//! empty space.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actor::{Actor, ActorSpawn};
use super::level::{Level, Tile};
use super::vector::Vector;
use crate::error::{Error, Result};

/// Symbol -> actor mapping consulted by the parser
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary(BTreeMap<char, ActorSpawn>);

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// `@` player, `o` coin, `=` `|` `v` fireballs
    pub fn reference() -> Self {
        [
            ('@', ActorSpawn::Player),
            ('o', ActorSpawn::Coin),
            ('=', ActorSpawn::HorizontalFireball),
            ('|', ActorSpawn::VerticalFireball),
            ('v', ActorSpawn::RainFireball),
        ]
        .into_iter()
        .collect()
    }

    pub fn insert(&mut self, symbol: char, spawn: ActorSpawn) {
        self.0.insert(symbol, spawn);
    }

    pub fn get(&self, symbol: char) -> Option<ActorSpawn> {
        self.0.get(&symbol).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, ActorSpawn)> + '_ {
        self.0.iter().map(|(&c, &s)| (c, s))
    }
}

impl FromIterator<(char, ActorSpawn)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (char, ActorSpawn)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Builds levels from plans
#[derive(Debug, Clone)]
pub struct LevelParser {
    dictionary: Dictionary,
    /// Seed for coin spring phases; each parse restarts the stream
    seed: u64,
}

impl LevelParser {
    pub fn new(dictionary: Dictionary) -> Self {
        Self {
            dictionary,
            seed: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn obstacle_for(symbol: char) -> Option<Tile> {
        match symbol {
            'x' => Some(Tile::Wall),
            '!' => Some(Tile::Lava),
            _ => None,
        }
    }

    pub fn actor_kind_for(&self, symbol: char) -> Option<ActorSpawn> {
        self.dictionary.get(symbol)
    }

    /// Map every symbol to its tile. Rows keep their own length.
    pub fn create_grid<S: AsRef<str>>(&self, plan: &[S]) -> Vec<Vec<Tile>> {
        plan.iter()
            .map(|row| {
                row.as_ref()
                    .chars()
                    .map(|c| Self::obstacle_for(c).unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    /// Spawn actors for dictionary symbols, in row-major order
    pub fn create_actors<S: AsRef<str>>(&self, plan: &[S]) -> Vec<Actor> {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        let mut actors = Vec::new();

        for (y, row) in plan.iter().enumerate() {
            for (x, symbol) in row.as_ref().chars().enumerate() {
                if let Some(spawn) = self.actor_kind_for(symbol) {
                    let cell = Vector::new(x as f32, y as f32);
                    actors.push(spawn.spawn(cell, &mut rng));
                }
            }
        }

        actors
    }

    /// Build a level. Unknown symbols are empty space; a missing player
    /// gives an inert level.
    pub fn parse<S: AsRef<str>>(&self, plan: &[S]) -> Level {
        Level::new(self.create_grid(plan), self.create_actors(plan))
    }

    /// `parse`, rejecting plans with no rows or no player
    pub fn parse_checked<S: AsRef<str>>(&self, plan: &[S]) -> Result<Level> {
        if plan.is_empty() {
            return Err(Error::EmptyPlan);
        }
        let level = self.parse(plan);
        if level.player().is_none() {
            return Err(Error::MissingPlayer);
        }
        Ok(level)
    }

    /// `parse_checked`, also rejecting symbols that are neither terrain
    /// nor in the dictionary
    pub fn parse_strict<S: AsRef<str>>(&self, plan: &[S]) -> Result<Level> {
        for (row, line) in plan.iter().enumerate() {
            for (column, symbol) in line.as_ref().chars().enumerate() {
                let known = symbol == ' '
                    || Self::obstacle_for(symbol).is_some()
                    || self.actor_kind_for(symbol).is_some();
                if !known {
                    return Err(Error::UnknownSymbol {
                        symbol,
                        column,
                        row,
                    });
                }
            }
        }
        self.parse_checked(plan)
    }
}

impl Default for LevelParser {
    fn default() -> Self {
        Self::new(Dictionary::reference())
    }
}
