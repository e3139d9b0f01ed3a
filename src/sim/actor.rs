//! Actors: the moving entities of a level
//!
//! Every actor is one `Actor` value with a tagged `ActorKind` carrying the
//! per-variant state. `Actor::act` is the single dispatch point for the
//! per-tick update rules.

use std::f32::consts::TAU;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::level::{Contact, Level};
use super::vector::Vector;
use crate::consts::*;

/// 64 bits: a process cannot create enough actors to wrap around
static NEXT_ACTOR_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of an actor. Copies of an actor share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(u64);

impl ActorId {
    fn next() -> Self {
        Self(NEXT_ACTOR_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Fireball movement patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireballPattern {
    /// Bounces left and right
    Horizontal,
    /// Bounces up and down
    Vertical,
    /// Falls, then restarts from its spawn cell
    Rain,
}

impl FireballPattern {
    pub fn velocity(self) -> Vector {
        match self {
            FireballPattern::Horizontal => HORIZONTAL_FIREBALL_SPEED,
            FireballPattern::Vertical => VERTICAL_FIREBALL_SPEED,
            FireballPattern::Rain => RAIN_FIREBALL_SPEED,
        }
    }
}

/// Coin wobble state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub phase: f32,
    pub speed: f32,
    pub amplitude: f32,
    /// Anchor the wobble is applied to; drifts by the offset every tick
    pub start_pos: Vector,
}

impl Spring {
    pub fn new(phase: f32, start_pos: Vector) -> Self {
        Self {
            phase,
            speed: COIN_SPRING_SPEED,
            amplitude: COIN_SPRING_AMPLITUDE,
            start_pos,
        }
    }

    /// Current vertical wobble
    pub fn offset(&self) -> Vector {
        Vector::new(0.0, self.phase.sin() * self.amplitude)
    }
}

/// Behavioral variant of an actor, with its per-variant state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActorKind {
    /// Plain actor: no behavior. Used for overlap queries.
    Actor,
    Player {
        /// Last downward move was blocked by a tile
        on_ground: bool,
    },
    Coin(Spring),
    Fireball {
        pattern: FireballPattern,
        /// Cell-aligned position the fireball was created at
        spawn: Vector,
    },
}

/// Dictionary value: which actor a plan symbol creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorSpawn {
    Player,
    Coin,
    HorizontalFireball,
    VerticalFireball,
    RainFireball,
}

impl ActorSpawn {
    /// Create the actor for a grid cell. `rng` only feeds the coin phase.
    pub fn spawn<R: Rng + ?Sized>(self, cell: Vector, rng: &mut R) -> Actor {
        match self {
            ActorSpawn::Player => Actor::player(cell),
            ActorSpawn::Coin => Actor::coin(cell, rng.random_range(0.0..TAU)),
            ActorSpawn::HorizontalFireball => Actor::fireball(cell, FireballPattern::Horizontal),
            ActorSpawn::VerticalFireball => Actor::fireball(cell, FireballPattern::Vertical),
            ActorSpawn::RainFireball => Actor::fireball(cell, FireballPattern::Rain),
        }
    }
}

/// A positioned, sized entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Actor {
    id: ActorId,
    pub pos: Vector,
    pub size: Vector,
    pub speed: Vector,
    pub kind: ActorKind,
}

impl Actor {
    /// Plain actor with no behavior
    pub fn new(pos: Vector, size: Vector, speed: Vector) -> Self {
        Self {
            id: ActorId::next(),
            pos,
            size,
            speed,
            kind: ActorKind::Actor,
        }
    }

    /// Plain 1x1 stationary actor
    pub fn at(pos: Vector) -> Self {
        Self::new(pos, Vector::ONE, Vector::ZERO)
    }

    /// Player standing in `cell`, feet on the cell's bottom edge
    pub fn player(cell: Vector) -> Self {
        Self {
            kind: ActorKind::Player { on_ground: false },
            ..Self::new(cell.plus(PLAYER_SPAWN_OFFSET), PLAYER_SIZE, Vector::ZERO)
        }
    }

    pub fn coin(cell: Vector, phase: f32) -> Self {
        let pos = cell.plus(COIN_OFFSET);
        Self {
            kind: ActorKind::Coin(Spring::new(phase, pos)),
            ..Self::new(pos, COIN_SIZE, Vector::ZERO)
        }
    }

    pub fn fireball(cell: Vector, pattern: FireballPattern) -> Self {
        Self {
            kind: ActorKind::Fireball {
                pattern,
                spawn: cell,
            },
            ..Self::new(cell, Vector::ONE, pattern.velocity())
        }
    }

    #[inline]
    pub fn id(&self) -> ActorId {
        self.id
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x()
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y()
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x() + self.size.x()
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y() + self.size.y()
    }

    /// What the player touches when it overlaps this actor
    pub fn contact(&self) -> Contact {
        match self.kind {
            ActorKind::Actor => Contact::Actor,
            ActorKind::Player { .. } => Contact::Player,
            ActorKind::Coin(_) => Contact::Coin,
            ActorKind::Fireball { .. } => Contact::Fireball,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, ActorKind::Player { .. })
    }

    /// Strict AABB overlap. Never true for the same actor; touching edges
    /// do not count.
    pub fn intersects(&self, other: &Actor) -> bool {
        if self.id == other.id {
            return false;
        }

        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Where a moving actor would be after `dt` seconds
    pub fn next_position(&self, dt: f32) -> Vector {
        self.pos.plus(self.speed.times(dt))
    }

    /// Advance this actor by `dt`. Cross-actor effects go through `level`.
    pub fn act(&mut self, dt: f32, level: &mut Level) {
        match self.kind {
            ActorKind::Actor => {}
            ActorKind::Player { .. } => self.act_player(dt, level),
            ActorKind::Coin(_) => self.act_coin(dt),
            ActorKind::Fireball { .. } => self.act_fireball(dt, level),
        }
    }

    /// Fireball response to a blocked move: bounce, or restart for rain
    pub fn handle_obstacle(&mut self) {
        if let ActorKind::Fireball { pattern, spawn } = self.kind {
            match pattern {
                FireballPattern::Rain => self.pos = spawn,
                FireballPattern::Horizontal | FireballPattern::Vertical => {
                    self.speed = self.speed.times(-1.0);
                }
            }
        }
    }

    fn act_fireball(&mut self, dt: f32, level: &Level) {
        let next = self.next_position(dt);
        if level.obstacle_at(next, self.size).is_none() {
            self.pos = next;
        } else {
            self.handle_obstacle();
        }
    }

    fn act_coin(&mut self, dt: f32) {
        if let ActorKind::Coin(ref mut spring) = self.kind {
            spring.phase += spring.speed * dt;
            self.pos = spring.start_pos.plus(spring.offset());
            spring.start_pos = self.pos;
        }
    }

    /// Axis-separated move using the externally written `speed`, then touch
    /// whatever the player now overlaps
    fn act_player(&mut self, dt: f32, level: &mut Level) {
        let next = self.pos.plus(Vector::new(self.speed.x() * dt, 0.0));
        match level.obstacle_at(next, self.size) {
            None => self.pos = next,
            Some(tile) => level.player_touched(Contact::from_obstacle(tile), None),
        }

        let falling = self.speed.y() > 0.0;
        let next = self.pos.plus(Vector::new(0.0, self.speed.y() * dt));
        let blocked = match level.obstacle_at(next, self.size) {
            None => {
                self.pos = next;
                false
            }
            Some(tile) => {
                level.player_touched(Contact::from_obstacle(tile), None);
                self.speed = Vector::new(self.speed.x(), 0.0);
                true
            }
        };

        if let ActorKind::Player { ref mut on_ground } = self.kind {
            *on_ground = blocked && falling;
        }

        level.resolve_contacts(self);
    }
}
