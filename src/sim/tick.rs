//! Fixed timestep simulation tick
//!
//! Steers the player from input, then advances the level.

use super::actor::{Actor, ActorKind};
use super::level::{Level, Tile};
use super::vector::Vector;
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump if standing on something
    pub jump: bool,
}

impl TickInput {
    /// Write the player's velocity for the coming tick: run speed from the
    /// arrows, gravity on the vertical axis, jump impulse when grounded.
    pub fn steer(&self, level: &mut Level, dt: f32) {
        let Some(player) = level.player_mut() else {
            return;
        };

        let mut run = 0.0;
        if self.left {
            run -= PLAYER_RUN_SPEED;
        }
        if self.right {
            run += PLAYER_RUN_SPEED;
        }

        let on_ground = matches!(player.kind, ActorKind::Player { on_ground: true });
        let fall = if self.jump && on_ground {
            -PLAYER_JUMP_SPEED
        } else {
            player.speed.y() + GRAVITY * dt
        };

        player.speed = Vector::new(run, fall);
    }
}

/// Scripted player for headless runs.
///
/// Hops back and forth between walls, jumping whenever it lands. Tiles are
/// sampled by rounded bounds, so a player whose x fraction sits in about
/// `0.5..0.7` samples no column at all and drops through floors; the
/// autopilot therefore stops drifting while it falls until it is over a
/// sampled column with solid wall below. Hazards in its path are not
/// avoided, so it only clears levels that keep them walled off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Autopilot {
    facing_right: bool,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { facing_right: true }
    }
}

impl Autopilot {
    /// How far ahead of the player to look for a wall
    const LOOKAHEAD: f32 = 0.5;
    /// x fractions too close to the band that samples no column
    const UNSAFE_FRACTION: std::ops::RangeInclusive<f32> = 0.45..=0.75;

    pub fn is_facing_right(&self) -> bool {
        self.facing_right
    }

    /// Input for the coming tick
    pub fn input(&mut self, level: &Level) -> TickInput {
        let Some(player) = level.player() else {
            return TickInput::default();
        };

        let step = if self.facing_right {
            Self::LOOKAHEAD
        } else {
            -Self::LOOKAHEAD
        };
        if level
            .obstacle_at(player.pos.plus(Vector::new(step, 0.0)), player.size)
            .is_some()
        {
            self.facing_right = !self.facing_right;
            log::trace!("Autopilot turning (facing right: {})", self.facing_right);
        }

        let on_ground = matches!(player.kind, ActorKind::Player { on_ground: true });
        let drift = on_ground || player.speed.y() <= 0.0 || !Self::safe_landing(level, player);

        TickInput {
            left: drift && !self.facing_right,
            right: drift && self.facing_right,
            jump: true,
        }
    }

    /// Every column the player samples has a wall as the first tile below it
    fn safe_landing(level: &Level, player: &Actor) -> bool {
        if Self::UNSAFE_FRACTION.contains(&player.left().fract()) {
            return false;
        }

        // Bounds are non-negative inside a level, so the casts cannot wrap
        let first_row = player.bottom().round() as usize;
        let mut cols = player.left().round() as usize..player.right().round() as usize;
        cols.all(|x| {
            (first_row..level.height)
                .map(|y| level.tile(x, y))
                .find(|&tile| tile != Tile::Empty)
                == Some(Tile::Wall)
        })
    }
}

/// Advance the level by one timestep
pub fn tick(level: &mut Level, input: &TickInput, dt: f32) {
    input.steer(level, dt);
    level.act(dt);
}
