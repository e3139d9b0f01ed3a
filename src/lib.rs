//! Lava Runner - a tile-grid platformer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, actors, level, plan parser)
//! - `campaign`: Fixed-step driver that sequences levels
//! - `renderer`: Text rendering of a level
//! - `settings`: Data-driven configuration

pub mod campaign;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use campaign::{Campaign, CampaignState};
pub use error::{Error, Result};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use crate::sim::Vector;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will account for
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Seconds a level keeps running after it is won or lost
    pub const FINISH_DELAY: f32 = 1.0;

    /// Player box; spawned half a tile up so its feet sit on the cell bottom
    pub const PLAYER_SIZE: Vector = Vector::new(0.8, 1.5);
    pub const PLAYER_SPAWN_OFFSET: Vector = Vector::new(0.0, -0.5);
    pub const PLAYER_RUN_SPEED: f32 = 7.0;
    pub const PLAYER_JUMP_SPEED: f32 = 17.0;
    /// Downward acceleration applied by the input layer (tiles/s²)
    pub const GRAVITY: f32 = 30.0;

    /// Coin box and its fixed offset into the spawn cell
    pub const COIN_SIZE: Vector = Vector::new(0.6, 0.6);
    pub const COIN_OFFSET: Vector = Vector::new(0.2, 0.1);
    pub const COIN_SPRING_SPEED: f32 = 8.0;
    pub const COIN_SPRING_AMPLITUDE: f32 = 0.07;

    /// Fireball velocities (tiles/s)
    pub const HORIZONTAL_FIREBALL_SPEED: Vector = Vector::new(2.0, 0.0);
    pub const VERTICAL_FIREBALL_SPEED: Vector = Vector::new(0.0, 2.0);
    pub const RAIN_FIREBALL_SPEED: Vector = Vector::new(0.0, 3.0);
}
