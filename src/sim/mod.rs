//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (plan order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod level;
pub mod parser;
pub mod tick;
pub mod vector;

pub use actor::{Actor, ActorId, ActorKind, ActorSpawn, FireballPattern, Spring};
pub use level::{Contact, Level, Status, Tile};
pub use parser::{Dictionary, LevelParser};
pub use tick::{Autopilot, TickInput, tick};
pub use vector::Vector;
