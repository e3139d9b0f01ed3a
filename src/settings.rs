//! Game settings
//!
//! Persisted as JSON. Every field has a default, so a partial file is fine.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::error::{Error, Result};
use crate::sim::{ActorSpawn, Dictionary, LevelParser};

/// Simulation and parser configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for coin phases; same seed, plan and inputs give the same run
    pub seed: u64,

    // === Timing ===
    /// Fixed timestep handed to the simulation (seconds)
    pub sim_dt: f32,
    /// Cap on fixed steps per frame
    pub max_substeps: u32,

    // === Plans ===
    /// Actor dictionary: one-character symbol -> actor
    pub symbols: BTreeMap<String, ActorSpawn>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,

            sim_dt: SIM_DT,
            max_substeps: MAX_SUBSTEPS,

            symbols: Dictionary::reference()
                .iter()
                .map(|(symbol, spawn)| (symbol.to_string(), spawn))
                .collect(),
        }
    }
}

impl Settings {
    /// Reject timing the fixed-step loop cannot run with
    pub fn validate(&self) -> Result<()> {
        if !(self.sim_dt.is_finite() && self.sim_dt > 0.0) {
            return Err(Error::InvalidTimestep(self.sim_dt));
        }
        if self.max_substeps == 0 {
            return Err(Error::NoSubsteps);
        }
        self.dictionary().map(|_| ())
    }

    /// Validated actor dictionary
    pub fn dictionary(&self) -> Result<Dictionary> {
        self.symbols
            .iter()
            .map(|(key, &spawn)| {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(symbol), None) => Ok((symbol, spawn)),
                    _ => Err(Error::InvalidSymbol { key: key.clone() }),
                }
            })
            .collect()
    }

    /// Parser configured with this dictionary and seed
    pub fn parser(&self) -> Result<LevelParser> {
        Ok(LevelParser::new(self.dictionary()?).with_seed(self.seed))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Self::from_json(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
