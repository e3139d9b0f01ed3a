//! Campaign driver
//!
//! Turns variable frame times into fixed simulation steps and moves through
//! a list of plans: a won level advances, a lost level restarts.

use std::path::Path;

use crate::consts::MAX_FRAME_DT;
use crate::error::{Error, Result};
use crate::settings::Settings;
use crate::sim::{Level, LevelParser, Status, TickInput, tick};

/// Outcome of one `Campaign::advance` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignState {
    Playing,
    /// Level `n` finished with a win; the next plan is loaded
    LevelWon(usize),
    /// Level `n` finished with a loss; it has been rebuilt
    LevelLost(usize),
    /// The last plan was won
    Completed,
}

pub struct Campaign {
    plans: Vec<Vec<String>>,
    parser: LevelParser,
    level: Level,
    index: usize,
    accumulator: f32,
    sim_dt: f32,
    max_substeps: u32,
    completed: bool,
}

impl Campaign {
    /// Validate every plan up front; the campaign never fails afterwards
    pub fn new(plans: Vec<Vec<String>>, settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let parser = settings.parser()?;
        if plans.is_empty() {
            return Err(Error::NoPlans);
        }
        for (index, plan) in plans.iter().enumerate() {
            parser.parse_checked(plan).map_err(|source| Error::Plan {
                index,
                source: Box::new(source),
            })?;
        }

        let level = parser.parse(&plans[0]);
        log::info!("Campaign of {} levels (seed {})", plans.len(), settings.seed);

        Ok(Self {
            plans,
            parser,
            level,
            index: 0,
            accumulator: 0.0,
            sim_dt: settings.sim_dt,
            max_substeps: settings.max_substeps,
            completed: false,
        })
    }

    /// Plans from a JSON array of arrays of rows
    pub fn parse_plans(json: &str) -> Result<Vec<Vec<String>>> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_plans(path: impl AsRef<Path>) -> Result<Vec<Vec<String>>> {
        let path = path.as_ref();
        let plans = Self::parse_plans(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded {} plans from {}", plans.len(), path.display());
        Ok(plans)
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Index of the current plan
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Run the fixed steps owed for `frame_dt` seconds, then handle a
    /// finished level
    pub fn advance(&mut self, frame_dt: f32, input: &TickInput) -> CampaignState {
        if self.completed {
            return CampaignState::Completed;
        }

        // A NaN frame would poison the accumulator for good
        if frame_dt.is_nan() {
            log::warn!("Ignoring NaN frame time");
        } else {
            self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);
        }

        let mut substeps = 0;
        while self.accumulator >= self.sim_dt && substeps < self.max_substeps {
            tick(&mut self.level, input, self.sim_dt);
            self.accumulator -= self.sim_dt;
            substeps += 1;
        }

        if !self.level.is_finished() {
            return CampaignState::Playing;
        }

        let finished = self.index;
        self.accumulator = 0.0;
        match self.level.status() {
            Some(Status::Won) if finished + 1 == self.plans.len() => {
                log::info!("Campaign completed");
                self.completed = true;
                CampaignState::Completed
            }
            Some(Status::Won) => {
                self.index += 1;
                self.level = self.parser.parse(&self.plans[self.index]);
                log::info!("Level {} won, starting level {}", finished, self.index);
                CampaignState::LevelWon(finished)
            }
            _ => {
                self.level = self.parser.parse(&self.plans[self.index]);
                log::info!("Level {} lost, restarting", finished);
                CampaignState::LevelLost(finished)
            }
        }
    }
}
