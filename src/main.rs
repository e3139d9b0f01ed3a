//! Lava Runner entry point
//!
//! Plays the campaign headless with a scripted player and prints the last
//! frame. Usage: `lava-runner [levels.json] [settings.json]`

use std::process::ExitCode;

use lava_runner::renderer::render_ascii;
use lava_runner::sim::Autopilot;
use lava_runner::{Campaign, CampaignState, Result, Settings};

const BUNDLED_LEVELS: &str = include_str!("../levels/levels.json");

/// Simulated display refresh
const FRAME_DT: f32 = 1.0 / 60.0;
/// Two minutes of play before giving up
const MAX_FRAMES: u32 = 60 * 120;

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let plans = match args.first() {
        Some(path) => Campaign::load_plans(path)?,
        None => Campaign::parse_plans(BUNDLED_LEVELS)?,
    };
    let settings = match args.get(1) {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let mut campaign = Campaign::new(plans, &settings)?;
    log::info!("Lava Runner starting ({} levels)", campaign.len());

    let mut autopilot = Autopilot::default();
    let mut attempts = 1;
    let mut completed = false;
    for frame in 0..MAX_FRAMES {
        let input = autopilot.input(campaign.level());
        match campaign.advance(FRAME_DT, &input) {
            CampaignState::Playing => {}
            CampaignState::LevelWon(index) => {
                println!("Level {} cleared after {} attempt(s)", index + 1, attempts);
                attempts = 1;
            }
            CampaignState::LevelLost(index) => {
                log::info!("Level {} attempt {} failed", index + 1, attempts);
                attempts += 1;
            }
            CampaignState::Completed => {
                println!(
                    "All {} levels cleared in {:.1}s",
                    campaign.len(),
                    frame as f32 * FRAME_DT
                );
                completed = true;
                break;
            }
        }
    }

    if !completed {
        println!(
            "Gave up on level {} after {} attempt(s)",
            campaign.index() + 1,
            attempts
        );
    }
    println!("{}", render_ascii(campaign.level()));
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
