//! Headless frame driver: plays a key script through the engine.
//!
//! Each script step resolves its held keys through the key map once and
//! feeds the same `FrameInput` for every frame of the step. Commands on a
//! step are applied before its first frame. Events and notices from every
//! tick are logged as they arrive.

use std::path::PathBuf;

use corsair_core::commands::{FrameInput, KeyBindings};
use corsair_core::enums::{AlertLevel, GameMode};
use corsair_core::outcomes::CommandOutcome;
use corsair_core::state::GameStateSnapshot;
use corsair_sim::engine::SimulationEngine;
use corsair_sim::persistence::{self, GameSave, PersistError};
use corsair_sim::report::TickReport;

use crate::config::AppConfig;

/// What a finished session looked like.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub frames: u64,
    pub steps: u64,
    pub events: usize,
    pub final_snapshot: GameStateSnapshot,
    /// Path of the end-of-session save, if one was written.
    pub saved_to: Option<PathBuf>,
}

/// Run the configured script to completion.
pub fn run_session(config: &AppConfig) -> Result<SessionSummary, PersistError> {
    let mut engine = SimulationEngine::new(config.sim_config());
    engine.set_autosave_dir(config.save_dir.clone());
    let keys = KeyBindings::default();

    let mut frames = 0u64;
    let mut steps = 0u64;
    let mut events = 0usize;

    for step in &config.script {
        for command in &step.commands {
            let outcome = engine.apply(command.clone());
            if outcome == CommandOutcome::Ignored {
                log::debug!("{command:?} ignored in {:?}", engine.mode());
            }
        }

        let input = keys.resolve(step.keys.iter().map(String::as_str));
        for _ in 0..step.frames {
            let report = engine.tick(&input, config.frame_secs);
            frames += 1;
            steps += u64::from(report.steps);
            events += report.events.len();
            log_report(&report);

            if report.snapshot.mode == GameMode::GameOver {
                log::info!("Ship lost after {frames} frames");
                return finish(engine, config, frames, steps, events);
            }
        }
    }

    // Let the last held keys go so edge-triggered actions settle.
    let report = engine.tick(&FrameInput::default(), config.frame_secs);
    events += report.events.len();
    log_report(&report);

    finish(engine, config, frames, steps, events)
}

fn finish(
    engine: SimulationEngine,
    config: &AppConfig,
    frames: u64,
    steps: u64,
    events: usize,
) -> Result<SessionSummary, PersistError> {
    let final_snapshot = engine.snapshot();
    let saved_to = match &config.save_dir {
        Some(dir) => {
            let path = persistence::save_to_file(
                dir,
                &GameSave::new(&config.save_slot, final_snapshot.clone()),
            )?;
            log::info!("Saved session to {}", path.display());
            Some(path)
        }
        None => None,
    };

    Ok(SessionSummary {
        frames,
        steps,
        events,
        final_snapshot,
        saved_to,
    })
}

fn log_report(report: &TickReport) {
    for event in &report.events {
        log::debug!("tick {}: {event:?}", report.snapshot.time.tick);
    }
    for notice in &report.notices {
        match notice.level {
            AlertLevel::Warning | AlertLevel::Error => log::warn!("{}", notice.message),
            AlertLevel::Info | AlertLevel::Success => log::info!("{}", notice.message),
        }
    }
}
