//! Host configuration: `corsair.json` plus environment overrides.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use corsair_core::commands::PlayerCommand;
use corsair_core::constants::{FIXED_DT, MAX_CATCH_UP_STEPS};
use corsair_sim::engine::SimConfig;

/// Default config file looked up in the working directory.
pub const CONFIG_FILE: &str = "corsair.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] io::Error),
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One stretch of the scripted session: keys held for a number of frames,
/// with optional commands applied before the first of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptStep {
    #[serde(default = "default_step_frames")]
    pub frames: u32,
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub commands: Vec<PlayerCommand>,
}

fn default_step_frames() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub seed: u64,
    pub fixed_step: bool,
    pub max_catch_up_steps: u32,
    /// Wall-clock length fed to every frame.
    pub frame_secs: f64,
    /// Where autosaves and the final save go. `None` disables saving.
    pub save_dir: Option<PathBuf>,
    pub save_slot: String,
    pub script: Vec<ScriptStep>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: SimConfig::default().seed,
            fixed_step: false,
            max_catch_up_steps: MAX_CATCH_UP_STEPS,
            frame_secs: FIXED_DT,
            save_dir: Some(PathBuf::from("saves")),
            save_slot: "session".to_string(),
            script: default_script(),
        }
    }
}

/// Put to sea, come about to starboard under way, fire the bow gun and
/// both broadsides, then drift for a few seconds.
fn default_script() -> Vec<ScriptStep> {
    let step = |frames, keys: &[&str]| ScriptStep {
        frames,
        keys: keys.iter().map(|k| k.to_string()).collect(),
        commands: Vec::new(),
    };
    vec![
        ScriptStep {
            frames: 1,
            keys: Vec::new(),
            commands: vec![PlayerCommand::StartGame],
        },
        step(120, &["KeyW"]),
        step(60, &["KeyW", "KeyD"]),
        step(1, &["Space"]),
        step(1, &[]),
        step(1, &["KeyQ"]),
        step(1, &["KeyR"]),
        step(300, &[]),
    ]
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load `path`, falling back to defaults when it is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(ConfigError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("No {} found, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("Ignoring {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Apply `CORSAIR_FIXED_STEP` and `CORSAIR_SEED` from `var`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(flag) = var("CORSAIR_FIXED_STEP") {
            self.fixed_step = matches!(flag.trim(), "1" | "true");
        }
        if let Some(seed) = var("CORSAIR_SEED") {
            match seed.trim().parse() {
                Ok(seed) => self.seed = seed,
                Err(_) => log::warn!("CORSAIR_SEED is not a number: {seed}"),
            }
        }
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            seed: self.seed,
            fixed_step: self.fixed_step,
            max_catch_up_steps: self.max_catch_up_steps,
        }
    }
}
