//! Save games: one pretty-printed JSON file per slot.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use corsair_core::state::GameStateSnapshot;
use corsair_core::types::GameDate;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("save data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Full save data written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSave {
    pub slot_name: String,
    /// Unix seconds at which the save was written.
    pub timestamp: u64,
    pub state: GameStateSnapshot,
}

/// Lightweight metadata for listing saves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub slot_name: String,
    pub timestamp: u64,
    pub date: GameDate,
    pub gold: i64,
}

impl GameSave {
    pub fn new(slot: &str, state: GameStateSnapshot) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            slot_name: slot.to_string(),
            timestamp,
            state,
        }
    }
}

fn save_path(dir: &Path, slot: &str) -> PathBuf {
    dir.join(format!("{slot}.json"))
}

pub fn save_to_file(dir: &Path, save: &GameSave) -> Result<PathBuf, PersistError> {
    fs::create_dir_all(dir)?;
    let path = save_path(dir, &save.slot_name);
    let json = serde_json::to_string_pretty(save)?;
    fs::write(&path, json)?;
    log::info!("Game saved to {}", path.display());
    Ok(path)
}

pub fn load_from_file(dir: &Path, slot: &str) -> Result<GameSave, PersistError> {
    let json = fs::read_to_string(save_path(dir, slot))?;
    Ok(serde_json::from_str(&json)?)
}

/// Every readable save in `dir`, newest first. Unreadable files are skipped.
pub fn list_saves(dir: &Path) -> Vec<SaveMetadata> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut saves: Vec<SaveMetadata> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .filter_map(|path| fs::read_to_string(path).ok())
        .filter_map(|json| serde_json::from_str::<GameSave>(&json).ok())
        .map(|save| SaveMetadata {
            slot_name: save.slot_name,
            timestamp: save.timestamp,
            date: save.state.date,
            gold: save.state.player.gold,
        })
        .collect();
    saves.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| a.slot_name.cmp(&b.slot_name))
    });
    saves
}

/// Remove a slot. Deleting a missing slot is not an error.
pub fn delete_save(dir: &Path, slot: &str) -> Result<(), PersistError> {
    let path = save_path(dir, slot);
    if path.exists() {
        fs::remove_file(&path)?;
    }
    Ok(())
}
