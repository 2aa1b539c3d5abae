//! Campaign state that lives outside the ECS world.
//!
//! Owned by `SimulationEngine` next to the hecs world: the player's ledger,
//! the port roster, the calendar and sky, and any voyage under way.

use rand::Rng;

use corsair_core::enums::{CameraMode, GameMode, TimeOfDay, Weather};
use corsair_core::state::{GameStateSnapshot, PlayerLedger, PortRecord, VoyageState, WindData};
use corsair_core::types::GameDate;
use corsair_nav::calendar::START_DATE;
use corsair_nav::wind::sample_wind;

use crate::world_setup;

#[derive(Debug, Clone)]
pub struct Session {
    pub mode: GameMode,
    /// Mode to return to when leaving the menu via escape.
    pub resume_mode: Option<GameMode>,
    pub camera_mode: CameraMode,
    pub strategic_overlay_open: bool,
    pub ledger: PlayerLedger,
    pub ports: Vec<PortRecord>,
    pub current_port: Option<String>,
    pub date: GameDate,
    pub wind: WindData,
    pub weather: Weather,
    pub time_of_day: TimeOfDay,
    pub voyage: VoyageState,
    pub next_treasure_id: u32,
}

impl Session {
    /// Fresh campaign: generated ports, starting purse, opening date.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let ports = world_setup::generate_ports(rng);
        let date = START_DATE;
        let wind = sample_wind(rng, &date);
        Self {
            mode: GameMode::Menu,
            resume_mode: None,
            camera_mode: CameraMode::default(),
            strategic_overlay_open: false,
            ledger: world_setup::initial_ledger(),
            ports,
            current_port: None,
            date,
            wind,
            weather: Weather::Clear,
            time_of_day: TimeOfDay::Day,
            voyage: VoyageState::default(),
            next_treasure_id: 0,
        }
    }

    /// Restore the non-ECS half of a saved game.
    pub fn from_snapshot(snapshot: &GameStateSnapshot) -> Self {
        let next_treasure_id = snapshot
            .player
            .buried_treasure
            .iter()
            .map(|t| t.id + 1)
            .max()
            .unwrap_or(0);
        Self {
            mode: snapshot.mode,
            resume_mode: None,
            camera_mode: snapshot.camera_mode,
            strategic_overlay_open: snapshot.strategic_overlay_open,
            ledger: snapshot.player.clone(),
            ports: snapshot.ports.clone(),
            current_port: snapshot.current_port.clone(),
            date: snapshot.date,
            wind: snapshot.wind,
            weather: snapshot.weather,
            time_of_day: snapshot.time_of_day,
            voyage: snapshot.voyage.clone(),
            next_treasure_id,
        }
    }

    pub fn find_port(&self, port_id: &str) -> Option<&PortRecord> {
        self.ports.iter().find(|p| p.id == port_id)
    }

    pub fn find_port_mut(&mut self, port_id: &str) -> Option<&mut PortRecord> {
        self.ports.iter_mut().find(|p| p.id == port_id)
    }
}
