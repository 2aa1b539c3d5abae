//! Game state records: the complete serializable state of a session.
//!
//! `GameStateSnapshot` is what the host renders each frame and what the
//! persistence layer writes to disk. Ships and cannonballs live as ECS
//! entities while the simulation runs; the records here are their flat form.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::components::Cargo;
use crate::enums::*;
use crate::types::{GameDate, Position, ShipId, SimTime, Velocity};

/// Flat description of a ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipRecord {
    pub id: ShipId,
    pub position: Position,
    /// Yaw in radians.
    pub rotation: f64,
    pub health: f64,
    pub max_health: f64,
    pub crew: u32,
    pub max_crew: u32,
    pub cannons: u32,
    pub speed: f64,
    pub morale: f64,
    pub max_morale: f64,
    pub class: ShipClass,
    pub faction: Faction,
    pub is_player: bool,
    pub is_enemy: bool,
    pub last_fired: Option<f64>,
    pub last_fired_port: Option<f64>,
    pub last_fired_starboard: Option<f64>,
    pub last_hit_at: Option<f64>,
    pub cargo: Cargo,
    pub max_cargo: u32,
}

/// Flat description of a cannonball in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CannonballRecord {
    pub id: u32,
    pub position: Position,
    pub velocity: Velocity,
    pub damage: f64,
    pub shooter: ShipId,
    pub created_at: f64,
    pub origin: Position,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSupplies {
    pub food: u32,
    pub rum: u32,
    pub ammunition: u32,
    pub treasure: u32,
}

/// Unit prices in gold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortPrices {
    pub food: i64,
    pub rum: i64,
    pub ammunition: i64,
}

impl PortPrices {
    pub fn price_of(&self, kind: SupplyKind) -> i64 {
        match kind {
            SupplyKind::Food => self.food,
            SupplyKind::Rum => self.rum,
            SupplyKind::Ammunition => self.ammunition,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Governor {
    pub name: String,
    pub attitude: GovernorAttitude,
    /// Accumulated bribes the governor has taken.
    pub bribes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortRecord {
    pub id: String,
    pub name: String,
    pub position: Position,
    pub faction: Faction,
    pub kind: PortKind,
    pub supplies: PortSupplies,
    pub prices: PortPrices,
    pub governor: Governor,
    pub fortification: u32,
    pub garrison: u32,
}

/// Provisions held by the player outside the ship's cargo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplies {
    pub food: u32,
    pub rum: u32,
    pub ammunition: u32,
}

impl Supplies {
    pub fn get(&self, kind: SupplyKind) -> u32 {
        match kind {
            SupplyKind::Food => self.food,
            SupplyKind::Rum => self.rum,
            SupplyKind::Ammunition => self.ammunition,
        }
    }

    pub fn get_mut(&mut self, kind: SupplyKind) -> &mut u32 {
        match kind {
            SupplyKind::Food => &mut self.food,
            SupplyKind::Rum => &mut self.rum,
            SupplyKind::Ammunition => &mut self.ammunition,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuriedTreasure {
    pub id: u32,
    pub position: Position,
    pub gold: i64,
    pub buried: GameDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeGood {
    pub id: String,
    pub name: String,
    pub quantity: u32,
}

/// Itemized trade goods and hold capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoHold {
    pub current: u32,
    pub max: u32,
    pub goods: Vec<TradeGood>,
}

impl CargoHold {
    pub fn free_space(&self) -> u32 {
        self.max.saturating_sub(self.current)
    }

    pub fn quantity_of(&self, good_id: &str) -> u32 {
        self.goods
            .iter()
            .find(|g| g.id == good_id)
            .map(|g| g.quantity)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: MissionKind,
    pub origin_port_id: String,
    pub target_port_id: Option<String>,
    pub reward: i64,
    pub deadline: Option<GameDate>,
    #[serde(default)]
    pub status: MissionStatus,
}

/// Everything the player owns apart from the ship under their feet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerLedger {
    pub gold: i64,
    pub reputation: i64,
    pub infamy: i64,
    pub supplies: Supplies,
    pub fleet: Vec<ShipRecord>,
    pub captured_ships: Vec<ShipRecord>,
    pub buried_treasure: Vec<BuriedTreasure>,
    pub cargo: CargoHold,
    pub letters_of_marque: BTreeSet<Faction>,
    pub missions: Vec<MissionRecord>,
}

impl PlayerLedger {
    pub fn holds_marque_against(&self, faction: Faction) -> bool {
        self.letters_of_marque.contains(&faction)
    }
}

/// Prevailing wind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindData {
    /// Direction the wind blows from, compass degrees.
    pub direction: f64,
    /// Knots.
    pub speed: f64,
    pub season: Season,
}

/// Progress of a multi-day voyage on the strategic map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoyageState {
    pub is_sailing: bool,
    /// 0.0 at departure, 1.0 on arrival.
    pub progress: f64,
    /// Voyage length in simulated days.
    pub duration_days: u32,
    pub destination: Option<String>,
    pub start: Position,
    pub end: Position,
}

/// Complete game state, rendered by the host and written by save games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub mode: GameMode,
    pub camera_mode: CameraMode,
    pub strategic_overlay_open: bool,
    pub player_ship: ShipRecord,
    pub player: PlayerLedger,
    pub ships: Vec<ShipRecord>,
    pub ports: Vec<PortRecord>,
    pub cannonballs: Vec<CannonballRecord>,
    pub current_port: Option<String>,
    pub date: GameDate,
    pub wind: WindData,
    pub weather: Weather,
    pub time_of_day: TimeOfDay,
    pub voyage: VoyageState,
    pub seed: u64,
}
