//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Nations (and the brethren of the coast) that own ships and ports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    #[default]
    Neutral,
    Spanish,
    English,
    French,
    Pirate,
    Dutch,
    Danish,
}

impl Faction {
    /// Whether a letter of marque can be issued against this faction.
    pub fn issues_marque(&self) -> bool {
        !matches!(self, Faction::Neutral | Faction::Pirate)
    }
}

/// Hull type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipClass {
    #[default]
    Sloop,
    Brigantine,
    Frigate,
    Galleon,
    Merchant,
}

/// Port category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortKind {
    #[default]
    Port,
    MajorPort,
    PirateHaven,
    TreasurePort,
    Island,
}

/// A governor's disposition toward the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GovernorAttitude {
    Friendly,
    #[default]
    Neutral,
    Hostile,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Clear,
    Storm,
    Fog,
}

impl Weather {
    pub const ALL: [Weather; 3] = [Weather::Clear, Weather::Storm, Weather::Fog];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Dawn,
    #[default]
    Day,
    Dusk,
    Night,
}

impl TimeOfDay {
    /// The next period in the daily cycle.
    pub fn next(self) -> Self {
        match self {
            TimeOfDay::Dawn => TimeOfDay::Day,
            TimeOfDay::Day => TimeOfDay::Dusk,
            TimeOfDay::Dusk => TimeOfDay::Night,
            TimeOfDay::Night => TimeOfDay::Dawn,
        }
    }
}

/// Caribbean trade-wind season.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// December through May: strong, steady north-east trades.
    #[default]
    Dry,
    /// June through November: weaker, more variable south-east trades.
    Wet,
}

/// Which side of the ship a broadside is fired from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadsideSide {
    /// Left side facing forward.
    Port,
    /// Right side facing forward.
    Starboard,
}

impl BroadsideSide {
    /// Angle from the bow to the side's beam (radians).
    pub fn beam_angle(&self) -> f64 {
        match self {
            BroadsideSide::Port => -std::f64::consts::FRAC_PI_2,
            BroadsideSide::Starboard => std::f64::consts::FRAC_PI_2,
        }
    }

    /// Sign of the lateral gun-port offset.
    pub fn lateral_sign(&self) -> f64 {
        match self {
            BroadsideSide::Port => -1.0,
            BroadsideSide::Starboard => 1.0,
        }
    }

    /// Side a target lies on given the wrapped relative bearing from the bow.
    pub fn from_relative_bearing(relative: f64) -> Self {
        if relative > 0.0 {
            BroadsideSide::Starboard
        } else {
            BroadsideSide::Port
        }
    }
}

/// Top-level game mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Menu,
    /// Strategic map; voyages progress here.
    Map,
    /// Free sailing in open water.
    Sailing,
    /// Engaged with enemy ships.
    Combat,
    Trading,
    /// Docked at a port.
    Port,
    /// The player's ship was sunk.
    GameOver,
}

impl GameMode {
    /// Modes in which the real-time combat tick runs.
    pub fn is_at_sea(&self) -> bool {
        matches!(self, GameMode::Sailing | GameMode::Combat)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    Follow,
    #[default]
    Tactical,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Follow => CameraMode::Tactical,
            CameraMode::Tactical => CameraMode::Follow,
        }
    }
}

/// Provisions that can be bought at port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyKind {
    Food,
    Rum,
    Ammunition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionKind {
    Escort,
    Delivery,
    Combat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    #[default]
    Active,
    Completed,
    Failed,
}

/// Notice severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Error,
}
