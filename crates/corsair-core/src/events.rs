//! Events emitted by the simulation for audio, effects, and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{GameDate, Position, ShipId};

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A bow gun or broadside went off.
    CannonFired {
        shooter: ShipId,
        side: Option<BroadsideSide>,
        shots: u32,
    },
    /// A cannonball struck a hull.
    Hit {
        shooter: ShipId,
        target: ShipId,
        damage: f64,
        position: Position,
    },
    /// A ship went down.
    ShipSunk { ship_id: ShipId, by: ShipId },
    ShipCaptured { ship_id: ShipId },
    BoardingRepelled { ship_id: ShipId },
    /// An enemy appeared on the horizon.
    EnemySighted { ship_id: ShipId, position: Position },
    PlayerSunk,
    Arrived { destination: String },
    DayAdvanced { date: GameDate },
    WeatherChanged { weather: Weather },
    TimeOfDayChanged { time_of_day: TimeOfDay },
    Mutiny { crew_lost: u32 },
    TreasureBuried { gold: i64, position: Position },
    PortEntered { port_id: String },
    PortExited,
}

/// User-visible notification (a toast).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub level: AlertLevel,
    pub message: String,
    pub tick: u64,
}
