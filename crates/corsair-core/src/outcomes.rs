//! Results of player and AI actions.
//!
//! A rejected action leaves the simulation state untouched; the variant says why.

use serde::{Deserialize, Serialize};

use crate::enums::BroadsideSide;
use crate::types::ShipId;

/// Result of a firing attempt (bow gun or broadside).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FireOutcome {
    /// Projectiles were launched and ammunition was spent.
    Fired { shots: u32 },
    /// The gun (or side) is still reloading.
    RejectedCooldown { remaining_secs: f64 },
    /// The player's magazine cannot supply the shots.
    RejectedNoAmmo { needed: u32, available: u32 },
    /// No such ship in the world.
    UnknownShip,
}

impl FireOutcome {
    pub fn fired(&self) -> bool {
        matches!(self, FireOutcome::Fired { .. })
    }
}

/// Result of a boarding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BoardingOutcome {
    /// The enemy struck its colours; the ship joins the captured list.
    Captured { ship_id: ShipId },
    /// The boarding party was beaten back.
    Repelled { crew_lost: u32, morale_lost: f64 },
    OutOfRange { distance: f64 },
    UnknownShip,
}

/// Result of ordering a voyage on the strategic map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SailOutcome {
    Departed {
        origin: String,
        nautical_miles: f64,
        bearing: f64,
        days: u32,
    },
    UnknownDestination,
    AlreadySailing,
}

/// Result of a port, trade, or bookkeeping action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TradeOutcome {
    Completed { gold_delta: i64 },
    NotInPort,
    InsufficientGold { needed: i64, available: i64 },
    InsufficientCargoSpace { needed: u32, free: u32 },
    NotHeld { requested: u32, held: u32 },
    UnknownItem,
    Nothing,
}

impl TradeOutcome {
    pub fn completed(&self) -> bool {
        matches!(self, TradeOutcome::Completed { .. })
    }
}

/// Outcome of any `PlayerCommand`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum CommandOutcome {
    Fire(FireOutcome),
    Boarding(BoardingOutcome),
    Sail(SailOutcome),
    Trade(TradeOutcome),
    /// Mode changes, docking, and other actions that cannot fail.
    Applied,
    /// The command does not apply in the current mode.
    Ignored,
}

/// Which gun produced a `FireOutcome` (for reports).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gun {
    Bow,
    Broadside(BroadsideSide),
}
