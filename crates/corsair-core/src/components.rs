//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{Position, ShipId};

/// Identity and fixed characteristics of a ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShipInfo {
    pub id: ShipId,
    pub class: ShipClass,
    pub faction: Faction,
    /// Top speed (world units per second).
    pub speed: f64,
    pub max_cargo: u32,
}

/// Yaw in radians (0 = +z, increasing toward +x).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Heading(pub f64);

/// Structural integrity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hull {
    pub health: f64,
    pub max_health: f64,
    /// Sim time of the most recent cannonball hit.
    pub last_hit_at: Option<f64>,
}

/// Crew complement and morale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Crew {
    pub count: u32,
    pub max_count: u32,
    pub morale: f64,
    pub max_morale: f64,
}

/// Guns and reload timestamps. Each timestamp is sim time in seconds,
/// `None` when that battery has never fired.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Battery {
    pub cannons: u32,
    /// Bow gun (directed shots).
    pub last_fired: Option<f64>,
    pub last_fired_port: Option<f64>,
    pub last_fired_starboard: Option<f64>,
}

/// Goods carried aboard a ship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cargo {
    pub food: u32,
    pub rum: u32,
    pub ammunition: u32,
    pub treasure: u32,
}

/// A cannonball in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub damage: f64,
    pub shooter: ShipId,
    /// Sim time at which the ball was fired.
    pub created_at: f64,
    /// Where the ball left the muzzle.
    pub origin: Position,
}

/// Marks the entity sailed by the player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerShip;

/// Marks a ship hostile to the player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyShip;
