//! Fundamental geometric and simulation types.

use std::fmt;
use std::str::FromStr;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 3D position in world space (world units).
/// x = East, y = Up (sea level at 0), z = South.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 3D velocity in world units per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Stable ship identifier. The player's ship is always `ShipId::PLAYER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShipId(pub u32);

impl ShipId {
    pub const PLAYER: ShipId = ShipId(0);

    pub fn is_player(&self) -> bool {
        *self == Self::PLAYER
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_player() {
            write!(f, "player")
        } else {
            write!(f, "ship-{}", self.0)
        }
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of simulation steps run so far.
    pub tick: u64,
    /// Elapsed simulation time in seconds. Used as the clock for cooldowns
    /// and projectile ages.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance on the sea plane (ignores height).
    pub fn horizontal_range_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Bearing to another position in radians, in the same convention as
    /// ship headings (0 = +z, increasing toward +x).
    pub fn bearing_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        dx.atan2(dz)
    }

    /// Move `distance` units along `heading` on the sea plane.
    pub fn advanced(&self, heading: f64, distance: f64) -> Position {
        Position::new(
            self.x + heading.sin() * distance,
            self.y,
            self.z + heading.cos() * distance,
        )
    }

    pub fn as_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

impl From<DVec3> for Position {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Horizontal velocity of magnitude `speed` pointing along `heading`.
    pub fn along(heading: f64, speed: f64) -> Self {
        Self::new(heading.sin() * speed, 0.0, heading.cos() * speed)
    }

    /// Speed on the sea plane.
    pub fn horizontal_speed(&self) -> f64 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    /// Heading in radians (0 = +z).
    pub fn heading(&self) -> f64 {
        self.x.atan2(self.z)
    }
}

impl SimTime {
    /// Advance by one step of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Wrap an angle into (-π, π].
pub fn wrap_angle(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}

/// Calendar date in the game world. Serialized as an ISO `YYYY-MM-DD` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GameDate {
    pub year: i32,
    /// 1-12
    pub month: u32,
    /// 1-31
    pub day: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("expected YYYY-MM-DD, got {0:?}")]
    Malformed(String),
    #[error("month {0} out of range")]
    Month(u32),
    #[error("day {day} out of range for month {month}")]
    Day { month: u32, day: u32 },
}

/// Days per month. The game calendar has no leap years.
pub const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

impl GameDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for GameDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DateParseError::Malformed(s.to_string());
        // Accept full ISO timestamps by ignoring anything after the date.
        let date_part = s.split('T').next().ok_or_else(malformed)?;
        let mut parts = date_part.splitn(3, '-');
        let year: i32 = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(malformed)?;
        let month: u32 = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(malformed)?;
        let day: u32 = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(malformed)?;

        if !(1..=12).contains(&month) {
            return Err(DateParseError::Month(month));
        }
        if day == 0 || day > DAYS_IN_MONTH[(month - 1) as usize] {
            return Err(DateParseError::Day { month, day });
        }
        Ok(Self { year, month, day })
    }
}

impl TryFrom<String> for GameDate {
    type Error = DateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GameDate> for String {
    fn from(date: GameDate) -> Self {
        date.to_string()
    }
}
