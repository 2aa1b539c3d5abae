//! Geographic projection: converts between lat/lon and world-space coordinates.
//!
//! The world projection is a plain equirectangular grid anchored at the
//! Caribbean centre point (20°N, 77.5°W).

use corsair_core::types::Position;

/// World units per degree of latitude or longitude.
pub const UNITS_PER_DEGREE: f64 = 20.0;

/// Anchor latitude of the world grid (degrees North).
pub const ANCHOR_LAT: f64 = 20.0;

/// Anchor longitude of the world grid (degrees East; negative is West).
pub const ANCHOR_LON: f64 = -77.5;

/// Equirectangular projection anchored at a reference point.
///
/// The reference point maps to world origin. x grows eastward,
/// z grows southward, y (height) is always sea level.
#[derive(Debug, Clone, Copy)]
pub struct WorldProjection {
    pub ref_lat: f64,
    pub ref_lon: f64,
    pub units_per_degree: f64,
}

impl Default for WorldProjection {
    fn default() -> Self {
        Self::caribbean()
    }
}

impl WorldProjection {
    pub fn new(ref_lat: f64, ref_lon: f64, units_per_degree: f64) -> Self {
        Self {
            ref_lat,
            ref_lon,
            units_per_degree,
        }
    }

    /// The projection used by the game world.
    pub fn caribbean() -> Self {
        Self::new(ANCHOR_LAT, ANCHOR_LON, UNITS_PER_DEGREE)
    }

    /// Convert lat/lon (degrees) to a world position at sea level.
    pub fn to_world(&self, lat: f64, lon: f64) -> Position {
        let x = (lon - self.ref_lon) * self.units_per_degree;
        let z = (self.ref_lat - lat) * self.units_per_degree;
        Position::new(x, 0.0, z)
    }

    /// Convert a world position back to (lat, lon) in degrees.
    pub fn to_geo(&self, pos: &Position) -> (f64, f64) {
        let lon = self.ref_lon + pos.x / self.units_per_degree;
        let lat = self.ref_lat - pos.z / self.units_per_degree;
        (lat, lon)
    }
}

/// Shorthand for the game world projection.
pub fn lat_lon_to_world(lat: f64, lon: f64) -> Position {
    WorldProjection::caribbean().to_world(lat, lon)
}

/// Convert a compass bearing (degrees, 0 = North, clockwise) to a ship heading
/// in world radians.
pub fn compass_to_heading(degrees: f64) -> f64 {
    std::f64::consts::PI - degrees.to_radians()
}

/// Convert a ship heading in world radians to a compass bearing in [0, 360).
pub fn heading_to_compass(heading: f64) -> f64 {
    (180.0 - heading.to_degrees()).rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_royal_projection() {
        let pos = lat_lon_to_world(17.93, -76.84);
        assert!((pos.x - 13.2).abs() < 1e-9);
        assert_eq!(pos.y, 0.0);
        assert!((pos.z - 41.4).abs() < 1e-9);
    }

    #[test]
    fn test_world_projection_roundtrip() {
        let proj = WorldProjection::caribbean();
        let pos = proj.to_world(23.13, -82.38);
        let (lat, lon) = proj.to_geo(&pos);
        assert!((lat - 23.13).abs() < 1e-9);
        assert!((lon + 82.38).abs() < 1e-9);
    }

    #[test]
    fn test_north_is_negative_z() {
        let south = lat_lon_to_world(10.0, -77.5);
        let north = lat_lon_to_world(30.0, -77.5);
        assert!(north.z < south.z);
    }

    #[test]
    fn test_compass_heading_conversion() {
        // Due south in compass terms is heading 0 (+z).
        assert!(compass_to_heading(180.0).abs() < 1e-12);
        // Due east is +x.
        let east = compass_to_heading(90.0);
        assert!((east.sin() - 1.0).abs() < 1e-12);
        for deg in [0.0, 45.0, 90.0, 225.0, 359.0] {
            let back = heading_to_compass(compass_to_heading(deg));
            assert!((back - deg).abs() < 1e-9, "{deg} -> {back}");
        }
    }
}
