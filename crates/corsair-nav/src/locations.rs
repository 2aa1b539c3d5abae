//! Static table of named Caribbean, Gulf, and Atlantic-coast locations.

use corsair_core::types::Position;

use crate::geo::lat_lon_to_world;

/// A named place on the strategic map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub id: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    /// World-space position at sea level.
    pub fn position(&self) -> Position {
        lat_lon_to_world(self.lat, self.lon)
    }
}

/// Fallback origin when nothing else is nearer.
pub const HOME_LOCATION: &str = "port_royal";

const fn loc(id: &'static str, name: &'static str, lat: f64, lon: f64) -> Location {
    Location { id, name, lat, lon }
}

pub const LOCATIONS: &[Location] = &[
    // Greater Antilles
    loc("port_royal", "Port Royal", 17.93, -76.84),
    loc("tortuga", "Tortuga", 20.05, -72.78),
    loc("nassau", "Nassau", 25.06, -77.35),
    loc("havana", "Havana", 23.13, -82.38),
    loc("port_au_prince", "Port-au-Prince", 18.54, -72.34),
    loc("santo_domingo", "Santo Domingo", 18.47, -69.90),
    loc("san_juan", "San Juan", 18.47, -66.11),
    loc("ile_a_vache", "Île-à-Vache", 18.08, -73.69),
    // Lesser Antilles
    loc("martinique", "Martinique", 14.60, -61.08),
    loc("barbados", "Barbados", 13.10, -59.62),
    loc("trinidad", "Trinidad", 10.69, -61.22),
    loc("curacao", "Curaçao", 12.17, -69.00),
    loc("dominica", "Dominica", 15.41, -61.37),
    loc("st_lucia", "St. Lucia", 13.91, -60.98),
    loc("antigua", "Antigua", 17.13, -61.85),
    loc("guadeloupe", "Guadeloupe", 16.24, -61.58),
    loc("st_thomas", "St. Thomas", 18.34, -64.93),
    // Gulf of Mexico
    loc("new_orleans", "New Orleans", 29.95, -90.07),
    loc("mobile", "Mobile", 30.69, -88.04),
    loc("pensacola", "Pensacola", 30.42, -87.22),
    loc("veracruz", "Veracruz", 19.20, -96.13),
    loc("campeche", "Campeche", 19.85, -90.53),
    loc("tampico", "Tampico", 22.23, -97.86),
    loc("galveston", "Galveston", 29.30, -94.80),
    loc("barataria", "Barataria", 29.67, -90.12),
    // North American coast
    loc("charleston", "Charleston", 32.78, -79.93),
    loc("st_augustine", "St. Augustine", 29.90, -81.31),
    loc("key_west", "Key West", 24.56, -81.78),
    loc("tampa", "Tampa", 27.95, -82.46),
    loc("savannah", "Savannah", 32.08, -81.09),
    // Spanish Main and Central America
    loc("cartagena", "Cartagena", 10.39, -75.51),
    loc("panama_city", "Panama City", 8.98, -79.52),
    loc("portobelo", "Portobelo", 9.55, -79.65),
    loc("santa_marta", "Santa Marta", 11.24, -74.20),
    loc("maracaibo", "Maracaibo", 10.67, -71.64),
    loc("belize_city", "Belize City", 17.50, -88.20),
    loc("acapulco", "Acapulco", 16.86, -99.88),
    // Minor anchorages
    loc("miami", "Miami", 25.76, -80.19),
    loc("la_guaira", "La Guaira", 10.60, -66.93),
    loc("caracas", "Caracas", 10.48, -66.90),
    loc("merida", "Mérida", 20.97, -89.62),
    loc("cozumel", "Cozumel", 20.51, -86.95),
    loc("biloxi", "Biloxi", 30.40, -88.89),
    loc("wilmington", "Wilmington", 34.23, -77.95),
    loc("cape_hatteras", "Cape Hatteras", 35.22, -75.52),
    loc("st_vincent", "St. Vincent", 13.25, -61.19),
];

/// Look up a location by id.
pub fn find_location(id: &str) -> Option<&'static Location> {
    LOCATIONS.iter().find(|l| l.id == id)
}

/// World position of a named location.
pub fn location_position(id: &str) -> Option<Position> {
    find_location(id).map(Location::position)
}

/// Id of the named location nearest to `pos` on the sea plane.
/// Ties go to the earlier table entry.
pub fn nearest_location(pos: &Position) -> &'static str {
    let mut best = HOME_LOCATION;
    let mut best_dist = f64::INFINITY;
    for location in LOCATIONS {
        let d = pos.horizontal_range_to(&location.position());
        if d < best_dist {
            best_dist = d;
            best = location.id;
        }
    }
    best
}
