//! Sailing charts: nautical-mile distances and compass bearings between
//! named locations.
//!
//! The charts are sparse. Routes missing from a chart fall back to
//! `DEFAULT_ROUTE_NAUTICAL_MILES` and `DEFAULT_ROUTE_BEARING`.

use corsair_core::constants::{DEFAULT_ROUTE_BEARING, DEFAULT_ROUTE_NAUTICAL_MILES};

type Chart = &'static [(&'static str, &'static [(&'static str, f64)])];

/// Nautical miles between ports.
const DISTANCES: Chart = &[
    (
        "port_royal",
        &[
            ("havana", 150.0),
            ("tortuga", 120.0),
            ("nassau", 300.0),
            ("port_au_prince", 100.0),
            ("santo_domingo", 180.0),
            ("san_juan", 280.0),
            ("martinique", 500.0),
            ("barbados", 600.0),
            ("trinidad", 650.0),
            ("curacao", 400.0),
            ("cartagena", 220.0),
            ("veracruz", 800.0),
        ],
    ),
    (
        "tortuga",
        &[
            ("port_royal", 120.0),
            ("havana", 180.0),
            ("port_au_prince", 40.0),
            ("nassau", 350.0),
            ("santo_domingo", 80.0),
            ("san_juan", 200.0),
            ("martinique", 420.0),
            ("barbados", 520.0),
            ("trinidad", 570.0),
            ("curacao", 320.0),
            ("cartagena", 280.0),
            ("veracruz", 950.0),
        ],
    ),
    (
        "nassau",
        &[
            ("port_royal", 300.0),
            ("tortuga", 350.0),
            ("havana", 200.0),
            ("charleston", 280.0),
            ("st_augustine", 220.0),
            ("key_west", 150.0),
            ("santo_domingo", 400.0),
            ("san_juan", 500.0),
            ("martinique", 700.0),
            ("barbados", 800.0),
            ("new_orleans", 600.0),
            ("mobile", 450.0),
        ],
    ),
    (
        "havana",
        &[
            ("port_royal", 150.0),
            ("tortuga", 180.0),
            ("nassau", 200.0),
            ("key_west", 90.0),
            ("veracruz", 500.0),
            ("campeche", 350.0),
            ("new_orleans", 450.0),
            ("mobile", 400.0),
            ("santo_domingo", 250.0),
            ("san_juan", 350.0),
            ("cartagena", 320.0),
            ("port_au_prince", 200.0),
        ],
    ),
    (
        "port_au_prince",
        &[
            ("tortuga", 40.0),
            ("port_royal", 100.0),
            ("havana", 200.0),
            ("santo_domingo", 120.0),
            ("san_juan", 160.0),
            ("martinique", 380.0),
            ("barbados", 480.0),
            ("trinidad", 530.0),
            ("curacao", 280.0),
            ("cartagena", 240.0),
            ("nassau", 400.0),
            ("ile_a_vache", 30.0),
        ],
    ),
    (
        "santo_domingo",
        &[
            ("port_au_prince", 120.0),
            ("tortuga", 80.0),
            ("port_royal", 180.0),
            ("havana", 250.0),
            ("san_juan", 180.0),
            ("martinique", 320.0),
            ("barbados", 420.0),
            ("trinidad", 470.0),
            ("curacao", 220.0),
            ("cartagena", 180.0),
            ("nassau", 400.0),
            ("ile_a_vache", 100.0),
        ],
    ),
    (
        "san_juan",
        &[
            ("santo_domingo", 180.0),
            ("port_au_prince", 160.0),
            ("tortuga", 200.0),
            ("port_royal", 280.0),
            ("havana", 350.0),
            ("martinique", 200.0),
            ("barbados", 300.0),
            ("trinidad", 350.0),
            ("curacao", 180.0),
            ("cartagena", 120.0),
            ("nassau", 500.0),
            ("st_thomas", 40.0),
        ],
    ),
    (
        "martinique",
        &[
            ("san_juan", 200.0),
            ("barbados", 120.0),
            ("trinidad", 200.0),
            ("curacao", 200.0),
            ("cartagena", 280.0),
            ("port_royal", 500.0),
            ("tortuga", 420.0),
            ("dominica", 30.0),
            ("st_lucia", 25.0),
            ("antigua", 90.0),
            ("guadeloupe", 80.0),
            ("st_vincent", 60.0),
        ],
    ),
    (
        "barbados",
        &[
            ("martinique", 120.0),
            ("trinidad", 120.0),
            ("curacao", 280.0),
            ("cartagena", 360.0),
            ("port_royal", 600.0),
            ("tortuga", 520.0),
            ("san_juan", 300.0),
            ("dominica", 90.0),
            ("st_lucia", 80.0),
            ("antigua", 200.0),
            ("guadeloupe", 180.0),
            ("st_vincent", 80.0),
        ],
    ),
    (
        "trinidad",
        &[
            ("barbados", 120.0),
            ("martinique", 200.0),
            ("curacao", 160.0),
            ("cartagena", 240.0),
            ("port_royal", 650.0),
            ("tortuga", 570.0),
            ("san_juan", 350.0),
            ("dominica", 180.0),
            ("st_lucia", 160.0),
            ("antigua", 280.0),
            ("guadeloupe", 260.0),
            ("st_vincent", 140.0),
        ],
    ),
    (
        "curacao",
        &[
            ("trinidad", 160.0),
            ("barbados", 280.0),
            ("martinique", 200.0),
            ("cartagena", 80.0),
            ("port_royal", 400.0),
            ("tortuga", 320.0),
            ("san_juan", 180.0),
            ("santo_domingo", 220.0),
            ("port_au_prince", 280.0),
            ("ile_a_vache", 250.0),
            ("maracaibo", 50.0),
            ("caracas", 120.0),
        ],
    ),
    (
        "new_orleans",
        &[
            ("mobile", 120.0),
            ("pensacola", 150.0),
            ("havana", 450.0),
            ("key_west", 400.0),
            ("veracruz", 650.0),
            ("campeche", 500.0),
            ("nassau", 600.0),
            ("charleston", 550.0),
            ("galveston", 350.0),
            ("tampico", 600.0),
            ("barataria", 60.0),
            ("biloxi", 80.0),
        ],
    ),
    (
        "mobile",
        &[
            ("new_orleans", 120.0),
            ("pensacola", 60.0),
            ("havana", 400.0),
            ("key_west", 350.0),
            ("veracruz", 700.0),
            ("campeche", 550.0),
            ("nassau", 450.0),
            ("charleston", 450.0),
            ("galveston", 400.0),
            ("tampico", 650.0),
            ("st_augustine", 300.0),
            ("biloxi", 50.0),
        ],
    ),
    (
        "veracruz",
        &[
            ("havana", 500.0),
            ("campeche", 200.0),
            ("new_orleans", 650.0),
            ("mobile", 700.0),
            ("tampico", 250.0),
            ("port_royal", 800.0),
            ("tortuga", 950.0),
            ("cartagena", 600.0),
            ("galveston", 500.0),
            ("acapulco", 400.0),
            ("panama_city", 650.0),
            ("merida", 150.0),
        ],
    ),
    (
        "campeche",
        &[
            ("veracruz", 200.0),
            ("havana", 350.0),
            ("new_orleans", 500.0),
            ("mobile", 550.0),
            ("tampico", 300.0),
            ("port_royal", 700.0),
            ("tortuga", 850.0),
            ("cartagena", 500.0),
            ("galveston", 400.0),
            ("merida", 100.0),
            ("cozumel", 150.0),
            ("belize_city", 200.0),
        ],
    ),
    (
        "charleston",
        &[
            ("nassau", 280.0),
            ("mobile", 450.0),
            ("new_orleans", 550.0),
            ("st_augustine", 200.0),
            ("key_west", 400.0),
            ("havana", 450.0),
            ("port_royal", 600.0),
            ("tortuga", 700.0),
            ("cape_hatteras", 250.0),
            ("savannah", 120.0),
            ("wilmington", 180.0),
            ("norfolk", 350.0),
        ],
    ),
    (
        "st_augustine",
        &[
            ("charleston", 200.0),
            ("nassau", 220.0),
            ("mobile", 300.0),
            ("new_orleans", 400.0),
            ("key_west", 250.0),
            ("havana", 300.0),
            ("port_royal", 500.0),
            ("tortuga", 600.0),
            ("cape_canaveral", 80.0),
            ("savannah", 150.0),
            ("miami", 200.0),
            ("tampa", 150.0),
        ],
    ),
    (
        "key_west",
        &[
            ("havana", 90.0),
            ("nassau", 150.0),
            ("st_augustine", 250.0),
            ("mobile", 350.0),
            ("new_orleans", 400.0),
            ("port_royal", 200.0),
            ("tortuga", 250.0),
            ("miami", 150.0),
            ("tampa", 200.0),
            ("dry_tortugas", 70.0),
            ("cape_sable", 100.0),
            ("marathon", 50.0),
        ],
    ),
    (
        "cartagena",
        &[
            ("curacao", 80.0),
            ("trinidad", 240.0),
            ("barbados", 360.0),
            ("martinique", 280.0),
            ("san_juan", 120.0),
            ("santo_domingo", 180.0),
            ("port_au_prince", 240.0),
            ("port_royal", 220.0),
            ("tortuga", 280.0),
            ("havana", 320.0),
            ("panama_city", 200.0),
            ("santa_marta", 60.0),
            ("maracaibo", 130.0),
            ("caracas", 200.0),
            ("la_guaira", 180.0),
            ("puerto_cabello", 150.0),
        ],
    ),
    (
        "panama_city",
        &[
            ("cartagena", 200.0),
            ("curacao", 280.0),
            ("trinidad", 440.0),
            ("barbados", 560.0),
            ("martinique", 480.0),
            ("san_juan", 320.0),
            ("santo_domingo", 380.0),
            ("port_royal", 420.0),
            ("tortuga", 480.0),
            ("havana", 520.0),
            ("veracruz", 650.0),
            ("acapulco", 500.0),
            ("portobelo", 40.0),
            ("nombre_de_dios", 50.0),
            ("chagres", 30.0),
            ("colon", 45.0),
        ],
    ),
];

/// Compass bearings (degrees) between ports.
const BEARINGS: Chart = &[
    (
        "port_royal",
        &[
            ("havana", 315.0),
            ("tortuga", 45.0),
            ("nassau", 15.0),
            ("port_au_prince", 60.0),
            ("santo_domingo", 75.0),
            ("san_juan", 90.0),
            ("martinique", 105.0),
            ("barbados", 120.0),
            ("trinidad", 135.0),
            ("curacao", 150.0),
            ("cartagena", 180.0),
            ("veracruz", 270.0),
        ],
    ),
    (
        "tortuga",
        &[
            ("port_royal", 225.0),
            ("havana", 270.0),
            ("port_au_prince", 180.0),
            ("nassau", 45.0),
            ("santo_domingo", 135.0),
            ("san_juan", 105.0),
            ("martinique", 120.0),
            ("barbados", 135.0),
            ("trinidad", 150.0),
            ("curacao", 165.0),
            ("cartagena", 195.0),
            ("veracruz", 285.0),
        ],
    ),
    (
        "nassau",
        &[
            ("port_royal", 195.0),
            ("tortuga", 225.0),
            ("havana", 240.0),
            ("charleston", 315.0),
            ("st_augustine", 270.0),
            ("key_west", 225.0),
            ("santo_domingo", 165.0),
            ("san_juan", 135.0),
            ("martinique", 120.0),
            ("barbados", 135.0),
            ("new_orleans", 255.0),
            ("mobile", 270.0),
        ],
    ),
    (
        "havana",
        &[
            ("port_royal", 135.0),
            ("tortuga", 90.0),
            ("nassau", 60.0),
            ("key_west", 180.0),
            ("veracruz", 255.0),
            ("campeche", 240.0),
            ("new_orleans", 315.0),
            ("mobile", 330.0),
            ("santo_domingo", 105.0),
            ("san_juan", 90.0),
            ("cartagena", 150.0),
            ("port_au_prince", 105.0),
        ],
    ),
    (
        "new_orleans",
        &[
            ("mobile", 90.0),
            ("pensacola", 75.0),
            ("havana", 135.0),
            ("key_west", 135.0),
            ("veracruz", 225.0),
            ("campeche", 195.0),
            ("nassau", 75.0),
            ("charleston", 60.0),
            ("galveston", 270.0),
            ("tampico", 210.0),
            ("barataria", 180.0),
            ("biloxi", 105.0),
        ],
    ),
    (
        "veracruz",
        &[
            ("havana", 75.0),
            ("campeche", 30.0),
            ("new_orleans", 45.0),
            ("mobile", 60.0),
            ("tampico", 315.0),
            ("port_royal", 90.0),
            ("tortuga", 105.0),
            ("cartagena", 120.0),
            ("galveston", 345.0),
            ("acapulco", 285.0),
            ("panama_city", 135.0),
            ("merida", 15.0),
        ],
    ),
    (
        "cartagena",
        &[
            ("curacao", 60.0),
            ("trinidad", 90.0),
            ("barbados", 75.0),
            ("martinique", 60.0),
            ("san_juan", 15.0),
            ("santo_domingo", 345.0),
            ("port_au_prince", 330.0),
            ("port_royal", 360.0),
            ("tortuga", 345.0),
            ("havana", 330.0),
            ("panama_city", 225.0),
            ("santa_marta", 75.0),
            ("maracaibo", 105.0),
            ("caracas", 120.0),
            ("la_guaira", 90.0),
            ("puerto_cabello", 75.0),
        ],
    ),
    (
        "charleston",
        &[
            ("nassau", 135.0),
            ("mobile", 225.0),
            ("new_orleans", 240.0),
            ("st_augustine", 180.0),
            ("key_west", 210.0),
            ("havana", 195.0),
            ("port_royal", 165.0),
            ("tortuga", 150.0),
            ("cape_hatteras", 30.0),
            ("savannah", 195.0),
            ("wilmington", 45.0),
            ("norfolk", 15.0),
        ],
    ),
];

fn chart_lookup(chart: Chart, from: &str, to: &str) -> Option<f64> {
    chart
        .iter()
        .find(|(origin, _)| *origin == from)
        .and_then(|(_, legs)| legs.iter().find(|(dest, _)| *dest == to))
        .map(|(_, value)| *value)
}

/// Charted distance in nautical miles, if the leg is charted.
pub fn charted_distance(from: &str, to: &str) -> Option<f64> {
    chart_lookup(DISTANCES, from, to)
}

/// Charted compass bearing in degrees, if the leg is charted.
pub fn charted_bearing(from: &str, to: &str) -> Option<f64> {
    chart_lookup(BEARINGS, from, to)
}

/// Distance for a leg, falling back to the default route length.
pub fn route_distance(from: &str, to: &str) -> f64 {
    charted_distance(from, to).unwrap_or(DEFAULT_ROUTE_NAUTICAL_MILES)
}

/// Bearing for a leg, falling back to due east.
pub fn route_bearing(from: &str, to: &str) -> f64 {
    charted_bearing(from, to).unwrap_or(DEFAULT_ROUTE_BEARING)
}

/// A fully resolved leg between two named locations.
#[derive(Debug, Clone, PartialEq)]
pub struct SailingRoute {
    pub from: String,
    pub to: String,
    pub nautical_miles: f64,
    pub bearing: f64,
}

impl SailingRoute {
    pub fn between(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            nautical_miles: route_distance(from, to),
            bearing: route_bearing(from, to),
        }
    }
}
