//! Navigation for the Corsair simulation: geographic projection, named
//! locations, sailing charts, trade winds, weather rolls, and the calendar.

pub use corsair_core as core;

pub mod calendar;
pub mod charts;
pub mod geo;
pub mod locations;
pub mod weather;
pub mod wind;

pub use calendar::{advance_date, format_date, season_for, START_DATE};
pub use charts::{route_bearing, route_distance, SailingRoute};
pub use geo::{lat_lon_to_world, WorldProjection};
pub use locations::{find_location, location_position, nearest_location, Location, LOCATIONS};
pub use wind::{describe_wind, sailing_days, sample_wind, voyage_duration, wind_efficiency};
