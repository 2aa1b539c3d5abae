//! Trade-wind model and sailing-time estimation.
//!
//! Directions are compass degrees (the direction the wind blows from),
//! speeds are knots.

use corsair_core::constants::{MIN_EFFECTIVE_KNOTS, NEUTRAL_WIND_KNOTS, VOYAGE_PACING_FACTOR};
use corsair_core::enums::Season;
use corsair_core::state::WindData;
use corsair_core::types::GameDate;
use rand::Rng;

use crate::calendar::season_for;

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Sample the prevailing wind for `date`.
///
/// Dry season: 55-85° at 12-20 kts. Wet season: 70-110° at 8-14 kts.
pub fn sample_wind<R: Rng + ?Sized>(rng: &mut R, date: &GameDate) -> WindData {
    let season = season_for(date);
    let (dir_base, dir_span, speed_base, speed_span) = match season {
        Season::Dry => (70.0, 30.0, 12.0, 8.0),
        Season::Wet => (90.0, 40.0, 8.0, 6.0),
    };
    let direction = dir_base + (rng.gen::<f64>() * dir_span - dir_span / 2.0);
    let speed = speed_base + rng.gen::<f64>() * speed_span;
    WindData {
        direction,
        speed,
        season,
    }
}

/// Angle between wind and course folded into [0, 180] degrees.
pub fn wind_angle(wind_direction: f64, course_bearing: f64) -> f64 {
    let raw = (wind_direction - course_bearing).abs();
    if raw > 180.0 {
        360.0 - raw
    } else {
        raw
    }
}

/// Speed multiplier for the point of sail.
pub fn wind_efficiency(wind_direction: f64, course_bearing: f64) -> f64 {
    let angle = wind_angle(wind_direction, course_bearing);
    if angle < 45.0 {
        1.4
    } else if angle < 90.0 {
        1.2
    } else if angle < 135.0 {
        1.0
    } else if angle < 160.0 {
        0.7
    } else {
        0.4
    }
}

/// Effective knots made good, never below `MIN_EFFECTIVE_KNOTS`.
pub fn effective_speed(ship_speed: f64, wind: &WindData, course_bearing: f64) -> f64 {
    let wind_bonus = (wind.speed - NEUTRAL_WIND_KNOTS) * 0.1;
    let speed = (ship_speed + wind_bonus) * wind_efficiency(wind.direction, course_bearing);
    speed.max(MIN_EFFECTIVE_KNOTS)
}

/// Estimated whole days at sea, sailing around the clock.
pub fn sailing_days(nautical_miles: f64, wind: &WindData, course_bearing: f64, ship_speed: f64) -> u32 {
    let hours = nautical_miles / effective_speed(ship_speed, wind, course_bearing);
    (hours / 24.0).ceil().max(0.0) as u32
}

/// Voyage length in game days after pacing, at least one.
pub fn voyage_duration(estimated_days: u32) -> u32 {
    ((estimated_days as f64 * VOYAGE_PACING_FACTOR).ceil() as u32).max(1)
}

/// Beaufort-ish strength label.
pub fn wind_strength(speed: f64) -> &'static str {
    if speed < 4.0 {
        "Light"
    } else if speed < 11.0 {
        "Moderate"
    } else if speed < 17.0 {
        "Fresh"
    } else if speed < 22.0 {
        "Strong"
    } else {
        "Gale"
    }
}

/// Sixteen-point compass name for a direction in degrees.
pub fn compass_point(direction: f64) -> &'static str {
    let index = (direction.rem_euclid(360.0) / 22.5).round() as usize % 16;
    COMPASS_POINTS[index]
}

/// HUD text, e.g. "Fresh ENE 15kts".
pub fn describe_wind(wind: &WindData) -> String {
    format!(
        "{} {} {}kts",
        wind_strength(wind.speed),
        compass_point(wind.direction),
        wind.speed.round() as i64
    )
}
