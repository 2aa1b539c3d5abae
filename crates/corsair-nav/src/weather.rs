//! Random weather and time-of-day transitions.

use corsair_core::enums::{TimeOfDay, Weather};
use rand::Rng;

/// Pick a weather condition uniformly. May return the current one.
pub fn random_weather<R: Rng + ?Sized>(rng: &mut R) -> Weather {
    Weather::ALL[rng.gen_range(0..Weather::ALL.len())]
}

/// With probability `chance`, roll new weather.
pub fn roll_weather_change<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> Option<Weather> {
    if rng.gen::<f64>() < chance {
        Some(random_weather(rng))
    } else {
        None
    }
}

/// With probability `chance`, advance to the next period of the day.
pub fn roll_time_of_day<R: Rng + ?Sized>(
    rng: &mut R,
    current: TimeOfDay,
    chance: f64,
) -> Option<TimeOfDay> {
    if rng.gen::<f64>() < chance {
        Some(current.next())
    } else {
        None
    }
}
