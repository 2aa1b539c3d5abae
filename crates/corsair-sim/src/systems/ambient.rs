//! Weather and time-of-day transitions.
//!
//! Both the day-scale voyage clock and the per-frame drift at sea funnel
//! through here so that dawn always triggers the daily upkeep.

use hecs::World;
use rand::Rng;

use corsair_core::constants::{TIME_OF_DAY_DRIFT_CHANCE_PER_FRAME, WEATHER_DRIFT_CHANCE_PER_FRAME};
use corsair_core::enums::{TimeOfDay, Weather};
use corsair_core::events::GameEvent;
use corsair_nav::weather::{roll_time_of_day, roll_weather_change};

use crate::report::Feedback;
use crate::session::Session;
use crate::systems::upkeep;

pub fn set_weather(session: &mut Session, weather: Weather, feedback: &mut Feedback) {
    if session.weather != weather {
        log::debug!("Weather now {weather:?}");
    }
    session.weather = weather;
    feedback.emit(GameEvent::WeatherChanged { weather });
}

/// Move the clock to `next`. Reaching dawn runs the daily upkeep.
pub fn set_time_of_day<R: Rng + ?Sized>(
    world: &mut World,
    session: &mut Session,
    next: TimeOfDay,
    rng: &mut R,
    feedback: &mut Feedback,
) {
    session.time_of_day = next;
    feedback.emit(GameEvent::TimeOfDayChanged { time_of_day: next });
    if next == TimeOfDay::Dawn {
        upkeep::apply(world, &mut session.ledger.supplies, rng, feedback);
    }
}

/// Roll weather (first) and time of day (second) with the given chances.
pub fn roll<R: Rng + ?Sized>(
    world: &mut World,
    session: &mut Session,
    rng: &mut R,
    weather_chance: f64,
    time_chance: f64,
    feedback: &mut Feedback,
) {
    if let Some(weather) = roll_weather_change(rng, weather_chance) {
        set_weather(session, weather, feedback);
    }
    if let Some(next) = roll_time_of_day(rng, session.time_of_day, time_chance) {
        set_time_of_day(world, session, next, rng, feedback);
    }
}

/// Once-per-frame drift of the sky while at sea.
pub fn drift<R: Rng + ?Sized>(world: &mut World, session: &mut Session, rng: &mut R, feedback: &mut Feedback) {
    roll(
        world,
        session,
        rng,
        WEATHER_DRIFT_CHANCE_PER_FRAME,
        TIME_OF_DAY_DRIFT_CHANCE_PER_FRAME,
        feedback,
    );
}
