//! Multi-day voyages on the strategic map.
//!
//! A voyage is charted from the named location nearest the ship to a named
//! destination. While under way, progress grows by `dt / (days × 3)` and
//! the ship slides linearly from start to end. Every whole day crossed
//! turns the calendar, resamples the wind, and may shift the sky.

use hecs::World;
use rand::Rng;

use corsair_core::components::{PlayerShip, ShipInfo};
use corsair_core::constants::{
    SECS_PER_SAILING_DAY, TIME_OF_DAY_CHANCE_PER_DAY, WEATHER_CHANGE_CHANCE_PER_DAY,
};
use corsair_core::enums::{AlertLevel, GameMode};
use corsair_core::events::GameEvent;
use corsair_core::outcomes::SailOutcome;
use corsair_core::state::VoyageState;
use corsair_core::types::Position;
use corsair_nav::calendar::advance_date;
use corsair_nav::charts::SailingRoute;
use corsair_nav::locations::{location_position, nearest_location};
use corsair_nav::wind::{sailing_days, sample_wind, voyage_duration};

use crate::report::Feedback;
use crate::session::Session;
use crate::systems::ambient;

/// Progress made by one call to [`advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoyageStep {
    /// Progress after the step; 1.0 on the arrival step.
    pub progress: f64,
    pub days_elapsed: u32,
    pub arrived: bool,
}

/// Set sail for a named location.
pub fn begin(world: &World, session: &mut Session, destination: &str) -> SailOutcome {
    if session.voyage.is_sailing {
        return SailOutcome::AlreadySailing;
    }
    let Some(end) = location_position(destination) else {
        log::warn!("No world position for {destination}");
        return SailOutcome::UnknownDestination;
    };
    let Some((start, speed)) = world
        .query::<(&PlayerShip, &Position, &ShipInfo)>()
        .iter()
        .next()
        .map(|(_, (_, pos, info))| (*pos, info.speed))
    else {
        return SailOutcome::UnknownDestination;
    };

    let origin = nearest_location(&start);
    let route = SailingRoute::between(origin, destination);
    let days = voyage_duration(sailing_days(
        route.nautical_miles,
        &session.wind,
        route.bearing,
        speed,
    ));

    log::info!(
        "Setting sail to {destination}: {}nm, {days} days",
        route.nautical_miles
    );
    session.voyage = VoyageState {
        is_sailing: true,
        progress: 0.0,
        duration_days: days,
        destination: Some(destination.to_string()),
        start,
        end,
    };
    session.mode = GameMode::Map;

    SailOutcome::Departed {
        origin: origin.to_string(),
        nautical_miles: route.nautical_miles,
        bearing: route.bearing,
        days,
    }
}

/// Point on the voyage line at `progress`. Exact at both ends.
pub fn position_at(voyage: &VoyageState, progress: f64) -> Position {
    let start = voyage.start.as_dvec3();
    let end = voyage.end.as_dvec3();
    Position::from(start * (1.0 - progress) + end * progress)
}

/// Advance the voyage under way by `dt` real seconds.
pub fn advance<R: Rng + ?Sized>(
    world: &mut World,
    session: &mut Session,
    rng: &mut R,
    dt: f64,
    feedback: &mut Feedback,
) -> Option<VoyageStep> {
    if !session.voyage.is_sailing {
        return None;
    }
    let duration = session.voyage.duration_days.max(1) as f64;
    let old = session.voyage.progress;
    let progress = (old + dt / (duration * SECS_PER_SAILING_DAY)).min(1.0);
    session.voyage.progress = progress;

    let position = position_at(&session.voyage, progress);
    for (_entity, (_player, pos)) in world.query_mut::<(&PlayerShip, &mut Position)>() {
        *pos = position;
    }

    let days_elapsed = ((progress * duration).floor() - (old * duration).floor()).max(0.0) as u32;
    for _ in 0..days_elapsed {
        next_day(world, session, rng, feedback);
    }

    let arrived = progress >= 1.0;
    if arrived {
        let destination = session.voyage.destination.take().unwrap_or_default();
        log::info!("Arrived at {destination}!");
        feedback.notify(AlertLevel::Success, format!("Arrived at {destination}"));
        feedback.emit(GameEvent::Arrived { destination });
        session.voyage.is_sailing = false;
        session.voyage.progress = 0.0;
        session.voyage.duration_days = 0;
    }

    Some(VoyageStep {
        progress,
        days_elapsed,
        arrived,
    })
}

/// Turn the calendar one day at sea.
fn next_day<R: Rng + ?Sized>(world: &mut World, session: &mut Session, rng: &mut R, feedback: &mut Feedback) {
    session.date = advance_date(session.date, 1);
    session.wind = sample_wind(rng, &session.date);
    feedback.emit(GameEvent::DayAdvanced { date: session.date });
    ambient::roll(
        world,
        session,
        rng,
        WEATHER_CHANGE_CHANCE_PER_DAY,
        TIME_OF_DAY_CHANCE_PER_DAY,
        feedback,
    );
}
