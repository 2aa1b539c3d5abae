//! Daily provisioning at dawn: the crew eats, drinks, and grumbles.

use hecs::World;
use rand::Rng;

use corsair_core::components::{Crew, PlayerShip};
use corsair_core::constants::*;
use corsair_core::enums::AlertLevel;
use corsair_core::events::GameEvent;
use corsair_core::state::Supplies;

use crate::report::Feedback;

/// What one day's upkeep did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpkeepReport {
    pub food_consumed: u32,
    pub rum_consumed: u32,
    pub morale_delta: f64,
    /// Crew lost to mutiny, if one broke out.
    pub mutiny: Option<u32>,
}

/// Rations needed for a crew of `crew`: (food, rum).
pub fn daily_rations(crew: u32) -> (u32, u32) {
    (crew.div_ceil(CREW_PER_FOOD), crew.div_ceil(CREW_PER_RUM))
}

/// Consume a day's rations and settle crew morale. The mutiny roll is only
/// drawn when morale has fallen to the threshold.
pub fn apply<R: Rng + ?Sized>(
    world: &mut World,
    supplies: &mut Supplies,
    rng: &mut R,
    feedback: &mut Feedback,
) -> Option<UpkeepReport> {
    let (_player, crew) = world
        .query_mut::<(&PlayerShip, &mut Crew)>()
        .into_iter()
        .next()
        .map(|(_, components)| components)?;

    let (food_needed, rum_needed) = daily_rations(crew.count);
    let has_rations = supplies.food >= food_needed;
    let has_rum = supplies.rum >= rum_needed;

    let mut morale_delta = if has_rations {
        RATIONS_MORALE
    } else {
        STARVATION_MORALE
    };
    if has_rum {
        morale_delta += RUM_MORALE;
    }
    let morale = (crew.morale + morale_delta).clamp(0.0, crew.max_morale);

    supplies.food = supplies.food.saturating_sub(food_needed);
    supplies.rum = supplies.rum.saturating_sub(rum_needed);

    let mutiny = morale <= MUTINY_MORALE_THRESHOLD && rng.gen::<f64>() < MUTINY_CHANCE;
    let mut crew_lost = None;
    if mutiny {
        let lost = (crew.count as f64 * MUTINY_CREW_LOSS_FRACTION).ceil() as u32;
        let remaining = crew.count.saturating_sub(lost).max(1);
        crew_lost = Some(crew.count - remaining);
        crew.count = remaining;
        crew.morale = MUTINY_MORALE_RESET.min(crew.max_morale);
    } else {
        crew.morale = morale;
    }

    if let Some(lost) = crew_lost {
        log::warn!("Mutiny! {lost} crew deserted");
        feedback.emit(GameEvent::Mutiny { crew_lost: lost });
        feedback.notify(AlertLevel::Error, format!("Mutiny! {lost} crew have deserted"));
    }
    if !has_rations {
        feedback.notify(AlertLevel::Warning, "The crew goes hungry");
    }

    Some(UpkeepReport {
        food_consumed: food_needed,
        rum_consumed: rum_needed,
        morale_delta,
        mutiny: crew_lost,
    })
}
