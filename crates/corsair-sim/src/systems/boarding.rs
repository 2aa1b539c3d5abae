//! Boarding actions against adjacent hostiles.
//!
//! Fighting power is crew scaled by morale. The stronger side wins; ties
//! go to the defender.

use hecs::World;

use corsair_core::components::{Cargo, Crew, EnemyShip, PlayerShip, ShipInfo};
use corsair_core::constants::*;
use corsair_core::enums::AlertLevel;
use corsair_core::events::GameEvent;
use corsair_core::outcomes::BoardingOutcome;
use corsair_core::state::PlayerLedger;
use corsair_core::types::{Position, ShipId};

use crate::report::Feedback;
use crate::systems::snapshot::ship_record;
use crate::systems::spoils::{self, Bounty};
use crate::world_setup::{find_player, find_ship};

const CAPTURE_BOUNTY: Bounty = Bounty {
    gold: CAPTURE_GOLD_REWARD,
    with_marque: (CAPTURE_REPUTATION_MARQUE, CAPTURE_INFAMY_MARQUE),
    without_marque: (CAPTURE_REPUTATION_NO_MARQUE, CAPTURE_INFAMY_NO_MARQUE),
};

/// Crew count weighted by morale.
pub fn combat_power(crew: &Crew) -> f64 {
    crew.count as f64 * crew.morale / 100.0
}

/// Attempt to board `target` from the player's ship.
pub fn attempt(
    world: &mut World,
    ledger: &mut PlayerLedger,
    target: ShipId,
    feedback: &mut Feedback,
) -> BoardingOutcome {
    let Some(player) = find_player(world) else {
        return BoardingOutcome::UnknownShip;
    };
    let Some(enemy) = find_ship(world, target) else {
        return BoardingOutcome::UnknownShip;
    };
    if world.get::<&EnemyShip>(enemy).is_err() {
        return BoardingOutcome::UnknownShip;
    }

    let (player_pos, player_crew) = match world.query_one_mut::<(&Position, &Crew)>(player) {
        Ok((pos, crew)) => (*pos, *crew),
        Err(_) => return BoardingOutcome::UnknownShip,
    };
    let (enemy_pos, enemy_crew) = match world.query_one_mut::<(&Position, &Crew)>(enemy) {
        Ok((pos, crew)) => (*pos, *crew),
        Err(_) => return BoardingOutcome::UnknownShip,
    };

    let distance = player_pos.horizontal_range_to(&enemy_pos);
    if distance >= BOARDING_RANGE {
        return BoardingOutcome::OutOfRange { distance };
    }

    if combat_power(&player_crew) > combat_power(&enemy_crew) {
        let Some(mut prize) = ship_record(world, enemy) else {
            return BoardingOutcome::UnknownShip;
        };
        let loot = prize.cargo;
        let faction = prize.faction;
        prize.is_enemy = false;
        prize.cargo = Cargo::default();

        if let Ok(player_cargo) = world.query_one_mut::<&mut Cargo>(player) {
            spoils::transfer_cargo(ledger, player_cargo, &loot);
        }
        ledger.captured_ships.push(prize);
        let (reputation, infamy) = spoils::award(ledger, faction, &CAPTURE_BOUNTY);
        let _ = world.despawn(enemy);

        log::info!("Captured {target}: reputation {reputation:+}, infamy {infamy:+}");
        feedback.emit(GameEvent::ShipCaptured { ship_id: target });
        feedback.notify(
            AlertLevel::Success,
            format!("Ship captured! +{} gold", CAPTURE_BOUNTY.gold),
        );
        BoardingOutcome::Captured { ship_id: target }
    } else {
        let Ok(crew) = world.query_one_mut::<&mut Crew>(player) else {
            return BoardingOutcome::UnknownShip;
        };
        let crew_before = crew.count;
        let morale_before = crew.morale;
        crew.count = crew
            .count
            .saturating_sub(BOARDING_CREW_LOSS)
            .max(BOARDING_MIN_CREW);
        crew.morale = (crew.morale - BOARDING_MORALE_LOSS).max(BOARDING_MIN_MORALE);
        let crew_lost = crew_before.saturating_sub(crew.count);
        let morale_lost = (morale_before - crew.morale).max(0.0);

        log::info!("Boarding of {target} repelled, lost {crew_lost} crew");
        feedback.emit(GameEvent::BoardingRepelled { ship_id: target });
        feedback.notify(AlertLevel::Warning, "Boarding repelled!");
        BoardingOutcome::Repelled {
            crew_lost,
            morale_lost,
        }
    }
}

/// Nearest hostile within boarding range of the player, if any.
pub fn boardable_target(world: &World) -> Option<ShipId> {
    let player_pos = world
        .query::<(&PlayerShip, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| *pos)?;

    let mut candidates: Vec<(f64, ShipId)> = world
        .query::<(&EnemyShip, &ShipInfo, &Position)>()
        .iter()
        .map(|(_, (_, info, pos))| (player_pos.horizontal_range_to(pos), info.id))
        .filter(|(distance, _)| *distance < BOARDING_RANGE)
        .collect();
    candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    candidates.first().map(|(_, id)| *id)
}
