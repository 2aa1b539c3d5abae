//! Gunnery: bow-gun shots, broadsides, and the player's auto-targeting.
//!
//! Each firing attempt either launches cannonballs and stamps the reload
//! clock, or returns a rejection and leaves the world untouched. Only the
//! player pays ammunition; enemy magazines are not tracked.

use glam::DVec3;
use hecs::World;

use corsair_core::components::{Battery, EnemyShip, Heading, PlayerShip};
use corsair_core::constants::*;
use corsair_core::enums::BroadsideSide;
use corsair_core::events::GameEvent;
use corsair_core::outcomes::{FireOutcome, Gun};
use corsair_core::state::Supplies;
use corsair_core::types::{wrap_angle, Position, ShipId, Velocity};

use crate::report::Feedback;
use crate::world_setup::{find_ship, launch_cannonball};

/// Number of balls in one broadside.
pub fn broadside_shots(cannons: u32) -> u32 {
    (cannons / 2).max(1)
}

/// Seconds of reload left on a gun, or `None` when it is ready.
fn reload_remaining(last_fired: Option<f64>, now: f64, cooldown: f64) -> Option<f64> {
    let elapsed = now - last_fired?;
    (elapsed < cooldown).then(|| cooldown - elapsed)
}

/// Mutable state a firing action may touch besides the world.
pub struct Magazine<'a> {
    pub supplies: &'a mut Supplies,
    pub next_ball_id: &'a mut u32,
}

impl Magazine<'_> {
    fn next_id(&mut self) -> u32 {
        let id = *self.next_ball_id;
        *self.next_ball_id += 1;
        id
    }
}

/// Fire the bow gun along the shooter's heading.
pub fn fire_directed(
    world: &mut World,
    magazine: &mut Magazine<'_>,
    shooter: ShipId,
    now: f64,
    feedback: &mut Feedback,
) -> FireOutcome {
    let Some(entity) = find_ship(world, shooter) else {
        return FireOutcome::UnknownShip;
    };
    let Ok((pos, heading, battery)) =
        world.query_one_mut::<(&Position, &Heading, &mut Battery)>(entity)
    else {
        return FireOutcome::UnknownShip;
    };

    if let Some(remaining_secs) = reload_remaining(battery.last_fired, now, DIRECTED_COOLDOWN_SECS) {
        return FireOutcome::RejectedCooldown { remaining_secs };
    }
    if shooter.is_player() && magazine.supplies.ammunition == 0 {
        return FireOutcome::RejectedNoAmmo {
            needed: 1,
            available: 0,
        };
    }

    battery.last_fired = Some(now);
    let heading = heading.0;
    let mut muzzle = pos.advanced(heading, DIRECTED_MUZZLE_OFFSET);
    muzzle.y += DIRECTED_MUZZLE_HEIGHT;

    if shooter.is_player() {
        magazine.supplies.ammunition -= 1;
    }
    let id = magazine.next_id();
    launch_cannonball(
        world,
        id,
        shooter,
        muzzle,
        Velocity::along(heading, DIRECTED_SHOT_SPEED),
        DIRECTED_SHOT_DAMAGE,
        now,
    );

    log::debug!("{shooter} fired bow gun");
    feedback.emit(GameEvent::CannonFired {
        shooter,
        side: None,
        shots: 1,
    });
    FireOutcome::Fired { shots: 1 }
}

/// Fire every other gun on one side.
pub fn fire_broadside(
    world: &mut World,
    magazine: &mut Magazine<'_>,
    shooter: ShipId,
    side: BroadsideSide,
    now: f64,
    feedback: &mut Feedback,
) -> FireOutcome {
    let Some(entity) = find_ship(world, shooter) else {
        return FireOutcome::UnknownShip;
    };
    let Ok((pos, heading, battery)) =
        world.query_one_mut::<(&Position, &Heading, &mut Battery)>(entity)
    else {
        return FireOutcome::UnknownShip;
    };

    let last = match side {
        BroadsideSide::Port => battery.last_fired_port,
        BroadsideSide::Starboard => battery.last_fired_starboard,
    };
    if let Some(remaining_secs) = reload_remaining(last, now, BROADSIDE_COOLDOWN_SECS) {
        return FireOutcome::RejectedCooldown { remaining_secs };
    }

    let shots = broadside_shots(battery.cannons);
    if shooter.is_player() && magazine.supplies.ammunition < shots {
        return FireOutcome::RejectedNoAmmo {
            needed: shots,
            available: magazine.supplies.ammunition,
        };
    }

    match side {
        BroadsideSide::Port => battery.last_fired_port = Some(now),
        BroadsideSide::Starboard => battery.last_fired_starboard = Some(now),
    }
    let origin = pos.as_dvec3();
    let rotation = heading.0;

    if shooter.is_player() {
        magazine.supplies.ammunition -= shots;
    }

    let base_angle = rotation + side.beam_angle();
    let lateral = side.lateral_sign() * BROADSIDE_LATERAL_OFFSET;
    let centre = (shots as f64 - 1.0) / 2.0;
    let (sin_r, cos_r) = rotation.sin_cos();
    for i in 0..shots {
        let angle = base_angle + (i as f64 - centre) * BROADSIDE_SPREAD;
        let along = 1.0 - i as f64 * BROADSIDE_GUN_SPACING;
        let offset = DVec3::new(
            sin_r * along + cos_r * lateral,
            BROADSIDE_MUZZLE_HEIGHT,
            cos_r * along - sin_r * lateral,
        );
        let id = magazine.next_id();
        launch_cannonball(
            world,
            id,
            shooter,
            Position::from(origin + offset),
            Velocity::along(angle, BROADSIDE_SHOT_SPEED),
            BROADSIDE_SHOT_DAMAGE,
            now,
        );
    }

    log::debug!("{shooter} fired {shots}-gun broadside to {side:?}");
    feedback.emit(GameEvent::CannonFired {
        shooter,
        side: Some(side),
        shots,
    });
    FireOutcome::Fired { shots }
}

/// The player's fire key: broadside at the nearest hostile within
/// `AUTO_TARGET_RADIUS` on whichever side it lies, otherwise the bow gun.
/// Does nothing with an empty magazine.
pub fn auto_fire(
    world: &mut World,
    magazine: &mut Magazine<'_>,
    now: f64,
    feedback: &mut Feedback,
) -> Option<(Gun, FireOutcome)> {
    if magazine.supplies.ammunition == 0 {
        return None;
    }

    let (player_pos, heading) = world
        .query::<(&PlayerShip, &Position, &Heading)>()
        .iter()
        .next()
        .map(|(_, (_, pos, heading))| (*pos, heading.0))?;

    let mut nearest: Option<(f64, Position)> = None;
    for (_entity, (_enemy, pos)) in world.query::<(&EnemyShip, &Position)>().iter() {
        let dist = player_pos.horizontal_range_to(pos);
        if dist < AUTO_TARGET_RADIUS && nearest.map_or(true, |(best, _)| dist < best) {
            nearest = Some((dist, *pos));
        }
    }

    match nearest {
        Some((_, target)) => {
            let relative = wrap_angle(player_pos.bearing_to(&target) - heading);
            let side = BroadsideSide::from_relative_bearing(relative);
            let outcome = fire_broadside(world, magazine, ShipId::PLAYER, side, now, feedback);
            Some((Gun::Broadside(side), outcome))
        }
        None => {
            let outcome = fire_directed(world, magazine, ShipId::PLAYER, now, feedback);
            Some((Gun::Bow, outcome))
        }
    }
}
