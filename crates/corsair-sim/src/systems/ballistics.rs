//! Cannonball flight and culling.

use hecs::{Entity, World};

use corsair_core::components::Projectile;
use corsair_core::constants::{
    CANNONBALL_DROP_RATE, CANNONBALL_MAX_RANGE, CANNONBALL_TTL_SECS, SPLASHDOWN_GRACE_SECS,
};
use corsair_core::types::{Position, Velocity};

/// Advance every cannonball by `dt` and despawn the spent ones.
/// `now` is sim time after the step.
pub fn run(world: &mut World, dt: f64, now: f64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (ball, pos, vel)) in
        world.query_mut::<(&Projectile, &mut Position, &Velocity)>()
    {
        pos.x += vel.x * dt;
        pos.z += vel.z * dt;
        pos.y = (pos.y - CANNONBALL_DROP_RATE * dt).max(0.0);

        if is_spent(ball, pos, now) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Too old, too far from its gun, or lying in the water.
pub fn is_spent(ball: &Projectile, pos: &Position, now: f64) -> bool {
    let age = now - ball.created_at;
    let travelled = ball.origin.horizontal_range_to(pos);
    let in_water = pos.y <= 0.0 && age > SPLASHDOWN_GRACE_SECS;
    age >= CANNONBALL_TTL_SECS || travelled >= CANNONBALL_MAX_RANGE || in_water
}
