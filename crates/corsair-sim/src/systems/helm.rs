//! Helm system: integrates the player's rudder and sail input.
//!
//! Left/right turn at `TURN_RATE`. Forward sails at full speed; without it
//! the ship keeps a slow drift. Reverse backs off against the drift.

use hecs::World;

use corsair_core::commands::FrameInput;
use corsair_core::components::{Heading, PlayerShip, ShipInfo};
use corsair_core::constants::{IDLE_DRIFT_FACTOR, REVERSE_FACTOR, TURN_RATE};
use corsair_core::types::Position;

/// Apply one step of helm input to the player's ship.
pub fn run(world: &mut World, input: &FrameInput, dt: f64) {
    for (_entity, (_player, info, pos, heading)) in
        world.query_mut::<(&PlayerShip, &ShipInfo, &mut Position, &mut Heading)>()
    {
        steer(pos, heading, info.speed, input, dt);
    }
}

/// Turn first, then move along the new heading.
pub fn steer(pos: &mut Position, heading: &mut Heading, speed: f64, input: &FrameInput, dt: f64) {
    let turn = TURN_RATE * dt;
    if input.left {
        heading.0 -= turn;
    }
    if input.right {
        heading.0 += turn;
    }

    let stride = speed * dt;
    let mut advance = if input.forward {
        stride
    } else {
        stride * IDLE_DRIFT_FACTOR
    };
    if input.backward {
        advance -= stride * REVERSE_FACTOR;
    }
    *pos = pos.advanced(heading.0, advance);
}
