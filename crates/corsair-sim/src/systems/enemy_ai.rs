//! Enemy AI system: evaluates the ship policy for every hostile and
//! applies the resulting movement, morale, and broadside orders.

use hecs::{Entity, World};

use corsair_ai::policy::{evaluate, EnemyContext, EnemyDecision};
use corsair_core::components::{Battery, Crew, EnemyShip, Heading, Hull, PlayerShip, ShipInfo};
use corsair_core::types::{Position, ShipId};

use crate::report::Feedback;
use crate::systems::gunnery::{self, Magazine};

/// Run one AI step for every hostile ship, in id order.
pub fn run(world: &mut World, magazine: &mut Magazine<'_>, now: f64, dt: f64, feedback: &mut Feedback) {
    let Some(player_position) = world
        .query::<(&PlayerShip, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| *pos)
    else {
        return;
    };

    let mut decisions: Vec<(Entity, ShipId, EnemyDecision)> = Vec::new();
    {
        let mut query =
            world.query::<(&EnemyShip, &ShipInfo, &Position, &Heading, &Hull, &Crew, &Battery)>();
        for (entity, (_enemy, info, pos, heading, hull, crew, battery)) in query.iter() {
            if hull.health <= 0.0 {
                continue;
            }
            let ctx = EnemyContext {
                position: *pos,
                rotation: heading.0,
                speed: info.speed,
                health: hull.health,
                max_health: hull.max_health,
                morale: crew.morale,
                player_position,
                now,
                last_fired_port: battery.last_fired_port,
                last_fired_starboard: battery.last_fired_starboard,
                dt,
            };
            decisions.push((entity, info.id, evaluate(&ctx)));
        }
    }
    decisions.sort_by_key(|(_, id, _)| *id);

    for (entity, id, decision) in decisions {
        if let Ok((pos, heading, crew)) =
            world.query_one_mut::<(&mut Position, &mut Heading, &mut Crew)>(entity)
        {
            *pos = decision.position;
            heading.0 = decision.rotation;
            crew.morale = decision.morale.clamp(0.0, crew.max_morale);
        }
        if let Some(side) = decision.fire {
            let outcome = gunnery::fire_broadside(world, magazine, id, side, now, feedback);
            log::debug!("{id} {:?} broadside: {outcome:?}", decision.stance);
        }
    }
}
