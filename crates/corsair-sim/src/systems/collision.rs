//! Cannonball-versus-hull collision resolution.
//!
//! Brute force: every ball is tested against every ship except its
//! shooter. The first hull within `HIT_RADIUS` takes the damage and the
//! ball is consumed. Hostiles sunk by the player pay out plunder.

use hecs::{Entity, World};

use corsair_core::components::{Cargo, EnemyShip, Hull, Projectile, ShipInfo};
use corsair_core::constants::*;
use corsair_core::enums::{AlertLevel, Faction};
use corsair_core::events::GameEvent;
use corsair_core::state::PlayerLedger;
use corsair_core::types::{Position, ShipId};

use crate::report::Feedback;
use crate::systems::spoils::{self, Bounty};
use crate::world_setup::find_player;

const SINK_BOUNTY: Bounty = Bounty {
    gold: SINK_GOLD_REWARD,
    with_marque: (SINK_REPUTATION_MARQUE, SINK_INFAMY_MARQUE),
    without_marque: (SINK_REPUTATION_NO_MARQUE, SINK_INFAMY_NO_MARQUE),
};

struct Target {
    entity: Entity,
    id: ShipId,
    position: Position,
    is_enemy: bool,
}

/// Result of one collision pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollisionSummary {
    pub hits: u32,
    pub sunk: u32,
    pub player_sunk: bool,
}

/// Resolve all cannonball hits for this step.
pub fn run(
    world: &mut World,
    ledger: &mut PlayerLedger,
    now: f64,
    feedback: &mut Feedback,
    despawn_buffer: &mut Vec<Entity>,
) -> CollisionSummary {
    despawn_buffer.clear();
    let mut summary = CollisionSummary::default();

    let mut balls: Vec<(Entity, Projectile, Position)> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(entity, (ball, pos))| (entity, *ball, *pos))
        .collect();
    balls.sort_by_key(|(_, ball, _)| ball.id);

    let mut targets: Vec<Target> = world
        .query::<(&ShipInfo, &Position, Option<&EnemyShip>)>()
        .iter()
        .map(|(entity, (info, pos, enemy))| Target {
            entity,
            id: info.id,
            position: *pos,
            is_enemy: enemy.is_some(),
        })
        .collect();
    targets.sort_by_key(|t| t.id);

    for (ball_entity, ball, ball_pos) in balls {
        for target in &targets {
            if target.id == ball.shooter {
                continue;
            }
            if ball_pos.horizontal_range_to(&target.position) >= HIT_RADIUS {
                continue;
            }
            let Ok(hull) = world.query_one_mut::<&mut Hull>(target.entity) else {
                continue;
            };
            if hull.health <= 0.0 {
                continue;
            }

            let before = hull.health;
            hull.health = (hull.health - ball.damage).max(0.0);
            hull.last_hit_at = Some(now);
            let after = hull.health;
            let max_health = hull.max_health;

            despawn_buffer.push(ball_entity);
            summary.hits += 1;
            feedback.emit(GameEvent::Hit {
                shooter: ball.shooter,
                target: target.id,
                damage: ball.damage,
                position: ball_pos,
            });

            let by_player = ball.shooter.is_player();
            if by_player && target.is_enemy {
                damage_callouts(before / max_health, after / max_health, feedback);
            }

            if after <= 0.0 {
                if target.id.is_player() {
                    summary.player_sunk = true;
                    log::info!("Player ship sunk by {}", ball.shooter);
                    feedback.emit(GameEvent::PlayerSunk);
                    feedback.notify(AlertLevel::Error, "Your ship has been sunk!");
                } else {
                    summary.sunk += 1;
                    despawn_buffer.push(target.entity);
                    feedback.emit(GameEvent::ShipSunk {
                        ship_id: target.id,
                        by: ball.shooter,
                    });
                    if by_player && target.is_enemy {
                        plunder_wreck(world, ledger, target.entity, feedback);
                    }
                }
            }
            break;
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    summary
}

/// Announce enemy damage thresholds crossed by a single hit.
fn damage_callouts(before: f64, after: f64, feedback: &mut Feedback) {
    let thresholds = [
        (CALLOUT_HULL_STRUCK, "Enemy hull struck!"),
        (CALLOUT_TAKING_WATER, "Enemy taking on water!"),
        (CALLOUT_ABLAZE, "Enemy ship ablaze!"),
    ];
    for (threshold, message) in thresholds {
        if before > threshold && after <= threshold {
            feedback.notify(AlertLevel::Info, message);
        }
    }
}

/// Take a sunk hostile's hold and pay the sinking bounty.
fn plunder_wreck(world: &mut World, ledger: &mut PlayerLedger, wreck: Entity, feedback: &mut Feedback) {
    let (loot, faction): (Cargo, Faction) = match world.query_one_mut::<(&Cargo, &ShipInfo)>(wreck) {
        Ok((cargo, info)) => (*cargo, info.faction),
        Err(_) => return,
    };

    if let Some(player) = find_player(world) {
        if let Ok(player_cargo) = world.query_one_mut::<&mut Cargo>(player) {
            spoils::transfer_cargo(ledger, player_cargo, &loot);
        }
    }
    let (reputation, infamy) = spoils::award(ledger, faction, &SINK_BOUNTY);
    log::info!(
        "Sank {faction:?} ship: +{} gold, reputation {reputation:+}, infamy {infamy:+}",
        SINK_BOUNTY.gold
    );
    feedback.notify(
        AlertLevel::Success,
        format!("Enemy sunk! +{} gold", SINK_BOUNTY.gold),
    );
}

