//! Snapshot system: flattens the ECS world and session into a
//! `GameStateSnapshot`. Read-only.

use hecs::{Entity, World};

use corsair_core::components::*;
use corsair_core::state::*;
use corsair_core::types::{Position, SimTime, Velocity};

use crate::session::Session;
use crate::world_setup::{self, find_player};

/// Flat record of one ship entity.
pub fn ship_record(world: &World, entity: Entity) -> Option<ShipRecord> {
    let mut query = world
        .query_one::<(
            &ShipInfo,
            &Position,
            &Heading,
            &Hull,
            &Crew,
            &Battery,
            &Cargo,
            Option<&PlayerShip>,
            Option<&EnemyShip>,
        )>(entity)
        .ok()?;
    let (info, pos, heading, hull, crew, battery, cargo, player, enemy) = query.get()?;
    Some(ShipRecord {
        id: info.id,
        position: *pos,
        rotation: heading.0,
        health: hull.health,
        max_health: hull.max_health,
        crew: crew.count,
        max_crew: crew.max_count,
        cannons: battery.cannons,
        speed: info.speed,
        morale: crew.morale,
        max_morale: crew.max_morale,
        class: info.class,
        faction: info.faction,
        is_player: player.is_some(),
        is_enemy: enemy.is_some(),
        last_fired: battery.last_fired,
        last_fired_port: battery.last_fired_port,
        last_fired_starboard: battery.last_fired_starboard,
        last_hit_at: hull.last_hit_at,
        cargo: *cargo,
        max_cargo: info.max_cargo,
    })
}

/// Build a complete snapshot from the current world and session.
pub fn build_snapshot(world: &World, time: &SimTime, session: &Session, seed: u64) -> GameStateSnapshot {
    let player_ship = find_player(world)
        .and_then(|entity| ship_record(world, entity))
        .unwrap_or_else(world_setup::player_ship_record);

    GameStateSnapshot {
        time: *time,
        mode: session.mode,
        camera_mode: session.camera_mode,
        strategic_overlay_open: session.strategic_overlay_open,
        player_ship,
        player: session.ledger.clone(),
        ships: build_ships(world),
        ports: session.ports.clone(),
        cannonballs: build_cannonballs(world),
        current_port: session.current_port.clone(),
        date: session.date,
        wind: session.wind,
        weather: session.weather,
        time_of_day: session.time_of_day,
        voyage: session.voyage.clone(),
        seed,
    }
}

/// Every non-player ship, ordered by id.
fn build_ships(world: &World) -> Vec<ShipRecord> {
    let entities: Vec<Entity> = world
        .query::<(&ShipInfo, Option<&PlayerShip>)>()
        .iter()
        .filter(|(_, (_, player))| player.is_none())
        .map(|(entity, _)| entity)
        .collect();
    let mut ships: Vec<ShipRecord> = entities
        .into_iter()
        .filter_map(|entity| ship_record(world, entity))
        .collect();
    ships.sort_by_key(|s| s.id);
    ships
}

fn build_cannonballs(world: &World) -> Vec<CannonballRecord> {
    let mut balls: Vec<CannonballRecord> = world
        .query::<(&Projectile, &Position, &Velocity)>()
        .iter()
        .map(|(_, (ball, pos, vel))| CannonballRecord {
            id: ball.id,
            position: *pos,
            velocity: *vel,
            damage: ball.damage,
            shooter: ball.shooter,
            created_at: ball.created_at,
            origin: ball.origin,
        })
        .collect();
    balls.sort_by_key(|b| b.id);
    balls
}
