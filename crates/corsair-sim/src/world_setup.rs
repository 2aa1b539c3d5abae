//! Entity spawn factories for setting up the simulation world.
//!
//! Builds the player's sloop, hostile encounters, the port roster, and the
//! starting ledger, and converts between `ShipRecord`s and ship entities.

use std::collections::BTreeSet;
use std::f64::consts::TAU;

use hecs::{Entity, EntityBuilder, World};
use rand::Rng;

use corsair_core::components::*;
use corsair_core::constants::*;
use corsair_core::enums::*;
use corsair_core::state::*;
use corsair_core::types::{Position, ShipId, Velocity};
use corsair_nav::locations::{location_position, HOME_LOCATION};

/// Static roster of ports: name, faction, governor, kind.
const PORT_ROSTER: [(&str, Faction, &str, PortKind); 10] = [
    ("Port Royal", Faction::English, "Sir William Beeston", PortKind::MajorPort),
    ("Tortuga", Faction::Pirate, "Captain Bellamy", PortKind::PirateHaven),
    ("Nassau", Faction::Pirate, "Blackbeard", PortKind::PirateHaven),
    ("Havana", Faction::Spanish, "Don Carlos Menendez", PortKind::MajorPort),
    ("Cartagena", Faction::Spanish, "Capitán Rodriguez", PortKind::TreasurePort),
    ("Santo Domingo", Faction::Spanish, "Almirante Santos", PortKind::MajorPort),
    ("Kingston", Faction::English, "Lord Pemberton", PortKind::Port),
    ("Bridgetown", Faction::English, "Admiral Clarke", PortKind::Port),
    ("Port-au-Prince", Faction::French, "Capitaine Dubois", PortKind::Port),
    ("Campeche", Faction::Neutral, "Señor Vásquez", PortKind::Port),
];

/// The player's starting sloop, moored at Port Royal.
pub fn player_ship_record() -> ShipRecord {
    ShipRecord {
        id: ShipId::PLAYER,
        position: location_position(HOME_LOCATION).unwrap_or_default(),
        rotation: 0.0,
        health: 250.0,
        max_health: 250.0,
        crew: 30,
        max_crew: 40,
        cannons: 8,
        speed: 8.0,
        morale: 80.0,
        max_morale: 100.0,
        class: ShipClass::Sloop,
        faction: Faction::English,
        is_player: true,
        is_enemy: false,
        last_fired: None,
        last_fired_port: None,
        last_fired_starboard: None,
        last_hit_at: None,
        cargo: Cargo {
            food: 0,
            rum: 0,
            ammunition: 60,
            treasure: 0,
        },
        max_cargo: 100,
    }
}

/// A hostile sloop with randomized heading, flag, and hold.
pub fn enemy_ship_record<R: Rng + ?Sized>(rng: &mut R, id: ShipId, position: Position) -> ShipRecord {
    let rotation = rng.gen::<f64>() * TAU;
    let faction = if rng.gen::<f64>() < 0.5 {
        Faction::Spanish
    } else {
        Faction::English
    };
    let cargo = Cargo {
        food: 10 + rng.gen_range(0..20),
        rum: 5 + rng.gen_range(0..10),
        ammunition: 30 + rng.gen_range(0..30),
        treasure: rng.gen_range(0..15),
    };
    ShipRecord {
        id,
        position,
        rotation,
        health: 150.0,
        max_health: 150.0,
        crew: 18,
        max_crew: 24,
        cannons: 6,
        speed: 6.0,
        morale: 60.0,
        max_morale: 100.0,
        class: ShipClass::Sloop,
        faction,
        is_player: false,
        is_enemy: true,
        last_fired: None,
        last_fired_port: None,
        last_fired_starboard: None,
        last_hit_at: None,
        cargo,
        max_cargo: 80,
    }
}

/// Random point on a ring `ENCOUNTER_MIN_DISTANCE..ENCOUNTER_MAX_DISTANCE`
/// around `center`.
pub fn encounter_position<R: Rng + ?Sized>(rng: &mut R, center: &Position) -> Position {
    let angle = rng.gen::<f64>() * TAU;
    let distance =
        ENCOUNTER_MIN_DISTANCE + rng.gen::<f64>() * (ENCOUNTER_MAX_DISTANCE - ENCOUNTER_MIN_DISTANCE);
    Position::new(
        center.x + angle.cos() * distance,
        0.0,
        center.z + angle.sin() * distance,
    )
}

/// Spawn one hostile ship somewhere around the player.
pub fn spawn_encounter<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    id: ShipId,
    player_position: &Position,
) -> Position {
    let position = encounter_position(rng, player_position);
    let record = enemy_ship_record(rng, id, position);
    spawn_ship(world, &record);
    position
}

/// Generate the ten ports on a ring around the world origin.
pub fn generate_ports<R: Rng + ?Sized>(rng: &mut R) -> Vec<PortRecord> {
    let count = PORT_ROSTER.len();
    PORT_ROSTER
        .iter()
        .enumerate()
        .map(|(index, (name, faction, governor, kind))| {
            let angle = index as f64 / count as f64 * TAU;
            let radius = 60.0 + rng.gen::<f64>() * 40.0;
            let supplies = PortSupplies {
                food: 50 + rng.gen_range(0..100),
                rum: 30 + rng.gen_range(0..50),
                ammunition: 100 + rng.gen_range(0..200),
                treasure: rng.gen_range(0..50),
            };
            let prices = PortPrices {
                food: 2 + rng.gen_range(0..3),
                rum: 5 + rng.gen_range(0..5),
                ammunition: 3 + rng.gen_range(0..4),
            };
            let attitude = match rng.gen_range(0..3) {
                0 => GovernorAttitude::Friendly,
                1 => GovernorAttitude::Neutral,
                _ => GovernorAttitude::Hostile,
            };
            let governor = Governor {
                name: governor.to_string(),
                attitude,
                bribes: rng.gen_range(0..500),
            };
            PortRecord {
                id: format!("port_{index}"),
                name: name.to_string(),
                position: Position::new(angle.cos() * radius, 0.0, angle.sin() * radius),
                faction: *faction,
                kind: *kind,
                supplies,
                prices,
                governor,
                fortification: 1 + rng.gen_range(0..5),
                garrison: 50 + rng.gen_range(0..200),
            }
        })
        .collect()
}

/// Starting purse, provisions, and hold.
pub fn initial_ledger() -> PlayerLedger {
    PlayerLedger {
        gold: 1000,
        reputation: 0,
        infamy: 0,
        supplies: Supplies {
            food: 50,
            rum: 30,
            ammunition: 100,
        },
        fleet: Vec::new(),
        captured_ships: Vec::new(),
        buried_treasure: Vec::new(),
        cargo: CargoHold {
            current: 20,
            max: 100,
            goods: vec![
                TradeGood {
                    id: "rum".into(),
                    name: "Rum".into(),
                    quantity: 10,
                },
                TradeGood {
                    id: "sugar".into(),
                    name: "Sugar".into(),
                    quantity: 10,
                },
            ],
        },
        letters_of_marque: BTreeSet::new(),
        missions: Vec::new(),
    }
}

/// Spawn a ship entity from its flat record.
pub fn spawn_ship(world: &mut World, record: &ShipRecord) -> Entity {
    let info = ShipInfo {
        id: record.id,
        class: record.class,
        faction: record.faction,
        speed: record.speed,
        max_cargo: record.max_cargo,
    };
    let hull = Hull {
        health: record.health.clamp(0.0, record.max_health),
        max_health: record.max_health,
        last_hit_at: record.last_hit_at,
    };
    let crew = Crew {
        count: record.crew,
        max_count: record.max_crew,
        morale: record.morale.clamp(0.0, record.max_morale),
        max_morale: record.max_morale,
    };
    let battery = Battery {
        cannons: record.cannons,
        last_fired: record.last_fired,
        last_fired_port: record.last_fired_port,
        last_fired_starboard: record.last_fired_starboard,
    };
    let mut builder = EntityBuilder::new();
    builder
        .add(info)
        .add(record.position)
        .add(Heading(record.rotation))
        .add(hull)
        .add(crew)
        .add(battery)
        .add(record.cargo);
    if record.is_player {
        builder.add(PlayerShip);
    } else if record.is_enemy {
        builder.add(EnemyShip);
    }
    world.spawn(builder.build())
}

/// Spawn a cannonball entity from its flat record.
pub fn spawn_cannonball(world: &mut World, record: &CannonballRecord) -> Entity {
    world.spawn((
        Projectile {
            id: record.id,
            damage: record.damage,
            shooter: record.shooter,
            created_at: record.created_at,
            origin: record.origin,
        },
        record.position,
        record.velocity,
    ))
}

/// Spawn a fresh cannonball at `position` with the given velocity.
pub fn launch_cannonball(
    world: &mut World,
    id: u32,
    shooter: ShipId,
    position: Position,
    velocity: Velocity,
    damage: f64,
    now: f64,
) -> Entity {
    spawn_cannonball(
        world,
        &CannonballRecord {
            id,
            position,
            velocity,
            damage,
            shooter,
            created_at: now,
            origin: position,
        },
    )
}

/// Find the entity for a ship id.
pub fn find_ship(world: &World, id: ShipId) -> Option<Entity> {
    world
        .query::<&ShipInfo>()
        .iter()
        .find(|(_, info)| info.id == id)
        .map(|(entity, _)| entity)
}

/// Find the player's ship entity.
pub fn find_player(world: &World) -> Option<Entity> {
    world
        .query::<&PlayerShip>()
        .iter()
        .next()
        .map(|(entity, _)| entity)
}
