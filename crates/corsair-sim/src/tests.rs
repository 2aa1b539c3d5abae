//! Tests for the simulation engine, combat systems, upkeep, voyages, and the port economy.

use std::f64::consts::FRAC_PI_4;

use hecs::World;
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use corsair_core::commands::{FrameInput, PlayerCommand, ShipyardOffer};
use corsair_core::components::{Cargo, Crew, Heading, PlayerShip, Projectile};
use corsair_core::constants::*;
use corsair_core::enums::*;
use corsair_core::events::GameEvent;
use corsair_core::outcomes::*;
use corsair_core::state::*;
use corsair_core::types::{Position, ShipId, Velocity};
use corsair_nav::calendar::{advance_date, START_DATE};
use corsair_nav::locations::{location_position, HOME_LOCATION};

use crate::engine::{SimConfig, SimulationEngine, AUTOSAVE_SLOT};
use crate::persistence;
use crate::report::{Feedback, TickReport};
use crate::session::Session;
use crate::systems::{ambient, ballistics, collision, helm, upkeep, voyage};
use crate::world_setup;

fn engine() -> SimulationEngine {
    SimulationEngine::new(SimConfig::default())
}

/// Engine at sea with the player stopped at the origin, heading +z.
fn at_sea(setup: impl FnOnce(&mut GameStateSnapshot)) -> SimulationEngine {
    at_sea_with(SimConfig::default(), setup)
}

fn at_sea_with(config: SimConfig, setup: impl FnOnce(&mut GameStateSnapshot)) -> SimulationEngine {
    let mut snap = engine().snapshot();
    snap.mode = GameMode::Sailing;
    snap.player_ship.position = Position::default();
    snap.player_ship.rotation = 0.0;
    snap.player_ship.speed = 0.0;
    setup(&mut snap);
    SimulationEngine::from_snapshot(&snap, config)
}

/// At sea, then docked at `port_0`.
fn docked(setup: impl FnOnce(&mut GameStateSnapshot)) -> SimulationEngine {
    let mut engine = at_sea(setup);
    engine.apply(PlayerCommand::EnterPort {
        port_id: "port_0".into(),
    });
    engine
}

/// A Spanish sloop facing +z.
fn hostile(id: u32, position: Position) -> ShipRecord {
    let mut rng = ChaCha8Rng::seed_from_u64(u64::from(id));
    let mut ship = world_setup::enemy_ship_record(&mut rng, ShipId(id), position);
    ship.rotation = 0.0;
    ship.faction = Faction::Spanish;
    ship
}

fn idle() -> FrameInput {
    FrameInput::default()
}

fn trade(outcome: CommandOutcome) -> TradeOutcome {
    match outcome {
        CommandOutcome::Trade(outcome) => outcome,
        other => panic!("expected a trade outcome, got {other:?}"),
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: 12345,
        ..Default::default()
    };
    let mut engine_a = SimulationEngine::new(config.clone());
    let mut engine_b = SimulationEngine::new(config);

    engine_a.queue_command(PlayerCommand::StartGame);
    engine_b.queue_command(PlayerCommand::StartGame);

    for i in 0..300 {
        let input = FrameInput {
            forward: i % 3 != 0,
            right: i % 7 == 0,
            fire: i % 40 == 0,
            ..Default::default()
        };
        let report_a = engine_a.tick(&input, FIXED_DT);
        let report_b = engine_b.tick(&input, FIXED_DT);

        let json_a = serde_json::to_string(&report_a.snapshot).unwrap();
        let json_b = serde_json::to_string(&report_b.snapshot).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });
    // Port placement is rolled from the seed.
    assert_ne!(engine_a.snapshot().ports, engine_b.snapshot().ports);
}

#[test]
fn test_restored_engines_stay_in_lockstep() {
    let mut engine = engine();
    engine.queue_command(PlayerCommand::StartGame);
    for _ in 0..30 {
        engine.tick(&FrameInput { forward: true, ..Default::default() }, FIXED_DT);
    }
    let snap = engine.snapshot();

    let mut a = SimulationEngine::from_snapshot(&snap, SimConfig::default());
    let mut b = SimulationEngine::from_snapshot(&snap, SimConfig::default());
    for _ in 0..60 {
        let json_a = serde_json::to_string(&a.tick(&idle(), FIXED_DT).snapshot).unwrap();
        let json_b = serde_json::to_string(&b.tick(&idle(), FIXED_DT).snapshot).unwrap();
        assert_eq!(json_a, json_b);
    }
}

// ---- Session lifecycle ----

#[test]
fn test_new_engine_waits_in_menu() {
    let snap = engine().snapshot();
    assert_eq!(snap.mode, GameMode::Menu);
    assert_eq!(snap.ports.len(), 10);
    assert_eq!(snap.ports[0].id, "port_0");
    assert_eq!(Some(snap.player_ship.position), location_position(HOME_LOCATION));
    assert!(snap.ships.is_empty());
    assert!(snap.cannonballs.is_empty());
    assert_eq!(snap.player.gold, 1000);
    assert_eq!(snap.date, START_DATE);
    assert_eq!(snap.weather, Weather::Clear);
    assert_eq!(snap.time_of_day, TimeOfDay::Day);
}

#[test]
fn test_start_game_puts_to_sea_off_first_port() {
    let mut engine = engine();
    assert_eq!(engine.apply(PlayerCommand::StartGame), CommandOutcome::Applied);

    let snap = engine.snapshot();
    let port = snap.ports[0].position;
    assert_eq!(snap.mode, GameMode::Sailing);
    assert_eq!(
        snap.player_ship.position,
        Position::new(port.x + 8.0, port.y, port.z + 8.0)
    );
    assert_eq!(snap.player_ship.rotation, FRAC_PI_4);

    // Only accepted from the menu.
    assert_eq!(engine.apply(PlayerCommand::StartGame), CommandOutcome::Ignored);
}

#[test]
fn test_putting_to_sea_spawns_one_encounter() {
    let mut engine = engine();
    engine.queue_command(PlayerCommand::StartGame);
    let report = engine.tick(&idle(), FIXED_DT);

    assert_eq!(report.commands.len(), 1);
    assert_eq!(report.snapshot.ships.len(), 1);
    let enemy = &report.snapshot.ships[0];
    assert!(enemy.is_enemy);
    assert_eq!(enemy.id, ShipId(1));
    let range = report
        .snapshot
        .player_ship
        .position
        .horizontal_range_to(&enemy.position);
    assert!(range > ENCOUNTER_MIN_DISTANCE - 1.0 && range < ENCOUNTER_MAX_DISTANCE + 1.0);
    assert!(report
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::EnemySighted { ship_id: ShipId(1), .. })));
    assert!(report.notices.iter().any(|n| n.level == AlertLevel::Warning));

    // Staying at sea does not spawn another.
    let report = engine.tick(&idle(), FIXED_DT);
    assert_eq!(report.snapshot.ships.len(), 1);
}

#[test]
fn test_restart_matches_fresh_engine() {
    let mut engine = engine();
    engine.queue_command(PlayerCommand::StartGame);
    for _ in 0..20 {
        engine.tick(&FrameInput { forward: true, fire: true, ..Default::default() }, FIXED_DT);
    }
    assert_eq!(engine.apply(PlayerCommand::RestartGame), CommandOutcome::Applied);
    assert_eq!(engine.snapshot(), SimulationEngine::new(SimConfig::default()).snapshot());
}

#[test]
fn test_snapshot_round_trip_through_engine() {
    let mut engine = engine();
    engine.queue_command(PlayerCommand::StartGame);
    for i in 0..45 {
        let input = FrameInput {
            forward: true,
            fire: i == 10,
            ..Default::default()
        };
        engine.tick(&input, FIXED_DT);
    }
    let snap = engine.snapshot();
    let restored = SimulationEngine::from_snapshot(&snap, SimConfig::default());
    assert_eq!(restored.snapshot(), snap);
}

// ---- Input handling ----

#[test]
fn test_toggles_are_edge_triggered() {
    let mut engine = at_sea(|_| {});
    let start = engine.snapshot().camera_mode;
    let toggles = FrameInput {
        toggle_camera: true,
        toggle_map: true,
        ..Default::default()
    };

    for _ in 0..3 {
        engine.tick(&toggles, FIXED_DT);
    }
    let snap = engine.snapshot();
    assert_eq!(snap.camera_mode, start.toggled());
    assert!(snap.strategic_overlay_open);

    engine.tick(&idle(), FIXED_DT);
    let snap = engine.tick(&toggles, FIXED_DT).snapshot;
    assert_eq!(snap.camera_mode, start);
    assert!(!snap.strategic_overlay_open);
}

#[test]
fn test_escape_pauses_and_resumes() {
    let mut engine = at_sea(|_| {});
    let escape = FrameInput {
        escape: true,
        ..Default::default()
    };

    let report = engine.tick(&escape, FIXED_DT);
    assert_eq!(report.snapshot.mode, GameMode::Menu);
    assert_eq!(report.steps, 0);
    let clock = report.snapshot.time;

    // Holding the key does nothing more; the clock stays frozen.
    let report = engine.tick(&escape, FIXED_DT);
    assert_eq!(report.snapshot.mode, GameMode::Menu);
    assert_eq!(report.snapshot.time, clock);

    engine.tick(&idle(), FIXED_DT);
    let report = engine.tick(&escape, FIXED_DT);
    assert_eq!(report.snapshot.mode, GameMode::Sailing);
    assert_eq!(report.steps, 1);
}

#[test]
fn test_escape_in_fresh_menu_stays_in_menu() {
    let mut engine = engine();
    let escape = FrameInput {
        escape: true,
        ..Default::default()
    };
    assert_eq!(engine.tick(&escape, FIXED_DT).snapshot.mode, GameMode::Menu);
}

// ---- Stepping ----

#[test]
fn test_variable_step_runs_one_frame_length_step() {
    let mut engine = at_sea(|_| {});
    let report = engine.tick(&idle(), 0.25);
    assert_eq!(report.steps, 1);
    assert_eq!(report.snapshot.time.tick, 1);
    assert_eq!(report.snapshot.time.elapsed_secs, 0.25);
}

#[test]
fn test_fixed_step_caps_catch_up() {
    let fixed = SimConfig {
        fixed_step: true,
        ..Default::default()
    };
    let mut engine = at_sea_with(fixed.clone(), |_| {});
    assert_eq!(engine.tick(&idle(), 1.0).steps, MAX_CATCH_UP_STEPS);
    assert_eq!(engine.time().tick, u64::from(MAX_CATCH_UP_STEPS));

    let mut engine = at_sea_with(fixed, |_| {});
    assert_eq!(engine.tick(&idle(), FIXED_DT * 0.5).steps, 0);
    assert_eq!(engine.tick(&idle(), FIXED_DT * 0.6).steps, 1);
}

#[test]
fn test_menu_does_not_advance_clock() {
    let mut engine = engine();
    let report = engine.tick(&FrameInput { forward: true, ..Default::default() }, 1.0);
    assert_eq!(report.steps, 0);
    assert_eq!(report.snapshot.time.tick, 0);
    assert_eq!(
        Some(report.snapshot.player_ship.position),
        location_position(HOME_LOCATION)
    );
}

// ---- Helm ----

#[test]
fn test_helm_forward_drift_and_reverse() {
    let mut pos = Position::default();
    let mut heading = Heading(0.0);

    let forward = FrameInput {
        forward: true,
        ..Default::default()
    };
    helm::steer(&mut pos, &mut heading, 8.0, &forward, 0.5);
    assert!((pos.z - 4.0).abs() < 1e-12);

    helm::steer(&mut pos, &mut heading, 8.0, &idle(), 0.5);
    assert!((pos.z - 4.8).abs() < 1e-12);

    let reverse = FrameInput {
        backward: true,
        ..Default::default()
    };
    helm::steer(&mut pos, &mut heading, 8.0, &reverse, 0.5);
    assert!((pos.z - 4.0).abs() < 1e-12);
    assert!(pos.x.abs() < 1e-12);

    let starboard = FrameInput {
        right: true,
        ..Default::default()
    };
    helm::steer(&mut pos, &mut heading, 0.0, &starboard, 0.5);
    assert!((heading.0 - TURN_RATE * 0.5).abs() < 1e-12);
}

// ---- Gunnery ----

#[test]
fn test_directed_shot_spawns_ahead_and_spends_ammo() {
    let mut engine = at_sea(|_| {});
    assert_eq!(
        engine.apply(PlayerCommand::FireDirected),
        CommandOutcome::Fire(FireOutcome::Fired { shots: 1 })
    );

    let snap = engine.snapshot();
    assert_eq!(snap.player.supplies.ammunition, 99);
    assert_eq!(snap.cannonballs.len(), 1);
    let ball = &snap.cannonballs[0];
    assert_eq!(
        ball.position,
        Position::new(0.0, DIRECTED_MUZZLE_HEIGHT, DIRECTED_MUZZLE_OFFSET)
    );
    assert_eq!(ball.velocity, Velocity::new(0.0, 0.0, DIRECTED_SHOT_SPEED));
    assert_eq!(ball.damage, DIRECTED_SHOT_DAMAGE);
    assert_eq!(ball.shooter, ShipId::PLAYER);
    assert_eq!(snap.player_ship.last_fired, Some(0.0));
}

#[test]
fn test_directed_shot_cooldown() {
    let mut engine = at_sea(|_| {});
    engine.apply(PlayerCommand::FireDirected);
    assert_eq!(
        engine.apply(PlayerCommand::FireDirected),
        CommandOutcome::Fire(FireOutcome::RejectedCooldown {
            remaining_secs: DIRECTED_COOLDOWN_SECS
        })
    );
    let snap = engine.snapshot();
    assert_eq!(snap.player.supplies.ammunition, 99);
    assert_eq!(snap.cannonballs.len(), 1);

    engine.tick(&idle(), 1.0);
    engine.tick(&idle(), 1.0);
    assert_eq!(
        engine.apply(PlayerCommand::FireDirected),
        CommandOutcome::Fire(FireOutcome::Fired { shots: 1 })
    );
}

#[test]
fn test_broadside_fires_half_the_guns_per_side() {
    let mut engine = at_sea(|_| {});
    let port = PlayerCommand::FireBroadside {
        side: BroadsideSide::Port,
    };
    assert_eq!(
        engine.apply(port.clone()),
        CommandOutcome::Fire(FireOutcome::Fired { shots: 4 })
    );
    let snap = engine.snapshot();
    assert_eq!(snap.player.supplies.ammunition, 96);
    assert_eq!(snap.cannonballs.len(), 4);
    assert_eq!(snap.player_ship.last_fired_port, Some(0.0));
    assert_eq!(snap.player_ship.last_fired_starboard, None);

    assert_eq!(
        engine.apply(port),
        CommandOutcome::Fire(FireOutcome::RejectedCooldown {
            remaining_secs: BROADSIDE_COOLDOWN_SECS
        })
    );
    // Each side reloads independently.
    assert_eq!(
        engine.apply(PlayerCommand::FireBroadside {
            side: BroadsideSide::Starboard
        }),
        CommandOutcome::Fire(FireOutcome::Fired { shots: 4 })
    );
    assert_eq!(engine.snapshot().player.supplies.ammunition, 92);
}

#[test]
fn test_broadside_short_of_ammo_changes_nothing() {
    let mut engine = at_sea(|snap| snap.player.supplies.ammunition = 3);
    assert_eq!(
        engine.apply(PlayerCommand::FireBroadside {
            side: BroadsideSide::Port
        }),
        CommandOutcome::Fire(FireOutcome::RejectedNoAmmo {
            needed: 4,
            available: 3
        })
    );
    let snap = engine.snapshot();
    assert_eq!(snap.player.supplies.ammunition, 3);
    assert!(snap.cannonballs.is_empty());
    assert_eq!(snap.player_ship.last_fired_port, None);
}

#[test]
fn test_broadside_shot_count() {
    use crate::systems::gunnery::broadside_shots;
    assert_eq!(broadside_shots(8), 4);
    assert_eq!(broadside_shots(7), 3);
    assert_eq!(broadside_shots(1), 1);
    assert_eq!(broadside_shots(0), 1);
}

#[test]
fn test_guns_ignored_off_the_water() {
    let mut engine = engine();
    assert_eq!(engine.apply(PlayerCommand::FireDirected), CommandOutcome::Ignored);
    assert_eq!(
        engine.apply(PlayerCommand::Board { target: ShipId(1) }),
        CommandOutcome::Ignored
    );
}

#[test]
fn test_fire_key_picks_broadside_side() {
    let mut engine = at_sea(|snap| snap.ships.push(hostile(1, Position::new(10.0, 0.0, 0.0))));
    let report = engine.tick(&FrameInput { fire: true, ..Default::default() }, FIXED_DT);
    assert_eq!(
        report.shots,
        vec![(
            Gun::Broadside(BroadsideSide::Starboard),
            FireOutcome::Fired { shots: 4 }
        )]
    );
    assert_eq!(report.snapshot.player.supplies.ammunition, 96);
}

#[test]
fn test_fire_key_uses_bow_gun_without_close_target() {
    let mut engine = at_sea(|snap| snap.ships.push(hostile(1, Position::new(0.0, 0.0, 40.0))));
    let report = engine.tick(&FrameInput { fire: true, ..Default::default() }, FIXED_DT);
    assert_eq!(report.shots, vec![(Gun::Bow, FireOutcome::Fired { shots: 1 })]);
}

#[test]
fn test_fire_key_with_empty_magazine_does_nothing() {
    let mut engine = at_sea(|snap| snap.player.supplies.ammunition = 0);
    let report = engine.tick(&FrameInput { fire: true, ..Default::default() }, FIXED_DT);
    assert!(report.shots.is_empty());
    assert!(report.snapshot.cannonballs.is_empty());
}

#[test]
fn test_enemy_broadside_does_not_spend_player_ammo() {
    let mut engine = at_sea(|snap| {
        let mut enemy = hostile(1, Position::new(0.0, 0.0, 20.0));
        // Heading -x puts the player on the port beam.
        enemy.rotation = 3.0 * std::f64::consts::FRAC_PI_2;
        snap.ships.push(enemy);
    });
    let report = engine.tick(&idle(), FIXED_DT);
    assert!(report.events.contains(&GameEvent::CannonFired {
        shooter: ShipId(1),
        side: Some(BroadsideSide::Port),
        shots: 3,
    }));
    assert_eq!(report.snapshot.player.supplies.ammunition, 100);
    assert_eq!(report.snapshot.cannonballs.len(), 3);
    assert!(report.snapshot.cannonballs.iter().all(|b| b.shooter == ShipId(1)));
}

// ---- Ballistics ----

#[test]
fn test_spent_cannonball_rules() {
    let ball = Projectile {
        id: 0,
        damage: DIRECTED_SHOT_DAMAGE,
        shooter: ShipId::PLAYER,
        created_at: 0.0,
        origin: Position::default(),
    };
    assert!(!ballistics::is_spent(&ball, &Position::new(0.0, 1.0, 10.0), 1.0));
    assert!(ballistics::is_spent(&ball, &Position::new(0.0, 1.0, 10.0), CANNONBALL_TTL_SECS));
    assert!(ballistics::is_spent(&ball, &Position::new(0.0, 1.0, CANNONBALL_MAX_RANGE), 1.0));
    // Splashdown grace.
    assert!(!ballistics::is_spent(&ball, &Position::new(0.0, 0.0, 1.0), 0.2));
    assert!(ballistics::is_spent(&ball, &Position::new(0.0, 0.0, 1.0), 0.5));
}

#[test]
fn test_cannonball_falls_and_is_culled() {
    let mut engine = at_sea(|_| {});
    engine.apply(PlayerCommand::FireDirected);

    let snap = engine.tick(&idle(), 0.1).snapshot;
    assert_eq!(snap.cannonballs.len(), 1);
    let ball = &snap.cannonballs[0];
    assert!((ball.position.z - (DIRECTED_MUZZLE_OFFSET + 1.8)).abs() < 1e-9);
    assert!((ball.position.y - (1.0 - CANNONBALL_DROP_RATE * 0.1)).abs() < 1e-9);

    for _ in 0..19 {
        engine.tick(&idle(), 0.1);
    }
    assert!(engine.snapshot().cannonballs.is_empty());
}

// ---- Collision ----

#[test]
fn test_hit_damages_hull_and_consumes_ball() {
    let mut engine = at_sea(|snap| snap.ships.push(hostile(1, Position::new(0.0, 0.0, 5.0))));
    engine.apply(PlayerCommand::FireDirected);
    let report = engine.tick(&idle(), 0.05);

    let enemy = &report.snapshot.ships[0];
    assert_eq!(enemy.health, 150.0 - DIRECTED_SHOT_DAMAGE);
    assert_eq!(enemy.last_hit_at, Some(0.05));
    assert!(report.snapshot.cannonballs.is_empty());
    assert!(report.events.iter().any(|e| matches!(
        e,
        GameEvent::Hit {
            shooter: ShipId::PLAYER,
            target: ShipId(1),
            ..
        }
    )));
    // Still above the first callout threshold.
    assert!(report.notices.iter().all(|n| n.level != AlertLevel::Info));
}

#[test]
fn test_damage_callout_on_threshold() {
    let mut engine = at_sea(|snap| {
        let mut enemy = hostile(1, Position::new(0.0, 0.0, 5.0));
        enemy.health = 110.0;
        snap.ships.push(enemy);
    });
    engine.apply(PlayerCommand::FireDirected);
    let report = engine.tick(&idle(), 0.05);
    assert!(report
        .notices
        .iter()
        .any(|n| n.level == AlertLevel::Info && n.message == "Enemy hull struck!"));
}

#[test]
fn test_collision_pass_counts_each_wreck_once() {
    let mut world = World::new();
    world_setup::spawn_ship(&mut world, &world_setup::player_ship_record());
    let mut enemy = hostile(1, Position::new(30.0, 0.0, 0.0));
    enemy.health = 10.0;
    world_setup::spawn_ship(&mut world, &enemy);
    for id in 0..2 {
        world_setup::spawn_cannonball(
            &mut world,
            &CannonballRecord {
                id,
                position: Position::new(30.5, 1.0, 0.0),
                velocity: Velocity::default(),
                damage: DIRECTED_SHOT_DAMAGE,
                shooter: ShipId::PLAYER,
                created_at: 0.0,
                origin: Position::new(0.0, 1.0, 0.0),
            },
        );
    }

    let mut ledger = world_setup::initial_ledger();
    let mut feedback = Feedback::default();
    let mut despawn = Vec::new();
    let summary = collision::run(&mut world, &mut ledger, 1.0, &mut feedback, &mut despawn);

    assert_eq!(summary.hits, 1);
    assert_eq!(summary.sunk, 1);
    assert!(!summary.player_sunk);
    assert!(world_setup::find_ship(&world, ShipId(1)).is_none());
    // The second ball found nothing afloat and flies on.
    assert_eq!(world.query::<&Projectile>().iter().count(), 1);
}

fn sink_scenario(with_marque: bool) -> (ShipRecord, TickReport) {
    let enemy = {
        let mut enemy = hostile(1, Position::new(0.0, 0.0, 5.0));
        enemy.health = 1.0;
        enemy
    };
    let prize = enemy.clone();
    let mut engine = at_sea(|snap| {
        snap.ships.push(enemy);
        if with_marque {
            snap.player.letters_of_marque.insert(Faction::Spanish);
        }
    });
    engine.apply(PlayerCommand::FireDirected);
    (prize, engine.tick(&idle(), 0.05))
}

#[test]
fn test_sinking_without_marque_pays_gold_and_infamy() {
    let (prize, report) = sink_scenario(false);
    let snap = &report.snapshot;

    assert!(snap.ships.is_empty());
    assert!(report.events.contains(&GameEvent::ShipSunk {
        ship_id: ShipId(1),
        by: ShipId::PLAYER,
    }));
    assert_eq!(snap.player.gold, 1000 + SINK_GOLD_REWARD);
    assert_eq!(snap.player.reputation, SINK_REPUTATION_NO_MARQUE);
    assert_eq!(snap.player.infamy, SINK_INFAMY_NO_MARQUE);
    assert_eq!(snap.player.supplies.food, 50 + prize.cargo.food);
    assert_eq!(snap.player.supplies.rum, 30 + prize.cargo.rum);
    assert_eq!(snap.player.supplies.ammunition, 99 + prize.cargo.ammunition);
    assert_eq!(snap.player_ship.cargo.treasure, prize.cargo.treasure);
    assert!(report.notices.iter().any(|n| n.level == AlertLevel::Success));
}

#[test]
fn test_sinking_with_marque_is_lawful() {
    let (_, report) = sink_scenario(true);
    let snap = &report.snapshot;
    assert_eq!(snap.player.gold, 1000 + SINK_GOLD_REWARD);
    assert_eq!(snap.player.reputation, SINK_REPUTATION_MARQUE);
    assert_eq!(snap.player.infamy, SINK_INFAMY_MARQUE);
}

#[test]
fn test_player_sunk_ends_game() {
    let mut engine = at_sea(|snap| {
        snap.player_ship.health = 5.0;
        let at = Position::new(0.0, 0.5, 0.5);
        snap.cannonballs.push(CannonballRecord {
            id: 0,
            position: at,
            velocity: Velocity::default(),
            damage: BROADSIDE_SHOT_DAMAGE,
            shooter: ShipId(1),
            created_at: 0.0,
            origin: at,
        });
    });
    let report = engine.tick(&idle(), FIXED_DT);
    assert!(report.events.contains(&GameEvent::PlayerSunk));
    assert_eq!(report.snapshot.mode, GameMode::GameOver);
    assert_eq!(report.snapshot.player_ship.health, 0.0);
    assert!(report.notices.iter().any(|n| n.level == AlertLevel::Error));

    let clock = report.snapshot.time;
    let report = engine.tick(&idle(), FIXED_DT);
    assert_eq!(report.steps, 0);
    assert_eq!(report.snapshot.time, clock);
}

// ---- Boarding ----

fn board(engine: &mut SimulationEngine, target: u32) -> BoardingOutcome {
    match engine.apply(PlayerCommand::Board {
        target: ShipId(target),
    }) {
        CommandOutcome::Boarding(outcome) => outcome,
        other => panic!("expected a boarding outcome, got {other:?}"),
    }
}

#[test]
fn test_boarding_captures_weaker_crew() {
    let enemy = hostile(1, Position::new(0.0, 0.0, 2.0));
    let loot = enemy.cargo;
    let mut engine = at_sea(|snap| snap.ships.push(enemy));

    assert_eq!(
        board(&mut engine, 1),
        BoardingOutcome::Captured { ship_id: ShipId(1) }
    );
    let snap = engine.snapshot();
    assert!(snap.ships.is_empty());
    assert_eq!(snap.player.captured_ships.len(), 1);
    let prize = &snap.player.captured_ships[0];
    assert_eq!(prize.id, ShipId(1));
    assert!(!prize.is_enemy);
    assert_eq!(prize.cargo, Cargo::default());
    assert_eq!(snap.player.gold, 1000 + CAPTURE_GOLD_REWARD);
    assert_eq!(snap.player.reputation, CAPTURE_REPUTATION_NO_MARQUE);
    assert_eq!(snap.player.infamy, CAPTURE_INFAMY_NO_MARQUE);
    assert_eq!(snap.player.supplies.food, 50 + loot.food);
    assert_eq!(snap.player_ship.cargo.treasure, loot.treasure);
}

#[test]
fn test_boarding_repelled_costs_crew_and_morale() {
    let mut engine = at_sea(|snap| {
        snap.player_ship.crew = 10;
        snap.player_ship.morale = 50.0;
        snap.ships.push(hostile(1, Position::new(0.0, 0.0, 2.0)));
    });
    assert_eq!(
        board(&mut engine, 1),
        BoardingOutcome::Repelled {
            crew_lost: 5,
            morale_lost: 20.0
        }
    );
    let snap = engine.snapshot();
    assert_eq!(snap.player_ship.crew, 5);
    assert_eq!(snap.player_ship.morale, 30.0);
    assert_eq!(snap.ships.len(), 1);
}

#[test]
fn test_boarding_losses_floor() {
    let mut engine = at_sea(|snap| {
        snap.player_ship.crew = 4;
        snap.player_ship.morale = 25.0;
        snap.ships.push(hostile(1, Position::new(0.0, 0.0, 2.0)));
    });
    assert_eq!(
        board(&mut engine, 1),
        BoardingOutcome::Repelled {
            crew_lost: 3,
            morale_lost: 15.0
        }
    );
    let snap = engine.snapshot();
    assert_eq!(snap.player_ship.crew, BOARDING_MIN_CREW);
    assert_eq!(snap.player_ship.morale, BOARDING_MIN_MORALE);
}

#[test]
fn test_boarding_tie_goes_to_defender() {
    let mut engine = at_sea(|snap| {
        snap.player_ship.crew = 18;
        snap.player_ship.morale = 60.0;
        snap.ships.push(hostile(1, Position::new(0.0, 0.0, 2.0)));
    });
    assert!(matches!(board(&mut engine, 1), BoardingOutcome::Repelled { .. }));
}

#[test]
fn test_boarding_range_and_unknown_targets() {
    let mut engine = at_sea(|snap| snap.ships.push(hostile(1, Position::new(0.0, 0.0, 3.0))));
    assert_eq!(
        board(&mut engine, 1),
        BoardingOutcome::OutOfRange { distance: 3.0 }
    );
    assert_eq!(board(&mut engine, 9), BoardingOutcome::UnknownShip);
    assert_eq!(board(&mut engine, 0), BoardingOutcome::UnknownShip);
}

#[test]
fn test_board_key_boards_adjacent_enemy() {
    let mut engine = at_sea(|snap| snap.ships.push(hostile(1, Position::new(0.0, 0.0, 2.0))));
    let report = engine.tick(&FrameInput { board: true, ..Default::default() }, FIXED_DT);
    assert_eq!(report.commands.len(), 1);
    let result = &report.commands[0];
    assert!(matches!(result.command, PlayerCommand::Board { target: ShipId(1) }));
    assert_eq!(
        result.outcome,
        CommandOutcome::Boarding(BoardingOutcome::Captured { ship_id: ShipId(1) })
    );
}

#[test]
fn test_board_key_docks_near_port() {
    let mut engine = at_sea(|snap| {
        let port = snap.ports[2].position;
        snap.player_ship.position = Position::new(port.x + 1.0, 0.0, port.z);
    });
    let report = engine.tick(&FrameInput { board: true, ..Default::default() }, FIXED_DT);
    assert_eq!(report.snapshot.mode, GameMode::Port);
    assert_eq!(report.snapshot.current_port.as_deref(), Some("port_2"));
    assert!(report
        .events
        .contains(&GameEvent::PortEntered { port_id: "port_2".into() }));
}

// ---- Enemy AI ----

#[test]
fn test_enemy_closes_on_player() {
    let mut engine = at_sea(|snap| snap.ships.push(hostile(1, Position::new(0.0, 0.0, 26.0))));
    let report = engine.tick(&idle(), 1.0);
    let enemy = &report.snapshot.ships[0];
    assert!(enemy.position.horizontal_range_to(&Position::new(0.0, 0.0, 20.0)) < 1e-9);
    assert!((enemy.rotation.abs() - std::f64::consts::PI).abs() < 1e-9);
}

#[test]
fn test_fleeing_enemy_loses_morale() {
    let mut engine = at_sea(|snap| {
        let mut enemy = hostile(1, Position::new(0.0, 0.0, 10.0));
        enemy.morale = 20.0;
        snap.ships.push(enemy);
    });
    let report = engine.tick(&idle(), 0.5);
    let enemy = &report.snapshot.ships[0];
    assert!(enemy.position.z > 10.0);
    assert!((enemy.morale - (20.0 - AI_FLEE_MORALE_COST)).abs() < 1e-12);
}

// ---- Upkeep ----

fn crew_world(count: u32, morale: f64) -> World {
    let mut world = World::new();
    let mut record = world_setup::player_ship_record();
    record.crew = count;
    record.morale = morale;
    world_setup::spawn_ship(&mut world, &record);
    world
}

fn player_crew(world: &World) -> Crew {
    let mut query = world.query::<(&PlayerShip, &Crew)>();
    query.iter().next().map(|(_, (_, crew))| *crew).unwrap()
}

#[test]
fn test_daily_rations_round_up() {
    assert_eq!(upkeep::daily_rations(30), (6, 3));
    assert_eq!(upkeep::daily_rations(31), (7, 4));
    assert_eq!(upkeep::daily_rations(0), (0, 0));
}

#[test]
fn test_fed_crew_gains_morale() {
    let mut world = crew_world(30, 80.0);
    let mut supplies = Supplies {
        food: 50,
        rum: 30,
        ammunition: 0,
    };
    let mut feedback = Feedback::default();
    let report = upkeep::apply(&mut world, &mut supplies, &mut StepRng::new(0, 0), &mut feedback).unwrap();

    assert_eq!(report.food_consumed, 6);
    assert_eq!(report.rum_consumed, 3);
    assert_eq!(report.morale_delta, RATIONS_MORALE + RUM_MORALE);
    assert_eq!(report.mutiny, None);
    assert_eq!(supplies.food, 44);
    assert_eq!(supplies.rum, 27);
    assert_eq!(player_crew(&world).morale, 83.0);
    assert!(feedback.notices.is_empty());
}

#[test]
fn test_starving_crew_loses_morale() {
    let mut world = crew_world(30, 80.0);
    let mut supplies = Supplies {
        food: 0,
        rum: 30,
        ammunition: 0,
    };
    let mut feedback = Feedback::default();
    let report = upkeep::apply(&mut world, &mut supplies, &mut StepRng::new(0, 0), &mut feedback).unwrap();

    assert_eq!(report.morale_delta, STARVATION_MORALE + RUM_MORALE);
    assert_eq!(player_crew(&world).morale, 76.0);
    assert_eq!(supplies.food, 0);
    assert_eq!(supplies.rum, 27);
    assert!(feedback
        .notices
        .iter()
        .any(|n| n.level == AlertLevel::Warning && n.message == "The crew goes hungry"));
}

#[test]
fn test_mutiny_at_rock_bottom_morale() {
    let mut world = crew_world(30, 3.0);
    let mut supplies = Supplies::default();
    let mut feedback = Feedback::default();
    // A zero roll always mutinies.
    let report = upkeep::apply(&mut world, &mut supplies, &mut StepRng::new(0, 0), &mut feedback).unwrap();

    assert_eq!(report.mutiny, Some(3));
    let crew = player_crew(&world);
    assert_eq!(crew.count, 27);
    assert_eq!(crew.morale, MUTINY_MORALE_RESET);
    assert!(feedback.events.contains(&GameEvent::Mutiny { crew_lost: 3 }));
}

#[test]
fn test_no_mutiny_on_high_roll() {
    let mut world = crew_world(30, 3.0);
    let mut supplies = Supplies::default();
    let mut feedback = Feedback::default();
    let report = upkeep::apply(
        &mut world,
        &mut supplies,
        &mut StepRng::new(u64::MAX, 0),
        &mut feedback,
    )
    .unwrap();

    assert_eq!(report.mutiny, None);
    let crew = player_crew(&world);
    assert_eq!(crew.count, 30);
    assert_eq!(crew.morale, 0.0);
}

#[test]
fn test_dawn_runs_upkeep() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut session = Session::new(&mut rng);
    let mut world = crew_world(30, 80.0);
    let mut feedback = Feedback::default();

    ambient::set_time_of_day(&mut world, &mut session, TimeOfDay::Dusk, &mut rng, &mut feedback);
    assert_eq!(session.ledger.supplies.food, 50);

    ambient::set_time_of_day(&mut world, &mut session, TimeOfDay::Dawn, &mut rng, &mut feedback);
    assert_eq!(session.time_of_day, TimeOfDay::Dawn);
    assert_eq!(session.ledger.supplies.food, 44);
    assert!(feedback.events.contains(&GameEvent::TimeOfDayChanged {
        time_of_day: TimeOfDay::Dawn
    }));
}

// ---- Voyages ----

#[test]
fn test_sail_to_charts_route_from_nearest_port() {
    let mut engine = engine();
    assert_eq!(
        engine.apply(PlayerCommand::SailTo {
            destination: "tortuga".into()
        }),
        CommandOutcome::Ignored
    );

    engine.apply(PlayerCommand::SetMode { mode: GameMode::Map });
    let outcome = engine.apply(PlayerCommand::SailTo {
        destination: "tortuga".into(),
    });
    match outcome {
        CommandOutcome::Sail(SailOutcome::Departed {
            origin,
            nautical_miles,
            days,
            ..
        }) => {
            assert_eq!(origin, "port_royal");
            assert_eq!(nautical_miles, 120.0);
            assert!(days >= 1);
        }
        other => panic!("expected departure, got {other:?}"),
    }
    assert_eq!(
        engine.apply(PlayerCommand::SailTo {
            destination: "nassau".into()
        }),
        CommandOutcome::Sail(SailOutcome::AlreadySailing)
    );
}

#[test]
fn test_sail_to_unknown_destination() {
    let mut engine = engine();
    engine.apply(PlayerCommand::SetMode { mode: GameMode::Map });
    assert_eq!(
        engine.apply(PlayerCommand::SailTo {
            destination: "atlantis".into()
        }),
        CommandOutcome::Sail(SailOutcome::UnknownDestination)
    );
    assert!(!engine.snapshot().voyage.is_sailing);
}

#[test]
fn test_voyage_progresses_to_arrival() {
    let mut engine = engine();
    engine.apply(PlayerCommand::SetMode { mode: GameMode::Map });
    let days = match engine.apply(PlayerCommand::SailTo {
        destination: "tortuga".into(),
    }) {
        CommandOutcome::Sail(SailOutcome::Departed { days, .. }) => days,
        other => panic!("expected departure, got {other:?}"),
    };

    let mut last_progress = 0.0;
    let mut days_advanced = 0;
    let mut arrivals = 0;
    for _ in 0..10_000 {
        let report = engine.tick(&idle(), 0.5);
        days_advanced += report
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::DayAdvanced { .. }))
            .count();
        arrivals += report
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Arrived { .. }))
            .count();
        let voyage = &report.snapshot.voyage;
        if !voyage.is_sailing {
            break;
        }
        assert!(voyage.progress >= last_progress);
        assert!(voyage.progress <= 1.0);
        last_progress = voyage.progress;
    }

    let snap = engine.snapshot();
    assert_eq!(arrivals, 1);
    assert_eq!(days_advanced, days as usize);
    assert_eq!(snap.date, advance_date(START_DATE, days));
    assert_eq!(Some(snap.player_ship.position), location_position("tortuga"));
    assert_eq!(snap.voyage.progress, 0.0);
    assert_eq!(snap.voyage.destination, None);
}

#[test]
fn test_voyage_only_advances_on_map() {
    let mut engine = engine();
    engine.apply(PlayerCommand::SetMode { mode: GameMode::Map });
    engine.apply(PlayerCommand::SailTo {
        destination: "tortuga".into(),
    });
    engine.tick(&idle(), 0.5);
    let progress = engine.snapshot().voyage.progress;
    assert!(progress > 0.0);

    engine.apply(PlayerCommand::SetMode { mode: GameMode::Trading });
    engine.tick(&idle(), 0.5);
    assert_eq!(engine.snapshot().voyage.progress, progress);
}

#[test]
fn test_voyage_arrival_step_reports_full_progress() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut session = Session::new(&mut rng);
    let mut world = World::new();
    world_setup::spawn_ship(&mut world, &world_setup::player_ship_record());
    let mut feedback = Feedback::default();

    assert_eq!(
        voyage::advance(&mut world, &mut session, &mut rng, 1.0, &mut feedback),
        None
    );

    let end = Position::new(30.0, 0.0, -40.0);
    session.voyage = VoyageState {
        is_sailing: true,
        progress: 0.9,
        duration_days: 1,
        destination: Some("nassau".into()),
        start: Position::default(),
        end,
    };
    let step = voyage::advance(&mut world, &mut session, &mut rng, 10.0, &mut feedback).unwrap();
    assert_eq!(step.progress, 1.0);
    assert_eq!(step.days_elapsed, 1);
    assert!(step.arrived);
    assert!(!session.voyage.is_sailing);
    assert_eq!(session.voyage.progress, 0.0);
    assert_eq!(session.date, advance_date(START_DATE, 1));
    let player = world_setup::find_player(&world).unwrap();
    assert_eq!(*world.get::<&Position>(player).unwrap(), end);
}

#[test]
fn test_voyage_line_is_exact_at_ends() {
    let voyage = VoyageState {
        is_sailing: true,
        progress: 0.0,
        duration_days: 4,
        destination: None,
        start: Position::new(-13.7, 0.0, 42.1),
        end: Position::new(91.3, 0.0, -7.9),
    };
    assert_eq!(voyage::position_at(&voyage, 0.0), voyage.start);
    assert_eq!(voyage::position_at(&voyage, 1.0), voyage.end);
    let mid = voyage::position_at(&voyage, 0.5);
    assert!((mid.x - 38.8).abs() < 1e-9);
    assert!((mid.z - 17.1).abs() < 1e-9);
}

// ---- Port economy ----

#[test]
fn test_enter_and_exit_port() {
    let mut engine = at_sea(|_| {});
    assert_eq!(
        trade(engine.apply(PlayerCommand::EnterPort {
            port_id: "port_99".into()
        })),
        TradeOutcome::UnknownItem
    );
    assert_eq!(engine.mode(), GameMode::Sailing);
    assert_eq!(
        trade(engine.apply(PlayerCommand::ExitPort)),
        TradeOutcome::NotInPort
    );

    assert_eq!(
        trade(engine.apply(PlayerCommand::EnterPort {
            port_id: "port_0".into()
        })),
        TradeOutcome::Completed { gold_delta: 0 }
    );
    assert_eq!(engine.mode(), GameMode::Port);
    assert_eq!(engine.session().current_port.as_deref(), Some("port_0"));

    assert_eq!(engine.apply(PlayerCommand::ExitPort), CommandOutcome::Applied);
    assert_eq!(engine.mode(), GameMode::Sailing);
    assert_eq!(engine.session().current_port, None);
}

#[test]
fn test_buy_supplies() {
    let mut engine = at_sea(|_| {});
    let buy_food = |amount| PlayerCommand::BuySupplies {
        kind: SupplyKind::Food,
        amount,
    };
    assert_eq!(trade(engine.apply(buy_food(10))), TradeOutcome::NotInPort);

    let mut engine = docked(|_| {});
    let price = engine.snapshot().ports[0].prices.food;
    assert_eq!(
        trade(engine.apply(buy_food(10))),
        TradeOutcome::Completed {
            gold_delta: -10 * price
        }
    );
    assert_eq!(engine.ledger().supplies.food, 60);
    assert_eq!(engine.ledger().gold, 1000 - 10 * price);

    let gold = engine.ledger().gold;
    assert_eq!(
        trade(engine.apply(buy_food(1000))),
        TradeOutcome::InsufficientGold {
            needed: 1000 * price,
            available: gold
        }
    );
    assert_eq!(engine.ledger().supplies.food, 60);
    assert_eq!(trade(engine.apply(buy_food(0))), TradeOutcome::Nothing);
}

#[test]
fn test_sell_treasure() {
    let mut engine = docked(|_| {});
    assert_eq!(
        trade(engine.apply(PlayerCommand::SellTreasure { amount: 10 })),
        TradeOutcome::Nothing
    );

    let mut engine = docked(|snap| snap.player_ship.cargo.treasure = 5);
    assert_eq!(
        trade(engine.apply(PlayerCommand::SellTreasure { amount: 10 })),
        TradeOutcome::Completed { gold_delta: 50 }
    );
    assert_eq!(engine.snapshot().player_ship.cargo.treasure, 0);
    assert_eq!(engine.ledger().gold, 1050);
}

#[test]
fn test_buy_goods_respects_hold() {
    let mut engine = at_sea(|_| {});
    let buy = |good: &str, quantity| PlayerCommand::BuyGoods {
        good_id: good.into(),
        quantity,
        price: 1,
    };
    assert_eq!(
        trade(engine.apply(buy("sugar", 81))),
        TradeOutcome::InsufficientCargoSpace {
            needed: 81,
            free: 80
        }
    );
    assert_eq!(
        trade(engine.apply(buy("sugar", 70))),
        TradeOutcome::Completed { gold_delta: -70 }
    );
    assert_eq!(
        trade(engine.apply(buy("spices", 10))),
        TradeOutcome::Completed { gold_delta: -10 }
    );

    let hold = &engine.ledger().cargo;
    assert_eq!(hold.current, 100);
    assert_eq!(hold.quantity_of("sugar"), 80);
    assert_eq!(hold.quantity_of("spices"), 10);
    assert_eq!(hold.free_space(), 0);
}

#[test]
fn test_buy_goods_rejects_free_or_oversized_lots() {
    let mut engine = at_sea(|_| {});
    let before = engine.ledger().clone();
    let buy = |quantity, price| PlayerCommand::BuyGoods {
        good_id: "sugar".into(),
        quantity,
        price,
    };

    assert_eq!(
        trade(engine.apply(buy(u32::MAX, 1))),
        TradeOutcome::InsufficientCargoSpace {
            needed: u32::MAX,
            free: 80
        }
    );
    assert_eq!(trade(engine.apply(buy(u32::MAX, 0))), TradeOutcome::Nothing);
    assert_eq!(trade(engine.apply(buy(1, -5000))), TradeOutcome::Nothing);
    assert_eq!(trade(engine.apply(buy(0, 10))), TradeOutcome::Nothing);
    assert_eq!(
        trade(engine.apply(buy(80, i64::MAX))),
        TradeOutcome::InsufficientGold {
            needed: i64::MAX,
            available: 1000
        }
    );

    assert_eq!(engine.ledger(), &before);
}

#[test]
fn test_sell_goods() {
    let mut engine = at_sea(|_| {});
    let sell = |good: &str, quantity| PlayerCommand::SellGoods {
        good_id: good.into(),
        quantity,
    };
    assert_eq!(
        trade(engine.apply(sell("rum", 5))),
        TradeOutcome::Completed { gold_delta: 90 }
    );
    assert_eq!(
        trade(engine.apply(sell("rum", 6))),
        TradeOutcome::NotHeld {
            requested: 6,
            held: 5
        }
    );
    assert_eq!(
        trade(engine.apply(sell("rum", 5))),
        TradeOutcome::Completed { gold_delta: 90 }
    );
    assert_eq!(
        trade(engine.apply(sell("silk", 1))),
        TradeOutcome::NotHeld {
            requested: 1,
            held: 0
        }
    );

    let ledger = engine.ledger();
    assert!(ledger.cargo.goods.iter().all(|g| g.id != "rum"));
    assert_eq!(ledger.cargo.current, 10);
    assert_eq!(ledger.gold, 1180);
}

#[test]
fn test_repair_ship() {
    let mut engine = docked(|snap| snap.player_ship.health = 200.0);
    assert_eq!(
        trade(engine.apply(PlayerCommand::RepairShip)),
        TradeOutcome::Completed { gold_delta: -100 }
    );
    assert_eq!(engine.snapshot().player_ship.health, 250.0);

    let mut engine = docked(|snap| {
        snap.player_ship.health = 200.0;
        snap.player.gold = 50;
    });
    assert_eq!(
        trade(engine.apply(PlayerCommand::RepairShip)),
        TradeOutcome::InsufficientGold {
            needed: 100,
            available: 50
        }
    );
    assert_eq!(engine.snapshot().player_ship.health, 200.0);
}

#[test]
fn test_buy_ship() {
    let mut engine = docked(|snap| {
        snap.player.gold = 20_000;
        snap.player_ship.last_fired_port = Some(0.0);
    });
    let before = engine.snapshot().player_ship;
    assert_eq!(
        trade(engine.apply(PlayerCommand::BuyShip {
            offer: ShipyardOffer::Brigantine
        })),
        TradeOutcome::Completed { gold_delta: -12_000 }
    );

    let snap = engine.snapshot();
    let ship = &snap.player_ship;
    assert_eq!(ship.class, ShipClass::Brigantine);
    assert_eq!(ship.cannons, 16);
    assert_eq!(ship.health, 400.0);
    assert_eq!(ship.max_health, 400.0);
    assert_eq!(ship.crew, 50);
    assert_eq!(ship.max_crew, 80);
    assert_eq!(ship.morale, 80.0);
    assert_eq!(ship.speed, 7.0);
    assert_eq!(ship.max_cargo, 160);
    assert_eq!(ship.last_fired_port, None);
    assert_eq!(ship.position, before.position);
    assert_eq!(snap.player.cargo.max, 160);
    assert_eq!(snap.player.gold, 8_000);

    assert_eq!(
        trade(engine.apply(PlayerCommand::BuyShip {
            offer: ShipyardOffer::Galleon
        })),
        TradeOutcome::InsufficientGold {
            needed: 50_000,
            available: 8_000
        }
    );
}

#[test]
fn test_sell_prize() {
    let mut engine = docked(|snap| {
        let mut prize = hostile(5, Position::default());
        prize.is_enemy = false;
        snap.player.captured_ships.push(prize);
    });
    let sell = PlayerCommand::SellPrize { ship_id: ShipId(5) };
    assert_eq!(
        trade(engine.apply(sell.clone())),
        TradeOutcome::Completed { gold_delta: 1175 }
    );
    assert_eq!(engine.ledger().reputation, PRIZE_REPUTATION_BONUS);
    assert!(engine.ledger().captured_ships.is_empty());
    assert_eq!(trade(engine.apply(sell)), TradeOutcome::UnknownItem);
}

#[test]
fn test_bribe_governor() {
    let mut engine = at_sea(|_| {});
    assert_eq!(
        trade(engine.apply(PlayerCommand::BribeGovernor { amount: 200 })),
        TradeOutcome::NotInPort
    );

    let mut engine = docked(|snap| snap.ports[0].governor.attitude = GovernorAttitude::Hostile);
    let bribes = engine.snapshot().ports[0].governor.bribes;
    assert_eq!(
        trade(engine.apply(PlayerCommand::BribeGovernor { amount: 200 })),
        TradeOutcome::Completed { gold_delta: -200 }
    );
    let governor = &engine.snapshot().ports[0].governor;
    assert_eq!(governor.attitude, GovernorAttitude::Neutral);
    assert_eq!(governor.bribes, bribes + 200);

    assert_eq!(
        trade(engine.apply(PlayerCommand::BribeGovernor { amount: 5000 })),
        TradeOutcome::InsufficientGold {
            needed: 5000,
            available: 800
        }
    );
}

#[test]
fn test_bribe_must_be_positive() {
    let mut engine = docked(|snap| snap.ports[0].governor.attitude = GovernorAttitude::Hostile);
    for amount in [0, -5000] {
        assert_eq!(
            trade(engine.apply(PlayerCommand::BribeGovernor { amount })),
            TradeOutcome::Nothing
        );
    }
    let snap = engine.snapshot();
    assert_eq!(snap.player.gold, 1000);
    assert_eq!(snap.ports[0].governor.attitude, GovernorAttitude::Hostile);
}

#[test]
fn test_letters_of_marque() {
    let mut engine = at_sea(|_| {});
    let buy = |faction| PlayerCommand::PurchaseLetterOfMarque { faction };
    assert_eq!(
        trade(engine.apply(buy(Faction::Pirate))),
        TradeOutcome::UnknownItem
    );
    assert_eq!(
        trade(engine.apply(buy(Faction::English))),
        TradeOutcome::Completed {
            gold_delta: -LETTER_OF_MARQUE_COST
        }
    );
    assert!(engine.ledger().holds_marque_against(Faction::English));
    assert_eq!(
        trade(engine.apply(buy(Faction::Spanish))),
        TradeOutcome::InsufficientGold {
            needed: LETTER_OF_MARQUE_COST,
            available: 0
        }
    );
    assert!(!engine.ledger().holds_marque_against(Faction::Spanish));
}

#[test]
fn test_divide_plunder() {
    let mut engine = at_sea(|snap| snap.player.infamy = 10);
    assert_eq!(
        trade(engine.apply(PlayerCommand::DividePlunder)),
        TradeOutcome::Completed { gold_delta: -150 }
    );
    let snap = engine.snapshot();
    assert_eq!(snap.player.gold, 850);
    assert_eq!(snap.player_ship.morale, 100.0);
    assert_eq!(snap.player.reputation, PLUNDER_REPUTATION_BONUS);
    assert_eq!(snap.player.infamy, 5);
}

#[test]
fn test_divide_plunder_short_purse() {
    let mut engine = at_sea(|snap| snap.player.gold = 100);
    assert_eq!(
        trade(engine.apply(PlayerCommand::DividePlunder)),
        TradeOutcome::Completed { gold_delta: -100 }
    );
    let snap = engine.snapshot();
    assert_eq!(snap.player.gold, 0);
    assert_eq!(snap.player_ship.morale, 80.0);
    assert_eq!(snap.player.reputation, 0);
    assert_eq!(snap.player.infamy, 0);
}

#[test]
fn test_bury_key_buries_once_per_press() {
    let mut engine = at_sea(|_| {});
    let bury = FrameInput {
        bury: true,
        ..Default::default()
    };

    let report = engine.tick(&bury, FIXED_DT);
    assert!(report.events.contains(&GameEvent::TreasureBuried {
        gold: BURY_AMOUNT,
        position: Position::default(),
    }));
    engine.tick(&bury, FIXED_DT);
    let snap = engine.snapshot();
    assert_eq!(snap.player.gold, 900);
    assert_eq!(snap.player.buried_treasure.len(), 1);
    assert_eq!(snap.player.buried_treasure[0].buried, START_DATE);

    engine.tick(&idle(), FIXED_DT);
    engine.tick(&bury, FIXED_DT);
    let snap = engine.snapshot();
    assert_eq!(snap.player.gold, 800);
    assert_eq!(snap.player.buried_treasure[1].id, 1);
}

#[test]
fn test_bury_key_needs_gold() {
    let mut engine = at_sea(|snap| snap.player.gold = 50);
    let report = engine.tick(&FrameInput { bury: true, ..Default::default() }, FIXED_DT);
    assert!(report.commands.is_empty());
    assert!(report.snapshot.player.buried_treasure.is_empty());
    assert_eq!(
        trade(engine.apply(PlayerCommand::BuryTreasure { amount: 0 })),
        TradeOutcome::Nothing
    );
}

// ---- Missions ----

fn mission(id: &str, kind: MissionKind, target: Option<&str>, reward: i64) -> MissionRecord {
    MissionRecord {
        id: id.into(),
        title: format!("Mission {id}"),
        description: String::new(),
        kind,
        origin_port_id: "port_0".into(),
        target_port_id: target.map(str::to_string),
        reward,
        deadline: None,
        status: MissionStatus::Failed,
    }
}

#[test]
fn test_accept_mission() {
    let mut engine = docked(|_| {});
    let accept = PlayerCommand::AcceptMission {
        mission: mission("m1", MissionKind::Combat, None, 500),
    };
    assert_eq!(
        trade(engine.apply(accept.clone())),
        TradeOutcome::Completed { gold_delta: 0 }
    );
    assert_eq!(engine.ledger().missions[0].status, MissionStatus::Active);
    assert_eq!(engine.ledger().reputation, MISSION_ACCEPT_REPUTATION);

    assert_eq!(trade(engine.apply(accept)), TradeOutcome::Nothing);
    assert_eq!(engine.ledger().missions.len(), 1);
}

#[test]
fn test_complete_mission() {
    let mut engine = docked(|_| {});
    engine.apply(PlayerCommand::AcceptMission {
        mission: mission("m1", MissionKind::Combat, None, 500),
    });
    engine.apply(PlayerCommand::AcceptMission {
        mission: mission("m2", MissionKind::Escort, None, 300),
    });
    let complete = |id: &str, success| PlayerCommand::CompleteMission {
        mission_id: id.into(),
        success,
    };

    assert_eq!(
        trade(engine.apply(complete("m1", true))),
        TradeOutcome::Completed { gold_delta: 500 }
    );
    assert_eq!(
        engine.ledger().reputation,
        2 * MISSION_ACCEPT_REPUTATION + MISSION_COMBAT_REPUTATION
    );
    assert_eq!(trade(engine.apply(complete("m1", true))), TradeOutcome::UnknownItem);

    assert_eq!(
        trade(engine.apply(complete("m2", false))),
        TradeOutcome::Completed { gold_delta: 0 }
    );
    let ledger = engine.ledger();
    assert_eq!(ledger.missions[1].status, MissionStatus::Failed);
    assert_eq!(ledger.gold, 1500);
    assert_eq!(trade(engine.apply(complete("m9", true))), TradeOutcome::UnknownItem);
}

#[test]
fn test_delivery_completes_on_docking_at_target() {
    let mut engine = docked(|_| {});
    engine.apply(PlayerCommand::AcceptMission {
        mission: mission("cargo", MissionKind::Delivery, Some("port_3"), 300),
    });
    engine.apply(PlayerCommand::ExitPort);

    assert_eq!(
        trade(engine.apply(PlayerCommand::EnterPort {
            port_id: "port_3".into()
        })),
        TradeOutcome::Completed { gold_delta: 300 }
    );
    let ledger = engine.ledger();
    assert_eq!(ledger.missions[0].status, MissionStatus::Completed);
    assert_eq!(ledger.gold, 1300);
    assert_eq!(
        ledger.reputation,
        MISSION_ACCEPT_REPUTATION + MISSION_OTHER_REPUTATION
    );
}

// ---- Autosave ----

#[test]
fn test_autosave_on_entering_port() {
    let dir = std::env::temp_dir().join("corsair_test_autosave");
    let _ = std::fs::remove_dir_all(&dir);

    let mut engine = at_sea(|_| {});
    engine.set_autosave_dir(Some(dir.clone()));
    engine.apply(PlayerCommand::EnterPort {
        port_id: "port_0".into(),
    });

    let save = persistence::load_from_file(&dir, AUTOSAVE_SLOT).unwrap();
    assert_eq!(save.state.mode, GameMode::Port);
    assert_eq!(save.state.current_port.as_deref(), Some("port_0"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_autosave_failure_is_a_warning() {
    let blocker = std::env::temp_dir().join("corsair_test_autosave_blocker");
    let _ = std::fs::remove_dir_all(&blocker);
    std::fs::write(&blocker, "not a directory").unwrap();

    let mut engine = at_sea(|_| {});
    engine.set_autosave_dir(Some(blocker.join("saves")));
    assert!(trade(engine.apply(PlayerCommand::EnterPort {
        port_id: "port_0".into()
    }))
    .completed());

    let report = engine.tick(&idle(), FIXED_DT);
    assert!(report
        .notices
        .iter()
        .any(|n| n.level == AlertLevel::Warning && n.message.starts_with("Autosave failed")));

    let _ = std::fs::remove_file(&blocker);
}
