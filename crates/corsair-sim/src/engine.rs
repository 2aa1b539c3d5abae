//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs world, the campaign session, the clock,
//! and the seeded RNG. Hosts drive it once per frame through
//! [`SimulationEngine::tick`]; discrete actions go through
//! [`SimulationEngine::apply`] or the command queue. Completely headless,
//! so tests can run it deterministically.

use std::collections::VecDeque;
use std::f64::consts::FRAC_PI_4;
use std::path::PathBuf;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use corsair_core::commands::{FrameInput, PlayerCommand};
use corsair_core::components::{EnemyShip, Heading, PlayerShip};
use corsair_core::constants::*;
use corsair_core::enums::{AlertLevel, BroadsideSide, GameMode};
use corsair_core::events::GameEvent;
use corsair_core::outcomes::{BoardingOutcome, CommandOutcome, FireOutcome, Gun, TradeOutcome};
use corsair_core::state::{GameStateSnapshot, PlayerLedger};
use corsair_core::types::{Position, ShipId, SimTime};

use crate::missions;
use crate::persistence::{self, GameSave};
use crate::report::{CommandResult, Feedback, TickReport};
use crate::session::Session;
use crate::stepper::Stepper;
use crate::systems;
use crate::systems::gunnery::Magazine;
use crate::trade;
use crate::world_setup;

/// Slot written on entering and leaving port.
pub const AUTOSAVE_SLOT: &str = "autosave";

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Replay the step at `FIXED_DT` instead of once per frame.
    pub fixed_step: bool,
    /// Cap on fixed steps replayed in one frame.
    pub max_catch_up_steps: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            fixed_step: false,
            max_catch_up_steps: MAX_CATCH_UP_STEPS,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    session: Session,
    config: SimConfig,
    seed: u64,
    rng: ChaCha8Rng,
    stepper: Stepper,
    previous_input: FrameInput,
    /// Mode at the end of the previous tick.
    last_mode: GameMode,
    next_ship_id: u32,
    next_ball_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    feedback: Feedback,
    autosave_dir: Option<PathBuf>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let session = Session::new(&mut rng);
        let mut world = World::new();
        world_setup::spawn_ship(&mut world, &world_setup::player_ship_record());

        Self {
            world,
            time: SimTime::default(),
            last_mode: session.mode,
            session,
            stepper: Stepper::new(config.fixed_step, config.max_catch_up_steps),
            seed: config.seed,
            config,
            rng,
            previous_input: FrameInput::default(),
            next_ship_id: 1,
            next_ball_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            feedback: Feedback::default(),
            autosave_dir: None,
        }
    }

    /// Rebuild an engine from a saved snapshot. The RNG stream restarts
    /// from the snapshot's seed mixed with its tick count.
    pub fn from_snapshot(snapshot: &GameStateSnapshot, config: SimConfig) -> Self {
        let mut world = World::new();
        world_setup::spawn_ship(&mut world, &snapshot.player_ship);
        for ship in &snapshot.ships {
            world_setup::spawn_ship(&mut world, ship);
        }
        for ball in &snapshot.cannonballs {
            world_setup::spawn_cannonball(&mut world, ball);
        }

        let next_ship_id = snapshot
            .ships
            .iter()
            .chain(&snapshot.player.captured_ships)
            .chain(&snapshot.player.fleet)
            .map(|s| s.id.0 + 1)
            .max()
            .unwrap_or(1)
            .max(1);
        let next_ball_id = snapshot
            .cannonballs
            .iter()
            .map(|b| b.id + 1)
            .max()
            .unwrap_or(0);

        let session = Session::from_snapshot(snapshot);
        Self {
            world,
            time: snapshot.time,
            last_mode: session.mode,
            session,
            stepper: Stepper::new(config.fixed_step, config.max_catch_up_steps),
            seed: snapshot.seed,
            config,
            rng: ChaCha8Rng::seed_from_u64(snapshot.seed ^ snapshot.time.tick),
            previous_input: FrameInput::default(),
            next_ship_id,
            next_ball_id,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            feedback: Feedback::default(),
            autosave_dir: None,
        }
    }

    /// Directory for port autosaves. `None` disables autosaving.
    pub fn set_autosave_dir(&mut self, dir: Option<PathBuf>) {
        self.autosave_dir = dir;
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one frame of `frame_secs` real seconds.
    pub fn tick(&mut self, input: &FrameInput, frame_secs: f64) -> TickReport {
        self.feedback.tick = self.time.tick;
        let mut commands = Vec::new();
        while let Some(command) = self.command_queue.pop_front() {
            let outcome = self.apply(command.clone());
            commands.push(CommandResult { command, outcome });
        }

        let pressed = Pressed::between(&self.previous_input, input);
        self.handle_toggles(&pressed);

        let mut shots = Vec::new();
        let mut steps = 0;
        if self.session.mode.is_at_sea() {
            if !self.last_mode.is_at_sea() {
                self.ensure_encounter();
            }
            steps = self.run_steps(input, frame_secs);
            if self.session.mode.is_at_sea() {
                self.frame_actions(input, &pressed, &mut shots, &mut commands);
            }
        } else if self.session.mode == GameMode::Map {
            systems::voyage::advance(
                &mut self.world,
                &mut self.session,
                &mut self.rng,
                frame_secs,
                &mut self.feedback,
            );
        }

        self.previous_input = *input;
        self.last_mode = self.session.mode;

        let feedback = std::mem::take(&mut self.feedback);
        TickReport {
            snapshot: self.snapshot(),
            events: feedback.events,
            notices: feedback.notices,
            commands,
            shots,
            steps,
        }
    }

    /// Apply a discrete command immediately.
    pub fn apply(&mut self, command: PlayerCommand) -> CommandOutcome {
        let mode = self.session.mode;
        let at_sea = mode.is_at_sea();
        match command {
            PlayerCommand::StartGame => {
                if mode != GameMode::Menu {
                    return CommandOutcome::Ignored;
                }
                self.start_game();
                CommandOutcome::Applied
            }
            PlayerCommand::RestartGame => {
                self.restart();
                CommandOutcome::Applied
            }
            PlayerCommand::SetMode { mode } => {
                self.session.mode = mode;
                self.session.resume_mode = None;
                CommandOutcome::Applied
            }
            PlayerCommand::FireDirected => {
                if !at_sea {
                    return CommandOutcome::Ignored;
                }
                let now = self.time.elapsed_secs;
                let mut magazine = Magazine {
                    supplies: &mut self.session.ledger.supplies,
                    next_ball_id: &mut self.next_ball_id,
                };
                CommandOutcome::Fire(systems::gunnery::fire_directed(
                    &mut self.world,
                    &mut magazine,
                    ShipId::PLAYER,
                    now,
                    &mut self.feedback,
                ))
            }
            PlayerCommand::FireBroadside { side } => {
                if !at_sea {
                    return CommandOutcome::Ignored;
                }
                CommandOutcome::Fire(self.fire_player_broadside(side))
            }
            PlayerCommand::Board { target } => {
                if !at_sea {
                    return CommandOutcome::Ignored;
                }
                CommandOutcome::Boarding(self.board(target))
            }
            PlayerCommand::SailTo { destination } => {
                if matches!(mode, GameMode::Menu | GameMode::GameOver) {
                    return CommandOutcome::Ignored;
                }
                CommandOutcome::Sail(systems::voyage::begin(
                    &self.world,
                    &mut self.session,
                    &destination,
                ))
            }
            PlayerCommand::EnterPort { port_id } => {
                let outcome = missions::enter_port(&mut self.session, &port_id, &mut self.feedback);
                if outcome.completed() {
                    self.autosave();
                }
                CommandOutcome::Trade(outcome)
            }
            PlayerCommand::ExitPort => {
                if self.session.current_port.is_none() && mode != GameMode::Port {
                    return CommandOutcome::Trade(TradeOutcome::NotInPort);
                }
                missions::exit_port(&mut self.session, &mut self.feedback);
                self.autosave();
                CommandOutcome::Applied
            }
            PlayerCommand::BuySupplies { kind, amount } => {
                CommandOutcome::Trade(trade::buy_supplies(&mut self.session, kind, amount))
            }
            PlayerCommand::SellTreasure { amount } => CommandOutcome::Trade(trade::sell_treasure(
                &mut self.world,
                &mut self.session,
                amount,
            )),
            PlayerCommand::BuyGoods {
                good_id,
                quantity,
                price,
            } => CommandOutcome::Trade(trade::buy_goods(&mut self.session, &good_id, quantity, price)),
            PlayerCommand::SellGoods { good_id, quantity } => {
                CommandOutcome::Trade(trade::sell_goods(&mut self.session, &good_id, quantity))
            }
            PlayerCommand::RepairShip => {
                CommandOutcome::Trade(trade::repair_ship(&mut self.world, &mut self.session))
            }
            PlayerCommand::BuyShip { offer } => {
                CommandOutcome::Trade(trade::buy_ship(&mut self.world, &mut self.session, offer))
            }
            PlayerCommand::SellPrize { ship_id } => {
                let outcome = trade::sell_prize(&mut self.session, ship_id);
                if outcome.completed() {
                    self.autosave();
                }
                CommandOutcome::Trade(outcome)
            }
            PlayerCommand::BribeGovernor { amount } => {
                CommandOutcome::Trade(trade::bribe_governor(&mut self.session, amount))
            }
            PlayerCommand::PurchaseLetterOfMarque { faction } => {
                CommandOutcome::Trade(trade::purchase_letter_of_marque(&mut self.session, faction))
            }
            PlayerCommand::DividePlunder => {
                CommandOutcome::Trade(trade::divide_plunder(&mut self.world, &mut self.session))
            }
            PlayerCommand::AcceptMission { mission } => {
                let outcome = missions::accept(&mut self.session, mission, &mut self.feedback);
                if outcome.completed() {
                    self.autosave();
                }
                CommandOutcome::Trade(outcome)
            }
            PlayerCommand::CompleteMission {
                mission_id,
                success,
            } => CommandOutcome::Trade(missions::complete(
                &mut self.session,
                &mission_id,
                success,
                &mut self.feedback,
            )),
            PlayerCommand::BuryTreasure { amount } => CommandOutcome::Trade(trade::bury_treasure(
                &self.world,
                &mut self.session,
                amount,
                &mut self.feedback,
            )),
        }
    }

    /// Build a snapshot of the current state without advancing.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(&self.world, &self.time, &self.session, self.seed)
    }

    /// Write the current state to the autosave slot. Failures are logged
    /// and surfaced as a warning notice, never returned.
    pub fn autosave(&mut self) {
        let Some(dir) = self.autosave_dir.clone() else {
            return;
        };
        let save = GameSave::new(AUTOSAVE_SLOT, self.snapshot());
        if let Err(err) = persistence::save_to_file(&dir, &save) {
            log::warn!("Autosave failed: {err}");
            self.feedback
                .notify(AlertLevel::Warning, format!("Autosave failed: {err}"));
        }
    }

    pub fn mode(&self) -> GameMode {
        self.session.mode
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn ledger(&self) -> &PlayerLedger {
        &self.session.ledger
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    fn start_game(&mut self) {
        let anchor = self
            .session
            .current_port
            .as_deref()
            .and_then(|id| self.session.find_port(id))
            .or_else(|| self.session.ports.first())
            .map(|port| port.position)
            .unwrap_or_default();
        let start = Position::new(anchor.x + 8.0, anchor.y, anchor.z + 8.0);
        for (_entity, (_player, pos, heading)) in
            self.world.query_mut::<(&PlayerShip, &mut Position, &mut Heading)>()
        {
            *pos = start;
            heading.0 = FRAC_PI_4;
        }
        self.session.mode = GameMode::Sailing;
        self.session.resume_mode = None;
        log::info!("Game started near {:?}", self.session.current_port);
    }

    fn restart(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.seed = self.config.seed;
        self.session = Session::new(&mut self.rng);
        self.world.clear();
        world_setup::spawn_ship(&mut self.world, &world_setup::player_ship_record());
        self.time = SimTime::default();
        self.stepper.reset();
        self.next_ship_id = 1;
        self.next_ball_id = 0;
        self.last_mode = self.session.mode;
        log::info!("Game restarted");
    }

    fn handle_toggles(&mut self, pressed: &Pressed) {
        if pressed.toggle_camera {
            self.session.camera_mode = self.session.camera_mode.toggled();
        }
        if pressed.toggle_map {
            self.session.strategic_overlay_open = !self.session.strategic_overlay_open;
        }
        if pressed.escape {
            match (self.session.mode, self.session.resume_mode.take()) {
                (GameMode::Menu, Some(resume)) => self.session.mode = resume,
                (GameMode::Menu, None) => {}
                (current, _) => {
                    self.session.resume_mode = Some(current);
                    self.session.mode = GameMode::Menu;
                }
            }
        }
    }

    /// Spawn a hostile when putting to sea with none afloat.
    fn ensure_encounter(&mut self) {
        if self.world.query::<&EnemyShip>().iter().next().is_some() {
            return;
        }
        let Some(player_pos) = self.player_position() else {
            return;
        };
        let id = ShipId(self.next_ship_id);
        self.next_ship_id += 1;
        let position =
            world_setup::spawn_encounter(&mut self.world, &mut self.rng, id, &player_pos);
        log::info!("Enemy {id} sighted at ({:.1}, {:.1})", position.x, position.z);
        self.feedback
            .emit(GameEvent::EnemySighted { ship_id: id, position });
        self.feedback.notify(AlertLevel::Warning, "Sail ho! Enemy ship sighted");
    }

    /// Run this frame's steps. Returns the number run.
    fn run_steps(&mut self, input: &FrameInput, frame_secs: f64) -> u32 {
        let plan = self.stepper.plan(frame_secs);
        let mut steps = 0;
        for _ in 0..plan.steps {
            steps += 1;
            if self.step(input, plan.dt) {
                self.session.mode = GameMode::GameOver;
                log::info!("Game over");
                break;
            }
        }
        steps
    }

    /// One simulation step: helm, ballistics, AI, collisions.
    /// Returns true when the player's ship went down.
    fn step(&mut self, input: &FrameInput, dt: f64) -> bool {
        let now = self.time.elapsed_secs + dt;

        systems::helm::run(&mut self.world, input, dt);
        systems::ballistics::run(&mut self.world, dt, now, &mut self.despawn_buffer);
        {
            let mut magazine = Magazine {
                supplies: &mut self.session.ledger.supplies,
                next_ball_id: &mut self.next_ball_id,
            };
            systems::enemy_ai::run(&mut self.world, &mut magazine, now, dt, &mut self.feedback);
        }
        let summary = systems::collision::run(
            &mut self.world,
            &mut self.session.ledger,
            now,
            &mut self.feedback,
            &mut self.despawn_buffer,
        );

        if summary.hits > 0 {
            log::debug!("{} hits, {} ships sunk", summary.hits, summary.sunk);
        }

        self.time.advance(dt);
        summary.player_sunk
    }

    /// Once-per-frame actions at sea: guns, boarding or docking, the sky,
    /// and burying treasure.
    fn frame_actions(
        &mut self,
        input: &FrameInput,
        pressed: &Pressed,
        shots: &mut Vec<(Gun, FireOutcome)>,
        commands: &mut Vec<CommandResult>,
    ) {
        let now = self.time.elapsed_secs;
        if input.fire {
            let mut magazine = Magazine {
                supplies: &mut self.session.ledger.supplies,
                next_ball_id: &mut self.next_ball_id,
            };
            if let Some(shot) =
                systems::gunnery::auto_fire(&mut self.world, &mut magazine, now, &mut self.feedback)
            {
                shots.push(shot);
            }
        }
        if input.broadside_port {
            let outcome = self.fire_player_broadside(BroadsideSide::Port);
            shots.push((Gun::Broadside(BroadsideSide::Port), outcome));
        }
        if input.broadside_starboard {
            let outcome = self.fire_player_broadside(BroadsideSide::Starboard);
            shots.push((Gun::Broadside(BroadsideSide::Starboard), outcome));
        }

        if pressed.board {
            if let Some(result) = self.board_or_dock() {
                commands.push(result);
            }
        }

        if self.session.mode.is_at_sea() {
            systems::ambient::drift(
                &mut self.world,
                &mut self.session,
                &mut self.rng,
                &mut self.feedback,
            );
        }

        if pressed.bury && self.session.ledger.gold >= BURY_AMOUNT {
            let command = PlayerCommand::BuryTreasure {
                amount: BURY_AMOUNT,
            };
            let outcome = self.apply(command.clone());
            commands.push(CommandResult { command, outcome });
        }
    }

    /// The board key: dock at a port within reach, otherwise board the
    /// nearest adjacent hostile.
    fn board_or_dock(&mut self) -> Option<CommandResult> {
        let player_pos = self.player_position()?;
        let port = self
            .session
            .ports
            .iter()
            .map(|p| (player_pos.horizontal_range_to(&p.position), p))
            .filter(|(distance, _)| *distance < PORT_DOCKING_RANGE)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, p)| p.id.clone());

        let command = match port {
            Some(port_id) => PlayerCommand::EnterPort { port_id },
            None => PlayerCommand::Board {
                target: systems::boarding::boardable_target(&self.world)?,
            },
        };
        let outcome = self.apply(command.clone());
        Some(CommandResult { command, outcome })
    }

    fn board(&mut self, target: ShipId) -> BoardingOutcome {
        systems::boarding::attempt(
            &mut self.world,
            &mut self.session.ledger,
            target,
            &mut self.feedback,
        )
    }

    fn fire_player_broadside(&mut self, side: BroadsideSide) -> FireOutcome {
        let now = self.time.elapsed_secs;
        let mut magazine = Magazine {
            supplies: &mut self.session.ledger.supplies,
            next_ball_id: &mut self.next_ball_id,
        };
        systems::gunnery::fire_broadside(
            &mut self.world,
            &mut magazine,
            ShipId::PLAYER,
            side,
            now,
            &mut self.feedback,
        )
    }

    fn player_position(&self) -> Option<Position> {
        self.world
            .query::<(&PlayerShip, &Position)>()
            .iter()
            .next()
            .map(|(_, (_, pos))| *pos)
    }
}

/// Keys that went down this frame (edge-triggered actions).
#[derive(Debug, Clone, Copy, Default)]
struct Pressed {
    board: bool,
    bury: bool,
    toggle_camera: bool,
    toggle_map: bool,
    escape: bool,
}

impl Pressed {
    fn between(previous: &FrameInput, current: &FrameInput) -> Self {
        Self {
            board: current.board && !previous.board,
            bury: current.bury && !previous.bury,
            toggle_camera: current.toggle_camera && !previous.toggle_camera,
            toggle_map: current.toggle_map && !previous.toggle_map,
            escape: current.escape && !previous.escape,
        }
    }
}
