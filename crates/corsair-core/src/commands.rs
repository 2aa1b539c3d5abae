//! Player input and commands sent from the host to the simulation.
//!
//! Continuous input (helm, guns) arrives once per frame as a `FrameInput`.
//! Discrete actions (trade, voyages, missions) are `PlayerCommand`s, either
//! applied immediately or queued for the next tick boundary.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::state::MissionRecord;
use crate::types::ShipId;

/// Every action a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Forward,
    Backward,
    Left,
    Right,
    Fire,
    BroadsidePort,
    BroadsideStarboard,
    /// Board an adjacent enemy or dock at an adjacent port.
    Board,
    BuryTreasure,
    ToggleCamera,
    ToggleMapOverlay,
    Escape,
}

/// Held/pressed state of every action for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub broadside_port: bool,
    pub broadside_starboard: bool,
    pub board: bool,
    pub bury: bool,
    pub toggle_camera: bool,
    pub toggle_map: bool,
    pub escape: bool,
}

impl FrameInput {
    /// Build a frame input from a set of active actions.
    pub fn from_actions<'a>(actions: impl IntoIterator<Item = &'a Action>) -> Self {
        let mut input = Self::default();
        for action in actions {
            input.set(*action, true);
        }
        input
    }

    pub fn set(&mut self, action: Action, pressed: bool) {
        let slot = match action {
            Action::Forward => &mut self.forward,
            Action::Backward => &mut self.backward,
            Action::Left => &mut self.left,
            Action::Right => &mut self.right,
            Action::Fire => &mut self.fire,
            Action::BroadsidePort => &mut self.broadside_port,
            Action::BroadsideStarboard => &mut self.broadside_starboard,
            Action::Board => &mut self.board,
            Action::BuryTreasure => &mut self.bury,
            Action::ToggleCamera => &mut self.toggle_camera,
            Action::ToggleMapOverlay => &mut self.toggle_map,
            Action::Escape => &mut self.escape,
        };
        *slot = pressed;
    }

    /// Whether any helm key is held.
    pub fn is_steering(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// A single key-to-action binding. Keys use DOM `KeyboardEvent.code` names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub action: Action,
    pub keys: Vec<String>,
}

/// The fixed key map consumed once per frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub bindings: Vec<KeyBinding>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bind = |action, keys: &[&str]| KeyBinding {
            action,
            keys: keys.iter().map(|k| k.to_string()).collect(),
        };
        Self {
            bindings: vec![
                bind(Action::Forward, &["KeyW", "ArrowUp"]),
                bind(Action::Backward, &["KeyS", "ArrowDown"]),
                bind(Action::Left, &["KeyA", "ArrowLeft"]),
                bind(Action::Right, &["KeyD", "ArrowRight"]),
                bind(Action::Fire, &["Space"]),
                bind(Action::BroadsidePort, &["KeyQ"]),
                bind(Action::BroadsideStarboard, &["KeyR"]),
                bind(Action::Board, &["KeyE"]),
                bind(Action::BuryTreasure, &["KeyB"]),
                bind(Action::ToggleCamera, &["KeyT"]),
                bind(Action::ToggleMapOverlay, &["KeyM"]),
                bind(Action::Escape, &["Escape"]),
            ],
        }
    }
}

impl KeyBindings {
    /// Action bound to a key code, if any.
    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.bindings
            .iter()
            .find(|b| b.keys.iter().any(|k| k == key))
            .map(|b| b.action)
    }

    /// Fold the keys held this frame into a `FrameInput`. Unbound keys are ignored.
    pub fn resolve<'a>(&self, pressed: impl IntoIterator<Item = &'a str>) -> FrameInput {
        let actions: BTreeSet<Action> = pressed
            .into_iter()
            .filter_map(|key| self.action_for(key))
            .collect();
        FrameInput::from_actions(&actions)
    }
}

/// Purchasable hull types at a shipyard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipyardOffer {
    Sloop,
    Brigantine,
    Frigate,
    Galleon,
}

/// Discrete player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Session ---
    /// Leave the menu and put to sea near the home port.
    StartGame,
    /// Reset everything to the initial state and return to the menu.
    RestartGame,
    SetMode { mode: GameMode },

    // --- Combat ---
    /// Fire the bow gun along the current heading.
    FireDirected,
    FireBroadside { side: BroadsideSide },
    Board { target: ShipId },

    // --- Voyage ---
    SailTo { destination: String },

    // --- Port ---
    EnterPort { port_id: String },
    ExitPort,
    BuySupplies { kind: SupplyKind, amount: u32 },
    SellTreasure { amount: u32 },
    BuyGoods { good_id: String, quantity: u32, price: i64 },
    SellGoods { good_id: String, quantity: u32 },
    RepairShip,
    BuyShip { offer: ShipyardOffer },
    SellPrize { ship_id: ShipId },
    BribeGovernor { amount: i64 },
    PurchaseLetterOfMarque { faction: Faction },
    DividePlunder,

    // --- Missions ---
    AcceptMission { mission: MissionRecord },
    CompleteMission { mission_id: String, success: bool },

    // --- Misc ---
    BuryTreasure { amount: i64 },
}
