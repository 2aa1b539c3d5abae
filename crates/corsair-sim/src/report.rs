//! Per-tick output: events, notices, and command outcomes.

use serde::{Deserialize, Serialize};

use corsair_core::commands::PlayerCommand;
use corsair_core::enums::AlertLevel;
use corsair_core::events::{GameEvent, Notice};
use corsair_core::outcomes::{CommandOutcome, FireOutcome, Gun};
use corsair_core::state::GameStateSnapshot;

/// Events and notices accumulated while a tick runs.
#[derive(Debug, Default)]
pub struct Feedback {
    pub tick: u64,
    pub events: Vec<GameEvent>,
    pub notices: Vec<Notice>,
}

impl Feedback {
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn notify(&mut self, level: AlertLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
            tick: self.tick,
        });
    }
}

/// Outcome of a queued command, paired with the command that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResult {
    pub command: PlayerCommand,
    pub outcome: CommandOutcome,
}

/// Everything a host needs after one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickReport {
    pub snapshot: GameStateSnapshot,
    pub events: Vec<GameEvent>,
    pub notices: Vec<Notice>,
    pub commands: Vec<CommandResult>,
    /// Firing attempts triggered by held keys this frame.
    pub shots: Vec<(Gun, FireOutcome)>,
    /// Fixed steps run this frame (1 in variable-step mode, 0 when not at sea).
    pub steps: u32,
}
