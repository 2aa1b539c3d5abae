//! Governors' contracts and docking.

use corsair_core::constants::{
    MISSION_ACCEPT_REPUTATION, MISSION_COMBAT_REPUTATION, MISSION_OTHER_REPUTATION,
};
use corsair_core::enums::{AlertLevel, GameMode, MissionKind, MissionStatus};
use corsair_core::events::GameEvent;
use corsair_core::outcomes::TradeOutcome;
use corsair_core::state::MissionRecord;

use crate::report::Feedback;
use crate::session::Session;

pub fn accept(session: &mut Session, mission: MissionRecord, feedback: &mut Feedback) -> TradeOutcome {
    if session.ledger.missions.iter().any(|m| m.id == mission.id) {
        return TradeOutcome::Nothing;
    }
    log::info!("Accepting mission: {}", mission.id);
    feedback.notify(AlertLevel::Success, format!("Mission accepted: {}", mission.title));
    session.ledger.missions.push(MissionRecord {
        status: MissionStatus::Active,
        ..mission
    });
    session.ledger.reputation += MISSION_ACCEPT_REPUTATION;
    TradeOutcome::Completed { gold_delta: 0 }
}

/// Close an active mission. Success pays the reward and raises reputation.
pub fn complete(session: &mut Session, mission_id: &str, success: bool, feedback: &mut Feedback) -> TradeOutcome {
    let ledger = &mut session.ledger;
    let Some(mission) = ledger
        .missions
        .iter_mut()
        .find(|m| m.id == mission_id && m.status == MissionStatus::Active)
    else {
        return TradeOutcome::UnknownItem;
    };

    if !success {
        mission.status = MissionStatus::Failed;
        feedback.notify(AlertLevel::Error, format!("Mission failed: {}", mission.title));
        return TradeOutcome::Completed { gold_delta: 0 };
    }

    mission.status = MissionStatus::Completed;
    let reward = mission.reward;
    let reputation = match mission.kind {
        MissionKind::Combat => MISSION_COMBAT_REPUTATION,
        MissionKind::Delivery | MissionKind::Escort => MISSION_OTHER_REPUTATION,
    };
    feedback.notify(
        AlertLevel::Success,
        format!("Mission completed: {} (+{reward}g)", mission.title),
    );
    ledger.gold += reward;
    ledger.reputation += reputation;
    TradeOutcome::Completed { gold_delta: reward }
}

/// Dock at a known port, settling any deliveries bound for it.
pub fn enter_port(session: &mut Session, port_id: &str, feedback: &mut Feedback) -> TradeOutcome {
    let Some(port) = session.find_port(port_id) else {
        log::warn!("No port with id {port_id}");
        return TradeOutcome::UnknownItem;
    };
    log::info!("Entering port: {}", port.name);
    let port_id = port.id.clone();

    let deliveries: Vec<String> = session
        .ledger
        .missions
        .iter()
        .filter(|m| {
            m.kind == MissionKind::Delivery
                && m.status == MissionStatus::Active
                && m.target_port_id.as_deref() == Some(port_id.as_str())
        })
        .map(|m| m.id.clone())
        .collect();
    let mut gold_delta = 0;
    for id in deliveries {
        if let TradeOutcome::Completed { gold_delta: reward } = complete(session, &id, true, feedback) {
            gold_delta += reward;
        }
    }

    session.current_port = Some(port_id.clone());
    session.mode = GameMode::Port;
    feedback.emit(GameEvent::PortEntered { port_id });
    TradeOutcome::Completed { gold_delta }
}

pub fn exit_port(session: &mut Session, feedback: &mut Feedback) {
    log::info!("Leaving port");
    session.current_port = None;
    session.mode = GameMode::Sailing;
    feedback.emit(GameEvent::PortExited);
}
