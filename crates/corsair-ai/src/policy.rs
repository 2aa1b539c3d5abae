//! Enemy captain policy.
//!
//! Pure function of one enemy ship's situation relative to the player.
//! No ECS dependency; operates on plain data. Zones are checked in order:
//! flee override, approach, broadside band, hold.

use corsair_core::constants::*;
use corsair_core::enums::BroadsideSide;
use corsair_core::types::{wrap_angle, Position};
use glam::DVec3;

/// Input to the policy for a single enemy ship.
#[derive(Debug, Clone, Copy)]
pub struct EnemyContext {
    pub position: Position,
    pub rotation: f64,
    pub speed: f64,
    pub health: f64,
    pub max_health: f64,
    pub morale: f64,
    pub player_position: Position,
    /// Current sim time (seconds), for reload checks.
    pub now: f64,
    pub last_fired_port: Option<f64>,
    pub last_fired_starboard: Option<f64>,
    pub dt: f64,
}

/// Which zone the enemy is acting in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    Flee,
    Approach,
    Broadside,
    Hold,
}

/// Output from the policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyDecision {
    pub stance: Stance,
    pub position: Position,
    pub rotation: f64,
    pub morale: f64,
    /// Side to fire this tick, if any.
    pub fire: Option<BroadsideSide>,
}

/// Whether a broadside side has reloaded. Never-fired sides are ready.
pub fn broadside_ready(last_fired: Option<f64>, now: f64) -> bool {
    last_fired.map_or(true, |t| now - t > BROADSIDE_COOLDOWN_SECS)
}

/// Morale or hull is broken enough that the captain would rather run.
pub fn is_demoralized(morale: f64, health: f64, max_health: f64) -> bool {
    morale < AI_FLEE_MORALE || health < max_health * AI_FLEE_HEALTH_FRACTION
}

/// Evaluate the policy for one enemy ship.
pub fn evaluate(ctx: &EnemyContext) -> EnemyDecision {
    let here = ctx.position.as_dvec3();
    let mut to_player = ctx.player_position.as_dvec3() - here;
    to_player.y = 0.0;
    let distance = to_player.length();

    let hold = EnemyDecision {
        stance: Stance::Hold,
        position: ctx.position,
        rotation: ctx.rotation,
        morale: ctx.morale,
        fire: None,
    };

    if is_demoralized(ctx.morale, ctx.health, ctx.max_health) && distance < AI_FLEE_RANGE {
        let away = -to_player / distance.max(0.001);
        let step = ctx.speed * ctx.dt * AI_FLEE_SPEED_FACTOR;
        return EnemyDecision {
            stance: Stance::Flee,
            position: (here + away * step).into(),
            rotation: away.x.atan2(away.z),
            morale: (ctx.morale - AI_FLEE_MORALE_COST).max(0.0),
            fire: None,
        };
    }

    if distance > AI_APPROACH_RANGE {
        let toward = to_player / distance;
        let step = ctx.speed * ctx.dt;
        return EnemyDecision {
            stance: Stance::Approach,
            position: (here + toward * step).into(),
            rotation: toward.x.atan2(toward.z),
            ..hold
        };
    }

    if distance >= AI_BROADSIDE_MIN_RANGE {
        return evaluate_broadside(ctx, to_player);
    }

    hold
}

fn evaluate_broadside(ctx: &EnemyContext, to_player: DVec3) -> EnemyDecision {
    let bearing = to_player.x.atan2(to_player.z);

    // Steer to hold the player abeam.
    let desired = bearing + std::f64::consts::FRAC_PI_2;
    let turn = wrap_angle(desired - ctx.rotation);
    let max_turn = AI_TURN_RATE * ctx.dt;
    let rotation = ctx.rotation + turn.clamp(-max_turn, max_turn);

    // Firing solution uses the heading held at the start of the tick.
    let relative = wrap_angle(bearing - ctx.rotation);
    let abeam = (relative.abs() - std::f64::consts::FRAC_PI_2).abs() < AI_BROADSIDE_TOLERANCE;
    let side = BroadsideSide::from_relative_bearing(relative);
    let ready = match side {
        BroadsideSide::Port => broadside_ready(ctx.last_fired_port, ctx.now),
        BroadsideSide::Starboard => broadside_ready(ctx.last_fired_starboard, ctx.now),
    };

    EnemyDecision {
        stance: Stance::Broadside,
        position: ctx.position,
        rotation,
        morale: ctx.morale,
        fire: (abeam && ready).then_some(side),
    }
}
