//! Simulation constants and tuning parameters.
//!
//! These values are the gameplay contract: combat, AI, and upkeep balance
//! depend on them exactly.

/// Fixed-step simulation rate (Hz) when the fixed-step flag is on.
pub const FIXED_STEP_RATE: u32 = 60;

/// Seconds per fixed step.
pub const FIXED_DT: f64 = 1.0 / FIXED_STEP_RATE as f64;

/// Maximum number of fixed steps replayed in one frame.
pub const MAX_CATCH_UP_STEPS: u32 = 5;

// --- Helm ---

/// Rudder turn rate (radians per second).
pub const TURN_RATE: f64 = 1.5;

/// Fraction of full speed kept when not thrusting forward.
pub const IDLE_DRIFT_FACTOR: f64 = 0.2;

/// Fraction of full speed applied backward while reversing.
pub const REVERSE_FACTOR: f64 = 0.4;

// --- Gunnery ---

/// Bow-gun reload (seconds).
pub const DIRECTED_COOLDOWN_SECS: f64 = 2.0;

/// Broadside reload per side (seconds).
pub const BROADSIDE_COOLDOWN_SECS: f64 = 5.0;

pub const DIRECTED_SHOT_SPEED: f64 = 18.0;
pub const DIRECTED_SHOT_DAMAGE: f64 = 18.0;
/// Distance ahead of the hull where a bow shot spawns.
pub const DIRECTED_MUZZLE_OFFSET: f64 = 3.0;
pub const DIRECTED_MUZZLE_HEIGHT: f64 = 1.0;

pub const BROADSIDE_SHOT_SPEED: f64 = 16.0;
pub const BROADSIDE_SHOT_DAMAGE: f64 = 12.0;
/// Angular spacing between adjacent guns in a broadside (radians).
pub const BROADSIDE_SPREAD: f64 = 0.12;
/// Lateral distance of the gun ports from the keel.
pub const BROADSIDE_LATERAL_OFFSET: f64 = 1.2;
/// Spacing of guns along the hull, starting one unit forward of centre.
pub const BROADSIDE_GUN_SPACING: f64 = 0.8;
pub const BROADSIDE_MUZZLE_HEIGHT: f64 = 0.5;

/// Radius within which the player's fire key picks a broadside target.
pub const AUTO_TARGET_RADIUS: f64 = 30.0;

// --- Ballistics ---

/// Vertical drop rate of a cannonball (units per second).
pub const CANNONBALL_DROP_RATE: f64 = 0.8;

/// Maximum cannonball lifetime (seconds).
pub const CANNONBALL_TTL_SECS: f64 = 5.0;

/// Maximum horizontal travel from the launch point.
pub const CANNONBALL_MAX_RANGE: f64 = 220.0;

/// Time a ball may rest at water level before it is culled (seconds).
pub const SPLASHDOWN_GRACE_SECS: f64 = 0.3;

/// Horizontal hit radius between a cannonball and a hull.
pub const HIT_RADIUS: f64 = 2.0;

// --- Spoils ---

pub const SINK_GOLD_REWARD: i64 = 200;
pub const SINK_REPUTATION_MARQUE: i64 = 8;
pub const SINK_INFAMY_MARQUE: i64 = 3;
pub const SINK_REPUTATION_NO_MARQUE: i64 = -5;
pub const SINK_INFAMY_NO_MARQUE: i64 = 10;

pub const CAPTURE_GOLD_REWARD: i64 = 100;
pub const CAPTURE_REPUTATION_MARQUE: i64 = 12;
pub const CAPTURE_INFAMY_MARQUE: i64 = 5;
pub const CAPTURE_REPUTATION_NO_MARQUE: i64 = -8;
pub const CAPTURE_INFAMY_NO_MARQUE: i64 = 15;

// --- Boarding ---

/// Maximum distance at which a boarding action can be attempted.
pub const BOARDING_RANGE: f64 = 3.0;
pub const BOARDING_CREW_LOSS: u32 = 5;
pub const BOARDING_MIN_CREW: u32 = 1;
pub const BOARDING_MORALE_LOSS: f64 = 20.0;
pub const BOARDING_MIN_MORALE: f64 = 10.0;

// --- Enemy AI ---

/// Beyond this range enemies close directly on the player.
pub const AI_APPROACH_RANGE: f64 = 24.0;
/// Inner edge of the broadside band.
pub const AI_BROADSIDE_MIN_RANGE: f64 = 12.0;
/// Range inside which a demoralised enemy turns to flee.
pub const AI_FLEE_RANGE: f64 = 25.0;
pub const AI_FLEE_MORALE: f64 = 25.0;
/// Health fraction below which an enemy is willing to flee.
pub const AI_FLEE_HEALTH_FRACTION: f64 = 0.3;
pub const AI_FLEE_SPEED_FACTOR: f64 = 1.2;
/// Morale lost per tick while fleeing.
pub const AI_FLEE_MORALE_COST: f64 = 0.1;
/// Maximum AI turn rate (radians per second).
pub const AI_TURN_RATE: f64 = 1.5;
/// Tolerance from exact abeam inside which an enemy fires (radians).
pub const AI_BROADSIDE_TOLERANCE: f64 = 0.35;

// --- Ports & trade ---

/// Distance at which the board key docks at a port.
pub const PORT_DOCKING_RANGE: f64 = 5.0;
pub const TREASURE_SALE_PRICE: i64 = 10;
pub const GOODS_BASE_PRICE: f64 = 20.0;
pub const GOODS_SALE_FACTOR: f64 = 0.9;
pub const REPAIR_COST_PER_HP: f64 = 2.0;
pub const LETTER_OF_MARQUE_COST: i64 = 1000;
pub const CREW_WAGE: i64 = 5;
pub const PLUNDER_MORALE_BONUS: f64 = 30.0;
pub const PLUNDER_REPUTATION_BONUS: i64 = 5;
pub const PLUNDER_INFAMY_RELIEF: i64 = 5;
pub const PRIZE_REPUTATION_BONUS: i64 = 5;
pub const MISSION_ACCEPT_REPUTATION: i64 = 2;
pub const MISSION_COMBAT_REPUTATION: i64 = 12;
pub const MISSION_OTHER_REPUTATION: i64 = 8;

/// Gold buried per press of the bury key.
pub const BURY_AMOUNT: i64 = 100;

// --- Encounters ---

pub const ENCOUNTER_MIN_DISTANCE: f64 = 60.0;
pub const ENCOUNTER_MAX_DISTANCE: f64 = 120.0;

// --- Sailing ---

/// Real seconds per simulated day while sailing on the map.
pub const SECS_PER_SAILING_DAY: f64 = 3.0;
/// Pacing multiplier applied to the estimated voyage length.
pub const VOYAGE_PACING_FACTOR: f64 = 2.0;
pub const DEFAULT_ROUTE_NAUTICAL_MILES: f64 = 100.0;
pub const DEFAULT_ROUTE_BEARING: f64 = 90.0;
/// Slowest effective sailing speed (knots).
pub const MIN_EFFECTIVE_KNOTS: f64 = 2.0;
/// Wind speed at which the wind neither helps nor hinders (knots).
pub const NEUTRAL_WIND_KNOTS: f64 = 10.0;

pub const WEATHER_CHANGE_CHANCE_PER_DAY: f64 = 0.3;
pub const TIME_OF_DAY_CHANCE_PER_DAY: f64 = 0.2;
/// Per-frame chance of a weather change while at sea.
pub const WEATHER_DRIFT_CHANCE_PER_FRAME: f64 = 0.001;
/// Per-frame chance of the time of day advancing while at sea.
pub const TIME_OF_DAY_DRIFT_CHANCE_PER_FRAME: f64 = 0.0005;

// --- Upkeep ---

/// Crew members fed by one unit of food per day.
pub const CREW_PER_FOOD: u32 = 5;
/// Crew members served by one unit of rum per day.
pub const CREW_PER_RUM: u32 = 10;
pub const RATIONS_MORALE: f64 = 2.0;
pub const STARVATION_MORALE: f64 = -5.0;
pub const RUM_MORALE: f64 = 1.0;
pub const MUTINY_MORALE_THRESHOLD: f64 = 5.0;
pub const MUTINY_CHANCE: f64 = 0.05;
pub const MUTINY_MORALE_RESET: f64 = 20.0;
pub const MUTINY_CREW_LOSS_FRACTION: f64 = 0.1;

// --- Damage callouts ---

pub const CALLOUT_HULL_STRUCK: f64 = 0.7;
pub const CALLOUT_TAKING_WATER: f64 = 0.4;
pub const CALLOUT_ABLAZE: f64 = 0.1;
