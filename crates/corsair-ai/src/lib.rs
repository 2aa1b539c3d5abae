//! Enemy ship AI for Corsair.
//!
//! Implements the three-zone pursue/broadside/hold policy with a
//! morale-driven flee override.

pub mod policy;

pub use corsair_core as core;
pub use policy::{evaluate, EnemyContext, EnemyDecision, Stance};
