//! Simulation engine for Corsair.
//!
//! Owns the hecs ECS world and the campaign session, runs the combat
//! systems once per frame (optionally on a fixed step), and produces
//! `GameStateSnapshot`s for the host.

pub mod engine;
pub mod missions;
pub mod persistence;
pub mod report;
pub mod session;
pub mod stepper;
pub mod systems;
pub mod trade;
pub mod world_setup;

pub use corsair_core as core;
pub use engine::{SimConfig, SimulationEngine};
pub use report::TickReport;

#[cfg(test)]
mod tests;
