//! Corsair host application.
//!
//! Loads configuration, drives the simulation headlessly from a key
//! script, and writes the final state to a save slot.

pub mod config;
pub mod game_loop;

pub use corsair_core as core;
