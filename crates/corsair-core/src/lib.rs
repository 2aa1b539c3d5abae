//! Core types and definitions for the Corsair simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, input and commands, action outcomes, state records, events,
//! and constants. It has no dependency on any runtime or host.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod outcomes;
pub mod state;
pub mod types;
