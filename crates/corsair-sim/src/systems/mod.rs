//! ECS systems that operate on the simulation world.
//!
//! Systems are free functions over `&mut World` (or `&World` when
//! read-only) plus whatever slice of session state they touch. They own
//! no state of their own.

pub mod ambient;
pub mod ballistics;
pub mod boarding;
pub mod collision;
pub mod enemy_ai;
pub mod gunnery;
pub mod helm;
pub mod snapshot;
pub mod spoils;
pub mod upkeep;
pub mod voyage;
