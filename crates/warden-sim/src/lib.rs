//! Encounter simulation for WARDEN.
//!
//! Owns the hecs world of projectiles and minions, the player and boss
//! records, runs the systems in a fixed order each tick, and produces
//! `FrameResult`s for the host.

pub mod combatants;
pub mod engine;
pub mod systems;
pub mod world_setup;

pub use engine::Encounter;
pub use warden_core as core;

#[cfg(test)]
mod tests;
