//! WARDEN headless host.
//!
//! Drives an `Encounter` from a real-time frame loop thread or a fixed-step
//! headless run, with a scripted autopilot standing in for the player.

pub mod autopilot;
pub mod game_loop;
pub mod state;

pub use warden_core as core;
