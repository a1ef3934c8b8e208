//! Boss AI for WARDEN.
//!
//! Implements the boss attack-cycle state machine, per-phase attack rosters,
//! and the scripted attack pattern library. Pure logic over plain data; the
//! simulation crate owns the state and applies the results.

pub mod fsm;
pub mod patterns;
pub mod profiles;

pub use warden_core as core;

#[cfg(test)]
mod tests;
