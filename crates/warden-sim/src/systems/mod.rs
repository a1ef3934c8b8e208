//! Systems that operate on the encounter each tick.
//!
//! Systems are plain functions over the hecs world and the combatant
//! records. They do not own state; it all lives on `Encounter`.

pub mod ally;
pub mod boss;
pub mod cleanup;
pub mod collision;
pub mod minions;
pub mod outcome;
pub mod phase;
pub mod player;
pub mod projectiles;
pub mod snapshot;
