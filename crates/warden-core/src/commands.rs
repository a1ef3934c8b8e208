//! Input intents sent from the host to the simulation each tick.
//!
//! The host translates raw devices into these signals; the simulation never
//! sees keys or mouse events.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Intent state for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputIntents {
    /// Local movement (x = right, y = up, z = forward). Longer than 1 is
    /// normalized.
    pub move_axis: Vec3,
    /// Look delta this tick (x = yaw, y = pitch), in aim units.
    pub aim_delta: Vec2,
    /// Standard fire held.
    pub fire: bool,
    /// Charged fire held.
    pub charged_fire: bool,
    /// Dodge pressed.
    pub dodge: bool,
    /// Ally summon pressed.
    pub summon: bool,
}

impl InputIntents {
    /// No input at all.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Hold standard fire and nothing else.
    pub fn firing() -> Self {
        Self {
            fire: true,
            ..Self::default()
        }
    }
}
