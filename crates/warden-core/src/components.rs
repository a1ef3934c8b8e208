//! Components and plain-data state records.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;
use crate::types::Facing;

/// A projectile in flight. Stored in the hecs world next to `Position` and
/// `Velocity`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: Owner,
    pub kind: ProjectileKind,
    /// Base damage before multipliers.
    pub damage: f32,
    /// Seconds until expiry.
    pub lifetime_secs: f32,
    pub radius: f32,
    /// Spawn sequence; collision iterates in this order.
    pub seq: u64,
}

/// A boss-summoned minion. Stored in the hecs world next to `Position` and
/// `Velocity`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Minion {
    pub health: f32,
    pub fire_cooldown: f32,
    pub seq: u64,
}

/// Expanding ring hazard owned by the attack that spawned it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingHazard {
    pub center: Vec3,
    pub radius: f32,
    /// Growth speed (units/s).
    pub growth: f32,
    pub max_radius: f32,
    /// Half-width of the damaging band around `radius`.
    pub band: f32,
    pub damage: f32,
    /// Set once the ring has injured the player; each ring hits at most once.
    pub hit_player: bool,
}

/// Boss geometry, normally measured from the loaded model by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossRig {
    pub weak_point_height: f32,
    pub weak_point_forward: f32,
    pub weak_point_radius: f32,
    pub body_height: f32,
    pub body_radius: f32,
}

impl Default for BossRig {
    /// Placeholder geometry.
    fn default() -> Self {
        Self {
            weak_point_height: WEAK_POINT_HEIGHT,
            weak_point_forward: WEAK_POINT_FORWARD,
            weak_point_radius: WEAK_POINT_RADIUS,
            body_height: BODY_HEIGHT,
            body_radius: BODY_RADIUS,
        }
    }
}

/// Dodge sub-state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DodgeState {
    /// Seconds until another dodge may start.
    pub cooldown: f32,
    pub active: bool,
    /// Captured dash direction (unit).
    pub direction: Vec3,
    /// Seconds of dash left.
    pub remaining: f32,
}

/// The player's combat state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerCombat {
    pub position: Vec3,
    pub velocity: Vec3,
    pub facing: Facing,
    pub health: f32,
    pub max_health: f32,
    pub focus: f32,
    pub combo: u32,
    /// Seconds until the combo lapses.
    pub combo_timer: f32,
    /// Tier multiplier derived from `combo`.
    pub multiplier: f32,
    pub fire_cooldown: f32,
    pub charged_cooldown: f32,
    pub dodge: DodgeState,
    pub invincible_secs: f32,
    /// Seconds of roar slow left.
    pub slow_secs: f32,
    /// Speed factor while slowed.
    pub slow_factor: f32,
}

/// The temporary ally squad.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AllySquad {
    pub active: bool,
    pub remaining_secs: f32,
    pub fire_cooldown: f32,
    /// Current orbit phase (radians).
    pub orbit_angle: f32,
    pub members: u32,
    /// Orbit centre between player and boss.
    pub anchor: Vec3,
}
