//! Frame result: the complete visible state returned to the host each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::EncounterEvent;
use crate::types::{Facing, SimTime};

/// Everything the host needs to present one frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameResult {
    pub time: SimTime,
    pub status: EncounterStatus,
    pub player: PlayerView,
    pub boss: BossView,
    pub projectiles: Vec<ProjectileView>,
    pub minions: Vec<MinionView>,
    pub ally: AllyView,
    pub hazards: Vec<HazardView>,
    pub stats: StatsView,
    /// Events raised during this tick, in the order they happened.
    pub events: Vec<EncounterEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec3,
    pub velocity: Vec3,
    pub facing: Facing,
    pub health: f32,
    pub max_health: f32,
    pub focus: f32,
    pub focus_max: f32,
    pub combo: u32,
    /// Effective damage multiplier (tier, or the ally floor if higher).
    pub multiplier: f32,
    pub dodging: bool,
    pub dodge_cooldown: f32,
    pub invincible: bool,
    pub slowed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BossView {
    pub position: Vec3,
    pub yaw: f32,
    pub weak_point: Vec3,
    pub health: f32,
    pub max_health: f32,
    pub phase: u8,
    pub state: BossStateKind,
    pub attack: Option<AttackId>,
    /// Wind-up intensity, 0..1.
    pub telegraph: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Vec3,
    pub velocity: Vec3,
    pub owner: Owner,
    pub kind: ProjectileKind,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinionView {
    pub position: Vec3,
    pub health: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllyView {
    pub active: bool,
    pub remaining_secs: f32,
    /// Member positions around the orbit anchor.
    pub members: Vec<Vec3>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardView {
    pub center: Vec3,
    pub radius: f32,
    pub band: f32,
}

/// Running encounter statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsView {
    pub shots_fired: u32,
    pub hits_landed: u32,
    pub weak_point_hits: u32,
    pub damage_dealt: f32,
    pub damage_taken: f32,
    pub max_combo: u32,
    pub minions_killed: u32,
    pub dodges: u32,
    pub elapsed_secs: f64,
}
