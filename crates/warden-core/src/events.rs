//! Events emitted by the simulation for host-side cosmetic reaction.
//!
//! The simulation never renders; it accumulates these per tick and returns
//! them inside the frame result.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// A point-in-time notification for the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EncounterEvent {
    /// Floating damage number on the boss or a minion.
    DamageNumber {
        amount: f32,
        position: Vec3,
        weak_point: bool,
    },
    /// The player lost health.
    PlayerDamaged { amount: f32, source: DamageSource },
    /// Camera shake of the given magnitude.
    ScreenShake { magnitude: f32 },
    /// Full-screen flash.
    Flash { color: FlashColor, intensity: f32 },
    /// Short-lived narrative line.
    Message { text: String, duration_secs: f32 },
    /// Boss entered a new phase.
    PhaseChanged { phase: u8 },
    AttackStarted { attack: AttackId },
    /// `forced` is true when cut short by a phase change or victory.
    AttackEnded { attack: AttackId, forced: bool },
    BossStunned { duration_secs: f32 },
    MinionKilled { position: Vec3 },
    AllySummoned { duration_secs: f32 },
    AllyDismissed,
    Dodged { direction: Vec3 },
    ShotFired { kind: ProjectileKind },
    /// Terminal result delivered to the host.
    EncounterEnded { outcome: Outcome },
}
