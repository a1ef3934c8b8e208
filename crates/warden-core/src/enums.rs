//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Boss attack identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackId {
    SweepingBeam,
    RisingSpikes,
    MeleeSlam,
    LobbedShot,
    ConeSpray,
    Summon,
    SkyHazard,
    Lunge,
    ExpandingRing,
    DualBeams,
    Nova,
    Roar,
}

impl AttackId {
    pub const ALL: [AttackId; 12] = [
        AttackId::SweepingBeam,
        AttackId::RisingSpikes,
        AttackId::MeleeSlam,
        AttackId::LobbedShot,
        AttackId::ConeSpray,
        AttackId::Summon,
        AttackId::SkyHazard,
        AttackId::Lunge,
        AttackId::ExpandingRing,
        AttackId::DualBeams,
        AttackId::Nova,
        AttackId::Roar,
    ];
}

/// Discrete kind of boss attack-cycle state, for display and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossStateKind {
    #[default]
    Idle,
    Executing,
    Recovering,
    Stunned,
    Transitioning,
    Incapacitated,
}

/// Who fired a projectile. Player-owned includes the ally squad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Boss,
}

/// Projectile variant. Selects visuals on the host side and, for `Homing`,
/// steering behaviour in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    Standard,
    Charged,
    Ally,
    Beam,
    Orb,
    Homing,
    Shard,
    Spike,
    Meteor,
    MinionBolt,
}

/// Which part of the boss a hit landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitZone {
    WeakPoint,
    Body,
}

/// What injured the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageSource {
    Projectile(ProjectileKind),
    MinionContact,
    Ring,
    Roar,
    Lunge,
}

/// Final result of an encounter attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Victory,
    Defeat,
}

/// Top-level encounter status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum EncounterStatus {
    /// Combat running.
    #[default]
    Active,
    /// Scripted ending in progress; `remaining_secs` until the result is final.
    Ending { outcome: Outcome, remaining_secs: f32 },
    /// Result delivered.
    Finished { outcome: Outcome },
    /// Torn down by the host; ticks are inert.
    TornDown,
}

/// Host flash tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlashColor {
    White,
    Red,
    Gold,
    Violet,
}
