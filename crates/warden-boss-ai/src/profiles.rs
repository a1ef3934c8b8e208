//! Phase-specific behavioral profiles.
//!
//! Consolidates per-phase attack rosters and pacing for the boss FSM. The
//! roster grows with phase; a few attacks are gated to later phases and the
//! side-view arena drops the lunge (the boss is anchored to the screen edge).

use warden_core::arena::Arena;
use warden_core::config::BossTuning;
use warden_core::constants::*;
use warden_core::enums::AttackId;

/// Pacing and roster for one phase.
pub struct PhaseProfile {
    /// Idle time between attacks (s).
    pub attack_cooldown: f32,
    /// Pause after an attack ends (s).
    pub recovery_pause: f32,
    /// Weighted attack pool.
    pub roster: Vec<(AttackId, u32)>,
}

/// First phase in which an attack may be selected.
pub fn min_phase(attack: AttackId) -> u8 {
    match attack {
        AttackId::SweepingBeam
        | AttackId::RisingSpikes
        | AttackId::MeleeSlam
        | AttackId::LobbedShot
        | AttackId::ConeSpray => 1,
        AttackId::Summon | AttackId::Lunge => 2,
        AttackId::ExpandingRing => RING_MIN_PHASE,
        AttackId::Roar => ROAR_MIN_PHASE,
        AttackId::SkyHazard => SKY_MIN_PHASE,
        AttackId::DualBeams | AttackId::Nova => MAX_PHASE,
    }
}

/// Selection weight of an attack once unlocked.
fn weight(attack: AttackId) -> u32 {
    match attack {
        AttackId::SweepingBeam | AttackId::MeleeSlam | AttackId::LobbedShot => 3,
        AttackId::Roar => 1,
        _ => 2,
    }
}

/// Build the weighted roster for `phase` in `arena`.
pub fn roster(phase: u8, arena: &Arena) -> Vec<(AttackId, u32)> {
    AttackId::ALL
        .iter()
        .copied()
        .filter(|a| min_phase(*a) <= phase)
        .filter(|a| !(arena.is_side_view() && *a == AttackId::Lunge))
        .map(|a| (a, weight(a)))
        .collect()
}

/// Get the profile for `phase`, clamped to 1..=MAX_PHASE.
pub fn get_profile(phase: u8, tuning: &BossTuning, arena: &Arena) -> PhaseProfile {
    let phase = phase.clamp(1, MAX_PHASE);
    let idx = (phase - 1) as usize;
    PhaseProfile {
        attack_cooldown: tuning.attack_cooldowns[idx],
        recovery_pause: tuning.recovery_pauses[idx],
        roster: roster(phase, arena),
    }
}

/// Phase implied by a health ratio, before monotonicity is applied.
pub fn phase_for_ratio(ratio: f32, thresholds: &[f32; 3]) -> u8 {
    1 + thresholds.iter().filter(|t| ratio <= **t).count() as u8
}
