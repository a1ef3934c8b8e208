//! Boss attack-cycle finite state machine.
//!
//! Pure functions that compute cycle transitions from the current state and
//! the frame delta. Attack selection is a weighted draw over the phase roster
//! that never repeats the previous attack unless the roster has one entry.
//! No ECS dependency; operates on plain data.

use rand::Rng;

use warden_core::enums::{AttackId, BossStateKind};

/// Attack-cycle state with its countdowns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackCycle {
    /// Waiting `cooldown` seconds before picking the next attack.
    Idle { cooldown: f32 },
    /// An attack script is running.
    Executing,
    /// Short pause after an attack.
    Recovering { remaining: f32 },
    Stunned { remaining: f32 },
    /// Phase change in progress; the cycle is suspended.
    Transitioning { remaining: f32 },
    /// Victory sequence; the boss no longer acts.
    Incapacitated,
}

impl AttackCycle {
    pub fn kind(&self) -> BossStateKind {
        match self {
            AttackCycle::Idle { .. } => BossStateKind::Idle,
            AttackCycle::Executing => BossStateKind::Executing,
            AttackCycle::Recovering { .. } => BossStateKind::Recovering,
            AttackCycle::Stunned { .. } => BossStateKind::Stunned,
            AttackCycle::Transitioning { .. } => BossStateKind::Transitioning,
            AttackCycle::Incapacitated => BossStateKind::Incapacitated,
        }
    }
}

/// Input to the cycle FSM for one tick.
pub struct CycleContext {
    pub cycle: AttackCycle,
    pub dt: f32,
    /// Idle time granted after recovery or stun, already scaled by phase.
    pub attack_cooldown: f32,
    /// Idle time granted when a phase transition finishes.
    pub post_transition_delay: f32,
}

/// Output from the cycle FSM.
pub struct CycleUpdate {
    pub cycle: AttackCycle,
    /// The idle timer expired: the caller must select and start an attack.
    pub begin_attack: bool,
    pub changed: bool,
}

/// Evaluate the FSM for one tick.
pub fn evaluate(ctx: &CycleContext) -> CycleUpdate {
    let stay = |cycle| CycleUpdate {
        cycle,
        begin_attack: false,
        changed: false,
    };
    let go = |cycle| CycleUpdate {
        cycle,
        begin_attack: false,
        changed: true,
    };

    match ctx.cycle {
        AttackCycle::Idle { cooldown } => {
            let cooldown = cooldown - ctx.dt;
            if cooldown <= 0.0 {
                CycleUpdate {
                    cycle: AttackCycle::Executing,
                    begin_attack: true,
                    changed: true,
                }
            } else {
                stay(AttackCycle::Idle { cooldown })
            }
        }
        // Leaves only through the end-attack operation.
        AttackCycle::Executing => stay(AttackCycle::Executing),
        AttackCycle::Recovering { remaining } => {
            let remaining = remaining - ctx.dt;
            if remaining <= 0.0 {
                go(AttackCycle::Idle {
                    cooldown: ctx.attack_cooldown,
                })
            } else {
                stay(AttackCycle::Recovering { remaining })
            }
        }
        AttackCycle::Stunned { remaining } => {
            let remaining = remaining - ctx.dt;
            if remaining <= 0.0 {
                go(AttackCycle::Idle {
                    cooldown: ctx.attack_cooldown,
                })
            } else {
                stay(AttackCycle::Stunned { remaining })
            }
        }
        AttackCycle::Transitioning { remaining } => {
            let remaining = remaining - ctx.dt;
            if remaining <= 0.0 {
                go(AttackCycle::Idle {
                    cooldown: ctx.post_transition_delay,
                })
            } else {
                stay(AttackCycle::Transitioning { remaining })
            }
        }
        AttackCycle::Incapacitated => stay(AttackCycle::Incapacitated),
    }
}

/// Whether a stun may interrupt the cycle in this state.
pub fn can_stun(cycle: &AttackCycle) -> bool {
    matches!(
        cycle,
        AttackCycle::Idle { .. } | AttackCycle::Recovering { .. }
    )
}

/// Pick the next attack from a weighted roster.
///
/// `last` is excluded whenever the roster offers anything else. Entries with
/// zero weight are never picked. Returns `None` only for an empty roster.
pub fn select_attack<R: Rng + ?Sized>(
    roster: &[(AttackId, u32)],
    last: Option<AttackId>,
    rng: &mut R,
) -> Option<AttackId> {
    let live: Vec<(AttackId, u32)> = roster.iter().copied().filter(|(_, w)| *w > 0).collect();
    let candidates: Vec<(AttackId, u32)> = if live.len() > 1 {
        live.iter().copied().filter(|(id, _)| Some(*id) != last).collect()
    } else {
        live
    };

    let total: u32 = candidates.iter().map(|(_, w)| w).sum();
    if total == 0 {
        return None;
    }

    let mut roll = rng.gen_range(0..total);
    for (id, weight) in &candidates {
        if roll < *weight {
            return Some(*id);
        }
        roll -= weight;
    }
    candidates.last().map(|(id, _)| *id)
}
