//! Boss system: runs the attack-cycle FSM, advances the executing attack and
//! applies its output, tracks the player with facing and the weak point.

use hecs::World;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use warden_boss_ai::fsm::{self, AttackCycle, CycleContext};
use warden_boss_ai::patterns::{ActiveAttack, AttackContext};
use warden_boss_ai::profiles::get_profile;
use warden_core::arena::Arena;
use warden_core::components::PlayerCombat;
use warden_core::config::BossTuning;
use warden_core::enums::AttackId;
use warden_core::events::EncounterEvent;
use warden_core::types::{angle_delta, smoothing};

use crate::combatants::Boss;
use crate::world_setup;

/// Run the boss system for one tick.
#[allow(clippy::too_many_arguments)]
pub fn run(
    boss: &mut Boss,
    dt: f32,
    player: &PlayerCombat,
    tuning: &BossTuning,
    arena: &Arena,
    rng: &mut ChaCha8Rng,
    world: &mut World,
    seq: &mut u64,
    events: &mut Vec<EncounterEvent>,
) {
    boss.stun_immunity = (boss.stun_immunity - dt).max(0.0);
    boss.pulses.clear();

    if boss.cycle == AttackCycle::Incapacitated {
        return;
    }

    let profile = get_profile(boss.phase, tuning, arena);
    let update = fsm::evaluate(&CycleContext {
        cycle: boss.cycle,
        dt,
        attack_cooldown: profile.attack_cooldown,
        post_transition_delay: tuning.post_transition_delay,
    });
    boss.cycle = update.cycle;
    if update.changed {
        debug!(cycle = ?boss.cycle, phase = boss.phase, "boss cycle changed");
    }

    if update.begin_attack {
        match fsm::select_attack(&profile.roster, boss.last_attack, rng) {
            Some(id) => start_attack(boss, id, events),
            None => {
                boss.cycle = AttackCycle::Idle {
                    cooldown: profile.attack_cooldown,
                }
            }
        }
    }

    if boss.cycle == AttackCycle::Executing {
        advance_attack(boss, dt, player, arena, rng, world, seq, events);
        let finished = boss.attack.is_none();
        if finished {
            boss.cycle = AttackCycle::Recovering {
                remaining: profile.recovery_pause,
            };
        }
    }

    if !matches!(boss.cycle, AttackCycle::Stunned { .. }) {
        let target = arena.angle_to(boss.position, player.position);
        boss.yaw += angle_delta(boss.yaw, target) * smoothing(tuning.turn_rate, dt);
    }
    boss.weak_point = boss.compute_weak_point(arena);
}

/// Begin `id` with fresh progress and scratch.
pub fn start_attack(boss: &mut Boss, id: AttackId, events: &mut Vec<EncounterEvent>) {
    debug!(attack = ?id, phase = boss.phase, "boss attack started");
    boss.attack = Some(ActiveAttack::start(id, boss.phase));
    boss.last_attack = Some(id);
    boss.cycle = AttackCycle::Executing;
    events.push(EncounterEvent::AttackStarted { attack: id });
}

/// Shared end-attack operation: drops the attack with its scratch and ring
/// hazards, returns the body home, clears contact damage and telegraph.
/// The caller decides the next cycle state. Returns the ended attack.
pub fn end_attack(
    boss: &mut Boss,
    forced: bool,
    events: &mut Vec<EncounterEvent>,
) -> Option<AttackId> {
    let ended = boss.attack.take()?;
    boss.position = boss.home;
    boss.contact_damage = 0.0;
    boss.telegraph = 0.0;
    debug!(attack = ?ended.id, forced, "boss attack ended");
    events.push(EncounterEvent::AttackEnded {
        attack: ended.id,
        forced,
    });
    Some(ended.id)
}

#[allow(clippy::too_many_arguments)]
fn advance_attack(
    boss: &mut Boss,
    dt: f32,
    player: &PlayerCombat,
    arena: &Arena,
    rng: &mut ChaCha8Rng,
    world: &mut World,
    seq: &mut u64,
    events: &mut Vec<EncounterEvent>,
) {
    let ctx = AttackContext {
        arena,
        phase: boss.phase,
        dt,
        boss_home: boss.home,
        boss_position: boss.position,
        boss_yaw: boss.yaw,
        player_position: player.position,
        player_velocity: player.velocity,
    };
    let Some(attack) = boss.attack.as_mut() else {
        return;
    };
    let out = attack.advance(&ctx, rng);

    for spawn in &out.projectiles {
        world_setup::spawn_boss_projectile(world, seq, spawn);
    }
    if !out.minions.is_empty() {
        debug!(count = out.minions.len(), "minions summoned");
    }
    for position in &out.minions {
        world_setup::spawn_minion(world, seq, *position);
    }
    boss.pulses.extend(out.pulses.iter().copied());
    events.extend(out.events);
    if let Some(position) = out.body_position {
        boss.position = position;
    }
    boss.contact_damage = out.contact_damage;
    boss.telegraph = out.telegraph;

    if out.finished {
        end_attack(boss, false, events);
    }
}
