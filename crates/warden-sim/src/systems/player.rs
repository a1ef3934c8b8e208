//! Player combat system: timers, aim, dodge, movement, firing, combo decay,
//! focus and the ally summon.

use glam::Vec3;
use hecs::World;

use warden_core::arena::Arena;
use warden_core::commands::InputIntents;
use warden_core::components::{AllySquad, PlayerCombat};
use warden_core::config::{PlayerTuning, ShotTuning};
use warden_core::constants::*;
use warden_core::enums::{Owner, ProjectileKind};
use warden_core::events::EncounterEvent;
use warden_core::state::StatsView;
use warden_core::types::smoothing;

use crate::systems::ally;
use crate::world_setup;

/// Damage multiplier for a combo count: one tier per `COMBO_TIER_STEP` hits,
/// capped at the last tier.
pub fn tier_multiplier(combo: u32) -> f32 {
    let tier = (combo / COMBO_TIER_STEP).min(COMBO_MULTIPLIERS.len() as u32 - 1);
    COMBO_MULTIPLIERS[tier as usize]
}

/// Multiplier applied to player damage, raised to the ally floor while the
/// squad is active.
pub fn effective_multiplier(player: &PlayerCombat, ally: &AllySquad, tuning: &PlayerTuning) -> f32 {
    if ally.active {
        player.multiplier.max(tuning.ally_multiplier_floor)
    } else {
        player.multiplier
    }
}

/// Run the player system for one tick.
#[allow(clippy::too_many_arguments)]
pub fn run(
    player: &mut PlayerCombat,
    intents: &InputIntents,
    dt: f32,
    tuning: &PlayerTuning,
    arena: &Arena,
    world: &mut World,
    seq: &mut u64,
    ally: &mut AllySquad,
    stats: &mut StatsView,
    events: &mut Vec<EncounterEvent>,
) {
    tick_timers(player, dt);
    apply_aim(player, intents, arena);
    update_dodge(player, intents, dt, tuning, arena, stats, events);
    apply_movement(player, intents, dt, tuning, arena);
    fire(player, intents, dt, tuning, arena, world, seq, stats, events);

    player.focus = (player.focus + tuning.focus_passive_rate * dt).clamp(0.0, tuning.focus_max);

    if intents.summon && player.focus >= tuning.focus_max && !ally.active {
        player.focus = 0.0;
        ally::summon(ally, player.position, tuning, events);
    }
}

fn tick_timers(player: &mut PlayerCombat, dt: f32) {
    player.invincible_secs = (player.invincible_secs - dt).max(0.0);

    if player.slow_secs > 0.0 {
        player.slow_secs = (player.slow_secs - dt).max(0.0);
        if player.slow_secs == 0.0 {
            player.slow_factor = 1.0;
        }
    }

    if player.combo > 0 {
        player.combo_timer -= dt;
        if player.combo_timer <= 0.0 {
            player.combo = 0;
            player.combo_timer = 0.0;
            player.multiplier = tier_multiplier(0);
        }
    }
}

fn apply_aim(player: &mut PlayerCombat, intents: &InputIntents, arena: &Arena) {
    player.facing.yaw += intents.aim_delta.x * AIM_SENSITIVITY;
    if arena.is_side_view() {
        player.facing.pitch = 0.0;
    } else {
        let pitch = player.facing.pitch + intents.aim_delta.y * AIM_SENSITIVITY;
        player.facing.pitch = pitch.clamp(-MAX_PITCH, MAX_PITCH);
    }
}

/// Normalized local movement intent (only if longer than 1).
fn move_intent(intents: &InputIntents) -> Vec3 {
    if intents.move_axis.length_squared() > 1.0 {
        intents.move_axis.normalize()
    } else {
        intents.move_axis
    }
}

fn update_dodge(
    player: &mut PlayerCombat,
    intents: &InputIntents,
    dt: f32,
    tuning: &PlayerTuning,
    arena: &Arena,
    stats: &mut StatsView,
    events: &mut Vec<EncounterEvent>,
) {
    let dodge = &mut player.dodge;
    dodge.cooldown = (dodge.cooldown - dt).max(0.0);
    if dodge.active {
        dodge.remaining -= dt;
        if dodge.remaining <= 0.0 {
            dodge.active = false;
            dodge.remaining = 0.0;
        }
    }

    if !intents.dodge || dodge.active || dodge.cooldown > 0.0 {
        return;
    }

    let moving = arena.move_to_world(move_intent(intents), player.facing);
    let direction = if moving.length_squared() > 1e-6 {
        moving.normalize()
    } else {
        // Facing-forward, flattened onto the playing plane.
        arena.plane_dir(player.facing.yaw)
    };

    let dodge = &mut player.dodge;
    dodge.active = true;
    dodge.remaining = tuning.dodge_duration;
    dodge.cooldown = tuning.dodge_cooldown;
    dodge.direction = direction;
    player.invincible_secs = player
        .invincible_secs
        .max(tuning.dodge_duration + tuning.dodge_grace);
    player.focus = (player.focus + tuning.focus_per_dodge).min(tuning.focus_max);
    stats.dodges += 1;
    events.push(EncounterEvent::Dodged { direction });
}

fn apply_movement(
    player: &mut PlayerCombat,
    intents: &InputIntents,
    dt: f32,
    tuning: &PlayerTuning,
    arena: &Arena,
) {
    if player.dodge.active {
        player.velocity = player.dodge.direction * tuning.dodge_speed;
    } else {
        let speed = tuning.max_speed * player.slow_factor;
        let target = arena.move_to_world(move_intent(intents), player.facing) * speed;
        player.velocity += (target - player.velocity) * smoothing(tuning.move_smoothing, dt);
    }

    player.position = arena.clamp(player.position + player.velocity * dt);
}

/// Point shots leave from.
fn muzzle(player: &PlayerCombat, arena: &Arena, aim: Vec3) -> Vec3 {
    let eye = if arena.is_side_view() {
        Vec3::ZERO
    } else {
        Vec3::Y * PLAYER_EYE_HEIGHT
    };
    player.position + eye + aim * MUZZLE_OFFSET
}

#[allow(clippy::too_many_arguments)]
fn fire(
    player: &mut PlayerCombat,
    intents: &InputIntents,
    dt: f32,
    tuning: &PlayerTuning,
    arena: &Arena,
    world: &mut World,
    seq: &mut u64,
    stats: &mut StatsView,
    events: &mut Vec<EncounterEvent>,
) {
    let aim = arena.aim_dir(player.facing);
    let origin = muzzle(player, arena, aim);

    let mut charged_fired = false;
    if intents.charged_fire && player.charged_cooldown <= COOLDOWN_EPSILON {
        shoot(world, seq, ProjectileKind::Charged, &tuning.charged, origin, aim, stats, events);
        player.charged_cooldown += tuning.charged.cooldown;
        charged_fired = true;
    }
    if intents.fire && !charged_fired && player.fire_cooldown <= COOLDOWN_EPSILON {
        shoot(world, seq, ProjectileKind::Standard, &tuning.shot, origin, aim, stats, events);
        player.fire_cooldown += tuning.shot.cooldown;
    }

    // A held trigger keeps the sub-tick remainder; a released one floors at 0.
    player.charged_cooldown = drain_cooldown(player.charged_cooldown, dt, intents.charged_fire);
    player.fire_cooldown = drain_cooldown(player.fire_cooldown, dt, intents.fire);
}

fn drain_cooldown(cooldown: f32, dt: f32, held: bool) -> f32 {
    if held {
        cooldown - dt
    } else {
        (cooldown - dt).max(0.0)
    }
}

#[allow(clippy::too_many_arguments)]
fn shoot(
    world: &mut World,
    seq: &mut u64,
    kind: ProjectileKind,
    shot: &ShotTuning,
    origin: Vec3,
    aim: Vec3,
    stats: &mut StatsView,
    events: &mut Vec<EncounterEvent>,
) {
    world_setup::spawn_projectile(
        world,
        seq,
        Owner::Player,
        kind,
        origin,
        aim * shot.speed,
        shot.damage,
        shot.lifetime,
        shot.radius,
    );
    stats.shots_fired += 1;
    events.push(EncounterEvent::ShotFired { kind });
}
