//! Ally squad system: orbit between player and boss, auto-fire at the weak
//! point, dismiss when the duration runs out.

use std::f32::consts::TAU;

use glam::Vec3;
use hecs::World;
use tracing::debug;

use warden_core::arena::Arena;
use warden_core::components::AllySquad;
use warden_core::config::PlayerTuning;
use warden_core::constants::*;
use warden_core::enums::{Owner, ProjectileKind};
use warden_core::events::EncounterEvent;

use crate::world_setup;

/// Activate the squad. The caller has already checked and spent the focus.
pub fn summon(
    ally: &mut AllySquad,
    player_position: Vec3,
    tuning: &PlayerTuning,
    events: &mut Vec<EncounterEvent>,
) {
    *ally = AllySquad {
        active: true,
        remaining_secs: tuning.ally_duration,
        fire_cooldown: tuning.ally_fire_interval,
        orbit_angle: 0.0,
        members: ALLY_COUNT,
        anchor: player_position,
    };
    debug!(duration = tuning.ally_duration, "ally squad summoned");
    events.push(EncounterEvent::AllySummoned {
        duration_secs: tuning.ally_duration,
    });
}

/// Deactivate the squad, if active.
pub fn dismiss(ally: &mut AllySquad, events: &mut Vec<EncounterEvent>) {
    if !ally.active {
        return;
    }
    *ally = AllySquad::default();
    debug!("ally squad dismissed");
    events.push(EncounterEvent::AllyDismissed);
}

/// Current member positions around the anchor.
pub fn member_positions(ally: &AllySquad, arena: &Arena) -> Vec<Vec3> {
    (0..ally.members)
        .map(|i| {
            let angle = ally.orbit_angle + TAU * i as f32 / ally.members as f32;
            ally.anchor + arena.plane_dir(angle) * ALLY_ORBIT_RADIUS
        })
        .collect()
}

/// Run the ally system for one tick.
#[allow(clippy::too_many_arguments)]
pub fn run(
    ally: &mut AllySquad,
    dt: f32,
    player_position: Vec3,
    boss_position: Vec3,
    weak_point: Vec3,
    tuning: &PlayerTuning,
    arena: &Arena,
    world: &mut World,
    seq: &mut u64,
    events: &mut Vec<EncounterEvent>,
) {
    if !ally.active {
        return;
    }

    ally.remaining_secs -= dt;
    if ally.remaining_secs <= 0.0 {
        dismiss(ally, events);
        return;
    }

    let lift = if arena.is_side_view() {
        Vec3::ZERO
    } else {
        Vec3::Y * ALLY_ORBIT_HEIGHT
    };
    ally.anchor = player_position + (boss_position - player_position) * ALLY_ANCHOR_FRACTION + lift;
    ally.orbit_angle = (ally.orbit_angle + ALLY_ORBIT_SPEED * dt).rem_euclid(TAU);

    ally.fire_cooldown -= dt;
    if ally.fire_cooldown > 0.0 {
        return;
    }
    ally.fire_cooldown += tuning.ally_fire_interval;

    for origin in member_positions(ally, arena) {
        let dir = (weak_point - origin).normalize_or_zero();
        world_setup::spawn_projectile(
            world,
            seq,
            Owner::Player,
            ProjectileKind::Ally,
            origin,
            dir * ALLY_SHOT_SPEED,
            tuning.ally_damage,
            ALLY_SHOT_LIFETIME,
            SHOT_RADIUS,
        );
    }
}
