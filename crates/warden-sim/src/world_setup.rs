//! Entity spawn factories for the encounter's pooled objects.
//!
//! Every spawn takes the next value of the encounter's sequence counter so
//! systems can recover insertion order from the hecs world.

use glam::Vec3;
use hecs::World;

use warden_boss_ai::patterns::ProjectileSpawn;
use warden_core::components::{Minion, Projectile};
use warden_core::constants::*;
use warden_core::enums::{Owner, ProjectileKind};
use warden_core::types::{Position, Velocity};

/// Hand out the next spawn sequence number.
pub fn next_seq(seq: &mut u64) -> u64 {
    let s = *seq;
    *seq += 1;
    s
}

/// Spawn a projectile entity.
#[allow(clippy::too_many_arguments)]
pub fn spawn_projectile(
    world: &mut World,
    seq: &mut u64,
    owner: Owner,
    kind: ProjectileKind,
    position: Vec3,
    velocity: Vec3,
    damage: f32,
    lifetime: f32,
    radius: f32,
) -> hecs::Entity {
    let projectile = Projectile {
        owner,
        kind,
        damage,
        lifetime_secs: lifetime,
        radius,
        seq: next_seq(seq),
    };
    world.spawn((Position(position), Velocity(velocity), projectile))
}

/// Spawn a boss-owned projectile requested by an attack script.
pub fn spawn_boss_projectile(
    world: &mut World,
    seq: &mut u64,
    spawn: &ProjectileSpawn,
) -> hecs::Entity {
    spawn_projectile(
        world,
        seq,
        Owner::Boss,
        spawn.kind,
        spawn.position,
        spawn.velocity,
        spawn.damage,
        spawn.lifetime,
        spawn.radius,
    )
}

/// Spawn a minion at rest.
pub fn spawn_minion(world: &mut World, seq: &mut u64, position: Vec3) -> hecs::Entity {
    let minion = Minion {
        health: MINION_HEALTH,
        fire_cooldown: MINION_FIRE_COOLDOWN,
        seq: next_seq(seq),
    };
    world.spawn((Position(position), Velocity(Vec3::ZERO), minion))
}

/// Remove every boss-owned projectile. Returns how many were removed.
pub fn purge_boss_projectiles(world: &mut World, despawn_buffer: &mut Vec<hecs::Entity>) -> usize {
    despawn_buffer.clear();
    for (entity, proj) in world.query_mut::<&Projectile>() {
        if proj.owner == Owner::Boss {
            despawn_buffer.push(entity);
        }
    }
    let count = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    count
}
