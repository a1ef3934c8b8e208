//! Cleanup system: removes expired, out-of-bounds or dead pooled entities.

use hecs::{Entity, World};

use warden_core::arena::Arena;
use warden_core::components::{Minion, Projectile};
use warden_core::constants::OOB_MARGIN;
use warden_core::types::Position;

/// Remove projectiles whose lifetime ran out or that left the arena plus a
/// margin, and minions at or below zero health.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, arena: &Arena, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (pos, proj)) in world.query_mut::<(&Position, &Projectile)>() {
        if proj.lifetime_secs <= 0.0 || !arena.in_bounds(pos.0, OOB_MARGIN) {
            despawn_buffer.push(entity);
        }
    }

    for (entity, minion) in world.query_mut::<&Minion>() {
        if minion.health <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
