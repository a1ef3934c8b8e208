//! Minion behaviour: seek the player until inside the engagement radius,
//! then brake; fire bolts on an independent cooldown.

use glam::Vec3;
use hecs::World;

use warden_core::arena::Arena;
use warden_core::components::Minion;
use warden_core::constants::*;
use warden_core::enums::{Owner, ProjectileKind};
use warden_core::types::{smoothing, Position, Velocity};

use crate::world_setup;

pub fn run(world: &mut World, dt: f32, player_position: Vec3, arena: &Arena, seq: &mut u64) {
    let mut bolts: Vec<(u64, Vec3, Vec3)> = Vec::new();

    for (_entity, (pos, vel, minion)) in
        world.query_mut::<(&mut Position, &mut Velocity, &mut Minion)>()
    {
        let to_player = player_position - pos.0;
        let distance = to_player.length();
        if distance > MINION_ENGAGE_RADIUS {
            let desired = to_player / distance * MINION_SPEED;
            vel.0 += (desired - vel.0) * smoothing(MINION_DECEL, dt);
        } else {
            vel.0 *= 1.0 - smoothing(MINION_DECEL, dt);
        }
        pos.0 = arena.clamp(pos.0 + vel.0 * dt);

        minion.fire_cooldown -= dt;
        if minion.fire_cooldown <= 0.0 {
            minion.fire_cooldown += MINION_FIRE_COOLDOWN;
            let dir = (player_position - pos.0).normalize_or_zero();
            bolts.push((minion.seq, pos.0, dir * MINION_SHOT_SPEED));
        }
    }

    // Spawn in minion order so sequence numbers don't depend on storage layout.
    bolts.sort_by_key(|(minion_seq, _, _)| *minion_seq);
    for (_, position, velocity) in bolts {
        world_setup::spawn_projectile(
            world,
            seq,
            Owner::Boss,
            ProjectileKind::MinionBolt,
            position,
            velocity,
            MINION_SHOT_DAMAGE,
            MINION_SHOT_LIFETIME,
            BOSS_PROJECTILE_RADIUS,
        );
    }
}
