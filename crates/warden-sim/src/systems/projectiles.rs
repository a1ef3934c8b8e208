//! Projectile kinematics: homing steering, integration and lifetime.
//!
//! position += velocity * dt for every projectile. Homing projectiles first
//! accelerate toward the live player position, clamped to a max speed.

use glam::Vec3;
use hecs::World;

use warden_core::components::Projectile;
use warden_core::constants::{HOMING_MAX_SPEED, HOMING_TURN_ACCEL};
use warden_core::enums::ProjectileKind;
use warden_core::types::{Position, Velocity};

pub fn run(world: &mut World, dt: f32, player_position: Vec3) {
    for (_entity, (pos, vel, proj)) in
        world.query_mut::<(&mut Position, &mut Velocity, &mut Projectile)>()
    {
        if proj.kind == ProjectileKind::Homing {
            let toward = (player_position - pos.0).normalize_or_zero();
            vel.0 = (vel.0 + toward * HOMING_TURN_ACCEL * dt).clamp_length_max(HOMING_MAX_SPEED);
        }
        pos.0 += vel.0 * dt;
        proj.lifetime_secs -= dt;
    }
}
