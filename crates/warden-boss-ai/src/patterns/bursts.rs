//! Instantaneous bursts after a telegraph: melee slam, nova and roar.

use std::f32::consts::TAU;

use glam::Vec3;

use warden_core::constants::*;
use warden_core::enums::{FlashColor, ProjectileKind};
use warden_core::events::EncounterEvent;

use super::{
    burst_origin, emit_origin, radial_ring, telegraph, AttackContext, AttackOutput,
    ProjectileSpawn, Pulse,
};

/// Elevation rings used by the nova in the 3D arena (radians).
const NOVA_ELEVATIONS: [f32; 3] = [-0.12, 0.05, 0.3];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlamScratch {
    pub slammed: bool,
}

impl SlamScratch {
    pub fn advance(&mut self, t: f32, ctx: &AttackContext, out: &mut AttackOutput) {
        out.telegraph = telegraph(t, SLAM_WINDUP);

        if !self.slammed && t >= SLAM_WINDUP {
            self.slammed = true;
            let extra_phases = (ctx.phase as u32).saturating_sub(1);
            let count = SLAM_BASE_SHARDS + SLAM_SHARDS_PER_PHASE * extra_phases;
            radial_ring(
                ctx,
                burst_origin(ctx),
                count,
                SLAM_SPEED,
                SLAM_DAMAGE,
                SLAM_LIFETIME,
                ProjectileKind::Shard,
                out,
            );
            out.events.push(EncounterEvent::ScreenShake {
                magnitude: SLAM_SHAKE,
            });
        }

        out.finished = t >= SLAM_END;
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NovaScratch {
    pub fired: bool,
}

impl NovaScratch {
    pub fn advance(&mut self, t: f32, ctx: &AttackContext, out: &mut AttackOutput) {
        out.telegraph = telegraph(t, NOVA_TELEGRAPH);

        if !self.fired && t >= NOVA_TELEGRAPH {
            self.fired = true;
            let origin = emit_origin(ctx);

            if ctx.arena.is_side_view() {
                radial_ring(
                    ctx,
                    origin,
                    NOVA_PROJECTILES,
                    NOVA_SPEED,
                    NOVA_DAMAGE,
                    NOVA_LIFETIME,
                    ProjectileKind::Orb,
                    out,
                );
            } else {
                let per_ring = NOVA_PROJECTILES / NOVA_ELEVATIONS.len() as u32;
                for (ring, elevation) in NOVA_ELEVATIONS.iter().enumerate() {
                    // Stagger rings so the gaps don't line up.
                    let offset = ring as f32 * 0.5 * TAU / per_ring as f32;
                    for i in 0..per_ring {
                        let angle = ctx.boss_yaw + offset + TAU * i as f32 / per_ring as f32;
                        let flat = ctx.arena.plane_dir(angle) * elevation.cos();
                        let dir = flat + Vec3::Y * elevation.sin();
                        out.projectiles.push(ProjectileSpawn {
                            position: origin,
                            velocity: dir * NOVA_SPEED,
                            kind: ProjectileKind::Orb,
                            damage: NOVA_DAMAGE,
                            lifetime: NOVA_LIFETIME,
                            radius: BOSS_PROJECTILE_RADIUS,
                        });
                    }
                }
            }

            out.events.push(EncounterEvent::ScreenShake {
                magnitude: NOVA_SHAKE,
            });
            out.events.push(EncounterEvent::Flash {
                color: FlashColor::Violet,
                intensity: 0.8,
            });
        }

        out.finished = t >= NOVA_END;
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoarScratch {
    pub pulsed: bool,
}

impl RoarScratch {
    pub fn advance(&mut self, t: f32, ctx: &AttackContext, out: &mut AttackOutput) {
        out.telegraph = telegraph(t, ROAR_TELEGRAPH);

        if !self.pulsed && t >= ROAR_TELEGRAPH {
            self.pulsed = true;
            out.pulses.push(Pulse {
                center: ctx.boss_position,
                radius: ROAR_RANGE,
                damage: ROAR_DAMAGE,
                slow_factor: ROAR_SLOW_FACTOR,
                slow_secs: ROAR_SLOW_DURATION,
            });
            radial_ring(
                ctx,
                burst_origin(ctx),
                ROAR_RING_COUNT,
                ROAR_RING_SPEED,
                ROAR_RING_DAMAGE,
                SLAM_LIFETIME,
                ProjectileKind::Shard,
                out,
            );
            out.events.push(EncounterEvent::ScreenShake {
                magnitude: ROAR_SHAKE,
            });
        }

        out.finished = t >= ROAR_END;
    }
}
