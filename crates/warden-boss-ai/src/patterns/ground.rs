//! Area attacks tied to the arena: rising spikes, falling meteors, summons and
//! expanding shockwave rings.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use warden_core::components::RingHazard;
use warden_core::constants::*;
use warden_core::enums::ProjectileKind;

use super::{telegraph, unit, AttackContext, AttackOutput, ProjectileSpawn};

/// Delay before the first meteor.
const SKY_WINDUP: f32 = 0.5;

/// Delay before the first ring.
const RING_WINDUP: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct SpikeScratch {
    pub count: u32,
    pub emitted: u32,
}

impl SpikeScratch {
    pub fn new(phase: u8) -> Self {
        Self {
            count: SPIKE_BASE_COUNT + SPIKE_COUNT_PER_PHASE * (phase as u32).saturating_sub(1),
            emitted: 0,
        }
    }

    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        t: f32,
        ctx: &AttackContext,
        rng: &mut R,
        out: &mut AttackOutput,
    ) {
        out.telegraph = telegraph(t, SPIKE_INTERVAL);

        // Spike i erupts at (i + 1) * interval under the player's current spot.
        while self.emitted < self.count && SPIKE_INTERVAL * (self.emitted + 1) as f32 <= t {
            let offset = ctx.arena.scatter(unit(rng), unit(rng), SPIKE_SCATTER);
            let mut position = ctx.player_position + offset;
            position.y = ctx.arena.ground_y() - 1.0;
            out.projectiles.push(ProjectileSpawn {
                position,
                velocity: Vec3::Y * SPIKE_SPEED,
                kind: ProjectileKind::Spike,
                damage: SPIKE_DAMAGE,
                lifetime: SPIKE_LIFETIME,
                radius: SPIKE_RADIUS,
            });
            self.emitted += 1;
        }

        let last = SPIKE_INTERVAL * self.count as f32;
        out.finished = self.emitted >= self.count && t >= last + SPIKE_LIFETIME;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkyScratch {
    pub next_drop: f32,
}

impl SkyScratch {
    pub fn new() -> Self {
        Self {
            next_drop: SKY_WINDUP,
        }
    }

    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        t: f32,
        ctx: &AttackContext,
        rng: &mut R,
        out: &mut AttackOutput,
    ) {
        out.telegraph = telegraph(t, SKY_WINDUP);

        while self.next_drop <= t && self.next_drop < SKY_DURATION {
            let offset = ctx.arena.scatter(unit(rng), unit(rng), SKY_SCATTER);
            let mut position = ctx.player_position + offset;
            position.y = ctx.arena.sky_height();
            out.projectiles.push(ProjectileSpawn {
                position,
                velocity: Vec3::NEG_Y * SKY_SPEED,
                kind: ProjectileKind::Meteor,
                damage: SKY_DAMAGE,
                lifetime: SKY_LIFETIME,
                radius: SKY_RADIUS,
            });
            self.next_drop += SKY_INTERVAL;
        }

        out.finished = t >= SKY_DURATION;
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummonScratch {
    pub summoned: bool,
}

impl SummonScratch {
    pub fn advance(&mut self, t: f32, ctx: &AttackContext, out: &mut AttackOutput) {
        out.telegraph = telegraph(t, SUMMON_AT);

        if !self.summoned && t >= SUMMON_AT {
            self.summoned = true;
            let count = SUMMON_BASE_COUNT + ctx.phase as u32;
            let center = ctx.boss_position + Vec3::Y * EMIT_HEIGHT;
            for i in 0..count {
                let angle = ctx.boss_yaw + TAU * i as f32 / count as f32;
                let spot = center + ctx.arena.plane_dir(angle) * MINION_SPAWN_RADIUS;
                out.minions.push(ctx.arena.clamp(spot));
            }
        }

        out.finished = t >= SUMMON_END;
    }
}

/// Staggered shockwave rings expanding from the boss's home spot. The rings
/// live in the attack's hazard list and vanish when it ends.
#[derive(Debug, Clone, PartialEq)]
pub struct RingScratch {
    pub count: u32,
    pub spawned: u32,
}

impl RingScratch {
    pub fn new(phase: u8) -> Self {
        Self {
            count: (phase as u32).saturating_sub(1).clamp(1, RING_MAX_COUNT),
            spawned: 0,
        }
    }

    pub fn advance(
        &mut self,
        t: f32,
        ctx: &AttackContext,
        hazards: &mut Vec<RingHazard>,
        out: &mut AttackOutput,
    ) {
        out.telegraph = telegraph(t, RING_WINDUP);

        for ring in hazards.iter_mut() {
            ring.radius = (ring.radius + ring.growth * ctx.dt).min(ring.max_radius);
        }

        while self.spawned < self.count && RING_WINDUP + RING_STAGGER * self.spawned as f32 <= t {
            hazards.push(RingHazard {
                center: ctx.boss_home,
                radius: 0.0,
                growth: RING_GROWTH,
                max_radius: RING_MAX_RADIUS,
                band: RING_BAND,
                damage: RING_DAMAGE,
                hit_player: false,
            });
            self.spawned += 1;
        }

        out.finished = self.spawned >= self.count
            && hazards.iter().all(|ring| ring.radius >= ring.max_radius);
    }
}
