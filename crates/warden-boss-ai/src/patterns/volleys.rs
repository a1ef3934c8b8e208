//! Aimed volleys: lead-aimed lobbed orbs and the jittered cone spray.

use rand::Rng;

use warden_core::constants::*;
use warden_core::enums::ProjectileKind;

use super::{emit_origin, telegraph, unit, AttackContext, AttackOutput, ProjectileSpawn};

/// Wind-up before the first lob.
const LOB_WINDUP: f32 = 0.6;

/// Linger after the last lob before the attack ends.
const LOB_TAIL: f32 = 0.5;

/// Wind-up before the cone starts.
const CONE_WINDUP: f32 = 0.4;

/// Vertical jitter of cone bolts in 3D (radians).
const CONE_PITCH_JITTER: f32 = 0.08;

#[derive(Debug, Clone, PartialEq)]
pub struct LobScratch {
    pub count: u32,
    pub fired: u32,
    pub next_fire: f32,
}

impl LobScratch {
    pub fn new(phase: u8) -> Self {
        Self {
            count: LOB_BASE_COUNT + phase as u32,
            fired: 0,
            next_fire: LOB_WINDUP,
        }
    }

    pub fn advance(&mut self, t: f32, ctx: &AttackContext, out: &mut AttackOutput) {
        out.telegraph = telegraph(t, LOB_WINDUP);

        let kind = if ctx.phase >= LOB_HOMING_PHASE {
            ProjectileKind::Homing
        } else {
            ProjectileKind::Orb
        };

        while self.fired < self.count && self.next_fire <= t {
            let origin = emit_origin(ctx);
            let flight = origin.distance(ctx.player_position) / LOB_SPEED;
            let predicted = ctx.player_position + ctx.player_velocity * flight * LOB_LEAD_FACTOR;
            let dir = (predicted - origin).normalize_or_zero();
            out.projectiles.push(ProjectileSpawn {
                position: origin,
                velocity: dir * LOB_SPEED,
                kind,
                damage: LOB_DAMAGE,
                lifetime: LOB_LIFETIME,
                radius: LOB_RADIUS,
            });
            self.fired += 1;
            self.next_fire += LOB_INTERVAL;
        }

        let last = LOB_WINDUP + LOB_INTERVAL * self.count.saturating_sub(1) as f32;
        out.finished = self.fired >= self.count && t >= last + LOB_TAIL;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConeScratch {
    pub next_emit: f32,
}

impl ConeScratch {
    pub fn new() -> Self {
        Self {
            next_emit: CONE_WINDUP,
        }
    }

    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        t: f32,
        ctx: &AttackContext,
        rng: &mut R,
        out: &mut AttackOutput,
    ) {
        out.telegraph = telegraph(t, CONE_WINDUP);
        let end = CONE_WINDUP + CONE_DURATION;
        let origin = emit_origin(ctx);

        while self.next_emit <= t && self.next_emit < end {
            let angle =
                ctx.arena.angle_to(origin, ctx.player_position) + CONE_HALF_ANGLE * unit(rng);
            let mut dir = ctx.arena.aim_along(angle, origin, ctx.player_position);
            if !ctx.arena.is_side_view() {
                dir.y += CONE_PITCH_JITTER * unit(rng);
                dir = dir.normalize_or_zero();
            }
            out.projectiles.push(ProjectileSpawn {
                position: origin,
                velocity: dir * CONE_SPEED,
                kind: ProjectileKind::Shard,
                damage: CONE_DAMAGE,
                lifetime: CONE_LIFETIME,
                radius: BOSS_PROJECTILE_RADIUS,
            });
            self.next_emit += CONE_INTERVAL;
        }

        out.finished = t >= end;
    }
}
