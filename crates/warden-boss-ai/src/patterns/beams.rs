//! Beam attacks: a single sweeping beam and the final-phase dual beams.
//!
//! Beams are streams of narrow-spread bolts emitted on a fixed interval while
//! the emission angle follows a sinusoid around the direction captured at the
//! end of the wind-up.

use rand::Rng;

use warden_core::constants::*;
use warden_core::enums::ProjectileKind;

use super::{emit_origin, telegraph, unit, AttackContext, AttackOutput, ProjectileSpawn};

#[derive(Debug, Clone, PartialEq)]
pub struct BeamScratch {
    pub next_emit: f32,
    /// Centre of the sweep, captured when the wind-up ends.
    pub base_angle: Option<f32>,
}

impl BeamScratch {
    pub fn new() -> Self {
        Self {
            next_emit: BEAM_WINDUP,
            base_angle: None,
        }
    }

    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        t: f32,
        ctx: &AttackContext,
        rng: &mut R,
        out: &mut AttackOutput,
    ) {
        out.telegraph = telegraph(t, BEAM_WINDUP);
        if t < BEAM_WINDUP {
            return;
        }

        let origin = emit_origin(ctx);
        let base = *self
            .base_angle
            .get_or_insert_with(|| ctx.arena.angle_to(origin, ctx.player_position));
        let end = BEAM_WINDUP + BEAM_DURATION;

        while self.next_emit <= t && self.next_emit < end {
            let tau = self.next_emit - BEAM_WINDUP;
            let angle = base
                + BEAM_SWEEP_AMPLITUDE * (BEAM_SWEEP_FREQUENCY * tau).sin()
                + BEAM_SPREAD * unit(rng);
            out.projectiles
                .push(beam_bolt(ctx, origin, angle, ProjectileKind::Beam));
            self.next_emit += BEAM_EMIT_INTERVAL;
        }

        out.finished = t >= end;
    }
}

/// Two beams with mirrored angles that converge on the player and part again.
#[derive(Debug, Clone, PartialEq)]
pub struct DualBeamScratch {
    pub next_emit: f32,
    pub base_angle: Option<f32>,
}

impl DualBeamScratch {
    pub fn new() -> Self {
        Self {
            next_emit: DUAL_BEAM_WINDUP,
            base_angle: None,
        }
    }

    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        t: f32,
        ctx: &AttackContext,
        rng: &mut R,
        out: &mut AttackOutput,
    ) {
        out.telegraph = telegraph(t, DUAL_BEAM_WINDUP);
        if t < DUAL_BEAM_WINDUP {
            return;
        }

        let origin = emit_origin(ctx);
        let base = *self
            .base_angle
            .get_or_insert_with(|| ctx.arena.angle_to(origin, ctx.player_position));
        let end = DUAL_BEAM_WINDUP + DUAL_BEAM_DURATION;

        while self.next_emit <= t && self.next_emit < end {
            let tau = self.next_emit - DUAL_BEAM_WINDUP;
            let offset = DUAL_BEAM_SPREAD * (BEAM_SWEEP_FREQUENCY * tau).cos();
            for side in [1.0, -1.0] {
                let angle = base + side * offset + BEAM_SPREAD * unit(rng);
                out.projectiles
                    .push(beam_bolt(ctx, origin, angle, ProjectileKind::Beam));
            }
            self.next_emit += DUAL_BEAM_INTERVAL;
        }

        out.finished = t >= end;
    }
}

fn beam_bolt(
    ctx: &AttackContext,
    origin: glam::Vec3,
    angle: f32,
    kind: ProjectileKind,
) -> ProjectileSpawn {
    ProjectileSpawn {
        position: origin,
        velocity: ctx.arena.aim_along(angle, origin, ctx.player_position) * BEAM_SPEED,
        kind,
        damage: BEAM_DAMAGE,
        lifetime: BEAM_LIFETIME,
        radius: BOSS_PROJECTILE_RADIUS,
    }
}
