//! Scripted attack pattern library.
//!
//! Each attack is a variant of `AttackScript` carrying its own typed scratch
//! data. `ActiveAttack::advance` moves the attack's progress clock forward
//! and dispatches to the variant, which compares progress against its own
//! scheduled emission times and writes spawn requests, pulses and host
//! events into an `AttackOutput`. A script reports completion by setting
//! `finished`; the simulation then runs its shared end-attack operation,
//! which drops this value (scratch and ring hazards included).

mod beams;
mod bursts;
mod ground;
mod lunge;
mod volleys;

use glam::Vec3;
use rand::Rng;

use warden_core::arena::Arena;
use warden_core::components::RingHazard;
use warden_core::constants::*;
use warden_core::enums::{AttackId, ProjectileKind};
use warden_core::events::EncounterEvent;

pub use beams::{BeamScratch, DualBeamScratch};
pub use bursts::{NovaScratch, RoarScratch, SlamScratch};
pub use ground::{RingScratch, SkyScratch, SpikeScratch, SummonScratch};
pub use lunge::LungeScratch;
pub use volleys::{ConeScratch, LobScratch};

/// Read-only situation handed to a script each tick.
#[derive(Debug, Clone, Copy)]
pub struct AttackContext<'a> {
    pub arena: &'a Arena,
    pub phase: u8,
    pub dt: f32,
    /// Where the boss stands between attacks.
    pub boss_home: Vec3,
    pub boss_position: Vec3,
    pub boss_yaw: f32,
    pub player_position: Vec3,
    pub player_velocity: Vec3,
}

/// A projectile the script wants spawned (boss-owned).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpawn {
    pub position: Vec3,
    pub velocity: Vec3,
    pub kind: ProjectileKind,
    pub damage: f32,
    pub lifetime: f32,
    pub radius: f32,
}

/// An instantaneous area hit centred on the boss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    pub center: Vec3,
    pub radius: f32,
    pub damage: f32,
    pub slow_factor: f32,
    pub slow_secs: f32,
}

/// Everything a script produced this tick.
#[derive(Debug, Clone, Default)]
pub struct AttackOutput {
    pub projectiles: Vec<ProjectileSpawn>,
    /// Minion spawn points.
    pub minions: Vec<Vec3>,
    pub pulses: Vec<Pulse>,
    pub events: Vec<EncounterEvent>,
    /// Boss body override while the attack moves it.
    pub body_position: Option<Vec3>,
    /// Damage dealt by touching the boss body this tick.
    pub contact_damage: f32,
    /// Wind-up intensity, 0..1.
    pub telegraph: f32,
    /// Timeline complete; the caller must end the attack.
    pub finished: bool,
}

/// Per-attack typed scratch, one variant per pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum AttackScript {
    SweepingBeam(BeamScratch),
    RisingSpikes(SpikeScratch),
    MeleeSlam(SlamScratch),
    LobbedShot(LobScratch),
    ConeSpray(ConeScratch),
    Summon(SummonScratch),
    SkyHazard(SkyScratch),
    Lunge(LungeScratch),
    ExpandingRing(RingScratch),
    DualBeams(DualBeamScratch),
    Nova(NovaScratch),
    Roar(RoarScratch),
}

impl AttackScript {
    /// Fresh scratch for `attack` at `phase`.
    pub fn new(attack: AttackId, phase: u8) -> Self {
        match attack {
            AttackId::SweepingBeam => AttackScript::SweepingBeam(BeamScratch::new()),
            AttackId::RisingSpikes => AttackScript::RisingSpikes(SpikeScratch::new(phase)),
            AttackId::MeleeSlam => AttackScript::MeleeSlam(SlamScratch::default()),
            AttackId::LobbedShot => AttackScript::LobbedShot(LobScratch::new(phase)),
            AttackId::ConeSpray => AttackScript::ConeSpray(ConeScratch::new()),
            AttackId::Summon => AttackScript::Summon(SummonScratch::default()),
            AttackId::SkyHazard => AttackScript::SkyHazard(SkyScratch::new()),
            AttackId::Lunge => AttackScript::Lunge(LungeScratch::default()),
            AttackId::ExpandingRing => AttackScript::ExpandingRing(RingScratch::new(phase)),
            AttackId::DualBeams => AttackScript::DualBeams(DualBeamScratch::new()),
            AttackId::Nova => AttackScript::Nova(NovaScratch::default()),
            AttackId::Roar => AttackScript::Roar(RoarScratch::default()),
        }
    }

    pub fn id(&self) -> AttackId {
        match self {
            AttackScript::SweepingBeam(_) => AttackId::SweepingBeam,
            AttackScript::RisingSpikes(_) => AttackId::RisingSpikes,
            AttackScript::MeleeSlam(_) => AttackId::MeleeSlam,
            AttackScript::LobbedShot(_) => AttackId::LobbedShot,
            AttackScript::ConeSpray(_) => AttackId::ConeSpray,
            AttackScript::Summon(_) => AttackId::Summon,
            AttackScript::SkyHazard(_) => AttackId::SkyHazard,
            AttackScript::Lunge(_) => AttackId::Lunge,
            AttackScript::ExpandingRing(_) => AttackId::ExpandingRing,
            AttackScript::DualBeams(_) => AttackId::DualBeams,
            AttackScript::Nova(_) => AttackId::Nova,
            AttackScript::Roar(_) => AttackId::Roar,
        }
    }

    /// Advance the script to progress `t` (seconds since start).
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        t: f32,
        ctx: &AttackContext,
        hazards: &mut Vec<RingHazard>,
        rng: &mut R,
        out: &mut AttackOutput,
    ) {
        match self {
            AttackScript::SweepingBeam(s) => s.advance(t, ctx, rng, out),
            AttackScript::RisingSpikes(s) => s.advance(t, ctx, rng, out),
            AttackScript::MeleeSlam(s) => s.advance(t, ctx, out),
            AttackScript::LobbedShot(s) => s.advance(t, ctx, out),
            AttackScript::ConeSpray(s) => s.advance(t, ctx, rng, out),
            AttackScript::Summon(s) => s.advance(t, ctx, out),
            AttackScript::SkyHazard(s) => s.advance(t, ctx, rng, out),
            AttackScript::Lunge(s) => s.advance(t, ctx, out),
            AttackScript::ExpandingRing(s) => s.advance(t, ctx, hazards, out),
            AttackScript::DualBeams(s) => s.advance(t, ctx, rng, out),
            AttackScript::Nova(s) => s.advance(t, ctx, out),
            AttackScript::Roar(s) => s.advance(t, ctx, out),
        }
    }
}

/// The attack currently executing, with its progress clock and owned hazards.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveAttack {
    pub id: AttackId,
    /// Seconds since the attack started.
    pub progress: f32,
    pub script: AttackScript,
    /// Ring hazards spawned by this attack; dropped with it.
    pub hazards: Vec<RingHazard>,
}

impl ActiveAttack {
    pub fn start(id: AttackId, phase: u8) -> Self {
        Self {
            id,
            progress: 0.0,
            script: AttackScript::new(id, phase),
            hazards: Vec::new(),
        }
    }

    /// Move progress forward by `ctx.dt` and run the script.
    pub fn advance<R: Rng + ?Sized>(&mut self, ctx: &AttackContext, rng: &mut R) -> AttackOutput {
        self.progress += ctx.dt;
        let mut out = AttackOutput::default();
        self.script
            .advance(self.progress, ctx, &mut self.hazards, rng, &mut out);
        out
    }
}

// --- Shared helpers ---

/// Wind-up ramp: 0 at start, 1 at `windup`, 0 afterwards.
fn telegraph(t: f32, windup: f32) -> f32 {
    if t < windup {
        (t / windup).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Point projectiles leave the boss from.
fn emit_origin(ctx: &AttackContext) -> Vec3 {
    ctx.boss_position + Vec3::Y * EMIT_HEIGHT
}

/// Point low radial bursts leave from. In 3D the ring skims the floor so it
/// reaches a grounded player; in 2D it circles the emitter.
fn burst_origin(ctx: &AttackContext) -> Vec3 {
    if ctx.arena.is_side_view() {
        emit_origin(ctx)
    } else {
        ctx.boss_position + Vec3::Y * 1.0
    }
}

/// A full ring of `count` projectiles in the playing plane.
#[allow(clippy::too_many_arguments)]
fn radial_ring(
    ctx: &AttackContext,
    origin: Vec3,
    count: u32,
    speed: f32,
    damage: f32,
    lifetime: f32,
    kind: ProjectileKind,
    out: &mut AttackOutput,
) {
    let offset = ctx.boss_yaw;
    for i in 0..count {
        let angle = offset + std::f32::consts::TAU * i as f32 / count as f32;
        out.projectiles.push(ProjectileSpawn {
            position: origin,
            velocity: ctx.arena.plane_dir(angle) * speed,
            kind,
            damage,
            lifetime,
            radius: BOSS_PROJECTILE_RADIUS,
        });
    }
}

/// Unit sample in [-1, 1].
fn unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen_range(-1.0..=1.0)
}
