//! Snapshot system: queries the world and combatants and builds a complete
//! FrameResult.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use warden_core::arena::Arena;
use warden_core::components::{AllySquad, Minion, PlayerCombat, Projectile};
use warden_core::config::PlayerTuning;
use warden_core::enums::EncounterStatus;
use warden_core::events::EncounterEvent;
use warden_core::state::*;
use warden_core::types::{Position, SimTime, Velocity};

use crate::combatants::Boss;
use crate::systems::{ally, player::effective_multiplier};

/// Inputs to `build_frame` besides the world.
pub struct FrameSources<'a> {
    pub time: SimTime,
    pub status: EncounterStatus,
    pub player: &'a PlayerCombat,
    pub player_tuning: &'a PlayerTuning,
    pub boss: &'a Boss,
    pub ally: &'a AllySquad,
    pub arena: &'a Arena,
    pub stats: StatsView,
}

/// Build a complete FrameResult from the current encounter state.
pub fn build_frame(world: &World, src: &FrameSources, events: Vec<EncounterEvent>) -> FrameResult {
    FrameResult {
        time: src.time,
        status: src.status,
        player: build_player(src),
        boss: build_boss(src.boss),
        projectiles: build_projectiles(world),
        minions: build_minions(world),
        ally: AllyView {
            active: src.ally.active,
            remaining_secs: src.ally.remaining_secs.max(0.0),
            members: if src.ally.active {
                ally::member_positions(src.ally, src.arena)
            } else {
                Vec::new()
            },
        },
        hazards: build_hazards(src.boss),
        stats: StatsView {
            elapsed_secs: src.time.elapsed_secs,
            ..src.stats
        },
        events,
    }
}

fn build_player(src: &FrameSources) -> PlayerView {
    let p = src.player;
    PlayerView {
        position: p.position,
        velocity: p.velocity,
        facing: p.facing,
        health: p.health,
        max_health: p.max_health,
        focus: p.focus,
        focus_max: src.player_tuning.focus_max,
        combo: p.combo,
        multiplier: effective_multiplier(p, src.ally, src.player_tuning),
        dodging: p.dodge.active,
        dodge_cooldown: p.dodge.cooldown,
        invincible: p.invincible_secs > 0.0,
        slowed: p.slow_secs > 0.0,
    }
}

fn build_boss(boss: &Boss) -> BossView {
    BossView {
        position: boss.position,
        yaw: boss.yaw,
        weak_point: boss.weak_point,
        health: boss.health,
        max_health: boss.max_health,
        phase: boss.phase,
        state: boss.cycle.kind(),
        attack: boss.attack.as_ref().map(|a| a.id),
        telegraph: boss.telegraph,
    }
}

/// Projectiles in spawn order.
fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<(u64, ProjectileView)> = world
        .query::<(&Position, &Velocity, &Projectile)>()
        .iter()
        .map(|(_, (pos, vel, proj))| {
            (
                proj.seq,
                ProjectileView {
                    position: pos.0,
                    velocity: vel.0,
                    owner: proj.owner,
                    kind: proj.kind,
                    radius: proj.radius,
                },
            )
        })
        .collect();

    projectiles.sort_by_key(|(seq, _)| *seq);
    projectiles.into_iter().map(|(_, view)| view).collect()
}

fn build_minions(world: &World) -> Vec<MinionView> {
    let mut minions: Vec<(u64, MinionView)> = world
        .query::<(&Position, &Minion)>()
        .iter()
        .map(|(_, (pos, minion))| {
            (
                minion.seq,
                MinionView {
                    position: pos.0,
                    health: minion.health,
                },
            )
        })
        .collect();

    minions.sort_by_key(|(seq, _)| *seq);
    minions.into_iter().map(|(_, view)| view).collect()
}

fn build_hazards(boss: &Boss) -> Vec<HazardView> {
    boss.attack
        .iter()
        .flat_map(|a| a.hazards.iter())
        .map(|ring| HazardView {
            center: ring.center,
            radius: ring.radius,
            band: ring.band,
        })
        .collect()
}
