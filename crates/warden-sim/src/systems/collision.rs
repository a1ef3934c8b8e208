//! Collision and damage resolution.
//!
//! Runs after everything has moved. Player-owned projectiles are resolved in
//! spawn order against the weak point, then the body, then live minions; the
//! first match consumes the projectile. Player-side hazards only land while
//! the player is not invincible, and every landed hit re-arms invincibility.

use glam::Vec3;
use hecs::{Entity, World};
use tracing::debug;

use warden_boss_ai::fsm::{can_stun, AttackCycle};
use warden_core::arena::Arena;
use warden_core::components::{AllySquad, Minion, PlayerCombat, Projectile};
use warden_core::config::{BossTuning, PlayerTuning};
use warden_core::constants::*;
use warden_core::enums::{DamageSource, FlashColor, HitZone, Owner, ProjectileKind};
use warden_core::events::EncounterEvent;
use warden_core::state::StatsView;
use warden_core::types::Position;

use crate::combatants::Boss;
use crate::systems::player::{effective_multiplier, tier_multiplier};

/// Everything collision reads or writes besides the world.
pub struct CollisionContext<'a> {
    pub player: &'a mut PlayerCombat,
    pub boss: &'a mut Boss,
    pub ally: &'a AllySquad,
    pub player_tuning: &'a PlayerTuning,
    pub boss_tuning: &'a BossTuning,
    pub arena: &'a Arena,
    pub stats: &'a mut StatsView,
    pub events: &'a mut Vec<EncounterEvent>,
}

/// Run collision resolution for one tick.
pub fn run(world: &mut World, ctx: &mut CollisionContext, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    resolve_player_shots(world, ctx, despawn_buffer);
    resolve_boss_projectiles(world, ctx, despawn_buffer);
    resolve_minion_contact(world, ctx);
    resolve_rings(ctx);
    resolve_pulses(ctx);
    resolve_lunge(ctx);

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Projectiles of `owner` in spawn order.
fn projectiles_by_seq(world: &World, owner: Owner) -> Vec<(Entity, Vec3, Projectile)> {
    let mut shots: Vec<(Entity, Vec3, Projectile)> = world
        .query::<(&Position, &Projectile)>()
        .iter()
        .filter(|(_, (_, proj))| proj.owner == owner)
        .map(|(entity, (pos, proj))| (entity, pos.0, *proj))
        .collect();
    shots.sort_by_key(|(_, _, proj)| proj.seq);
    shots
}

fn minions_by_seq(world: &World) -> Vec<(Entity, Vec3, u64)> {
    let mut minions: Vec<(Entity, Vec3, u64)> = world
        .query::<(&Position, &Minion)>()
        .iter()
        .map(|(entity, (pos, minion))| (entity, pos.0, minion.seq))
        .collect();
    minions.sort_by_key(|(_, _, seq)| *seq);
    minions
}

fn overlaps(a: Vec3, b: Vec3, reach: f32) -> bool {
    a.distance_squared(b) <= reach * reach
}

fn resolve_player_shots(world: &mut World, ctx: &mut CollisionContext, despawn: &mut Vec<Entity>) {
    let shots = projectiles_by_seq(world, Owner::Player);
    if shots.is_empty() {
        return;
    }
    let minions = minions_by_seq(world);
    let rig = ctx.boss.rig;
    let weak_point = ctx.boss.weak_point;
    let body = ctx.boss.body_center();

    for (entity, pos, proj) in shots {
        let zone = if overlaps(pos, weak_point, rig.weak_point_radius + proj.radius) {
            Some(HitZone::WeakPoint)
        } else if overlaps(pos, body, rig.body_radius + proj.radius) {
            Some(HitZone::Body)
        } else {
            None
        };

        if let Some(zone) = zone {
            despawn.push(entity);
            hit_boss(ctx, &proj, pos, zone);
            continue;
        }

        for (minion_entity, minion_pos, _) in &minions {
            let Ok(mut minion) = world.get::<&mut Minion>(*minion_entity) else {
                continue;
            };
            if minion.health <= 0.0 || !overlaps(pos, *minion_pos, MINION_RADIUS + proj.radius) {
                continue;
            }
            despawn.push(entity);
            let multiplier = effective_multiplier(ctx.player, ctx.ally, ctx.player_tuning);
            let amount = proj.damage * multiplier;
            minion.health = (minion.health - amount).max(0.0);
            ctx.events.push(EncounterEvent::DamageNumber {
                amount,
                position: *minion_pos,
                weak_point: false,
            });
            if minion.health <= 0.0 {
                let tuning = ctx.player_tuning;
                ctx.player.focus =
                    (ctx.player.focus + tuning.focus_per_minion_kill).min(tuning.focus_max);
                ctx.stats.minions_killed += 1;
                ctx.events.push(EncounterEvent::MinionKilled {
                    position: *minion_pos,
                });
                despawn.push(*minion_entity);
            }
            break;
        }
    }
}

fn hit_boss(ctx: &mut CollisionContext, proj: &Projectile, at: Vec3, zone: HitZone) {
    // Shots are absorbed without effect while the boss is shielded.
    if !ctx.boss.is_damageable() || ctx.boss.health <= 0.0 {
        return;
    }

    let zone_factor = match zone {
        HitZone::WeakPoint => ctx.boss_tuning.weak_point_multiplier,
        HitZone::Body => ctx.boss_tuning.body_multiplier,
    };
    let multiplier = effective_multiplier(ctx.player, ctx.ally, ctx.player_tuning);
    let amount = proj.damage * multiplier * zone_factor;
    ctx.boss.health = (ctx.boss.health - amount).clamp(0.0, ctx.boss.max_health);

    let player = &mut *ctx.player;
    player.combo += 1;
    player.combo_timer = ctx.player_tuning.combo_timeout;
    player.multiplier = tier_multiplier(player.combo);
    player.focus =
        (player.focus + ctx.player_tuning.focus_per_hit).min(ctx.player_tuning.focus_max);

    let weak = zone == HitZone::WeakPoint;
    let stats = &mut *ctx.stats;
    stats.hits_landed += 1;
    if weak {
        stats.weak_point_hits += 1;
    }
    stats.damage_dealt += amount;
    stats.max_combo = stats.max_combo.max(player.combo);

    ctx.events.push(EncounterEvent::DamageNumber {
        amount,
        position: at,
        weak_point: weak,
    });

    if weak && proj.kind == ProjectileKind::Charged {
        try_stun(ctx);
    }
}

fn try_stun(ctx: &mut CollisionContext) {
    let boss = &mut *ctx.boss;
    if !can_stun(&boss.cycle) || boss.stun_immunity > 0.0 || boss.health <= 0.0 {
        return;
    }
    let duration = ctx.boss_tuning.stun_duration;
    boss.cycle = AttackCycle::Stunned {
        remaining: duration,
    };
    boss.stun_immunity = duration + ctx.boss_tuning.stun_immunity;
    debug!(duration, "boss stunned");
    ctx.events.push(EncounterEvent::BossStunned {
        duration_secs: duration,
    });
}

/// Apply damage to the player unless invincible. Returns whether it landed.
fn hurt_player(ctx: &mut CollisionContext, amount: f32, source: DamageSource) -> bool {
    let player = &mut *ctx.player;
    if player.invincible_secs > 0.0 || player.health <= 0.0 {
        return false;
    }
    player.health = (player.health - amount).clamp(0.0, player.max_health);
    player.invincible_secs = ctx.player_tuning.hit_invincibility;
    player.combo = 0;
    player.combo_timer = 0.0;
    player.multiplier = tier_multiplier(0);
    ctx.stats.damage_taken += amount;
    ctx.events.push(EncounterEvent::PlayerDamaged { amount, source });
    ctx.events.push(EncounterEvent::Flash {
        color: FlashColor::Red,
        intensity: (amount / player.max_health * 4.0).clamp(0.2, 1.0),
    });
    true
}

fn resolve_boss_projectiles(world: &World, ctx: &mut CollisionContext, despawn: &mut Vec<Entity>) {
    for (entity, pos, proj) in projectiles_by_seq(world, Owner::Boss) {
        if ctx.player.invincible_secs > 0.0 {
            return;
        }
        if overlaps(pos, ctx.player.position, PLAYER_RADIUS + proj.radius)
            && hurt_player(ctx, proj.damage, DamageSource::Projectile(proj.kind))
        {
            despawn.push(entity);
        }
    }
}

fn resolve_minion_contact(world: &World, ctx: &mut CollisionContext) {
    for (_, pos, _) in minions_by_seq(world) {
        if overlaps(pos, ctx.player.position, PLAYER_RADIUS + MINION_RADIUS)
            && hurt_player(ctx, MINION_CONTACT_DAMAGE, DamageSource::MinionContact)
        {
            return;
        }
    }
}

fn resolve_rings(ctx: &mut CollisionContext) {
    let player_pos = ctx.player.position;
    let arena = *ctx.arena;
    let Some(attack) = ctx.boss.attack.as_ref() else {
        return;
    };
    let mut landed: Option<(usize, f32)> = None;
    for (i, ring) in attack.hazards.iter().enumerate() {
        if ring.hit_player {
            continue;
        }
        let off_band = (arena.plane_distance(ring.center, player_pos) - ring.radius).abs();
        // In 3D the wave rolls along the floor; getting high enough clears it.
        let low = arena.is_side_view() || player_pos.y - ring.center.y <= ring.band + PLAYER_RADIUS;
        if low && off_band <= ring.band + PLAYER_RADIUS {
            landed = Some((i, ring.damage));
            break;
        }
    }
    if let Some((i, damage)) = landed {
        if hurt_player(ctx, damage, DamageSource::Ring) {
            if let Some(ring) = ctx
                .boss
                .attack
                .as_mut()
                .and_then(|attack| attack.hazards.get_mut(i))
            {
                ring.hit_player = true;
            }
        }
    }
}

fn resolve_pulses(ctx: &mut CollisionContext) {
    let pulses = std::mem::take(&mut ctx.boss.pulses);
    for pulse in pulses {
        if overlaps(pulse.center, ctx.player.position, pulse.radius)
            && hurt_player(ctx, pulse.damage, DamageSource::Roar)
        {
            ctx.player.slow_factor = pulse.slow_factor;
            ctx.player.slow_secs = ctx.player.slow_secs.max(pulse.slow_secs);
        }
    }
}

fn resolve_lunge(ctx: &mut CollisionContext) {
    let damage = ctx.boss.contact_damage;
    if damage <= 0.0 {
        return;
    }
    let reach = ctx.boss.rig.body_radius + PLAYER_RADIUS;
    if ctx.arena.plane_distance(ctx.boss.position, ctx.player.position) <= reach {
        hurt_player(ctx, damage, DamageSource::Lunge);
    }
}
