//! Combatant records owned by the encounter: the boss and the player.
//!
//! Stored directly on `Encounter`, NOT as ECS entities. Only the pooled
//! objects (projectiles, minions) live in the hecs world.

use glam::Vec3;

use warden_boss_ai::fsm::AttackCycle;
use warden_boss_ai::patterns::{ActiveAttack, Pulse};
use warden_core::arena::Arena;
use warden_core::components::{BossRig, DodgeState, PlayerCombat};
use warden_core::config::{BossTuning, PlayerTuning};
use warden_core::constants::*;
use warden_core::enums::AttackId;
use warden_core::types::Facing;

/// The boss and everything its attack cycle owns.
#[derive(Debug, Clone)]
pub struct Boss {
    pub health: f32,
    pub max_health: f32,
    /// 1..=MAX_PHASE, never decreases.
    pub phase: u8,
    pub rig: BossRig,

    // --- Attack cycle ---
    pub cycle: AttackCycle,
    /// Running attack with its progress, scratch and ring hazards.
    pub attack: Option<ActiveAttack>,
    /// Previous attack, excluded from the next draw.
    pub last_attack: Option<AttackId>,
    /// Body contact damage, non-zero only while a lunge is moving.
    pub contact_damage: f32,
    /// Wind-up intensity, 0..1.
    pub telegraph: f32,
    /// Seconds before another stun may land.
    pub stun_immunity: f32,
    /// Area pulses emitted this tick, resolved by collision.
    pub pulses: Vec<Pulse>,

    // --- Kinematics ---
    pub position: Vec3,
    pub home: Vec3,
    pub yaw: f32,
    pub weak_point: Vec3,
}

impl Boss {
    pub fn new(tuning: &BossTuning, rig: BossRig, arena: &Arena) -> Self {
        let home = arena.boss_home();
        let yaw = arena.angle_to(home, arena.player_spawn());
        let mut boss = Self {
            health: tuning.max_health,
            max_health: tuning.max_health,
            phase: 1,
            rig,
            cycle: AttackCycle::Idle {
                cooldown: tuning.first_attack_delay,
            },
            attack: None,
            last_attack: None,
            contact_damage: 0.0,
            telegraph: 0.0,
            stun_immunity: 0.0,
            pulses: Vec::new(),
            position: home,
            home,
            yaw,
            weak_point: home,
        };
        boss.weak_point = boss.compute_weak_point(arena);
        boss
    }

    /// Weak point derived from position, facing and rig.
    pub fn compute_weak_point(&self, arena: &Arena) -> Vec3 {
        self.position
            + Vec3::Y * self.rig.weak_point_height
            + arena.plane_dir(self.yaw) * self.rig.weak_point_forward
    }

    /// Centre of the body collision sphere.
    pub fn body_center(&self) -> Vec3 {
        self.position + Vec3::Y * self.rig.body_height
    }

    /// Whether player hits currently deal damage.
    pub fn is_damageable(&self) -> bool {
        !matches!(
            self.cycle,
            AttackCycle::Transitioning { .. } | AttackCycle::Incapacitated
        )
    }

    pub fn health_ratio(&self) -> f32 {
        self.health / self.max_health
    }
}

/// Fresh player state at the arena's spawn point, facing the boss.
pub fn new_player(tuning: &PlayerTuning, arena: &Arena) -> PlayerCombat {
    let position = arena.player_spawn();
    PlayerCombat {
        position,
        velocity: Vec3::ZERO,
        facing: Facing::new(arena.angle_to(position, arena.boss_home()), 0.0),
        health: tuning.max_health,
        max_health: tuning.max_health,
        focus: 0.0,
        combo: 0,
        combo_timer: 0.0,
        multiplier: COMBO_MULTIPLIERS[0],
        fire_cooldown: 0.0,
        charged_cooldown: 0.0,
        dodge: DodgeState::default(),
        invincible_secs: 0.0,
        slow_secs: 0.0,
        slow_factor: 1.0,
    }
}
