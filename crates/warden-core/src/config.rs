//! Encounter configuration: the fixed tunables an encounter is built from.
//!
//! Every field has a default taken from `constants`, so a JSON document only
//! needs the values it overrides. Validation happens once, at construction;
//! the simulation never re-checks these mid-fight.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::arena::Arena;
use crate::components::BossRig;
use crate::constants::*;

/// Errors raised while building an encounter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} is out of range: {reason}")]
    OutOfRange { field: &'static str, reason: String },

    #[error("failed to parse encounter config")]
    Parse(#[from] serde_json::Error),
}

/// Speed, damage and timing of one player shot type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotTuning {
    pub speed: f32,
    pub damage: f32,
    pub lifetime: f32,
    pub cooldown: f32,
    pub radius: f32,
}

/// Player tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: f32,
    pub max_speed: f32,
    pub move_smoothing: f32,
    pub dodge_speed: f32,
    pub dodge_duration: f32,
    pub dodge_cooldown: f32,
    pub dodge_grace: f32,
    pub hit_invincibility: f32,
    pub shot: ShotTuning,
    pub charged: ShotTuning,
    pub combo_timeout: f32,
    pub focus_max: f32,
    pub focus_passive_rate: f32,
    pub focus_per_hit: f32,
    pub focus_per_dodge: f32,
    pub focus_per_minion_kill: f32,
    pub ally_duration: f32,
    pub ally_fire_interval: f32,
    pub ally_damage: f32,
    pub ally_multiplier_floor: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: PLAYER_MAX_HEALTH,
            max_speed: PLAYER_MAX_SPEED,
            move_smoothing: PLAYER_MOVE_SMOOTHING,
            dodge_speed: DODGE_SPEED,
            dodge_duration: DODGE_DURATION,
            dodge_cooldown: DODGE_COOLDOWN,
            dodge_grace: DODGE_IFRAME_GRACE,
            hit_invincibility: HIT_INVINCIBILITY,
            shot: ShotTuning {
                speed: SHOT_SPEED,
                damage: SHOT_DAMAGE,
                lifetime: SHOT_LIFETIME,
                cooldown: SHOT_COOLDOWN,
                radius: SHOT_RADIUS,
            },
            charged: ShotTuning {
                speed: CHARGED_SPEED,
                damage: CHARGED_DAMAGE,
                lifetime: CHARGED_LIFETIME,
                cooldown: CHARGED_COOLDOWN,
                radius: CHARGED_RADIUS,
            },
            combo_timeout: COMBO_TIMEOUT,
            focus_max: FOCUS_MAX,
            focus_passive_rate: FOCUS_PASSIVE_RATE,
            focus_per_hit: FOCUS_PER_HIT,
            focus_per_dodge: FOCUS_PER_DODGE,
            focus_per_minion_kill: FOCUS_PER_MINION_KILL,
            ally_duration: ALLY_DURATION,
            ally_fire_interval: ALLY_FIRE_INTERVAL,
            ally_damage: ALLY_DAMAGE,
            ally_multiplier_floor: ALLY_MULTIPLIER_FLOOR,
        }
    }
}

/// Boss tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub max_health: f32,
    /// Health ratios at or below which phases 2, 3 and 4 begin. Strictly
    /// descending.
    pub phase_thresholds: [f32; 3],
    pub attack_cooldowns: [f32; 4],
    pub recovery_pauses: [f32; 4],
    pub first_attack_delay: f32,
    pub transition_duration: f32,
    pub post_transition_delay: f32,
    pub turn_rate: f32,
    pub stun_duration: f32,
    pub stun_immunity: f32,
    pub weak_point_multiplier: f32,
    pub body_multiplier: f32,
    /// Measured geometry; `None` falls back to the placeholder rig.
    pub rig: Option<BossRig>,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            max_health: BOSS_MAX_HEALTH,
            phase_thresholds: PHASE_THRESHOLDS,
            attack_cooldowns: BOSS_ATTACK_COOLDOWNS,
            recovery_pauses: BOSS_RECOVERY_PAUSES,
            first_attack_delay: BOSS_FIRST_ATTACK_DELAY,
            transition_duration: PHASE_TRANSITION_DURATION,
            post_transition_delay: POST_TRANSITION_ATTACK_DELAY,
            turn_rate: BOSS_TURN_RATE,
            stun_duration: STUN_DURATION,
            stun_immunity: STUN_IMMUNITY,
            weak_point_multiplier: WEAK_POINT_MULTIPLIER,
            body_multiplier: BODY_MULTIPLIER,
            rig: None,
        }
    }
}

/// Complete configuration for one encounter attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    /// RNG seed. Same seed and same intents produce the same encounter.
    pub seed: u64,
    /// Largest delta a single tick may consume (seconds).
    pub max_dt: f32,
    pub arena: Arena,
    pub player: PlayerTuning,
    pub boss: BossTuning,
    pub victory_delay: f32,
    pub defeat_delay: f32,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            max_dt: MAX_DT,
            arena: Arena::default(),
            player: PlayerTuning::default(),
            boss: BossTuning::default(),
            victory_delay: VICTORY_DELAY,
            defeat_delay: DEFEAT_DELAY,
        }
    }
}

impl EncounterConfig {
    /// Default tuning in the 3D radial arena.
    pub fn arena_3d() -> Self {
        Self::default()
    }

    /// Default tuning in the 2D side-view arena.
    pub fn side_view_2d() -> Self {
        Self {
            arena: Arena::side_view(),
            ..Self::default()
        }
    }

    /// Parse a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EncounterConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject malformed or out-of-range values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_dt > 0.0 && self.max_dt <= MAX_DT_LIMIT) {
            return Err(ConfigError::OutOfRange {
                field: "max_dt",
                reason: format!("{} not in (0, {MAX_DT_LIMIT}]", self.max_dt),
            });
        }
        positive("victory_delay", self.victory_delay)?;
        positive("defeat_delay", self.defeat_delay)?;
        validate_arena(&self.arena)?;
        validate_player(&self.player)?;
        validate_boss(&self.boss)?;
        validate_spawns(&self.arena, &self.boss.rig.unwrap_or_default())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            reason: format!("{value} is negative or not finite"),
        })
    }
}

fn validate_arena(arena: &Arena) -> Result<(), ConfigError> {
    match *arena {
        Arena::Radial {
            radius,
            min_height,
            max_height,
        } => {
            positive("arena.radius", radius)?;
            if !(min_height.is_finite() && max_height.is_finite() && min_height <= max_height) {
                return Err(ConfigError::OutOfRange {
                    field: "arena.min_height",
                    reason: format!("band [{min_height}, {max_height}] is inverted"),
                });
            }
        }
        Arena::SideView {
            min_x,
            max_x,
            min_y,
            max_y,
        } => {
            if !(min_x.is_finite() && max_x.is_finite() && min_x < max_x) {
                return Err(ConfigError::OutOfRange {
                    field: "arena.min_x",
                    reason: format!("[{min_x}, {max_x}] is empty"),
                });
            }
            if !(min_y.is_finite() && max_y.is_finite() && min_y < max_y) {
                return Err(ConfigError::OutOfRange {
                    field: "arena.min_y",
                    reason: format!("[{min_y}, {max_y}] is empty"),
                });
            }
        }
    }
    Ok(())
}

/// The player must spawn clear of the boss body, and in the side view on the
/// near side of it.
fn validate_spawns(arena: &Arena, rig: &BossRig) -> Result<(), ConfigError> {
    let (home, spawn) = (arena.boss_home(), arena.player_spawn());
    let separation = match arena {
        Arena::Radial { .. } => arena.plane_distance(spawn, home),
        Arena::SideView { .. } => home.x - spawn.x,
    };
    let clearance = rig.body_radius + PLAYER_RADIUS;
    if separation > clearance {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field: "arena",
            reason: format!("spawn is {separation} from the boss, needs more than {clearance}"),
        })
    }
}

fn validate_shot(prefix: &'static str, shot: &ShotTuning) -> Result<(), ConfigError> {
    positive(prefix, shot.speed)?;
    positive(prefix, shot.damage)?;
    positive(prefix, shot.lifetime)?;
    positive(prefix, shot.cooldown)?;
    positive(prefix, shot.radius)
}

fn validate_player(p: &PlayerTuning) -> Result<(), ConfigError> {
    positive("player.max_health", p.max_health)?;
    positive("player.max_speed", p.max_speed)?;
    positive("player.move_smoothing", p.move_smoothing)?;
    positive("player.dodge_speed", p.dodge_speed)?;
    positive("player.dodge_duration", p.dodge_duration)?;
    positive("player.dodge_cooldown", p.dodge_cooldown)?;
    non_negative("player.dodge_grace", p.dodge_grace)?;
    positive("player.hit_invincibility", p.hit_invincibility)?;
    validate_shot("player.shot", &p.shot)?;
    validate_shot("player.charged", &p.charged)?;
    positive("player.combo_timeout", p.combo_timeout)?;
    positive("player.focus_max", p.focus_max)?;
    non_negative("player.focus_passive_rate", p.focus_passive_rate)?;
    non_negative("player.focus_per_hit", p.focus_per_hit)?;
    non_negative("player.focus_per_dodge", p.focus_per_dodge)?;
    non_negative("player.focus_per_minion_kill", p.focus_per_minion_kill)?;
    positive("player.ally_duration", p.ally_duration)?;
    positive("player.ally_fire_interval", p.ally_fire_interval)?;
    positive("player.ally_damage", p.ally_damage)?;
    positive("player.ally_multiplier_floor", p.ally_multiplier_floor)
}

fn validate_boss(b: &BossTuning) -> Result<(), ConfigError> {
    positive("boss.max_health", b.max_health)?;
    let t = b.phase_thresholds;
    let descending = t[0] < 1.0 && t[0] > t[1] && t[1] > t[2] && t[2] > 0.0;
    if !descending {
        return Err(ConfigError::OutOfRange {
            field: "boss.phase_thresholds",
            reason: format!("{t:?} must be strictly descending within (0, 1)"),
        });
    }
    for v in b.attack_cooldowns {
        positive("boss.attack_cooldowns", v)?;
    }
    for v in b.recovery_pauses {
        positive("boss.recovery_pauses", v)?;
    }
    positive("boss.first_attack_delay", b.first_attack_delay)?;
    positive("boss.transition_duration", b.transition_duration)?;
    positive("boss.post_transition_delay", b.post_transition_delay)?;
    positive("boss.turn_rate", b.turn_rate)?;
    positive("boss.stun_duration", b.stun_duration)?;
    non_negative("boss.stun_immunity", b.stun_immunity)?;
    positive("boss.weak_point_multiplier", b.weak_point_multiplier)?;
    positive("boss.body_multiplier", b.body_multiplier)?;
    if let Some(rig) = &b.rig {
        positive("boss.rig.weak_point_radius", rig.weak_point_radius)?;
        positive("boss.rig.body_radius", rig.body_radius)?;
    }
    Ok(())
}
