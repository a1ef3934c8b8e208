//! Simulation constants and tuning parameters.
//!
//! Values used as defaults by `EncounterConfig` live in the player/boss
//! sections. Attack script timings are fixed here and read directly by the
//! pattern library.

// --- Frame ---

/// Largest delta time a single tick may consume (seconds).
pub const MAX_DT: f32 = 0.05;

/// Upper bound accepted for a configured `max_dt` (seconds).
pub const MAX_DT_LIMIT: f32 = 0.25;

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;

// --- Arena ---

/// Radius of the 3D arena floor (units).
pub const ARENA_RADIUS: f32 = 40.0;

/// Vertical band for the player in the 3D arena.
pub const ARENA_MIN_HEIGHT: f32 = 0.0;
pub const ARENA_MAX_HEIGHT: f32 = 4.0;

/// Extents of the 2D side-view arena (x horizontal, y vertical).
pub const SIDE_MIN_X: f32 = -50.0;
pub const SIDE_MAX_X: f32 = 50.0;
pub const SIDE_MIN_Y: f32 = 0.0;
pub const SIDE_MAX_Y: f32 = 30.0;

/// Player spawn distance from the center, as a fraction of the 3D radius.
pub const PLAYER_SPAWN_FRACTION: f32 = 0.6;

/// Side-view spawn offsets: the boss from the right wall, the player from the
/// left.
pub const SIDE_BOSS_INSET: f32 = 12.0;
pub const SIDE_PLAYER_INSET: f32 = 15.0;

/// Margin beyond the arena bounds before a projectile is culled.
pub const OOB_MARGIN: f32 = 25.0;

// --- Player ---

pub const PLAYER_MAX_HEALTH: f32 = 100.0;

/// Top movement speed (units/s).
pub const PLAYER_MAX_SPEED: f32 = 12.0;

/// Exponential velocity smoothing rate (1/s).
pub const PLAYER_MOVE_SMOOTHING: f32 = 10.0;

/// Collision radius of the player.
pub const PLAYER_RADIUS: f32 = 0.8;

/// Eye height above the player origin in the 3D arena; shots leave from here.
pub const PLAYER_EYE_HEIGHT: f32 = 1.6;

/// Yaw/pitch radians per unit of aim delta.
pub const AIM_SENSITIVITY: f32 = 1.0;

/// Pitch clamp (radians).
pub const MAX_PITCH: f32 = 1.4;

pub const DODGE_SPEED: f32 = 30.0;
pub const DODGE_DURATION: f32 = 0.25;
pub const DODGE_COOLDOWN: f32 = 0.8;

/// Extra invincibility after a dodge ends.
pub const DODGE_IFRAME_GRACE: f32 = 0.1;

/// Invincibility granted after taking a hit.
pub const HIT_INVINCIBILITY: f32 = 0.6;

pub const SHOT_SPEED: f32 = 60.0;
pub const SHOT_DAMAGE: f32 = 10.0;
pub const SHOT_LIFETIME: f32 = 2.0;
pub const SHOT_COOLDOWN: f32 = 0.15;
pub const SHOT_RADIUS: f32 = 0.3;

pub const CHARGED_SPEED: f32 = 45.0;
pub const CHARGED_DAMAGE: f32 = 45.0;
pub const CHARGED_LIFETIME: f32 = 2.5;
pub const CHARGED_COOLDOWN: f32 = 1.2;
pub const CHARGED_RADIUS: f32 = 0.6;

/// A weapon is ready once its cooldown is within this of zero; absorbs f32
/// drift when the step divides the cooldown exactly.
pub const COOLDOWN_EPSILON: f32 = 1e-4;

/// Distance in front of the player where shots appear.
pub const MUZZLE_OFFSET: f32 = 1.0;

// --- Combo / focus ---

pub const COMBO_TIMEOUT: f32 = 2.0;

/// Combo hits per multiplier tier.
pub const COMBO_TIER_STEP: u32 = 5;

/// Damage multiplier for each tier, index 0 = no combo.
pub const COMBO_MULTIPLIERS: [f32; 5] = [1.0, 1.5, 2.0, 2.5, 3.0];

pub const FOCUS_MAX: f32 = 100.0;
pub const FOCUS_PASSIVE_RATE: f32 = 2.0;
pub const FOCUS_PER_HIT: f32 = 1.5;
pub const FOCUS_PER_DODGE: f32 = 5.0;
pub const FOCUS_PER_MINION_KILL: f32 = 8.0;

// --- Ally squad ---

pub const ALLY_COUNT: u32 = 3;
pub const ALLY_DURATION: f32 = 10.0;
pub const ALLY_FIRE_INTERVAL: f32 = 0.4;
pub const ALLY_DAMAGE: f32 = 6.0;
pub const ALLY_SHOT_SPEED: f32 = 50.0;
pub const ALLY_SHOT_LIFETIME: f32 = 2.0;
pub const ALLY_MULTIPLIER_FLOOR: f32 = 2.0;

/// Fraction of the way from player to boss the squad orbits around.
pub const ALLY_ANCHOR_FRACTION: f32 = 0.35;
pub const ALLY_ORBIT_RADIUS: f32 = 4.0;
pub const ALLY_ORBIT_HEIGHT: f32 = 3.0;
pub const ALLY_ORBIT_SPEED: f32 = 1.5;

// --- Boss ---

pub const BOSS_MAX_HEALTH: f32 = 3000.0;

/// Health ratios at or below which phases 2, 3 and 4 begin.
pub const PHASE_THRESHOLDS: [f32; 3] = [0.70, 0.40, 0.15];

pub const MAX_PHASE: u8 = 4;

/// Idle time before the first attack of the encounter.
pub const BOSS_FIRST_ATTACK_DELAY: f32 = 2.0;

/// Idle cooldown between attacks, by phase (index = phase - 1).
pub const BOSS_ATTACK_COOLDOWNS: [f32; 4] = [2.5, 2.0, 1.5, 1.0];

/// Recovery pause after an attack, by phase.
pub const BOSS_RECOVERY_PAUSES: [f32; 4] = [0.8, 0.6, 0.5, 0.4];

/// Rotation smoothing rate toward the player (1/s).
pub const BOSS_TURN_RATE: f32 = 3.0;

pub const PHASE_TRANSITION_DURATION: f32 = 3.0;
pub const POST_TRANSITION_ATTACK_DELAY: f32 = 1.0;

pub const STUN_DURATION: f32 = 1.5;
pub const STUN_IMMUNITY: f32 = 6.0;

/// Placeholder rig used when no measured boss geometry is supplied.
pub const WEAK_POINT_HEIGHT: f32 = 8.0;
pub const WEAK_POINT_FORWARD: f32 = 1.5;
pub const WEAK_POINT_RADIUS: f32 = 1.5;
pub const BODY_HEIGHT: f32 = 4.0;
pub const BODY_RADIUS: f32 = 5.0;

pub const WEAK_POINT_MULTIPLIER: f32 = 2.0;
pub const BODY_MULTIPLIER: f32 = 0.5;

/// Height above the boss origin where most projectiles are emitted.
pub const EMIT_HEIGHT: f32 = 3.0;

// --- Outcome ---

pub const VICTORY_DELAY: f32 = 4.0;
pub const DEFEAT_DELAY: f32 = 3.0;

// --- Homing ---

pub const HOMING_TURN_ACCEL: f32 = 18.0;
pub const HOMING_MAX_SPEED: f32 = 16.0;

// --- Minions ---

pub const MINION_HEALTH: f32 = 30.0;
pub const MINION_SPEED: f32 = 7.0;
pub const MINION_ENGAGE_RADIUS: f32 = 10.0;

/// Velocity decay rate inside the engagement radius (1/s).
pub const MINION_DECEL: f32 = 4.0;
pub const MINION_FIRE_COOLDOWN: f32 = 2.0;
pub const MINION_SHOT_SPEED: f32 = 20.0;
pub const MINION_SHOT_DAMAGE: f32 = 5.0;
pub const MINION_SHOT_LIFETIME: f32 = 3.0;
pub const MINION_CONTACT_DAMAGE: f32 = 8.0;
pub const MINION_RADIUS: f32 = 1.2;
pub const MINION_SPAWN_RADIUS: f32 = 8.0;

// --- Attack: sweeping beam ---

pub const BEAM_WINDUP: f32 = 0.8;
pub const BEAM_DURATION: f32 = 3.0;
pub const BEAM_EMIT_INTERVAL: f32 = 0.06;
pub const BEAM_SWEEP_AMPLITUDE: f32 = 0.9;
pub const BEAM_SWEEP_FREQUENCY: f32 = 1.6;
pub const BEAM_SPREAD: f32 = 0.03;
pub const BEAM_SPEED: f32 = 40.0;
pub const BEAM_DAMAGE: f32 = 6.0;
pub const BEAM_LIFETIME: f32 = 2.0;

// --- Attack: rising spikes ---

pub const SPIKE_BASE_COUNT: u32 = 4;
pub const SPIKE_COUNT_PER_PHASE: u32 = 2;
pub const SPIKE_INTERVAL: f32 = 0.35;
pub const SPIKE_SCATTER: f32 = 3.0;
pub const SPIKE_SPEED: f32 = 18.0;
pub const SPIKE_DAMAGE: f32 = 15.0;
pub const SPIKE_LIFETIME: f32 = 0.8;
pub const SPIKE_RADIUS: f32 = 1.2;

// --- Attack: melee slam ---

pub const SLAM_WINDUP: f32 = 1.0;
pub const SLAM_BASE_SHARDS: u32 = 24;
pub const SLAM_SHARDS_PER_PHASE: u32 = 8;
pub const SLAM_SPEED: f32 = 20.0;
pub const SLAM_DAMAGE: f32 = 12.0;
pub const SLAM_LIFETIME: f32 = 2.5;
pub const SLAM_SHAKE: f32 = 1.0;
pub const SLAM_END: f32 = 1.5;

// --- Attack: lobbed projectile ---

pub const LOB_BASE_COUNT: u32 = 2;
pub const LOB_INTERVAL: f32 = 0.5;
pub const LOB_SPEED: f32 = 18.0;
pub const LOB_DAMAGE: f32 = 20.0;
pub const LOB_LIFETIME: f32 = 4.0;
pub const LOB_RADIUS: f32 = 1.0;

/// Fraction of the player's travel during flight added to the aim point.
pub const LOB_LEAD_FACTOR: f32 = 0.5;

/// Phase from which lobbed orbs home in on the player.
pub const LOB_HOMING_PHASE: u8 = 3;

// --- Attack: cone spray ---

pub const CONE_DURATION: f32 = 2.0;
pub const CONE_INTERVAL: f32 = 0.05;
pub const CONE_HALF_ANGLE: f32 = 0.35;
pub const CONE_SPEED: f32 = 35.0;
pub const CONE_DAMAGE: f32 = 4.0;
pub const CONE_LIFETIME: f32 = 1.8;

// --- Attack: summon ---

pub const SUMMON_BASE_COUNT: u32 = 2;
pub const SUMMON_AT: f32 = 0.5;
pub const SUMMON_END: f32 = 1.5;

// --- Attack: sky hazard ---

pub const SKY_MIN_PHASE: u8 = 3;
pub const SKY_DURATION: f32 = 6.0;
pub const SKY_INTERVAL: f32 = 0.25;
pub const SKY_SCATTER: f32 = 8.0;
pub const SKY_HEIGHT: f32 = 25.0;
pub const SKY_SPEED: f32 = 22.0;
pub const SKY_DAMAGE: f32 = 18.0;
pub const SKY_LIFETIME: f32 = 2.0;
pub const SKY_RADIUS: f32 = 1.5;

// --- Attack: lunge ---

pub const LUNGE_WINDUP: f32 = 1.0;
pub const LUNGE_DASH: f32 = 0.6;
pub const LUNGE_HOLD: f32 = 0.3;
pub const LUNGE_RETURN: f32 = 0.8;
pub const LUNGE_CONTACT_DAMAGE: f32 = 25.0;

// --- Attack: expanding ring ---

pub const RING_MIN_PHASE: u8 = 2;
pub const RING_MAX_COUNT: u32 = 3;
pub const RING_STAGGER: f32 = 0.7;
pub const RING_GROWTH: f32 = 12.0;
pub const RING_BAND: f32 = 1.0;
pub const RING_DAMAGE: f32 = 20.0;
pub const RING_MAX_RADIUS: f32 = 45.0;

// --- Attack: dual beams ---

pub const DUAL_BEAM_WINDUP: f32 = 1.0;
pub const DUAL_BEAM_DURATION: f32 = 3.5;
pub const DUAL_BEAM_INTERVAL: f32 = 0.07;
pub const DUAL_BEAM_SPREAD: f32 = 0.8;

// --- Attack: nova ---

pub const NOVA_TELEGRAPH: f32 = 2.0;
pub const NOVA_PROJECTILES: u32 = 48;
pub const NOVA_SPEED: f32 = 18.0;
pub const NOVA_DAMAGE: f32 = 15.0;
pub const NOVA_LIFETIME: f32 = 3.0;
pub const NOVA_SHAKE: f32 = 1.5;
pub const NOVA_END: f32 = 3.0;

// --- Attack: roar ---

pub const ROAR_MIN_PHASE: u8 = 2;
pub const ROAR_TELEGRAPH: f32 = 1.5;
pub const ROAR_RANGE: f32 = 14.0;
pub const ROAR_DAMAGE: f32 = 15.0;
pub const ROAR_SLOW_FACTOR: f32 = 0.5;
pub const ROAR_SLOW_DURATION: f32 = 2.0;
pub const ROAR_RING_COUNT: u32 = 16;
pub const ROAR_RING_SPEED: f32 = 16.0;
pub const ROAR_RING_DAMAGE: f32 = 8.0;
pub const ROAR_SHAKE: f32 = 0.8;
pub const ROAR_END: f32 = 2.2;

// --- Generic boss projectile ---

pub const BOSS_PROJECTILE_RADIUS: f32 = 0.5;
