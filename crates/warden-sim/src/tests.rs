//! Tests for the encounter engine: determinism, player combat, boss cycle,
//! collision, phase transitions and outcomes.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use glam::{Vec2, Vec3};

use warden_core::commands::InputIntents;
use warden_core::components::{BossRig, Minion, Projectile};
use warden_core::config::{ConfigError, EncounterConfig};
use warden_core::constants::*;
use warden_core::enums::*;
use warden_core::events::EncounterEvent;
use warden_core::state::FrameResult;
use warden_core::types::{Position, Velocity};

use crate::engine::{clamp_dt, Encounter};

const DT: f32 = 1.0 / 60.0;

fn encounter() -> Encounter {
    Encounter::new(EncounterConfig::default()).unwrap()
}

/// Tick `ticks` times with the same intents, collecting every event.
fn run(enc: &mut Encounter, ticks: usize, dt: f32, intents: InputIntents) -> Vec<EncounterEvent> {
    let mut events = Vec::new();
    for _ in 0..ticks {
        events.extend(enc.tick(dt, &intents).events);
    }
    events
}

fn count(events: &[EncounterEvent], pred: impl Fn(&EncounterEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(e)).count()
}

fn shots(events: &[EncounterEvent], kind: ProjectileKind) -> usize {
    count(events, |e| matches!(e, EncounterEvent::ShotFired { kind: k } if *k == kind))
}

/// Record every completion callback invocation.
fn record_completion(enc: &mut Encounter) -> Rc<RefCell<Vec<bool>>> {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    enc.on_complete(move |won| sink.borrow_mut().push(won));
    calls
}

/// Scripted intent stream: strafe, aim sweeps, fire bursts, periodic dodges.
fn scripted_intents(tick: usize) -> InputIntents {
    let t = tick as f32 * DT;
    InputIntents {
        move_axis: Vec3::new((t * 0.7).sin(), 0.0, (t * 0.3).cos() * 0.5),
        aim_delta: Vec2::new((t * 1.3).sin() * 0.01, 0.0),
        fire: tick % 90 < 60,
        charged_fire: tick % 240 == 0,
        dodge: tick % 120 == 30,
        summon: true,
    }
}

// ---- Construction ----

#[test]
fn test_invalid_config_rejected() {
    let config = EncounterConfig {
        max_dt: 0.0,
        ..EncounterConfig::default()
    };
    assert!(matches!(
        Encounter::new(config),
        Err(ConfigError::OutOfRange { field: "max_dt", .. })
    ));

    let mut config = EncounterConfig::default();
    config.player.shot.cooldown = -1.0;
    assert!(matches!(
        Encounter::new(config),
        Err(ConfigError::NonPositive { .. })
    ));
}

#[test]
fn test_placeholder_and_measured_rig() {
    let enc = encounter();
    assert_eq!(enc.boss().rig, BossRig::default());

    let rig = BossRig {
        weak_point_height: 12.0,
        weak_point_forward: 0.0,
        weak_point_radius: 2.0,
        body_height: 6.0,
        body_radius: 7.0,
    };
    let mut config = EncounterConfig::default();
    config.boss.rig = Some(rig);
    let enc = Encounter::new(config).unwrap();
    assert_eq!(enc.boss().rig, rig);
    assert!((enc.boss().weak_point.y - 12.0).abs() < 1e-5);
}

#[test]
fn test_dt_is_clamped() {
    assert_eq!(clamp_dt(1.0, MAX_DT), MAX_DT);
    assert_eq!(clamp_dt(-0.5, MAX_DT), 0.0);
    assert_eq!(clamp_dt(f32::NAN, MAX_DT), 0.0);

    let mut enc = encounter();
    let frame = enc.tick(2.0, &InputIntents::idle());
    assert!((frame.time.elapsed_secs - MAX_DT as f64).abs() < 1e-9);
    assert_eq!(frame.time.tick, 1);
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = EncounterConfig {
        seed: 12345,
        ..EncounterConfig::default()
    };
    let mut enc_a = Encounter::new(config).unwrap();
    let mut enc_b = Encounter::new(config).unwrap();

    for tick in 0..1200 {
        let intents = scripted_intents(tick);
        let frame_a = enc_a.tick(DT, &intents);
        let frame_b = enc_b.tick(DT, &intents);

        let json_a = serde_json::to_string(&frame_a).unwrap();
        let json_b = serde_json::to_string(&frame_b).unwrap();
        assert_eq!(json_a, json_b, "Frames diverged with same seed at tick {tick}");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut enc_a = Encounter::new(EncounterConfig {
        seed: 111,
        ..EncounterConfig::default()
    })
    .unwrap();
    let mut enc_b = Encounter::new(EncounterConfig {
        seed: 222,
        ..EncounterConfig::default()
    })
    .unwrap();

    // Identical until the first attack draws from the RNG.
    let mut diverged = false;
    for tick in 0..1500 {
        let intents = scripted_intents(tick);
        let json_a = serde_json::to_string(&enc_a.tick(DT, &intents)).unwrap();
        let json_b = serde_json::to_string(&enc_b.tick(DT, &intents)).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Player: firing ----

/// Hold `intents` for `ticks` steps of `dt` and check the running shot count
/// of `kind` against one shot on the first tick plus one every `per_cooldown`
/// ticks after it.
fn assert_cadence(
    dt: f32,
    per_cooldown: usize,
    ticks: usize,
    intents: InputIntents,
    kind: ProjectileKind,
) {
    let mut enc = encounter();
    // Shoot away from the boss so hits never move the phase.
    enc.player_mut().facing.yaw += std::f32::consts::PI;
    let mut fired = 0;
    for t in 1..=ticks {
        let max = enc.player().max_health;
        enc.player_mut().health = max;
        fired += shots(&enc.tick(dt, &intents).events, kind);
        let expected = 1 + (t - 1) / per_cooldown;
        assert_eq!(fired, expected, "dt={dt}: {kind:?} count off after {t} ticks");
    }
}

#[test]
fn test_held_fire_cadence_across_step_sizes() {
    // Steps that divide the cooldown exactly are the edge case.
    for per_cooldown in [3, 6, 9] {
        let dt = SHOT_COOLDOWN / per_cooldown as f32;
        assert_cadence(dt, per_cooldown, 240, InputIntents::firing(), ProjectileKind::Standard);
    }
}

#[test]
fn test_held_fire_cadence_with_uneven_step() {
    // 0.15 / 0.04 = 3.75: the remainder carries, so shots land on ticks
    // 1, 5, 9, 13, 16, ...
    let mut enc = encounter();
    enc.player_mut().facing.yaw += std::f32::consts::PI;
    let events = run(&mut enc, 76, 0.04, InputIntents::firing());
    // 75 ticks after the first shot cover 3.0 s = 20 cooldowns.
    assert_eq!(shots(&events, ProjectileKind::Standard), 21);
}

#[test]
fn test_held_charged_fire_cadence() {
    let charged = InputIntents {
        charged_fire: true,
        ..InputIntents::default()
    };
    let dt = 0.05;
    let per_cooldown = (CHARGED_COOLDOWN / dt).round() as usize;
    assert_eq!(per_cooldown, 24);
    assert_cadence(dt, per_cooldown, 100, charged, ProjectileKind::Charged);
}

#[test]
fn test_released_trigger_floors_cooldown() {
    let mut enc = encounter();
    run(&mut enc, 1, DT, InputIntents::firing());
    assert!(enc.player().fire_cooldown > 0.0);
    run(&mut enc, 30, DT, InputIntents::idle());
    assert_eq!(enc.player().fire_cooldown, 0.0);
}

#[test]
fn test_charged_fire_takes_precedence() {
    let mut enc = encounter();
    let both = InputIntents {
        fire: true,
        charged_fire: true,
        ..InputIntents::default()
    };
    let first = enc.tick(DT, &both).events;
    assert_eq!(shots(&first, ProjectileKind::Charged), 1);
    assert_eq!(shots(&first, ProjectileKind::Standard), 0);
    let second = enc.tick(DT, &both).events;
    assert_eq!(shots(&second, ProjectileKind::Standard), 1);
}

// ---- Player: dodge and damage ----

#[test]
fn test_dodge_invincibility_blocks_damage() {
    let mut enc = encounter();
    let dodge = InputIntents {
        dodge: true,
        ..InputIntents::default()
    };
    let events = enc.tick(DT, &dodge).events;
    assert_eq!(count(&events, |e| matches!(e, EncounterEvent::Dodged { .. })), 1);
    assert!(enc.player().invincible_secs >= DODGE_DURATION);
    assert!(enc.player().dodge.active);

    let at = enc.player().position;
    enc.spawn_boss_shot(at, Vec3::ZERO, 30.0);
    let frame = enc.tick(DT, &InputIntents::idle());
    assert_eq!(frame.player.health, PLAYER_MAX_HEALTH);
    assert_eq!(
        count(&frame.events, |e| matches!(e, EncounterEvent::PlayerDamaged { .. })),
        0
    );
}

#[test]
fn test_dodge_dash_overrides_movement() {
    let mut enc = encounter();
    let strafe = Vec3::new(1.0, 0.0, 0.0);
    let dash = InputIntents {
        move_axis: strafe,
        dodge: true,
        ..InputIntents::default()
    };
    let start = enc.player().position;
    enc.tick(DT, &dash);

    let player = enc.player();
    let expected = player.dodge.direction * DODGE_SPEED;
    assert!((player.velocity - expected).length() < 1e-4);
    assert!((player.velocity.length() - DODGE_SPEED).abs() < 1e-3);
    assert!((player.position - (start + expected * DT)).length() < 1e-4);

    // Once the dash ends, ordinary movement caps the speed again.
    let walk = InputIntents {
        move_axis: strafe,
        ..InputIntents::default()
    };
    run(&mut enc, 60, DT, walk);
    assert!(!enc.player().dodge.active);
    assert!(enc.player().velocity.length() <= PLAYER_MAX_SPEED + 1e-3);
}

#[test]
fn test_boss_projectile_hits_and_rearms_invincibility() {
    let mut enc = encounter();
    let at = enc.player().position;
    enc.spawn_boss_shot(at, Vec3::ZERO, 10.0);
    enc.spawn_boss_shot(at, Vec3::ZERO, 10.0);
    let frame = enc.tick(DT, &InputIntents::idle());

    // Second overlapping shot lands inside the fresh invincibility window.
    assert_eq!(frame.player.health, PLAYER_MAX_HEALTH - 10.0);
    assert!(frame.player.invincible);
    assert_eq!(
        count(&frame.events, |e| matches!(
            e,
            EncounterEvent::PlayerDamaged {
                source: DamageSource::Projectile(ProjectileKind::Orb),
                ..
            }
        )),
        1
    );
    assert_eq!(frame.stats.damage_taken, 10.0);
}

// ---- Collision against the boss ----

#[test]
fn test_weak_point_and_body_multipliers() {
    let mut enc = encounter();
    let weak_point = enc.boss().weak_point;
    enc.spawn_player_shot(weak_point, Vec3::ZERO, ProjectileKind::Standard, 10.0);
    let frame = enc.tick(DT, &InputIntents::idle());
    assert_eq!(frame.boss.health, BOSS_MAX_HEALTH - 20.0);
    assert!(frame.events.iter().any(|e| matches!(
        e,
        EncounterEvent::DamageNumber { weak_point: true, .. }
    )));

    // Low on the flank: inside the body, well clear of the weak point.
    enc.spawn_player_shot(Vec3::new(0.0, 1.0, 3.0), Vec3::ZERO, ProjectileKind::Standard, 10.0);
    let frame = enc.tick(DT, &InputIntents::idle());
    assert_eq!(frame.boss.health, BOSS_MAX_HEALTH - 25.0);
    assert_eq!(frame.player.combo, 2);
    assert_eq!(frame.stats.weak_point_hits, 1);
    assert_eq!(frame.stats.hits_landed, 2);
    // Projectiles were consumed.
    assert!(frame.projectiles.iter().all(|p| p.owner != Owner::Player));
}

#[test]
fn test_combo_tiers_and_timeout() {
    let mut enc = encounter();
    for _ in 0..COMBO_TIER_STEP {
        let weak_point = enc.boss().weak_point;
        enc.spawn_player_shot(weak_point, Vec3::ZERO, ProjectileKind::Standard, 10.0);
        enc.tick(DT, &InputIntents::idle());
    }
    assert_eq!(enc.player().combo, COMBO_TIER_STEP);
    assert_eq!(enc.player().multiplier, COMBO_MULTIPLIERS[1]);

    let before = enc.boss().health;
    let weak_point = enc.boss().weak_point;
    enc.spawn_player_shot(weak_point, Vec3::ZERO, ProjectileKind::Standard, 10.0);
    enc.tick(DT, &InputIntents::idle());
    assert!((before - enc.boss().health - 10.0 * COMBO_MULTIPLIERS[1] * 2.0).abs() < 1e-3);

    run(&mut enc, 50, 0.05, InputIntents::idle());
    assert_eq!(enc.player().combo, 0);
    assert_eq!(enc.player().multiplier, 1.0);
}

#[test]
fn test_charged_weak_point_hit_stuns_once_per_window() {
    let mut enc = encounter();
    let weak_point = enc.boss().weak_point;
    enc.spawn_player_shot(weak_point, Vec3::ZERO, ProjectileKind::Charged, CHARGED_DAMAGE);
    let frame = enc.tick(DT, &InputIntents::idle());
    assert_eq!(frame.boss.state, BossStateKind::Stunned);
    assert_eq!(
        count(&frame.events, |e| matches!(e, EncounterEvent::BossStunned { .. })),
        1
    );

    // Stun wears off, immunity has not.
    run(&mut enc, 40, 0.05, InputIntents::idle());
    assert_eq!(enc.boss().cycle.kind(), BossStateKind::Idle);
    let weak_point = enc.boss().weak_point;
    enc.spawn_player_shot(weak_point, Vec3::ZERO, ProjectileKind::Charged, CHARGED_DAMAGE);
    let frame = enc.tick(DT, &InputIntents::idle());
    assert_eq!(frame.boss.state, BossStateKind::Idle);
    assert!(frame.events.iter().all(|e| !matches!(e, EncounterEvent::BossStunned { .. })));
}

#[test]
fn test_minion_kill_rewards_focus() {
    let mut enc = encounter();
    let spot = Vec3::new(10.0, 2.0, 10.0);
    enc.spawn_minion_at(spot);
    enc.spawn_player_shot(spot, Vec3::ZERO, ProjectileKind::Standard, MINION_HEALTH);
    let frame = enc.tick(DT, &InputIntents::idle());

    assert!(frame.minions.is_empty());
    assert_eq!(
        count(&frame.events, |e| matches!(e, EncounterEvent::MinionKilled { .. })),
        1
    );
    assert!(frame.player.focus >= FOCUS_PER_MINION_KILL);
    assert_eq!(frame.stats.minions_killed, 1);
    // Minion hits do not feed the combo.
    assert_eq!(frame.player.combo, 0);
}

// ---- Projectiles and minions ----

#[test]
fn test_homing_orb_turns_toward_player_within_speed_cap() {
    let mut enc = encounter();
    let target = enc.player().position;
    // Launched sideways, well clear of the player.
    enc.spawn_homing_orb(target + Vec3::new(10.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 12.0));

    let mut max_speed = 0.0_f32;
    for _ in 0..20 {
        let frame = enc.tick(DT, &InputIntents::idle());
        for p in frame.projectiles.iter().filter(|p| p.kind == ProjectileKind::Homing) {
            max_speed = max_speed.max(p.velocity.length());
        }
    }
    assert!(max_speed <= HOMING_MAX_SPEED + 1e-4, "speed {max_speed}");
    assert!(max_speed > 12.0);

    let orb = enc
        .snapshot()
        .projectiles
        .into_iter()
        .find(|p| p.kind == ProjectileKind::Homing)
        .unwrap();
    // Velocity has swung toward the player (negative x).
    assert!(orb.velocity.x < -1.0, "velocity {:?}", orb.velocity);
}

#[test]
fn test_minion_seeks_then_brakes_inside_engagement_radius() {
    let mut enc = encounter();
    let target = enc.player().position;
    enc.spawn_minion_at(target + Vec3::new(30.0, 0.0, 0.0));

    let minion = |enc: &Encounter| {
        let mut query = enc.world().query::<(&Position, &Velocity, &Minion)>();
        let (_, (pos, vel, _)) = query.iter().next().unwrap();
        (pos.0, vel.0)
    };

    for tick in 0..200 {
        let max = enc.player().max_health;
        enc.player_mut().health = max;
        enc.tick(0.05, &InputIntents::idle());
        if tick == 20 {
            let (pos, vel) = minion(&enc);
            assert!(pos.distance(target) < 29.0);
            assert!(vel.length() <= MINION_SPEED + 1e-3);
        }
    }

    let (pos, vel) = minion(&enc);
    let distance = pos.distance(enc.player().position);
    assert!(distance <= MINION_ENGAGE_RADIUS, "stopped at {distance}");
    assert!(distance > PLAYER_RADIUS + MINION_RADIUS);
    assert!(vel.length() < 0.05);
}

#[test]
fn test_minion_bolts_follow_fire_cooldown() {
    let mut enc = encounter();
    let target = enc.player().position;
    enc.spawn_minion_at(target + Vec3::new(0.0, 0.0, 6.0));

    let dt = 0.05;
    let mut bolts = BTreeSet::new();
    for tick in 1..=130 {
        let max = enc.player().max_health;
        enc.player_mut().health = max;
        enc.tick(dt, &InputIntents::idle());
        for (_, proj) in enc.world().query::<&Projectile>().iter() {
            if proj.kind == ProjectileKind::MinionBolt {
                bolts.insert(proj.seq);
            }
        }
        // First bolt after one cooldown, then one per cooldown.
        let elapsed = tick as f32 * dt;
        if elapsed < MINION_FIRE_COOLDOWN - dt {
            assert!(bolts.is_empty(), "early bolt at {elapsed}s");
        }
        if tick == 60 || tick == 100 {
            assert_eq!(bolts.len(), (elapsed / MINION_FIRE_COOLDOWN) as usize);
        }
    }
    assert_eq!(bolts.len(), 3);
}

#[test]
fn test_minion_contact_damages_player() {
    let mut enc = encounter();
    let at = enc.player().position;
    enc.spawn_minion_at(at);
    let frame = enc.tick(DT, &InputIntents::idle());
    assert_eq!(
        count(&frame.events, |e| matches!(
            e,
            EncounterEvent::PlayerDamaged {
                source: DamageSource::MinionContact,
                ..
            }
        )),
        1
    );
    assert_eq!(frame.player.health, PLAYER_MAX_HEALTH - MINION_CONTACT_DAMAGE);
    assert!(frame.player.invincible);
}

// ---- Focus and allies ----

#[test]
fn test_summon_requires_full_focus() {
    let mut enc = encounter();
    let summon = InputIntents {
        summon: true,
        ..InputIntents::default()
    };
    enc.player_mut().focus = FOCUS_MAX * 0.5;
    let frame = enc.tick(DT, &summon);
    assert!(!frame.ally.active);

    enc.player_mut().focus = FOCUS_MAX;
    let frame = enc.tick(DT, &summon);
    assert!(frame.ally.active);
    assert_eq!(frame.player.focus, 0.0);
    assert_eq!(frame.player.multiplier, ALLY_MULTIPLIER_FLOOR);
    assert_eq!(frame.ally.members.len(), ALLY_COUNT as usize);
    assert_eq!(
        count(&frame.events, |e| matches!(e, EncounterEvent::AllySummoned { .. })),
        1
    );

    let events = run(&mut enc, (ALLY_DURATION / 0.05) as usize + 5, 0.05, InputIntents::idle());
    assert!(events.iter().any(|e| matches!(e, EncounterEvent::AllyDismissed)));
    assert!(events.iter().any(|e| matches!(e, EncounterEvent::DamageNumber { .. })));
}

// ---- Boss cycle ----

#[test]
fn test_no_immediate_attack_repeat() {
    let mut enc = encounter();
    let mut started = Vec::new();
    for _ in 0..3000 {
        let max = enc.player().max_health;
        enc.player_mut().health = max;
        let frame = enc.tick(0.05, &InputIntents::idle());
        for e in &frame.events {
            if let EncounterEvent::AttackStarted { attack } = e {
                started.push(*attack);
            }
        }
    }
    assert!(started.len() >= 10, "boss should keep attacking");
    for pair in started.windows(2) {
        assert_ne!(pair[0], pair[1], "attack repeated back to back");
    }
}

#[test]
fn test_lunge_contact_damages_player() {
    let mut enc = encounter();
    enc.force_attack(AttackId::Lunge);
    let events = run(&mut enc, 240, DT, InputIntents::idle());
    assert!(events.iter().any(|e| matches!(
        e,
        EncounterEvent::PlayerDamaged {
            source: DamageSource::Lunge,
            ..
        }
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        EncounterEvent::AttackEnded {
            attack: AttackId::Lunge,
            forced: false
        }
    )));
    assert_eq!(enc.boss().position, enc.boss().home);
    assert_eq!(enc.boss().contact_damage, 0.0);
}

#[test]
fn test_ring_hits_player_once() {
    let mut enc = encounter();
    enc.force_attack(AttackId::ExpandingRing);
    let events = run(&mut enc, 360, DT, InputIntents::idle());
    let ring_hits = count(&events, |e| {
        matches!(
            e,
            EncounterEvent::PlayerDamaged {
                source: DamageSource::Ring,
                ..
            }
        )
    });
    assert_eq!(ring_hits, 1);
    // Hazards are released with the attack.
    assert!(enc.snapshot().hazards.is_empty());
}

#[test]
fn test_roar_pulse_slows_player() {
    let mut enc = encounter();
    enc.player_mut().position = Vec3::new(0.0, 0.0, -8.0);
    enc.force_attack(AttackId::Roar);
    let events = run(&mut enc, 100, DT, InputIntents::idle());
    assert!(events.iter().any(|e| matches!(
        e,
        EncounterEvent::PlayerDamaged {
            source: DamageSource::Roar,
            ..
        }
    )));
    assert!(enc.player().slow_secs > 0.0);
    assert_eq!(enc.player().slow_factor, ROAR_SLOW_FACTOR);
}

#[test]
fn test_slow_scales_top_speed() {
    let strafe = InputIntents {
        move_axis: Vec3::new(1.0, 0.0, 0.0),
        ..InputIntents::default()
    };

    let mut free = encounter();
    run(&mut free, 100, DT, strafe);
    assert!((free.player().velocity.length() - PLAYER_MAX_SPEED).abs() < 0.01);

    let mut slowed = encounter();
    slowed.player_mut().slow_factor = ROAR_SLOW_FACTOR;
    slowed.player_mut().slow_secs = 60.0;
    run(&mut slowed, 100, DT, strafe);
    let speed = slowed.player().velocity.length();
    assert!((speed - PLAYER_MAX_SPEED * ROAR_SLOW_FACTOR).abs() < 0.01, "speed {speed}");
}

// ---- Phase transitions ----

#[test]
fn test_threshold_crossing_starts_transition() {
    let mut enc = encounter();
    enc.set_boss_health(BOSS_MAX_HEALTH * 0.7 + 1.0);
    enc.force_attack(AttackId::SweepingBeam);
    enc.spawn_boss_shot(Vec3::new(10.0, 2.0, 10.0), Vec3::ZERO, 5.0);
    let weak_point = enc.boss().weak_point;
    enc.spawn_player_shot(weak_point, Vec3::ZERO, ProjectileKind::Standard, 10.0);
    let frame = enc.tick(DT, &InputIntents::idle());

    assert_eq!(frame.boss.phase, 2);
    assert_eq!(frame.boss.state, BossStateKind::Transitioning);
    assert_eq!(frame.boss.attack, None);
    assert!(frame.events.contains(&EncounterEvent::PhaseChanged { phase: 2 }));
    assert!(frame.events.contains(&EncounterEvent::AttackEnded {
        attack: AttackId::SweepingBeam,
        forced: true
    }));
    assert!(frame.events.iter().any(|e| matches!(e, EncounterEvent::Message { .. })));
    assert!(frame.projectiles.iter().all(|p| p.owner != Owner::Boss));

    // Shots are absorbed while transitioning.
    let health = frame.boss.health;
    let weak_point = enc.boss().weak_point;
    enc.spawn_player_shot(weak_point, Vec3::ZERO, ProjectileKind::Standard, 10.0);
    let frame = enc.tick(DT, &InputIntents::idle());
    assert_eq!(frame.boss.health, health);
    assert!(frame.projectiles.iter().all(|p| p.owner != Owner::Player));
}

#[test]
fn test_phase_advances_one_step_at_a_time() {
    let mut enc = encounter();
    enc.set_boss_health(BOSS_MAX_HEALTH * 0.7 + 1.0);
    let weak_point = enc.boss().weak_point;
    enc.spawn_player_shot(weak_point, Vec3::ZERO, ProjectileKind::Standard, 1000.0);

    let mut phases = Vec::new();
    let mut last = 1;
    for _ in 0..400 {
        let max = enc.player().max_health;
        enc.player_mut().health = max;
        let frame = enc.tick(0.05, &InputIntents::idle());
        assert!(frame.boss.phase >= last, "phase decreased");
        last = frame.boss.phase;
        for e in &frame.events {
            if let EncounterEvent::PhaseChanged { phase } = e {
                phases.push(*phase);
            }
        }
    }
    assert_eq!(phases, vec![2, 3, 4]);
}

// ---- Outcomes ----

#[test]
fn test_victory_callback_fires_once_after_delay() {
    let mut enc = encounter();
    let calls = record_completion(&mut enc);
    enc.set_boss_health(10.0);
    let weak_point = enc.boss().weak_point;
    enc.spawn_player_shot(weak_point, Vec3::ZERO, ProjectileKind::Standard, 10.0);
    let frame = enc.tick(DT, &InputIntents::idle());

    assert_eq!(frame.boss.health, 0.0);
    assert_eq!(frame.boss.state, BossStateKind::Incapacitated);
    assert!(matches!(
        frame.status,
        EncounterStatus::Ending {
            outcome: Outcome::Victory,
            ..
        }
    ));
    assert!(calls.borrow().is_empty());

    // Player input is ignored during the sequence.
    let events = run(&mut enc, 10, 0.05, InputIntents::firing());
    assert_eq!(count(&events, |e| matches!(e, EncounterEvent::ShotFired { .. })), 0);

    let mut events = run(&mut enc, 100, 0.05, InputIntents::idle());
    events.extend(run(&mut enc, 20, 0.05, InputIntents::idle()));
    assert_eq!(*calls.borrow(), vec![true]);
    let ended = EncounterEvent::EncounterEnded {
        outcome: Outcome::Victory,
    };
    assert_eq!(count(&events, |e| *e == ended), 1);
    assert_eq!(
        enc.status(),
        EncounterStatus::Finished {
            outcome: Outcome::Victory
        }
    );
}

#[test]
fn test_defeat_callback_fires_once_and_health_freezes() {
    let mut enc = encounter();
    let calls = record_completion(&mut enc);
    enc.player_mut().health = 5.0;
    let at = enc.player().position;
    enc.spawn_boss_shot(at, Vec3::ZERO, 10.0);
    let frame = enc.tick(DT, &InputIntents::idle());
    assert_eq!(frame.player.health, 0.0);
    assert!(matches!(
        frame.status,
        EncounterStatus::Ending {
            outcome: Outcome::Defeat,
            ..
        }
    ));

    for _ in 0..100 {
        let at = enc.player().position;
        enc.spawn_boss_shot(at, Vec3::ZERO, 10.0);
        let frame = enc.tick(0.05, &InputIntents::idle());
        assert_eq!(frame.player.health, 0.0);
    }
    assert_eq!(*calls.borrow(), vec![false]);
}

#[test]
fn test_simultaneous_knockout_is_victory() {
    let mut enc = encounter();
    enc.set_boss_health(1.0);
    enc.player_mut().health = 1.0;
    let weak_point = enc.boss().weak_point;
    let at = enc.player().position;
    enc.spawn_player_shot(weak_point, Vec3::ZERO, ProjectileKind::Standard, 10.0);
    enc.spawn_boss_shot(at, Vec3::ZERO, 10.0);
    let frame = enc.tick(DT, &InputIntents::idle());
    assert!(matches!(
        frame.status,
        EncounterStatus::Ending {
            outcome: Outcome::Victory,
            ..
        }
    ));
}

#[test]
fn test_late_callback_still_fires_once() {
    let mut enc = encounter();
    enc.set_boss_health(1.0);
    let weak_point = enc.boss().weak_point;
    enc.spawn_player_shot(weak_point, Vec3::ZERO, ProjectileKind::Standard, 10.0);
    run(&mut enc, 120, 0.05, InputIntents::idle());
    let calls = record_completion(&mut enc);
    run(&mut enc, 10, 0.05, InputIntents::idle());
    assert_eq!(*calls.borrow(), vec![true]);
}

// ---- Teardown ----

#[test]
fn test_teardown_is_idempotent_and_inert() {
    let mut enc = encounter();
    let calls = record_completion(&mut enc);
    run(&mut enc, 10, DT, InputIntents::firing());
    let time = enc.time();

    enc.teardown();
    enc.teardown();
    assert_eq!(enc.status(), EncounterStatus::TornDown);

    let frame = enc.tick(DT, &InputIntents::firing());
    assert!(frame.events.is_empty());
    assert!(frame.projectiles.is_empty());
    assert_eq!(frame.time, time);
    assert!(calls.borrow().is_empty());
}

// ---- Invariants over a long run ----

fn check_bounds(frame: &FrameResult) {
    assert!(frame.player.health >= 0.0 && frame.player.health <= frame.player.max_health);
    assert!(frame.boss.health >= 0.0 && frame.boss.health <= frame.boss.max_health);
    assert!(frame.player.focus >= 0.0 && frame.player.focus <= frame.player.focus_max);
    assert!((1..=MAX_PHASE).contains(&frame.boss.phase));
}

#[test]
fn test_bounds_hold_over_long_run() {
    let mut enc = encounter();
    let mut last_phase = 1;
    for tick in 0..3600 {
        let frame = enc.tick(DT, &scripted_intents(tick));
        check_bounds(&frame);
        assert!(frame.boss.phase >= last_phase);
        last_phase = frame.boss.phase;
        // Multiplier is the tier of the combo unless the ally floor applies.
        if !frame.ally.active {
            let tier = (frame.player.combo / COMBO_TIER_STEP).min(4) as usize;
            assert_eq!(frame.player.multiplier, COMBO_MULTIPLIERS[tier]);
        }
    }
}

// ---- Side view ----

#[test]
fn test_side_view_stays_in_plane() {
    let mut enc = Encounter::new(EncounterConfig::side_view_2d()).unwrap();
    enc.set_boss_health(BOSS_MAX_HEALTH * 0.1);
    let mut attacks = Vec::new();
    for tick in 0..2400 {
        let max = enc.player().max_health;
        enc.player_mut().health = max;
        let frame = enc.tick(1.0 / 30.0, &scripted_intents(tick));
        assert!(frame.player.position.z.abs() < 1e-5);
        assert!(frame.projectiles.iter().all(|p| p.position.z.abs() < 1e-4));
        assert!(frame.minions.iter().all(|m| m.position.z.abs() < 1e-4));
        for e in &frame.events {
            if let EncounterEvent::AttackStarted { attack } = e {
                attacks.push(*attack);
            }
        }
    }
    assert!(!attacks.is_empty());
    assert!(!attacks.contains(&AttackId::Lunge));
}

// ---- Cleanup ----

#[test]
fn test_expired_projectiles_removed() {
    let mut enc = encounter();
    enc.spawn_boss_shot(Vec3::new(30.0, 2.0, 30.0), Vec3::ZERO, 5.0);
    assert_eq!(enc.snapshot().projectiles.len(), 1);
    run(&mut enc, 45, 0.05, InputIntents::idle());
    assert!(enc
        .snapshot()
        .projectiles
        .iter()
        .all(|p| p.position != Vec3::new(30.0, 2.0, 30.0)));
}

#[test]
fn test_out_of_bounds_projectiles_removed() {
    let mut enc = encounter();
    let edge = ARENA_RADIUS + OOB_MARGIN;
    enc.spawn_boss_shot(Vec3::new(0.0, 2.0, edge - 5.0), Vec3::ZERO, 5.0);
    enc.spawn_boss_shot(Vec3::new(0.0, 2.0, edge + 5.0), Vec3::ZERO, 5.0);
    let frame = enc.tick(DT, &InputIntents::idle());

    // Both are far from expiry; only the one past the margin goes.
    assert_eq!(frame.projectiles.len(), 1);
    assert!((frame.projectiles[0].position.z - (edge - 5.0)).abs() < 1e-4);
}
