#[cfg(test)]
mod tests {
    use glam::Vec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use warden_core::arena::Arena;
    use warden_core::config::BossTuning;
    use warden_core::constants::*;
    use warden_core::enums::{AttackId, BossStateKind, ProjectileKind};
    use warden_core::events::EncounterEvent;

    use crate::fsm::{can_stun, evaluate, select_attack, AttackCycle, CycleContext};
    use crate::patterns::{ActiveAttack, AttackContext, AttackOutput};
    use crate::profiles::{get_profile, min_phase, phase_for_ratio, roster};

    const DT: f32 = 1.0 / 60.0;

    fn cycle_ctx(cycle: AttackCycle, dt: f32) -> CycleContext {
        CycleContext {
            cycle,
            dt,
            attack_cooldown: 2.0,
            post_transition_delay: POST_TRANSITION_ATTACK_DELAY,
        }
    }

    fn attack_ctx(arena: &Arena, phase: u8) -> AttackContext<'_> {
        AttackContext {
            arena,
            phase,
            dt: DT,
            boss_home: arena.boss_home(),
            boss_position: arena.boss_home(),
            boss_yaw: 0.0,
            player_position: arena.player_spawn(),
            player_velocity: Vec3::ZERO,
        }
    }

    /// Drive an attack at a fixed step until it reports completion.
    fn run_attack(id: AttackId, phase: u8, arena: &Arena) -> (ActiveAttack, Vec<AttackOutput>) {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut attack = ActiveAttack::start(id, phase);
        let mut frames = Vec::new();
        for _ in 0..(20.0 / DT) as usize {
            let out = attack.advance(&attack_ctx(arena, phase), &mut rng);
            let done = out.finished;
            frames.push(out);
            if done {
                break;
            }
        }
        (attack, frames)
    }

    fn spawned(frames: &[AttackOutput]) -> usize {
        frames.iter().map(|f| f.projectiles.len()).sum()
    }

    // --- Cycle FSM ---

    #[test]
    fn test_idle_counts_down_then_begins_attack() {
        let update = evaluate(&cycle_ctx(AttackCycle::Idle { cooldown: 0.5 }, 0.1));
        assert!(!update.begin_attack);
        assert!(!update.changed);
        match update.cycle {
            AttackCycle::Idle { cooldown } => assert!((cooldown - 0.4).abs() < 1e-5),
            other => panic!("expected idle, got {other:?}"),
        }

        let update = evaluate(&cycle_ctx(AttackCycle::Idle { cooldown: 0.05 }, 0.1));
        assert!(update.begin_attack);
        assert_eq!(update.cycle, AttackCycle::Executing);
    }

    #[test]
    fn test_recovery_and_stun_return_to_idle_with_phase_cooldown() {
        for cycle in [
            AttackCycle::Recovering { remaining: 0.05 },
            AttackCycle::Stunned { remaining: 0.05 },
        ] {
            let update = evaluate(&cycle_ctx(cycle, 0.1));
            assert!(update.changed);
            assert_eq!(update.cycle, AttackCycle::Idle { cooldown: 2.0 });
        }
    }

    #[test]
    fn test_transition_ends_with_post_transition_delay() {
        let update = evaluate(&cycle_ctx(AttackCycle::Transitioning { remaining: 0.01 }, 0.05));
        assert_eq!(
            update.cycle,
            AttackCycle::Idle {
                cooldown: POST_TRANSITION_ATTACK_DELAY
            }
        );
    }

    #[test]
    fn test_executing_and_incapacitated_hold() {
        for cycle in [AttackCycle::Executing, AttackCycle::Incapacitated] {
            let update = evaluate(&cycle_ctx(cycle, 10.0));
            assert_eq!(update.cycle, cycle);
            assert!(!update.begin_attack);
        }
        assert_eq!(AttackCycle::Incapacitated.kind(), BossStateKind::Incapacitated);
    }

    #[test]
    fn test_stun_only_interrupts_idle_or_recovery() {
        assert!(can_stun(&AttackCycle::Idle { cooldown: 1.0 }));
        assert!(can_stun(&AttackCycle::Recovering { remaining: 1.0 }));
        assert!(!can_stun(&AttackCycle::Executing));
        assert!(!can_stun(&AttackCycle::Transitioning { remaining: 1.0 }));
        assert!(!can_stun(&AttackCycle::Stunned { remaining: 1.0 }));
    }

    // --- Selection ---

    #[test]
    fn test_selection_never_repeats_previous() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let pool = roster(4, &Arena::radial());
        let mut last = None;
        for _ in 0..500 {
            let pick = select_attack(&pool, last, &mut rng).unwrap();
            assert_ne!(Some(pick), last);
            last = Some(pick);
        }
    }

    #[test]
    fn test_selection_single_entry_may_repeat() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let pool = [(AttackId::MeleeSlam, 1)];
        let pick = select_attack(&pool, Some(AttackId::MeleeSlam), &mut rng);
        assert_eq!(pick, Some(AttackId::MeleeSlam));
    }

    #[test]
    fn test_selection_skips_zero_weight_and_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(select_attack(&[], None, &mut rng), None);
        let pool = [(AttackId::Nova, 0), (AttackId::Roar, 4)];
        for _ in 0..50 {
            assert_eq!(
                select_attack(&pool, Some(AttackId::Roar), &mut rng),
                Some(AttackId::Roar)
            );
        }
    }

    // --- Profiles ---

    #[test]
    fn test_roster_grows_with_phase() {
        let arena = Arena::radial();
        let first: Vec<AttackId> = roster(1, &arena).iter().map(|(a, _)| *a).collect();
        assert_eq!(first.len(), 5);
        for gated in [
            AttackId::Summon,
            AttackId::Lunge,
            AttackId::SkyHazard,
            AttackId::DualBeams,
            AttackId::Nova,
        ] {
            assert!(!first.contains(&gated), "{gated:?} unlocked too early");
        }
        assert_eq!(roster(MAX_PHASE, &arena).len(), AttackId::ALL.len());
        for id in AttackId::ALL {
            assert!(min_phase(id) >= 1 && min_phase(id) <= MAX_PHASE);
        }
    }

    #[test]
    fn test_side_view_has_no_lunge() {
        let pool = roster(MAX_PHASE, &Arena::side_view());
        assert!(pool.iter().all(|(a, _)| *a != AttackId::Lunge));
        assert_eq!(pool.len(), AttackId::ALL.len() - 1);
    }

    #[test]
    fn test_profile_pacing_tightens() {
        let tuning = BossTuning::default();
        let arena = Arena::radial();
        let p1 = get_profile(1, &tuning, &arena);
        let p4 = get_profile(4, &tuning, &arena);
        assert!(p4.attack_cooldown < p1.attack_cooldown);
        assert!(p4.recovery_pause < p1.recovery_pause);
        // Out-of-range phases clamp.
        assert_eq!(get_profile(9, &tuning, &arena).roster.len(), p4.roster.len());
    }

    #[test]
    fn test_phase_for_ratio() {
        let t = PHASE_THRESHOLDS;
        assert_eq!(phase_for_ratio(1.0, &t), 1);
        assert_eq!(phase_for_ratio(0.71, &t), 1);
        assert_eq!(phase_for_ratio(0.7, &t), 2);
        assert_eq!(phase_for_ratio(0.5, &t), 2);
        assert_eq!(phase_for_ratio(0.39, &t), 3);
        assert_eq!(phase_for_ratio(0.15, &t), 4);
        assert_eq!(phase_for_ratio(0.0, &t), 4);
    }

    // --- Patterns ---

    #[test]
    fn test_every_attack_finishes_in_both_arenas() {
        for arena in [Arena::radial(), Arena::side_view()] {
            for id in AttackId::ALL {
                let (attack, frames) = run_attack(id, MAX_PHASE, &arena);
                assert!(
                    frames.last().map(|f| f.finished).unwrap_or(false),
                    "{id:?} never finished"
                );
                assert_eq!(attack.script.id(), id);
            }
        }
    }

    #[test]
    fn test_telegraph_ramps_during_windup() {
        let arena = Arena::radial();
        let (_, frames) = run_attack(AttackId::MeleeSlam, 1, &arena);
        let early = frames[5].telegraph;
        let late = frames[50].telegraph;
        assert!(early > 0.0 && late > early && late <= 1.0);
        assert_eq!(frames.last().map(|f| f.telegraph), Some(0.0));
    }

    #[test]
    fn test_slam_ring_scales_with_phase() {
        let arena = Arena::radial();
        let (_, p1) = run_attack(AttackId::MeleeSlam, 1, &arena);
        let (_, p3) = run_attack(AttackId::MeleeSlam, 3, &arena);
        assert_eq!(spawned(&p1), SLAM_BASE_SHARDS as usize);
        assert_eq!(
            spawned(&p3),
            (SLAM_BASE_SHARDS + 2 * SLAM_SHARDS_PER_PHASE) as usize
        );
        let shakes = p1
            .iter()
            .flat_map(|f| &f.events)
            .filter(|e| matches!(e, EncounterEvent::ScreenShake { .. }))
            .count();
        assert_eq!(shakes, 1);
    }

    #[test]
    fn test_spike_count_per_phase() {
        let arena = Arena::radial();
        let (_, frames) = run_attack(AttackId::RisingSpikes, 2, &arena);
        assert_eq!(
            spawned(&frames),
            (SPIKE_BASE_COUNT + SPIKE_COUNT_PER_PHASE) as usize
        );
        assert!(frames
            .iter()
            .flat_map(|f| &f.projectiles)
            .all(|p| p.kind == ProjectileKind::Spike && p.velocity.y > 0.0));
    }

    #[test]
    fn test_lobs_home_from_phase_three() {
        let arena = Arena::radial();
        let (_, early) = run_attack(AttackId::LobbedShot, 2, &arena);
        let (_, late) = run_attack(AttackId::LobbedShot, 3, &arena);
        assert!(early
            .iter()
            .flat_map(|f| &f.projectiles)
            .all(|p| p.kind == ProjectileKind::Orb));
        assert!(late
            .iter()
            .flat_map(|f| &f.projectiles)
            .all(|p| p.kind == ProjectileKind::Homing));
        assert_eq!(spawned(&late), (LOB_BASE_COUNT + 3) as usize);
    }

    #[test]
    fn test_summon_spawns_minions_once() {
        let arena = Arena::radial();
        let (_, frames) = run_attack(AttackId::Summon, 2, &arena);
        let minions: usize = frames.iter().map(|f| f.minions.len()).sum();
        assert_eq!(minions, (SUMMON_BASE_COUNT + 2) as usize);
    }

    #[test]
    fn test_lunge_contact_only_during_dash_and_returns_home() {
        let arena = Arena::radial();
        let (_, frames) = run_attack(AttackId::Lunge, 2, &arena);
        let contact_frames: Vec<usize> = frames
            .iter()
            .enumerate()
            .filter(|(_, f)| f.contact_damage > 0.0)
            .map(|(i, _)| i)
            .collect();
        assert!(!contact_frames.is_empty());
        let dash_secs = contact_frames.len() as f32 * DT;
        assert!((dash_secs - LUNGE_DASH).abs() < 3.0 * DT);
        // No body override during the wind-up.
        assert!(frames[0].body_position.is_none());
        assert_eq!(
            frames.last().and_then(|f| f.body_position),
            Some(arena.boss_home())
        );
    }

    #[test]
    fn test_rings_grow_to_max_before_finishing() {
        let arena = Arena::radial();
        let (attack, frames) = run_attack(AttackId::ExpandingRing, 4, &arena);
        assert_eq!(attack.hazards.len(), RING_MAX_COUNT as usize);
        assert!(attack
            .hazards
            .iter()
            .all(|r| (r.radius - RING_MAX_RADIUS).abs() < 1e-4));
        // Not finished while the last ring is still growing.
        let finished_at = frames.len() as f32 * DT;
        let last_spawn = 0.5 + RING_STAGGER * (RING_MAX_COUNT - 1) as f32;
        assert!(finished_at >= last_spawn + RING_MAX_RADIUS / RING_GROWTH - 2.0 * DT);
    }

    #[test]
    fn test_roar_pulses_once_with_slow() {
        let arena = Arena::radial();
        let (_, frames) = run_attack(AttackId::Roar, 2, &arena);
        let pulses: Vec<_> = frames.iter().flat_map(|f| &f.pulses).collect();
        assert_eq!(pulses.len(), 1);
        assert_eq!(pulses[0].radius, ROAR_RANGE);
        assert_eq!(pulses[0].slow_factor, ROAR_SLOW_FACTOR);
        assert_eq!(spawned(&frames), ROAR_RING_COUNT as usize);
    }

    #[test]
    fn test_nova_fires_full_burst() {
        for arena in [Arena::radial(), Arena::side_view()] {
            let (_, frames) = run_attack(AttackId::Nova, MAX_PHASE, &arena);
            assert_eq!(spawned(&frames), NOVA_PROJECTILES as usize);
        }
    }

    #[test]
    fn test_side_view_projectiles_stay_in_plane() {
        let arena = Arena::side_view();
        for id in [AttackId::SweepingBeam, AttackId::ConeSpray, AttackId::MeleeSlam] {
            let (_, frames) = run_attack(id, 1, &arena);
            assert!(frames
                .iter()
                .flat_map(|f| &f.projectiles)
                .all(|p| p.velocity.z.abs() < 1e-5 && p.position.z.abs() < 1e-5));
        }
    }
}
