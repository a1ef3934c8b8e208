//! Scripted intent source: aims at the weak point, keeps the trigger down,
//! strafes, dodges incoming fire and summons the squad when it can.

use glam::{Vec2, Vec3};

use warden_core::arena::Arena;
use warden_core::commands::InputIntents;
use warden_core::constants::PLAYER_EYE_HEIGHT;
use warden_core::enums::{BossStateKind, Owner};
use warden_core::state::FrameResult;
use warden_core::types::angle_delta;

/// Seconds between strafe direction flips.
const STRAFE_PERIOD: f64 = 3.0;
/// Boss projectiles closer than this trigger a dodge.
const DODGE_RADIUS: f32 = 4.0;

pub struct Autopilot {
    arena: Arena,
}

impl Autopilot {
    pub fn new(arena: Arena) -> Self {
        Self { arena }
    }

    /// Intents for the next tick, derived from the last frame.
    pub fn intents(&self, frame: &FrameResult) -> InputIntents {
        let player = &frame.player;
        let boss = &frame.boss;

        let origin = if self.arena.is_side_view() {
            player.position
        } else {
            player.position + Vec3::Y * PLAYER_EYE_HEIGHT
        };
        let target = boss.weak_point;
        let yaw = self.arena.angle_to(origin, target);
        let pitch = if self.arena.is_side_view() {
            0.0
        } else {
            let reach = self.arena.plane_distance(origin, target).max(1e-3);
            (target.y - origin.y).atan2(reach)
        };
        let aim_delta = Vec2::new(
            angle_delta(player.facing.yaw, yaw),
            pitch - player.facing.pitch,
        );

        let threatened = frame.projectiles.iter().any(|p| {
            p.owner == Owner::Boss && p.position.distance(player.position) < DODGE_RADIUS
        });

        let flip = (frame.time.elapsed_secs / STRAFE_PERIOD) as u64 % 2 == 0;
        let strafe = if flip { 1.0 } else { -1.0 };

        InputIntents {
            move_axis: Vec3::new(strafe, 0.0, 0.0),
            aim_delta,
            fire: true,
            charged_fire: matches!(
                boss.state,
                BossStateKind::Idle | BossStateKind::Recovering
            ),
            dodge: threatened && !player.dodging && player.dodge_cooldown <= 0.0,
            summon: player.focus >= player.focus_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::config::EncounterConfig;
    use warden_sim::Encounter;

    fn first_frame(config: EncounterConfig) -> FrameResult {
        let mut encounter = Encounter::new(config).unwrap();
        encounter.tick(1.0 / 60.0, &InputIntents::idle())
    }

    #[test]
    fn test_aims_at_weak_point() {
        let config = EncounterConfig::arena_3d();
        let autopilot = Autopilot::new(config.arena);
        let mut encounter = Encounter::new(config).unwrap();
        let mut frame = encounter.tick(1.0 / 60.0, &InputIntents::idle());
        for _ in 0..3 {
            let intents = autopilot.intents(&frame);
            frame = encounter.tick(1.0 / 60.0, &intents);
        }
        let idle = autopilot.intents(&frame);
        assert!(idle.aim_delta.x.abs() < 0.05, "yaw off by {}", idle.aim_delta.x);
        assert!(idle.aim_delta.y.abs() < 0.05, "pitch off by {}", idle.aim_delta.y);
        assert!(idle.fire);
    }

    #[test]
    fn test_side_view_keeps_pitch_flat() {
        let config = EncounterConfig::side_view_2d();
        let autopilot = Autopilot::new(config.arena);
        let intents = autopilot.intents(&first_frame(config));
        assert_eq!(intents.aim_delta.y, 0.0);
    }

    #[test]
    fn test_summons_at_full_focus() {
        let config = EncounterConfig::default();
        let autopilot = Autopilot::new(config.arena);
        let mut frame = first_frame(config);
        assert!(!autopilot.intents(&frame).summon);
        frame.player.focus = frame.player.focus_max;
        assert!(autopilot.intents(&frame).summon);
    }
}
