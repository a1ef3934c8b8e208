//! Phase transition controller.
//!
//! Health thresholds unlock phases one step at a time. A transition
//! force-ends the running attack, suspends the cycle, clears the boss's
//! projectiles from the field and announces the new phase.

use hecs::{Entity, World};
use tracing::info;

use warden_boss_ai::fsm::AttackCycle;
use warden_boss_ai::profiles::phase_for_ratio;
use warden_core::config::BossTuning;
use warden_core::constants::MAX_PHASE;
use warden_core::enums::FlashColor;
use warden_core::events::EncounterEvent;

use crate::combatants::Boss;
use crate::systems::boss::end_attack;
use crate::world_setup;

/// Seconds a phase announcement stays on screen.
const MESSAGE_SECS: f32 = 3.0;

fn phase_line(phase: u8) -> &'static str {
    match phase {
        2 => "The Warden stirs. Its armor splits along glowing seams.",
        3 => "The sky darkens. The Warden calls down the storm.",
        _ => "The Warden burns with its last strength!",
    }
}

/// Run the phase controller. Returns the new phase if one began.
pub fn run(
    boss: &mut Boss,
    tuning: &BossTuning,
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<EncounterEvent>,
) -> Option<u8> {
    if boss.health <= 0.0 || boss.phase >= MAX_PHASE {
        return None;
    }
    if matches!(
        boss.cycle,
        AttackCycle::Transitioning { .. } | AttackCycle::Incapacitated
    ) {
        return None;
    }

    let target = phase_for_ratio(boss.health_ratio(), &tuning.phase_thresholds);
    if target <= boss.phase {
        return None;
    }

    end_attack(boss, true, events);
    boss.phase += 1;
    boss.cycle = AttackCycle::Transitioning {
        remaining: tuning.transition_duration,
    };
    let purged = world_setup::purge_boss_projectiles(world, despawn_buffer);

    info!(phase = boss.phase, purged, "boss phase transition");
    events.push(EncounterEvent::PhaseChanged { phase: boss.phase });
    events.push(EncounterEvent::ScreenShake { magnitude: 1.2 });
    events.push(EncounterEvent::Flash {
        color: FlashColor::White,
        intensity: 0.9,
    });
    events.push(EncounterEvent::Message {
        text: phase_line(boss.phase).to_string(),
        duration_secs: MESSAGE_SECS,
    });
    Some(boss.phase)
}
