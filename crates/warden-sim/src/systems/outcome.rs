//! Encounter outcome controller: starts the victory or defeat sequence and
//! finalizes it after its delay.

use tracing::info;

use warden_boss_ai::fsm::AttackCycle;
use warden_core::components::{AllySquad, PlayerCombat};
use warden_core::config::EncounterConfig;
use warden_core::enums::{EncounterStatus, FlashColor, Outcome};
use warden_core::events::EncounterEvent;

use crate::combatants::Boss;
use crate::systems::{ally, boss::end_attack};

/// Run the outcome controller. Returns the outcome on the tick it becomes
/// final; that happens at most once per encounter.
pub fn run(
    status: &mut EncounterStatus,
    boss: &mut Boss,
    player: &PlayerCombat,
    ally_squad: &mut AllySquad,
    dt: f32,
    config: &EncounterConfig,
    events: &mut Vec<EncounterEvent>,
) -> Option<Outcome> {
    match *status {
        EncounterStatus::Active => {
            // Boss first: a simultaneous double knockout is a win.
            if boss.health <= 0.0 {
                begin_victory(status, boss, ally_squad, config, events);
            } else if player.health <= 0.0 {
                begin_defeat(status, ally_squad, config, events);
            }
            None
        }
        EncounterStatus::Ending {
            outcome,
            remaining_secs,
        } => {
            let remaining_secs = remaining_secs - dt;
            if remaining_secs > 0.0 {
                *status = EncounterStatus::Ending {
                    outcome,
                    remaining_secs,
                };
                return None;
            }
            *status = EncounterStatus::Finished { outcome };
            info!(?outcome, "encounter finished");
            events.push(EncounterEvent::EncounterEnded { outcome });
            Some(outcome)
        }
        EncounterStatus::Finished { .. } | EncounterStatus::TornDown => None,
    }
}

fn begin_victory(
    status: &mut EncounterStatus,
    boss: &mut Boss,
    ally_squad: &mut AllySquad,
    config: &EncounterConfig,
    events: &mut Vec<EncounterEvent>,
) {
    end_attack(boss, true, events);
    boss.cycle = AttackCycle::Incapacitated;
    ally::dismiss(ally_squad, events);
    *status = EncounterStatus::Ending {
        outcome: Outcome::Victory,
        remaining_secs: config.victory_delay,
    };
    info!("boss defeated, victory sequence started");
    events.push(EncounterEvent::ScreenShake { magnitude: 2.0 });
    events.push(EncounterEvent::Flash {
        color: FlashColor::Gold,
        intensity: 1.0,
    });
    events.push(EncounterEvent::Message {
        text: "The Warden falls.".to_string(),
        duration_secs: config.victory_delay,
    });
}

fn begin_defeat(
    status: &mut EncounterStatus,
    ally_squad: &mut AllySquad,
    config: &EncounterConfig,
    events: &mut Vec<EncounterEvent>,
) {
    ally::dismiss(ally_squad, events);
    *status = EncounterStatus::Ending {
        outcome: Outcome::Defeat,
        remaining_secs: config.defeat_delay,
    };
    info!("player defeated, defeat sequence started");
    events.push(EncounterEvent::Flash {
        color: FlashColor::Red,
        intensity: 1.0,
    });
    events.push(EncounterEvent::Message {
        text: "You have fallen.".to_string(),
        duration_secs: config.defeat_delay,
    });
}
