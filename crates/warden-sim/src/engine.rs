//! Encounter engine, the core of the fight.
//!
//! `Encounter` owns the hecs world, the combatants and the RNG, runs all
//! systems in a fixed order each tick and produces `FrameResult`s. Completely
//! headless, enabling deterministic testing.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use warden_core::commands::InputIntents;
use warden_core::components::{AllySquad, BossRig, PlayerCombat};
use warden_core::config::{ConfigError, EncounterConfig};
use warden_core::enums::{EncounterStatus, Outcome};
use warden_core::events::EncounterEvent;
use warden_core::state::{FrameResult, StatsView};
use warden_core::types::SimTime;

use crate::combatants::{new_player, Boss};
use crate::systems;
use crate::systems::collision::CollisionContext;
use crate::systems::snapshot::FrameSources;

/// Invoked once when the encounter result becomes final; `true` on victory.
pub type CompletionCallback = Box<dyn FnMut(bool)>;

/// One attempt at the boss fight. Owns everything in it.
pub struct Encounter {
    config: EncounterConfig,
    world: World,
    time: SimTime,
    status: EncounterStatus,
    rng: ChaCha8Rng,
    next_seq: u64,
    despawn_buffer: Vec<Entity>,

    player: PlayerCombat,
    boss: Boss,
    ally: AllySquad,
    stats: StatsView,

    // --- Completion ---
    on_complete: Option<CompletionCallback>,
    /// Final result, once reached.
    result: Option<Outcome>,
    /// Whether the callback has been invoked.
    reported: bool,
}

/// Clamp a host frame delta into `[0, max_dt]`. Non-finite deltas count as 0.
pub fn clamp_dt(delta_secs: f32, max_dt: f32) -> f32 {
    if delta_secs.is_finite() && delta_secs > 0.0 {
        delta_secs.min(max_dt)
    } else {
        0.0
    }
}

impl Encounter {
    /// Validate `config` and build a fresh encounter.
    pub fn new(config: EncounterConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let rig = match config.boss.rig {
            Some(rig) => rig,
            None => {
                warn!("no boss rig supplied, using placeholder geometry");
                BossRig::default()
            }
        };

        info!(
            seed = config.seed,
            side_view = config.arena.is_side_view(),
            "encounter created"
        );

        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            status: EncounterStatus::Active,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_seq: 0,
            despawn_buffer: Vec::new(),
            player: new_player(&config.player, &config.arena),
            boss: Boss::new(&config.boss, rig, &config.arena),
            ally: AllySquad::default(),
            stats: StatsView::default(),
            on_complete: None,
            result: None,
            reported: false,
            config,
        })
    }

    /// Register the completion callback. Fires exactly once; if the result is
    /// already final it fires immediately.
    pub fn on_complete(&mut self, callback: impl FnMut(bool) + 'static) {
        if self.status == EncounterStatus::TornDown {
            return;
        }
        self.on_complete = Some(Box::new(callback));
        self.report();
    }

    /// Advance the encounter by one frame and return the resulting state.
    pub fn tick(&mut self, delta_secs: f32, intents: &InputIntents) -> FrameResult {
        if matches!(
            self.status,
            EncounterStatus::TornDown | EncounterStatus::Finished { .. }
        ) {
            return self.snapshot();
        }

        let dt = clamp_dt(delta_secs, self.config.max_dt);
        // Scripted endings ignore the player.
        let intents = if self.status == EncounterStatus::Active {
            *intents
        } else {
            InputIntents::idle()
        };
        let mut events = Vec::new();

        self.run_systems(dt, &intents, &mut events);
        self.time.advance(dt);

        let frame = self.build(events);
        self.report();
        frame
    }

    /// Stop the encounter. Idempotent; later ticks are inert and the
    /// completion callback never fires.
    pub fn teardown(&mut self) {
        if self.status == EncounterStatus::TornDown {
            return;
        }
        if !matches!(self.status, EncounterStatus::Finished { .. }) {
            warn!(elapsed = self.time.elapsed_secs, "encounter torn down before it finished");
        }
        self.world.clear();
        self.boss.attack = None;
        self.boss.pulses.clear();
        self.ally = AllySquad::default();
        self.on_complete = None;
        self.status = EncounterStatus::TornDown;
    }

    /// Current state without advancing; carries no events.
    pub fn snapshot(&self) -> FrameResult {
        self.build(Vec::new())
    }

    pub fn status(&self) -> EncounterStatus {
        self.status
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32, intents: &InputIntents, events: &mut Vec<EncounterEvent>) {
        let arena = self.config.arena;
        let active = self.status == EncounterStatus::Active;

        // 1. Player
        systems::player::run(
            &mut self.player,
            intents,
            dt,
            &self.config.player,
            &arena,
            &mut self.world,
            &mut self.next_seq,
            &mut self.ally,
            &mut self.stats,
            events,
        );
        // 2. Boss cycle and attack scripts
        systems::boss::run(
            &mut self.boss,
            dt,
            &self.player,
            &self.config.boss,
            &arena,
            &mut self.rng,
            &mut self.world,
            &mut self.next_seq,
            events,
        );
        // 3. Pools
        systems::projectiles::run(&mut self.world, dt, self.player.position);
        systems::minions::run(
            &mut self.world,
            dt,
            self.player.position,
            &arena,
            &mut self.next_seq,
        );
        systems::ally::run(
            &mut self.ally,
            dt,
            self.player.position,
            self.boss.position,
            self.boss.weak_point,
            &self.config.player,
            &arena,
            &mut self.world,
            &mut self.next_seq,
            events,
        );
        // 4-5. Damage and phases only while the fight is live
        if active {
            let mut ctx = CollisionContext {
                player: &mut self.player,
                boss: &mut self.boss,
                ally: &self.ally,
                player_tuning: &self.config.player,
                boss_tuning: &self.config.boss,
                arena: &arena,
                stats: &mut self.stats,
                events: &mut *events,
            };
            systems::collision::run(&mut self.world, &mut ctx, &mut self.despawn_buffer);
            systems::phase::run(
                &mut self.boss,
                &self.config.boss,
                &mut self.world,
                &mut self.despawn_buffer,
                events,
            );
        }
        // 6. Outcome
        if let Some(outcome) = systems::outcome::run(
            &mut self.status,
            &mut self.boss,
            &self.player,
            &mut self.ally,
            dt,
            &self.config,
            events,
        ) {
            self.result = Some(outcome);
        }
        // 7. Cleanup
        systems::cleanup::run(&mut self.world, &arena, &mut self.despawn_buffer);
    }

    fn build(&self, events: Vec<EncounterEvent>) -> FrameResult {
        let sources = FrameSources {
            time: self.time,
            status: self.status,
            player: &self.player,
            player_tuning: &self.config.player,
            boss: &self.boss,
            ally: &self.ally,
            arena: &self.config.arena,
            stats: self.stats,
        };
        systems::snapshot::build_frame(&self.world, &sources, events)
    }

    /// Deliver the final result to the callback, once.
    fn report(&mut self) {
        if self.reported {
            return;
        }
        let (Some(outcome), Some(callback)) = (self.result, self.on_complete.as_mut()) else {
            return;
        };
        self.reported = true;
        callback(outcome == Outcome::Victory);
    }

    // --- Test hooks ---

    #[cfg(test)]
    pub fn player(&self) -> &PlayerCombat {
        &self.player
    }

    #[cfg(test)]
    pub fn player_mut(&mut self) -> &mut PlayerCombat {
        &mut self.player
    }

    #[cfg(test)]
    pub fn boss(&self) -> &Boss {
        &self.boss
    }

    #[cfg(test)]
    pub fn set_boss_health(&mut self, health: f32) {
        self.boss.health = health;
    }

    /// Start `attack` immediately, bypassing the idle timer and the draw.
    #[cfg(test)]
    pub fn force_attack(&mut self, attack: warden_core::enums::AttackId) {
        let mut events = Vec::new();
        systems::boss::end_attack(&mut self.boss, true, &mut events);
        systems::boss::start_attack(&mut self.boss, attack, &mut events);
    }

    #[cfg(test)]
    pub fn spawn_player_shot(
        &mut self,
        position: glam::Vec3,
        velocity: glam::Vec3,
        kind: warden_core::enums::ProjectileKind,
        damage: f32,
    ) {
        crate::world_setup::spawn_projectile(
            &mut self.world,
            &mut self.next_seq,
            warden_core::enums::Owner::Player,
            kind,
            position,
            velocity,
            damage,
            2.0,
            warden_core::constants::SHOT_RADIUS,
        );
    }

    #[cfg(test)]
    pub fn spawn_boss_shot(&mut self, position: glam::Vec3, velocity: glam::Vec3, damage: f32) {
        crate::world_setup::spawn_projectile(
            &mut self.world,
            &mut self.next_seq,
            warden_core::enums::Owner::Boss,
            warden_core::enums::ProjectileKind::Orb,
            position,
            velocity,
            damage,
            2.0,
            warden_core::constants::BOSS_PROJECTILE_RADIUS,
        );
    }

    #[cfg(test)]
    pub fn spawn_homing_orb(&mut self, position: glam::Vec3, velocity: glam::Vec3) {
        crate::world_setup::spawn_projectile(
            &mut self.world,
            &mut self.next_seq,
            warden_core::enums::Owner::Boss,
            warden_core::enums::ProjectileKind::Homing,
            position,
            velocity,
            5.0,
            4.0,
            warden_core::constants::BOSS_PROJECTILE_RADIUS,
        );
    }

    #[cfg(test)]
    pub fn spawn_minion_at(&mut self, position: glam::Vec3) {
        crate::world_setup::spawn_minion(&mut self.world, &mut self.next_seq, position);
    }
}
