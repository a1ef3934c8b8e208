//! Frame loop thread: runs the encounter against a real-time clock and
//! publishes frames.
//!
//! The encounter is created inside this thread; it never crosses threads.
//! Intents arrive via an `mpsc` channel. Frames are stored in shared state
//! for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{error, info};

use warden_core::commands::InputIntents;
use warden_core::config::EncounterConfig;
use warden_core::enums::{EncounterStatus, Outcome};
use warden_core::state::{FrameResult, StatsView};
use warden_sim::Encounter;

use crate::autopilot::Autopilot;
use crate::state::LoopCommand;

/// Target frame rate of the real-time loop.
pub const FRAME_RATE: u32 = 60;

/// Nominal duration of one frame.
const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// Spawns the frame loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_frame_loop(
    config: EncounterConfig,
    latest_frame: Arc<Mutex<Option<FrameResult>>>,
    result: Arc<Mutex<Option<bool>>>,
) -> std::io::Result<(mpsc::Sender<LoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = std::thread::Builder::new()
        .name("warden-frame-loop".into())
        .spawn(move || {
            run_frame_loop(config, cmd_rx, &latest_frame, result);
        })?;

    Ok((cmd_tx, handle))
}

/// The frame loop. Runs until the encounter finishes, a Shutdown command
/// arrives, or the channel disconnects.
fn run_frame_loop(
    config: EncounterConfig,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    latest_frame: &Mutex<Option<FrameResult>>,
    result: Arc<Mutex<Option<bool>>>,
) {
    let mut encounter = match Encounter::new(config) {
        Ok(encounter) => encounter,
        Err(e) => {
            error!(error = %e, "rejected encounter config");
            return;
        }
    };
    encounter.on_complete(move |won| {
        if let Ok(mut lock) = result.lock() {
            *lock = Some(won);
        }
    });

    let mut intents = InputIntents::idle();
    let mut last_frame = Instant::now();
    let mut next_frame_time = last_frame;

    loop {
        // 1. Drain all pending commands; the newest intents win
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Intents(next)) => intents = next,
                Ok(LoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    encounter.teardown();
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance by the measured wall-clock delta; the engine clamps it
        let now = Instant::now();
        let delta = (now - last_frame).as_secs_f32();
        last_frame = now;
        let frame = encounter.tick(delta, &intents);
        let finished = matches!(frame.status, EncounterStatus::Finished { .. });

        // 3. Store latest frame for polling
        if let Ok(mut lock) = latest_frame.lock() {
            *lock = Some(frame);
        }
        if finished {
            info!("frame loop finished");
            return;
        }

        // 4. Sleep until the next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind; reset instead of bursting
            next_frame_time = now;
        }
    }
}

/// Summary of a completed headless run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// `None` when the tick limit ran out first.
    pub outcome: Option<Outcome>,
    pub stats: StatsView,
    pub ticks: u64,
}

/// Run an encounter synchronously at a fixed step with the autopilot at the
/// controls, up to `max_ticks`.
pub fn run_headless(config: EncounterConfig, dt: f32, max_ticks: u64) -> RunReport {
    let autopilot = Autopilot::new(config.arena);
    let mut encounter = match Encounter::new(config) {
        Ok(encounter) => encounter,
        Err(e) => {
            error!(error = %e, "rejected encounter config");
            return RunReport {
                outcome: None,
                stats: StatsView::default(),
                ticks: 0,
            };
        }
    };

    let mut frame = encounter.snapshot();
    let mut ticks = 0;
    while ticks < max_ticks {
        let intents = autopilot.intents(&frame);
        frame = encounter.tick(dt, &intents);
        ticks += 1;
        if let EncounterStatus::Finished { outcome } = frame.status {
            return RunReport {
                outcome: Some(outcome),
                stats: frame.stats,
                ticks,
            };
        }
    }

    encounter.teardown();
    RunReport {
        outcome: None,
        stats: frame.stats,
        ticks,
    }
}
