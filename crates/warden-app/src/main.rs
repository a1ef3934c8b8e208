use std::process::ExitCode;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use warden_app::autopilot::Autopilot;
use warden_app::game_loop::{self, FRAME_RATE};
use warden_app::state::{HostState, LoopCommand};
use warden_core::config::{ConfigError, EncounterConfig};

/// Simulated ceiling for a headless run: ten minutes of fight.
const HEADLESS_MAX_TICKS: u64 = 10 * 60 * FRAME_RATE as u64;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut realtime = false;
    let mut config_path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--realtime" => realtime = true,
            _ => config_path = Some(arg),
        }
    }

    let config = match load_config(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("warden: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = if realtime {
        run_realtime(config)
    } else {
        run_headless(config)
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("warden: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&str>) -> Result<EncounterConfig, String> {
    let Some(path) = path else {
        return Ok(EncounterConfig::default());
    };
    let json = std::fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    EncounterConfig::from_json_str(&json).map_err(|e: ConfigError| format!("{path}: {e}"))
}

fn run_headless(config: EncounterConfig) -> Result<(), String> {
    let report = game_loop::run_headless(config, 1.0 / FRAME_RATE as f32, HEADLESS_MAX_TICKS);
    let stats = serde_json::to_string_pretty(&report.stats).map_err(|e| e.to_string())?;
    match report.outcome {
        Some(outcome) => info!(?outcome, ticks = report.ticks, "encounter complete"),
        None => info!(ticks = report.ticks, "tick limit reached"),
    }
    println!("{stats}");
    Ok(())
}

fn run_realtime(config: EncounterConfig) -> Result<(), String> {
    let state = HostState::new();
    let autopilot = Autopilot::new(config.arena);
    let (tx, handle) = game_loop::spawn_frame_loop(
        config,
        state.latest_frame.clone(),
        state.result.clone(),
    )
    .map_err(|e| e.to_string())?;
    *state.command_tx.lock().map_err(|e| e.to_string())? = Some(tx);

    while !handle.is_finished() {
        if let Some(frame) = state.latest() {
            // The loop thread exits on its own once the encounter is final.
            let _ = state.send(LoopCommand::Intents(autopilot.intents(&frame)));
        }
        std::thread::sleep(Duration::from_millis(1000 / FRAME_RATE as u64));
    }
    handle.join().map_err(|_| "frame loop panicked".to_string())?;

    match state.result() {
        Some(true) => info!("victory"),
        Some(false) => info!("defeat"),
        None => info!("encounter stopped without a result"),
    }
    if let Some(frame) = state.latest() {
        let stats = serde_json::to_string_pretty(&frame.stats).map_err(|e| e.to_string())?;
        println!("{stats}");
    }
    Ok(())
}
