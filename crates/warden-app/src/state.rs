//! Host state shared between the driver and the frame loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use warden_core::commands::InputIntents;
use warden_core::state::FrameResult;

/// Commands sent from the driver to the frame loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// Replace the held intents; they stay in effect until the next update.
    Intents(InputIntents),
    /// Tear the encounter down and stop the thread.
    Shutdown,
}

/// Shared host state.
///
/// The encounter itself never leaves the loop thread; the driver only sees
/// the latest frame and the final result.
pub struct HostState {
    /// Channel into the loop thread. `None` until the loop is started.
    pub command_tx: Mutex<Option<mpsc::Sender<LoopCommand>>>,
    /// Latest frame, updated by the loop thread after each tick.
    pub latest_frame: Arc<Mutex<Option<FrameResult>>>,
    /// Completion result; `Some(true)` on victory.
    pub result: Arc<Mutex<Option<bool>>>,
}

impl Default for HostState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_frame: Arc::new(Mutex::new(None)),
            result: Arc::new(Mutex::new(None)),
        }
    }
}

impl HostState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a command to the loop thread.
    pub fn send(&self, command: LoopCommand) -> Result<(), String> {
        let tx_lock = self.command_tx.lock().map_err(|e| e.to_string())?;
        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(command)
                .map_err(|e| format!("Failed to send command: {e}")),
            None => Err("Frame loop not started".into()),
        }
    }

    /// Clone of the latest frame, if any.
    pub fn latest(&self) -> Option<FrameResult> {
        self.latest_frame.lock().ok().and_then(|lock| lock.clone())
    }

    pub fn result(&self) -> Option<bool> {
        self.result.lock().ok().and_then(|lock| *lock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_state_creation() {
        let state = HostState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest().is_none());
        assert!(state.result().is_none());
    }

    #[test]
    fn test_send_before_start_fails() {
        let state = HostState::new();
        assert!(state.send(LoopCommand::Shutdown).is_err());
    }
}
