//! Shared application state between dashboard and runner

use crate::config::AppConfig;

/// Central shared state behind an `Arc<RwLock<_>>`.
#[derive(Debug, Clone, Default)]
pub struct SharedAppState {
    /// Application configuration
    pub config: AppConfig,
    /// Runtime state (not persisted)
    pub runtime: RuntimeState,
}

impl SharedAppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            runtime: RuntimeState::default(),
        }
    }
}

/// Command to control the runner from UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerCommand {
    /// Start the capture loop
    Start,
    /// Stop the capture loop
    Stop,
}

/// Runtime state that is not persisted
#[derive(Debug, Clone, Default)]
pub struct RuntimeState {
    /// Whether the automation runner is active
    pub is_running: bool,
    /// Current capture rate
    pub capture_fps: f32,
    /// Frames delivered since the runner started
    pub frames_captured: u64,
    /// Ticks where capture yielded no frame
    pub capture_misses: u64,
    /// Dimensions of the most recent frame
    pub last_frame_size: Option<(u32, u32)>,
    /// Clicks dispatched since the runner started
    pub clicks_sent: u64,
    /// Last error message (if any)
    pub last_error: Option<String>,
    /// Pending runner command from UI
    pub runner_command: Option<RunnerCommand>,
    /// UI request for a one-shot click
    pub request_click: bool,
    /// UI request for a frame snapshot
    pub request_snapshot: bool,
}

impl RuntimeState {
    /// Clear any error state
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Set an error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.last_error = Some(error.into());
    }

    /// Reset the per-run counters.
    pub fn reset_counters(&mut self) {
        self.capture_fps = 0.0;
        self.frames_captured = 0;
        self.capture_misses = 0;
        self.clicks_sent = 0;
        self.last_frame_size = None;
    }
}
