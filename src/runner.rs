//! Automation runner
//!
//! Worker thread that ticks the capture pipeline at the configured rate,
//! keeps the runtime statistics current, and services one-shot requests
//! (click dispatch, frame snapshots) from the dashboard.

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

use crate::capture::{desktop_session, Frame};
use crate::input;
use crate::paths;
use crate::shared::SharedAppState;

/// One-shot request serviced on the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerRequest {
    /// Dispatch a single click
    Click,
    /// Save the current frame as a PNG
    Snapshot,
}

/// Handle to the capture loop thread.
pub struct Runner {
    stop: Arc<AtomicBool>,
    sender: Sender<RunnerRequest>,
    handle: Option<JoinHandle<()>>,
}

impl Runner {
    /// Spawn the capture loop against the shared state.
    pub fn start(shared: Arc<RwLock<SharedAppState>>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let (sender, receiver) = unbounded();
        let flag = stop.clone();
        let handle = std::thread::spawn(move || run_loop(shared, receiver, flag));
        Self {
            stop,
            sender,
            handle: Some(handle),
        }
    }

    /// Queue a one-shot request for the next tick.
    pub fn request(&self, request: RunnerRequest) {
        let _ = self.sender.send(request);
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().map(|h| !h.is_finished()).unwrap_or(false)
    }

    /// Signal the loop and wait for it to exit.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Runner {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_loop(
    shared: Arc<RwLock<SharedAppState>>,
    receiver: Receiver<RunnerRequest>,
    stop: Arc<AtomicBool>,
) {
    let mut session = desktop_session();
    let mut last_click: Option<Instant> = None;
    let mut frames_this_second = 0u32;
    let mut fps_mark = Instant::now();

    info!("runner started");

    while !stop.load(Ordering::SeqCst) {
        let (bbox, interval, auto_click, click_delay) = {
            let state = shared.read();
            (
                state.config.parameters.capture_region,
                Duration::from_millis(state.config.parameters.tick_interval_ms),
                state.config.parameters.auto_click,
                Duration::from_millis(state.config.parameters.click_delay_ms),
            )
        };

        let tick_start = Instant::now();
        let frame = session.capture(bbox);

        match &frame {
            Some(frame) => {
                frames_this_second += 1;
                let mut state = shared.write();
                state.runtime.frames_captured += 1;
                state.runtime.last_frame_size = Some(frame.dimensions());
            }
            None => {
                debug!("capture yielded no frame");
                shared.write().runtime.capture_misses += 1;
            }
        }

        let elapsed = fps_mark.elapsed();
        if elapsed.as_secs_f32() >= 1.0 {
            let fps = frames_this_second as f32 / elapsed.as_secs_f32();
            frames_this_second = 0;
            fps_mark = Instant::now();
            shared.write().runtime.capture_fps = fps;
        }

        loop {
            match receiver.try_recv() {
                Ok(RunnerRequest::Click) => {
                    input::send_click();
                    last_click = Some(Instant::now());
                    shared.write().runtime.clicks_sent += 1;
                }
                Ok(RunnerRequest::Snapshot) => save_snapshot(frame.as_ref(), &shared),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        let click_due = last_click.map_or(true, |t| t.elapsed() >= click_delay);
        if auto_click && frame.is_some() && click_due {
            input::send_click();
            last_click = Some(Instant::now());
            shared.write().runtime.clicks_sent += 1;
        }

        if let Some(rest) = interval.checked_sub(tick_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    session.close();
    info!("runner stopped");
}

fn save_snapshot(frame: Option<&Frame>, shared: &Arc<RwLock<SharedAppState>>) {
    let Some(frame) = frame else {
        warn!("snapshot requested with no frame available");
        return;
    };

    let dir = shared
        .read()
        .config
        .configuration
        .snapshot_dir
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(paths::get_snapshots_dir);

    if let Err(e) = std::fs::create_dir_all(&dir) {
        shared
            .write()
            .runtime
            .set_error(format!("snapshot dir: {e}"));
        return;
    }

    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let path = dir.join(format!("snapshot_{stamp}.png"));

    match frame.to_rgb_image().save(&path) {
        Ok(()) => info!("snapshot saved to {}", path.display()),
        Err(e) => shared.write().runtime.set_error(format!("snapshot: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_runner_stops_cleanly() {
        let mut config = AppConfig::default();
        config.parameters.tick_interval_ms = 1;
        let shared = Arc::new(RwLock::new(SharedAppState::new(config)));

        let mut runner = Runner::start(shared.clone());
        assert!(runner.is_running());

        std::thread::sleep(Duration::from_millis(30));
        runner.stop();
        assert!(!runner.is_running());

        // Ticks happened: every one either delivered a frame or was a miss.
        let state = shared.read();
        assert!(state.runtime.frames_captured + state.runtime.capture_misses > 0);
    }

    #[test]
    fn test_requests_do_not_block_when_stopped() {
        let shared = Arc::new(RwLock::new(SharedAppState::default()));
        let mut runner = Runner::start(shared);
        runner.stop();
        // Channel send to a finished loop must not panic.
        runner.request(RunnerRequest::Snapshot);
    }
}
