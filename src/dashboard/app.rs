//! Dashboard application entry point

use eframe::egui;
use parking_lot::{Mutex, RwLock};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{info, warn};

use crate::config;
use crate::dashboard::components::{render_export_dialog, render_feedback_window, render_sidebar};
use crate::dashboard::state::{DashboardState, DashboardView};
use crate::dashboard::theme;
use crate::dashboard::views::{render_capture_view, render_home_view, render_settings_view};
use crate::export::ExportMask;
use crate::feedback::FeedbackSurface;
use crate::input;
use crate::paths;
use crate::runner::{Runner, RunnerRequest};
use crate::settings;
use crate::shared::{RunnerCommand, SharedAppState};

/// The main dashboard application
pub struct DigToolApp {
    /// Shared application state
    shared_state: Arc<RwLock<SharedAppState>>,
    /// Dashboard-specific state
    dashboard_state: DashboardState,
    /// Whether theme has been applied
    theme_applied: bool,
    /// Automation runner, while active
    runner: Option<Runner>,
    /// Feedback surface for the current bulk operation
    feedback: Arc<Mutex<FeedbackSurface>>,
    /// Worker applying a settings bundle
    apply_worker: Option<JoinHandle<()>>,
    /// Where the configuration is persisted
    config_path: Option<PathBuf>,
}

impl DigToolApp {
    pub fn new(shared_state: Arc<RwLock<SharedAppState>>, config_path: Option<PathBuf>) -> Self {
        Self {
            shared_state,
            dashboard_state: DashboardState::default(),
            theme_applied: false,
            runner: None,
            feedback: Arc::new(Mutex::new(FeedbackSurface::new("Applying settings"))),
            apply_worker: None,
            config_path,
        }
    }

    /// Create eframe options for the dashboard window
    pub fn options(icon: Option<egui::IconData>) -> eframe::NativeOptions {
        let mut viewport = egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([720.0, 480.0])
            .with_title("Dig Tool");
        if let Some(icon) = icon {
            viewport = viewport.with_icon(Arc::new(icon));
        }
        eframe::NativeOptions {
            viewport,
            ..Default::default()
        }
    }

    /// Process runner commands from the UI
    fn process_runner_commands(&mut self) {
        let command = {
            let mut state = self.shared_state.write();
            state.runtime.runner_command.take()
        };

        if let Some(cmd) = command {
            match cmd {
                RunnerCommand::Start => {
                    if self.runner.is_none() {
                        self.shared_state.write().runtime.reset_counters();
                        self.runner = Some(Runner::start(self.shared_state.clone()));
                    }
                }
                RunnerCommand::Stop => {
                    if let Some(mut runner) = self.runner.take() {
                        runner.stop();
                    }
                }
            }
        }

        // One-shot requests. A click works without the runner; a snapshot
        // needs a live capture loop.
        let (click, snapshot) = {
            let mut state = self.shared_state.write();
            (
                std::mem::take(&mut state.runtime.request_click),
                std::mem::take(&mut state.runtime.request_snapshot),
            )
        };
        if click {
            match &self.runner {
                Some(runner) => runner.request(RunnerRequest::Click),
                None => {
                    input::send_click();
                    self.shared_state.write().runtime.clicks_sent += 1;
                }
            }
        }
        if snapshot {
            match &self.runner {
                Some(runner) => runner.request(RunnerRequest::Snapshot),
                None => self
                    .shared_state
                    .write()
                    .runtime
                    .set_error("Start the runner before taking a snapshot"),
            }
        }

        // Reflect the live thread state, and reap a loop that died on its own.
        let alive = self.runner.as_ref().map(|r| r.is_running()).unwrap_or(false);
        if !alive {
            self.runner = None;
        }
        self.shared_state.write().runtime.is_running = alive;
    }

    /// Process export/apply/save requests from the settings view
    fn process_settings_requests(&mut self) {
        if std::mem::take(&mut self.dashboard_state.settings.export_requested) {
            self.dashboard_state.export_dialog.open();
        }
        if let Some(result) = self.dashboard_state.export_dialog.take_result() {
            match result {
                Some(mask) => self.export_bundle(mask),
                // Cancelled: do nothing, never export with defaults.
                None => info!("export cancelled"),
            }
        }

        if std::mem::take(&mut self.dashboard_state.settings.apply_requested) {
            let path = resolve_path(&self.dashboard_state.settings.apply_path);
            self.start_apply(&path);
        }

        if std::mem::take(&mut self.dashboard_state.settings.save_requested) {
            self.save_config();
        }

        if self
            .apply_worker
            .as_ref()
            .map(|h| h.is_finished())
            .unwrap_or(false)
        {
            if let Some(handle) = self.apply_worker.take() {
                let _ = handle.join();
            }
        }
    }

    fn export_bundle(&mut self, mask: ExportMask) {
        let path = resolve_path(&self.dashboard_state.settings.export_path);
        let config = self.shared_state.read().config.clone();

        let written = settings::export_json(&config, &mask).and_then(|bundle| {
            let text = serde_json::to_string_pretty(&bundle)?;
            std::fs::write(&path, text)?;
            Ok(())
        });
        match written {
            Ok(()) => info!("settings exported to {}", path.display()),
            Err(e) => self
                .shared_state
                .write()
                .runtime
                .set_error(format!("Export failed: {e}")),
        }
    }

    fn start_apply(&mut self, path: &Path) {
        if self.apply_worker.is_some() {
            return;
        }

        let surface = Arc::new(Mutex::new(FeedbackSurface::new("Applying settings")));
        surface.lock().show_window();
        self.feedback = surface.clone();

        let loaded = std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|text| Ok(serde_json::from_str::<serde_json::Value>(&text)?));
        let incoming = match loaded {
            Ok(value) => value,
            Err(e) => {
                surface.lock().show_error("Apply failed", &e.to_string());
                return;
            }
        };

        let shared = self.shared_state.clone();
        let config_path = self.config_path.clone();
        self.apply_worker = Some(std::thread::spawn(move || {
            surface.lock().update_progress(0.0, Some("Loading bundle"));

            let mut config = shared.read().config.clone();
            settings::apply_bundle(&mut config, &incoming, &surface);
            shared.write().config = config.clone();

            if let Some(path) = config_path {
                if let Err(e) = config::save_config(&config, &path) {
                    warn!("could not persist applied settings: {e}");
                }
            }
        }));
    }

    fn save_config(&mut self) {
        let config = self.shared_state.read().config.clone();
        let Some(path) = self.config_path.clone() else {
            self.shared_state
                .write()
                .runtime
                .set_error("No config path available");
            return;
        };
        match config::save_config(&config, &path) {
            Ok(()) => info!("config saved to {}", path.display()),
            Err(e) => self
                .shared_state
                .write()
                .runtime
                .set_error(format!("Save failed: {e}")),
        }
    }
}

impl eframe::App for DigToolApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.theme_applied {
            theme::apply_theme(ctx);
            self.theme_applied = true;
        }

        self.process_runner_commands();
        self.process_settings_requests();

        // Keep repainting while a worker can change state off-frame.
        let busy = self.runner.is_some() || self.feedback.lock().is_open();
        if busy {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::SidePanel::left("sidebar")
            .resizable(false)
            .default_width(170.0)
            .show(ctx, |ui| {
                render_sidebar(ui, &mut self.dashboard_state.current_view);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::none().inner_margin(24.0).show(ui, |ui| {
                match self.dashboard_state.current_view {
                    DashboardView::Home => render_home_view(ui, &self.shared_state),
                    DashboardView::Capture => render_capture_view(
                        ui,
                        &mut self.dashboard_state.capture,
                        &self.shared_state,
                    ),
                    DashboardView::Settings => render_settings_view(
                        ui,
                        &mut self.dashboard_state.settings,
                        &self.shared_state,
                    ),
                }
            });
        });

        // Modals render last so they sit above the views.
        render_export_dialog(ctx, &mut self.dashboard_state.export_dialog);
        render_feedback_window(ctx, &self.feedback);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(mut runner) = self.runner.take() {
            runner.stop();
        }
        if let Some(handle) = self.apply_worker.take() {
            let _ = handle.join();
        }
        self.save_config();
    }
}

/// Interpret a path field: absolute stays as-is, relative lands next to
/// the executable.
fn resolve_path(field: &str) -> PathBuf {
    let path = PathBuf::from(field);
    if path.is_absolute() {
        path
    } else {
        paths::get_exe_dir().join(path)
    }
}

/// Run the dashboard application
pub fn run_dashboard(
    shared_state: Arc<RwLock<SharedAppState>>,
    config_path: Option<PathBuf>,
    icon: Option<egui::IconData>,
) -> Result<(), eframe::Error> {
    let app = DigToolApp::new(shared_state, config_path);
    eframe::run_native(
        "Dig Tool",
        DigToolApp::options(icon),
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
