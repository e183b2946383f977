//! Capture view - region configuration and runner controls

use egui::RichText;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::capture::BBox;
use crate::dashboard::components::widgets::{
    button_row, int_field, section_card, stat_row, ButtonSpec,
};
use crate::dashboard::state::CaptureViewState;
use crate::dashboard::theme::ThemeColors;
use crate::shared::{RunnerCommand, SharedAppState};

/// Render the capture view
pub fn render_capture_view(
    ui: &mut egui::Ui,
    view_state: &mut CaptureViewState,
    shared_state: &Arc<RwLock<SharedAppState>>,
) {
    ui.heading(RichText::new("Capture").size(24.0).strong());
    ui.add_space(8.0);
    ui.label(
        RichText::new("Desktop region sampled by the automation loop")
            .size(14.0)
            .color(ThemeColors::TEXT_SECONDARY),
    );
    ui.add_space(24.0);

    // Seed the editable fields from config once.
    if !view_state.region.loaded {
        let region = shared_state.read().config.parameters.capture_region;
        if let Some(b) = region {
            view_state.region.left = b.left;
            view_state.region.top = b.top;
            view_state.region.right = b.right;
            view_state.region.bottom = b.bottom;
        }
        view_state.region.loaded = true;
    }

    section_card(ui, "Capture region", |ui| {
        let r = &mut view_state.region;
        let mut changed = false;
        changed |= int_field(ui, "Left:", &mut r.left);
        changed |= int_field(ui, "Top:", &mut r.top);
        changed |= int_field(ui, "Right:", &mut r.right);
        changed |= int_field(ui, "Bottom:", &mut r.bottom);

        let bbox = BBox::new(r.left, r.top, r.right, r.bottom);
        if bbox.is_valid() {
            ui.label(
                RichText::new(format!("{}x{} pixels", bbox.width(), bbox.height()))
                    .color(ThemeColors::TEXT_SECONDARY),
            );
            if changed {
                shared_state.write().config.parameters.capture_region = Some(bbox);
            }
        } else {
            ui.label(
                RichText::new("Region must have positive width and height")
                    .color(ThemeColors::ACCENT_ERROR),
            );
            if changed {
                shared_state.write().config.parameters.capture_region = None;
            }
        }
    });

    ui.add_space(12.0);

    let runtime = shared_state.read().runtime.clone();
    section_card(ui, "Runner", |ui| {
        let buttons = [
            ButtonSpec {
                label: "Start",
                enabled: !runtime.is_running,
            },
            ButtonSpec {
                label: "Stop",
                enabled: runtime.is_running,
            },
            ButtonSpec {
                label: "Test click",
                enabled: true,
            },
            ButtonSpec {
                label: "Snapshot",
                enabled: runtime.is_running,
            },
        ];
        match button_row(ui, &buttons) {
            Some(0) => {
                shared_state.write().runtime.runner_command = Some(RunnerCommand::Start);
            }
            Some(1) => {
                shared_state.write().runtime.runner_command = Some(RunnerCommand::Stop);
            }
            Some(2) => shared_state.write().runtime.request_click = true,
            Some(3) => shared_state.write().runtime.request_snapshot = true,
            _ => {}
        }

        ui.add_space(8.0);
        let mut state = shared_state.write();
        ui.checkbox(&mut state.config.parameters.auto_click, "Auto-click each tick");
    });

    ui.add_space(12.0);
    stat_row(ui, "FPS:", &format!("{:.1}", runtime.capture_fps));
    stat_row(ui, "Frames:", &runtime.frames_captured.to_string());
    stat_row(ui, "Misses:", &runtime.capture_misses.to_string());
}
