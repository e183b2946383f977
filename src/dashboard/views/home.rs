//! Home view - runtime status at a glance

use egui::RichText;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::dashboard::components::widgets::stat_row;
use crate::dashboard::components::{CardStatus, StatusCard};
use crate::dashboard::theme::ThemeColors;
use crate::shared::SharedAppState;

/// Render the home view
pub fn render_home_view(ui: &mut egui::Ui, shared_state: &Arc<RwLock<SharedAppState>>) {
    ui.heading(RichText::new("Home").size(24.0).strong());
    ui.add_space(8.0);
    ui.label(
        RichText::new("Automation status and capture statistics")
            .size(14.0)
            .color(ThemeColors::TEXT_SECONDARY),
    );
    ui.add_space(24.0);

    let (runtime, region) = {
        let state = shared_state.read();
        (
            state.runtime.clone(),
            state.config.parameters.capture_region,
        )
    };

    ui.horizontal_wrapped(|ui| {
        let runner_status = if runtime.is_running {
            CardStatus::Active
        } else {
            CardStatus::Inactive
        };
        StatusCard::new(
            "Runner",
            if runtime.is_running { "Running" } else { "Stopped" },
            runner_status,
        )
        .show(ui);
        StatusCard::new(
            "Capture FPS",
            format!("{:.1}", runtime.capture_fps),
            runner_status,
        )
        .show(ui);
        StatusCard::new("Frames", runtime.frames_captured.to_string(), runner_status).show(ui);
        StatusCard::new("Clicks", runtime.clicks_sent.to_string(), runner_status).show(ui);
    });

    ui.add_space(16.0);
    stat_row(
        ui,
        "Capture region:",
        &region.map_or("not set".to_string(), |b| {
            format!(
                "({}, {}) .. ({}, {})  [{}x{}]",
                b.left,
                b.top,
                b.right,
                b.bottom,
                b.width(),
                b.height()
            )
        }),
    );
    stat_row(
        ui,
        "Last frame:",
        &runtime
            .last_frame_size
            .map_or("none".to_string(), |(w, h)| format!("{w}x{h}")),
    );
    stat_row(ui, "Missed captures:", &runtime.capture_misses.to_string());

    if let Some(error) = &runtime.last_error {
        ui.add_space(16.0);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(error)
                    .color(ThemeColors::ACCENT_ERROR)
                    .strong(),
            );
            if ui.small_button("Dismiss").clicked() {
                shared_state.write().runtime.clear_error();
            }
        });
    }
}
