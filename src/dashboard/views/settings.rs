//! Settings view - configuration editing and bundle export/apply

use egui::RichText;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::dashboard::components::widgets::{button_row, section_card, ButtonSpec};
use crate::dashboard::state::{SettingsSection, SettingsViewState};
use crate::dashboard::theme::ThemeColors;
use crate::shared::SharedAppState;

const SECTIONS: [SettingsSection; 4] = [
    SettingsSection::Parameters,
    SettingsSection::Keybinds,
    SettingsSection::Discord,
    SettingsSection::Configuration,
];

/// Render the settings view
pub fn render_settings_view(
    ui: &mut egui::Ui,
    view_state: &mut SettingsViewState,
    shared_state: &Arc<RwLock<SharedAppState>>,
) {
    ui.heading(RichText::new("Settings").size(24.0).strong());
    ui.add_space(8.0);
    ui.label(
        RichText::new("Configure automation behavior, notifications and exports")
            .size(14.0)
            .color(ThemeColors::TEXT_SECONDARY),
    );
    ui.add_space(24.0);

    egui::ScrollArea::vertical().show(ui, |ui| {
        for section in SECTIONS {
            render_section(ui, view_state, shared_state, section);
            ui.add_space(12.0);
        }

        section_card(ui, "Bundles", |ui| {
            ui.horizontal(|ui| {
                ui.label("Export to:");
                ui.text_edit_singleline(&mut view_state.export_path);
            });
            ui.horizontal(|ui| {
                ui.label("Apply from:");
                ui.text_edit_singleline(&mut view_state.apply_path);
            });
            ui.add_space(8.0);

            let buttons = [
                ButtonSpec {
                    label: "Export...",
                    enabled: !view_state.export_path.is_empty(),
                },
                ButtonSpec {
                    label: "Apply bundle...",
                    enabled: !view_state.apply_path.is_empty(),
                },
                ButtonSpec {
                    label: "Save config",
                    enabled: true,
                },
            ];
            match button_row(ui, &buttons) {
                Some(0) => view_state.export_requested = true,
                Some(1) => view_state.apply_requested = true,
                Some(2) => view_state.save_requested = true,
                _ => {}
            }
        });
    });
}

fn render_section(
    ui: &mut egui::Ui,
    view_state: &mut SettingsViewState,
    shared_state: &Arc<RwLock<SharedAppState>>,
    section: SettingsSection,
) {
    let is_expanded = view_state.expanded_section == Some(section);

    egui::Frame::none()
        .fill(ThemeColors::BG_MEDIUM)
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(16.0)
        .show(ui, |ui| {
            let header = ui
                .horizontal(|ui| {
                    let arrow = if is_expanded { "v" } else { ">" };
                    ui.label(
                        RichText::new(arrow)
                            .size(12.0)
                            .color(ThemeColors::TEXT_MUTED),
                    );
                    ui.add_space(8.0);
                    ui.heading(RichText::new(section.title()).size(16.0));
                })
                .response;

            if header.interact(egui::Sense::click()).clicked() {
                view_state.expanded_section = if is_expanded { None } else { Some(section) };
            }

            if !is_expanded {
                return;
            }

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(8.0);

            let mut state = shared_state.write();
            match section {
                SettingsSection::Parameters => {
                    ui.horizontal(|ui| {
                        ui.label("Tick interval (ms):");
                        ui.add(egui::DragValue::new(
                            &mut state.config.parameters.tick_interval_ms,
                        ));
                    });
                    ui.horizontal(|ui| {
                        ui.label("Click delay (ms):");
                        ui.add(egui::DragValue::new(
                            &mut state.config.parameters.click_delay_ms,
                        ));
                    });
                    ui.checkbox(&mut state.config.parameters.auto_click, "Auto-click");
                    ui.label(
                        RichText::new("The capture region is edited on the Capture page")
                            .size(12.0)
                            .color(ThemeColors::TEXT_MUTED),
                    );
                }
                SettingsSection::Keybinds => {
                    let mut remove: Option<String> = None;
                    for (action, key) in state.config.keybinds.iter() {
                        ui.horizontal(|ui| {
                            ui.label(action);
                            ui.label(RichText::new(key).color(ThemeColors::ACCENT_PRIMARY));
                            if ui.small_button("x").clicked() {
                                remove = Some(action.clone());
                            }
                        });
                    }
                    if let Some(action) = remove {
                        state.config.keybinds.remove(&action);
                    }

                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        ui.text_edit_singleline(&mut view_state.new_keybind.0);
                        ui.text_edit_singleline(&mut view_state.new_keybind.1);
                        let ready = !view_state.new_keybind.0.is_empty()
                            && !view_state.new_keybind.1.is_empty();
                        if ui.add_enabled(ready, egui::Button::new("Add")).clicked() {
                            let (action, key) = std::mem::take(&mut view_state.new_keybind);
                            state.config.keybinds.insert(action, key);
                        }
                    });
                }
                SettingsSection::Discord => {
                    ui.checkbox(&mut state.config.discord.enabled, "Enable notifications");
                    ui.horizontal(|ui| {
                        ui.label("Webhook URL:");
                        ui.text_edit_singleline(&mut state.config.discord.webhook_url);
                    });
                    ui.horizontal(|ui| {
                        ui.label("User ID:");
                        ui.text_edit_singleline(&mut state.config.discord.user_id);
                    });
                    ui.checkbox(
                        &mut state.config.discord.notify_on_complete,
                        "Notify when an operation completes",
                    );
                }
                SettingsSection::Configuration => {
                    ui.checkbox(
                        &mut state.config.configuration.start_minimized,
                        "Start minimized",
                    );
                    let mut dir = state
                        .config
                        .configuration
                        .snapshot_dir
                        .clone()
                        .unwrap_or_default();
                    ui.horizontal(|ui| {
                        ui.label("Snapshot dir:");
                        if ui.text_edit_singleline(&mut dir).changed() {
                            state.config.configuration.snapshot_dir =
                                if dir.is_empty() { None } else { Some(dir) };
                        }
                    });
                }
            }
        });
}
