//! Export options modal.
//!
//! Renders the [`ExportDialog`] state as a window offset from the main
//! window's origin. Enter confirms, Escape cancels, and the confirm
//! button takes the default focus. The pinned `parameters` toggle renders
//! disabled and checked.

use egui::{Context, Key, RichText};

use crate::dashboard::components::widgets::{checkbox_column, ToggleSpec};
use crate::dashboard::theme::ThemeColors;
use crate::export::ExportDialog;

/// Offset of the dialog from the window origin.
const DIALOG_OFFSET: f32 = 50.0;

pub fn render_export_dialog(ctx: &Context, dialog: &mut ExportDialog) {
    if !dialog.is_open() {
        return;
    }

    // Resolve keyboard shortcuts before widgets so focus does not matter.
    if ctx.input(|i| i.key_pressed(Key::Escape)) {
        dialog.cancel();
        return;
    }
    if ctx.input(|i| i.key_pressed(Key::Enter)) {
        dialog.confirm();
        return;
    }

    let pos = ctx.screen_rect().min + egui::vec2(DIALOG_OFFSET, DIALOG_OFFSET);
    egui::Window::new("Export Options")
        .collapsible(false)
        .resizable(false)
        .fixed_pos(pos)
        .show(ctx, |ui| {
            ui.label(
                RichText::new("Choose which categories to include in the export:")
                    .color(ThemeColors::TEXT_SECONDARY),
            );
            ui.add_space(8.0);

            let mut parameters = true;
            ui.add_enabled(
                false,
                egui::Checkbox::new(&mut parameters, "Parameters (always included)"),
            );

            let specs = [
                ToggleSpec {
                    label: "Keybinds",
                    enabled: true,
                },
                ToggleSpec {
                    label: "Discord",
                    enabled: true,
                },
                ToggleSpec {
                    label: "Configuration",
                    enabled: true,
                },
            ];
            let mut values = [dialog.keybinds, dialog.discord, dialog.configuration];
            checkbox_column(ui, &specs, &mut values);
            [dialog.keybinds, dialog.discord, dialog.configuration] = values;

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                let confirm = ui.button("Export");
                if ui.memory(|m| m.focused().is_none()) {
                    confirm.request_focus();
                }
                if confirm.clicked() {
                    dialog.confirm();
                }
                if ui.button("Cancel").clicked() {
                    dialog.cancel();
                }
            });
        });
}
