//! Operation feedback modal.
//!
//! Draws the progress bar and the tagged log of a [`FeedbackSurface`]
//! centered over the dashboard. The log pane sits on a light background
//! because the tag palette is fixed. The close button stays disabled
//! until the operation reaches its terminal phase.

use egui::{Align2, Context, RichText, ScrollArea};
use parking_lot::Mutex;
use std::sync::Arc;

use crate::dashboard::theme::ThemeColors;
use crate::feedback::FeedbackSurface;

pub fn render_feedback_window(ctx: &Context, surface: &Arc<Mutex<FeedbackSurface>>) {
    let mut surface = surface.lock();
    if !surface.is_open() {
        return;
    }

    let title = surface.title().to_string();
    let stick = surface.take_scroll_request();

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .min_width(460.0)
        .show(ctx, |ui| {
            ui.add(egui::ProgressBar::new(surface.progress() / 100.0).show_percentage());
            ui.add_space(8.0);

            egui::Frame::none()
                .fill(ThemeColors::LOG_BG)
                .rounding(egui::Rounding::same(6.0))
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ScrollArea::vertical()
                        .max_height(260.0)
                        .stick_to_bottom(stick)
                        .show(ui, |ui| {
                            ui.set_min_width(430.0);
                            for entry in surface.entries() {
                                let mut text = RichText::new(&entry.text)
                                    .monospace()
                                    .color(entry.tag.color())
                                    .size(entry.tag.font_size());
                                if entry.tag.is_bold() {
                                    text = text.strong();
                                }
                                ui.label(text);
                            }
                        });
                });

            if let Some(success) = surface.completion() {
                ui.add_space(8.0);
                let (message, color) = if success {
                    ("Operation completed", ThemeColors::ACCENT_SUCCESS)
                } else {
                    ("Operation completed with errors", ThemeColors::ACCENT_ERROR)
                };
                ui.label(RichText::new(message).color(color).strong());
            }

            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui
                    .add_enabled(surface.can_close(), egui::Button::new("Close"))
                    .clicked()
                {
                    surface.close_window();
                }
            });
        });
}
