//! Sidebar navigation component

use egui::{Color32, RichText, Rounding, Sense, Vec2};

use crate::dashboard::state::DashboardView;
use crate::dashboard::theme::ThemeColors;

/// Render the sidebar navigation
pub fn render_sidebar(ui: &mut egui::Ui, current_view: &mut DashboardView) {
    ui.vertical(|ui| {
        ui.add_space(16.0);

        ui.horizontal(|ui| {
            ui.add_space(12.0);
            ui.label(
                RichText::new("DIG")
                    .size(24.0)
                    .color(ThemeColors::ACCENT_PRIMARY)
                    .strong(),
            );
        });
        ui.horizontal(|ui| {
            ui.add_space(12.0);
            ui.label(
                RichText::new("Dig Tool")
                    .size(11.0)
                    .color(ThemeColors::TEXT_MUTED),
            );
        });

        ui.add_space(20.0);
        ui.separator();
        ui.add_space(12.0);

        for view in [
            DashboardView::Home,
            DashboardView::Capture,
            DashboardView::Settings,
        ] {
            let is_selected = *current_view == view;
            if nav_button(ui, view.icon(), view.name(), is_selected) {
                *current_view = view;
            }
            ui.add_space(4.0);
        }

        ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.add_space(12.0);
                ui.label(
                    RichText::new(concat!("v", env!("CARGO_PKG_VERSION")))
                        .size(10.0)
                        .color(ThemeColors::TEXT_MUTED),
                );
            });
            ui.add_space(8.0);
            ui.separator();
        });
    });
}

/// Render a navigation button
fn nav_button(ui: &mut egui::Ui, icon: &str, label: &str, is_selected: bool) -> bool {
    let desired_size = Vec2::new(ui.available_width() - 16.0, 34.0);
    let (rect, response) = ui.allocate_exact_size(desired_size, Sense::click());

    if ui.is_rect_visible(rect) {
        let bg_color = if is_selected {
            ThemeColors::ACCENT_PRIMARY.gamma_multiply(0.2)
        } else if response.hovered() {
            ThemeColors::BG_HOVER
        } else {
            Color32::TRANSPARENT
        };
        let text_color = if is_selected {
            ThemeColors::ACCENT_PRIMARY
        } else {
            ThemeColors::TEXT_SECONDARY
        };

        ui.painter().rect_filled(
            rect.shrink2(Vec2::new(8.0, 0.0)),
            Rounding::same(6.0),
            bg_color,
        );
        ui.painter().text(
            rect.left_center() + Vec2::new(24.0, 0.0),
            egui::Align2::LEFT_CENTER,
            icon,
            egui::FontId::proportional(14.0),
            text_color,
        );
        ui.painter().text(
            rect.left_center() + Vec2::new(48.0, 0.0),
            egui::Align2::LEFT_CENTER,
            label,
            egui::FontId::proportional(14.0),
            text_color,
        );
    }

    response.clicked()
}
