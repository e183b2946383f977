//! Dashboard theme and styling

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

/// Dark control-surface palette
pub struct ThemeColors;

impl ThemeColors {
    // Background colors
    pub const BG_DARK: Color32 = Color32::from_rgb(20, 21, 26);
    pub const BG_MEDIUM: Color32 = Color32::from_rgb(30, 31, 38);
    pub const BG_LIGHT: Color32 = Color32::from_rgb(41, 42, 51);
    pub const BG_HOVER: Color32 = Color32::from_rgb(52, 53, 64);

    // Accent colors
    pub const ACCENT_PRIMARY: Color32 = Color32::from_rgb(255, 171, 64);
    pub const ACCENT_SUCCESS: Color32 = Color32::from_rgb(46, 204, 113);
    pub const ACCENT_ERROR: Color32 = Color32::from_rgb(231, 76, 60);

    // Text colors
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(238, 238, 242);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(158, 158, 170);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(98, 98, 110);

    // Border colors
    pub const BORDER: Color32 = Color32::from_rgb(52, 52, 64);

    /// Background of the operation log pane. Kept light so the fixed log
    /// tag palette (dark greens, crimson, black headers) stays readable.
    pub const LOG_BG: Color32 = Color32::from_rgb(250, 250, 248);
}

/// Apply the theme to egui
pub fn apply_theme(ctx: &egui::Context) {
    let mut style: Style = (*ctx.style()).clone();

    let mut visuals = Visuals::dark();
    visuals.window_fill = ThemeColors::BG_MEDIUM;
    visuals.panel_fill = ThemeColors::BG_DARK;
    visuals.faint_bg_color = ThemeColors::BG_LIGHT;
    visuals.extreme_bg_color = ThemeColors::BG_DARK;

    visuals.widgets.noninteractive.bg_fill = ThemeColors::BG_MEDIUM;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, ThemeColors::TEXT_SECONDARY);
    visuals.widgets.inactive.bg_fill = ThemeColors::BG_LIGHT;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, ThemeColors::TEXT_PRIMARY);
    visuals.widgets.hovered.bg_fill = ThemeColors::BG_HOVER;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, ThemeColors::TEXT_PRIMARY);
    visuals.widgets.active.bg_fill = ThemeColors::ACCENT_PRIMARY;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, ThemeColors::BG_DARK);

    visuals.selection.bg_fill = ThemeColors::ACCENT_PRIMARY.gamma_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, ThemeColors::ACCENT_PRIMARY);
    visuals.hyperlink_color = ThemeColors::ACCENT_PRIMARY;

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, ThemeColors::BORDER);

    style.visuals = visuals;

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(16.0);

    style.text_styles = [
        (TextStyle::Small, FontId::new(12.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(15.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(15.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(21.0, FontFamily::Proportional)),
    ]
    .into();

    ctx.set_style(style);
}
