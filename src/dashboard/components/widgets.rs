//! Widget factory helpers.
//!
//! Stateless builders that keep the views' and modals' layout code
//! compact: framed section cards, batch-constructed button rows and
//! checkbox columns, stat lines.

use egui::{RichText, Rounding, Ui};

use crate::dashboard::theme::ThemeColors;

/// One button in a batch-constructed row.
pub struct ButtonSpec<'a> {
    pub label: &'a str,
    pub enabled: bool,
}

/// One checkbox in a batch-constructed column. Disabled entries render
/// but cannot be toggled.
pub struct ToggleSpec<'a> {
    pub label: &'a str,
    pub enabled: bool,
}

/// Framed section card with a heading.
pub fn section_card<R>(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui) -> R) -> R {
    egui::Frame::none()
        .fill(ThemeColors::BG_MEDIUM)
        .rounding(Rounding::same(8.0))
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.heading(RichText::new(title).size(16.0));
            ui.add_space(8.0);
            add_contents(ui)
        })
        .inner
}

/// Build a horizontal button row; returns the index of the clicked button.
pub fn button_row(ui: &mut Ui, buttons: &[ButtonSpec<'_>]) -> Option<usize> {
    let mut clicked = None;
    ui.horizontal(|ui| {
        for (i, spec) in buttons.iter().enumerate() {
            if ui
                .add_enabled(spec.enabled, egui::Button::new(spec.label))
                .clicked()
            {
                clicked = Some(i);
            }
        }
    });
    clicked
}

/// Build a column of checkboxes over `values`. `specs` and `values` are
/// parallel slices; extra entries on either side are ignored.
pub fn checkbox_column(ui: &mut Ui, specs: &[ToggleSpec<'_>], values: &mut [bool]) {
    for (spec, value) in specs.iter().zip(values.iter_mut()) {
        ui.add_enabled(spec.enabled, egui::Checkbox::new(value, spec.label));
    }
}

/// Key-value stat line.
pub fn stat_row(ui: &mut Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(label).color(ThemeColors::TEXT_SECONDARY));
        ui.label(
            RichText::new(value)
                .color(ThemeColors::TEXT_PRIMARY)
                .strong(),
        );
    });
}

/// Labeled integer field; returns true when edited.
pub fn int_field(ui: &mut Ui, label: &str, value: &mut i32) -> bool {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(egui::DragValue::new(value).speed(1)).changed()
    })
    .inner
}
