//! Dashboard view state management

use crate::export::ExportDialog;

/// Current view in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardView {
    #[default]
    Home,
    Capture,
    Settings,
}

impl DashboardView {
    /// Get the display name for this view
    pub fn name(&self) -> &'static str {
        match self {
            DashboardView::Home => "Home",
            DashboardView::Capture => "Capture",
            DashboardView::Settings => "Settings",
        }
    }

    /// Get the icon character for this view
    pub fn icon(&self) -> &'static str {
        match self {
            DashboardView::Home => "H",
            DashboardView::Capture => "C",
            DashboardView::Settings => "S",
        }
    }
}

/// Overall dashboard state
#[derive(Debug, Default)]
pub struct DashboardState {
    /// Current active view
    pub current_view: DashboardView,
    /// Capture view state
    pub capture: CaptureViewState,
    /// Settings view state
    pub settings: SettingsViewState,
    /// Export options modal
    pub export_dialog: ExportDialog,
}

/// Capture view state
#[derive(Debug, Default)]
pub struct CaptureViewState {
    /// Region fields being edited, committed to config on change
    pub region: RegionFields,
}

/// Editable bbox fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionFields {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub loaded: bool,
}

/// Settings view state
#[derive(Debug)]
pub struct SettingsViewState {
    /// Currently expanded section
    pub expanded_section: Option<SettingsSection>,
    /// Destination for the export artifact
    pub export_path: String,
    /// Source for a bundle to apply
    pub apply_path: String,
    /// View requested the export dialog this frame
    pub export_requested: bool,
    /// View requested a bundle apply this frame
    pub apply_requested: bool,
    /// View requested a config save this frame
    pub save_requested: bool,
    /// Keybind entry being added (action, key)
    pub new_keybind: (String, String),
}

impl Default for SettingsViewState {
    fn default() -> Self {
        Self {
            expanded_section: None,
            export_path: "settings_export.json".to_string(),
            apply_path: "settings_export.json".to_string(),
            export_requested: false,
            apply_requested: false,
            save_requested: false,
            new_keybind: (String::new(), String::new()),
        }
    }
}

/// Settings sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSection {
    Parameters,
    Keybinds,
    Discord,
    Configuration,
}

impl SettingsSection {
    pub fn title(&self) -> &'static str {
        match self {
            SettingsSection::Parameters => "Parameters",
            SettingsSection::Keybinds => "Keybinds",
            SettingsSection::Discord => "Discord",
            SettingsSection::Configuration => "Configuration",
        }
    }
}
