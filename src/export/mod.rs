//! Export Options Selector
//!
//! Collects a boolean mask over the exportable state categories. The
//! `parameters` category is pinned on: the toggle renders disabled and the
//! resulting mask always carries it. A cancelled dialog resolves to `None`,
//! which callers must treat as "do nothing".

use serde::{Deserialize, Serialize};

/// Boolean mask selecting which state categories an export includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportMask {
    parameters: bool,
    pub keybinds: bool,
    pub discord: bool,
    pub configuration: bool,
}

impl Default for ExportMask {
    fn default() -> Self {
        Self {
            parameters: true,
            keybinds: false,
            discord: false,
            configuration: false,
        }
    }
}

impl ExportMask {
    /// Build a mask from the optional toggles. `parameters` is latched true.
    pub fn from_toggles(keybinds: bool, discord: bool, configuration: bool) -> Self {
        Self {
            parameters: true,
            keybinds,
            discord,
            configuration,
        }
    }

    pub fn parameters(&self) -> bool {
        self.parameters
    }
}

/// How the dialog was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Confirmed,
    Cancelled,
}

/// Modal dialog state for picking export categories.
///
/// The dialog renders three live toggles plus the pinned `parameters`
/// one; confirm resolves to `Some(mask)`, cancel (button or Escape) to
/// `None`. The embedding UI polls [`take_result`](Self::take_result) once
/// per frame.
#[derive(Debug, Default)]
pub struct ExportDialog {
    open: bool,
    pub keybinds: bool,
    pub discord: bool,
    pub configuration: bool,
    resolution: Option<Resolution>,
}

impl ExportDialog {
    /// Open the dialog with all optional categories off.
    pub fn open(&mut self) {
        self.open = true;
        self.keybinds = false;
        self.discord = false;
        self.configuration = false;
        self.resolution = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Confirm with the current toggle states.
    pub fn confirm(&mut self) {
        if self.open {
            self.resolution = Some(Resolution::Confirmed);
            self.open = false;
        }
    }

    /// Dismiss without exporting.
    pub fn cancel(&mut self) {
        if self.open {
            self.resolution = Some(Resolution::Cancelled);
            self.open = false;
        }
    }

    /// The dialog's resolution, once. `Some(None)` is the canonical
    /// user-abort signal; `None` means still pending.
    pub fn take_result(&mut self) -> Option<Option<ExportMask>> {
        match self.resolution.take()? {
            Resolution::Confirmed => Some(Some(ExportMask::from_toggles(
                self.keybinds,
                self.discord,
                self.configuration,
            ))),
            Resolution::Cancelled => Some(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_always_latched() {
        assert!(ExportMask::default().parameters());
        assert!(ExportMask::from_toggles(false, false, false).parameters());
        assert!(ExportMask::from_toggles(true, true, true).parameters());
    }

    #[test]
    fn test_default_accept_yields_parameters_only() {
        let mut dialog = ExportDialog::default();
        dialog.open();
        dialog.confirm();

        let mask = dialog.take_result().unwrap().unwrap();
        assert!(mask.parameters());
        assert!(!mask.keybinds);
        assert!(!mask.discord);
        assert!(!mask.configuration);
    }

    #[test]
    fn test_toggled_accept() {
        let mut dialog = ExportDialog::default();
        dialog.open();
        dialog.keybinds = true;
        dialog.discord = true;
        dialog.confirm();

        let mask = dialog.take_result().unwrap().unwrap();
        assert!(mask.parameters());
        assert!(mask.keybinds);
        assert!(mask.discord);
        assert!(!mask.configuration);
    }

    #[test]
    fn test_cancel_yields_none_not_defaults() {
        let mut dialog = ExportDialog::default();
        dialog.open();
        dialog.keybinds = true;
        dialog.cancel();

        assert_eq!(dialog.take_result(), Some(None));
        // Result is consumed exactly once.
        assert_eq!(dialog.take_result(), None);
    }

    #[test]
    fn test_reopen_resets_toggles() {
        let mut dialog = ExportDialog::default();
        dialog.open();
        dialog.keybinds = true;
        dialog.confirm();
        let _ = dialog.take_result();

        dialog.open();
        assert!(!dialog.keybinds);
        assert!(dialog.is_open());
    }

    #[test]
    fn test_mask_wire_format() {
        let mask = ExportMask::from_toggles(true, false, true);
        let json = serde_json::to_value(mask).unwrap();

        assert_eq!(json["parameters"], true);
        assert_eq!(json["keybinds"], true);
        assert_eq!(json["discord"], false);
        assert_eq!(json["configuration"], true);
    }
}
