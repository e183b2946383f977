//! Operation Feedback Surface
//!
//! A progress + categorized-log state machine driven from worker threads
//! while a long settings operation runs. The surface is deliberately
//! forgiving: every mutator re-checks that the window is shown and not
//! closed and silently no-ops otherwise, because workers cannot tell
//! whether the operator already dismissed the window.

use egui::Color32;

/// Width of the `=` rule lines framing a section header.
const SECTION_RULE_WIDTH: usize = 60;

/// Lifecycle of the feedback window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfacePhase {
    /// Created but not yet shown
    #[default]
    Uninitialized,
    /// Window up, operation running
    Active,
    /// Operation finished, close button enabled
    Terminal,
    /// Dismissed; all further mutation is a no-op
    Closed,
}

impl std::fmt::Display for SurfacePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfacePhase::Uninitialized => write!(f, "Uninitialized"),
            SurfacePhase::Active => write!(f, "Active"),
            SurfacePhase::Terminal => write!(f, "Terminal"),
            SurfacePhase::Closed => write!(f, "Closed"),
        }
    }
}

/// Style category of a log line. Colors and weights are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTag {
    Success,
    Warning,
    Error,
    Info,
    Header,
    Unchanged,
}

impl LogTag {
    pub fn color(&self) -> Color32 {
        match self {
            LogTag::Success => Color32::from_rgb(0, 100, 0),
            LogTag::Warning => Color32::from_rgb(255, 140, 0),
            LogTag::Error => Color32::from_rgb(220, 20, 60),
            LogTag::Info => Color32::from_rgb(65, 105, 225),
            LogTag::Header => Color32::from_rgb(0, 0, 0),
            LogTag::Unchanged => Color32::from_rgb(102, 102, 102),
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, LogTag::Success | LogTag::Error | LogTag::Header)
    }

    pub fn font_size(&self) -> f32 {
        match self {
            LogTag::Header => 14.0,
            _ => 12.5,
        }
    }
}

/// Outcome of applying a single setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChangeStatus {
    #[default]
    Applied,
    Failed,
}

/// One rendered log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub text: String,
    pub tag: LogTag,
}

/// Progress + log modal state, mutated by workers and read by the UI.
#[derive(Debug, Default)]
pub struct FeedbackSurface {
    title: String,
    phase: SurfacePhase,
    progress: f32,
    entries: Vec<LogEntry>,
    completion: Option<bool>,
    scroll_to_bottom: bool,
}

impl FeedbackSurface {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Bring the window up. Only valid from the uninitialized phase.
    pub fn show_window(&mut self) {
        if self.phase == SurfacePhase::Uninitialized {
            self.phase = SurfacePhase::Active;
        }
    }

    /// Whether the window exists and has not been closed.
    fn widgets_alive(&self) -> bool {
        matches!(self.phase, SurfacePhase::Active | SurfacePhase::Terminal)
    }

    /// Set the progress bar to `value`, clamped to [0, 100]. Monotonicity
    /// is not enforced. An optional message is appended as an info line.
    pub fn update_progress(&mut self, value: f32, text: Option<&str>) {
        if !self.widgets_alive() {
            return;
        }
        self.progress = value.clamp(0.0, 100.0);
        if let Some(text) = text {
            self.push(text.to_string(), LogTag::Info);
        }
    }

    /// Append one tagged line.
    pub fn add_text(&mut self, text: &str, tag: LogTag) {
        if !self.widgets_alive() {
            return;
        }
        self.push(text.to_string(), tag);
    }

    /// Append a framed, upper-cased section header.
    pub fn add_section(&mut self, title: &str) {
        if !self.widgets_alive() {
            return;
        }
        let rule = "=".repeat(SECTION_RULE_WIDTH);
        self.push(rule.clone(), LogTag::Header);
        self.push(title.to_uppercase(), LogTag::Header);
        self.push(rule, LogTag::Header);
    }

    /// Append the end-of-operation totals.
    pub fn add_summary_stats(&mut self, succeeded: usize, failed: usize, total: usize) {
        if !self.widgets_alive() {
            return;
        }
        self.push(format!("Processed: {total}"), LogTag::Info);
        self.push(format!("Applied: {succeeded}"), LogTag::Success);
        if failed == 0 {
            self.push("No failures detected".to_string(), LogTag::Success);
        } else {
            self.push(format!("Failed items: {failed}"), LogTag::Error);
        }
    }

    /// Append one setting-change line. Equal values report as unchanged;
    /// differing values report applied or failed per `status`.
    pub fn add_change_entry(&mut self, name: &str, old: &str, new: &str, status: ChangeStatus) {
        if !self.widgets_alive() {
            return;
        }
        if old == new {
            self.push(format!("\u{2500} {name}: {old} (unchanged)"), LogTag::Unchanged);
        } else {
            match status {
                ChangeStatus::Applied => {
                    self.push(format!("\u{2713} {name}: {old} \u{2192} {new}"), LogTag::Success)
                }
                ChangeStatus::Failed => {
                    self.push(format!("\u{2717} {name}: {old} \u{2192} {new}"), LogTag::Error)
                }
            }
        }
    }

    /// Log an error and move straight to the terminal phase.
    pub fn show_error(&mut self, title: &str, message: &str) {
        if !self.widgets_alive() {
            return;
        }
        self.push(format!("{title}: {message}"), LogTag::Error);
        self.operation_complete(false);
    }

    /// Pin progress to 100 and enable the close button. The outcome flag
    /// drives the completion banner.
    pub fn operation_complete(&mut self, success: bool) {
        if self.phase != SurfacePhase::Active {
            return;
        }
        self.phase = SurfacePhase::Terminal;
        self.progress = 100.0;
        self.completion = Some(success);
    }

    /// Dismiss the window. Sticky: the closed flag is set before anything
    /// is torn down, so in-flight worker callbacks become no-ops.
    pub fn close_window(&mut self) {
        if self.phase == SurfacePhase::Closed {
            return;
        }
        self.phase = SurfacePhase::Closed;
        self.entries.clear();
        self.progress = 0.0;
        self.completion = None;
    }

    pub fn phase(&self) -> SurfacePhase {
        self.phase
    }

    /// Close button is enabled only once the operation finished.
    pub fn can_close(&self) -> bool {
        self.phase == SurfacePhase::Terminal
    }

    pub fn is_open(&self) -> bool {
        self.widgets_alive()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Completion outcome, once terminal: `Some(true)` on success.
    pub fn completion(&self) -> Option<bool> {
        self.completion
    }

    /// One-shot scroll request consumed by the renderer.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_bottom)
    }

    fn push(&mut self, text: String, tag: LogTag) {
        self.entries.push(LogEntry { text, tag });
        self.scroll_to_bottom = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_surface() -> FeedbackSurface {
        let mut surface = FeedbackSurface::new("Applying settings");
        surface.show_window();
        surface
    }

    #[test]
    fn test_phase_transitions() {
        let mut surface = FeedbackSurface::new("op");
        assert_eq!(surface.phase(), SurfacePhase::Uninitialized);

        surface.show_window();
        assert_eq!(surface.phase(), SurfacePhase::Active);
        assert!(!surface.can_close());

        surface.operation_complete(true);
        assert_eq!(surface.phase(), SurfacePhase::Terminal);
        assert!(surface.can_close());
        assert_eq!(surface.completion(), Some(true));

        surface.close_window();
        assert_eq!(surface.phase(), SurfacePhase::Closed);
    }

    #[test]
    fn test_mutators_noop_before_show() {
        let mut surface = FeedbackSurface::new("op");
        surface.update_progress(50.0, Some("early"));
        surface.add_text("early", LogTag::Info);
        assert!(surface.entries().is_empty());
        assert_eq!(surface.progress(), 0.0);
    }

    #[test]
    fn test_mutators_noop_after_close() {
        let mut surface = active_surface();
        surface.close_window();

        surface.update_progress(50.0, Some("late"));
        surface.add_text("late", LogTag::Info);
        surface.add_section("late");
        surface.add_summary_stats(1, 0, 1);
        surface.add_change_entry("x", "1", "2", ChangeStatus::Applied);
        surface.operation_complete(true);
        surface.show_error("late", "boom");
        surface.show_window();

        assert_eq!(surface.phase(), SurfacePhase::Closed);
        assert!(surface.entries().is_empty());
        assert_eq!(surface.progress(), 0.0);
        assert_eq!(surface.completion(), None);
    }

    #[test]
    fn test_progress_clamping() {
        let mut surface = active_surface();

        surface.update_progress(-5.0, None);
        assert_eq!(surface.progress(), 0.0);

        surface.update_progress(250.0, None);
        assert_eq!(surface.progress(), 100.0);
    }

    #[test]
    fn test_progress_text_is_tagged_info() {
        let mut surface = active_surface();
        surface.update_progress(10.0, Some("working"));

        assert_eq!(surface.entries().len(), 1);
        assert_eq!(surface.entries()[0].tag, LogTag::Info);
        assert_eq!(surface.entries()[0].text, "working");
    }

    #[test]
    fn test_section_header_framing() {
        let mut surface = active_surface();
        surface.add_section("apply");

        let entries = surface.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].text, "=".repeat(60));
        assert_eq!(entries[1].text, "APPLY");
        assert_eq!(entries[2].text, "=".repeat(60));
        assert!(entries.iter().all(|e| e.tag == LogTag::Header));
    }

    #[test]
    fn test_change_entry_classification() {
        let mut surface = active_surface();

        surface.add_change_entry("X", "1", "1", ChangeStatus::Applied);
        assert_eq!(surface.entries().len(), 1);
        assert_eq!(surface.entries()[0].tag, LogTag::Unchanged);
        assert_eq!(surface.entries()[0].text, "\u{2500} X: 1 (unchanged)");

        surface.add_change_entry("X", "1", "2", ChangeStatus::Applied);
        assert_eq!(surface.entries()[1].tag, LogTag::Success);
        assert!(surface.entries()[1].text.contains('\u{2192}'));

        surface.add_change_entry("Y", "a", "b", ChangeStatus::Failed);
        assert_eq!(surface.entries()[2].tag, LogTag::Error);
        assert!(surface.entries()[2].text.starts_with('\u{2717}'));
    }

    #[test]
    fn test_summary_stats_branching() {
        let mut clean = active_surface();
        clean.add_summary_stats(5, 0, 5);
        let last = clean.entries().last().unwrap();
        assert_eq!(last.tag, LogTag::Success);
        assert_eq!(last.text, "No failures detected");

        let mut dirty = active_surface();
        dirty.add_summary_stats(4, 1, 5);
        let last = dirty.entries().last().unwrap();
        assert_eq!(last.tag, LogTag::Error);
        assert_eq!(last.text, "Failed items: 1");
    }

    #[test]
    fn test_show_error_terminates_with_failure() {
        let mut surface = active_surface();
        surface.show_error("Apply failed", "bundle unreadable");

        assert_eq!(surface.phase(), SurfacePhase::Terminal);
        assert_eq!(surface.completion(), Some(false));
        assert_eq!(surface.progress(), 100.0);
        let last = surface.entries().last().unwrap();
        assert_eq!(last.tag, LogTag::Error);
        assert!(last.text.contains("bundle unreadable"));
    }

    #[test]
    fn test_completion_outcome_is_first_writer_wins() {
        let mut surface = active_surface();
        surface.show_error("boom", "failed");
        surface.operation_complete(true);

        assert_eq!(surface.completion(), Some(false));
    }

    #[test]
    fn test_full_feedback_flow() {
        let mut surface = active_surface();

        surface.update_progress(0.0, Some("start"));
        surface.add_section("apply");
        surface.add_change_entry("volume", "30", "50", ChangeStatus::Applied);
        surface.update_progress(100.0, None);
        surface.operation_complete(true);

        assert!(surface.can_close());
        assert_eq!(surface.progress(), 100.0);

        let headers = surface
            .entries()
            .iter()
            .filter(|e| e.tag == LogTag::Header)
            .count();
        let successes = surface
            .entries()
            .iter()
            .filter(|e| e.tag == LogTag::Success)
            .count();
        assert_eq!(headers, 3); // one framed header block
        assert_eq!(successes, 1);
    }

    #[test]
    fn test_tag_palette() {
        assert_eq!(LogTag::Success.color(), Color32::from_rgb(0x00, 0x64, 0x00));
        assert_eq!(LogTag::Warning.color(), Color32::from_rgb(0xFF, 0x8C, 0x00));
        assert_eq!(LogTag::Error.color(), Color32::from_rgb(0xDC, 0x14, 0x3C));
        assert_eq!(LogTag::Info.color(), Color32::from_rgb(0x41, 0x69, 0xE1));
        assert_eq!(LogTag::Unchanged.color(), Color32::from_rgb(0x66, 0x66, 0x66));
        assert!(LogTag::Header.is_bold());
        assert!(LogTag::Header.font_size() > LogTag::Info.font_size());
    }
}
