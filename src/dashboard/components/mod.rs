//! Reusable UI components for the dashboard

pub mod export_dialog;
pub mod feedback_modal;
pub mod sidebar;
pub mod status_card;
pub mod widgets;

pub use export_dialog::render_export_dialog;
pub use feedback_modal::render_feedback_window;
pub use sidebar::render_sidebar;
pub use status_card::{CardStatus, StatusCard};
