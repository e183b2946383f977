//! State shared between the dashboard and the automation runner

pub mod state;

pub use state::{RunnerCommand, RuntimeState, SharedAppState};
