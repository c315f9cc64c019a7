//! Terminal dashboard: Elm-style model, pure update fold, ratatui rendering
//! and the event loop that ties them to background collectors.
//!
//! `model`, `update`, `input`, `scheduler` and `log_viewer` are terminal
//! agnostic; the rest needs the `tui` feature.

#![allow(missing_docs)]

pub mod input;
pub mod log_viewer;
pub mod model;
pub mod scheduler;
pub mod update;

#[cfg(feature = "tui")]
pub mod render;
#[cfg(feature = "tui")]
pub mod runtime;
#[cfg(feature = "tui")]
pub mod terminal_guard;
#[cfg(feature = "tui")]
pub mod theme;

#[cfg(test)]
mod test_properties;

#[cfg(feature = "tui")]
pub use runtime::{DashboardRuntimeConfig, run_dashboard};
