#![forbid(unsafe_code)]

//! oncall: a terminal dashboard for the on-call rotation.
//!
//! One screen shows the live pod table of the current cluster context,
//! recent unresolved error-tracker issues per project, issue totals, and the
//! health of a handful of HTTP services. Everything is polled from external
//! command-line tools (`kubectl`, `sentry-cli`, `curl`) on a fixed cadence.
//!
//! The crate is split so the interesting parts stay testable without a
//! terminal:
//!
//! - [`extract`] recovers fields from loosely-formed JSON and ASCII tables.
//! - [`collectors`] runs the external tools behind a [`collectors::CommandRunner`] seam.
//! - [`tui`] holds the Elm-style model, the pure update fold, and (with the
//!   `tui` feature) the ratatui renderer and event loop.
//!
//! ```rust,no_run
//! use oncall_dashboard::core::config::Config;
//! use oncall_dashboard::extract::{HealthStatus, extract};
//!
//! let body = r#"{"status": "ok", "groups": ["db"]}"#;
//! assert_eq!(extract(body, "status"), Some("ok"));
//! assert_eq!(HealthStatus::from_body(body), HealthStatus::Ok);
//! let _cfg = Config::load(None);
//! ```

pub mod collectors;
pub mod core;
pub mod extract;
pub mod tui;
