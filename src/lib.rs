//! Vertical stepper - step-state resolution for multi-step flows
//!
//! The `stepper` module holds the toolkit-independent core: shared step
//! context, per-step state resolution, body lifecycle and scroll requests.
//! `ui` and `app` render it as a terminal UI.

pub mod app;
pub mod config;
pub mod error;
pub mod inspect;
pub mod logging;
pub mod stepper;
pub mod ui;
