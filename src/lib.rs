//! Launchdeck - a keyboard-driven terminal dashboard for launching programs
//!
//! This library holds everything behind the `launchdeck` binary: the config
//! file, the three panels, the UI state machine and the handoff that lets a
//! launched program take over the terminal until it exits.

pub mod config;
pub mod launch;
pub mod registry;
pub mod session;
pub mod ui;
