//! # UI Module
//!
//! Terminal user interface of the launcher.
//!
//! ## Components
//!
//! - [`App`] - application state and the single action dispatcher
//! - [`focus`] - which panel is focused and the cursor of every panel
//! - [`activation`] - preview or launch the highlighted entry
//! - [`keys`] - key bindings mapped to logical actions
//! - [`form`] - the "Add Application" form
//! - [`mod@render`] - drawing (and the pure text projection used in tests)
//! - [`terminal`] - raw mode / alternate screen ownership
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────┬──────────────────────────────────┐
//! │   Places     │          Dashboard               │
//! ├──────────────┤   (time, host, dir, selection)   │
//! │              ├──────────────────────────────────┤
//! │ Applications │                                  │
//! │              │          Preview                 │
//! ├──────────────┤   (result of the last Enter)     │
//! │  Shortcuts   │                                  │
//! ├──────────────┴──────────────────────────────────┤
//! │              Key hints / status                  │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod activation;
pub mod app;
pub mod focus;
pub mod form;
pub mod keys;
pub mod render;
pub mod terminal;
pub mod theme;

pub use app::App;
pub use render::{project, render};
