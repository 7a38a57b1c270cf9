//! The `app` module is the core of the dashboard shell.
//!
//! It owns the application state, routes keyboard input to actions, and
//! bridges the UI task with background data-service calls.

/// `actions` module: `AppAction` and its single executor.
mod actions;
/// `init` module: builds `App` from settings and a data service.
mod init;
/// `keyboard` module: maps key presses to actions.
mod keyboard;
/// `remote` module: spawns data-service calls and applies their results.
mod remote;
/// `state` module: the `App` struct and overlay types.
mod state;
/// `tick` module: periodic housekeeping.
mod tick;

pub use actions::AppAction;
pub use state::{App, OverlayState, RemoteEvent, RowActionMenu};
