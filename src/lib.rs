//! VoiceCraft agent console: a terminal dashboard for managing voice agents
//! stored behind a remote data service.

pub mod agents;
pub mod app;
pub mod config;
pub mod data;
pub mod event;
pub mod logging;
pub mod notify;
pub mod panels;
pub mod routes;
pub mod tui;
pub mod ui;
