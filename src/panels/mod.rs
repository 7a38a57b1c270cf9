//! View models for the pages drawn in the main content area.

/// `agents` module: rows, badges, dates and search of the agents table.
pub mod agents;
/// `dashboard` module: the static overview content.
pub mod dashboard;
