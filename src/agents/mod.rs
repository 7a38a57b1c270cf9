//! Agent records and the state behind the agents page.
//!
//! `model` defines the `Agent` row, `store` holds immutable page snapshots and
//! the reducer over them, `remote` wraps the two table queries the page needs,
//! and `controller` ties them together with optimistic deletes.

pub mod controller;
pub mod model;
pub mod remote;
pub mod store;

pub use controller::{AgentListController, DeleteCommand, DeleteOutcome, FetchOutcome, FetchTicket};
pub use model::{Agent, AgentStatus, sample_agents};
pub use store::{AgentAction, AgentListState};
