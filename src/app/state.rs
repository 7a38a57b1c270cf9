//! Defines the core state structures for the application.
//!
//! `App` holds everything the shell renders: the current route and history,
//! the agents page controller and its table state, toasts, the open overlay,
//! and the channel through which background data-service calls report back.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::agents::{Agent, AgentListController, DeleteCommand, FetchTicket};
use crate::config::RuntimeEnvironment;
use crate::data::{DataService, ServiceError};
use crate::notify::ToastCenter;
use crate::panels::agents::{AgentsPanel, RowAction};
use crate::routes::Route;

/// The main application state.
pub struct App {
    // --- Core State ---
    /// Flag to indicate if the application should quit.
    pub should_quit: bool,
    /// The page currently shown.
    pub route: Route,
    /// Previously visited routes, most recent last.
    pub(crate) history: Vec<Route>,
    /// Controller behind the agents page.
    pub agents: AgentListController,
    /// Search and selection of the agents table.
    pub agents_panel: AgentsPanel,

    // --- UI ---
    /// The message currently displayed in the status bar.
    pub status_message: String,
    /// Toasts on screen.
    pub toasts: ToastCenter,
    /// The currently active overlay, if any.
    pub overlay: Option<OverlayState>,
    /// Selected entry of the dashboard's activity window picker.
    pub activity_window: usize,
    pub environment: RuntimeEnvironment,

    // --- Data service ---
    pub(crate) service: Arc<dyn DataService>,
    pub(crate) remote_tx: UnboundedSender<RemoteEvent>,
    pub(crate) remote_rx: UnboundedReceiver<RemoteEvent>,

    // --- Timing ---
    pub(crate) tick_rate: Duration,
}

/// Results of background data-service calls.
#[derive(Debug)]
pub enum RemoteEvent {
    Fetched {
        ticket: FetchTicket,
        result: Result<Option<Vec<Agent>>, ServiceError>,
    },
    Deleted {
        command: DeleteCommand,
        result: Result<(), ServiceError>,
    },
}

#[derive(Debug, Clone)]
pub enum OverlayState {
    RowActions(RowActionMenu),
}

/// The per-row action menu of the agents table.
#[derive(Debug, Clone)]
pub struct RowActionMenu {
    pub agent_id: String,
    pub agent_name: String,
    pub selected: usize,
}

impl RowActionMenu {
    pub fn new(agent: &Agent) -> Self {
        Self {
            agent_id: agent.id.clone(),
            agent_name: agent.name.clone(),
            selected: 0,
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = RowAction::ALL.len() as isize;
        self.selected = (self.selected as isize + delta).clamp(0, len - 1) as usize;
    }

    pub fn highlighted(&self) -> RowAction {
        RowAction::ALL[self.selected.min(RowAction::ALL.len() - 1)]
    }
}
