use std::sync::Arc;

use log::{debug, warn};

use super::{App, RemoteEvent};
use crate::agents::DeleteOutcome;
use crate::agents::remote::{delete_agent, list_agents};

// Background data-service calls. Each spawns a task and reports back through
// `remote_tx`; `handle_remote_event` applies the result on the UI task.
impl App {
    /// Marks the agents page as loading and fetches in the background.
    pub(crate) fn start_fetch(&mut self) {
        let ticket = self.agents.begin_fetch();
        let service = Arc::clone(&self.service);
        let tx = self.remote_tx.clone();
        tokio::spawn(async move {
            let result = list_agents(service.as_ref()).await;
            if tx.send(RemoteEvent::Fetched { ticket, result }).is_err() {
                debug!("Fetch finished after shutdown");
            }
        });
        self.status_message = String::from("Loading agents...");
    }

    /// Removes the agent locally right away and deletes it remotely in the background.
    pub(crate) fn start_delete(&mut self, id: &str) {
        let Some(command) = self.agents.begin_delete(id) else {
            warn!("Ignoring delete of unknown or pending agent {}", id);
            return;
        };
        let service = Arc::clone(&self.service);
        let tx = self.remote_tx.clone();
        self.status_message = format!("Deleting agent {}...", command.id());
        tokio::spawn(async move {
            let result = delete_agent(service.as_ref(), command.id()).await;
            if tx.send(RemoteEvent::Deleted { command, result }).is_err() {
                debug!("Delete finished after shutdown");
            }
        });
    }

    pub(crate) fn handle_remote_event(&mut self, event: RemoteEvent) {
        match event {
            RemoteEvent::Fetched { ticket, result } => {
                let outcome = self.agents.finish_fetch(ticket, result);
                debug!("Fetch settled: {:?}", outcome);
                if !self.agents.loading() {
                    self.status_message = format!("{} agents", self.agents.agents().len());
                }
            }
            RemoteEvent::Deleted { command, result } => {
                if self.agents.finish_delete(command, result) == DeleteOutcome::Resync {
                    self.start_fetch();
                }
            }
        }
        for toast in self.agents.take_notifications() {
            self.toasts.push(toast);
        }
    }

    /// Applies every result that has arrived so far.
    pub(crate) fn drain_remote_events(&mut self) {
        while let Ok(event) = self.remote_rx.try_recv() {
            self.handle_remote_event(event);
        }
    }
}
