//! State controller behind the agents page.
//!
//! The controller owns the current `AgentListState` snapshot and mediates
//! every read and write against the data service. Each operation is split in
//! a synchronous `begin_*` half that updates local state right away and a
//! `finish_*` half that applies the remote outcome, so the UI can run the
//! network call in the background and still see the optimistic change
//! immediately. `fetch_agents` and `handle_delete` chain both halves for
//! callers that simply await.
//!
//! Overlapping requests are sequenced: only the newest fetch is applied, and
//! a fetch issued before a delete settled never brings the deleted row back,
//! whether the delete is still in flight or already confirmed.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use log::{debug, error, info, warn};

use crate::data::{DataService, ServiceError};
use crate::notify::Toast;

use super::remote::{delete_agent, list_agents};
use super::store::{AgentAction, AgentListState, reduce};
use super::{Agent, sample_agents};

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
}

/// A delete that has been applied locally and awaits the remote answer.
#[derive(Debug, Clone)]
pub struct DeleteCommand {
    removed: Agent,
    index: usize,
}

impl DeleteCommand {
    pub fn id(&self) -> &str {
        &self.removed.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The store answered; its rows (if any) are now the collection.
    Applied,
    /// The fetch failed and the sample agents were substituted.
    FellBack,
    /// The fetch failed and the user was notified.
    Failed,
    /// A newer fetch was issued meanwhile; this result was dropped.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Confirmed,
    /// The remote delete failed; the caller should fetch again.
    Resync,
}

pub struct AgentListController {
    state: AgentListState,
    fallback_allowed: bool,
    latest_fetch: u64,
    fetch_outstanding: bool,
    pending_deletes: HashSet<String>,
    /// Confirmed deletes, keyed by id, with the newest fetch issued at
    /// confirmation time. Fetches up to that sequence may still carry the row.
    confirmed_deletes: HashMap<String, u64>,
    notifications: Vec<Toast>,
}

impl AgentListController {
    /// `fallback_allowed` enables the sample-agent substitution on failed fetches.
    pub fn new(fallback_allowed: bool) -> Self {
        Self {
            state: AgentListState::default(),
            fallback_allowed,
            latest_fetch: 0,
            fetch_outstanding: false,
            pending_deletes: HashSet::new(),
            confirmed_deletes: HashMap::new(),
            notifications: Vec::new(),
        }
    }

    pub fn state(&self) -> &AgentListState {
        &self.state
    }

    pub fn agents(&self) -> &[Agent] {
        self.state.agents()
    }

    pub fn loading(&self) -> bool {
        self.state.loading()
    }

    /// Deletes applied locally that the store has not answered yet.
    pub fn pending_delete_count(&self) -> usize {
        self.pending_deletes.len()
    }

    /// Notifications raised since the last call, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.notifications)
    }

    fn dispatch(&mut self, action: AgentAction) {
        self.state = reduce(&self.state, action);
    }

    /// Marks the page as loading and issues a new fetch ticket.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_fetch += 1;
        self.fetch_outstanding = true;
        self.dispatch(AgentAction::FetchStarted);
        debug!("Fetch #{} started", self.latest_fetch);
        FetchTicket {
            seq: self.latest_fetch,
        }
    }

    /// Applies the result of the fetch identified by `ticket`.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Option<Vec<Agent>>, ServiceError>,
    ) -> FetchOutcome {
        if ticket.seq != self.latest_fetch || !self.fetch_outstanding {
            debug!(
                "Dropping result of fetch #{} (latest is #{})",
                ticket.seq, self.latest_fetch
            );
            return FetchOutcome::Stale;
        }

        let outcome = match result {
            Ok(Some(agents)) => {
                let seq = ticket.seq;
                let agents: Vec<Agent> = agents
                    .into_iter()
                    .filter(|agent| !self.deleted_before(&agent.id, seq))
                    .collect();
                self.confirmed_deletes.retain(|_, confirmed_at| *confirmed_at > seq);
                info!("Loaded {} agents", agents.len());
                self.dispatch(AgentAction::Replace(agents));
                FetchOutcome::Applied
            }
            Ok(None) => {
                warn!("Agent fetch returned no data; keeping current list");
                FetchOutcome::Applied
            }
            Err(err) => {
                error!("Error fetching agents: {}", err);
                if self.fallback_allowed {
                    info!("Falling back to sample agents");
                    self.dispatch(AgentAction::Replace(sample_agents(Utc::now())));
                    FetchOutcome::FellBack
                } else {
                    self.notifications.push(Toast::error(
                        "Error",
                        "Failed to fetch agents. Please try again.",
                    ));
                    FetchOutcome::Failed
                }
            }
        };

        self.fetch_outstanding = false;
        self.dispatch(AgentAction::FetchSettled);
        outcome
    }

    /// Whether a fetch with sequence `seq` may still contain the deleted `id`.
    fn deleted_before(&self, id: &str, seq: u64) -> bool {
        self.pending_deletes.contains(id)
            || self
                .confirmed_deletes
                .get(id)
                .is_some_and(|confirmed_at| seq <= *confirmed_at)
    }

    /// Removes `id` locally. `None` if it is not in the collection or
    /// already being deleted.
    pub fn begin_delete(&mut self, id: &str) -> Option<DeleteCommand> {
        if self.pending_deletes.contains(id) {
            debug!("Delete of {} already in flight", id);
            return None;
        }
        let index = self.state.position(id)?;
        let removed = self.state.agents()[index].clone();
        self.pending_deletes.insert(id.to_string());
        self.dispatch(AgentAction::Remove { id: id.to_string() });
        debug!("Optimistically removed agent {}", id);
        Some(DeleteCommand { removed, index })
    }

    /// Applies the remote answer to a delete started with `begin_delete`.
    pub fn finish_delete(
        &mut self,
        command: DeleteCommand,
        result: Result<(), ServiceError>,
    ) -> DeleteOutcome {
        self.pending_deletes.remove(command.id());
        match result {
            Ok(()) => {
                info!("Deleted agent {}", command.id());
                self.confirmed_deletes
                    .insert(command.id().to_string(), self.latest_fetch);
                self.notifications.push(Toast::info(
                    "Agent deleted",
                    "The agent has been successfully deleted.",
                ));
                DeleteOutcome::Confirmed
            }
            Err(err) => {
                error!("Error deleting agent {}: {}", command.id(), err);
                self.dispatch(AgentAction::Restore {
                    agent: command.removed,
                    index: command.index,
                });
                self.notifications
                    .push(Toast::error("Error", "Failed to delete agent."));
                DeleteOutcome::Resync
            }
        }
    }

    /// Loads the collection from `service`.
    pub async fn fetch_agents(&mut self, service: &dyn DataService) -> FetchOutcome {
        let ticket = self.begin_fetch();
        let result = list_agents(service).await;
        self.finish_fetch(ticket, result)
    }

    /// Deletes `id`, resynchronizing with `service` if the store refuses.
    /// `None` when there was nothing to delete.
    pub async fn handle_delete(
        &mut self,
        service: &dyn DataService,
        id: &str,
    ) -> Option<DeleteOutcome> {
        let command = self.begin_delete(id)?;
        let result = delete_agent(service, command.id()).await;
        let outcome = self.finish_delete(command, result);
        if outcome == DeleteOutcome::Resync {
            self.fetch_agents(service).await;
        }
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::remote::TABLE;
    use crate::data::memory::ScriptedFailure;
    use crate::data::{ErrorInfo, MemoryDataService, Operation, UnconfiguredDataService};
    use crate::notify::ToastVariant;
    use serde_json::{Value, json};

    fn row(id: &str, created_at: &str) -> Value {
        json!({
            "id": id,
            "name": format!("Agent {id}"),
            "description": null,
            "status": "active",
            "created_at": created_at,
            "updated_at": created_at,
        })
    }

    fn seeded() -> MemoryDataService {
        MemoryDataService::with_rows(
            TABLE,
            vec![
                row("old", "2024-01-01T00:00:00.000Z"),
                row("new", "2024-03-01T00:00:00.000Z"),
                row("mid", "2024-02-01T00:00:00.000Z"),
            ],
        )
    }

    fn ids(controller: &AgentListController) -> Vec<String> {
        controller.agents().iter().map(|a| a.id.clone()).collect()
    }

    fn agent(id: &str) -> Agent {
        serde_json::from_value(row(id, "2024-03-15T00:00:00.000Z")).unwrap()
    }

    #[tokio::test]
    async fn fetch_replaces_collection_in_store_order() {
        let service = seeded();
        let mut controller = AgentListController::new(false);
        assert!(controller.loading());

        let outcome = controller.fetch_agents(&service).await;

        assert_eq!(outcome, FetchOutcome::Applied);
        assert_eq!(ids(&controller), vec!["new", "mid", "old"]);
        assert!(!controller.loading());
        assert!(controller.take_notifications().is_empty());
    }

    #[test]
    fn fetch_result_is_taken_verbatim() {
        let mut controller = AgentListController::new(false);
        let ticket = controller.begin_fetch();
        controller.finish_fetch(ticket, Ok(Some(vec![agent("b"), agent("c"), agent("a")])));
        assert_eq!(ids(&controller), vec!["b", "c", "a"]);
    }

    #[tokio::test]
    async fn failed_fetch_in_demo_mode_uses_samples_silently() {
        let service = seeded();
        service.fail_next(Operation::Select, ScriptedFailure::Status(503));
        let mut controller = AgentListController::new(true);

        let outcome = controller.fetch_agents(&service).await;

        assert_eq!(outcome, FetchOutcome::FellBack);
        assert_eq!(ids(&controller), vec!["1", "2", "3"]);
        assert!(controller.take_notifications().is_empty());
        assert!(!controller.loading());
    }

    #[tokio::test]
    async fn failed_fetch_in_production_notifies_once_and_keeps_list() {
        let service = seeded();
        let mut controller = AgentListController::new(false);
        controller.fetch_agents(&service).await;

        service.fail_next(
            Operation::Select,
            ScriptedFailure::Remote(ErrorInfo::new("permission denied")),
        );
        let outcome = controller.fetch_agents(&service).await;

        assert_eq!(outcome, FetchOutcome::Failed);
        assert_eq!(ids(&controller), vec!["new", "mid", "old"]);
        let toasts = controller.take_notifications();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].variant, ToastVariant::Destructive);
        assert_eq!(toasts[0].description, "Failed to fetch agents. Please try again.");
        assert!(!controller.loading());
    }

    #[tokio::test]
    async fn unconfigured_service_falls_back() {
        let mut controller = AgentListController::new(true);
        let outcome = controller.fetch_agents(&UnconfiguredDataService).await;
        assert_eq!(outcome, FetchOutcome::FellBack);
        assert_eq!(controller.agents().len(), 3);
    }

    #[test]
    fn fetch_without_data_keeps_collection() {
        let mut controller = AgentListController::new(false);
        let first = controller.begin_fetch();
        controller.finish_fetch(first, Ok(Some(vec![agent("a")])));
        let second = controller.begin_fetch();
        assert_eq!(controller.finish_fetch(second, Ok(None)), FetchOutcome::Applied);
        assert_eq!(ids(&controller), vec!["a"]);
        assert!(!controller.loading());
    }

    #[test]
    fn delete_removes_before_remote_answers() {
        let mut controller = AgentListController::new(false);
        let ticket = controller.begin_fetch();
        controller.finish_fetch(ticket, Ok(Some(vec![agent("a"), agent("x"), agent("b")])));

        let command = controller.begin_delete("x").unwrap();

        assert_eq!(ids(&controller), vec!["a", "b"]);
        assert_eq!(controller.pending_delete_count(), 1);
        assert_eq!(command.id(), "x");
    }

    #[tokio::test]
    async fn successful_delete_notifies_without_refetch() {
        let service = seeded();
        let mut controller = AgentListController::new(false);
        controller.fetch_agents(&service).await;

        let outcome = controller.handle_delete(&service, "mid").await;

        assert_eq!(outcome, Some(DeleteOutcome::Confirmed));
        assert_eq!(ids(&controller), vec!["new", "old"]);
        assert_eq!(service.executed_count(Operation::Select), 1);
        assert_eq!(service.executed_count(Operation::Delete), 1);
        assert_eq!(service.rows(TABLE).len(), 2);
        let toasts = controller.take_notifications();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, "Agent deleted");
        assert_eq!(toasts[0].variant, ToastVariant::Default);
    }

    #[tokio::test]
    async fn failed_delete_refetches_and_record_reappears() {
        let service = seeded();
        let mut controller = AgentListController::new(false);
        controller.fetch_agents(&service).await;
        service.fail_next(Operation::Delete, ScriptedFailure::Status(500));

        let outcome = controller.handle_delete(&service, "mid").await;

        assert_eq!(outcome, Some(DeleteOutcome::Resync));
        assert_eq!(service.executed_count(Operation::Select), 2);
        assert_eq!(ids(&controller), vec!["new", "mid", "old"]);
        let toasts = controller.take_notifications();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].description, "Failed to delete agent.");
        assert_eq!(toasts[0].variant, ToastVariant::Destructive);
    }

    #[tokio::test]
    async fn failed_delete_follows_what_the_refetch_returns() {
        let service = seeded();
        let mut controller = AgentListController::new(false);
        controller.fetch_agents(&service).await;

        // Someone else removed the row meanwhile; our delete errors anyway.
        service.replace_rows(TABLE, vec![row("new", "2024-03-01T00:00:00.000Z")]);
        service.fail_next(
            Operation::Delete,
            ScriptedFailure::Remote(ErrorInfo::new("conflict")),
        );

        controller.handle_delete(&service, "old").await;

        assert_eq!(ids(&controller), vec!["new"]);
    }

    #[test]
    fn failed_delete_restores_position_before_resync() {
        let mut controller = AgentListController::new(false);
        let ticket = controller.begin_fetch();
        controller.finish_fetch(ticket, Ok(Some(vec![agent("a"), agent("x"), agent("b")])));

        let command = controller.begin_delete("x").unwrap();
        let outcome = controller.finish_delete(command, Err(ServiceError::NotConfigured));

        assert_eq!(outcome, DeleteOutcome::Resync);
        assert_eq!(ids(&controller), vec!["a", "x", "b"]);
        assert_eq!(controller.pending_delete_count(), 0);
    }

    #[tokio::test]
    async fn deleting_unknown_id_does_nothing() {
        let service = seeded();
        let mut controller = AgentListController::new(false);
        controller.fetch_agents(&service).await;

        assert_eq!(controller.handle_delete(&service, "ghost").await, None);
        assert_eq!(service.executed_count(Operation::Delete), 0);
        assert!(controller.take_notifications().is_empty());
    }

    #[test]
    fn second_delete_of_same_id_is_ignored_while_pending() {
        let mut controller = AgentListController::new(false);
        let ticket = controller.begin_fetch();
        controller.finish_fetch(ticket, Ok(Some(vec![agent("a")])));
        assert!(controller.begin_delete("a").is_some());
        assert!(controller.begin_delete("a").is_none());
    }

    #[test]
    fn stale_fetch_results_are_dropped() {
        let mut controller = AgentListController::new(false);
        let older = controller.begin_fetch();
        let newer = controller.begin_fetch();

        assert_eq!(
            controller.finish_fetch(newer, Ok(Some(vec![agent("fresh")]))),
            FetchOutcome::Applied
        );
        assert_eq!(
            controller.finish_fetch(older, Ok(Some(vec![agent("stale")]))),
            FetchOutcome::Stale
        );
        assert_eq!(ids(&controller), vec!["fresh"]);
        assert!(!controller.loading());
    }

    #[test]
    fn loading_stays_set_until_newest_fetch_settles() {
        let mut controller = AgentListController::new(false);
        let older = controller.begin_fetch();
        let newer = controller.begin_fetch();
        controller.finish_fetch(older, Ok(Some(vec![agent("stale")])));
        assert!(controller.loading());
        controller.finish_fetch(newer, Ok(Some(vec![])));
        assert!(!controller.loading());
    }

    #[test]
    fn concurrent_fetch_does_not_resurrect_pending_delete() {
        let mut controller = AgentListController::new(false);
        let first = controller.begin_fetch();
        controller.finish_fetch(first, Ok(Some(vec![agent("a"), agent("x")])));

        let command = controller.begin_delete("x").unwrap();
        let refresh = controller.begin_fetch();
        controller.finish_fetch(refresh, Ok(Some(vec![agent("a"), agent("x")])));
        assert_eq!(ids(&controller), vec!["a"]);

        controller.finish_delete(command, Ok(()));
        assert_eq!(ids(&controller), vec!["a"]);
    }

    #[test]
    fn fetch_issued_before_confirmed_delete_does_not_resurrect_it() {
        let mut controller = AgentListController::new(false);
        let first = controller.begin_fetch();
        controller.finish_fetch(first, Ok(Some(vec![agent("a"), agent("x")])));

        let refresh = controller.begin_fetch();
        let command = controller.begin_delete("x").unwrap();
        assert_eq!(controller.finish_delete(command, Ok(())), DeleteOutcome::Confirmed);

        let outcome = controller.finish_fetch(refresh, Ok(Some(vec![agent("a"), agent("x")])));
        assert_eq!(outcome, FetchOutcome::Applied);
        assert_eq!(ids(&controller), vec!["a"]);
    }

    #[test]
    fn fetch_issued_after_confirmed_delete_is_taken_verbatim() {
        let mut controller = AgentListController::new(false);
        let first = controller.begin_fetch();
        controller.finish_fetch(first, Ok(Some(vec![agent("a"), agent("x")])));
        let command = controller.begin_delete("x").unwrap();
        controller.finish_delete(command, Ok(()));

        // A later fetch reflects the store, even if the id was recreated.
        let later = controller.begin_fetch();
        controller.finish_fetch(later, Ok(Some(vec![agent("a"), agent("x")])));
        assert_eq!(ids(&controller), vec!["a", "x"]);
    }
}
